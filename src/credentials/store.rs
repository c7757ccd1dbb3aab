use super::{AgentDirResolver, Credential, CredentialSink, CredentialUpsert};
use crate::error::{OnboardError, Result};
use crate::utils::path::{expand_tilde, state_dir};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the default agent directory.
pub const AGENT_DIR_ENV: &str = "AGENT_ONBOARD_AGENT_DIR";

pub const AUTH_PROFILES_FILE: &str = "auth-profiles.json";

const STORE_VERSION: u32 = 1;

/// Resolves `AGENT_ONBOARD_AGENT_DIR`, else `~/.agent-onboard/agents/main/agent`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvAgentDirResolver;

impl AgentDirResolver for EnvAgentDirResolver {
    fn resolve_default_agent_dir(&self) -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(AGENT_DIR_ENV) {
            let dir = dir.trim();
            if !dir.is_empty() {
                return expand_tilde(dir).ok_or_else(|| {
                    OnboardError::InvalidArgument(format!("Cannot expand agent dir: {}", dir))
                });
            }
        }
        Ok(state_dir()?.join("agents").join("main").join("agent"))
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    profiles: IndexMap<String, Credential>,
}

/// Keeps credentials in `<agent_dir>/auth-profiles.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCredentialStore;

impl FileCredentialStore {
    pub fn path_for(agent_dir: &Path) -> PathBuf {
        agent_dir.join(AUTH_PROFILES_FILE)
    }

    /// Read every stored credential for an agent directory.
    pub fn load(agent_dir: &Path) -> Result<IndexMap<String, Credential>> {
        Ok(read_store(&Self::path_for(agent_dir))?.profiles)
    }
}

impl CredentialSink for FileCredentialStore {
    fn upsert_auth_profile(&self, upsert: CredentialUpsert) -> Result<()> {
        let path = Self::path_for(&upsert.agent_dir);
        let mut store = read_store(&path)?;

        store.version = STORE_VERSION;
        store.profiles.insert(upsert.profile_id, upsert.credential);

        std::fs::create_dir_all(&upsert.agent_dir)?;
        let rendered = serde_json::to_string_pretty(&store)?;
        std::fs::write(&path, rendered + "\n")?;

        tracing::info!(path = %path.display(), "updated auth profiles");
        Ok(())
    }
}

fn read_store(path: &Path) -> Result<StoreFile> {
    if !path.exists() {
        return Ok(StoreFile::default());
    }
    let contents = std::fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(StoreFile::default());
    }
    serde_json::from_str(&contents).map_err(|err| OnboardError::CredentialStore {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}
