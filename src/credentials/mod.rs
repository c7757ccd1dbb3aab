//! Credential persistence seams.
//!
//! The merge engine never writes secrets. Onboarding flows hand credentials to
//! a [`CredentialSink`] together with the agent directory they belong to,
//! defaulting that directory through an [`AgentDirResolver`].

pub mod store;

pub use store::{EnvAgentDirResolver, FileCredentialStore};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A stored credential. `type` on the wire selects the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credential {
    ApiKey {
        provider: String,
        key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email: Option<String>,
    },
    #[serde(rename = "oauth")]
    OAuth {
        provider: String,
        access: String,
        refresh: String,
        /// Expiry in milliseconds since the Unix epoch.
        expires: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email: Option<String>,
    },
    Token {
        provider: String,
        token: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expires: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email: Option<String>,
    },
}

impl Credential {
    pub fn provider(&self) -> &str {
        match self {
            Credential::ApiKey { provider, .. }
            | Credential::OAuth { provider, .. }
            | Credential::Token { provider, .. } => provider,
        }
    }
}

/// Tokens returned by an OAuth login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCredentials {
    pub access: String,
    pub refresh: String,
    pub expires: i64,
    pub email: Option<String>,
}

/// One credential write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialUpsert {
    pub profile_id: String,
    pub credential: Credential,
    pub agent_dir: PathBuf,
}

/// Persists credentials.
pub trait CredentialSink {
    fn upsert_auth_profile(&self, upsert: CredentialUpsert) -> Result<()>;
}

/// Supplies the agent directory when the caller did not pass one.
pub trait AgentDirResolver {
    fn resolve_default_agent_dir(&self) -> Result<PathBuf>;
}

impl<F> AgentDirResolver for F
where
    F: Fn() -> Result<PathBuf>,
{
    fn resolve_default_agent_dir(&self) -> Result<PathBuf> {
        self()
    }
}

/// Writes provider credentials through a sink. Errors from the sink or the
/// resolver are returned as-is.
pub struct CredentialWriter<S, R> {
    sink: S,
    resolver: R,
}

impl<S: CredentialSink, R: AgentDirResolver> CredentialWriter<S, R> {
    pub fn new(sink: S, resolver: R) -> Self {
        Self { sink, resolver }
    }

    /// Store OAuth tokens under `provider:email`, or `provider:default`
    /// when the login did not report an email. Returns the profile id.
    pub fn write_oauth_credentials(
        &self,
        provider: &str,
        creds: OAuthCredentials,
        agent_dir: Option<&Path>,
    ) -> Result<String> {
        let profile_id = oauth_profile_id(provider, creds.email.as_deref());
        let credential = Credential::OAuth {
            provider: provider.to_string(),
            access: creds.access,
            refresh: creds.refresh,
            expires: creds.expires,
            email: creds.email,
        };
        self.write(profile_id.clone(), credential, agent_dir)?;
        Ok(profile_id)
    }

    pub fn set_anthropic_api_key(&self, key: &str, agent_dir: Option<&Path>) -> Result<String> {
        self.write_api_key("anthropic", key, agent_dir)
    }

    /// Gemini keys are stored under the `google` provider.
    pub fn set_gemini_api_key(&self, key: &str, agent_dir: Option<&Path>) -> Result<String> {
        self.write_api_key("google", key, agent_dir)
    }

    pub fn set_minimax_api_key(&self, key: &str, agent_dir: Option<&Path>) -> Result<String> {
        self.write_api_key("minimax", key, agent_dir)
    }

    fn write_api_key(&self, provider: &str, key: &str, agent_dir: Option<&Path>) -> Result<String> {
        let profile_id = default_profile_id(provider);
        let credential = Credential::ApiKey {
            provider: provider.to_string(),
            key: key.to_string(),
            email: None,
        };
        self.write(profile_id.clone(), credential, agent_dir)?;
        Ok(profile_id)
    }

    fn write(&self, profile_id: String, credential: Credential, agent_dir: Option<&Path>) -> Result<()> {
        let agent_dir = match agent_dir {
            Some(dir) => dir.to_path_buf(),
            None => self.resolver.resolve_default_agent_dir()?,
        };
        tracing::debug!(
            profile_id = %profile_id,
            agent_dir = %agent_dir.display(),
            "writing credential"
        );
        self.sink.upsert_auth_profile(CredentialUpsert {
            profile_id,
            credential,
            agent_dir,
        })
    }
}

/// `provider:default`
pub fn default_profile_id(provider: &str) -> String {
    format!("{}:default", provider)
}

/// `provider:email`, or `provider:default` without an email.
pub fn oauth_profile_id(provider: &str, email: Option<&str>) -> String {
    match email {
        Some(email) => format!("{}:{}", provider, email),
        None => default_profile_id(provider),
    }
}
