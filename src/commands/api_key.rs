use super::Target;
use crate::cli::{ApiKeyArgs, ApiKeyProvider};
use crate::config::AuthMode;
use crate::credentials::{default_profile_id, AgentDirResolver, CredentialSink, CredentialWriter};
use crate::error::{OnboardError, Result};
use crate::merge::{apply_auth_profile_config, AuthProfileParams};

/// Store the key, then register `provider:default` in the config.
pub fn execute<S, R>(target: &Target, args: &ApiKeyArgs, writer: &CredentialWriter<S, R>) -> Result<()>
where
    S: CredentialSink,
    R: AgentDirResolver,
{
    let key = args.key.trim();
    if key.is_empty() {
        return Err(OnboardError::InvalidArgument("API key cannot be empty".to_string()));
    }

    let provider = args.provider.provider_name();
    let agent_dir = args.agent_dir.as_deref();

    let profile_id = if target.dry_run {
        tracing::info!(provider, "dry run, credential not stored");
        default_profile_id(provider)
    } else {
        match args.provider {
            ApiKeyProvider::Anthropic => writer.set_anthropic_api_key(key, agent_dir)?,
            ApiKeyProvider::Gemini => writer.set_gemini_api_key(key, agent_dir)?,
            ApiKeyProvider::Minimax => writer.set_minimax_api_key(key, agent_dir)?,
        }
    };

    let params = AuthProfileParams::new(&profile_id, provider, AuthMode::ApiKey);
    target.apply(|config| apply_auth_profile_config(config, &params))?;

    target.report(&format!("✓ Stored API key for profile '{}'", profile_id));
    Ok(())
}
