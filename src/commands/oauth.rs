use super::Target;
use crate::cli::OAuthArgs;
use crate::config::AuthMode;
use crate::credentials::{
    oauth_profile_id, AgentDirResolver, CredentialSink, CredentialWriter, OAuthCredentials,
};
use crate::error::{OnboardError, Result};
use crate::merge::{apply_auth_profile_config, AuthProfileParams};
use chrono::{DateTime, Utc};

/// Store OAuth tokens, then register the profile in the config.
pub fn execute<S, R>(target: &Target, args: &OAuthArgs, writer: &CredentialWriter<S, R>) -> Result<()>
where
    S: CredentialSink,
    R: AgentDirResolver,
{
    if args.expires_in < 0 {
        return Err(OnboardError::InvalidArgument(
            "--expires-in must not be negative".to_string(),
        ));
    }

    let email = args.email.clone().filter(|email| !email.trim().is_empty());
    let creds = OAuthCredentials {
        access: args.access.clone(),
        refresh: args.refresh.clone(),
        expires: expires_at_millis(Utc::now(), args.expires_in),
        email: email.clone(),
    };

    let profile_id = if target.dry_run {
        tracing::info!(provider = %args.provider, "dry run, credential not stored");
        oauth_profile_id(&args.provider, email.as_deref())
    } else {
        writer.write_oauth_credentials(&args.provider, creds, args.agent_dir.as_deref())?
    };

    let params = AuthProfileParams::new(&profile_id, &args.provider, AuthMode::OAuth).with_email(email);
    target.apply(|config| apply_auth_profile_config(config, &params))?;

    target.report(&format!("✓ Stored OAuth tokens for profile '{}'", profile_id));
    Ok(())
}

/// Absolute expiry in epoch milliseconds.
pub fn expires_at_millis(now: DateTime<Utc>, expires_in_secs: i64) -> i64 {
    now.timestamp_millis()
        .saturating_add(expires_in_secs.saturating_mul(1000))
}
