use super::Target;
use crate::cli::MinimaxCommands;
use crate::error::Result;
use crate::merge::{
    apply_minimax_config, apply_minimax_hosted_config, apply_minimax_hosted_provider_config,
    apply_minimax_provider_config, HostedProviderParams,
};
use crate::merge::presets::{LMSTUDIO_MINIMAX_MODEL_REF, MINIMAX_HOSTED_MODEL_REF};

pub fn execute(target: &Target, command: &MinimaxCommands) -> Result<()> {
    match command {
        MinimaxCommands::Local { provider_only } => local(target, *provider_only),
        MinimaxCommands::Hosted {
            base_url,
            provider_only,
        } => hosted(target, base_url.clone(), *provider_only),
    }
}

fn local(target: &Target, provider_only: bool) -> Result<()> {
    if provider_only {
        target.apply(apply_minimax_provider_config)?;
        target.report("✓ Registered provider 'lmstudio'");
    } else {
        target.apply(apply_minimax_config)?;
        target.report(&format!("✓ Default model set to {}", LMSTUDIO_MINIMAX_MODEL_REF));
    }
    Ok(())
}

fn hosted(target: &Target, base_url: Option<String>, provider_only: bool) -> Result<()> {
    let params = HostedProviderParams { base_url };

    let config = if provider_only {
        target.apply(|config| apply_minimax_hosted_provider_config(config, &params))?
    } else {
        target.apply(|config| apply_minimax_hosted_config(config, &params))?
    };

    let endpoint = config
        .provider("minimax")
        .map(|provider| provider.base_url.clone())
        .unwrap_or_default();
    if provider_only {
        target.report(&format!("✓ Registered provider 'minimax' at {}", endpoint));
    } else {
        target.report(&format!(
            "✓ Default model set to {} ({})",
            MINIMAX_HOSTED_MODEL_REF, endpoint
        ));
    }
    Ok(())
}
