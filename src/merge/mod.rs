//! Pure config patches applied during onboarding.
//!
//! Every function takes a [`ConfigSnapshot`] by value and returns the patched
//! snapshot. None of them fail and none of them remove anything: profiles,
//! providers, models and aliases are only ever added or updated.

pub mod auth_profile;
pub mod default_model;
pub mod hosted;
pub mod presets;
pub mod provider;

pub use auth_profile::{apply_auth_profile_config, AuthProfileParams};
pub use default_model::{
    apply_minimax_config, apply_minimax_hosted_config, set_primary_model, SelectionCarryOver,
};
pub use hosted::{apply_minimax_hosted_provider_config, refresh_hosted_provider, HostedProviderParams};
pub use presets::ProviderPreset;
pub use provider::{apply_minimax_provider_config, register_provider_if_absent};

use crate::config::{ConfigSnapshot, ModelAlias, ModelsConfig, ModelsMode};

/// Give `model_ref` a display alias unless the user already picked one.
pub(crate) fn set_alias_if_unset(config: &mut ConfigSnapshot, model_ref: &str, alias: &str) {
    let entry = config
        .agent_defaults_mut()
        .models
        .get_or_insert_with(Default::default)
        .entry(model_ref.to_string())
        .or_insert_with(|| ModelAlias::default().into());

    match entry.parsed_mut() {
        Some(settings) if settings.alias.is_none() => settings.alias = Some(alias.to_string()),
        Some(_) => {}
        None => tracing::warn!(model = %model_ref, "model settings are not an object, alias left as-is"),
    }
}

/// Registered providers extend the built-in catalog unless a mode was chosen.
pub(crate) fn default_models_mode(models: &mut ModelsConfig) {
    models.mode.get_or_insert(ModelsMode::Merge);
}
