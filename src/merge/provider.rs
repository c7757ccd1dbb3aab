use super::presets::{self, ProviderPreset, OPUS_MODEL_REF};
use super::{default_models_mode, set_alias_if_unset};
use crate::config::ConfigSnapshot;

/// Install `preset` under `models.providers` unless that provider name is
/// already registered.
///
/// Registration is all-or-nothing: an existing record is left exactly as the
/// user configured it, including its model list.
pub fn register_provider_if_absent(mut config: ConfigSnapshot, preset: &ProviderPreset) -> ConfigSnapshot {
    let models = config.models_mut();
    let providers = models.providers.get_or_insert_with(Default::default);

    if providers.contains_key(&preset.provider) {
        tracing::debug!(provider = %preset.provider, "provider already registered, leaving it untouched");
    } else {
        providers.insert(preset.provider.clone(), preset.to_provider_config().into());
        tracing::debug!(provider = %preset.provider, "registered provider");
    }

    default_models_mode(models);
    config
}

/// Register the local LM Studio provider serving MiniMax M2.1.
pub fn apply_minimax_provider_config(mut config: ConfigSnapshot) -> ConfigSnapshot {
    let preset = presets::lmstudio_minimax();
    set_alias_if_unset(&mut config, OPUS_MODEL_REF, "Opus");
    set_alias_if_unset(&mut config, &preset.model_ref(), "Minimax");
    register_provider_if_absent(config, &preset)
}
