use super::hosted::{apply_minimax_hosted_provider_config, HostedProviderParams};
use super::presets::{LMSTUDIO_MINIMAX_MODEL_REF, MINIMAX_HOSTED_MODEL_REF};
use super::provider::apply_minimax_provider_config;
use crate::config::{ConfigSnapshot, ModelSelection, ModelSelectionConfig};

/// What survives from the previous `agents.defaults.model` when the primary
/// model is switched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCarryOver {
    /// Only the fallback chain.
    Fallbacks,
    /// Every key of a structured selection.
    All,
}

/// Point `agents.defaults.model.primary` at `model_ref`.
///
/// A previous bare-string selection carries nothing over. A `fallbacks` key is
/// only written when the previous selection had one.
pub fn set_primary_model(
    mut config: ConfigSnapshot,
    model_ref: &str,
    carry_over: SelectionCarryOver,
) -> ConfigSnapshot {
    let defaults = config.agent_defaults_mut();

    let mut selection = match (defaults.model.take(), carry_over) {
        (Some(ModelSelection::Structured(previous)), SelectionCarryOver::All) => previous,
        (Some(ModelSelection::Structured(previous)), SelectionCarryOver::Fallbacks) => {
            ModelSelectionConfig {
                fallbacks: previous.fallbacks,
                ..Default::default()
            }
        }
        _ => ModelSelectionConfig::default(),
    };
    selection.primary = Some(model_ref.to_string());
    defaults.model = Some(ModelSelection::Structured(selection));

    tracing::debug!(primary = %model_ref, "set default model");
    config
}

/// Register local LM Studio MiniMax and make it the default model.
pub fn apply_minimax_config(config: ConfigSnapshot) -> ConfigSnapshot {
    let config = apply_minimax_provider_config(config);
    set_primary_model(config, LMSTUDIO_MINIMAX_MODEL_REF, SelectionCarryOver::Fallbacks)
}

/// Register hosted MiniMax and make it the default model.
pub fn apply_minimax_hosted_config(config: ConfigSnapshot, params: &HostedProviderParams) -> ConfigSnapshot {
    let config = apply_minimax_hosted_provider_config(config, params);
    set_primary_model(config, MINIMAX_HOSTED_MODEL_REF, SelectionCarryOver::All)
}
