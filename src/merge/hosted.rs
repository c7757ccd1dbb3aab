use super::presets::{self, ProviderPreset, MINIMAX_HOSTED_MODEL_REF};
use super::{default_models_mode, set_alias_if_unset};
use crate::config::{ConfigSnapshot, Entry, ProviderConfig};
use serde_json::Value;

/// Delta for [`apply_minimax_hosted_provider_config`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostedProviderParams {
    /// Endpoint override. Blank values fall back to the public endpoint.
    pub base_url: Option<String>,
}

/// Register a hosted provider, or refresh it if present.
///
/// Connection fields (`baseUrl`, `apiKey`, `api`) always take the preset's
/// values since hosted endpoints change between releases. The preset model is
/// appended only when no model with the same id is listed; existing models
/// and any other provider keys stay as they are.
pub fn refresh_hosted_provider(mut config: ConfigSnapshot, preset: &ProviderPreset) -> ConfigSnapshot {
    let models = config.models_mut();
    let slot = models
        .providers
        .get_or_insert_with(Default::default)
        .entry(preset.provider.clone())
        .or_insert_with(|| ProviderConfig::default().into());

    let mut provider = match std::mem::replace(slot, Entry::Raw(Value::Null)) {
        Entry::Parsed(provider) => provider,
        Entry::Raw(raw) => salvage_provider(raw, &preset.provider),
    };

    provider.base_url = preset.base_url.clone();
    provider.api_key = Some(preset.api_key.clone());
    provider.api = Some(preset.api.clone());

    if provider.has_model(&preset.model.id) {
        tracing::debug!(provider = %preset.provider, model = %preset.model.id, "model already listed");
    } else {
        provider.models.push(preset.model.clone().into());
        tracing::debug!(provider = %preset.provider, model = %preset.model.id, "appended model");
    }

    *slot = Entry::Parsed(provider);
    default_models_mode(models);
    config
}

/// Rebuild an unparseable provider record from the keys that still fit. The
/// connection fields are dropped since they are about to be overwritten.
fn salvage_provider(raw: Value, name: &str) -> ProviderConfig {
    let mut fields = match raw {
        Value::Object(fields) => fields,
        other => {
            tracing::warn!(provider = %name, value = %other, "replacing provider record that is not an object");
            return ProviderConfig::default();
        }
    };
    fields.retain(|key, _| !matches!(key.as_str(), "baseUrl" | "apiKey" | "api"));

    serde_json::from_value(Value::Object(fields)).unwrap_or_else(|err| {
        tracing::warn!(provider = %name, error = %err, "replacing unparseable provider record");
        ProviderConfig::default()
    })
}

/// Register or refresh MiniMax's hosted API.
pub fn apply_minimax_hosted_provider_config(
    mut config: ConfigSnapshot,
    params: &HostedProviderParams,
) -> ConfigSnapshot {
    set_alias_if_unset(&mut config, MINIMAX_HOSTED_MODEL_REF, "Minimax");
    refresh_hosted_provider(config, &presets::minimax_hosted(params.base_url.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ModelApi, ModelsMode};
    use serde_json::json;

    fn hosted(base_url: Option<&str>) -> HostedProviderParams {
        HostedProviderParams {
            base_url: base_url.map(str::to_string),
        }
    }

    #[test]
    fn test_registers_on_empty_config() {
        let config = apply_minimax_hosted_provider_config(ConfigSnapshot::default(), &hosted(None));

        let provider = config.provider("minimax").unwrap();
        assert_eq!(provider.base_url, "https://api.minimax.io/v1");
        assert_eq!(provider.api_key.as_deref(), Some("minimax"));
        assert_eq!(provider.api, Some(ModelApi::OpenaiCompletions));
        assert_eq!(provider.models.len(), 1);
        assert_eq!(provider.model("MiniMax-M2.1").unwrap().context_window, 200_000);
        assert_eq!(config.model_alias("minimax/MiniMax-M2.1"), Some("Minimax"));
        assert_eq!(config.models_mode(), Some(ModelsMode::Merge));
    }

    #[test]
    fn test_connection_fields_refreshed() {
        let config: ConfigSnapshot = serde_json::from_value(json!({
            "models": { "providers": { "minimax": {
                "baseUrl": "https://old.example.com/v1",
                "apiKey": "stale",
                "api": "anthropic-messages",
                "headers": { "X-Region": "cn" },
                "models": [{ "id": "MiniMax-M1", "name": "Legacy", "contextWindow": 1000 }]
            } } }
        }))
        .unwrap();

        let config = apply_minimax_hosted_provider_config(
            config,
            &hosted(Some(" https://api.minimaxi.com/v1 ")),
        );

        let provider = config.provider("minimax").unwrap();
        assert_eq!(provider.base_url, "https://api.minimaxi.com/v1");
        assert_eq!(provider.api_key.as_deref(), Some("minimax"));
        assert_eq!(provider.api, Some(ModelApi::OpenaiCompletions));
        assert_eq!(provider.extra["headers"], json!({ "X-Region": "cn" }));

        let ids: Vec<&str> = provider.model_ids().collect();
        assert_eq!(ids, vec!["MiniMax-M1", "MiniMax-M2.1"]);
        let legacy = provider.model("MiniMax-M1").unwrap();
        assert_eq!(legacy.name, "Legacy");
        assert_eq!(legacy.context_window, 1000);
    }

    #[test]
    fn test_existing_hosted_model_not_duplicated_or_changed() {
        let config: ConfigSnapshot = serde_json::from_value(json!({
            "models": { "providers": { "minimax": {
                "baseUrl": "https://api.minimax.io/v1",
                "models": [{ "id": "MiniMax-M2.1", "name": "Custom name", "maxTokens": 4096 }]
            } } }
        }))
        .unwrap();

        let config = apply_minimax_hosted_provider_config(config, &hosted(None));

        let provider = config.provider("minimax").unwrap();
        assert_eq!(provider.models.len(), 1);
        let model = provider.model("MiniMax-M2.1").unwrap();
        assert_eq!(model.name, "Custom name");
        assert_eq!(model.max_tokens, 4096);
    }

    #[test]
    fn test_malformed_model_list_replaced_by_hosted_model() {
        let config: ConfigSnapshot = serde_json::from_value(json!({
            "models": { "providers": { "minimax": { "baseUrl": "x", "models": "oops" } } }
        }))
        .unwrap();

        let config = apply_minimax_hosted_provider_config(config, &hosted(None));

        let provider = config.provider("minimax").unwrap();
        assert_eq!(provider.model_ids().collect::<Vec<_>>(), vec!["MiniMax-M2.1"]);
    }

    #[test]
    fn test_malformed_models_are_kept_and_count_for_dedup() {
        let config: ConfigSnapshot = serde_json::from_value(json!({
            "models": { "providers": { "minimax": {
                "baseUrl": "https://api.minimax.io/v1",
                "models": [
                    { "id": "MiniMax-M1" },
                    { "id": "custom", "contextWindow": 1.5e5 },
                    { "id": "MiniMax-M2.1", "maxTokens": -1 }
                ]
            } } }
        }))
        .unwrap();

        let config = apply_minimax_hosted_provider_config(config, &hosted(None));

        let provider = config.provider("minimax").unwrap();
        assert_eq!(
            provider.model_ids().collect::<Vec<_>>(),
            vec!["MiniMax-M1", "custom", "MiniMax-M2.1"]
        );
        let value = serde_json::to_value(&config).unwrap();
        let models = &value["models"]["providers"]["minimax"]["models"];
        assert_eq!(models[1], json!({ "id": "custom", "contextWindow": 1.5e5 }));
        assert_eq!(models[2], json!({ "id": "MiniMax-M2.1", "maxTokens": -1 }));
    }

    #[test]
    fn test_unparseable_provider_record_is_salvaged() {
        let config: ConfigSnapshot = serde_json::from_value(json!({
            "models": { "providers": { "minimax": {
                "baseUrl": 42,
                "headers": { "X-Region": "cn" },
                "models": [{ "id": "MiniMax-M1" }]
            } } }
        }))
        .unwrap();
        assert!(config.provider("minimax").is_none());

        let config = apply_minimax_hosted_provider_config(config, &hosted(None));

        let provider = config.provider("minimax").unwrap();
        assert_eq!(provider.base_url, "https://api.minimax.io/v1");
        assert_eq!(provider.extra["headers"], json!({ "X-Region": "cn" }));
        assert_eq!(
            provider.model_ids().collect::<Vec<_>>(),
            vec!["MiniMax-M1", "MiniMax-M2.1"]
        );
    }

    #[test]
    fn test_idempotent() {
        let params = hosted(Some("https://api.minimax.io/v1"));
        let once = apply_minimax_hosted_provider_config(ConfigSnapshot::default(), &params);
        let twice = apply_minimax_hosted_provider_config(once.clone(), &params);
        assert_eq!(once, twice);
    }
}
