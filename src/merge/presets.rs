//! Built-in provider records installed by the onboarding flows.

use crate::config::{InputModality, ModelApi, ModelCost, ModelDefinition, ProviderConfig};

pub const OPUS_MODEL_REF: &str = "anthropic/claude-opus-4-5";

pub const LMSTUDIO_PROVIDER: &str = "lmstudio";
pub const LMSTUDIO_BASE_URL: &str = "http://127.0.0.1:1234/v1";
pub const LMSTUDIO_MINIMAX_MODEL_ID: &str = "minimax-m2.1-gs32";
pub const LMSTUDIO_MINIMAX_MODEL_REF: &str = "lmstudio/minimax-m2.1-gs32";
const LMSTUDIO_MINIMAX_CONTEXT_WINDOW: u64 = 196_608;

pub const MINIMAX_PROVIDER: &str = "minimax";
pub const DEFAULT_MINIMAX_BASE_URL: &str = "https://api.minimax.io/v1";
pub const MINIMAX_HOSTED_MODEL_ID: &str = "MiniMax-M2.1";
pub const MINIMAX_HOSTED_MODEL_REF: &str = "minimax/MiniMax-M2.1";
const DEFAULT_MINIMAX_CONTEXT_WINDOW: u64 = 200_000;
const DEFAULT_MINIMAX_MAX_TOKENS: u64 = 8192;

/// A provider registration: connection fields plus the one model it ships with.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderPreset {
    pub provider: String,
    pub base_url: String,
    pub api_key: String,
    pub api: ModelApi,
    pub model: ModelDefinition,
}

impl ProviderPreset {
    /// Fully-qualified `provider/modelId` reference of the bundled model.
    pub fn model_ref(&self) -> String {
        format!("{}/{}", self.provider, self.model.id)
    }

    pub fn to_provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            base_url: self.base_url.clone(),
            api_key: Some(self.api_key.clone()),
            api: Some(self.api.clone()),
            models: vec![self.model.clone().into()],
            ..Default::default()
        }
    }
}

/// MiniMax M2.1 served by a local LM Studio instance.
pub fn lmstudio_minimax() -> ProviderPreset {
    ProviderPreset {
        provider: LMSTUDIO_PROVIDER.to_string(),
        base_url: LMSTUDIO_BASE_URL.to_string(),
        api_key: "lmstudio".to_string(),
        api: ModelApi::OpenaiResponses,
        model: text_model(
            LMSTUDIO_MINIMAX_MODEL_ID,
            "MiniMax M2.1 GS32",
            LMSTUDIO_MINIMAX_CONTEXT_WINDOW,
            DEFAULT_MINIMAX_MAX_TOKENS,
        ),
    }
}

/// MiniMax's hosted API. A blank or missing `base_url` falls back to the
/// public endpoint.
pub fn minimax_hosted(base_url: Option<&str>) -> ProviderPreset {
    let base_url = base_url
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_MINIMAX_BASE_URL);

    ProviderPreset {
        provider: MINIMAX_PROVIDER.to_string(),
        base_url: base_url.to_string(),
        api_key: "minimax".to_string(),
        api: ModelApi::OpenaiCompletions,
        model: text_model(
            MINIMAX_HOSTED_MODEL_ID,
            "MiniMax M2.1",
            DEFAULT_MINIMAX_CONTEXT_WINDOW,
            DEFAULT_MINIMAX_MAX_TOKENS,
        ),
    }
}

fn text_model(id: &str, name: &str, context_window: u64, max_tokens: u64) -> ModelDefinition {
    ModelDefinition {
        id: id.to_string(),
        name: name.to_string(),
        reasoning: false,
        input: vec![InputModality::Text],
        cost: ModelCost::default(),
        context_window,
        max_tokens,
        ..Default::default()
    }
}
