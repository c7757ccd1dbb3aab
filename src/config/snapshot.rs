//! Typed view of the agent configuration tree.
//!
//! Only the subtrees the onboarding mergers touch are modelled. Every struct
//! keeps the keys it does not know about in `extra`, so a snapshot loaded from
//! disk and written back loses nothing.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Root of the configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub auth: Option<AuthConfig>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub agents: Option<AgentsConfig>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub models: Option<ModelsConfig>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub profiles: Option<IndexMap<String, Entry<AuthProfile>>>,

    /// Explicit profile priority per provider. A provider without an entry
    /// here has its profiles resolved by recency elsewhere.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub order: Option<IndexMap<String, Entry<Vec<String>>>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthProfile {
    pub provider: String,
    pub mode: AuthMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    ApiKey,
    #[serde(rename = "oauth")]
    OAuth,
    Token,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::ApiKey => "api_key",
            AuthMode::OAuth => "oauth",
            AuthMode::Token => "token",
        }
    }
}

impl std::str::FromStr for AuthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api_key" => Ok(AuthMode::ApiKey),
            "oauth" => Ok(AuthMode::OAuth),
            "token" => Ok(AuthMode::Token),
            other => Err(format!(
                "unknown auth mode '{}' (expected api_key, oauth or token)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentsConfig {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub defaults: Option<AgentDefaults>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentDefaults {
    /// Default model selection for new sessions.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub model: Option<ModelSelection>,

    /// Per-model display settings keyed by `provider/modelId`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub models: Option<IndexMap<String, Entry<ModelAlias>>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `agents.defaults.model` is either a bare model reference or a structured
/// primary/fallback selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelSelection {
    Ref(String),
    Structured(ModelSelectionConfig),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSelectionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallbacks: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelSelection {
    /// The model reference used first, if one is configured.
    pub fn primary(&self) -> Option<&str> {
        match self {
            ModelSelection::Ref(model_ref) => Some(model_ref.as_str()),
            ModelSelection::Structured(config) => config.primary.as_deref(),
        }
    }

    pub fn fallbacks(&self) -> Option<&[String]> {
        match self {
            ModelSelection::Ref(_) => None,
            ModelSelection::Structured(config) => config.fallbacks.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelAlias {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub mode: Option<ModelsMode>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub providers: Option<IndexMap<String, Entry<ProviderConfig>>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// How configured providers combine with the runtime's built-in catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelsMode {
    Merge,
    Replace,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    #[serde(default)]
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ModelApi>,

    #[serde(default, deserialize_with = "lenient")]
    pub models: Vec<Entry<ModelDefinition>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProviderConfig {
    /// Ids of every listed model, including entries that did not parse but
    /// still carry a string `id`.
    pub fn model_ids(&self) -> impl Iterator<Item = &str> {
        self.models.iter().filter_map(|entry| match entry {
            Entry::Parsed(model) => Some(model.id.as_str()),
            Entry::Raw(raw) => raw.get("id").and_then(Value::as_str),
        })
    }

    pub fn has_model(&self, id: &str) -> bool {
        self.model_ids().any(|model_id| model_id == id)
    }

    pub fn model(&self, id: &str) -> Option<&ModelDefinition> {
        self.models
            .iter()
            .filter_map(Entry::parsed)
            .find(|model| model.id == id)
    }
}

/// Wire protocol spoken by a provider endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelApi {
    OpenaiCompletions,
    OpenaiResponses,
    AnthropicMessages,
    GoogleGenerativeAi,
    GithubCopilot,
    BedrockConverseStream,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub reasoning: bool,
    #[serde(default)]
    pub input: Vec<InputModality>,
    #[serde(default)]
    pub cost: ModelCost,
    #[serde(default)]
    pub context_window: u64,
    #[serde(default)]
    pub max_tokens: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputModality {
    Text,
    Image,
    #[serde(untagged)]
    Other(String),
}

/// Price per million tokens. Kept as JSON numbers so `0` stays `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelCost {
    pub input: Number,
    pub output: Number,
    pub cache_read: Number,
    pub cache_write: Number,
}

impl Default for ModelCost {
    fn default() -> Self {
        Self {
            input: Number::from(0u64),
            output: Number::from(0u64),
            cache_read: Number::from(0u64),
            cache_write: Number::from(0u64),
        }
    }
}

/// A map value or list item that either parsed as `T` or is carried through
/// verbatim, so one bad entry never takes its siblings with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entry<T> {
    Parsed(T),
    Raw(Value),
}

impl<T> Entry<T> {
    pub fn parsed(&self) -> Option<&T> {
        match self {
            Entry::Parsed(value) => Some(value),
            Entry::Raw(_) => None,
        }
    }

    pub fn parsed_mut(&mut self) -> Option<&mut T> {
        match self {
            Entry::Parsed(value) => Some(value),
            Entry::Raw(_) => None,
        }
    }
}

impl<T> From<T> for Entry<T> {
    fn from(value: T) -> Self {
        Entry::Parsed(value)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Entry<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match T::deserialize(&value) {
            Ok(parsed) => Ok(Entry::Parsed(parsed)),
            Err(err) => {
                tracing::warn!(error = %err, "keeping unparseable config entry as-is");
                Ok(Entry::Raw(value))
            }
        }
    }
}

impl ConfigSnapshot {
    pub fn profile(&self, profile_id: &str) -> Option<&AuthProfile> {
        self.auth.as_ref()?.profiles.as_ref()?.get(profile_id)?.parsed()
    }

    pub fn provider_order(&self, provider: &str) -> Option<&[String]> {
        self.auth
            .as_ref()?
            .order
            .as_ref()?
            .get(provider)?
            .parsed()
            .map(Vec::as_slice)
    }

    pub fn provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.models.as_ref()?.providers.as_ref()?.get(name)?.parsed()
    }

    pub fn model_alias(&self, model_ref: &str) -> Option<&str> {
        self.agent_defaults()?
            .models
            .as_ref()?
            .get(model_ref)?
            .parsed()?
            .alias
            .as_deref()
    }

    pub fn default_model(&self) -> Option<&ModelSelection> {
        self.agent_defaults()?.model.as_ref()
    }

    pub fn models_mode(&self) -> Option<ModelsMode> {
        self.models.as_ref()?.mode
    }

    fn agent_defaults(&self) -> Option<&AgentDefaults> {
        self.agents.as_ref()?.defaults.as_ref()
    }

    pub(crate) fn auth_mut(&mut self) -> &mut AuthConfig {
        self.auth.get_or_insert_with(AuthConfig::default)
    }

    pub(crate) fn agent_defaults_mut(&mut self) -> &mut AgentDefaults {
        self.agents
            .get_or_insert_with(AgentsConfig::default)
            .defaults
            .get_or_insert_with(AgentDefaults::default)
    }

    pub(crate) fn models_mut(&mut self) -> &mut ModelsConfig {
        self.models.get_or_insert_with(ModelsConfig::default)
    }
}

/// Deserialize a subtree, treating a value of the wrong shape as absent.
/// Maps and lists hold [`Entry`] values, so this only fires when the
/// container itself is the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            tracing::warn!(error = %err, "ignoring malformed config subtree");
            Ok(T::default())
        }
    }
}
