use crate::config::{AuthMode, AuthProfile, ConfigSnapshot, Entry};
use serde_json::Map;

/// Delta for [`apply_auth_profile_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthProfileParams {
    pub profile_id: String,
    pub provider: String,
    pub mode: AuthMode,
    pub email: Option<String>,
    /// Move the profile to the front of an existing provider order.
    pub prefer_profile_first: bool,
}

impl AuthProfileParams {
    pub fn new(profile_id: impl Into<String>, provider: impl Into<String>, mode: AuthMode) -> Self {
        Self {
            profile_id: profile_id.into(),
            provider: provider.into(),
            mode,
            email: None,
            prefer_profile_first: true,
        }
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    pub fn prefer_profile_first(mut self, prefer: bool) -> Self {
        self.prefer_profile_first = prefer;
        self
    }
}

/// Upsert an auth profile and keep its provider's explicit order consistent.
///
/// `auth.order[provider]` is only touched when it already exists: without an
/// explicit order the runtime rotates profiles by last use, and writing one
/// here would silently switch that off.
pub fn apply_auth_profile_config(mut config: ConfigSnapshot, params: &AuthProfileParams) -> ConfigSnapshot {
    let auth = config.auth_mut();

    let profile = AuthProfile {
        provider: params.provider.clone(),
        mode: params.mode,
        email: params.email.clone().filter(|email| !email.is_empty()),
        extra: Map::new(),
    };
    auth.profiles
        .get_or_insert_with(Default::default)
        .insert(params.profile_id.clone(), profile.into());

    let existing_order = auth
        .order
        .as_mut()
        .and_then(|order| order.get_mut(&params.provider));

    match existing_order {
        Some(Entry::Parsed(order)) if params.prefer_profile_first => {
            order.retain(|id| id != &params.profile_id);
            order.insert(0, params.profile_id.clone());
            tracing::debug!(
                provider = %params.provider,
                profile_id = %params.profile_id,
                "moved profile to front of provider order"
            );
        }
        Some(Entry::Parsed(order)) => {
            if !order.contains(&params.profile_id) {
                order.push(params.profile_id.clone());
            }
        }
        Some(Entry::Raw(_)) => {
            tracing::warn!(provider = %params.provider, "provider order is not a list of profile ids, left as-is");
        }
        None => {}
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_order(provider: &str, ids: &[&str]) -> ConfigSnapshot {
        serde_json::from_value(json!({
            "auth": { "order": { provider: ids } }
        }))
        .unwrap()
    }

    fn order_of<'a>(config: &'a ConfigSnapshot, provider: &str) -> Vec<&'a str> {
        config
            .provider_order(provider)
            .unwrap()
            .iter()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn test_inserts_profile() {
        let params = AuthProfileParams::new("anthropic:default", "anthropic", AuthMode::ApiKey);
        let config = apply_auth_profile_config(ConfigSnapshot::default(), &params);

        let profile = config.profile("anthropic:default").unwrap();
        assert_eq!(profile.provider, "anthropic");
        assert_eq!(profile.mode, AuthMode::ApiKey);
        assert!(profile.email.is_none());
    }

    #[test]
    fn test_email_written_only_when_present() {
        let params = AuthProfileParams::new("openai:me@example.com", "openai", AuthMode::OAuth)
            .with_email(Some("me@example.com".to_string()));
        let config = apply_auth_profile_config(ConfigSnapshot::default(), &params);
        assert_eq!(
            config.profile("openai:me@example.com").unwrap().email.as_deref(),
            Some("me@example.com")
        );

        let params = AuthProfileParams::new("openai:default", "openai", AuthMode::OAuth)
            .with_email(Some(String::new()));
        let config = apply_auth_profile_config(config, &params);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            value["auth"]["profiles"]["openai:default"],
            json!({ "provider": "openai", "mode": "oauth" })
        );
    }

    #[test]
    fn test_upsert_replaces_existing_profile() {
        let config: ConfigSnapshot = serde_json::from_value(json!({
            "auth": { "profiles": {
                "a:1": { "provider": "a", "mode": "token", "email": "old@example.com" },
                "a:2": { "provider": "a", "mode": "token" }
            } }
        }))
        .unwrap();

        let params = AuthProfileParams::new("a:1", "a", AuthMode::ApiKey);
        let config = apply_auth_profile_config(config, &params);

        let profile = config.profile("a:1").unwrap();
        assert_eq!(profile.mode, AuthMode::ApiKey);
        assert!(profile.email.is_none());
        assert!(config.profile("a:2").is_some());
    }

    #[test]
    fn test_absent_order_stays_absent() {
        let params = AuthProfileParams::new("anthropic:default", "anthropic", AuthMode::ApiKey);
        let config = apply_auth_profile_config(ConfigSnapshot::default(), &params);
        assert!(config.auth.as_ref().unwrap().order.is_none());

        let config = apply_auth_profile_config(with_order("openai", &["openai:x"]), &params);
        assert!(config.provider_order("anthropic").is_none());
        assert_eq!(order_of(&config, "openai"), vec!["openai:x"]);
    }

    #[test]
    fn test_prefer_first_moves_profile_to_front() {
        let config = with_order("anthropic", &["anthropic:work", "anthropic:default", "anthropic:home"]);
        let params = AuthProfileParams::new("anthropic:default", "anthropic", AuthMode::ApiKey);
        let config = apply_auth_profile_config(config, &params);
        assert_eq!(
            order_of(&config, "anthropic"),
            vec!["anthropic:default", "anthropic:work", "anthropic:home"]
        );
    }

    #[test]
    fn test_prefer_first_prepends_new_profile() {
        let config = with_order("anthropic", &["anthropic:work"]);
        let params = AuthProfileParams::new("anthropic:default", "anthropic", AuthMode::ApiKey);
        let config = apply_auth_profile_config(config, &params);
        assert_eq!(
            order_of(&config, "anthropic"),
            vec!["anthropic:default", "anthropic:work"]
        );
    }

    #[test]
    fn test_keep_order_appends_missing_profile() {
        let config = with_order("anthropic", &["anthropic:work"]);
        let params = AuthProfileParams::new("anthropic:default", "anthropic", AuthMode::ApiKey)
            .prefer_profile_first(false);
        let config = apply_auth_profile_config(config, &params);
        assert_eq!(
            order_of(&config, "anthropic"),
            vec!["anthropic:work", "anthropic:default"]
        );
    }

    #[test]
    fn test_keep_order_leaves_present_profile_in_place() {
        let config = with_order("anthropic", &["anthropic:work", "anthropic:default"]);
        let params = AuthProfileParams::new("anthropic:default", "anthropic", AuthMode::ApiKey)
            .prefer_profile_first(false);
        let config = apply_auth_profile_config(config, &params);
        assert_eq!(
            order_of(&config, "anthropic"),
            vec!["anthropic:work", "anthropic:default"]
        );
    }

    #[test]
    fn test_empty_order_gets_profile() {
        let config = with_order("anthropic", &[]);
        let params = AuthProfileParams::new("anthropic:default", "anthropic", AuthMode::ApiKey);
        let config = apply_auth_profile_config(config, &params);
        assert_eq!(order_of(&config, "anthropic"), vec!["anthropic:default"]);
    }

    #[test]
    fn test_malformed_siblings_survive_upsert() {
        let config: ConfigSnapshot = serde_json::from_value(json!({
            "auth": {
                "profiles": {
                    "anthropic:work": { "provider": "anthropic", "mode": "oauth" },
                    "bedrock:default": { "provider": "amazon-bedrock", "mode": "aws-sdk" }
                },
                "order": { "anthropic": ["anthropic:work"], "openai": "oops" }
            }
        }))
        .unwrap();

        let params = AuthProfileParams::new("minimax:default", "minimax", AuthMode::ApiKey);
        let config = apply_auth_profile_config(config, &params);
        let value = serde_json::to_value(&config).unwrap();

        let profiles = value["auth"]["profiles"].as_object().unwrap();
        let ids: Vec<&str> = profiles.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["anthropic:work", "bedrock:default", "minimax:default"]);
        assert_eq!(profiles["bedrock:default"]["mode"], "aws-sdk");
        assert_eq!(
            value["auth"]["order"],
            json!({ "anthropic": ["anthropic:work"], "openai": "oops" })
        );
    }

    #[test]
    fn test_malformed_target_order_left_as_is() {
        let config: ConfigSnapshot = serde_json::from_value(json!({
            "auth": { "order": { "openai": "oops" } }
        }))
        .unwrap();

        let params = AuthProfileParams::new("openai:default", "openai", AuthMode::ApiKey);
        let config = apply_auth_profile_config(config, &params);
        let value = serde_json::to_value(&config).unwrap();

        assert_eq!(value["auth"]["order"]["openai"], "oops");
        assert!(config.profile("openai:default").is_some());
    }

    #[test]
    fn test_dangling_order_entries_are_kept() {
        let config = with_order("anthropic", &["anthropic:deleted"]);
        let params = AuthProfileParams::new("anthropic:default", "anthropic", AuthMode::ApiKey);
        let config = apply_auth_profile_config(config, &params);
        assert_eq!(
            order_of(&config, "anthropic"),
            vec!["anthropic:default", "anthropic:deleted"]
        );
    }
}
