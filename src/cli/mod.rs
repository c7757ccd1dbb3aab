use crate::config::AuthMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "agent-onboard")]
#[command(about = "Register agent auth profiles and model providers", long_about = None)]
#[command(version = env!("AGENT_ONBOARD_VERSION"))]
#[command(after_help = "\
CONFIG LOCATION:
  --config <FILE>  >  $AGENT_ONBOARD_CONFIG  >  ~/.agent-onboard/config.json
  Files ending in .toml are read and written as TOML, everything else as JSON.

EXAMPLES:
  agent-onboard minimax local                  Use MiniMax M2.1 via LM Studio
  agent-onboard minimax hosted                 Use MiniMax's hosted API
  agent-onboard api-key anthropic sk-ant-...   Store a key and register its profile
  agent-onboard --dry-run minimax hosted       Print the patched config only")]
pub struct Cli {
    /// Show debug logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Config file to patch
    #[arg(long = "config", global = true, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Print the resulting config instead of writing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add or update an auth profile
    AuthProfile(AuthProfileArgs),

    /// Register MiniMax as a model provider
    #[command(subcommand)]
    Minimax(MinimaxCommands),

    /// Store a provider API key and register its profile
    ApiKey(ApiKeyArgs),

    /// Store OAuth tokens and register the profile
    #[command(name = "oauth")]
    OAuth(OAuthArgs),

    /// Inspect the config file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Show version information
    Version,
}

#[derive(clap::Args, Debug)]
pub struct AuthProfileArgs {
    /// Profile id, conventionally `provider:name`
    #[arg(long)]
    pub profile_id: String,

    /// Provider the profile authenticates against
    #[arg(long)]
    pub provider: String,

    /// Credential kind: api_key, oauth or token
    #[arg(long)]
    pub mode: AuthMode,

    /// Account email shown for the profile
    #[arg(long)]
    pub email: Option<String>,

    /// Append to an existing provider order instead of moving the profile first
    #[arg(long)]
    pub keep_order: bool,
}

#[derive(Subcommand, Debug)]
pub enum MinimaxCommands {
    /// MiniMax M2.1 served by LM Studio on localhost
    Local {
        /// Register the provider without changing the default model
        #[arg(long)]
        provider_only: bool,
    },

    /// MiniMax's hosted API
    Hosted {
        /// Override the API endpoint
        #[arg(long)]
        base_url: Option<String>,

        /// Register the provider without changing the default model
        #[arg(long)]
        provider_only: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiKeyProvider {
    Anthropic,
    Gemini,
    Minimax,
}

impl ApiKeyProvider {
    /// Provider name used in profile ids and the config.
    pub fn provider_name(&self) -> &'static str {
        match self {
            ApiKeyProvider::Anthropic => "anthropic",
            ApiKeyProvider::Gemini => "google",
            ApiKeyProvider::Minimax => "minimax",
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ApiKeyArgs {
    /// Provider the key belongs to
    #[arg(value_enum)]
    pub provider: ApiKeyProvider,

    /// The API key
    pub key: String,

    /// Agent directory holding credentials
    #[arg(long, value_name = "DIR")]
    pub agent_dir: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct OAuthArgs {
    /// Provider that issued the tokens
    #[arg(long)]
    pub provider: String,

    /// Access token
    #[arg(long)]
    pub access: String,

    /// Refresh token
    #[arg(long)]
    pub refresh: String,

    /// Seconds until the access token expires
    #[arg(long, value_name = "SECONDS")]
    pub expires_in: i64,

    /// Account email; also names the profile
    #[arg(long)]
    pub email: Option<String>,

    /// Agent directory holding credentials
    #[arg(long, value_name = "DIR")]
    pub agent_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the config file as loaded
    Show,

    /// Check that a config file parses
    Validate {
        /// File to validate instead of the resolved config path
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_auth_profile() {
        let cli = Cli::try_parse_from([
            "agent-onboard",
            "auth-profile",
            "--profile-id",
            "anthropic:work",
            "--provider",
            "anthropic",
            "--mode",
            "token",
            "--keep-order",
        ])
        .unwrap();

        match cli.command {
            Commands::AuthProfile(args) => {
                assert_eq!(args.profile_id, "anthropic:work");
                assert_eq!(args.mode, AuthMode::Token);
                assert!(args.keep_order);
                assert!(args.email.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_mode() {
        let result = Cli::try_parse_from([
            "agent-onboard",
            "auth-profile",
            "--profile-id",
            "a:b",
            "--provider",
            "a",
            "--mode",
            "password",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "agent-onboard",
            "minimax",
            "hosted",
            "--base-url",
            "https://api.minimaxi.com/v1",
            "--dry-run",
            "--config",
            "/tmp/c.json",
        ])
        .unwrap();

        assert!(cli.dry_run);
        assert_eq!(cli.config_file, Some(PathBuf::from("/tmp/c.json")));
        assert!(matches!(
            cli.command,
            Commands::Minimax(MinimaxCommands::Hosted { ref base_url, provider_only: false })
                if base_url.as_deref() == Some("https://api.minimaxi.com/v1")
        ));
    }

    #[test]
    fn test_gemini_maps_to_google() {
        assert_eq!(ApiKeyProvider::Gemini.provider_name(), "google");
        assert_eq!(ApiKeyProvider::Anthropic.provider_name(), "anthropic");
    }
}
