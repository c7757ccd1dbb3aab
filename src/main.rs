#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;

use agent_onboard::cli::{Cli, Commands};
use agent_onboard::commands::{self, Target};
use agent_onboard::config::resolve_config_path;
use agent_onboard::credentials::{CredentialWriter, EnvAgentDirResolver, FileCredentialStore};
use agent_onboard::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match &cli.command {
        Commands::Version => commands::version::execute()?,
        command => {
            let config_path = resolve_config_path(cli.config_file.as_deref())?;
            let target = Target::new(config_path, cli.dry_run);
            run(command, &target)?;
        }
    }

    Ok(())
}

fn run(command: &Commands, target: &Target) -> agent_onboard::error::Result<()> {
    let writer = CredentialWriter::new(FileCredentialStore, EnvAgentDirResolver);

    match command {
        Commands::AuthProfile(args) => commands::auth_profile::execute(target, args),
        Commands::Minimax(command) => commands::minimax::execute(target, command),
        Commands::ApiKey(args) => commands::api_key::execute(target, args, &writer),
        Commands::OAuth(args) => commands::oauth::execute(target, args, &writer),
        Commands::Config(command) => commands::config::execute(command, &target.config_path),
        Commands::Version => commands::version::execute(),
    }
}
