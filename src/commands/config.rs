use crate::cli::ConfigCommands;
use crate::config::{audit_config, load_snapshot, ConfigSnapshot, Entry, ModelSelection};
use crate::error::{OnboardError, Result};
use std::path::Path;

pub fn execute(command: &ConfigCommands, config_path: &Path) -> Result<()> {
    match command {
        ConfigCommands::Show => show(config_path),
        ConfigCommands::Validate { file } => validate(file.as_deref().unwrap_or(config_path)),
    }
}

fn validate(path: &Path) -> Result<()> {
    println!("Validating {}...", path.display());
    match audit_config(path) {
        Ok(audit) if audit.is_lossless() => {
            println!("✓ Configuration is valid!");
            Ok(())
        }
        Ok(audit) => {
            println!("✗ Configuration has values the next write would discard:");
            for discarded in &audit.discarded {
                println!("  - {}", discarded);
            }
            Err(OnboardError::InvalidConfig(format!(
                "{} value(s) in {} do not match the expected shape",
                audit.discarded.len(),
                path.display()
            )))
        }
        Err(e) => {
            println!("✗ Configuration is invalid!");
            println!("  Error: {}", e);
            Err(e)
        }
    }
}

fn show(path: &Path) -> Result<()> {
    let config = load_snapshot(path)?;
    print!("{}", summarize(&config, path));
    Ok(())
}

/// Human-readable overview of the parts onboarding manages.
pub fn summarize(config: &ConfigSnapshot, path: &Path) -> String {
    let mut out = format!("Config: {}\n", path.display());

    out.push_str("\nAuth profiles:\n");
    let profiles = config.auth.as_ref().and_then(|auth| auth.profiles.as_ref());
    match profiles {
        Some(profiles) if !profiles.is_empty() => {
            for (id, entry) in profiles {
                let Some(profile) = entry.parsed() else {
                    out.push_str(&format!("  - {} (unparsed)\n", id));
                    continue;
                };
                let email = profile
                    .email
                    .as_deref()
                    .map(|email| format!(" <{}>", email))
                    .unwrap_or_default();
                out.push_str(&format!(
                    "  - {} ({}, {}){}\n",
                    id,
                    profile.provider,
                    profile.mode.as_str(),
                    email
                ));
            }
        }
        _ => out.push_str("  (none)\n"),
    }

    if let Some(order) = config.auth.as_ref().and_then(|auth| auth.order.as_ref()) {
        if !order.is_empty() {
            out.push_str("\nProfile order:\n");
            for (provider, entry) in order {
                match entry {
                    Entry::Parsed(ids) => {
                        out.push_str(&format!("  {}: {}\n", provider, ids.join(" > ")))
                    }
                    Entry::Raw(_) => out.push_str(&format!("  {}: (unparsed)\n", provider)),
                }
            }
        }
    }

    out.push_str("\nProviders:\n");
    let providers = config.models.as_ref().and_then(|models| models.providers.as_ref());
    match providers {
        Some(providers) if !providers.is_empty() => {
            for (name, entry) in providers {
                let Some(provider) = entry.parsed() else {
                    out.push_str(&format!("  {} (unparsed)\n", name));
                    continue;
                };
                out.push_str(&format!("  {} -> {}\n", name, provider.base_url));
                for model in &provider.models {
                    let line = match model {
                        Entry::Parsed(model) => {
                            let alias = config
                                .model_alias(&format!("{}/{}", name, model.id))
                                .map(|alias| format!(" [{}]", alias))
                                .unwrap_or_default();
                            format!("{}{}", model.id, alias)
                        }
                        Entry::Raw(raw) => format!(
                            "{} (unparsed)",
                            raw.get("id").and_then(|id| id.as_str()).unwrap_or("?")
                        ),
                    };
                    out.push_str(&format!("    - {}\n", line));
                }
            }
        }
        _ => out.push_str("  (none)\n"),
    }

    out.push_str("\nDefault model:\n");
    match config.default_model() {
        Some(selection) => {
            out.push_str(&format!(
                "  primary: {}\n",
                selection.primary().unwrap_or("(unset)")
            ));
            if let Some(fallbacks) = selection.fallbacks() {
                out.push_str(&format!("  fallbacks: {}\n", fallbacks.join(", ")));
            }
            if let ModelSelection::Ref(_) = selection {
                out.push_str("  (bare model reference)\n");
            }
        }
        None => out.push_str("  (unset)\n"),
    }

    out
}
