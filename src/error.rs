use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OnboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Could not determine home directory. Set HOME or pass an explicit path.")]
    HomeNotFound,

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Credential store error at {path}: {reason}")]
    CredentialStore { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, OnboardError>;
