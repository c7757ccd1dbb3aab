#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod merge;
pub mod utils;
pub mod version;
