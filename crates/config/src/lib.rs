// Configuration Management
//
// This crate handles configuration loading for the backplane client.
// It provides:
// - The layered environment/file key-value store (`SourceReader`)
// - Config file path discovery
// - Logging settings for binaries
//
// Resolution rules, proxy probing and validation live in the services crate.

use thiserror::Error;

pub mod paths;
pub mod sources;
pub mod types;

pub use paths::{config_directory, config_file_path};
pub use sources::{EnvLookup, ProcessEnv, SourceReader};
pub use types::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path}: {source}")]
    ParseError {
        path: String,
        source: serde_json::Error,
    },

    #[error("Configuration file {path} must contain a JSON object")]
    NotAnObject { path: String },

    #[error("Failed to serialize configuration: {source}")]
    SerializeError { source: serde_json::Error },

    #[error("Unable to determine the user home directory")]
    HomeDirectoryNotFound,
}
