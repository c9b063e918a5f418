use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::types::{BACKPLANE_PROXY_ENV_NAME, PROXY_URL_KEY};
use crate::ConfigError;

/// Read access to environment variables.
///
/// The process environment is the production source; tests hand in a plain map
/// so they never have to mutate global state.
pub trait EnvLookup: Send + Sync {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Reads from the real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Two-tier key/value store: env-backed override bindings first, the parsed
/// config file second.
///
/// A logical key is answered entirely by one tier; values from the two tiers are
/// never merged.
#[derive(Debug, Clone, Default)]
pub struct SourceReader {
    overrides: HashMap<String, String>,
    file: Map<String, Value>,
}

impl SourceReader {
    /// Build a reader from already-parsed file values, with no env bindings
    pub fn from_values(file: Map<String, Value>) -> Self {
        Self {
            overrides: HashMap::new(),
            file,
        }
    }

    /// Load the config file at `path` (if present) and bind the standard env
    /// overrides.
    ///
    /// A missing file is expected on first run and yields env-only values.
    /// Anything else at `path` that cannot be read as a file is an error.
    pub fn load<P: AsRef<Path>>(path: P, env: &dyn EnvLookup) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let file = if path.exists() {
            Self::read_file(path)?
        } else {
            debug!(path = %path.display(), "No configuration file found, using environment only");
            Map::new()
        };

        let mut reader = Self::from_values(file);
        reader.bind_env(PROXY_URL_KEY, BACKPLANE_PROXY_ENV_NAME, env);
        Ok(reader)
    }

    /// Parse a config file into its top-level JSON object
    pub fn read_file(path: &Path) -> Result<Map<String, Value>, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let value: Value =
            serde_json::from_str(&content).map_err(|source| ConfigError::ParseError {
                path: path.display().to_string(),
                source,
            })?;

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(ConfigError::NotAnObject {
                path: path.display().to_string(),
            }),
        }
    }

    /// Persist `values` as a pretty-printed JSON object, creating parent directories
    pub fn write_file(path: &Path, values: &Map<String, Value>) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(values)
            .map_err(|source| ConfigError::SerializeError { source })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Bind `key` to the environment variable `env_name`.
    ///
    /// Only a non-empty value takes effect; an unset or empty variable leaves the
    /// file value in place.
    pub fn bind_env(&mut self, key: &str, env_name: &str, env: &dyn EnvLookup) {
        if let Some(value) = env.lookup(env_name).filter(|v| !v.is_empty()) {
            info!("Backplane key {key} set via env var {env_name}");
            self.overrides.insert(key.to_string(), value);
        }
    }

    /// String value for `key`, empty if absent
    pub fn get(&self, key: &str) -> String {
        if let Some(value) = self.overrides.get(key) {
            return value.clone();
        }
        self.file.get(key).and_then(scalar_to_string).unwrap_or_default()
    }

    /// Ordered string list for `key`, empty if absent.
    ///
    /// Arrays keep their element order; a plain string is split on whitespace.
    pub fn get_list(&self, key: &str) -> Vec<String> {
        if let Some(value) = self.overrides.get(key) {
            return split_fields(value);
        }

        match self.file.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
            Some(Value::String(s)) => split_fields(s),
            Some(other) => scalar_to_string(other)
                .map(|s| split_fields(&s))
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn split_fields(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}
