use std::collections::HashMap;

use crate::sources::EnvLookup;

/// Overrides the service URL; takes precedence over environment discovery.
pub const BACKPLANE_URL_ENV_NAME: &str = "BACKPLANE_URL";
/// Overrides the `proxy-url` key of the config file.
pub const BACKPLANE_PROXY_ENV_NAME: &str = "HTTPS_PROXY";
/// Overrides the location of the config file.
pub const BACKPLANE_CONFIG_PATH_ENV_NAME: &str = "BACKPLANE_CONFIG";

pub const DEFAULT_CONFIG_DIR: &str = ".config";
pub const DEFAULT_CONFIG_FILE_NAME: &str = "backplane.json";

// Keys recognized in the config file
pub const URL_KEY: &str = "url";
pub const PROXY_URL_KEY: &str = "proxy-url";
pub const SESSION_DIR_KEY: &str = "session-dir";
pub const ASSUME_INITIAL_ARN_KEY: &str = "assume-initial-arn";

/// Logging Configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub modules: HashMap<String, String>,
}

impl LoggingConfig {
    /// Load from environment variables
    pub fn from_env(env: &dyn EnvLookup) -> Self {
        let mut modules = HashMap::new();

        // Load module-specific log levels
        for (var, module) in [
            ("LOG_MODULE_CONFIG", "config"),
            ("LOG_MODULE_SERVICES", "services"),
            ("LOG_MODULE_CLI", "cli"),
        ] {
            if let Some(level) = env.lookup(var) {
                modules.insert(module.to_string(), level);
            }
        }

        Self {
            level: env.lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            format: env.lookup("LOG_FORMAT").unwrap_or_else(|| "pretty".to_string()),
            modules,
        }
    }

    /// Render as an `EnvFilter` directive string, e.g. `info,services=debug`
    pub fn filter_directive(&self) -> String {
        let mut modules: Vec<_> = self.modules.iter().collect();
        modules.sort();

        let mut filter = self.level.clone();
        for (module, level) in modules {
            filter.push_str(&format!(",{module}={level}"));
        }
        filter
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            modules: HashMap::new(),
        }
    }
}
