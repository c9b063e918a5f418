pub mod ports;

use std::collections::HashMap;

use config::EnvLookup;
use tracing::warn;

#[cfg(any(test, feature = "test-mocks"))]
pub use ports::MockEnvironmentUrlResolver;
pub use ports::EnvironmentUrlResolver;

/// Registry entries in the form `name=url,name=url`
pub const BACKPLANE_ENVIRONMENTS_ENV_NAME: &str = "BACKPLANE_ENVIRONMENTS";

/// Fixed name→URL registry of runtime environments
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironments {
    urls: HashMap<String, String>,
}

impl StaticEnvironments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_environment(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.urls.insert(name.into(), url.into());
        self
    }

    /// Load from `BACKPLANE_ENVIRONMENTS`; malformed entries are skipped
    pub fn from_env(env: &dyn EnvLookup) -> Self {
        let mut registry = Self::new();
        let Some(raw) = env.lookup(BACKPLANE_ENVIRONMENTS_ENV_NAME) else {
            return registry;
        };

        for entry in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match entry.split_once('=') {
                Some((name, url)) if !name.trim().is_empty() && !url.trim().is_empty() => {
                    registry
                        .urls
                        .insert(name.trim().to_string(), url.trim().to_string());
                }
                _ => warn!("Ignoring malformed {BACKPLANE_ENVIRONMENTS_ENV_NAME} entry: '{entry}'"),
            }
        }
        registry
    }
}

impl EnvironmentUrlResolver for StaticEnvironments {
    fn resolve_url(&self, environment: &str) -> Option<String> {
        self.urls.get(environment).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_registered_environment() {
        let registry = StaticEnvironments::new()
            .with_environment("production", "https://backplane.example.com")
            .with_environment("staging", "https://backplane.stage.example.com");

        assert_eq!(
            registry.resolve_url("staging").as_deref(),
            Some("https://backplane.stage.example.com")
        );
        assert_eq!(registry.resolve_url("integration"), None);
        assert_eq!(registry.resolve_url("Production"), None);
    }

    #[test]
    fn test_from_env_skips_malformed_entries() {
        let env: HashMap<String, String> = [(
            BACKPLANE_ENVIRONMENTS_ENV_NAME.to_string(),
            "production=https://prod.example.com, broken ,staging=,=https://x, stage=https://stage.example.com".to_string(),
        )]
        .into_iter()
        .collect();

        let registry = StaticEnvironments::from_env(&env);

        assert_eq!(
            registry.resolve_url("production").as_deref(),
            Some("https://prod.example.com")
        );
        assert_eq!(
            registry.resolve_url("stage").as_deref(),
            Some("https://stage.example.com")
        );
        assert_eq!(registry.resolve_url("staging"), None);
        assert_eq!(registry.resolve_url("broken"), None);
    }

    #[test]
    fn test_from_env_without_variable_is_empty() {
        let env: HashMap<String, String> = HashMap::new();
        assert_eq!(StaticEnvironments::from_env(&env).resolve_url("production"), None);
    }
}
