pub mod connection;
pub mod ports;
pub mod validation;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::{
    config_file_path, EnvLookup, ProcessEnv, SourceReader, ASSUME_INITIAL_ARN_KEY,
    BACKPLANE_URL_ENV_NAME, PROXY_URL_KEY, SESSION_DIR_KEY, URL_KEY,
};
use tracing::{info, warn};

use crate::environments::EnvironmentUrlResolver;
use crate::proxy::{HealthProbe, HttpHealthProbe, ProxySelector};

pub use ports::{BackplaneConfiguration, BackplaneError};

/// Resolves backplane settings from env vars, the config file and environment
/// discovery, then picks a working proxy.
pub struct ConfigResolver {
    config_path: PathBuf,
    env: Arc<dyn EnvLookup>,
    environments: Arc<dyn EnvironmentUrlResolver>,
    proxy_selector: ProxySelector,
}

impl ConfigResolver {
    pub fn new(
        config_path: PathBuf,
        env: Arc<dyn EnvLookup>,
        environments: Arc<dyn EnvironmentUrlResolver>,
        probe: Arc<dyn HealthProbe>,
    ) -> Self {
        Self {
            config_path,
            env,
            environments,
            proxy_selector: ProxySelector::new(probe),
        }
    }

    /// Resolver over the process environment, the discovered config file path
    /// and HTTP health probing
    pub fn from_env(
        environments: Arc<dyn EnvironmentUrlResolver>,
    ) -> Result<Self, BackplaneError> {
        let config_path = config_file_path(&ProcessEnv)?;
        Ok(Self::new(
            config_path,
            Arc::new(ProcessEnv),
            environments,
            Arc::new(HttpHealthProbe::new()),
        ))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Build a fresh configuration for the runtime environment `environment`.
    ///
    /// The config file is re-read on every call. Failing to find a reachable
    /// proxy is not an error; the result simply carries no proxy.
    pub async fn resolve(
        &self,
        environment: &str,
    ) -> Result<BackplaneConfiguration, BackplaneError> {
        let sources = SourceReader::load(&self.config_path, self.env.as_ref())?;

        if !sources.get(URL_KEY).is_empty() {
            warn!("Manual URL configuration is deprecated, please remove URL key from Backplane configuration");
        }

        let url = self.service_url(environment)?;
        let session_directory = sources.get(SESSION_DIR_KEY);
        let assume_initial_arn = sources.get(ASSUME_INITIAL_ARN_KEY);

        let candidates = sources.get_list(PROXY_URL_KEY);
        let proxy_url = self.proxy_selector.select_proxy(&url, &candidates).await;
        if proxy_url.is_none() {
            warn!("No proxy configuration available. This may result in failing commands as backplane-api is only available from select networks.");
        }

        Ok(BackplaneConfiguration {
            url,
            proxy_url,
            session_directory,
            assume_initial_arn,
        })
    }

    /// `BACKPLANE_URL` verbatim when set, otherwise the URL registered for `environment`
    fn service_url(&self, environment: &str) -> Result<String, BackplaneError> {
        if let Some(url) = self.env.lookup(BACKPLANE_URL_ENV_NAME) {
            info!("Backplane key {BACKPLANE_URL_ENV_NAME} set via env vars: {url}");
            return Ok(url);
        }

        let url = self.environments.resolve_url(environment).ok_or_else(|| {
            BackplaneError::NoEndpointForEnvironment {
                environment: environment.to_string(),
            }
        })?;
        info!("Backplane URL retrieved via OCM environment: {url}");
        Ok(url)
    }
}
