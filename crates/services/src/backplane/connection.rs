use std::time::Duration;

use reqwest::{Client, Proxy};
use tracing::{debug, info};
use url::Url;

use super::ports::{BackplaneConfiguration, BackplaneError};

/// Timeout for the final reachability check
pub const CONNECTION_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Confirms a resolved configuration can actually reach the backplane API.
///
/// Each check builds its own client, so the proxy wiring never leaks into other
/// outbound requests made by the process.
#[derive(Debug, Clone)]
pub struct ConnectionChecker {
    timeout: Duration,
}

impl ConnectionChecker {
    pub fn new() -> Self {
        Self::with_timeout(CONNECTION_CHECK_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Send one `HEAD` to the service URL, through the proxy when one is set.
    ///
    /// Any HTTP status counts as reachable; only transport failures are errors.
    pub async fn check_connection(
        &self,
        config: &BackplaneConfiguration,
    ) -> Result<(), BackplaneError> {
        let target = Url::parse(&config.url).map_err(|e| BackplaneError::InvalidServiceUrl {
            url: config.url.clone(),
            reason: e.to_string(),
        })?;

        let builder = Client::builder().timeout(self.timeout);
        let builder = match &config.proxy_url {
            Some(proxy) => {
                let proxy_config =
                    Proxy::all(proxy.as_str()).map_err(|e| BackplaneError::InvalidProxyUrl {
                        url: proxy.to_string(),
                        reason: e.to_string(),
                    })?;
                debug!("Checking backplane connection via proxy {proxy}");
                builder.proxy(proxy_config)
            }
            None => builder.no_proxy(),
        };

        let client = builder.build().map_err(|source| BackplaneError::Connection {
            url: config.url.clone(),
            source,
        })?;

        let response = client
            .head(target)
            .send()
            .await
            .map_err(|source| BackplaneError::Connection {
                url: config.url.clone(),
                source,
            })?;

        info!(
            "Backplane API reachable at {} (status {})",
            config.url,
            response.status()
        );
        Ok(())
    }
}

impl Default for ConnectionChecker {
    fn default() -> Self {
        Self::new()
    }
}
