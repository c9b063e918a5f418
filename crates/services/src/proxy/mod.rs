pub mod ports;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Proxy};
use tracing::{debug, info};
use url::Url;

#[cfg(any(test, feature = "test-mocks"))]
pub use ports::MockHealthProbe;
pub use ports::{HealthProbe, ProbeError, VerifiedProxy};

/// Liveness path appended to the service URL
pub const HEALTH_PATH: &str = "/healthz";

/// Per-candidate probe timeout; bounds selection to `PROBE_TIMEOUT * candidates`
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Probes through a proxy with a client built for that single call
#[derive(Debug, Clone)]
pub struct HttpHealthProbe {
    timeout: Duration,
}

impl HttpHealthProbe {
    pub fn new() -> Self {
        Self::with_timeout(PROBE_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpHealthProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn probe(&self, health_url: &str, proxy: &Url) -> Result<u16, ProbeError> {
        let proxy_config = Proxy::all(proxy.as_str()).map_err(|e| ProbeError::InvalidProxy {
            proxy: proxy.to_string(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .proxy(proxy_config)
            .timeout(self.timeout)
            .build()
            .map_err(|e| ProbeError::ClientBuild(e.to_string()))?;

        let response = client
            .get(health_url)
            .send()
            .await
            .map_err(|e| ProbeError::Transport {
                proxy: proxy.to_string(),
                reason: e.to_string(),
            })?;

        Ok(response.status().as_u16())
    }
}

/// Picks the first proxy candidate that can reach the backplane health endpoint.
///
/// Candidates are probed strictly in order, one at a time, with no retries.
#[derive(Clone)]
pub struct ProxySelector {
    probe: Arc<dyn HealthProbe>,
}

impl ProxySelector {
    pub fn new(probe: Arc<dyn HealthProbe>) -> Self {
        Self { probe }
    }

    /// Returns the first candidate answering `GET {service_url}/healthz` with 200.
    ///
    /// Unparseable and failing candidates are skipped; `None` means the caller
    /// should connect directly.
    pub async fn select_proxy(
        &self,
        service_url: &str,
        candidates: &[String],
    ) -> Option<VerifiedProxy> {
        let health_url = format!("{service_url}{HEALTH_PATH}");

        for candidate in candidates {
            let proxy = match Url::parse(candidate) {
                Ok(proxy) => proxy,
                Err(e) => {
                    debug!("proxy-url: '{candidate}' could not be parsed: {e}");
                    continue;
                }
            };

            match self.probe.probe(&health_url, &proxy).await {
                Ok(200) => {
                    info!("Using proxy {candidate}");
                    return Some(VerifiedProxy::new(candidate.clone()));
                }
                Ok(status) => {
                    info!("Proxy: {candidate} returned status {status}");
                }
                Err(e) => {
                    info!("Proxy: {candidate} returned an error: {e}");
                }
            }
        }

        None
    }
}
