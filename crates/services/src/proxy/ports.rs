use async_trait::async_trait;
use url::Url;

#[cfg(any(test, feature = "test-mocks"))]
use mockall::automock;

/// Why a single proxy candidate failed its health probe
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Proxy {proxy} is not usable: {reason}")]
    InvalidProxy { proxy: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request through proxy {proxy} failed: {reason}")]
    Transport { proxy: String, reason: String },
}

/// Liveness probe of the backplane health endpoint through a forward proxy
#[cfg_attr(any(test, feature = "test-mocks"), automock)]
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Issue a GET to `health_url` routed through `proxy` and return the HTTP
    /// status code
    async fn probe(&self, health_url: &str, proxy: &Url) -> Result<u16, ProbeError>;
}

/// A proxy URL that answered the health probe with 200 OK.
///
/// Only proxy selection can construct one, so a configuration never carries a
/// proxy that was not probed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct VerifiedProxy(String);

impl VerifiedProxy {
    pub(crate) fn new(url: String) -> Self {
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for VerifiedProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for VerifiedProxy {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
