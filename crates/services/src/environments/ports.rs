#[cfg(any(test, feature = "test-mocks"))]
use mockall::automock;

/// Maps a runtime environment name (e.g. "production") to its backplane URL
#[cfg_attr(any(test, feature = "test-mocks"), automock)]
pub trait EnvironmentUrlResolver: Send + Sync {
    /// `None` means no endpoint is registered for `environment`
    fn resolve_url(&self, environment: &str) -> Option<String>;
}
