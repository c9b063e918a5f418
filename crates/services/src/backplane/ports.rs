use config::ConfigError;
use serde::Serialize;

use crate::proxy::VerifiedProxy;

/// Fully resolved backplane connection settings.
///
/// Built once per resolution and never cached; holds no live resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BackplaneConfiguration {
    pub url: String,
    /// Absent means connect directly
    pub proxy_url: Option<VerifiedProxy>,
    pub session_directory: String,
    pub assume_initial_arn: String,
}

#[derive(Debug, thiserror::Error)]
pub enum BackplaneError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("the requested API endpoint is not available for the OCM environment: {environment}")]
    NoEndpointForEnvironment { environment: String },

    #[error("Invalid backplane URL '{url}': {reason}")]
    InvalidServiceUrl { url: String, reason: String },

    #[error("Invalid proxy URL '{url}': {reason}")]
    InvalidProxyUrl { url: String, reason: String },

    #[error("Failed to connect to {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
