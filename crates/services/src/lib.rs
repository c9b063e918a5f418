pub mod backplane;
pub mod environments;
pub mod proxy;

pub use backplane::{
    connection::ConnectionChecker,
    validation::{validate, write_diagnostics, ValidationReport},
    BackplaneConfiguration, BackplaneError, ConfigResolver,
};
pub use environments::{EnvironmentUrlResolver, StaticEnvironments};
pub use proxy::{HealthProbe, HttpHealthProbe, ProbeError, ProxySelector, VerifiedProxy};
