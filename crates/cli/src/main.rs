use std::sync::Arc;

use anyhow::{bail, Context};
use config::{EnvLookup, LoggingConfig, ProcessEnv};
use services::{validate, write_diagnostics, ConfigResolver, ConnectionChecker, StaticEnvironments};

/// Names the active runtime environment; defaults to production
const OCM_ENVIRONMENT_ENV_NAME: &str = "OCM_ENVIRONMENT";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = ProcessEnv;
    init_tracing(&LoggingConfig::from_env(&env));

    let environment = env
        .lookup(OCM_ENVIRONMENT_ENV_NAME)
        .unwrap_or_else(|| "production".to_string());
    let environments = Arc::new(StaticEnvironments::from_env(&env));

    let resolver = ConfigResolver::from_env(environments)
        .context("locating backplane configuration")?;
    let config = resolver
        .resolve(&environment)
        .await
        .context("resolving backplane configuration")?;

    let report = validate(&config);
    if !report.is_valid() {
        write_diagnostics(&mut std::io::stdout().lock(), &report, resolver.config_path())?;
        bail!(
            "backplane configuration is missing: {}",
            report.missing_fields.join(", ")
        );
    }

    ConnectionChecker::new()
        .check_connection(&config)
        .await
        .context("checking connection to the backplane API")?;

    tracing::info!(url = %config.url, "Backplane configuration is usable");
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init_tracing(logging_config: &LoggingConfig) {
    let filter = logging_config.filter_directive();

    // Logs go to stderr so stdout carries only the resolved configuration
    match logging_config.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        "compact" => {
            tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
