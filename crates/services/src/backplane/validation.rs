use std::io::Write;
use std::path::Path;

use config::{ASSUME_INITIAL_ARN_KEY, SESSION_DIR_KEY, URL_KEY};
use tracing::{info, warn};

use super::ports::BackplaneConfiguration;

/// Printed when a mandatory field is missing
pub const REMEDIATION_TEMPLATE: &str = r#"Your backplane CLI Config should contain at a minimum:
{
  "url": "<url in quotes>",
  "assume-initial-arn": "<arn in quotes>"
}
NOTE: It's recommended that you define url as the BACKPLANE_URL environment variable, as manual URL configuration is deprecated
"#;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Config keys of the mandatory fields that are empty, in field order
    pub missing_fields: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.missing_fields.is_empty()
    }
}

/// Check a resolved configuration for empty mandatory fields.
///
/// The session directory is optional and only logged.
pub fn validate(config: &BackplaneConfiguration) -> ValidationReport {
    info!("Validating backplane config fields...");

    let mut missing_fields = Vec::new();

    if config.url.is_empty() {
        warn!("{URL_KEY} in backplane config is either empty or undefined, please define the field {URL_KEY}");
        missing_fields.push(URL_KEY.to_string());
    }
    if config.session_directory.is_empty() {
        warn!("{SESSION_DIR_KEY} in backplane config is either empty or undefined, please define the field {SESSION_DIR_KEY}");
    }
    if config.assume_initial_arn.is_empty() {
        warn!("{ASSUME_INITIAL_ARN_KEY} in backplane config is either empty or undefined, please define the field {ASSUME_INITIAL_ARN_KEY}");
        missing_fields.push(ASSUME_INITIAL_ARN_KEY.to_string());
    }

    let report = ValidationReport { missing_fields };
    if report.is_valid() {
        info!("Config Fields are populated and not empty");
    }
    report
}

/// Write remediation help for an invalid report: the expected shape, then the
/// raw content of the config file at `config_path` if it exists.
///
/// Writes nothing for a valid report.
pub fn write_diagnostics<W: Write>(
    out: &mut W,
    report: &ValidationReport,
    config_path: &Path,
) -> std::io::Result<()> {
    if report.is_valid() {
        return Ok(());
    }

    writeln!(out, "{REMEDIATION_TEMPLATE}")?;
    writeln!(out, "Your current specified config file shows:")?;

    if config_path.is_file() {
        let content = std::fs::read(config_path)?;
        out.write_all(&content)?;
        writeln!(out)?;
    } else {
        writeln!(out, "<no config file at {}>", config_path.display())?;
    }
    Ok(())
}
