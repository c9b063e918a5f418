use std::path::PathBuf;

use crate::sources::EnvLookup;
use crate::types::{BACKPLANE_CONFIG_PATH_ENV_NAME, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE_NAME};
use crate::ConfigError;

/// Location of the backplane config file.
///
/// `BACKPLANE_CONFIG` wins when set; otherwise `~/.config/backplane.json`.
pub fn config_file_path(env: &dyn EnvLookup) -> Result<PathBuf, ConfigError> {
    if let Some(path) = env.lookup(BACKPLANE_CONFIG_PATH_ENV_NAME) {
        return Ok(PathBuf::from(path));
    }

    let home = dirs::home_dir().ok_or(ConfigError::HomeDirectoryNotFound)?;
    Ok(home.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILE_NAME))
}

/// Directory holding the config file
pub fn config_directory(env: &dyn EnvLookup) -> Result<PathBuf, ConfigError> {
    let path = config_file_path(env)?;
    Ok(path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_explicit_path_env_wins() {
        let env: HashMap<String, String> = [(
            BACKPLANE_CONFIG_PATH_ENV_NAME.to_string(),
            "/etc/backplane/custom.json".to_string(),
        )]
        .into_iter()
        .collect();

        assert_eq!(
            config_file_path(&env).unwrap(),
            PathBuf::from("/etc/backplane/custom.json")
        );
        assert_eq!(
            config_directory(&env).unwrap(),
            PathBuf::from("/etc/backplane")
        );
    }

    #[test]
    fn test_default_path_under_home() {
        let env: HashMap<String, String> = HashMap::new();

        // Skip on hosts without a resolvable home directory
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                config_file_path(&env).unwrap(),
                home.join(".config").join("backplane.json")
            );
        }
    }
}
