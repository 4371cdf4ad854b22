//! Layered key-value configuration for project metadata.
//!
//! Values come from a JSON object file, then `PROJUP_`-prefixed environment
//! variables, then `--set key=value` overrides; later layers win. Lookups
//! keep "absent" distinct from "present but empty".

use crate::errors::{ProjupError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Prefix for environment variable overrides. The remainder of the variable
/// name is used as the configuration key unchanged.
pub const ENV_PREFIX: &str = "PROJUP_";

/// Config file picked up from the target directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "projup.json";

#[derive(Debug, Clone, Default)]
pub struct UpgradeConfig {
    values: BTreeMap<String, String>,
}

impl UpgradeConfig {
    pub fn new() -> Self {
        UpgradeConfig::default()
    }

    /// Load the full layer stack. `config_file` of `None` means the default
    /// file in `dir`, which may be absent; an explicitly named file must
    /// exist.
    pub fn load(dir: &Path, config_file: Option<&Path>, overrides: &[String]) -> Result<Self> {
        let mut config = UpgradeConfig::new();

        match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ProjupError::InvalidConfig(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                config.merge_json_file(path)?;
            }
            None => {
                let default = dir.join(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    config.merge_json_file(&default)?;
                }
            }
        }

        config.merge_env(std::env::vars());
        config.merge_overrides(overrides)?;
        Ok(config)
    }

    /// Point query. Absence is `None`; an empty string is a present value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    fn merge_json_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)?;
        let parsed: BTreeMap<String, serde_json::Value> = serde_json::from_str(&content)?;
        for (key, value) in parsed {
            match value {
                serde_json::Value::String(s) => {
                    self.values.insert(key, s);
                }
                other => {
                    return Err(ProjupError::InvalidConfig(format!(
                        "value for '{}' must be a string, got {}",
                        key, other
                    )));
                }
            }
        }
        Ok(())
    }

    fn merge_env<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            if let Some(key) = name.strip_prefix(ENV_PREFIX) {
                if !key.is_empty() {
                    self.values.insert(key.to_string(), value);
                }
            }
        }
    }

    fn merge_overrides(&mut self, overrides: &[String]) -> Result<()> {
        for pair in overrides {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| ProjupError::InvalidSetFormat(pair.clone()))?;
            if key.is_empty() {
                return Err(ProjupError::InvalidSetFormat(pair.clone()));
            }
            self.values.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_absent_key_is_none_but_empty_string_is_present() {
        let mut config = UpgradeConfig::new();
        config.set("targetFramework", "");

        assert_eq!(config.get("targetFramework"), Some(""));
        assert_eq!(config.get("company"), None);
    }

    #[test]
    fn test_json_file_layer() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(DEFAULT_CONFIG_FILE),
            r#"{ "targetFramework": "net6.0", "authors": "Example Team" }"#,
        )
        .unwrap();

        let config = UpgradeConfig::load(temp_dir.path(), None, &[]).unwrap();
        assert_eq!(config.get("targetFramework"), Some("net6.0"));
        assert_eq!(config.get("authors"), Some("Example Team"));
    }

    #[test]
    fn test_missing_default_file_is_empty_layer() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = UpgradeConfig::load(temp_dir.path(), None, &[]).unwrap();
        assert_eq!(config.get("targetFramework"), None);
    }

    #[test]
    fn test_named_config_file_must_exist() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let missing = temp_dir.path().join("other.json");
        let result = UpgradeConfig::load(temp_dir.path(), Some(&missing), &[]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_non_string_json_value_is_rejected() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(DEFAULT_CONFIG_FILE),
            r#"{ "targetFramework": 6 }"#,
        )
        .unwrap();

        let result = UpgradeConfig::load(temp_dir.path(), None, &[]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("targetFramework"));
    }

    #[test]
    fn test_env_layer_strips_prefix_and_ignores_other_vars() {
        let mut config = UpgradeConfig::new();
        config.merge_env(vec![
            ("PROJUP_company".to_string(), "Acme".to_string()),
            ("PATH".to_string(), "/usr/bin".to_string()),
        ]);

        assert_eq!(config.get("company"), Some("Acme"));
        assert_eq!(config.get("PATH"), None);
    }

    #[test]
    fn test_overrides_win_over_file_values() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(DEFAULT_CONFIG_FILE),
            r#"{ "targetFramework": "net472" }"#,
        )
        .unwrap();

        let overrides = vec!["targetFramework=net6.0".to_string()];
        let config = UpgradeConfig::load(temp_dir.path(), None, &overrides).unwrap();
        assert_eq!(config.get("targetFramework"), Some("net6.0"));
    }

    #[test]
    fn test_override_value_may_contain_equals() {
        let mut config = UpgradeConfig::new();
        config
            .merge_overrides(&["description=a=b".to_string()])
            .unwrap();
        assert_eq!(config.get("description"), Some("a=b"));
    }

    #[test]
    fn test_malformed_override_is_rejected() {
        let mut config = UpgradeConfig::new();
        assert!(config.merge_overrides(&["no-equals".to_string()]).is_err());
        assert!(config.merge_overrides(&["=value".to_string()]).is_err());
    }
}
