use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::errors::{Result, TrailError};

/// Optional user configuration read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub defaults: DefaultsSection,
}

/// The `[defaults]` section. Command-line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsSection {
    pub profile: Option<String>,
    pub region: Option<String>,
    pub max_results: Option<i64>,
    pub truncate_user_name: Option<bool>,
    pub truncate_user_agent: Option<bool>,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// tried and a missing file yields the empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(TrailError::InvalidConfig {
                        detail: format!("config file not found: {}", path.display()),
                    });
                }
                Self::read(path)
            }
            None => match default_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| TrailError::InvalidConfig {
            detail: format!("Failed to parse {}: {e}", path.display()),
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}

/// `<config_dir>/cloudtrail-cli/config.toml`, when a config dir exists.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cloudtrail-cli").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn parses_defaults_section() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            &tmp,
            "[defaults]\nprofile = \"audit\"\nregion = \"eu-west-1\"\nmax_results = 100\ntruncate_user_agent = true\n",
        );

        let config = AppConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.defaults.profile.as_deref(), Some("audit"));
        assert_eq!(config.defaults.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.defaults.max_results, Some(100));
        assert_eq!(config.defaults.truncate_user_agent, Some(true));
        assert_eq!(config.defaults.truncate_user_name, None);
    }

    #[test]
    fn empty_file_is_empty_config() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "");
        assert_eq!(AppConfig::load(Some(path.as_path())).unwrap(), AppConfig::default());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/config.toml"))).unwrap_err();
        assert!(matches!(err, TrailError::InvalidConfig { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "[defaults]\nmax_result = 5\n");
        let err = AppConfig::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, TrailError::InvalidConfig { .. }));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "[defaults]\nmax_results = \"many\"\n");
        assert!(AppConfig::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn default_path_is_under_tool_directory() {
        if let Some(path) = default_path() {
            assert!(path.ends_with("cloudtrail-cli/config.toml"));
        }
    }
}
