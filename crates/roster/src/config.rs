//! Configuration management for roster.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::index::{
    IndexSettings, MemberSearchIndex, DEFAULT_DEPARTMENT, DEFAULT_LEADERSHIP_LABEL, DEFAULT_ROLE,
};
use crate::leadership::{compile_pattern, LeadershipRoles};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "roster";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ROSTER_`, sections split by `__`)
/// 2. TOML config file at `~/.config/roster/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory labels.
    pub directory: DirectoryConfig,
    /// Leadership role extensions.
    pub leadership: LeadershipConfig,
    /// Search behaviour.
    pub search: SearchConfig,
}

/// Labels used when building the team page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Department for members who list none.
    pub other_department: String,
    /// Role for members who list none.
    pub default_role: String,
    /// Heading of the leadership group.
    pub leadership_label: String,
}

/// Additions to the built-in leadership titles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadershipConfig {
    /// Extra titles that count as leadership.
    pub extra_roles: Vec<String>,
    /// Case-insensitive regex patterns matched against the primary role.
    pub patterns: Vec<String>,
}

/// Search-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum results printed by `search` when no limit is given.
    /// Set to 0 for unlimited.
    pub default_limit: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            other_department: DEFAULT_DEPARTMENT.to_string(),
            default_role: DEFAULT_ROLE.to_string(),
            leadership_label: DEFAULT_LEADERSHIP_LABEL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("ROSTER_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a specific configuration file, which must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, cannot be parsed, or fails
    /// validation.
    pub fn check_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::config_validation(format!(
                "no configuration file at {}",
                path.display()
            )));
        }
        Self::load_from(Some(path.to_path_buf()))
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let labels = [
            ("other_department", &self.directory.other_department),
            ("default_role", &self.directory.default_role),
            ("leadership_label", &self.directory.leadership_label),
        ];
        for (name, value) in labels {
            if value.trim().is_empty() {
                return Err(Error::config_validation(format!(
                    "directory.{name} must not be blank"
                )));
            }
        }

        for pattern in &self.leadership.patterns {
            if compile_pattern(pattern).is_err() {
                return Err(Error::config_validation(format!(
                    "invalid regex pattern: {pattern}"
                )));
            }
        }

        Ok(())
    }

    /// Build the leadership predicate described by this configuration.
    #[must_use]
    pub fn leadership_roles(&self) -> LeadershipRoles {
        LeadershipRoles::with_extra(&self.leadership.extra_roles, &self.leadership.patterns)
    }

    /// Build a search index using this configuration.
    #[must_use]
    pub fn search_index(&self) -> MemberSearchIndex {
        MemberSearchIndex::with_settings(
            IndexSettings {
                other_department: self.directory.other_department.clone(),
                default_role: self.directory.default_role.clone(),
            },
            self.leadership_roles(),
        )
    }

    /// Result limit for `search`, `None` meaning unlimited.
    #[must_use]
    pub fn default_limit(&self) -> Option<usize> {
        match self.search.default_limit {
            0 => None,
            n => Some(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::MemberRecord;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.directory.other_department, "Other");
        assert_eq!(config.directory.default_role, "Member");
        assert_eq!(config.directory.leadership_label, "Leadership");
        assert!(config.leadership.extra_roles.is_empty());
        assert!(config.leadership.patterns.is_empty());
        assert_eq!(config.search.default_limit, 0);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_blank_label() {
        let mut config = Config::default();
        config.directory.default_role = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("default_role"));
    }

    #[test]
    fn test_validate_invalid_regex() {
        let mut config = Config::default();
        config.leadership.patterns = vec!["[invalid".to_string()];

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("invalid regex"));
    }

    #[test]
    fn test_default_limit() {
        let mut config = Config::default();
        assert_eq!(config.default_limit(), None);

        config.search.default_limit = 25;
        assert_eq!(config.default_limit(), Some(25));
    }

    #[test]
    fn test_search_index_uses_config() {
        let mut config = Config::default();
        config.directory.other_department = "General".to_string();
        config.leadership.extra_roles = vec!["Fest Head".to_string()];

        let index = config.search_index();
        let member = index.enrich_one(&MemberRecord::new("1", "Ann").with_designation("Fest Head"));
        assert_eq!(member.primary_department(), "General");
        assert!(member.is_leader());
    }

    #[test]
    fn test_leadership_roles_from_patterns() {
        let mut config = Config::default();
        config.leadership.patterns = vec!["^head of".to_string()];
        assert!(config.leadership_roles().matches("Head of Events"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("roster"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[directory]
leadership_label = "Core Team"

[leadership]
extra_roles = ["Fest Head"]

[search]
default_limit = 10
"#,
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.directory.leadership_label, "Core Team");
        assert_eq!(config.directory.other_department, "Other");
        assert_eq!(config.leadership.extra_roles, vec!["Fest Head"]);
        assert_eq!(config.default_limit(), Some(10));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[leadership]\npatterns = [\"(\"]\n").unwrap();

        let err = Config::load_from(Some(path)).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
    }

    #[test]
    fn test_check_file_valid() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\ndefault_limit = 3\n").unwrap();

        let config = Config::check_file(&path).unwrap();
        assert_eq!(config.default_limit(), Some(3));
    }

    #[test]
    fn test_check_file_invalid_pattern() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[leadership]\npatterns = [\"(\"]\n").unwrap();

        let err = Config::check_file(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
        assert!(err.to_string().contains("invalid regex pattern"));
    }

    #[test]
    fn test_check_file_missing() {
        let err = Config::check_file("/nonexistent/roster/config.toml").unwrap_err();
        assert!(err.to_string().contains("no configuration file"));
    }

    #[test]
    fn test_check_file_unparseable() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[search]\ndefault_limit = \"lots\"\n").unwrap();

        let err = Config::check_file(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigLoad(_)));
    }

    #[test]
    fn test_directory_config_deserialize() {
        let json = r#"{"other_department": "Misc"}"#;
        let directory: DirectoryConfig = serde_json::from_str(json).unwrap();
        assert_eq!(directory.other_department, "Misc");
        assert_eq!(directory.default_role, "Member");
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("leadership_label"));
        assert!(json.contains("extra_roles"));
    }
}
