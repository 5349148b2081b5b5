//! Settings that change how lines are recognised as tasks.
//!
//! Settings can be written as TOML:
//!
//! ```toml
//! global_filter = "#task"
//! remove_global_filter = true
//! ```
//!
//! or read from the host plugin's JSON settings, which use camelCase keys
//! (`globalFilter`, `removeGlobalFilter`). Unknown keys are ignored.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SettingsResult};

/// Task recognition settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// A tag a checkbox line must contain to be treated as a task.
    /// An empty string means no global filter.
    #[serde(alias = "globalFilter", skip_serializing_if = "Option::is_none")]
    pub global_filter: Option<String>,

    /// Hide the global filter from parsed descriptions.
    #[serde(alias = "removeGlobalFilter")]
    pub remove_global_filter: bool,
}

impl Settings {
    /// Parses settings from TOML text.
    pub fn from_toml_str(content: &str) -> SettingsResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parses settings from JSON text.
    pub fn from_json_str(content: &str) -> SettingsResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Loads settings from a file. Files ending in `.json` are read as JSON,
    /// everything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Returns the global filter, treating an empty string as unset.
    pub fn global_filter(&self) -> Option<&str> {
        self.global_filter
            .as_deref()
            .map(str::trim)
            .filter(|filter| !filter.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_has_no_global_filter() {
        let settings = Settings::default();
        assert_eq!(settings.global_filter(), None);
        assert!(!settings.remove_global_filter);
    }

    #[test]
    fn test_empty_global_filter_is_unset() {
        let settings = Settings {
            global_filter: Some("  ".to_string()),
            remove_global_filter: true,
        };
        assert_eq!(settings.global_filter(), None);
    }

    #[test]
    fn test_from_toml_str() {
        let settings = Settings::from_toml_str(
            r##"
global_filter = "#task"
remove_global_filter = true
"##,
        )
        .unwrap();
        assert_eq!(settings.global_filter(), Some("#task"));
        assert!(settings.remove_global_filter);
    }

    #[test]
    fn test_from_toml_str_empty() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn test_from_json_str_camel_case() {
        let settings = Settings::from_json_str(
            r##"{"globalFilter": "#todo", "removeGlobalFilter": false, "setCreatedDate": true}"##,
        )
        .unwrap();
        assert_eq!(settings.global_filter(), Some("#todo"));
        assert!(!settings.remove_global_filter);
    }

    #[test]
    fn test_from_json_str_invalid() {
        let err = Settings::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "global_filter = \"#work\"").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.global_filter(), Some("#work"));
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r##"{{"globalFilter": "#work"}}"##).unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.global_filter(), Some("#work"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
