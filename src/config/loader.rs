//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::PackmuleConfig;
use crate::error::{PackmuleError, Result};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "packmule.json";

/// Find the config file under `dir`, if present.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE);
    path.exists().then_some(path)
}

/// Load and validate a config file. Fail-closed: parse or validation
/// trouble fails the whole load.
pub fn load(path: &Path) -> Result<PackmuleConfig> {
    if !path.exists() {
        return Err(PackmuleError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let config: PackmuleConfig =
        serde_json::from_str(&content).map_err(|err| PackmuleError::ConfigParseError {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    config.validate()?;
    Ok(config)
}

/// Load the explicit config if given, the discovered one otherwise, and
/// the built-in default set when no file exists.
///
/// An explicit path that does not exist is an error; an absent discovered
/// file is not.
pub fn load_or_default(dir: &Path, explicit: Option<&Path>) -> Result<PackmuleConfig> {
    if let Some(path) = explicit {
        return load(path);
    }
    match discover(dir) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using discovered config");
            load(&path)
        }
        None => {
            tracing::debug!("no config file, using built-in package set");
            Ok(PackmuleConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn discover_finds_config_file() {
        let temp = TempDir::new().unwrap();
        assert!(discover(temp.path()).is_none());
        write_config(temp.path(), "{}");
        assert_eq!(discover(temp.path()), Some(temp.path().join(CONFIG_FILE)));
    }

    #[test]
    fn load_valid_config() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            temp.path(),
            r#"{"packages": {"requests": ">=2.30.0", "numpy": ""}}"#,
        );
        let config = load(&path).unwrap();
        assert_eq!(config.packages.len(), 2);
        assert_eq!(config.settings.workers, 3);
    }

    #[test]
    fn load_missing_file_is_config_not_found() {
        let err = load(Path::new("/nonexistent/packmule.json")).unwrap_err();
        assert!(matches!(err, PackmuleError::ConfigNotFound { .. }));
    }

    #[test]
    fn load_invalid_json_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "{not json");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, PackmuleError::ConfigParseError { .. }));
    }

    #[test]
    fn load_rejects_malformed_constraint() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), r#"{"packages": {"x": "kaboom"}}"#);
        let err = load(&path).unwrap_err();
        assert!(matches!(err, PackmuleError::ConfigValidationError { .. }));
    }

    #[test]
    fn load_parses_settings() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            temp.path(),
            r#"{"packages": {}, "settings": {"workers": 5, "max_attempts": 2}}"#,
        );
        let config = load(&path).unwrap();
        assert_eq!(config.settings.workers, 5);
        assert_eq!(config.settings.max_attempts, 2);
        // Unspecified settings keep their defaults.
        assert_eq!(config.settings.base_delay_ms, 500);
    }

    #[test]
    fn load_or_default_uses_builtin_when_absent() {
        let temp = TempDir::new().unwrap();
        let config = load_or_default(temp.path(), None).unwrap();
        assert!(config.packages.contains_key("requests"));
    }

    #[test]
    fn load_or_default_prefers_discovered_file() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), r#"{"packages": {"only-this": ""}}"#);
        let config = load_or_default(temp.path(), None).unwrap();
        assert_eq!(config.packages.len(), 1);
    }

    #[test]
    fn load_or_default_errors_on_missing_explicit_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("elsewhere.json");
        let err = load_or_default(temp.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, PackmuleError::ConfigNotFound { .. }));
    }
}
