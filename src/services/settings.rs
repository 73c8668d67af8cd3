//! Settings file loading
//!
//! Reads account settings from `~/.weightbot/config.json`:
//!
//! ```json
//! { "email": "me@example.com", "password": "secret", "site": "https://weightbot.com" }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::types::{Options, Result, WeightbotError};

/// Default settings path (`~/.weightbot/config.json`)
pub fn default_settings_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new()
        .ok_or_else(|| WeightbotError::Config("Cannot determine home directory".into()))?;
    Ok(base_dirs.home_dir().join(".weightbot").join("config.json"))
}

/// Load options from `path`. A missing file yields empty options;
/// an unreadable or invalid one is a config error.
pub fn load_settings(path: &Path) -> Result<Options> {
    if !path.exists() {
        return Ok(Options::default());
    }
    let content = fs::read_to_string(path).map_err(|e| {
        WeightbotError::Config(format!("Cannot read settings file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        WeightbotError::Config(format!("Invalid settings file {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let options = load_settings(&dir.path().join("config.json")).unwrap();
        assert!(options.email.is_none());
        assert!(options.password.is_none());
        assert!(options.site.is_none());
    }

    #[test]
    fn test_load_full_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"email": "me@example.com", "password": "secret", "site": "http://localhost:9000"}"#,
        )
        .unwrap();

        let options = load_settings(&path).unwrap();
        assert_eq!(options.email.as_deref(), Some("me@example.com"));
        assert_eq!(options.password.as_deref(), Some("secret"));
        assert_eq!(options.site.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"email": "me@example.com"}"#).unwrap();

        let options = load_settings(&path).unwrap();
        assert_eq!(options.email.as_deref(), Some("me@example.com"));
        assert!(options.password.is_none());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_settings(&path),
            Err(WeightbotError::Config(_))
        ));
    }

    #[test]
    fn test_unreadable_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        // A directory exists but cannot be read as a file
        let err = load_settings(dir.path()).unwrap_err();
        assert!(matches!(err, WeightbotError::Config(ref msg) if msg.contains("Cannot read")));
    }

    #[test]
    fn test_default_path_under_home() {
        let path = default_settings_path().unwrap();
        assert!(path.ends_with(".weightbot/config.json"));
    }
}
