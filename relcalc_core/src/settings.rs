//! # Settings and JSON Persistence
//!
//! User preferences (currency code, dark mode, decimal separator) and
//! the small JSON file helpers the rest of the crate persists through.
//! Writes go to a temporary file first and are renamed into place, so a
//! crash mid-write never leaves a truncated settings file behind.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::DecimalSeparator;

/// User preferences shared across the calculators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// ISO 4217 currency code used when formatting costs
    pub currency: String,

    /// Dark colour scheme preference
    pub dark_mode: bool,

    /// Decimal separator used when formatting numbers
    pub decimal_separator: DecimalSeparator,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency: "EUR".to_string(),
            dark_mode: false,
            decimal_separator: DecimalSeparator::Point,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        load_json(path)
    }

    /// Load settings, falling back to defaults if the file is missing
    /// or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Settings::default();
        }
        match Settings::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "falling back to default settings");
                Settings::default()
            }
        }
    }

    /// Save settings to a JSON file.
    pub fn save(&self, path: &Path) -> CalcResult<()> {
        save_json(path, self)
    }
}

/// Serialize a value to pretty JSON at `path`, atomically.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                CalcError::file_error("create_dir", parent.display().to_string(), e.to_string())
            })?;
        }
    }

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json).map_err(|e| {
        CalcError::file_error("write", tmp.display().to_string(), e.to_string())
    })?;
    fs::rename(&tmp, path).map_err(|e| {
        CalcError::file_error("rename", path.display().to_string(), e.to_string())
    })?;
    Ok(())
}

/// Deserialize a JSON file at `path`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let json = fs::read_to_string(path).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(format!("relcalc_test_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_settings_roundtrip() {
        let path = temp_path("settings.json");
        let settings = Settings {
            currency: "GBP".to_string(),
            dark_mode: true,
            decimal_separator: DecimalSeparator::Comma,
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let path = temp_path("does_not_exist.json");
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let path = temp_path("corrupt.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(Settings::load_or_default(&path), Settings::default());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_settings_json_is_camel_case() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("\"darkMode\""));
        assert!(json.contains("\"decimalSeparator\""));
    }
}
