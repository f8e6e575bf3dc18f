//! User settings for CodeMOA
//!
//! A flat snapshot of user preferences. Every field carries a serde default
//! so settings restored from older backups deserialize cleanly, and the
//! field names match the backup wire format (camelCase).

use serde::{Deserialize, Serialize};

use super::paths::CodemoaPaths;
use crate::error::CodemoaError;

/// Theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Follow the system theme
    #[default]
    System,
    Light,
    Dark,
}

/// User settings snapshot
///
/// This struct travels inside backup envelopes, so changes here are wire
/// format changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Theme preference
    #[serde(default)]
    pub theme_mode: ThemeMode,

    /// Language tag ("ko", "en", "ja", or "system")
    #[serde(default = "default_language")]
    pub language: String,

    /// Master notification toggle
    #[serde(default = "default_true")]
    pub notification_enabled: bool,

    /// Whether gift card expiry notifications are enabled
    #[serde(default = "default_true")]
    pub expiry_notification_enabled: bool,

    /// Days before expiry at which to notify
    #[serde(default = "default_expiry_days")]
    pub expiry_notification_days: u32,

    /// Whether the app requires unlocking
    #[serde(default)]
    pub app_lock_enabled: bool,

    /// Whether biometric unlock is enabled
    #[serde(default)]
    pub biometric_enabled: bool,
}

fn default_language() -> String {
    "system".to_string()
}

fn default_true() -> bool {
    true
}

fn default_expiry_days() -> u32 {
    7
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::default(),
            language: default_language(),
            notification_enabled: true,
            expiry_notification_enabled: true,
            expiry_notification_days: default_expiry_days(),
            app_lock_enabled: false,
            biometric_enabled: false,
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or return defaults if no file exists
    pub fn load_or_create(paths: &CodemoaPaths) -> Result<Self, CodemoaError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| CodemoaError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: AppSettings = serde_json::from_str(&contents)
                .map_err(|e| CodemoaError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            Ok(AppSettings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CodemoaPaths) -> Result<(), CodemoaError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| CodemoaError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| CodemoaError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.theme_mode, ThemeMode::System);
        assert_eq!(settings.language, "system");
        assert!(settings.notification_enabled);
        assert!(settings.expiry_notification_enabled);
        assert_eq!(settings.expiry_notification_days, 7);
        assert!(!settings.app_lock_enabled);
        assert!(!settings.biometric_enabled);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"themeMode": "dark"}"#).unwrap();
        assert_eq!(settings.theme_mode, ThemeMode::Dark);
        assert_eq!(settings.language, "system");
        assert_eq!(settings.expiry_notification_days, 7);
        assert!(settings.notification_enabled);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CodemoaPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = AppSettings::default();
        settings.theme_mode = ThemeMode::Dark;
        settings.language = "ko".to_string();
        settings.app_lock_enabled = true;

        settings.save(&paths).unwrap();

        let loaded = AppSettings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_without_file_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CodemoaPaths::with_base_dir(temp_dir.path().to_path_buf());

        let loaded = AppSettings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, AppSettings::default());
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(AppSettings::default()).unwrap();
        assert!(json.get("themeMode").is_some());
        assert!(json.get("expiryNotificationDays").is_some());
        assert!(json.get("biometricEnabled").is_some());
    }
}
