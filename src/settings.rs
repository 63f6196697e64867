//! User settings stored as settings.json in the app data directory

use crate::constants::{AUTO_ADVANCE_MS, MIN_AUTO_ADVANCE_MS, RUNWARE_API_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,
    pub fullscreen: bool,

    // Carousel
    pub auto_advance_ms: u64,
    pub show_qr_codes: bool,
    pub slides_dir: Option<String>,

    // Image generation
    pub show_generator: bool,
    pub image_api_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            fullscreen: true,
            auto_advance_ms: AUTO_ADVANCE_MS,
            show_qr_codes: true,
            slides_dir: None,
            show_generator: true,
            image_api_url: None,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    pub fn auto_advance_period(&self) -> Duration {
        Duration::from_millis(self.auto_advance_ms.max(MIN_AUTO_ADVANCE_MS))
    }

    pub fn image_api_url_or_default(&self) -> String {
        self.image_api_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| RUNWARE_API_URL.to_string())
    }

    /// Directory that default slide art paths are resolved against
    pub fn slides_dir_or_default(&self) -> PathBuf {
        self.slides_dir.as_ref().map(PathBuf::from).unwrap_or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(|p| p.join("assets")))
                .unwrap_or_else(|| PathBuf::from("assets"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path());
        assert!(settings.fullscreen);
        assert_eq!(settings.auto_advance_ms, AUTO_ADVANCE_MS);
    }

    #[test]
    fn partial_file_fills_remaining_fields() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), r#"{"auto_advance_ms": 8000}"#).unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings.auto_advance_period(), Duration::from_secs(8));
        assert!(settings.show_generator);
    }

    #[test]
    fn garbage_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "not json").unwrap();
        assert_eq!(Settings::load(dir.path()).auto_advance_ms, AUTO_ADVANCE_MS);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            fullscreen: false,
            image_api_url: Some("http://localhost:9000".into()),
            ..Default::default()
        };
        settings.save(dir.path());
        let loaded = Settings::load(dir.path());
        assert!(!loaded.fullscreen);
        assert_eq!(loaded.image_api_url_or_default(), "http://localhost:9000");
    }

    #[test]
    fn period_is_clamped() {
        let settings = Settings { auto_advance_ms: 10, ..Default::default() };
        assert_eq!(settings.auto_advance_period(), Duration::from_millis(MIN_AUTO_ADVANCE_MS));
    }

    #[test]
    fn blank_api_url_falls_back() {
        let settings = Settings { image_api_url: Some("  ".into()), ..Default::default() };
        assert_eq!(settings.image_api_url_or_default(), RUNWARE_API_URL);
    }
}
