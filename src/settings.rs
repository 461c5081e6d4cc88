//! Game settings and preferences
//!
//! Read once at startup from an optional JSON file. Anything the file leaves
//! out keeps its default.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assets::AssetPaths;
use crate::consts::TARGET_FPS;
use crate::input::ControlScheme;

/// Default settings file, relative to the working directory
pub const DEFAULT_SETTINGS_PATH: &str = "skyclad.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Timing ===
    /// Frame cap; the simulation advances once per frame
    pub target_fps: u32,

    pub controls: ControlScheme,
    pub assets: AssetPaths,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: false,
            target_fps: TARGET_FPS,
            controls: ControlScheme::default(),
            assets: AssetPaths::default(),
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "could not read settings: {e}"),
            Self::Parse(e) => write!(f, "invalid settings file: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path).map_err(SettingsError::Io)?;
        let settings: Settings = serde_json::from_str(&json).map_err(SettingsError::Parse)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings.sanitized())
    }

    /// Clamp values a hand-edited file could get wrong
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        if self.target_fps == 0 {
            self.target_fps = TARGET_FPS;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skyclad.json");
        std::fs::write(
            &path,
            r#"{ "muted": true, "assets": { "player": "art/ship.png" } }"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.assets.player, PathBuf::from("art/ship.png"));
        assert_eq!(settings.assets.bullet, PathBuf::from("sprites/bullet.png"));
        assert_eq!(settings.target_fps, 60);
        assert_eq!(settings.controls, ControlScheme::default());
    }

    #[test]
    fn test_custom_controls_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skyclad.json");
        std::fs::write(
            &path,
            r#"{ "controls": { "bindings": [ { "key": "Space", "control": "Shoot" } ] } }"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.controls.bindings.len(), 1);
        assert_eq!(
            settings.controls.bindings[0].control,
            crate::input::Control::Shoot
        );
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skyclad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::load(&path), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_sanitize_clamps() {
        let settings = Settings {
            master_volume: 4.0,
            sfx_volume: -1.0,
            target_fps: 0,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
        assert_eq!(settings.target_fps, 60);
    }
}
