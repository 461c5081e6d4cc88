//! Sound effects
//!
//! Both effects are decoded into memory at startup. Playback goes through a
//! kira manager; without an audio device the game runs silently.

use std::collections::HashMap;

use kira::{
    Volume,
    manager::{AudioManager as KiraManager, AudioManagerSettings, backend::DefaultBackend},
    sound::static_sound::{StaticSoundData, StaticSoundSettings},
};

use crate::assets::{AssetError, AssetPaths};
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player fired
    Shoot,
    /// Player grazed by an enemy bullet
    Hit,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 2] = [SoundEffect::Shoot, SoundEffect::Hit];
}

/// Audio manager for the game
pub struct AudioManager {
    /// `None` when no audio device is available
    manager: Option<KiraManager<DefaultBackend>>,
    sounds: HashMap<SoundEffect, StaticSoundData>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    /// Decode every effect and open the output device.
    ///
    /// Missing or undecodable files are an error even when no device is
    /// present, so a broken install is caught on every machine.
    pub fn load(paths: &AssetPaths, settings: &Settings) -> Result<Self, AssetError> {
        let mut sounds = HashMap::new();
        for effect in SoundEffect::ALL {
            let path = paths.sound(effect);
            if !path.is_file() {
                return Err(AssetError::Missing {
                    path: path.to_path_buf(),
                });
            }
            let data = StaticSoundData::from_file(path).map_err(|e| AssetError::Sound {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            log::info!("Loaded sound {:?} from {}", effect, path.display());
            sounds.insert(effect, data);
        }

        let manager = match KiraManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(m) => Some(m),
            Err(e) => {
                log::warn!("Failed to open audio device: {e} - audio disabled");
                None
            }
        };

        Ok(Self {
            manager,
            sounds,
            master_volume: settings.master_volume,
            sfx_volume: settings.sfx_volume,
            muted: settings.muted,
        })
    }

    /// Returns true if an output device is open
    pub fn is_available(&self) -> bool {
        self.manager.is_some()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Effective playback amplitude
    pub fn effective_volume(&self) -> f32 {
        effective_volume(self.master_volume, self.sfx_volume, self.muted)
    }

    /// Fire-and-forget playback
    pub fn play(&mut self, effect: SoundEffect) {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        let Some(manager) = self.manager.as_mut() else {
            return;
        };
        let Some(data) = self.sounds.get(&effect) else {
            return;
        };

        let mut settings = StaticSoundSettings::new();
        settings.volume = Volume::Amplitude(volume as f64).into();
        if let Err(e) = manager.play(data.clone().with_settings(settings)) {
            log::warn!("Failed to play {:?}: {e:?}", effect);
        }
    }
}

/// Master times effect volume, zero when muted
pub fn effective_volume(master: f32, sfx: f32, muted: bool) -> f32 {
    if muted {
        0.0
    } else {
        (master * sfx).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume() {
        assert_eq!(effective_volume(0.8, 1.0, false), 0.8);
        assert_eq!(effective_volume(0.5, 0.5, false), 0.25);
        assert_eq!(effective_volume(1.0, 1.0, true), 0.0);
        assert_eq!(effective_volume(2.0, 3.0, false), 1.0);
    }

    #[test]
    fn test_load_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AssetPaths {
            shoot_sfx: dir.path().join("nope.wav"),
            ..AssetPaths::default()
        };
        match AudioManager::load(&paths, &Settings::default()) {
            Err(AssetError::Missing { path }) => assert_eq!(path, dir.path().join("nope.wav")),
            Err(e) => panic!("unexpected error {e}"),
            Ok(_) => panic!("load should fail"),
        }
    }
}
