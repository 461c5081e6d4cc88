//! Asset locations and loading errors
//!
//! Every sprite and sound is loaded once at startup. A missing or broken file
//! is fatal, so loaders return `AssetError` and the binaries bail out.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audio::SoundEffect;

/// Sprites the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Player,
    Bullet,
    EnemySmall,
    EnemyLarge,
}

impl SpriteId {
    pub const ALL: [SpriteId; 4] = [
        SpriteId::Player,
        SpriteId::Bullet,
        SpriteId::EnemySmall,
        SpriteId::EnemyLarge,
    ];
}

#[derive(Debug)]
pub enum AssetError {
    Missing { path: PathBuf },
    Image { path: PathBuf, source: image::ImageError },
    Sound { path: PathBuf, message: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { path } => write!(f, "asset not found: {}", path.display()),
            Self::Image { path, source } => {
                write!(f, "failed to decode image {}: {source}", path.display())
            }
            Self::Sound { path, message } => {
                write!(f, "failed to load sound {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Image { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Relative paths of every asset, overridable from the settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub player: PathBuf,
    pub bullet: PathBuf,
    pub enemy_small: PathBuf,
    pub enemy_large: PathBuf,
    pub shoot_sfx: PathBuf,
    pub hit_sfx: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            player: "sprites/reimu0.png".into(),
            bullet: "sprites/bullet.png".into(),
            enemy_small: "sprites/enemy_small.png".into(),
            enemy_large: "sprites/enemy_large.png".into(),
            shoot_sfx: "sfx/shoot.wav".into(),
            hit_sfx: "sfx/puchun.wav".into(),
        }
    }
}

impl AssetPaths {
    pub fn sprite(&self, id: SpriteId) -> &Path {
        match id {
            SpriteId::Player => &self.player,
            SpriteId::Bullet => &self.bullet,
            SpriteId::EnemySmall => &self.enemy_small,
            SpriteId::EnemyLarge => &self.enemy_large,
        }
    }

    pub fn sound(&self, effect: SoundEffect) -> &Path {
        match effect {
            SoundEffect::Shoot => &self.shoot_sfx,
            SoundEffect::Hit => &self.hit_sfx,
        }
    }

    /// Every configured path, sprites first
    pub fn all(&self) -> impl Iterator<Item = &Path> {
        SpriteId::ALL
            .into_iter()
            .map(|id| self.sprite(id))
            .chain(SoundEffect::ALL.into_iter().map(|fx| self.sound(fx)))
    }

    /// Fail on the first path that does not exist
    pub fn ensure_present(&self) -> Result<(), AssetError> {
        match self.all().find(|p| !p.is_file()) {
            Some(path) => Err(AssetError::Missing {
                path: path.to_path_buf(),
            }),
            None => Ok(()),
        }
    }
}

/// Decode a PNG into RGBA8
pub fn load_rgba(path: &Path) -> Result<image::RgbaImage, AssetError> {
    if !path.is_file() {
        return Err(AssetError::Missing {
            path: path.to_path_buf(),
        });
    }
    let img = image::open(path).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Loaded sprite {}", path.display());
    Ok(img.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_match_layout() {
        let paths = AssetPaths::default();
        assert_eq!(paths.sprite(SpriteId::Player), Path::new("sprites/reimu0.png"));
        assert_eq!(paths.sound(SoundEffect::Hit), Path::new("sfx/puchun.wav"));
        assert_eq!(paths.all().count(), 6);
    }

    #[test]
    fn test_ensure_present_reports_first_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = AssetPaths::default();
        for (i, slot) in [
            &mut paths.player,
            &mut paths.bullet,
            &mut paths.enemy_small,
            &mut paths.enemy_large,
            &mut paths.shoot_sfx,
        ]
        .into_iter()
        .enumerate()
        {
            let file = dir.path().join(format!("asset{i}"));
            std::fs::write(&file, b"x").unwrap();
            *slot = file;
        }
        paths.hit_sfx = dir.path().join("missing.wav");

        match paths.ensure_present() {
            Err(AssetError::Missing { path }) => assert_eq!(path, dir.path().join("missing.wav")),
            other => panic!("expected missing asset, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rgba_missing_file() {
        let err = load_rgba(Path::new("definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, AssetError::Missing { .. }));
        assert!(err.to_string().contains("not/here.png"));
    }

    #[test]
    fn test_load_rgba_roundtrip_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();

        let loaded = load_rgba(&path).unwrap();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(1, 1), &image::Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_load_rgba_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(matches!(load_rgba(&path), Err(AssetError::Image { .. })));
    }
}
