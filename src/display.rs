//! Display modes and window setup

use winit::dpi::PhysicalSize;
use winit::window::{Fullscreen, Window, WindowAttributes};

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Title of the game window
pub const GAME_TITLE: &str = "東方空想者 ~ Skyclad Iconoclast v1.06";

/// How the game window is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// 640x480 window
    #[default]
    Windowed,
    /// 1280x960 exclusive fullscreen
    Fullscreen,
}

impl DisplayMode {
    /// Interpret the game's positional argument.
    ///
    /// Only `"windowed"` (or no argument) selects a window; any other value
    /// means fullscreen.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("windowed") => Self::Windowed,
            Some(_) => Self::Fullscreen,
        }
    }

    /// Argument that selects this mode
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Windowed => "windowed",
            Self::Fullscreen => "fullscreen",
        }
    }

    /// Physical surface size in pixels
    pub fn resolution(self) -> (u32, u32) {
        let (w, h) = (PLAYFIELD_WIDTH as u32, PLAYFIELD_HEIGHT as u32);
        match self {
            Self::Windowed => (w, h),
            Self::Fullscreen => (w * 2, h * 2),
        }
    }

    /// Window attributes for creating the game window in this mode
    pub fn window_attributes(self, title: &str) -> WindowAttributes {
        let (w, h) = self.resolution();
        Window::default_attributes()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(w, h))
            .with_resizable(false)
    }

    /// Switch an existing window into this mode
    pub fn apply(self, window: &Window) {
        match self {
            Self::Windowed => {
                window.set_fullscreen(None);
                let (w, h) = self.resolution();
                let _ = window.request_inner_size(PhysicalSize::new(w, h));
            }
            Self::Fullscreen => {
                let fullscreen = match window.current_monitor() {
                    Some(monitor) => {
                        // Closest video mode by pixel area
                        let (w, h) = self.resolution();
                        let target_area = w as u64 * h as u64;
                        let best = monitor.video_modes().min_by_key(|vm| {
                            let s = vm.size();
                            (s.width as u64 * s.height as u64).abs_diff(target_area)
                        });
                        match best {
                            Some(vm) => {
                                log::info!("Fullscreen video mode {:?}", vm.size());
                                Fullscreen::Exclusive(vm)
                            }
                            None => Fullscreen::Borderless(Some(monitor)),
                        }
                    }
                    None => Fullscreen::Borderless(None),
                };
                window.set_fullscreen(Some(fullscreen));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_arg() {
        assert_eq!(DisplayMode::from_arg(None), DisplayMode::Windowed);
        assert_eq!(DisplayMode::from_arg(Some("windowed")), DisplayMode::Windowed);
        assert_eq!(DisplayMode::from_arg(Some("fullscreen")), DisplayMode::Fullscreen);
        // Anything that is not exactly "windowed"
        assert_eq!(DisplayMode::from_arg(Some("Windowed")), DisplayMode::Fullscreen);
        assert_eq!(DisplayMode::from_arg(Some("")), DisplayMode::Fullscreen);
    }

    #[test]
    fn test_resolution() {
        assert_eq!(DisplayMode::Windowed.resolution(), (640, 480));
        assert_eq!(DisplayMode::Fullscreen.resolution(), (1280, 960));
    }

    #[test]
    fn test_keyword_round_trips() {
        for mode in [DisplayMode::Windowed, DisplayMode::Fullscreen] {
            assert_eq!(DisplayMode::from_arg(Some(mode.keyword())), mode);
        }
    }
}
