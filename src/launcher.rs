//! Resolution launcher
//!
//! A small window with a close-on-launch checkbox, a launch button and two
//! display mode radio buttons. All interaction goes through `LauncherState`;
//! the `skyclad-launcher` binary only forwards mouse and keyboard input and
//! spawns the game when asked.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};

use glam::Vec2;
use winit::keyboard::KeyCode;

use crate::display::DisplayMode;
use crate::renderer::font;
use crate::scene::{Color, DrawCommand, Rect, colors};

pub const LAUNCHER_TITLE: &str = "Touhou Launcher";
/// Logical window size
pub const LAUNCHER_SIZE: Vec2 = Vec2::new(420.0, 300.0);
/// File name of the game binary, next to the launcher
pub const GAME_BINARY: &str = "skyclad";

const BACKGROUND: Color = [0.85, 0.85, 0.85, 1.0];
const TEXT_SIZE: f32 = 14.0;
const TITLE_SIZE: f32 = 28.0;
const BOX: f32 = 16.0;

mod layout {
    use crate::scene::Rect;
    use glam::Vec2;

    pub const TITLE_Y: f32 = 24.0;
    pub const CLOSE_BOX: Vec2 = Vec2::new(60.0, 90.0);
    pub const LAUNCH_BUTTON: Rect = Rect::new(110.0, 130.0, 200.0, 60.0);
    pub const FULLSCREEN_BOX: Vec2 = Vec2::new(60.0, 215.0);
    pub const WINDOWED_BOX: Vec2 = Vec2::new(60.0, 250.0);
    /// Clickable width of a checkbox or radio row, label included
    pub const ROW_WIDTH: f32 = 320.0;
}

/// Interactive elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    CloseOnLaunch,
    LaunchButton,
    Fullscreen,
    Windowed,
}

impl Widget {
    pub const ALL: [Widget; 4] = [
        Widget::CloseOnLaunch,
        Widget::LaunchButton,
        Widget::Fullscreen,
        Widget::Windowed,
    ];

    /// Hit area in logical coordinates
    pub fn bounds(self) -> Rect {
        let row = |corner: Vec2| {
            Rect::new(corner.x - 4.0, corner.y - 4.0, layout::ROW_WIDTH, BOX + 8.0)
        };
        match self {
            Widget::CloseOnLaunch => row(layout::CLOSE_BOX),
            Widget::LaunchButton => layout::LAUNCH_BUTTON,
            Widget::Fullscreen => row(layout::FULLSCREEN_BOX),
            Widget::Windowed => row(layout::WINDOWED_BOX),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Widget::CloseOnLaunch => "Close launcher on launch",
            Widget::LaunchButton => "Launch Game",
            Widget::Fullscreen => "Fullscreen",
            Widget::Windowed => "Windowed (640x480)",
        }
    }
}

/// What the game process should be started with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub args: Vec<String>,
    /// Exit the launcher once the game is spawned
    pub close_launcher: bool,
}

/// Result of an interaction the binary has to act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LauncherAction {
    Launch(LaunchRequest),
    ModeSelected(DisplayMode),
    CloseOnLaunchToggled(bool),
}

/// Launcher form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LauncherState {
    pub mode: DisplayMode,
    pub close_on_launch: bool,
}

impl LauncherState {
    pub fn widget_at(pos: Vec2) -> Option<Widget> {
        Widget::ALL.into_iter().find(|w| w.bounds().contains(pos))
    }

    /// Mouse click at a logical position
    pub fn click(&mut self, pos: Vec2) -> Option<LauncherAction> {
        Self::widget_at(pos).map(|w| self.activate(w))
    }

    /// Keyboard shortcuts: Enter launches, C toggles the checkbox, F and W
    /// pick a mode
    pub fn key(&mut self, key: KeyCode) -> Option<LauncherAction> {
        let widget = match key {
            KeyCode::Enter | KeyCode::NumpadEnter => Widget::LaunchButton,
            KeyCode::KeyC => Widget::CloseOnLaunch,
            KeyCode::KeyF => Widget::Fullscreen,
            KeyCode::KeyW => Widget::Windowed,
            _ => return None,
        };
        Some(self.activate(widget))
    }

    pub fn activate(&mut self, widget: Widget) -> LauncherAction {
        match widget {
            Widget::CloseOnLaunch => {
                self.close_on_launch = !self.close_on_launch;
                LauncherAction::CloseOnLaunchToggled(self.close_on_launch)
            }
            Widget::LaunchButton => LauncherAction::Launch(self.launch_request()),
            Widget::Fullscreen => self.select_mode(DisplayMode::Fullscreen),
            Widget::Windowed => self.select_mode(DisplayMode::Windowed),
        }
    }

    pub fn select_mode(&mut self, mode: DisplayMode) -> LauncherAction {
        self.mode = mode;
        log::info!("{}", mode.keyword());
        LauncherAction::ModeSelected(mode)
    }

    pub fn launch_request(&self) -> LaunchRequest {
        LaunchRequest {
            args: vec![self.mode.keyword().to_string()],
            close_launcher: self.close_on_launch,
        }
    }

    /// Draw the form
    pub fn compose(&self) -> Vec<DrawCommand> {
        let mut cmds = vec![DrawCommand::Clear(BACKGROUND)];

        let title = "Launch Options";
        cmds.push(text(
            title,
            Vec2::new(
                (LAUNCHER_SIZE.x - font::text_width(title, TITLE_SIZE)) / 2.0,
                layout::TITLE_Y,
            ),
            TITLE_SIZE,
            colors::BLACK,
        ));

        toggle(
            &mut cmds,
            layout::CLOSE_BOX,
            Widget::CloseOnLaunch.label(),
            self.close_on_launch,
        );

        let button = layout::LAUNCH_BUTTON;
        cmds.push(DrawCommand::Rect {
            rect: Rect::new(button.x - 1.0, button.y - 1.0, button.w + 2.0, button.h + 2.0),
            color: colors::GREY,
        });
        cmds.push(DrawCommand::Rect {
            rect: button,
            color: colors::WHITE,
        });
        let label = Widget::LaunchButton.label();
        cmds.push(text(
            label,
            Vec2::new(
                button.x + (button.w - font::text_width(label, TEXT_SIZE)) / 2.0,
                button.y + (button.h - TEXT_SIZE) / 2.0,
            ),
            TEXT_SIZE,
            colors::BLACK,
        ));

        toggle(
            &mut cmds,
            layout::FULLSCREEN_BOX,
            Widget::Fullscreen.label(),
            self.mode == DisplayMode::Fullscreen,
        );
        toggle(
            &mut cmds,
            layout::WINDOWED_BOX,
            Widget::Windowed.label(),
            self.mode == DisplayMode::Windowed,
        );

        cmds
    }
}

fn text(text: &str, pos: Vec2, size: f32, color: Color) -> DrawCommand {
    DrawCommand::Text {
        text: text.to_string(),
        pos,
        size,
        color,
    }
}

/// Box with a label; filled centre when `on`
fn toggle(cmds: &mut Vec<DrawCommand>, corner: Vec2, label: &str, on: bool) {
    cmds.push(DrawCommand::Rect {
        rect: Rect::new(corner.x, corner.y, BOX, BOX),
        color: colors::BLACK,
    });
    cmds.push(DrawCommand::Rect {
        rect: Rect::new(corner.x + 2.0, corner.y + 2.0, BOX - 4.0, BOX - 4.0),
        color: colors::WHITE,
    });
    if on {
        cmds.push(DrawCommand::Rect {
            rect: Rect::new(corner.x + 4.0, corner.y + 4.0, BOX - 8.0, BOX - 8.0),
            color: colors::BLACK,
        });
    }
    cmds.push(text(
        label,
        Vec2::new(corner.x + BOX + 8.0, corner.y + 1.0),
        TEXT_SIZE,
        colors::BLACK,
    ));
}

/// Path of the game binary in `dir`
pub fn game_executable_in(dir: &Path) -> PathBuf {
    dir.join(format!("{GAME_BINARY}{}", std::env::consts::EXE_SUFFIX))
}

/// The game binary next to the running launcher
pub fn game_executable() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "launcher has no parent dir"))?;
    Ok(game_executable_in(dir))
}

/// Start the game without waiting for it
pub fn spawn_game(exe: &Path, request: &LaunchRequest) -> io::Result<Child> {
    log::info!("Launching {} {:?}", exe.display(), request.args);
    Command::new(exe).args(&request.args).spawn()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centre(widget: Widget) -> Vec2 {
        let r = widget.bounds();
        Vec2::new(r.x + r.w / 2.0, r.y + r.h / 2.0)
    }

    #[test]
    fn test_defaults() {
        let state = LauncherState::default();
        assert_eq!(state.mode, DisplayMode::Windowed);
        assert!(!state.close_on_launch);
        assert_eq!(
            state.launch_request(),
            LaunchRequest {
                args: vec!["windowed".to_string()],
                close_launcher: false
            }
        );
    }

    #[test]
    fn test_click_each_widget() {
        let mut state = LauncherState::default();

        assert_eq!(
            state.click(centre(Widget::Fullscreen)),
            Some(LauncherAction::ModeSelected(DisplayMode::Fullscreen))
        );
        assert_eq!(
            state.click(centre(Widget::CloseOnLaunch)),
            Some(LauncherAction::CloseOnLaunchToggled(true))
        );
        assert_eq!(
            state.click(centre(Widget::LaunchButton)),
            Some(LauncherAction::Launch(LaunchRequest {
                args: vec!["fullscreen".to_string()],
                close_launcher: true
            }))
        );
        assert_eq!(
            state.click(centre(Widget::Windowed)),
            Some(LauncherAction::ModeSelected(DisplayMode::Windowed))
        );
        assert_eq!(state.mode, DisplayMode::Windowed);
    }

    #[test]
    fn test_click_on_background_does_nothing() {
        let mut state = LauncherState::default();
        assert_eq!(state.click(Vec2::new(5.0, 5.0)), None);
        assert_eq!(state, LauncherState::default());
    }

    #[test]
    fn test_widgets_do_not_overlap() {
        for a in Widget::ALL {
            let p = centre(a);
            assert_eq!(LauncherState::widget_at(p), Some(a));
            let r = a.bounds();
            assert!(r.x >= 0.0 && r.y >= 0.0);
            assert!(r.x + r.w <= LAUNCHER_SIZE.x && r.y + r.h <= LAUNCHER_SIZE.y);
        }
    }

    #[test]
    fn test_keyboard_shortcuts() {
        let mut state = LauncherState::default();
        state.key(KeyCode::KeyF);
        state.key(KeyCode::KeyC);
        state.key(KeyCode::KeyC);
        assert_eq!(state.mode, DisplayMode::Fullscreen);
        assert!(!state.close_on_launch);
        assert!(matches!(
            state.key(KeyCode::Enter),
            Some(LauncherAction::Launch(_))
        ));
        assert_eq!(state.key(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_compose_marks_selection() {
        let mut state = LauncherState::default();
        let before = state.compose();
        state.activate(Widget::CloseOnLaunch);
        let after = state.compose();
        // Checking the box adds one fill rect
        assert_eq!(after.len(), before.len() + 1);
        assert!(matches!(before[0], DrawCommand::Clear(_)));

        let labels: Vec<&str> = after
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            labels,
            vec![
                "Launch Options",
                "Close launcher on launch",
                "Launch Game",
                "Fullscreen",
                "Windowed (640x480)"
            ]
        );
    }

    #[test]
    fn test_game_executable_is_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let exe = game_executable_in(dir.path());
        assert_eq!(exe.parent(), Some(dir.path()));
        assert!(
            exe.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("skyclad"))
        );
    }
}
