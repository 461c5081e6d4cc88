//! Render step
//!
//! Turns a `GameState` into an ordered list of draw commands. Nothing here
//! touches the GPU; the renderer replays the list front to back.

use glam::Vec2;

use crate::assets::SpriteId;
use crate::consts::SIN_MAX;
use crate::sim::{EnemyKind, GameState};

pub type Color = [f32; 4];

/// Axis-aligned rectangle in playfield pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole frame
    Clear(Color),
    /// Sprite with its top-left corner at `pos`, drawn at native size
    Sprite { id: SpriteId, pos: Vec2 },
    /// Bitmap-font text; `size` is the glyph cell height in pixels
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
    },
    Rect { rect: Rect, color: Color },
}

/// Colors used by the HUD and background
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub sin_frame: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: colors::BLACK,
            text: colors::WHITE,
            sin_frame: colors::WHITE,
        }
    }
}

pub mod colors {
    use super::Color;

    pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const GREY: Color = [0.6, 0.6, 0.6, 1.0];
}

/// HUD layout
pub mod hud {
    use super::Rect;
    use glam::Vec2;

    pub const SCORE_POS: Vec2 = Vec2::new(0.0, 0.0);
    pub const SIN_LABEL_POS: Vec2 = Vec2::new(160.0, 5.0);
    pub const TEXT_SIZE: f32 = 32.0;
    pub const SIN_FRAME: Rect = Rect::new(160.0, 40.0, 310.0, 60.0);
    /// Bar origin and height; width follows sin
    pub const SIN_BAR_X: f32 = 165.0;
    pub const SIN_BAR_Y: f32 = 45.0;
    pub const SIN_BAR_H: f32 = 50.0;
    pub const SIN_BAR_ALPHA: f32 = 0.4;
}

/// Sprite used for an enemy kind
pub fn enemy_sprite(kind: EnemyKind) -> SpriteId {
    match kind {
        EnemyKind::Small | EnemyKind::Boss => SpriteId::EnemySmall,
        EnemyKind::Large => SpriteId::EnemyLarge,
    }
}

/// HSV(A) to RGBA. Hue in degrees, the rest in 0..=1
pub fn hsva_to_rgba(hue: f32, saturation: f32, value: f32, alpha: f32) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = value * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = value - c;
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r + m, g + m, b + m, alpha]
}

/// Sin bar color: hue slides from green (100°) to red as sin rises
pub fn sin_color(sin: f32) -> Color {
    let hue = 100.0 - (sin / 3.0).floor();
    hsva_to_rgba(hue, 1.0, 1.0, hud::SIN_BAR_ALPHA)
}

/// Sin bar geometry
pub fn sin_bar(sin: f32) -> Rect {
    Rect::new(
        hud::SIN_BAR_X,
        hud::SIN_BAR_Y,
        sin.min(SIN_MAX),
        hud::SIN_BAR_H,
    )
}

/// Build the frame for `state`
pub fn compose_frame(state: &GameState, palette: &Palette) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(
        8 + state.enemies.len() + state.friendly_bullets.len() + state.enemy_bullets.len(),
    );

    commands.push(DrawCommand::Clear(palette.background));
    commands.push(DrawCommand::Sprite {
        id: SpriteId::Player,
        pos: state.player.pos,
    });

    for enemy in &state.enemies {
        commands.push(DrawCommand::Sprite {
            id: enemy_sprite(enemy.kind),
            pos: enemy.pos,
        });
    }

    for bullet in state.friendly_bullets.iter().chain(&state.enemy_bullets) {
        commands.push(DrawCommand::Sprite {
            id: SpriteId::Bullet,
            pos: bullet.pos,
        });
    }

    // HUD
    commands.push(DrawCommand::Text {
        text: state.score().to_string(),
        pos: hud::SCORE_POS,
        size: hud::TEXT_SIZE,
        color: palette.text,
    });
    commands.push(DrawCommand::Text {
        text: "Sin".to_string(),
        pos: hud::SIN_LABEL_POS,
        size: hud::TEXT_SIZE,
        color: palette.text,
    });
    commands.push(DrawCommand::Rect {
        rect: hud::SIN_FRAME,
        color: palette.sin_frame,
    });
    commands.push(DrawCommand::Rect {
        rect: sin_bar(state.sin()),
        color: sin_color(state.sin()),
    });

    commands
}
