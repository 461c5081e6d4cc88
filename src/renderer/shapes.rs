//! Shape generation for draw commands
//!
//! Everything is a textured quad. Rectangles and text sample a 1x1 white
//! texture, sprites sample their own. Consecutive quads on the same texture
//! are merged into one batch.

use std::ops::Range;

use glam::Vec2;

use super::font;
use super::vertex::Vertex;
use crate::assets::SpriteId;
use crate::scene::{Color, DrawCommand, Rect};

/// Texture a batch samples from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    White,
    Sprite(SpriteId),
}

/// A run of vertices drawn with one texture
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBatch {
    pub texture: TextureSlot,
    pub vertices: Range<u32>,
}

/// Vertex data for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameGeometry {
    /// Color the frame is cleared to before drawing
    pub clear: Option<Color>,
    pub vertices: Vec<Vertex>,
    pub batches: Vec<DrawBatch>,
}

impl FrameGeometry {
    fn push(&mut self, texture: TextureSlot, quad: [Vertex; 6]) {
        let start = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&quad);
        let end = self.vertices.len() as u32;

        match self.batches.last_mut() {
            Some(last) if last.texture == texture && last.vertices.end == start => {
                last.vertices.end = end;
            }
            _ => self.batches.push(DrawBatch {
                texture,
                vertices: start..end,
            }),
        }
    }
}

/// Two triangles covering `(x, y, w, h)` with the full texture
pub fn quad(x: f32, y: f32, w: f32, h: f32, color: Color) -> [Vertex; 6] {
    let (x1, y1) = (x + w, y + h);
    [
        Vertex::new(x, y, 0.0, 0.0, color),
        Vertex::new(x, y1, 0.0, 1.0, color),
        Vertex::new(x1, y, 1.0, 0.0, color),
        Vertex::new(x1, y, 1.0, 0.0, color),
        Vertex::new(x, y1, 0.0, 1.0, color),
        Vertex::new(x1, y1, 1.0, 1.0, color),
    ]
}

/// One square per lit font dot
pub fn text_quads(text: &str, pos: Vec2, size: f32, color: Color) -> Vec<[Vertex; 6]> {
    let dot = size / font::GLYPH_ROWS as f32;
    font::dots(text)
        .map(|(col, row)| {
            quad(
                pos.x + col as f32 * dot,
                pos.y + row as f32 * dot,
                dot,
                dot,
                color,
            )
        })
        .collect()
}

/// Build vertices and batches for `commands`.
///
/// `sprite_size` gives each sprite's pixel size; sprites it does not know are
/// skipped. A `Clear` discards everything queued before it.
pub fn build_frame(
    commands: &[DrawCommand],
    sprite_size: impl Fn(SpriteId) -> Option<(u32, u32)>,
) -> FrameGeometry {
    let mut frame = FrameGeometry::default();

    for command in commands {
        match command {
            DrawCommand::Clear(color) => {
                frame.vertices.clear();
                frame.batches.clear();
                frame.clear = Some(*color);
            }
            DrawCommand::Sprite { id, pos } => {
                if let Some((w, h)) = sprite_size(*id) {
                    frame.push(
                        TextureSlot::Sprite(*id),
                        quad(pos.x, pos.y, w as f32, h as f32, [1.0; 4]),
                    );
                }
            }
            DrawCommand::Text {
                text,
                pos,
                size,
                color,
            } => {
                for q in text_quads(text, *pos, *size, *color) {
                    frame.push(TextureSlot::White, q);
                }
            }
            DrawCommand::Rect {
                rect: Rect { x, y, w, h },
                color,
            } => {
                frame.push(TextureSlot::White, quad(*x, *y, *w, *h, *color));
            }
        }
    }

    frame
}
