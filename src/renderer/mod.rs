//! wgpu rendering module
//!
//! Executes `scene::DrawCommand` lists as textured quads over a logical
//! playfield that is letterboxed into the window.

pub mod font;
pub mod pipeline;
pub mod shapes;
pub mod texture;
pub mod vertex;

pub use pipeline::{RenderState, Viewport};
