pub mod glyphs;
pub mod renderer;

pub use glyphs::{GlyphSet, GlyphStyle};
pub use renderer::{FrameView, Renderer, required_size};
