//! What glyphs sources turn into: designspace axes and UFO glyphs.

mod designspace;
pub mod error;
pub mod glyph_lib;
mod ufo;

pub use designspace::{Axis, AxisMapping, DesignSpaceDocument};
pub use error::Error;
pub use glyph_lib::{ComponentInfo, GlyphLib, SmartComponentAxis};
pub use ufo::{Component, FontInfo, Glyph};
