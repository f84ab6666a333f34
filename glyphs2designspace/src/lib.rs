//! Translates axis and component data between Glyphs fonts and designspace/UFO.
//!
//! Glyphs stores the position of a master or instance as raw interpolation values
//! (design space) while a designspace wants axes bounded in user space with a map
//! between the two. Most of the work here is figuring out that map.

pub mod axes;
pub mod axis_def;
pub mod codes;
pub mod components;
pub mod error;

pub use axes::{to_designspace_axes, to_glyphs_axes, Flags};
pub use error::Error;
