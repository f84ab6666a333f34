//! Helper library for code that is of value to both directions of the
//! glyphs <=> designspace translation.

pub mod coords;
pub mod mapping;
mod piecewise_linear_map;

pub use piecewise_linear_map::PiecewiseLinearMap;
