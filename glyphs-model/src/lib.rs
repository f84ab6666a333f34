//! Lightweight model of the parts of a Glyphs font that carry axis and
//! component metadata.

pub mod custom_params;
pub mod error;
mod font;

pub use custom_params::{AxisLocation, AxisSpec, CustomParameterValue, CustomParameters};
pub use font::{
    AxisLocated, Component, DesignLocKey, DesignValues, Font, FontMaster, Glyph, Instance, Layer,
    SmartComponentAxis, UserLocField,
};
