//! The bits of a UFO that axis and component translation touch.

use kurbo::Affine;

/// fontinfo.plist, as far as usWeightClass and usWidthClass go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontInfo {
    pub open_type_os2_weight_class: Option<u16>,
    pub open_type_os2_width_class: Option<u16>,
}

/// A `<component>` in a .glif.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub base: String,
    pub transform: Affine,
}

impl Component {
    pub fn new(base: impl Into<String>, transform: Affine) -> Component {
        Component {
            base: base.into(),
            transform,
        }
    }
}

/// A .glif: its components and its lib.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Glyph {
    pub name: String,
    pub components: Vec<Component>,
    /// Typed access to the keys we own is via [`crate::GlyphLib`]
    pub lib: plist::Dictionary,
}

impl Glyph {
    pub fn new(name: impl Into<String>) -> Glyph {
        Glyph {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Appends a component, the equivalent of a pen's addComponent.
    pub fn add_component(&mut self, base: impl Into<String>, transform: Affine) {
        self.components.push(Component::new(base, transform));
    }
}
