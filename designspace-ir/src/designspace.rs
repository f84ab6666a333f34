//! The axes of a designspace document.

use axis_coords::{
    coords::{DesignCoord, UserCoord},
    mapping::Mapping,
};
use serde::{Deserialize, Serialize};
use write_fonts::types::Tag;

/// A variation axis, bounds in user space.
///
/// See <https://fonttools.readthedocs.io/en/latest/designspaceLib/xml.html#axis-element>
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Axis {
    pub name: String,
    pub tag: Tag,
    pub minimum: UserCoord,
    pub default: UserCoord,
    pub maximum: UserCoord,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    /// Ascending by input. Empty means user and design space are the same.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub map: Vec<AxisMapping>,
}

/// A `<map input="" output=""/>` element.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct AxisMapping {
    pub input: UserCoord,
    pub output: DesignCoord,
}

impl Axis {
    pub fn new(
        name: impl Into<String>,
        tag: Tag,
        minimum: UserCoord,
        default: UserCoord,
        maximum: UserCoord,
    ) -> Axis {
        Axis {
            name: name.into(),
            tag,
            minimum,
            default,
            maximum,
            hidden: false,
            map: Vec::new(),
        }
    }

    /// Replaces the map with the examples in `mapping`.
    pub fn set_map(&mut self, mapping: &Mapping) {
        self.map = mapping
            .iter()
            .map(|(input, output)| AxisMapping { input, output })
            .collect();
    }
}

/// The part of a `.designspace` file that describes axes.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DesignSpaceDocument {
    #[serde(default)]
    pub axes: Vec<Axis>,
}

impl DesignSpaceDocument {
    pub fn new() -> DesignSpaceDocument {
        Default::default()
    }

    pub fn add_axis(&mut self, axis: Axis) {
        self.axes.push(axis);
    }

    pub fn get_axis(&self, tag: Tag) -> Option<&Axis> {
        self.axes.iter().find(|a| a.tag == tag)
    }
}
