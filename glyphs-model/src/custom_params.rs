//! Custom parameters, the grab bag Glyphs hangs extra data off of.
//!
//! In a .glyphs file these are a list of `{name = ...; value = ...;}` dicts whose
//! value can be just about anything. We type the handful of shapes we read and
//! carry everything else through untouched.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Font parameter declaring the axes, in order.
pub const AXES: &str = "Axes";
/// Master or instance parameter giving user locations by axis name.
pub const AXIS_LOCATION: &str = "Axis Location";
/// Font parameter naming the master that should be the variable font default.
pub const VARIATION_FONT_ORIGIN: &str = "Variation Font Origin";
/// Master or instance parameter holding a usWeightClass.
pub const WEIGHT_CLASS: &str = "weightClass";
/// Master or instance parameter holding a usWidthClass.
pub const WIDTH_CLASS: &str = "widthClass";

/// One entry of an "Axis Location" parameter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AxisLocation {
    #[serde(rename = "Axis")]
    pub axis: String,
    #[serde(rename = "Location")]
    pub location: f64,
}

/// One entry of an "Axes" parameter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AxisSpec {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Tag", default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(rename = "Hidden", default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

impl AxisSpec {
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> AxisSpec {
        AxisSpec {
            name: name.into(),
            tag: Some(tag.into()),
            hidden: None,
        }
    }

    /// True if this declaration has nothing beyond a name and a tag.
    pub fn is_name_and_tag_only(&self) -> bool {
        self.tag.is_some() && self.hidden.is_none()
    }
}

/// The value of a single custom parameter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum CustomParameterValue {
    Number(f64),
    String(String),
    AxisLocations(Vec<AxisLocation>),
    Axes(Vec<AxisSpec>),
    /// Any shape we don't read, booleans and glyph lists for example.
    Other(serde_json::Value),
}

impl CustomParameterValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CustomParameterValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CustomParameterValue::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_axis_locations(&self) -> Option<&[AxisLocation]> {
        match self {
            CustomParameterValue::AxisLocations(value) => Some(value.as_slice()),
            // an empty list can't tell us what it holds
            CustomParameterValue::Axes(value) if value.is_empty() => Some(&[]),
            _ => None,
        }
    }

    pub fn as_axes(&self) -> Option<&[AxisSpec]> {
        match self {
            CustomParameterValue::Axes(value) => Some(value.as_slice()),
            CustomParameterValue::AxisLocations(value) if value.is_empty() => Some(&[]),
            _ => None,
        }
    }
}

/// Named parameters in declaration order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct CustomParameters(IndexMap<String, CustomParameterValue>);

impl CustomParameters {
    pub fn new() -> CustomParameters {
        Default::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&CustomParameterValue> {
        self.0.get(name)
    }

    /// Sets `name`, replacing any prior value in place.
    pub fn set(&mut self, name: impl Into<String>, value: CustomParameterValue) {
        self.0.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<CustomParameterValue> {
        self.0.shift_remove(name)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(CustomParameterValue::as_f64)
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(CustomParameterValue::as_str)
    }

    /// The "Axis Location" entries, if that parameter is present and well formed.
    pub fn axis_locations(&self) -> Option<&[AxisLocation]> {
        self.get(AXIS_LOCATION)
            .and_then(CustomParameterValue::as_axis_locations)
    }

    /// Sets the "Axis Location" of `axis`, creating the parameter if need be.
    ///
    /// If `axis` is listed more than once the last entry is updated. A value of
    /// some other shape is replaced.
    pub fn set_axis_location(&mut self, axis: &str, location: f64) {
        let mut locations = self
            .axis_locations()
            .map(<[AxisLocation]>::to_vec)
            .unwrap_or_default();
        match locations.iter_mut().rev().find(|l| l.axis == axis) {
            Some(existing) => existing.location = location,
            None => locations.push(AxisLocation {
                axis: axis.to_string(),
                location,
            }),
        }
        self.set(AXIS_LOCATION, CustomParameterValue::AxisLocations(locations));
    }

    /// The "Axes" declarations, if that parameter is present and well formed.
    pub fn axes(&self) -> Option<&[AxisSpec]> {
        self.get(AXES).and_then(CustomParameterValue::as_axes)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CustomParameterValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
