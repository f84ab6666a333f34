//! The font, its masters, instances and glyphs.
//!
//! Only what axis and component translation looks at is modelled; everything
//! else about a Glyphs source is someone else's problem.

use std::collections::BTreeMap;
use std::{fmt, fs, path};

use kurbo::Affine;
use serde::{Deserialize, Serialize};

use crate::custom_params::CustomParameters;
use crate::error::Error;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub masters: Vec<FontMaster>,
    #[serde(default)]
    pub instances: Vec<Instance>,
    #[serde(default)]
    pub glyphs: Vec<Glyph>,
    #[serde(default, skip_serializing_if = "CustomParameters::is_empty")]
    pub custom_parameters: CustomParameters,
}

/// Names the field of a master or instance that holds the design location for an axis.
///
/// Glyphs 2 stores axis positions positionally: whatever the first axis is, its value
/// lives in `weightValue`, the second in `widthValue`, the third in `customValue` and
/// any beyond that in `customValue1`, `customValue2`, ...
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DesignLocKey {
    WeightValue,
    WidthValue,
    CustomValue,
    /// `customValueN`, N >= 1
    NumberedCustomValue(usize),
}

impl DesignLocKey {
    /// The field used by the nth axis of a font.
    pub fn for_axis_index(nth_axis: usize) -> DesignLocKey {
        match nth_axis {
            0 => DesignLocKey::WeightValue,
            1 => DesignLocKey::WidthValue,
            2 => DesignLocKey::CustomValue,
            n => DesignLocKey::NumberedCustomValue(n - 2),
        }
    }

    /// What Glyphs assumes when the field is absent.
    pub fn default_value(&self) -> f64 {
        match self {
            DesignLocKey::WeightValue | DesignLocKey::WidthValue => 100.0,
            DesignLocKey::CustomValue | DesignLocKey::NumberedCustomValue(..) => 0.0,
        }
    }
}

impl fmt::Display for DesignLocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignLocKey::WeightValue => f.write_str("weightValue"),
            DesignLocKey::WidthValue => f.write_str("widthValue"),
            DesignLocKey::CustomValue => f.write_str("customValue"),
            DesignLocKey::NumberedCustomValue(n) => write!(f, "customValue{n}"),
        }
    }
}

/// The interpolation values of a master or instance, one field per axis slot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DesignValues {
    #[serde(default = "default_weight_or_width_value")]
    pub weight_value: f64,
    #[serde(default = "default_weight_or_width_value")]
    pub width_value: f64,
    #[serde(default)]
    pub custom_value: f64,
    /// customValue1, customValue2, ...
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub numbered_custom_values: Vec<f64>,
}

fn default_weight_or_width_value() -> f64 {
    100.0
}

impl Default for DesignValues {
    fn default() -> Self {
        DesignValues {
            weight_value: DesignLocKey::WeightValue.default_value(),
            width_value: DesignLocKey::WidthValue.default_value(),
            custom_value: DesignLocKey::CustomValue.default_value(),
            numbered_custom_values: Vec::new(),
        }
    }
}

impl DesignValues {
    pub fn get(&self, key: DesignLocKey) -> f64 {
        match key {
            DesignLocKey::WeightValue => self.weight_value,
            DesignLocKey::WidthValue => self.width_value,
            DesignLocKey::CustomValue => self.custom_value,
            DesignLocKey::NumberedCustomValue(n) => n
                .checked_sub(1)
                .and_then(|idx| self.numbered_custom_values.get(idx).copied())
                .unwrap_or_else(|| key.default_value()),
        }
    }

    pub fn set(&mut self, key: DesignLocKey, value: f64) {
        match key {
            DesignLocKey::WeightValue => self.weight_value = value,
            DesignLocKey::WidthValue => self.width_value = value,
            DesignLocKey::CustomValue => self.custom_value = value,
            DesignLocKey::NumberedCustomValue(n) => {
                let idx = n.saturating_sub(1);
                if self.numbered_custom_values.len() <= idx {
                    self.numbered_custom_values
                        .resize(idx + 1, key.default_value());
                }
                self.numbered_custom_values[idx] = value;
            }
        }
    }
}

/// The fields where masters and instances keep a Glyphs UI class name.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserLocField {
    /// `weight`, e.g. "SemiBold"
    Weight,
    /// `width`, e.g. "Condensed"
    Width,
}

impl fmt::Display for UserLocField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserLocField::Weight => f.write_str("weight"),
            UserLocField::Width => f.write_str("width"),
        }
    }
}

/// Something positioned in the designspace: a master or an instance.
///
/// Axis code is written against this so it doesn't have to care which one it has.
pub trait AxisLocated {
    fn name(&self) -> &str;

    fn design_values(&self) -> &DesignValues;

    fn design_values_mut(&mut self) -> &mut DesignValues;

    fn custom_parameters(&self) -> &CustomParameters;

    fn custom_parameters_mut(&mut self) -> &mut CustomParameters;

    /// The UI class name stored in `field`, if this kind of thing has one.
    fn user_loc_code(&self, field: UserLocField) -> Option<&str>;

    /// Instances get their user location from their UI class names; masters don't.
    fn as_instance_mut(&mut self) -> Option<&mut Instance> {
        None
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FontMaster {
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_master_name")]
    pub name: String,
    /// Part of the master name in Glyphs 2, not its location
    #[serde(default = "default_regular")]
    pub weight: String,
    #[serde(default = "default_regular")]
    pub width: String,
    #[serde(flatten)]
    pub design_values: DesignValues,
    #[serde(default, skip_serializing_if = "CustomParameters::is_empty")]
    pub custom_parameters: CustomParameters,
}

fn default_master_name() -> String {
    String::from("Regular")
}

fn default_regular() -> String {
    String::from("Regular")
}

fn default_instance_width() -> String {
    String::from("Medium (normal)")
}

fn default_true() -> bool {
    true
}

impl FontMaster {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> FontMaster {
        FontMaster {
            id: id.into(),
            name: name.into(),
            weight: default_regular(),
            width: default_regular(),
            design_values: Default::default(),
            custom_parameters: Default::default(),
        }
    }
}

impl AxisLocated for FontMaster {
    fn name(&self) -> &str {
        &self.name
    }

    fn design_values(&self) -> &DesignValues {
        &self.design_values
    }

    fn design_values_mut(&mut self) -> &mut DesignValues {
        &mut self.design_values
    }

    fn custom_parameters(&self) -> &CustomParameters {
        &self.custom_parameters
    }

    fn custom_parameters_mut(&mut self) -> &mut CustomParameters {
        &mut self.custom_parameters
    }

    fn user_loc_code(&self, field: UserLocField) -> Option<&str> {
        match field {
            UserLocField::Weight => Some(self.weight.as_str()),
            UserLocField::Width => Some(self.width.as_str()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub name: String,
    #[serde(default = "default_regular")]
    pub weight: String,
    #[serde(default = "default_instance_width")]
    pub width: String,
    #[serde(flatten)]
    pub design_values: DesignValues,
    #[serde(default, skip_serializing_if = "CustomParameters::is_empty")]
    pub custom_parameters: CustomParameters,
    #[serde(default = "default_true")]
    pub exports: bool,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Instance {
    pub fn new(name: impl Into<String>) -> Instance {
        Instance {
            name: name.into(),
            weight: default_regular(),
            width: default_instance_width(),
            design_values: Default::default(),
            custom_parameters: Default::default(),
            exports: true,
            active: true,
        }
    }

    /// Glyphs.app treats both "exports=0" and "active=0" as "skip me".
    pub fn is_active(&self) -> bool {
        self.exports && self.active
    }

    pub fn set_user_loc_code(&mut self, field: UserLocField, code: impl Into<String>) {
        match field {
            UserLocField::Weight => self.weight = code.into(),
            UserLocField::Width => self.width = code.into(),
        }
    }
}

impl AxisLocated for Instance {
    fn name(&self) -> &str {
        &self.name
    }

    fn design_values(&self) -> &DesignValues {
        &self.design_values
    }

    fn design_values_mut(&mut self) -> &mut DesignValues {
        &mut self.design_values
    }

    fn custom_parameters(&self) -> &CustomParameters {
        &self.custom_parameters
    }

    fn custom_parameters_mut(&mut self) -> &mut CustomParameters {
        &mut self.custom_parameters
    }

    fn user_loc_code(&self, field: UserLocField) -> Option<&str> {
        match field {
            UserLocField::Weight => Some(self.weight.as_str()),
            UserLocField::Width => Some(self.width.as_str()),
        }
    }

    fn as_instance_mut(&mut self) -> Option<&mut Instance> {
        Some(self)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Glyph {
    #[serde(rename = "glyphname")]
    pub name: String,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub smart_component_axes: Vec<SmartComponentAxis>,
}

impl Glyph {
    pub fn new(name: impl Into<String>) -> Glyph {
        Glyph {
            name: name.into(),
            layers: Vec::new(),
            smart_component_axes: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    #[serde(default)]
    pub layer_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Layer {
    pub fn new(layer_id: impl Into<String>) -> Layer {
        Layer {
            layer_id: layer_id.into(),
            ..Default::default()
        }
    }
}

/// A reference to another glyph, placed on a layer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub name: String,
    #[serde(default = "identity")]
    pub transform: Affine,
    /// Attach to this anchor of the base glyph instead of the default one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    /// -1 disables automatic alignment, 0 is automatic, 1 forces it
    #[serde(default)]
    pub alignment: i64,
    #[serde(default)]
    pub locked: bool,
    /// Where to instantiate a smart component, by smart axis name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub smart_component_values: BTreeMap<String, f64>,
}

fn identity() -> Affine {
    Affine::IDENTITY
}

impl Component {
    pub fn new(name: impl Into<String>) -> Component {
        Component {
            name: name.into(),
            transform: Affine::IDENTITY,
            anchor: None,
            alignment: 0,
            locked: false,
            smart_component_values: BTreeMap::new(),
        }
    }
}

/// An axis a smart component glyph exposes to the glyphs that use it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SmartComponentAxis {
    pub name: String,
    pub bottom_name: String,
    pub bottom_value: f64,
    pub top_name: String,
    pub top_value: f64,
}

impl Font {
    pub fn load(glyphs_file: &path::Path) -> Result<Font, Error> {
        let raw_content = fs::read_to_string(glyphs_file).map_err(Error::IoError)?;
        serde_json::from_str(&raw_content)
            .map_err(|e| Error::ParseError(glyphs_file.to_path_buf(), format!("{e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use kurbo::Affine;
    use pretty_assertions::assert_eq;

    use crate::{custom_params::WEIGHT_CLASS, error::Error};

    use super::*;

    const MINIMAL: &str = r#"{
        "familyName": "Wght Var",
        "customParameters": {"Axes": [{"Name": "Weight", "Tag": "wght"}]},
        "masters": [
            {"id": "m01", "name": "Light", "weightValue": 40},
            {"id": "m02", "name": "Bold", "weightValue": 160, "customValue": 3}
        ],
        "instances": [
            {"name": "SemiBold", "weight": "SemiBold", "weightValue": 120, "active": false,
             "customParameters": {"weightClass": 600}}
        ],
        "glyphs": [
            {"glyphname": "Aacute", "layers": [
                {"layerId": "m01", "components": [
                    {"name": "A"},
                    {"name": "acute", "transform": [1, 0, 0, 1, 120, 20], "anchor": "top_viet", "locked": true}
                ]}
            ]}
        ]
    }"#;

    fn write_json(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("font.json");
        fs::write(&file, contents).unwrap();
        (temp_dir, file)
    }

    #[test]
    fn load_minimal() {
        let (_temp_dir, file) = write_json(MINIMAL);
        let font = Font::load(&file).unwrap();

        assert_eq!("Wght Var", font.family_name);
        assert_eq!(
            vec!["Light", "Bold"],
            font.masters.iter().map(|m| m.name.as_str()).collect::<Vec<_>>()
        );
        assert_eq!(40.0, font.masters[0].design_values.weight_value);
        // absent fields take Glyphs defaults
        assert_eq!(100.0, font.masters[0].design_values.width_value);
        assert_eq!(0.0, font.masters[0].design_values.custom_value);
        assert_eq!("Regular", font.masters[0].width);

        let instance = &font.instances[0];
        assert_eq!("Medium (normal)", instance.width);
        assert!(instance.exports);
        assert!(!instance.is_active());
        assert_eq!(Some(600.0), instance.custom_parameters.number(WEIGHT_CLASS));

        assert_eq!("Aacute", font.glyphs[0].name);
        let components = &font.glyphs[0].layers[0].components;
        assert_eq!(Affine::IDENTITY, components[0].transform);
        assert_eq!(Affine::translate((120.0, 20.0)), components[1].transform);
        assert_eq!(Some("top_viet"), components[1].anchor.as_deref());
        assert!(components[1].locked);
        assert_eq!(0, components[1].alignment);
    }

    #[test]
    fn flattened_design_values() {
        let (_temp_dir, file) = write_json(MINIMAL);
        let font = Font::load(&file).unwrap();
        let bold = &font.masters[1];
        assert_eq!(160.0, bold.design_values.get(DesignLocKey::WeightValue));
        assert_eq!(3.0, bold.design_values.get(DesignLocKey::CustomValue));
    }

    #[test]
    fn load_keeps_parameters_it_does_not_read() {
        let (_temp_dir, file) = write_json(
            r#"{
                "familyName": "Production",
                "customParameters": {
                    "Axes": [{"Name": "Weight", "Tag": "wght"}],
                    "Don't use Production Names": true,
                    "glyphOrder": ["a", "b"]
                },
                "masters": [{"id": "m01", "customParameters": {"Master Icon Glyph Name": ["A"]}}]
            }"#,
        );
        let font = Font::load(&file).unwrap();
        assert_eq!(1, font.custom_parameters.axes().unwrap().len());
        assert!(font.custom_parameters.contains("Don't use Production Names"));
        assert!(font.custom_parameters.contains("glyphOrder"));
        assert_eq!(None, font.masters[0].custom_parameters.axis_locations());
    }

    #[test]
    fn load_garbage() {
        let (_temp_dir, file) = write_json("{ not json");
        assert!(matches!(Font::load(&file), Err(Error::ParseError(..))));
    }

    #[test]
    fn design_loc_keys_by_axis_index() {
        assert_eq!(
            vec![
                "weightValue",
                "widthValue",
                "customValue",
                "customValue1",
                "customValue2"
            ],
            (0..5)
                .map(|idx| DesignLocKey::for_axis_index(idx).to_string())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn numbered_custom_value_get_set() {
        let mut values = DesignValues::default();
        assert_eq!(0.0, values.get(DesignLocKey::NumberedCustomValue(3)));
        values.set(DesignLocKey::NumberedCustomValue(3), 42.0);
        assert_eq!(vec![0.0, 0.0, 42.0], values.numbered_custom_values);
        assert_eq!(42.0, values.get(DesignLocKey::NumberedCustomValue(3)));
        values.set(DesignLocKey::NumberedCustomValue(1), 7.0);
        assert_eq!(vec![7.0, 0.0, 42.0], values.numbered_custom_values);
    }

    #[test]
    fn only_instances_are_instances() {
        let mut master = FontMaster::new("m01", "Regular");
        let mut instance = Instance::new("Bold");
        assert!(master.as_instance_mut().is_none());
        instance
            .as_instance_mut()
            .unwrap()
            .set_user_loc_code(UserLocField::Weight, "Bold");
        assert_eq!(Some("Bold"), instance.user_loc_code(UserLocField::Weight));
        assert_eq!(Some("Regular"), master.user_loc_code(UserLocField::Width));
    }
}
