//! Glyphs-only component data, carried in the glyph lib of a UFO.
//!
//! UFO components are just a base glyph and a transform. Anything else Glyphs knows
//! about a component is parked in the lib under the keys below so it survives a trip
//! through UFO and back.

use std::collections::BTreeMap;

use plist::{Dictionary, Value};

use crate::error::Error;

/// Anchor overrides: a list of `{name, index, anchor}`.
pub const COMPONENT_INFO_KEY: &str = "com.github.googlei18n.glyphsLib.ComponentInfo";
pub const COMPONENTS_ALIGNMENT_KEY: &str = "com.schriftgestaltung.componentsAlignment";
pub const COMPONENTS_LOCKED_KEY: &str = "com.schriftgestaltung.componentsLocked";
pub const COMPONENTS_SMART_COMPONENT_VALUES_KEY: &str =
    "com.schriftgestaltung.componentsSmartComponentValues";
pub const SMART_COMPONENT_AXES_KEY: &str = "com.schriftgestaltung.smartComponentAxes";

/// The component at `index` attaches to `anchor` of its base glyph, `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
    pub name: String,
    pub index: usize,
    pub anchor: String,
}

/// An axis a smart component glyph exposes.
#[derive(Debug, Clone, PartialEq)]
pub struct SmartComponentAxis {
    pub name: String,
    pub bottom_name: String,
    pub bottom_value: f64,
    pub top_name: String,
    pub top_value: f64,
}

/// The glyph lib keys we own, typed.
///
/// The per-component lists are parallel to the glyph's components. `None` means
/// the key is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphLib {
    pub component_info: Vec<ComponentInfo>,
    pub components_alignment: Option<Vec<i64>>,
    pub components_locked: Option<Vec<bool>>,
    pub components_smart_component_values: Option<Vec<BTreeMap<String, f64>>>,
    pub smart_component_axes: Option<Vec<SmartComponentAxis>>,
}

fn unexpected(key: &str, expected: &'static str) -> Error {
    Error::UnexpectedLibValue {
        key: key.to_string(),
        expected,
    }
}

fn array<'a>(lib: &'a Dictionary, key: &str) -> Result<Option<&'a [Value]>, Error> {
    match lib.get(key) {
        None => Ok(None),
        Some(Value::Array(values)) => Ok(Some(values.as_slice())),
        Some(_) => Err(unexpected(key, "an array")),
    }
}

fn number(value: &Value) -> Option<f64> {
    value
        .as_real()
        .or_else(|| value.as_signed_integer().map(|v| v as f64))
}

fn string_field(dict: &Dictionary, field: &str) -> Option<String> {
    dict.get(field).and_then(Value::as_string).map(str::to_string)
}

fn number_field(dict: &Dictionary, field: &str) -> Option<f64> {
    dict.get(field).and_then(number)
}

impl GlyphLib {
    /// Reads our keys out of a glyph lib, ignoring everything else.
    pub fn from_plist(lib: &Dictionary) -> Result<GlyphLib, Error> {
        let mut glyph_lib = GlyphLib::default();

        if let Some(values) = array(lib, COMPONENT_INFO_KEY)? {
            const EXPECTED: &str = "dictionaries with name, index and anchor";
            for value in values {
                let dict = value
                    .as_dictionary()
                    .ok_or_else(|| unexpected(COMPONENT_INFO_KEY, EXPECTED))?;
                let (Some(name), Some(index), Some(anchor)) = (
                    string_field(dict, "name"),
                    dict.get("index").and_then(Value::as_unsigned_integer),
                    string_field(dict, "anchor"),
                ) else {
                    return Err(unexpected(COMPONENT_INFO_KEY, EXPECTED));
                };
                glyph_lib.component_info.push(ComponentInfo {
                    name,
                    index: index as usize,
                    anchor,
                });
            }
        }

        if let Some(values) = array(lib, COMPONENTS_ALIGNMENT_KEY)? {
            glyph_lib.components_alignment = Some(
                values
                    .iter()
                    .map(|v| {
                        v.as_signed_integer()
                            .ok_or_else(|| unexpected(COMPONENTS_ALIGNMENT_KEY, "integers"))
                    })
                    .collect::<Result<_, _>>()?,
            );
        }

        if let Some(values) = array(lib, COMPONENTS_LOCKED_KEY)? {
            glyph_lib.components_locked = Some(
                values
                    .iter()
                    .map(|v| {
                        v.as_boolean()
                            .or_else(|| v.as_signed_integer().map(|i| i != 0))
                            .ok_or_else(|| unexpected(COMPONENTS_LOCKED_KEY, "booleans"))
                    })
                    .collect::<Result<_, _>>()?,
            );
        }

        if let Some(values) = array(lib, COMPONENTS_SMART_COMPONENT_VALUES_KEY)? {
            const EXPECTED: &str = "dictionaries of numbers";
            let mut all_smart_values = Vec::with_capacity(values.len());
            for value in values {
                let dict = value
                    .as_dictionary()
                    .ok_or_else(|| unexpected(COMPONENTS_SMART_COMPONENT_VALUES_KEY, EXPECTED))?;
                let smart_values: BTreeMap<String, f64> = dict
                    .iter()
                    .map(|(name, v)| {
                        number(v)
                            .map(|v| (name.clone(), v))
                            .ok_or_else(|| unexpected(COMPONENTS_SMART_COMPONENT_VALUES_KEY, EXPECTED))
                    })
                    .collect::<Result<_, _>>()?;
                all_smart_values.push(smart_values);
            }
            glyph_lib.components_smart_component_values = Some(all_smart_values);
        }

        if let Some(values) = array(lib, SMART_COMPONENT_AXES_KEY)? {
            const EXPECTED: &str =
                "dictionaries with name, bottomName, bottomValue, topName and topValue";
            let mut axes = Vec::with_capacity(values.len());
            for value in values {
                let dict = value
                    .as_dictionary()
                    .ok_or_else(|| unexpected(SMART_COMPONENT_AXES_KEY, EXPECTED))?;
                let (
                    Some(name),
                    Some(bottom_name),
                    Some(bottom_value),
                    Some(top_name),
                    Some(top_value),
                ) = (
                    string_field(dict, "name"),
                    string_field(dict, "bottomName"),
                    number_field(dict, "bottomValue"),
                    string_field(dict, "topName"),
                    number_field(dict, "topValue"),
                )
                else {
                    return Err(unexpected(SMART_COMPONENT_AXES_KEY, EXPECTED));
                };
                axes.push(SmartComponentAxis {
                    name,
                    bottom_name,
                    bottom_value,
                    top_name,
                    top_value,
                });
            }
            glyph_lib.smart_component_axes = Some(axes);
        }

        Ok(glyph_lib)
    }

    /// Writes our keys into a glyph lib, leaving unrelated keys alone.
    ///
    /// Keys with nothing to say are removed.
    pub fn write_to(&self, lib: &mut Dictionary) {
        set_or_remove(
            lib,
            COMPONENT_INFO_KEY,
            (!self.component_info.is_empty()).then(|| {
                self.component_info
                    .iter()
                    .map(|info| {
                        let mut dict = Dictionary::new();
                        dict.insert("name".to_string(), Value::String(info.name.clone()));
                        dict.insert(
                            "index".to_string(),
                            Value::Integer((info.index as u64).into()),
                        );
                        dict.insert("anchor".to_string(), Value::String(info.anchor.clone()));
                        Value::Dictionary(dict)
                    })
                    .collect()
            }),
        );
        set_or_remove(
            lib,
            COMPONENTS_ALIGNMENT_KEY,
            self.components_alignment.as_ref().map(|values| {
                values
                    .iter()
                    .map(|v| Value::Integer((*v).into()))
                    .collect()
            }),
        );
        set_or_remove(
            lib,
            COMPONENTS_LOCKED_KEY,
            self.components_locked
                .as_ref()
                .map(|values| values.iter().map(|v| Value::Boolean(*v)).collect()),
        );
        set_or_remove(
            lib,
            COMPONENTS_SMART_COMPONENT_VALUES_KEY,
            self.components_smart_component_values
                .as_ref()
                .map(|values| {
                    values
                        .iter()
                        .map(|smart_values| {
                            let mut dict = Dictionary::new();
                            for (name, value) in smart_values {
                                dict.insert(name.clone(), Value::Real(*value));
                            }
                            Value::Dictionary(dict)
                        })
                        .collect()
                }),
        );
        set_or_remove(
            lib,
            SMART_COMPONENT_AXES_KEY,
            self.smart_component_axes.as_ref().map(|axes| {
                axes.iter()
                    .map(|axis| {
                        let mut dict = Dictionary::new();
                        dict.insert("name".to_string(), Value::String(axis.name.clone()));
                        dict.insert(
                            "bottomName".to_string(),
                            Value::String(axis.bottom_name.clone()),
                        );
                        dict.insert("bottomValue".to_string(), Value::Real(axis.bottom_value));
                        dict.insert("topName".to_string(), Value::String(axis.top_name.clone()));
                        dict.insert("topValue".to_string(), Value::Real(axis.top_value));
                        Value::Dictionary(dict)
                    })
                    .collect()
            }),
        );
    }
}

fn set_or_remove(lib: &mut Dictionary, key: &str, values: Option<Vec<Value>>) {
    match values {
        Some(values) => {
            lib.insert(key.to_string(), Value::Array(values));
        }
        None => {
            lib.remove(key);
        }
    }
}
