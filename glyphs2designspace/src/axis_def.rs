//! Where each axis keeps its design and user locations on masters and instances.

use axis_coords::coords::{DesignCoord, UserCoord};
use designspace_ir::FontInfo;
use glyphs_model::{
    custom_params::{CustomParameterValue, WEIGHT_CLASS, WIDTH_CLASS},
    AxisLocated, DesignLocKey, Font, Instance, UserLocField,
};
use log::debug;

use crate::{
    codes::{
        class_to_value, user_loc_string_to_value, user_loc_value_to_class,
        user_loc_value_to_instance_string, WDTH, WGHT,
    },
    error::Error,
};

/// One axis of a font and the fields that locate masters and instances on it.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisDefinition {
    pub tag: String,
    pub name: String,
    pub hidden: bool,
    /// Holds the design location
    pub design_loc_key: DesignLocKey,
    pub default_design_loc: DesignCoord,
    /// Holds a UI class name, e.g. "Bold", that implies a user location
    pub user_loc_key: Option<UserLocField>,
    /// Custom parameter holding an OS/2 class
    pub user_loc_param: Option<&'static str>,
    pub default_user_loc: UserCoord,
}

impl AxisDefinition {
    /// The definition of the `nth_axis` (0-based) axis of a font.
    ///
    /// Position decides which field holds the design location, whatever the axis is.
    /// Untagged axes get a placeholder tag.
    pub fn new(nth_axis: usize, tag: Option<&str>, name: impl Into<String>) -> AxisDefinition {
        let tag = match tag {
            Some(tag) => tag.to_string(),
            None if nth_axis == 0 => "XXXX".to_string(),
            None => format!("XXX{nth_axis}"),
        };
        let (default_design_loc, user_loc_key, user_loc_param, default_user_loc) =
            match tag.as_str() {
                WGHT => (100.0, Some(UserLocField::Weight), Some(WEIGHT_CLASS), 400.0),
                WDTH => (100.0, Some(UserLocField::Width), Some(WIDTH_CLASS), 100.0),
                _ => (0.0, None, None, 0.0),
            };
        AxisDefinition {
            tag,
            name: name.into(),
            hidden: false,
            design_loc_key: DesignLocKey::for_axis_index(nth_axis),
            default_design_loc: DesignCoord::new(default_design_loc),
            user_loc_key,
            user_loc_param,
            default_user_loc: UserCoord::new(default_user_loc),
        }
    }

    pub fn get_design_loc(&self, located: &impl AxisLocated) -> DesignCoord {
        DesignCoord::new(located.design_values().get(self.design_loc_key))
    }

    pub fn set_design_loc(&self, located: &mut impl AxisLocated, value: DesignCoord) {
        located
            .design_values_mut()
            .set(self.design_loc_key, value.to_f64());
    }

    /// Where a master or instance sits on the slider a user sees.
    ///
    /// Later sources win: the default (design location for all but weight), then
    /// the UI class name, then the OS/2 class parameter, then "Axis Location".
    pub fn get_user_loc(&self, located: &impl AxisLocated) -> Result<UserCoord, Error> {
        let mut user_loc = if self.tag == WGHT {
            self.default_user_loc
        } else {
            self.get_design_loc(located).as_user()
        };

        if let Some(ui_string) = self
            .user_loc_key
            .and_then(|field| located.user_loc_code(field))
        {
            if let Some(value) = user_loc_string_to_value(&self.tag, ui_string)? {
                user_loc = UserCoord::new(value);
            }
        }

        if let Some(class) = self
            .user_loc_param
            .and_then(|param| located.custom_parameters().number(param))
        {
            user_loc = UserCoord::new(class_to_value(&self.tag, class)?);
        }

        for location in located
            .custom_parameters()
            .axis_locations()
            .unwrap_or_default()
            .iter()
            .filter(|l| l.axis == self.name)
        {
            user_loc = UserCoord::new(location.location.trunc());
        }

        Ok(user_loc)
    }

    /// Record a user location on a master or instance.
    ///
    /// Instances get the nearest UI class name, plus the OS/2 class parameter if the
    /// name alone doesn't land on `value`. Masters get the OS/2 class parameter and
    /// an "Axis Location" entry.
    pub fn set_user_loc(&self, located: &mut impl AxisLocated, value: UserCoord) -> Result<(), Error> {
        if let Some(instance) = located.as_instance_mut() {
            if let Some(field) = self.user_loc_key {
                let code = user_loc_value_to_instance_string(&self.tag, value.to_f64())?;
                let value_for_code = user_loc_string_to_value(&self.tag, code)?;
                instance.set_user_loc_code(field, code);
                if let Some(param) = self.user_loc_param {
                    if value_for_code != Some(value.to_f64()) {
                        let class = user_loc_value_to_class(&self.tag, value.to_f64())?;
                        debug!(
                            "{} {value:?} isn't exactly '{code}', also setting {param} {class}",
                            instance.name
                        );
                        instance
                            .custom_parameters
                            .set(param, CustomParameterValue::Number(class.into()));
                    }
                }
            }
            return Ok(());
        }

        if let Some(param) = self.user_loc_param {
            if let Ok(class) = user_loc_value_to_class(&self.tag, value.to_f64()) {
                located
                    .custom_parameters_mut()
                    .set(param, CustomParameterValue::Number(class.into()));
            }
        }

        located
            .custom_parameters_mut()
            .set_axis_location(&self.name, value.to_f64());
        Ok(())
    }

    /// Force a specific UI class name onto an instance.
    ///
    /// Several names can share a class (DemiBold, SemiBold) so [`Self::set_user_loc`]
    /// can't always reproduce the one a source used.
    pub fn set_user_loc_code(&self, instance: &mut Instance, code: &str) {
        if let Some(field) = self.user_loc_key {
            instance.set_user_loc_code(field, code);
        }
    }

    /// Write the OS/2 class for a user location into UFO font info.
    pub fn set_ufo_user_loc(&self, info: &mut FontInfo, value: UserCoord) -> Result<(), Error> {
        let class = user_loc_value_to_class(&self.tag, value.to_f64())?;
        match self.tag.as_str() {
            WGHT => info.open_type_os2_weight_class = Some(class),
            _ => info.open_type_os2_width_class = Some(class),
        }
        Ok(())
    }
}

/// Weight, Width and Custom, the axes of a font that doesn't declare any.
pub fn default_axis_definitions() -> Vec<AxisDefinition> {
    vec![
        AxisDefinition::new(0, Some(WGHT), "Weight"),
        AxisDefinition::new(1, Some(WDTH), "Width"),
        AxisDefinition::new(2, Some("XXXX"), "Custom"),
    ]
}

/// The axes of a font, from its "Axes" parameter if it has one.
pub fn get_axis_definitions(font: &Font) -> Vec<AxisDefinition> {
    let Some(axes) = font.custom_parameters.axes() else {
        return default_axis_definitions();
    };
    axes.iter()
        .enumerate()
        .map(|(idx, axis)| {
            let mut axis_def = AxisDefinition::new(idx, axis.tag.as_deref(), axis.name.clone());
            axis_def.hidden = axis.hidden.unwrap_or_default();
            axis_def
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use axis_coords::coords::{DesignCoord, UserCoord};
    use designspace_ir::FontInfo;
    use glyphs_model::{
        custom_params::{
            AxisLocation, AxisSpec, CustomParameterValue, AXES, AXIS_LOCATION, WEIGHT_CLASS,
            WIDTH_CLASS,
        },
        AxisLocated, DesignLocKey, Font, FontMaster, Instance, UserLocField,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::error::Error;

    use super::*;

    fn weight() -> AxisDefinition {
        AxisDefinition::new(0, Some("wght"), "Weight")
    }

    fn width() -> AxisDefinition {
        AxisDefinition::new(1, Some("wdth"), "Width")
    }

    fn axis_location(axis: &str, location: f64) -> AxisLocation {
        AxisLocation {
            axis: axis.to_string(),
            location,
        }
    }

    #[rstest]
    #[case(0, DesignLocKey::WeightValue)]
    #[case(1, DesignLocKey::WidthValue)]
    #[case(2, DesignLocKey::CustomValue)]
    #[case(3, DesignLocKey::NumberedCustomValue(1))]
    #[case(7, DesignLocKey::NumberedCustomValue(5))]
    fn design_loc_key_follows_position(#[case] nth_axis: usize, #[case] expected: DesignLocKey) {
        assert_eq!(
            expected,
            AxisDefinition::new(nth_axis, Some("wght"), "Weight").design_loc_key
        );
    }

    #[test]
    fn placeholder_tags() {
        assert_eq!("XXXX", AxisDefinition::new(0, None, "Custom").tag);
        assert_eq!("XXX1", AxisDefinition::new(1, None, "Custom").tag);
        assert_eq!("XXX4", AxisDefinition::new(4, None, "Custom").tag);
    }

    #[test]
    fn known_tags_get_user_loc_sources() {
        let weight = weight();
        assert_eq!(Some(UserLocField::Weight), weight.user_loc_key);
        assert_eq!(Some(WEIGHT_CLASS), weight.user_loc_param);
        assert_eq!(400.0, weight.default_user_loc);
        assert_eq!(100.0, weight.default_design_loc);

        let width = width();
        assert_eq!(Some(WIDTH_CLASS), width.user_loc_param);
        assert_eq!(100.0, width.default_user_loc);

        let custom = AxisDefinition::new(2, Some("opsz"), "Optical size");
        assert_eq!(None, custom.user_loc_key);
        assert_eq!(None, custom.user_loc_param);
        assert_eq!(0.0, custom.default_user_loc);
        assert_eq!(0.0, custom.default_design_loc);
    }

    #[test]
    fn design_loc_get_set() {
        let custom = AxisDefinition::new(4, Some("GRAD"), "Grade");
        let mut master = FontMaster::new("m01", "Regular");
        assert_eq!(DesignCoord::new(0.0), custom.get_design_loc(&master));
        custom.set_design_loc(&mut master, DesignCoord::new(-25.0));
        assert_eq!(DesignCoord::new(-25.0), custom.get_design_loc(&master));
        assert_eq!(-25.0, master.design_values.get(DesignLocKey::NumberedCustomValue(2)));
    }

    #[test]
    fn weight_user_loc_defaults_from_regular() {
        // Regular is 400, both for the default and the default UI string
        let mut instance = Instance::new("Whatever");
        instance.design_values.weight_value = 123.0;
        assert_eq!(UserCoord::new(400.0), weight().get_user_loc(&instance).unwrap());
    }

    #[test]
    fn non_weight_user_loc_defaults_to_design_loc() {
        let custom = AxisDefinition::new(2, Some("XXXX"), "Custom");
        let mut master = FontMaster::new("m01", "Regular");
        master.design_values.custom_value = 42.0;
        assert_eq!(UserCoord::new(42.0), custom.get_user_loc(&master).unwrap());

        // "Regular" isn't a width name so masters fall back to their design location
        master.design_values.width_value = 80.0;
        assert_eq!(UserCoord::new(80.0), width().get_user_loc(&master).unwrap());
    }

    #[test]
    fn user_loc_precedence() {
        let weight = weight();
        let mut instance = Instance::new("Bold");
        instance.weight = "Bold".to_string();
        assert_eq!(UserCoord::new(700.0), weight.get_user_loc(&instance).unwrap());

        // the class parameter beats the UI string
        instance
            .custom_parameters
            .set(WEIGHT_CLASS, CustomParameterValue::Number(600.0));
        assert_eq!(UserCoord::new(600.0), weight.get_user_loc(&instance).unwrap());

        // and Axis Location beats both, truncated
        instance.custom_parameters.set(
            AXIS_LOCATION,
            CustomParameterValue::AxisLocations(vec![
                axis_location("Width", 75.0),
                axis_location("Weight", 650.9),
            ]),
        );
        assert_eq!(UserCoord::new(650.0), weight.get_user_loc(&instance).unwrap());
    }

    #[test]
    fn axis_location_for_another_axis_is_ignored() {
        let mut master = FontMaster::new("m01", "Light");
        master
            .custom_parameters
            .set_axis_location("Width", 75.0);
        master.weight = "Light".to_string();
        assert_eq!(UserCoord::new(300.0), weight().get_user_loc(&master).unwrap());
    }

    #[test]
    fn bad_width_class_is_an_error() {
        let mut instance = Instance::new("Wide");
        instance
            .custom_parameters
            .set(WIDTH_CLASS, CustomParameterValue::Number(12.0));
        assert!(matches!(
            width().get_user_loc(&instance),
            Err(Error::InvalidWidthClass(..))
        ));
    }

    #[test]
    fn set_instance_user_loc_with_exact_code() {
        let mut instance = Instance::new("SemiBold");
        weight()
            .set_user_loc(&mut instance, UserCoord::new(600.0))
            .unwrap();
        assert_eq!("DemiBold", instance.weight);
        assert!(!instance.custom_parameters.contains(WEIGHT_CLASS));
        assert!(!instance.custom_parameters.contains(AXIS_LOCATION));
    }

    #[test]
    fn set_instance_user_loc_between_codes() {
        let mut instance = Instance::new("Medium-ish");
        weight()
            .set_user_loc(&mut instance, UserCoord::new(550.0))
            .unwrap();
        assert_eq!("DemiBold", instance.weight);
        assert_eq!(Some(550.0), instance.custom_parameters.number(WEIGHT_CLASS));
        assert_eq!(UserCoord::new(550.0), weight().get_user_loc(&instance).unwrap());

        let mut instance = Instance::new("Wide");
        width()
            .set_user_loc(&mut instance, UserCoord::new(130.0))
            .unwrap();
        assert_eq!("Expanded", instance.width);
        assert_eq!(Some(7.0), instance.custom_parameters.number(WIDTH_CLASS));
    }

    #[test]
    fn set_instance_user_loc_on_custom_axis_does_nothing() {
        let mut instance = Instance::new("Whatever");
        let before = instance.clone();
        AxisDefinition::new(2, Some("XXXX"), "Custom")
            .set_user_loc(&mut instance, UserCoord::new(12.0))
            .unwrap();
        assert_eq!(before, instance);
    }

    #[test]
    fn set_master_user_loc() {
        let mut master = FontMaster::new("m01", "Bold");
        let weight = weight();
        weight.set_user_loc(&mut master, UserCoord::new(700.0)).unwrap();
        assert_eq!(Some(700.0), master.custom_parameters.number(WEIGHT_CLASS));
        assert_eq!(
            Some(&[axis_location("Weight", 700.0)][..]),
            master.custom_parameters.axis_locations()
        );
        // the UI name of a master is part of its name, not its location
        assert_eq!("Regular", master.weight);

        // update in place
        weight.set_user_loc(&mut master, UserCoord::new(650.0)).unwrap();
        assert_eq!(
            Some(&[axis_location("Weight", 650.0)][..]),
            master.custom_parameters.axis_locations()
        );

        let custom = AxisDefinition::new(2, Some("XXXX"), "Custom");
        custom.set_user_loc(&mut master, UserCoord::new(3.0)).unwrap();
        assert_eq!(
            Some(&[axis_location("Weight", 650.0), axis_location("Custom", 3.0)][..]),
            master.custom_parameters.axis_locations()
        );
        assert_eq!(UserCoord::new(3.0), custom.get_user_loc(&master).unwrap());
    }

    #[test]
    fn set_user_loc_code_is_verbatim() {
        let mut instance = Instance::new("SemiBold");
        weight().set_user_loc_code(&mut instance, "SemiBold");
        assert_eq!(Some("SemiBold"), instance.user_loc_code(UserLocField::Weight));

        AxisDefinition::new(2, None, "Custom").set_user_loc_code(&mut instance, "Bold");
        assert_eq!("SemiBold", instance.weight);
    }

    #[test]
    fn set_ufo_user_loc() {
        let mut info = FontInfo::default();
        weight().set_ufo_user_loc(&mut info, UserCoord::new(350.0)).unwrap();
        width().set_ufo_user_loc(&mut info, UserCoord::new(87.5)).unwrap();
        assert_eq!(
            FontInfo {
                open_type_os2_weight_class: Some(350),
                open_type_os2_width_class: Some(4),
            },
            info
        );
        assert!(matches!(
            AxisDefinition::new(2, None, "Custom").set_ufo_user_loc(&mut info, UserCoord::new(1.0)),
            Err(Error::UnsupportedAxis(..))
        ));
    }

    #[test]
    fn axis_definitions_default_without_axes_parameter() {
        let defs = get_axis_definitions(&Font::default());
        assert_eq!(default_axis_definitions(), defs);
        assert_eq!(
            vec![
                ("wght", "Weight", DesignLocKey::WeightValue),
                ("wdth", "Width", DesignLocKey::WidthValue),
                ("XXXX", "Custom", DesignLocKey::CustomValue)
            ],
            defs.iter()
                .map(|d| (d.tag.as_str(), d.name.as_str(), d.design_loc_key))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn axis_definitions_from_axes_parameter() {
        let mut font = Font::default();
        font.custom_parameters.set(
            AXES,
            CustomParameterValue::Axes(vec![
                AxisSpec::new("Width", "wdth"),
                AxisSpec {
                    name: "Sparkle".to_string(),
                    tag: None,
                    hidden: Some(true),
                },
            ]),
        );
        let defs = get_axis_definitions(&font);
        assert_eq!(
            vec![
                ("wdth", DesignLocKey::WeightValue, false),
                ("XXX1", DesignLocKey::WidthValue, true)
            ],
            defs.iter()
                .map(|d| (d.tag.as_str(), d.design_loc_key, d.hidden))
                .collect::<Vec<_>>()
        );
        // a width axis in the first slot still reads width
        assert_eq!(Some(UserLocField::Width), defs[0].user_loc_key);
    }

    #[test]
    fn empty_axes_parameter_means_no_axes() {
        let mut font = Font::default();
        font.custom_parameters
            .set(AXES, CustomParameterValue::Axes(Vec::new()));
        assert!(get_axis_definitions(&font).is_empty());
    }
}
