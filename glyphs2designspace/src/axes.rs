//! Glyphs masters and instances <=> designspace axes.

use std::str::FromStr;

use axis_coords::{coords::UserCoord, mapping::Mapping, PiecewiseLinearMap};
use bitflags::bitflags;
use designspace_ir::{Axis, DesignSpaceDocument};
use glyphs_model::{
    custom_params::{AxisSpec, CustomParameterValue, AXES, VARIATION_FONT_ORIGIN},
    Font, FontMaster,
};
use log::{debug, warn};
use ordered_float::OrderedFloat;
use write_fonts::types::Tag;

use crate::{
    axis_def::{default_axis_definitions, get_axis_definitions, AxisDefinition},
    codes::{WDTH, WGHT},
    error::Error,
};

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Flags: u32 {
        /// Let inactive instances shape the axis mappings too
        const MINIMIZE_GLYPHS_DIFFS = 0b0001;
        /// Keep designspace-only axis data on the Glyphs side
        const MINIMIZE_UFO_DIFFS = 0b0010;
    }
}

/// The master that is the default of the designspace.
///
/// The one named by "Variation Font Origin" if there is such a master. Otherwise
/// the one named by the style all masters share ("Regular" if there is none),
/// with or without a "Regular" in its name. Failing all that, the first.
pub fn get_regular_master(font: &Font) -> Option<&FontMaster> {
    let first = font.masters.first()?;
    if let Some(origin) = font
        .custom_parameters
        .string(VARIATION_FONT_ORIGIN)
        .and_then(|name| font.masters.iter().find(|m| m.name == name))
    {
        return Some(origin);
    }

    let mut base_style = find_base_style(&font.masters);
    if base_style.is_empty() {
        base_style = "Regular".to_string();
    }
    font.masters
        .iter()
        .find(|m| m.name == base_style)
        .or_else(|| {
            font.masters.iter().find(|m| {
                m.name
                    .split(' ')
                    .filter(|token| *token != "Regular")
                    .collect::<Vec<_>>()
                    .join(" ")
                    == base_style
            })
        })
        .or(Some(first))
}

/// The words every master name has, empty if there are none.
///
/// Word order follows the last master.
pub fn find_base_style(masters: &[FontMaster]) -> String {
    let Some(first) = masters.first() else {
        return String::new();
    };
    let mut base_style: Vec<&str> = first.name.split_whitespace().collect();
    for master in masters {
        base_style = master
            .name
            .split_whitespace()
            .filter(|token| base_style.contains(token))
            .collect();
    }
    base_style.join(" ")
}

/// Piecewise linear interpolation of `x` through (x, y) `mapping` points.
///
/// No extrapolation: `x` outside every segment comes back unchanged.
pub fn interp(mapping: &[(f64, f64)], x: f64) -> f64 {
    PiecewiseLinearMap::new(
        mapping
            .iter()
            .map(|(x, y)| (OrderedFloat(*x), OrderedFloat(*y)))
            .collect(),
    )
    .map(OrderedFloat(x))
    .into_inner()
}

/// True if masters carry their user locations in "Axis Location".
///
/// Fonts can have "Axes" without giving every master an "Axis Location", in which
/// case we have to go the old way, through the instances.
/// See <https://github.com/googlefonts/glyphsLib/issues/409>
pub fn font_uses_new_axes(font: &Font) -> bool {
    font.custom_parameters
        .axes()
        .is_some_and(|axes| !axes.is_empty())
        && font.masters.iter().all(|m| {
            m.custom_parameters
                .axis_locations()
                .is_some_and(|locations| !locations.is_empty())
        })
}

fn tag(axis_def: &AxisDefinition) -> Result<Tag, Error> {
    Tag::from_str(&axis_def.tag).map_err(|cause| Error::InvalidTag {
        raw_tag: axis_def.tag.clone(),
        cause,
    })
}

/// user => design for one axis, plus the user location of the regular master.
fn axis_mapping(
    font: &Font,
    axis_def: &AxisDefinition,
    regular_master: &FontMaster,
    flags: Flags,
) -> Result<(Mapping, UserCoord), Error> {
    if font_uses_new_axes(font) {
        let mut mapping = Mapping::new();
        for master in font.masters.iter() {
            let design = axis_def.get_design_loc(master);
            let user = axis_def.get_user_loc(master)?;
            if mapping.insert(user, design).is_some() {
                warn!("Axis location ({user:?}) was redefined by '{}'", master.name);
            }
        }
        return Ok((mapping, axis_def.get_user_loc(regular_master)?));
    }

    // Instances have both a user and a design location
    let mut mapping = Mapping::new();
    for instance in font
        .instances
        .iter()
        .filter(|i| i.is_active() || flags.contains(Flags::MINIMIZE_GLYPHS_DIFFS))
    {
        let design = axis_def.get_design_loc(instance);
        let user = axis_def.get_user_loc(instance)?;
        if mapping.insert(user, design).is_some() {
            warn!(
                "Instance user-space location ({user:?}) redefined by '{}'",
                instance.name
            );
        }
    }
    if mapping.is_empty() {
        // Masters don't have a user location, take them at face value
        mapping = font
            .masters
            .iter()
            .map(|m| {
                let design = axis_def.get_design_loc(m);
                (design.as_user(), design)
            })
            .collect();
    }

    let regular_user_loc = mapping.to_user(axis_def.get_design_loc(regular_master));
    Ok((mapping, regular_user_loc))
}

/// Adds an axis to `designspace` for each axis of `font` that actually varies.
pub fn to_designspace_axes(
    font: &Font,
    designspace: &mut DesignSpaceDocument,
    flags: Flags,
) -> Result<(), Error> {
    let Some(regular_master) = get_regular_master(font) else {
        return Ok(());
    };
    debug!("'{}' is the regular master", regular_master.name);

    for axis_def in get_axis_definitions(font) {
        let (mapping, regular_user_loc) = axis_mapping(font, &axis_def, regular_master, flags)?;
        let (Some(minimum), Some(maximum)) = (mapping.min(), mapping.max()) else {
            continue;
        };
        let default = regular_user_loc.clamp_to(minimum, maximum);

        let is_identity = mapping.is_identity();
        if minimum == maximum && minimum == axis_def.default_user_loc && is_identity {
            debug!(
                "Skipping {} {}, nothing varies along it",
                axis_def.tag, axis_def.name
            );
            continue;
        }

        let mut axis = Axis::new(
            axis_def.name.clone(),
            tag(&axis_def)?,
            minimum,
            default,
            maximum,
        );
        axis.hidden = axis_def.hidden;
        if !is_identity {
            axis.set_map(&mapping);
        }
        debug!(
            "{} {} min {minimum:?} default {default:?} max {maximum:?}, {} mappings",
            axis_def.tag,
            axis_def.name,
            axis.map.len()
        );
        designspace.add_axis(axis);
    }
    Ok(())
}

fn axis_spec(name: &str, tag: &str, hidden: bool) -> AxisSpec {
    AxisSpec {
        name: name.to_string(),
        tag: Some(tag.to_string()),
        hidden: hidden.then_some(true),
    }
}

/// True if declaring `axes` would tell Glyphs nothing it doesn't assume anyway.
fn is_subset_of_default_axes(axes: &[AxisSpec]) -> bool {
    axes.len() <= 3
        && axes
            .iter()
            .zip(default_axis_definitions())
            .all(|(axis, axis_def)| {
                axis.is_name_and_tag_only()
                    && axis.name == axis_def.name
                    && axis.tag.as_deref() == Some(axis_def.tag.as_str())
            })
}

/// Declares the axes of `designspace` on `font`, weight then width then the rest.
///
/// Nothing is written if the axes are the ones Glyphs assumes by default.
pub fn to_glyphs_axes(designspace: &DesignSpaceDocument, font: &mut Font, flags: Flags) {
    let wght = Tag::new(b"wght");
    let wdth = Tag::new(b"wdth");
    let weight = designspace.get_axis(wght);
    let width = designspace.get_axis(wdth);

    let mut axes = Vec::new();
    if let Some(weight) = weight {
        let name = if weight.name.is_empty() { "Weight" } else { weight.name.as_str() };
        axes.push(axis_spec(name, WGHT, weight.hidden));
    }
    if let Some(width) = width {
        let name = if width.name.is_empty() { "Width" } else { width.name.as_str() };
        axes.push(axis_spec(name, WDTH, width.hidden));
    }
    for custom in designspace
        .axes
        .iter()
        .filter(|a| a.tag != wght && a.tag != wdth)
    {
        axes.push(axis_spec(&custom.name, &custom.tag.to_string(), custom.hidden));
    }

    if !axes.is_empty() && !is_subset_of_default_axes(&axes) {
        font.custom_parameters
            .set(AXES, CustomParameterValue::Axes(axes));
    }

    if flags.contains(Flags::MINIMIZE_UFO_DIFFS) {
        // TODO: store min/default/max and labels in font userData once Glyphs can take them
        debug!("Axis bounds and labels have nowhere to go on a Glyphs font");
    }
}
