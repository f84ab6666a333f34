//! Glyphs components <=> UFO components, and the smart component axes of a glyph.
//!
//! UFO components only know their base glyph and transform. The rest rides along
//! in the glyph lib, see [`GlyphLib`].

use designspace_ir::{self as ufo, ComponentInfo, GlyphLib};
use glyphs_model::{Component, Glyph, Layer, SmartComponentAxis};
use log::{trace, warn};

use crate::error::Error;

/// Adds the components of `layer` to `ufo_glyph`.
pub fn to_ufo_components(ufo_glyph: &mut ufo::Glyph, layer: &Layer) -> Result<(), Error> {
    let mut glyph_lib = GlyphLib::from_plist(&ufo_glyph.lib)?;

    for (index, component) in layer.components.iter().enumerate() {
        trace!(
            "{} layer '{}': component {index} is {}",
            ufo_glyph.name,
            layer.name,
            component.name
        );
        ufo_glyph.add_component(component.name.clone(), component.transform);

        if let Some(anchor) = component.anchor.as_ref().filter(|a| !a.is_empty()) {
            glyph_lib.component_info.push(ComponentInfo {
                name: component.name.clone(),
                index,
                anchor: anchor.clone(),
            });
        }
    }

    // Parallel to the components, only worth keeping if anyone differs from the default
    let components = &layer.components;
    if components.iter().any(|c| c.alignment != 0) {
        glyph_lib.components_alignment = Some(components.iter().map(|c| c.alignment).collect());
    }
    if components.iter().any(|c| c.locked) {
        glyph_lib.components_locked = Some(components.iter().map(|c| c.locked).collect());
    }
    if components
        .iter()
        .any(|c| !c.smart_component_values.is_empty())
    {
        glyph_lib.components_smart_component_values = Some(
            components
                .iter()
                .map(|c| c.smart_component_values.clone())
                .collect(),
        );
    }

    glyph_lib.write_to(&mut ufo_glyph.lib);
    Ok(())
}

/// Adds the components of `ufo_glyph` to `layer`, restoring what the lib remembers.
///
/// Anchors are only restored onto a component with the same base glyph it had when
/// the lib was written.
pub fn to_glyphs_components(ufo_glyph: &ufo::Glyph, layer: &mut Layer) -> Result<(), Error> {
    let glyph_lib = GlyphLib::from_plist(&ufo_glyph.lib)?;

    for ufo_component in ufo_glyph.components.iter() {
        let mut component = Component::new(ufo_component.base.clone());
        component.transform = ufo_component.transform;
        layer.components.push(component);
    }

    // TODO: match by component identifier rather than position once UFO components have one
    if let Some(alignments) = glyph_lib.components_alignment {
        for (component, alignment) in layer.components.iter_mut().zip(alignments) {
            component.alignment = alignment;
        }
    }
    if let Some(locks) = glyph_lib.components_locked {
        for (component, locked) in layer.components.iter_mut().zip(locks) {
            component.locked = locked;
        }
    }
    if let Some(all_smart_values) = glyph_lib.components_smart_component_values {
        for (component, smart_values) in layer.components.iter_mut().zip(all_smart_values) {
            component.smart_component_values = smart_values;
        }
    }

    for info in glyph_lib.component_info {
        let Some(component) = layer.components.get_mut(info.index) else {
            warn!(
                "Glyph {}, layer '{}': ComponentInfo refers to component {} ('{}') but there are only {}. Skipping, anchor placement might get lost.",
                ufo_glyph.name,
                layer.name,
                info.index,
                info.name,
                ufo_glyph.components.len()
            );
            continue;
        };
        if component.name != info.name {
            warn!(
                "Glyph {}, layer '{}': The ComponentInfo says the component at index {} is named '{}', but it is actually named '{}'. Skipping, anchor placement might get lost.",
                ufo_glyph.name, layer.name, info.index, info.name, component.name
            );
            continue;
        }
        component.anchor = Some(info.anchor);
    }
    Ok(())
}

/// Stores the smart component axes of `glyph`, if it has any, in the lib of `ufo_glyph`.
pub fn to_ufo_smart_component_axes(ufo_glyph: &mut ufo::Glyph, glyph: &Glyph) -> Result<(), Error> {
    if glyph.smart_component_axes.is_empty() {
        return Ok(());
    }
    let mut glyph_lib = GlyphLib::from_plist(&ufo_glyph.lib)?;
    glyph_lib.smart_component_axes = Some(
        glyph
            .smart_component_axes
            .iter()
            .map(|axis| ufo::SmartComponentAxis {
                name: axis.name.clone(),
                bottom_name: axis.bottom_name.clone(),
                bottom_value: axis.bottom_value,
                top_name: axis.top_name.clone(),
                top_value: axis.top_value,
            })
            .collect(),
    );
    glyph_lib.write_to(&mut ufo_glyph.lib);
    Ok(())
}

/// Restores the smart component axes of `glyph` from the lib of `ufo_glyph`.
pub fn to_glyphs_smart_component_axes(ufo_glyph: &ufo::Glyph, glyph: &mut Glyph) -> Result<(), Error> {
    if let Some(axes) = GlyphLib::from_plist(&ufo_glyph.lib)?.smart_component_axes {
        glyph.smart_component_axes = axes
            .into_iter()
            .map(|axis| SmartComponentAxis {
                name: axis.name,
                bottom_name: axis.bottom_name,
                bottom_value: axis.bottom_value,
                top_name: axis.top_name,
                top_value: axis.top_value,
            })
            .collect();
    }
    Ok(())
}
