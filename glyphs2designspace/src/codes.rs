//! Glyphs UI class names, OS/2 classes and user locations for weight and width.
//!
//! Weight user locations are usWeightClass values. Width user locations are
//! percentages of the normal width, see
//! <https://docs.microsoft.com/en-gb/typography/opentype/spec/os2#uswidthclass>

use crate::error::Error;

pub const WGHT: &str = "wght";
pub const WDTH: &str = "wdth";

/// The weight dropdown of a Glyphs instance, by name.
///
/// Sorted by name; nearest match searches take the first of equals.
const WEIGHT_CODES: &[(&str, u16)] = &[
    ("Black", 900),
    ("Bold", 700),
    ("DemiBold", 600),
    ("ExtraBold", 800),
    ("ExtraLight", 200),
    ("Heavy", 900),
    ("Light", 300),
    ("Medium", 500),
    ("Normal", 400),
    ("Regular", 400),
    ("SemiBold", 600),
    ("Thin", 100),
    ("UltraBold", 800),
    ("UltraLight", 200),
];

/// The width dropdown of a Glyphs instance, by name.
const WIDTH_CODES: &[(&str, u16)] = &[
    ("Condensed", 3),
    ("Expanded", 7),
    ("Extra Condensed", 2),
    ("Extra Expanded", 8),
    ("Medium (normal)", 5),
    ("Semi Expanded", 6),
    ("SemiCondensed", 4),
    ("Ultra Condensed", 1),
    ("Ultra Expanded", 9),
];

/// usWidthClass => percent of normal width
const WIDTH_CLASS_TO_VALUE: [(u16, f64); 9] = [
    (1, 50.0),
    (2, 62.5),
    (3, 75.0),
    (4, 87.5),
    (5, 100.0),
    (6, 112.5),
    (7, 125.0),
    (8, 150.0),
    (9, 200.0),
];

fn codes_for(axis_tag: &str) -> Result<&'static [(&'static str, u16)], Error> {
    match axis_tag {
        WGHT => Ok(WEIGHT_CODES),
        WDTH => Ok(WIDTH_CODES),
        _ => Err(Error::UnsupportedAxis(axis_tag.to_string())),
    }
}

/// Exact match first, then ignoring whitespace.
///
/// Some sources carry variants of the UI strings with stray spaces.
fn nospace_lookup(codes: &[(&str, u16)], key: &str) -> Option<u16> {
    let find = |key: &str| {
        codes
            .iter()
            .find_map(|(code, class)| (*code == key).then_some(*class))
    };
    find(key).or_else(|| {
        let stripped: String = key.split_whitespace().collect();
        find(&stripped)
    })
}

/// An OS/2 class to a user location.
///
/// Weight classes are user locations already, fractions are dropped.
pub fn class_to_value(axis_tag: &str, class: f64) -> Result<f64, Error> {
    match axis_tag {
        WGHT => Ok(class.trunc()),
        WDTH => {
            let class = class.trunc();
            WIDTH_CLASS_TO_VALUE
                .iter()
                .find_map(|(c, value)| (f64::from(*c) == class).then_some(*value))
                .ok_or(Error::InvalidWidthClass(class))
        }
        _ => Err(Error::UnsupportedAxis(axis_tag.to_string())),
    }
}

/// A Glyphs UI string to a user location, None if the string isn't one Glyphs uses.
pub fn user_loc_string_to_value(axis_tag: &str, user_loc: &str) -> Result<Option<f64>, Error> {
    let codes = codes_for(axis_tag)?;
    nospace_lookup(codes, user_loc)
        .map(|class| class_to_value(axis_tag, class.into()))
        .transpose()
}

/// The OS/2 class closest to a user location.
pub fn user_loc_value_to_class(axis_tag: &str, user_loc: f64) -> Result<u16, Error> {
    match axis_tag {
        WGHT => Ok(user_loc as u16),
        WDTH => {
            let [first, rest @ ..] = WIDTH_CLASS_TO_VALUE;
            let distance = |value: f64| (value - user_loc).abs();
            let (class, _) = rest.into_iter().fold(first, |best, candidate| {
                if distance(candidate.1) < distance(best.1) {
                    candidate
                } else {
                    best
                }
            });
            Ok(class)
        }
        _ => Err(Error::UnsupportedAxis(axis_tag.to_string())),
    }
}

/// The Glyphs instance dropdown string closest to a user location.
pub fn user_loc_value_to_instance_string(
    axis_tag: &str,
    user_loc: f64,
) -> Result<&'static str, Error> {
    let codes = codes_for(axis_tag)?;
    let class = i32::from(user_loc_value_to_class(axis_tag, user_loc)?);
    codes
        .iter()
        .min_by_key(|(_, c)| (i32::from(*c) - class).abs())
        .map(|(code, _)| *code)
        .ok_or_else(|| Error::UnsupportedAxis(axis_tag.to_string()))
}
