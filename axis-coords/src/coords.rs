//! Using confusable types for coords is an endless source of confusion; don't.
//!
//! A glyphs master stores a raw interpolation value (design space) while the
//! designspace wants to know where that sits on the slider a user sees (user
//! space). Keeping the two apart in the type system makes it much harder to
//! hand a weightValue to something expecting a usWeightClass.

use std::{fmt::Debug, marker::PhantomData};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// The coordinate space used by the type designer/editing software.
///
/// This space has arbitrary bounds defined on a per-project basis. For instance,
/// a font might internally represent the 'weight' axis as a stem thickness from 40-200.
///
/// In a .designspace file this is an 'xvalue'; in a .glyphs file it is the
/// weightValue, widthValue, customValue... fields of masters and instances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DesignSpace;

/// A coordinate space that may be visible to the end user.
///
/// For instance a weight value in CSS is expressed in user coordinates; 400 is
/// Regular, 700 is Bold. Width is a percentage of the normal width.
///
/// In a .designspace file this is a 'uservalue'.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserSpace;

/// A coordinate in some coordinate space.
#[derive(Serialize, Deserialize, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Coord<Space> {
    coord: OrderedFloat<f64>,
    // we want to be covariant but also Send + Sync. See
    // <https://doc.rust-lang.org/1.74.0/nomicon/phantom-data.html#table-of-phantomdata-patterns>
    #[serde(skip)]
    space: PhantomData<fn() -> Space>,
}

/// A coordinate in design space.
pub type DesignCoord = Coord<DesignSpace>;
/// A coordinate in user space
pub type UserCoord = Coord<UserSpace>;

impl<Space> Coord<Space> {
    /// Create a new coordinate.
    ///
    /// Note that we do *not* impl From because we want conversion to be explicit.
    pub fn new(value: impl Into<OrderedFloat<f64>>) -> Self {
        Coord {
            coord: value.into(),
            space: PhantomData,
        }
    }

    pub fn into_inner(self) -> OrderedFloat<f64> {
        self.coord
    }

    pub fn to_f64(&self) -> f64 {
        self.coord.into_inner()
    }

    /// Clamp into `[min, max]`.
    ///
    /// Unlike [`Ord::clamp`] this never panics; if `min > max` the result is `max`.
    pub fn clamp_to(self, min: Coord<Space>, max: Coord<Space>) -> Coord<Space>
    where
        Space: Ord,
    {
        std::cmp::min(max, std::cmp::max(min, self))
    }
}

impl DesignCoord {
    /// Reinterpret as a user coordinate, for axes where the two are identical.
    pub fn as_user(&self) -> UserCoord {
        UserCoord::new(self.coord)
    }
}

// we need to manually implement this bc of phantomdata:
// <https://stackoverflow.com/questions/31371027/copy-trait-and-phantomdata-should-this-really-move>
impl<T> Clone for Coord<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Coord<T> {}

impl<Space> Debug for Coord<Space> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.coord)
    }
}

impl<Space> PartialEq<f64> for Coord<Space> {
    fn eq(&self, other: &f64) -> bool {
        self.coord.as_ref() == other
    }
}

impl<Space> PartialEq<Coord<Space>> for f64 {
    fn eq(&self, other: &Coord<Space>) -> bool {
        other == self
    }
}
