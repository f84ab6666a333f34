//! The user:design examples collected for a single axis.

use std::collections::BTreeMap;

use crate::{
    coords::{DesignCoord, UserCoord},
    PiecewiseLinearMap,
};

/// User location => design location for one axis.
///
/// Holds at most one design location per user location. Sorted by user location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping(BTreeMap<UserCoord, DesignCoord>);

impl Mapping {
    pub fn new() -> Mapping {
        Default::default()
    }

    /// Record that `user` sits at `design`.
    ///
    /// Returns the design location previously recorded for `user`, if it differed.
    /// The new value always wins.
    pub fn insert(&mut self, user: UserCoord, design: DesignCoord) -> Option<DesignCoord> {
        self.0.insert(user, design).filter(|prev| *prev != design)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The smallest user location, if any.
    pub fn min(&self) -> Option<UserCoord> {
        self.0.keys().next().copied()
    }

    /// The largest user location, if any.
    pub fn max(&self) -> Option<UserCoord> {
        self.0.keys().next_back().copied()
    }

    /// True if every user location equals its design location.
    pub fn is_identity(&self) -> bool {
        self.0.iter().all(|(user, design)| user.into_inner() == design.into_inner())
    }

    /// (user, design) pairs in ascending user order.
    pub fn iter(&self) -> impl Iterator<Item = (UserCoord, DesignCoord)> + '_ {
        self.0.iter().map(|(u, d)| (*u, *d))
    }

    /// A map from design location to user location.
    fn design_to_user(&self) -> PiecewiseLinearMap {
        PiecewiseLinearMap::new(
            self.0
                .iter()
                .map(|(u, d)| (d.into_inner(), u.into_inner()))
                .collect(),
        )
    }

    /// Where `design` sits in user space, per this mapping.
    ///
    /// Design locations outside the known examples are passed through unchanged.
    pub fn to_user(&self, design: DesignCoord) -> UserCoord {
        UserCoord::new(self.design_to_user().map(design.into_inner()))
    }
}

impl FromIterator<(UserCoord, DesignCoord)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (UserCoord, DesignCoord)>>(iter: I) -> Self {
        Mapping(iter.into_iter().collect())
    }
}
