//! Remaps values using a series of linear mappings.
//!
//! Useful for things like designspace : userspace mapping. For example, a
//! glyphs master only knows its design location; walking the user:design
//! examples gathered from the instances backwards tells us where that master
//! sits in user space.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiecewiseLinearMap {
    // these two mappings have identical lengths, by construction
    from: Vec<OrderedFloat<f64>>, // sorted, ||'s to
    to: Vec<OrderedFloat<f64>>,   // ||'s from
}

impl PiecewiseLinearMap {
    /// Create a new map from a series of (from, to) values.
    pub fn new(mut mappings: Vec<(OrderedFloat<f64>, OrderedFloat<f64>)>) -> PiecewiseLinearMap {
        mappings.sort();
        let (from, to): (Vec<_>, Vec<_>) = mappings.into_iter().unzip();
        PiecewiseLinearMap { from, to }
    }

    /// Map `value` through the first segment that contains it.
    ///
    /// Values outside every segment come back unchanged; there is no
    /// extrapolation. A single point maps only itself, anything else is
    /// returned as-is.
    ///
    /// Based on <https://github.com/googlefonts/glyphsLib/blob/v6.0.0/Lib/glyphsLib/builder/axes.py#L560>
    pub fn map(&self, value: OrderedFloat<f64>) -> OrderedFloat<f64> {
        if self.from.len() == 1 {
            return if self.from[0] == value {
                self.to[0]
            } else {
                value
            };
        }
        let x = value.into_inner();
        for idx in 1..self.from.len() {
            let (xa, xb) = (self.from[idx - 1].into_inner(), self.from[idx].into_inner());
            if !(xa <= x && x <= xb) {
                continue;
            }
            let (ya, yb) = (self.to[idx - 1].into_inner(), self.to[idx].into_inner());
            // two examples at the same x, there is nothing to interpolate
            if xa == xb {
                return ya.into();
            }
            return lerp(ya, yb, (x - xa) / (xb - xa)).into();
        }
        value
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    debug_assert!((0_f64..=1_f64).contains(&t));
    a + t * (b - a)
}

#[cfg(test)]
mod tests {
    use ordered_float::OrderedFloat;

    use super::PiecewiseLinearMap;

    fn plm(points: &[(f64, f64)]) -> PiecewiseLinearMap {
        PiecewiseLinearMap::new(
            points
                .iter()
                .map(|(x, y)| (OrderedFloat(*x), OrderedFloat(*y)))
                .collect(),
        )
    }

    #[test]
    fn single_segment_map() {
        // User likes to use 0..10 in their sources to mean wght 0..1000 in userspace
        let plm = plm(&[(0.0, 0.0), (10.0, 1000.0)]);

        assert_eq!(plm.map(OrderedFloat(0.0)), OrderedFloat(0.0));
        assert_eq!(plm.map(OrderedFloat(5.0)), OrderedFloat(500.0));
        assert_eq!(plm.map(OrderedFloat(10.0)), OrderedFloat(1000.0));
    }

    #[test]
    fn multi_segment_map() {
        // We obviously want to map -1..0 to 100.400 and 0..10 to 400..700.
        let plm = plm(&[(-1.0, 100.0), (0.0, 400.0), (10.0, 700.0)]);

        assert_eq!(plm.map(OrderedFloat(-1.0)), OrderedFloat(100.0));
        assert_eq!(plm.map(OrderedFloat(0.0)), OrderedFloat(400.0));
        assert_eq!(plm.map(OrderedFloat(5.0)), OrderedFloat(550.0));
        assert_eq!(plm.map(OrderedFloat(10.0)), OrderedFloat(700.0));
    }

    #[test]
    fn walking_off_the_end_is_identity() {
        // No extrapolation: whatever falls outside the examples is returned untouched,
        // even though that is probably not a location the caller expected.
        let plm = plm(&[(0.0, 0.0), (10.0, 1000.0)]);
        assert_eq!(plm.map(OrderedFloat(-1.0)), OrderedFloat(-1.0));
        assert_eq!(plm.map(OrderedFloat(20.0)), OrderedFloat(20.0));
    }

    #[test]
    fn single_point() {
        let plm = plm(&[(1.0, 1.0)]);
        assert_eq!(plm.map(OrderedFloat(1.0)), OrderedFloat(1.0));
        assert_eq!(plm.map(OrderedFloat(5.0)), OrderedFloat(5.0));

        let plm = self::plm(&[(10.0, 400.0)]);
        assert_eq!(plm.map(OrderedFloat(10.0)), OrderedFloat(400.0));
        assert_eq!(plm.map(OrderedFloat(11.0)), OrderedFloat(11.0));
    }

    #[test]
    fn empty_is_identity() {
        let plm = plm(&[]);
        assert_eq!(plm.map(OrderedFloat(42.0)), OrderedFloat(42.0));
    }

    #[test]
    fn repeated_x_does_not_divide_by_zero() {
        // Two user locations sharing one design location, viewed in reverse
        let plm = plm(&[(57.0, 400.0), (57.0, 450.0), (62.0, 500.0)]);
        assert_eq!(plm.map(OrderedFloat(57.0)), OrderedFloat(400.0));
        assert_eq!(plm.map(OrderedFloat(59.5)), OrderedFloat(475.0));
    }
}
