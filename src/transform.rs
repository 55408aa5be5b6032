use crate::error::Error;
use crate::table::TrajectoryTable;
use crate::Float;
use nalgebra as na;

/// Oval corridor: two straight runs of `length` joined by semicircular turns
/// of `radius`. The outbound straight lies on `y = 0` from `x = 0` to
/// `x = length`, turn centres are at `(0, radius)` and `(length, radius)`.
///
/// Unrolled, the track is laid out as straight-out, right turn,
/// straight-back, left turn, so the longitudinal coordinate is periodic with
/// the circumference `2·length + 2·π·radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OvalTrack<T: Float> {
    length: T,
    radius: T,
}

impl<T: Float> OvalTrack<T> {
    pub fn new(length: T, radius: T) -> Result<Self, Error> {
        if length > T::zero() && radius > T::zero() {
            Ok(Self { length, radius })
        } else {
            Err(Error::InvalidGeometry {
                length: length.to_f64().unwrap_or(f64::NAN),
                radius: radius.to_f64().unwrap_or(f64::NAN),
            })
        }
    }

    #[inline]
    pub fn length(&self) -> T {
        self.length
    }

    #[inline]
    pub fn radius(&self) -> T {
        self.radius
    }

    #[inline]
    pub fn circumference(&self) -> T {
        let two = na::convert::<f64, T>(2.0);

        two * self.length + two * T::pi() * self.radius
    }

    /// Maps a planar position to `(x_trans, y_trans)`: the unrolled
    /// longitudinal coordinate and the radial deviation from the centreline.
    ///
    /// Undefined at the turn centres, where the radial distance is zero.
    pub fn to_straight(&self, p: &na::Point2<T>) -> na::Point2<T> {
        let (x, y) = (p.x, p.y);
        let (l, r) = (self.length, self.radius);
        let two = na::convert::<f64, T>(2.0);
        let pi = T::pi();

        if x < T::zero() {
            let d = (x * x + (y - r) * (y - r)).sqrt();
            let theta = (-(r - y) / d).acos();

            na::Point2::new(two * l + pi * r + r * theta, d - r)
        } else if x <= l {
            let y_trans = ((y - r) * (y - r)).sqrt() - r;
            let x_trans = if y < r { x } else { two * l + pi * r - x };

            na::Point2::new(x_trans, y_trans)
        } else {
            let dx = x - l;
            let d = (dx * dx + (y - r) * (y - r)).sqrt();
            let theta = ((r - y) / d).acos();

            na::Point2::new(l + r * theta, d - r)
        }
    }
}

impl OvalTrack<f64> {
    /// Applies [`OvalTrack::to_straight`] to every sample, ids, frames and
    /// `z` are kept
    pub fn straighten(&self, table: &TrajectoryTable) -> TrajectoryTable {
        table.map_positions(|p| self.to_straight(&p))
    }
}
