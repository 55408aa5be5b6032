//! Brings trajectories recorded in an experiment-specific coordinate system
//! into the common one: metres, counter-clockwise walking direction, the
//! outbound straight along `x` starting at the origin.

use crate::sample::Sample;
use crate::table::TrajectoryTable;
use nalgebra as na;
use serde_derive::{Deserialize, Serialize};
use tracing::info;

/// Source column of a normalized coordinate
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline(always)]
    fn pick(self, p: &na::Point2<f64>) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }
}

/// `x' = ref_x · src(x_source) / unit + shift_x`, same for `y`. Heights are
/// only scaled, `z' = z / unit`.
///
/// Swapping the sources rotates the system by 90 degrees, a reflection of
/// `-1` mirrors an axis (clockwise recordings).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct AxisTransform {
    pub unit: f64,
    pub ref_x: f64,
    pub ref_y: f64,
    pub x_source: Axis,
    pub y_source: Axis,
    pub shift_x: f64,
    pub shift_y: f64,
}

impl Default for AxisTransform {
    fn default() -> Self {
        Self {
            unit: 1.0,
            ref_x: 1.0,
            ref_y: 1.0,
            x_source: Axis::X,
            y_source: Axis::Y,
            shift_x: 0.0,
            shift_y: 0.0,
        }
    }
}

impl AxisTransform {
    #[inline]
    pub fn apply(&self, p: na::Point2<f64>) -> na::Point2<f64> {
        na::Point2::new(
            self.ref_x * self.x_source.pick(&p) / self.unit + self.shift_x,
            self.ref_y * self.y_source.pick(&p) / self.unit + self.shift_y,
        )
    }

    #[inline]
    pub fn apply_sample(&self, s: &Sample) -> Sample {
        Sample {
            z: s.z / self.unit,
            ..s.with_position(self.apply(s.position()))
        }
    }
}

/// Longitudinal bounds of the measurement area, in normalized units
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MeasurementArea {
    pub min: f64,
    pub max: f64,
}

impl MeasurementArea {
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Normalizer {
    pub transform: AxisTransform,
    pub area: Option<MeasurementArea>,
}

impl Normalizer {
    pub fn new(transform: AxisTransform, area: Option<MeasurementArea>) -> Self {
        Self { transform, area }
    }

    /// Crops to the measurement area (on the raw `x`, scaled by the unit)
    /// and transforms the remaining positions
    pub fn apply(&self, table: &TrajectoryTable) -> TrajectoryTable {
        let unit = self.transform.unit;

        let cropped = match self.area {
            Some(area) => {
                let cropped = table.retain(|s| area.contains(s.x / unit));

                if cropped.len() < table.len() {
                    info!(
                        dropped = table.len() - cropped.len(),
                        min = area.min,
                        max = area.max,
                        "samples outside of the measurement area"
                    );
                }

                cropped
            }
            None => table.clone(),
        };

        cropped.map_samples(|s| self.transform.apply_sample(s))
    }
}
