//! Individual velocities from a centered finite difference over a smoothing
//! interval `delta_t`.
//!
//! Both flavours look the pedestrian up by id in the frames `half` frames
//! before and after the current one, so locally missing detections only
//! affect the pedestrian concerned.

use crate::frame::FrameSlice;
use crate::table::TrajectoryTable;
use serde_derive::{Deserialize, Serialize};
use tracing::debug;

/// Displacement measure used on the periodic (top view) track
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VelocityMethod {
    /// Signed displacement along the unrolled longitudinal axis
    #[default]
    Longitudinal,
    /// Euclidean displacement in the `(x, y)` plane
    Planar,
}

/// Smoothing interval expressed in seconds and in frames on either side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub delta_t: f64,
    pub half: i64,
}

impl Window {
    pub fn new(delta_t: f64, fps: f64) -> Self {
        Self {
            delta_t,
            half: half_window(delta_t, fps),
        }
    }

    #[inline]
    pub fn neighbours(
        &self,
        table: &TrajectoryTable,
        frame: i64,
    ) -> (Option<FrameSlice>, Option<FrameSlice>) {
        (
            table.slice(frame - self.half),
            table.slice(frame + self.half),
        )
    }
}

/// Number of frames between the current frame and each end of the window
#[inline]
pub fn half_window(delta_t: f64, fps: f64) -> i64 {
    (delta_t * fps / 2.0).round() as i64
}

/// Velocities on the periodic track, in slice order.
///
/// A pedestrian whose next position does not lie ahead of the previous one
/// by less than `max_step` has crossed the lap boundary (or jumped), its
/// velocity is missing.
pub fn top_view(
    table: &TrajectoryTable,
    slice: &FrameSlice,
    window: &Window,
    method: VelocityMethod,
    max_step: f64,
) -> Vec<Option<f64>> {
    let (prev, next) = match window.neighbours(table, slice.frame()) {
        (Some(prev), Some(next)) => (prev, next),
        _ => {
            debug!(
                frame = slice.frame(),
                half = window.half,
                "neighbour frame outside of the recording"
            );
            return vec![None; slice.len()];
        }
    };

    slice
        .iter()
        .map(|s| {
            let p = prev.get(s.id)?;
            let n = next.get(s.id)?;

            let dx = n.x - p.x;

            // written so that a NaN position fails the test
            if n.x > p.x && dx.abs() < max_step {
                let dist = match method {
                    VelocityMethod::Longitudinal => dx,
                    VelocityMethod::Planar => nalgebra::distance(&n.position(), &p.position()),
                };

                Some(dist / window.delta_t)
            } else {
                None
            }
        })
        .collect()
}

/// Velocities on a linear track, in slice order.
///
/// Falls back to a one-sided difference against the current position when
/// only one neighbour is known, and to the whole-track extent of the
/// pedestrian when none is.
pub fn side_view(table: &TrajectoryTable, slice: &FrameSlice, window: &Window) -> Vec<Option<f64>> {
    let (prev, next) = window.neighbours(table, slice.frame());

    slice
        .iter()
        .map(|s| {
            let p = prev.as_ref().and_then(|f| f.get(s.id));
            let n = next.as_ref().and_then(|f| f.get(s.id));

            let dist = match (p, n) {
                (Some(p), Some(n)) => n.x - p.x,
                (Some(p), None) => s.x - p.x,
                (None, Some(n)) => n.x - s.x,
                (None, None) => {
                    let (min, max) = table.extent(s.id)?;
                    max - min
                }
            };

            Some(dist / window.delta_t)
        })
        .collect()
}
