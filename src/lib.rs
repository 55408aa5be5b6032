//! Analysis of pedestrian single-file movement experiments.
//!
//! Raw trajectories are projected onto a unified table, normalized into a
//! common coordinate system and, for oval corridors, unrolled into a periodic
//! straight coordinate. The [`aggregator::KinematicsAggregator`] then computes
//! velocity, headway and 1-D Voronoi density of every pedestrian frame by
//! frame.

pub mod aggregator;
pub mod density;
pub mod error;
pub mod experiment;
pub mod frame;
pub mod headway;
pub mod io;
pub mod normalize;
pub mod sample;
pub mod steady;
pub mod table;
pub mod transform;
pub mod velocity;

pub use aggregator::{AggregatorConfig, CameraView, KinematicsAggregator};
pub use experiment::{ExperimentConfig, ExperimentRegistry};
pub use frame::FrameSlice;
pub use sample::{KinematicSample, Kinematics, Sample};
pub use steady::extract_steady_state;
pub use table::TrajectoryTable;
pub use transform::OvalTrack;
pub use velocity::VelocityMethod;

use error::Error;
use nalgebra as na;
use std::fmt;

pub trait Float:
    num_traits::FromPrimitive
    + num_traits::ToPrimitive
    + na::RealField
    + Copy
    + fmt::Debug
    + PartialEq
    + 'static
{
}

impl<T> Float for T where
    T: num_traits::FromPrimitive
        + num_traits::ToPrimitive
        + na::RealField
        + Copy
        + fmt::Debug
        + PartialEq
        + 'static
{
}

/// Full analysis of one run: normalization, unrolling of the oval for top
/// view recordings and kinematics, rows with missing values dropped.
///
/// The experiment is validated before any sample is touched.
pub fn analyze(
    experiment: &ExperimentConfig,
    table: &TrajectoryTable,
    delta_t: f64,
    method: VelocityMethod,
) -> Result<Vec<KinematicSample>, Error> {
    experiment.validate()?;

    let normalized = experiment.normalizer().apply(table);

    let table = match experiment.camera {
        CameraView::TopView => experiment.track()?.straighten(&normalized),
        CameraView::SideView => normalized,
    };

    let aggregator = KinematicsAggregator::new(experiment.aggregator_config(delta_t, method))?;

    Ok(aggregator.run(&table))
}
