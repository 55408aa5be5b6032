use crate::error::Error;
use crate::frame::FrameSlice;
use crate::sample::{KinematicSample, Kinematics, Sample};
use crate::table::TrajectoryTable;
use crate::velocity::{VelocityMethod, Window};
use crate::{density, headway, velocity};
use serde_derive::{Deserialize, Serialize};
use tracing::info;

/// Camera perspective of a run
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CameraView {
    /// Looking down on the closed oval, positions are periodic
    #[default]
    TopView,
    /// Looking along a linear segment of the track
    SideView,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatorConfig {
    pub fps: f64,
    // in seconds
    pub delta_t: f64,
    // only used by the top view
    pub circumference: f64,
    pub view: CameraView,
    pub method: VelocityMethod,
    // largest accepted displacement over one window, in length units
    pub max_step: f64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            fps: 25.0,
            delta_t: 1.0,
            circumference: 0.0,
            view: CameraView::TopView,
            method: VelocityMethod::Longitudinal,
            max_step: 1.0,
        }
    }
}

/// What differs between the periodic and the linear track
pub trait Perspective {
    fn velocity(
        &self,
        table: &TrajectoryTable,
        slice: &FrameSlice,
        window: &Window,
        config: &AggregatorConfig,
    ) -> Vec<Option<f64>>;

    fn headway(&self, slice: &FrameSlice, config: &AggregatorConfig) -> Vec<Option<f64>>;

    fn density(&self, headway: &[Option<f64>]) -> Vec<Option<f64>>;
}

pub struct TopView;

impl Perspective for TopView {
    #[inline]
    fn velocity(
        &self,
        table: &TrajectoryTable,
        slice: &FrameSlice,
        window: &Window,
        config: &AggregatorConfig,
    ) -> Vec<Option<f64>> {
        velocity::top_view(table, slice, window, config.method, config.max_step)
    }

    #[inline]
    fn headway(&self, slice: &FrameSlice, config: &AggregatorConfig) -> Vec<Option<f64>> {
        headway::top_view(slice, config.circumference)
    }

    #[inline]
    fn density(&self, headway: &[Option<f64>]) -> Vec<Option<f64>> {
        density::top_view(headway)
    }
}

pub struct SideView;

impl Perspective for SideView {
    #[inline]
    fn velocity(
        &self,
        table: &TrajectoryTable,
        slice: &FrameSlice,
        window: &Window,
        _config: &AggregatorConfig,
    ) -> Vec<Option<f64>> {
        velocity::side_view(table, slice, window)
    }

    #[inline]
    fn headway(&self, slice: &FrameSlice, _config: &AggregatorConfig) -> Vec<Option<f64>> {
        headway::side_view(slice)
    }

    #[inline]
    fn density(&self, headway: &[Option<f64>]) -> Vec<Option<f64>> {
        density::side_view(headway)
    }
}

/// Computes velocity, headway and density of every pedestrian frame by frame
pub struct KinematicsAggregator {
    config: AggregatorConfig,
    window: Window,
}

impl KinematicsAggregator {
    pub fn new(config: AggregatorConfig) -> Result<Self, Error> {
        if !(config.fps > 0.0) {
            return Err(Error::InvalidConfig(format!("fps must be positive, got {}", config.fps)));
        }

        if !(config.delta_t > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "delta_t must be positive, got {}",
                config.delta_t
            )));
        }

        if config.view == CameraView::TopView && !(config.circumference > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "top view requires a positive circumference, got {}",
                config.circumference
            )));
        }

        let window = Window::new(config.delta_t, config.fps);
        if window.half == 0 {
            return Err(Error::InvalidConfig(format!(
                "delta_t = {} spans no frame at {} fps",
                config.delta_t, config.fps
            )));
        }

        Ok(Self { window, config })
    }

    #[inline]
    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Samples of `frame` in walking order with their kinematics, empty if
    /// the frame is not recorded
    pub fn analyze_frame(&self, table: &TrajectoryTable, frame: i64) -> Vec<(Sample, Kinematics)> {
        match table.slice(frame) {
            Some(slice) => match self.config.view {
                CameraView::TopView => self.analyze_slice(&TopView, table, &slice),
                CameraView::SideView => self.analyze_slice(&SideView, table, &slice),
            },
            None => Vec::new(),
        }
    }

    /// Processes all frames in ascending order and keeps the rows for which
    /// every value could be computed
    pub fn run(&self, table: &TrajectoryTable) -> Vec<KinematicSample> {
        let mut total = 0;
        let mut frames = 0;
        let mut result = Vec::with_capacity(table.len());

        for frame in table.frames() {
            let rows = self.analyze_frame(table, frame);

            frames += 1;
            total += rows.len();
            result.extend(
                rows.iter()
                    .filter_map(|(s, kin)| KinematicSample::from_parts(*s, kin)),
            );
        }

        info!(
            frames,
            kept = result.len(),
            dropped = total - result.len(),
            "kinematics computed"
        );

        result
    }

    fn analyze_slice<P: Perspective>(
        &self,
        view: &P,
        table: &TrajectoryTable,
        slice: &FrameSlice,
    ) -> Vec<(Sample, Kinematics)> {
        let velocity = view.velocity(table, slice, &self.window, &self.config);
        let headway = view.headway(slice, &self.config);
        let rho = view.density(&headway);

        slice
            .iter()
            .zip(velocity)
            .zip(headway)
            .zip(rho)
            .map(|(((s, velocity), headway), rho)| {
                (
                    *s,
                    Kinematics {
                        velocity,
                        headway,
                        rho,
                    },
                )
            })
            .collect()
    }
}
