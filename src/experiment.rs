use crate::aggregator::{AggregatorConfig, CameraView};
use crate::error::Error;
use crate::io::{self, ColumnLayout, Header, Temporal};
use crate::normalize::{AxisTransform, MeasurementArea, Normalizer};
use crate::table::TrajectoryTable;
use crate::transform::OvalTrack;
use crate::velocity::VelocityMethod;
use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::BufRead;

/// Static description of one experiment
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ExperimentConfig {
    // where the trajectories are published, if they are
    pub link_data: Option<String>,
    pub transform: AxisTransform,
    pub columns: ColumnLayout,
    pub area: Option<MeasurementArea>,
    pub fps: f64,
    // straight part of the oval
    pub length: f64,
    pub radius: f64,
    // measured circumference, derived from the geometry if absent
    pub circumference: Option<f64>,
    pub camera: CameraView,
    pub temporal: Temporal,
    // whitespace if absent
    pub delimiter: Option<char>,
    pub header: Header,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            link_data: None,
            transform: AxisTransform::default(),
            columns: ColumnLayout::default(),
            area: None,
            fps: 25.0,
            length: 0.0,
            radius: 0.0,
            circumference: None,
            camera: CameraView::TopView,
            temporal: Temporal::Frames,
            delimiter: None,
            header: Header::Commented,
        }
    }
}

impl ExperimentConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.fps > 0.0) {
            return Err(Error::InvalidConfig(format!("fps must be positive, got {}", self.fps)));
        }

        if self.transform.unit == 0.0 {
            return Err(Error::InvalidConfig("unit must not be zero".into()));
        }

        if let Some(area) = self.area {
            if area.min > area.max {
                return Err(Error::InvalidConfig(format!(
                    "empty measurement area [{}, {}]",
                    area.min, area.max
                )));
            }
        }

        if self.camera == CameraView::TopView {
            self.track()?;

            if !(self.circumference() > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "circumference must be positive, got {}",
                    self.circumference()
                )));
            }
        }

        Ok(())
    }

    #[inline]
    pub fn track(&self) -> Result<OvalTrack<f64>, Error> {
        OvalTrack::new(self.length, self.radius)
    }

    pub fn circumference(&self) -> f64 {
        match self.circumference {
            Some(c) => c,
            None => 2.0 * self.length + 2.0 * std::f64::consts::PI * self.radius,
        }
    }

    #[inline]
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.transform, self.area)
    }

    pub fn aggregator_config(&self, delta_t: f64, method: VelocityMethod) -> AggregatorConfig {
        AggregatorConfig {
            fps: self.fps,
            delta_t,
            circumference: self.circumference(),
            view: self.camera,
            method,
            ..Default::default()
        }
    }

    /// Reads a raw trajectory file laid out as this experiment records them
    pub fn read_table<R: BufRead>(&self, reader: R) -> Result<TrajectoryTable, Error> {
        let raw = io::read_raw(reader, self.delimiter, self.header)?;

        io::unify(raw.view(), &self.columns, self.temporal, self.fps)
    }
}

/// Immutable lookup from experiment name to its configuration
#[derive(Debug, Clone, Default)]
pub struct ExperimentRegistry {
    experiments: HashMap<String, ExperimentConfig>,
}

impl ExperimentRegistry {
    pub fn new(experiments: HashMap<String, ExperimentConfig>) -> Result<Self, Error> {
        for (name, e) in &experiments {
            e.validate()
                .map_err(|err| Error::InvalidConfig(format!("{}: {}", name, err)))?;
        }

        Ok(Self { experiments })
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, Error> {
        Self::new(serde_json::from_reader(reader)?)
    }

    pub fn get(&self, name: &str) -> Result<&ExperimentConfig, Error> {
        self.experiments
            .get(name)
            .ok_or_else(|| Error::UnknownExperiment(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.experiments.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }
}
