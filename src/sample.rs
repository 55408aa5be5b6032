use nalgebra as na;

/// One observation of one pedestrian at one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub id: u32,
    pub frame: i64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Sample {
    #[inline]
    pub fn new(id: u32, frame: i64, x: f64, y: f64, z: f64) -> Self {
        Self { id, frame, x, y, z }
    }

    #[inline(always)]
    pub fn position(&self) -> na::Point2<f64> {
        na::Point2::new(self.x, self.y)
    }

    #[inline]
    pub fn with_position(&self, pos: na::Point2<f64>) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            ..*self
        }
    }
}

/// Per-frame values of a pedestrian, `None` marks a value that could not be
/// computed from the available neighbours. Non-finite values count as
/// missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Kinematics {
    pub velocity: Option<f64>,
    pub headway: Option<f64>,
    pub rho: Option<f64>,
}

impl Kinematics {
    #[inline]
    pub fn complete(&self) -> Option<(f64, f64, f64)> {
        let finite = |v: Option<f64>| v.filter(|v| v.is_finite());

        Some((
            finite(self.velocity)?,
            finite(self.headway)?,
            finite(self.rho)?,
        ))
    }
}

/// Fully populated result row: `id, fr, x, y, z, velocity, headway, rho`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicSample {
    pub sample: Sample,
    pub velocity: f64,
    pub headway: f64,
    pub rho: f64,
}

impl KinematicSample {
    pub fn from_parts(sample: Sample, kin: &Kinematics) -> Option<Self> {
        let (velocity, headway, rho) = kin.complete()?;

        Some(Self {
            sample,
            velocity,
            headway,
            rho,
        })
    }

    #[inline(always)]
    pub fn frame(&self) -> i64 {
        self.sample.frame
    }

    #[inline(always)]
    pub fn id(&self) -> u32 {
        self.sample.id
    }
}
