use crate::sample::Sample;
use std::collections::HashMap;

/// Samples of a single frame in walking order (ascending `x`)
#[derive(Debug, Clone)]
pub struct FrameSlice {
    frame: i64,
    samples: Vec<Sample>,
    by_id: HashMap<u32, usize>,
}

impl FrameSlice {
    pub fn new(frame: i64, mut samples: Vec<Sample>) -> Self {
        samples.sort_by(|a, b| a.x.total_cmp(&b.x));

        let by_id = samples
            .iter()
            .enumerate()
            .map(|(idx, s)| (s.id, idx))
            .collect();

        Self {
            frame,
            samples,
            by_id,
        }
    }

    #[inline]
    pub fn frame(&self) -> i64 {
        self.frame
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    #[inline]
    pub fn positions(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.x).collect()
    }

    #[inline]
    pub fn get(&self, id: u32) -> Option<&Sample> {
        self.by_id.get(&id).map(|&idx| &self.samples[idx])
    }

    #[inline]
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }
}
