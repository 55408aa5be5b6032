use crate::error::Error;
use crate::frame::FrameSlice;
use crate::sample::Sample;
use nalgebra as na;
use std::collections::{BTreeMap, HashMap};

/// All samples of one experimental run, ordered by `(id, frame)`.
///
/// The frame index and the per-pedestrian extents are built once at
/// construction; the table is never modified afterwards, transformations
/// produce a new table.
#[derive(Debug, Clone, Default)]
pub struct TrajectoryTable {
    samples: Vec<Sample>,
    frames: BTreeMap<i64, Vec<usize>>,
    extents: HashMap<u32, (f64, f64)>,
}

impl TrajectoryTable {
    pub fn new(mut samples: Vec<Sample>) -> Result<Self, Error> {
        samples.sort_by(|a, b| a.id.cmp(&b.id).then(a.frame.cmp(&b.frame)));

        if let Some(w) = samples
            .windows(2)
            .find(|w| w[0].id == w[1].id && w[0].frame == w[1].frame)
        {
            return Err(Error::DuplicateSample {
                id: w[0].id,
                frame: w[0].frame,
            });
        }

        Ok(Self::from_sorted(samples))
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
    pub fn frames(&self) -> impl Iterator<Item = i64> + '_ {
        self.frames.keys().copied()
    }

    #[inline]
    pub fn first_frame(&self) -> Option<i64> {
        self.frames.keys().next().copied()
    }

    #[inline]
    pub fn last_frame(&self) -> Option<i64> {
        self.frames.keys().next_back().copied()
    }

    pub fn slice(&self, frame: i64) -> Option<FrameSlice> {
        let rows = self.frames.get(&frame)?;

        Some(FrameSlice::new(
            frame,
            rows.iter().map(|&idx| self.samples[idx]).collect(),
        ))
    }

    /// Minimum and maximum `x` ever recorded for the pedestrian
    #[inline]
    pub fn extent(&self, id: u32) -> Option<(f64, f64)> {
        self.extents.get(&id).copied()
    }

    pub fn map_positions<F>(&self, mut f: F) -> Self
    where
        F: FnMut(na::Point2<f64>) -> na::Point2<f64>,
    {
        self.map_samples(|s| s.with_position(f(s.position())))
    }

    /// Maps every sample; `id` and `frame` of the result are ignored
    pub fn map_samples<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Sample) -> Sample,
    {
        let samples = self
            .samples
            .iter()
            .map(|s| Sample {
                id: s.id,
                frame: s.frame,
                ..f(s)
            })
            .collect();

        Self::from_sorted(samples)
    }

    pub fn retain<P>(&self, mut pred: P) -> Self
    where
        P: FnMut(&Sample) -> bool,
    {
        Self::from_sorted(self.samples.iter().filter(|s| pred(s)).copied().collect())
    }

    #[inline]
    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    // ids and frames are untouched by position maps and filters, so order and
    // uniqueness still hold
    fn from_sorted(samples: Vec<Sample>) -> Self {
        let mut frames: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        let mut extents: HashMap<u32, (f64, f64)> = HashMap::new();

        for (idx, s) in samples.iter().enumerate() {
            frames.entry(s.frame).or_insert_with(Vec::new).push(idx);
            extents
                .entry(s.id)
                .and_modify(|(min, max)| {
                    *min = min.min(s.x);
                    *max = max.max(s.x);
                })
                .or_insert((s.x, s.x));
        }

        Self {
            samples,
            frames,
            extents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TrajectoryTable {
        TrajectoryTable::new(vec![
            Sample::new(2, 1, 5.0, 0.0, 0.0),
            Sample::new(1, 2, 1.5, 0.0, 0.0),
            Sample::new(1, 1, 1.0, 0.0, 0.0),
            Sample::new(2, 3, 5.8, 0.0, 0.0),
            Sample::new(1, 3, 2.0, 0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn rows_are_ordered_by_id_then_frame() {
        let t = table();
        let keys: Vec<_> = t.iter().map(|s| (s.id, s.frame)).collect();

        assert_eq!(keys, vec![(1, 1), (1, 2), (1, 3), (2, 1), (2, 3)]);
        assert_eq!(t.frames().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(t.first_frame(), Some(1));
        assert_eq!(t.last_frame(), Some(3));
    }

    #[test]
    fn gaps_are_tolerated() {
        let t = table();

        let slice = t.slice(2).unwrap();
        assert_eq!(slice.len(), 1);
        assert!(slice.get(2).is_none());
        assert!(t.slice(4).is_none());
    }

    #[test]
    fn duplicate_sample_is_rejected() {
        let res = TrajectoryTable::new(vec![
            Sample::new(1, 1, 1.0, 0.0, 0.0),
            Sample::new(1, 1, 1.1, 0.0, 0.0),
        ]);

        assert!(matches!(
            res,
            Err(Error::DuplicateSample { id: 1, frame: 1 })
        ));
    }

    #[test]
    fn extents_follow_position_maps() {
        let t = table();
        assert_eq!(t.extent(1), Some((1.0, 2.0)));
        assert_eq!(t.extent(2), Some((5.0, 5.8)));
        assert_eq!(t.extent(3), None);

        let shifted = t.map_positions(|p| na::Point2::new(p.x + 10.0, p.y));
        assert_eq!(shifted.extent(1), Some((11.0, 12.0)));
        assert_eq!(shifted.len(), t.len());
    }

    #[test]
    fn retain_rebuilds_frame_index() {
        let t = table().retain(|s| s.id == 2);

        assert_eq!(t.len(), 2);
        assert_eq!(t.frames().collect::<Vec<_>>(), vec![1, 3]);
        assert!(t.slice(2).is_none());
    }
}
