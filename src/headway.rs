use crate::frame::FrameSlice;
use tracing::debug;

/// Gaps to the pedestrian ahead on the periodic track, in slice order.
///
/// The leading pedestrian's gap closes the loop over the circumference, so
/// the gaps of a non-empty slice always sum up to `circumference`.
pub fn top_view(slice: &FrameSlice, circumference: f64) -> Vec<Option<f64>> {
    let pos = slice.positions();

    let (first, last) = match (pos.first(), pos.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Vec::new(),
    };

    pos.windows(2)
        .map(|w| Some(w[1] - w[0]))
        .chain(std::iter::once(Some((circumference - last) + first)))
        .collect()
}

/// Gaps to the pedestrian ahead on a linear track, in slice order. Nobody is
/// ahead of the leading pedestrian.
pub fn side_view(slice: &FrameSlice) -> Vec<Option<f64>> {
    if slice.len() < 2 {
        debug!(
            frame = slice.frame(),
            count = slice.len(),
            "too few pedestrians for a headway"
        );
        return vec![None; slice.len()];
    }

    let pos = slice.positions();

    pos.windows(2)
        .map(|w| Some(w[1] - w[0]))
        .chain(std::iter::once(None))
        .collect()
}
