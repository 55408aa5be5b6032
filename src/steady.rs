use crate::sample::KinematicSample;

/// Rows recorded strictly between `start` and `end`
pub fn extract_steady_state(rows: &[KinematicSample], start: i64, end: i64) -> Vec<KinematicSample> {
    rows.iter()
        .filter(|r| r.frame() > start && r.frame() < end)
        .copied()
        .collect()
}
