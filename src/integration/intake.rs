//! Turns raw detector output into tracker [`Detection`]s.

use crate::integration::detector::{Category, RawDetection};
use crate::tracker::Detection;

/// Category name most person detectors use.
pub const PERSON: &str = "person";

/// The highest-scoring category of a raw detection.
pub fn top_category(raw: &RawDetection) -> Option<&Category> {
    raw.categories
        .iter()
        .filter(|c| c.score.is_finite())
        .max_by(|a, b| a.score.total_cmp(&b.score))
}

/// Convert one raw detection, if its best category is `category`
/// (compared case-insensitively). The confidence is that category's score,
/// clamped to `[0, 1]`.
pub fn normalize(raw: &RawDetection, category: &str) -> Option<Detection> {
    let top = top_category(raw)?;
    if !top.label.eq_ignore_ascii_case(category) {
        return None;
    }
    Some(Detection::from_rect(raw.bbox, top.score.clamp(0.0, 1.0)))
}

/// Keep the detections of `category`, in input order.
pub fn filter_category(raw: &[RawDetection], category: &str) -> Vec<Detection> {
    raw.iter().filter_map(|r| normalize(r, category)).collect()
}

/// Keep the detections whose best category is [`PERSON`].
pub fn people(raw: &[RawDetection]) -> Vec<Detection> {
    filter_category(raw, PERSON)
}
