//! Persistent per-identity state and the per-frame output record.

use std::fmt;

use nalgebra::Point2;

use crate::tracker::matching::Detection;
use crate::tracker::rect::Rect;

/// Opaque identity of a tracked person. Assigned monotonically and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackId(pub u64);

impl TrackId {
    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State of a single live identity, owned by the [`TrackStore`](crate::TrackStore).
#[derive(Debug, Clone)]
pub struct TrackState {
    pub id: TrackId,
    /// Exponentially smoothed box center.
    pub smoothed: Point2<f32>,
    /// Last observed bounding box.
    pub last_box: Rect,
    pub label: String,
    pub selected: bool,
    /// Consecutive frames without a matching detection.
    pub missing: u32,
    /// Confidence of the most recent matching detection.
    pub score: f32,
}

impl TrackState {
    /// Start a new identity from a detection. The smoothed center is the
    /// detection's own center.
    pub fn new(id: TrackId, label: String, detection: &Detection) -> Self {
        let (cx, cy) = detection.bbox.center();
        Self {
            id,
            smoothed: Point2::new(cx, cy),
            last_box: detection.bbox,
            label,
            selected: false,
            missing: 0,
            score: detection.score,
        }
    }

    /// Fold a matched detection into the state.
    ///
    /// `smoothed = alpha * observed + (1 - alpha) * smoothed`
    pub fn update(&mut self, detection: &Detection, alpha: f32) {
        let (cx, cy) = detection.bbox.center();
        let observed = Point2::new(cx, cy);
        self.smoothed = Point2::from(observed.coords * alpha + self.smoothed.coords * (1.0 - alpha));
        self.last_box = detection.bbox;
        self.score = detection.score;
        self.missing = 0;
    }

    /// Record a frame without a match and return the new missing count.
    pub fn mark_missed(&mut self) -> u32 {
        self.missing = self.missing.saturating_add(1);
        self.missing
    }

    /// Output record for this frame. Confidence is the last detection's score
    /// when `observed`, otherwise 0.
    pub fn to_person(&self, observed: bool) -> TrackedPerson {
        TrackedPerson {
            id: self.id,
            bbox: self.last_box,
            selected: self.selected,
            label: self.label.clone(),
            confidence: if observed { self.score } else { 0.0 },
        }
    }
}

/// A tracked person as reported to rendering and classification consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedPerson {
    pub id: TrackId,
    pub bbox: Rect,
    pub selected: bool,
    pub label: String,
    pub confidence: f32,
}
