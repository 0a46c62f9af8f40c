//! Multi-person identity tracking for exercise video.
//!
//! Detections from an external person detector are associated with tracked
//! identities frame by frame using a weighted blend of horizontal position,
//! vertical position, IoU and size similarity. Identities survive short
//! occlusions and expire after a configurable number of missing frames, with
//! a longer grace period for the selected subject.

pub mod error;
pub mod integration;
pub mod tracker;

pub use error::TrackerError;
pub use integration::{
    Category, DetectionBuilder, DetectionSource, IntoDetections, RawDetection, TrackerPipeline,
};
pub use tracker::{
    AssignmentStrategy, Detection, FrameSize, MatchWeights, PersonTracker, Rect, TrackId,
    TrackState, TrackStore, TrackedPerson, TrackerConfig, match_detections,
};
