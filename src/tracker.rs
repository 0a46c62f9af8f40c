mod config;
pub mod lifecycle;
pub mod matching;
mod person_tracker;
mod rect;
mod store;
mod track_state;

pub use config::{AssignmentStrategy, FrameSize, MatchWeights, TrackerConfig};
pub use matching::{Detection, MatchScore, score_pair};
pub use person_tracker::{PersonTracker, match_detections};
pub use rect::Rect;
pub use store::TrackStore;
pub use track_state::{TrackId, TrackState, TrackedPerson};
