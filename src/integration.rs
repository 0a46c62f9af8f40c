//! Integration module for connecting person detectors with the tracker.
//!
//! A detector adapter implements [`DetectionSource`] and yields
//! [`RawDetection`]s carrying every category the model scored. The intake
//! step keeps only boxes whose best category is the one being tracked, and
//! [`TrackerPipeline`] ties detection and tracking together frame by frame.

mod builder;
mod detector;
pub mod intake;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{Category, DetectionSource, IntoDetections, RawDetection};
pub use pipeline::{PipelineError, TrackerPipeline};
