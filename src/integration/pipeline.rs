//! TrackerPipeline for combining detection with tracking.

use thiserror::Error;
use tracing::warn;

use crate::error::TrackerError;
use crate::integration::intake;
use crate::tracker::{FrameSize, PersonTracker, TrackedPerson};

use super::DetectionSource;

/// Failure of a strict pipeline step.
#[derive(Debug, Error)]
pub enum PipelineError<E> {
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error("detector failed: {0}")]
    Detector(E),
}

/// Bundles a [`DetectionSource`] with a [`PersonTracker`].
pub struct TrackerPipeline<D: DetectionSource> {
    detector: D,
    tracker: PersonTracker,
    category: String,
}

impl<D: DetectionSource> TrackerPipeline<D> {
    /// Create a pipeline that tracks the `person` category.
    pub fn new(detector: D, tracker: PersonTracker) -> Self {
        Self {
            detector,
            tracker,
            category: intake::PERSON.to_string(),
        }
    }

    /// Create a new tracking pipeline with default tracker configuration.
    pub fn with_default_config(detector: D) -> Self {
        Self::new(detector, PersonTracker::default())
    }

    /// Track a different detector category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Process a single frame and return the people seen in it.
    ///
    /// A detector failure is treated as a frame with no detections: every live
    /// identity ages by one frame and nothing is created. Only an invalid
    /// frame size is reported as an error, and it leaves the tracker untouched.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<TrackedPerson>, TrackerError> {
        let frame = FrameSize::new(width, height)?;
        let detections = match self.detector.detect(input, width, height) {
            Ok(raw) => intake::filter_category(&raw, &self.category),
            Err(err) => {
                warn!(%err, "detector failed, tracking frame as empty");
                Vec::new()
            }
        };
        Ok(self.tracker.update(&detections, frame))
    }

    /// Like [`process_frame`](Self::process_frame), but a detector failure is
    /// returned and the frame is skipped without touching the tracker.
    pub fn try_process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<TrackedPerson>, PipelineError<D::Error>> {
        let frame = FrameSize::new(width, height)?;
        let raw = self
            .detector
            .detect(input, width, height)
            .map_err(PipelineError::Detector)?;
        let detections = intake::filter_category(&raw, &self.category);
        Ok(self.tracker.update(&detections, frame))
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &PersonTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut PersonTracker {
        &mut self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::{DetectionBuilder, RawDetection};
    use crate::tracker::TrackId;

    struct MockDetector {
        frames: Vec<Result<Vec<RawDetection>, String>>,
    }

    impl DetectionSource for MockDetector {
        type Error = String;

        fn detect(
            &mut self,
            _input: &[u8],
            _width: u32,
            _height: u32,
        ) -> Result<Vec<RawDetection>, Self::Error> {
            if self.frames.is_empty() {
                Ok(Vec::new())
            } else {
                self.frames.remove(0)
            }
        }
    }

    fn person() -> RawDetection {
        DetectionBuilder::new()
            .tlwh(100.0, 50.0, 80.0, 200.0)
            .person(0.9)
            .build()
    }

    #[test]
    fn test_tracker_pipeline() {
        let detector = MockDetector {
            frames: vec![
                Ok(vec![
                    person(),
                    DetectionBuilder::new().tlwh(400.0, 300.0, 50.0, 50.0).category("ball", 0.9).build(),
                ]),
                Ok(vec![person()]),
            ],
        };

        let mut pipeline = TrackerPipeline::with_default_config(detector);
        let first = pipeline.process_frame(&[], 640, 480).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].label, "Person 1");

        let second = pipeline.process_frame(&[], 640, 480).unwrap();
        assert_eq!(second[0].id, TrackId(0));
    }

    #[test]
    fn test_detector_failure_ages_tracks() {
        let detector = MockDetector {
            frames: vec![Ok(vec![person()]), Err("model crashed".to_string()), Ok(vec![person()])],
        };
        let mut pipeline = TrackerPipeline::with_default_config(detector);
        pipeline.process_frame(&[], 640, 480).unwrap();

        let failed = pipeline.process_frame(&[], 640, 480).unwrap();
        assert!(failed.is_empty());
        assert_eq!(
            pipeline.tracker().store().get(TrackId(0)).map(|s| s.missing),
            Some(1)
        );

        let recovered = pipeline.process_frame(&[], 640, 480).unwrap();
        assert_eq!(recovered[0].id, TrackId(0));
    }

    #[test]
    fn test_strict_mode_skips_failed_frame() {
        let detector = MockDetector {
            frames: vec![Ok(vec![person()]), Err("timeout".to_string())],
        };
        let mut pipeline = TrackerPipeline::with_default_config(detector);
        pipeline.try_process_frame(&[], 640, 480).unwrap();

        let err = pipeline.try_process_frame(&[], 640, 480).unwrap_err();
        assert!(matches!(err, PipelineError::Detector(ref msg) if msg == "timeout"));
        assert_eq!(pipeline.tracker().frame_count(), 1);
        assert_eq!(
            pipeline.tracker().store().get(TrackId(0)).map(|s| s.missing),
            Some(0)
        );
    }

    #[test]
    fn test_zero_sized_frame_is_rejected() {
        let detector = MockDetector { frames: vec![] };
        let mut pipeline = TrackerPipeline::with_default_config(detector);
        assert_eq!(
            pipeline.process_frame(&[], 0, 480),
            Err(TrackerError::InvalidFrameSize {
                width: 0,
                height: 480
            })
        );
    }
}
