//! Trait for person detection backends and their raw output.

use crate::tracker::Rect;

/// One scored category attached to a detected box.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub label: String,
    pub score: f32,
}

impl Category {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Unfiltered detector output for one box.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDetection {
    pub bbox: Rect,
    /// Every category the model scored for this box, in any order.
    pub categories: Vec<Category>,
}

/// Trait for object detection inference backends.
///
/// Implement this trait to connect any detection model to the tracker.
///
/// # Example
///
/// ```ignore
/// use floortrack::{DetectionSource, RawDetection};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<RawDetection>, Self::Error> {
///         // Run inference and return detections
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error: std::fmt::Display;

    /// Run inference on raw image data.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<RawDetection>, Self::Error>;
}

/// Helper trait for converting model-specific outputs to [`RawDetection`].
pub trait IntoDetections {
    fn into_detections(self) -> Vec<RawDetection>;
}

impl IntoDetections for Vec<RawDetection> {
    fn into_detections(self) -> Vec<RawDetection> {
        self
    }
}

/// Corner-form boxes `[x1, y1, x2, y2]` with a single label and score each,
/// the shape most single-head detectors return.
impl IntoDetections for Vec<([f32; 4], String, f32)> {
    fn into_detections(self) -> Vec<RawDetection> {
        self.into_iter()
            .map(|([x1, y1, x2, y2], label, score)| RawDetection {
                bbox: Rect::from_tlbr(x1, y1, x2, y2),
                categories: vec![Category::new(label, score)],
            })
            .collect()
    }
}
