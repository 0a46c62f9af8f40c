//! Builder for creating RawDetection objects from various input formats.

use crate::integration::detector::{Category, RawDetection};
use crate::tracker::Rect;

/// Builder for creating [`RawDetection`] objects from various input formats.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    bbox: Rect,
    categories: Vec<Category>,
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.bbox = Rect::from_tlbr(x1, y1, x2, y2);
        self
    }

    /// Set bounding box in XYWH format (center_x, center_y, width, height).
    pub fn xywh(mut self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.bbox = Rect::new(cx - w / 2.0, cy - h / 2.0, w, h);
        self
    }

    /// Set bounding box in TLWH format (left, top, width, height).
    pub fn tlwh(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.bbox = Rect::new(x, y, w, h);
        self
    }

    /// Add a scored category.
    pub fn category(mut self, label: impl Into<String>, score: f32) -> Self {
        self.categories.push(Category::new(label, score));
        self
    }

    /// Shorthand for a `person` category with the given score.
    pub fn person(self, score: f32) -> Self {
        self.category(crate::integration::intake::PERSON, score)
    }

    /// Build the final [`RawDetection`].
    pub fn build(self) -> RawDetection {
        RawDetection {
            bbox: self.bbox,
            categories: self.categories,
        }
    }
}
