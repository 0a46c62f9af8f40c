/// Axis-aligned bounding box in image pixel coordinates.
///
/// Stored as top-left corner plus dimensions (TLWH). Conversions to and from
/// corner form (TLBR) are provided for detector adapters that emit
/// `x1, y1, x2, y2`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Exact geometric center. Not truncated, so repeated smoothing carries no
    /// rounding bias.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Area of the box. Degenerate (negative extent) boxes count as empty.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Intersection over Union with another bounding box, in `[0, 1]`.
    pub fn iou(&self, other: &Rect) -> f32 {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.width).min(other.x + other.width);
        let y2 = (self.y + self.height).min(other.y + other.height);

        let inter_width = (x2 - x1).max(0.0);
        let inter_height = (y2 - y1).max(0.0);
        let inter_area = inter_width * inter_height;

        let union_area = self.area() + other.area() - inter_area;

        if union_area > 0.0 {
            (inter_area / union_area).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Ratio of the smaller area to the larger one, `0` if either box is empty.
    pub fn area_similarity(&self, other: &Rect) -> f32 {
        let a = self.area();
        let b = other.area();
        if a <= 0.0 || b <= 0.0 {
            return 0.0;
        }
        a.min(b) / a.max(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rect_conversions() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);

        assert_eq!(rect.to_tlwh(), [10.0, 20.0, 30.0, 40.0]);
        assert_eq!(rect.to_tlbr(), [10.0, 20.0, 40.0, 60.0]);
    }

    #[test]
    fn test_from_tlbr() {
        let rect = Rect::from_tlbr(10.0, 20.0, 40.0, 60.0);
        assert_eq!(rect.to_tlwh(), [10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_center_is_not_truncated() {
        let rect = Rect::new(0.0, 0.0, 101.0, 201.0);
        assert_eq!(rect.center(), (50.5, 100.5));
    }

    #[test]
    fn test_iou() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);

        // Intersection: 5x5 = 25
        // Union: 100 + 100 - 25 = 175
        assert_abs_diff_eq!(a.iou(&b), 25.0 / 175.0, epsilon = 1e-6);
    }

    #[test]
    fn test_iou_no_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 10.0, 10.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_iou_same_box() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_abs_diff_eq!(a.iou(&a), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_iou_zero_area() {
        let a = Rect::new(0.0, 0.0, 0.0, 10.0);
        let b = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.iou(&b), 0.0);
        assert_eq!(a.iou(&a), 0.0);
    }

    #[test]
    fn test_area_similarity() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(50.0, 50.0, 20.0, 10.0);
        assert_abs_diff_eq!(a.area_similarity(&b), 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(b.area_similarity(&a), 0.5, epsilon = 1e-6);
        assert_eq!(a.area_similarity(&Rect::new(0.0, 0.0, 10.0, 0.0)), 0.0);
    }

    #[test]
    fn test_negative_extent_counts_as_empty() {
        let inverted = Rect::from_tlbr(10.0, 10.0, 0.0, 0.0);
        assert_eq!(inverted.area(), 0.0);
        assert_eq!(inverted.area_similarity(&Rect::new(0.0, 0.0, 10.0, 10.0)), 0.0);
    }
}
