/// A 2D axis-aligned bounding box represented by minimum and maximum points.
///
/// Used throughout the pipeline for candidate boxes in working-tensor space
/// and for final detections in original-image space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bbox {
    /// The minimum point of the bounding box (top-left corner in image coordinates).
    pub min: glam::Vec2,
    /// The maximum point of the bounding box (bottom-right corner in image coordinates).
    pub max: glam::Vec2,
}

impl Bbox {
    /// Creates a new bounding box from minimum and maximum points.
    pub fn new(min: glam::Vec2, max: glam::Vec2) -> Self {
        Self { min, max }
    }

    /// Creates a bounding box from a center point and size vector.
    ///
    /// This is the constructor used with YOLO-style detection outputs, which
    /// represent boxes as (center_x, center_y, width, height).
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use visionmatrix_core::analysis::bbox::Bbox;
    /// let bbox = Bbox::from_center_size(Vec2::new(100.0, 200.0), Vec2::new(50.0, 80.0));
    /// assert_eq!(bbox.min, Vec2::new(75.0, 160.0));
    /// assert_eq!(bbox.max, Vec2::new(125.0, 240.0));
    /// ```
    pub fn from_center_size(center: glam::Vec2, size: glam::Vec2) -> Self {
        let half_size = size / 2.0;
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Width of the box. Negative if `max.x < min.x`.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the box. Negative if `max.y < min.y`.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Area of the box (width × height).
    pub fn area(&self) -> f32 {
        let length = self.max - self.min;

        length.x * length.y
    }

    /// Calculates the area of intersection between this bounding box and another.
    ///
    /// Returns 0.0 when the boxes do not overlap, including the edge-touching
    /// case where the intersection has no area.
    pub fn intersection(&self, other: &Self) -> f32 {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);

        if max.x > min.x && max.y > min.y {
            (max.x - min.x) * (max.y - min.y)
        } else {
            0.
        }
    }

    /// Calculates the Intersection over Union (IoU) between this bounding box
    /// and another.
    ///
    /// IoU = intersection area / union area, in `[0, 1]`. A pair whose union
    /// has zero area is reported as non-overlapping (0.0) rather than
    /// dividing by zero.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use visionmatrix_core::analysis::bbox::Bbox;
    /// let a = Bbox::new(Vec2::ZERO, Vec2::new(2.0, 2.0));
    /// let b = Bbox::new(Vec2::ZERO, Vec2::new(2.0, 2.0));
    /// assert_eq!(a.iou(&b), 1.0);
    /// ```
    pub fn iou(&self, other: &Self) -> f32 {
        let intersection_area = self.intersection(other);
        let union_area = self.area() + other.area() - intersection_area;

        if union_area > 0.0 {
            intersection_area / union_area
        } else {
            0.0
        }
    }

    /// Clamps the bounding box coordinates to stay within the specified bounds.
    ///
    /// Useful for constraining detection results to image boundaries; the
    /// pipeline itself only clamps the origin (see the remap stage), so
    /// callers wanting strictly in-bounds boxes apply this themselves.
    pub fn clamp(&self, min_bounds: glam::Vec2, max_bounds: glam::Vec2) -> Self {
        Self {
            min: self.min.max(min_bounds),
            max: self.max.min(max_bounds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_area_and_size() {
        let bbox = Bbox::new(glam::Vec2::ZERO, glam::Vec2::new(4.0, 3.0));
        assert_eq!(bbox.width(), 4.0);
        assert_eq!(bbox.height(), 3.0);
        assert_eq!(bbox.area(), 12.0);

        // Degenerate line has no area
        let line = Bbox::new(glam::Vec2::ZERO, glam::Vec2::new(5.0, 0.0));
        assert_eq!(line.area(), 0.0);
    }

    #[test]
    fn test_bbox_from_center_size() {
        let bbox =
            Bbox::from_center_size(glam::Vec2::new(100.0, 200.0), glam::Vec2::new(50.0, 80.0));
        assert_eq!(bbox.min, glam::Vec2::new(75.0, 160.0));
        assert_eq!(bbox.max, glam::Vec2::new(125.0, 240.0));
        assert_eq!(bbox.area(), 4000.0);

        // Zero size collapses to a point
        let point = Bbox::from_center_size(glam::Vec2::new(5.0, 7.0), glam::Vec2::new(0.0, 0.0));
        assert_eq!(point.min, point.max);
        assert_eq!(point.area(), 0.0);
    }

    #[test]
    fn test_bbox_intersection() {
        // 2x2 overlap
        let a = Bbox::new(glam::Vec2::new(0.0, 0.0), glam::Vec2::new(4.0, 4.0));
        let b = Bbox::new(glam::Vec2::new(2.0, 2.0), glam::Vec2::new(6.0, 6.0));
        assert_eq!(a.intersection(&b), 4.0);
        assert_eq!(b.intersection(&a), 4.0);

        // Disjoint boxes
        let c = Bbox::new(glam::Vec2::new(3.0, 3.0), glam::Vec2::new(5.0, 5.0));
        let d = Bbox::new(glam::Vec2::new(0.0, 0.0), glam::Vec2::new(2.0, 2.0));
        assert_eq!(c.intersection(&d), 0.0);

        // Edge touching has no area
        let left = Bbox::new(glam::Vec2::new(0.0, 0.0), glam::Vec2::new(2.0, 2.0));
        let right = Bbox::new(glam::Vec2::new(2.0, 0.0), glam::Vec2::new(4.0, 2.0));
        assert_eq!(left.intersection(&right), 0.0);

        // Full containment
        let outer = Bbox::new(glam::Vec2::new(0.0, 0.0), glam::Vec2::new(10.0, 10.0));
        let inner = Bbox::new(glam::Vec2::new(2.0, 3.0), glam::Vec2::new(5.0, 7.0));
        assert_eq!(outer.intersection(&inner), 12.0);
    }

    #[test]
    fn test_bbox_iou() {
        // Identical boxes
        let a = Bbox::new(glam::Vec2::new(0.0, 0.0), glam::Vec2::new(4.0, 4.0));
        assert_eq!(a.iou(&a), 1.0);

        // Partial overlap: intersection 4, union 16 + 16 - 4 = 28
        let b = Bbox::new(glam::Vec2::new(2.0, 2.0), glam::Vec2::new(6.0, 6.0));
        let expected = 4.0 / 28.0;
        assert!((a.iou(&b) - expected).abs() < 1e-6);

        // Disjoint boxes
        let c = Bbox::new(glam::Vec2::new(30.0, 30.0), glam::Vec2::new(40.0, 40.0));
        assert_eq!(a.iou(&c), 0.0);

        // Two degenerate lines: zero union must not divide by zero
        let line1 = Bbox::new(glam::Vec2::new(0.0, 0.0), glam::Vec2::new(5.0, 0.0));
        let line2 = Bbox::new(glam::Vec2::new(2.0, 0.0), glam::Vec2::new(7.0, 0.0));
        assert_eq!(line1.iou(&line2), 0.0);
    }

    #[test]
    fn test_bbox_clamp() {
        let min_bounds = glam::Vec2::new(0.0, 0.0);
        let max_bounds = glam::Vec2::new(639.0, 639.0);

        let oversized = Bbox::new(glam::Vec2::new(-10.0, -5.0), glam::Vec2::new(650.0, 700.0));
        let clamped = oversized.clamp(min_bounds, max_bounds);
        assert_eq!(clamped.min, glam::Vec2::new(0.0, 0.0));
        assert_eq!(clamped.max, glam::Vec2::new(639.0, 639.0));

        let within = Bbox::new(glam::Vec2::new(100.0, 200.0), glam::Vec2::new(500.0, 600.0));
        let unchanged = within.clamp(min_bounds, max_bounds);
        assert_eq!(unchanged, within);
    }
}
