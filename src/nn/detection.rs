//! Raw network output for a single object.

use nalgebra::Point2;

/// One detected object as emitted by a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDetection {
    /// Bounding box: [x1, y1, x2, y2]
    pub bbox: [f32; 4],
    /// Confidence score
    pub prob: f32,
    /// Class label
    pub class_id: usize,
    /// Armor corners in the order the network emits them
    pub corners: [Point2<f32>; 4],
    /// Keypoints beyond the four corners, if the network emits any
    pub extra_points: Vec<Point2<f32>>,
}

/// Builder for [`RawDetection`] values.
///
/// The bounding box defaults to the extent of the corners.
#[derive(Debug, Clone)]
pub struct DetectionBuilder {
    bbox: Option<[f32; 4]>,
    prob: f32,
    class_id: usize,
    corners: [Point2<f32>; 4],
    extra_points: Vec<Point2<f32>>,
}

impl Default for DetectionBuilder {
    fn default() -> Self {
        Self {
            bbox: None,
            prob: 0.0,
            class_id: 0,
            corners: [Point2::origin(); 4],
            extra_points: Vec::new(),
        }
    }
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the four corner points, in network order.
    pub fn corners(mut self, corners: [(f32, f32); 4]) -> Self {
        self.corners = corners.map(|(x, y)| Point2::new(x, y));
        self
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.bbox = Some([x1, y1, x2, y2]);
        self
    }

    /// Set the confidence score.
    pub fn prob(mut self, prob: f32) -> Self {
        self.prob = prob;
        self
    }

    /// Set the class label.
    pub fn class_id(mut self, class_id: usize) -> Self {
        self.class_id = class_id;
        self
    }

    /// Append keypoints emitted after the corners.
    pub fn extra_points(mut self, points: impl IntoIterator<Item = (f32, f32)>) -> Self {
        self.extra_points
            .extend(points.into_iter().map(|(x, y)| Point2::new(x, y)));
        self
    }

    /// Build the final `RawDetection`.
    pub fn build(self) -> RawDetection {
        let bbox = self.bbox.unwrap_or_else(|| corner_extent(&self.corners));
        RawDetection {
            bbox,
            prob: self.prob,
            class_id: self.class_id,
            corners: self.corners,
            extra_points: self.extra_points,
        }
    }
}

fn corner_extent(corners: &[Point2<f32>; 4]) -> [f32; 4] {
    corners.iter().fold(
        [f32::MAX, f32::MAX, f32::MIN, f32::MIN],
        |[x1, y1, x2, y2], p| [x1.min(p.x), y1.min(p.y), x2.max(p.x), y2.max(p.y)],
    )
}
