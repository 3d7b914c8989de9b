//! Armor plates, the per-frame target candidates.

use nalgebra::Point2;

use crate::autoaim::rect::Rect;
use crate::nn::RawDetection;

/// Armor light color as classified by the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
    /// Unlit armor of a destroyed or disabled robot
    Grey,
    Purple,
    /// Class label outside the known color range
    Unknown,
}

impl Color {
    /// Map a network class label to a color.
    pub fn from_class_id(class_id: usize) -> Self {
        match class_id {
            0 => Self::Red,
            1 => Self::Blue,
            2 => Self::Grey,
            3 => Self::Purple,
            _ => Self::Unknown,
        }
    }
}

/// One armor candidate in image coordinates.
///
/// The corner order is the network's keypoint order and is relied upon by
/// pose estimation downstream; it is never rearranged.
#[derive(Debug, Clone, PartialEq)]
pub struct Armor {
    pub corners: [Point2<f32>; 4],
    pub color: Color,
}

impl Armor {
    /// Create an armor from ordered corners and a color.
    pub fn new(corners: [Point2<f32>; 4], color: Color) -> Self {
        Self { corners, color }
    }

    /// Mean of the four corners.
    pub fn center(&self) -> Point2<f32> {
        let sum = self
            .corners
            .iter()
            .fold(nalgebra::Vector2::zeros(), |acc, p| acc + p.coords);
        Point2::from(sum / 4.0)
    }

    /// Axis-aligned box around the corners, e.g. for drawing.
    ///
    /// ```
    /// use armor_aim::autoaim::{Armor, Color};
    /// use nalgebra::Point2;
    ///
    /// let armor = Armor::new(
    ///     [
    ///         Point2::new(2.0, 4.0),
    ///         Point2::new(12.0, 5.0),
    ///         Point2::new(12.0, 9.0),
    ///         Point2::new(2.0, 8.0),
    ///     ],
    ///     Color::Blue,
    /// );
    /// let rect = armor.bounding_rect();
    /// assert_eq!(rect.to_tlbr(), [2.0, 4.0, 12.0, 9.0]);
    /// assert_eq!(rect.center(), Point2::new(7.0, 6.5));
    /// assert_eq!(rect.area(), 50.0);
    /// ```
    pub fn bounding_rect(&self) -> Rect {
        Rect::from_points(&self.corners)
    }
}

impl From<&RawDetection> for Armor {
    fn from(det: &RawDetection) -> Self {
        Self::new(det.corners, Color::from_class_id(det.class_id))
    }
}
