//! Turning a selected armor into aim angles.

use crate::autoaim::armor::Armor;
use crate::autoaim::target::Angles;

/// Computes aim angles for the selected armor.
///
/// Full pose estimation plugs in here. `reset` is called whenever the
/// pipeline switches to a different physical target, so implementations
/// carrying history (filters, predictors) start over from the new geometry.
pub trait AngleSolver {
    /// Compute yaw and pitch for `armor`.
    fn solve(&mut self, armor: &Armor) -> Angles;

    /// Drop any state carried over from the previous target.
    fn reset(&mut self) {}
}

/// Bearing of the armor center through a pinhole camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinholeSolver {
    /// Focal lengths in pixels
    pub fx: f32,
    pub fy: f32,
    /// Principal point in pixels
    pub cx: f32,
    pub cy: f32,
}

impl PinholeSolver {
    /// Create a solver from camera intrinsics in pixels.
    pub fn new(fx: f32, fy: f32, cx: f32, cy: f32) -> Self {
        Self { fx, fy, cx, cy }
    }
}

impl AngleSolver for PinholeSolver {
    fn solve(&mut self, armor: &Armor) -> Angles {
        let center = armor.center();
        let yaw = ((center.x - self.cx) / self.fx).atan().to_degrees();
        // Image y grows downwards
        let pitch = ((self.cy - center.y) / self.fy).atan().to_degrees();
        Angles::new(yaw, pitch)
    }
}
