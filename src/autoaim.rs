//! Detection-to-target pipeline.
//!
//! Raw backend detections become [`Armor`]s, the first armor is selected as
//! the target, and [`AimPipeline`] keeps yaw/pitch and the tracked color
//! across frames.

mod armor;
mod detector;
mod pipeline;
mod rect;
mod solver;
mod target;

pub use armor::{Armor, Color};
pub use detector::{ArmorDetector, DetectorError};
pub use pipeline::{AimOutput, AimPipeline};
pub use rect::Rect;
pub use solver::{AngleSolver, PinholeSolver};
pub use target::{AimState, Angles, TargetState, TrackEvent};
