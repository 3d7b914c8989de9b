//! Capability trait for armor detection backends.

use std::path::{Path, PathBuf};

use ndarray::Array3;

use crate::nn::RawDetection;

/// Image in height x width x channel layout.
pub type Frame = Array3<u8>;

/// Error type for backend failures.
#[derive(Debug, thiserror::Error)]
pub enum YoloError {
    /// Model file does not exist or cannot be read.
    #[error("model not found: {}", .0.display())]
    ModelNotFound(PathBuf),
    /// Model file exists but cannot be used with the requested layout.
    #[error("invalid model: {0}")]
    InvalidModel(String),
    /// `run` was called before a successful `initialize`.
    #[error("backend is not initialized")]
    NotInitialized,
    /// Frame cannot be fed to the network.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),
    /// Inference failed for this frame.
    #[error("inference error: {0}")]
    Inference(String),
    /// A replaying backend has no frames left.
    #[error("no more recorded frames")]
    Exhausted,
}

/// Trait for armor detection backends.
///
/// Implementations are selected at runtime through a
/// [`YoloRegistry`](crate::nn::YoloRegistry) and are used by the
/// [`ArmorDetector`](crate::autoaim::ArmorDetector) without knowing the
/// concrete type.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use armor_aim::nn::{Frame, RawDetection, Yolo, YoloError};
///
/// struct Blind;
///
/// impl Yolo for Blind {
///     fn initialize(&mut self, _: &Path, _: usize, _: usize) -> Result<(), YoloError> {
///         Ok(())
///     }
///
///     fn run(&mut self, _frame: &Frame) -> Result<Vec<RawDetection>, YoloError> {
///         Ok(vec![])
///     }
/// }
/// ```
pub trait Yolo: Send {
    /// Load and prepare the network.
    ///
    /// # Arguments
    /// * `model_path` - Backend specific model file
    /// * `class_num` - Number of class labels the network emits
    /// * `point_num` - Number of keypoints per object, at least the four corners
    fn initialize(
        &mut self,
        model_path: &Path,
        class_num: usize,
        point_num: usize,
    ) -> Result<(), YoloError>;

    /// Detect armors in one frame.
    ///
    /// Corner points are image-plane pixel coordinates. Detections are
    /// returned most relevant first; callers apply no further ranking.
    fn run(&mut self, frame: &Frame) -> Result<Vec<RawDetection>, YoloError>;
}
