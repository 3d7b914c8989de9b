//! Burn inference backend for armor detection.
//!
//! This module provides a `BurnYolo` that implements [`Yolo`] for keypoint
//! detection models built with the Burn framework.
//!
//! # Example
//!
//! ```ignore
//! use armor_aim::nn::{BurnModel, BurnYolo, RawDetection, YoloError, YoloRegistry};
//! use burn::backend::NdArray;
//!
//! // Implement BurnModel for your detection model
//! struct MyArmorNet { /* ... */ }
//!
//! impl BurnModel<NdArray> for MyArmorNet {
//!     fn load(path: &Path, class_num: usize, point_num: usize, device: &NdArrayDevice)
//!         -> Result<Self, YoloError> { /* ... */ }
//!
//!     fn forward(&self, input: burn::tensor::Tensor<NdArray, 4>) -> Vec<RawDetection> {
//!         // Run inference
//!     }
//! }
//!
//! let mut registry = armor_aim::nn::yolo_registry();
//! BurnYolo::<NdArray, MyArmorNet>::registration("burn").register(&mut registry);
//! ```

use std::path::Path;

use burn::prelude::*;
use burn::tensor::Tensor;
use log::info;

use super::{Frame, RawDetection, Yolo, YoloError};
use crate::factory::Registration;

/// Trait for Burn-based armor detection models.
///
/// Implement this trait for your specific model architecture.
pub trait BurnModel<B: Backend>: Send + Sized + 'static {
    /// Load weights for a network with the given output layout.
    fn load(
        model_path: &Path,
        class_num: usize,
        point_num: usize,
        device: &B::Device,
    ) -> Result<Self, YoloError>;

    /// Run forward pass on the input tensor.
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape [batch, channels, height, width]
    ///
    /// # Returns
    /// Detections in image coordinates, before confidence filtering.
    fn forward(&self, input: Tensor<B, 4>) -> Vec<RawDetection>;

    /// Get the expected input size (channels, height, width).
    fn input_size(&self) -> (usize, usize, usize) {
        (3, 640, 640) // Default YOLO input size
    }
}

/// Burn-based armor detector implementing [`Yolo`].
pub struct BurnYolo<B: Backend, M: BurnModel<B>> {
    model: Option<M>,
    device: B::Device,
    conf_threshold: f32,
}

impl<B: Backend, M: BurnModel<B>> BurnYolo<B, M> {
    /// Create an uninitialized detector on the given device.
    pub fn new(device: B::Device) -> Self {
        Self {
            model: None,
            device,
            conf_threshold: 0.25,
        }
    }

    /// Set the confidence threshold for filtering detections.
    pub fn with_conf_threshold(mut self, threshold: f32) -> Self {
        self.conf_threshold = threshold;
        self
    }

    /// Registration token constructing this backend on the default device.
    pub fn registration(id: &'static str) -> Registration<dyn Yolo> {
        Registration::new(id, Self::construct)
    }

    fn construct() -> Box<dyn Yolo> {
        Box::new(Self::new(B::Device::default()))
    }

    /// Convert an HWC frame into a normalized [1, C, H, W] tensor.
    fn preprocess(&self, model: &M, frame: &Frame) -> Result<Tensor<B, 4>, YoloError> {
        let (channels, target_h, target_w) = model.input_size();
        let (height, width, frame_channels) = frame.dim();

        if frame_channels != channels {
            return Err(YoloError::InvalidFrame(format!(
                "expected {channels} channels, got {frame_channels}"
            )));
        }
        // Real implementation would letterbox here
        if height != target_h || width != target_w {
            return Err(YoloError::InvalidFrame(format!(
                "frame size {width}x{height} doesn't match model size {target_w}x{target_h}"
            )));
        }

        let data: Vec<f32> = frame
            .view()
            .permuted_axes([2, 0, 1])
            .iter()
            .map(|&x| x as f32 / 255.0)
            .collect();

        Ok(
            Tensor::<B, 1>::from_floats(data.as_slice(), &self.device).reshape([
                1, channels, height, width,
            ]),
        )
    }

    /// Drop low-confidence outputs and order the rest by confidence.
    fn postprocess(&self, mut detections: Vec<RawDetection>) -> Vec<RawDetection> {
        detections.retain(|d| d.prob >= self.conf_threshold);
        detections.sort_by(|a, b| b.prob.total_cmp(&a.prob));
        detections
    }
}

impl<B: Backend, M: BurnModel<B>> Yolo for BurnYolo<B, M> {
    fn initialize(
        &mut self,
        model_path: &Path,
        class_num: usize,
        point_num: usize,
    ) -> Result<(), YoloError> {
        if !model_path.exists() {
            return Err(YoloError::ModelNotFound(model_path.to_path_buf()));
        }
        let model = M::load(model_path, class_num, point_num, &self.device)?;
        info!("burn backend: loaded {}", model_path.display());
        self.model = Some(model);
        Ok(())
    }

    fn run(&mut self, frame: &Frame) -> Result<Vec<RawDetection>, YoloError> {
        let model = self.model.as_ref().ok_or(YoloError::NotInitialized)?;
        let tensor = self.preprocess(model, frame)?;
        let raw_detections = model.forward(tensor);
        Ok(self.postprocess(raw_detections))
    }
}
