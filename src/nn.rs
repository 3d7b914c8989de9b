//! Armor detection backends.
//!
//! This module defines the [`Yolo`] capability shared by all detection
//! backends, the registry family they are selected from, and the built-in
//! implementations.

mod detection;
mod recorded;
mod yolo;

pub use detection::{DetectionBuilder, RawDetection};
pub use recorded::RecordedYolo;
pub use yolo::{Frame, Yolo, YoloError};

#[cfg(feature = "burn-backend")]
mod burn_backend;

#[cfg(feature = "burn-backend")]
pub use burn_backend::{BurnModel, BurnYolo};

use log::warn;

use crate::factory::{Registration, Registry};

/// Registry family of detection backends.
pub type YoloRegistry = Registry<dyn Yolo>;

/// Built-in backends, in registration order.
pub const BUILTIN_BACKENDS: &[Registration<dyn Yolo>] = &[RecordedYolo::REGISTRATION];

/// Registry holding every built-in backend.
///
/// Hosts add their own backends on top before the first lookup.
pub fn yolo_registry() -> YoloRegistry {
    Registry::with_registrations(BUILTIN_BACKENDS)
}

/// Construct the backend registered under `id`.
///
/// Returns `None` for unknown ids; the caller owns the returned backend.
pub fn create_yolo(registry: &YoloRegistry, id: &str) -> Option<Box<dyn Yolo>> {
    let yolo = registry.create(id);
    if yolo.is_none() {
        warn!(
            "no detection backend registered as '{id}' (known: {:?})",
            registry.ids()
        );
    }
    yolo
}
