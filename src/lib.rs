//! Perception front-end of an armor auto-aim loop.
//!
//! Detection backends are pluggable through the [`factory`] registry and
//! selected by id at runtime. The [`autoaim`] pipeline turns their per-frame
//! output into armors, tracks one of them and keeps the aim angles.
//!
//! ```no_run
//! use armor_aim::autoaim::{AimPipeline, ArmorDetector, PinholeSolver};
//! use armor_aim::config::NetConfig;
//! use armor_aim::nn::{self, Frame};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = nn::yolo_registry();
//! let config = NetConfig::load("config/net.yaml")?;
//! let detector = ArmorDetector::from_config(&registry, &config)?;
//! let mut pipeline = AimPipeline::new(detector, PinholeSolver::new(1280.0, 1280.0, 640.0, 512.0));
//!
//! let frame = Frame::zeros((1024, 1280, 3));
//! let output = pipeline.run(&frame)?;
//! println!("{:?} -> {:?}", output.event, pipeline.angles());
//! # Ok(())
//! # }
//! ```

pub mod autoaim;
pub mod config;
pub mod factory;
pub mod nn;

pub use autoaim::{AimPipeline, Armor, ArmorDetector, Color, TrackEvent};
pub use factory::{Registration, Registry};
pub use nn::{RawDetection, Yolo, YoloRegistry};
