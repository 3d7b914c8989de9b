//! Armor detection on top of a pluggable backend.

use log::{error, info};

use crate::autoaim::armor::Armor;
use crate::config::{NetConfig, YoloConfig};
use crate::nn::{self, Frame, Yolo, YoloError, YoloRegistry};

/// Error type for detector setup and per-frame detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectorError {
    /// No backend is registered under the configured id.
    #[error("unknown detection backend '{0}'")]
    UnknownBackend(String),
    /// The configuration has no model path for the backend.
    #[error("no model configured for backend '{0}'")]
    MissingModel(String),
    /// The backend failed to load its model.
    #[error("failed to initialize backend '{backend}': {source}")]
    Initialize {
        backend: String,
        #[source]
        source: YoloError,
    },
    /// The backend failed on a frame.
    #[error("detection failed: {0}")]
    Run(#[from] YoloError),
}

/// Converts backend output into [`Armor`]s.
///
/// A detector only exists around a successfully initialized backend.
pub struct ArmorDetector {
    yolo: Box<dyn Yolo>,
    backend: String,
}

impl ArmorDetector {
    /// Initialize `yolo` with `config` and wrap it.
    pub fn new(
        mut yolo: Box<dyn Yolo>,
        backend: impl Into<String>,
        config: &YoloConfig,
    ) -> Result<Self, DetectorError> {
        let backend = backend.into();
        if let Err(source) = yolo.initialize(&config.model_path, config.class_num, config.point_num)
        {
            error!(
                "Failed to load armor neural network '{backend}' from {}: {source}",
                config.model_path.display()
            );
            return Err(DetectorError::Initialize { backend, source });
        }
        info!(
            "armor detector ready: backend '{backend}', {} classes, {} points",
            config.class_num, config.point_num
        );
        Ok(Self { yolo, backend })
    }

    /// Resolve the configured backend from `registry` and initialize it.
    pub fn from_config(registry: &YoloRegistry, config: &NetConfig) -> Result<Self, DetectorError> {
        let yolo = nn::create_yolo(registry, &config.backend)
            .ok_or_else(|| DetectorError::UnknownBackend(config.backend.clone()))?;
        let yolo_config = config
            .yolo_config()
            .ok_or_else(|| DetectorError::MissingModel(config.backend.clone()))?;
        Self::new(yolo, config.backend.clone(), &yolo_config)
    }

    /// Detect armors in `frame`, one per backend detection, in backend order.
    pub fn run(&mut self, frame: &Frame) -> Result<Vec<Armor>, YoloError> {
        let detections = self.yolo.run(frame)?;
        Ok(detections.iter().map(Armor::from).collect())
    }

    /// Registry id of the wrapped backend.
    pub fn backend(&self) -> &str {
        &self.backend
    }
}

impl std::fmt::Debug for ArmorDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArmorDetector")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}
