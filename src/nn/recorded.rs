//! Backend replaying detections recorded from an earlier session.
//!
//! The "model" of this backend is a YAML recording:
//!
//! ```yaml
//! frames:
//!   - - class_id: 0
//!       prob: 0.92
//!       corners: [[0, 0], [10, 0], [10, 10], [0, 10]]
//!   - []
//! ```
//!
//! Each entry of `frames` is the detection list for one call to `run`.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use super::{DetectionBuilder, Frame, RawDetection, Yolo, YoloError};
use crate::factory::Registration;

#[derive(Debug, Deserialize)]
struct Recording {
    frames: Vec<Vec<RecordedDetection>>,
}

#[derive(Debug, Deserialize)]
struct RecordedDetection {
    class_id: usize,
    #[serde(default = "full_confidence")]
    prob: f32,
    corners: [[f32; 2]; 4],
    #[serde(default)]
    bbox: Option<[f32; 4]>,
    #[serde(default)]
    extra_points: Vec<[f32; 2]>,
}

fn full_confidence() -> f32 {
    1.0
}

impl RecordedDetection {
    fn into_raw(self) -> RawDetection {
        let mut builder = DetectionBuilder::new()
            .corners(self.corners.map(|[x, y]| (x, y)))
            .prob(self.prob)
            .class_id(self.class_id)
            .extra_points(self.extra_points.into_iter().map(|[x, y]| (x, y)));
        if let Some([x1, y1, x2, y2]) = self.bbox {
            builder = builder.tlbr(x1, y1, x2, y2);
        }
        builder.build()
    }
}

/// Replays a recorded detection stream, one recorded frame per `run`.
#[derive(Debug, Default)]
pub struct RecordedYolo {
    frames: Option<VecDeque<Vec<RawDetection>>>,
}

impl RecordedYolo {
    pub const ID: &'static str = "recorded";
    pub const REGISTRATION: Registration<dyn Yolo> = Registration::new(Self::ID, Self::construct);

    pub fn new() -> Self {
        Self::default()
    }

    fn construct() -> Box<dyn Yolo> {
        Box::new(Self::new())
    }

    /// Number of recorded frames not yet replayed.
    pub fn remaining(&self) -> usize {
        self.frames.as_ref().map_or(0, VecDeque::len)
    }

    fn load(
        model_path: &Path,
        class_num: usize,
        point_num: usize,
    ) -> Result<VecDeque<Vec<RawDetection>>, YoloError> {
        if point_num < 4 {
            return Err(YoloError::InvalidModel(format!(
                "armor networks need at least 4 keypoints, got {point_num}"
            )));
        }

        let contents = fs::read_to_string(model_path)
            .map_err(|_| YoloError::ModelNotFound(model_path.to_path_buf()))?;
        let recording: Recording = serde_yaml::from_str(&contents)
            .map_err(|e| YoloError::InvalidModel(format!("{}: {e}", model_path.display())))?;

        let mut frames = VecDeque::with_capacity(recording.frames.len());
        for (index, frame) in recording.frames.into_iter().enumerate() {
            let mut detections = Vec::with_capacity(frame.len());
            for det in frame {
                if det.class_id >= class_num {
                    return Err(YoloError::InvalidModel(format!(
                        "frame {index}: class {} out of range for {class_num} classes",
                        det.class_id
                    )));
                }
                if 4 + det.extra_points.len() > point_num {
                    return Err(YoloError::InvalidModel(format!(
                        "frame {index}: {} keypoints exceed the {point_num} declared",
                        4 + det.extra_points.len()
                    )));
                }
                detections.push(det.into_raw());
            }
            frames.push_back(detections);
        }
        Ok(frames)
    }
}

impl Yolo for RecordedYolo {
    fn initialize(
        &mut self,
        model_path: &Path,
        class_num: usize,
        point_num: usize,
    ) -> Result<(), YoloError> {
        let frames = Self::load(model_path, class_num, point_num)?;
        info!(
            "recorded backend: loaded {} frames from {}",
            frames.len(),
            model_path.display()
        );
        self.frames = Some(frames);
        Ok(())
    }

    fn run(&mut self, frame: &Frame) -> Result<Vec<RawDetection>, YoloError> {
        let frames = self.frames.as_mut().ok_or(YoloError::NotInitialized)?;
        if frame.is_empty() {
            return Err(YoloError::InvalidFrame(format!(
                "empty frame of shape {:?}",
                frame.shape()
            )));
        }
        frames.pop_front().ok_or(YoloError::Exhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn recording(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn frame() -> Frame {
        Frame::zeros((8, 8, 3))
    }

    const TWO_FRAMES: &str = "\
frames:
  - - class_id: 1
      prob: 0.8
      corners: [[0, 0], [10, 0], [10, 10], [0, 10]]
      extra_points: [[5, 5]]
  - []
";

    #[test]
    fn test_replays_frames_in_order() {
        let file = recording(TWO_FRAMES);
        let mut yolo = RecordedYolo::new();
        yolo.initialize(file.path(), 4, 5).unwrap();
        assert_eq!(yolo.remaining(), 2);

        let first = yolo.run(&frame()).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].class_id, 1);
        assert_eq!(first[0].prob, 0.8);
        assert_eq!(first[0].corners[1], Point2::new(10.0, 0.0));
        assert_eq!(first[0].bbox, [0.0, 0.0, 10.0, 10.0]);
        assert_eq!(first[0].extra_points.len(), 1);

        assert!(yolo.run(&frame()).unwrap().is_empty());
        assert!(matches!(yolo.run(&frame()), Err(YoloError::Exhausted)));
    }

    #[test]
    fn test_missing_model() {
        let mut yolo = RecordedYolo::new();
        let err = yolo
            .initialize(Path::new("/nonexistent/armor.yaml"), 4, 4)
            .unwrap_err();
        assert!(matches!(err, YoloError::ModelNotFound(_)));
    }

    #[test]
    fn test_run_before_initialize() {
        let mut yolo = RecordedYolo::new();
        assert!(matches!(
            yolo.run(&frame()),
            Err(YoloError::NotInitialized)
        ));
    }

    #[test]
    fn test_rejects_out_of_range_class() {
        let file = recording(TWO_FRAMES);
        let mut yolo = RecordedYolo::new();
        let err = yolo.initialize(file.path(), 1, 5).unwrap_err();
        assert!(matches!(err, YoloError::InvalidModel(_)));
    }

    #[test]
    fn test_rejects_bad_point_layout() {
        let file = recording(TWO_FRAMES);
        let mut yolo = RecordedYolo::new();
        assert!(yolo.initialize(file.path(), 4, 3).is_err());
        // One extra keypoint does not fit a 4-point network.
        assert!(yolo.initialize(file.path(), 4, 4).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        let file = recording("frames: not-a-list\n");
        let mut yolo = RecordedYolo::new();
        let err = yolo.initialize(file.path(), 4, 4).unwrap_err();
        assert!(matches!(err, YoloError::InvalidModel(_)));
    }

    #[test]
    fn test_empty_frame_is_rejected() {
        let file = recording(TWO_FRAMES);
        let mut yolo = RecordedYolo::new();
        yolo.initialize(file.path(), 4, 5).unwrap();

        let empty = Frame::zeros((0, 0, 3));
        assert!(matches!(yolo.run(&empty), Err(YoloError::InvalidFrame(_))));
        assert_eq!(yolo.remaining(), 2);
    }
}
