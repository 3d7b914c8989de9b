//! AimPipeline for turning frames into aim angles.

use log::debug;

use crate::autoaim::armor::Armor;
use crate::autoaim::detector::{ArmorDetector, DetectorError};
use crate::autoaim::solver::{AngleSolver, PinholeSolver};
use crate::autoaim::target::{AimState, Angles, TargetState, TrackEvent};
use crate::nn::Frame;

/// Result of one processed frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AimOutput {
    /// Every armor seen in the frame, in backend order
    pub armors: Vec<Armor>,
    pub event: TrackEvent,
}

/// Detection, target selection and aim state in one place.
///
/// The first armor the backend reports is tracked. An empty frame drops the
/// target and zeroes the angles; a backend failure leaves everything as it
/// was.
pub struct AimPipeline<S: AngleSolver = PinholeSolver> {
    detector: ArmorDetector,
    solver: S,
    target: TargetState,
    state: AimState,
    frame_id: u64,
}

impl<S: AngleSolver> AimPipeline<S> {
    /// Create a pipeline in the `Lost` state.
    pub fn new(detector: ArmorDetector, solver: S) -> Self {
        Self {
            detector,
            solver,
            target: TargetState::default(),
            state: AimState::Lost,
            frame_id: 0,
        }
    }

    /// Process a single frame.
    ///
    /// # Returns
    /// All armors in the frame and what happened to the tracked target, or
    /// the backend error. On error no state is modified.
    pub fn run(&mut self, frame: &Frame) -> Result<AimOutput, DetectorError> {
        let armors = self.detector.run(frame)?;
        self.frame_id += 1;

        let event = match armors.first() {
            None => self.lose(),
            Some(selected) => self.track(selected),
        };
        debug!(
            "frame {}: {} armors, {:?}, yaw {:.2} pitch {:.2}",
            self.frame_id,
            armors.len(),
            event,
            self.target.yaw,
            self.target.pitch
        );

        Ok(AimOutput { armors, event })
    }

    fn lose(&mut self) -> TrackEvent {
        self.state = AimState::Lost;
        self.target.reset();
        TrackEvent::Lost
    }

    fn track(&mut self, selected: &Armor) -> TrackEvent {
        let current = selected.color;
        let event = match (self.state, self.target.color) {
            (AimState::Acquired, Some(previous)) if previous == current => {
                TrackEvent::Tracking { color: current }
            }
            (AimState::Acquired, Some(previous)) => {
                TrackEvent::Reacquired { previous, current }
            }
            _ => TrackEvent::Acquired { color: current },
        };

        // A different target: solve from its own geometry, not the old history
        if !matches!(event, TrackEvent::Tracking { .. }) {
            self.solver.reset();
        }

        let angles = self.solver.solve(selected);
        self.target.track(angles, current);
        self.state = AimState::Acquired;
        event
    }

    /// Get a reference to the tracked target state.
    pub fn target(&self) -> &TargetState {
        &self.target
    }

    /// Get the current aim state.
    pub fn state(&self) -> AimState {
        self.state
    }

    /// Get the current yaw and pitch.
    pub fn angles(&self) -> Angles {
        self.target.angles()
    }

    /// Number of frames processed successfully.
    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &ArmorDetector {
        &self.detector
    }

    /// Get a reference to the angle solver.
    pub fn solver(&self) -> &S {
        &self.solver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoaim::armor::Color;
    use crate::config::YoloConfig;
    use crate::nn::{DetectionBuilder, RawDetection, Yolo, YoloError};
    use std::collections::VecDeque;
    use std::path::{Path, PathBuf};

    struct ScriptedYolo {
        frames: VecDeque<Result<Vec<RawDetection>, YoloError>>,
    }

    impl Yolo for ScriptedYolo {
        fn initialize(&mut self, _: &Path, _: usize, _: usize) -> Result<(), YoloError> {
            Ok(())
        }

        fn run(&mut self, _frame: &Frame) -> Result<Vec<RawDetection>, YoloError> {
            self.frames.pop_front().unwrap_or(Err(YoloError::Exhausted))
        }
    }

    /// Counts resets and answers with the armor's first corner.
    #[derive(Default)]
    struct CornerSolver {
        resets: usize,
    }

    impl AngleSolver for CornerSolver {
        fn solve(&mut self, armor: &Armor) -> Angles {
            Angles::new(armor.corners[0].x, armor.corners[0].y)
        }

        fn reset(&mut self) {
            self.resets += 1;
        }
    }

    fn armor(class_id: usize, x: f32, y: f32) -> RawDetection {
        DetectionBuilder::new()
            .corners([(x, y), (x + 10.0, y), (x + 10.0, y + 10.0), (x, y + 10.0)])
            .class_id(class_id)
            .build()
    }

    fn pipeline(
        frames: Vec<Result<Vec<RawDetection>, YoloError>>,
    ) -> AimPipeline<CornerSolver> {
        let yolo = Box::new(ScriptedYolo {
            frames: frames.into(),
        });
        let config = YoloConfig {
            model_path: PathBuf::from("scripted"),
            class_num: 4,
            point_num: 4,
        };
        let detector = ArmorDetector::new(yolo, "scripted", &config).unwrap();
        AimPipeline::new(detector, CornerSolver::default())
    }

    fn frame() -> Frame {
        Frame::zeros((4, 4, 3))
    }

    #[test]
    fn test_starts_lost() {
        let pipeline = pipeline(vec![]);
        assert_eq!(pipeline.state(), AimState::Lost);
        assert_eq!(pipeline.angles(), Angles::default());
        assert_eq!(pipeline.target().color, None);
    }

    #[test]
    fn test_tracks_first_armor_and_returns_all() {
        let mut pipeline = pipeline(vec![Ok(vec![armor(1, 7.0, 3.0), armor(0, 50.0, 50.0)])]);
        let output = pipeline.run(&frame()).unwrap();

        assert_eq!(output.armors.len(), 2);
        assert_eq!(output.event, TrackEvent::Acquired { color: Color::Blue });
        assert_eq!(pipeline.state(), AimState::Acquired);
        assert_eq!(pipeline.angles(), Angles::new(7.0, 3.0));
        assert_eq!(pipeline.target().color, Some(Color::Blue));
        assert_eq!(pipeline.frame_id(), 1);
    }

    #[test]
    fn test_state_transitions() {
        let mut pipeline = pipeline(vec![
            Ok(vec![armor(0, 1.0, 1.0)]),
            Ok(vec![armor(0, 2.0, 2.0)]),
            Ok(vec![armor(1, 3.0, 3.0)]),
            Ok(vec![]),
            Ok(vec![armor(1, 4.0, 4.0)]),
        ]);

        let events: Vec<TrackEvent> = (0..5)
            .map(|_| pipeline.run(&frame()).unwrap().event)
            .collect();

        assert_eq!(
            events,
            vec![
                TrackEvent::Acquired { color: Color::Red },
                TrackEvent::Tracking { color: Color::Red },
                TrackEvent::Reacquired {
                    previous: Color::Red,
                    current: Color::Blue
                },
                TrackEvent::Lost,
                TrackEvent::Acquired { color: Color::Blue },
            ]
        );
        // Acquired, Reacquired and the second Acquired restart the solver
        assert_eq!(pipeline.solver().resets, 3);
        assert_eq!(pipeline.angles(), Angles::new(4.0, 4.0));
    }

    #[test]
    fn test_failure_leaves_state_untouched() {
        let mut pipeline = pipeline(vec![
            Ok(vec![armor(0, 5.0, 3.0)]),
            Err(YoloError::Inference("device lost".into())),
        ]);
        pipeline.run(&frame()).unwrap();
        let before = *pipeline.target();

        let err = pipeline.run(&frame()).unwrap_err();
        assert!(matches!(err, DetectorError::Run(YoloError::Inference(_))));
        assert_eq!(*pipeline.target(), before);
        assert_eq!(pipeline.state(), AimState::Acquired);
        assert_eq!(pipeline.frame_id(), 1);
        assert_eq!(pipeline.solver().resets, 1);
    }

    #[test]
    fn test_empty_frame_drops_acquired_target() {
        let mut pipeline = pipeline(vec![Ok(vec![armor(1, 905.0, 37.0)]), Ok(vec![])]);
        pipeline.run(&frame()).unwrap();
        assert_eq!(pipeline.angles(), Angles::new(905.0, 37.0));

        let output = pipeline.run(&frame()).unwrap();
        assert!(output.armors.is_empty());
        assert_eq!(output.event, TrackEvent::Lost);
        assert_eq!(pipeline.angles(), Angles::default());
        assert_eq!(pipeline.target().color, None);
        assert_eq!(pipeline.state(), AimState::Lost);
    }
}
