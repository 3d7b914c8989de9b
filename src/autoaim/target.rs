use crate::autoaim::armor::Color;

/// Aim state of the pipeline across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AimState {
    /// No target; angles are pinned to zero
    #[default]
    Lost,
    /// A target is selected and tracked
    Acquired,
}

/// Yaw and pitch, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Angles {
    /// Positive to the right of the optical axis
    pub yaw: f32,
    /// Positive above the optical axis
    pub pitch: f32,
}

impl Angles {
    /// Create angles from yaw and pitch in degrees.
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }
}

/// Cross-frame aim state: current angles and the color last tracked.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TargetState {
    pub yaw: f32,
    pub pitch: f32,
    pub color: Option<Color>,
}

impl TargetState {
    /// Get the current yaw and pitch.
    pub fn angles(&self) -> Angles {
        Angles::new(self.yaw, self.pitch)
    }

    pub(crate) fn track(&mut self, angles: Angles, color: Color) {
        self.yaw = angles.yaw;
        self.pitch = angles.pitch;
        self.color = Some(color);
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// What happened to the tracked target in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackEvent {
    /// A target was selected after the previous frame had none
    Acquired { color: Color },
    /// The selected target has the color tracked last frame
    Tracking { color: Color },
    /// The selected target's color differs from the one tracked last frame
    Reacquired { previous: Color, current: Color },
    /// No armor in this frame
    Lost,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_lost() {
        let target = TargetState::default();
        assert_eq!(AimState::default(), AimState::Lost);
        assert_eq!(target.angles(), Angles::default());
        assert_eq!(target.color, None);
    }

    #[test]
    fn test_track_and_reset() {
        let mut target = TargetState::default();
        target.track(Angles::new(1.5, -2.0), Color::Blue);
        assert_eq!(target.yaw, 1.5);
        assert_eq!(target.pitch, -2.0);
        assert_eq!(target.color, Some(Color::Blue));

        target.reset();
        assert_eq!(target, TargetState::default());
    }
}
