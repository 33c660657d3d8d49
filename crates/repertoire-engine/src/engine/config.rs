use std::time::Duration;

use crate::core::PawnDoubleStep;

/// Timing and rule settings for a [`TrainingSession`](crate::TrainingSession).
///
/// Delays are converted to frames using `fps`, so a session advances only as
/// fast as its owner calls `increment_frame`. Zero delays make the
/// corresponding transition happen synchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Frames per second of the driving loop.
    pub fps: u64,
    /// Time between a correct trainee move and the automated reply.
    pub reply_delay: Duration,
    /// How long "Correct move!" is shown before "Opponent is thinking...".
    pub notice_duration: Duration,
    /// How long incorrect-move feedback blocks new input.
    pub feedback_duration: Duration,
    /// Maximum number of mistakes that can be taken back.
    pub undo_limit: usize,
    pub pawn_double_step: PawnDoubleStep,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            reply_delay: Duration::from_millis(1600),
            notice_duration: Duration::from_millis(500),
            feedback_duration: Duration::from_millis(3000),
            undo_limit: 32,
            pawn_double_step: PawnDoubleStep::default(),
        }
    }
}

impl SessionConfig {
    /// Default settings with every delay set to zero.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            reply_delay: Duration::ZERO,
            notice_duration: Duration::ZERO,
            feedback_duration: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Converts a delay to a whole number of frames, rounding down.
    #[must_use]
    pub fn frames(&self, delay: Duration) -> u64 {
        let frames = delay.as_millis() * u128::from(self.fps) / 1000;
        u64::try_from(frames).unwrap_or(u64::MAX)
    }

    /// Converts a frame count back to wall-clock time.
    #[must_use]
    pub fn duration(&self, frames: u64) -> Duration {
        const NANOS_PER_SEC: u64 = 1_000_000_000;
        let fps = self.fps.max(1);
        let secs = frames / fps;
        let nanos = (frames % fps) * NANOS_PER_SEC / fps;
        Duration::new(secs, u32::try_from(nanos).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames() {
        let config = SessionConfig::default();
        assert_eq!(config.frames(Duration::from_millis(1600)), 96);
        assert_eq!(config.frames(Duration::from_millis(10)), 0);
        assert_eq!(config.frames(Duration::ZERO), 0);
    }

    #[test]
    fn test_duration() {
        let config = SessionConfig::default();
        assert_eq!(config.duration(90), Duration::from_millis(1500));
        assert_eq!(config.duration(0), Duration::ZERO);
    }

    #[test]
    fn test_immediate_keeps_rules() {
        let config = SessionConfig::immediate();
        assert_eq!(config.reply_delay, Duration::ZERO);
        assert_eq!(config.undo_limit, 32);
        assert_eq!(config.pawn_double_step, PawnDoubleStep::Strict);
    }
}
