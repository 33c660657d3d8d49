use serde::Serialize;

/// Counter identifying one incarnation of a session's state.
///
/// Every operation that replaces the board wholesale (reset, undo) moves the
/// session to a new generation. Scheduled tasks carry the generation they were
/// scheduled in and are discarded if it no longer matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// One-shot, frame-counted timer holding a single pending task.
///
/// Scheduling replaces any task already pending. A task is released once its
/// frame count runs out, and only if it was scheduled in the generation the
/// caller is currently in.
///
/// # Example
///
/// ```
/// use repertoire_engine::{Generation, Timer};
///
/// let generation = Generation::default();
/// let mut timer = Timer::new();
/// timer.schedule(2, generation, "reply");
///
/// assert_eq!(timer.tick(generation), None);
/// assert_eq!(timer.tick(generation), Some("reply"));
/// assert!(!timer.is_pending());
///
/// // Tasks from an older generation never fire.
/// timer.schedule(1, generation, "stale");
/// assert_eq!(timer.tick(generation.next()), None);
/// ```
#[derive(Debug, Clone)]
pub struct Timer<T> {
    slot: Option<Scheduled<T>>,
}

#[derive(Debug, Clone)]
struct Scheduled<T> {
    remaining_frames: u64,
    generation: Generation,
    task: T,
}

impl<T> Default for Timer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timer<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// Schedules `task` to fire after `frames` ticks, replacing any pending task.
    ///
    /// A zero frame count fires on the next tick.
    pub fn schedule(&mut self, frames: u64, generation: Generation, task: T) {
        self.slot = Some(Scheduled {
            remaining_frames: frames.max(1),
            generation,
            task,
        });
    }

    /// Drops the pending task, returning it.
    pub fn cancel(&mut self) -> Option<T> {
        self.slot.take().map(|scheduled| scheduled.task)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    #[must_use]
    pub fn remaining_frames(&self) -> Option<u64> {
        self.slot.as_ref().map(|scheduled| scheduled.remaining_frames)
    }

    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.slot.as_ref().map(|scheduled| &scheduled.task)
    }

    /// Advances the timer by one frame.
    ///
    /// Returns the task if it became due during this frame and belongs to
    /// `current`.
    pub fn tick(&mut self, current: Generation) -> Option<T> {
        let scheduled = self.slot.as_mut()?;
        scheduled.remaining_frames = scheduled.remaining_frames.saturating_sub(1);
        if scheduled.remaining_frames > 0 {
            return None;
        }
        self.fire_now(current)
    }

    /// Releases the pending task immediately, regardless of remaining frames.
    ///
    /// The generation check still applies.
    pub fn fire_now(&mut self, current: Generation) -> Option<T> {
        let scheduled = self.slot.take()?;
        if scheduled.generation != current {
            tracing::debug!(
                scheduled = scheduled.generation.value(),
                current = current.value(),
                "discarding task from a previous generation"
            );
            return None;
        }
        Some(scheduled.task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_exact_frame_count() {
        let generation = Generation::default();
        let mut timer = Timer::new();
        timer.schedule(3, generation, 7);
        assert_eq!(timer.remaining_frames(), Some(3));
        assert_eq!(timer.tick(generation), None);
        assert_eq!(timer.tick(generation), None);
        assert_eq!(timer.tick(generation), Some(7));
        assert_eq!(timer.tick(generation), None);
    }

    #[test]
    fn test_zero_frames_fires_on_next_tick() {
        let generation = Generation::default();
        let mut timer = Timer::new();
        timer.schedule(0, generation, ());
        assert_eq!(timer.tick(generation), Some(()));
    }

    #[test]
    fn test_reschedule_replaces_pending_task() {
        let generation = Generation::default();
        let mut timer = Timer::new();
        timer.schedule(1, generation, "first");
        timer.schedule(2, generation, "second");
        assert_eq!(timer.tick(generation), None);
        assert_eq!(timer.tick(generation), Some("second"));
    }

    #[test]
    fn test_cancel() {
        let generation = Generation::default();
        let mut timer = Timer::new();
        timer.schedule(1, generation, "task");
        assert_eq!(timer.peek(), Some(&"task"));
        assert_eq!(timer.cancel(), Some("task"));
        assert!(!timer.is_pending());
        assert_eq!(timer.tick(generation), None);
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let old = Generation::default();
        let mut timer = Timer::new();
        timer.schedule(5, old, "task");
        assert_eq!(timer.fire_now(old.next()), None);
        assert!(!timer.is_pending());
    }
}
