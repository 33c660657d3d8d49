use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event};

/// When a redraw is produced.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// After every tick or input.
    #[default]
    OnDirty,
    /// After a tick or input, at most once per interval.
    Throttled(Duration),
}

impl RenderMode {
    #[must_use]
    pub fn throttled_from_fps(fps: u64) -> Self {
        let fps = u32::try_from(fps.max(1)).unwrap_or(u32::MAX);
        Self::Throttled(Duration::from_secs(1) / fps)
    }
}

#[derive(Debug)]
pub(super) enum LoopEvent {
    Tick,
    Render,
    Input(Event),
}

/// Multiplexes ticks, redraws and terminal input into one stream.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    next_tick: Instant,
    last_render: Option<Instant>,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            next_tick: Instant::now(),
            last_render: None,
            // The first frame is drawn before any input arrives.
            dirty: true,
        }
    }
}

impl EventLoop {
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        if self.tick_interval != interval {
            self.tick_interval = interval;
            self.next_tick = Instant::now();
        }
    }

    pub(super) fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    /// Blocks until the next tick, redraw or input event.
    pub(super) fn next(&mut self) -> io::Result<LoopEvent> {
        loop {
            let now = Instant::now();
            if let Some(interval) = self.tick_interval
                && now >= self.next_tick
            {
                // Skip missed ticks rather than replaying them in a burst.
                self.next_tick = (self.next_tick + interval).max(now);
                self.dirty = true;
                return Ok(LoopEvent::Tick);
            }

            if let Some(render_at) = self.render_at()
                && now >= render_at
            {
                self.dirty = false;
                self.last_render = Some(now);
                return Ok(LoopEvent::Render);
            }

            let wake_at = [self.tick_interval.map(|_| self.next_tick), self.render_at()]
                .into_iter()
                .flatten()
                .min();
            let ready = match wake_at {
                Some(at) => event::poll(at.saturating_duration_since(now))?,
                None => true,
            };
            if ready {
                self.dirty = true;
                return Ok(LoopEvent::Input(event::read()?));
            }
        }
    }

    fn render_at(&self) -> Option<Instant> {
        if !self.dirty {
            return None;
        }
        match (self.render_mode, self.last_render) {
            (RenderMode::Throttled(interval), Some(last)) => Some(last + interval),
            _ => Some(Instant::now()),
        }
    }
}
