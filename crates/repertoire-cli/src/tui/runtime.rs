use std::{io, time::Duration};

use crossterm::event::Event;
use ratatui::Frame;

use super::event_loop::{EventLoop, LoopEvent, RenderMode};

/// Application driven by [`Runtime::run`].
pub trait App {
    /// Called once before the first event. Configure tick rate and render mode here.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Key presses, resizes and other terminal input.
    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event);

    /// Advances application state by one tick.
    fn update(&mut self, runtime: &mut Runtime);

    fn draw(&self, frame: &mut Frame);
}

#[derive(Debug, Default)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many ticks per second [`App::update`] receives. `None` stops ticking.
    pub fn set_tick_rate(&mut self, fps: Option<u64>) {
        let interval = fps
            .filter(|fps| *fps > 0)
            .map(|fps| Duration::from_secs(1) / u32::try_from(fps).unwrap_or(u32::MAX));
        self.events.set_tick_interval(interval);
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Runs `app` on the terminal until it asks to exit.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);
        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    LoopEvent::Tick => app.update(&mut self),
                    LoopEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    LoopEvent::Input(event) => app.handle_event(&mut self, &event),
                }
            }
            Ok(())
        })
    }
}
