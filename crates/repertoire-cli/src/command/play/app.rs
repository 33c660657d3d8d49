use crossterm::event::Event;
use ratatui::Frame;
use repertoire_engine::{SessionError, Trainer};

use super::screens::{MenuScreen, Screen, Transition, TrainingScreen};
use crate::tui::{App, RenderMode, Runtime};

#[derive(Debug)]
pub struct PlayApp {
    trainer: Trainer,
    screen: Screen,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(trainer: Trainer) -> Self {
        let screen = Screen::Menu(MenuScreen::new(trainer.book()));
        Self {
            trainer,
            screen,
            is_exiting: false,
        }
    }

    /// Starts training `id` and switches to the board.
    pub fn start(&mut self, id: &str) -> Result<(), SessionError> {
        let session = self.trainer.start_training(id)?;
        self.screen = Screen::Training(TrainingScreen::new(session));
        Ok(())
    }

    fn apply(&mut self, runtime: &mut Runtime, transition: Transition) {
        match transition {
            Transition::Stay => return,
            Transition::Start(id) => {
                if let Err(err) = self.start(&id) {
                    tracing::warn!(%err, "failed to start training");
                    if let Screen::Menu(menu) = &mut self.screen {
                        menu.set_message(err.to_string());
                    }
                }
            }
            Transition::Menu => {
                self.trainer.back_to_menu();
                self.screen = Screen::Menu(MenuScreen::new(self.trainer.book()));
            }
            Transition::Exit => self.is_exiting = true,
        }
        self.configure(runtime);
    }

    /// Ticks only while a session runs; the menu redraws on input alone.
    fn configure(&self, runtime: &mut Runtime) {
        match self.screen {
            Screen::Menu(_) => {
                runtime.set_tick_rate(None);
                runtime.set_render_mode(RenderMode::OnDirty);
            }
            Screen::Training(_) => {
                let fps = self.trainer.config().fps;
                runtime.set_tick_rate(Some(fps));
                runtime.set_render_mode(RenderMode::throttled_from_fps(fps));
            }
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        self.configure(runtime);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) {
        let Some(key) = event.as_key_press_event() else {
            return;
        };
        let transition = match &mut self.screen {
            Screen::Menu(menu) => menu.handle_key(key),
            Screen::Training(training) => training.handle_key(&mut self.trainer, key),
        };
        self.apply(runtime, transition);
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        self.trainer.increment_frame();
    }

    fn draw(&self, frame: &mut Frame) {
        match &self.screen {
            Screen::Menu(menu) => menu.draw(frame),
            Screen::Training(training) => {
                if let Some(session) = self.trainer.session() {
                    training.draw(session, frame);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use repertoire_engine::{OpeningBook, SelectorPolicy, SessionConfig};

    use super::*;

    fn app() -> PlayApp {
        PlayApp::new(Trainer::new(
            OpeningBook::builtin(),
            SessionConfig::immediate(),
            SelectorPolicy::First,
        ))
    }

    fn press(app: &mut PlayApp, runtime: &mut Runtime, code: KeyCode) {
        let event = Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        app.handle_event(runtime, &event);
    }

    #[test]
    fn test_menu_to_training_and_back() {
        let mut app = app();
        let mut runtime = Runtime::new();
        app.init(&mut runtime);
        assert!(matches!(app.screen, Screen::Menu(_)));

        press(&mut app, &mut runtime, KeyCode::Enter);
        assert!(matches!(app.screen, Screen::Training(_)));
        assert!(app.trainer.is_training());

        press(&mut app, &mut runtime, KeyCode::Esc);
        assert!(matches!(app.screen, Screen::Menu(_)));
        assert!(!app.trainer.is_training());

        press(&mut app, &mut runtime, KeyCode::Char('q'));
        assert!(app.should_exit());
    }

    #[test]
    fn test_start_unknown_opening() {
        let mut app = app();
        assert!(app.start("kingsGambit").is_err());
        assert!(matches!(app.screen, Screen::Menu(_)));
        app.start("scotchGame").unwrap();
        assert!(matches!(app.screen, Screen::Training(_)));
    }
}
