use crate::{SessionError, book::OpeningBook, core::Square};

use super::{AttemptOutcome, ClickOutcome, SelectorPolicy, SessionConfig, TrainingSession};

/// Menu-level owner of an opening book and at most one running session.
///
/// Starting a new session or going back to the menu drops the previous
/// session together with its pending timers.
#[derive(Debug)]
pub struct Trainer {
    book: OpeningBook,
    config: SessionConfig,
    policy: SelectorPolicy,
    session: Option<TrainingSession>,
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new(
            OpeningBook::builtin(),
            SessionConfig::default(),
            SelectorPolicy::default(),
        )
    }
}

impl Trainer {
    #[must_use]
    pub fn new(book: OpeningBook, config: SessionConfig, policy: SelectorPolicy) -> Self {
        Self {
            book,
            config,
            policy,
            session: None,
        }
    }

    #[must_use]
    pub fn book(&self) -> &OpeningBook {
        &self.book
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The running session, or `None` at the menu.
    #[must_use]
    pub fn session(&self) -> Option<&TrainingSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn is_training(&self) -> bool {
        self.session.is_some()
    }

    /// Starts training the line `id`, replacing any running session.
    ///
    /// On error the trainer is left at the menu.
    pub fn start_training(&mut self, id: &str) -> Result<&mut TrainingSession, SessionError> {
        self.session = None;
        let line = self
            .book
            .line(id)
            .ok_or_else(|| SessionError::UnknownOpening(id.to_owned()))?
            .clone();
        let session = TrainingSession::start(line, self.config, self.policy.build())?;
        Ok(self.session.insert(session))
    }

    pub fn reset_game(&mut self) {
        if let Some(session) = &mut self.session {
            session.reset();
        }
    }

    pub fn back_to_menu(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!(
                opening = session.line().id(),
                score = %session.score(),
                "left training session"
            );
        }
    }

    pub fn attempt_move(&mut self, from: Square, to: Square) -> Option<AttemptOutcome> {
        self.session
            .as_mut()
            .map(|session| session.attempt_move(from, to))
    }

    pub fn click_square(&mut self, square: Square) -> Option<ClickOutcome> {
        self.session
            .as_mut()
            .map(|session| session.click_square(square))
    }

    /// Takes back the last incorrect move. Returns `false` at the menu or
    /// when there is nothing to undo.
    pub fn undo_last_mistake(&mut self) -> bool {
        self.session.as_mut().is_some_and(TrainingSession::undo)
    }

    pub fn increment_frame(&mut self) {
        if let Some(session) = &mut self.session {
            session.increment_frame();
        }
    }
}
