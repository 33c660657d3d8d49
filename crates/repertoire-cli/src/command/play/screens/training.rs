use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    style::Style,
    text::Line,
    widgets::Block,
};
use repertoire_engine::{
    AttemptOutcome, ClickOutcome, Feedback, Side, Square, Trainer, TrainingSession,
};

use super::Transition;
use crate::view::widgets::{
    BoardDisplay, HistoryDisplay, KeyBinding, KeyBindingDisplay, SessionStatsDisplay, color,
};

const KEY_BINDINGS: &[KeyBinding] = &[
    (&["←↑↓→", "hjkl"], "cursor"),
    (&["Enter", "Space"], "select"),
    (&["u"], "undo"),
    (&["r"], "restart"),
    (&["Esc", "m"], "menu"),
    (&["q"], "quit"),
];

const fn square(row: u8, col: u8) -> Square {
    match Square::new(row, col) {
        Some(square) => square,
        None => panic!("square out of range"),
    }
}

/// King's pawn of each side, where the cursor starts.
const fn home_square(side: Side) -> Square {
    square(side.pawn_start_row(), 4)
}

/// Board, stats and feedback of the running session.
///
/// The cursor moves in screen directions, so the board is flipped for a
/// trainee playing black.
#[derive(Debug)]
pub struct TrainingScreen {
    cursor: Square,
    flipped: bool,
    notice: Option<&'static str>,
}

impl TrainingScreen {
    pub fn new(session: &TrainingSession) -> Self {
        let trainee = session.trainee();
        Self {
            cursor: home_square(trainee),
            flipped: trainee == Side::Black,
            notice: None,
        }
    }

    fn move_cursor(&mut self, d_row: i8, d_col: i8) {
        let (d_row, d_col) = if self.flipped {
            (-d_row, -d_col)
        } else {
            (d_row, d_col)
        };
        if let Some(square) = self.cursor.offset(d_row, d_col) {
            self.cursor = square;
        }
    }

    pub fn handle_key(&mut self, trainer: &mut Trainer, key: KeyEvent) -> Transition {
        self.notice = None;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(ClickOutcome::Move(AttemptOutcome::RejectedIllegal)) =
                    trainer.click_square(self.cursor)
                {
                    self.notice = Some("That piece can't move there.");
                }
            }
            KeyCode::Char('u') => {
                if !trainer.undo_last_mistake() {
                    self.notice = Some("Nothing to undo.");
                }
            }
            KeyCode::Char('r') => trainer.reset_game(),
            KeyCode::Esc | KeyCode::Char('m') => return Transition::Menu,
            KeyCode::Char('q') => return Transition::Exit,
            _ => {}
        }
        Transition::Stay
    }

    fn feedback_line<'a>(&self, session: &'a TrainingSession) -> Line<'a> {
        if let Some(notice) = self.notice {
            return Line::styled(notice, Style::new().fg(color::RED));
        }
        let Some(feedback) = session.feedback() else {
            return Line::default();
        };
        let fg = match feedback {
            Feedback::Correct | Feedback::YourTurn | Feedback::LineComplete => color::GREEN,
            Feedback::Incorrect { .. } => color::RED,
            Feedback::MakeOpeningMove
            | Feedback::OpponentThinking
            | Feedback::WaitForOpponent
            | Feedback::UndoToRetry => color::YELLOW,
        };
        Line::styled(feedback.to_string(), Style::new().fg(fg))
    }

    pub fn draw(&self, session: &TrainingSession, frame: &mut Frame<'_>) {
        let board = BoardDisplay::new(session.board())
            .flipped(self.flipped)
            .cursor(self.cursor)
            .selection(session.selection())
            .hint(session.hint())
            .last_move(session.history().last())
            .block(Block::bordered().title(format!(" {} ", session.line().name())));
        let stats = SessionStatsDisplay::new(session).block(Block::bordered().title(" STATS "));
        let history =
            HistoryDisplay::new(session.history()).block(Block::bordered().title(" MOVES "));

        let height = board.height().max(stats.height());
        let [main_area, feedback_area, help_area] = Layout::vertical([
            Constraint::Length(height),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        let [board_area, stats_area, history_area] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Length(stats.width()),
            Constraint::Length(history.width()),
        ])
        .flex(Flex::Center)
        .areas(main_area);

        frame.render_widget(&board, board_area);
        frame.render_widget(stats, stats_area);
        frame.render_widget(history, history_area);
        frame.render_widget(self.feedback_line(session).centered(), feedback_area);
        frame.render_widget(KeyBindingDisplay::new(KEY_BINDINGS), help_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use repertoire_engine::{OpeningBook, SelectorPolicy, SessionConfig};

    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn trainer() -> Trainer {
        Trainer::new(
            OpeningBook::builtin(),
            SessionConfig::immediate(),
            SelectorPolicy::First,
        )
    }

    fn press(screen: &mut TrainingScreen, trainer: &mut Trainer, code: KeyCode) -> Transition {
        screen.handle_key(trainer, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_cursor_starts_on_kings_pawn() {
        let mut trainer = trainer();
        let white = TrainingScreen::new(trainer.start_training("scotchGame").unwrap());
        assert_eq!(white.cursor, sq("e2"));
        assert!(!white.flipped);
        let black = TrainingScreen::new(trainer.start_training("sicilianDragon").unwrap());
        assert_eq!(black.cursor, sq("e7"));
        assert!(black.flipped);
    }

    #[test]
    fn test_cursor_follows_screen_directions() {
        let mut trainer = trainer();
        let mut screen = TrainingScreen::new(trainer.start_training("sicilianDragon").unwrap());
        // Flipped: "up" on screen is toward rank 1.
        press(&mut screen, &mut trainer, KeyCode::Up);
        assert_eq!(screen.cursor, sq("e6"));
        press(&mut screen, &mut trainer, KeyCode::Char('l'));
        assert_eq!(screen.cursor, sq("d6"));

        for _ in 0..10 {
            press(&mut screen, &mut trainer, KeyCode::Down);
        }
        assert_eq!(screen.cursor, sq("d8"));
    }

    #[test]
    fn test_play_move_with_keys() {
        let mut trainer = trainer();
        let mut screen = TrainingScreen::new(trainer.start_training("scotchGame").unwrap());
        press(&mut screen, &mut trainer, KeyCode::Enter);
        press(&mut screen, &mut trainer, KeyCode::Up);
        press(&mut screen, &mut trainer, KeyCode::Up);
        press(&mut screen, &mut trainer, KeyCode::Char(' '));

        let session = trainer.session().unwrap();
        assert_eq!(session.history().key(), "e2-e4,e7-e5");
        assert_eq!(session.score().correct(), 1);
    }

    #[test]
    fn test_notices() {
        let mut trainer = trainer();
        let mut screen = TrainingScreen::new(trainer.start_training("scotchGame").unwrap());
        press(&mut screen, &mut trainer, KeyCode::Char('u'));
        assert_eq!(screen.notice, Some("Nothing to undo."));

        // e2 pawn straight to e5 is not a legal pawn move.
        press(&mut screen, &mut trainer, KeyCode::Enter);
        for _ in 0..3 {
            press(&mut screen, &mut trainer, KeyCode::Char('k'));
        }
        press(&mut screen, &mut trainer, KeyCode::Enter);
        assert_eq!(screen.notice, Some("That piece can't move there."));

        press(&mut screen, &mut trainer, KeyCode::Left);
        assert_eq!(screen.notice, None);
    }

    #[test]
    fn test_navigation_keys() {
        let mut trainer = trainer();
        let mut screen = TrainingScreen::new(trainer.start_training("scotchGame").unwrap());
        assert_eq!(press(&mut screen, &mut trainer, KeyCode::Char('r')), Transition::Stay);
        assert_eq!(press(&mut screen, &mut trainer, KeyCode::Char('m')), Transition::Menu);
        assert_eq!(press(&mut screen, &mut trainer, KeyCode::Char('q')), Transition::Exit);
    }
}
