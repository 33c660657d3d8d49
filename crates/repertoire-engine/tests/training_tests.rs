//! End-to-end training scenarios over the built-in book.
//!
//! These tests drive sessions the way a presentation layer does:
//! - Trainee moves through `attempt_move` and `click_square`
//! - Time through `increment_frame`
//! - State read back through accessors and `view()`

use repertoire_engine::{
    AttemptOutcome, Board, FirstCandidate, Move, MoveSelector, OpeningBook, ReplyStatus,
    SessionConfig, Side, Square, TrainingPhase, TrainingSession,
};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn mv(s: &str) -> Move {
    s.parse().unwrap()
}

fn start(id: &str, config: SessionConfig) -> TrainingSession {
    let line = OpeningBook::builtin().line(id).unwrap().clone();
    TrainingSession::start(line, config, Box::new(FirstCandidate)).unwrap()
}

fn play(session: &mut TrainingSession, notation: &str) -> AttemptOutcome {
    let m = mv(notation);
    session.attempt_move(m.from(), m.to())
}

fn run_frames(session: &mut TrainingSession, frames: u64) {
    for _ in 0..frames {
        session.increment_frame();
    }
}

// =============================================================================
// Scoring
// =============================================================================

#[test]
fn test_scotch_correct_move_gets_reply() {
    let mut session = start("scotchGame", SessionConfig::immediate());
    assert!(play(&mut session, "e2-e4").is_accepted_correct());
    assert_eq!(session.history().key(), "e2-e4,e7-e5");

    assert_eq!(
        play(&mut session, "g1-f3"),
        AttemptOutcome::AcceptedCorrect {
            reply: ReplyStatus::Played(mv("b8-c6"))
        }
    );
    assert_eq!(session.score().correct(), 2);
    assert_eq!(session.score().total(), 2);
}

#[test]
fn test_scotch_mistake_hint_and_undo() {
    let mut session = start("scotchGame", SessionConfig::immediate());
    for m in ["e2-e4", "g1-f3", "d2-d4"] {
        play(&mut session, m);
    }
    assert_eq!(session.history().last(), Some(mv("e5-d4")));

    let board = session.board().clone();
    let history = session.history().clone();
    let score = session.score();

    // Legal, but theory is f3-d4.
    let outcome = play(&mut session, "c2-c3");
    assert_eq!(
        outcome,
        AttemptOutcome::AcceptedIncorrect {
            hint: Some(mv("f3-d4"))
        }
    );
    assert_eq!(session.score().total(), score.total() + 1);
    assert_eq!(session.score().correct(), score.correct());
    assert_ne!(session.board(), &board);

    assert!(session.undo());
    assert_eq!(session.board(), &board);
    assert_eq!(session.history(), &history);
    assert_eq!(session.score(), score);
    assert_eq!(session.turn(), Side::White);
    assert_eq!(session.hint(), None);

    assert!(!session.undo());
    assert_eq!(session.history(), &history);
}

#[test]
fn test_any_listed_candidate_is_correct() {
    for reply in ["d4-b5", "d4-c6"] {
        let mut session = start("scotchGame", SessionConfig::immediate());
        for m in ["e2-e4", "g1-f3", "d2-d4", "f3-d4"] {
            play(&mut session, m);
        }
        assert!(play(&mut session, reply).is_accepted_correct(), "{reply}");
    }
}

// =============================================================================
// Black lines
// =============================================================================

#[test]
fn test_sicilian_opens_for_white() {
    let session = start("sicilianDragon", SessionConfig::default());
    assert_eq!(session.history().iter().copied().collect::<Vec<_>>(), [mv("e2-e4")]);
    assert_eq!(session.turn(), Side::Black);
    assert_eq!(session.phase(), TrainingPhase::AwaitingTraineeMove);
    assert_eq!(session.board().get(sq("e4")), Board::INITIAL.get(sq("e2")));
}

#[test]
fn test_sicilian_reset_replays_first_move() {
    let mut session = start("sicilianDragon", SessionConfig::immediate());
    play(&mut session, "c7-c5");
    session.reset();
    assert_eq!(session.history().key(), "e2-e4");
    assert_eq!(session.turn(), Side::Black);
    assert_eq!(session.score().total(), 0);
}

// =============================================================================
// Timers
// =============================================================================

#[test]
fn test_reply_waits_for_delay() {
    let config = SessionConfig::default();
    let mut session = start("scotchGame", config);
    play(&mut session, "e2-e4");

    let delay = config.frames(config.reply_delay);
    run_frames(&mut session, delay - 1);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.phase(), TrainingPhase::AutomatedThinking);

    run_frames(&mut session, 1);
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.phase(), TrainingPhase::AwaitingTraineeMove);
}

#[test]
fn test_reset_cancels_pending_reply() {
    let config = SessionConfig::default();
    let mut session = start("scotchGame", config);
    play(&mut session, "e2-e4");
    session.reset();

    // Start the next run before the stale reply would have fired.
    play(&mut session, "e2-e4");
    run_frames(&mut session, config.frames(config.reply_delay) * 3);
    assert_eq!(session.history().key(), "e2-e4,e7-e5");
    assert_eq!(session.score().total(), 1);
}

#[test]
fn test_undo_during_feedback_leaves_no_stale_timer() {
    let config = SessionConfig::default();
    let mut session = start("scotchGame", config);
    play(&mut session, "e2-e4");
    session.settle();

    assert!(play(&mut session, "b1-c3").is_accepted_incorrect());
    assert_eq!(session.phase(), TrainingPhase::Feedback);
    assert!(session.undo());

    play(&mut session, "g1-f3");
    assert_eq!(session.phase(), TrainingPhase::AutomatedThinking);
    run_frames(&mut session, config.frames(config.feedback_duration));
    assert_eq!(session.history().key(), "e2-e4,e7-e5,g1-f3,b8-c6");
    assert_eq!(session.phase(), TrainingPhase::AwaitingTraineeMove);
}

// =============================================================================
// End of line
// =============================================================================

#[derive(Debug)]
struct Last;

impl MoveSelector for Last {
    fn choose(&mut self, candidates: &[Move]) -> usize {
        candidates.len() - 1
    }
}

#[test]
fn test_line_ending_on_automated_reply_is_out_of_book() {
    let line = OpeningBook::builtin().line("scotchGame").unwrap().clone();
    let mut session =
        TrainingSession::start(line, SessionConfig::immediate(), Box::new(Last)).unwrap();
    for m in ["e2-e4", "g1-f3", "d2-d4", "f3-d4"] {
        assert!(play(&mut session, m).is_accepted_correct());
    }
    assert_eq!(session.history().last(), Some(mv("d8-h4")));
    assert!(session.is_out_of_book());
    assert_eq!(session.score().total(), 4);

    assert_eq!(
        play(&mut session, "b1-c3"),
        AttemptOutcome::RejectedLineComplete
    );
    assert_eq!(session.score().total(), 4);
}

#[test]
fn test_view_reports_progress() {
    let mut session = start("scotchGambit", SessionConfig::immediate());
    for m in ["e2-e4", "g1-f3", "d2-d4", "f1-c4"] {
        play(&mut session, m);
    }
    let view = session.view();
    assert_eq!(view.opening, "scotchGambit");
    assert_eq!(view.trainee, Side::White);
    assert_eq!(view.history.len(), 8);
    assert_eq!(view.score.to_string(), "4/4");
    assert_eq!(view.feedback.as_deref(), Some("Your turn!"));
    assert!(!view.can_undo);
}
