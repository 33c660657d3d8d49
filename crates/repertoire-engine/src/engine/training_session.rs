use std::{collections::VecDeque, time::Duration};

use serde::Serialize;

use crate::{
    SessionError,
    book::OpeningLine,
    core::{Board, Move, MoveHistory, MoveRules, Side, Square},
};

use super::{Feedback, Generation, MoveSelector, Score, SessionConfig, Timer};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "kebab-case")]
pub enum TrainingPhase {
    /// The trainee plays black and the automated side has yet to open.
    #[display("awaiting first move")]
    AwaitingFirstMove,
    #[display("awaiting trainee move")]
    AwaitingTraineeMove,
    /// A correct move was played and the automated reply is pending.
    #[display("opponent thinking")]
    AutomatedThinking,
    /// An incorrect move is being reported.
    #[display("feedback")]
    Feedback,
    /// The book has nothing further; the line is complete.
    #[display("out of book")]
    OutOfBook,
}

/// What happened to the automated reply after a correct move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "status", content = "move", rename_all = "kebab-case")]
pub enum ReplyStatus {
    /// Chosen and scheduled; played once the reply delay has elapsed.
    Pending(Move),
    /// Played synchronously (zero reply delay).
    Played(Move),
    /// No theory follows the trainee's move.
    LineComplete,
}

/// Result of [`TrainingSession::attempt_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum AttemptOutcome {
    RejectedNotYourTurn,
    /// Empty source square, opponent piece, or geometrically illegal move.
    RejectedIllegal,
    RejectedLineComplete,
    AcceptedCorrect { reply: ReplyStatus },
    /// The move was played but is not theory. `hint` is the first book move.
    AcceptedIncorrect { hint: Option<Move> },
}

/// Result of [`TrainingSession::click_square`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ClickOutcome {
    Selected(Square),
    Deselected,
    Ignored,
    Move(AttemptOutcome),
}

/// Serializable snapshot of a session for presentation and reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub opening: String,
    pub trainee: Side,
    pub board: Board,
    pub history: MoveHistory,
    pub turn: Side,
    pub phase: TrainingPhase,
    pub score: Score,
    pub hint: Option<Move>,
    pub feedback: Option<String>,
    pub can_undo: bool,
}

/// State captured before an incorrect trainee move.
#[derive(Debug, Clone)]
struct Snapshot {
    board: Board,
    history: MoveHistory,
    turn: Side,
    score: Score,
    hint: Option<Move>,
    phase: TrainingPhase,
}

/// One practice run of an opening line.
///
/// The trainee plays one side; the session plays the other from the book,
/// scores each trainee move against theory, and allows taking back
/// mistakes. Delayed transitions (the automated reply and message expiry)
/// advance through [`Self::increment_frame`].
///
/// # Example
///
/// ```
/// use repertoire_engine::{
///     AttemptOutcome, FirstCandidate, OpeningBook, ReplyStatus, SessionConfig, TrainingSession,
/// };
///
/// let line = OpeningBook::builtin().line("scotchGame").unwrap().clone();
/// let mut session =
///     TrainingSession::start(line, SessionConfig::default(), Box::new(FirstCandidate)).unwrap();
///
/// let outcome = session.attempt_move("e2".parse().unwrap(), "e4".parse().unwrap());
/// assert!(matches!(
///     outcome,
///     AttemptOutcome::AcceptedCorrect { reply: ReplyStatus::Pending(_) }
/// ));
///
/// // The reply arrives after the configured delay.
/// session.settle();
/// assert_eq!(session.history().key(), "e2-e4,e7-e5");
/// ```
#[derive(Debug)]
pub struct TrainingSession {
    line: OpeningLine,
    config: SessionConfig,
    rules: MoveRules,
    selector: Box<dyn MoveSelector>,
    opening_move: Option<Move>,
    board: Board,
    history: MoveHistory,
    turn: Side,
    score: Score,
    phase: TrainingPhase,
    selection: Option<Square>,
    hint: Option<Move>,
    feedback: Option<Feedback>,
    undo_stack: VecDeque<Snapshot>,
    generation: Generation,
    reply_timer: Timer<Move>,
    feedback_timer: Timer<Option<Feedback>>,
    total_frames: u64,
}

impl TrainingSession {
    /// Starts a session on `line`.
    ///
    /// When the trainee plays black, the line's first move is played
    /// immediately.
    pub fn start(
        line: OpeningLine,
        config: SessionConfig,
        selector: Box<dyn MoveSelector>,
    ) -> Result<Self, SessionError> {
        let opening_move = if line.automated() == Side::White {
            let first = line
                .first_move()
                .ok_or_else(|| SessionError::MissingOpeningMove(line.id().to_owned()))?;
            Some(first)
        } else {
            None
        };

        let mut session = Self {
            rules: MoveRules::new(config.pawn_double_step),
            line,
            config,
            selector,
            opening_move,
            board: Board::INITIAL,
            history: MoveHistory::new(),
            turn: Side::White,
            score: Score::new(),
            phase: TrainingPhase::AwaitingTraineeMove,
            selection: None,
            hint: None,
            feedback: None,
            undo_stack: VecDeque::new(),
            generation: Generation::default(),
            reply_timer: Timer::new(),
            feedback_timer: Timer::new(),
            total_frames: 0,
        };
        session.reset();
        tracing::debug!(
            opening = session.line.id(),
            trainee = %session.line.trainee(),
            "training session started"
        );
        Ok(session)
    }

    #[must_use]
    pub fn line(&self) -> &OpeningLine {
        &self.line
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn trainee(&self) -> Side {
        self.line.trainee()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Side to move.
    #[must_use]
    pub fn turn(&self) -> Side {
        self.turn
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    /// Book move suggested after the last incorrect attempt.
    #[must_use]
    pub fn hint(&self) -> Option<Move> {
        self.hint
    }

    #[must_use]
    pub fn phase(&self) -> TrainingPhase {
        self.phase
    }

    #[must_use]
    pub fn is_out_of_book(&self) -> bool {
        self.phase.is_out_of_book()
    }

    #[must_use]
    pub fn selection(&self) -> Option<Square> {
        self.selection
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Automated reply waiting for its delay to elapse.
    #[must_use]
    pub fn pending_reply(&self) -> Option<Move> {
        self.reply_timer.peek().copied()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Time spent in the current run, measured in frames.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.config.duration(self.total_frames)
    }

    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView {
            opening: self.line.id().to_owned(),
            trainee: self.trainee(),
            board: self.board.clone(),
            history: self.history.clone(),
            turn: self.turn,
            phase: self.phase,
            score: self.score,
            hint: self.hint,
            feedback: self.feedback.as_ref().map(ToString::to_string),
            can_undo: self.can_undo(),
        }
    }

    /// Restarts the line from the initial position.
    ///
    /// Pending timers are cancelled and can never fire into the new run.
    pub fn reset(&mut self) {
        self.cancel_timers();
        self.board = Board::INITIAL;
        self.history = MoveHistory::new();
        self.turn = Side::White;
        self.score = Score::new();
        self.undo_stack.clear();
        self.hint = None;
        self.selection = None;
        self.total_frames = 0;

        if let Some(first) = self.opening_move {
            self.phase = TrainingPhase::AwaitingFirstMove;
            self.apply(first);
            self.feedback = Some(Feedback::YourTurn);
        } else {
            self.feedback = Some(Feedback::MakeOpeningMove);
        }
        self.phase = TrainingPhase::AwaitingTraineeMove;
        tracing::debug!(opening = self.line.id(), "session reset");
    }

    /// Plays a trainee move and scores it against the book.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> AttemptOutcome {
        if let Some(rejection) = self.check_turn() {
            return rejection;
        }
        let piece = match self.board.get(from) {
            Some(piece) if piece.side() == self.turn => piece,
            _ => return AttemptOutcome::RejectedIllegal,
        };
        if !self.rules.is_legal_move(&self.board, from, to, piece) {
            return AttemptOutcome::RejectedIllegal;
        }

        let mv = Move::new(from, to);
        let expected = self.line.next_moves(&self.history).to_vec();
        let snapshot = self.snapshot();
        self.selection = None;
        self.apply(mv);

        if expected.contains(&mv) {
            self.accept_correct()
        } else {
            self.accept_incorrect(snapshot, expected)
        }
    }

    /// Pointer-style input: select a piece, then click its destination.
    pub fn click_square(&mut self, square: Square) -> ClickOutcome {
        if let Some(rejection) = self.check_turn() {
            self.selection = None;
            return ClickOutcome::Move(rejection);
        }
        let own_piece = self.board.is_occupied_by(square, self.turn);
        match self.selection {
            Some(selected) if selected == square => {
                self.selection = None;
                ClickOutcome::Deselected
            }
            Some(selected) => match self.attempt_move(selected, square) {
                AttemptOutcome::RejectedIllegal if own_piece => {
                    self.selection = Some(square);
                    ClickOutcome::Selected(square)
                }
                AttemptOutcome::RejectedIllegal => {
                    self.selection = None;
                    ClickOutcome::Move(AttemptOutcome::RejectedIllegal)
                }
                outcome => ClickOutcome::Move(outcome),
            },
            None if own_piece => {
                self.selection = Some(square);
                ClickOutcome::Selected(square)
            }
            None => ClickOutcome::Ignored,
        }
    }

    /// Takes back the last incorrect move.
    ///
    /// Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.undo_stack.pop_back() else {
            return false;
        };
        self.cancel_timers();
        self.board = snapshot.board;
        self.history = snapshot.history;
        self.turn = snapshot.turn;
        self.score = snapshot.score;
        self.hint = snapshot.hint;
        self.phase = snapshot.phase;
        self.selection = None;
        self.feedback = None;
        tracing::debug!(
            opening = self.line.id(),
            history = %self.history,
            "incorrect move taken back"
        );
        true
    }

    /// Advances session time by one frame, firing due timers.
    pub fn increment_frame(&mut self) {
        if !self.phase.is_out_of_book() {
            self.total_frames += 1;
        }
        if let Some(reply) = self.reply_timer.tick(self.generation) {
            self.play_reply(reply);
        }
        if let Some(next) = self.feedback_timer.tick(self.generation) {
            self.expire_feedback(next);
        }
    }

    /// Fires every pending timer immediately.
    pub fn settle(&mut self) {
        if let Some(reply) = self.reply_timer.fire_now(self.generation) {
            self.play_reply(reply);
        }
        if let Some(next) = self.feedback_timer.fire_now(self.generation) {
            self.expire_feedback(next);
        }
    }

    /// Rejects input when the trainee may not move.
    fn check_turn(&mut self) -> Option<AttemptOutcome> {
        if self.phase.is_out_of_book() {
            return Some(AttemptOutcome::RejectedLineComplete);
        }
        if self.turn == self.line.trainee() {
            return None;
        }
        match self.phase {
            // The incorrect-move message stays until it expires.
            TrainingPhase::Feedback => {}
            TrainingPhase::AutomatedThinking => {
                self.show_notice(Feedback::WaitForOpponent, Some(Feedback::OpponentThinking));
            }
            _ => {
                // A repeated notice restores what the first one replaced.
                let then = if self.feedback.as_ref().is_some_and(Feedback::is_notice) {
                    self.feedback_timer.peek().cloned().flatten()
                } else {
                    self.feedback.clone()
                };
                self.show_notice(Feedback::UndoToRetry, then);
            }
        }
        Some(AttemptOutcome::RejectedNotYourTurn)
    }

    fn show_notice(&mut self, notice: Feedback, then: Option<Feedback>) {
        let frames = self.config.frames(self.config.notice_duration);
        self.feedback = Some(notice);
        if frames > 0 {
            self.feedback_timer.schedule(frames, self.generation, then);
        }
    }

    fn accept_correct(&mut self) -> AttemptOutcome {
        self.score.record_correct();

        let replies = self.line.next_moves(&self.history);
        if replies.is_empty() {
            self.finish_line();
            return AttemptOutcome::AcceptedCorrect {
                reply: ReplyStatus::LineComplete,
            };
        }
        let index = self.selector.choose(replies);
        if index >= replies.len() {
            tracing::warn!(
                index,
                candidates = replies.len(),
                "move selector returned an out-of-range index"
            );
        }
        let reply = *replies.get(index).unwrap_or(&replies[0]);
        if !self.board.is_occupied_by(reply.from(), self.turn) {
            tracing::warn!(
                opening = self.line.id(),
                %reply,
                "book reply does not move a piece of the side to move"
            );
            self.finish_line();
            return AttemptOutcome::AcceptedCorrect {
                reply: ReplyStatus::LineComplete,
            };
        }

        self.phase = TrainingPhase::AutomatedThinking;
        let reply_frames = self.config.frames(self.config.reply_delay);
        if reply_frames == 0 {
            self.play_reply(reply);
            return AttemptOutcome::AcceptedCorrect {
                reply: ReplyStatus::Played(reply),
            };
        }
        self.reply_timer.schedule(reply_frames, self.generation, reply);

        let notice_frames = self.config.frames(self.config.notice_duration);
        if notice_frames == 0 {
            self.feedback = Some(Feedback::OpponentThinking);
        } else {
            self.feedback = Some(Feedback::Correct);
            self.feedback_timer.schedule(
                notice_frames,
                self.generation,
                Some(Feedback::OpponentThinking),
            );
        }
        AttemptOutcome::AcceptedCorrect {
            reply: ReplyStatus::Pending(reply),
        }
    }

    fn accept_incorrect(&mut self, snapshot: Snapshot, expected: Vec<Move>) -> AttemptOutcome {
        self.score.record_incorrect();
        self.push_snapshot(snapshot);

        self.hint = expected.first().copied();
        if self.hint.is_none() {
            tracing::warn!(
                opening = self.line.id(),
                history = %self.history,
                "no book moves for the position the trainee moved from"
            );
        }
        self.feedback = Some(Feedback::Incorrect { expected });

        let frames = self.config.frames(self.config.feedback_duration);
        if frames == 0 {
            self.phase = TrainingPhase::AwaitingTraineeMove;
        } else {
            self.phase = TrainingPhase::Feedback;
            self.feedback_timer.schedule(frames, self.generation, None);
        }
        AttemptOutcome::AcceptedIncorrect { hint: self.hint }
    }

    /// Plays a reply checked by [`Self::accept_correct`]. The board cannot
    /// change while it is pending.
    fn play_reply(&mut self, reply: Move) {
        self.apply(reply);
        self.feedback_timer.cancel();
        if self.line.next_moves(&self.history).is_empty() {
            self.finish_line();
        } else {
            self.phase = TrainingPhase::AwaitingTraineeMove;
            self.feedback = Some(Feedback::YourTurn);
        }
    }

    fn expire_feedback(&mut self, next: Option<Feedback>) {
        self.feedback = next;
        if self.phase.is_feedback() {
            self.phase = TrainingPhase::AwaitingTraineeMove;
        }
    }

    fn finish_line(&mut self) {
        self.reply_timer.cancel();
        self.feedback_timer.cancel();
        self.phase = TrainingPhase::OutOfBook;
        self.feedback = Some(Feedback::LineComplete);
        tracing::debug!(
            opening = self.line.id(),
            score = %self.score,
            "end of opening line"
        );
    }

    fn apply(&mut self, mv: Move) {
        let captured = self.board.apply_move(mv);
        self.history.push(mv);
        tracing::debug!(side = %self.turn, %mv, ?captured, "move applied");
        self.turn = self.turn.opponent();
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            history: self.history.clone(),
            turn: self.turn,
            score: self.score,
            hint: self.hint,
            phase: self.phase,
        }
    }

    fn push_snapshot(&mut self, snapshot: Snapshot) {
        if self.config.undo_limit == 0 {
            return;
        }
        while self.undo_stack.len() >= self.config.undo_limit {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(snapshot);
    }

    fn cancel_timers(&mut self) {
        self.reply_timer.cancel();
        self.feedback_timer.cancel();
        self.generation = self.generation.next();
    }
}
