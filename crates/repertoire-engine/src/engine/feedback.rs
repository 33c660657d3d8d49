use std::fmt;

use serde::{Serialize, Serializer};

use crate::core::Move;

/// Message shown to the trainee about the last thing that happened.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum Feedback {
    /// The trainee plays white and has not moved yet.
    MakeOpeningMove,
    Correct,
    OpponentThinking,
    YourTurn,
    /// The move was not in the book; `expected` lists the theory moves.
    Incorrect { expected: Vec<Move> },
    WaitForOpponent,
    /// The automated side has nothing to play after a mistake.
    UndoToRetry,
    LineComplete,
}

impl Feedback {
    /// Short-lived answer to out-of-turn input.
    #[must_use]
    pub fn is_notice(&self) -> bool {
        matches!(self, Self::WaitForOpponent | Self::UndoToRetry)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MakeOpeningMove => f.write_str("Your turn! Make your opening move."),
            Self::Correct => f.write_str("Correct move!"),
            Self::OpponentThinking => f.write_str("Opponent is thinking..."),
            Self::YourTurn => f.write_str("Your turn!"),
            Self::Incorrect { expected } if expected.is_empty() => {
                f.write_str("Not the best move.")
            }
            Self::Incorrect { expected } => {
                f.write_str("Not the best move. Try: ")?;
                for (i, mv) in expected.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" or ")?;
                    }
                    write!(f, "{mv}")?;
                }
                Ok(())
            }
            Self::WaitForOpponent => f.write_str("Wait for opponent to move..."),
            Self::UndoToRetry => f.write_str("Undo your last move to try again."),
            Self::LineComplete => f.write_str("End of opening line - great job!"),
        }
    }
}

impl Serialize for Feedback {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
