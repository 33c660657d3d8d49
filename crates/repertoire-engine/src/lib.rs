//! Opening trainer engine.
//!
//! - [`core`] - Board, squares, moves, move history and movement rules
//! - [`book`] - Opening lines and books of known theory
//! - [`engine`] - Training sessions that replay a line against the trainee

pub use self::{book::*, core::*, engine::*};

pub mod book;
pub mod core;
pub mod engine;

/// Invalid or inconsistent opening-book content.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum BookError {
    #[display("line {line:?}: invalid history prefix {prefix:?}")]
    InvalidPrefix {
        line: String,
        prefix: String,
        source: ParseMoveError,
    },
    #[display("line {line:?}: no candidate moves listed after {prefix:?}")]
    EmptyCandidates { line: String, prefix: String },
    #[display("line {line:?}: missing entry for the start position")]
    MissingStartEntry { line: String },
    #[display("duplicate opening line id {_0:?}")]
    DuplicateLine(#[error(not(source))] String),
    #[display("unknown opening {_0:?}")]
    UnknownOpening(#[error(not(source))] String),
}

/// A training session could not be started.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SessionError {
    #[display("unknown opening {_0:?}")]
    UnknownOpening(#[error(not(source))] String),
    #[display("opening {_0:?} has no first move for the automated side")]
    MissingOpeningMove(#[error(not(source))] String),
}
