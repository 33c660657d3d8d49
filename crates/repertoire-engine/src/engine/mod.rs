//! Training sessions and the state around them.
//!
//! - [`TrainingSession`] - One run of an opening line: moves, scoring, undo
//! - [`Trainer`] - Owns a book and the running session, if any
//! - [`MoveSelector`] - Chooses the automated reply among book candidates
//! - [`Timer`] - Frame-counted, generation-stamped one-shot timers
//! - [`Score`] - Correct and total move counts
//! - [`Feedback`] - Messages shown to the trainee
//! - [`SessionConfig`] - Delays, undo limit and rule options
//!
//! # Time
//!
//! Sessions do not read the clock. The owner calls
//! [`TrainingSession::increment_frame`] at [`SessionConfig::fps`], and delays
//! are counted in frames. Scripted callers use [`TrainingSession::settle`] to
//! fire pending timers at once, or configure zero delays with
//! [`SessionConfig::immediate`].
//!
//! # Example
//!
//! ```
//! use repertoire_engine::{SelectorPolicy, SessionConfig, OpeningBook, Trainer};
//!
//! let mut trainer = Trainer::new(
//!     OpeningBook::builtin(),
//!     SessionConfig::immediate(),
//!     SelectorPolicy::First,
//! );
//! trainer.start_training("sicilianDragon").unwrap();
//!
//! let c7 = "c7".parse().unwrap();
//! let c5 = "c5".parse().unwrap();
//! let outcome = trainer.attempt_move(c7, c5).unwrap();
//! assert!(outcome.is_accepted_correct());
//!
//! let session = trainer.session().unwrap();
//! assert_eq!(session.history().key(), "e2-e4,c7-c5,g1-f3");
//! assert_eq!(session.score().to_string(), "1/1");
//! ```

pub use self::{
    config::*, feedback::*, move_selector::*, score::*, timer::*, trainer::*,
    training_session::*,
};

mod config;
mod feedback;
mod move_selector;
mod score;
mod timer;
mod trainer;
mod training_session;
