pub use self::{board::*, chess_move::*, history::*, piece::*, rules::*, square::*};

pub(crate) mod board;
pub(crate) mod chess_move;
pub(crate) mod history;
pub(crate) mod piece;
pub mod rules;
pub(crate) mod square;
