use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{
    chess_move::Move,
    piece::{Piece, Side},
    square::Square,
};

const SIZE: usize = Square::SIZE as usize;

/// An 8×8 grid of optional pieces.
///
/// Rows are stored top to bottom (rank 8 first), matching [`Square`]
/// coordinates. At most one piece occupies a square.
///
/// The textual form is the piece-placement field of FEN, e.g.
/// `rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR`.
///
/// # Example
///
/// ```
/// use repertoire_engine::{Board, Move};
///
/// let mut board = Board::INITIAL;
/// board.apply_move("e2-e4".parse::<Move>().unwrap());
/// assert_eq!(
///     board.to_string(),
///     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; SIZE]; SIZE],
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("expected 8 ranks separated by '/', got {_0}")]
    RankCount(#[error(not(source))] usize),
    #[display("rank {rank} does not describe exactly 8 squares")]
    RankWidth { rank: usize },
    #[display("invalid piece letter {_0:?}")]
    InvalidPiece(#[error(not(source))] char),
}

impl Default for Board {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl Board {
    /// Board with no pieces.
    pub const EMPTY: Self = Self {
        squares: [[None; SIZE]; SIZE],
    };

    /// Standard chess starting position.
    pub const INITIAL: Self = Self::from_rows([
        b"rnbqkbnr",
        b"pppppppp",
        b"........",
        b"........",
        b"........",
        b"........",
        b"PPPPPPPP",
        b"RNBQKBNR",
    ]);

    const fn from_rows(rows: [&[u8; SIZE]; SIZE]) -> Self {
        let mut squares = [[None; SIZE]; SIZE];
        let mut row = 0;
        while row < SIZE {
            let mut col = 0;
            while col < SIZE {
                squares[row][col] = Piece::from_char(rows[row][col] as char);
                col += 1;
            }
            row += 1;
        }
        Self { squares }
    }

    #[must_use]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[usize::from(square.row())][usize::from(square.col())]
    }

    /// Places `piece` on `square`, replacing whatever was there.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[usize::from(square.row())][usize::from(square.col())] = piece;
    }

    #[must_use]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.get(square).is_some()
    }

    /// Returns true if `square` holds a piece belonging to `side`.
    #[must_use]
    pub fn is_occupied_by(&self, square: Square, side: Side) -> bool {
        self.get(square).is_some_and(|piece| piece.side() == side)
    }

    /// Moves whatever stands on the source square to the destination.
    ///
    /// No legality check is performed. Returns the captured piece, if any.
    pub fn apply_move(&mut self, mv: Move) -> Option<Piece> {
        let piece = self.get(mv.from());
        self.set(mv.from(), None);
        let captured = self.get(mv.to());
        self.set(mv.to(), piece);
        captured
    }

    /// Rows from rank 8 down to rank 1.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Piece>; SIZE]> + '_ {
        self.squares.iter()
    }

    /// All occupied squares with their pieces.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.get(sq).map(|piece| (sq, piece)))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.squares.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            let mut empty = 0;
            for cell in row {
                match cell {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.as_char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ranks: Vec<&str> = s.split('/').collect();
        if ranks.len() != SIZE {
            return Err(ParseBoardError::RankCount(ranks.len()));
        }

        let mut board = Self::EMPTY;
        for (row, rank) in ranks.into_iter().enumerate() {
            let mut col = 0;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip as usize;
                } else {
                    let piece = Piece::from_char(c).ok_or(ParseBoardError::InvalidPiece(c))?;
                    if col >= SIZE {
                        return Err(ParseBoardError::RankWidth { rank: SIZE - row });
                    }
                    board.squares[row][col] = Some(piece);
                    col += 1;
                }
            }
            if col != SIZE {
                return Err(ParseBoardError::RankWidth { rank: SIZE - row });
            }
        }
        Ok(board)
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
