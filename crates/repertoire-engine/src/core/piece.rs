use serde::{Deserialize, Serialize};

/// The two sides of a chess game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[display("white")]
    White,
    #[display("black")]
    Black,
}

impl Side {
    /// Returns the other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row step a pawn of this side advances by.
    ///
    /// White pawns move toward row 0 (rank 8), black pawns toward row 7.
    #[must_use]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    /// Row on which pawns of this side start.
    #[must_use]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Side::White => 6,
            Side::Black => 1,
        }
    }
}

/// Kind of a chess piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceKind {
    /// Pawn.
    Pawn = 0,
    /// Knight.
    Knight = 1,
    /// Bishop.
    Bishop = 2,
    /// Rook.
    Rook = 3,
    /// Queen.
    Queen = 4,
    /// King.
    King = 5,
}

impl PieceKind {
    /// Number of piece kinds (6).
    pub const LEN: usize = 6;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Returns the lowercase letter used for this kind in board diagrams.
    ///
    /// # Examples
    ///
    /// ```
    /// use repertoire_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::Knight.as_char(), 'n');
    /// assert_eq!(PieceKind::King.as_char(), 'k');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Parses a piece kind from a letter, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use repertoire_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('Q'), Some(PieceKind::Queen));
    /// assert_eq!(PieceKind::from_char('b'), Some(PieceKind::Bishop));
    /// assert_eq!(PieceKind::from_char('x'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A piece on the board: its kind and the side owning it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    kind: PieceKind,
    side: Side,
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    #[must_use]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn side(self) -> Side {
        self.side
    }

    /// Returns the diagram letter: uppercase for white, lowercase for black.
    #[must_use]
    pub const fn as_char(self) -> char {
        let c = self.kind.as_char();
        match self.side {
            Side::White => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }

    /// Parses a diagram letter. Uppercase is white, lowercase is black.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        let Some(kind) = PieceKind::from_char(c) else {
            return None;
        };
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        Some(Self::new(kind, side))
    }
}
