use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A square on the 8×8 board.
///
/// # Coordinate System
///
/// - Row 0 is rank 8, row 7 is rank 1
/// - Column 0 is file `a`, column 7 is file `h`
///
/// Squares are always on the board; out-of-range coordinates are rejected by
/// the constructors.
///
/// # Example
///
/// ```
/// use repertoire_engine::Square;
///
/// let e2: Square = "e2".parse().unwrap();
/// assert_eq!((e2.row(), e2.col()), (6, 4));
/// assert_eq!(e2.to_string(), "e2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid square notation: {notation:?}")]
pub struct ParseSquareError {
    #[error(not(source))]
    notation: String,
}

impl Square {
    /// Board extent along each axis.
    pub const SIZE: u8 = 8;

    /// Creates a square from board coordinates, or `None` if off the board.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < Self::SIZE && col < Self::SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Like [`Self::new`], but accepts signed coordinates so that offsets past
    /// any edge can be expressed.
    #[must_use]
    pub fn from_signed(row: i32, col: i32) -> Option<Self> {
        let row = u8::try_from(row).ok()?;
        let col = u8::try_from(col).ok()?;
        Self::new(row, col)
    }

    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// File letter (`a`..=`h`).
    #[must_use]
    pub const fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    /// Rank digit (`1`..=`8`).
    #[must_use]
    pub const fn rank_char(self) -> char {
        (b'8' - self.row) as char
    }

    /// Returns the square shifted by `(d_row, d_col)`, or `None` if that
    /// leaves the board.
    #[must_use]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::from_signed(
            i32::from(self.row) + i32::from(d_row),
            i32::from(self.col) + i32::from(d_col),
        )
    }

    /// Iterates all 64 squares in row-major order starting at a8.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::SIZE).flat_map(|row| (0..Self::SIZE).map(move |col| Self { row, col }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSquareError {
            notation: s.to_owned(),
        };
        let &[file, rank] = s.as_bytes() else {
            return Err(err());
        };
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(err());
        }
        Ok(Self {
            row: b'8' - rank,
            col: file - b'a',
        })
    }
}

impl Serialize for Square {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
