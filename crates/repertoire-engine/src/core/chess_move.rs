use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::square::{ParseSquareError, Square};

/// A piece relocation from one square to another.
///
/// The canonical notation is `<from>-<to>` (e.g. `e2-e4`). Opening books are
/// keyed by this notation, and trainee moves are compared against it.
///
/// # Example
///
/// ```
/// use repertoire_engine::Move;
///
/// let mv: Move = "g1-f3".parse().unwrap();
/// assert_eq!(mv.from().to_string(), "g1");
/// assert_eq!(mv.to().to_string(), "f3");
/// assert_eq!(mv.to_string(), "g1-f3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
}

/// Separator between the two squares of a move.
pub const MOVE_SEPARATOR: char = '-';

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseMoveError {
    #[display("missing '-' in move notation: {_0:?}")]
    MissingSeparator(#[error(not(source))] String),
    #[display("invalid square in move notation: {_0}")]
    InvalidSquare(ParseSquareError),
}

impl From<ParseSquareError> for ParseMoveError {
    fn from(err: ParseSquareError) -> Self {
        ParseMoveError::InvalidSquare(err)
    }
}

impl Move {
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub const fn from(self) -> Square {
        self.from
    }

    #[must_use]
    pub const fn to(self) -> Square {
        self.to
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{MOVE_SEPARATOR}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .split_once(MOVE_SEPARATOR)
            .ok_or_else(|| ParseMoveError::MissingSeparator(s.to_owned()))?;
        Ok(Self {
            from: from.parse()?,
            to: to.parse()?,
        })
    }
}

impl Serialize for Move {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Move {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
