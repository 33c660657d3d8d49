use std::{fmt, ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};

use super::chess_move::{Move, ParseMoveError};

/// Separator between moves in a serialized history.
pub const HISTORY_SEPARATOR: char = ',';

/// Ordered list of moves played so far by both sides.
///
/// The serialized form (see [`Self::key`]) joins the canonical move notations
/// with [`HISTORY_SEPARATOR`]; the start position is the empty string. Opening
/// books are keyed by this form.
///
/// # Example
///
/// ```
/// use repertoire_engine::MoveHistory;
///
/// let mut history = MoveHistory::new();
/// assert_eq!(history.key(), "");
///
/// history.push("e2-e4".parse().unwrap());
/// history.push("e7-e5".parse().unwrap());
/// assert_eq!(history.key(), "e2-e4,e7-e5");
/// assert_eq!(history.key().parse::<MoveHistory>().unwrap(), history);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveHistory(Vec<Move>);

impl MoveHistory {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, mv: Move) {
        self.0.push(mv);
    }

    #[must_use]
    pub fn last(&self) -> Option<Move> {
        self.0.last().copied()
    }

    /// Returns the lookup key of this history.
    #[must_use]
    pub fn key(&self) -> String {
        history_key(&self.0)
    }
}

/// Serializes a move sequence into the opening-book lookup key.
#[must_use]
pub fn history_key(moves: &[Move]) -> String {
    let mut key = String::with_capacity(moves.len() * 6);
    for (i, mv) in moves.iter().enumerate() {
        if i > 0 {
            key.push(HISTORY_SEPARATOR);
        }
        key.push_str(&mv.to_string());
    }
    key
}

impl Deref for MoveHistory {
    type Target = [Move];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Move>> for MoveHistory {
    fn from(moves: Vec<Move>) -> Self {
        Self(moves)
    }
}

impl fmt::Display for MoveHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for MoveHistory {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::new());
        }
        s.split(HISTORY_SEPARATOR)
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_key() {
        assert_eq!(MoveHistory::new().key(), "");
        assert_eq!("".parse::<MoveHistory>().unwrap(), MoveHistory::new());
    }

    #[test]
    fn test_key_preserves_order() {
        let a: MoveHistory = "e2-e4,e7-e5".parse().unwrap();
        let b: MoveHistory = "e7-e5,e2-e4".parse().unwrap();
        assert_ne!(a.key(), b.key());
        assert_eq!(a.len(), 2);
        assert_eq!(a.last(), Some("e7-e5".parse().unwrap()));
    }

    #[test]
    fn test_parse_rejects_bad_entry() {
        assert!("e2-e4,,e7-e5".parse::<MoveHistory>().is_err());
        assert!("e2-e4,e7e5".parse::<MoveHistory>().is_err());
    }

    #[test]
    fn test_history_serializes_as_list() {
        let history: MoveHistory = "e2-e4,c7-c5".parse().unwrap();
        assert_eq!(
            serde_json::to_string(&history).unwrap(),
            r#"["e2-e4","c7-c5"]"#
        );
    }
}
