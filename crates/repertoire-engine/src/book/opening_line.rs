use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    BookError,
    core::{Move, MoveHistory, Side, history_key},
};

/// A named opening with its tree of known continuations.
///
/// Maps each serialized history prefix (see [`MoveHistory::key`]) to the
/// ordered list of moves considered theory at that point. Lookups are exact:
/// two move orders reaching the same position are different keys.
///
/// Lines are validated on construction: every prefix parses as a move
/// sequence, every candidate list is non-empty, and the start position has an
/// entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OpeningLineData", into = "OpeningLineData")]
pub struct OpeningLine {
    id: String,
    name: String,
    trainee: Side,
    moves: BTreeMap<String, Vec<Move>>,
}

/// Unvalidated wire form of an [`OpeningLine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpeningLineData {
    id: String,
    name: String,
    trainee: Side,
    moves: BTreeMap<String, Vec<Move>>,
}

impl TryFrom<OpeningLineData> for OpeningLine {
    type Error = BookError;

    fn try_from(data: OpeningLineData) -> Result<Self, Self::Error> {
        OpeningLine::new(data.id, data.name, data.trainee, data.moves)
    }
}

impl From<OpeningLine> for OpeningLineData {
    fn from(line: OpeningLine) -> Self {
        Self {
            id: line.id,
            name: line.name,
            trainee: line.trainee,
            moves: line.moves,
        }
    }
}

impl OpeningLine {
    /// Builds and validates an opening line.
    pub fn new<I>(
        id: impl Into<String>,
        name: impl Into<String>,
        trainee: Side,
        moves: I,
    ) -> Result<Self, BookError>
    where
        I: IntoIterator<Item = (String, Vec<Move>)>,
    {
        let id = id.into();
        let moves: BTreeMap<_, _> = moves.into_iter().collect();

        for (prefix, candidates) in &moves {
            prefix
                .parse::<MoveHistory>()
                .map_err(|source| BookError::InvalidPrefix {
                    line: id.clone(),
                    prefix: prefix.clone(),
                    source,
                })?;
            if candidates.is_empty() {
                return Err(BookError::EmptyCandidates {
                    line: id.clone(),
                    prefix: prefix.clone(),
                });
            }
        }
        if !moves.contains_key("") {
            return Err(BookError::MissingStartEntry { line: id });
        }

        Ok(Self {
            id,
            name: name.into(),
            trainee,
            moves,
        })
    }

    /// Identifier used to select the line (e.g. `scotchGame`).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable name (e.g. `Scotch Game`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Side played by the trainee.
    #[must_use]
    pub const fn trainee(&self) -> Side {
        self.trainee
    }

    /// Side played by the scripted opponent.
    #[must_use]
    pub const fn automated(&self) -> Side {
        self.trainee.opponent()
    }

    /// Returns the theory moves after `history`, or an empty slice when the
    /// history has left the book.
    #[must_use]
    pub fn next_moves(&self, history: &[Move]) -> &[Move] {
        self.next_moves_for_key(&history_key(history))
    }

    /// Like [`Self::next_moves`], but takes an already serialized prefix.
    #[must_use]
    pub fn next_moves_for_key(&self, key: &str) -> &[Move] {
        self.moves.get(key).map_or(&[], Vec::as_slice)
    }

    /// The first listed move of the start position.
    #[must_use]
    pub fn first_move(&self) -> Option<Move> {
        self.next_moves(&[]).first().copied()
    }

    /// Number of positions covered by the line.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Longest history (in plies) that still has an entry.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.moves
            .keys()
            .map(|key| {
                if key.is_empty() {
                    0
                } else {
                    key.split(crate::core::HISTORY_SEPARATOR).count()
                }
            })
            .max()
            .unwrap_or(0)
    }
}
