//! Opening books: immutable trees of known theory.
//!
//! - [`OpeningLine`] - One named opening, keyed by serialized move history
//! - [`OpeningBook`] - A set of lines selectable by id
//!
//! Books are validated when built, so a session can trust every line it is
//! handed. Custom books are read from JSON of the form:
//!
//! ```json
//! {
//!   "lines": [
//!     {
//!       "id": "scotchGame",
//!       "name": "Scotch Game",
//!       "trainee": "white",
//!       "moves": { "": ["e2-e4"], "e2-e4": ["e7-e5"] }
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    BookError,
    core::{Move, Side},
};

pub use self::opening_line::OpeningLine;

mod builtin;
mod opening_line;

/// A collection of opening lines with unique ids, in registration order.
///
/// # Example
///
/// ```
/// use repertoire_engine::{Move, OpeningBook};
///
/// let book = OpeningBook::builtin();
/// let e4: Move = "e2-e4".parse().unwrap();
/// let replies = book.next_moves("scotchGame", &[e4]).unwrap();
/// assert_eq!(replies, &["e7-e5".parse::<Move>().unwrap()]);
/// assert!(book.next_moves("noSuchLine", &[]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OpeningBookData", into = "OpeningBookData")]
pub struct OpeningBook {
    lines: Vec<OpeningLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpeningBookData {
    lines: Vec<OpeningLine>,
}

impl TryFrom<OpeningBookData> for OpeningBook {
    type Error = BookError;

    fn try_from(data: OpeningBookData) -> Result<Self, Self::Error> {
        OpeningBook::new(data.lines)
    }
}

impl From<OpeningBook> for OpeningBookData {
    fn from(book: OpeningBook) -> Self {
        Self { lines: book.lines }
    }
}

impl OpeningBook {
    /// Creates a book, rejecting duplicate line ids.
    pub fn new(lines: Vec<OpeningLine>) -> Result<Self, BookError> {
        for (i, line) in lines.iter().enumerate() {
            if lines[..i].iter().any(|other| other.id() == line.id()) {
                return Err(BookError::DuplicateLine(line.id().to_owned()));
            }
        }
        Ok(Self { lines })
    }

    /// The lines shipped with the trainer.
    ///
    /// # Panics
    ///
    /// Panics if the embedded tables are malformed (covered by tests).
    #[must_use]
    pub fn builtin() -> Self {
        let lines = builtin::BUILTIN_LINES
            .iter()
            .map(|line| {
                let moves = line.moves.iter().map(|(prefix, candidates)| {
                    let candidates = candidates
                        .iter()
                        .map(|mv| mv.parse::<Move>().expect("built-in move should parse"))
                        .collect();
                    ((*prefix).to_owned(), candidates)
                });
                OpeningLine::new(line.id, line.name, line.trainee, moves)
                    .expect("built-in line should be valid")
            })
            .collect();
        Self::new(lines).expect("built-in line ids should be unique")
    }

    /// Iterates the lines in registration order.
    pub fn lines(&self) -> impl Iterator<Item = &OpeningLine> + '_ {
        self.lines.iter()
    }

    #[must_use]
    pub fn line(&self, id: &str) -> Option<&OpeningLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Looks up the theory moves after `history` in the line named `id`.
    ///
    /// An empty slice means the history has left the book.
    pub fn next_moves(&self, id: &str, history: &[Move]) -> Result<&[Move], BookError> {
        self.line(id)
            .map(|line| line.next_moves(history))
            .ok_or_else(|| BookError::UnknownOpening(id.to_owned()))
    }

    /// Lines in which the trainee plays `side`, in registration order.
    pub fn lines_for(&self, side: Side) -> impl Iterator<Item = &OpeningLine> + '_ {
        self.lines.iter().filter(move |line| line.trainee() == side)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for OpeningBook {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::MoveHistory;

    use super::*;

    fn history(s: &str) -> MoveHistory {
        s.parse().unwrap()
    }

    #[test]
    fn test_builtin_lines() {
        let book = OpeningBook::builtin();
        let ids: Vec<_> = book.lines().map(OpeningLine::id).collect();
        assert_eq!(ids, ["sicilianDragon", "scotchGame", "scotchGambit"]);
        assert_eq!(
            book.line("sicilianDragon").unwrap().trainee(),
            Side::Black
        );
        assert_eq!(
            book.lines_for(Side::White)
                .map(OpeningLine::id)
                .collect::<Vec<_>>(),
            ["scotchGame", "scotchGambit"]
        );
    }

    #[test]
    fn test_every_builtin_line_opens_with_e4() {
        let e4: Move = "e2-e4".parse().unwrap();
        for line in OpeningBook::builtin().lines() {
            assert_eq!(line.first_move(), Some(e4), "{}", line.id());
        }
    }

    #[test]
    fn test_branching_entries_keep_order() {
        let book = OpeningBook::builtin();
        let moves = book
            .next_moves(
                "scotchGame",
                &history("e2-e4,e7-e5,g1-f3,b8-c6,d2-d4,e5-d4,f3-d4"),
            )
            .unwrap();
        let notation: Vec<_> = moves.iter().map(ToString::to_string).collect();
        assert_eq!(notation, ["f8-c5", "g8-f6", "d8-h4"]);
    }

    #[test]
    fn test_out_of_book_is_empty_not_error() {
        let book = OpeningBook::builtin();
        let played = history("e2-e4,e7-e5,g1-f3,b8-c6,d2-d4,e5-d4,f3-d4,d8-h4");
        let moves = book.next_moves("scotchGame", &played).unwrap();
        assert!(moves.is_empty());
    }

    #[test]
    fn test_unknown_opening() {
        let book = OpeningBook::builtin();
        assert!(matches!(
            book.next_moves("ruyLopez", &[]),
            Err(BookError::UnknownOpening(id)) if id == "ruyLopez"
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let book = OpeningBook::builtin();
        let line = book.line("scotchGame").unwrap().clone();
        let err = OpeningBook::new(vec![line.clone(), line]);
        assert!(matches!(err, Err(BookError::DuplicateLine(id)) if id == "scotchGame"));
    }

    #[test]
    fn test_book_from_json() {
        let json = r#"{
            "lines": [
                {
                    "id": "london",
                    "name": "London System",
                    "trainee": "white",
                    "moves": {
                        "": ["d2-d4"],
                        "d2-d4": ["d7-d5", "g8-f6"],
                        "d2-d4,d7-d5": ["c1-f4"]
                    }
                }
            ]
        }"#;
        let book: OpeningBook = serde_json::from_str(json).unwrap();
        assert_eq!(book.len(), 1);
        let line = book.line("london").unwrap();
        assert_eq!(line.name(), "London System");
        assert_eq!(line.next_moves(&history("d2-d4")).len(), 2);
    }

    #[test]
    fn test_book_json_rejects_duplicates() {
        let line = r#"{"id":"a","name":"A","trainee":"white","moves":{"":["d2-d4"]}}"#;
        let json = format!(r#"{{"lines":[{line},{line}]}}"#);
        assert!(serde_json::from_str::<OpeningBook>(&json).is_err());
    }
}
