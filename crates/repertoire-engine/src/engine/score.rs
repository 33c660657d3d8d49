use serde::{Deserialize, Serialize};

/// Tally of the trainee's evaluated moves.
///
/// Every accepted trainee move counts toward `total`; moves found in the book
/// also count toward `correct`. Rejected attempts are not counted.
///
/// # Example
///
/// ```
/// use repertoire_engine::Score;
///
/// let mut score = Score::new();
/// score.record_correct();
/// score.record_incorrect();
///
/// assert_eq!(score.to_string(), "1/2");
/// assert_eq!(score.accuracy(), Some(0.5));
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
#[display("{correct}/{total}")]
pub struct Score {
    correct: usize,
    total: usize,
}

impl Score {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            correct: 0,
            total: 0,
        }
    }

    /// Number of moves that matched the book.
    #[must_use]
    pub const fn correct(&self) -> usize {
        self.correct
    }

    /// Number of evaluated moves.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub const fn incorrect(&self) -> usize {
        self.total - self.correct
    }

    /// Fraction of correct moves, or `None` before any move was evaluated.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn accuracy(&self) -> Option<f64> {
        (self.total > 0).then(|| self.correct as f64 / self.total as f64)
    }

    pub const fn record_correct(&mut self) {
        self.correct += 1;
        self.total += 1;
    }

    pub const fn record_incorrect(&mut self) {
        self.total += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_score() {
        let score = Score::new();
        assert_eq!(score.accuracy(), None);
        assert_eq!(score.incorrect(), 0);
        assert_eq!(score.to_string(), "0/0");
    }

    #[test]
    fn test_counts() {
        let mut score = Score::new();
        score.record_correct();
        score.record_correct();
        score.record_incorrect();
        assert_eq!(score.correct(), 2);
        assert_eq!(score.total(), 3);
        assert_eq!(score.incorrect(), 1);
    }

    #[test]
    fn test_serialize() {
        let mut score = Score::new();
        score.record_correct();
        assert_eq!(
            serde_json::to_string(&score).unwrap(),
            r#"{"correct":1,"total":1}"#
        );
    }
}
