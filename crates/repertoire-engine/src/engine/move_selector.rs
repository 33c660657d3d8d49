use std::{fmt::Write as _, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::Move;

/// Picks the automated side's reply among several theory candidates.
///
/// Called only with a non-empty candidate list. The returned index must be in
/// bounds; out-of-range indices fall back to the first candidate.
pub trait MoveSelector: std::fmt::Debug {
    fn choose(&mut self, candidates: &[Move]) -> usize;
}

/// Chooses uniformly at random.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: Pcg32,
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSelector {
    /// Creates a selector with a random seed.
    ///
    /// For a reproducible reply sequence, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: ReplySeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }
}

impl MoveSelector for RandomSelector {
    fn choose(&mut self, candidates: &[Move]) -> usize {
        if candidates.len() <= 1 {
            return 0;
        }
        self.rng.random_range(0..candidates.len())
    }
}

/// Always picks the first listed candidate (the main line).
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl MoveSelector for FirstCandidate {
    fn choose(&mut self, _candidates: &[Move]) -> usize {
        0
    }
}

/// Seed for reproducible reply selection.
///
/// A 128-bit seed for [`RandomSelector`]. Serialized as 32 hex digits.
///
/// # Example
///
/// ```
/// use repertoire_engine::{Move, MoveSelector as _, RandomSelector, ReplySeed};
///
/// let seed = ReplySeed::from(42);
/// let candidates = ["f8-c5", "g8-f6", "d8-h4"].map(|m| m.parse::<Move>().unwrap());
///
/// let mut a = RandomSelector::with_seed(seed);
/// let mut b = RandomSelector::with_seed(seed);
/// for _ in 0..10 {
///     assert_eq!(a.choose(&candidates), b.choose(&candidates));
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplySeed([u8; 16]);

impl From<u64> for ReplySeed {
    fn from(value: u64) -> Self {
        Self(u128::from(value).to_be_bytes())
    }
}

impl std::fmt::Display for ReplySeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

/// Error parsing a [`ReplySeed`] from hex.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {hex:?}: expected 32 hex digits")]
pub struct ParseSeedError {
    hex: String,
}

impl FromStr for ReplySeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseSeedError { hex: s.to_owned() };
        if s.len() != 32 {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for ReplySeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{self}").map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for ReplySeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `ReplySeed` values with `rng.random()`.
impl Distribution<ReplySeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ReplySeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        ReplySeed(seed)
    }
}

/// How a [`Trainer`](crate::Trainer) builds the selector of each new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectorPolicy {
    /// Fresh random seed per session.
    #[default]
    Random,
    /// The same seed for every session, so each replays identically.
    Seeded(ReplySeed),
    /// Always the first candidate.
    First,
}

impl SelectorPolicy {
    #[must_use]
    pub fn build(self) -> Box<dyn MoveSelector> {
        match self {
            Self::Random => Box::new(RandomSelector::new()),
            Self::Seeded(seed) => Box::new(RandomSelector::with_seed(seed)),
            Self::First => Box::new(FirstCandidate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<Move> {
        ["f8-c5", "g8-f6", "d8-h4"]
            .iter()
            .map(|m| m.parse().unwrap())
            .collect()
    }

    #[test]
    fn test_first_candidate() {
        assert_eq!(FirstCandidate.choose(&candidates()), 0);
    }

    #[test]
    fn test_random_stays_in_bounds_and_covers_all() {
        let candidates = candidates();
        let mut selector = RandomSelector::with_seed(ReplySeed::from(7));
        let mut seen = [false; 3];
        for _ in 0..200 {
            let i = selector.choose(&candidates);
            assert!(i < candidates.len());
            seen[i] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_single_candidate() {
        let mut selector = RandomSelector::new();
        assert_eq!(selector.choose(&candidates()[..1]), 0);
    }

    #[test]
    fn test_seed_text_forms() {
        let seed = ReplySeed::from(0xff);
        assert_eq!(seed.to_string(), "000000000000000000000000000000ff");
        assert_eq!(seed.to_string().parse::<ReplySeed>().unwrap(), seed);
        assert!("ff".parse::<ReplySeed>().is_err());
        assert!("zz000000000000000000000000000000".parse::<ReplySeed>().is_err());

        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, r#""000000000000000000000000000000ff""#);
        assert_eq!(serde_json::from_str::<ReplySeed>(&json).unwrap(), seed);
    }
}
