//! Log-odds probability scalars.
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// A transition or emission probability, stored as a negated natural-log-odds
/// score. The ordering is therefore inverted: a larger raw value stands for a
/// rarer event. Use [`Prob::more_probable_than`] instead of comparing raw
/// scalars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prob(f64);

/// The value representing a minimum emission/transition probability.
/// Max in negated log space is minimum probability.
pub const MIN_PROB: Prob = Prob(f64::MAX);

impl Prob {
    pub fn new(raw: f64) -> Self {
        Self(raw)
    }
    pub fn raw(self) -> f64 {
        self.0
    }
    /// True if this is the minimum probability.
    pub fn is_min(self) -> bool {
        self.0 == f64::MAX
    }
    /// True if `self` stands for a larger probability than `other`.
    /// Smaller raw scalar means more probable.
    pub fn more_probable_than(self, other: Self) -> bool {
        self.0 < other.0
    }
    /// The log-odds score as a ratio in the range [0, 1].
    /// The minimum probability maps to exactly 0.
    pub fn ratio(self) -> f64 {
        if self.is_min() {
            0.0
        } else {
            (-self.0).exp()
        }
    }
    /// Distance between two probabilities in raw log-odds space.
    pub fn distance(self, other: Self) -> f64 {
        (self.0 - other.0).abs()
    }
}

/// The textual form is either a decimal float or the literal `*` for the
/// minimum probability. This is the wire format of HMM/profile files.
impl std::str::FromStr for Prob {
    type Err = Error;
    fn from_str(fstr: &str) -> Result<Self, Error> {
        if fstr == "*" {
            return Ok(MIN_PROB);
        }
        fstr.parse::<f64>()
            .map(Prob)
            .map_err(|_| Error::InvalidProb(fstr.to_string()))
    }
}

impl std::fmt::Display for Prob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_min() {
            write!(f, "*")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for Prob {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Prob {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
