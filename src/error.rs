//! Failure kinds for model construction and conversion.
use thiserror::Error;

/// Errors raised by profile/HMM construction and probability parsing.
/// These are data-contract violations, never retried internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("profile has {expected} columns but sequence has length {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("alphabet '{expected}' is not equal to alphabet '{actual}'")]
    AlphabetMismatch { expected: String, actual: String },
    #[error("null model has {actual} columns; should have 1")]
    ColumnCountMismatch { actual: usize },
    #[error("unrecognized residue '{residue}' for an alphabet without a wildcard: '{alphabet}'")]
    UnrecognizedResidue { residue: char, alphabet: String },
    #[error("invalid slice range {start}..{end} for {len} nodes")]
    InvalidRange {
        start: usize,
        end: usize,
        len: usize,
    },
    #[error("could not convert '{0}' to a log probability")]
    InvalidProb(String),
}
