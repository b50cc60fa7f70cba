//! Log-odds models of biological sequences and global pairwise alignment.
//!
//! Raw residue counts are tabulated in a [`profile::FrequencyProfile`],
//! converted against a single-column background model into a log-odds
//! [`profile::Profile`], and consumed as scoring sources alongside Plan7
//! profile HMMs ([`hmm::Hmm`], typically populated by an external model-file
//! parser). The [`alignment`] module holds the Needleman-Wunsch engine; the
//! crate-level [`align`] is the plain entry point for a padded alignment of
//! two sequences.
pub mod alignment;
pub mod alphabet;
pub mod error;
pub mod gen_seq;
pub mod hmm;
pub mod matrix;
pub mod prob;
pub mod profile;

pub use crate::alphabet::{Alphabet, Residue};
pub use crate::error::Error;
pub use crate::prob::{Prob, MIN_PROB};
pub use crate::profile::{EProbs, FrequencyProfile, Profile};

use crate::matrix::SubstMatrix;

/// Globally align two residue sequences with the default scoring source
/// (BLOSUM62), returning the two gap-padded rows of the alignment.
pub fn align(xs: &[u8], ys: &[u8]) -> (Vec<u8>, Vec<u8>) {
    align_with(xs, ys, &SubstMatrix::blosum62())
}

/// Globally align two residue sequences with a caller-provided scoring
/// source.
pub fn align_with(xs: &[u8], ys: &[u8], matrix: &SubstMatrix) -> (Vec<u8>, Vec<u8>) {
    let (_score, ops) = alignment::global::alignment(xs, ys, matrix);
    alignment::recover(xs, ys, &ops)
}
