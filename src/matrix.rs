//! Substitution matrices used as alignment scoring sources.
use crate::alphabet::{Alphabet, Residue, WILDCARD};

/// The BLOSUM62 substitution matrix, rows and columns in the order of
/// [`crate::alphabet::AMINO_RESIDUES`]. Standard published values, permuted
/// into this crate's alphabet order; not re-derived.
#[rustfmt::skip]
const BLOSUM62: [[i32; 23]; 23] = [
    [4, -2, 0, -2, -1, -2, 0, -2, -1, -1, -1, -1, -2, -1, -1, -1, 1, 0, 0, -3, 0, -2, -1],
    [-2, 4, -3, 4, 1, -3, -1, 0, -3, 0, -4, -3, 3, -2, 0, -1, 0, -1, -3, -4, -1, -3, 1],
    [0, -3, 9, -3, -4, -2, -3, -3, -1, -3, -1, -1, -3, -3, -3, -3, -1, -1, -1, -2, -2, -2, -3],
    [-2, 4, -3, 6, 2, -3, -1, -1, -3, -1, -4, -3, 1, -1, 0, -2, 0, -1, -3, -4, -1, -3, 1],
    [-1, 1, -4, 2, 5, -3, -2, 0, -3, 1, -3, -2, 0, -1, 2, 0, 0, -1, -2, -3, -1, -2, 4],
    [-2, -3, -2, -3, -3, 6, -3, -1, 0, -3, 0, 0, -3, -4, -3, -3, -2, -2, -1, 1, -1, 3, -3],
    [0, -1, -3, -1, -2, -3, 6, -2, -4, -2, -4, -3, 0, -2, -2, -2, 0, -2, -3, -2, -1, -3, -2],
    [-2, 0, -3, -1, 0, -1, -2, 8, -3, -1, -3, -2, 1, -2, 0, 0, -1, -2, -3, -2, -1, 2, 0],
    [-1, -3, -1, -3, -3, 0, -4, -3, 4, -3, 2, 1, -3, -3, -3, -3, -2, -1, 3, -3, -1, -1, -3],
    [-1, 0, -3, -1, 1, -3, -2, -1, -3, 5, -2, -1, 0, -1, 1, 2, 0, -1, -2, -3, -1, -2, 1],
    [-1, -4, -1, -4, -3, 0, -4, -3, 2, -2, 4, 2, -3, -3, -2, -2, -2, -1, 1, -2, -1, -1, -3],
    [-1, -3, -1, -3, -2, 0, -3, -2, 1, -1, 2, 5, -2, -2, 0, -1, -1, -1, 1, -1, -1, -1, -1],
    [-2, 3, -3, 1, 0, -3, 0, 1, -3, 0, -3, -2, 6, -2, 0, 0, 1, 0, -3, -4, -1, -2, 0],
    [-1, -2, -3, -1, -1, -4, -2, -2, -3, -1, -3, -2, -2, 7, -1, -2, -1, -1, -2, -4, -2, -3, -1],
    [-1, 0, -3, 0, 2, -3, -2, 0, -3, 1, -2, 0, 0, -1, 5, 1, 0, -1, -2, -2, -1, -1, 3],
    [-1, -1, -3, -2, 0, -3, -2, 0, -3, 2, -2, -1, 0, -2, 1, 5, -1, -1, -3, -3, -1, -2, 0],
    [1, 0, -1, 0, 0, -2, 0, -1, -2, 0, -2, -1, 1, -1, 0, -1, 4, 1, -2, -3, 0, -2, 0],
    [0, -1, -1, -1, -1, -2, -2, -2, -1, -1, -1, -1, 0, -1, -1, -1, 1, 5, 0, -2, 0, -2, -1],
    [0, -3, -1, -3, -2, -1, -3, -3, 3, -2, 1, 1, -3, -2, -2, -3, -2, 0, 4, -3, -1, -1, -2],
    [-3, -4, -2, -4, -3, 1, -2, -2, -3, -3, -2, -1, -4, -4, -2, -3, -3, -2, -3, 11, -2, 2, -3],
    [0, -1, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -2, -1, -1, 0, 0, -1, -2, -1, -1, -1],
    [-2, -3, -2, -3, -2, 3, -3, 2, -1, -2, -1, -1, -2, -3, -1, -2, -2, -2, -1, 2, -1, 7, -2],
    [-1, 1, -3, 1, 4, -3, -2, 0, -3, 1, -3, -1, 0, -1, 3, 0, 0, -1, -2, -3, -1, -2, 4],
];

/// The per-step gap penalty paired with BLOSUM62 by the alignment engine.
const BLOSUM62_GAP: i32 = -2;

/// A residue substitution scoring source: a dense score table over an
/// alphabet plus the fixed gap penalty charged per gap step.
#[derive(Debug, Clone)]
pub struct SubstMatrix {
    alphabet: Alphabet,
    scores: Vec<i32>,
    gap: i32,
}

impl SubstMatrix {
    /// Build a scoring source from a row-major score table over `alphabet`.
    pub fn new(alphabet: Alphabet, scores: Vec<i32>, gap: i32) -> Self {
        assert_eq!(scores.len(), alphabet.len() * alphabet.len());
        Self {
            alphabet,
            scores,
            gap,
        }
    }
    /// The default scoring source: BLOSUM62 with a gap penalty of -2.
    pub fn blosum62() -> Self {
        let scores = BLOSUM62.iter().flatten().copied().collect();
        Self::new(Alphabet::amino(), scores, BLOSUM62_GAP)
    }
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
    pub fn gap(&self) -> i32 {
        self.gap
    }
    /// The substitution score for a residue pair. Residues outside the
    /// alphabet score through the wildcard column; panics if the alphabet
    /// defines no wildcard either.
    pub fn score(&self, a: Residue, b: Residue) -> i32 {
        let row = self.index_of(a);
        let column = self.index_of(b);
        self.scores[row * self.alphabet.len() + column]
    }
    fn index_of(&self, r: Residue) -> usize {
        self.alphabet
            .position(r)
            .or_else(|| self.alphabet.position(WILDCARD))
            .unwrap_or_else(|| panic!("residue {} not in scoring alphabet", r as char))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::AMINO_RESIDUES;
    #[test]
    fn table_is_square_and_symmetric() {
        let matrix = SubstMatrix::blosum62();
        assert_eq!(matrix.alphabet().residues(), AMINO_RESIDUES);
        for &a in AMINO_RESIDUES {
            for &b in AMINO_RESIDUES {
                assert_eq!(matrix.score(a, b), matrix.score(b, a));
            }
        }
    }
    #[test]
    fn known_scores() {
        let matrix = SubstMatrix::blosum62();
        assert_eq!(matrix.score(b'G', b'G'), 6);
        assert_eq!(matrix.score(b'G', b'A'), 0);
        assert_eq!(matrix.score(b'W', b'W'), 11);
        assert_eq!(matrix.score(b'X', b'X'), -1);
        assert_eq!(matrix.score(b'N', b'N'), 6);
        assert_eq!(matrix.gap(), -2);
    }
    #[test]
    fn foreign_residues_score_as_wildcard() {
        let matrix = SubstMatrix::blosum62();
        assert_eq!(matrix.score(b'J', b'A'), matrix.score(b'X', b'A'));
        assert_eq!(matrix.score(b'A', b'O'), matrix.score(b'A', b'X'));
    }
}
