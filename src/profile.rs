//! Sequence profiles: raw frequency tables and their log-odds form.
use crate::alphabet::{Alphabet, Residue};
use crate::error::Error;
use crate::prob::{Prob, MIN_PROB};
use log::trace;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Emission probabilities for one profile column or HMM state, as log-odds
/// scores. Holds one entry per residue of its alphabet, defaulted to the
/// minimum probability.
#[derive(Debug, Clone, PartialEq)]
pub struct EProbs {
    alphabet: Alphabet,
    probs: Vec<Prob>,
}

impl EProbs {
    pub fn new(alphabet: &Alphabet) -> Self {
        Self {
            alphabet: alphabet.clone(),
            probs: vec![MIN_PROB; alphabet.len()],
        }
    }
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
    /// The emission probability for `r`, or `None` if `r` is not in the
    /// alphabet of this table.
    pub fn emit_prob(&self, r: Residue) -> Option<Prob> {
        self.alphabet.position(r).map(|i| self.probs[i])
    }
    /// Set the emission probability for `r`. The residue must be a member of
    /// the alphabet of this table.
    pub fn set(&mut self, r: Residue, p: Prob) {
        let i = self
            .alphabet
            .position(r)
            .unwrap_or_else(|| panic!("residue {} not in alphabet", r as char));
        self.probs[i] = p;
    }
    pub fn iter(&self) -> impl Iterator<Item = (Residue, Prob)> + '_ {
        self.alphabet
            .iter()
            .copied()
            .zip(self.probs.iter().copied())
    }
}

/// Serialized as a mapping from single-character residue strings to the
/// textual probability form.
impl Serialize for EProbs {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.probs.len()))?;
        for (r, p) in self.iter() {
            map.serialize_entry(&(r as char).to_string(), &p)?;
        }
        map.end()
    }
}

/// Deserialized tables order their alphabet by residue value.
impl<'de> Deserialize<'de> for EProbs {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, Prob>::deserialize(deserializer)?;
        let mut residues = Vec::with_capacity(entries.len());
        for key in entries.keys() {
            match key.as_bytes() {
                [r] => residues.push(*r),
                _ => return Err(D::Error::custom(format!("not a residue: '{}'", key))),
            }
        }
        let alphabet = Alphabet::new(&residues);
        let mut table = EProbs::new(&alphabet);
        for (key, prob) in entries {
            table.set(key.as_bytes()[0], prob);
        }
        Ok(table)
    }
}

/// A sequence profile in terms of raw residue frequencies, built
/// incrementally from aligned-length sequences. Useful as an intermediate
/// representation on the way to a log-odds [`Profile`]; a single-column
/// frequency profile doubles as a background (null) model.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyProfile {
    // One count vector per column, alphabet order.
    freqs: Vec<Vec<u32>>,
    alphabet: Alphabet,
}

impl FrequencyProfile {
    /// A profile with `columns` columns, every count zero.
    pub fn new(columns: usize, alphabet: Alphabet) -> Self {
        let freqs = vec![vec![0; alphabet.len()]; columns];
        Self { freqs, alphabet }
    }
    /// A single-column profile for tabulating a background model.
    pub fn null_model(alphabet: Alphabet) -> Self {
        Self::new(1, alphabet)
    }
    /// The number of columns.
    pub fn len(&self) -> usize {
        self.freqs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
    /// The count for `r` in `column`, or `None` if `r` is not in the alphabet.
    pub fn count(&self, column: usize, r: Residue) -> Option<u32> {
        self.alphabet.position(r).map(|i| self.freqs[column][i])
    }
    /// Add one observation of `seq` to the profile. The sequence length must
    /// equal the number of columns. Residues outside the alphabet fall back
    /// to the wildcard count when the alphabet defines one; the fallback is
    /// decided per position. A failed add leaves every count untouched.
    pub fn add(&mut self, seq: &[Residue]) -> Result<(), Error> {
        if seq.len() != self.len() {
            return Err(Error::LengthMismatch {
                expected: self.len(),
                actual: seq.len(),
            });
        }
        let wildcard = self.alphabet.position(crate::alphabet::WILDCARD);
        let mut rows = Vec::with_capacity(seq.len());
        for &r in seq.iter() {
            match self.alphabet.position(r).or(wildcard) {
                Some(i) => rows.push(i),
                None => {
                    return Err(Error::UnrecognizedResidue {
                        residue: r as char,
                        alphabet: self.alphabet.to_string(),
                    })
                }
            }
        }
        for (column, row) in rows.into_iter().enumerate() {
            self.freqs[column][row] += 1;
        }
        Ok(())
    }
    /// Convert to a log-odds profile against `null`, a single-column
    /// background frequency profile over the same alphabet.
    ///
    /// For each column and residue, the emission is
    /// `-ln((count / column_total) / (background / background_total))`.
    /// A zero count on either side yields the minimum probability.
    pub fn to_profile(&self, null: &FrequencyProfile) -> Result<Profile, Error> {
        if null.len() != 1 {
            return Err(Error::ColumnCountMismatch { actual: null.len() });
        }
        self.alphabet.ensure_eq(&null.alphabet)?;
        trace!("profile conversion over {} columns", self.len());
        let bg = &null.freqs[0];
        let bg_total: u32 = bg.iter().sum();
        let mut profile = Profile::new(self.len(), self.alphabet.clone());
        for (column, counts) in self.freqs.iter().enumerate() {
            let total: u32 = counts.iter().sum();
            let probs = counts.iter().zip(bg.iter()).map(|(&count, &bg_count)| {
                if count == 0 || bg_count == 0 {
                    MIN_PROB
                } else {
                    let observed = f64::from(count) / f64::from(total);
                    let background = f64::from(bg_count) / f64::from(bg_total);
                    Prob::new(-(observed / background).ln())
                }
            });
            profile.emissions[column].probs = probs.collect();
        }
        Ok(profile)
    }
}

impl std::fmt::Display for FrequencyProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, &r) in self.alphabet.iter().enumerate() {
            write!(f, "{}", r as char)?;
            for column in self.freqs.iter() {
                write!(f, "\t{}", column[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A sequence profile in terms of log-odds scores, one emission table per
/// column. Column count is fixed at construction and the profile is not
/// mutated after conversion from a [`FrequencyProfile`].
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    emissions: Vec<EProbs>,
    alphabet: Alphabet,
}

impl Profile {
    /// A profile with every emission set to the minimum probability.
    pub fn new(columns: usize, alphabet: Alphabet) -> Self {
        let emissions = vec![EProbs::new(&alphabet); columns];
        Self {
            emissions,
            alphabet,
        }
    }
    pub fn len(&self) -> usize {
        self.emissions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.emissions.is_empty()
    }
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
    pub fn column(&self, i: usize) -> &EProbs {
        &self.emissions[i]
    }
    pub fn columns(&self) -> &[EProbs] {
        &self.emissions
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, &r) in self.alphabet.iter().enumerate() {
            write!(f, "{}", r as char)?;
            for column in self.emissions.iter() {
                let p = column.probs[i];
                if p.is_min() {
                    write!(f, "\t*")?;
                } else {
                    write!(f, "\t{:.4}", p.raw())?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dna() -> Alphabet {
        Alphabet::new(b"ACGT")
    }

    #[test]
    fn fresh_profile_is_all_zero() {
        let fp = FrequencyProfile::new(5, Alphabet::amino());
        for column in 0..fp.len() {
            let total: u32 = fp
                .alphabet()
                .residues()
                .iter()
                .map(|&r| fp.count(column, r).unwrap())
                .sum();
            assert_eq!(total, 0);
        }
    }

    #[test]
    fn add_accumulates_counts() {
        let mut fp = FrequencyProfile::new(4, dna());
        for _ in 0..3 {
            fp.add(b"ACGT").unwrap();
        }
        for (column, &r) in b"ACGT".iter().enumerate() {
            assert_eq!(fp.count(column, r), Some(3));
            let rest: u32 = dna()
                .residues()
                .iter()
                .filter(|&&other| other != r)
                .map(|&other| fp.count(column, other).unwrap())
                .sum();
            assert_eq!(rest, 0);
        }
    }

    #[test]
    fn add_rejects_wrong_length() {
        let mut fp = FrequencyProfile::new(4, dna());
        let err = fp.add(b"ACG").unwrap_err();
        assert_eq!(
            err,
            Error::LengthMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn add_falls_back_to_wildcard_per_position() {
        let mut fp = FrequencyProfile::new(3, Alphabet::new(b"ACGTX"));
        fp.add(b"AZG").unwrap();
        assert_eq!(fp.count(0, b'A'), Some(1));
        assert_eq!(fp.count(1, b'X'), Some(1));
        assert_eq!(fp.count(1, b'Z'), None);
        assert_eq!(fp.count(2, b'G'), Some(1));
    }

    #[test]
    fn add_without_wildcard_fails_atomically() {
        let mut fp = FrequencyProfile::new(3, dna());
        let before = fp.clone();
        let err = fp.add(b"AZG").unwrap_err();
        assert_eq!(
            err,
            Error::UnrecognizedResidue {
                residue: 'Z',
                alphabet: "ACGT".to_string()
            }
        );
        assert_eq!(fp, before);
    }

    #[test]
    fn to_profile_log_odds() {
        let mut fp = FrequencyProfile::new(1, dna());
        fp.add(b"A").unwrap();
        fp.add(b"A").unwrap();
        fp.add(b"C").unwrap();
        fp.add(b"G").unwrap();
        let mut null = FrequencyProfile::null_model(dna());
        null.add(b"A").unwrap();
        null.add(b"C").unwrap();
        null.add(b"G").unwrap();
        null.add(b"T").unwrap();
        let profile = fp.to_profile(&null).unwrap();
        let col = profile.column(0);
        // A observed at 1/2 against a 1/4 background.
        let a = col.emit_prob(b'A').unwrap();
        assert!((a.raw() + 2.0_f64.ln()).abs() < 1e-12);
        let c = col.emit_prob(b'C').unwrap();
        assert!(c.raw().abs() < 1e-12);
        assert!(col.emit_prob(b'T').unwrap().is_min());
    }

    #[test]
    fn to_profile_empty_column_is_all_min() {
        let fp = FrequencyProfile::new(2, dna());
        let mut null = FrequencyProfile::null_model(dna());
        null.add(b"A").unwrap();
        let profile = fp.to_profile(&null).unwrap();
        for column in profile.columns() {
            assert!(column.iter().all(|(_, p)| p.is_min()));
        }
    }

    #[test]
    fn to_profile_rejects_bad_null() {
        let fp = FrequencyProfile::new(2, dna());
        let wide = FrequencyProfile::new(2, dna());
        assert_eq!(
            fp.to_profile(&wide).unwrap_err(),
            Error::ColumnCountMismatch { actual: 2 }
        );
        let other = FrequencyProfile::null_model(Alphabet::new(b"ACGU"));
        assert!(matches!(
            fp.to_profile(&other).unwrap_err(),
            Error::AlphabetMismatch { .. }
        ));
    }

    #[test]
    fn eprobs_defaults_and_lookup() {
        let mut table = EProbs::new(&dna());
        assert!(table.emit_prob(b'A').unwrap().is_min());
        assert_eq!(table.emit_prob(b'X'), None);
        table.set(b'C', Prob::new(0.5));
        assert_eq!(table.emit_prob(b'C'), Some(Prob::new(0.5)));
    }

    #[test]
    fn eprobs_serde_round_trip() {
        let mut table = EProbs::new(&dna());
        table.set(b'A', Prob::new(-0.5));
        table.set(b'T', Prob::new(1.25));
        let json = serde_json::to_string(&table).unwrap();
        let back: EProbs = serde_json::from_str(&json).unwrap();
        assert_eq!(back.emit_prob(b'A'), Some(Prob::new(-0.5)));
        assert_eq!(back.emit_prob(b'T'), Some(Prob::new(1.25)));
        assert!(back.emit_prob(b'C').unwrap().is_min());
    }

    #[test]
    fn display_renders_rows_per_residue() {
        let mut fp = FrequencyProfile::new(2, dna());
        fp.add(b"AC").unwrap();
        let rendered = fp.to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "A\t1\t0");
        assert_eq!(lines[1], "C\t0\t1");
        let mut null = FrequencyProfile::null_model(dna());
        null.add(b"A").unwrap();
        null.add(b"C").unwrap();
        let profile = fp.to_profile(&null).unwrap();
        // A observed at 1/1 against a 1/2 background: -ln(2) in column 0.
        let first = profile.to_string().lines().next().unwrap().to_string();
        assert_eq!(first, "A\t-0.6931\t*");
    }
}
