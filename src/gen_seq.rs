//! This module is to generate some random protein sequence to assess the
//! performance. Usually, it would not be used in the real-applications.
use rand::seq::SliceRandom;

/// The twenty standard amino acids.
pub const STANDARD_RESIDUES: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

#[derive(Debug, Clone, Copy)]
pub struct Profile {
    pub sub: f64,
    pub del: f64,
    pub ins: f64,
}

impl Profile {
    pub fn sum(&self) -> f64 {
        self.sub + self.del + self.ins
    }
    pub fn norm(&self) -> Self {
        let sum = self.sum();
        Self {
            sub: self.sub / sum,
            del: self.del / sum,
            ins: self.ins / sum,
        }
    }
    pub fn mul(&self, x: f64) -> Self {
        Self {
            sub: self.sub * x,
            ins: self.ins * x,
            del: self.del * x,
        }
    }
}

pub const PROFILE: Profile = Profile {
    sub: 0.04,
    del: 0.04,
    ins: 0.07,
};

#[derive(Debug, Clone, Copy)]
enum Op {
    Match,
    MisMatch,
    Del,
    In,
}

impl Op {
    fn weight(self, p: &Profile) -> f64 {
        match self {
            Op::Match => 1. - p.sub - p.del - p.ins,
            Op::MisMatch => p.sub,
            Op::Del => p.del,
            Op::In => p.ins,
        }
    }
}

const OPERATIONS: [Op; 4] = [Op::Match, Op::MisMatch, Op::Del, Op::In];

/// Copy `seq` while introducing substitutions and indels at the rates in `p`.
pub fn introduce_randomness<T: rand::Rng>(seq: &[u8], rng: &mut T, p: &Profile) -> Vec<u8> {
    let mut res = vec![];
    let mut remainings: Vec<_> = seq.iter().copied().rev().collect();
    while !remainings.is_empty() {
        match *OPERATIONS.choose_weighted(rng, |e| e.weight(p)).unwrap() {
            Op::Match => res.push(remainings.pop().unwrap()),
            Op::MisMatch => res.push(choose_residue(rng, remainings.pop().unwrap())),
            Op::In => res.push(random_residue(rng)),
            Op::Del => {
                remainings.pop().unwrap();
            }
        }
    }
    res
}

/// A uniformly random sequence over the standard amino acids.
pub fn generate_seq<T: rand::Rng>(rng: &mut T, len: usize) -> Vec<u8> {
    (0..len)
        .filter_map(|_| STANDARD_RESIDUES.choose(rng))
        .copied()
        .collect()
}

fn choose_residue<T: rand::Rng>(rng: &mut T, residue: u8) -> u8 {
    let others: Vec<u8> = STANDARD_RESIDUES
        .iter()
        .filter(|&&e| e != residue)
        .copied()
        .collect();
    *others.choose(rng).unwrap()
}

fn random_residue<T: rand::Rng>(rng: &mut T) -> u8 {
    *STANDARD_RESIDUES.choose(rng).unwrap()
}
