//! Global pairwise alignment by full dynamic programming.
//!
//! The score matrix is quadratic in the input lengths; callers aligning very
//! long sequences pay O(n*m) time and space.
use super::Op;
use crate::matrix::SubstMatrix;
use log::trace;
use rayon::prelude::*;

/// Align `xs` and `ys` end to end, returning the total score and the edit
/// operations of an optimal path.
///
/// The first row and column of the score matrix stay at zero, so gaps
/// hanging off either end of the shorter sequence are not charged; interior
/// gap steps cost the matrix's fixed penalty. On ties the traceback prefers
/// a match step, then a gap in `ys`, then a gap in `xs`.
pub fn alignment(xs: &[u8], ys: &[u8], matrix: &SubstMatrix) -> (i32, Vec<Op>) {
    trace!("global alignment, {} x {} residues", xs.len(), ys.len());
    let gap = matrix.gap();
    let mut dp = vec![vec![0; ys.len() + 1]; xs.len() + 1];
    for (i, &x) in xs.iter().enumerate().map(|(i, x)| (i + 1, x)) {
        for (j, &y) in ys.iter().enumerate().map(|(j, y)| (j + 1, y)) {
            dp[i][j] = (dp[i - 1][j - 1] + matrix.score(x, y))
                .max(dp[i - 1][j] + gap)
                .max(dp[i][j - 1] + gap);
        }
    }
    let (mut i, mut j) = (xs.len(), ys.len());
    let mut ops = vec![];
    while 0 < i && 0 < j {
        let score = dp[i][j];
        if score == dp[i - 1][j - 1] + matrix.score(xs[i - 1], ys[j - 1]) {
            ops.push(Op::Mat);
            i -= 1;
            j -= 1;
        } else if score == dp[i - 1][j] + gap {
            ops.push(Op::Del);
            i -= 1;
        } else {
            assert_eq!(score, dp[i][j - 1] + gap);
            ops.push(Op::Ins);
            j -= 1;
        }
    }
    ops.extend(std::iter::repeat(Op::Del).take(i));
    ops.extend(std::iter::repeat(Op::Ins).take(j));
    ops.reverse();
    (dp[xs.len()][ys.len()], ops)
}

/// Align many independent pairs in parallel. Each pair is aligned exactly as
/// [`alignment`] would, in input order.
pub fn alignment_batch<T: std::borrow::Borrow<[u8]> + Sync>(
    pairs: &[(T, T)],
    matrix: &SubstMatrix,
) -> Vec<(i32, Vec<Op>)> {
    pairs
        .par_iter()
        .map(|(xs, ys)| alignment(xs.borrow(), ys.borrow(), matrix))
        .collect()
}
