//! Global pairwise alignment (Needleman-Wunsch) with a linear gap score.

use std::ops;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::*;
use crate::seq::Nucleotide;

/// Scores added per alignment column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoring {
    /// Score for two identical symbols
    #[serde(rename = "match")]
    pub match_score: i32,
    /// Score for two different symbols
    #[serde(rename = "mismatch")]
    pub mismatch_score: i32,
    /// Score for a symbol aligned against a gap
    #[serde(rename = "gap")]
    pub gap_score: i32,
}

impl Default for Scoring {
    fn default() -> Self {
        Scoring {
            match_score: DEFAULT_MATCH_SCORE,
            mismatch_score: DEFAULT_MISMATCH_SCORE,
            gap_score: DEFAULT_GAP_SCORE,
        }
    }
}

impl Scoring {
    #[inline]
    fn substitution(&self, x: Nucleotide, y: Nucleotide) -> i32 {
        if x == y { self.match_score } else { self.mismatch_score }
    }
}

/// Direction taken into a cell of the dynamic programming matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trace {
    Origin,
    /// Consume one symbol from each sequence
    Diag,
    /// Consume one symbol from the first sequence; gap in the second
    Up,
    /// Consume one symbol from the second sequence; gap in the first
    Left,
}

/// Dense (n + 1) x (m + 1) matrix stored in row-major order.
struct Matrix<T> {
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy> Matrix<T> {
    fn new(rows: usize, cols: usize, fill: T) -> Matrix<T> {
        Matrix { cols: cols, data: vec![fill; rows * cols] }
    }
}

impl<T> ops::Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[i * self.cols + j]
    }
}

impl<T> ops::IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.data[i * self.cols + j]
    }
}

/// Optimal global alignment of two sequences.
/// Both aligned sequences have the same length; gaps are marked by `GAP`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    pub aligned_sequence_1: String,
    pub aligned_sequence_2: String,
    pub alignment_score: i32,
}

/// Column counts of an alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlignmentSummary {
    pub length: usize,
    pub identities: usize,
    pub mismatches: usize,
    pub gaps: usize,
}

impl Alignment {
    /// Iterate over aligned columns as pairs of symbols.
    pub fn columns<'a>(&'a self) -> impl Iterator<Item = (char, char)> + 'a {
        self.aligned_sequence_1.chars().zip(self.aligned_sequence_2.chars())
    }

    pub fn summary(&self) -> AlignmentSummary {
        let mut summary = AlignmentSummary { length: 0, identities: 0, mismatches: 0, gaps: 0 };
        for (x, y) in self.columns() {
            summary.length += 1;
            if x == GAP || y == GAP {
                summary.gaps += 1;
            } else if x == y {
                summary.identities += 1;
            } else {
                summary.mismatches += 1;
            }
        }
        summary
    }
}

/// Align two sequences globally with the default scoring.
pub fn align(seq1: &str, seq2: &str) -> Alignment {
    align_with(seq1, seq2, &Scoring::default())
}

/// Align two sequences globally.
///
/// Ties between equally scoring moves are broken in the order
/// diagonal, up (gap in `seq2`), left (gap in `seq1`).
pub fn align_with(seq1: &str, seq2: &str, scoring: &Scoring) -> Alignment {
    let s1: Vec<Nucleotide> = seq1.chars().collect();
    let s2: Vec<Nucleotide> = seq2.chars().collect();
    let n = s1.len();
    let m = s2.len();

    let mut score = Matrix::new(n + 1, m + 1, 0i32);
    let mut trace = Matrix::new(n + 1, m + 1, Trace::Origin);

    for i in 1 ..= n {
        score[(i, 0)] = score[(i - 1, 0)] + scoring.gap_score;
        trace[(i, 0)] = Trace::Up;
    }
    for j in 1 ..= m {
        score[(0, j)] = score[(0, j - 1)] + scoring.gap_score;
        trace[(0, j)] = Trace::Left;
    }

    for i in 1 ..= n {
        for j in 1 ..= m {
            let diag = score[(i - 1, j - 1)] + scoring.substitution(s1[i - 1], s2[j - 1]);
            let up = score[(i - 1, j)] + scoring.gap_score;
            let left = score[(i, j - 1)] + scoring.gap_score;

            let best = diag.max(up).max(left);
            score[(i, j)] = best;
            trace[(i, j)] = if best == diag {
                Trace::Diag
            } else if best == up {
                Trace::Up
            } else {
                Trace::Left
            };
        }
    }

    let alignment_score = score[(n, m)];
    debug!(n, m, alignment_score, "filled alignment matrix");

    // walk back from the bottom-right corner, emitting columns in reverse
    let mut aligned1: Vec<char> = Vec::with_capacity(n + m);
    let mut aligned2: Vec<char> = Vec::with_capacity(n + m);
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        match trace[(i, j)] {
            Trace::Diag => {
                aligned1.push(s1[i - 1]);
                aligned2.push(s2[j - 1]);
                i -= 1;
                j -= 1;
            },
            Trace::Up => {
                aligned1.push(s1[i - 1]);
                aligned2.push(GAP);
                i -= 1;
            },
            Trace::Left => {
                aligned1.push(GAP);
                aligned2.push(s2[j - 1]);
                j -= 1;
            },
            // only (0, 0) carries the origin mark, and the loop never reaches it
            Trace::Origin => break,
        }
    }

    Alignment {
        aligned_sequence_1: aligned1.into_iter().rev().collect(),
        aligned_sequence_2: aligned2.into_iter().rev().collect(),
        alignment_score: alignment_score,
    }
}
