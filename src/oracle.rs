//! The dense reference matrix: O(|Q| * |T|) time and space, used as the
//! ground truth the block engine is checked against.
//!
//! Grounded on `examples/original_source/src/dynamic_prog/pattern_matching.py`'s
//! `PM_Matrix` base class and its `PM_DTW` / `PM_ED` subclasses, which differ
//! only in how a cell combines its three predecessors. That split is modeled
//! here as the [`Recurrence`] trait with the zero-sized [`Dtw`] and
//! [`EditDistance`] implementors, mirroring the generic `CostModel`/`Heuristic`
//! type parameters used throughout `aligners/nw.rs`.

use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::{Cost, Mode, GAP_COST, INF, MATCH_COST, MISMATCH_COST};

/// The three-predecessor combination rule distinguishing DTW from edit
/// distance.
pub trait Recurrence {
    /// Combines a cell's three predecessors and the match/mismatch cost `d`
    /// into the cell's value.
    fn combine(diag: Cost, left: Cost, top: Cost, d: Cost) -> Cost;
    /// The value the diagonal predecessor alone would contribute.
    fn diag_value(diag: Cost, d: Cost) -> Cost;
    /// The value the left predecessor alone would contribute.
    fn left_value(left: Cost, d: Cost) -> Cost;
    /// The value the top predecessor alone would contribute.
    fn top_value(top: Cost, d: Cost) -> Cost;
}

/// Dynamic Time Warping: `d(i,j)` is charged once, atop whichever
/// predecessor is cheapest.
#[derive(Debug, Clone, Copy)]
pub struct Dtw;

impl Recurrence for Dtw {
    fn combine(diag: Cost, left: Cost, top: Cost, d: Cost) -> Cost {
        d.saturating_add(diag.min(left).min(top))
    }
    fn diag_value(diag: Cost, d: Cost) -> Cost {
        diag.saturating_add(d)
    }
    fn left_value(left: Cost, d: Cost) -> Cost {
        left.saturating_add(d)
    }
    fn top_value(top: Cost, d: Cost) -> Cost {
        top.saturating_add(d)
    }
}

/// Levenshtein edit distance: a diagonal step costs `d(i,j)`, a left/top
/// step always costs [`GAP_COST`] regardless of `d`.
#[derive(Debug, Clone, Copy)]
pub struct EditDistance;

impl Recurrence for EditDistance {
    fn combine(diag: Cost, left: Cost, top: Cost, d: Cost) -> Cost {
        let from_diag = diag.saturating_add(d);
        let from_left = left.saturating_add(GAP_COST);
        let from_top = top.saturating_add(GAP_COST);
        from_diag.min(from_left).min(from_top)
    }
    fn diag_value(diag: Cost, d: Cost) -> Cost {
        diag.saturating_add(d)
    }
    fn left_value(left: Cost, _d: Cost) -> Cost {
        left.saturating_add(GAP_COST)
    }
    fn top_value(top: Cost, _d: Cost) -> Cost {
        top.saturating_add(GAP_COST)
    }
}

/// A direction taken by [`Oracle::traceback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Diag,
    Left,
    Top,
}

/// The dense `(|Q|+1) x (|T|+1)` DP matrix for a chosen [`Recurrence`].
pub struct Oracle<R: Recurrence> {
    rows: usize,
    cols: usize,
    m: Vec<Vec<Cost>>,
    _recurrence: PhantomData<R>,
}

impl<R: Recurrence> Oracle<R> {
    /// Fills the whole matrix for `q` against `t` under `mode`.
    pub fn fill<Sym: Eq + Copy>(q: &[Sym], t: &[Sym], mode: Mode) -> Result<Self> {
        if q.is_empty() || t.is_empty() {
            return Err(Error::EmptyInput);
        }
        let rows = q.len() + 1;
        let cols = t.len() + 1;
        let mut m = vec![vec![0 as Cost; cols]; rows];

        for j in 0..cols {
            m[0][j] = row0_value(mode, j);
        }
        for i in 0..rows {
            m[i][0] = col0_value(mode, i);
        }

        for i in 1..rows {
            for j in 1..cols {
                let d = if q[i - 1] == t[j - 1] {
                    MATCH_COST
                } else {
                    MISMATCH_COST
                };
                m[i][j] = R::combine(m[i - 1][j - 1], m[i][j - 1], m[i - 1][j], d);
            }
        }

        Ok(Self {
            rows,
            cols,
            m,
            _recurrence: PhantomData,
        })
    }

    pub fn value(&self, i: usize, j: usize) -> Cost {
        self.m[i][j]
    }

    /// `M[|Q|][|T|]`, the whole-matrix alignment cost.
    pub fn global_value(&self) -> Cost {
        self.m[self.rows - 1][self.cols - 1]
    }

    /// The final row `M[|Q|][0..=|T|]`, used for pattern-matching queries.
    pub fn last_row(&self) -> &[Cost] {
        &self.m[self.rows - 1]
    }

    /// The index (and value) of the smallest entry in the final row,
    /// breaking ties toward the leftmost occurrence.
    pub fn min_last_row_with_index(&self) -> (Cost, usize) {
        let row = self.last_row();
        let mut best = (row[0], 0usize);
        for (j, &v) in row.iter().enumerate().skip(1) {
            if v < best.0 {
                best = (v, j);
            }
        }
        best
    }

    /// The `k` smallest (value, index) pairs of the final row, sorted by
    /// value then index, mirroring `k_smallest` in the Python oracle.
    pub fn k_smallest_last_row(&self, k: usize) -> Vec<(Cost, usize)> {
        let mut all: Vec<(Cost, usize)> =
            self.last_row().iter().enumerate().map(|(j, &v)| (v, j)).collect();
        all.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
        all.truncate(k);
        all
    }

    /// Walks backward from `(i, j)` to a cell in row 0 or column 0,
    /// preferring diagonal over left over top on ties, matching
    /// `PM_Matrix.trace_back`.
    pub fn traceback<Sym: Eq + Copy>(
        &self,
        q: &[Sym],
        t: &[Sym],
        mut i: usize,
        mut j: usize,
    ) -> Result<Vec<(usize, usize, Step)>> {
        let mut path = Vec::new();
        while i > 0 && j > 0 {
            let d = if q[i - 1] == t[j - 1] {
                MATCH_COST
            } else {
                MISMATCH_COST
            };
            let here = self.m[i][j];
            let from_diag = R::diag_value(self.m[i - 1][j - 1], d);
            let from_left = R::left_value(self.m[i][j - 1], d);
            let from_top = R::top_value(self.m[i - 1][j], d);

            if here == from_diag {
                path.push((i, j, Step::Diag));
                i -= 1;
                j -= 1;
            } else if here == from_left {
                path.push((i, j, Step::Left));
                j -= 1;
            } else if here == from_top {
                path.push((i, j, Step::Top));
                i -= 1;
            } else {
                return Err(Error::UntraceableCell { i, j });
            }
        }
        path.reverse();
        Ok(path)
    }
}

pub(crate) fn row0_value(mode: Mode, j: usize) -> Cost {
    match mode {
        Mode::Global => j as Cost,
        Mode::PatternMatch => 0,
    }
}

pub(crate) fn col0_value(mode: Mode, i: usize) -> Cost {
    match mode {
        Mode::Global => i as Cost,
        Mode::PatternMatch => {
            if i == 0 {
                0
            } else {
                INF
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dtw_identical_strings_is_zero() {
        let o = Oracle::<Dtw>::fill(b"abc", b"abc", Mode::Global).unwrap();
        assert_eq!(o.global_value(), 0);
    }

    #[test]
    fn edit_distance_known_pair() {
        // "kitten" -> "sitting" has edit distance 3.
        let o = Oracle::<EditDistance>::fill(b"kitten", b"sitting", Mode::Global).unwrap();
        assert_eq!(o.global_value(), 3);
    }

    #[test]
    fn pattern_match_finds_exact_occurrence() {
        let q = b"abc";
        let t = b"xxabcxx";
        let o = Oracle::<EditDistance>::fill(q, t, Mode::PatternMatch).unwrap();
        let (best, idx) = o.min_last_row_with_index();
        assert_eq!(best, 0);
        assert_eq!(idx, 5);
    }

    #[test]
    fn traceback_reconstructs_edit_path() {
        let q = b"ac";
        let t = b"abc";
        let o = Oracle::<EditDistance>::fill(q, t, Mode::Global).unwrap();
        let path = o.traceback(q, t, q.len(), t.len()).unwrap();
        assert_eq!(o.global_value(), 1);
        assert!(!path.is_empty());
        assert_eq!(path.last().unwrap().0, q.len());
        assert_eq!(path.last().unwrap().1, t.len());
    }

    #[test]
    fn k_smallest_is_sorted() {
        let q = b"ab";
        let t = b"ababab";
        let o = Oracle::<Dtw>::fill(q, t, Mode::PatternMatch).unwrap();
        let ks = o.k_smallest_last_row(3);
        assert!(ks.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[test]
    fn rejects_empty_input() {
        let empty: &[u8] = &[];
        assert!(matches!(
            Oracle::<Dtw>::fill(empty, b"a", Mode::Global),
            Err(Error::EmptyInput)
        ));
    }
}
