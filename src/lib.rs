//! Run-length block decomposition for Dynamic Time Warping and edit-distance
//! pattern matching.
//!
//! The crate has two faces on the same engine: a dense reference
//! implementation ([`oracle`]) that is obviously correct but `O(|Q| * |T|)`,
//! and a block engine ([`block`], [`driver`]) that exploits run-length
//! structure in `Q` and `T` to reach the same answer in `O(perimeter)` per
//! block rather than `O(area)`. [`harness`] differentially checks the two
//! against each other.
//!
//! Grounded on `examples/Schaudge-astar-pairwise-aligner`'s module layout:
//! one small top-level `lib.rs` re-exporting a handful of free functions,
//! with the real work living in focused submodules (`aligners/`, `cost_model/`).

mod block;
mod cutlist;
mod driver;
mod error;
pub mod harness;
pub mod logging;
mod oracle;
mod runs;

pub use block::Block;
pub use cutlist::CutList;
pub use driver::{compute_rolling, BlockMatrix};
pub use error::{Error, Result};
pub use oracle::{Dtw, EditDistance, Oracle, Recurrence, Step};
pub use runs::{boundaries, runs, Run};

/// All distances and intermediate DP values are measured in this type.
pub type Cost = i64;

/// A sentinel standing in for "unreachable", chosen so that adding two
/// `INF`s (or `INF` plus any real cost) never overflows `Cost::MAX`.
///
/// Matches `examples/Schaudge-astar-pairwise-aligner/src/aligners/nw.rs`'s
/// `const INF: Cost = Cost::MAX / 2;`.
pub const INF: Cost = Cost::MAX / 2;

pub const MATCH_COST: Cost = 0;
pub const MISMATCH_COST: Cost = 1;
pub const GAP_COST: Cost = 1;

/// Whether unmatched prefix/suffix of `T` is penalized ([`Mode::Global`]) or
/// free ([`Mode::PatternMatch`]).
///
/// `Global`: `row0[j] = j`, `col0[i] = i` — both boundaries accrue gap cost,
/// as in ordinary global alignment.
///
/// `PatternMatch`: `row0[j] = 0` (a match of `Q` can start anywhere in `T`
/// for free), `col0[0] = 0` and `col0[i] = INF` for `i > 0` (the other way
/// around, starting `T` partway through `Q`, is never free). This is the
/// uniform treatment across both the oracle and the block engine; the
/// original Python driver (`DTW_blocks.py`) instead special-cased the first
/// block-row with a sentinel, which this crate does not replicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Mode {
    Global,
    PatternMatch,
}

fn saturate(v: Cost, max_value: Option<Cost>) -> Cost {
    match max_value {
        Some(mv) => v.min(mv),
        None => v,
    }
}

/// Global block-DTW distance between `q` and `t`.
pub fn block_dtw<Sym: Eq + Copy>(q: &[Sym], t: &[Sym]) -> Result<Cost> {
    Ok(BlockMatrix::build(q, t, Mode::Global)?.global_value())
}

/// Block-DTW pattern matching: for every end position `j` in `t`, the cost
/// of the cheapest alignment of all of `q` ending at `j`.
pub fn block_dtw_pm<Sym: Eq + Copy>(q: &[Sym], t: &[Sym]) -> Result<Vec<Cost>> {
    Ok(BlockMatrix::build(q, t, Mode::PatternMatch)?.last_row())
}

/// Dense-reference global DTW distance, for validating [`block_dtw`].
pub fn oracle_dtw<Sym: Eq + Copy>(q: &[Sym], t: &[Sym]) -> Result<Cost> {
    Ok(Oracle::<Dtw>::fill(q, t, Mode::Global)?.global_value())
}

/// Dense-reference global Levenshtein edit distance.
pub fn oracle_ed<Sym: Eq + Copy>(q: &[Sym], t: &[Sym]) -> Result<Cost> {
    Ok(Oracle::<EditDistance>::fill(q, t, Mode::Global)?.global_value())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_dtw_matches_oracle_dtw() {
        let q = b"aabbccdd";
        let t = b"abbbcccd";
        assert_eq!(block_dtw(q, t).unwrap(), oracle_dtw(q, t).unwrap());
    }

    #[test]
    fn block_dtw_pm_matches_oracle_last_row() {
        let q = b"ab";
        let t = b"xxabxxabxx";
        let block_row = block_dtw_pm(q, t).unwrap();
        let o = Oracle::<Dtw>::fill(q, t, Mode::PatternMatch).unwrap();
        assert_eq!(block_row, o.last_row());
    }

    #[test]
    fn empty_input_is_rejected_everywhere() {
        let empty: &[u8] = &[];
        assert!(block_dtw(empty, b"a").is_err());
        assert!(oracle_dtw(b"a", empty).is_err());
    }
}
