//! Error types surfaced by the block-DTW engine.
//!
//! Three kinds only, matching the three ways the engine can fail: the caller
//! handed it nothing to align, an internal invariant of the border solver
//! broke, or a traceback could not find a consistent predecessor.

use crate::Cost;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `Q` or `T` had length zero.
    #[error("input string is empty")]
    EmptyInput,

    /// A border-solver invariant was violated. This always indicates a bug
    /// in the solver or in hand-built `CutList`s passed to it, never a
    /// property of ordinary input data.
    #[error(
        "inconsistent block borders ({reason}): h={h} w={w} equals={equals} vnw={vnw} \
         q_north={q_north:?} q_west={q_west:?}"
    )]
    InconsistentBorders {
        h: usize,
        w: usize,
        equals: bool,
        vnw: Cost,
        q_north: Vec<(Cost, usize)>,
        q_west: Vec<(Cost, usize)>,
        reason: &'static str,
    },

    /// Oracle traceback reached a cell whose value is not explained by any
    /// of its diagonal/left/top predecessors.
    #[error("traceback failed at cell (i={i}, j={j}): no predecessor matches the stored value")]
    UntraceableCell { i: usize, j: usize },
}
