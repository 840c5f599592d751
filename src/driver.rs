//! Raster-order composition of per-block solves over a run-length grid.
//!
//! Grounded on `examples/original_source/src/BlockDTW/DTW_blocks.py`'s
//! `DtwByBlocks` (global distance, block grid) and `DTW_nmk.py`'s
//! `DtwByBorders` (bounded-width variant via `max_value`). Unlike
//! `DTW_blocks.py`, row-0/column-0 initialization is uniform across both
//! [`Mode`] variants rather than relying on a sentinel block.

use tracing::debug;

use crate::block::Block;
use crate::cutlist::CutList;
use crate::error::Result;
use crate::oracle::{col0_value, row0_value};
use crate::runs::{runs, Run};
use crate::{Cost, Mode};

fn saturate(v: Cost, max_value: Option<Cost>) -> Cost {
    match max_value {
        Some(mv) => v.min(mv),
        None => v,
    }
}

fn run_offsets<Sym>(rs: &[Run<Sym>]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(rs.len());
    let mut acc = 0usize;
    for r in rs {
        offsets.push(acc);
        acc += r.length;
    }
    offsets
}

fn virtual_row0_segment(mode: Mode, col_start: usize, w: usize, max_value: Option<Cost>) -> Result<CutList> {
    let vals: Vec<Cost> = (1..=w)
        .map(|p| saturate(row0_value(mode, col_start + p), max_value))
        .collect();
    CutList::pack(&vals)
}

fn virtual_col0_segment(mode: Mode, row_start: usize, h: usize, max_value: Option<Cost>) -> Result<CutList> {
    let vals: Vec<Cost> = (1..=h)
        .map(|p| saturate(col0_value(mode, row_start + p), max_value))
        .collect();
    CutList::pack(&vals)
}

/// The block grid for one `(Q, T)` pair: `rQ` run-rows by `rT` run-columns.
pub struct BlockMatrix {
    blocks: Vec<Vec<Block>>,
    mode: Mode,
    q_len: usize,
    t_len: usize,
    max_value: Option<Cost>,
}

impl BlockMatrix {
    /// Builds the full grid, exact (no bound on internal values).
    pub fn build<Sym: Eq + Copy>(q: &[Sym], t: &[Sym], mode: Mode) -> Result<Self> {
        Self::build_with_cap(q, t, mode, None)
    }

    /// Like [`BlockMatrix::build`], but caps every internal value at
    /// `max_value`, bounding the per-block work by `O(max_value)` instead of
    /// `O(h + w)`.
    pub fn with_cap<Sym: Eq + Copy>(q: &[Sym], t: &[Sym], mode: Mode, max_value: Cost) -> Result<Self> {
        Self::build_with_cap(q, t, mode, Some(max_value))
    }

    fn build_with_cap<Sym: Eq + Copy>(
        q: &[Sym],
        t: &[Sym],
        mode: Mode,
        max_value: Option<Cost>,
    ) -> Result<Self> {
        let run_q = runs(q)?;
        let run_t = runs(t)?;
        let row_offsets = run_offsets(&run_q);
        let col_offsets = run_offsets(&run_t);
        let r_q = run_q.len();
        let r_t = run_t.len();
        debug!(r_q, r_t, "built run-length grid");

        let mut blocks: Vec<Vec<Block>> = Vec::with_capacity(r_q);
        for r in 0..r_q {
            let mut row = Vec::with_capacity(r_t);
            let h = run_q[r].length;
            let row_start = row_offsets[r];
            for c in 0..r_t {
                let w = run_t[c].length;
                let col_start = col_offsets[c];
                let equals = run_q[r].symbol == run_t[c].symbol;

                let q_north = if r == 0 {
                    virtual_row0_segment(mode, col_start, w, max_value)?
                } else {
                    row_above_bottom(&blocks, r, c)
                };
                let q_west = if c == 0 {
                    virtual_col0_segment(mode, row_start, h, max_value)?
                } else {
                    row[c - 1].right.clone()
                };
                let vnw = if r == 0 && c == 0 {
                    0
                } else if r == 0 {
                    saturate(row0_value(mode, col_start), max_value)
                } else if c == 0 {
                    saturate(col0_value(mode, row_start), max_value)
                } else {
                    blocks[r - 1][c - 1].br
                };

                let block = Block::solve(h, w, equals, vnw, &q_north, &q_west, max_value)?;
                row.push(block);
            }
            blocks.push(row);
        }

        Ok(Self {
            blocks,
            mode,
            q_len: q.len(),
            t_len: t.len(),
            max_value,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// `M[|Q|][|T|]`: the whole-matrix alignment distance.
    pub fn global_value(&self) -> Cost {
        self.blocks.last().unwrap().last().unwrap().br
    }

    /// The fully unpacked final row, `M[|Q|][0..=|T|]`, prefixed by the
    /// corner `M[|Q|][0]` (pattern-matching queries look at this, not
    /// [`BlockMatrix::global_value`]).
    pub fn last_row(&self) -> Vec<Cost> {
        let mut out = Vec::with_capacity(self.t_len + 1);
        out.push(saturate(col0_value(self.mode, self.q_len), self.max_value));
        for block in self.blocks.last().unwrap() {
            out.extend(block.bottom.unpack());
        }
        out
    }

    /// The smallest value (and its index) in the final row.
    pub fn last_row_min_index(&self) -> (Cost, usize) {
        let row = self.last_row();
        let mut best = (row[0], 0usize);
        for (j, &v) in row.iter().enumerate().skip(1) {
            if v < best.0 {
                best = (v, j);
            }
        }
        best
    }
}

fn row_above_bottom(blocks: &[Vec<Block>], r: usize, c: usize) -> CutList {
    blocks[r - 1][c].bottom.clone()
}

/// `O(rT)`-memory variant: retires block-rows once their successor row is
/// computed, never materializing the full grid. Returns the same final row
/// [`BlockMatrix::last_row`] would, without [`BlockMatrix`]'s `O(|Q|*|T|/maxrun^2)`
/// block storage.
pub fn compute_rolling<Sym: Eq + Copy>(
    q: &[Sym],
    t: &[Sym],
    mode: Mode,
    max_value: Option<Cost>,
) -> Result<Vec<Cost>> {
    let run_q = runs(q)?;
    let run_t = runs(t)?;
    let row_offsets = run_offsets(&run_q);
    let col_offsets = run_offsets(&run_t);
    let r_q = run_q.len();
    let r_t = run_t.len();

    // `prev_bottoms[c]` / `prev_brs` hold the previous block-row's bottom
    // borders and bottom-right corners; `None` before the first row exists.
    let mut prev_bottoms: Vec<CutList> = Vec::new();
    let mut prev_brs: Vec<Cost> = Vec::new();

    for r in 0..r_q {
        let h = run_q[r].length;
        let row_start = row_offsets[r];
        let mut cur_bottoms = Vec::with_capacity(r_t);
        let mut cur_brs = Vec::with_capacity(r_t);
        let mut left_right: Option<CutList> = None;

        for c in 0..r_t {
            let w = run_t[c].length;
            let col_start = col_offsets[c];
            let equals = run_q[r].symbol == run_t[c].symbol;

            let q_north = if r == 0 {
                virtual_row0_segment(mode, col_start, w, max_value)?
            } else {
                prev_bottoms[c].clone()
            };
            let q_west = if c == 0 {
                virtual_col0_segment(mode, row_start, h, max_value)?
            } else {
                left_right.clone().expect("left neighbour solved first")
            };
            let vnw = if r == 0 && c == 0 {
                0
            } else if r == 0 {
                saturate(row0_value(mode, col_start), max_value)
            } else if c == 0 {
                saturate(col0_value(mode, row_start), max_value)
            } else {
                prev_brs[c - 1]
            };

            let block = Block::solve(h, w, equals, vnw, &q_north, &q_west, max_value)?;
            left_right = Some(block.right.clone());
            cur_brs.push(block.br);
            cur_bottoms.push(block.bottom);
        }

        prev_bottoms = cur_bottoms;
        prev_brs = cur_brs;
    }

    let mut out = Vec::with_capacity(t.len() + 1);
    out.push(saturate(col0_value(mode, q.len()), max_value));
    for bottom in &prev_bottoms {
        out.extend(bottom.unpack());
    }
    Ok(out)
}
