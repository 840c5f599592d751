//! Run-length segmentation of a string into `(symbol, length)` runs.
//!
//! Grounded on `examples/original_source/src/BlockDTW/DTW_nmk.py`'s
//! `run_length_compress` and `DTW_blocks.py`'s `end_vertical_blocks` /
//! `end_horizontal_blocks` scans.

use itertools::Itertools;

use crate::error::{Error, Result};

/// A maximal run of identical symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run<Sym> {
    pub symbol: Sym,
    pub length: usize,
}

/// Compresses `s` into its runs. Consecutive runs always have different
/// symbols by construction. Fails with [`Error::EmptyInput`] if `s` is empty.
pub fn runs<Sym: Eq + Copy>(s: &[Sym]) -> Result<Vec<Run<Sym>>> {
    if s.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(s.iter()
        .copied()
        .group_by(|&c| c)
        .into_iter()
        .map(|(symbol, group)| Run {
            symbol,
            length: group.count(),
        })
        .collect())
}

/// The last index of each run, i.e. the positions where `s[i] != s[i+1]`
/// plus the final index. Has the same length as `runs(s)`.
pub fn boundaries<Sym: Eq + Copy>(s: &[Sym]) -> Result<Vec<usize>> {
    if s.is_empty() {
        return Err(Error::EmptyInput);
    }
    let mut out = Vec::new();
    for i in 1..s.len() {
        if s[i] != s[i - 1] {
            out.push(i - 1);
        }
    }
    out.push(s.len() - 1);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        let empty: &[u8] = &[];
        assert!(matches!(runs(empty), Err(Error::EmptyInput)));
        assert!(matches!(boundaries(empty), Err(Error::EmptyInput)));
    }

    #[test]
    fn single_run() {
        let rs = runs(b"aaaa").unwrap();
        assert_eq!(rs, vec![Run { symbol: b'a', length: 4 }]);
        assert_eq!(boundaries(b"aaaa").unwrap(), vec![3]);
    }

    #[test]
    fn mixed_runs_reconstruct_length() {
        let s = b"aabbbcaa";
        let rs = runs(s).unwrap();
        assert_eq!(
            rs,
            vec![
                Run { symbol: b'a', length: 2 },
                Run { symbol: b'b', length: 3 },
                Run { symbol: b'c', length: 1 },
                Run { symbol: b'a', length: 2 },
            ]
        );
        assert_eq!(rs.iter().map(|r| r.length).sum::<usize>(), s.len());
        assert_eq!(boundaries(s).unwrap(), vec![1, 4, 5, 7]);
    }

    #[test]
    fn single_symbol_of_length_one() {
        assert_eq!(runs(b"x").unwrap(), vec![Run { symbol: b'x', length: 1 }]);
    }
}
