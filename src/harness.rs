//! Differential and timing harness comparing the block engine against the
//! dense oracle.
//!
//! Grounded on `examples/original_source/tests/validation.py`'s
//! `get_random_string` / `main`, which generates random strings over a
//! small alphabet and times the two implementations against each other.
//! Exposed as `pub mod harness` (not `#[cfg(test)]`) so `tests/differential.rs`
//! and the CLIs' `--self-check` flag can both reuse it.

use rand::Rng;

use crate::driver::BlockMatrix;
use crate::error::Result;
use crate::oracle::{Dtw, Oracle};
use crate::Mode;

/// Generates a random string of `len` symbols drawn from the first
/// `alphabet_size` lowercase ASCII letters.
pub fn random_string<R: Rng + ?Sized>(rng: &mut R, len: usize, alphabet_size: u8) -> Vec<u8> {
    debug_assert!(alphabet_size >= 1 && alphabet_size <= 26);
    (0..len)
        .map(|_| b'a' + rng.gen_range(0..alphabet_size))
        .collect()
}

/// A single differential-test outcome: the block engine's answer either
/// matched the oracle's, or it didn't.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub q: Vec<u8>,
    pub t: Vec<u8>,
    pub mode: Mode,
    pub block_value: i64,
    pub oracle_value: i64,
}

/// Runs both engines on `(q, t)` under `Mode::Global` DTW semantics and
/// reports whether they agree.
pub fn differential_check_global_dtw(q: &[u8], t: &[u8]) -> Result<Option<Mismatch>> {
    let block = BlockMatrix::build(q, t, Mode::Global)?.global_value();
    let oracle = Oracle::<Dtw>::fill(q, t, Mode::Global)?.global_value();
    Ok(if block != oracle {
        Some(Mismatch {
            q: q.to_vec(),
            t: t.to_vec(),
            mode: Mode::Global,
            block_value: block,
            oracle_value: oracle,
        })
    } else {
        None
    })
}

/// Like [`differential_check_global_dtw`], but for the pattern-matching
/// last row. The block engine only implements the DTW recurrence, so this
/// checks against `Oracle::<Dtw>`, not the edit-distance oracle.
pub fn differential_check_pattern_match_dtw(q: &[u8], t: &[u8]) -> Result<Option<(Vec<i64>, Vec<i64>)>> {
    let block = BlockMatrix::build(q, t, Mode::PatternMatch)?.last_row();
    let oracle = Oracle::<Dtw>::fill(q, t, Mode::PatternMatch)?
        .last_row()
        .to_vec();
    Ok(if block != oracle {
        Some((block, oracle))
    } else {
        None
    })
}

/// Generates `trials` random `(q, t)` pairs with `q_len`/`t_len` characters
/// over `alphabet_size` symbols and returns every case where the block
/// engine disagreed with the oracle, under global DTW semantics.
pub fn fuzz_global_dtw<R: Rng + ?Sized>(
    rng: &mut R,
    trials: usize,
    q_len: usize,
    t_len: usize,
    alphabet_size: u8,
) -> Result<Vec<Mismatch>> {
    let mut mismatches = Vec::new();
    for _ in 0..trials {
        let q = random_string(rng, q_len, alphabet_size);
        let t = random_string(rng, t_len, alphabet_size);
        if let Some(m) = differential_check_global_dtw(&q, &t)? {
            mismatches.push(m);
        }
    }
    Ok(mismatches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn fuzz_finds_no_mismatches_on_small_alphabet() {
        let mut rng = StdRng::seed_from_u64(42);
        let mismatches = fuzz_global_dtw(&mut rng, 200, 12, 15, 3).unwrap();
        assert!(mismatches.is_empty(), "mismatches: {mismatches:?}");
    }

    #[test]
    fn random_string_stays_within_alphabet() {
        let mut rng = StdRng::seed_from_u64(7);
        let s = random_string(&mut rng, 50, 4);
        assert!(s.iter().all(|&c| (b'a'..b'a' + 4).contains(&c)));
    }
}
