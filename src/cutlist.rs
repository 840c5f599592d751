//! Compact representation of a monotone non-decreasing integer sequence.
//!
//! A [`CutList`] of logical length `L` stores only the positions where the
//! value strictly increases, as `(value, start_position)` pairs sorted by
//! position (equivalently by value). This is the border representation used
//! throughout the block solver (`crate::block`): a block's four borders are
//! each a `CutList`, and the whole point of the block algorithm is that these
//! lists stay short relative to `L` for long runs of identical symbols.
//!
//! Grounded on `examples/original_source/src/BlockDTW/border_block.py`'s
//! `(val, pos)` tuple lists and its `unpack` free function.

use crate::error::{Error, Result};
use crate::Cost;

/// A compact monotone non-decreasing sequence of logical length [`CutList::len`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CutList {
    cuts: Vec<(Cost, usize)>,
    len: usize,
}

impl CutList {
    /// An empty builder for a sequence of logical length `len`. Entries are
    /// added with [`CutList::append`] in increasing position order.
    pub fn new(len: usize) -> Self {
        Self {
            cuts: Vec::new(),
            len,
        }
    }

    /// A `CutList` holding a single constant value across the whole length.
    pub fn singleton(value: Cost, len: usize) -> Result<Self> {
        let mut cl = Self::new(len);
        cl.append(value, 0)?;
        Ok(cl)
    }

    /// Builds a `CutList` from an explicit non-decreasing sequence, emitting a
    /// new cut whenever the value strictly increases. Rejects any position
    /// where the value decreases.
    pub fn pack(seq: &[Cost]) -> Result<Self> {
        let mut cl = Self::new(seq.len());
        for (i, &v) in seq.iter().enumerate() {
            match cl.cuts.last() {
                None => cl.append(v, i)?,
                Some(&(last_v, _)) => {
                    if v > last_v {
                        cl.append(v, i)?;
                    } else if v < last_v {
                        return Err(Error::InconsistentBorders {
                            h: 0,
                            w: seq.len(),
                            equals: false,
                            vnw: v,
                            q_north: Vec::new(),
                            q_west: Vec::new(),
                            reason: "pack() given a decreasing sequence",
                        });
                    }
                }
            }
        }
        Ok(cl)
    }

    /// Reconstitutes the full length-`L` sequence by replicating each value
    /// until the next cut.
    pub fn unpack(&self) -> Vec<Cost> {
        let mut out = Vec::with_capacity(self.len);
        for (val, start, end) in self.segments() {
            out.resize(end, val);
            debug_assert_eq!(out.len().saturating_sub(end - start), start);
        }
        out
    }

    /// Appends `(value, position)`, checking the `CutList` invariants:
    /// the first entry must sit at position 0, and every later entry must
    /// strictly increase both value and position while staying within
    /// `len`.
    pub fn append(&mut self, value: Cost, position: usize) -> Result<()> {
        if position >= self.len {
            return Err(Error::InconsistentBorders {
                h: 0,
                w: self.len,
                equals: false,
                vnw: value,
                q_north: Vec::new(),
                q_west: Vec::new(),
                reason: "cut position out of range",
            });
        }
        match self.cuts.last() {
            None => {
                if position != 0 {
                    return Err(Error::InconsistentBorders {
                        h: 0,
                        w: self.len,
                        equals: false,
                        vnw: value,
                        q_north: Vec::new(),
                        q_west: Vec::new(),
                        reason: "first cut must start at position 0",
                    });
                }
            }
            Some(&(last_value, last_position)) => {
                if value <= last_value || position <= last_position {
                    return Err(Error::InconsistentBorders {
                        h: 0,
                        w: self.len,
                        equals: false,
                        vnw: value,
                        q_north: Vec::new(),
                        q_west: Vec::new(),
                        reason: "cut list entries must strictly increase in value and position",
                    });
                }
            }
        }
        self.cuts.push((value, position));
        Ok(())
    }

    /// The last `(value, position)` entry. Panics if no entry was ever
    /// appended; every `CutList` returned by this crate's public API has at
    /// least one entry.
    pub fn last(&self) -> (Cost, usize) {
        *self.cuts.last().expect("CutList has no entries")
    }

    /// Like [`CutList::last`], but `None` for a list under construction that
    /// has not received its first entry yet.
    pub fn try_last(&self) -> Option<(Cost, usize)> {
        self.cuts.last().copied()
    }

    /// The value at position 0.
    pub fn first_value(&self) -> Cost {
        self.cuts.first().expect("CutList has no entries").0
    }

    /// The logical length `L` this list reconstructs to.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of cuts actually stored (the compression win).
    pub fn num_cuts(&self) -> usize {
        self.cuts.len()
    }

    /// Iterates `(value, start_position, end_position)` segments, where
    /// `end_position` is the start of the next cut (or `len` for the last
    /// segment). This is the primitive the block solver merges over instead
    /// of unpacking.
    pub fn segments(&self) -> impl Iterator<Item = (Cost, usize, usize)> + '_ {
        self.cuts.iter().enumerate().map(move |(i, &(val, pos))| {
            let end = self.cuts.get(i + 1).map_or(self.len, |&(_, p)| p);
            (val, pos, end)
        })
    }

    pub(crate) fn raw(&self) -> &[(Cost, usize)] {
        &self.cuts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_roundtrip() {
        let seq = vec![0, 0, 0, 1, 1, 2, 5, 5];
        let cl = CutList::pack(&seq).unwrap();
        assert_eq!(cl.unpack(), seq);
    }

    #[test]
    fn pack_rejects_decreasing() {
        assert!(CutList::pack(&[0, 1, 0]).is_err());
    }

    #[test]
    fn pack_of_pack_is_identity_on_cuts() {
        let seq = vec![3, 3, 4, 4, 4, 9];
        let cl = CutList::pack(&seq).unwrap();
        let roundtrip = CutList::pack(&cl.unpack()).unwrap();
        assert_eq!(cl, roundtrip);
    }

    #[test]
    fn singleton_unpacks_to_constant() {
        let cl = CutList::singleton(7, 4).unwrap();
        assert_eq!(cl.unpack(), vec![7, 7, 7, 7]);
    }

    #[test]
    fn append_enforces_invariants() {
        let mut cl = CutList::new(5);
        assert!(cl.append(3, 1).is_err(), "first cut must start at 0");
        cl.append(3, 0).unwrap();
        assert!(cl.append(3, 2).is_err(), "value must strictly increase");
        assert!(cl.append(4, 0).is_err(), "position must strictly increase");
        assert!(cl.append(4, 10).is_err(), "position must be < len");
        cl.append(4, 2).unwrap();
        assert_eq!(cl.last(), (4, 2));
    }

    #[test]
    fn segments_cover_full_range() {
        let cl = CutList::pack(&[1, 1, 2, 2, 2, 3]).unwrap();
        let segs: Vec<_> = cl.segments().collect();
        assert_eq!(segs, vec![(1, 0, 2), (2, 2, 5), (3, 5, 6)]);
    }
}
