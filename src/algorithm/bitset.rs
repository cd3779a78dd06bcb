use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset tracking which tile slots are still unplaced
///
/// Slots are the zero-based positions of tiles in the input order.
/// Provides O(1) membership testing and cheap undo during backtracking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
}

impl TileBitset {
    /// Create a bitset with no slots present
    pub fn new(slots: usize) -> Self {
        Self {
            bits: bitvec![0; slots],
        }
    }

    /// Create a bitset containing every slot
    pub fn all(slots: usize) -> Self {
        Self {
            bits: bitvec![1; slots],
        }
    }

    /// Insert a slot; out of range slots are ignored
    pub fn insert(&mut self, slot: usize) {
        if slot < self.bits.len() {
            self.bits.set(slot, true);
        }
    }

    /// Remove a slot; out of range slots are ignored
    pub fn remove(&mut self, slot: usize) {
        if slot < self.bits.len() {
            self.bits.set(slot, false);
        }
    }

    /// Test slot membership
    pub fn contains(&self, slot: usize) -> bool {
        self.bits.get(slot).as_deref() == Some(&true)
    }

    /// Test if no slots are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count slots in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Capacity the set was created with
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Iterate present slots in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all present slots as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} slots: {:?})", self.count(), self.to_vec())
    }
}
