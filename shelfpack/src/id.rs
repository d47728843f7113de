use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifies an island by its index in the slice handed to a packer.
///
/// Packers never reorder the caller's slice. They sort and store `IslandId`
/// values instead, so an `IslandId` stays valid for the caller after packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IslandId(usize);

impl IslandId {
    #[inline]
    pub fn from_index(index: usize) -> Self {
        IslandId(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    /// Every id for a slice of `len` islands, in slice order.
    pub(crate) fn all(len: usize) -> impl Iterator<Item = IslandId> {
        (0..len).map(IslandId)
    }
}

impl fmt::Display for IslandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
