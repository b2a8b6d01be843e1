//! Strongly-typed point indices.
//!
//! The MFC engine's per-cluster MST step runs on a sub-list of points local
//! to one cluster, then must remap those edges back onto the full point
//! list before they leave the cluster boundary. Using distinct newtypes for
//! "position in the full point list" and "position within one cluster's
//! member list" makes that remap an explicit, typed step instead of an
//! implicit convention tracked only by variable naming.

/// An index into the full point list passed to the MFC engine.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GlobalIndex(usize);

impl GlobalIndex {
    /// Wraps a raw position in the full point list.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw position.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// An index into one cluster's member list (`0..cluster_size`).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LocalIndex(usize);

impl LocalIndex {
    /// Wraps a raw position within a cluster's member list.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw position.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}
