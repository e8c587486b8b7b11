//! Vertex handles and global numbering.
//!
//! Two identities coexist for every mesh vertex:
//! - [`VertexId`], the arena slot the vertex lives in. Elements and periodic
//!   correspondences refer to vertices through it, never by reference.
//! - [`GlobalIndex`], the stable mesh-wide number used to order and key
//!   vertices during export. A negative value marks a vertex that is excluded
//!   from the numbering and must be skipped wherever it is encountered.

use std::fmt;

/// Arena handle of a vertex inside a [`PartitionedModel`](crate::model::PartitionedModel).
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct VertexId(pub u32);

impl VertexId {
    /// Slot index inside the vertex arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Mesh-wide vertex number. Negative values are "unset" and excluded from export.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct GlobalIndex(i64);

impl GlobalIndex {
    /// Marker for a vertex that is not part of the global numbering.
    pub const UNSET: GlobalIndex = GlobalIndex(-1);

    #[inline]
    pub const fn new(raw: i64) -> Self {
        GlobalIndex(raw)
    }

    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// `true` when the vertex takes part in the global numbering.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

impl fmt::Debug for GlobalIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GlobalIndex").field(&self.0).finish()
    }
}

impl fmt::Display for GlobalIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for GlobalIndex {
    fn from(raw: i64) -> Self {
        GlobalIndex(raw)
    }
}

impl From<i32> for GlobalIndex {
    fn from(raw: i32) -> Self {
        GlobalIndex(i64::from(raw))
    }
}

/// A mesh node owned by the whole-mesh model.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeshVertex {
    pub global_index: GlobalIndex,
    pub coords: [f64; 3],
}

impl MeshVertex {
    pub fn new(global_index: impl Into<GlobalIndex>, coords: [f64; 3]) -> Self {
        Self {
            global_index: global_index.into(),
            coords,
        }
    }

    /// Coordinates multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> [f64; 3] {
        [
            self.coords[0] * factor,
            self.coords[1] * factor,
            self.coords[2] * factor,
        ]
    }
}
