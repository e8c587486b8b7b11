//! Periodic master/slave identification between entities.
//!
//! A slave entity carries a [`PeriodicLink`] naming its mesh master and the
//! explicit slave-vertex → master-vertex correspondence. Entities refer to
//! each other by [`EntityId`], so a slave and its master never hold
//! references to one another.

use crate::mesh_error::MeshExportError;
use crate::topology::entity::EntityId;
use crate::topology::vertex::VertexId;
use std::collections::BTreeMap;

/// Rigid transform attached to a periodic connectivity record.
///
/// Rotation center, rotation angles (radians, about x/y/z) and translation,
/// stored in single precision as the output format does.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PeriodicTransform {
    pub rotation_center: [f32; 3],
    pub rotation_angle: [f32; 3],
    pub translation: [f32; 3],
}

impl PeriodicTransform {
    /// Zero rotation, zero translation.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

/// Master entity and vertex correspondence of a periodic slave.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PeriodicLink {
    master: EntityId,
    master_for: BTreeMap<VertexId, VertexId>,
}

impl PeriodicLink {
    /// Create a link to `master` with an empty correspondence.
    pub fn new(master: EntityId) -> Self {
        Self {
            master,
            master_for: BTreeMap::new(),
        }
    }

    /// The mesh master entity.
    pub fn master(&self) -> EntityId {
        self.master
    }

    /// Insert a slave/master vertex pair for the slave entity `owner`.
    ///
    /// Returns an error if the slave already maps to a different master.
    pub fn insert_pair(
        &mut self,
        owner: EntityId,
        slave: VertexId,
        master: VertexId,
    ) -> Result<(), MeshExportError> {
        if let Some(existing) = self.master_for.get(&slave) {
            if *existing != master {
                return Err(MeshExportError::PeriodicMappingConflict {
                    entity: owner,
                    slave,
                    existing: *existing,
                    new: master,
                });
            }
        }
        self.master_for.insert(slave, master);
        Ok(())
    }

    /// Retrieve the master vertex of a slave vertex.
    pub fn master_of(&self, slave: VertexId) -> Option<VertexId> {
        self.master_for.get(&slave).copied()
    }

    /// Iterate over `(slave, master)` vertex pairs in slave-handle order.
    pub fn pairs(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.master_for.iter().map(|(s, m)| (*s, *m))
    }

    pub fn len(&self) -> usize {
        self.master_for.len()
    }

    pub fn is_empty(&self) -> bool {
        self.master_for.is_empty()
    }
}
