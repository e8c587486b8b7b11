//! Cross-zone occurrence registry for periodic and interface vertices.
//!
//! Keys are fixed up front, before any zone is written: every vertex of a
//! periodic correspondence (both sides) and every primary vertex of a
//! partition-interface entity. Zone writing then appends one
//! [`Occurrence`] per zone in which a key vertex is instantiated. Vertices
//! that were never pre-registered are not tracked, which keeps the registry
//! proportional to the boundary rather than the mesh.
//!
//! The registry is keyed by [`GlobalIndex`] in a `BTreeMap`, so iteration
//! order is the global numbering and never depends on addresses.

use crate::classify::Classification;
use crate::mesh_error::MeshExportError;
use crate::model::PartitionedMeshSource;
use crate::topology::vertex::{GlobalIndex, VertexId};
use crate::zone::layout::{NodeSelection, nodes_in_entities};
use std::collections::BTreeMap;

/// Where a shared vertex was instantiated: partition and 1-based local index.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct Occurrence {
    pub partition: u32,
    pub local: u64,
}

impl Occurrence {
    pub const fn new(partition: u32, local: u64) -> Self {
        Self { partition, local }
    }
}

/// Global index → occurrences, in zone processing order.
#[derive(Clone, Debug, Default)]
pub struct NodeRegistry {
    entries: BTreeMap<GlobalIndex, Vec<Occurrence>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register every periodic and interface vertex of a classified mesh.
    ///
    /// Interface vertices are collected from primary nodes of all elements,
    /// physical tags notwithstanding: interfaces are always captured.
    pub fn seed<S>(source: &S, classes: &Classification<'_>) -> Result<Self, MeshExportError>
    where
        S: PartitionedMeshSource + ?Sized,
    {
        let mut registry = Self::new();
        for slave in &classes.periodic {
            let Some(link) = &slave.periodic else {
                continue;
            };
            for (s, m) in link.pairs() {
                registry.preregister(global_index_of(source, slave.id, s)?);
                registry.preregister(global_index_of(source, slave.id, m)?);
            }
        }
        let interface_nodes = nodes_in_entities(
            source,
            &classes.interfaces,
            NodeSelection::Primary,
            true,
        )?;
        registry.preregister_all(interface_nodes.into_keys());
        log::debug!(
            "registry seeded with {} periodic/interface vertices",
            registry.len()
        );
        Ok(registry)
    }

    /// Mark `vertex` as tracked with an empty occurrence list.
    ///
    /// Vertices excluded from the global numbering are never tracked.
    pub fn preregister(&mut self, vertex: GlobalIndex) {
        if vertex.is_valid() {
            self.entries.entry(vertex).or_default();
        }
    }

    pub fn preregister_all(&mut self, vertices: impl IntoIterator<Item = GlobalIndex>) {
        for v in vertices {
            self.preregister(v);
        }
    }

    /// Append an occurrence of `vertex`. Returns `false` (and does nothing)
    /// when the vertex is not tracked.
    ///
    /// A second occurrence in the same partition is ignored: a vertex has a
    /// single local index per zone.
    pub fn record(&mut self, vertex: GlobalIndex, partition: u32, local: u64) -> bool {
        match self.entries.get_mut(&vertex) {
            Some(list) => {
                if !list.iter().any(|o| o.partition == partition) {
                    list.push(Occurrence::new(partition, local));
                }
                true
            }
            None => false,
        }
    }

    /// Occurrences of `vertex`, empty when absent.
    pub fn occurrences(&self, vertex: GlobalIndex) -> &[Occurrence] {
        self.entries.get(&vertex).map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, vertex: GlobalIndex) -> bool {
        self.entries.contains_key(&vertex)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All tracked vertices with their occurrences, in global order.
    pub fn iter(&self) -> impl Iterator<Item = (GlobalIndex, &[Occurrence])> + '_ {
        self.entries.iter().map(|(g, occ)| (*g, occ.as_slice()))
    }

    /// Tracked vertices that no zone instantiated.
    pub fn unresolved(&self) -> impl Iterator<Item = GlobalIndex> + '_ {
        self.entries
            .iter()
            .filter(|(_, occ)| occ.is_empty())
            .map(|(g, _)| *g)
    }
}

pub(crate) fn global_index_of<S>(
    source: &S,
    entity: crate::topology::entity::EntityId,
    vertex: VertexId,
) -> Result<GlobalIndex, MeshExportError>
where
    S: PartitionedMeshSource + ?Sized,
{
    source
        .vertex(vertex)
        .map(|v| v.global_index)
        .ok_or(MeshExportError::UnknownVertex { entity, vertex })
}
