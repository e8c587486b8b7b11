//! Read-only view of an already-partitioned mesh.
//!
//! The exporter never looks at how partitioning or periodicity was computed.
//! It consumes a [`PartitionedMeshSource`], which exposes exactly the
//! accessors it needs. [`PartitionedModel`] is an arena-backed
//! implementation that validates its input as it is built.

use crate::mesh_error::MeshExportError;
use crate::topology::element::{Element, ElementType};
use crate::topology::entity::{Entity, EntityId};
use crate::topology::periodic::PeriodicLink;
use crate::topology::vertex::{GlobalIndex, MeshVertex, VertexId};
use hashbrown::HashSet;
use std::collections::BTreeMap;

/// Capability interface over a partitioned mesh.
pub trait PartitionedMeshSource {
    /// Model name; the base of every zone name.
    fn name(&self) -> &str;

    /// Number of partitions. Zero means the mesh is not partitioned.
    fn num_partitions(&self) -> u32;

    /// All entities, ordered by [`EntityId`].
    fn entities(&self) -> impl Iterator<Item = &Entity> + '_;

    /// Look up one entity.
    fn entity(&self, id: EntityId) -> Option<&Entity>;

    /// Look up one vertex.
    fn vertex(&self, id: VertexId) -> Option<&MeshVertex>;
}

/// Arena-owned partitioned mesh.
#[derive(Clone, Debug, Default)]
pub struct PartitionedModel {
    name: String,
    num_partitions: u32,
    vertices: Vec<MeshVertex>,
    numbered: HashSet<GlobalIndex>,
    entities: BTreeMap<EntityId, Entity>,
}

impl PartitionedModel {
    /// Create an empty model with `num_partitions` partitions.
    pub fn new(name: impl Into<String>, num_partitions: u32) -> Self {
        Self {
            name: name.into(),
            num_partitions,
            ..Default::default()
        }
    }

    /// Add a vertex and return its handle.
    ///
    /// Valid global indices must be unique; any number of vertices may carry
    /// a negative (excluded) index.
    pub fn add_vertex(
        &mut self,
        global_index: impl Into<GlobalIndex>,
        coords: [f64; 3],
    ) -> Result<VertexId, MeshExportError> {
        let global_index = global_index.into();
        if global_index.is_valid() && !self.numbered.insert(global_index) {
            return Err(MeshExportError::DuplicateGlobalIndex(global_index));
        }
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(MeshVertex::new(global_index, coords));
        Ok(id)
    }

    /// Add an entity after checking its elements and partitions.
    pub fn add_entity(&mut self, entity: Entity) -> Result<(), MeshExportError> {
        if self.entities.contains_key(&entity.id) {
            return Err(MeshExportError::DuplicateEntity(entity.id));
        }
        for ty in entity.element_types() {
            for (index, element) in entity.elements_of_type(ty).iter().enumerate() {
                self.check_element(entity.id, ty, index, element)?;
            }
        }
        for &partition in &entity.partitions {
            if partition == 0 || partition > self.num_partitions {
                return Err(MeshExportError::PartitionOutOfRange {
                    entity: entity.id,
                    partition,
                    num_partitions: self.num_partitions,
                });
            }
        }
        if let Some(link) = &entity.periodic {
            for (slave, master) in link.pairs() {
                self.check_vertex(entity.id, slave)?;
                self.check_vertex(entity.id, master)?;
            }
        }
        self.entities.insert(entity.id, entity);
        Ok(())
    }

    /// Declare `slave` periodic with `master` through the given vertex pairs.
    ///
    /// Both entities must already be present.
    pub fn set_periodic(
        &mut self,
        slave: EntityId,
        master: EntityId,
        pairs: impl IntoIterator<Item = (VertexId, VertexId)>,
    ) -> Result<(), MeshExportError> {
        if !self.entities.contains_key(&master) {
            return Err(MeshExportError::UnknownEntity(master));
        }
        let mut link = PeriodicLink::new(master);
        for (s, m) in pairs {
            self.check_vertex(slave, s)?;
            self.check_vertex(slave, m)?;
            link.insert_pair(slave, s, m)?;
        }
        let entity = self
            .entities
            .get_mut(&slave)
            .ok_or(MeshExportError::UnknownEntity(slave))?;
        entity.periodic = Some(link);
        Ok(())
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_entities(&self) -> usize {
        self.entities.len()
    }

    fn check_vertex(&self, entity: EntityId, vertex: VertexId) -> Result<(), MeshExportError> {
        if vertex.index() < self.vertices.len() {
            Ok(())
        } else {
            Err(MeshExportError::UnknownVertex { entity, vertex })
        }
    }

    fn check_element(
        &self,
        entity: EntityId,
        ty: ElementType,
        index: usize,
        element: &Element,
    ) -> Result<(), MeshExportError> {
        if element.vertices.len() != ty.num_nodes() {
            return Err(MeshExportError::ElementArity {
                entity,
                element_type: ty,
                index,
                expected: ty.num_nodes(),
                found: element.vertices.len(),
            });
        }
        for &v in &element.vertices {
            self.check_vertex(entity, v)?;
        }
        Ok(())
    }
}

impl PartitionedMeshSource for PartitionedModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_partitions(&self) -> u32 {
        self.num_partitions
    }

    fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    fn vertex(&self, id: VertexId) -> Option<&MeshVertex> {
        self.vertices.get(id.index())
    }
}
