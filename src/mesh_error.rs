//! MeshExportError: Unified error type for mesh-multizone public APIs
//!
//! Every fallible operation of the crate returns this type. Variants carry
//! enough context (zone, entity, element index) to locate the failure
//! without re-running the export.

use crate::io::SinkError;
use crate::topology::entity::EntityId;
use crate::topology::vertex::{GlobalIndex, VertexId};
use thiserror::Error;

/// Unified error type for mesh-multizone operations.
#[derive(Debug, Error)]
pub enum MeshExportError {
    /// Export options are out of range.
    #[error("Invalid export options: {0}")]
    InvalidOptions(String),
    /// Two vertices claim the same global index.
    #[error("Global index {0} is assigned to more than one vertex")]
    DuplicateGlobalIndex(GlobalIndex),
    /// An element or correspondence refers to a vertex absent from the arena.
    #[error("Vertex {vertex:?} referenced by entity {entity} does not exist")]
    UnknownVertex { entity: EntityId, vertex: VertexId },
    /// An entity id was registered twice.
    #[error("Entity {0} is already present in the model")]
    DuplicateEntity(EntityId),
    /// An entity id is not present in the model.
    #[error("Entity {0} is not present in the model")]
    UnknownEntity(EntityId),
    /// Element node count does not match its declared type.
    #[error(
        "Element {index} of entity {entity} has {found} nodes, {element_type:?} needs {expected}"
    )]
    ElementArity {
        entity: EntityId,
        element_type: crate::topology::element::ElementType,
        index: usize,
        expected: usize,
        found: usize,
    },
    /// A slave vertex was mapped to two different master vertices.
    #[error(
        "Periodic conflict on {entity}: slave {slave:?} maps to both {existing:?} and {new:?}"
    )]
    PeriodicMappingConflict {
        entity: EntityId,
        slave: VertexId,
        existing: VertexId,
        new: VertexId,
    },
    /// A periodic slave names a master entity that the source does not expose.
    #[error("Periodic slave {slave} refers to missing master entity {master}")]
    MissingPeriodicMaster { slave: EntityId, master: EntityId },
    /// An entity lists a partition outside `1..=num_partitions`.
    #[error("Entity {entity} belongs to partition {partition}, but only {num_partitions} exist")]
    PartitionOutOfRange {
        entity: EntityId,
        partition: u32,
        num_partitions: u32,
    },
    /// A connectivity record refers to a partition for which no zone was written.
    #[error("No zone was written for partition {0}")]
    MissingZone(u32),
    /// Two zones resolved to the same name.
    #[error("Zone name `{0}` is not unique")]
    DuplicateZoneName(String),
    /// A low-level write primitive failed.
    #[error("Writing {context} failed: {source}")]
    Sink {
        context: String,
        #[source]
        source: SinkError,
    },
}

impl MeshExportError {
    /// Wrap a sink failure with a description of the write being performed.
    pub fn sink(context: impl Into<String>, source: SinkError) -> Self {
        MeshExportError::Sink {
            context: context.into(),
            source,
        }
    }
}

static_assertions::assert_impl_all!(MeshExportError: Send, Sync);
