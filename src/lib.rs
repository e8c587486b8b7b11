#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-multizone
//!
//! mesh-multizone exports an already-partitioned finite-element mesh as a
//! multi-zone interchange file (CGNS-like): one zone per partition, each
//! with its own dense 1-based vertex numbering, coordinate arrays and
//! element sections, plus point-list connectivity records that stitch the
//! zones back together across partition interfaces and periodic boundaries.
//!
//! ## Features
//! - Arena-backed input model ([`model::PartitionedModel`]) behind the
//!   [`model::PartitionedMeshSource`] capability trait
//! - Deterministic output: registry and records are ordered by global vertex
//!   index and partition, never by memory address
//! - Pluggable sinks ([`io::ZoneSink`]): an in-memory serde document and a
//!   line-oriented text writer
//! - Optional `rayon` feature building zone layouts in parallel
//!
//! ## Usage
//! ```rust
//! use mesh_multizone::prelude::*;
//!
//! let mut mesh = PartitionedModel::new("box", 1);
//! let a = mesh.add_vertex(1, [0.0, 0.0, 0.0]).unwrap();
//! let b = mesh.add_vertex(2, [1.0, 0.0, 0.0]).unwrap();
//! mesh.add_entity(
//!     Entity::new(EntityId::new(1, 1))
//!         .with_parent(EntityId::new(1, 1))
//!         .with_partitions([1])
//!         .with_physicals([1])
//!         .with_element(ElementType::Line2, vec![a, b]),
//! )
//! .unwrap();
//!
//! let mut sink = MemorySink::new();
//! let options = ExportOptions { mesh_dim: 1, ..Default::default() };
//! let summary = export_partitioned_mesh(&mesh, &options, &mut sink, &mut NoProgress).unwrap();
//! assert_eq!(summary.zones[0].name, "box_Part1");
//! ```
//!
//! No logger is installed; output goes through the `log` facade.

pub mod classify;
pub mod config;
pub mod connectivity;
pub mod export;
pub mod io;
pub mod mesh_error;
pub mod model;
pub mod progress;
pub mod registry;
pub mod topology;
pub mod zone;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::classify::Classification;
    pub use crate::config::ExportOptions;
    pub use crate::connectivity::{ConnectivityRecord, InterfaceConnectivity, PeriodicConnectivity};
    pub use crate::export::{ExportSummary, ZoneSummary, export_partitioned_mesh};
    pub use crate::io::{AsciiSink, MemorySink, MultiZoneDocument, SinkError, ZoneSink};
    pub use crate::mesh_error::MeshExportError;
    pub use crate::model::{PartitionedMeshSource, PartitionedModel};
    pub use crate::progress::{LogProgress, NoProgress, ProgressSink};
    pub use crate::registry::{NodeRegistry, Occurrence};
    pub use crate::topology::{
        Element, ElementType, Entity, EntityId, GlobalIndex, MeshVertex, PeriodicLink,
        PeriodicTransform, VertexId,
    };
    pub use crate::zone::{ZoneDirectory, ZoneLayout};
}
