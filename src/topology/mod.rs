//! Input data model of the exporter.
//!
//! This module provides the records a partitioned mesh is made of:
//! - Vertex handles, global numbering and coordinates
//! - Element types and elements
//! - Geometric entities with partition and periodic metadata
//!
//! Records reference one another through stable integer ids
//! ([`VertexId`], [`EntityId`]) owned by an arena; see [`crate::model`].

pub mod element;
pub mod entity;
pub mod periodic;
pub mod vertex;

pub use element::{Element, ElementType};
pub use entity::{Entity, EntityId};
pub use periodic::{PeriodicLink, PeriodicTransform};
pub use vertex::{GlobalIndex, MeshVertex, VertexId};
