//! Multi-zone output sinks.
//!
//! The exporter talks to the output format only through [`ZoneSink`], whose
//! methods mirror the low-level write primitives of the format: base, zone,
//! grid, coordinate array, element section, point-list connectivity and
//! periodic transform. Any primitive may fail; the exporter aborts on the
//! first failure.

pub mod ascii;
pub mod memory;

pub use ascii::AsciiSink;
pub use memory::{MemorySink, MultiZoneDocument};

use crate::topology::periodic::PeriodicTransform;
use crate::zone::element_map::OutputElementType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a write primitive.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The sink refused the write.
    #[error("write rejected: {0}")]
    Rejected(String),
    #[error("unknown zone index {0}")]
    UnknownZone(u32),
    #[error("unknown connectivity {connection} in zone {zone}")]
    UnknownConnection { zone: u32, connection: u32 },
}

/// 1-based position of a zone in the file.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ZoneIndex(pub u32);

/// 1-based position of a connectivity record within its zone.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ConnectionIndex(pub u32);

/// Declared zone size: vertices, cells, boundary vertices.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSize {
    pub vertices: u64,
    pub cells: u64,
    pub boundary_vertices: u64,
}

/// An element section as handed to a sink.
#[derive(Clone, Copy, Debug)]
pub struct SectionData<'a> {
    pub name: &'a str,
    pub element_type: OutputElementType,
    pub start: u64,
    pub end: u64,
    /// 1-based local vertex indices.
    pub connectivity: &'a [u64],
}

/// A vertex-to-vertex connectivity record stored in the donor zone.
#[derive(Clone, Copy, Debug)]
pub struct PointListConnection<'a> {
    pub name: &'a str,
    /// Local indices in the zone holding the record.
    pub points: &'a [u64],
    pub receiver_zone: &'a str,
    /// Matching local indices in the receiver zone.
    pub receiver_points: &'a [u64],
}

/// Write primitives of the multi-zone format.
pub trait ZoneSink {
    fn write_base(&mut self, name: &str, cell_dim: u8, phys_dim: u8) -> Result<(), SinkError>;

    /// Create a zone and return its index.
    fn write_zone(&mut self, name: &str, size: ZoneSize) -> Result<ZoneIndex, SinkError>;

    fn write_grid(&mut self, zone: ZoneIndex, name: &str) -> Result<(), SinkError>;

    fn write_coordinates(
        &mut self,
        zone: ZoneIndex,
        name: &str,
        values: &[f64],
    ) -> Result<(), SinkError>;

    fn write_section(&mut self, zone: ZoneIndex, section: &SectionData<'_>)
    -> Result<(), SinkError>;

    /// Store a connectivity record in `zone` and return its index.
    fn write_connectivity(
        &mut self,
        zone: ZoneIndex,
        connection: &PointListConnection<'_>,
    ) -> Result<ConnectionIndex, SinkError>;

    /// Attach a periodic transform to an existing connectivity record.
    fn write_periodic(
        &mut self,
        zone: ZoneIndex,
        connection: ConnectionIndex,
        transform: &PeriodicTransform,
    ) -> Result<(), SinkError>;
}

impl<K: ZoneSink + ?Sized> ZoneSink for &mut K {
    fn write_base(&mut self, name: &str, cell_dim: u8, phys_dim: u8) -> Result<(), SinkError> {
        (**self).write_base(name, cell_dim, phys_dim)
    }

    fn write_zone(&mut self, name: &str, size: ZoneSize) -> Result<ZoneIndex, SinkError> {
        (**self).write_zone(name, size)
    }

    fn write_grid(&mut self, zone: ZoneIndex, name: &str) -> Result<(), SinkError> {
        (**self).write_grid(zone, name)
    }

    fn write_coordinates(
        &mut self,
        zone: ZoneIndex,
        name: &str,
        values: &[f64],
    ) -> Result<(), SinkError> {
        (**self).write_coordinates(zone, name, values)
    }

    fn write_section(
        &mut self,
        zone: ZoneIndex,
        section: &SectionData<'_>,
    ) -> Result<(), SinkError> {
        (**self).write_section(zone, section)
    }

    fn write_connectivity(
        &mut self,
        zone: ZoneIndex,
        connection: &PointListConnection<'_>,
    ) -> Result<ConnectionIndex, SinkError> {
        (**self).write_connectivity(zone, connection)
    }

    fn write_periodic(
        &mut self,
        zone: ZoneIndex,
        connection: ConnectionIndex,
        transform: &PeriodicTransform,
    ) -> Result<(), SinkError> {
        (**self).write_periodic(zone, connection, transform)
    }
}
