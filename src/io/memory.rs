//! In-memory sink producing an inspectable, serializable document.

use crate::io::{
    ConnectionIndex, PointListConnection, SectionData, SinkError, ZoneIndex, ZoneSink, ZoneSize,
};
use crate::topology::periodic::PeriodicTransform;
use crate::zone::element_map::OutputElementType;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Base node of the document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseRecord {
    pub name: String,
    pub cell_dim: u8,
    pub phys_dim: u8,
}

/// One named coordinate array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoordinateRecord {
    pub name: String,
    pub values: Vec<f64>,
}

/// One element section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub name: String,
    pub element_type: OutputElementType,
    pub start: u64,
    pub end: u64,
    pub connectivity: Vec<u64>,
}

/// One connectivity record, optionally periodic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub name: String,
    pub points: Vec<u64>,
    pub receiver_zone: String,
    pub receiver_points: Vec<u64>,
    pub periodic: Option<PeriodicTransform>,
}

/// One zone with its grid, sections and connectivity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub name: String,
    pub size: ZoneSize,
    pub grids: Vec<String>,
    pub coordinates: Vec<CoordinateRecord>,
    pub sections: Vec<SectionRecord>,
    pub connections: Vec<ConnectionRecord>,
}

impl ZoneRecord {
    /// Coordinate array by name.
    pub fn coordinate(&self, name: &str) -> Option<&[f64]> {
        self.coordinates
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Connectivity record by name.
    pub fn connection(&self, name: &str) -> Option<&ConnectionRecord> {
        self.connections.iter().find(|c| c.name == name)
    }
}

/// Whole multi-zone document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiZoneDocument {
    pub base: Option<BaseRecord>,
    pub zones: Vec<ZoneRecord>,
}

impl MultiZoneDocument {
    /// Zone by name.
    pub fn zone(&self, name: &str) -> Option<&ZoneRecord> {
        self.zones.iter().find(|z| z.name == name)
    }

    /// Zone by 1-based index.
    pub fn zone_at(&self, index: ZoneIndex) -> Option<&ZoneRecord> {
        (index.0 as usize)
            .checked_sub(1)
            .and_then(|i| self.zones.get(i))
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), SinkError> {
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| SinkError::Io(std::io::Error::other(e)))
    }
}

/// Sink that records every write into a [`MultiZoneDocument`].
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    document: MultiZoneDocument,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &MultiZoneDocument {
        &self.document
    }

    pub fn into_document(self) -> MultiZoneDocument {
        self.document
    }

    fn zone_mut(&mut self, zone: ZoneIndex) -> Result<&mut ZoneRecord, SinkError> {
        (zone.0 as usize)
            .checked_sub(1)
            .and_then(|i| self.document.zones.get_mut(i))
            .ok_or(SinkError::UnknownZone(zone.0))
    }
}

impl ZoneSink for MemorySink {
    fn write_base(&mut self, name: &str, cell_dim: u8, phys_dim: u8) -> Result<(), SinkError> {
        self.document.base = Some(BaseRecord {
            name: name.to_string(),
            cell_dim,
            phys_dim,
        });
        Ok(())
    }

    fn write_zone(&mut self, name: &str, size: ZoneSize) -> Result<ZoneIndex, SinkError> {
        self.document.zones.push(ZoneRecord {
            name: name.to_string(),
            size,
            ..Default::default()
        });
        Ok(ZoneIndex(self.document.zones.len() as u32))
    }

    fn write_grid(&mut self, zone: ZoneIndex, name: &str) -> Result<(), SinkError> {
        self.zone_mut(zone)?.grids.push(name.to_string());
        Ok(())
    }

    fn write_coordinates(
        &mut self,
        zone: ZoneIndex,
        name: &str,
        values: &[f64],
    ) -> Result<(), SinkError> {
        self.zone_mut(zone)?.coordinates.push(CoordinateRecord {
            name: name.to_string(),
            values: values.to_vec(),
        });
        Ok(())
    }

    fn write_section(
        &mut self,
        zone: ZoneIndex,
        section: &SectionData<'_>,
    ) -> Result<(), SinkError> {
        self.zone_mut(zone)?.sections.push(SectionRecord {
            name: section.name.to_string(),
            element_type: section.element_type,
            start: section.start,
            end: section.end,
            connectivity: section.connectivity.to_vec(),
        });
        Ok(())
    }

    fn write_connectivity(
        &mut self,
        zone: ZoneIndex,
        connection: &PointListConnection<'_>,
    ) -> Result<ConnectionIndex, SinkError> {
        let record = self.zone_mut(zone)?;
        record.connections.push(ConnectionRecord {
            name: connection.name.to_string(),
            points: connection.points.to_vec(),
            receiver_zone: connection.receiver_zone.to_string(),
            receiver_points: connection.receiver_points.to_vec(),
            periodic: None,
        });
        Ok(ConnectionIndex(record.connections.len() as u32))
    }

    fn write_periodic(
        &mut self,
        zone: ZoneIndex,
        connection: ConnectionIndex,
        transform: &PeriodicTransform,
    ) -> Result<(), SinkError> {
        let record = self.zone_mut(zone)?;
        let conn = (connection.0 as usize)
            .checked_sub(1)
            .and_then(|i| record.connections.get_mut(i))
            .ok_or(SinkError::UnknownConnection {
                zone: zone.0,
                connection: connection.0,
            })?;
        conn.periodic = Some(*transform);
        Ok(())
    }
}
