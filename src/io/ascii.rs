//! Line-oriented text rendering of a multi-zone file.
//!
//! Each primitive writes one header line followed by its values, wrapped at
//! 70 columns:
//!
//! ```text
//! BASE <name> <cell_dim> <phys_dim>
//! ZONE <index> <name> <vertices> <cells> <boundary_vertices>
//! GRID <zone> <name>
//! COORD <zone> <name> <count>
//! SECTION <zone> <name> <type> <start> <end>
//! CONN <zone> <index> <name> <receiver zone> <count>
//! PERIODIC <zone> <conn> <center> <angle> <translation>
//! ```

use crate::io::{
    ConnectionIndex, PointListConnection, SectionData, SinkError, ZoneIndex, ZoneSink, ZoneSize,
};
use crate::topology::periodic::PeriodicTransform;
use std::fmt::Display;
use std::io::Write;

const LINE_WIDTH: usize = 70;

/// Streams the text rendering to any writer.
pub struct AsciiSink<W: Write> {
    writer: W,
    /// Connectivity count of each zone written so far.
    connections: Vec<u32>,
}

impl<W: Write> AsciiSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            connections: Vec::new(),
        }
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W, SinkError> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn check_zone(&self, zone: ZoneIndex) -> Result<usize, SinkError> {
        let slot = (zone.0 as usize).wrapping_sub(1);
        if slot < self.connections.len() {
            Ok(slot)
        } else {
            Err(SinkError::UnknownZone(zone.0))
        }
    }

    fn write_values<T: Display>(&mut self, values: &[T]) -> Result<(), SinkError> {
        let mut line_len = 0usize;
        for value in values {
            let text = value.to_string();
            if line_len > 0 && line_len + text.len() + 1 > LINE_WIDTH {
                writeln!(self.writer)?;
                line_len = 0;
            }
            if line_len > 0 {
                write!(self.writer, " ")?;
                line_len += 1;
            }
            write!(self.writer, "{text}")?;
            line_len += text.len();
        }
        if line_len > 0 {
            writeln!(self.writer)?;
        }
        Ok(())
    }
}

impl<W: Write> ZoneSink for AsciiSink<W> {
    fn write_base(&mut self, name: &str, cell_dim: u8, phys_dim: u8) -> Result<(), SinkError> {
        writeln!(self.writer, "BASE {name} {cell_dim} {phys_dim}")?;
        Ok(())
    }

    fn write_zone(&mut self, name: &str, size: ZoneSize) -> Result<ZoneIndex, SinkError> {
        let index = self.connections.len() as u32 + 1;
        writeln!(
            self.writer,
            "ZONE {index} {name} {} {} {}",
            size.vertices, size.cells, size.boundary_vertices
        )?;
        self.connections.push(0);
        Ok(ZoneIndex(index))
    }

    fn write_grid(&mut self, zone: ZoneIndex, name: &str) -> Result<(), SinkError> {
        self.check_zone(zone)?;
        writeln!(self.writer, "GRID {} {name}", zone.0)?;
        Ok(())
    }

    fn write_coordinates(
        &mut self,
        zone: ZoneIndex,
        name: &str,
        values: &[f64],
    ) -> Result<(), SinkError> {
        self.check_zone(zone)?;
        writeln!(self.writer, "COORD {} {name} {}", zone.0, values.len())?;
        self.write_values(values)
    }

    fn write_section(
        &mut self,
        zone: ZoneIndex,
        section: &SectionData<'_>,
    ) -> Result<(), SinkError> {
        self.check_zone(zone)?;
        writeln!(
            self.writer,
            "SECTION {} {} {} {} {}",
            zone.0,
            section.name,
            section.element_type.name(),
            section.start,
            section.end
        )?;
        self.write_values(section.connectivity)
    }

    fn write_connectivity(
        &mut self,
        zone: ZoneIndex,
        connection: &PointListConnection<'_>,
    ) -> Result<ConnectionIndex, SinkError> {
        let slot = self.check_zone(zone)?;
        if connection.points.len() != connection.receiver_points.len() {
            return Err(SinkError::Rejected(format!(
                "connectivity {} has {} points but {} receiver points",
                connection.name,
                connection.points.len(),
                connection.receiver_points.len()
            )));
        }
        self.connections[slot] += 1;
        let index = self.connections[slot];
        writeln!(
            self.writer,
            "CONN {} {index} {} {} {}",
            zone.0,
            connection.name,
            connection.receiver_zone,
            connection.points.len()
        )?;
        self.write_values(connection.points)?;
        self.write_values(connection.receiver_points)?;
        Ok(ConnectionIndex(index))
    }

    fn write_periodic(
        &mut self,
        zone: ZoneIndex,
        connection: ConnectionIndex,
        transform: &PeriodicTransform,
    ) -> Result<(), SinkError> {
        let slot = self.check_zone(zone)?;
        if connection.0 == 0 || connection.0 > self.connections[slot] {
            return Err(SinkError::UnknownConnection {
                zone: zone.0,
                connection: connection.0,
            });
        }
        let [cx, cy, cz] = transform.rotation_center;
        let [ax, ay, az] = transform.rotation_angle;
        let [tx, ty, tz] = transform.translation;
        writeln!(
            self.writer,
            "PERIODIC {} {} {cx} {cy} {cz} {ax} {ay} {az} {tx} {ty} {tz}",
            zone.0, connection.0
        )?;
        Ok(())
    }
}
