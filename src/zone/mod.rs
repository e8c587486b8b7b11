//! Zone writing: one zone per partition.
//!
//! [`layout::ZoneLayout`] computes what goes into a zone; [`write_zone`]
//! records the zone's shared vertices in the [`NodeRegistry`] and emits the
//! layout through a [`ZoneSink`]. [`ZoneDirectory`] remembers which zone
//! index and name each partition received, for the connectivity builders.

pub mod element_map;
pub mod layout;
pub mod naming;

pub use layout::{SectionLayout, ZoneLayout};

use crate::io::{SectionData, ZoneIndex, ZoneSink, ZoneSize};
use crate::mesh_error::MeshExportError;
use crate::registry::NodeRegistry;
use hashbrown::HashSet;
use std::collections::BTreeMap;

/// Name of the single grid of each zone.
pub const GRID_NAME: &str = "GridCoordinates";
/// Names of the three coordinate arrays.
pub const COORDINATE_NAMES: [&str; 3] = ["CoordinateX", "CoordinateY", "CoordinateZ"];

#[derive(Clone, Debug, PartialEq, Eq)]
struct ZoneEntry {
    index: ZoneIndex,
    name: String,
}

/// Partition → written zone.
#[derive(Clone, Debug, Default)]
pub struct ZoneDirectory {
    zones: BTreeMap<u32, ZoneEntry>,
    names: HashSet<String>,
}

impl ZoneDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the zone written for `partition`.
    pub fn insert(
        &mut self,
        partition: u32,
        index: ZoneIndex,
        name: &str,
    ) -> Result<(), MeshExportError> {
        if !self.names.insert(name.to_string()) {
            return Err(MeshExportError::DuplicateZoneName(name.to_string()));
        }
        self.zones.insert(
            partition,
            ZoneEntry {
                index,
                name: name.to_string(),
            },
        );
        Ok(())
    }

    /// Zone index of `partition`.
    pub fn index(&self, partition: u32) -> Result<ZoneIndex, MeshExportError> {
        self.zones
            .get(&partition)
            .map(|z| z.index)
            .ok_or(MeshExportError::MissingZone(partition))
    }

    /// Zone name of `partition`.
    pub fn name(&self, partition: u32) -> Result<&str, MeshExportError> {
        self.zones
            .get(&partition)
            .map(|z| z.name.as_str())
            .ok_or(MeshExportError::MissingZone(partition))
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// `(partition, zone index, zone name)` in partition order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, ZoneIndex, &str)> + '_ {
        self.zones
            .iter()
            .map(|(p, z)| (*p, z.index, z.name.as_str()))
    }
}

/// Record the zone's tracked vertices, then write the zone, its grid,
/// coordinates and element sections.
///
/// Recording happens first so that the registry reflects the zone even when
/// a later write fails.
pub fn write_zone<K>(
    sink: &mut K,
    layout: &ZoneLayout,
    registry: &mut NodeRegistry,
    directory: &mut ZoneDirectory,
) -> Result<ZoneIndex, MeshExportError>
where
    K: ZoneSink + ?Sized,
{
    let mut recorded = 0usize;
    for (position, &global) in layout.nodes.iter().enumerate() {
        if registry.record(global, layout.partition, position as u64 + 1) {
            recorded += 1;
        }
    }

    let zone_ctx = || format!("zone {} (partition {})", layout.name, layout.partition);
    let size = ZoneSize {
        vertices: layout.num_nodes(),
        cells: layout.num_cells,
        boundary_vertices: 0,
    };
    let zone = sink
        .write_zone(&layout.name, size)
        .map_err(|e| MeshExportError::sink(zone_ctx(), e))?;
    directory.insert(layout.partition, zone, &layout.name)?;

    sink.write_grid(zone, GRID_NAME)
        .map_err(|e| MeshExportError::sink(format!("grid of {}", zone_ctx()), e))?;
    for (name, values) in COORDINATE_NAMES.iter().zip(&layout.coordinates) {
        sink.write_coordinates(zone, name, values)
            .map_err(|e| MeshExportError::sink(format!("{name} of {}", zone_ctx()), e))?;
    }

    for section in &layout.sections {
        let data = SectionData {
            name: &section.name,
            element_type: section.output_type,
            start: section.start,
            end: section.end,
            connectivity: &section.connectivity,
        };
        sink.write_section(zone, &data).map_err(|e| {
            MeshExportError::sink(
                format!(
                    "section {} (entity {}) of {}",
                    section.name,
                    section.entity,
                    zone_ctx()
                ),
                e,
            )
        })?;
    }

    log::debug!(
        "wrote zone {} as #{}: {} nodes ({recorded} shared), {} elements",
        layout.name,
        zone.0,
        layout.num_nodes(),
        layout.num_elements()
    );
    Ok(zone)
}
