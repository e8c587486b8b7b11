//! Top-level multi-zone export of a partitioned mesh.
//!
//! Phases run strictly in order: classify entities, seed the registry,
//! write every zone, then build and write periodic and interface
//! connectivity. The connectivity builders only run once all zones exist,
//! because they need every local index recorded in the registry.

use crate::classify::Classification;
use crate::config::ExportOptions;
use crate::connectivity::{ConnectionNames, InterfaceConnectivity, PeriodicConnectivity};
use crate::io::{ZoneIndex, ZoneSink};
use crate::mesh_error::MeshExportError;
use crate::model::PartitionedMeshSource;
use crate::progress::ProgressSink;
use crate::registry::NodeRegistry;
use crate::topology::entity::Entity;
use crate::zone::naming::truncate_name;
use crate::zone::{ZoneDirectory, ZoneLayout, write_zone};
use std::collections::BTreeMap;

/// Physical dimension of every exported base.
pub const PHYSICAL_DIM: u8 = 3;

/// Sources that can be shared across the layout workers.
#[cfg(feature = "rayon")]
pub trait MaybeSync: Sync {}
#[cfg(feature = "rayon")]
impl<T: Sync + ?Sized> MaybeSync for T {}

/// Sources that can be shared across the layout workers.
#[cfg(not(feature = "rayon"))]
pub trait MaybeSync {}
#[cfg(not(feature = "rayon"))]
impl<T: ?Sized> MaybeSync for T {}

/// What one zone received.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ZoneSummary {
    pub partition: u32,
    pub index: ZoneIndex,
    pub name: String,
    pub nodes: u64,
    pub elements: u64,
    pub cells: u64,
}

/// Outcome of a successful export.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExportSummary {
    pub zones: Vec<ZoneSummary>,
    pub periodic_records: usize,
    pub interface_records: usize,
    /// Registry entries that no zone instantiated.
    pub unresolved_vertices: usize,
}

impl ExportSummary {
    pub fn zone(&self, name: &str) -> Option<&ZoneSummary> {
        self.zones.iter().find(|z| z.name == name)
    }

    pub fn total_nodes(&self) -> u64 {
        self.zones.iter().map(|z| z.nodes).sum()
    }
}

/// Export `source` as one zone per partition plus connectivity records.
///
/// The first failing write aborts the export; whatever the sink received
/// until then must be discarded by the caller.
pub fn export_partitioned_mesh<S, K, P>(
    source: &S,
    options: &ExportOptions,
    sink: &mut K,
    progress: &mut P,
) -> Result<ExportSummary, MeshExportError>
where
    S: PartitionedMeshSource + MaybeSync + ?Sized,
    K: ZoneSink + ?Sized,
    P: ProgressSink + ?Sized,
{
    options.validate()?;
    let num_partitions = options
        .num_partitions
        .unwrap_or_else(|| source.num_partitions());

    let classes = Classification::new(source, num_partitions)?;
    log::info!(
        "exporting {} as {} zone(s): {} periodic entities, {} interface entities",
        source.name(),
        classes.partitions.len(),
        classes.periodic.len(),
        classes.interfaces.len()
    );
    let mut registry = NodeRegistry::seed(source, &classes)?;

    let base = truncate_name(source.name(), options.name_limit);
    sink.write_base(&base, options.mesh_dim, PHYSICAL_DIM)
        .map_err(|e| MeshExportError::sink(format!("base {base}"), e))?;

    let layouts = build_layouts(source, &classes.partitions, options)?;
    let mut directory = ZoneDirectory::new();
    let mut summary = ExportSummary::default();
    for layout in &layouts {
        let index = write_zone(sink, layout, &mut registry, &mut directory)?;
        summary.zones.push(ZoneSummary {
            partition: layout.partition,
            index,
            name: layout.name.clone(),
            nodes: layout.num_nodes(),
            elements: layout.num_elements(),
            cells: layout.num_cells,
        });
    }
    log::info!("wrote {} zone(s)", summary.zones.len());

    summary.unresolved_vertices = registry.unresolved().count();
    if options.check_registry_complete && summary.unresolved_vertices > 0 {
        let sample: Vec<_> = registry.unresolved().take(8).collect();
        log::warn!(
            "{} periodic/interface vertices were not instantiated in any zone, e.g. {sample:?}",
            summary.unresolved_vertices
        );
    }

    let mut names = ConnectionNames::new(options.name_limit);
    let periodic = PeriodicConnectivity::build(source, &classes.periodic, &registry, progress)?;
    log::info!(
        "writing {} periodic connectivity record(s)",
        periodic.len()
    );
    summary.periodic_records = periodic.write(sink, &directory, &mut names, progress)?;

    let interfaces =
        InterfaceConnectivity::build(source, &classes.interfaces, &registry, progress)?;
    log::info!(
        "writing {} interface connectivity record(s)",
        interfaces.len()
    );
    summary.interface_records = interfaces.write(sink, &directory, &mut names, progress)?;

    Ok(summary)
}

/// Layouts of every partition, in partition order.
#[cfg(not(feature = "rayon"))]
fn build_layouts<S>(
    source: &S,
    partitions: &BTreeMap<u32, Vec<&Entity>>,
    options: &ExportOptions,
) -> Result<Vec<ZoneLayout>, MeshExportError>
where
    S: PartitionedMeshSource + MaybeSync + ?Sized,
{
    partitions
        .iter()
        .map(|(&p, entities)| ZoneLayout::build(source, p, entities, options))
        .collect()
}

/// Layouts of every partition, in partition order, built in parallel.
#[cfg(feature = "rayon")]
fn build_layouts<S>(
    source: &S,
    partitions: &BTreeMap<u32, Vec<&Entity>>,
    options: &ExportOptions,
) -> Result<Vec<ZoneLayout>, MeshExportError>
where
    S: PartitionedMeshSource + MaybeSync + ?Sized,
{
    use rayon::prelude::*;
    let work: Vec<(u32, &[&Entity])> = partitions
        .iter()
        .map(|(&p, entities)| (p, entities.as_slice()))
        .collect();
    work.par_iter()
        .map(|&(p, entities)| ZoneLayout::build(source, p, entities, options))
        .collect()
}
