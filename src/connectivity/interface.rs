//! Partition-interface connectivity.
//!
//! Every primary vertex of an interface copy that was instantiated in
//! several zones is connected from each of its occurrences to each other
//! one. Edges are aggregated by ordered partition pair.

use crate::connectivity::{ConnectionNames, ConnectivityRecord};
use crate::io::{PointListConnection, ZoneSink};
use crate::mesh_error::MeshExportError;
use crate::model::PartitionedMeshSource;
use crate::progress::ProgressSink;
use crate::registry::NodeRegistry;
use crate::topology::entity::Entity;
use crate::zone::ZoneDirectory;
use crate::zone::layout::{NodeSelection, nodes_in_entities};
use crate::zone::naming::interface_connection_name;
use itertools::Itertools;
use std::collections::BTreeMap;

/// Interface records keyed by `(donor partition, receiver partition)`.
#[derive(Clone, Debug, Default)]
pub struct InterfaceConnectivity {
    records: BTreeMap<(u32, u32), ConnectivityRecord>,
}

impl InterfaceConnectivity {
    /// Build the records of all `interfaces` from the filled registry.
    ///
    /// Vertices are visited in ascending global index; physical tags are
    /// ignored so untagged interfaces are still connected.
    pub fn build<S, P>(
        source: &S,
        interfaces: &[&Entity],
        registry: &NodeRegistry,
        progress: &mut P,
    ) -> Result<Self, MeshExportError>
    where
        S: PartitionedMeshSource + ?Sized,
        P: ProgressSink + ?Sized,
    {
        let vertices = nodes_in_entities(source, interfaces, NodeSelection::Primary, true)?;
        let total = vertices.len();
        let mut out = Self::default();
        for (step, global) in vertices.into_keys().enumerate() {
            progress.report("interface connectivity", step + 1, total);
            for pair in registry.occurrences(global).iter().permutations(2) {
                let (a, b) = (pair[0], pair[1]);
                out.records
                    .entry((a.partition, b.partition))
                    .or_default()
                    .push(a.local, b.local);
            }
        }
        Ok(out)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, donor: u32, receiver: u32) -> Option<&ConnectivityRecord> {
        self.records.get(&(donor, receiver))
    }

    pub fn iter(&self) -> impl Iterator<Item = ((u32, u32), &ConnectivityRecord)> + '_ {
        self.records.iter().map(|(k, r)| (*k, r))
    }

    /// Write one connectivity record per partition pair, in the donor
    /// partition's zone. Returns the number of records.
    pub fn write<K, P>(
        &self,
        sink: &mut K,
        directory: &ZoneDirectory,
        names: &mut ConnectionNames,
        progress: &mut P,
    ) -> Result<usize, MeshExportError>
    where
        K: ZoneSink + ?Sized,
        P: ProgressSink + ?Sized,
    {
        let total = self.records.len();
        for (step, (&(donor, receiver), record)) in self.records.iter().enumerate() {
            progress.report("interface records", step + 1, total);
            let zone = directory.index(donor)?;
            let name = names.claim(zone, &interface_connection_name(donor, receiver));
            let connection = PointListConnection {
                name: &name,
                points: &record.donor,
                receiver_zone: directory.name(receiver)?,
                receiver_points: &record.receiver,
            };
            sink.write_connectivity(zone, &connection)
                .map_err(|e| MeshExportError::sink(format!("interface connectivity {name}"), e))?;
        }
        Ok(total)
    }
}
