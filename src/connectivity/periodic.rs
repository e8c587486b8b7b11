//! Periodic connectivity between slave and master boundaries.
//!
//! A correspondence `s -> m` connects every occurrence of `s` with every
//! occurrence of `m`: a vertex on a junction between partitions lives in
//! several zones, and each of them must be tied to each zone holding its
//! periodic image.

use crate::connectivity::{ConnectionNames, ConnectivityRecord};
use crate::io::{PointListConnection, ZoneSink};
use crate::mesh_error::MeshExportError;
use crate::model::PartitionedMeshSource;
use crate::progress::ProgressSink;
use crate::registry::{NodeRegistry, global_index_of};
use crate::topology::entity::{Entity, EntityId};
use crate::topology::periodic::PeriodicTransform;
use crate::zone::ZoneDirectory;
use crate::zone::naming::periodic_connection_name;
use itertools::Itertools;
use std::collections::BTreeMap;

/// Ordered zone pair plus ordered entity pair of a periodic record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeriodicKey {
    pub donor_partition: u32,
    pub receiver_partition: u32,
    pub donor_entity: EntityId,
    pub receiver_entity: EntityId,
}

impl PeriodicKey {
    pub fn new(
        (donor_partition, receiver_partition): (u32, u32),
        (donor_entity, receiver_entity): (EntityId, EntityId),
    ) -> Self {
        Self {
            donor_partition,
            receiver_partition,
            donor_entity,
            receiver_entity,
        }
    }

    /// Key of the mirrored record.
    pub fn mirrored(self) -> Self {
        Self {
            donor_partition: self.receiver_partition,
            receiver_partition: self.donor_partition,
            donor_entity: self.receiver_entity,
            receiver_entity: self.donor_entity,
        }
    }
}

/// Periodic records of a whole mesh, ordered by key.
#[derive(Clone, Debug, Default)]
pub struct PeriodicConnectivity {
    records: BTreeMap<PeriodicKey, ConnectivityRecord>,
    transform: PeriodicTransform,
}

impl PeriodicConnectivity {
    /// Build the records of every slave in `slaves` from the filled registry.
    ///
    /// Correspondence pairs are visited in ascending global index of the
    /// slave vertex.
    pub fn build<S, P>(
        source: &S,
        slaves: &[&Entity],
        registry: &NodeRegistry,
        progress: &mut P,
    ) -> Result<Self, MeshExportError>
    where
        S: PartitionedMeshSource + ?Sized,
        P: ProgressSink + ?Sized,
    {
        let mut out = Self::default();
        for (step, slave) in slaves.iter().enumerate() {
            progress.report("periodic connectivity", step + 1, slaves.len());
            let Some(link) = &slave.periodic else {
                continue;
            };
            let master = link.master();
            let mut pairs = Vec::with_capacity(link.len());
            for (s, m) in link.pairs() {
                pairs.push((
                    global_index_of(source, slave.id, s)?,
                    global_index_of(source, slave.id, m)?,
                ));
            }
            pairs.sort_unstable();

            for (gs, gm) in pairs {
                let slave_occ = registry.occurrences(gs);
                let master_occ = registry.occurrences(gm);
                for (os, om) in slave_occ.iter().cartesian_product(master_occ) {
                    out.records
                        .entry(PeriodicKey::new(
                            (os.partition, om.partition),
                            (slave.id, master),
                        ))
                        .or_default()
                        .push(os.local, om.local);
                    out.records
                        .entry(PeriodicKey::new(
                            (om.partition, os.partition),
                            (master, slave.id),
                        ))
                        .or_default()
                        .push(om.local, os.local);
                }
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

    pub fn get(&self, key: &PeriodicKey) -> Option<&ConnectivityRecord> {
        self.records.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PeriodicKey, &ConnectivityRecord)> + '_ {
        self.records.iter()
    }

    /// Transform attached to every record.
    pub fn transform(&self) -> &PeriodicTransform {
        &self.transform
    }

    /// Write one connectivity record per key, in the donor partition's zone,
    /// followed by its periodic transform. Returns the number of records.
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
        for (step, (key, record)) in self.records.iter().enumerate() {
            progress.report("periodic records", step + 1, total);
            let zone = directory.index(key.donor_partition)?;
            let receiver_zone = directory.name(key.receiver_partition)?;
            let name = names.claim(
                zone,
                &periodic_connection_name(
                    key.donor_partition,
                    key.donor_entity,
                    key.receiver_partition,
                    key.receiver_entity,
                ),
            );
            let connection = PointListConnection {
                name: &name,
                points: &record.donor,
                receiver_zone,
                receiver_points: &record.receiver,
            };
            let index = sink
                .write_connectivity(zone, &connection)
                .map_err(|e| MeshExportError::sink(format!("periodic connectivity {name}"), e))?;
            sink.write_periodic(zone, index, &self.transform)
                .map_err(|e| MeshExportError::sink(format!("periodic transform of {name}"), e))?;
        }
        Ok(total)
    }
}
