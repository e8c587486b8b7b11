//! Entity classification: periodic slaves, partition interfaces and
//! per-partition ownership.
//!
//! Pure filters over the metadata of a [`PartitionedMeshSource`].

use crate::mesh_error::MeshExportError;
use crate::model::PartitionedMeshSource;
use crate::topology::entity::Entity;
use std::collections::BTreeMap;

/// Entities grouped by the role they play during export.
#[derive(Debug)]
pub struct Classification<'a> {
    /// Periodic slaves, in entity order.
    pub periodic: Vec<&'a Entity>,
    /// Partition-interface copies, in entity order.
    pub interfaces: Vec<&'a Entity>,
    /// Entities owned by each partition, interface copies excluded.
    ///
    /// Holds one entry per partition `1..=N`, or the single entry `0` for an
    /// unpartitioned mesh.
    pub partitions: BTreeMap<u32, Vec<&'a Entity>>,
}

impl<'a> Classification<'a> {
    /// Classify every entity of `source` for a mesh with `num_partitions` partitions.
    pub fn new<S>(source: &'a S, num_partitions: u32) -> Result<Self, MeshExportError>
    where
        S: PartitionedMeshSource + ?Sized,
    {
        let entities: Vec<&'a Entity> = source.entities().collect();
        let periodic = periodic_entities(&entities);
        for slave in &periodic {
            if let Some(link) = &slave.periodic {
                if source.entity(link.master()).is_none() {
                    return Err(MeshExportError::MissingPeriodicMaster {
                        slave: slave.id,
                        master: link.master(),
                    });
                }
            }
        }
        Ok(Self {
            periodic,
            interfaces: partition_interface_entities(&entities),
            partitions: entities_in_partitions(&entities, num_partitions)?,
        })
    }
}

/// Entities whose mesh master is another entity.
pub fn periodic_entities<'a>(entities: &[&'a Entity]) -> Vec<&'a Entity> {
    entities
        .iter()
        .copied()
        .filter(|e| e.is_periodic_slave())
        .collect()
}

/// Partition entities whose parent has a different dimension.
pub fn partition_interface_entities<'a>(entities: &[&'a Entity]) -> Vec<&'a Entity> {
    entities
        .iter()
        .copied()
        .filter(|e| e.is_interface_copy())
        .collect()
}

/// Entities owned by each partition, except partition interfaces.
///
/// With `num_partitions == 0` every non-interface entity lands in partition
/// `0`. Otherwise only partition entities (those with a parent) are listed,
/// once per partition in their membership set; other entities are ignored.
pub fn entities_in_partitions<'a>(
    entities: &[&'a Entity],
    num_partitions: u32,
) -> Result<BTreeMap<u32, Vec<&'a Entity>>, MeshExportError> {
    let mut parts: BTreeMap<u32, Vec<&'a Entity>> = BTreeMap::new();
    if num_partitions == 0 {
        parts.insert(
            0,
            entities
                .iter()
                .copied()
                .filter(|e| !e.is_interface_copy())
                .collect(),
        );
        return Ok(parts);
    }
    for p in 1..=num_partitions {
        parts.insert(p, Vec::new());
    }
    for &e in entities {
        if e.parent.is_none() || e.is_interface_copy() {
            continue;
        }
        for &p in &e.partitions {
            let owned = parts
                .get_mut(&p)
                .ok_or(MeshExportError::PartitionOutOfRange {
                    entity: e.id,
                    partition: p,
                    num_partitions,
                })?;
            owned.push(e);
        }
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::entity::EntityId;
    use crate::topology::periodic::PeriodicLink;

    fn partition_entity(dim: u8, tag: i32, parent_dim: u8, parts: &[u32]) -> Entity {
        Entity::new(EntityId::new(dim, tag))
            .with_parent(EntityId::new(parent_dim, 100 + tag))
            .with_partitions(parts.iter().copied())
    }

    #[test]
    fn splits_owned_entities_from_interfaces() {
        let a = partition_entity(2, 1, 2, &[1]);
        let b = partition_entity(2, 2, 2, &[2]);
        let iface = partition_entity(1, 3, 2, &[1, 2]);
        let model_only = Entity::new(EntityId::new(2, 9));
        let all = vec![&a, &b, &iface, &model_only];

        let ifaces = partition_interface_entities(&all);
        assert_eq!(ifaces.len(), 1);
        assert_eq!(ifaces[0].id, iface.id);

        let parts = entities_in_partitions(&all, 2).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[&1].iter().map(|e| e.id).collect::<Vec<_>>(), vec![a.id]);
        assert_eq!(parts[&2].iter().map(|e| e.id).collect::<Vec<_>>(), vec![b.id]);
    }

    #[test]
    fn shared_entity_is_listed_in_each_partition() {
        let shared = partition_entity(0, 1, 0, &[1, 3]);
        let parts = entities_in_partitions(&[&shared], 3).unwrap();
        assert_eq!(parts[&1].len(), 1);
        assert!(parts[&2].is_empty());
        assert_eq!(parts[&3].len(), 1);
    }

    #[test]
    fn unpartitioned_mesh_uses_partition_zero() {
        let a = Entity::new(EntityId::new(3, 1));
        let b = Entity::new(EntityId::new(2, 1));
        let parts = entities_in_partitions(&[&a, &b], 0).unwrap();
        assert_eq!(parts.keys().copied().collect::<Vec<_>>(), vec![0]);
        assert_eq!(parts[&0].len(), 2);
    }

    #[test]
    fn unpartitioned_mesh_still_drops_interface_copies() {
        let a = Entity::new(EntityId::new(2, 1));
        let iface = partition_entity(1, 3, 2, &[1, 2]);
        let parts = entities_in_partitions(&[&a, &iface], 0).unwrap();
        assert_eq!(parts[&0].iter().map(|e| e.id).collect::<Vec<_>>(), vec![a.id]);
    }

    #[test]
    fn out_of_range_partition_is_reported() {
        let e = partition_entity(2, 1, 2, &[4]);
        assert!(matches!(
            entities_in_partitions(&[&e], 2),
            Err(MeshExportError::PartitionOutOfRange { partition: 4, .. })
        ));
    }

    #[test]
    fn periodic_filter_ignores_self_masters() {
        let mut slave = Entity::new(EntityId::new(2, 2));
        slave.periodic = Some(PeriodicLink::new(EntityId::new(2, 1)));
        let mut own = Entity::new(EntityId::new(2, 3));
        own.periodic = Some(PeriodicLink::new(own.id));
        let per = periodic_entities(&[&slave, &own]);
        assert_eq!(per.len(), 1);
        assert_eq!(per[0].id, slave.id);
    }
}
