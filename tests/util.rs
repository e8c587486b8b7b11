#![allow(dead_code)]
use mesh_multizone::io::memory::{ConnectionRecord, ZoneRecord};
use mesh_multizone::prelude::*;

/// Entity used as parent of interface copies: a curve, so point copies
/// differ in dimension.
pub const INTERFACE_PARENT: EntityId = EntityId::new(1, 1000);
pub const PERIODIC_SLAVE: EntityId = EntityId::new(0, 9000);
pub const PERIODIC_MASTER: EntityId = EntityId::new(0, 9001);

/// A polyline of `parts.len()` segments. Vertex `i` has global index
/// `globals[i]` and x coordinate equal to that global index, so a local index
/// can be traced back through `CoordinateX`.
///
/// Segment `i` belongs to partition `parts[i]`. A point interface copy sits
/// on every vertex where the partition changes. With `periodic`, the last
/// vertex is a periodic slave of the first.
pub fn strip_model(name: &str, num_partitions: u32, parts: &[u32], globals: &[i64], periodic: bool) -> PartitionedModel {
    assert_eq!(globals.len(), parts.len() + 1);
    let mut m = PartitionedModel::new(name, num_partitions);
    let v: Vec<VertexId> = globals
        .iter()
        .map(|&g| m.add_vertex(g, [g as f64, 0.0, 0.0]).unwrap())
        .collect();
    for (i, &p) in parts.iter().enumerate() {
        let id = EntityId::new(1, i as i32 + 1);
        m.add_entity(
            Entity::new(id)
                .with_parent(id)
                .with_partitions([p])
                .with_element(ElementType::Line2, vec![v[i], v[i + 1]]),
        )
        .unwrap();
    }
    for i in 1..parts.len() {
        if parts[i - 1] != parts[i] {
            m.add_entity(
                Entity::new(EntityId::new(0, i as i32))
                    .with_parent(INTERFACE_PARENT)
                    .with_partitions([parts[i - 1], parts[i]])
                    .with_element(ElementType::Point, vec![v[i]]),
            )
            .unwrap();
        }
    }
    if periodic {
        let last = parts.len();
        m.add_entity(
            Entity::new(PERIODIC_SLAVE)
                .with_parent(PERIODIC_SLAVE)
                .with_partitions([parts[last - 1]])
                .with_element(ElementType::Point, vec![v[last]]),
        )
        .unwrap();
        m.add_entity(
            Entity::new(PERIODIC_MASTER)
                .with_parent(PERIODIC_MASTER)
                .with_partitions([parts[0]])
                .with_element(ElementType::Point, vec![v[0]]),
        )
        .unwrap();
        m.set_periodic(PERIODIC_SLAVE, PERIODIC_MASTER, [(v[last], v[0])])
            .unwrap();
    }
    m
}

pub fn line_options() -> ExportOptions {
    ExportOptions {
        save_all: true,
        mesh_dim: 1,
        ..Default::default()
    }
}

/// Export into a fresh memory sink.
pub fn export_document<S: PartitionedMeshSource + Sync>(
    source: &S,
    options: &ExportOptions,
) -> (ExportSummary, MultiZoneDocument) {
    let mut sink = MemorySink::new();
    let summary = export_partitioned_mesh(source, options, &mut sink, &mut NoProgress).unwrap();
    (summary, sink.into_document())
}

/// Global index of local vertex `local` in `zone`, read back from CoordinateX.
pub fn global_of(zone: &ZoneRecord, local: u64) -> i64 {
    let xs = zone.coordinate("CoordinateX").unwrap();
    xs[local as usize - 1] as i64
}

/// `(donor, receiver)` pairs of a record.
pub fn edges(record: &ConnectionRecord) -> Vec<(u64, u64)> {
    record
        .points
        .iter()
        .copied()
        .zip(record.receiver_points.iter().copied())
        .collect()
}

/// Bare source over plain lists, without the checks `PartitionedModel`
/// runs on insertion.
pub struct ListSource {
    pub name: &'static str,
    pub num_partitions: u32,
    pub entities: Vec<Entity>,
    pub vertices: Vec<MeshVertex>,
}

impl PartitionedMeshSource for ListSource {
    fn name(&self) -> &str {
        self.name
    }
    fn num_partitions(&self) -> u32 {
        self.num_partitions
    }
    fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter()
    }
    fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }
    fn vertex(&self, id: VertexId) -> Option<&MeshVertex> {
        self.vertices.get(id.index())
    }
}
