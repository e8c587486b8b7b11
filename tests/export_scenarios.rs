mod util;

use mesh_multizone::io::ZoneIndex;
use mesh_multizone::prelude::*;
use util::*;

#[test]
fn two_partitions_share_one_interface_vertex() {
    // 10 -- 20 -- 30, split at 20.
    let m = strip_model("strip", 2, &[1, 2], &[10, 20, 30], false);
    let (summary, doc) = export_document(&m, &line_options());

    assert_eq!(summary.zones.len(), 2);
    assert_eq!(summary.interface_records, 2);
    assert_eq!(summary.periodic_records, 0);
    assert_eq!(summary.unresolved_vertices, 0);

    let z1 = doc.zone("strip_Part1").unwrap();
    let z2 = doc.zone("strip_Part2").unwrap();
    assert_eq!(z1.coordinate("CoordinateX"), Some(&[10.0, 20.0][..]));
    assert_eq!(z2.coordinate("CoordinateX"), Some(&[20.0, 30.0][..]));

    assert_eq!(z1.connections.len(), 1);
    let forward = z1.connection("Part1_Part2").unwrap();
    assert_eq!(forward.receiver_zone, "strip_Part2");
    assert_eq!(edges(forward), vec![(2, 1)]);
    assert!(forward.periodic.is_none());

    assert_eq!(z2.connections.len(), 1);
    let backward = z2.connection("Part2_Part1").unwrap();
    assert_eq!(backward.receiver_zone, "strip_Part1");
    assert_eq!(edges(backward), vec![(1, 2)]);
}

#[test]
fn single_partition_periodic_pair() {
    // Slave vertex 3 maps onto master vertex 0.
    let m = strip_model("per", 1, &[1, 1, 1], &[0, 1, 2, 3], true);
    let (summary, doc) = export_document(&m, &line_options());

    assert_eq!(summary.periodic_records, 2);
    assert_eq!(summary.interface_records, 0);
    let zone = doc.zone("per_Part1").unwrap();
    let s_to_m = zone.connection("Per_1-P9000_1-P9001").unwrap();
    let m_to_s = zone.connection("Per_1-P9001_1-P9000").unwrap();
    assert_eq!(edges(s_to_m), vec![(4, 1)]);
    assert_eq!(edges(m_to_s), vec![(1, 4)]);
    assert_eq!(s_to_m.receiver_zone, "per_Part1");
    assert_eq!(s_to_m.periodic, Some(PeriodicTransform::identity()));
    assert_eq!(m_to_s.periodic, Some(PeriodicTransform::identity()));
}

#[test]
fn excluded_vertex_never_reaches_the_zone() {
    let mut m = PartitionedModel::new("deg", 1);
    let a = m.add_vertex(1, [0.0, 0.0, 0.0]).unwrap();
    let b = m.add_vertex(2, [1.0, 0.0, 0.0]).unwrap();
    let c = m.add_vertex(3, [0.0, 1.0, 0.0]).unwrap();
    let ghost = m.add_vertex(-1, [9.0, 9.0, 9.0]).unwrap();
    let id = EntityId::new(2, 1);
    m.add_entity(
        Entity::new(id)
            .with_parent(id)
            .with_partitions([1])
            .with_element(ElementType::Triangle3, vec![a, b, c])
            .with_element(ElementType::Triangle3, vec![a, b, ghost]),
    )
    .unwrap();
    let opts = ExportOptions {
        save_all: true,
        mesh_dim: 2,
        ..Default::default()
    };
    let (summary, doc) = export_document(&m, &opts);

    let zone = doc.zone("deg_Part1").unwrap();
    assert_eq!(zone.size.vertices, 3);
    assert_eq!(summary.zones[0].nodes, 3);
    for axis in ["CoordinateX", "CoordinateY", "CoordinateZ"] {
        let values = zone.coordinate(axis).unwrap();
        assert_eq!(values.len(), 3);
        assert!(values.iter().all(|&x| x < 9.0));
    }
    assert_eq!(zone.sections.len(), 1);
    let section = &zone.sections[0];
    assert_eq!((section.start, section.end), (1, 1));
    assert_eq!(section.connectivity, vec![1, 2, 3]);
    assert_eq!(zone.size.cells, 1);
}

#[test]
fn triple_junction_connects_every_ordered_pair() {
    // Three spokes meeting at global 0; each spoke in its own partition.
    let mut m = PartitionedModel::new("star", 3);
    let center = m.add_vertex(0, [0.0, 0.0, 0.0]).unwrap();
    for p in 1..=3u32 {
        let leaf = m.add_vertex(p as i64, [p as f64, 1.0, 0.0]).unwrap();
        let id = EntityId::new(1, p as i32);
        m.add_entity(
            Entity::new(id)
                .with_parent(id)
                .with_partitions([p])
                .with_element(ElementType::Line2, vec![center, leaf]),
        )
        .unwrap();
    }
    m.add_entity(
        Entity::new(EntityId::new(0, 1))
            .with_parent(INTERFACE_PARENT)
            .with_partitions([1, 2, 3])
            .with_element(ElementType::Point, vec![center]),
    )
    .unwrap();

    let (summary, doc) = export_document(&m, &line_options());
    assert_eq!(summary.interface_records, 6);
    let mut directed = 0;
    let mut unordered = std::collections::BTreeMap::new();
    for zone in &doc.zones {
        for conn in &zone.connections {
            directed += conn.points.len();
            let mut pair = [zone.name.clone(), conn.receiver_zone.clone()];
            pair.sort();
            *unordered.entry(pair).or_insert(0) += conn.points.len();
            // Center has global 0, the smallest: local 1 everywhere.
            assert_eq!(edges(conn), vec![(1, 1)]);
        }
    }
    assert_eq!(directed, 6);
    assert_eq!(unordered.len(), 3);
    assert!(unordered.values().all(|&n| n == 2));
}

#[test]
fn periodic_vertex_on_a_partition_junction_uses_every_occurrence() {
    // Slave vertex 3 is shared by partitions 2 and 3; master 0 lives in 1.
    let mut m = strip_model("jp", 3, &[1, 2, 3], &[0, 1, 2, 3], false);
    // Partition 2 reaches the slave vertex too, through an extra segment.
    let slave_vertex = VertexId(3);
    let master_vertex = VertexId(0);
    m.add_entity(
        Entity::new(EntityId::new(0, 50))
            .with_parent(INTERFACE_PARENT)
            .with_partitions([2, 3])
            .with_element(ElementType::Point, vec![slave_vertex]),
    )
    .unwrap();
    m.add_entity(
        Entity::new(EntityId::new(1, 60))
            .with_parent(EntityId::new(1, 60))
            .with_partitions([2])
            .with_element(ElementType::Line2, vec![VertexId(1), slave_vertex]),
    )
    .unwrap();
    m.add_entity(
        Entity::new(PERIODIC_SLAVE)
            .with_parent(PERIODIC_SLAVE)
            .with_partitions([3])
            .with_element(ElementType::Point, vec![slave_vertex]),
    )
    .unwrap();
    m.add_entity(
        Entity::new(PERIODIC_MASTER)
            .with_parent(PERIODIC_MASTER)
            .with_partitions([1])
            .with_element(ElementType::Point, vec![master_vertex]),
    )
    .unwrap();
    m.set_periodic(PERIODIC_SLAVE, PERIODIC_MASTER, [(slave_vertex, master_vertex)])
        .unwrap();

    let (summary, doc) = export_document(&m, &line_options());
    // (3,1), (1,3), (2,1), (1,2)
    assert_eq!(summary.periodic_records, 4);
    let z1 = doc.zone("jp_Part1").unwrap();
    let receivers: Vec<_> = z1
        .connections
        .iter()
        .filter(|c| c.periodic.is_some())
        .map(|c| c.receiver_zone.as_str())
        .collect();
    assert_eq!(receivers, vec!["jp_Part2", "jp_Part3"]);
    for zone in &doc.zones {
        for conn in zone.connections.iter().filter(|c| c.periodic.is_some()) {
            let target = doc.zone(&conn.receiver_zone).unwrap();
            for (d, r) in edges(conn) {
                let pair = (global_of(zone, d), global_of(target, r));
                assert!(pair == (3, 0) || pair == (0, 3), "{pair:?}");
            }
        }
    }
}

#[test]
fn empty_partitions_still_get_a_zone() {
    let m = strip_model("gap", 3, &[1, 1], &[5, 6, 7], false);
    let (summary, doc) = export_document(&m, &line_options());
    assert_eq!(summary.zones.len(), 3);
    let empty = doc.zone("gap_Part2").unwrap();
    assert_eq!(empty.size.vertices, 0);
    assert!(empty.sections.is_empty());
    assert_eq!(summary.zone("gap_Part3").unwrap().index, ZoneIndex(3));
}

#[test]
fn untagged_entities_are_skipped_by_default() {
    let m = strip_model("tag", 1, &[1], &[1, 2], false);
    let opts = ExportOptions {
        mesh_dim: 1,
        ..Default::default()
    };
    let (summary, doc) = export_document(&m, &opts);
    assert_eq!(summary.zones[0].nodes, 0);
    assert!(doc.zone("tag_Part1").unwrap().sections.is_empty());
}

#[test]
fn scaling_applies_to_every_axis() {
    let mut m = PartitionedModel::new("s", 1);
    let a = m.add_vertex(1, [1.0, 2.0, 3.0]).unwrap();
    let id = EntityId::new(0, 1);
    m.add_entity(
        Entity::new(id)
            .with_parent(id)
            .with_partitions([1])
            .with_physicals([1])
            .with_element(ElementType::Point, vec![a]),
    )
    .unwrap();
    let opts = ExportOptions {
        scaling_factor: 0.5,
        mesh_dim: 0,
        ..Default::default()
    };
    let (_, doc) = export_document(&m, &opts);
    let zone = doc.zone("s_Part1").unwrap();
    assert_eq!(zone.coordinate("CoordinateX"), Some(&[0.5][..]));
    assert_eq!(zone.coordinate("CoordinateY"), Some(&[1.0][..]));
    assert_eq!(zone.coordinate("CoordinateZ"), Some(&[1.5][..]));
    assert_eq!(zone.size.cells, 1);
}

#[test]
fn missing_periodic_master_is_rejected() {
    let mut slave = Entity::new(EntityId::new(0, 1));
    let mut link = PeriodicLink::new(EntityId::new(0, 2));
    link.insert_pair(slave.id, VertexId(0), VertexId(0)).unwrap();
    slave.periodic = Some(link);
    let source = ListSource {
        name: "orphan",
        num_partitions: 1,
        entities: vec![slave],
        vertices: vec![MeshVertex::new(1, [0.0; 3])],
    };
    let mut sink = MemorySink::new();
    let err = export_partitioned_mesh(&source, &line_options(), &mut sink, &mut NoProgress)
        .unwrap_err();
    assert!(matches!(err, MeshExportError::MissingPeriodicMaster { .. }));
}

#[test]
fn short_element_is_an_error_not_a_panic() {
    let id = EntityId::new(2, 1);
    let quad = Entity::new(id)
        .with_parent(id)
        .with_partitions([1])
        .with_element(ElementType::Quadrangle4, vec![VertexId(0), VertexId(1), VertexId(2)]);
    let source = ListSource {
        name: "short",
        num_partitions: 1,
        entities: vec![quad],
        vertices: (0..3i64)
            .map(|g| MeshVertex::new(g, [g as f64, 0.0, 0.0]))
            .collect(),
    };
    let opts = ExportOptions {
        save_all: true,
        mesh_dim: 2,
        ..Default::default()
    };
    let mut sink = MemorySink::new();
    let err = export_partitioned_mesh(&source, &opts, &mut sink, &mut NoProgress).unwrap_err();
    assert!(matches!(
        err,
        MeshExportError::ElementArity {
            entity,
            element_type: ElementType::Quadrangle4,
            index: 0,
            expected: 4,
            found: 3,
        } if entity == id
    ));
    assert!(sink.document().zones.is_empty());
}
