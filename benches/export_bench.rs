use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use mesh_multizone::prelude::*;

/// Structured quad grid of `n x n` cells cut into `parts` vertical slabs,
/// with the right boundary periodic to the left one.
fn slab_grid(n: usize, parts: u32) -> PartitionedModel {
    let mut m = PartitionedModel::new("grid", parts);
    let mut v = Vec::with_capacity((n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            let g = (j * (n + 1) + i) as i64;
            v.push(m.add_vertex(g, [i as f64, j as f64, 0.0]).unwrap());
        }
    }
    let at = |i: usize, j: usize| v[j * (n + 1) + i];
    let slab_of = |i: usize| (i * parts as usize / n) as u32 + 1;

    for p in 1..=parts {
        let id = EntityId::new(2, p as i32);
        let mut surface = Entity::new(id).with_parent(id).with_partitions([p]);
        for j in 0..n {
            for i in (0..n).filter(|&i| slab_of(i) == p) {
                surface = surface.with_element(
                    ElementType::Quadrangle4,
                    vec![at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1)],
                );
            }
        }
        m.add_entity(surface).unwrap();
    }

    // Interface curves between neighbouring slabs.
    let mut tag = 100;
    for i in 1..n {
        let (left, right) = (slab_of(i - 1), slab_of(i));
        if left == right {
            continue;
        }
        let mut curve = Entity::new(EntityId::new(1, tag))
            .with_parent(EntityId::new(2, 0))
            .with_partitions([left, right]);
        for j in 0..n {
            curve = curve.with_element(ElementType::Line2, vec![at(i, j), at(i, j + 1)]);
        }
        m.add_entity(curve).unwrap();
        tag += 1;
    }

    let boundary = |i: usize, id: EntityId, p: u32| {
        let mut e = Entity::new(id).with_parent(id).with_partitions([p]);
        for j in 0..n {
            e = e.with_element(ElementType::Line2, vec![at(i, j), at(i, j + 1)]);
        }
        e
    };
    let master = EntityId::new(1, 1);
    let slave = EntityId::new(1, 2);
    m.add_entity(boundary(0, master, 1)).unwrap();
    m.add_entity(boundary(n, slave, parts)).unwrap();
    m.set_periodic(slave, master, (0..=n).map(|j| (at(n, j), at(0, j))))
        .unwrap();
    m
}

fn bench_export(c: &mut Criterion) {
    let options = ExportOptions {
        save_all: true,
        mesh_dim: 2,
        ..Default::default()
    };
    let mut group = c.benchmark_group("export_partitioned_mesh");
    for &(n, parts) in &[(32usize, 2u32), (64, 4), (128, 8)] {
        let mesh = slab_grid(n, parts);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{n}x{n}/{parts}")),
            &mesh,
            |b, mesh| {
                b.iter(|| {
                    let mut sink = MemorySink::new();
                    let summary =
                        export_partitioned_mesh(mesh, &options, &mut sink, &mut NoProgress)
                            .unwrap();
                    black_box(summary)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_export);
criterion_main!(benches);
