use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tetsy::{EdgeLengthSource, Material, Solid, SolidConfig};

/// Orders in which a unit cell's axes are traversed; one tetrahedron per
/// permutation fills the cube.
const AXIS_ORDERS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// A `res`³-cell cube lattice with six tetrahedra per cell.
fn lattice(res: usize) -> (SolidConfig, Vec<f64>) {
    let n = res + 1;
    let index = |p: [usize; 3]| (p[0] * n + p[1]) * n + p[2];

    let mut positions = Vec::with_capacity(3 * n * n * n);
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                positions.extend_from_slice(&[i as f64, j as f64, k as f64]);
            }
        }
    }

    let mut tets = Vec::with_capacity(4 * 6 * res * res * res);
    for i in 0..res {
        for j in 0..res {
            for k in 0..res {
                for order in AXIS_ORDERS {
                    let mut corner = [i, j, k];
                    let mut tet = [index(corner), 0, 0, 0];
                    for (slot, &axis) in order.iter().enumerate() {
                        corner[axis] += 1;
                        tet[slot + 1] = index(corner);
                    }
                    tets.extend_from_slice(&tet);
                }
            }
        }
    }

    let config = SolidConfig {
        tets,
        edge_ids: vec![],
        material: Material::from_young_poisson(1e5, 0.45).with_damping(0.05),
    };
    (config, positions)
}

fn force_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("force step");

    for res in [2usize, 4, 8] {
        let (config, rest) = lattice(res);
        let stretched: Vec<f64> = rest
            .chunks(3)
            .flat_map(|p| [p[0] * 1.05, p[1], p[2]])
            .collect();

        group.bench_function(BenchmarkId::new("box lattice", res), |b| {
            let mut solid = Solid::try_new(&config, &rest, EdgeLengthSource::Tracked).unwrap();
            let mut forces = vec![0.0; rest.len()];
            b.iter(|| {
                forces.iter_mut().for_each(|f| *f = 0.0);
                solid.add_forces(&stretched, 1e-3, None, &mut forces);
            })
        });
    }

    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(15);
    targets = force_step
);
criterion_main!(benches);
