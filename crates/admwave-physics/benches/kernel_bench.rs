// ─────────────────────────────────────────────────────────────────────
// ADMWave Kernel — Numerical Core Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for the per-point stencil, the stress-energy
//! sweep at each finite-difference order, and the reflecting boundary.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use admwave_physics::{
    reflect, AdmFields, AdmPoint, DerivativeOperator, GridFn, PointMetric, RhsFields,
    ScalarFields, StressEnergyAccumulator, StressEnergyFields, Sym3,
};
use admwave_types::{FdOrder, KernelConfig, PatchGeometry};

const N: usize = 40;

fn patch(order: FdOrder) -> PatchGeometry {
    PatchGeometry::new([N; 3], [order.half_width(); 3], [0.05; 3]).unwrap()
}

fn wave(patch: &PatchGeometry) -> (Vec<f64>, Vec<f64>) {
    let n = patch.len();
    let phi = (0..n).map(|v| (v as f64 * 1e-3).sin()).collect();
    let k_phi = (0..n).map(|v| (v as f64 * 7e-4).cos()).collect();
    (phi, k_phi)
}

// ── PointMetric::from_adm() ─────────────────────────────────────────

fn bench_point_metric(c: &mut Criterion) {
    let adm = AdmPoint {
        alpha: 0.9,
        beta: [0.1, -0.05, 0.2],
        gamma: Sym3::new(1.3, 0.1, -0.05, 1.1, 0.07, 0.9),
    };
    c.bench_function("point_metric", |b| {
        b.iter(|| PointMetric::from_adm(black_box(&adm)))
    });
}

// ── DerivativeOperator::gradient() ──────────────────────────────────

fn bench_gradient(c: &mut Criterion) {
    let mut group = c.benchmark_group("gradient");
    for order in [FdOrder::Fourth, FdOrder::Sixth, FdOrder::Eighth] {
        let patch = patch(order);
        let (phi, _) = wave(&patch);
        let f = GridFn::new("Phi", &phi, &patch).unwrap();
        let d = DerivativeOperator::new(order, patch.spacing);
        group.bench_with_input(BenchmarkId::from_parameter(order), &order, |b, _| {
            b.iter(|| d.gradient(black_box(&f), N / 2, N / 2, N / 2))
        });
    }
    group.finish();
}

// ── StressEnergyAccumulator::accumulate() ───────────────────────────

fn bench_tmunu_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("tmunu_sweep");
    group.sample_size(20);
    for order in [FdOrder::Fourth, FdOrder::Eighth] {
        let patch = patch(order);
        let n = patch.len();
        let (phi, k_phi) = wave(&patch);
        let alp = vec![1.0; n];
        let beta = vec![0.0; n];
        let diag = vec![1.0; n];
        let off = vec![0.0; n];
        let adm = AdmFields::new(
            &patch,
            &alp,
            [&beta, &beta, &beta],
            [&diag, &off, &off, &diag, &off, &diag],
        )
        .unwrap();
        let scalar = ScalarFields::new(&patch, &phi, &k_phi).unwrap();
        let mut store = vec![vec![0.0; n]; 10];

        for (label, min_parallel_points) in [("serial", usize::MAX), ("parallel", 0)] {
            let acc = StressEnergyAccumulator::new(&KernelConfig {
                fd_order: order,
                min_parallel_points,
                ..Default::default()
            });
            group.bench_function(BenchmarkId::new(label, order), |b| {
                b.iter(|| {
                    let mut it = store.iter_mut().map(Vec::as_mut_slice);
                    let slices = std::array::from_fn(|_| it.next().unwrap());
                    let mut tmunu = StressEnergyFields::new(&patch, slices).unwrap();
                    acc.accumulate(&patch, &adm, &scalar, &mut tmunu).unwrap()
                })
            });
        }
    }
    group.finish();
}

// ── reflect() ───────────────────────────────────────────────────────

fn bench_reflect(c: &mut Criterion) {
    let patch = patch(FdOrder::Fourth);
    let (phi, k_phi) = wave(&patch);
    let scalar = ScalarFields::new(&patch, &phi, &k_phi).unwrap();
    let mut phi_rhs = vec![0.0; patch.len()];
    let mut k_phi_rhs = vec![0.0; patch.len()];
    c.bench_function("reflect_all_faces", |b| {
        b.iter(|| {
            let mut rhs = RhsFields::new(&patch, &mut phi_rhs, &mut k_phi_rhs).unwrap();
            reflect(black_box(&patch), &scalar.k_phi, &mut rhs).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_point_metric,
    bench_gradient,
    bench_tmunu_sweep,
    bench_reflect,
);
criterion_main!(benches);
