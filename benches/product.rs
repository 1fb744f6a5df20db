use bttb_fft::{
    BttbSpec, Ordering, Symmetry, Validation, bccb_first_column, bttb, eigenvalues, product,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ndarray::ArrayView1;
use rand::{Rng, SeedableRng, rngs::StdRng};

fn random_setup(nblocks: usize, npoints: usize) -> (BttbSpec, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(0);
    let spec = BttbSpec::random(Symmetry::SYMM_SYMM, nblocks, npoints, &mut rng);
    let v = (0..spec.order()).map(|_| rng.random_range(-1.0..1.0)).collect();
    (spec, v)
}

fn bench_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("product");

    for &size in &[8, 16, 32] {
        let (spec, v) = random_setup(size, size);
        let dense = bttb(&spec, Validation::Enabled).unwrap();
        let handle = bccb_first_column(&spec, Validation::Enabled).unwrap();
        let spectral = eigenvalues(&handle, Ordering::Row, Validation::Enabled).unwrap();

        group.bench_with_input(BenchmarkId::new("dense", size), &v, |b, v| {
            b.iter(|| dense.dot(&ArrayView1::from(v)));
        });
        group.bench_with_input(BenchmarkId::new("spectral", size), &v, |b, v| {
            b.iter(|| product(&spectral, v, Validation::Disabled).unwrap());
        });
    }

    group.finish();
}

fn bench_eigenvalues(c: &mut Criterion) {
    let mut group = c.benchmark_group("eigenvalues");

    for &size in &[32, 128] {
        let (spec, _) = random_setup(size, size);
        let handle = bccb_first_column(&spec, Validation::Enabled).unwrap();

        for ordering in [Ordering::Row, Ordering::Column] {
            group.bench_with_input(
                BenchmarkId::new(format!("n={size}"), ordering),
                &ordering,
                |b, &ordering| {
                    b.iter(|| eigenvalues(&handle, ordering, Validation::Enabled).unwrap());
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_product, bench_eigenvalues);
criterion_main!(benches);
