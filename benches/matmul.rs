use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gfkern::{mat_mul, Capabilities, Gf256Field, MatrixShape, NibbleKernel, RowFma, StrategyKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn random_bytes(rng: &mut StdRng, len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rng.fill(&mut buf[..]);
    buf
}

fn bench_matrix_multiplication(c: &mut Criterion) {
    let field = Gf256Field::shared();
    let caps = Capabilities::detect();
    let nibble = NibbleKernel::new(field, caps);

    for kind in StrategyKind::ALL {
        let fma = match RowFma::select(kind, field, caps, &nibble) {
            Ok(fma) => fma,
            Err(e) => {
                eprintln!("Skipping {} - {}", kind.bench_name(), e);
                continue;
            }
        };

        let mut group = c.benchmark_group(kind.bench_name());
        let mut rng = StdRng::seed_from_u64(42);

        for n in [16usize, 32, 64, 128, 256, 512] {
            let shape = MatrixShape::square(n);
            let left = random_bytes(&mut rng, n * n);
            let right = random_bytes(&mut rng, n * n);
            let mut result = vec![0u8; n * n];

            group.throughput(Throughput::Bytes((n * n * n) as u64));
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
                b.iter(|| {
                    mat_mul(
                        black_box(&left),
                        black_box(&right),
                        shape,
                        &fma,
                        black_box(&mut result),
                    )
                    .unwrap();
                });
            });
        }

        group.finish();
    }
}

criterion_group!(benches, bench_matrix_multiplication);
criterion_main!(benches);
