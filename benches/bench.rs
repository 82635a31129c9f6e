// Criterion benchmarks for Gift Rotation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gift_rotation::core::{partition, register, Matcher, RejectionSampler};
use gift_rotation::models::{ForbiddenPairs, GroupLabel, MatchGroup, Roster};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_roster(size: usize) -> Roster {
    let newcomers = size / 10;
    let leads = size / 10;
    let ordinary = size - newcomers - leads;

    Roster {
        ordinary: (0..ordinary).map(|i| format!("O{}", i)).collect(),
        newcomers: (0..newcomers).map(|i| format!("N{}", i)).collect(),
        leads: (0..leads).map(|i| format!("L{}", i)).collect(),
        forbidden_pairs: (0..ordinary / 4)
            .map(|i| (format!("O{}", 2 * i), format!("O{}", 2 * i + 1)))
            .collect(),
    }
}

fn bench_sampler(c: &mut Criterion) {
    let sampler = RejectionSampler::default();
    let roster = Roster {
        ordinary: (0..100).map(|i| format!("O{}", i)).collect(),
        ..Roster::default()
    };
    let group = MatchGroup::new(GroupLabel::B, register(&roster));
    let forbidden = ForbiddenPairs::new();

    c.bench_function("sampler_100_ordinary", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        b.iter(|| sampler.draw(black_box(&group), black_box(&forbidden), &mut rng));
    });
}

fn bench_partition(c: &mut Criterion) {
    let roster = Roster {
        ordinary: (0..50).map(|i| format!("O{}", i)).collect(),
        newcomers: (0..10).map(|i| format!("N{}", i)).collect(),
        leads: (0..40).map(|i| format!("L{}", i)).collect(),
        forbidden_pairs: vec![],
    };
    let participants = register(&roster);

    c.bench_function("partition_100_participants", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        b.iter(|| partition(black_box(&participants), &mut rng));
    });
}

fn bench_generate(c: &mut Criterion) {
    let matcher = Matcher::with_default_attempts();
    let mut group = c.benchmark_group("generate");

    for size in [10, 50, 100, 500].iter() {
        let roster = create_roster(*size);

        group.bench_with_input(BenchmarkId::new("generate", size), size, |b, _| {
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            // Failed runs are measured too
            b.iter(|| matcher.generate(black_box(&roster), &mut rng));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sampler, bench_partition, bench_generate);

criterion_main!(benches);
