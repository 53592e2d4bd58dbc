//! Sampler throughput benchmark — iteration fan-out dominates engine
//! run time, so this is the number to watch.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pleito_core::cancellation::CancellationToken;
use pleito_core::config::SamplingConfig;
use pleito_core::events::EventDispatcher;
use pleito_core::types::EntityId;
use pleito_engine::aggregate::{BaseDistribution, EntityBase};
use pleito_engine::sample::MonteCarloSampler;

fn make_base(entities: usize) -> BaseDistribution {
    let mean = 0.8 / entities as f64;
    BaseDistribution {
        entities: (0..entities)
            .map(|i| EntityBase {
                entity: EntityId::from(format!("P{i:02}")),
                mean,
                variance: 0.0009,
                baseline: mean,
            })
            .collect(),
        others: 0.2,
    }
}

fn bench_sampler(c: &mut Criterion) {
    let config = SamplingConfig::default();
    let events = EventDispatcher::new();
    let sampler = MonteCarloSampler::new(&config, &events);
    let cancel = CancellationToken::new();

    for (label, entities, iterations) in [
        ("10k_iterations_12_entities", 12usize, 10_000u32),
        ("50k_iterations_30_entities", 30, 50_000),
    ] {
        let base = make_base(entities);
        c.bench_function(label, |b| {
            b.iter(|| {
                let ensemble = sampler
                    .sample(black_box(&base), iterations, 42, &cancel)
                    .unwrap();
                black_box(ensemble.iterations())
            })
        });
    }
}

criterion_group!(benches, bench_sampler);
criterion_main!(benches);
