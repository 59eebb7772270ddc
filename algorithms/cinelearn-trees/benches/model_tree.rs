use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use cinelearn::benchmarks::config;
use cinelearn::dataset::{Dataset, Example, Feature};
use cinelearn::prelude::*;
use cinelearn_trees::ModelTree;
use ndarray::{Array, Array1};
use ndarray_rand::rand_distr::StandardNormal;
use ndarray_rand::RandomExt;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A synthetic catalog with three discrete features of four values each,
/// two continuous attributes and a target correlated with both.
fn generate_catalog(samples: usize, mut rng: &mut SmallRng) -> Dataset<f64> {
    let features = ["studio", "genre", "decade"]
        .iter()
        .map(|name| {
            let values = (0..4).map(|value| format!("{}_{}", name, value)).collect();
            Feature::new(name.to_string(), values).unwrap()
        })
        .collect::<Vec<_>>();

    let examples = (0..samples)
        .map(|_| {
            let continuous: Array1<f64> = Array::random_using(2, StandardNormal, &mut rng);
            let discrete = (0..3)
                .map(|_| vec![rng.gen_range(0..4usize)])
                .collect::<Vec<_>>();

            let target = discrete.iter().map(|held| held[0] as f64).sum::<f64>()
                + continuous.sum()
                + rng.gen_range(-0.5..0.5);

            Example::new(continuous, discrete, target)
        })
        .collect();

    Dataset::from_examples(features, examples).unwrap()
}

fn model_tree_bench(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);

    // Controls how many films are generated per catalog
    let catalog_sizes = &[100, 1000, 10000];

    // Use the default configuration
    let hyperparams = ModelTree::params();

    // Benchmark training time for each catalog size
    let mut group = c.benchmark_group("model_tree");
    config::set_default_benchmark_configs(&mut group);

    for n in catalog_sizes.iter() {
        let dataset = generate_catalog(*n, &mut rng);

        group.bench_with_input(BenchmarkId::from_parameter(n), &dataset, |b, d| {
            b.iter(|| hyperparams.fit(d))
        });
    }

    group.finish();
}

criterion_group!(benches, model_tree_bench);
criterion_main!(benches);
