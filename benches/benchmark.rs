#[macro_use]
extern crate criterion;
extern crate classbreaks;
extern crate rand;

use rand::Rng;
use rand_distr::Normal;
use rand_distr::Uniform;
use std::hint::black_box;

use classbreaks::{equal_breaks, jenks_breaks, quantile_breaks};
use criterion::Criterion;

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("Jenks, 2k f64, Uniform: 0 - 250, 7 classes", |bencher| {
        let mut rng = rand::rng();
        let range = Uniform::new(0.0, 250.0).unwrap();

        let data: Vec<f64> = (0..2_000).map(|_| rng.sample(range)).collect();
        bencher.iter(|| {
            jenks_breaks(black_box(&data), black_box(7)).unwrap();
        });
    });

    c.bench_function("Jenks, 2k f64, Gaussian: mu = 3, sigma = 1, 7 classes", |bencher| {
        let mut rng = rand::rng();
        let range = Normal::new(3.0, 1.0).unwrap();

        let data: Vec<f64> = (0..2_000).map(|_| rng.sample(range)).collect();
        bencher.iter(|| {
            jenks_breaks(black_box(&data), black_box(7)).unwrap();
        });
    });

    c.bench_function("Quantile, 110k f64, Gaussian: mu = 3, sigma = 1", |bencher| {
        let mut rng = rand::rng();
        let range = Normal::new(3.0, 1.0).unwrap();

        let data: Vec<f64> = (0..110_000).map(|_| rng.sample(range)).collect();
        bencher.iter(|| {
            quantile_breaks(black_box(&data), black_box(7)).unwrap();
        });
    });

    c.bench_function("Equal interval, 110k f64, Uniform: 0 - 250", |bencher| {
        let mut rng = rand::rng();
        let range = Uniform::new(0.0, 250.0).unwrap();

        let data: Vec<f64> = (0..110_000).map(|_| rng.sample(range)).collect();
        bencher.iter(|| {
            equal_breaks(black_box(&data), black_box(7)).unwrap();
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
