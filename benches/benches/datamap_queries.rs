// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Rect};
use understory_datamap::{
    BruteForceMapper, DataMapper, DataSorting, MapperConfig, PointArray, SubdivisionDataMapper,
    SubdivisionLineDataMapper,
};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_scatter(n: usize) -> Vec<Point> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    (0..n)
        .map(|_| Point::new(rng.next_f64() * 2000.0, rng.next_f64() * 1000.0))
        .collect()
}

/// A sampled random walk, sorted by x like a time series.
fn gen_series(n: usize) -> Vec<Point> {
    let mut rng = Rng::new(0x3C6E_F35F_4750_2932);
    let mut y = 0.0;
    (0..n)
        .map(|i| {
            y += rng.next_f64() - 0.5;
            Point::new(i as f64, y)
        })
        .collect()
}

fn gen_probes(count: usize, world: Rect) -> Vec<Point> {
    let mut rng = Rng::new(0x9E37_79B9_7F4A_7C15);
    (0..count)
        .map(|_| {
            Point::new(
                world.x0 + rng.next_f64() * world.width(),
                world.y0 + rng.next_f64() * world.height(),
            )
        })
        .collect()
}

fn brute_force() -> Box<dyn DataMapper> {
    Box::new(BruteForceMapper::default())
}

fn subdivision() -> Box<dyn DataMapper> {
    Box::new(SubdivisionDataMapper::default())
}

fn subdivision_line() -> Box<dyn DataMapper> {
    Box::new(SubdivisionLineDataMapper::default())
}

fn mappers() -> [(&'static str, fn() -> Box<dyn DataMapper>); 3] {
    [
        ("BruteForce", brute_force),
        ("Subdivision", subdivision),
        ("SubdivisionLine", subdivision_line),
    ]
}

fn bench_build(c: &mut Criterion, group_name: &str, make_points: impl Fn(usize) -> Vec<Point>) {
    let mut group = c.benchmark_group(group_name);
    for &n in &[1_000usize, 10_000, 100_000] {
        let data = PointArray::from_points(&make_points(n));
        group.throughput(Throughput::Elements(n as u64));
        for (name, make) in mappers() {
            group.bench_function(BenchmarkId::new(name, n), |b| {
                b.iter_batched(
                    make,
                    |mut m| {
                        m.set_data(black_box(&data), DataSorting::None).unwrap();
                        m
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_points_near(c: &mut Criterion, group_name: &str, make_points: impl Fn(usize) -> Vec<Point>) {
    let mut group = c.benchmark_group(group_name);
    for &n in &[1_000usize, 10_000, 100_000] {
        let points = make_points(n);
        let data = PointArray::from_points(&points);
        for (name, make) in mappers() {
            let mut m = make();
            m.set_data(&data, DataSorting::None).unwrap();
            let probes = gen_probes(64, m.extents().rect());
            group.throughput(Throughput::Elements(probes.len() as u64));
            group.bench_function(BenchmarkId::new(name, n), |b| {
                b.iter(|| {
                    let mut hits = 0;
                    for p in &probes {
                        let r = m.points_near(black_box(core::slice::from_ref(p)), 2.0);
                        hits += r.points.iter().filter(|q| q.distance(*p) <= 2.0).count();
                    }
                    black_box(hits)
                });
            });
        }
    }
    group.finish();
}

fn bench_points_in_rect(c: &mut Criterion) {
    let mut group = c.benchmark_group("points_in_rect_scatter");
    for &n in &[1_000usize, 10_000, 100_000] {
        let data = PointArray::from_points(&gen_scatter(n));
        let config = MapperConfig::default();
        let mut grid = SubdivisionDataMapper::from_data(&data, DataSorting::None, config).unwrap();
        let mut brute = BruteForceMapper::from_data(&data, DataSorting::None, config).unwrap();
        let query = Rect::new(900.0, 450.0, 1100.0, 550.0);
        group.bench_function(BenchmarkId::new("BruteForce", n), |b| {
            b.iter(|| black_box(brute.points_in_rect(black_box(query)).len()));
        });
        group.bench_function(BenchmarkId::new("Subdivision", n), |b| {
            b.iter(|| black_box(grid.points_in_rect(black_box(query)).len()));
        });
    }
    group.finish();
}

fn bench_build_scatter(c: &mut Criterion) {
    bench_build(c, "build_scatter", gen_scatter);
}

fn bench_build_series(c: &mut Criterion) {
    bench_build(c, "build_series", gen_series);
}

fn bench_near_scatter(c: &mut Criterion) {
    bench_points_near(c, "points_near_scatter", gen_scatter);
}

fn bench_near_series(c: &mut Criterion) {
    bench_points_near(c, "points_near_series", gen_series);
}

criterion_group!(
    benches,
    bench_build_scatter,
    bench_build_series,
    bench_near_scatter,
    bench_near_series,
    bench_points_in_rect,
);
criterion_main!(benches);
