//! Benchmarks for grid construction, nearest lookups and the index codec.
//!
//! Run with: cargo bench --package grids --bench grid_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use grids::{
    gaussian_latitudes, grid_index, grid_index_from_indices, grid_indices, Grid, GridCache, GridSpec,
    ScanMode,
};
use test_utils::random_points;

// =============================================================================
// CONSTRUCTION BENCHMARKS
// =============================================================================

fn bench_gaussian_latitudes(c: &mut Criterion) {
    let mut group = c.benchmark_group("gaussian_latitudes");

    for n in [32usize, 160, 640] {
        group.bench_with_input(BenchmarkId::from_parameter(2 * n), &n, |b, &n| {
            b.iter(|| gaussian_latitudes(black_box(2 * n)))
        });
    }

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for name in ["F48", "N80", "O80", "O320"] {
        let spec: GridSpec = name.parse().unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &spec, |b, spec| {
            b.iter(|| spec.build().unwrap())
        });
    }

    group.finish();
}

fn bench_cache_hit(c: &mut Criterion) {
    let cache = GridCache::new();
    let spec: GridSpec = "O320".parse().unwrap();
    cache.get_or_build(&spec).unwrap();

    c.bench_function("cache_hit_o320", |b| {
        b.iter(|| cache.get_or_build(black_box(&spec)).unwrap())
    });
}

// =============================================================================
// LOOKUP BENCHMARKS
// =============================================================================

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest");
    let points = random_points(42, 1000);
    group.throughput(Throughput::Elements(points.len() as u64));

    for spec in [GridSpec::gfs_0p25(), "O320".parse().unwrap(), "N320".parse().unwrap()] {
        let grid = spec.build().unwrap();
        let label = grid.kind();

        group.bench_function(BenchmarkId::new("exact", label), |b| {
            b.iter(|| {
                for &(lat, lon) in &points {
                    black_box(grid.nearest_index(lat, lon));
                }
            })
        });

        group.bench_function(BenchmarkId::new("guess", label), |b| {
            b.iter(|| {
                for &(lat, lon) in &points {
                    black_box(grid.guess_nearest_index(lat, lon));
                }
            })
        });
    }

    group.finish();
}

fn bench_grid_index(c: &mut Criterion) {
    let grid = GridSpec::gfs_0p25().build().unwrap();
    let points = random_points(7, 1000);

    c.bench_function("grid_index_gfs_0p25", |b| {
        b.iter(|| {
            for &(lat, lon) in &points {
                black_box(grid_index(&grid, lat, lon, ScanMode::standard()));
            }
        })
    });
}

// =============================================================================
// CODEC BENCHMARKS
// =============================================================================

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let grid: grids::GridLayout = "O320".parse::<GridSpec>().unwrap().build().unwrap();
    let size = grid.size();
    group.throughput(Throughput::Elements(size as u64));

    for bits in [0u8, 0b1010, 0b1011] {
        let mode = ScanMode::from_bits(bits);
        group.bench_function(BenchmarkId::new("decode_encode", bits), |b| {
            b.iter(|| {
                for index in 0..size {
                    if let Some((row, col)) = grid_indices(&grid, index, mode) {
                        black_box(grid_index_from_indices(&grid, row, col, mode));
                    }
                }
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_gaussian_latitudes,
    bench_build,
    bench_cache_hit,
    bench_nearest,
    bench_grid_index,
    bench_codec,
);
criterion_main!(benches);
