//! Navigation octree benchmarks.
//!
//! - **build**: tree construction against obstacle fields of growing density
//! - **locate**: `find_nearest` at full depth for scattered positions
//! - **path**: single searches and parallel batches through a cluttered world

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec3;
use nav_octree::{NavConfig, NavOctree, ObstacleField, PathQueue, SearchLimits};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// =============================================================================
// Fixtures
// =============================================================================

/// Seeded scatter of spheres filling the root cube of `config`.
fn scattered(config: &NavConfig, count: usize, seed: u64) -> ObstacleField {
  let mut rng = StdRng::seed_from_u64(seed);
  let half = config.root_width() as f64 / 2.0;
  let origin = config.origin.as_dvec3();
  let mut field = ObstacleField::new();
  for _ in 0..count {
    let center = origin
      + DVec3::new(
        rng.random_range(-half..half),
        rng.random_range(-half..half),
        rng.random_range(-half..half),
      );
    field = field.with_sphere(center, rng.random_range(half / 64.0..half / 16.0));
  }
  field
}

fn positions(config: &NavConfig, count: usize, seed: u64) -> Vec<DVec3> {
  let mut rng = StdRng::seed_from_u64(seed);
  let half = config.root_width() as f64 / 2.0;
  let origin = config.origin.as_dvec3();
  (0..count)
    .map(|_| {
      origin
        + DVec3::new(
          rng.random_range(-half..half),
          rng.random_range(-half..half),
          rng.random_range(-half..half),
        )
    })
    .collect()
}

/// Endpoint pairs that both land in free space.
fn free_pairs(tree: &NavOctree, count: usize, seed: u64) -> Vec<(DVec3, DVec3)> {
  let candidates = positions(tree.config(), count * 8, seed);
  candidates
    .chunks_exact(2)
    .map(|pair| (pair[0], pair[1]))
    .filter(|&(a, b)| tree.find(a).is_none() && tree.find(b).is_none())
    .take(count)
    .collect()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_build(c: &mut Criterion) {
  let mut group = c.benchmark_group("build");
  let config = NavConfig::new(8, 64);

  for count in [16, 64, 256] {
    let field = scattered(&config, count, 1);
    group.bench_with_input(BenchmarkId::new("spheres", count), &field, |b, field| {
      b.iter(|| NavOctree::build_new(black_box(config), field))
    });
  }

  let line = ObstacleField::new().with_sphere_line(DVec3::new(5.0, 5.0, -128.0), DVec3::new(0.0, 0.0, 32.0), 9, 1.0);
  group.bench_function("sphere_line", |b| b.iter(|| NavOctree::build_new(black_box(config), &line)));

  group.finish();
}

fn bench_locate(c: &mut Criterion) {
  let mut group = c.benchmark_group("locate");
  let config = NavConfig::new(8, 64);
  let (tree, _) = NavOctree::build_new(config, &scattered(&config, 256, 2)).expect("valid config");
  let queries = positions(&config, 1024, 3);

  group.bench_function("find_nearest_1024", |b| {
    b.iter(|| {
      for &pos in &queries {
        black_box(tree.find_nearest(pos, config.depth));
      }
    })
  });

  group.bench_function("neighbours_1024", |b| {
    let regions: Vec<_> = queries
      .iter()
      .filter_map(|&pos| tree.find_nearest(pos, config.depth))
      .filter(|info| info.is_free())
      .collect();
    let mut out = Vec::new();
    b.iter(|| {
      for region in &regions {
        out.clear();
        tree.collect_neighbours(region, &mut out);
        black_box(out.len());
      }
    })
  });

  group.finish();
}

fn bench_path(c: &mut Criterion) {
  let mut group = c.benchmark_group("path");
  let config = NavConfig::new(7, 32);
  let (tree, _) = NavOctree::build_new(config, &scattered(&config, 128, 4)).expect("valid config");
  let pairs = free_pairs(&tree, 64, 5);

  group.bench_function("single_64", |b| {
    b.iter(|| {
      for &(from, to) in &pairs {
        let _ = black_box(tree.find_path_with(from, to, SearchLimits::DEFAULT));
      }
    })
  });

  group.bench_function("queue_64", |b| {
    let mut queue = PathQueue::new();
    b.iter(|| {
      for &(from, to) in &pairs {
        queue.enqueue(from, to);
      }
      queue.tick(&tree);
      black_box(queue.drain_completions())
    })
  });

  group.finish();
}

criterion_group!(benches, bench_build, bench_locate, bench_path);
criterion_main!(benches);
