//! Occupancy testers - the only way obstacle data enters the tree.
//!
//! A tester answers one question: does the cube centered on a lattice point
//! touch any obstacle. The physics world normally provides it; the simple
//! implementations here are deterministic and easy to reason about, useful
//! for tests, benches and debugging.

use glam::{DVec3, IVec3};

use crate::octree::DAabb3;

/// Obstacle query consumed by the tree builder.
pub trait OccupancyTester {
  /// Does the cube centered on `center` with half edge `half_width`
  /// intersect any obstacle.
  fn contact_test_box(&self, center: IVec3, half_width: i32) -> bool;
}

impl<F> OccupancyTester for F
where
  F: Fn(IVec3, i32) -> bool,
{
  #[inline]
  fn contact_test_box(&self, center: IVec3, half_width: i32) -> bool {
    self(center, half_width)
  }
}

/// Nothing is ever occupied.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptySpace;

impl OccupancyTester for EmptySpace {
  #[inline]
  fn contact_test_box(&self, _center: IVec3, _half_width: i32) -> bool {
    false
  }
}

/// Spherical obstacle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
  pub center: DVec3,
  pub radius: f64,
}

/// Static set of spheres and boxes.
///
/// Contact is inclusive: a query box that only touches an obstacle on its
/// surface counts as occupied.
#[derive(Clone, Debug, Default)]
pub struct ObstacleField {
  pub spheres: Vec<Sphere>,
  pub boxes: Vec<DAabb3>,
}

impl ObstacleField {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_sphere(mut self, center: DVec3, radius: f64) -> Self {
    self.spheres.push(Sphere { center, radius });
    self
  }

  pub fn with_box(mut self, bounds: DAabb3) -> Self {
    self.boxes.push(bounds);
    self
  }

  /// Spheres of `radius` placed from `start` in `count` steps of `step`.
  pub fn with_sphere_line(mut self, start: DVec3, step: DVec3, count: usize, radius: f64) -> Self {
    self.spheres.extend((0..count).map(|i| Sphere {
      center: start + step * i as f64,
      radius,
    }));
    self
  }

  pub fn len(&self) -> usize {
    self.spheres.len() + self.boxes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.spheres.is_empty() && self.boxes.is_empty()
  }
}

impl OccupancyTester for ObstacleField {
  fn contact_test_box(&self, center: IVec3, half_width: i32) -> bool {
    let query = DAabb3::from_center_half_extents(center.as_dvec3(), DVec3::splat(half_width as f64));
    self
      .spheres
      .iter()
      .any(|sphere| query.intersects_sphere(sphere.center, sphere.radius))
      || self.boxes.iter().any(|bounds| query.overlaps(bounds))
  }
}
