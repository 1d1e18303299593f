//! Axis-aligned bounding box with double precision for huge worlds.

use glam::{DVec3, IVec3};

/// Double-precision axis-aligned bounding box.
///
/// Describes the extent of a tree region or an obstacle. Region lookups use
/// [`DAabb3::contains_point`] (half-open) so that neighbouring regions never
/// both claim a point on their shared face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DAabb3 {
	/// Minimum corner.
	pub min: DVec3,
	/// Maximum corner.
	pub max: DVec3,
}

impl DAabb3 {
	/// Create a new AABB from min and max corners.
	///
	/// # Panics
	/// Debug-asserts that min <= max on all axes.
	pub fn new(min: DVec3, max: DVec3) -> Self {
		debug_assert!(
			min.x <= max.x && min.y <= max.y && min.z <= max.z,
			"AABB min must be <= max on all axes"
		);
		Self { min, max }
	}

	/// Create a new AABB from center and half-extents.
	pub fn from_center_half_extents(center: DVec3, half_extents: DVec3) -> Self {
		Self {
			min: center - half_extents,
			max: center + half_extents,
		}
	}

	/// Cube of edge `width` centered on a lattice point.
	pub fn from_cube(center: IVec3, width: i32) -> Self {
		Self::from_center_half_extents(center.as_dvec3(), DVec3::splat(width as f64 * 0.5))
	}

	/// Check if this AABB overlaps with another (closed intervals).
	///
	/// Two AABBs overlap if they share any interior or boundary points.
	#[inline]
	pub fn overlaps(&self, other: &DAabb3) -> bool {
		self.min.x <= other.max.x
			&& self.max.x >= other.min.x
			&& self.min.y <= other.max.y
			&& self.max.y >= other.min.y
			&& self.min.z <= other.max.z
			&& self.max.z >= other.min.z
	}

	/// Check if this AABB contains a point: `min <= p < max` on every axis.
	#[inline]
	pub fn contains_point(&self, point: DVec3) -> bool {
		point.x >= self.min.x
			&& point.x < self.max.x
			&& point.y >= self.min.y
			&& point.y < self.max.y
			&& point.z >= self.min.z
			&& point.z < self.max.z
	}

	/// Check if a sphere touches this AABB (closest-point test).
	#[inline]
	pub fn intersects_sphere(&self, center: DVec3, radius: f64) -> bool {
		let closest = center.clamp(self.min, self.max);
		closest.distance_squared(center) <= radius * radius
	}

	/// Get the size of the AABB (max - min).
	#[inline]
	pub fn size(&self) -> DVec3 {
		self.max - self.min
	}

	/// Get the center of the AABB.
	#[inline]
	pub fn center(&self) -> DVec3 {
		(self.min + self.max) * 0.5
	}
}
