//! Collision shape capability set consumed by the narrow phase
//!
//! Shapes are polymorphic over support-point, bounds, inertia, containment,
//! and raycast queries. The set is open: drivers may implement
//! [`CollisionShape`] for capsules, convex meshes, or anything else that can
//! answer these queries in its local space.

mod sphere;
mod box_shape;

pub use sphere::SphereShape;
pub use box_shape::BoxShape;

use crate::foundation::math::{Vec3, Mat3};
use crate::geometry::AABB;

/// Default collision margin (in meters) around shapes that carry one
pub const OBJECT_MARGIN: f32 = 0.04;

/// A ray for raycast queries, in shape-local space
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray
    pub origin: Vec3,
    /// The direction of the ray (should be normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a raycast against a shape
#[derive(Debug, Clone, Copy)]
pub struct RaycastInfo {
    /// The point of intersection in shape-local space
    pub point: Vec3,
    /// The surface normal at the intersection point
    pub normal: Vec3,
    /// The distance from the ray origin to the hit point
    pub t: f32,
}

/// Capability set every collision shape provides to the narrow phase
///
/// All queries operate in the shape's local space; callers map through the
/// proxy-shape and body transforms. Implementations must be usable behind a
/// shared handle across the store and the narrow-phase driver.
pub trait CollisionShape: std::fmt::Debug + Send + Sync {
    /// Return a local support point in a given direction with the object margin
    fn local_support_point_with_margin(&self, direction: Vec3) -> Vec3;

    /// Return a local support point in a given direction without the object margin
    fn local_support_point_without_margin(&self, direction: Vec3) -> Vec3;

    /// Return the local-space bounds of the shape
    fn local_bounds(&self) -> AABB;

    /// Return the local inertia tensor of the shape for the given mass
    fn local_inertia_tensor(&self, mass: f32) -> Mat3;

    /// Return true if a local-space point is inside the shape
    fn contains_point(&self, local_point: Vec3) -> bool;

    /// Cast a local-space ray against the shape
    ///
    /// Hits farther than `max_t` along the ray are discarded.
    fn raycast(&self, ray: &Ray, max_t: f32) -> Option<RaycastInfo>;

    /// Return the collision margin of the shape
    fn margin(&self) -> f32;
}
