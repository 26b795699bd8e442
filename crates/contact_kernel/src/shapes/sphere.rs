//! Sphere collision shape

use crate::foundation::math::{Vec3, Mat3, MACHINE_EPSILON};
use crate::geometry::AABB;
use super::{CollisionShape, Ray, RaycastInfo};

/// A sphere collision shape centered at the local origin
///
/// The sphere has no explicit object margin: the margin is implicitly the
/// radius, so the support point without margin is the center itself.
#[derive(Debug, Clone, Copy)]
pub struct SphereShape {
    radius: f32,
}

impl SphereShape {
    /// Creates a sphere shape with the given radius
    pub fn new(radius: f32) -> Self {
        assert!(radius > 0.0);
        Self { radius }
    }

    /// Get the radius of the sphere
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl CollisionShape for SphereShape {
    fn local_support_point_with_margin(&self, direction: Vec3) -> Vec3 {
        // If the direction vector is not the zero vector
        if direction.magnitude_squared() >= MACHINE_EPSILON * MACHINE_EPSILON {
            return self.radius * direction.normalize();
        }

        // Zero direction: any point on the boundary of the sphere works
        Vec3::new(0.0, self.radius, 0.0)
    }

    fn local_support_point_without_margin(&self, _direction: Vec3) -> Vec3 {
        // The center of the sphere; the radius is carried by the margin
        Vec3::zeros()
    }

    fn local_bounds(&self) -> AABB {
        let extents = Vec3::new(self.radius, self.radius, self.radius);
        AABB::new(-extents, extents)
    }

    fn local_inertia_tensor(&self, mass: f32) -> Mat3 {
        let diag = 0.4 * mass * self.radius * self.radius;
        Mat3::from_diagonal(&Vec3::new(diag, diag, diag))
    }

    fn contains_point(&self, local_point: Vec3) -> bool {
        local_point.magnitude_squared() < self.radius * self.radius
    }

    fn raycast(&self, ray: &Ray, max_t: f32) -> Option<RaycastInfo> {
        let oc = ray.origin;

        // Quadratic coefficients of |origin + t * direction|^2 = radius^2
        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * oc.dot(&ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;

        if discriminant < 0.0 {
            return None;
        }

        let sqrt_discriminant = discriminant.sqrt();
        let t1 = (-b - sqrt_discriminant) / (2.0 * a);
        let t2 = (-b + sqrt_discriminant) / (2.0 * a);

        // Use the closest intersection in front of the ray origin
        let t = if t1 > 0.0 {
            t1
        } else if t2 > 0.0 {
            t2
        } else {
            return None;
        };

        if t > max_t {
            return None;
        }

        let point = ray.point_at(t);
        Some(RaycastInfo {
            point,
            normal: point.normalize(),
            t,
        })
    }

    fn margin(&self) -> f32 {
        self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_support_point_with_margin_is_on_surface() {
        let sphere = SphereShape::new(2.0);
        let support = sphere.local_support_point_with_margin(Vec3::new(3.0, 0.0, 4.0));

        assert_relative_eq!(support.magnitude(), 2.0, epsilon = 1e-5);
        assert_relative_eq!(support, Vec3::new(1.2, 0.0, 1.6), epsilon = 1e-5);
    }

    #[test]
    fn test_support_point_zero_direction_fallback() {
        let sphere = SphereShape::new(1.5);
        let support = sphere.local_support_point_with_margin(Vec3::zeros());

        assert_eq!(support, Vec3::new(0.0, 1.5, 0.0));
    }

    #[test]
    fn test_support_point_without_margin_is_center() {
        let sphere = SphereShape::new(1.5);

        assert_eq!(sphere.local_support_point_without_margin(Vec3::new(1.0, 0.0, 0.0)), Vec3::zeros());
    }

    #[test]
    fn test_local_bounds() {
        let sphere = SphereShape::new(0.5);
        let bounds = sphere.local_bounds();

        assert_eq!(bounds.min, Vec3::new(-0.5, -0.5, -0.5));
        assert_eq!(bounds.max, Vec3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_inertia_tensor() {
        let sphere = SphereShape::new(2.0);
        let tensor = sphere.local_inertia_tensor(10.0);

        // 0.4 * m * r^2 = 16 on the diagonal
        assert_relative_eq!(tensor[(0, 0)], 16.0, epsilon = 1e-5);
        assert_relative_eq!(tensor[(1, 1)], 16.0, epsilon = 1e-5);
        assert_relative_eq!(tensor[(2, 2)], 16.0, epsilon = 1e-5);
        assert_eq!(tensor[(0, 1)], 0.0);
    }

    #[test]
    fn test_contains_point() {
        let sphere = SphereShape::new(1.0);

        assert!(sphere.contains_point(Vec3::new(0.5, 0.5, 0.5)));
        assert!(!sphere.contains_point(Vec3::new(1.0, 0.5, 0.0)));
    }

    #[test]
    fn test_raycast_hit() {
        let sphere = SphereShape::new(1.0);
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));

        let hit = sphere.raycast(&ray, f32::INFINITY).expect("should hit");

        assert_relative_eq!(hit.t, 4.0, epsilon = 1e-4);
        assert_relative_eq!(hit.point, Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-4);
        assert_relative_eq!(hit.normal, Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn test_raycast_miss_and_max_distance() {
        let sphere = SphereShape::new(1.0);

        let miss = Ray::new(Vec3::new(-5.0, 2.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(sphere.raycast(&miss, f32::INFINITY).is_none());

        let hit_but_far = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(sphere.raycast(&hit_but_far, 2.0).is_none());
    }

    #[test]
    fn test_raycast_pointing_away() {
        let sphere = SphereShape::new(1.0);
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));

        assert!(sphere.raycast(&ray, f32::INFINITY).is_none());
    }
}
