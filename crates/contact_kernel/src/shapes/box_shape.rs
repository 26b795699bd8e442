//! Box collision shape

use crate::foundation::math::{Vec3, Mat3};
use crate::geometry::AABB;
use super::{CollisionShape, Ray, RaycastInfo, OBJECT_MARGIN};

/// A box collision shape centered at the local origin, axis-aligned in its
/// own local space and defined by its half-extents
#[derive(Debug, Clone, Copy)]
pub struct BoxShape {
    half_extents: Vec3,
    margin: f32,
}

impl BoxShape {
    /// Creates a box shape with the given half-extents and the default margin
    pub fn new(half_extents: Vec3) -> Self {
        assert!(half_extents.x > 0.0 && half_extents.y > 0.0 && half_extents.z > 0.0);
        Self {
            half_extents,
            margin: OBJECT_MARGIN,
        }
    }

    /// Set a custom collision margin
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Get the half-extents of the box
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }
}

impl CollisionShape for BoxShape {
    fn local_support_point_with_margin(&self, direction: Vec3) -> Vec3 {
        let e = self.half_extents;
        Vec3::new(
            (e.x + self.margin).copysign(direction.x),
            (e.y + self.margin).copysign(direction.y),
            (e.z + self.margin).copysign(direction.z),
        )
    }

    fn local_support_point_without_margin(&self, direction: Vec3) -> Vec3 {
        let e = self.half_extents;
        Vec3::new(
            e.x.copysign(direction.x),
            e.y.copysign(direction.y),
            e.z.copysign(direction.z),
        )
    }

    fn local_bounds(&self) -> AABB {
        AABB::new(-self.half_extents, self.half_extents)
    }

    fn local_inertia_tensor(&self, mass: f32) -> Mat3 {
        let factor = mass / 3.0;
        let e = self.half_extents;
        let x_square = e.x * e.x;
        let y_square = e.y * e.y;
        let z_square = e.z * e.z;
        Mat3::from_diagonal(&Vec3::new(
            factor * (y_square + z_square),
            factor * (x_square + z_square),
            factor * (x_square + y_square),
        ))
    }

    fn contains_point(&self, local_point: Vec3) -> bool {
        let e = self.half_extents;
        local_point.x.abs() <= e.x && local_point.y.abs() <= e.y && local_point.z.abs() <= e.z
    }

    fn raycast(&self, ray: &Ray, max_t: f32) -> Option<RaycastInfo> {
        let t = self.local_bounds().intersect_ray(ray.origin, ray.direction)?;

        if t > max_t {
            return None;
        }

        let point = ray.point_at(t);

        // Hit normal: the axis on which the hit point sits on a face
        let e = self.half_extents;
        let normal = if (point.x.abs() - e.x).abs() < 1e-5 {
            Vec3::new(1.0_f32.copysign(point.x), 0.0, 0.0)
        } else if (point.y.abs() - e.y).abs() < 1e-5 {
            Vec3::new(0.0, 1.0_f32.copysign(point.y), 0.0)
        } else {
            Vec3::new(0.0, 0.0, 1.0_f32.copysign(point.z))
        };

        Some(RaycastInfo { point, normal, t })
    }

    fn margin(&self) -> f32 {
        self.margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_support_point_without_margin() {
        let shape = BoxShape::new(Vec3::new(1.0, 2.0, 3.0));
        let support = shape.local_support_point_without_margin(Vec3::new(0.5, -1.0, 2.0));

        assert_eq!(support, Vec3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn test_support_point_with_margin_expands_extents() {
        let shape = BoxShape::new(Vec3::new(1.0, 1.0, 1.0)).with_margin(0.1);
        let support = shape.local_support_point_with_margin(Vec3::new(-1.0, 1.0, 1.0));

        assert_relative_eq!(support, Vec3::new(-1.1, 1.1, 1.1), epsilon = 1e-6);
    }

    #[test]
    fn test_inertia_tensor() {
        let shape = BoxShape::new(Vec3::new(1.0, 2.0, 3.0));
        let tensor = shape.local_inertia_tensor(3.0);

        assert_relative_eq!(tensor[(0, 0)], 13.0, epsilon = 1e-5); // (4 + 9)
        assert_relative_eq!(tensor[(1, 1)], 10.0, epsilon = 1e-5); // (1 + 9)
        assert_relative_eq!(tensor[(2, 2)], 5.0, epsilon = 1e-5); // (1 + 4)
    }

    #[test]
    fn test_contains_point() {
        let shape = BoxShape::new(Vec3::new(1.0, 1.0, 1.0));

        assert!(shape.contains_point(Vec3::new(1.0, -1.0, 0.0))); // boundary
        assert!(!shape.contains_point(Vec3::new(1.01, 0.0, 0.0)));
    }

    #[test]
    fn test_raycast_face_hit() {
        let shape = BoxShape::new(Vec3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Vec3::new(-3.0, 0.25, 0.0), Vec3::new(1.0, 0.0, 0.0));

        let hit = shape.raycast(&ray, f32::INFINITY).expect("should hit");

        assert_relative_eq!(hit.t, 2.0, epsilon = 1e-5);
        assert_relative_eq!(hit.point, Vec3::new(-1.0, 0.25, 0.0), epsilon = 1e-5);
        assert_relative_eq!(hit.normal, Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_raycast_miss() {
        let shape = BoxShape::new(Vec3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Vec3::new(-3.0, 2.5, 0.0), Vec3::new(1.0, 0.0, 0.0));

        assert!(shape.raycast(&ray, f32::INFINITY).is_none());
    }
}
