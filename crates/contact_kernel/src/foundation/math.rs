//! Math utilities and types
//!
//! Provides fundamental math types for collision geometry.

pub use nalgebra::{
    Vector3,
    Matrix3,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Smallest length-squared scale at which geometry is treated as non-degenerate
pub const MACHINE_EPSILON: f32 = f32::EPSILON;

/// Rigid transform from one space to another (position and rotation, no scale)
///
/// Used as the local-space-to-body-space transform of a proxy shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation part of the transform
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.rotation.transform_point(&point) + self.position
    }

    /// Apply this transform to a vector (rotation only)
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * vector
    }

    /// Map a point from the target space back into this transform's source space
    pub fn inverse_transform_point(&self, point: Point3) -> Point3 {
        self.rotation.inverse().transform_point(&(point - self.position))
    }

    /// Combine this transform with another (self applied after `other`)
    pub fn combine(&self, other: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * other.position,
            rotation: self.rotation * other.rotation,
        }
    }

    /// Get the inverse transform
    pub fn inverse(&self) -> Transform {
        let inv_rotation = self.rotation.inverse();
        Transform {
            position: inv_rotation * (-self.position),
            rotation: inv_rotation,
        }
    }
}
