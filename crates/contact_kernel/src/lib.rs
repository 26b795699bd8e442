//! # Contact Kernel
//!
//! The narrow-phase geometry kernel of a rigid-body physics engine.
//!
//! ## Features
//!
//! - **Geometric Queries**: Closest-point, distance, and barycentric
//!   computations between points, segments, lines, and triangles
//! - **Manifold Clipping**: Sutherland-Hodgman clipping of segments and
//!   polygons against half-space lists, used to build contact manifolds
//! - **Proxy-Shape Store**: Cache-dense, entity-indexed storage for
//!   per-collider state with a sleeping-tail partition
//! - **Shape Capability Set**: Support-point, bounds, inertia, containment,
//!   and raycast interface consumed by the narrow phase
//!
//! ## Quick Start
//!
//! ```rust
//! use contact_kernel::prelude::*;
//! use std::sync::Arc;
//!
//! let mut store = ProxyShapeStore::new(StoreConfig::default());
//! let body = Entity::from_raw(0, 0);
//! let collider = Entity::from_raw(1, 0);
//! let shape: Arc<dyn CollisionShape> = Arc::new(SphereShape::new(0.5));
//!
//! let component = ProxyShapeComponent::new(
//!     body,
//!     shape.local_bounds(),
//!     Transform::identity(),
//!     shape,
//!     1.0,
//! );
//! store.add(collider, false, component).unwrap();
//! assert_eq!(store.mass(collider), 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod geometry;
pub mod shapes;
pub mod ecs;
pub mod components;

/// Common imports for kernel users
pub mod prelude {
    pub use crate::{
        foundation::math::{Vec3, Mat3, Point3, Quat, Transform},
        geometry::{queries, clipping, AABB},
        shapes::{CollisionShape, SphereShape, BoxShape, Ray, RaycastInfo},
        ecs::Entity,
        components::{
            ProxyShapeStore, ProxyShapeComponent, StoreConfig, StoreError,
            CollisionCategories,
        },
    };
}
