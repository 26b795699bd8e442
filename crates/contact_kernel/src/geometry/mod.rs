//! Geometric query and clipping library
//!
//! Stateless routines used by the narrow phase to find candidate contact
//! features between two convex shapes and to clip them into a manifold.

pub mod queries;
pub mod clipping;
mod aabb;

pub use aabb::AABB;
