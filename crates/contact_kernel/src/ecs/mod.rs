//! Entity handle shared with the external entity manager

mod entity;

pub use entity::Entity;
