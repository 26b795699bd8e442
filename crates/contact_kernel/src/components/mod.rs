//! Per-collider component storage and collision filtering

mod filters;
mod proxy_shapes;

pub use filters::CollisionCategories;
pub use proxy_shapes::{
    ProxyShapeStore, ProxyShapeComponent, StoreConfig, StoreError, BROAD_PHASE_ID_UNSET,
};
