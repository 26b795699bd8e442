//! Packed storage for proxy-shape components
//!
//! Holds one row of collider metadata per proxy shape, keyed by entity.
//! Rows of sleeping entities are always stored in a contiguous tail of the
//! arrays, so hot loops over awake colliders iterate a dense prefix and
//! never filter. Structural mutations (add, remove, sleep toggle) maintain
//! the partition by swapping rows, never by shifting the arrays.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::ecs::Entity;
use crate::foundation::math::Transform;
use crate::geometry::AABB;
use crate::shapes::CollisionShape;
use super::filters::CollisionCategories;

/// Broad-phase handle of a proxy shape before its first broad-phase insertion
pub const BROAD_PHASE_ID_UNSET: i32 = -1;

/// Growth policy for the proxy-shape storage arrays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Number of rows reserved by the first insertion
    pub initial_capacity: usize,

    /// Multiplier applied to the row count when the arrays are full
    pub growth_factor: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            growth_factor: 2,
        }
    }
}

/// Errors reported by the proxy-shape store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Growing the component arrays failed in the allocator
    ///
    /// The store is left exactly as it was before the failed operation.
    #[error("failed to grow proxy-shape storage: {0}")]
    CapacityGrowth(#[from] std::collections::TryReserveError),
}

/// Data for one proxy-shape row, provided when a collider is attached to a
/// body
#[derive(Debug, Clone)]
pub struct ProxyShapeComponent {
    /// Entity of the body this proxy shape is attached to
    pub body_entity: Entity,

    /// Broad-phase handle ([`BROAD_PHASE_ID_UNSET`] until the broad phase
    /// registers the shape)
    pub broad_phase_id: i32,

    /// Local-space bounds of the collision shape
    pub local_bounds: AABB,

    /// Transform from the proxy-shape local space to the body space
    pub local_to_body_transform: Transform,

    /// Shared handle to the collision shape geometry
    ///
    /// The shape is owned by the external body/collider graph; the store
    /// only keeps a back-reference.
    pub collision_shape: Arc<dyn CollisionShape>,

    /// Mass (in kilograms) of the proxy shape
    pub mass: f32,

    /// Collision category bits of this shape (single bit set by convention)
    pub collision_category_bits: u16,

    /// Bitmask of the categories this shape is allowed to collide with
    pub collide_with_mask_bits: u16,
}

impl ProxyShapeComponent {
    /// Create a row payload with default filtering and no broad-phase handle
    pub fn new(
        body_entity: Entity,
        local_bounds: AABB,
        local_to_body_transform: Transform,
        collision_shape: Arc<dyn CollisionShape>,
        mass: f32,
    ) -> Self {
        Self {
            body_entity,
            broad_phase_id: BROAD_PHASE_ID_UNSET,
            local_bounds,
            local_to_body_transform,
            collision_shape,
            mass,
            collision_category_bits: CollisionCategories::DEFAULT,
            collide_with_mask_bits: CollisionCategories::ALL,
        }
    }

    /// Set the collision category and "collide with" mask bits
    pub fn with_filter(mut self, category_bits: u16, mask_bits: u16) -> Self {
        self.collision_category_bits = category_bits;
        self.collide_with_mask_bits = mask_bits;
        self
    }
}

/// Packed, entity-indexed storage for the proxy shapes of all bodies
///
/// Struct-of-arrays layout: each field of a row lives in its own dense
/// array, and the entity map resolves an entity to the row index shared by
/// every column. Indices below the sleeping boundary hold awake colliders;
/// indices at or above it hold sleeping colliders.
pub struct ProxyShapeStore {
    config: StoreConfig,

    /// Map from a proxy-shape entity to its current row index
    entity_to_index: HashMap<Entity, u32>,

    /// Index of the first row of a sleeping entity (the sleeping tail)
    sleeping_start_index: u32,

    /// Entities of the bodies each proxy shape is attached to
    body_entities: Vec<Entity>,

    /// Entities of the proxy shapes themselves, mirrored for iteration
    proxy_shape_entities: Vec<Entity>,

    /// Broad-phase handles of the proxy shapes
    broad_phase_ids: Vec<i32>,

    /// Local-space bounds of each proxy shape
    local_bounds: Vec<AABB>,

    /// Local-space to body-space transforms
    local_to_body_transforms: Vec<Transform>,

    /// Collision shape geometry of each proxy shape
    collision_shapes: Vec<Arc<dyn CollisionShape>>,

    /// Masses (in kilograms) of the proxy shapes
    masses: Vec<f32>,

    /// Collision category bits of each proxy shape
    collision_category_bits: Vec<u16>,

    /// "Collide with" mask bits of each proxy shape
    collide_with_mask_bits: Vec<u16>,
}

impl ProxyShapeStore {
    /// Create an empty store with the given growth policy
    ///
    /// No memory is reserved until the first insertion.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            entity_to_index: HashMap::new(),
            sleeping_start_index: 0,
            body_entities: Vec::new(),
            proxy_shape_entities: Vec::new(),
            broad_phase_ids: Vec::new(),
            local_bounds: Vec::new(),
            local_to_body_transforms: Vec::new(),
            collision_shapes: Vec::new(),
            masses: Vec::new(),
            collision_category_bits: Vec::new(),
            collide_with_mask_bits: Vec::new(),
        }
    }

    /// Number of rows currently held
    pub fn len(&self) -> usize {
        self.proxy_shape_entities.len()
    }

    /// Whether the store holds no rows
    pub fn is_empty(&self) -> bool {
        self.proxy_shape_entities.is_empty()
    }

    /// Number of awake rows (the dense prefix)
    pub fn awake_count(&self) -> usize {
        self.sleeping_start_index as usize
    }

    /// Number of sleeping rows (the dense tail)
    pub fn sleeping_count(&self) -> usize {
        self.len() - self.awake_count()
    }

    /// Whether the given entity currently has a row
    pub fn contains(&self, proxy_shape_entity: Entity) -> bool {
        self.entity_to_index.contains_key(&proxy_shape_entity)
    }

    /// Add a row for a proxy-shape entity
    ///
    /// The row is inserted into the awake or sleeping partition according
    /// to `is_sleeping`, swapping the row currently at the partition
    /// boundary outward when necessary. Fails only when growing the
    /// storage arrays fails, in which case the store is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the entity already has a row.
    pub fn add(
        &mut self,
        proxy_shape_entity: Entity,
        is_sleeping: bool,
        component: ProxyShapeComponent,
    ) -> Result<(), StoreError> {
        assert!(
            !self.contains(proxy_shape_entity),
            "entity already has a proxy-shape row"
        );

        self.ensure_capacity_for_one()?;

        // Append the new row at the end of the arrays
        let end = self.len() as u32;
        self.body_entities.push(component.body_entity);
        self.proxy_shape_entities.push(proxy_shape_entity);
        self.broad_phase_ids.push(component.broad_phase_id);
        self.local_bounds.push(component.local_bounds);
        self.local_to_body_transforms.push(component.local_to_body_transform);
        self.collision_shapes.push(component.collision_shape);
        self.masses.push(component.mass);
        self.collision_category_bits.push(component.collision_category_bits);
        self.collide_with_mask_bits.push(component.collide_with_mask_bits);
        self.entity_to_index.insert(proxy_shape_entity, end);

        if !is_sleeping {
            // An awake row belongs before the sleeping tail: swap it with
            // the first sleeping row (if any) and grow the awake partition
            if self.sleeping_start_index != end {
                self.swap_rows(self.sleeping_start_index, end);
            }
            self.sleeping_start_index += 1;
        }

        log::trace!(
            "added proxy-shape row for entity {:?} (sleeping: {})",
            proxy_shape_entity,
            is_sleeping
        );
        debug_assert!(self.invariants_hold());
        Ok(())
    }

    /// Remove the row of a proxy-shape entity
    ///
    /// The last row of the entity's own partition is swapped into the
    /// freed slot, and when the removed row was awake the last sleeping
    /// row folds into the vacated boundary slot, keeping both partitions
    /// dense. Unrelated rows never move.
    ///
    /// # Panics
    ///
    /// Panics if the entity has no row.
    pub fn remove(&mut self, proxy_shape_entity: Entity) {
        let index = self.index_of(proxy_shape_entity) as u32;
        let last = self.len() as u32 - 1;

        if index < self.sleeping_start_index {
            // Awake row: fill the hole with the last awake row, then fill
            // the vacated boundary slot with the last sleeping row
            let last_awake = self.sleeping_start_index - 1;
            self.swap_rows(index, last_awake);
            self.swap_rows(last_awake, last);
            self.sleeping_start_index -= 1;
        } else {
            self.swap_rows(index, last);
        }

        self.entity_to_index.remove(&proxy_shape_entity);
        self.pop_row();

        log::trace!("removed proxy-shape row for entity {:?}", proxy_shape_entity);
        debug_assert!(self.invariants_hold());
    }

    /// Notify the store that an entity went to sleep or woke up
    ///
    /// A row already in the matching partition is left untouched.
    /// Otherwise the row swaps with the boundary element of the other
    /// partition and the boundary moves by one.
    ///
    /// # Panics
    ///
    /// Panics if the entity has no row.
    pub fn set_is_sleeping(&mut self, proxy_shape_entity: Entity, is_sleeping: bool) {
        let index = self.index_of(proxy_shape_entity) as u32;

        if is_sleeping && index < self.sleeping_start_index {
            // Going to sleep: swap with the last awake row and shrink the
            // awake partition over it
            let last_awake = self.sleeping_start_index - 1;
            self.swap_rows(index, last_awake);
            self.sleeping_start_index -= 1;

            log::trace!("proxy-shape entity {:?} went to sleep", proxy_shape_entity);
        } else if !is_sleeping && index >= self.sleeping_start_index {
            // Waking up: swap with the first sleeping row and grow the
            // awake partition over it
            self.swap_rows(index, self.sleeping_start_index);
            self.sleeping_start_index += 1;

            log::trace!("proxy-shape entity {:?} woke up", proxy_shape_entity);
        }

        debug_assert!(self.invariants_hold());
    }

    /// Whether the entity's row is in the sleeping tail
    ///
    /// # Panics
    ///
    /// Panics if the entity has no row.
    pub fn is_sleeping(&self, proxy_shape_entity: Entity) -> bool {
        self.index_of(proxy_shape_entity) as u32 >= self.sleeping_start_index
    }

    /// Iterate the entities of all awake proxy shapes (the dense prefix)
    pub fn awake_entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.proxy_shape_entities[..self.awake_count()].iter().copied()
    }

    /// Iterate the entities of all proxy shapes, awake first
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.proxy_shape_entities.iter().copied()
    }

    /// Return the entity of the body a proxy shape is attached to
    pub fn body_entity(&self, proxy_shape_entity: Entity) -> Entity {
        self.body_entities[self.index_of(proxy_shape_entity)]
    }

    /// Return the mass of a proxy shape
    pub fn mass(&self, proxy_shape_entity: Entity) -> f32 {
        self.masses[self.index_of(proxy_shape_entity)]
    }

    /// Return the broad-phase id of a proxy shape
    pub fn broad_phase_id(&self, proxy_shape_entity: Entity) -> i32 {
        self.broad_phase_ids[self.index_of(proxy_shape_entity)]
    }

    /// Set the broad-phase id of a proxy shape
    pub fn set_broad_phase_id(&mut self, proxy_shape_entity: Entity, broad_phase_id: i32) {
        let index = self.index_of(proxy_shape_entity);
        self.broad_phase_ids[index] = broad_phase_id;
    }

    /// Return the collision shape of a proxy shape
    pub fn collision_shape(&self, proxy_shape_entity: Entity) -> &Arc<dyn CollisionShape> {
        &self.collision_shapes[self.index_of(proxy_shape_entity)]
    }

    /// Return the local-to-body transform of a proxy shape
    pub fn local_to_body_transform(&self, proxy_shape_entity: Entity) -> Transform {
        self.local_to_body_transforms[self.index_of(proxy_shape_entity)]
    }

    /// Set the local-to-body transform of a proxy shape
    pub fn set_local_to_body_transform(&mut self, proxy_shape_entity: Entity, transform: Transform) {
        let index = self.index_of(proxy_shape_entity);
        self.local_to_body_transforms[index] = transform;
    }

    /// Return the local-space bounds of a proxy shape
    pub fn local_bounds(&self, proxy_shape_entity: Entity) -> AABB {
        self.local_bounds[self.index_of(proxy_shape_entity)]
    }

    /// Set the local-space bounds of a proxy shape
    pub fn set_local_bounds(&mut self, proxy_shape_entity: Entity, bounds: AABB) {
        let index = self.index_of(proxy_shape_entity);
        self.local_bounds[index] = bounds;
    }

    /// Return the collision category bits of a proxy shape
    pub fn collision_category_bits(&self, proxy_shape_entity: Entity) -> u16 {
        self.collision_category_bits[self.index_of(proxy_shape_entity)]
    }

    /// Set the collision category bits of a proxy shape
    pub fn set_collision_category_bits(&mut self, proxy_shape_entity: Entity, category_bits: u16) {
        let index = self.index_of(proxy_shape_entity);
        self.collision_category_bits[index] = category_bits;
    }

    /// Return the "collide with" mask bits of a proxy shape
    pub fn collide_with_mask_bits(&self, proxy_shape_entity: Entity) -> u16 {
        self.collide_with_mask_bits[self.index_of(proxy_shape_entity)]
    }

    /// Set the "collide with" mask bits of a proxy shape
    pub fn set_collide_with_mask_bits(&mut self, proxy_shape_entity: Entity, mask_bits: u16) {
        let index = self.index_of(proxy_shape_entity);
        self.collide_with_mask_bits[index] = mask_bits;
    }

    /// Resolve an entity to its row index; absence is a caller error
    fn index_of(&self, proxy_shape_entity: Entity) -> usize {
        *self
            .entity_to_index
            .get(&proxy_shape_entity)
            .expect("entity has no proxy-shape row") as usize
    }

    /// Reserve room for one more row in every column, all-or-nothing
    ///
    /// Capacity only ever grows here, so a failure part-way leaves the row
    /// data untouched and the store observably unchanged.
    fn ensure_capacity_for_one(&mut self) -> Result<(), StoreError> {
        let len = self.len();
        if len < self.proxy_shape_entities.capacity() {
            return Ok(());
        }

        let target = if len == 0 {
            self.config.initial_capacity.max(1)
        } else {
            len * self.config.growth_factor.max(2)
        };
        let additional = target - len;

        self.entity_to_index.try_reserve(additional)?;
        self.body_entities.try_reserve(additional)?;
        self.proxy_shape_entities.try_reserve(additional)?;
        self.broad_phase_ids.try_reserve(additional)?;
        self.local_bounds.try_reserve(additional)?;
        self.local_to_body_transforms.try_reserve(additional)?;
        self.collision_shapes.try_reserve(additional)?;
        self.masses.try_reserve(additional)?;
        self.collision_category_bits.try_reserve(additional)?;
        self.collide_with_mask_bits.try_reserve(additional)?;

        log::debug!("growing proxy-shape storage from {} to {} rows", len, target);
        Ok(())
    }

    /// Swap two rows across every column and fix the entity map for both
    fn swap_rows(&mut self, index1: u32, index2: u32) {
        if index1 == index2 {
            return;
        }
        let (i, j) = (index1 as usize, index2 as usize);

        self.body_entities.swap(i, j);
        self.proxy_shape_entities.swap(i, j);
        self.broad_phase_ids.swap(i, j);
        self.local_bounds.swap(i, j);
        self.local_to_body_transforms.swap(i, j);
        self.collision_shapes.swap(i, j);
        self.masses.swap(i, j);
        self.collision_category_bits.swap(i, j);
        self.collide_with_mask_bits.swap(i, j);

        self.entity_to_index.insert(self.proxy_shape_entities[i], index1);
        self.entity_to_index.insert(self.proxy_shape_entities[j], index2);
    }

    /// Drop the last row of every column
    fn pop_row(&mut self) {
        self.body_entities.pop();
        self.proxy_shape_entities.pop();
        self.broad_phase_ids.pop();
        self.local_bounds.pop();
        self.local_to_body_transforms.pop();
        self.collision_shapes.pop();
        self.masses.pop();
        self.collision_category_bits.pop();
        self.collide_with_mask_bits.pop();
    }

    /// Check the map bijection and partition boundary (debug builds only)
    fn invariants_hold(&self) -> bool {
        if self.entity_to_index.len() != self.len() {
            return false;
        }
        if self.awake_count() > self.len() {
            return false;
        }
        self.entity_to_index.iter().all(|(entity, &index)| {
            (index as usize) < self.len() && self.proxy_shape_entities[index as usize] == *entity
        })
    }
}
