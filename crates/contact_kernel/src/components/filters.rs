//! Collision category filtering for proxy shapes
//!
//! Every proxy shape carries a 16-bit category bitmask and a 16-bit
//! "collide with" mask. Two shapes are allowed to collide only when each
//! one's category is present in the other's mask.

/// Collision category definitions for 16-bit filter masks
pub struct CollisionCategories;

impl CollisionCategories {
    /// No collision category
    pub const NONE: u16 = 0;

    /// All collision categories
    pub const ALL: u16 = 0xFFFF;

    /// Default category assigned to new proxy shapes
    pub const DEFAULT: u16 = 0x0001;

    /// Check if two proxy shapes should collide based on their categories
    /// and masks
    ///
    /// Filtering is mutual: A's category must be in B's mask AND B's
    /// category must be in A's mask.
    pub fn should_collide(category_a: u16, mask_a: u16, category_b: u16, mask_b: u16) -> bool {
        (category_a & mask_b) != 0 && (category_b & mask_a) != 0
    }

    /// Helper to build a mask from multiple categories
    pub fn mask(categories: &[u16]) -> u16 {
        categories.iter().fold(0, |acc, &category| acc | category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TERRAIN: u16 = 1 << 1;
    const DEBRIS: u16 = 1 << 2;

    #[test]
    fn test_should_collide_mutual() {
        assert!(CollisionCategories::should_collide(
            TERRAIN,
            DEBRIS,
            DEBRIS,
            TERRAIN
        ));
    }

    #[test]
    fn test_should_not_collide_one_way() {
        // Debris wants to hit terrain, but terrain masks debris out
        assert!(!CollisionCategories::should_collide(
            DEBRIS,
            TERRAIN,
            TERRAIN,
            CollisionCategories::DEFAULT
        ));
    }

    #[test]
    fn test_default_values_collide_with_everything() {
        assert!(CollisionCategories::should_collide(
            CollisionCategories::DEFAULT,
            CollisionCategories::ALL,
            TERRAIN,
            CollisionCategories::ALL
        ));
    }

    #[test]
    fn test_mask_creation() {
        let mask = CollisionCategories::mask(&[TERRAIN, DEBRIS]);

        assert_eq!(mask, TERRAIN | DEBRIS);
    }
}
