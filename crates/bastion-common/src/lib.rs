//! # Bastion Common
//!
//! Common types, utilities, and shared abstractions for Bastion.
//!
//! This crate provides foundational types used across all Bastion crates:
//! - Entity identifiers
//! - Guarded 2D vector helpers over `glam::Vec2`
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod ids;
pub mod math;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::math::*;
    pub use glam::Vec2;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_generation() {
        let id1 = EntityId::new();
        let id2 = EntityId::new();
        assert_ne!(id1, id2);
        assert!(id1.is_valid());
    }

    #[test]
    fn test_safe_direction_zero_vector() {
        assert_eq!(safe_direction(Vec2::ZERO), Vec2::ZERO);
    }
}
