//! Entity trait - common interface for parts and products

use serde::{de::DeserializeOwned, Serialize};

use crate::core::identity::EntityKind;

/// Common trait for all inventory entities
pub trait Entity: Serialize + DeserializeOwned {
    /// Id type handed out by this entity's sequence
    type Id: Copy + Eq + std::hash::Hash + std::fmt::Display;

    /// The entity kind
    const KIND: EntityKind;

    /// Get the entity's unique id
    fn id(&self) -> Self::Id;

    /// Get the display name
    fn name(&self) -> &str;

    /// Unit price
    fn price(&self) -> f64;

    /// Units currently on hand
    fn stock(&self) -> i32;

    /// Lower stock bound
    fn min(&self) -> i32;

    /// Upper stock bound
    fn max(&self) -> i32;

    /// Case-insensitive substring match on the name; an empty fragment matches
    fn name_contains(&self, fragment: &str) -> bool {
        self.name()
            .to_lowercase()
            .contains(&fragment.to_lowercase())
    }
}
