//! Product entity - sellable items built from associated parts

use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityKind, PartId, ProductId};
use crate::entities::part::Part;

/// A Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Sale price
    pub price: f64,

    /// Units on hand
    pub stock: i32,

    /// Minimum units to keep on hand
    pub min: i32,

    /// Maximum units to keep on hand
    pub max: i32,

    /// Parts this product is built from.
    ///
    /// These are snapshots shared with the catalog by value: changing or
    /// deleting a catalog part does not touch them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub associated_parts: Vec<Part>,
}

impl Entity for Product {
    type Id = ProductId;

    const KIND: EntityKind = EntityKind::Product;

    fn id(&self) -> ProductId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> f64 {
        self.price
    }

    fn stock(&self) -> i32 {
        self.stock
    }

    fn min(&self) -> i32 {
        self.min
    }

    fn max(&self) -> i32 {
        self.max
    }
}

impl Product {
    /// Create a product with no associated parts
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        stock: i32,
        min: i32,
        max: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            min,
            max,
            associated_parts: Vec::new(),
        }
    }

    /// Append a part; the same part may be associated more than once
    pub fn add_associated_part(&mut self, part: Part) {
        self.associated_parts.push(part);
    }

    pub fn associated_part_ids(&self) -> Vec<PartId> {
        self.associated_parts.iter().map(|p| p.id).collect()
    }

    pub fn has_associated_parts(&self) -> bool {
        !self.associated_parts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Part {
        Part::outsourced(PartId::new(1), "Frame", 25.0, 20, 1, 100, "Bike Frame Superstore")
    }

    fn tires() -> Part {
        Part::in_house(PartId::new(2), "Large Tires", 12.99, 56, 1, 999, 1223)
    }

    #[test]
    fn test_product_creation() {
        let product = Product::new(ProductId::new(1), "Adult Bike", 300.0, 20, 1, 1000);

        assert_eq!(product.name, "Adult Bike");
        assert!(!product.has_associated_parts());
        assert_eq!(Product::KIND, EntityKind::Product);
    }

    #[test]
    fn test_associated_parts_keep_order() {
        let mut product = Product::new(ProductId::new(1), "Adult Bike", 300.0, 20, 1, 1000);
        product.add_associated_part(tires());
        product.add_associated_part(frame());

        assert_eq!(
            product.associated_part_ids(),
            vec![PartId::new(2), PartId::new(1)]
        );
    }

    #[test]
    fn test_same_part_may_be_associated_twice() {
        let mut product = Product::new(ProductId::new(1), "Tandem", 500.0, 2, 1, 5);
        product.add_associated_part(tires());
        product.add_associated_part(tires());

        assert_eq!(product.associated_parts.len(), 2);
        assert!(product.has_associated_parts());
    }

    #[test]
    fn test_product_roundtrip() {
        let mut product = Product::new(ProductId::new(2), "Kids Bike", 200.0, 12, 1, 200);
        product.add_associated_part(frame());

        let json = serde_json::to_string(&product).unwrap();
        let parsed: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, product);
    }
}
