//! In-memory catalog of parts and products
//!
//! The catalog is the single source of truth for inventory state. It does
//! no validation of its own: callers validate with [`crate::core::validator`]
//! before constructing the entities they hand in.
//!
//! Entries are keyed by id in insertion-ordered maps, so listings and
//! searches keep the order in which entities were added, and updates
//! replace an entry at its existing position.

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::core::entity::Entity;
use crate::core::identity::{IdSequence, PartId, ProductId};
use crate::entities::{Part, Product};

/// Parts, products and their id sequences.
///
/// All mutation goes through `&mut self`. The next-id read and the
/// sequence advance are separate calls; a host sharing one catalog between
/// threads must perform both under a single lock acquisition.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    parts: IndexMap<PartId, Part>,
    products: IndexMap<ProductId, Product>,
    part_ids: IdSequence,
    product_ids: IdSequence,
}

impl Catalog {
    /// Create an empty catalog whose sequences both start at 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the reference catalog: three bike parts and two bikes.
    ///
    /// Afterwards the next part id is 4 and the next product id is 3.
    pub fn seeded() -> Self {
        let mut catalog = Self::new();

        let frame = Part::outsourced(
            PartId::new(1),
            "Frame",
            25.00,
            20,
            1,
            100,
            "Bike Frame Superstore",
        );
        let large_tires = Part::in_house(PartId::new(2), "Large Tires", 12.99, 56, 1, 999, 1223);
        let small_tires = Part::in_house(PartId::new(3), "Small Tires", 4.99, 33, 1, 270, 1224);

        let mut adult_bike = Product::new(ProductId::new(1), "Adult Bike", 300.00, 20, 1, 1000);
        adult_bike.add_associated_part(large_tires.clone());
        adult_bike.add_associated_part(frame.clone());
        let kids_bike = Product::new(ProductId::new(2), "Kids Bike", 200.00, 12, 1, 200);

        for part in [frame, large_tires, small_tires] {
            catalog.add_part(part);
            catalog.advance_part_id_seq();
        }
        for product in [adult_bike, kids_bike] {
            catalog.add_product(product);
            catalog.advance_product_id_seq();
        }

        catalog
    }

    // =========================================================================
    // Parts
    // =========================================================================

    /// Append a part. An entry with the same id is replaced in place.
    pub fn add_part(&mut self, part: Part) {
        info!(id = %part.id, name = %part.name, "adding part");
        if let Some(previous) = self.parts.insert(part.id, part) {
            warn!(id = %previous.id, "part id already present, previous entry replaced");
        }
    }

    pub fn lookup_part(&self, id: PartId) -> Option<&Part> {
        debug!(%id, "part lookup");
        self.parts.get(&id)
    }

    /// Case-insensitive substring search over part names, in catalog order
    pub fn lookup_parts_by_name(&self, fragment: &str) -> Vec<&Part> {
        let found = matching(self.parts.values(), fragment);
        debug!(fragment, hits = found.len(), "part name search");
        found
    }

    /// Replace the part with `id`, keeping its position.
    ///
    /// Returns false without touching the catalog when `id` is unknown or
    /// `part` carries a different id.
    pub fn update_part(&mut self, id: PartId, part: Part) -> bool {
        if part.id != id {
            warn!(%id, new_id = %part.id, "refusing part update with mismatched id");
            return false;
        }
        match self.parts.get_mut(&id) {
            Some(slot) => {
                info!(%id, name = %part.name, "updating part");
                *slot = part;
                true
            }
            None => false,
        }
    }

    /// Remove a part; the rest keep their order
    pub fn delete_part(&mut self, id: PartId) -> bool {
        let removed = self.parts.shift_remove(&id).is_some();
        if removed {
            info!(%id, "deleted part");
        }
        removed
    }

    pub fn next_part_id(&self) -> PartId {
        PartId::new(self.part_ids.peek())
    }

    pub fn advance_part_id_seq(&mut self) {
        self.part_ids.advance();
    }

    pub fn all_parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.values()
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn position_of_part(&self, id: PartId) -> Option<usize> {
        self.parts.get_index_of(&id)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Append a product. An entry with the same id is replaced in place.
    pub fn add_product(&mut self, product: Product) {
        info!(id = %product.id, name = %product.name, "adding product");
        if let Some(previous) = self.products.insert(product.id, product) {
            warn!(id = %previous.id, "product id already present, previous entry replaced");
        }
    }

    pub fn lookup_product(&self, id: ProductId) -> Option<&Product> {
        debug!(%id, "product lookup");
        self.products.get(&id)
    }

    /// Case-insensitive substring search over product names, in catalog order
    pub fn lookup_products_by_name(&self, fragment: &str) -> Vec<&Product> {
        let found = matching(self.products.values(), fragment);
        debug!(fragment, hits = found.len(), "product name search");
        found
    }

    /// Replace the product with `id`, keeping its position
    pub fn update_product(&mut self, id: ProductId, product: Product) -> bool {
        if product.id != id {
            warn!(%id, new_id = %product.id, "refusing product update with mismatched id");
            return false;
        }
        match self.products.get_mut(&id) {
            Some(slot) => {
                info!(%id, name = %product.name, "updating product");
                *slot = product;
                true
            }
            None => false,
        }
    }

    /// Remove a product, but only when it has no associated parts
    pub fn delete_product(&mut self, id: ProductId) -> bool {
        let associated = match self.products.get(&id) {
            Some(product) => product.associated_parts.len(),
            None => return false,
        };
        if associated > 0 {
            warn!(%id, associated, "product still has associated parts, not deleted");
            return false;
        }
        self.products.shift_remove(&id);
        info!(%id, "deleted product");
        true
    }

    pub fn next_product_id(&self) -> ProductId {
        ProductId::new(self.product_ids.peek())
    }

    pub fn advance_product_id_seq(&mut self) {
        self.product_ids.advance();
    }

    pub fn all_products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn position_of_product(&self, id: ProductId) -> Option<usize> {
        self.products.get_index_of(&id)
    }
}

fn matching<'a, E: Entity + 'a>(
    entities: impl Iterator<Item = &'a E>,
    fragment: &str,
) -> Vec<&'a E> {
    entities.filter(|e| e.name_contains(fragment)).collect()
}
