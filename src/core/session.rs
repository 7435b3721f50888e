//! Selection-driven inventory workflows
//!
//! A [`Session`] owns the catalog and remembers which part and product the
//! user has selected. Each workflow validates its form, gates construction
//! on a clean result, and only then touches the catalog, so a rejected
//! request leaves both the catalog and the id sequences as they were.
//! Confirmation prompts are the caller's business; every method here acts
//! unconditionally.

use miette::Diagnostic;
use thiserror::Error;
use tracing::info;

use crate::core::catalog::Catalog;
use crate::core::identity::{EntityKind, PartId, ProductId};
use crate::core::validator::{PartForm, ProductForm, ValidationError};
use crate::entities::{Part, Product};

/// Workflow failures. All are recoverable: nothing has been mutated.
#[derive(Debug, Error, Diagnostic)]
pub enum SessionError {
    #[error("No {kind} selected")]
    #[diagnostic(
        code(inventory::session::missing_selection),
        help("select one from the list before running this action")
    )]
    MissingSelection { kind: EntityKind },

    #[error("{name} has {count} associated part(s) that must be removed before it can be deleted")]
    #[diagnostic(
        code(inventory::session::delete_blocked),
        help("modify the product and remove its associated parts first")
    )]
    DeleteBlocked { name: String, count: usize },

    #[error("Part not found: '{0}'")]
    #[diagnostic(code(inventory::session::part_not_found))]
    PartNotFound(String),

    #[error("Product not found: '{0}'")]
    #[diagnostic(code(inventory::session::product_not_found))]
    ProductNotFound(String),

    #[error("Part {0} is not associated with this product")]
    #[diagnostic(code(inventory::session::not_associated))]
    NotAssociated(PartId),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Invalid(#[from] ValidationError),
}

/// Working copy of a product's associated parts while it is being edited
#[derive(Debug, Clone, Default)]
pub struct ProductEditor {
    target: Option<ProductId>,
    associated: Vec<Part>,
}

impl ProductEditor {
    /// The product being modified, or `None` for a new one
    pub fn target(&self) -> Option<ProductId> {
        self.target
    }

    pub fn associated_parts(&self) -> &[Part] {
        &self.associated
    }

    /// Associate a part; the same part may be added more than once
    pub fn add_part(&mut self, part: Part) {
        self.associated.push(part);
    }

    /// Drop the first association with this part id
    pub fn remove_part(&mut self, id: PartId) -> Result<Part, SessionError> {
        let index = self
            .associated
            .iter()
            .position(|p| p.id == id)
            .ok_or(SessionError::NotAssociated(id))?;
        Ok(self.associated.remove(index))
    }
}

/// An inventory session: the catalog plus the user's current selection
#[derive(Debug, Clone, Default)]
pub struct Session {
    catalog: Catalog,
    selected_part: Option<PartId>,
    selected_product: Option<ProductId>,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            selected_part: None,
            selected_product: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn select_part(&mut self, id: PartId) -> Result<&Part, SessionError> {
        let part = self
            .catalog
            .lookup_part(id)
            .ok_or_else(|| SessionError::PartNotFound(id.to_string()))?;
        self.selected_part = Some(id);
        Ok(part)
    }

    pub fn select_product(&mut self, id: ProductId) -> Result<&Product, SessionError> {
        let product = self
            .catalog
            .lookup_product(id)
            .ok_or_else(|| SessionError::ProductNotFound(id.to_string()))?;
        self.selected_product = Some(id);
        Ok(product)
    }

    pub fn clear_selection(&mut self) {
        self.selected_part = None;
        self.selected_product = None;
    }

    pub fn selected_part(&self) -> Option<&Part> {
        self.selected_part.and_then(|id| self.catalog.lookup_part(id))
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.selected_product
            .and_then(|id| self.catalog.lookup_product(id))
    }

    fn require_part(&self) -> Result<&Part, SessionError> {
        self.selected_part().ok_or(SessionError::MissingSelection {
            kind: EntityKind::Part,
        })
    }

    fn require_product(&self) -> Result<&Product, SessionError> {
        self.selected_product()
            .ok_or(SessionError::MissingSelection {
                kind: EntityKind::Product,
            })
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Name search, falling back to an id lookup when no name matches
    pub fn search_parts(&self, query: &str) -> Result<Vec<&Part>, SessionError> {
        let by_name = self.catalog.lookup_parts_by_name(query);
        if !by_name.is_empty() {
            return Ok(by_name);
        }
        query
            .parse::<PartId>()
            .ok()
            .and_then(|id| self.catalog.lookup_part(id))
            .map(|part| vec![part])
            .ok_or_else(|| SessionError::PartNotFound(query.to_string()))
    }

    /// Name search, falling back to an id lookup when no name matches
    pub fn search_products(&self, query: &str) -> Result<Vec<&Product>, SessionError> {
        let by_name = self.catalog.lookup_products_by_name(query);
        if !by_name.is_empty() {
            return Ok(by_name);
        }
        query
            .parse::<ProductId>()
            .ok()
            .and_then(|id| self.catalog.lookup_product(id))
            .map(|product| vec![product])
            .ok_or_else(|| SessionError::ProductNotFound(query.to_string()))
    }

    // =========================================================================
    // Parts
    // =========================================================================

    pub fn add_part(&mut self, form: &PartForm) -> Result<PartId, SessionError> {
        let draft = form.parse()?;
        let id = self.catalog.next_part_id();
        self.catalog.add_part(draft.into_part(id));
        self.catalog.advance_part_id_seq();
        Ok(id)
    }

    /// Replace the selected part, keeping its id and position
    pub fn modify_selected_part(&mut self, form: &PartForm) -> Result<&Part, SessionError> {
        let id = self.require_part()?.id;
        let draft = form.parse()?;
        if !self.catalog.update_part(id, draft.into_part(id)) {
            return Err(SessionError::PartNotFound(id.to_string()));
        }
        self.require_part()
    }

    pub fn delete_selected_part(&mut self) -> Result<Part, SessionError> {
        let part = self.require_part()?.clone();
        if !self.catalog.delete_part(part.id) {
            return Err(SessionError::PartNotFound(part.id.to_string()));
        }
        self.selected_part = None;
        Ok(part)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Start editing a new product with no associated parts
    pub fn begin_product(&self) -> ProductEditor {
        ProductEditor::default()
    }

    /// Start editing the selected product's associated parts
    pub fn edit_selected_product(&self) -> Result<ProductEditor, SessionError> {
        let product = self.require_product()?;
        Ok(ProductEditor {
            target: Some(product.id),
            associated: product.associated_parts.clone(),
        })
    }

    /// Add or replace a product from an editor and its form
    pub fn save_product(
        &mut self,
        editor: ProductEditor,
        form: &ProductForm,
    ) -> Result<ProductId, SessionError> {
        let draft = form.parse()?;
        match editor.target {
            Some(id) => {
                let product = draft.into_product(id, editor.associated);
                if !self.catalog.update_product(id, product) {
                    return Err(SessionError::ProductNotFound(id.to_string()));
                }
                Ok(id)
            }
            None => {
                let id = self.catalog.next_product_id();
                self.catalog
                    .add_product(draft.into_product(id, editor.associated));
                self.catalog.advance_product_id_seq();
                Ok(id)
            }
        }
    }

    pub fn delete_selected_product(&mut self) -> Result<Product, SessionError> {
        let product = self.require_product()?.clone();
        if product.has_associated_parts() {
            return Err(SessionError::DeleteBlocked {
                name: product.name,
                count: product.associated_parts.len(),
            });
        }
        if !self.catalog.delete_product(product.id) {
            return Err(SessionError::ProductNotFound(product.id.to_string()));
        }
        info!(id = %product.id, "selected product deleted");
        self.selected_product = None;
        Ok(product)
    }
}
