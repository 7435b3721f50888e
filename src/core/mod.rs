//! Core module - catalog, validation and session workflows

pub mod catalog;
pub mod config;
pub mod entity;
pub mod identity;
pub mod session;
pub mod validator;

pub use catalog::Catalog;
pub use config::Config;
pub use entity::Entity;
pub use identity::{EntityKind, IdParseError, IdSequence, PartId, ProductId};
pub use session::{ProductEditor, Session, SessionError};
pub use validator::{
    validate_part, validate_product, Field, PartDraft, PartForm, ProductDraft, ProductForm,
    SourceForm, ValidationError, Violation,
};
