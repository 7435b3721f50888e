//! CLI command implementations

pub mod forms;

pub mod completions;
pub mod part;
pub mod product;
pub mod shell;
