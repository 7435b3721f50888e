//! Inventory System
//!
//! An in-memory catalog of parts and products, the validation rules that
//! gate every create and modify, and a command-line front end.

pub mod cli;
pub mod core;
pub mod entities;
