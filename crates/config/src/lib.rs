//! Configuration management for the Spacebears service
//!
//! This crate declares the recognized environment keys, reads them from
//! the process environment into a typed [`Config`], and reports settings
//! worth a second look.

pub mod fields;
pub mod loader;
pub mod schema;
pub mod validation;

pub use fields::{FieldKind, FieldSpec, FIELDS};
pub use loader::ConfigLoader;
pub use schema::*;
pub use validation::*;
