//! Lint rules organized by category.

pub mod modifier;

pub use modifier::ModifierOrder;
