//! Modifier rules for checking modifier usage and ordering.

pub mod common;
pub mod modifier_order;

pub use modifier_order::ModifierOrder;
