//! Shared identifier types used across the depot crates.

mod types;

pub use types::ShoppingListId;
