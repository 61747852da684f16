//! Shopping list aggregate and related types.

mod aggregate;
mod commands;
mod events;
mod queries;
mod service;
mod status;
mod value_objects;

pub use aggregate::ShoppingList;
pub use commands::{
    AssignShoppingList, CancelShoppingList, CompleteShoppingList, CreateShoppingList,
    InitiateShopping,
};
pub use events::{
    ShoppingListAssignedData, ShoppingListCanceledData, ShoppingListCompletedData,
    ShoppingListCreatedData, ShoppingListEvent,
};
pub use queries::GetShoppingList;
pub use service::{DepotApp, DepotService};
pub use status::ShoppingListStatus;
pub use value_objects::{
    BotId, Item, LineItem, OrderId, OrderItem, Product, ProductId, Stop, Store, StoreId,
};

use thiserror::Error;

/// Errors produced by shopping list transitions.
#[derive(Debug, Error)]
pub enum ShoppingListError {
    /// The submitted item list was empty.
    #[error("shopping list has no items")]
    NoItems,

    /// An item was submitted with a non-positive quantity.
    #[error("invalid quantity {quantity} for product {product_id} (must be greater than 0)")]
    InvalidQuantity { product_id: ProductId, quantity: i32 },

    /// The shopping list is not in the expected status.
    #[error("invalid state transition: cannot {action} from {status} status")]
    InvalidStateTransition {
        status: ShoppingListStatus,
        action: &'static str,
    },
}
