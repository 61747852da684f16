//! Domain layer for the depot shopping-list system.
//!
//! This crate provides:
//! - The `ShoppingList` aggregate with its lifecycle state machine
//! - Domain events emitted by successful transitions
//! - Command and query structs consumed by the application service
//! - The `DepotApp` capability trait and its `DepotService` implementation
//! - Store/product lookup traits used to resolve raw order items
//! - Hand-written test doubles under [`testing`]

pub mod catalog;
pub mod error;
pub mod publish;
pub mod shopping_list;
pub mod testing;

pub use catalog::{InMemoryProductCatalog, InMemoryStoreDirectory, ProductCatalog, StoreDirectory};
pub use error::{DepotError, Retryability};
pub use publish::{EventPublisher, LoggingEventPublisher, PublishError};
pub use shopping_list::{
    AssignShoppingList, BotId, CancelShoppingList, CompleteShoppingList, CreateShoppingList,
    DepotApp, DepotService, GetShoppingList, InitiateShopping, Item, LineItem, OrderId, OrderItem,
    Product, ProductId, ShoppingList, ShoppingListError, ShoppingListEvent, ShoppingListStatus,
    Stop, Store, StoreId,
};
