//! Shopping list commands.
//!
//! Plain data carried from the message translator (or the RPC mirror) into
//! the application service. No business rules live here.

use common::ShoppingListId;

use super::{BotId, OrderId, OrderItem};

/// Command to create a new shopping list from an order's items.
///
/// The id is generated by the caller (the command translator), not by the
/// aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateShoppingList {
    pub id: ShoppingListId,
    pub order_id: OrderId,
    pub items: Vec<OrderItem>,
}

impl CreateShoppingList {
    /// Creates a new CreateShoppingList command.
    pub fn new(id: ShoppingListId, order_id: impl Into<OrderId>, items: Vec<OrderItem>) -> Self {
        Self {
            id,
            order_id: order_id.into(),
            items,
        }
    }
}

/// Command to cancel a shopping list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelShoppingList {
    pub id: ShoppingListId,
}

impl CancelShoppingList {
    /// Creates a new CancelShoppingList command.
    pub fn new(id: ShoppingListId) -> Self {
        Self { id }
    }
}

/// Command to assign a fulfillment bot to a shopping list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignShoppingList {
    pub id: ShoppingListId,
    pub bot_id: BotId,
}

impl AssignShoppingList {
    /// Creates a new AssignShoppingList command.
    pub fn new(id: ShoppingListId, bot_id: impl Into<BotId>) -> Self {
        Self {
            id,
            bot_id: bot_id.into(),
        }
    }
}

/// Command to mark a shopping list as completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteShoppingList {
    pub id: ShoppingListId,
}

impl CompleteShoppingList {
    /// Creates a new CompleteShoppingList command.
    pub fn new(id: ShoppingListId) -> Self {
        Self { id }
    }
}

/// Command signaling that shopping may begin for a list.
///
/// Recognized and acknowledged; the bot workflow it triggers lives outside
/// this core, so no status transition is performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiateShopping {
    pub id: ShoppingListId,
}

impl InitiateShopping {
    /// Creates a new InitiateShopping command.
    pub fn new(id: ShoppingListId) -> Self {
        Self { id }
    }
}
