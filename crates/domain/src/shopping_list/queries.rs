//! Shopping list queries.

use common::ShoppingListId;

/// Query for a read-only snapshot of a shopping list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetShoppingList {
    pub id: ShoppingListId,
}

impl GetShoppingList {
    /// Creates a new GetShoppingList query.
    pub fn new(id: ShoppingListId) -> Self {
        Self { id }
    }
}
