//! Shopping list domain events.
//!
//! Each successful aggregate transition produces exactly one of these;
//! failed transitions produce none.

use chrono::{DateTime, Utc};
use common::ShoppingListId;
use serde::{Deserialize, Serialize};

use super::{BotId, OrderId};

/// Events emitted by the shopping list aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ShoppingListEvent {
    /// A shopping list was built from an order's items.
    Created(ShoppingListCreatedData),

    /// A fulfillment bot was assigned to the list.
    Assigned(ShoppingListAssignedData),

    /// The list was shopped to completion.
    Completed(ShoppingListCompletedData),

    /// The list was canceled.
    Canceled(ShoppingListCanceledData),
}

impl ShoppingListEvent {
    /// Returns the event type name, used for routing and logging.
    pub fn event_type(&self) -> &'static str {
        match self {
            ShoppingListEvent::Created(_) => "ShoppingListCreated",
            ShoppingListEvent::Assigned(_) => "ShoppingListAssigned",
            ShoppingListEvent::Completed(_) => "ShoppingListCompleted",
            ShoppingListEvent::Canceled(_) => "ShoppingListCanceled",
        }
    }

    /// Returns the id of the shopping list the event concerns.
    pub fn shopping_list_id(&self) -> ShoppingListId {
        match self {
            ShoppingListEvent::Created(data) => data.shopping_list_id,
            ShoppingListEvent::Assigned(data) => data.shopping_list_id,
            ShoppingListEvent::Completed(data) => data.shopping_list_id,
            ShoppingListEvent::Canceled(data) => data.shopping_list_id,
        }
    }
}

/// Data for the Created event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListCreatedData {
    pub shopping_list_id: ShoppingListId,
    pub order_id: OrderId,
    pub created_at: DateTime<Utc>,
}

/// Data for the Assigned event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListAssignedData {
    pub shopping_list_id: ShoppingListId,
    pub bot_id: BotId,
    pub assigned_at: DateTime<Utc>,
}

/// Data for the Completed event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListCompletedData {
    pub shopping_list_id: ShoppingListId,
    pub completed_at: DateTime<Utc>,
}

/// Data for the Canceled event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListCanceledData {
    pub shopping_list_id: ShoppingListId,
    pub canceled_at: DateTime<Utc>,
}

impl ShoppingListEvent {
    /// Creates a Created event.
    pub fn created(shopping_list_id: ShoppingListId, order_id: OrderId) -> Self {
        ShoppingListEvent::Created(ShoppingListCreatedData {
            shopping_list_id,
            order_id,
            created_at: Utc::now(),
        })
    }

    /// Creates an Assigned event.
    pub fn assigned(shopping_list_id: ShoppingListId, bot_id: BotId) -> Self {
        ShoppingListEvent::Assigned(ShoppingListAssignedData {
            shopping_list_id,
            bot_id,
            assigned_at: Utc::now(),
        })
    }

    /// Creates a Completed event.
    pub fn completed(shopping_list_id: ShoppingListId) -> Self {
        ShoppingListEvent::Completed(ShoppingListCompletedData {
            shopping_list_id,
            completed_at: Utc::now(),
        })
    }

    /// Creates a Canceled event.
    pub fn canceled(shopping_list_id: ShoppingListId) -> Self {
        ShoppingListEvent::Canceled(ShoppingListCanceledData {
            shopping_list_id,
            canceled_at: Utc::now(),
        })
    }
}
