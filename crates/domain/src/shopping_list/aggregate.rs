//! Shopping list aggregate implementation.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use common::ShoppingListId;
use repository::{Persistable, Version};
use serde::{Deserialize, Serialize};

use super::{
    BotId, Item, LineItem, OrderId, ProductId, ShoppingListError, ShoppingListEvent,
    ShoppingListStatus, Stop, StoreId,
};

/// Shopping list aggregate root.
///
/// A shopping list is the depot-side projection of a customer order: the
/// order's raw items grouped into per-store stops, assigned to a fulfillment
/// bot and driven through completion or cancellation. All lifecycle
/// invariants are enforced here; transitions either return exactly one
/// domain event or an error with the state untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingList {
    /// Unique list identifier. Immutable after creation.
    id: ShoppingListId,

    /// The customer order this list fulfills.
    order_id: OrderId,

    /// Per-store pick lists, keyed by store ID.
    stops: HashMap<StoreId, Stop>,

    /// The assigned fulfillment bot. None until Assigned, then set for good.
    assigned_bot_id: Option<BotId>,

    /// Current lifecycle status.
    status: ShoppingListStatus,

    /// Version for optimistic concurrency, maintained by the repository.
    #[serde(default)]
    version: Version,
}

impl Persistable for ShoppingList {
    type Id = ShoppingListId;

    fn id(&self) -> ShoppingListId {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }
}

// Query methods
impl ShoppingList {
    /// Returns the list identifier.
    pub fn id(&self) -> ShoppingListId {
        self.id
    }

    /// Returns the order this list fulfills.
    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// Returns the current status.
    pub fn status(&self) -> ShoppingListStatus {
        self.status
    }

    /// Returns the assigned bot, if any.
    pub fn assigned_bot_id(&self) -> Option<&BotId> {
        self.assigned_bot_id.as_ref()
    }

    /// Returns all stops keyed by store ID.
    pub fn stops(&self) -> &HashMap<StoreId, Stop> {
        &self.stops
    }

    /// Returns the stop for a store, if present.
    pub fn stop(&self, store_id: &StoreId) -> Option<&Stop> {
        self.stops.get(store_id)
    }

    /// Returns the stored quantity for a `(store, product)` pair, if present.
    pub fn quantity_of(&self, store_id: &StoreId, product_id: &ProductId) -> Option<i32> {
        self.stops
            .get(store_id)
            .and_then(|stop| stop.items.get(product_id))
            .map(|item| item.quantity)
    }

    /// Returns true if the list is in a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

// Transitions
impl ShoppingList {
    /// Builds a new shopping list from resolved order items.
    ///
    /// Items are grouped by store, then by product within each store;
    /// duplicate `(store, product)` pairs merge by summing their quantities.
    /// Fails if the item list is empty, any quantity is not positive, or a
    /// merged quantity would overflow.
    pub fn create(
        id: ShoppingListId,
        order_id: OrderId,
        items: Vec<LineItem>,
    ) -> Result<(Self, ShoppingListEvent), ShoppingListError> {
        if items.is_empty() {
            return Err(ShoppingListError::NoItems);
        }

        let mut stops: HashMap<StoreId, Stop> = HashMap::new();
        for line in items {
            if line.quantity <= 0 {
                return Err(ShoppingListError::InvalidQuantity {
                    product_id: line.product.id,
                    quantity: line.quantity,
                });
            }

            let stop = stops
                .entry(line.store.id.clone())
                .or_insert_with(|| Stop::new(&line.store));

            match stop.items.entry(line.product.id.clone()) {
                Entry::Occupied(mut entry) => {
                    let item = entry.get_mut();
                    item.quantity = item.quantity.checked_add(line.quantity).ok_or(
                        ShoppingListError::InvalidQuantity {
                            product_id: line.product.id,
                            quantity: line.quantity,
                        },
                    )?;
                }
                Entry::Vacant(entry) => {
                    entry.insert(Item {
                        name: line.product.name,
                        quantity: line.quantity,
                    });
                }
            }
        }

        let list = Self {
            id,
            order_id: order_id.clone(),
            stops,
            assigned_bot_id: None,
            status: ShoppingListStatus::Created,
            version: Version::initial(),
        };

        Ok((list, ShoppingListEvent::created(id, order_id)))
    }

    /// Assigns a fulfillment bot to the list.
    pub fn assign(&mut self, bot_id: BotId) -> Result<ShoppingListEvent, ShoppingListError> {
        if !self.status.can_assign() {
            return Err(ShoppingListError::InvalidStateTransition {
                status: self.status,
                action: "assign",
            });
        }

        self.assigned_bot_id = Some(bot_id.clone());
        self.status = ShoppingListStatus::Assigned;

        Ok(ShoppingListEvent::assigned(self.id, bot_id))
    }

    /// Marks the list as shopped to completion.
    pub fn complete(&mut self) -> Result<ShoppingListEvent, ShoppingListError> {
        if !self.status.can_complete() {
            return Err(ShoppingListError::InvalidStateTransition {
                status: self.status,
                action: "complete",
            });
        }

        self.status = ShoppingListStatus::Completed;

        Ok(ShoppingListEvent::completed(self.id))
    }

    /// Cancels the list.
    pub fn cancel(&mut self) -> Result<ShoppingListEvent, ShoppingListError> {
        if !self.status.can_cancel() {
            return Err(ShoppingListError::InvalidStateTransition {
                status: self.status,
                action: "cancel",
            });
        }

        self.status = ShoppingListStatus::Canceled;

        Ok(ShoppingListEvent::canceled(self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shopping_list::{Product, Store};

    fn line(store_id: &str, product_id: &str, quantity: i32) -> LineItem {
        LineItem {
            store: Store::new(store_id, format!("{store_id} name"), format!("{store_id} loc")),
            product: Product::new(product_id, format!("{product_id} name")),
            quantity,
        }
    }

    fn created_list(items: Vec<LineItem>) -> ShoppingList {
        let (list, _) =
            ShoppingList::create(ShoppingListId::new(), OrderId::new("O1"), items).unwrap();
        list
    }

    #[test]
    fn create_groups_items_by_store_then_product() {
        let list = created_list(vec![
            line("S1", "P1", 2),
            line("S1", "P2", 1),
            line("S2", "P3", 5),
        ]);

        assert_eq!(list.stops().len(), 2);
        assert_eq!(list.quantity_of(&StoreId::new("S1"), &ProductId::new("P1")), Some(2));
        assert_eq!(list.quantity_of(&StoreId::new("S1"), &ProductId::new("P2")), Some(1));
        assert_eq!(list.quantity_of(&StoreId::new("S2"), &ProductId::new("P3")), Some(5));
        assert_eq!(list.status(), ShoppingListStatus::Created);
        assert!(list.assigned_bot_id().is_none());
    }

    #[test]
    fn create_merges_duplicate_store_product_pairs() {
        // Merge policy: duplicate (store, product) pairs sum their quantities.
        let list = created_list(vec![
            line("S1", "P1", 2),
            line("S1", "P1", 3),
            line("S2", "P1", 4),
        ]);

        assert_eq!(list.quantity_of(&StoreId::new("S1"), &ProductId::new("P1")), Some(5));
        assert_eq!(list.quantity_of(&StoreId::new("S2"), &ProductId::new("P1")), Some(4));
    }

    #[test]
    fn create_with_overflowing_merged_quantity_fails() {
        let result = ShoppingList::create(
            ShoppingListId::new(),
            OrderId::new("O1"),
            vec![line("S1", "P1", 2_000_000_000), line("S1", "P1", 2_000_000_000)],
        );
        assert!(matches!(
            result,
            Err(ShoppingListError::InvalidQuantity { quantity: 2_000_000_000, .. })
        ));
    }

    #[test]
    fn create_fills_stop_details_from_store() {
        let list = created_list(vec![line("S1", "P1", 1)]);
        let stop = list.stop(&StoreId::new("S1")).unwrap();
        assert_eq!(stop.store_name, "S1 name");
        assert_eq!(stop.store_location, "S1 loc");
        assert_eq!(stop.items[&ProductId::new("P1")].name, "P1 name");
    }

    #[test]
    fn create_with_no_items_fails() {
        let result = ShoppingList::create(ShoppingListId::new(), OrderId::new("O1"), vec![]);
        assert!(matches!(result, Err(ShoppingListError::NoItems)));
    }

    #[test]
    fn create_with_non_positive_quantity_fails() {
        for quantity in [0, -3] {
            let result = ShoppingList::create(
                ShoppingListId::new(),
                OrderId::new("O1"),
                vec![line("S1", "P1", quantity)],
            );
            assert!(matches!(
                result,
                Err(ShoppingListError::InvalidQuantity { quantity: q, .. }) if q == quantity
            ));
        }
    }

    #[test]
    fn assign_from_created_succeeds() {
        let mut list = created_list(vec![line("S1", "P1", 1)]);
        let event = list.assign(BotId::new("bot-7")).unwrap();

        assert_eq!(list.status(), ShoppingListStatus::Assigned);
        assert_eq!(list.assigned_bot_id(), Some(&BotId::new("bot-7")));
        assert_eq!(event.event_type(), "ShoppingListAssigned");
    }

    #[test]
    fn assign_twice_fails_and_keeps_first_bot() {
        let mut list = created_list(vec![line("S1", "P1", 1)]);
        list.assign(BotId::new("bot-7")).unwrap();

        let result = list.assign(BotId::new("bot-9"));
        assert!(matches!(
            result,
            Err(ShoppingListError::InvalidStateTransition { action: "assign", .. })
        ));
        assert_eq!(list.assigned_bot_id(), Some(&BotId::new("bot-7")));
        assert_eq!(list.status(), ShoppingListStatus::Assigned);
    }

    #[test]
    fn complete_requires_assigned() {
        let mut list = created_list(vec![line("S1", "P1", 1)]);
        let result = list.complete();
        assert!(matches!(
            result,
            Err(ShoppingListError::InvalidStateTransition { action: "complete", .. })
        ));
        assert_eq!(list.status(), ShoppingListStatus::Created);

        list.assign(BotId::new("bot-7")).unwrap();
        let event = list.complete().unwrap();
        assert_eq!(list.status(), ShoppingListStatus::Completed);
        assert_eq!(event.event_type(), "ShoppingListCompleted");
    }

    #[test]
    fn cancel_from_created_and_assigned() {
        let mut list = created_list(vec![line("S1", "P1", 1)]);
        list.cancel().unwrap();
        assert_eq!(list.status(), ShoppingListStatus::Canceled);

        let mut list = created_list(vec![line("S1", "P1", 1)]);
        list.assign(BotId::new("bot-7")).unwrap();
        let event = list.cancel().unwrap();
        assert_eq!(list.status(), ShoppingListStatus::Canceled);
        assert_eq!(event.event_type(), "ShoppingListCanceled");
    }

    #[test]
    fn terminal_statuses_reject_all_transitions() {
        let mut completed = created_list(vec![line("S1", "P1", 1)]);
        completed.assign(BotId::new("bot-7")).unwrap();
        completed.complete().unwrap();

        let mut canceled = created_list(vec![line("S1", "P1", 1)]);
        canceled.cancel().unwrap();

        for list in [&mut completed, &mut canceled] {
            let before = list.status();
            assert!(list.assign(BotId::new("bot-9")).is_err());
            assert!(list.complete().is_err());
            assert!(list.cancel().is_err());
            assert_eq!(list.status(), before);
        }
    }

    #[test]
    fn replayed_complete_is_rejected_not_reapplied() {
        let mut list = created_list(vec![line("S1", "P1", 1)]);
        list.assign(BotId::new("bot-7")).unwrap();
        list.complete().unwrap();

        // At-least-once delivery can replay the command; no second event.
        assert!(matches!(
            list.complete(),
            Err(ShoppingListError::InvalidStateTransition { .. })
        ));
        assert_eq!(list.status(), ShoppingListStatus::Completed);
    }

    #[test]
    fn serialization_roundtrip() {
        let list = created_list(vec![line("S1", "P1", 2), line("S2", "P2", 1)]);
        let json = serde_json::to_string(&list).unwrap();
        let deserialized: ShoppingList = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.id(), list.id());
        assert_eq!(deserialized.stops().len(), 2);
        assert_eq!(deserialized.status(), ShoppingListStatus::Created);
    }
}
