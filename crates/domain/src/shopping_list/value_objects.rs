//! Value objects for the shopping list domain.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identifier of the customer order this shopping list fulfills.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Creates a new order ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the order ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Store identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(String);

impl StoreId {
    /// Creates a new store ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the store ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for StoreId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for StoreId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for StoreId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the product ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Fulfillment bot identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BotId(String);

impl BotId {
    /// Creates a new bot ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the bot ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BotId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BotId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A physical store a bot visits during fulfillment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub location: String,
}

impl Store {
    /// Creates a new store.
    pub fn new(id: impl Into<StoreId>, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: location.into(),
        }
    }
}

/// A product a store carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
}

impl Product {
    /// Creates a new product.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A single product line within a stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Product display name.
    pub name: String,

    /// Quantity to pick. Always greater than zero.
    pub quantity: i32,
}

/// A per-store grouping of items within a shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    pub store_name: String,
    pub store_location: String,
    pub items: HashMap<ProductId, Item>,
}

impl Stop {
    /// Creates an empty stop for a store.
    pub fn new(store: &Store) -> Self {
        Self {
            store_name: store.name.clone(),
            store_location: store.location.clone(),
            items: HashMap::new(),
        }
    }
}

/// A raw order line item as submitted at creation.
///
/// Input-only: consumed when building stops, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub store_id: StoreId,
    pub quantity: i32,
}

impl OrderItem {
    /// Creates a new order item.
    pub fn new(
        product_id: impl Into<ProductId>,
        store_id: impl Into<StoreId>,
        quantity: i32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            store_id: store_id.into(),
            quantity,
        }
    }
}

/// An order item with its store and product resolved against the
/// directory/catalog, ready for the aggregate to group into stops.
#[derive(Debug, Clone)]
pub struct LineItem {
    pub store: Store,
    pub product: Product,
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_ids_display_their_value() {
        assert_eq!(StoreId::new("S1").to_string(), "S1");
        assert_eq!(ProductId::new("P1").to_string(), "P1");
        assert_eq!(BotId::new("bot-7").to_string(), "bot-7");
        assert_eq!(OrderId::new("O1").to_string(), "O1");
    }

    #[test]
    fn stop_starts_empty() {
        let store = Store::new("S1", "Corner Grocer", "123 Main St");
        let stop = Stop::new(&store);
        assert_eq!(stop.store_name, "Corner Grocer");
        assert_eq!(stop.store_location, "123 Main St");
        assert!(stop.items.is_empty());
    }

    #[test]
    fn product_id_map_keys_serialize_as_strings() {
        let mut items = HashMap::new();
        items.insert(
            ProductId::new("P1"),
            Item {
                name: "Milk".to_string(),
                quantity: 2,
            },
        );
        let json = serde_json::to_string(&items).unwrap();
        assert!(json.contains("\"P1\""));
    }
}
