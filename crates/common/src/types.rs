use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a shopping list aggregate.
///
/// Wraps a UUID to provide type safety and prevent mixing up
/// shopping list IDs with other UUID-based identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoppingListId(Uuid);

impl ShoppingListId {
    /// Creates a new random shopping list ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a shopping list ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses a shopping list ID from its string form.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ShoppingListId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ShoppingListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ShoppingListId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ShoppingListId> for Uuid {
    fn from(id: ShoppingListId) -> Self {
        id.0
    }
}
