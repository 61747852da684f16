//! Depot error types and retry classification.

use common::ShoppingListId;
use repository::StoreError;
use thiserror::Error;

use crate::publish::PublishError;
use crate::shopping_list::{ProductId, ShoppingListError, StoreId};

/// Whether a failed operation is worth retrying.
///
/// The messaging layer surfaces this to callers so they can decide between
/// redelivery and giving up; it never retries on their behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retryability {
    /// The failure will recur on replay (validation, unknown id, bad
    /// transition). Do not retry.
    Permanent,

    /// The failure is environmental (version conflict, storage or bus
    /// outage). Safe to retry.
    Transient,
}

/// Errors that can occur during depot application operations.
#[derive(Debug, Error)]
pub enum DepotError {
    /// The aggregate rejected a transition.
    #[error("shopping list error: {0}")]
    ShoppingList(#[from] ShoppingListError),

    /// No shopping list exists with the given id.
    #[error("shopping list not found: {0}")]
    NotFound(ShoppingListId),

    /// An order item referenced an unknown store.
    #[error("store not found: {0}")]
    StoreNotFound(StoreId),

    /// An order item referenced an unknown product.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// The repository failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Event publication failed after a successful save.
    #[error("publish error: {0}")]
    Publish(#[from] PublishError),
}

impl DepotError {
    /// Classifies the error for retry decisions.
    pub fn retryability(&self) -> Retryability {
        match self {
            DepotError::ShoppingList(_)
            | DepotError::NotFound(_)
            | DepotError::StoreNotFound(_)
            | DepotError::ProductNotFound(_) => Retryability::Permanent,
            DepotError::Store(e) => {
                if e.is_transient() {
                    Retryability::Transient
                } else {
                    Retryability::Permanent
                }
            }
            DepotError::Publish(_) => Retryability::Transient,
        }
    }

    /// Returns true if the error is safe to retry.
    pub fn is_transient(&self) -> bool {
        self.retryability() == Retryability::Transient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repository::Version;

    #[test]
    fn domain_failures_are_permanent() {
        assert_eq!(
            DepotError::ShoppingList(ShoppingListError::NoItems).retryability(),
            Retryability::Permanent
        );
        assert_eq!(
            DepotError::NotFound(ShoppingListId::new()).retryability(),
            Retryability::Permanent
        );
        assert_eq!(
            DepotError::StoreNotFound(StoreId::new("S1")).retryability(),
            Retryability::Permanent
        );
    }

    #[test]
    fn conflicts_and_outages_are_transient() {
        let conflict = DepotError::Store(StoreError::ConcurrencyConflict {
            id: "x".to_string(),
            expected: Version::new(1),
            actual: Version::new(2),
        });
        assert!(conflict.is_transient());

        let outage = DepotError::Store(StoreError::Unavailable("down".to_string()));
        assert!(outage.is_transient());

        let publish = DepotError::Publish(PublishError("bus down".to_string()));
        assert!(publish.is_transient());
    }
}
