//! Shopping list lifecycle state machine.

use serde::{Deserialize, Serialize};

/// The status of a shopping list in its lifecycle.
///
/// Status transitions:
/// ```text
/// Created ──► Assigned ──► Completed
///    │            │
///    └────────────┴──► Canceled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ShoppingListStatus {
    /// List was built from the order's items and awaits a bot.
    #[default]
    Created,

    /// A fulfillment bot has been assigned.
    Assigned,

    /// All stops were shopped (terminal status).
    Completed,

    /// The list was canceled (terminal status).
    Canceled,
}

impl ShoppingListStatus {
    /// Returns true if a bot can be assigned in this status.
    pub fn can_assign(&self) -> bool {
        matches!(self, ShoppingListStatus::Created)
    }

    /// Returns true if the list can be completed in this status.
    pub fn can_complete(&self) -> bool {
        matches!(self, ShoppingListStatus::Assigned)
    }

    /// Returns true if the list can be canceled in this status.
    pub fn can_cancel(&self) -> bool {
        matches!(
            self,
            ShoppingListStatus::Created | ShoppingListStatus::Assigned
        )
    }

    /// Returns true if this is a terminal status (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ShoppingListStatus::Completed | ShoppingListStatus::Canceled
        )
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShoppingListStatus::Created => "Created",
            ShoppingListStatus::Assigned => "Assigned",
            ShoppingListStatus::Completed => "Completed",
            ShoppingListStatus::Canceled => "Canceled",
        }
    }
}

impl std::fmt::Display for ShoppingListStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_created() {
        assert_eq!(ShoppingListStatus::default(), ShoppingListStatus::Created);
    }

    #[test]
    fn only_created_can_assign() {
        assert!(ShoppingListStatus::Created.can_assign());
        assert!(!ShoppingListStatus::Assigned.can_assign());
        assert!(!ShoppingListStatus::Completed.can_assign());
        assert!(!ShoppingListStatus::Canceled.can_assign());
    }

    #[test]
    fn only_assigned_can_complete() {
        assert!(!ShoppingListStatus::Created.can_complete());
        assert!(ShoppingListStatus::Assigned.can_complete());
        assert!(!ShoppingListStatus::Completed.can_complete());
        assert!(!ShoppingListStatus::Canceled.can_complete());
    }

    #[test]
    fn cancel_allowed_from_non_terminal_statuses() {
        assert!(ShoppingListStatus::Created.can_cancel());
        assert!(ShoppingListStatus::Assigned.can_cancel());
        assert!(!ShoppingListStatus::Completed.can_cancel());
        assert!(!ShoppingListStatus::Canceled.can_cancel());
    }

    #[test]
    fn terminal_statuses() {
        assert!(!ShoppingListStatus::Created.is_terminal());
        assert!(!ShoppingListStatus::Assigned.is_terminal());
        assert!(ShoppingListStatus::Completed.is_terminal());
        assert!(ShoppingListStatus::Canceled.is_terminal());
    }

    #[test]
    fn display() {
        assert_eq!(ShoppingListStatus::Created.to_string(), "Created");
        assert_eq!(ShoppingListStatus::Assigned.to_string(), "Assigned");
        assert_eq!(ShoppingListStatus::Completed.to_string(), "Completed");
        assert_eq!(ShoppingListStatus::Canceled.to_string(), "Canceled");
    }

    #[test]
    fn serialization_roundtrip() {
        let status = ShoppingListStatus::Assigned;
        let json = serde_json::to_string(&status).unwrap();
        let deserialized: ShoppingListStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(status, deserialized);
    }
}
