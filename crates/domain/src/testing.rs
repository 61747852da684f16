//! Hand-written test doubles.
//!
//! Kept in the library (not behind `cfg(test)`) so downstream crates can use
//! them in their own tests and demo wiring.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::DepotError;
use crate::publish::{EventPublisher, PublishError};
use crate::shopping_list::{
    AssignShoppingList, CancelShoppingList, CompleteShoppingList, CreateShoppingList, DepotApp,
    GetShoppingList, InitiateShopping, ShoppingList, ShoppingListEvent,
};

/// Event publisher that records everything it is handed.
#[derive(Clone, Default)]
pub struct RecordingPublisher {
    events: Arc<Mutex<Vec<ShoppingListEvent>>>,
}

impl RecordingPublisher {
    /// Creates an empty recording publisher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all published events, in publication order.
    pub async fn events(&self) -> Vec<ShoppingListEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: ShoppingListEvent) -> Result<(), PublishError> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

/// Names of the operations a [`FakeApp`] can record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Create(CreateShoppingList),
    Cancel(CancelShoppingList),
    Assign(AssignShoppingList),
    Complete(CompleteShoppingList),
    Initiate(InitiateShopping),
    Get(GetShoppingList),
}

/// Hand-written fake implementing the full [`DepotApp`] capability set.
///
/// Records every received command and returns `Ok` by default; a single
/// error can be queued with [`FakeApp::fail_next`] to drive failure paths.
#[derive(Clone, Default)]
pub struct FakeApp {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    next_error: Arc<Mutex<Option<DepotError>>>,
    snapshot: Arc<Mutex<Option<ShoppingList>>>,
}

impl FakeApp {
    /// Creates a fake that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an error to be returned by the next operation.
    pub async fn fail_next(&self, error: DepotError) {
        *self.next_error.lock().await = Some(error);
    }

    /// Sets the snapshot returned by `get_shopping_list`.
    pub async fn set_snapshot(&self, list: ShoppingList) {
        *self.snapshot.lock().await = Some(list);
    }

    /// Returns every call recorded so far, in order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: RecordedCall) -> Result<(), DepotError> {
        self.calls.lock().await.push(call);
        match self.next_error.lock().await.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DepotApp for FakeApp {
    async fn create_shopping_list(&self, cmd: CreateShoppingList) -> Result<(), DepotError> {
        self.record(RecordedCall::Create(cmd)).await
    }

    async fn cancel_shopping_list(&self, cmd: CancelShoppingList) -> Result<(), DepotError> {
        self.record(RecordedCall::Cancel(cmd)).await
    }

    async fn assign_shopping_list(&self, cmd: AssignShoppingList) -> Result<(), DepotError> {
        self.record(RecordedCall::Assign(cmd)).await
    }

    async fn complete_shopping_list(&self, cmd: CompleteShoppingList) -> Result<(), DepotError> {
        self.record(RecordedCall::Complete(cmd)).await
    }

    async fn initiate_shopping(&self, cmd: InitiateShopping) -> Result<(), DepotError> {
        self.record(RecordedCall::Initiate(cmd)).await
    }

    async fn get_shopping_list(&self, query: GetShoppingList) -> Result<ShoppingList, DepotError> {
        let id = query.id;
        self.record(RecordedCall::Get(query)).await?;
        self.snapshot
            .lock()
            .await
            .clone()
            .ok_or(DepotError::NotFound(id))
    }
}
