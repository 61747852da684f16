//! Depot application service.
//!
//! One operation per command, each a single unit of atomicity over exactly
//! one shopping list: load (or build), invoke the transition, save, and only
//! then publish the transition's event. A save failure aborts the operation
//! with no partial effect.

use async_trait::async_trait;
use common::ShoppingListId;
use repository::{Repository, StoreError};

use crate::catalog::{ProductCatalog, StoreDirectory};
use crate::error::DepotError;
use crate::publish::EventPublisher;

use super::{
    AssignShoppingList, CancelShoppingList, CompleteShoppingList, CreateShoppingList,
    GetShoppingList, InitiateShopping, LineItem, ShoppingList,
};

/// The depot application's capability set: one operation per recognized
/// command, plus the read-only query.
///
/// Both inbound surfaces (the message dispatcher and the RPC mirror) target
/// this trait, so either can be driven by [`DepotService`] or by a test
/// double.
#[async_trait]
pub trait DepotApp: Send + Sync {
    /// Builds and persists a new shopping list from an order's items.
    async fn create_shopping_list(&self, cmd: CreateShoppingList) -> Result<(), DepotError>;

    /// Cancels an existing shopping list.
    async fn cancel_shopping_list(&self, cmd: CancelShoppingList) -> Result<(), DepotError>;

    /// Assigns a fulfillment bot to an existing shopping list.
    async fn assign_shopping_list(&self, cmd: AssignShoppingList) -> Result<(), DepotError>;

    /// Marks an existing shopping list as completed.
    async fn complete_shopping_list(&self, cmd: CompleteShoppingList) -> Result<(), DepotError>;

    /// Acknowledges the start-shopping signal for an existing list.
    async fn initiate_shopping(&self, cmd: InitiateShopping) -> Result<(), DepotError>;

    /// Returns a read-only snapshot of a shopping list.
    async fn get_shopping_list(&self, query: GetShoppingList) -> Result<ShoppingList, DepotError>;
}

/// Production implementation of [`DepotApp`].
pub struct DepotService<R, D, C, P>
where
    R: Repository<ShoppingList>,
    D: StoreDirectory,
    C: ProductCatalog,
    P: EventPublisher,
{
    shopping_lists: R,
    stores: D,
    products: C,
    publisher: P,
}

impl<R, D, C, P> DepotService<R, D, C, P>
where
    R: Repository<ShoppingList>,
    D: StoreDirectory,
    C: ProductCatalog,
    P: EventPublisher,
{
    /// Creates a new depot service.
    pub fn new(shopping_lists: R, stores: D, products: C, publisher: P) -> Self {
        Self {
            shopping_lists,
            stores,
            products,
            publisher,
        }
    }

    async fn load(&self, id: ShoppingListId) -> Result<ShoppingList, DepotError> {
        self.shopping_lists.load(&id).await.map_err(|e| match e {
            StoreError::NotFound(_) => DepotError::NotFound(id),
            other => DepotError::Store(other),
        })
    }
}

#[async_trait]
impl<R, D, C, P> DepotApp for DepotService<R, D, C, P>
where
    R: Repository<ShoppingList>,
    D: StoreDirectory,
    C: ProductCatalog,
    P: EventPublisher,
{
    #[tracing::instrument(skip(self, cmd), fields(id = %cmd.id, order_id = %cmd.order_id))]
    async fn create_shopping_list(&self, cmd: CreateShoppingList) -> Result<(), DepotError> {
        let mut lines = Vec::with_capacity(cmd.items.len());
        for item in &cmd.items {
            let store = self.stores.find(&item.store_id).await?;
            let product = self.products.find(&item.product_id).await?;
            lines.push(LineItem {
                store,
                product,
                quantity: item.quantity,
            });
        }

        let (list, event) = ShoppingList::create(cmd.id, cmd.order_id, lines)?;

        self.shopping_lists.save(&list).await?;
        self.publisher.publish(event).await?;

        tracing::info!(stops = list.stops().len(), "shopping list created");
        Ok(())
    }

    #[tracing::instrument(skip(self, cmd), fields(id = %cmd.id))]
    async fn cancel_shopping_list(&self, cmd: CancelShoppingList) -> Result<(), DepotError> {
        let mut list = self.load(cmd.id).await?;
        let event = list.cancel()?;

        self.shopping_lists.save(&list).await?;
        self.publisher.publish(event).await?;

        tracing::info!("shopping list canceled");
        Ok(())
    }

    #[tracing::instrument(skip(self, cmd), fields(id = %cmd.id, bot_id = %cmd.bot_id))]
    async fn assign_shopping_list(&self, cmd: AssignShoppingList) -> Result<(), DepotError> {
        let mut list = self.load(cmd.id).await?;
        let event = list.assign(cmd.bot_id)?;

        self.shopping_lists.save(&list).await?;
        self.publisher.publish(event).await?;

        tracing::info!("shopping list assigned");
        Ok(())
    }

    #[tracing::instrument(skip(self, cmd), fields(id = %cmd.id))]
    async fn complete_shopping_list(&self, cmd: CompleteShoppingList) -> Result<(), DepotError> {
        let mut list = self.load(cmd.id).await?;
        let event = list.complete()?;

        self.shopping_lists.save(&list).await?;
        self.publisher.publish(event).await?;

        tracing::info!("shopping list completed");
        Ok(())
    }

    #[tracing::instrument(skip(self, cmd), fields(id = %cmd.id))]
    async fn initiate_shopping(&self, cmd: InitiateShopping) -> Result<(), DepotError> {
        // Acknowledge-only: the bot workflow is driven outside this core.
        // Verifying existence keeps unknown ids observable to the caller.
        let _ = self.load(cmd.id).await?;

        tracing::debug!("shopping initiation acknowledged");
        Ok(())
    }

    #[tracing::instrument(skip(self, query), fields(id = %query.id))]
    async fn get_shopping_list(&self, query: GetShoppingList) -> Result<ShoppingList, DepotError> {
        self.load(query.id).await
    }
}
