//! Decodes command payloads into typed [`DepotCommand`]s.
//!
//! Translation is pure structural mapping: it generates the new list id for
//! Create and copies everything else verbatim. It never touches business
//! rules, so the only way it fails is an undecodable payload or a malformed
//! id, both permanent.

use std::sync::Arc;

use common::ShoppingListId;
use domain as dom;

use crate::commands::{CommandName, DepotCommand};
use crate::wire::{self, WireCodec, WireError};

#[derive(Debug, Clone)]
pub struct CommandTranslator {
    codec: Arc<WireCodec>,
}

impl CommandTranslator {
    pub fn new(codec: Arc<WireCodec>) -> Self {
        Self { codec }
    }

    /// Maps a `(name, payload)` pair to a typed command.
    pub fn translate(
        &self,
        name: CommandName,
        payload: &[u8],
    ) -> Result<DepotCommand, WireError> {
        match name {
            CommandName::CreateShoppingList => {
                let msg: wire::CreateShoppingList = self.codec.decode(payload)?;
                let items = msg
                    .items
                    .into_iter()
                    .map(|i| dom::OrderItem::new(i.product_id, i.store_id, i.quantity))
                    .collect();
                Ok(DepotCommand::Create(dom::CreateShoppingList::new(
                    ShoppingListId::new(),
                    msg.order_id,
                    items,
                )))
            }
            CommandName::CancelShoppingList => {
                let msg: wire::CancelShoppingList = self.codec.decode(payload)?;
                Ok(DepotCommand::Cancel(dom::CancelShoppingList::new(
                    parse_id(&msg.id)?,
                )))
            }
            CommandName::AssignShoppingList => {
                let msg: wire::AssignShoppingList = self.codec.decode(payload)?;
                Ok(DepotCommand::Assign(dom::AssignShoppingList::new(
                    parse_id(&msg.id)?,
                    msg.bot_id,
                )))
            }
            CommandName::CompleteShoppingList => {
                let msg: wire::CompleteShoppingList = self.codec.decode(payload)?;
                Ok(DepotCommand::Complete(dom::CompleteShoppingList::new(
                    parse_id(&msg.id)?,
                )))
            }
            CommandName::InitiateShopping => {
                let msg: wire::InitiateShopping = self.codec.decode(payload)?;
                Ok(DepotCommand::Initiate(dom::InitiateShopping::new(
                    parse_id(&msg.id)?,
                )))
            }
        }
    }
}

fn parse_id(raw: &str) -> Result<ShoppingListId, WireError> {
    ShoppingListId::parse(raw).map_err(|_| WireError::InvalidId(raw.to_string()))
}
