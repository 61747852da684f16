//! Explicit schema metadata for every wire message.
//!
//! The registry is built once by the owning [`WireCodec`](super::WireCodec)
//! and never mutated. It backs decode-time message lookup and gives tools
//! and tests a way to enumerate the published contract.

use std::collections::HashMap;

use super::messages;
use super::WireMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Int32,
    Bool,
    Message(&'static str),
    Map { value: &'static str },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub number: u32,
    pub name: &'static str,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy)]
pub struct MessageDescriptor {
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

const fn field(number: u32, name: &'static str, kind: FieldKind) -> FieldDescriptor {
    FieldDescriptor { number, name, kind }
}

const ORDER_ITEM: &[FieldDescriptor] = &[
    field(1, "product_id", FieldKind::String),
    field(2, "store_id", FieldKind::String),
    field(3, "quantity", FieldKind::Int32),
];

const CREATE_SHOPPING_LIST: &[FieldDescriptor] = &[
    field(1, "order_id", FieldKind::String),
    field(2, "items", FieldKind::Message("depot.OrderItem")),
];

const CANCEL_SHOPPING_LIST: &[FieldDescriptor] = &[field(1, "id", FieldKind::String)];

const ASSIGN_SHOPPING_LIST: &[FieldDescriptor] = &[
    field(1, "id", FieldKind::String),
    field(2, "bot_id", FieldKind::String),
];

const COMPLETE_SHOPPING_LIST: &[FieldDescriptor] = &[field(1, "id", FieldKind::String)];

const INITIATE_SHOPPING: &[FieldDescriptor] = &[field(1, "id", FieldKind::String)];

const CREATED_SHOPPING_LIST: &[FieldDescriptor] = &[field(1, "id", FieldKind::String)];

const FAILURE: &[FieldDescriptor] = &[
    field(1, "message", FieldKind::String),
    field(2, "retryable", FieldKind::Bool),
];

const SHOPPING_LIST: &[FieldDescriptor] = &[
    field(1, "id", FieldKind::String),
    field(2, "order_id", FieldKind::String),
    field(3, "stops", FieldKind::Map { value: "depot.Stop" }),
    field(4, "assigned_bot_id", FieldKind::String),
    field(5, "status", FieldKind::String),
];

const STOP: &[FieldDescriptor] = &[
    field(1, "store_name", FieldKind::String),
    field(2, "store_location", FieldKind::String),
    field(3, "items", FieldKind::Map { value: "depot.Item" }),
];

const ITEM: &[FieldDescriptor] = &[
    field(1, "name", FieldKind::String),
    field(2, "quantity", FieldKind::Int32),
];

#[derive(Debug)]
pub struct SchemaRegistry {
    messages: HashMap<&'static str, MessageDescriptor>,
}

impl SchemaRegistry {
    pub(super) fn build() -> Self {
        let descriptors = [
            (messages::OrderItem::NAME, ORDER_ITEM),
            (messages::CreateShoppingList::NAME, CREATE_SHOPPING_LIST),
            (messages::CancelShoppingList::NAME, CANCEL_SHOPPING_LIST),
            (messages::AssignShoppingList::NAME, ASSIGN_SHOPPING_LIST),
            (messages::CompleteShoppingList::NAME, COMPLETE_SHOPPING_LIST),
            (messages::InitiateShopping::NAME, INITIATE_SHOPPING),
            (messages::CreatedShoppingList::NAME, CREATED_SHOPPING_LIST),
            (messages::Failure::NAME, FAILURE),
            (messages::ShoppingList::NAME, SHOPPING_LIST),
            (messages::Stop::NAME, STOP),
            (messages::Item::NAME, ITEM),
        ];
        let messages = descriptors
            .into_iter()
            .map(|(name, fields)| (name, MessageDescriptor { name, fields }))
            .collect();
        Self { messages }
    }

    pub fn descriptor(&self, name: &str) -> Option<&MessageDescriptor> {
        self.messages.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.messages.values().map(|d| d.name)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
