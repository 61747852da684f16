//! Wire message structs and their field maps.
//!
//! Field numbers are part of the published contract and must not change.
//! Map fields encode as repeated entries of `{1: key, 2: value}`; snapshot
//! maps use `BTreeMap` so encoding is deterministic.

use std::collections::BTreeMap;

use bytes::Bytes;

use super::codec::{FieldReader, FieldWriter};
use super::{WireError, WireMessage};

fn put_map_entry<M: WireMessage>(w: &mut FieldWriter, number: u32, key: &str, value: &M) {
    let mut entry = FieldWriter::new();
    entry.put_str(1, key);
    entry.put_message(2, value);
    w.put_len_delimited(number, &entry.finish());
}

fn read_map_entry<M: WireMessage + Default>(
    bytes: Bytes,
    field: &'static str,
) -> Result<(String, M), WireError> {
    let mut r = FieldReader::new(bytes);
    let mut key = String::new();
    let mut value = None;
    while let Some((number, v)) = r.next_field()? {
        match number {
            1 => key = v.into_string(field)?,
            2 => {
                let mut nested = FieldReader::new(v.into_bytes(field)?);
                value = Some(M::decode_fields(&mut nested)?);
            }
            _ => {}
        }
    }
    Ok((key, value.unwrap_or_default()))
}

/// One raw order line: which product, from which store, how many.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderItem {
    pub product_id: String,
    pub store_id: String,
    pub quantity: i32,
}

impl WireMessage for OrderItem {
    const NAME: &'static str = "depot.OrderItem";

    fn encode_fields(&self, w: &mut FieldWriter) {
        w.put_str(1, &self.product_id);
        w.put_str(2, &self.store_id);
        w.put_int32(3, self.quantity);
    }

    fn decode_fields(r: &mut FieldReader) -> Result<Self, WireError> {
        let mut msg = Self::default();
        while let Some((number, v)) = r.next_field()? {
            match number {
                1 => msg.product_id = v.into_string("OrderItem.product_id")?,
                2 => msg.store_id = v.into_string("OrderItem.store_id")?,
                3 => msg.quantity = v.into_int32("OrderItem.quantity")?,
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateShoppingList {
    pub order_id: String,
    pub items: Vec<OrderItem>,
}

impl WireMessage for CreateShoppingList {
    const NAME: &'static str = "depot.CreateShoppingList";

    fn encode_fields(&self, w: &mut FieldWriter) {
        w.put_str(1, &self.order_id);
        for item in &self.items {
            w.put_message(2, item);
        }
    }

    fn decode_fields(r: &mut FieldReader) -> Result<Self, WireError> {
        let mut msg = Self::default();
        while let Some((number, v)) = r.next_field()? {
            match number {
                1 => msg.order_id = v.into_string("CreateShoppingList.order_id")?,
                2 => {
                    let mut nested =
                        FieldReader::new(v.into_bytes("CreateShoppingList.items")?);
                    msg.items.push(OrderItem::decode_fields(&mut nested)?);
                }
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelShoppingList {
    pub id: String,
}

impl WireMessage for CancelShoppingList {
    const NAME: &'static str = "depot.CancelShoppingList";

    fn encode_fields(&self, w: &mut FieldWriter) {
        w.put_str(1, &self.id);
    }

    fn decode_fields(r: &mut FieldReader) -> Result<Self, WireError> {
        let mut msg = Self::default();
        while let Some((number, v)) = r.next_field()? {
            if number == 1 {
                msg.id = v.into_string("CancelShoppingList.id")?;
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignShoppingList {
    pub id: String,
    pub bot_id: String,
}

impl WireMessage for AssignShoppingList {
    const NAME: &'static str = "depot.AssignShoppingList";

    fn encode_fields(&self, w: &mut FieldWriter) {
        w.put_str(1, &self.id);
        w.put_str(2, &self.bot_id);
    }

    fn decode_fields(r: &mut FieldReader) -> Result<Self, WireError> {
        let mut msg = Self::default();
        while let Some((number, v)) = r.next_field()? {
            match number {
                1 => msg.id = v.into_string("AssignShoppingList.id")?,
                2 => msg.bot_id = v.into_string("AssignShoppingList.bot_id")?,
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompleteShoppingList {
    pub id: String,
}

impl WireMessage for CompleteShoppingList {
    const NAME: &'static str = "depot.CompleteShoppingList";

    fn encode_fields(&self, w: &mut FieldWriter) {
        w.put_str(1, &self.id);
    }

    fn decode_fields(r: &mut FieldReader) -> Result<Self, WireError> {
        let mut msg = Self::default();
        while let Some((number, v)) = r.next_field()? {
            if number == 1 {
                msg.id = v.into_string("CompleteShoppingList.id")?;
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitiateShopping {
    pub id: String,
}

impl WireMessage for InitiateShopping {
    const NAME: &'static str = "depot.InitiateShopping";

    fn encode_fields(&self, w: &mut FieldWriter) {
        w.put_str(1, &self.id);
    }

    fn decode_fields(r: &mut FieldReader) -> Result<Self, WireError> {
        let mut msg = Self::default();
        while let Some((number, v)) = r.next_field()? {
            if number == 1 {
                msg.id = v.into_string("InitiateShopping.id")?;
            }
        }
        Ok(msg)
    }
}

/// Reply body for a successful Create, carrying the generated list id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatedShoppingList {
    pub id: String,
}

impl WireMessage for CreatedShoppingList {
    const NAME: &'static str = "depot.CreatedShoppingList";

    fn encode_fields(&self, w: &mut FieldWriter) {
        w.put_str(1, &self.id);
    }

    fn decode_fields(r: &mut FieldReader) -> Result<Self, WireError> {
        let mut msg = Self::default();
        while let Some((number, v)) = r.next_field()? {
            if number == 1 {
                msg.id = v.into_string("CreatedShoppingList.id")?;
            }
        }
        Ok(msg)
    }
}

/// Generic failure reply body. `retryable` carries the error
/// classification so callers can decide whether to retry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
    pub retryable: bool,
}

impl WireMessage for Failure {
    const NAME: &'static str = "depot.Failure";

    fn encode_fields(&self, w: &mut FieldWriter) {
        w.put_str(1, &self.message);
        w.put_bool(2, self.retryable);
    }

    fn decode_fields(r: &mut FieldReader) -> Result<Self, WireError> {
        let mut msg = Self::default();
        while let Some((number, v)) = r.next_field()? {
            match number {
                1 => msg.message = v.into_string("Failure.message")?,
                2 => msg.retryable = v.into_bool("Failure.retryable")?,
                _ => {}
            }
        }
        Ok(msg)
    }
}

/// Snapshot of a shopping list for query replies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingList {
    pub id: String,
    pub order_id: String,
    pub stops: BTreeMap<String, Stop>,
    pub assigned_bot_id: String,
    pub status: String,
}

impl WireMessage for ShoppingList {
    const NAME: &'static str = "depot.ShoppingList";

    fn encode_fields(&self, w: &mut FieldWriter) {
        w.put_str(1, &self.id);
        w.put_str(2, &self.order_id);
        for (store_id, stop) in &self.stops {
            put_map_entry(w, 3, store_id, stop);
        }
        w.put_str(4, &self.assigned_bot_id);
        w.put_str(5, &self.status);
    }

    fn decode_fields(r: &mut FieldReader) -> Result<Self, WireError> {
        let mut msg = Self::default();
        while let Some((number, v)) = r.next_field()? {
            match number {
                1 => msg.id = v.into_string("ShoppingList.id")?,
                2 => msg.order_id = v.into_string("ShoppingList.order_id")?,
                3 => {
                    let (key, stop) =
                        read_map_entry(v.into_bytes("ShoppingList.stops")?, "ShoppingList.stops")?;
                    msg.stops.insert(key, stop);
                }
                4 => msg.assigned_bot_id = v.into_string("ShoppingList.assigned_bot_id")?,
                5 => msg.status = v.into_string("ShoppingList.status")?,
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stop {
    pub store_name: String,
    pub store_location: String,
    pub items: BTreeMap<String, Item>,
}

impl WireMessage for Stop {
    const NAME: &'static str = "depot.Stop";

    fn encode_fields(&self, w: &mut FieldWriter) {
        w.put_str(1, &self.store_name);
        w.put_str(2, &self.store_location);
        for (product_id, item) in &self.items {
            put_map_entry(w, 3, product_id, item);
        }
    }

    fn decode_fields(r: &mut FieldReader) -> Result<Self, WireError> {
        let mut msg = Self::default();
        while let Some((number, v)) = r.next_field()? {
            match number {
                1 => msg.store_name = v.into_string("Stop.store_name")?,
                2 => msg.store_location = v.into_string("Stop.store_location")?,
                3 => {
                    let (key, item) =
                        read_map_entry(v.into_bytes("Stop.items")?, "Stop.items")?;
                    msg.items.insert(key, item);
                }
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub quantity: i32,
}

impl WireMessage for Item {
    const NAME: &'static str = "depot.Item";

    fn encode_fields(&self, w: &mut FieldWriter) {
        w.put_str(1, &self.name);
        w.put_int32(2, self.quantity);
    }

    fn decode_fields(r: &mut FieldReader) -> Result<Self, WireError> {
        let mut msg = Self::default();
        while let Some((number, v)) = r.next_field()? {
            match number {
                1 => msg.name = v.into_string("Item.name")?,
                2 => msg.quantity = v.into_int32("Item.quantity")?,
                _ => {}
            }
        }
        Ok(msg)
    }
}
