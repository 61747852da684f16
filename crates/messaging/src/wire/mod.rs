//! Hand-written wire codec for command, reply, and snapshot payloads.
//!
//! Payloads use the protobuf wire format but there is no code generation
//! and no runtime reflection: each message is a plain struct with an
//! explicit field map, and schema metadata lives in the [`SchemaRegistry`]
//! owned by the codec.

mod codec;
mod messages;
mod registry;

pub use codec::{FieldReader, FieldValue, FieldWriter};
pub use messages::{
    AssignShoppingList, CancelShoppingList, CompleteShoppingList, CreateShoppingList,
    CreatedShoppingList, Failure, InitiateShopping, Item, OrderItem, ShoppingList, Stop,
};
pub use registry::{FieldDescriptor, FieldKind, MessageDescriptor, SchemaRegistry};

use std::sync::OnceLock;

use bytes::Bytes;

/// Decoding failures. All of these are permanent: a payload that does not
/// decode today will not decode on redelivery either.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("message truncated")]
    Truncated,
    #[error("varint overflows 64 bits")]
    VarintOverflow,
    #[error("invalid wire type {0}")]
    InvalidWireType(u8),
    #[error("unexpected wire type for field {0}")]
    WireTypeMismatch(&'static str),
    #[error("field {0} is not valid UTF-8")]
    InvalidUtf8(&'static str),
    #[error("message {0} is not in the schema registry")]
    UnknownMessage(&'static str),
    #[error("invalid aggregate id {0:?}")]
    InvalidId(String),
}

/// A message that can be written to and read from the wire. `NAME` is the
/// fully-qualified schema name the registry indexes by.
pub trait WireMessage: Sized {
    const NAME: &'static str;

    fn encode_fields(&self, w: &mut FieldWriter);
    fn decode_fields(r: &mut FieldReader) -> Result<Self, WireError>;
}

/// Encodes and decodes wire messages. The schema registry is built on
/// first use and never mutated afterwards.
#[derive(Debug, Default)]
pub struct WireCodec {
    registry: OnceLock<SchemaRegistry>,
}

impl WireCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &SchemaRegistry {
        self.registry.get_or_init(SchemaRegistry::build)
    }

    pub fn encode<M: WireMessage>(&self, msg: &M) -> Bytes {
        let mut w = FieldWriter::new();
        msg.encode_fields(&mut w);
        w.finish()
    }

    pub fn decode<M: WireMessage>(&self, payload: &[u8]) -> Result<M, WireError> {
        if self.registry().descriptor(M::NAME).is_none() {
            return Err(WireError::UnknownMessage(M::NAME));
        }
        let mut r = FieldReader::new(Bytes::copy_from_slice(payload));
        M::decode_fields(&mut r)
    }
}
