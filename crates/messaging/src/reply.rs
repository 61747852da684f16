//! Turns handler outcomes into reply envelopes.

use std::sync::Arc;

use bytes::Bytes;

use domain::Retryability;

use crate::dispatcher::{DispatchError, Reply};
use crate::envelope::{CommandMessage, ReplyMessage};
use crate::wire::{self, WireCodec};

/// Generic acknowledgement for commands with nothing to say back.
pub const SUCCESS_REPLY: &str = "depot.Success";
/// Generic failure reply; body is a [`wire::Failure`].
pub const FAILURE_REPLY: &str = "depot.Failure";
/// Create's explicit reply carrying the generated list id.
pub const CREATED_REPLY: &str = "depot.CreatedShoppingList";

/// Maps the `(reply, error)` outcome of a handler onto the wire:
/// an error becomes a failure reply with its classification, no reply
/// becomes a bare success ack, and an explicit reply passes through.
#[derive(Debug, Clone)]
pub struct ReplyEncoder {
    codec: Arc<WireCodec>,
}

impl ReplyEncoder {
    pub fn new(codec: Arc<WireCodec>) -> Self {
        Self { codec }
    }

    pub fn encode(
        &self,
        msg: &CommandMessage,
        outcome: Result<Option<Reply>, DispatchError>,
    ) -> ReplyMessage {
        let (name, payload) = match outcome {
            Ok(Some(reply)) => (reply.name, reply.payload),
            Ok(None) => (SUCCESS_REPLY, Bytes::new()),
            Err(err) => {
                let retryable = err.retryability() == Retryability::Transient;
                tracing::warn!(command = %msg.name, error = %err, retryable, "command failed");
                let body = self.codec.encode(&wire::Failure {
                    message: err.to_string(),
                    retryable,
                });
                (FAILURE_REPLY, body)
            }
        };
        ReplyMessage {
            name: name.to_string(),
            payload,
            correlation_id: msg.correlation_id.clone(),
        }
    }
}
