//! Message envelopes carried over the command channel.

use bytes::Bytes;
use uuid::Uuid;

/// A command as it travels over the channel: a fully-qualified name, an
/// opaque payload, and a correlation id the reply echoes back.
#[derive(Debug, Clone)]
pub struct CommandMessage {
    pub name: String,
    pub payload: Bytes,
    pub correlation_id: String,
}

impl CommandMessage {
    pub fn new(name: impl Into<String>, payload: Bytes) -> Self {
        Self {
            name: name.into(),
            payload,
            correlation_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = correlation_id.into();
        self
    }
}

/// A reply published for a handled command. `name` identifies the reply
/// schema; the correlation id ties it back to the originating command.
#[derive(Debug, Clone)]
pub struct ReplyMessage {
    pub name: String,
    pub payload: Bytes,
    pub correlation_id: String,
}
