//! Command bus abstraction and the in-memory implementation.
//!
//! Subscriptions are keyed by channel and consumer group. Every group whose
//! filter accepts a message gets its own copy; within a group, each copy
//! lands on exactly one member (round-robin). A message no group accepts is
//! dropped: no reply, no error.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::commands::MessageFilter;
use crate::dispatcher::{DispatchError, Reply};
use crate::envelope::{CommandMessage, ReplyMessage};
use crate::reply::ReplyEncoder;
use crate::wire::WireCodec;

/// Handles one command message, producing an optional typed reply.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, msg: &CommandMessage) -> Result<Option<Reply>, DispatchError>;
}

#[async_trait]
pub trait CommandBus: Send + Sync {
    async fn subscribe(
        &self,
        channel: &str,
        handler: Arc<dyn CommandHandler>,
        filter: MessageFilter,
        group: &str,
    ) -> Result<(), SubscribeError>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubscribeError {
    #[error("empty filter for group {group:?} on channel {channel:?}")]
    EmptyFilter { channel: String, group: String },
}

struct Group {
    name: String,
    filter: MessageFilter,
    members: Vec<Arc<dyn CommandHandler>>,
    next: AtomicUsize,
}

/// In-memory bus for wiring the dispatcher to callers inside one process.
pub struct InMemoryCommandBus {
    channels: RwLock<HashMap<String, Vec<Group>>>,
    encoder: ReplyEncoder,
}

impl InMemoryCommandBus {
    pub fn new(codec: Arc<WireCodec>) -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
            encoder: ReplyEncoder::new(codec),
        }
    }

    /// Delivers one message to every matching group (one member per group,
    /// round-robin) and returns the first group's reply, or `None` when no
    /// subscription accepted it.
    pub async fn send(&self, channel: &str, msg: CommandMessage) -> Option<ReplyMessage> {
        let handlers: Vec<Arc<dyn CommandHandler>> = {
            let channels = self.channels.read().await;
            let groups = channels.get(channel)?;
            groups
                .iter()
                .filter(|g| !g.members.is_empty() && g.filter.matches(&msg.name))
                .map(|group| {
                    let idx = group.next.fetch_add(1, Ordering::Relaxed) % group.members.len();
                    Arc::clone(&group.members[idx])
                })
                .collect()
        };

        let mut reply = None;
        for handler in handlers {
            let outcome = handler.handle(&msg).await;
            if reply.is_none() {
                reply = Some(self.encoder.encode(&msg, outcome));
            }
        }
        reply
    }
}

#[async_trait]
impl CommandBus for InMemoryCommandBus {
    async fn subscribe(
        &self,
        channel: &str,
        handler: Arc<dyn CommandHandler>,
        filter: MessageFilter,
        group: &str,
    ) -> Result<(), SubscribeError> {
        if filter.is_empty() {
            return Err(SubscribeError::EmptyFilter {
                channel: channel.to_string(),
                group: group.to_string(),
            });
        }
        let mut channels = self.channels.write().await;
        let groups = channels.entry(channel.to_string()).or_default();
        match groups.iter_mut().find(|g| g.name == group) {
            Some(existing) => existing.members.push(handler),
            None => groups.push(Group {
                name: group.to_string(),
                filter,
                members: vec![handler],
                next: AtomicUsize::new(0),
            }),
        }
        tracing::debug!(channel, group, "subscription added");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    use crate::commands::CommandName;

    struct StubHandler {
        hits: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CommandHandler for StubHandler {
        async fn handle(&self, _msg: &CommandMessage) -> Result<Option<Reply>, DispatchError> {
            self.hits.fetch_add(1, Ordering::Relaxed);
            Ok(None)
        }
    }

    fn stub() -> (Arc<StubHandler>, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        (
            Arc::new(StubHandler {
                hits: Arc::clone(&hits),
            }),
            hits,
        )
    }

    fn cancel_message() -> CommandMessage {
        CommandMessage::new(CommandName::CancelShoppingList.as_str(), Bytes::new())
    }

    #[tokio::test]
    async fn filtered_out_message_gets_no_reply_and_no_error() {
        let bus = InMemoryCommandBus::new(Arc::new(WireCodec::new()));
        let (handler, hits) = stub();
        let filter: MessageFilter = [CommandName::CreateShoppingList].into_iter().collect();
        bus.subscribe("depot.commands", handler, filter, "depot-commands")
            .await
            .unwrap();

        let reply = bus.send("depot.commands", cancel_message()).await;
        assert!(reply.is_none());
        assert_eq!(hits.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn unknown_channel_gets_no_reply() {
        let bus = InMemoryCommandBus::new(Arc::new(WireCodec::new()));
        assert!(bus.send("depot.commands", cancel_message()).await.is_none());
    }

    #[tokio::test]
    async fn group_members_share_traffic_round_robin() {
        let bus = InMemoryCommandBus::new(Arc::new(WireCodec::new()));
        let (first, first_hits) = stub();
        let (second, second_hits) = stub();
        bus.subscribe("depot.commands", first, MessageFilter::all(), "depot-commands")
            .await
            .unwrap();
        bus.subscribe("depot.commands", second, MessageFilter::all(), "depot-commands")
            .await
            .unwrap();

        for _ in 0..4 {
            let reply = bus.send("depot.commands", cancel_message()).await;
            assert!(reply.is_some());
        }
        assert_eq!(first_hits.load(Ordering::Relaxed), 2);
        assert_eq!(second_hits.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn every_matching_group_receives_a_copy() {
        let bus = InMemoryCommandBus::new(Arc::new(WireCodec::new()));
        let (first, first_hits) = stub();
        let (second, second_hits) = stub();
        let (third, third_hits) = stub();
        bus.subscribe("depot.commands", first, MessageFilter::all(), "depot-commands")
            .await
            .unwrap();
        bus.subscribe("depot.commands", second, MessageFilter::all(), "depot-audit")
            .await
            .unwrap();
        let create_only: MessageFilter = [CommandName::CreateShoppingList].into_iter().collect();
        bus.subscribe("depot.commands", third, create_only, "depot-creates")
            .await
            .unwrap();

        let reply = bus.send("depot.commands", cancel_message()).await;
        assert!(reply.is_some());
        assert_eq!(first_hits.load(Ordering::Relaxed), 1);
        assert_eq!(second_hits.load(Ordering::Relaxed), 1);
        assert_eq!(third_hits.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn empty_filter_is_rejected() {
        let bus = InMemoryCommandBus::new(Arc::new(WireCodec::new()));
        let (handler, _) = stub();
        let err = bus
            .subscribe("depot.commands", handler, MessageFilter::default(), "depot-commands")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SubscribeError::EmptyFilter {
                channel: "depot.commands".into(),
                group: "depot-commands".into(),
            }
        );
    }

    #[tokio::test]
    async fn acks_echo_the_correlation_id() {
        let bus = InMemoryCommandBus::new(Arc::new(WireCodec::new()));
        let (handler, _) = stub();
        bus.subscribe("depot.commands", handler, MessageFilter::all(), "depot-commands")
            .await
            .unwrap();

        let msg = cancel_message().with_correlation_id("corr-9");
        let reply = bus.send("depot.commands", msg).await.unwrap();
        assert_eq!(reply.correlation_id, "corr-9");
        assert_eq!(reply.name, crate::reply::SUCCESS_REPLY);
    }
}
