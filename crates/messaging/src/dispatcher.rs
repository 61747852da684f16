//! Routes decoded commands to the application service.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use domain::{DepotApp, DepotError, Retryability};

use crate::bus::CommandHandler;
use crate::commands::{CommandName, DepotCommand};
use crate::envelope::CommandMessage;
use crate::reply::CREATED_REPLY;
use crate::translate::CommandTranslator;
use crate::wire::{self, WireCodec, WireError};

/// A typed reply produced by a handler, before envelope encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub name: &'static str,
    pub payload: Bytes,
}

/// Anything that can go wrong while handling one command message.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Translate(#[from] WireError),
    #[error(transparent)]
    App(#[from] DepotError),
}

impl DispatchError {
    /// Translation failures never succeed on redelivery; application
    /// errors carry their own classification.
    pub fn retryability(&self) -> Retryability {
        match self {
            DispatchError::Translate(_) => Retryability::Permanent,
            DispatchError::App(err) => err.retryability(),
        }
    }
}

/// Stateless command router. Holds only shared immutable pieces, so one
/// instance behind an `Arc` serves any number of concurrent deliveries.
pub struct CommandDispatcher<A> {
    app: Arc<A>,
    translator: CommandTranslator,
    codec: Arc<WireCodec>,
}

impl<A: DepotApp> CommandDispatcher<A> {
    pub fn new(app: Arc<A>, codec: Arc<WireCodec>) -> Self {
        Self {
            app,
            translator: CommandTranslator::new(Arc::clone(&codec)),
            codec,
        }
    }

    async fn dispatch(
        &self,
        name: CommandName,
        payload: &[u8],
    ) -> Result<Option<Reply>, DispatchError> {
        match self.translator.translate(name, payload)? {
            DepotCommand::Create(cmd) => {
                let id = cmd.id;
                self.app.create_shopping_list(cmd).await?;
                let body = self.codec.encode(&wire::CreatedShoppingList {
                    id: id.to_string(),
                });
                Ok(Some(Reply {
                    name: CREATED_REPLY,
                    payload: body,
                }))
            }
            DepotCommand::Cancel(cmd) => {
                self.app.cancel_shopping_list(cmd).await?;
                Ok(None)
            }
            DepotCommand::Assign(cmd) => {
                self.app.assign_shopping_list(cmd).await?;
                Ok(None)
            }
            DepotCommand::Complete(cmd) => {
                self.app.complete_shopping_list(cmd).await?;
                Ok(None)
            }
            DepotCommand::Initiate(cmd) => {
                self.app.initiate_shopping(cmd).await?;
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl<A: DepotApp> CommandHandler for CommandDispatcher<A> {
    #[tracing::instrument(skip(self, msg), fields(command = %msg.name))]
    async fn handle(&self, msg: &CommandMessage) -> Result<Option<Reply>, DispatchError> {
        match CommandName::parse(&msg.name) {
            Some(name) => self.dispatch(name, &msg.payload).await,
            None => {
                // Subscription filters keep these out; if one slips
                // through, acknowledge without doing anything.
                tracing::debug!("unrecognized command name, acknowledging");
                Ok(None)
            }
        }
    }
}
