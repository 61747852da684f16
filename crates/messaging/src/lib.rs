//! Command-side messaging for the depot system.
//!
//! Commands arrive on a named channel as `(name, payload)` envelopes. A
//! subscription filters by command name, the translator decodes payloads
//! into typed commands, the dispatcher routes them to the application
//! service, and the reply encoder turns outcomes back into wire replies.

pub mod bus;
pub mod commands;
pub mod dispatcher;
pub mod envelope;
pub mod reply;
pub mod translate;
pub mod wire;

pub use bus::{CommandBus, CommandHandler, InMemoryCommandBus, SubscribeError};
pub use commands::{
    CommandName, DepotCommand, MessageFilter, COMMAND_CHANNEL, CONSUMER_GROUP,
};
pub use dispatcher::{CommandDispatcher, DispatchError, Reply};
pub use envelope::{CommandMessage, ReplyMessage};
pub use reply::{ReplyEncoder, CREATED_REPLY, FAILURE_REPLY, SUCCESS_REPLY};
pub use translate::CommandTranslator;
pub use wire::{WireCodec, WireError};
