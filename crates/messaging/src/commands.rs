//! Command names, the subscription filter, and the typed command set.

use std::collections::HashSet;
use std::fmt;

use domain::{
    AssignShoppingList, CancelShoppingList, CompleteShoppingList, CreateShoppingList,
    InitiateShopping,
};

/// Channel the depot command handlers subscribe to.
pub const COMMAND_CHANNEL: &str = "depot.commands";

/// Consumer group for the depot command handlers.
pub const CONSUMER_GROUP: &str = "depot-commands";

/// The closed set of command names this module handles. Parsing yields
/// `None` for anything else, which keeps unrecognized traffic out of the
/// dispatcher entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandName {
    CreateShoppingList,
    CancelShoppingList,
    AssignShoppingList,
    CompleteShoppingList,
    InitiateShopping,
}

impl CommandName {
    pub const ALL: [CommandName; 5] = [
        CommandName::CreateShoppingList,
        CommandName::CancelShoppingList,
        CommandName::AssignShoppingList,
        CommandName::CompleteShoppingList,
        CommandName::InitiateShopping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandName::CreateShoppingList => "depot.CreateShoppingList",
            CommandName::CancelShoppingList => "depot.CancelShoppingList",
            CommandName::AssignShoppingList => "depot.AssignShoppingList",
            CommandName::CompleteShoppingList => "depot.CompleteShoppingList",
            CommandName::InitiateShopping => "depot.InitiateShopping",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.as_str() == name)
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of command names a subscription accepts. Messages whose name does
/// not parse into the set are dropped without a reply.
#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    names: HashSet<CommandName>,
}

impl MessageFilter {
    /// Filter accepting every recognized depot command.
    pub fn all() -> Self {
        Self {
            names: CommandName::ALL.into_iter().collect(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        CommandName::parse(name).is_some_and(|n| self.names.contains(&n))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<CommandName> for MessageFilter {
    fn from_iter<I: IntoIterator<Item = CommandName>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

/// A decoded command, ready for the application service. One variant per
/// recognized name; the dispatcher matches exhaustively so adding a name
/// without handling it fails to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepotCommand {
    Create(CreateShoppingList),
    Cancel(CancelShoppingList),
    Assign(AssignShoppingList),
    Complete(CompleteShoppingList),
    Initiate(InitiateShopping),
}

impl DepotCommand {
    pub fn name(&self) -> CommandName {
        match self {
            DepotCommand::Create(_) => CommandName::CreateShoppingList,
            DepotCommand::Cancel(_) => CommandName::CancelShoppingList,
            DepotCommand::Assign(_) => CommandName::AssignShoppingList,
            DepotCommand::Complete(_) => CommandName::CompleteShoppingList,
            DepotCommand::Initiate(_) => CommandName::InitiateShopping,
        }
    }
}
