use twitch_bot::{AuthorityLevel, CommandMessage};

use crate::error::CommandError;
use crate::polls::Mutation;

mod parser;

pub use parser::*;

/// Prefix that marks a chat line as a bot command
pub const COMMAND_PREFIX: char = '!';

pub type Argument = String;
pub type Response = Option<String>;
pub type CommandResult = Result<Response, CommandError>;
pub type Command<T> = fn(&mut T, &CommandMessage, Vec<Argument>) -> CommandResult;

pub struct BotCommand<T> {
    pub name: &'static str,
    pub authority_level: AuthorityLevel,
    /// Shown after a validation failure
    pub usage: &'static str,
    pub command: Command<T>,
}

impl<T> Clone for BotCommand<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            authority_level: self.authority_level,
            usage: self.usage,
            command: self.command,
        }
    }
}

pub struct BotCommands<T> {
    pub commands: Vec<BotCommand<T>>,
}

impl<T> BotCommands<T> {
    pub fn find(&self, name: &str) -> Option<&BotCommand<T>> {
        self.commands.iter().find(|command| command.name == name)
    }
}

/// Everything a single dispatched message produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub reply: Response,
    pub mutations: Vec<Mutation>,
}

/// A chat line split into a lowercased command name and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub name: String,
    pub args: Vec<Argument>,
}

impl Invocation {
    /// `None` unless the first token starts with [`COMMAND_PREFIX`].
    pub fn parse(message_text: &str) -> Option<Self> {
        let mut tokens = parse_arguments(message_text.trim()).into_iter();
        let name = tokens
            .next()?
            .strip_prefix(COMMAND_PREFIX)?
            .to_lowercase();
        Some(Self {
            name,
            args: tokens.collect(),
        })
    }
}

pub fn check_authority(required: AuthorityLevel, message: &CommandMessage) -> bool {
    message.sender.authority_level() >= required
}
