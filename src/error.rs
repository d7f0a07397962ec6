use thiserror::Error;
use twitch_bot::AuthorityLevel;

use crate::polls::{MAX_POLL_LENGTH, MIN_POLL_LENGTH, MIN_POLL_OPTIONS};

/// Bad command arguments. The message is shown to the chatter as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Target (Channel Name) is invalid.")]
    InvalidTarget,
    #[error("User is invalid.")]
    InvalidUser,
    #[error("Description can not be empty.")]
    EmptyDescription,
    #[error("A poll must have at least {} options.", MIN_POLL_OPTIONS)]
    TooFewOptions,
    #[error("Invalid option given, options can not be empty.")]
    EmptyOption,
    #[error("Every option must be different.")]
    DuplicateOption,
    #[error("<length> must be a number representing the length of the poll in minutes.")]
    LengthNotNumeric,
    #[error("<length> must be at least {} minutes to allow users time to vote.", MIN_POLL_LENGTH)]
    LengthTooShort,
    #[error(
        "<length> can not be longer than {} minutes ({} hours).",
        MAX_POLL_LENGTH,
        MAX_POLL_LENGTH / 60
    )]
    LengthTooLong,
    #[error("<option> must be numeric.")]
    OptionNotNumeric,
    #[error("<option> must be one of the possible choices for the current poll.")]
    OptionOutOfRange,
}

/// The command is well formed but the poll is in the wrong state for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateConflict {
    #[error("An active poll already exists for this channel.")]
    PollAlreadyActive,
    #[error("No active poll exists for this channel.")]
    NoActivePoll,
    #[error("The poll is not active.")]
    PollNotActive,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("This command requires {0:?} authority.")]
    Unauthorized(AuthorityLevel),
    #[error(transparent)]
    Conflict(#[from] StateConflict),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing configuration value: '{0}'.")]
    Missing(&'static str),
    #[error("Malformed '{name}' value: {reason}")]
    Malformed { name: &'static str, reason: String },
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
}
