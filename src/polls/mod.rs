//! Per-channel polls: creation, lazy expiry, deactivation and votes.

use std::collections::HashMap;
use std::fmt::Display;
use std::time::SystemTime;

use twitch_bot::{AuthorityLevel, ChannelLogin, Sender};

use crate::error::{CommandError, StateConflict, ValidationError};

mod poll;
mod validation;
mod vote;

pub use poll::*;
pub use validation::*;
pub use vote::*;

/// Minimum poll length in minutes
pub const MIN_POLL_LENGTH: u64 = 10;
/// Maximum poll length in minutes
pub const MAX_POLL_LENGTH: u64 = 1440;
/// Poll length in minutes when none is given
pub const DEFAULT_POLL_LENGTH: u64 = 120;
pub const MIN_POLL_OPTIONS: usize = 2;

/// A state change performed by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    PollCreated {
        channel: ChannelLogin,
        poll: PollId,
        creator: String,
    },
    PollDeactivated {
        channel: ChannelLogin,
        poll: PollId,
    },
    PollCompleted {
        channel: ChannelLogin,
        poll: PollId,
    },
    VoteCast {
        channel: ChannelLogin,
        poll: PollId,
        voter: String,
        option: usize,
        /// The option the voter picked before, if they already voted
        replaced: Option<usize>,
    },
}

impl Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mutation::PollCreated {
                channel,
                poll,
                creator,
            } => write!(f, "Poll {poll} created by {creator} in {channel}"),
            Mutation::PollDeactivated { channel, poll } => {
                write!(f, "Poll {poll} deactivated in {channel}")
            }
            Mutation::PollCompleted { channel, poll } => {
                write!(f, "Poll {poll} completed in {channel}")
            }
            Mutation::VoteCast {
                channel,
                poll,
                voter,
                option,
                replaced,
            } => {
                write!(f, "User {voter} voted for option {option} on poll {poll} in {channel}")?;
                match replaced {
                    Some(previous) => write!(f, " (was {previous})"),
                    None => Ok(()),
                }
            }
        }
    }
}

/// Holds the current (or most recent) poll of every channel.
#[derive(Debug, Default)]
pub struct PollStore {
    polls: HashMap<ChannelLogin, Poll>,
    mutations: Vec<Mutation>,
}

impl PollStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_poll(&mut self, draft: PollDraft, now: SystemTime) -> Result<&Poll, CommandError> {
        if self.active_poll(&draft.target, now).is_some() {
            return Err(StateConflict::PollAlreadyActive.into());
        }
        validate(POLL_RULES, &draft)?;

        let poll = Poll::new(draft, now);
        let channel = poll.target.clone();
        self.mutations.push(Mutation::PollCreated {
            channel: channel.clone(),
            poll: poll.id,
            creator: poll.creator.clone(),
        });
        self.polls.insert(channel.clone(), poll);
        Ok(&self.polls[&channel])
    }

    /// The channel's poll if it is still active.
    /// An expired poll is completed here and `None` is returned.
    pub fn active_poll(&mut self, target: &str, now: SystemTime) -> Option<&Poll> {
        self.expire(target, now);
        self.polls.get(target).filter(|poll| poll.is_active())
    }

    /// The channel's most recent poll, whatever its status.
    pub fn last_poll(&self, target: &str) -> Option<&Poll> {
        self.polls.get(target)
    }

    pub fn deactivate_poll(
        &mut self,
        target: &str,
        caller: &Sender,
        now: SystemTime,
    ) -> Result<&Poll, CommandError> {
        if caller.authority_level() < AuthorityLevel::Broadcaster {
            return Err(CommandError::Unauthorized(AuthorityLevel::Broadcaster));
        }
        self.expire(target, now);
        let poll = self
            .polls
            .get_mut(target)
            .ok_or(StateConflict::NoActivePoll)?;
        poll.deactivate()?;
        self.mutations.push(Mutation::PollDeactivated {
            channel: target.to_owned(),
            poll: poll.id,
        });
        Ok(poll)
    }

    /// Records `voter`'s choice, overwriting any earlier vote on the same poll.
    /// Returns the poll together with the replaced vote, if any.
    pub fn cast_vote(
        &mut self,
        target: &str,
        voter: &str,
        option: usize,
        now: SystemTime,
    ) -> Result<(&Poll, Option<Vote>), CommandError> {
        self.expire(target, now);
        let poll = self
            .polls
            .get_mut(target)
            .filter(|poll| poll.is_active())
            .ok_or(StateConflict::NoActivePoll)?;
        let replaced = poll.cast(Vote {
            voter: voter.to_owned(),
            option,
            cast_at: now,
        })?;
        self.mutations.push(Mutation::VoteCast {
            channel: target.to_owned(),
            poll: poll.id,
            voter: voter.to_owned(),
            option,
            replaced: replaced.as_ref().map(|vote| vote.option),
        });
        Ok((&*poll, replaced))
    }

    /// Completes every poll whose end has been reached and returns them.
    pub fn complete_expired(&mut self, now: SystemTime) -> Vec<Poll> {
        let mut completed = Vec::new();
        for (channel, poll) in &mut self.polls {
            if poll.update_status(now) {
                self.mutations.push(Mutation::PollCompleted {
                    channel: channel.clone(),
                    poll: poll.id,
                });
                completed.push(poll.clone());
            }
        }
        completed
    }

    /// Takes the mutations recorded since the last call.
    pub fn drain_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.mutations)
    }

    fn expire(&mut self, target: &str, now: SystemTime) {
        if let Some(poll) = self.polls.get_mut(target) {
            if poll.update_status(now) {
                self.mutations.push(Mutation::PollCompleted {
                    channel: target.to_owned(),
                    poll: poll.id,
                });
            }
        }
    }
}
