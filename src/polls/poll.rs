use std::collections::HashMap;
use std::fmt::Display;
use std::time::{Duration, SystemTime};

use twitch_bot::ChannelLogin;
use uuid::Uuid;

use super::*;

pub type PollId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    Active,
    Complete,
    Deactivated,
}

impl Display for PollStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollStatus::Active => write!(f, "active"),
            PollStatus::Complete => write!(f, "complete"),
            PollStatus::Deactivated => write!(f, "deactivated"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Poll {
    pub id: PollId,
    pub target: ChannelLogin,
    pub creator: String,
    pub description: String,
    pub options: Vec<String>,
    pub start: SystemTime,
    pub end: SystemTime,
    status: PollStatus,
    /// Latest vote of every voter, keyed by voter id
    selections: HashMap<String, Vote>,
}

impl Poll {
    /// Builds an active poll from a draft that already passed [`POLL_RULES`].
    pub(super) fn new(draft: PollDraft, now: SystemTime) -> Self {
        let length = Duration::from_secs(draft.length_minutes() * 60);
        Self {
            id: Uuid::new_v4(),
            target: draft.target,
            creator: draft.creator,
            description: draft.description.trim().to_owned(),
            options: draft.options,
            start: now,
            end: now + length,
            status: PollStatus::Active,
            selections: HashMap::new(),
        }
    }

    pub fn status(&self) -> PollStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == PollStatus::Active
    }

    pub fn length(&self) -> Duration {
        self.end.duration_since(self.start).unwrap_or_default()
    }

    pub fn time_remaining(&self, now: SystemTime) -> Duration {
        self.end.duration_since(now).unwrap_or_default()
    }

    /// Completes the poll if its end has been reached.
    /// Returns `true` if this call changed the status.
    pub fn update_status(&mut self, now: SystemTime) -> bool {
        now >= self.end && self.complete().is_ok()
    }

    pub fn deactivate(&mut self) -> Result<(), StateConflict> {
        if !self.is_active() {
            return Err(StateConflict::PollNotActive);
        }
        self.status = PollStatus::Deactivated;
        Ok(())
    }

    pub fn complete(&mut self) -> Result<(), StateConflict> {
        if !self.is_active() {
            return Err(StateConflict::PollNotActive);
        }
        self.status = PollStatus::Complete;
        Ok(())
    }

    /// Records the vote, replacing the voter's earlier one.
    /// Returns the replaced vote, if any.
    pub(super) fn cast(&mut self, vote: Vote) -> Result<Option<Vote>, CommandError> {
        if !self.is_active() {
            return Err(StateConflict::PollNotActive.into());
        }
        if vote.option >= self.options.len() {
            return Err(ValidationError::OptionOutOfRange.into());
        }
        Ok(self.selections.insert(vote.voter.clone(), vote))
    }

    /// Vote count for every option in option order, zero counts included.
    pub fn tally(&self) -> Vec<(String, usize)> {
        let mut counts = vec![0; self.options.len()];
        for vote in self.selections.values() {
            if let Some(count) = counts.get_mut(vote.option) {
                *count += 1;
            }
        }
        self.options.iter().cloned().zip(counts).collect()
    }

    /// Options sharing the highest vote count. Empty when nobody voted.
    pub fn leaders(&self) -> Vec<String> {
        let tally = self.tally();
        let best = tally.iter().map(|(_, count)| *count).max().unwrap_or(0);
        if best == 0 {
            return vec![];
        }
        tally
            .into_iter()
            .filter(|(_, count)| *count == best)
            .map(|(option, _)| option)
            .collect()
    }
}

pub fn format_remaining(duration: Duration) -> String {
    let secs = duration.as_secs();
    let seconds = secs % 60;
    let minutes = (secs / 60) % 60;
    let hours = secs / 60 / 60;
    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{} hrs", hours));
    }
    if minutes > 0 {
        parts.push(format!("{} min", minutes));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{} sec", seconds));
    }
    parts.join(" ")
}
