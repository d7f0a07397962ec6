use super::*;

use crate::polls::{format_remaining, Poll, PollDraft, Vote};

impl SnaarfBot {
    fn roll_dice(&mut self, message: &CommandMessage, args: Vec<Argument>) -> CommandResult {
        let result = self.dice.roll(args.first().map(String::as_str));
        let roller = if message.sender.name.is_empty() {
            "You".to_owned()
        } else {
            format!("@{}", message.sender.name)
        };
        Ok(Some(format!("{} rolled a {}, Schneeyarrrf!", roller, result)))
    }

    fn create_poll(&mut self, message: &CommandMessage, args: Vec<Argument>) -> CommandResult {
        let mut args = args.into_iter();
        let length = args.next();
        let description = args.next().unwrap_or_default();
        let draft = PollDraft {
            target: message.channel.clone(),
            creator: message.sender.id.clone(),
            description,
            options: args.collect(),
            length,
        };
        let poll = self.polls.create_poll(draft, message.received_at)?;
        Ok(Some(format!(
            "Your poll has been created and will end in {} minutes. \
             To vote, use command !vote <option>. To view the status, use command !sbpoll",
            poll.length().as_secs() / 60
        )))
    }

    fn disable_poll(&mut self, message: &CommandMessage, _: Vec<Argument>) -> CommandResult {
        let poll =
            self.polls
                .deactivate_poll(&message.channel, &message.sender, message.received_at)?;
        Ok(Some(format!(
            "Poll \"{}\" has been disabled.",
            poll.description
        )))
    }

    fn show_poll(&mut self, message: &CommandMessage, _: Vec<Argument>) -> CommandResult {
        let now = message.received_at;
        if let Some(poll) = self.polls.active_poll(&message.channel, now) {
            return Ok(Some(poll_status(poll, now)));
        }
        match self.polls.last_poll(&message.channel) {
            Some(poll) => Ok(Some(poll_results(poll))),
            None => Err(StateConflict::NoActivePoll.into()),
        }
    }

    fn vote(&mut self, message: &CommandMessage, args: Vec<Argument>) -> CommandResult {
        let option = Vote::parse_option(args.first().map(String::as_str))?;
        let (poll, replaced) = self.polls.cast_vote(
            &message.channel,
            &message.sender.id,
            option,
            message.received_at,
        )?;
        let label = &poll.options[option];
        Ok(Some(match replaced {
            Some(_) => format!(
                "@{} your vote has been changed to \"{}\".",
                message.sender.name, label
            ),
            None => format!(
                "@{} your vote for \"{}\" has been recorded.",
                message.sender.name, label
            ),
        }))
    }

    pub fn commands() -> BotCommands<Self> {
        BotCommands {
            commands: vec![
                BotCommand {
                    name: "dice",
                    authority_level: AuthorityLevel::Viewer,
                    usage: "!dice [sides]",
                    command: Self::roll_dice,
                },
                BotCommand {
                    name: "createpoll",
                    authority_level: AuthorityLevel::Broadcaster,
                    usage: r#"!createpoll <lengthInMinutes> "<description>" "<option1>" "<option2>" [option3...]"#,
                    command: Self::create_poll,
                },
                BotCommand {
                    name: "disablepoll",
                    authority_level: AuthorityLevel::Broadcaster,
                    usage: "!disablepoll",
                    command: Self::disable_poll,
                },
                BotCommand {
                    name: "sbpoll",
                    authority_level: AuthorityLevel::Viewer,
                    usage: "!sbpoll",
                    command: Self::show_poll,
                },
                BotCommand {
                    name: "vote",
                    authority_level: AuthorityLevel::Viewer,
                    usage: "!vote <option>",
                    command: Self::vote,
                },
            ],
        }
    }
}

fn option_lines(poll: &Poll) -> String {
    poll.tally()
        .iter()
        .enumerate()
        .map(|(index, (option, votes))| format!("[{}] {}: {} votes", index, option, votes))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn winner_line(poll: &Poll) -> String {
    match poll.leaders().as_slice() {
        [] => "Nobody voted.".to_owned(),
        [winner] => format!("Winner: {}", winner),
        [leaders @ .., last] => format!("It's a tie between {} and {}", leaders.join(", "), last),
    }
}

pub fn poll_status(poll: &Poll, now: SystemTime) -> String {
    format!(
        "Poll status: {} | {} | {} | Poll ends in {}",
        poll.status(),
        poll.description,
        option_lines(poll),
        format_remaining(poll.time_remaining(now))
    )
}

pub fn poll_results(poll: &Poll) -> String {
    format!(
        "Poll status: {} | {} | {} | {}",
        poll.status(),
        poll.description,
        option_lines(poll),
        winner_line(poll)
    )
}

pub fn poll_ended(poll: &Poll) -> String {
    format!(
        "Poll \"{}\" has ended! {} | {}",
        poll.description,
        option_lines(poll),
        winner_line(poll)
    )
}
