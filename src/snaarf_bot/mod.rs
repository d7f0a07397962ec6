use super::*;

mod bot;
mod commands;

pub struct SnaarfBot {
    cli: Option<Cli>,
    login_name: String,
    /// Channel that console commands are dispatched to
    console_channel: Option<ChannelLogin>,
    commands: BotCommands<Self>,
    polls: PollStore,
    dice: Dice,
    pub queue_shutdown: bool,
}

impl SnaarfBot {
    pub fn new(cli: Option<&Cli>, config: &LoginConfig) -> Self {
        Self {
            cli: cli.cloned(),
            login_name: config.login_name.clone(),
            console_channel: config.channels.first().cloned(),
            commands: Self::commands(),
            polls: PollStore::new(),
            dice: Dice::new(config.default_die_sides),
            queue_shutdown: false,
        }
    }

    pub fn log(&self, log_type: LogType, message: &str) {
        log(&self.cli, log_type, message)
    }

    /// Runs the command contained in `message`, if any, to completion.
    /// Never fails: bad input turns into a reply or is ignored.
    pub fn dispatch(&mut self, message: &CommandMessage) -> Outcome {
        if message.is_self {
            return Outcome::default();
        }
        let invocation = match Invocation::parse(&message.message_text) {
            Some(invocation) => invocation,
            None => return Outcome::default(),
        };
        let command = match self.commands.find(&invocation.name) {
            Some(command) => command.clone(),
            None => {
                self.log(
                    LogType::Warn,
                    &format!("* Unknown command {}, ignored", invocation.name),
                );
                return Outcome::default();
            }
        };
        if !check_authority(command.authority_level, message) {
            return Outcome::default();
        }

        let reply = match (command.command)(self, message, invocation.args) {
            Ok(reply) => reply,
            Err(CommandError::Unauthorized(_)) => {
                return Outcome {
                    reply: None,
                    mutations: self.drain_mutations(),
                }
            }
            Err(error) => {
                self.log(
                    LogType::Warn,
                    &format!(
                        "Failed to execute {}: {}  Message: {}",
                        command.name, error, message.message_text
                    ),
                );
                Some(failure_reply(&command, &error))
            }
        };
        self.log(
            LogType::Info,
            &format!("* Executed {} command in {}", command.name, message.channel),
        );

        Outcome {
            reply: reply.map(fit_message),
            mutations: self.drain_mutations(),
        }
    }

    fn drain_mutations(&mut self) -> Vec<Mutation> {
        let mutations = self.polls.drain_mutations();
        for mutation in &mutations {
            self.log(LogType::Event, &mutation.to_string());
        }
        mutations
    }
}

fn failure_reply(command: &BotCommand<SnaarfBot>, error: &CommandError) -> String {
    match error {
        CommandError::Validation(_) => format!("{} Usage: {}", error, command.usage),
        _ => error.to_string(),
    }
}
