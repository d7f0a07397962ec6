use super::*;

use super::commands::poll_ended;

impl SnaarfBot {
    pub async fn handle_server_message(&mut self, client: &TwitchClient, message: ServerMessage) {
        match message {
            ServerMessage::Join(message) => {
                self.log(LogType::Info, &format!("Joined {}", message.channel_login));
            }
            ServerMessage::Notice(message) => {
                if message.message_text == "Login authentication failed" {
                    self.log(LogType::Error, "Login authentication failed.");
                    self.queue_shutdown = true;
                }
            }
            ServerMessage::Privmsg(message) => {
                self.log(
                    LogType::Chat,
                    &format!(
                        "#{} {}: {}",
                        message.channel_login, message.sender.name, message.message_text
                    ),
                );
                let message = private_to_command_message(&message, &self.login_name);
                self.handle_message(client, &message).await;
            }
            ServerMessage::UserNotice(message) => {
                self.log(LogType::Event, &message.system_message);
            }
            _ => (),
        }
    }

    /// Dispatches a line typed into the console as the channel's broadcaster.
    pub async fn handle_console_line(&mut self, client: &TwitchClient, line: String) {
        match self.console_channel.clone() {
            Some(channel) => {
                let message = console_to_command_message(&channel, line);
                self.handle_message(client, &message).await;
            }
            None => self.log(LogType::Warn, "No channel configured for console commands"),
        }
    }

    pub async fn handle_message(&mut self, client: &TwitchClient, message: &CommandMessage) {
        let outcome = self.dispatch(message);
        if let Some(reply) = outcome.reply {
            match message.sender.origin {
                MessageOrigin::Twitch => {
                    send_message(&self.cli, client, message.channel.clone(), reply).await;
                }
                MessageOrigin::Console => self.log(LogType::Console, &reply),
            }
        }
    }

    /// Completes polls that ran out of time, returning an announcement per channel.
    pub fn complete_expired_polls(&mut self, now: SystemTime) -> Vec<(ChannelLogin, String)> {
        let announcements = self
            .polls
            .complete_expired(now)
            .iter()
            .map(|poll| (poll.target.clone(), fit_message(poll_ended(poll))))
            .collect();
        self.drain_mutations();
        announcements
    }

    pub async fn update(&mut self, client: &TwitchClient, now: SystemTime) {
        for (channel, announcement) in self.complete_expired_polls(now) {
            send_message(&self.cli, client, channel, announcement).await;
        }
    }
}
