use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::SystemTime;
use twitch_irc::{
    login::StaticLoginCredentials,
    message::{Badge, PrivmsgMessage},
    SecureTCPTransport, TwitchIRCClient,
};

mod log;

pub use log::*;

pub type TwitchClient = TwitchIRCClient<SecureTCPTransport, StaticLoginCredentials>;
pub type Cli = Arc<linefeed::Interface<linefeed::DefaultTerminal>>;
pub type ChannelLogin = String;

/// Twitch drops chat messages longer than this many characters.
pub const MAX_MESSAGE_LENGTH: usize = 500;

/// Cuts `message` down to [`MAX_MESSAGE_LENGTH`] characters, marking the cut with `...`.
pub fn fit_message(message: String) -> String {
    if message.chars().count() <= MAX_MESSAGE_LENGTH {
        return message;
    }
    let mut fitted: String = message.chars().take(MAX_MESSAGE_LENGTH - 3).collect();
    fitted.push_str("...");
    fitted
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    /// Stable twitch user id, survives renames
    pub id: String,
    pub login: String,
    pub name: String,
    pub roles: Roles,
    pub origin: MessageOrigin,
}

impl Sender {
    pub fn authority_level(&self) -> AuthorityLevel {
        self.roles.authority_level()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOrigin {
    Console,
    Twitch,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AuthorityLevel {
    Viewer = 0,
    Vip = 1,
    Moderator = 2,
    Broadcaster = 3,
}

/// Role badges a chatter holds in the channel the message was sent to.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Roles {
    pub broadcaster: bool,
    pub moderator: bool,
    pub vip: bool,
}

impl Roles {
    pub fn from_badges(badges: &[Badge]) -> Self {
        badges.iter().fold(Roles::default(), |mut roles, badge| {
            match badge.name.as_str() {
                "broadcaster" => roles.broadcaster = true,
                "moderator" => roles.moderator = true,
                "vip" => roles.vip = true,
                _ => (),
            }
            roles
        })
    }

    pub fn broadcaster() -> Self {
        Self {
            broadcaster: true,
            ..Self::default()
        }
    }

    pub fn authority_level(&self) -> AuthorityLevel {
        if self.broadcaster {
            AuthorityLevel::Broadcaster
        } else if self.moderator {
            AuthorityLevel::Moderator
        } else if self.vip {
            AuthorityLevel::Vip
        } else {
            AuthorityLevel::Viewer
        }
    }
}

/// A chat line normalized away from the IRC representation.
#[derive(Debug, Clone)]
pub struct CommandMessage {
    pub channel: ChannelLogin,
    pub sender: Sender,
    pub message_text: String,
    /// Set when the bot account itself sent the message
    pub is_self: bool,
    pub received_at: SystemTime,
}

pub fn private_to_command_message(message: &PrivmsgMessage, bot_login: &str) -> CommandMessage {
    CommandMessage {
        channel: message.channel_login.clone(),
        sender: Sender {
            id: message.sender.id.clone(),
            login: message.sender.login.clone(),
            name: message.sender.name.clone(),
            roles: Roles::from_badges(&message.badges),
            origin: MessageOrigin::Twitch,
        },
        message_text: message.message_text.clone(),
        is_self: message.sender.login.eq_ignore_ascii_case(bot_login),
        received_at: SystemTime::now(),
    }
}

pub fn console_to_command_message(channel: &str, message_text: String) -> CommandMessage {
    CommandMessage {
        channel: channel.to_owned(),
        sender: Sender {
            id: "console".to_owned(),
            login: "admin".to_owned(),
            name: "Admin".to_owned(),
            roles: Roles::broadcaster(),
            origin: MessageOrigin::Console,
        },
        message_text,
        is_self: false,
        received_at: SystemTime::now(),
    }
}

pub mod prelude {
    pub use crate::{
        console_to_command_message, fit_message, log, private_to_command_message, send_message,
        AuthorityLevel, ChannelLogin, Cli, CommandMessage, LogType, MessageOrigin, Roles, Sender,
        TwitchClient, MAX_MESSAGE_LENGTH,
    };
    pub use twitch_irc::{self, message::ServerMessage};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn badge(name: &str) -> Badge {
        Badge {
            name: name.to_owned(),
            version: "1".to_owned(),
        }
    }

    #[test]
    fn no_badges_is_a_viewer() {
        let roles = Roles::from_badges(&[]);
        assert_eq!(roles, Roles::default());
        assert_eq!(roles.authority_level(), AuthorityLevel::Viewer);
    }

    #[test]
    fn badges_set_role_flags() {
        let roles = Roles::from_badges(&[badge("vip"), badge("subscriber"), badge("moderator")]);
        assert!(roles.vip);
        assert!(roles.moderator);
        assert!(!roles.broadcaster);
        assert_eq!(roles.authority_level(), AuthorityLevel::Moderator);
    }

    #[test]
    fn broadcaster_outranks_everything() {
        let roles = Roles::from_badges(&[badge("broadcaster"), badge("vip")]);
        assert_eq!(roles.authority_level(), AuthorityLevel::Broadcaster);
        assert!(AuthorityLevel::Broadcaster > AuthorityLevel::Moderator);
        assert!(AuthorityLevel::Moderator > AuthorityLevel::Vip);
        assert!(AuthorityLevel::Vip > AuthorityLevel::Viewer);
    }

    fn privmsg(login: &str, badges: &str, text: &str) -> PrivmsgMessage {
        let raw = format!(
            "@badge-info=;badges={badges};color=#8A2BE2;display-name={login};emotes=;flags=;\
             id=0c3b9b5e-3f2a-4b1c-9f1e-2b7d8c6a5e41;mod=0;room-id=11148817;subscriber=0;\
             tmi-sent-ts=1594545155039;turbo=0;user-id=40286300;user-type= \
             :{lower}!{lower}@{lower}.tmi.twitch.tv PRIVMSG #bbbthunda :{text}",
            lower = login.to_lowercase(),
        );
        let irc = twitch_irc::message::IRCMessage::parse(&raw).expect("valid irc line");
        PrivmsgMessage::try_from(irc).expect("valid privmsg")
    }

    #[test]
    fn privmsg_maps_to_command_message() {
        let message = private_to_command_message(
            &privmsg("Schnee", "broadcaster/1,subscriber/12", "!dice 20"),
            "snaarfbot",
        );
        assert_eq!(message.channel, "bbbthunda");
        assert_eq!(message.message_text, "!dice 20");
        assert_eq!(message.sender.id, "40286300");
        assert_eq!(message.sender.login, "schnee");
        assert_eq!(message.sender.name, "Schnee");
        assert_eq!(message.sender.origin, MessageOrigin::Twitch);
        assert!(message.sender.roles.broadcaster);
        assert_eq!(message.sender.authority_level(), AuthorityLevel::Broadcaster);
        assert!(!message.is_self);
    }

    #[test]
    fn messages_from_the_bot_account_are_flagged() {
        let own = privmsg("snaarfbot", "", "Poll has ended!");
        assert!(private_to_command_message(&own, "snaarfbot").is_self);
        assert!(private_to_command_message(&own, "SnaarfBot").is_self);
        let viewer = privmsg("snaarfbotfan", "vip/1", "!vote 0");
        let message = private_to_command_message(&viewer, "snaarfbot");
        assert!(!message.is_self);
        assert_eq!(message.sender.authority_level(), AuthorityLevel::Vip);
    }

    #[test]
    fn long_messages_are_cut_to_the_chat_limit() {
        assert_eq!(fit_message("short".to_owned()), "short");
        let exact = "a".repeat(MAX_MESSAGE_LENGTH);
        assert_eq!(fit_message(exact.clone()), exact);

        let fitted = fit_message("ö".repeat(MAX_MESSAGE_LENGTH + 1));
        assert_eq!(fitted.chars().count(), MAX_MESSAGE_LENGTH);
        assert!(fitted.ends_with("ö..."));
    }

    #[test]
    fn console_messages_carry_broadcaster_authority() {
        let message = console_to_command_message("snaarf", "!disablepoll".to_owned());
        assert_eq!(message.sender.origin, MessageOrigin::Console);
        assert_eq!(message.sender.authority_level(), AuthorityLevel::Broadcaster);
        assert!(!message.is_self);
    }
}
