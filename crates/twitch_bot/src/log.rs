use super::*;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogType {
    Error,
    Warn,
    Info,
    Chat,
    Send,
    Console,
    Event,
}

impl Display for LogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use colored::*;
        match &self {
            LogType::Error => write!(f, "{}", "[ERROR]".red()),
            LogType::Warn => write!(f, "{}", "[WARN]".bright_red()),
            LogType::Info => write!(f, "{}", "[INFO]".yellow()),
            LogType::Chat => write!(f, "{}", "[CHAT]".cyan()),
            LogType::Send => write!(f, "{}", "[SEND]".green()),
            LogType::Console => write!(f, "{}", "[CONSOLE]".magenta()),
            LogType::Event => write!(f, "{}", "[EVENT]".blue()),
        }
    }
}

/// Print a log line, erasing the console prompt while writing if there is one.
pub fn log(cli: &Option<Cli>, log_type: LogType, message: &str) {
    match cli {
        Some(cli) => match cli.lock_writer_erase() {
            Ok(mut writer) => {
                let _ = writeln!(writer, "{} {}", log_type, message);
            }
            Err(_) => eprintln!("{} {}", log_type, message),
        },
        None => match log_type {
            LogType::Error | LogType::Warn => eprintln!("{} {}", log_type, message),
            _ => println!("{} {}", log_type, message),
        },
    }
}

pub async fn send_message(
    cli: &Option<Cli>,
    client: &TwitchClient,
    channel_login: ChannelLogin,
    message: String,
) {
    log(
        cli,
        LogType::Send,
        &format!("{}: {}", channel_login, message),
    );
    if let Err(error) = client.say(channel_login, message).await {
        log(cli, LogType::Error, &format!("Failed to send message: {error}"));
    }
}
