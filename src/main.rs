use clap::Parser;
use futures::lock::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use twitch_bot::prelude::*;
use twitch_bot::prelude::twitch_irc::{login::StaticLoginCredentials, ClientConfig};

mod commands;
mod config;
mod dice;
mod error;
mod polls;
mod snaarf_bot;

use commands::*;
use config::*;
use dice::*;
use error::*;
use polls::{Mutation, PollStore};
use snaarf_bot::SnaarfBot;

/// Twitch chat bot with dice rolls and channel polls
#[derive(Parser)]
#[clap(author, version, about)]
struct Opts {
    /// Path to the login config file
    #[clap(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Run without the interactive console
    #[clap(long)]
    no_cli: bool,
}

#[tokio::main]
async fn main() {
    let opts = Opts::parse();

    let cli = if opts.no_cli {
        None
    } else {
        match linefeed::Interface::new("snaarf-bot") {
            Ok(interface) => Some(Arc::new(interface)),
            Err(error) => {
                log(
                    &None,
                    LogType::Warn,
                    &format!("Console unavailable, continuing without it: {error}"),
                );
                None
            }
        }
    };

    let config = match LoginConfig::load(&opts.config) {
        Ok(config) => config,
        Err(error) => {
            log(&cli, LogType::Error, &error.to_string());
            std::process::exit(1);
        }
    };

    run(cli, config).await;
}

async fn run(cli: Option<Cli>, config: LoginConfig) {
    let client_config = ClientConfig::new_simple(StaticLoginCredentials::new(
        config.login_name.clone(),
        Some(config.oauth_token.clone()),
    ));
    let (mut incoming_messages, client) = TwitchClient::new(client_config);

    let bot = Arc::new(Mutex::new(SnaarfBot::new(cli.as_ref(), &config)));

    let message_bot = Arc::clone(&bot);
    let message_client = client.clone();
    let message_handle = tokio::spawn(async move {
        while let Some(message) = incoming_messages.recv().await {
            let mut bot = message_bot.lock().await;
            bot.handle_server_message(&message_client, message).await;
            if bot.queue_shutdown {
                bot.log(LogType::Info, "Shutting down...");
                break;
            }
        }
    });

    let update_bot = Arc::clone(&bot);
    let update_client = client.clone();
    let update_handle = tokio::spawn(async move {
        const UPDATE_INTERVAL: std::time::Duration = std::time::Duration::from_secs(1);
        let mut interval = tokio::time::interval(UPDATE_INTERVAL);
        loop {
            interval.tick().await;
            update_bot
                .lock()
                .await
                .update(&update_client, SystemTime::now())
                .await;
        }
    });

    let console_handle = cli.map(|cli| {
        let (sender, mut receiver) = tokio::sync::mpsc::unbounded_channel();
        // linefeed blocks on reads, keep it off the runtime
        std::thread::spawn(move || {
            let _ = cli.set_prompt("> ");
            while let Ok(linefeed::ReadResult::Input(input)) = cli.read_line() {
                cli.add_history_unique(input.clone());
                if sender.send(input).is_err() {
                    break;
                }
            }
        });

        let console_bot = Arc::clone(&bot);
        let console_client = client.clone();
        tokio::spawn(async move {
            while let Some(input) = receiver.recv().await {
                console_bot
                    .lock()
                    .await
                    .handle_console_line(&console_client, input)
                    .await;
            }
        })
    });

    for channel in &config.channels {
        if let Err(error) = client.join(channel.clone()) {
            bot.lock().await.log(
                LogType::Error,
                &format!("Failed to join {channel}: {error:?}"),
            );
        }
    }

    if let Err(error) = message_handle.await {
        bot.lock()
            .await
            .log(LogType::Error, &format!("Message loop crashed: {error}"));
    }
    update_handle.abort();
    if let Some(handle) = console_handle {
        handle.abort();
    }
}
