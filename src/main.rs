//! # Main Entry Point
//!
//! Initializes the bot:
//! - Domain: Configuration and Types
//! - Infrastructure: Matrix
//! - Application: Directory, Resolver, Router, Stats
//!

#![recursion_limit = "256"]

mod application;
mod domain;
mod infrastructure;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::SyncRoomMessageEvent,
    },
};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::application::directory::Directory;
use crate::application::router::CommandRouter;
use crate::application::stats::CommandStats;
use crate::domain::config::AppConfig;
use crate::domain::traits::ChatProvider;
use crate::infrastructure::matrix::MatrixService;

#[derive(Parser, Debug)]
#[command(name = "roster", about = "Answers who is responsible for which project")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "data/config.yaml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load Configuration
    let config_content = fs::read_to_string(&cli.config)
        .with_context(|| format!("Failed to read {}", cli.config))?;
    let config: AppConfig = serde_yaml::from_str(&config_content)
        .with_context(|| format!("Failed to parse {}", cli.config))?;

    // 2. Logging Setup
    if !Path::new("data").exists() {
        fs::create_dir("data").context("Failed to create data directory")?;
    }

    // Clear previous session log
    let log_path = Path::new("data/session.log");
    if log_path.exists() {
        let _ = fs::remove_file(log_path);
    }

    let file_appender = tracing_appender::rolling::never("data", "session.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn",
        )
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::info!("Starting Roster...");

    // 3. Load the project directory (once; lookups never touch disk again)
    let directory = Arc::new(Directory::load(
        Path::new(&config.directory.file),
        &config.directory.env_var,
    ));
    tracing::info!("Project directory ready: {} record(s)", directory.len());

    let stats = Arc::new(CommandStats::new());

    // 4. Matrix Setup
    let client = Client::builder()
        .homeserver_url(&config.services.matrix.homeserver)
        .build()
        .await?;

    client
        .matrix_auth()
        .login_username(
            &config.services.matrix.username,
            &config.services.matrix.password,
        )
        .send()
        .await?;

    tracing::info!("Logged in as {}", config.services.matrix.username);

    if let Some(name) = &config.services.matrix.display_name {
        if let Err(e) = client.account().set_display_name(Some(name.as_str())).await {
            tracing::warn!("Failed to set display name: {}", e);
        }
    }

    // 5. Event Loop
    let start_time = std::time::SystemTime::now();

    let loop_config = config.clone();
    let loop_directory = directory.clone();
    let loop_stats = stats.clone();

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let config = loop_config.clone();
        let directory = loop_directory.clone();
        let stats = loop_stats.clone();

        async move {
            if let Some(original_msg) = ev.as_original() {
                // Ignore events older than start_time
                let ts = ev.origin_server_ts();
                let event_time =
                    std::time::UNIX_EPOCH + std::time::Duration::from_millis(ts.get().into());
                if event_time < start_time {
                    return;
                }

                if let matrix_sdk::ruma::events::room::message::MessageType::Text(text_content) =
                    &original_msg.content.msgtype
                {
                    let body = &text_content.body;
                    if original_msg.sender == room.own_user_id() {
                        return;
                    }
                    tracing::info!("Received message from {}: {}", original_msg.sender, body);

                    let chat = MatrixService::new(room);
                    let router = CommandRouter::new(config, directory, stats);

                    // Dispatch
                    if let Err(e) = router
                        .route(&chat, body, original_msg.sender.as_str())
                        .await
                    {
                        tracing::error!("Failed to route message: {}", e);
                        let _ = chat
                            .send_notification(crate::strings::messages::GENERIC_FAILURE)
                            .await;
                    }
                }
            }
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            let _ = room.join().await;
        }
    });

    // 6. Sync keeps the process alive
    let sync_client = client.clone();
    let sync_handle = tokio::spawn(async move { sync_client.sync(SyncSettings::default()).await });

    if let Err(e) = sync_handle.await {
        tracing::error!("Matrix Sync Panic: {}", e);
    }

    Ok(())
}
