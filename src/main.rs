//! # hwwatch
//!
//! Polls the Practicum homework API every `RETRY_TIME` seconds and reports
//! review status changes (and failures) to a Telegram chat.
//!
//! Required environment (a `.env` file is honoured):
//!   PRACTICUM_TOKEN    OAuth token for the homework API
//!   TELEGRAM_TOKEN     bot token
//!   TELEGRAM_CHAT_ID   destination chat

mod logging;

use std::sync::Arc;

use anyhow::Result;
use hwwatch_channels::{TelegramChannel, TelegramConfig};
use hwwatch_core::config::{Config, LogConfig};
use hwwatch_practicum::PracticumClient;
use hwwatch_scheduler::{Notifier, PollLoop};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init_logging(&LogConfig::from_env())?;

    let config = check_tokens(Config::from_env())?;
    tracing::info!(?config, "Starting hwwatch");

    let source = Arc::new(PracticumClient::from_config(&config)?);
    let channel = Arc::new(TelegramChannel::new(TelegramConfig::from(&config))?);
    let notifier = Notifier::new(channel, config.telegram_chat_id.clone());
    let poll = PollLoop::new(source, notifier, config.retry_interval);

    tokio::select! {
        _ = poll.run() => {}
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("Ctrl+C received, stopping");
        }
    }
    Ok(())
}

/// Startup gate: a configuration error is logged as critical and ends the
/// process before the poll loop starts.
fn check_tokens(loaded: hwwatch_core::Result<Config>) -> Result<Config> {
    loaded.map_err(|e| {
        tracing::error!(critical = true, error = %e, "Configuration check failed, poll loop not started");
        e.into()
    })
}
