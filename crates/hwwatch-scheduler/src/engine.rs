//! Poll loop — fetch, compare with the last sent text, notify on change.

use std::sync::Arc;
use std::time::Duration;

use hwwatch_core::error::{HwWatchError, Result};
use hwwatch_core::traits::HomeworkSource;
use hwwatch_core::types::homework::{check_response, current_date, parse_status};

use crate::notify::Notifier;

/// Prefix of every failure notification.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Everything the loop mutates between iterations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollState {
    /// `from_date` for the next fetch (unix seconds).
    pub cursor: i64,
    pub last_status_message: String,
    pub last_error_message: String,
}

impl PollState {
    pub fn new(cursor: i64) -> Self {
        Self { cursor, ..Self::default() }
    }
}

pub struct PollLoop {
    source: Arc<dyn HomeworkSource>,
    notifier: Notifier,
    interval: Duration,
    state: PollState,
}

impl PollLoop {
    /// Create a loop whose cursor starts at the current time.
    pub fn new(source: Arc<dyn HomeworkSource>, notifier: Notifier, interval: Duration) -> Self {
        Self {
            source,
            notifier,
            interval,
            state: PollState::new(chrono::Utc::now().timestamp()),
        }
    }

    pub fn with_state(mut self, state: PollState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Run forever, sleeping once per iteration whatever its outcome.
    pub async fn run(mut self) {
        tracing::info!(
            source = self.source.name(),
            chat_id = %self.notifier.chat_id(),
            interval_secs = self.interval.as_secs(),
            cursor = self.state.cursor,
            "Poll loop started"
        );
        loop {
            self.run_cycle().await;
            tokio::time::sleep(self.interval).await;
        }
    }

    /// One iteration without the sleep.
    pub async fn run_cycle(&mut self) {
        if let Err(e) = self.check_once().await {
            self.report_failure(e).await;
        }
    }

    async fn check_once(&mut self) -> Result<()> {
        let response = self.source.fetch(self.state.cursor).await?;
        let record = check_response(&response)?;
        let message = parse_status(record)?;

        if message != self.state.last_status_message {
            tracing::info!(%message, "Homework status changed");
            self.notifier.notify(&message).await;
            self.state.last_status_message = message;
        } else {
            tracing::debug!(%message, "Status unchanged");
        }

        match current_date(&response) {
            Some(date) => self.state.cursor = date,
            None => tracing::warn!(cursor = self.state.cursor, "Response has no current_date, keeping cursor"),
        }
        Ok(())
    }

    async fn report_failure(&mut self, err: HwWatchError) {
        tracing::error!(error = %err, cursor = self.state.cursor, "Poll cycle failed");

        let message = format!("{FAILURE_PREFIX}: {err}");
        if message != self.state.last_error_message {
            self.notifier.notify(&message).await;
            self.state.last_error_message = message;
        }
    }
}
