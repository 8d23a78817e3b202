//! In-memory fakes for the core traits.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use hwwatch_core::error::{HwWatchError, Result};
use hwwatch_core::traits::{Channel, HomeworkSource};
use hwwatch_core::types::OutgoingMessage;
use serde_json::Value;

/// Channel that records every message, optionally failing each send.
#[derive(Default)]
pub struct RecordingChannel {
    fail: bool,
    attempts: Mutex<usize>,
    sent: Mutex<Vec<OutgoingMessage>>,
}

impl RecordingChannel {
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|m| m.text).collect()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl Channel for RecordingChannel {
    fn name(&self) -> &str { "recording" }

    async fn send(&self, message: OutgoingMessage) -> Result<()> {
        *self.attempts.lock().unwrap() += 1;
        if self.fail {
            return Err(HwWatchError::notify("chat unreachable"));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

/// Source that replays a fixed script of responses and records each cursor.
#[derive(Default)]
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<Value>>>,
    cursors: Mutex<Vec<i64>>,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = Result<Value>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            cursors: Mutex::default(),
        }
    }

    pub fn cursors(&self) -> Vec<i64> {
        self.cursors.lock().unwrap().clone()
    }
}

#[async_trait]
impl HomeworkSource for ScriptedSource {
    fn name(&self) -> &str { "scripted" }

    async fn fetch(&self, from_date: i64) -> Result<Value> {
        self.cursors.lock().unwrap().push(from_date);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HwWatchError::transport("script exhausted")))
    }
}
