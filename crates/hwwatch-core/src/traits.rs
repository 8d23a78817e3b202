//! Seams between the poll loop and the outside world.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::OutgoingMessage;

/// Source of homework status payloads.
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch homeworks updated since `from_date` (unix seconds).
    async fn fetch(&self, from_date: i64) -> Result<Value>;
}

/// Outbound chat channel.
#[async_trait]
pub trait Channel: Send + Sync {
    fn name(&self) -> &str;

    async fn send(&self, message: OutgoingMessage) -> Result<()>;
}
