//! Best-effort delivery to the configured chat.

use std::sync::Arc;

use hwwatch_core::traits::Channel;
use hwwatch_core::types::OutgoingMessage;

/// Long-lived handle bound to one channel and one destination chat.
///
/// Delivery failures are logged and swallowed: the loop that calls this is
/// itself the error reporter and must keep running.
#[derive(Clone)]
pub struct Notifier {
    channel: Arc<dyn Channel>,
    chat_id: String,
}

impl Notifier {
    pub fn new(channel: Arc<dyn Channel>, chat_id: impl Into<String>) -> Self {
        Self { channel, chat_id: chat_id.into() }
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    pub async fn notify(&self, text: &str) {
        let message = OutgoingMessage::new(self.chat_id.clone(), text);
        match self.channel.send(message).await {
            Ok(()) => {
                tracing::info!(channel = self.channel.name(), chat_id = %self.chat_id, message = text, "Message sent");
            }
            Err(e) => {
                tracing::error!(channel = self.channel.name(), chat_id = %self.chat_id, error = %e, "Message delivery failed");
            }
        }
    }
}
