//! Outbound chat messages.

use serde::{Deserialize, Serialize};

/// Outgoing message to a channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub chat_id: String,
    pub text: String,
}

impl OutgoingMessage {
    pub fn new(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_send_message_body() {
        let msg = OutgoingMessage::new("42", "hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, serde_json::json!({"chat_id": "42", "text": "hello"}));
    }
}
