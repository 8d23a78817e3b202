//! # hwwatch Channels
//! Chat destinations the watcher reports to.

pub mod telegram;

pub use telegram::{TelegramChannel, TelegramConfig};
