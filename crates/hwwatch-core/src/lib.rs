//! # hwwatch core
//!
//! Shared building blocks for the homework status watcher: the error
//! taxonomy, environment configuration, the homework status mapper and the
//! traits the poll loop is wired through.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::Config;
pub use error::{HwWatchError, Result};
pub use traits::{Channel, HomeworkSource};
pub use types::{Homework, HomeworkStatus, OutgoingMessage};
