//! Domain types shared across crates.

pub mod homework;
pub mod message;

pub use homework::{Homework, HomeworkStatus};
pub use message::OutgoingMessage;
