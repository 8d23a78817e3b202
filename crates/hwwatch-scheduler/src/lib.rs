//! # hwwatch Scheduler
//!
//! The poll/compare/notify loop.
//!
//! ## Architecture
//! ```text
//! PollLoop (one sleep per iteration)
//!   ├── HomeworkSource::fetch(cursor)   → JSON payload
//!   ├── check_response + parse_status   → notification text
//!   ├── text != last status?            → Notifier
//!   ├── cursor ← current_date
//!   └── on error: "Сбой в работе программы: …"
//!                 text != last error?   → Notifier
//! ```

pub mod engine;
pub mod notify;

pub use engine::{PollLoop, PollState};
pub use notify::Notifier;

#[cfg(test)]
mod testing;
