//! Homework records and the status → verdict table.
//!
//! The API response is handled as a raw `serde_json::Value` rather than a
//! derived struct so each kind of malformed payload maps onto its own error.

use serde_json::Value;

use crate::error::{HwWatchError, Result};

/// Review state of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    /// Parse an API status value. Unknown values are an error.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "approved" => Ok(Self::Approved),
            "reviewing" => Ok(Self::Reviewing),
            "rejected" => Ok(Self::Rejected),
            other => Err(HwWatchError::UnknownStatus(other.to_string())),
        }
    }

    /// Verdict text shown to the user.
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approved => write!(f, "approved"),
            Self::Reviewing => write!(f, "reviewing"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// A validated homework record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Homework {
    pub name: String,
    pub status: HomeworkStatus,
}

impl Homework {
    /// Validate a single record taken from the `homeworks` array.
    pub fn from_value(record: &Value) -> Result<Self> {
        let obj = record
            .as_object()
            .ok_or_else(|| HwWatchError::shape("запись о работе не является объектом"))?;

        let name = string_field(obj, "homework_name")?;
        let status = string_field(obj, "status")?;

        Ok(Self {
            name: name.to_string(),
            status: HomeworkStatus::parse(status)?,
        })
    }

    /// Notification text for this record.
    pub fn message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.name,
            self.status.verdict()
        )
    }
}

fn string_field<'a>(obj: &'a serde_json::Map<String, Value>, key: &'static str) -> Result<&'a str> {
    match obj.get(key) {
        None | Some(Value::Null) => Err(HwWatchError::MissingField(key)),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(HwWatchError::shape(format!("поле {key} не является строкой: {other}"))),
    }
}

/// Validate the API response and return its most recent homework record.
///
/// Only index 0 of `homeworks` is considered.
pub fn check_response(response: &Value) -> Result<&Value> {
    let obj = response
        .as_object()
        .ok_or_else(|| HwWatchError::shape("ответ API не является объектом"))?;

    let homeworks = match obj.get("homeworks") {
        None | Some(Value::Null) => return Err(HwWatchError::Empty),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(HwWatchError::shape("поле homeworks не является списком")),
    };

    homeworks.first().ok_or(HwWatchError::Empty)
}

/// Render the notification text for a single homework record.
pub fn parse_status(record: &Value) -> Result<String> {
    Homework::from_value(record).map(|hw| hw.message())
}

/// `current_date` of the response, if the server sent a usable one.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}
