//! Unified error types for hwwatch.
//!
//! Display strings are user facing: the poll loop forwards them verbatim into
//! the chat as part of the failure notification.

use thiserror::Error;

/// Result type alias using HwWatchError.
pub type Result<T> = std::result::Result<T, HwWatchError>;

#[derive(Error, Debug)]
pub enum HwWatchError {
    // Homework API errors
    #[error("Ошибка при запросе к основному API: {0}")]
    Transport(String),

    #[error("Эндпоинт API вернул код {status}")]
    HttpStatus { status: u16 },

    #[error("Ответ API не является корректным JSON: {0}")]
    Decode(String),

    // Response shape errors
    #[error("Некорректный формат ответа API: {0}")]
    Shape(String),

    #[error("Нет домашних работ, отправленных на проверку")]
    Empty,

    #[error("В данных о работе отсутствует ключ {0}")]
    MissingField(&'static str),

    #[error("Неизвестный статус работы: {0}")]
    UnknownStatus(String),

    // Channel errors
    #[error("Ошибка отправки сообщения в телеграм: {0}")]
    Notify(String),

    // Config errors
    #[error("Отсутствуют переменные окружения: {}", .0.join(", "))]
    MissingConfig(Vec<&'static str>),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HwWatchError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }

    pub fn notify(msg: impl Into<String>) -> Self {
        Self::Notify(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<serde_json::Error> for HwWatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
