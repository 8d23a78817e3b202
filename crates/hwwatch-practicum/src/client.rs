//! Practicum homework API client — one authorized GET per call, no retries.

use std::time::Duration;

use async_trait::async_trait;
use hwwatch_core::config::Config;
use hwwatch_core::error::{HwWatchError, Result};
use hwwatch_core::traits::HomeworkSource;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;

pub struct PracticumClient {
    endpoint: String,
    token: String,
    client: reqwest::Client,
}

impl PracticumClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hwwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HwWatchError::config(format!("HTTP client: {e}")))?;

        Ok(Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.endpoint, &config.practicum_token, config.request_timeout)
    }
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    fn name(&self) -> &str { "practicum" }

    async fn fetch(&self, from_date: i64) -> Result<serde_json::Value> {
        let timestamp = if from_date == 0 {
            chrono::Utc::now().timestamp()
        } else {
            from_date
        };

        let resp = self.client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", timestamp)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(endpoint = %self.endpoint, error = %e, "Homework API request failed");
                HwWatchError::transport(e.to_string())
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            tracing::error!(endpoint = %self.endpoint, status = status.as_u16(), "Homework API returned non-200 status");
            return Err(HwWatchError::HttpStatus { status: status.as_u16() });
        }

        let body = resp.text().await
            .map_err(|e| HwWatchError::transport(format!("reading response body: {e}")))?;

        let json: serde_json::Value = serde_json::from_str(&body)?;
        tracing::debug!(from_date = timestamp, "Homework API answered");
        Ok(json)
    }
}
