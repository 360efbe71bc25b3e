#![doc = "Posting backend: publishes status messages to the platform's HTTP API."]
//
//! [`StatusClient`] implements the core [`Poster`] trait. It sends
//! `{"text": message}` as JSON with a bearer token. Obtaining the token is
//! outside this crate; it is read from the environment by `load_config`.

use std::time::Duration;

use async_trait::async_trait;
use corpus_poster_core::contract::Poster;
use corpus_poster_core::PostError;
use serde::Serialize;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct NewStatus<'a> {
    text: &'a str,
}

pub struct StatusClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl StatusClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let endpoint = endpoint.into();
        tracing::info!(endpoint = %endpoint, "Initialized StatusClient");
        Ok(Self {
            http,
            endpoint,
            token: token.into(),
        })
    }
}

/// Connection-level failures become [`PostError::Connection`]; anything else
/// is handed to `terminal`.
pub(crate) fn transport_error(
    e: reqwest::Error,
    terminal: impl FnOnce(reqwest::Error) -> PostError,
) -> PostError {
    if e.is_connect() || e.is_timeout() {
        PostError::Connection(e.to_string())
    } else {
        terminal(e)
    }
}

#[async_trait]
impl Poster for StatusClient {
    async fn post(&self, message: &str) -> Result<(), PostError> {
        tracing::debug!(chars = message.chars().count(), "Posting status");
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&NewStatus { text: message })
            .send()
            .await
            .map_err(|e| {
                transport_error(e, |e| PostError::Backend {
                    status: e.status().map(|s| s.as_u16()).unwrap_or_default(),
                    message: e.to_string(),
                })
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(status = status.as_u16(), "Status posted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!(status = status.as_u16(), body = %body, "Platform rejected status");
        Err(PostError::Backend {
            status: status.as_u16(),
            message: body,
        })
    }
}
