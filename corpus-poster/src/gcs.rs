#![doc = "Cloud bucket backend: stores corpus and cursor objects in Google Cloud Storage."]
//
//! [`GcsStore`] implements the core [`ObjectStore`] trait over the GCS JSON
//! API. Objects are read with `alt=media` and written with a simple media
//! upload, which creates the object or replaces it.

use std::time::Duration;

use async_trait::async_trait;
use corpus_poster_core::contract::ObjectStore;
use corpus_poster_core::PostError;
use reqwest::{StatusCode, Url};

use crate::status::transport_error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GcsStore {
    http: reqwest::Client,
    base_url: Url,
    bucket: String,
    token: String,
}

impl GcsStore {
    pub fn new(
        base_url: &str,
        bucket: impl Into<String>,
        token: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("GCS base url {base_url} cannot carry a path");
        }
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let bucket = bucket.into();
        tracing::info!(base_url = %base_url, bucket = %bucket, "Initialized GcsStore");
        Ok(Self {
            http,
            base_url,
            bucket,
            token: token.into(),
        })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn download_url(&self, key: &str) -> Url {
        let mut url = self.url(&["storage", "v1", "b", self.bucket.as_str(), "o", key]);
        url.query_pairs_mut().append_pair("alt", "media");
        url
    }

    fn upload_url(&self, key: &str) -> Url {
        let mut url = self.url(&["upload", "storage", "v1", "b", self.bucket.as_str(), "o"]);
        url.query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", key);
        url
    }

    fn request_failed(key: &str, e: reqwest::Error) -> PostError {
        transport_error(e, |e| PostError::StoreUnavailable {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl ObjectStore for GcsStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, PostError> {
        tracing::debug!(bucket = %self.bucket, key, "Downloading object");
        let response = self
            .http
            .get(self.download_url(key))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| Self::request_failed(key, e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(PostError::NotFound {
                key: key.to_string(),
            }),
            status if status.is_success() => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| Self::request_failed(key, e))?;
                Ok(bytes.to_vec())
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                tracing::error!(bucket = %self.bucket, key, status = status.as_u16(), body = %body, "Object download failed");
                Err(PostError::StoreUnavailable {
                    key: key.to_string(),
                    reason: format!("status {status}: {body}"),
                })
            }
        }
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), PostError> {
        tracing::debug!(bucket = %self.bucket, key, size = bytes.len(), "Uploading object");
        let response = self
            .http
            .post(self.upload_url(key))
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(bytes)
            .send()
            .await
            .map_err(|e| Self::request_failed(key, e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        tracing::error!(bucket = %self.bucket, key, status = status.as_u16(), body = %body, "Object upload failed");
        Err(PostError::StoreUnavailable {
            key: key.to_string(),
            reason: format!("status {status}: {body}"),
        })
    }
}
