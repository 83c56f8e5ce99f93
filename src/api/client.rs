use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use super::{VoteApi, HEALTH_PATH, RESULTS_PATH, VOTE_PATH};
use crate::models::{HealthResponse, ResultsResponse, VoteRequest, VoteResponse};

/// Errors that can occur when talking to the vote server.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Server returned status {0}")]
    Status(u16),
}

/// reqwest-backed implementation of [`VoteApi`].
pub struct HttpVoteApi {
    client: Client,
    base_url: String,
}

impl HttpVoteApi {
    pub fn new(base_url: impl Into<String>, connect_timeout: Duration) -> Result<Self, ApiError> {
        // No request timeout: a slow server just leaves the last results on screen
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_connect() {
            ApiError::Connection(format!("Cannot connect to {}", self.base_url))
        } else {
            ApiError::Http(e)
        }
    }
}

// The body is read whatever the status: a 400 still carries `{"success": false}`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;

    match serde_json::from_slice(&body) {
        Ok(value) => Ok(value),
        Err(_) if !status.is_success() => Err(ApiError::Status(status.as_u16())),
        Err(e) => Err(ApiError::Parse(e.to_string())),
    }
}

#[async_trait]
impl VoteApi for HttpVoteApi {
    async fn submit_vote(&self, request: &VoteRequest) -> Result<VoteResponse, ApiError> {
        debug!("POST {} choice={}", VOTE_PATH, request.choice);
        let response = self
            .client
            .post(self.url(VOTE_PATH))
            .json(request)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        read_json(response).await
    }

    async fn fetch_results(&self) -> Result<ResultsResponse, ApiError> {
        debug!("GET {}", RESULTS_PATH);
        let response = self
            .client
            .get(self.url(RESULTS_PATH))
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        read_json(response).await
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        let response = self
            .client
            .get(self.url(HEALTH_PATH))
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        read_json(response).await
    }
}
