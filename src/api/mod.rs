//! Client side of the vote server's JSON API.

mod client;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use log::{info, warn};
use std::time::Duration;
use tokio::time::timeout;

use crate::models::{HealthResponse, ResultsResponse, VoteRequest, VoteResponse};

pub use client::{ApiError, HttpVoteApi};

pub const VOTE_PATH: &str = "/api/vote";
pub const RESULTS_PATH: &str = "/api/results";
pub const HEALTH_PATH: &str = "/api/health";

pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// The endpoints the widget consumes.
#[async_trait]
pub trait VoteApi: Send + Sync {
    /// POST a vote for one choice.
    async fn submit_vote(&self, request: &VoteRequest) -> Result<VoteResponse, ApiError>;

    /// GET the current aggregate results.
    async fn fetch_results(&self) -> Result<ResultsResponse, ApiError>;

    async fn health(&self) -> Result<HealthResponse, ApiError>;
}

/// Asks the server for its health and logs the answer. Gives up after
/// `limit`; returns whether the server reported healthy in time.
pub async fn check_health(api: &dyn VoteApi, limit: Duration) -> bool {
    match timeout(limit, api.health()).await {
        Ok(Ok(health)) if health.is_healthy() => {
            info!("Vote server is healthy");
            true
        }
        Ok(Ok(health)) => {
            warn!("Vote server reports status {:?}", health.status);
            false
        }
        Ok(Err(e)) => {
            warn!("Vote server health check failed: {}", e);
            false
        }
        Err(_) => {
            warn!("Vote server did not answer the health check within {:?}", limit);
            false
        }
    }
}
