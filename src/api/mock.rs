//! Scripted vote API for testing without a server.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{ApiError, VoteApi};
use crate::models::{HealthResponse, ResultsResponse, VoteRequest, VoteResponse};

pub fn results(percentages: &[(&str, f64)], total: u64) -> ResultsResponse {
    ResultsResponse {
        percentages: percentages
            .iter()
            .map(|(choice, pct)| (choice.to_string(), *pct))
            .collect(),
        total: total.into(),
        votes: None,
    }
}

pub fn accepted() -> VoteResponse {
    VoteResponse {
        success: true,
        error: None,
        votes: None,
    }
}

pub fn declined() -> VoteResponse {
    VoteResponse {
        success: false,
        error: Some("Invalid choice".to_string()),
        votes: None,
    }
}

/// Replies are consumed in order. An empty vote queue fails the call, an
/// empty results queue falls back to `default_results` when set.
#[derive(Default)]
pub struct MockVoteApi {
    votes: Mutex<Vec<VoteRequest>>,
    vote_replies: Mutex<VecDeque<Result<VoteResponse, ApiError>>>,
    results_replies: Mutex<VecDeque<(Duration, Result<ResultsResponse, ApiError>)>>,
    default_results: Mutex<Option<ResultsResponse>>,
    results_calls: AtomicUsize,
}

impl MockVoteApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_vote_reply(&self, reply: Result<VoteResponse, ApiError>) {
        self.vote_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_results(&self, reply: Result<ResultsResponse, ApiError>) {
        self.push_delayed_results(Duration::ZERO, reply);
    }

    pub fn push_delayed_results(&self, delay: Duration, reply: Result<ResultsResponse, ApiError>) {
        self.results_replies.lock().unwrap().push_back((delay, reply));
    }

    pub fn set_default_results(&self, results: ResultsResponse) {
        *self.default_results.lock().unwrap() = Some(results);
    }

    pub fn votes(&self) -> Vec<VoteRequest> {
        self.votes.lock().unwrap().clone()
    }

    pub fn results_calls(&self) -> usize {
        self.results_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VoteApi for MockVoteApi {
    async fn submit_vote(&self, request: &VoteRequest) -> Result<VoteResponse, ApiError> {
        self.votes.lock().unwrap().push(request.clone());
        self.vote_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Connection("no scripted vote reply".to_string())))
    }

    async fn fetch_results(&self) -> Result<ResultsResponse, ApiError> {
        self.results_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.results_replies.lock().unwrap().pop_front();

        match scripted {
            Some((delay, reply)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                reply
            }
            None => self
                .default_results
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| ApiError::Connection("no scripted results".to_string())),
        }
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        Ok(HealthResponse {
            status: "healthy".to_string(),
        })
    }
}
