//! The voting widget: casts votes and keeps the results text current.
//!
//! Both operations are best effort. Whatever goes wrong (transport, a body
//! that isn't the expected JSON, a missing element) is logged and dropped;
//! the page keeps showing whatever it showed before.

mod layout;

use log::{debug, error, warn};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::api::{ApiError, VoteApi};
use crate::models::{format_percentage, format_total, ResultsResponse, VoteRequest};
use crate::view::{View, ViewError};

pub use layout::{ElementIds, TOTAL_VOTES_ID, VOTED_CLASS};

pub const DEFAULT_HIGHLIGHT: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error("Results have no percentage for {0:?}")]
    MissingChoice(String),
}

#[derive(Clone)]
pub struct VotingWidget {
    api: Arc<dyn VoteApi>,
    view: Arc<dyn View>,
    ids: ElementIds,
    highlight: Duration,
}

impl VotingWidget {
    pub fn new(api: Arc<dyn VoteApi>, view: Arc<dyn View>, ids: ElementIds) -> Self {
        Self {
            api,
            view,
            ids,
            highlight: DEFAULT_HIGHLIGHT,
        }
    }

    /// How long the `voted` class stays on a button.
    pub fn with_highlight(mut self, highlight: Duration) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn ids(&self) -> &ElementIds {
        &self.ids
    }

    /// Casts a vote. On acceptance the button is marked and the results are
    /// refreshed right away; everything else is only logged.
    pub async fn vote(&self, choice: &str) {
        if let Err(e) = self.try_vote(choice).await {
            error!("Error voting for {}: {}", choice, e);
        }
    }

    /// Fetches the aggregate results and rewrites the percentage and total texts.
    pub async fn update_results(&self) {
        if let Err(e) = self.try_update_results().await {
            error!("Error fetching results: {}", e);
        }
    }

    async fn try_vote(&self, choice: &str) -> Result<(), WidgetError> {
        let response = self.api.submit_vote(&VoteRequest::new(choice)).await?;

        if !response.success {
            warn!(
                "Vote for {} was not accepted: {}",
                choice,
                response.error.as_deref().unwrap_or("no reason given")
            );
            return Ok(());
        }

        debug!("Vote for {} accepted, tallies {:?}", choice, response.votes);
        let button = ElementIds::button(choice);
        self.view.add_class(&button, VOTED_CLASS)?;
        self.clear_highlight_later(button);

        self.update_results().await;
        Ok(())
    }

    fn clear_highlight_later(&self, button: String) {
        let view = Arc::clone(&self.view);
        let delay = self.highlight;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = view.remove_class(&button, VOTED_CLASS) {
                error!("Failed to clear highlight on {}: {}", button, e);
            }
        });
    }

    async fn try_update_results(&self) -> Result<(), WidgetError> {
        let results = self.api.fetch_results().await?;
        let writes = self.results_writes(&results)?;
        self.view.set_texts(&writes)?;
        Ok(())
    }

    /// Every text write for one results response, or nothing at all.
    pub fn results_writes(&self, results: &ResultsResponse) -> Result<Vec<(String, String)>, WidgetError> {
        let mut writes = Vec::with_capacity(self.ids.choices().len() + 1);
        for choice in self.ids.choices() {
            let pct = results
                .percentage(choice)
                .ok_or_else(|| WidgetError::MissingChoice(choice.clone()))?;
            writes.push((ElementIds::percentage(choice), format_percentage(pct)));
        }
        writes.push((TOTAL_VOTES_ID.to_string(), format_total(&results.total)));
        Ok(writes)
    }
}
