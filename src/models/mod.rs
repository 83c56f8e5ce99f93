use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::HashMap;

// Body of POST /api/vote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteRequest {
    pub choice: String,
}

impl VoteRequest {
    pub fn new(choice: impl Into<String>) -> Self {
        Self { choice: choice.into() }
    }
}

// Server acknowledgement for a vote. Only `success` drives the widget,
// the rest is diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub votes: Option<HashMap<String, u64>>,
}

// Aggregate results from GET /api/results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsResponse {
    pub percentages: HashMap<String, f64>,
    pub total: Number,
    #[serde(default)]
    pub votes: Option<HashMap<String, u64>>,
}

impl ResultsResponse {
    pub fn percentage(&self, choice: &str) -> Option<f64> {
        self.percentages.get(choice).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Formats a percentage the way the results text shows it: the raw value
/// followed by `%`. Integral values carry no fractional part.
pub fn format_percentage(value: f64) -> String {
    format!("{}%", value)
}

/// Formats the vote total. The server sends a count, but any JSON number is
/// shown, with integral floats printed without a fraction.
pub fn format_total(total: &Number) -> String {
    if let Some(count) = total.as_u64() {
        count.to_string()
    } else if let Some(count) = total.as_i64() {
        count.to_string()
    } else {
        total.as_f64().map(|f| f.to_string()).unwrap_or_else(|| total.to_string())
    }
}
