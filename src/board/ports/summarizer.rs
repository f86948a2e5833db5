//! Port for the hosted task prioritization endpoint.

use crate::board::domain::Task;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for summarizer operations.
pub type SummarizerResult<T> = Result<T, SummarizerError>;

/// Ranked-priority narrative returned by the summarizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    /// Narrative ranking the submitted tasks.
    pub summary: String,
    /// Number of tasks the summarizer analysed.
    pub task_count: u32,
}

/// Text-generation contract used to prioritize tasks.
///
/// Calls are made on explicit request only and are never retried.
#[async_trait]
pub trait TaskSummarizer: Send + Sync {
    /// Ranks the given tasks from top to bottom priority.
    async fn summarize(&self, tasks: &[Task]) -> SummarizerResult<TaskSummary>;
}

/// Errors returned by summarizer adapters.
#[derive(Debug, Clone, Error)]
pub enum SummarizerError {
    /// The endpoint could not be reached.
    #[error("Network error: Unable to reach the AI service. Check your connection.")]
    Network(Arc<dyn std::error::Error + Send + Sync>),

    /// The endpoint answered with a non-success status.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error text extracted from the response.
        message: String,
    },

    /// The endpoint answered with an unreadable payload.
    #[error("invalid summarizer response: {0}")]
    InvalidResponse(Arc<dyn std::error::Error + Send + Sync>),
}

impl SummarizerError {
    /// Wraps a transport error.
    pub fn network(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Network(Arc::new(err))
    }

    /// Wraps a decoding error.
    pub fn invalid_response(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidResponse(Arc::new(err))
    }
}
