//! Prioritization of in-progress tasks through the summarizer port.

use crate::board::{
    domain::Task,
    ports::{SummarizerError, TaskSummarizer},
};
use std::sync::Arc;
use tracing::{error, info};

/// Result panel content for a prioritization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrioritizationReport {
    /// Narrative or failure explanation shown to the user.
    pub text: String,
    /// Number of tasks analysed; zero on failure.
    pub task_count: u32,
    /// Whether the summarizer answered successfully.
    pub succeeded: bool,
}

impl PrioritizationReport {
    fn failure(err: &SummarizerError) -> Self {
        Self {
            text: format!(
                "Failed to prioritize tasks: {err}\n\n\
                 Please check:\n\
                 - The summarizer API key is configured\n\
                 - The summarize-tasks function is deployed\n\
                 - You have in-progress tasks"
            ),
            task_count: 0,
            succeeded: false,
        }
    }
}

/// Requests a ranked-priority narrative for a set of tasks.
///
/// Invoked on explicit user request only; a failed call is reported, never
/// retried.
#[derive(Clone)]
pub struct PrioritizationService<Z>
where
    Z: TaskSummarizer,
{
    summarizer: Arc<Z>,
}

impl<Z> PrioritizationService<Z>
where
    Z: TaskSummarizer,
{
    /// Creates a new prioritization service.
    #[must_use]
    pub const fn new(summarizer: Arc<Z>) -> Self {
        Self { summarizer }
    }

    /// Prioritizes `tasks`, converting any failure into readable text.
    pub async fn prioritize(&self, tasks: &[Task]) -> PrioritizationReport {
        match self.summarizer.summarize(tasks).await {
            Ok(summary) => {
                info!(task_count = summary.task_count, "prioritization received");
                PrioritizationReport {
                    text: summary.summary,
                    task_count: summary.task_count,
                    succeeded: true,
                }
            }
            Err(err) => {
                error!(error = %err, "prioritization failed");
                PrioritizationReport::failure(&err)
            }
        }
    }
}
