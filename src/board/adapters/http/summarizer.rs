//! HTTP client for the hosted `summarize-tasks` endpoint.

use crate::board::{
    domain::Task,
    ports::{SummarizerError, SummarizerResult, TaskSummarizer, TaskSummary},
};
use crate::config::SummarizerConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Reply given for an empty task list, matching the hosted endpoint.
const EMPTY_SUMMARY: &str = "No tasks to summarize.";

/// Summarizer that POSTs tasks to a hosted function.
#[derive(Debug, Clone)]
pub struct HttpTaskSummarizer {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    tasks: &'a [Task],
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl HttpTaskSummarizer {
    /// Creates a client for `endpoint`, authenticating with `api_key` as a
    /// bearer token when present.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizerError::Network`] when the HTTP client cannot be
    /// built.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> SummarizerResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SummarizerError::network)?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizerError::Network`] when the HTTP client cannot be
    /// built.
    pub fn from_config(config: &SummarizerConfig) -> SummarizerResult<Self> {
        Self::new(
            config.endpoint(),
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TaskSummarizer for HttpTaskSummarizer {
    async fn summarize(&self, tasks: &[Task]) -> SummarizerResult<TaskSummary> {
        if tasks.is_empty() {
            return Ok(TaskSummary {
                summary: EMPTY_SUMMARY.to_owned(),
                task_count: 0,
            });
        }

        debug!(endpoint = %self.endpoint, task_count = tasks.len(), "requesting prioritization");
        let mut request = self.client.post(&self.endpoint).json(&SummarizeRequest { tasks });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(SummarizerError::network)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            warn!(status = status.as_u16(), %message, "summarizer rejected request");
            return Err(SummarizerError::Http {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<TaskSummary>()
            .await
            .map_err(SummarizerError::invalid_response)
    }
}

/// Extracts a readable message from a failed response.
///
/// Prefers the JSON `error` field, then the raw body, then the status line.
fn error_message(status: StatusCode, body: &str) -> String {
    let status_line = format!(
        "HTTP {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown Status")
    );
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { error: Some(error) }) if !error.is_empty() => error,
        Ok(_) => status_line,
        Err(_) if !body.trim().is_empty() => body.trim().to_owned(),
        Err(_) => status_line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::json_error(r#"{"error":"Missing OpenAI API key"}"#, "Missing OpenAI API key")]
    #[case::json_without_error(r#"{"detail":"nope"}"#, "HTTP 500: Internal Server Error")]
    #[case::plain_text("upstream timed out\n", "upstream timed out")]
    #[case::empty_body("", "HTTP 500: Internal Server Error")]
    fn error_message_prefers_json_error_then_body(#[case] body: &str, #[case] expected: &str) {
        assert_eq!(error_message(StatusCode::INTERNAL_SERVER_ERROR, body), expected);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn empty_task_list_is_answered_without_a_request() {
        let summarizer =
            HttpTaskSummarizer::new("http://127.0.0.1:9/unused", None, Duration::from_secs(1))
                .expect("client should build");

        let summary = summarizer.summarize(&[]).await.expect("empty list succeeds");

        assert_eq!(summary.summary, EMPTY_SUMMARY);
        assert_eq!(summary.task_count, 0);
    }

    #[rstest]
    fn summary_decodes_camel_case_count() {
        let summary: TaskSummary =
            serde_json::from_str(r#"{"summary":"1. Ship it","taskCount":2}"#)
                .expect("valid payload");
        assert_eq!(summary.task_count, 2);
    }
}
