//! HTTP adapters for hosted board collaborators.

mod summarizer;

pub use summarizer::HttpTaskSummarizer;
