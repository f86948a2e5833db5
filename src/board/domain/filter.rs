//! Search and category filtering over the board's task collection.

use super::{CategoryId, Task};

/// Live search and category criteria applied to the board.
///
/// An empty query and an unset category both match every task; when both
/// are set a task must satisfy each of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    query: String,
    category: Option<CategoryId>,
}

impl TaskFilter {
    /// Creates a filter that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Sets or clears the category restriction.
    #[must_use]
    pub const fn with_category(mut self, category: Option<CategoryId>) -> Self {
        self.category = category;
        self
    }

    /// Returns the search text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the category restriction.
    #[must_use]
    pub const fn category(&self) -> Option<CategoryId> {
        self.category
    }

    /// Returns `true` when the task satisfies both criteria.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_query(task) && self.matches_category(task)
    }

    /// Returns the matching tasks in collection order.
    #[must_use]
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }

    fn matches_query(&self, task: &Task) -> bool {
        let needle = self.query.to_lowercase();
        task.title().as_str().to_lowercase().contains(&needle)
            || task.description().to_lowercase().contains(&needle)
    }

    fn matches_category(&self, task: &Task) -> bool {
        self.category
            .is_none_or(|category| task.category_id() == Some(category))
    }
}
