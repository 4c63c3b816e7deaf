use serde::{Deserialize, Serialize};

use crate::models::task::Task;

/// Status tab applied to the visible list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => !task.completed,
            StatusFilter::Completed => task.completed,
        }
    }
}

/// Per-status totals over the full collection, independent of the active
/// filter and search term, so tab badges stay truthful while the visible
/// list is narrowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub all: usize,
    pub pending: usize,
    pub completed: usize,
}

/// Tasks visible under the given filter and search term, in collection order.
///
/// A non-empty search term must match case-insensitively in the title or
/// description, and the status filter must also hold. Search applies first;
/// the two predicates AND together.
pub fn visible<'a>(tasks: &'a [Task], filter: StatusFilter, search: &str) -> Vec<&'a Task> {
    let needle = search.to_lowercase();
    tasks
        .iter()
        .filter(|task| {
            if !needle.is_empty()
                && !task.title.to_lowercase().contains(&needle)
                && !task.description.to_lowercase().contains(&needle)
            {
                return false;
            }
            filter.matches(task)
        })
        .collect()
}

/// Totals over the full collection.
pub fn counts(tasks: &[Task]) -> TaskCounts {
    let completed = tasks.iter().filter(|t| t.completed).count();
    TaskCounts {
        all: tasks.len(),
        pending: tasks.len() - completed,
        completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn task(title: &str, description: &str, completed: bool) -> Task {
        let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        Task {
            id: format!("task_{title}"),
            title: title.to_string(),
            description: description.to_string(),
            completed,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn pending_filter_selects_incomplete_tasks() {
        let tasks = vec![task("A", "", false), task("B", "", true)];

        let titles: Vec<_> = visible(&tasks, StatusFilter::Pending, "")
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, ["A"]);

        let totals = counts(&tasks);
        assert_eq!(totals, TaskCounts { all: 2, pending: 1, completed: 1 });
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let tasks = vec![
            task("Category review", "", false),
            task("Other", "feed the CAT", true),
            task("Unrelated", "", false),
        ];

        let hits: Vec<_> = visible(&tasks, StatusFilter::All, "cat")
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(hits, ["Category review", "Other"]);
    }

    #[test]
    fn search_and_status_filter_combine_with_and() {
        let tasks = vec![
            task("Category review", "", false),
            task("Other", "feed the cat", true),
        ];

        let hits: Vec<_> = visible(&tasks, StatusFilter::Completed, "cat")
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(hits, ["Other"]);
    }

    #[test]
    fn output_preserves_collection_order() {
        let tasks = vec![
            task("c", "", false),
            task("a", "", false),
            task("b", "", false),
        ];

        let order: Vec<_> = visible(&tasks, StatusFilter::All, "")
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(order, ["c", "a", "b"]);
    }

    #[test]
    fn counts_ignore_filter_and_search_and_sum_up() {
        let tasks = vec![
            task("a", "", false),
            task("b", "", true),
            task("c", "", true),
        ];

        // Narrow the view as far as possible; totals are unaffected.
        assert!(visible(&tasks, StatusFilter::Pending, "zzz").is_empty());
        let totals = counts(&tasks);
        assert_eq!(totals.pending + totals.completed, totals.all);
        assert_eq!(totals, TaskCounts { all: 3, pending: 1, completed: 2 });
    }

    #[test]
    fn empty_collection_projects_empty() {
        let tasks: Vec<Task> = Vec::new();
        assert!(visible(&tasks, StatusFilter::All, "").is_empty());
        assert_eq!(counts(&tasks), TaskCounts { all: 0, pending: 0, completed: 0 });
    }
}
