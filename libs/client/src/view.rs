//! In-memory view state
//!
//! Holds the full task list plus a live search term, and derives the
//! filtered view and the per-day creation counts from them. Mutations
//! reconcile from the server's returned object rather than trusting the
//! local edit.

use chrono::NaiveDate;
use common::models::Task;
use uuid::Uuid;

/// Tasks created on one calendar day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Client-side task list with filtering and analytics
#[derive(Debug, Default)]
pub struct ViewState {
    tasks: Vec<Task>,
    search: String,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list, e.g. after the initial fetch
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Update the live search term
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Tasks whose title contains the search term, case-insensitively.
    /// An empty term matches everything.
    pub fn filtered(&self) -> Vec<&Task> {
        let needle = self.search.to_lowercase();
        self.tasks
            .iter()
            .filter(|t| t.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Creation counts bucketed by calendar day, ascending
    pub fn daily_counts(&self) -> Vec<DayCount> {
        let mut counts: Vec<DayCount> = Vec::new();
        for task in &self.tasks {
            let date = task.created_at.date_naive();
            match counts.iter_mut().find(|c| c.date == date) {
                Some(entry) => entry.count += 1,
                None => counts.push(DayCount { date, count: 1 }),
            }
        }
        counts.sort_by_key(|c| c.date);
        counts
    }

    /// Reconcile a created or updated task from the server's response.
    /// Replaces the entry with the same id, or appends; never duplicates.
    pub fn upsert(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => self.tasks.push(task),
        }
    }

    /// Reconcile a deletion
    pub fn remove(&mut self, id: Uuid) {
        self.tasks.retain(|t| t.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn task(title: &str, day: u32) -> Task {
        Task {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: title.to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 8, day, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let mut view = ViewState::new();
        view.set_tasks(vec![
            task("Buy milk", 1),
            task("Write REPORT", 1),
            task("walk dog", 2),
        ]);

        view.set_search("report");
        let titles: Vec<&str> = view.filtered().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Write REPORT"]);

        view.set_search("");
        assert_eq!(view.filtered().len(), 3);

        view.set_search("zzz");
        assert!(view.filtered().is_empty());
    }

    #[test]
    fn test_filter_tracks_list_changes() {
        let mut view = ViewState::new();
        view.set_search("milk");
        assert!(view.filtered().is_empty());

        view.upsert(task("Buy milk", 1));
        assert_eq!(view.filtered().len(), 1);
    }

    #[test]
    fn test_daily_counts_bucket_and_sort() {
        let mut view = ViewState::new();
        view.set_tasks(vec![task("a", 3), task("b", 1), task("c", 3), task("d", 2)]);

        let counts = view.daily_counts();
        let dates: Vec<(u32, usize)> = counts
            .iter()
            .map(|c| (c.date.format("%d").to_string().parse().unwrap(), c.count))
            .collect();
        assert_eq!(dates, vec![(1, 1), (2, 1), (3, 2)]);
    }

    #[test]
    fn test_upsert_replaces_without_duplicating() {
        let mut view = ViewState::new();
        let mut t = task("Write report", 1);
        view.upsert(t.clone());

        t.title = "Write final report".to_string();
        view.upsert(t.clone());

        assert_eq!(view.tasks().len(), 1);
        assert_eq!(view.tasks()[0].title, "Write final report");
    }

    #[test]
    fn test_remove_by_id() {
        let mut view = ViewState::new();
        let t = task("a", 1);
        let keep = task("b", 1);
        view.set_tasks(vec![t.clone(), keep.clone()]);

        view.remove(t.id);
        assert_eq!(view.tasks(), &[keep]);
    }
}
