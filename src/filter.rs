//! Priority/status filter and the derived visible list.

use crate::db::{format_priority, format_status};
use crate::fields::*;
use crate::task::Task;

/// Two independent equality predicates. `None` matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

impl TaskFilter {
    /// Build a filter from optional priority and status predicates.
    pub fn new(priority: Option<Priority>, status: Option<Status>) -> Self {
        TaskFilter { priority, status }
    }

    /// Whether `task` passes both predicates.
    pub fn matches(&self, task: &Task) -> bool {
        self.priority.map_or(true, |p| task.priority == p)
            && self.status.map_or(true, |s| task.status == s)
    }

    /// Tasks passing the filter, in collection order.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }

    /// Whether either predicate is set.
    pub fn is_active(&self) -> bool {
        self.priority.is_some() || self.status.is_some()
    }

    /// Reset both predicates to "all".
    pub fn clear(&mut self) {
        *self = TaskFilter::default();
    }

    /// all → low → medium → high → all
    pub fn cycle_priority(&mut self) {
        self.priority = match self.priority {
            None => Some(Priority::Low),
            Some(Priority::High) => None,
            Some(p) => Some(p.next()),
        };
    }

    /// all → pending → completed → all
    pub fn cycle_status(&mut self) {
        self.status = match self.status {
            None => Some(Status::Pending),
            Some(Status::Pending) => Some(Status::Completed),
            Some(Status::Completed) => None,
        };
    }

    /// Short label for the filter bar, e.g. "Priority: High  Status: All".
    pub fn describe(&self) -> String {
        format!(
            "Priority: {}  Status: {}",
            self.priority.map_or("All", format_priority),
            self.status.map_or("All", format_status)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, priority: Priority, status: Status) -> Task {
        Task {
            id: id.into(),
            title: format!("task {id}"),
            description: String::new(),
            due_date: None,
            priority,
            status,
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task("1", Priority::High, Status::Pending),
            task("2", Priority::High, Status::Completed),
            task("3", Priority::Low, Status::Pending),
            task("4", Priority::High, Status::Pending),
            task("5", Priority::Medium, Status::Completed),
        ]
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn unset_filter_returns_everything_in_order() {
        let tasks = sample();
        let visible = TaskFilter::default().apply(&tasks);
        assert_eq!(ids(&visible), ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn both_predicates_must_hold() {
        let tasks = sample();
        let filter = TaskFilter::new(Some(Priority::High), Some(Status::Pending));
        assert_eq!(ids(&filter.apply(&tasks)), ["1", "4"]);
        for t in &tasks {
            let expected = t.priority == Priority::High && t.status == Status::Pending;
            assert_eq!(filter.matches(t), expected);
        }
    }

    #[test]
    fn single_predicates() {
        let tasks = sample();
        assert_eq!(
            ids(&TaskFilter::new(None, Some(Status::Completed)).apply(&tasks)),
            ["2", "5"]
        );
        assert_eq!(
            ids(&TaskFilter::new(Some(Priority::Low), None).apply(&tasks)),
            ["3"]
        );
    }

    #[test]
    fn filtering_leaves_the_collection_untouched() {
        let tasks = sample();
        let before = tasks.clone();
        let _ = TaskFilter::new(Some(Priority::Medium), Some(Status::Pending)).apply(&tasks);
        assert_eq!(tasks, before);
    }

    #[test]
    fn cycling_visits_every_value_then_clears() {
        let mut filter = TaskFilter::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            filter.cycle_priority();
            seen.push(filter.priority);
        }
        assert_eq!(
            seen,
            [Some(Priority::Low), Some(Priority::Medium), Some(Priority::High), None]
        );

        filter.cycle_status();
        filter.cycle_status();
        assert_eq!(filter.status, Some(Status::Completed));
        filter.cycle_status();
        assert_eq!(filter.status, None);
    }

    #[test]
    fn describe_and_clear() {
        let mut filter = TaskFilter::new(Some(Priority::High), None);
        assert!(filter.is_active());
        assert_eq!(filter.describe(), "Priority: High  Status: All");
        filter.clear();
        assert!(!filter.is_active());
    }
}
