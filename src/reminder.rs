//! Picks the task to surface in the reminders view.

use chrono::{NaiveDateTime, NaiveTime};

use crate::fields::Status;
use crate::task::Task;

/// The pending task with the earliest due date that has not yet passed.
///
/// A due date counts from the start of that day, so a task due today only
/// qualifies at exactly midnight. Tasks without a due date never qualify.
/// Equal dates resolve to the first task in collection order.
pub fn next_reminder(tasks: &[Task], now: NaiveDateTime) -> Option<&Task> {
    tasks
        .iter()
        .filter(|t| t.status == Status::Pending)
        .filter_map(|t| t.due_date.map(|d| (d.and_time(NaiveTime::MIN), t)))
        .filter(|(due, _)| *due >= now)
        .min_by_key(|(due, _)| *due)
        .map(|(_, t)| t)
}
