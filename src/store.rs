//! The task store: the single owner of the task collection.
//!
//! All changes go through [`TaskStore::add`], [`TaskStore::toggle_status`] and
//! [`TaskStore::delete`]. Each change that actually modifies the collection
//! is followed by a full rewrite of the stored collection; reads and no-op
//! calls never touch storage.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::db::{load_tasks, save_tasks, Storage};
use crate::error::Result;
use crate::fields::Status;
use crate::task::{Draft, Task};

/// In-memory task collection, newest first, persisted through `S`.
pub struct TaskStore<S: Storage> {
    tasks: Vec<Task>,
    storage: S,
    last_id: i64,
}

impl<S: Storage> TaskStore<S> {
    /// Load the collection from `storage`.
    ///
    /// Records with a blank title or a repeated id are dropped so the loaded
    /// collection satisfies the same invariants as one built by `add`.
    pub fn load(storage: S) -> Self {
        let loaded = load_tasks(&storage);
        let total = loaded.len();
        let mut seen = HashSet::new();
        let tasks: Vec<Task> = loaded
            .into_iter()
            .filter(|t| !t.title.trim().is_empty() && seen.insert(t.id.clone()))
            .collect();
        if tasks.len() != total {
            warn!(dropped = total - tasks.len(), "ignored invalid stored tasks");
        }
        let last_id = tasks
            .iter()
            .filter_map(|t| t.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        info!(count = tasks.len(), "loaded tasks");
        TaskStore {
            tasks,
            storage,
            last_id,
        }
    }

    /// Current collection, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by id.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Number of tasks in the collection.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the collection holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Create a pending task from `draft` and put it first.
    ///
    /// Returns `Ok(None)` without changing anything when the title is blank.
    /// On a storage error the task is still in memory.
    pub fn add(&mut self, draft: Draft) -> Result<Option<String>> {
        let title = draft.title.trim();
        if title.is_empty() {
            debug!("ignoring task with blank title");
            return Ok(None);
        }
        let id = self.next_id();
        let task = Task {
            id: id.clone(),
            title: title.to_string(),
            description: draft.description,
            due_date: draft.due_date,
            priority: draft.priority,
            status: Status::Pending,
        };
        self.tasks.insert(0, task);
        info!(%id, "added task");
        self.save()?;
        Ok(Some(id))
    }

    /// Flip a task between pending and completed. Returns whether a task matched.
    pub fn toggle_status(&mut self, id: &str) -> Result<bool> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(id, "toggle for unknown task");
            return Ok(false);
        };
        task.status = task.status.toggled();
        info!(id, status = ?task.status, "toggled task");
        self.save()?;
        Ok(true)
    }

    /// Remove a task permanently. Returns whether a task matched.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            debug!(id, "delete for unknown task");
            return Ok(false);
        };
        self.tasks.remove(idx);
        info!(id, "deleted task");
        self.save()?;
        Ok(true)
    }

    fn save(&mut self) -> Result<()> {
        save_tasks(&mut self.storage, &self.tasks).inspect_err(|e| {
            warn!("failed to save tasks: {e}");
        })
    }

    /// Millisecond timestamp, bumped past anything already issued or stored.
    ///
    /// Once the numeric range is used up, ids become `<now>-<n>` instead.
    fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        let mut candidate = self.last_id.checked_add(1).map(|next| next.max(now));
        while let Some(id) = candidate {
            if self.get(&id.to_string()).is_none() {
                self.last_id = id;
                return id.to_string();
            }
            candidate = id.checked_add(1);
        }
        debug!(last_id = self.last_id, "numeric ids exhausted");
        (1u64..)
            .map(|n| format!("{now}-{n}"))
            .find(|id| self.get(id).is_none())
            .unwrap_or_default()
    }
}
