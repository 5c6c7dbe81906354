//! Task data structure and the draft used to create one.
//!
//! A `Task` is persisted as a flat JSON object whose fields are all strings:
//! `id`, `title`, `description`, `dueDate`, `priority` and `status`. An unset
//! due date is stored as the empty string.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::fields::*;

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, with = "due_date")]
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub status: Status,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// Unsaved input for a task about to be created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

impl Draft {
    pub fn new(title: impl Into<String>) -> Self {
        Draft {
            title: title.into(),
            ..Draft::default()
        }
    }
}

/// `dueDate` codec: `YYYY-MM-DD`, or `""` when unset.
///
/// Reading is lenient. A full timestamp keeps its date part and anything
/// else unreadable becomes an unset date rather than failing the whole
/// document.
mod due_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(due: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match due {
            Some(d) => s.serialize_str(&d.format(FORMAT).to_string()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?.unwrap_or_default();
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, FORMAT) {
            return Ok(Some(date));
        }
        let parsed = raw
            .get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, FORMAT).ok());
        if parsed.is_none() {
            tracing::warn!(value = raw, "ignoring unreadable due date");
        }
        Ok(parsed)
    }
}
