//! Enumerations and field types for tasks.
//!
//! Both enums serialise as lowercase strings (`"high"`, `"pending"`), which is
//! also how they appear on the command line.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How important a task is.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// The next priority in ascending order, wrapping from high to low.
    pub fn next(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }

    /// The previous priority in ascending order, wrapping from low to high.
    pub fn prev(self) -> Self {
        match self {
            Priority::Low => Priority::High,
            Priority::Medium => Priority::Low,
            Priority::High => Priority::Medium,
        }
    }
}

/// Task completion status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Pending,
    Completed,
}

impl Status {
    /// Flip between pending and completed.
    pub fn toggled(self) -> Self {
        match self {
            Status::Pending => Status::Completed,
            Status::Completed => Status::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_cycles_both_ways() {
        for p in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(p.next().prev(), p);
        }
        assert_eq!(Priority::High.next(), Priority::Low);
        assert_eq!(Priority::Low.prev(), Priority::High);
    }

    #[test]
    fn status_toggle_is_an_involution() {
        for s in [Status::Pending, Status::Completed] {
            assert_ne!(s.toggled(), s);
            assert_eq!(s.toggled().toggled(), s);
        }
    }

    #[test]
    fn enums_serialise_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&Status::Completed).unwrap(), "\"completed\"");
        assert!(serde_json::from_str::<Priority>("\"urgent\"").is_err());
    }
}
