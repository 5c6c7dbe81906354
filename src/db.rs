//! Persistence adapter and display helpers.
//!
//! Tasks are kept in a small key-value store of text values. The collection
//! lives under a single key as a JSON array and is rewritten wholesale after
//! every change. `FileStorage` maps each key to `<dir>/<key>.json`.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use tracing::{debug, warn};

use crate::error::Result;
use crate::fields::*;
use crate::task::Task;

/// Key holding the serialised task collection.
pub const TASKS_KEY: &str = "tasks";

/// Durable key-value storage for text values.
pub trait Storage {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    /// Replace the value stored under `key`.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Storage backed by one JSON file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(FileStorage {
            dir: dir.to_path_buf(),
        })
    }

    /// File that holds the value for `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        // Write to a sibling temp file and rename so readers never see half a document.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        f.write_all(value.as_bytes())?;
        f.flush()?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), bytes = value.len(), "wrote storage key");
        Ok(())
    }
}

/// Read the task collection from storage.
///
/// A missing key, a read failure or a document that is not a JSON array all
/// yield an empty collection. Inside an array, records that fail to decode
/// are skipped one by one and the rest are kept.
pub fn load_tasks<S: Storage>(storage: &S) -> Vec<Task> {
    let raw = match storage.get_item(TASKS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("error reading tasks, starting fresh: {e}");
            return Vec::new();
        }
    };
    let records: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            warn!("error parsing tasks, starting fresh: {e}");
            return Vec::new();
        }
    };
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(task) => Some(task),
            Err(e) => {
                warn!(index, "skipping unreadable task: {e}");
                None
            }
        })
        .collect()
}

/// Overwrite the stored collection with `tasks`.
pub fn save_tasks<S: Storage>(storage: &mut S, tasks: &[Task]) -> Result<()> {
    let data = serde_json::to_string_pretty(tasks)?;
    storage.set_item(TASKS_KEY, &data)
}

/// Parse human-friendly due date input relative to `today`.
///
/// Accepts `YYYY-MM-DD`, `today`, `tomorrow`, `yesterday`, `in 3d`, `in 2w`,
/// `in 1m`, weekday names (`fri`, `friday`, `this friday`, `next friday`),
/// `end of week` / `eow` and `end of month` / `eom`.
pub fn parse_due_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return today.succ_opt(),
        "yesterday" => return today.pred_opt(),
        "end of week" | "eow" => return Some(start_end_of_this_week(today).1),
        "end of month" | "eom" => {
            return today
                .with_day(1)?
                .checked_add_months(Months::new(1))?
                .pred_opt();
        }
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        let rest = rest.trim();
        let unit_at = rest.char_indices().last().map_or(0, |(i, _)| i);
        let (count, unit) = rest.split_at(unit_at);
        let n: u32 = count.trim().parse().ok()?;
        return match unit {
            "d" => today.checked_add_signed(Duration::days(n.into())),
            "w" => today.checked_add_signed(Duration::weeks(n.into())),
            "m" => today.checked_add_months(Months::new(n)),
            _ => None,
        };
    }

    let (skip_week, day) = match s.strip_prefix("next ") {
        Some(day) => (true, day),
        None => (false, s.strip_prefix("this ").unwrap_or(&s)),
    };
    if let Ok(weekday) = day.parse::<Weekday>() {
        let ahead = (weekday.num_days_from_monday() + 7 - today.weekday().num_days_from_monday()) % 7;
        let ahead = if skip_week { ahead + 7 } else { ahead };
        return today.checked_add_signed(Duration::days(ahead.into()));
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Start and end (Monday to Sunday) of the ISO week containing `today`.
pub fn start_end_of_this_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let weekday = today.weekday().num_days_from_monday() as i64;
    let start = today - Duration::days(weekday);
    (start, start + Duration::days(6))
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: Option<NaiveDate>, today: NaiveDate) -> String {
    match due {
        None => "-".into(),
        Some(d) => match (d - today).num_days() {
            0 => "today".into(),
            1 => "tomorrow".into(),
            n if n > 1 => format!("in {n}d"),
            n => format!("{}d late", -n),
        },
    }
}

/// Long form used by the reminder panel, e.g. "Monday, May 6, 2024".
pub fn format_long_date(d: NaiveDate) -> String {
    d.format("%A, %B %-d, %Y").to_string()
}

pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
    }
}

pub fn format_status(s: Status) -> &'static str {
    match s {
        Status::Pending => "Pending",
        Status::Completed => "Completed",
    }
}

/// Print tasks as a plain table on stdout.
pub fn print_table(tasks: &[&Task], today: NaiveDate) {
    println!(
        "{:<14} {:<10} {:<7} {:<10} {}",
        "ID", "Status", "Pri", "Due", "Title"
    );
    for t in tasks {
        println!(
            "{:<14} {:<10} {:<7} {:<10} {}",
            t.id,
            format_status(t.status),
            format_priority(t.priority),
            format_due_relative(t.due_date, today),
            truncate(&t.title, 60)
        );
    }
}

/// Truncate a string to at most `width` characters, ending in an ellipsis if cut.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}


#[cfg(test)]
mod tests {
    use super::memory::MemoryStorage;
    use super::*;
    use tempfile::TempDir;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn file_storage_missing_key_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert_eq!(storage.get_item(TASKS_KEY).unwrap(), None);
    }

    #[test]
    fn file_storage_overwrites_whole_value() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::open(&dir.path().join("nested")).unwrap();
        storage.set_item("tasks", "[1, 2, 3]").unwrap();
        storage.set_item("tasks", "[]").unwrap();

        assert_eq!(storage.get_item("tasks").unwrap().as_deref(), Some("[]"));
        assert!(storage.path_for("tasks").exists());
        assert!(!storage.path_for("tasks").with_extension("json.tmp").exists());
    }

    #[test]
    fn unreadable_records_are_skipped_individually() {
        let raw = r#"[
            {"id": "1", "title": "keep me", "description": "", "dueDate": "", "priority": "low", "status": "pending"},
            {"id": "2", "title": "bad priority", "description": "", "dueDate": "", "priority": "urgent", "status": "pending"},
            {"id": "3", "title": "bad status", "priority": "high", "status": "archived"},
            42,
            {"id": "4", "title": "null description", "description": null, "dueDate": null, "priority": "high", "status": "completed"}
        ]"#;
        let storage = MemoryStorage::with_item(TASKS_KEY, raw);
        let tasks = load_tasks(&storage);

        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "4"]);
        assert_eq!(tasks[1].description, "");
        assert_eq!(tasks[1].due_date, None);
    }

    #[test]
    fn corrupt_or_wrong_shape_loads_empty() {
        for raw in ["{not json", "null", "{\"id\": \"1\"}", "[{\"id\": \"1\", \"title\": \"x\", \"priority\": \"urgent\", \"status\": \"pending\"}]"] {
            let storage = MemoryStorage::with_item(TASKS_KEY, raw);
            assert!(load_tasks(&storage).is_empty(), "expected empty for {raw}");
        }
    }

    #[test]
    fn parse_due_keywords_and_offsets() {
        // 2024-05-01 is a Wednesday.
        let today = ymd(2024, 5, 1);
        assert_eq!(parse_due_input("today", today), Some(today));
        assert_eq!(parse_due_input(" Tomorrow ", today), Some(ymd(2024, 5, 2)));
        assert_eq!(parse_due_input("yesterday", today), Some(ymd(2024, 4, 30)));
        assert_eq!(parse_due_input("in 3d", today), Some(ymd(2024, 5, 4)));
        assert_eq!(parse_due_input("in 2w", today), Some(ymd(2024, 5, 15)));
        assert_eq!(parse_due_input("in 1m", today), Some(ymd(2024, 6, 1)));
        assert_eq!(parse_due_input("eow", today), Some(ymd(2024, 5, 5)));
        assert_eq!(parse_due_input("end of month", today), Some(ymd(2024, 5, 31)));
        assert_eq!(parse_due_input("2024-12-25", today), Some(ymd(2024, 12, 25)));
        assert_eq!(parse_due_input("in xd", today), None);
        assert_eq!(parse_due_input("soon", today), None);
    }

    #[test]
    fn parse_due_weekdays() {
        let today = ymd(2024, 5, 1);
        assert_eq!(parse_due_input("wednesday", today), Some(today));
        assert_eq!(parse_due_input("fri", today), Some(ymd(2024, 5, 3)));
        assert_eq!(parse_due_input("this friday", today), Some(ymd(2024, 5, 3)));
        assert_eq!(parse_due_input("next friday", today), Some(ymd(2024, 5, 10)));
        assert_eq!(parse_due_input("monday", today), Some(ymd(2024, 5, 6)));
    }

    #[test]
    fn relative_due_labels() {
        let today = ymd(2024, 5, 1);
        assert_eq!(format_due_relative(None, today), "-");
        assert_eq!(format_due_relative(Some(today), today), "today");
        assert_eq!(format_due_relative(Some(ymd(2024, 5, 2)), today), "tomorrow");
        assert_eq!(format_due_relative(Some(ymd(2024, 5, 6)), today), "in 5d");
        assert_eq!(format_due_relative(Some(ymd(2024, 4, 29)), today), "2d late");
    }

    #[test]
    fn long_date_format() {
        assert_eq!(format_long_date(ymd(2024, 5, 6)), "Monday, May 6, 2024");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ünïcödé text", 5), "ünïc…");
    }
}
