//! Command implementations for the CLI interface.
//!
//! Each handler loads the task store from the data directory, performs one
//! operation and prints the result. Failures go to stderr with exit status 1.

use std::path::Path;

use chrono::Local;
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::db::*;
use crate::fields::*;
use crate::filter::TaskFilter;
use crate::reminder::next_reminder;
use crate::store::TaskStore;
use crate::task::Draft;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI interface.
    Ui,

    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Optional longer description.
        #[arg(long)]
        desc: Option<String>,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", "in Nd", "friday", ...
        #[arg(long)]
        due: Option<String>,
        /// Priority: low | medium | high.
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
    },

    /// List tasks with optional filters.
    List {
        /// Filter by priority.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Filter by status.
        #[arg(long, value_enum)]
        status: Option<Status>,
    },

    /// Flip a task between pending and completed.
    Toggle {
        /// Task ID
        id: String,
    },

    /// Delete a task by ID.
    Delete {
        /// Task ID
        id: String,
    },

    /// Show the pending task with the nearest upcoming due date.
    Next,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn open_store(data_dir: &Path) -> TaskStore<FileStorage> {
    match FileStorage::open(data_dir) {
        Ok(storage) => TaskStore::load(storage),
        Err(e) => {
            eprintln!("Failed to open data directory {}: {e}", data_dir.display());
            std::process::exit(1);
        }
    }
}

pub fn cmd_ui(data_dir: &Path) {
    if let Err(e) = run_tui(data_dir) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Add a new task.
pub fn cmd_add(
    data_dir: &Path,
    title: String,
    desc: Option<String>,
    due: Option<String>,
    priority: Priority,
) {
    let today = Local::now().date_naive();
    let due_date = match due.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => None,
        Some(s) => match parse_due_input(s, today) {
            Some(d) => Some(d),
            None => {
                eprintln!("Invalid due date: {s} (try YYYY-MM-DD, today, tomorrow, in 3d)");
                std::process::exit(1);
            }
        },
    };

    let mut store = open_store(data_dir);
    let draft = Draft {
        title,
        description: desc.unwrap_or_default().trim().to_string(),
        due_date,
        priority,
    };
    match store.add(draft) {
        Ok(Some(id)) => println!("Added task {id}"),
        Ok(None) => println!("Title is empty; nothing added."),
        Err(e) => {
            eprintln!("Failed to save tasks: {e}");
            std::process::exit(1);
        }
    }
}

/// List tasks, newest first, narrowed by the optional filters.
pub fn cmd_list(data_dir: &Path, priority: Option<Priority>, status: Option<Status>) {
    let store = open_store(data_dir);
    let filter = TaskFilter::new(priority, status);
    let rows = filter.apply(store.tasks());
    if rows.is_empty() {
        if filter.is_active() {
            println!("No tasks match ({}).", filter.describe());
        } else {
            println!("No tasks.");
        }
        return;
    }
    print_table(&rows, Local::now().date_naive());
}

pub fn cmd_toggle(data_dir: &Path, id: String) {
    let mut store = open_store(data_dir);
    match store.toggle_status(&id) {
        Ok(true) => {
            let status = store.get(&id).map_or("", |t| format_status(t.status));
            println!("Task {id} is now {status}");
        }
        Ok(false) => println!("No task with id {id}."),
        Err(e) => {
            eprintln!("Failed to save tasks: {e}");
            std::process::exit(1);
        }
    }
}

pub fn cmd_delete(data_dir: &Path, id: String) {
    let mut store = open_store(data_dir);
    match store.delete(&id) {
        Ok(true) => println!("Deleted {id}"),
        Ok(false) => println!("No task with id {id}."),
        Err(e) => {
            eprintln!("Failed to save tasks: {e}");
            std::process::exit(1);
        }
    }
}

/// Print the next reminder, as shown on the Reminders view.
pub fn cmd_next(data_dir: &Path) {
    let store = open_store(data_dir);
    let now = Local::now().naive_local();
    let Some(task) = next_reminder(store.tasks(), now) else {
        println!("No upcoming tasks!");
        return;
    };
    println!("Next Task: {}", task.title);
    if !task.description.is_empty() {
        println!("  {}", task.description);
    }
    if let Some(due) = task.due_date {
        println!(
            "  Due: {} ({})",
            format_long_date(due),
            format_due_relative(Some(due), now.date())
        );
    }
    println!("  {} priority", format_priority(task.priority));
    println!("  id {}", task.id);
}

pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
