//! # tm - Personal Task Tracker
//!
//! A small task manager with an interactive terminal user interface (TUI)
//! and a scriptable CLI over the same local task list.
//!
//! ## Key Features
//!
//! - **Tasks**: title, description, optional due date, priority (low/medium/high)
//!   and a pending/completed status
//! - **Filters**: narrow the list by priority and status independently
//! - **Reminders**: the pending task with the nearest upcoming due date
//! - **Local File Storage**: one JSON array in `<data-dir>/tasks.json`, rewritten
//!   atomically after every change
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI
//! tm
//!
//! # Add a task via CLI
//! tm add "Renew passport" --due "next friday" --priority high
//!
//! # List pending high-priority tasks
//! tm list --priority high --status pending
//!
//! # What is next?
//! tm next
//! ```
//!
//! Data lives in `~/.tm/` unless `--data-dir` or `TM_DATA_DIR` says otherwise.
//! Set `TM_LOG=debug` for verbose logs (stderr for commands, `tm.log` for the UI).

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod db;
pub mod error;
pub mod fields;
pub mod filter;
pub mod logging;
pub mod reminder;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use cli::Cli;
use cmd::*;

fn main() {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.clone().unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".tm")
    });
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        eprintln!("Failed to create data directory {}: {}", data_dir.display(), e);
        std::process::exit(1);
    }

    let command = cli.command.unwrap_or(Commands::Ui);
    match &command {
        Commands::Ui => logging::init(Some(&data_dir.join("tm.log"))),
        _ => logging::init(None),
    }

    match command {
        Commands::Ui => cmd_ui(&data_dir),
        Commands::Add { title, desc, due, priority } => cmd_add(&data_dir, title, desc, due, priority),
        Commands::List { priority, status } => cmd_list(&data_dir, priority, status),
        Commands::Toggle { id } => cmd_toggle(&data_dir, id),
        Commands::Delete { id } => cmd_delete(&data_dir, id),
        Commands::Next => cmd_next(&data_dir),
        Commands::Completions { shell } => cmd_completions(shell),
    }
}
