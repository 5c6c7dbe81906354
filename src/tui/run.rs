//! Terminal setup and teardown around the task UI.

use std::{io, path::Path};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::info;

use crate::{db::FileStorage, store::TaskStore, tui::app::App};

/// Initialise and run the terminal user interface over the tasks in `data_dir`.
pub fn run_tui(data_dir: &Path) -> io::Result<()> {
    let store = TaskStore::load(FileStorage::open(data_dir)?);
    info!(dir = %data_dir.display(), tasks = store.len(), "starting ui");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
