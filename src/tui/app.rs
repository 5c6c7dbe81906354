//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the task store and the
//! view state (navigation, filters, add-task form), handles key input and
//! renders the Tasks and Reminders views.

use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame, Terminal,
};
use tracing::{debug, warn};

use crate::{
    db::{format_due_relative, format_long_date, format_priority, Storage},
    filter::TaskFilter,
    reminder::next_reminder,
    store::TaskStore,
    task::Task,
    tui::{
        colors::{priority_color, ACCENT, DARK_RED},
        enums::{AppState, View},
        task_form::{Submit, TaskForm, DESCRIPTION_FIELD, DUE_FIELD, PRIORITY_FIELD, TITLE_FIELD},
        utils::centered_rect,
    },
};

/// Main application state for the terminal user interface.
pub struct App<S: Storage> {
    state: AppState,
    view: View,
    store: TaskStore<S>,
    filter: TaskFilter,
    task_list_state: TableState,
    /// Ids of the tasks currently visible in the Tasks view.
    filtered_tasks: Vec<String>,
    task_form: TaskForm,
    confirm_target: Option<String>,
    status_message: String,
}

impl<S: Storage> App<S> {
    pub fn new(store: TaskStore<S>) -> Self {
        let mut app = App {
            state: AppState::TaskList,
            view: View::default(),
            store,
            filter: TaskFilter::default(),
            task_list_state: TableState::default(),
            filtered_tasks: Vec::new(),
            task_form: TaskForm::new(),
            confirm_target: None,
            status_message: String::new(),
        };
        app.update_filtered_tasks();
        app
    }

    /// Recompute the visible list, keeping the selection on the same task when it survives.
    fn update_filtered_tasks(&mut self) {
        let old_selected_id = self.selected_task_id().map(str::to_owned);

        self.filtered_tasks = self
            .filter
            .apply(self.store.tasks())
            .into_iter()
            .map(|t| t.id.clone())
            .collect();

        let restored = old_selected_id
            .and_then(|old| self.filtered_tasks.iter().position(|id| *id == old));
        let fallback = self
            .task_list_state
            .selected()
            .map(|idx| idx.min(self.filtered_tasks.len().saturating_sub(1)))
            .unwrap_or(0);
        self.task_list_state.select(if self.filtered_tasks.is_empty() {
            None
        } else {
            Some(restored.unwrap_or(fallback))
        });
    }

    fn selected_task_id(&self) -> Option<&str> {
        self.task_list_state
            .selected()
            .and_then(|idx| self.filtered_tasks.get(idx))
            .map(String::as_str)
    }

    fn selected_task(&self) -> Option<&Task> {
        self.selected_task_id().and_then(|id| self.store.get(id))
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn select_next(&mut self) {
        if self.filtered_tasks.is_empty() {
            return;
        }
        let next = match self.task_list_state.selected() {
            Some(i) if i + 1 < self.filtered_tasks.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.task_list_state.select(Some(next));
    }

    fn select_prev(&mut self) {
        if self.filtered_tasks.is_empty() {
            return;
        }
        let prev = self.task_list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.task_list_state.select(Some(prev));
    }

    fn switch_view(&mut self, view: View) {
        self.view = view;
        self.set_status_message(format!("{} view", view.title()));
    }

    fn open_form(&mut self) {
        self.task_form.open();
        self.state = AppState::AddTask;
    }

    fn toggle_selected_task(&mut self) {
        let Some(id) = self.selected_task_id().map(str::to_owned) else {
            return;
        };
        if let Err(e) = self.store.toggle_status(&id) {
            self.set_status_message(format!("Error saving tasks: {e}"));
        }
        self.update_filtered_tasks();
    }

    fn delete_confirmed_task(&mut self) {
        let Some(id) = self.confirm_target.take() else {
            return;
        };
        match self.store.delete(&id) {
            Ok(true) => self.set_status_message("Task deleted"),
            Ok(false) => {}
            Err(e) => self.set_status_message(format!("Error saving tasks: {e}")),
        }
        self.update_filtered_tasks();
    }

    /// Handle keys shared by both top-level views. Returns true to quit.
    fn handle_main_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('q') => return true,
            KeyCode::Esc => {
                if self.view == View::Tasks && self.filter.is_active() {
                    self.filter.clear();
                    self.update_filtered_tasks();
                    self.set_status_message("Filters cleared");
                } else {
                    return true;
                }
            }
            KeyCode::Tab | KeyCode::BackTab => self.switch_view(self.view.toggled()),
            KeyCode::Char('1') => self.switch_view(View::Tasks),
            KeyCode::Char('2') => self.switch_view(View::Reminders),
            KeyCode::Char('a') => self.open_form(),
            KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::F(1) => self.state = AppState::Help,
            _ if self.view == View::Tasks => self.handle_task_list_input(key),
            _ => {}
        }
        false
    }

    /// Keys that only apply to the task list.
    fn handle_task_list_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Home | KeyCode::Char('g') => {
                if !self.filtered_tasks.is_empty() {
                    self.task_list_state.select(Some(0));
                }
            }
            KeyCode::End | KeyCode::Char('G') => {
                if !self.filtered_tasks.is_empty() {
                    self.task_list_state.select(Some(self.filtered_tasks.len() - 1));
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('c') => self.toggle_selected_task(),
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(task) = self.selected_task() {
                    self.confirm_target = Some(task.id.clone());
                    self.state = AppState::Confirm;
                }
            }
            KeyCode::Char('p') => {
                self.filter.cycle_priority();
                self.update_filtered_tasks();
            }
            KeyCode::Char('s') => {
                self.filter.cycle_status();
                self.update_filtered_tasks();
            }
            KeyCode::Char('x') => {
                self.filter.clear();
                self.update_filtered_tasks();
            }
            _ => {}
        }
    }

    fn handle_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.task_form.cancel();
                self.state = AppState::TaskList;
            }
            KeyCode::Tab | KeyCode::Down => self.task_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.task_form.prev_field(),
            KeyCode::Left => self.task_form.handle_left_right(false),
            KeyCode::Right => self.task_form.handle_left_right(true),
            KeyCode::Backspace => self.task_form.handle_backspace(),
            KeyCode::Delete => self.task_form.handle_delete(),
            KeyCode::Home => self.task_form.handle_home(),
            KeyCode::End => self.task_form.handle_end(),
            KeyCode::Enter => {
                let today = Local::now().date_naive();
                match self.task_form.submit(&mut self.store, today) {
                    Ok(Submit::Created(id)) => {
                        self.state = AppState::TaskList;
                        self.update_filtered_tasks();
                        if let Some(idx) = self.filtered_tasks.iter().position(|t| *t == id) {
                            self.task_list_state.select(Some(idx));
                        }
                        self.set_status_message("Task created");
                    }
                    Ok(Submit::Ignored) => {}
                    Ok(Submit::InvalidDue) => {
                        self.set_status_message("Unrecognised due date (try YYYY-MM-DD, tomorrow, in 3d)")
                    }
                    Err(e) => {
                        // The task exists in memory even though it was not saved.
                        warn!(error = %e, "task added but not saved");
                        self.task_form.cancel();
                        self.state = AppState::TaskList;
                        self.update_filtered_tasks();
                        self.set_status_message(format!("Error saving tasks: {e}"));
                    }
                }
            }
            KeyCode::Char(c) => self.task_form.handle_char(c),
            _ => {}
        }
    }

    fn handle_confirm_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.delete_confirmed_task();
                self.state = AppState::TaskList;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_target = None;
                self.state = AppState::TaskList;
            }
            _ => {}
        }
    }

    /// Dispatch one key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        self.status_message.clear();
        match self.state {
            AppState::TaskList => return self.handle_main_input(key, modifiers),
            AppState::AddTask => self.handle_form_input(key),
            AppState::Confirm => self.handle_confirm_input(key),
            AppState::Help => self.state = AppState::TaskList,
        }
        false
    }

    /// Poll for one key event. Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key.code, key.modifiers));
                }
            }
        }
        Ok(false)
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let tabs = Tabs::new(View::ALL.iter().map(|v| format!(" {} ", v.title())))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(
                        " TASK MANAGER ",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
            )
            .select(self.view.index())
            .highlight_style(Style::default().bg(ACCENT).fg(Color::White).add_modifier(Modifier::BOLD));
        f.render_widget(tabs, area);
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let today = Local::now().date_naive();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let filter_style = if self.filter.is_active() {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC)
        } else {
            Style::default().fg(Color::Gray)
        };
        let filter_bar = Paragraph::new(Line::from(vec![
            Span::styled(" Filter  ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(self.filter.describe(), filter_style),
            Span::raw("   [p] priority  [s] status  [x] clear"),
        ]));
        f.render_widget(filter_bar, chunks[0]);

        let header = Row::new(["", "Priority", "Due", "Title", "Description"].map(|h| {
            Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))
        }))
        .style(Style::default().bg(ACCENT).fg(Color::White))
        .height(1);

        let rows: Vec<Row> = self
            .filtered_tasks
            .iter()
            .filter_map(|id| self.store.get(id))
            .map(|task| {
                let (marker, style) = if task.is_completed() {
                    (
                        "[x]",
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT),
                    )
                } else {
                    ("[ ]", Style::default().fg(Color::White))
                };
                Row::new(vec![
                    Cell::from(marker),
                    Cell::from(format_priority(task.priority))
                        .style(Style::default().fg(priority_color(task.priority))),
                    Cell::from(format_due_relative(task.due_date, today)),
                    Cell::from(task.title.as_str()),
                    Cell::from(task.description.as_str()),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(3),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Min(20),
            Constraint::Min(10),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Tasks ({}/{}) - Press 'h' for help",
                self.filtered_tasks.len(),
                self.store.len()
            )))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, chunks[1], &mut self.task_list_state);
    }

    fn render_reminders(&self, f: &mut Frame, area: Rect) {
        let now = Local::now().naive_local();
        let block = Block::default().borders(Borders::ALL).title("Next Task");

        let text = match next_reminder(self.store.tasks(), now) {
            Some(task) => {
                let due = task.due_date.map_or_else(String::new, |d| {
                    format!("{} ({})", format_long_date(d), format_due_relative(Some(d), now.date()))
                });
                let mut lines = vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        task.title.as_str(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                ];
                if !task.description.is_empty() {
                    lines.push(Line::from(Span::styled(
                        task.description.as_str(),
                        Style::default().fg(Color::Gray),
                    )));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled("Due: ", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(due),
                ]));
                lines.push(Line::from(Span::styled(
                    format!(" {} priority ", format_priority(task.priority)),
                    Style::default().bg(priority_color(task.priority)).fg(Color::Black),
                )));
                lines
            }
            None => vec![
                Line::from(""),
                Line::from(Span::styled("No upcoming tasks!", Style::default().fg(Color::Gray))),
            ],
        };

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Render the add-task form as a modal over the current view.
    fn render_task_form(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(60, 70, area);
        f.render_widget(Clear, area);

        let outer = Block::default()
            .borders(Borders::ALL)
            .title("Add New Task")
            .border_style(Style::default().fg(ACCENT));
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Description
                Constraint::Length(3), // Due
                Constraint::Length(3), // Priority
                Constraint::Min(1),    // Instructions
            ])
            .split(inner);

        let field_style = |idx: usize| {
            if self.task_form.current_field == idx {
                Style::default().fg(ACCENT)
            } else {
                Style::default()
            }
        };

        let inputs = [
            (TITLE_FIELD, "Title *", &self.task_form.title),
            (DESCRIPTION_FIELD, "Description", &self.task_form.description),
            (DUE_FIELD, "Due (YYYY-MM-DD, today, tomorrow, in Nd)", &self.task_form.due),
        ];
        for (idx, title, field) in inputs {
            let (scroll, _) = field.viewport(chunks[idx].width.saturating_sub(2));
            let input = Paragraph::new(field.value.as_str()).scroll((0, scroll)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(field_style(idx)),
            );
            f.render_widget(input, chunks[idx]);
        }

        let priority = self.task_form.priority;
        let selector = Paragraph::new(Line::from(vec![
            Span::raw("< "),
            Span::styled(format_priority(priority), Style::default().fg(priority_color(priority))),
            Span::raw(" >"),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Priority")
                .border_style(field_style(PRIORITY_FIELD)),
        );
        f.render_widget(selector, chunks[PRIORITY_FIELD]);

        let instructions = Paragraph::new("Tab/Up/Down move  Left/Right change priority  Enter add  Esc cancel")
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        f.render_widget(instructions, chunks[4]);

        if let Some(field) = self.task_form.cursor_field() {
            let chunk = chunks[self.task_form.current_field];
            let (_, column) = field.viewport(chunk.width.saturating_sub(2));
            f.set_cursor_position((
                chunk.x.saturating_add(1).saturating_add(column),
                chunk.y.saturating_add(1),
            ));
        }
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let heading = |s: &'static str| {
            Line::from(Span::styled(s, Style::default().add_modifier(Modifier::BOLD)))
        };
        let help_text = vec![
            heading("Task Manager Help"),
            Line::from(""),
            heading("Anywhere:"),
            Line::from("  Tab / 1 / 2  Switch between Tasks and Reminders"),
            Line::from("  a            Add new task"),
            Line::from("  h/?/F1       Show this help"),
            Line::from("  q/Ctrl+C     Quit"),
            Line::from(""),
            heading("Tasks view:"),
            Line::from("  Up/k Down/j  Move selection"),
            Line::from("  Space/Enter  Toggle pending / completed"),
            Line::from("  d/Delete     Delete selected task"),
            Line::from("  p            Cycle priority filter"),
            Line::from("  s            Cycle status filter"),
            Line::from("  x / Esc      Clear filters"),
            Line::from(""),
            heading("Add task form:"),
            Line::from("  Tab/Up/Down  Move between fields"),
            Line::from("  Left/Right   Change priority"),
            Line::from("  Enter        Add task"),
            Line::from("  Esc          Cancel and discard"),
            Line::from(""),
            heading("Due date formats:"),
            Line::from("  YYYY-MM-DD, today, tomorrow, in 3d, in 2w, friday, next friday, eow, eom"),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help - Press any key to return"),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(50, 30, area);
        f.render_widget(Clear, area);

        let title = self
            .confirm_target
            .as_deref()
            .and_then(|id| self.store.get(id))
            .map_or("", |t| t.title.as_str());
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Delete this task?",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(title),
            Line::from(""),
            Line::from("This action cannot be undone."),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];

        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .title("Confirm Action")
                    .borders(Borders::ALL)
                    .style(Style::default().bg(DARK_RED)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::TaskList => match self.view {
                    View::Tasks => format!(
                        "Tasks: {} shown, {} total | Press 'h' for help",
                        self.filtered_tasks.len(),
                        self.store.len()
                    ),
                    View::Reminders => "Reminders | Tab to return to tasks".to_string(),
                },
                AppState::AddTask => "Add New Task".to_string(),
                AppState::Help => "Help".to_string(),
                AppState::Confirm => "Confirm Action".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(ACCENT).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        self.render_header(f, chunks[0]);

        if self.state == AppState::Help {
            self.render_help(f, chunks[1]);
        } else {
            match self.view {
                View::Tasks => self.render_task_list(f, chunks[1]),
                View::Reminders => self.render_reminders(f, chunks[1]),
            }
            match self.state {
                AppState::AddTask => self.render_task_form(f, chunks[1]),
                AppState::Confirm => self.render_confirm(f, chunks[1]),
                _ => {}
            }
        }

        self.render_status_bar(f, chunks[2]);
    }

    /// Main event loop: draw, then handle at most one key, until the user quits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        debug!(tasks = self.store.len(), "leaving ui");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStorage;
    use crate::fields::{Priority, Status};
    use crate::task::Draft;
    use ratatui::backend::TestBackend;

    fn app_with(titles: &[(&str, Priority)]) -> (MemoryStorage, App<MemoryStorage>) {
        let storage = MemoryStorage::default();
        let mut store = TaskStore::load(storage.clone());
        for (title, priority) in titles {
            store
                .add(Draft {
                    priority: *priority,
                    ..Draft::new(*title)
                })
                .unwrap();
        }
        (storage, App::new(store))
    }

    fn press(app: &mut App<MemoryStorage>, key: KeyCode) -> bool {
        app.handle_key(key, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App<MemoryStorage>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen(app: &mut App<MemoryStorage>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn add_task_through_the_form() {
        let (storage, mut app) = app_with(&[]);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.state, AppState::AddTask);
        assert!(app.task_form.is_open());

        type_text(&mut app, "Renew passport");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "photo booth first");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state, AppState::TaskList);
        assert!(!app.task_form.is_open());
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.tasks()[0].title, "Renew passport");
        assert_eq!(app.store.tasks()[0].priority, Priority::Medium);
        assert_eq!(app.filtered_tasks.len(), 1);
        assert_eq!(storage.writes(), 1);
    }

    #[test]
    fn blank_title_submission_is_silent() {
        let (_, mut app) = app_with(&[]);
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "  ");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state, AppState::AddTask);
        assert_eq!(app.task_form.title.value, "  ");
        assert!(app.status_message.is_empty());
        assert!(app.store.is_empty());
    }

    #[test]
    fn escape_discards_the_draft() {
        let (_, mut app) = app_with(&[]);
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "half typed");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.state, AppState::TaskList);
        assert!(app.store.is_empty());
        press(&mut app, KeyCode::Char('a'));
        assert!(app.task_form.title.value.is_empty());
    }

    #[test]
    fn space_toggles_the_selected_task() {
        let (_, mut app) = app_with(&[("older", Priority::Low), ("newer", Priority::High)]);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));

        assert_eq!(app.store.tasks()[0].status, Status::Pending);
        assert_eq!(app.store.tasks()[1].status, Status::Completed);
        assert_eq!(app.selected_task().unwrap().title, "older");
    }

    #[test]
    fn delete_requires_confirmation() {
        let (_, mut app) = app_with(&[("keep", Priority::Low), ("drop", Priority::Low)]);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.state, AppState::Confirm);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.store.len(), 2);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.state, AppState::TaskList);
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.tasks()[0].title, "keep");
        assert_eq!(app.selected_task().unwrap().title, "keep");
    }

    #[test]
    fn filters_narrow_the_list_without_touching_the_store() {
        let (storage, mut app) = app_with(&[
            ("a", Priority::Low),
            ("b", Priority::High),
            ("c", Priority::High),
        ]);
        // all -> low -> medium -> high
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.filter.priority, Some(Priority::High));
        assert_eq!(app.filtered_tasks.len(), 2);

        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.filter.status, Some(Status::Completed));
        assert!(app.filtered_tasks.is_empty());
        assert_eq!(app.selected_task_id(), None);

        assert!(!press(&mut app, KeyCode::Esc));
        assert!(!app.filter.is_active());
        assert_eq!(app.filtered_tasks.len(), 3);
        assert_eq!(app.store.len(), 3);
        assert_eq!(storage.writes(), 3);
    }

    #[test]
    fn navigation_switches_views_only() {
        let (_, mut app) = app_with(&[("a", Priority::Low)]);
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, View::Reminders);
        assert_eq!(app.filter.priority, Some(Priority::Low));

        // list keys do nothing on the reminders view
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.store.tasks()[0].status, Status::Pending);

        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.view, View::Tasks);
    }

    #[test]
    fn quit_keys() {
        let (_, mut app) = app_with(&[]);
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(press(&mut app, KeyCode::Esc));
        assert!(app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
    }

    #[test]
    fn renders_task_rows_and_tabs() {
        let (_, mut app) = app_with(&[("Water the ferns", Priority::High)]);
        let text = screen(&mut app);
        assert!(text.contains("TASK MANAGER"));
        assert!(text.contains("Reminders"));
        assert!(text.contains("Water the ferns"));
        assert!(text.contains("High"));
        assert!(text.contains("Tasks (1/1)"));
    }

    #[test]
    fn reminders_view_shows_empty_state() {
        let (_, mut app) = app_with(&[("no due date", Priority::Low)]);
        press(&mut app, KeyCode::Char('2'));
        let text = screen(&mut app);
        assert!(text.contains("No upcoming tasks!"));
    }

    #[test]
    fn reminders_view_shows_next_task() {
        let (_, mut app) = app_with(&[]);
        let tomorrow = Local::now().date_naive() + chrono::Duration::days(1);
        app.store
            .add(Draft {
                due_date: Some(tomorrow),
                ..Draft::new("Dentist")
            })
            .unwrap();
        press(&mut app, KeyCode::Char('2'));
        let text = screen(&mut app);
        assert!(text.contains("Dentist"));
        assert!(text.contains("tomorrow"));
        assert!(text.contains("Medium priority"));
    }

    #[test]
    fn form_renders_as_modal() {
        let (_, mut app) = app_with(&[]);
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Draft title");
        let text = screen(&mut app);
        assert!(text.contains("Add New Task"));
        assert!(text.contains("Draft title"));
        assert!(text.contains("< Medium >"));
    }

    #[test]
    fn long_form_input_scrolls_and_keeps_cursor_in_the_modal() {
        let (_, mut app) = app_with(&[]);
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, &"x".repeat(150));
        type_text(&mut app, "END");

        let mut terminal = Terminal::new(TestBackend::new(110, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("END"));

        // The modal spans roughly columns 22..88 of a 110-wide screen.
        let cursor = terminal.backend_mut().get_cursor_position().unwrap();
        assert!(cursor.x > 22 && cursor.x < 88, "cursor at {cursor:?}");
    }
}
