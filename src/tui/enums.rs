//! Enumerations for TUI state management.

/// Which screen handles key input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppState {
    TaskList,
    AddTask,
    Help,
    Confirm,
}

/// Top-level view selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Tasks,
    Reminders,
}

impl View {
    pub const ALL: [View; 2] = [View::Tasks, View::Reminders];

    pub fn toggled(self) -> Self {
        match self {
            View::Tasks => View::Reminders,
            View::Reminders => View::Tasks,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Tasks => "Tasks",
            View::Reminders => "Reminders",
        }
    }

    pub fn index(self) -> usize {
        match self {
            View::Tasks => 0,
            View::Reminders => 1,
        }
    }
}
