//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Priority;

pub const EMERALD: Color = Color::Rgb(16, 185, 129);
pub const AMBER: Color = Color::Rgb(234, 179, 8);
pub const CRIMSON: Color = Color::Rgb(239, 68, 68);
/// Active tab, header and status bar.
pub const ACCENT: Color = Color::Rgb(59, 130, 246);
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);

pub fn priority_color(p: Priority) -> Color {
    match p {
        Priority::Low => EMERALD,
        Priority::Medium => AMBER,
        Priority::High => CRIMSON,
    }
}
