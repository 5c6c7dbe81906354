//! Single-line text input used by the add-task form.

use unicode_width::UnicodeWidthStr;

/// A text input field with a character-indexed cursor.
#[derive(Clone, Debug, Default)]
pub struct InputField {
    pub value: String,
    /// Cursor position in characters, `0..=value.chars().count()`.
    pub cursor: usize,
}

impl InputField {
    /// Create an empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a field holding `value` with the cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Delete the character under the cursor.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Move the cursor one character left.
    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor one character right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Move the cursor to the start of the text.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end of the text.
    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Terminal columns taken by the text before the cursor.
    pub fn cursor_offset(&self) -> usize {
        self.value[..self.byte_index(self.cursor)].width()
    }

    /// Horizontal scroll and cursor column for a view `width` cells wide.
    ///
    /// The text scrolls just far enough to keep the cursor inside the view.
    pub fn viewport(&self, width: u16) -> (u16, u16) {
        let width = usize::from(width.max(1));
        let offset = self.cursor_offset();
        let scroll = offset.saturating_sub(width - 1);
        let to_cells = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
        (to_cells(scroll), to_cells(offset - scroll))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_in_the_middle() {
        let mut field = InputField::with_value("helo");
        field.move_cursor_left();
        field.handle_char('l');
        assert_eq!(field.value, "hello");
        assert_eq!(field.cursor, 4);

        field.move_home();
        field.handle_delete();
        field.move_end();
        field.handle_backspace();
        assert_eq!(field.value, "ell");
    }

    #[test]
    fn multibyte_characters() {
        let mut field = InputField::new();
        for c in "café ☕".chars() {
            field.handle_char(c);
        }
        assert_eq!(field.cursor, 6);
        field.move_cursor_left();
        field.move_cursor_left();
        field.handle_backspace();
        assert_eq!(field.value, "caf ☕");
        field.move_cursor_right();
        field.move_cursor_right();
        field.move_cursor_right();
        assert_eq!(field.cursor, 5);
    }

    #[test]
    fn viewport_counts_display_width() {
        let field = InputField::with_value("ab");
        assert_eq!(field.viewport(10), (0, 2));

        let field = InputField::with_value("日本");
        assert_eq!(field.cursor_offset(), 4);
        assert_eq!(field.viewport(10), (0, 4));
    }

    #[test]
    fn viewport_scrolls_long_text() {
        let mut field = InputField::with_value(&"x".repeat(30));
        assert_eq!(field.viewport(10), (21, 9));

        field.move_home();
        assert_eq!(field.viewport(10), (0, 0));

        // A zero-width view still yields a usable column.
        field.move_end();
        assert_eq!(field.viewport(0), (30, 0));
    }

    #[test]
    fn edges_are_no_ops() {
        let mut field = InputField::new();
        field.handle_backspace();
        field.handle_delete();
        field.move_cursor_left();
        assert_eq!(field.cursor, 0);
        assert!(field.value.is_empty());

        field = InputField::with_value("x");
        field.move_cursor_right();
        field.handle_delete();
        assert_eq!((field.value.as_str(), field.cursor), ("x", 1));
    }
}
