//! Query editing state.
//!
//! A small line editor for the search text: a string plus a cursor that is
//! always kept on a char boundary. The controller owns one of these and the
//! TUI input widget renders from it.

use std::ops::Deref;

use unicode_width::UnicodeWidthStr;

/// The search text and its edit cursor
#[derive(Debug, Default, Clone)]
pub struct QueryInput {
    value: String,
    /// Byte offset into `value`, always on a char boundary
    cursor: usize,
}

impl QueryInput {
    /// Creates an input holding `value`, cursor at the end
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    /// Replaces the whole value and moves the cursor to the end
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    /// Inserts a character at the cursor
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Deletes the character before the cursor, returning it
    pub fn delete_backward(&mut self) -> Option<char> {
        let prev = self.value[..self.cursor].chars().next_back()?;
        self.cursor -= prev.len_utf8();
        self.value.remove(self.cursor);
        Some(prev)
    }

    /// Deletes the character under the cursor, returning it
    pub fn delete_forward(&mut self) -> Option<char> {
        if self.cursor >= self.value.len() {
            return None;
        }
        Some(self.value.remove(self.cursor))
    }

    /// Deletes everything before the cursor, returning the deleted prefix
    pub fn delete_to_beginning(&mut self) -> String {
        let deleted = self.value[..self.cursor].to_string();
        self.value = self.value[self.cursor..].to_string();
        self.cursor = 0;
        deleted
    }

    /// Moves the cursor one character left
    pub fn move_left(&mut self) {
        if let Some(prev) = self.value[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    /// Moves the cursor one character right
    pub fn move_right(&mut self) {
        if let Some(next) = self.value[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    /// Moves the cursor to the start of the value
    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to the end of the value
    pub fn move_to_end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Byte offset of the cursor within the value
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display width of the text before the cursor
    pub fn prefix_width(&self) -> usize {
        self.value[..self.cursor].width()
    }
}

impl Deref for QueryInput {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_delete_multibyte() {
        let mut input = QueryInput::default();
        input.insert('é');
        input.insert('x');
        assert_eq!(&*input, "éx");
        assert_eq!(input.delete_backward(), Some('x'));
        assert_eq!(input.delete_backward(), Some('é'));
        assert_eq!(input.delete_backward(), None);
        assert_eq!(&*input, "");
    }

    #[test]
    fn cursor_moves_stay_on_char_boundaries() {
        let mut input = QueryInput::new("aéb");
        input.move_left();
        input.move_left();
        input.insert('x');
        assert_eq!(&*input, "axéb");
        input.move_right();
        input.move_right();
        assert_eq!(input.delete_forward(), None);
        input.move_left();
        assert_eq!(input.delete_forward(), Some('b'));
    }

    #[test]
    fn delete_to_beginning_clears_prefix() {
        let mut input = QueryInput::new("hello world");
        for _ in 0..6 {
            input.move_left();
        }
        assert_eq!(input.delete_to_beginning(), "hello");
        assert_eq!(&*input, " world");
    }

    #[test]
    fn delete_forward_at_cursor() {
        let mut input = QueryInput::new("ab");
        input.move_to_start();
        assert_eq!(input.delete_forward(), Some('a'));
        assert_eq!(&*input, "b");
    }
}
