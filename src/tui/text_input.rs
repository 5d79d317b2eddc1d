use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

/// Single-line text buffer with a grapheme-aware cursor (byte offset)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    /// A buffer holding `value` with the cursor at the end
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        TextInput { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn insert(&mut self, c: char) {
        // Single-line: newlines become spaces
        let c = if c == '\n' || c == '\r' { ' ' } else { c };
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        let clean = s.replace(['\n', '\r'], " ");
        self.value.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.value, self.cursor) {
            self.value.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.value, self.cursor) {
            self.value.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.value, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.value, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Text before and after the cursor, for rendering
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.value.split_at(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_backspace() {
        let mut input = TextInput::default();
        for c in "héllo".chars() {
            input.insert(c);
        }
        assert_eq!(input.value(), "héllo");
        input.backspace();
        input.backspace();
        assert_eq!(input.value(), "hél");
        input.backspace();
        assert_eq!(input.value(), "hé");
        assert_eq!(input.cursor(), "hé".len());
    }

    #[test]
    fn cursor_movement_and_mid_insert() {
        let mut input = TextInput::new("ac");
        input.move_left();
        input.insert('b');
        assert_eq!(input.value(), "abc");
        input.move_home();
        input.delete();
        assert_eq!(input.value(), "bc");
        input.move_end();
        input.move_right();
        assert_eq!(input.cursor(), 2);
        assert_eq!(input.split_at_cursor(), ("bc", ""));
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut input = TextInput::new("x");
        input.move_home();
        input.backspace();
        assert_eq!(input.value(), "x");
    }

    #[test]
    fn paste_flattens_newlines() {
        let mut input = TextInput::default();
        input.insert_str("one\ntwo");
        assert_eq!(input.value(), "one two");
        assert_eq!(input.cursor(), 7);
    }

    #[test]
    fn blank_detection() {
        assert!(TextInput::new("  \t").is_blank());
        assert!(!TextInput::new(" a ").is_blank());
    }
}
