use std::fmt;

use crate::Edit;

/// A single line of text with a cursor. The cursor is a character index in
/// `0..=len`; it sits between characters, and at `len` it is after the last one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineInput {
    char_buf: Vec<char>,
    cursor: usize,
}

/// The line split around the cursor, for rendering.
#[derive(Debug, PartialEq, Eq)]
pub struct CharChunks<'a> {
    pub before: &'a [char],
    pub cursor: Option<char>,
    pub after: &'a [char],
}

impl LineInput {
    /// Creates an empty line.
    pub fn new() -> Self {
        LineInput::default()
    }

    /// Inserts `c` at the cursor, and moves the cursor after it.
    pub fn push(&mut self, c: char) {
        self.char_buf.insert(self.cursor, c);
        self.cursor += 1;
    }

    /// Inserts `s` at the cursor, and moves the cursor after it.
    pub fn extend(&mut self, s: &str) {
        let tail = self.char_buf.split_off(self.cursor);
        self.char_buf.extend(s.chars());
        self.cursor = self.char_buf.len();
        self.char_buf.extend(tail);
    }

    /// Removes the character before the cursor. Returns false if there was none.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.char_buf.remove(self.cursor);
        true
    }

    /// Removes the character under the cursor. Returns false if there was none.
    pub fn del(&mut self) -> bool {
        if self.cursor >= self.char_buf.len() {
            return false;
        }
        self.char_buf.remove(self.cursor);
        true
    }

    pub fn key_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn key_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_buf.len());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.char_buf.len();
    }

    /// Replaces the line with `s`, and moves the cursor to the end.
    pub fn set(&mut self, s: &str) {
        self.char_buf = s.chars().collect();
        self.cursor = self.char_buf.len();
    }

    pub fn clear(&mut self) {
        self.char_buf.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.char_buf.is_empty()
    }

    /// Number of characters in the line.
    pub fn len(&self) -> usize {
        self.char_buf.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Applies `edit`, returning true if the text (not just the cursor) changed.
    pub fn apply(&mut self, edit: &Edit) -> bool {
        match edit {
            Edit::Insert(c) => {
                self.push(*c);
                true
            }
            Edit::Paste(s) => {
                self.extend(s);
                !s.is_empty()
            }
            Edit::Backspace => self.backspace(),
            Edit::Delete => self.del(),
            Edit::Left => {
                self.key_left();
                false
            }
            Edit::Right => {
                self.key_right();
                false
            }
            Edit::Home => {
                self.home();
                false
            }
            Edit::End => {
                self.end();
                false
            }
        }
    }

    pub fn char_chunks(&self) -> CharChunks<'_> {
        let (before, rest) = self.char_buf.split_at(self.cursor);
        match rest.split_first() {
            Some((&c, after)) => CharChunks {
                before,
                cursor: Some(c),
                after,
            },
            None => CharChunks {
                before,
                cursor: None,
                after: rest,
            },
        }
    }
}

impl From<&str> for LineInput {
    fn from(s: &str) -> Self {
        let mut line = LineInput::new();
        line.set(s);
        line
    }
}

impl fmt::Display for LineInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char_buf.iter().collect::<String>())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_insert_at_cursor() {
        let mut line = LineInput::from("ac");
        line.key_left();
        line.push('b');
        assert_eq!(line.to_string(), "abc");
        assert_eq!(line.cursor(), 2);

        line.home();
        line.extend("__");
        assert_eq!(line.to_string(), "__abc");
        assert_eq!(line.cursor(), 2);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut line = LineInput::from("héllo");
        assert!(line.backspace());
        assert_eq!(line.to_string(), "héll");
        assert!(!line.del());

        line.home();
        assert!(!line.backspace());
        line.key_right();
        assert!(line.del());
        assert_eq!(line.to_string(), "hll");
        assert_eq!(line.cursor(), 1);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut line = LineInput::from("ab");
        line.key_right();
        line.key_right();
        assert_eq!(line.cursor(), 2);
        line.home();
        line.key_left();
        assert_eq!(line.cursor(), 0);
    }

    #[test]
    fn test_apply_reports_text_changes() {
        let mut line = LineInput::new();
        assert!(!line.apply(&Edit::Backspace));
        assert!(line.apply(&Edit::Insert('x')));
        assert!(!line.apply(&Edit::Left));
        assert!(!line.apply(&Edit::Paste(String::new())));
        assert!(line.apply(&Edit::Paste("yz".to_string())));
        assert_eq!(line.to_string(), "yzx");
        assert_eq!(line.cursor(), 2);
    }

    #[test]
    fn test_char_chunks() {
        let mut line = LineInput::from("abc");
        assert_eq!(
            line.char_chunks(),
            CharChunks {
                before: &['a', 'b', 'c'],
                cursor: None,
                after: &[],
            }
        );
        line.key_left();
        line.key_left();
        assert_eq!(
            line.char_chunks(),
            CharChunks {
                before: &['a'],
                cursor: Some('b'),
                after: &['c'],
            }
        );
    }
}
