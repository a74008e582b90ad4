#![forbid(unsafe_code)]

//! The editable text field that sits after the pills.
//!
//! Single-line, grapheme-cluster aware editing state: a value and a cursor,
//! with character and word-level operations. The control intercepts the keys
//! that drive pill interactions (Enter, Backspace on an empty field, Left at
//! the start) before delegating here; everything else is ordinary editing.
//!
//! Rendering is the host's job; [`cursor_col`](TextField::cursor_col) and
//! [`value_width`](TextField::value_width) report display columns so a host
//! can place its caret.

use pillbox_core::{KeyCode, KeyEvent};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Single-line editable text state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    /// Text value.
    value: String,
    /// Cursor position (grapheme index).
    cursor: usize,
}

/// Word-movement character class: whitespace, alphanumeric, or punctuation.
fn char_class(grapheme: &str) -> u8 {
    if grapheme.chars().all(char::is_whitespace) {
        0
    } else if grapheme.chars().any(char::is_alphanumeric) {
        1
    } else {
        2
    }
}

impl TextField {
    /// A new empty field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial value (builder). Cursor lands at the end.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    // --- Value access ---

    /// The current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The current value with surrounding whitespace trimmed.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    /// Replace the value, moving the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.grapheme_count();
    }

    /// Clear all text.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Whether the field holds no text at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    // --- Cursor ---

    /// Cursor position as a grapheme index.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the caret sits at offset 0.
    #[must_use]
    pub fn caret_at_start(&self) -> bool {
        self.cursor == 0
    }

    /// Display column of the caret, in terminal-style cells.
    #[must_use]
    pub fn cursor_col(&self) -> usize {
        self.value
            .graphemes(true)
            .take(self.cursor)
            .map(UnicodeWidthStr::width)
            .sum()
    }

    /// Display width of the whole value, in terminal-style cells.
    #[must_use]
    pub fn value_width(&self) -> usize {
        UnicodeWidthStr::width(self.value.as_str())
    }

    // --- Event handling ---

    /// Apply one key event as ordinary text editing.
    ///
    /// Returns `true` if the value or cursor changed. Keys the field does
    /// not understand are ignored.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.ctrl() => {
                self.insert_char(c);
                true
            }
            KeyCode::Backspace => {
                if key.ctrl() {
                    self.delete_word_back()
                } else {
                    self.delete_char_back()
                }
            }
            KeyCode::Delete => {
                if key.ctrl() {
                    self.delete_word_forward()
                } else {
                    self.delete_char_forward()
                }
            }
            KeyCode::Left => {
                if key.ctrl() {
                    self.move_word_left()
                } else {
                    self.move_left()
                }
            }
            KeyCode::Right => {
                if key.ctrl() {
                    self.move_word_right()
                } else {
                    self.move_right()
                }
            }
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.grapheme_count()),
            _ => false,
        }
    }

    // --- Editing operations ---

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        let byte_offset = self.grapheme_byte_offset(self.cursor);
        self.value.insert(byte_offset, c);
        self.cursor += 1;
    }

    /// Delete the grapheme before the cursor. Returns `true` if one existed.
    pub fn delete_char_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.grapheme_byte_offset(self.cursor - 1);
        let end = self.grapheme_byte_offset(self.cursor);
        self.value.drain(start..end);
        self.cursor -= 1;
        true
    }

    /// Delete the grapheme after the cursor. Returns `true` if one existed.
    pub fn delete_char_forward(&mut self) -> bool {
        if self.cursor >= self.grapheme_count() {
            return false;
        }
        let start = self.grapheme_byte_offset(self.cursor);
        let end = self.grapheme_byte_offset(self.cursor + 1);
        self.value.drain(start..end);
        true
    }

    fn delete_word_back(&mut self) -> bool {
        let target = self.word_boundary_left();
        if target == self.cursor {
            return false;
        }
        let start = self.grapheme_byte_offset(target);
        let end = self.grapheme_byte_offset(self.cursor);
        self.value.drain(start..end);
        self.cursor = target;
        true
    }

    fn delete_word_forward(&mut self) -> bool {
        let target = self.word_boundary_right();
        if target == self.cursor {
            return false;
        }
        let start = self.grapheme_byte_offset(self.cursor);
        let end = self.grapheme_byte_offset(target);
        self.value.drain(start..end);
        true
    }

    // --- Cursor movement ---

    fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    fn move_right(&mut self) -> bool {
        if self.cursor >= self.grapheme_count() {
            return false;
        }
        self.cursor += 1;
        true
    }

    fn move_word_left(&mut self) -> bool {
        self.move_to(self.word_boundary_left())
    }

    fn move_word_right(&mut self) -> bool {
        self.move_to(self.word_boundary_right())
    }

    fn move_to(&mut self, target: usize) -> bool {
        if target == self.cursor {
            return false;
        }
        self.cursor = target;
        true
    }

    /// Grapheme index of the start of the run of same-class characters
    /// before the cursor.
    fn word_boundary_left(&self) -> usize {
        let graphemes: Vec<&str> = self.value.graphemes(true).collect();
        let mut pos = self.cursor;
        if pos == 0 {
            return 0;
        }
        let target_class = char_class(graphemes[pos - 1]);
        while pos > 0 && char_class(graphemes[pos - 1]) == target_class {
            pos -= 1;
        }
        pos
    }

    /// Grapheme index of the end of the run of same-class characters at the
    /// cursor.
    fn word_boundary_right(&self) -> usize {
        let graphemes: Vec<&str> = self.value.graphemes(true).collect();
        let max = graphemes.len();
        let mut pos = self.cursor;
        if pos >= max {
            return max;
        }
        let target_class = char_class(graphemes[pos]);
        while pos < max && char_class(graphemes[pos]) == target_class {
            pos += 1;
        }
        pos
    }

    // --- Internal helpers ---

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn grapheme_byte_offset(&self, grapheme_idx: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_idx)
            .map(|(offset, _)| offset)
            .unwrap_or(self.value.len())
    }
}
