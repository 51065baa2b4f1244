//! Minimal editable text field for forms.
//!
//! Single-line fields turn newlines into spaces; multi-line fields keep them.
//! The cursor is a char index into the value.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
    multiline: bool,
}

impl TextField {
    pub fn single_line() -> Self {
        Self::default()
    }

    pub fn multi_line() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Replaces the value and moves the cursor to the end.
    pub fn set(&mut self, text: &str) {
        self.value.clear();
        self.cursor = 0;
        self.insert_str(text);
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Value split at the cursor.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.value.split_at(char_to_byte_index(&self.value, self.cursor))
    }

    pub fn insert_str(&mut self, text: &str) {
        let text = if self.multiline {
            text.replace("\r\n", "\n")
        } else {
            text.replace("\r\n", " ").replace('\n', " ")
        };
        let byte_idx = char_to_byte_index(&self.value, self.cursor);
        self.value.insert_str(byte_idx, &text);
        self.cursor += text.chars().count();
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    pub fn delete_prev_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = char_to_byte_index(&self.value, self.cursor - 1);
        let end = char_to_byte_index(&self.value, self.cursor);
        self.value.replace_range(start..end, "");
        self.cursor -= 1;
    }

    pub fn delete_next_char(&mut self) {
        if self.cursor >= self.char_len() {
            return;
        }
        let start = char_to_byte_index(&self.value, self.cursor);
        let end = char_to_byte_index(&self.value, self.cursor + 1);
        self.value.replace_range(start..end, "");
    }

    pub fn move_back(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_forward(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    /// Start of the current line.
    pub fn move_head(&mut self) {
        let (before, _) = self.split_at_cursor();
        self.cursor = before
            .rfind('\n')
            .map_or(0, |idx| before[..=idx].chars().count());
    }

    /// End of the current line.
    pub fn move_end(&mut self) {
        let (before, after) = self.split_at_cursor();
        let before_len = before.chars().count();
        self.cursor = match after.find('\n') {
            Some(idx) => before_len + after[..idx].chars().count(),
            None => before_len + after.chars().count(),
        };
    }

    /// Applies an editing key. Returns false when the key is not an edit.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char(c) if !ctrl && !alt => self.insert_char(c),
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Enter if self.multiline => self.insert_char('\n'),
            KeyCode::Backspace => self.delete_prev_char(),
            KeyCode::Delete => self.delete_next_char(),
            KeyCode::Left => self.move_back(),
            KeyCode::Right => self.move_forward(),
            KeyCode::Home => self.move_head(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }
}

fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(idx, _)| idx)
}
