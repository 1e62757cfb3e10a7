/// The in-progress command line and its cursor.
///
/// The cursor is tracked as an offset from the *end* of the text: `0` means
/// the cursor sits after the last character. The edit position (the index the
/// next insertion lands at) is `text.len() - offset_from_end`. The offset
/// never leaves `0..=text.len()`.
///
/// Only single-byte printable characters are stored, so byte indices and
/// character positions coincide.
#[derive(Debug, Default)]
pub struct LineBuffer {
    text: String,
    offset_from_end: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn offset_from_end(&self) -> usize {
        self.offset_from_end
    }

    /// Index the next inserted character lands at.
    pub fn edit_pos(&self) -> usize {
        self.text.len() - self.offset_from_end
    }

    /// Inserts at the edit position. The offset is unchanged, so the cursor
    /// stays fixed relative to the tail of the line.
    pub fn insert_char(&mut self, ch: char) {
        let pos = self.edit_pos();
        self.text.insert(pos, ch);
    }

    /// Removes the character left of the edit position. No-op at position 0.
    pub fn delete_before(&mut self) {
        let pos = self.edit_pos();
        if pos == 0 {
            return;
        }
        self.text.remove(pos - 1);
    }

    /// Removes the character at the edit position. No-op when the cursor is
    /// already at the end of the line.
    pub fn delete_after(&mut self) {
        if self.offset_from_end == 0 {
            return;
        }
        let pos = self.edit_pos();
        self.text.remove(pos);
        self.offset_from_end -= 1;
    }

    pub fn move_left(&mut self) {
        if self.offset_from_end < self.text.len() {
            self.offset_from_end += 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.offset_from_end > 0 {
            self.offset_from_end -= 1;
        }
    }

    /// Overwrites the whole line and puts the cursor at the end. Used by
    /// history recall and completion.
    pub fn replace(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.offset_from_end = 0;
    }
}
