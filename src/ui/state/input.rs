use super::UIState;

impl UIState {
    pub fn safe_insert_char(&mut self, c: char) {
        let byte_pos = self.byte_offset(self.cursor_pos);
        self.query_text.insert(byte_pos, c);
        self.cursor_pos += 1;
    }

    pub fn safe_remove_char_before(&mut self) -> bool {
        if self.cursor_pos == 0 {
            return false;
        }
        let byte_pos = self.byte_offset(self.cursor_pos - 1);
        if byte_pos < self.query_text.len() {
            self.query_text.remove(byte_pos);
            self.cursor_pos -= 1;
            return true;
        }
        false
    }

    pub fn safe_remove_char_at(&mut self) -> bool {
        let byte_pos = self.byte_offset(self.cursor_pos);
        if byte_pos < self.query_text.len() {
            self.query_text.remove(byte_pos);
            return true;
        }
        false
    }

    pub fn safe_cursor_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn safe_cursor_right(&mut self) {
        if self.cursor_pos < self.query_text.chars().count() {
            self.cursor_pos += 1;
        }
    }

    pub fn safe_cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn safe_cursor_end(&mut self) {
        self.cursor_pos = self.query_text.chars().count();
    }

    /// Converts a character position into a byte index into `query_text`.
    fn byte_offset(&self, char_pos: usize) -> usize {
        self.query_text
            .char_indices()
            .nth(char_pos)
            .map(|(idx, _)| idx)
            .unwrap_or(self.query_text.len())
    }
}
