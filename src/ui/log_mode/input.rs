use crossterm::event::{KeyCode, KeyEvent};
use tracing::Level;

use super::LogMode;
use crate::ui::{UIMode, UIState};

impl LogMode {
    /// Handles a key event in log mode.
    ///
    /// Arrows and page keys scroll, `+`/`-` change the most verbose level
    /// shown, `/` starts editing the text filter and Esc jumps to the newest
    /// entries (or finishes editing the filter).
    pub fn handle_key(&mut self, state: &mut UIState, key: KeyEvent) {
        if self.editing_filter {
            self.edit_filter(state, key);
            return;
        }

        let height = state.terminal_size.1 as usize;
        match key.code {
            KeyCode::Up => {
                state.log_scroll_offset = state.log_scroll_offset.saturating_add(1);
                state.update_log_scroll_state(height);
            }
            KeyCode::Down => {
                state.log_scroll_offset = state.log_scroll_offset.saturating_sub(1);
                state.update_log_scroll_state(height);
            }
            KeyCode::PageUp => {
                state.log_scroll_offset = state.log_scroll_offset.saturating_add(10);
                state.update_log_scroll_state(height);
            }
            KeyCode::PageDown => {
                state.log_scroll_offset = state.log_scroll_offset.saturating_sub(10);
                state.update_log_scroll_state(height);
            }
            KeyCode::Esc => state.jump_to_bottom_log(),
            KeyCode::Char('+') => shift_level(state, true),
            KeyCode::Char('-') => shift_level(state, false),
            KeyCode::Char('/') => {
                self.editing_filter = true;
                if let UIMode::Logs { filter, .. } = &mut state.mode {
                    filter.get_or_insert_with(String::new);
                }
            }
            _ => {}
        }
    }

    fn edit_filter(&mut self, state: &mut UIState, key: KeyEvent) {
        let UIMode::Logs { filter, .. } = &mut state.mode else {
            self.editing_filter = false;
            return;
        };
        let text = filter.get_or_insert_with(String::new);

        match key.code {
            KeyCode::Char(c) => text.push(c),
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Enter | KeyCode::Esc => {
                self.editing_filter = false;
                if text.is_empty() {
                    *filter = None;
                }
            }
            _ => {}
        }
        state.jump_to_bottom_log();
    }
}

/// Moves the display level one step more (`true`) or less verbose.
fn shift_level(state: &mut UIState, more_verbose: bool) {
    if let UIMode::Logs { level, .. } = &mut state.mode {
        let levels = [
            Level::ERROR,
            Level::WARN,
            Level::INFO,
            Level::DEBUG,
            Level::TRACE,
        ];
        let current = levels.iter().position(|l| l == level).unwrap_or(3);
        let next = if more_verbose {
            (current + 1).min(levels.len() - 1)
        } else {
            current.saturating_sub(1)
        };
        *level = levels[next];
    }
    state.jump_to_bottom_log();
}
