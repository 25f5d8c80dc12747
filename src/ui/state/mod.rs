mod input;
mod logs;

use std::collections::VecDeque;

use super::{log_entry::LogEntry, mode::UIMode};
use crate::suggest::Suggestion;

#[derive(Debug)]
pub struct UIState {
    pub mode: UIMode,
    pub last_log_mode: Option<UIMode>,
    pub logs: VecDeque<LogEntry>,
    pub log_scroll_offset: usize,
    pub is_at_bottom_log: bool,
    pub terminal_size: (u16, u16),
    pub max_log_entries: usize,
    pub query_text: String,
    pub cursor_pos: usize,
    pub filtered: Vec<Suggestion>,
    /// `None` means no row is highlighted.
    pub highlight_index: Option<usize>,
    pub dropdown_visible: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub focused: bool,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            mode: UIMode::default(),
            last_log_mode: None,
            logs: VecDeque::with_capacity(10000),
            log_scroll_offset: 0,
            is_at_bottom_log: true,
            terminal_size: (80, 24),
            max_log_entries: 10000,
            query_text: String::new(),
            cursor_pos: 0,
            filtered: Vec::new(),
            highlight_index: None,
            dropdown_visible: false,
            loading: false,
            error: None,
            focused: true,
        }
    }

    /// The highlighted row, or `None` once the filtered set no longer reaches it.
    pub fn active_highlight(&self) -> Option<usize> {
        self.highlight_index.filter(|&index| index < self.filtered.len())
    }

    pub fn highlighted_suggestion(&self) -> Option<&Suggestion> {
        self.active_highlight().and_then(|index| self.filtered.get(index))
    }

    /// Whether there is anything to draw beneath the input.
    pub fn shows_dropdown(&self) -> bool {
        self.dropdown_visible && !self.filtered.is_empty()
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match &self.mode {
            UIMode::Input => match &self.last_log_mode {
                Some(UIMode::Logs { filter, level }) => UIMode::Logs {
                    filter: filter.clone(),
                    level: *level,
                },
                _ => UIMode::Logs {
                    filter: None,
                    level: tracing::Level::DEBUG,
                },
            },
            UIMode::Logs { .. } => {
                self.last_log_mode = Some(self.mode.clone());
                UIMode::Input
            }
        };

        self.log_scroll_offset = 0;
        self.is_at_bottom_log = true;
    }
}

impl Default for UIState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_highlight_is_treated_as_none() {
        let mut state = UIState::new();
        state.filtered = vec![Suggestion::new(1, "Alien")];
        state.highlight_index = Some(3);

        assert_eq!(state.active_highlight(), None);
        assert!(state.highlighted_suggestion().is_none());

        state.highlight_index = Some(0);
        assert_eq!(state.highlighted_suggestion().map(|s| s.id), Some(1));
    }

    #[test]
    fn toggling_remembers_log_settings() {
        let mut state = UIState::new();
        state.toggle_mode();
        state.mode = UIMode::Logs {
            filter: Some("source".to_string()),
            level: tracing::Level::WARN,
        };
        state.toggle_mode();
        assert!(matches!(state.mode, UIMode::Input));

        state.toggle_mode();
        match &state.mode {
            UIMode::Logs { filter, level } => {
                assert_eq!(filter.as_deref(), Some("source"));
                assert_eq!(*level, tracing::Level::WARN);
            }
            UIMode::Input => panic!("expected log mode"),
        }
    }
}
