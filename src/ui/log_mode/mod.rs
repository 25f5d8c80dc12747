//! This module defines the log view shown in place of the input.
mod input;
mod render;

/// Tracks whether keystrokes currently edit the log filter.
#[derive(Debug, Default)]
pub struct LogMode {
    editing_filter: bool,
}

impl LogMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing_filter(&self) -> bool {
        self.editing_filter
    }
}
