//! This module contains the rendering logic for the log view.
use anyhow::Result;
use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::Write;
use tracing::Level;

use super::LogMode;
use crate::ui::UIState;

impl LogMode {
    /// Renders the visible slice of filtered log entries into `area`.
    ///
    /// # Arguments
    ///
    /// * `stdout` - A mutable reference to the output stream.
    /// * `state` - The current UI state, containing log entries and scroll offsets.
    /// * `area` - The (x, y, width, height) coordinates of the rendering area.
    ///
    /// # Errors
    ///
    /// This function returns an error if writing to the output stream fails.
    pub fn render(
        &self,
        stdout: &mut impl Write,
        state: &UIState,
        area: (u16, u16, u16, u16),
    ) -> Result<()> {
        let (x, y, width, height) = area;

        let filtered_logs = state.filtered_logs();
        let total_logs = filtered_logs.len();
        let visible_lines = height as usize;

        let start_idx = if state.log_scroll_offset >= total_logs {
            0
        } else {
            total_logs.saturating_sub(visible_lines + state.log_scroll_offset)
        };
        let end_idx = (start_idx + visible_lines).min(total_logs);

        for (line_idx, log_entry) in filtered_logs[start_idx..end_idx].iter().enumerate() {
            let level_color = match log_entry.level {
                Level::ERROR => Color::Red,
                Level::WARN => Color::Yellow,
                Level::INFO => Color::Blue,
                Level::DEBUG => Color::White,
                Level::TRACE => Color::DarkGrey,
            };

            let line = log_entry.display_line();
            let display_line = if line.chars().count() > width as usize {
                let truncated: String = line
                    .chars()
                    .take((width as usize).saturating_sub(3))
                    .collect();
                format!("{}...", truncated)
            } else {
                line
            };

            queue!(
                stdout,
                cursor::MoveTo(x, y + line_idx as u16),
                SetForegroundColor(level_color),
                Print(display_line),
                ResetColor
            )?;
        }

        if state.log_scroll_offset > 0 {
            queue!(
                stdout,
                cursor::MoveTo(x + width.saturating_sub(15), y),
                SetForegroundColor(Color::Yellow),
                Print(format!("↑ +{} more logs", state.log_scroll_offset)),
                ResetColor
            )?;
        }

        Ok(())
    }
}
