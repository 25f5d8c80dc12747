use anyhow::Result;
use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{stdout, Write};
use unicode_width::UnicodeWidthStr;

use crate::ui::UIMode;

use super::TerminalUI;

impl TerminalUI {
    pub(super) fn render(&mut self) -> Result<()> {
        let mut stdout = stdout();

        queue!(stdout, cursor::Hide, Clear(ClearType::All), cursor::MoveTo(0, 0))?;

        let (width, height) = self.state.terminal_size;
        self.render_status_line(&mut stdout, width)?;

        match &self.state.mode {
            UIMode::Input => {
                self.autocomplete.render(&mut stdout, &self.state, width)?;
            }
            UIMode::Logs { .. } => {
                self.log_mode.render(
                    &mut stdout,
                    &self.state,
                    (0, 1, width, height.saturating_sub(2)),
                )?;
            }
        }

        self.render_help_line(&mut stdout, height)?;

        if matches!(self.state.mode, UIMode::Input) && self.state.focused {
            self.autocomplete
                .place_cursor(&mut stdout, &self.state, width)?;
        }

        stdout.flush()?;
        Ok(())
    }

    fn render_status_line(&self, stdout: &mut impl Write, width: u16) -> Result<()> {
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetBackgroundColor(Color::DarkGrey),
            SetForegroundColor(Color::White)
        )?;

        let status_text = match &self.state.mode {
            UIMode::Input => {
                let selected = self
                    .state
                    .highlighted_suggestion()
                    .map(|s| format!(" | Selected: {}", s.name))
                    .unwrap_or_default();
                format!(
                    " Suggestions: {}{} | F9: Logs | Ctrl+C: Exit",
                    self.state.filtered.len(),
                    selected
                )
            }
            UIMode::Logs { filter, level } => {
                let filter_text = filter
                    .as_ref()
                    .map(|f| format!(" | Filter: {}", f))
                    .unwrap_or_default();
                format!(
                    " Logs | Level: {}{} | Entries: {} | F9: Input",
                    level,
                    filter_text,
                    self.state.logs.len()
                )
            }
        };

        let display_text: String = status_text.chars().take(width as usize).collect();
        let padding = (width as usize).saturating_sub(UnicodeWidthStr::width(display_text.as_str()));

        queue!(
            stdout,
            Print(&display_text),
            Print(" ".repeat(padding)),
            ResetColor
        )?;
        Ok(())
    }

    fn render_help_line(&self, stdout: &mut impl Write, height: u16) -> Result<()> {
        if height < 3 {
            return Ok(());
        }

        let help_text = match &self.state.mode {
            UIMode::Input => " ↑↓: highlight | Enter: select | Esc: close | Ctrl+U: clear",
            UIMode::Logs { .. } if self.log_mode.is_editing_filter() => {
                " Type filter (-module excludes) | Enter/Esc: done"
            }
            UIMode::Logs { .. } => " ↑↓/PgUp/PgDn: scroll | +/-: level | /: filter | Esc: latest",
        };

        queue!(
            stdout,
            cursor::MoveTo(0, height - 1),
            SetForegroundColor(Color::DarkGrey),
            Print(help_text),
            ResetColor
        )?;
        Ok(())
    }
}
