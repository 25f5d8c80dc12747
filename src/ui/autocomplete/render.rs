//! This module draws the input line, its status line and the dropdown.
use anyhow::Result;
use crossterm::{
    cursor, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::io::Write;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::view::{visible_range, ListboxView};
use super::AutocompleteMode;
use crate::ui::UIState;

pub const INPUT_ROW: u16 = 1;
pub const MESSAGE_ROW: u16 = 2;
pub const DROPDOWN_TOP_ROW: u16 = 3;
const PROMPT: &str = "search> ";

/// Rows available to the dropdown, leaving the bottom line for help text.
pub fn dropdown_capacity(height: u16) -> usize {
    height.saturating_sub(DROPDOWN_TOP_ROW + 1) as usize
}

impl AutocompleteMode {
    /// Renders the input, the loading/error line and the dropdown.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output stream fails.
    pub fn render(&self, stdout: &mut impl Write, state: &UIState, width: u16) -> Result<()> {
        self.render_input(stdout, state, width)?;
        self.render_message(stdout, state, width)?;
        self.render_dropdown(stdout, state, width)?;
        Ok(())
    }

    /// Places the terminal cursor at the caret inside the input.
    pub fn place_cursor(&self, stdout: &mut impl Write, state: &UIState, width: u16) -> Result<()> {
        let input_width: usize = state
            .query_text
            .chars()
            .take(state.cursor_pos)
            .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
            .sum();
        let cursor_x = UnicodeWidthStr::width(PROMPT) + input_width;
        if cursor_x < width as usize {
            queue!(stdout, cursor::MoveTo(cursor_x as u16, INPUT_ROW), cursor::Show)?;
        }
        Ok(())
    }

    fn render_input(&self, stdout: &mut impl Write, state: &UIState, width: u16) -> Result<()> {
        let room = (width as usize).saturating_sub(UnicodeWidthStr::width(PROMPT));

        queue!(
            stdout,
            cursor::MoveTo(0, INPUT_ROW),
            SetForegroundColor(if state.focused {
                Color::Cyan
            } else {
                Color::DarkGrey
            }),
            Print(PROMPT),
            ResetColor
        )?;

        if state.query_text.is_empty() {
            queue!(
                stdout,
                SetForegroundColor(Color::DarkGrey),
                Print(truncate(self.placeholder(), room)),
                ResetColor
            )?;
        } else {
            queue!(stdout, Print(truncate(&state.query_text, room)))?;
        }
        Ok(())
    }

    fn render_message(&self, stdout: &mut impl Write, state: &UIState, width: u16) -> Result<()> {
        let (text, color) = if let Some(ref error) = state.error {
            (error.as_str(), Color::Red)
        } else if state.loading {
            ("Loading...", Color::DarkGrey)
        } else {
            return Ok(());
        };

        queue!(
            stdout,
            cursor::MoveTo(0, MESSAGE_ROW),
            SetForegroundColor(color),
            Print(truncate(text, width as usize)),
            ResetColor
        )?;
        Ok(())
    }

    fn render_dropdown(&self, stdout: &mut impl Write, state: &UIState, width: u16) -> Result<()> {
        let Some(view) = ListboxView::build(state) else {
            return Ok(());
        };

        let capacity = dropdown_capacity(state.terminal_size.1);
        let range = visible_range(view.options.len(), state.active_highlight(), capacity);

        for (line, option) in view.options[range].iter().enumerate() {
            queue!(stdout, cursor::MoveTo(0, DROPDOWN_TOP_ROW + line as u16))?;
            if option.active {
                queue!(stdout, SetAttribute(Attribute::Reverse), Print("> "))?;
            } else {
                queue!(stdout, Print("  "))?;
            }

            let mut remaining = (width as usize).saturating_sub(2);
            for (text, emphasized) in &option.segments {
                if remaining == 0 {
                    break;
                }
                let piece = truncate(text, remaining);
                remaining = remaining.saturating_sub(UnicodeWidthStr::width(piece.as_str()));
                if *emphasized {
                    queue!(
                        stdout,
                        SetAttribute(Attribute::Bold),
                        SetAttribute(Attribute::Underlined),
                        Print(piece),
                        SetAttribute(Attribute::NoBold),
                        SetAttribute(Attribute::NoUnderline)
                    )?;
                } else {
                    queue!(stdout, Print(piece))?;
                }
            }

            if option.active {
                queue!(stdout, Print(" ".repeat(remaining)))?;
            }
            queue!(stdout, SetAttribute(Attribute::Reset))?;
        }

        Ok(())
    }
}

/// Cuts `text` to at most `max_width` display columns.
fn truncate(text: &str, max_width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += UnicodeWidthChar::width(*c).unwrap_or(0);
            used <= max_width
        })
        .collect()
}
