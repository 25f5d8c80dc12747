use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;

use super::render::{dropdown_capacity, DROPDOWN_TOP_ROW, INPUT_ROW};
use super::view::visible_range;
use super::{AutocompleteMode, Nav};
use crate::ui::{UIAction, UIState};

impl AutocompleteMode {
    /// Handles a key press while the input has focus.
    ///
    /// Text edits start a resolution cycle when needed; navigation keys move
    /// the highlight, and a commit is reported through `action_tx`.
    pub fn handle_key(
        &mut self,
        state: &mut UIState,
        key: KeyEvent,
        action_tx: &mpsc::UnboundedSender<UIAction>,
    ) -> Result<()> {
        let edited = match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let had_text = !state.query_text.is_empty();
                state.query_text.clear();
                state.cursor_pos = 0;
                had_text
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                state.safe_insert_char(c);
                true
            }
            KeyCode::Backspace => state.safe_remove_char_before(),
            KeyCode::Delete => state.safe_remove_char_at(),
            KeyCode::Left => {
                state.safe_cursor_left();
                false
            }
            KeyCode::Right => {
                state.safe_cursor_right();
                false
            }
            KeyCode::Home => {
                state.safe_cursor_home();
                false
            }
            KeyCode::End => {
                state.safe_cursor_end();
                false
            }
            KeyCode::Up => self.dispatch_nav(state, Nav::Up, action_tx),
            KeyCode::Down => self.dispatch_nav(state, Nav::Down, action_tx),
            KeyCode::Enter => self.dispatch_nav(state, Nav::Enter, action_tx),
            KeyCode::Esc => self.dispatch_nav(state, Nav::Escape, action_tx),
            _ => false,
        };

        if edited {
            if let Some(request) = self.query_changed(state) {
                let _ = action_tx.send(UIAction::Resolve(request));
            }
        }

        Ok(())
    }

    /// Handles a mouse event over the input area.
    ///
    /// A left click on a dropdown row commits it; a click on the input line
    /// focuses the input. The wheel moves the highlight.
    pub fn handle_mouse(
        &mut self,
        state: &mut UIState,
        mouse: MouseEvent,
        action_tx: &mpsc::UnboundedSender<UIAction>,
    ) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if mouse.row == INPUT_ROW {
                    self.focus(state);
                } else if let Some(index) = self.row_at(state, mouse.row) {
                    if let Some(text) = self.commit(state, index) {
                        let _ = action_tx.send(UIAction::Commit(text));
                    }
                }
            }
            MouseEventKind::ScrollDown if state.shows_dropdown() => {
                self.navigate(state, Nav::Down);
            }
            MouseEventKind::ScrollUp if state.shows_dropdown() => {
                self.navigate(state, Nav::Up);
            }
            _ => {}
        }
    }

    /// Maps a terminal row to the index of the dropdown entry drawn there.
    pub fn row_at(&self, state: &UIState, row: u16) -> Option<usize> {
        if !state.shows_dropdown() || row < DROPDOWN_TOP_ROW {
            return None;
        }
        let range = visible_range(
            state.filtered.len(),
            state.active_highlight(),
            dropdown_capacity(state.terminal_size.1),
        );
        let index = range.start + (row - DROPDOWN_TOP_ROW) as usize;
        range.contains(&index).then_some(index)
    }

    fn dispatch_nav(
        &mut self,
        state: &mut UIState,
        nav: Nav,
        action_tx: &mpsc::UnboundedSender<UIAction>,
    ) -> bool {
        if let Some(text) = self.navigate(state, nav) {
            let _ = action_tx.send(UIAction::Commit(text));
        }
        false
    }
}
