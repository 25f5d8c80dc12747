use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::ui::{UIAction, UIEvent, UIMode};

use super::TerminalUI;

impl TerminalUI {
    pub(super) fn handle_event(&mut self, event: UIEvent) -> Result<()> {
        match event {
            UIEvent::NewLogBatch(entries) => {
                self.state.add_log_batch(entries);
            }
            UIEvent::RefreshLogs => {
                self.state.refresh_logs();
            }
            UIEvent::KeyPress(key_event) => {
                if key_event.kind == KeyEventKind::Press {
                    self.handle_key_event(key_event)?;
                }
            }
            UIEvent::Mouse(mouse) => {
                if matches!(self.state.mode, UIMode::Input) {
                    self.autocomplete
                        .handle_mouse(&mut self.state, mouse, &self.action_tx);
                }
            }
            UIEvent::FocusGained => {
                self.autocomplete.focus(&mut self.state);
            }
            UIEvent::FocusLost => {
                let ticket = self.autocomplete.blur(&mut self.state);
                let _ = self.action_tx.send(UIAction::ScheduleBlur(ticket));
            }
            UIEvent::Resize(width, height) => {
                self.state.terminal_size = (width, height);
            }
            UIEvent::Resolved(resolution) => {
                self.autocomplete
                    .apply_resolution(&mut self.state, resolution);
            }
            UIEvent::BlurElapsed(ticket) => {
                if self.autocomplete.blur_elapsed(&mut self.state, ticket) {
                    debug!("Closed dropdown after blur");
                }
            }
            UIEvent::Shutdown => {}
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        match (key.code, key.modifiers) {
            (KeyCode::F(9), _) | (KeyCode::Char('l'), KeyModifiers::CONTROL) => {
                self.state.toggle_mode();
                self.sync_log_level();
                return Ok(());
            }
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                let _ = self.action_tx.send(UIAction::Exit);
                return Ok(());
            }
            _ => {}
        }

        match &self.state.mode {
            UIMode::Input => {
                self.autocomplete
                    .handle_key(&mut self.state, key, &self.action_tx)?;
            }
            UIMode::Logs { .. } => {
                self.log_mode.handle_key(&mut self.state, key);
                self.sync_log_level();
            }
        }

        Ok(())
    }

    fn sync_log_level(&self) {
        if let (Some(log_buffer), UIMode::Logs { level, .. }) = (&self.log_buffer, &self.state.mode)
        {
            log_buffer.set_display_level(*level);
        }
    }
}
