use anyhow::Result;
use crossterm::{
    cursor,
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{self},
};
use std::io::stdout;

use super::TerminalUI;

impl TerminalUI {
    pub(super) fn initialize_terminal(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange,
            cursor::Hide
        )?;

        let (width, height) = terminal::size()?;
        self.state.terminal_size = (width, height);

        Ok(())
    }

    pub fn cleanup(&mut self) -> Result<()> {
        if !terminal::is_raw_mode_enabled()? {
            return Ok(());
        }
        execute!(
            stdout(),
            DisableFocusChange,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
