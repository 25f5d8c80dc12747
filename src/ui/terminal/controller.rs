use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::logging::LogBuffer;
use crate::ui::{AutocompleteMode, LogMode, UIAction, UIEvent, UIState};

pub struct TerminalUI {
    pub(super) state: UIState,
    pub(super) autocomplete: AutocompleteMode,
    pub(super) log_mode: LogMode,
    pub(super) event_rx: mpsc::UnboundedReceiver<UIEvent>,
    pub(super) action_tx: mpsc::UnboundedSender<UIAction>,
    pub(super) log_buffer: Option<Arc<LogBuffer>>,
}

impl TerminalUI {
    pub fn new(
        autocomplete: AutocompleteMode,
        event_rx: mpsc::UnboundedReceiver<UIEvent>,
        action_tx: mpsc::UnboundedSender<UIAction>,
    ) -> Self {
        Self {
            state: UIState::new(),
            autocomplete,
            log_mode: LogMode::new(),
            event_rx,
            action_tx,
            log_buffer: None,
        }
    }

    pub fn set_log_buffer(&mut self, log_buffer: Arc<LogBuffer>) {
        self.log_buffer = Some(log_buffer);
    }

    /// Processes UI events one at a time until shutdown, redrawing after each.
    pub async fn run(&mut self) -> Result<()> {
        self.initialize_terminal()?;

        debug!("Starting terminal UI loop");
        self.render()?;

        while let Some(event) = self.event_rx.recv().await {
            if matches!(event, UIEvent::Shutdown) {
                break;
            }
            if let Err(e) = self.handle_event(event) {
                error!("Error handling UI event: {}", e);
            }
            self.render()?;
        }

        debug!("Terminal UI loop finished");
        self.cleanup()
    }
}
