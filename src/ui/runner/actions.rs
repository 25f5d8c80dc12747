//! This module performs UI actions off the event loop and reports their
//! outcomes back as `UIEvent`s.
use anyhow::{anyhow, Result};
use tokio::sync::{mpsc, watch};
use tokio::time::sleep;
use tracing::{debug, info};

use crate::suggest::SuggestionSource;
use crate::ui::{UIAction, UIEvent};

pub struct ActionDispatcher {
    source: SuggestionSource,
    ui_sender: mpsc::UnboundedSender<UIEvent>,
    committed: watch::Sender<Option<String>>,
}

impl ActionDispatcher {
    pub fn new(
        source: SuggestionSource,
        ui_sender: mpsc::UnboundedSender<UIEvent>,
        committed: watch::Sender<Option<String>>,
    ) -> Self {
        Self {
            source,
            ui_sender,
            committed,
        }
    }

    /// Handles one action.
    ///
    /// Resolution cycles and blur timers are spawned so that a slow lookup
    /// never holds up later actions.
    ///
    /// # Errors
    ///
    /// Returns an error if the UI event channel has closed.
    pub fn dispatch(&self, action: UIAction) -> Result<()> {
        match action {
            UIAction::Resolve(request) => {
                debug!("Dispatching resolution cycle {}", request.seq);
                let source = self.source.clone();
                let ui_sender = self.ui_sender.clone();
                tokio::spawn(async move {
                    let resolution = request.run(&source).await;
                    let _ = ui_sender.send(UIEvent::Resolved(resolution));
                });
            }
            UIAction::ScheduleBlur(ticket) => {
                let ui_sender = self.ui_sender.clone();
                tokio::spawn(async move {
                    sleep(ticket.delay).await;
                    let _ = ui_sender.send(UIEvent::BlurElapsed(ticket));
                });
            }
            UIAction::Commit(text) => {
                info!("Committed '{}'", text);
                self.committed.send_replace(Some(text));
            }
            UIAction::Exit => {
                self.ui_sender
                    .send(UIEvent::Shutdown)
                    .map_err(|_| anyhow!("UI event channel closed"))?;
            }
        }
        Ok(())
    }
}
