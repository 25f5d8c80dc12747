use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info};

use super::{AutocompleteMode, TerminalUI, UIAction, UIEvent};
use crate::logging::{LogBuffer, TUILogCollector};

mod actions;
use actions::ActionDispatcher;

/// Runs the terminal UI until the user exits.
///
/// Returns the last committed suggestion, if any.
pub async fn run_tui(autocomplete: AutocompleteMode, log_filter: &str) -> Result<Option<String>> {
    let log_buffer = Arc::new(LogBuffer::new(10000));

    if let Err(e) = TUILogCollector::init_subscriber(log_buffer.clone(), log_filter) {
        debug!("Failed to initialize TUI log collector: {}", e);
    }

    info!("Starting autosuggest TUI with {:?} source", autocomplete.source());

    let (ui_event_tx, ui_event_rx) = mpsc::unbounded_channel::<UIEvent>();
    let (ui_action_tx, mut ui_action_rx) = mpsc::unbounded_channel::<UIAction>();
    let (committed_tx, committed_rx) = watch::channel::<Option<String>>(None);

    log_buffer.set_ui_sender(ui_event_tx.clone());

    let dispatcher = ActionDispatcher::new(
        autocomplete.source().clone(),
        ui_event_tx.clone(),
        committed_tx,
    );

    let mut terminal_ui = TerminalUI::new(autocomplete, ui_event_rx, ui_action_tx);
    terminal_ui.set_log_buffer(log_buffer.clone());

    let ui_event_tx_input = ui_event_tx.clone();
    let input_task = tokio::task::spawn_blocking(move || loop {
        if ui_event_tx_input.is_closed() {
            break;
        }
        if !event::poll(Duration::from_millis(100)).unwrap_or(false) {
            continue;
        }
        let ui_event = match event::read() {
            Ok(Event::Key(key_event)) => UIEvent::KeyPress(key_event),
            Ok(Event::Mouse(mouse_event)) => UIEvent::Mouse(mouse_event),
            Ok(Event::Resize(width, height)) => UIEvent::Resize(width, height),
            Ok(Event::FocusGained) => UIEvent::FocusGained,
            Ok(Event::FocusLost) => UIEvent::FocusLost,
            Ok(_) => continue,
            Err(e) => {
                debug!("Failed to read terminal event: {}", e);
                continue;
            }
        };
        if ui_event_tx_input.send(ui_event).is_err() {
            break;
        }
    });

    tokio::spawn(async move {
        while let Some(action) = ui_action_rx.recv().await {
            if let Err(e) = dispatcher.dispatch(action) {
                error!("Failed to dispatch UI action: {}", e);
            }
        }
    });

    let result = terminal_ui.run().await;
    drop(terminal_ui);
    drop(ui_event_tx);
    log_buffer.clear_ui_sender();
    let _ = input_task.await;

    result?;
    let committed = committed_rx.borrow().clone();
    Ok(committed)
}
