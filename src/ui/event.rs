use crossterm::event::{KeyEvent, MouseEvent};

use super::autocomplete::{BlurTicket, Resolution};
use super::log_entry::LogEntry;

/// Everything the UI task reacts to, processed one at a time.
#[derive(Debug)]
pub enum UIEvent {
    NewLogBatch(Vec<LogEntry>),
    RefreshLogs,
    KeyPress(KeyEvent),
    Mouse(MouseEvent),
    FocusGained,
    FocusLost,
    Resize(u16, u16),
    /// A resolution cycle finished, possibly after being superseded.
    Resolved(Resolution),
    BlurElapsed(BlurTicket),
    Shutdown,
}
