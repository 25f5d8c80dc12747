//! This module defines the actions the UI hands off to be performed outside
//! the event loop.
use super::autocomplete::{BlurTicket, ResolveRequest};

#[derive(Debug)]
pub enum UIAction {
    /// Runs a resolution cycle against the suggestion source.
    Resolve(ResolveRequest),
    /// Closes the dropdown once the blur delay elapses.
    ScheduleBlur(BlurTicket),
    /// A suggestion was committed into the input.
    Commit(String),
    /// Exits the application.
    Exit,
}
