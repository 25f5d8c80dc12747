//! This module implements the autocomplete input: query editing, resolution
//! cycles, keyboard navigation and the dropdown view.
use std::time::Duration;

use crate::suggest::{SuggestError, Suggestion, SuggestionSource};

mod controller;
mod input;
mod render;
pub mod view;

pub use controller::Nav;

/// How long the dropdown stays open after the input loses focus.
pub const DEFAULT_BLUR_DELAY: Duration = Duration::from_millis(200);

/// Owns the suggestion source and the bookkeeping that orders resolution
/// cycles and blur timers.
pub struct AutocompleteMode {
    source: SuggestionSource,
    /// Sequence number of the most recently started resolution cycle.
    latest_seq: u64,
    /// Generation of the most recent blur; focus bumps it to cancel the close.
    blur_generation: u64,
    blur_delay: Duration,
    placeholder: String,
}

/// A resolution cycle to run off the UI task.
#[derive(Debug)]
pub struct ResolveRequest {
    pub seq: u64,
    pub query: String,
}

/// The outcome of a resolution cycle, tagged with the cycle it belongs to.
#[derive(Debug)]
pub struct Resolution {
    pub seq: u64,
    pub query: String,
    pub outcome: Result<Vec<Suggestion>, SuggestError>,
}

/// Identifies one scheduled blur-close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurTicket {
    pub generation: u64,
    pub delay: Duration,
}

impl ResolveRequest {
    /// Runs the cycle against `source`.
    pub async fn run(self, source: &SuggestionSource) -> Resolution {
        let outcome = source.resolve(&self.query).await;
        Resolution {
            seq: self.seq,
            query: self.query,
            outcome,
        }
    }
}

impl AutocompleteMode {
    /// Creates a new `AutocompleteMode` instance.
    ///
    /// # Arguments
    ///
    /// * `source` - Where candidate suggestions come from.
    /// * `blur_delay` - How long to keep the dropdown open after a blur, long
    ///   enough for a click on a row to land first.
    pub fn new(source: SuggestionSource, blur_delay: Duration) -> Self {
        Self {
            source,
            latest_seq: 0,
            blur_generation: 0,
            blur_delay,
            placeholder: String::new(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn source(&self) -> &SuggestionSource {
        &self.source
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}
