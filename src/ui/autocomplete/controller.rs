use tracing::{debug, warn};

use super::{AutocompleteMode, BlurTicket, Resolution, ResolveRequest};
use crate::suggest::filter;
use crate::ui::UIState;

/// Keys that move through or act on the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Down,
    Up,
    Enter,
    Escape,
}

impl AutocompleteMode {
    /// Replaces the query text as if the user had typed it.
    ///
    /// The highlight is reset even when the text is unchanged, but an
    /// unchanged query does not start a new resolution cycle.
    pub fn set_query(
        &mut self,
        state: &mut UIState,
        text: impl Into<String>,
    ) -> Option<ResolveRequest> {
        let text = text.into();
        if text == state.query_text && !text.is_empty() {
            state.highlight_index = None;
            return None;
        }

        state.query_text = text;
        state.safe_cursor_end();
        self.query_changed(state)
    }

    /// Reacts to an edit already applied to `state.query_text`.
    ///
    /// Returns the request to dispatch when the source has to be queried.
    pub fn query_changed(&mut self, state: &mut UIState) -> Option<ResolveRequest> {
        state.highlight_index = None;

        if state.query_text.is_empty() {
            self.supersede(state);
            state.filtered.clear();
            state.dropdown_visible = false;
            return None;
        }

        if let Some(candidates) = self.source.static_candidates() {
            state.filtered = filter(candidates, &state.query_text);
            state.error = None;
            state.dropdown_visible = true;
            return None;
        }

        self.latest_seq += 1;
        state.loading = true;
        state.error = None;
        debug!(
            "Starting resolution cycle {} for '{}'",
            self.latest_seq, state.query_text
        );

        Some(ResolveRequest {
            seq: self.latest_seq,
            query: state.query_text.clone(),
        })
    }

    /// Applies a finished resolution cycle unless a newer one superseded it.
    ///
    /// Returns `true` if the state was updated.
    pub fn apply_resolution(&mut self, state: &mut UIState, resolution: Resolution) -> bool {
        if resolution.seq != self.latest_seq || resolution.query != state.query_text {
            debug!(
                "Dropping stale result for '{}' (cycle {}, latest {})",
                resolution.query, resolution.seq, self.latest_seq
            );
            return false;
        }

        state.loading = false;
        match resolution.outcome {
            Ok(candidates) => {
                state.filtered = filter(&candidates, &resolution.query);
                state.error = None;
                state.dropdown_visible = true;
                debug!(
                    "Cycle {} matched {} of {} candidates",
                    resolution.seq,
                    state.filtered.len(),
                    candidates.len()
                );
            }
            Err(err) => {
                warn!("Suggestion lookup for '{}' failed: {}", resolution.query, err);
                state.filtered.clear();
                state.dropdown_visible = false;
                state.error = Some(err.user_message().to_string());
            }
        }

        true
    }

    pub fn focus(&mut self, state: &mut UIState) {
        state.focused = true;
        // Cancels any pending blur-close.
        self.blur_generation += 1;
        if !state.filtered.is_empty() {
            state.dropdown_visible = true;
        }
    }

    /// Marks the input as blurred and returns the ticket for the delayed close.
    pub fn blur(&mut self, state: &mut UIState) -> BlurTicket {
        state.focused = false;
        self.blur_generation += 1;
        BlurTicket {
            generation: self.blur_generation,
            delay: self.blur_delay,
        }
    }

    /// Closes the dropdown if `ticket` is still the latest blur.
    pub fn blur_elapsed(&mut self, state: &mut UIState, ticket: BlurTicket) -> bool {
        if ticket.generation != self.blur_generation || state.focused {
            return false;
        }
        state.dropdown_visible = false;
        true
    }

    /// Writes the suggestion at `index` into the input and closes the dropdown.
    ///
    /// The filtered set and highlight are left as they are. Returns the
    /// committed text.
    pub fn commit(&mut self, state: &mut UIState, index: usize) -> Option<String> {
        let name = state.filtered.get(index)?.name.clone();

        self.supersede(state);
        state.query_text = name.clone();
        state.safe_cursor_end();
        state.dropdown_visible = false;

        debug!("Committed suggestion '{}'", name);
        Some(name)
    }

    /// Applies a navigation key. Returns the committed text on Enter.
    pub fn navigate(&mut self, state: &mut UIState, nav: Nav) -> Option<String> {
        match nav {
            Nav::Down => {
                let next = state.active_highlight().map_or(0, |index| index + 1);
                if next < state.filtered.len() {
                    state.highlight_index = Some(next);
                }
                None
            }
            Nav::Up => {
                if let Some(index) = state.active_highlight().filter(|&index| index > 0) {
                    state.highlight_index = Some(index - 1);
                }
                None
            }
            Nav::Enter => state
                .active_highlight()
                .and_then(|index| self.commit(state, index)),
            Nav::Escape => {
                state.dropdown_visible = false;
                None
            }
        }
    }

    /// Invalidates any in-flight cycle so its result is dropped on arrival.
    fn supersede(&mut self, state: &mut UIState) {
        self.latest_seq += 1;
        state.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tokio::sync::{mpsc, oneshot};

    use super::*;
    use crate::suggest::error::FETCH_FAILED_MESSAGE;
    use crate::suggest::source::tests::CannedFetcher;
    use crate::suggest::{SuggestError, Suggestion, SuggestionFetcher, SuggestionSource};
    use crate::ui::autocomplete::DEFAULT_BLUR_DELAY;

    /// Holds each query's response until the test releases it.
    struct GatedFetcher {
        gates: Mutex<HashMap<String, oneshot::Receiver<String>>>,
    }

    #[async_trait]
    impl SuggestionFetcher for GatedFetcher {
        async fn fetch(&self, query: &str) -> Result<String, SuggestError> {
            let gate = self.gates.lock().unwrap().remove(query);
            match gate {
                Some(rx) => rx.await.map_err(|e| SuggestError::Request(e.to_string())),
                None => Err(SuggestError::Request(format!("unexpected query '{query}'"))),
            }
        }
    }

    fn body(items: &[(i64, &str)]) -> String {
        let results: Vec<_> = items
            .iter()
            .map(|(id, title)| serde_json::json!({ "id": id, "title": title }))
            .collect();
        serde_json::json!({ "results": results }).to_string()
    }

    fn remote(body: Result<String, String>) -> (AutocompleteMode, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = CannedFetcher {
            body,
            calls: calls.clone(),
        };
        (
            AutocompleteMode::new(SuggestionSource::remote(fetcher), DEFAULT_BLUR_DELAY),
            calls,
        )
    }

    fn with_filtered(names: &[&str]) -> UIState {
        let mut state = UIState::new();
        state.query_text = "x".to_string();
        state.filtered = names
            .iter()
            .enumerate()
            .map(|(i, name)| Suggestion::new(i as i64 + 1, *name))
            .collect();
        state.dropdown_visible = true;
        state
    }

    fn names(state: &UIState) -> Vec<&str> {
        state.filtered.iter().map(|s| s.name.as_str()).collect()
    }

    #[tokio::test]
    async fn later_cycle_wins_when_earlier_resolves_last() {
        let (release_a, gate_a) = oneshot::channel();
        let (release_ab, gate_ab) = oneshot::channel();
        let fetcher = GatedFetcher {
            gates: Mutex::new(HashMap::from([
                ("a".to_string(), gate_a),
                ("ab".to_string(), gate_ab),
            ])),
        };
        let mut mode = AutocompleteMode::new(SuggestionSource::remote(fetcher), DEFAULT_BLUR_DELAY);
        let mut state = UIState::new();

        let first = mode.set_query(&mut state, "a").unwrap();
        let second = mode.set_query(&mut state, "ab").unwrap();
        assert!(state.loading);

        let (done_tx, mut done_rx) = mpsc::unbounded_channel();
        for request in [first, second] {
            let source = mode.source().clone();
            let done_tx = done_tx.clone();
            tokio::spawn(async move {
                let _ = done_tx.send(request.run(&source).await);
            });
        }

        release_ab
            .send(body(&[(3, "Absolute Power"), (4, "Cabin Fever")]))
            .unwrap();
        let resolved = done_rx.recv().await.unwrap();
        assert_eq!(resolved.query, "ab");
        assert!(mode.apply_resolution(&mut state, resolved));

        release_a.send(body(&[(1, "Alien"), (2, "Avatar")])).unwrap();
        let stale = done_rx.recv().await.unwrap();
        assert_eq!(stale.query, "a");
        assert!(!mode.apply_resolution(&mut state, stale));

        assert_eq!(names(&state), vec!["Absolute Power", "Cabin Fever"]);
        assert!(!state.loading);
        assert!(state.dropdown_visible);
    }

    #[tokio::test]
    async fn superseded_cycle_for_the_same_text_is_dropped() {
        let (mut mode, _) = remote(Ok(body(&[(1, "Alien")])));
        let mut state = UIState::new();

        let old = mode.set_query(&mut state, "a").unwrap();
        mode.set_query(&mut state, "ab");
        let current = mode.set_query(&mut state, "a").unwrap();

        let source = mode.source().clone();
        let old = old.run(&source).await;
        assert!(!mode.apply_resolution(&mut state, old));
        assert!(state.loading);

        let current = current.run(&source).await;
        assert!(mode.apply_resolution(&mut state, current));
        assert_eq!(names(&state), vec!["Alien"]);
    }

    #[test]
    fn empty_query_clears_synchronously_without_fetching() {
        let (mut mode, calls) = remote(Ok(body(&[])));
        let mut state = with_filtered(&["Alien", "Avatar"]);
        state.loading = true;

        assert!(mode.set_query(&mut state, "").is_none());

        assert!(state.filtered.is_empty());
        assert!(!state.dropdown_visible);
        assert!(!state.loading);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_lookup_clears_results_and_sets_message() {
        let (mut mode, _) = remote(Err("connection reset".to_string()));
        let mut state = with_filtered(&["Alien"]);

        let request = mode.set_query(&mut state, "al").unwrap();
        assert!(state.loading);
        let resolution = request.run(&mode.source().clone()).await;
        assert!(mode.apply_resolution(&mut state, resolution));

        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert!(state.filtered.is_empty());
        assert!(!state.shows_dropdown());
    }

    #[tokio::test]
    async fn error_clears_when_next_cycle_starts() {
        let (mut mode, _) = remote(Ok(body(&[(1, "Alien")])));
        let mut state = UIState::new();
        state.error = Some(FETCH_FAILED_MESSAGE.to_string());

        let request = mode.set_query(&mut state, "al").unwrap();
        assert!(state.error.is_none());

        let resolution = request.run(&mode.source().clone()).await;
        mode.apply_resolution(&mut state, resolution);
        assert_eq!(names(&state), vec!["Alien"]);
    }

    #[test]
    fn static_source_resolves_inline() {
        let list = vec![
            Suggestion::new(1, "Batman"),
            Suggestion::new(2, "Alien"),
            Suggestion::new(3, "Batman Returns"),
        ];
        let mut mode = AutocompleteMode::new(SuggestionSource::from_list(list), DEFAULT_BLUR_DELAY);
        let mut state = UIState::new();

        assert!(mode.set_query(&mut state, "BAT").is_none());

        assert_eq!(names(&state), vec!["Batman", "Batman Returns"]);
        assert!(state.dropdown_visible);
        assert!(!state.loading);
    }

    #[test]
    fn arrow_down_clamps_at_the_last_row() {
        let (mut mode, _) = remote(Ok(body(&[])));
        let mut state = with_filtered(&["Batman", "Batman Returns", "Batman Begins"]);

        let mut seen = vec![state.highlight_index];
        for _ in 0..4 {
            mode.navigate(&mut state, Nav::Down);
            seen.push(state.highlight_index);
        }

        assert_eq!(seen, vec![None, Some(0), Some(1), Some(2), Some(2)]);
    }

    #[test]
    fn arrow_up_stops_at_the_first_row() {
        let (mut mode, _) = remote(Ok(body(&[])));
        let mut state = with_filtered(&["Batman", "Batman Returns", "Batman Begins"]);

        state.highlight_index = Some(0);
        mode.navigate(&mut state, Nav::Up);
        assert_eq!(state.highlight_index, Some(0));

        state.highlight_index = None;
        mode.navigate(&mut state, Nav::Up);
        assert_eq!(state.highlight_index, None);

        state.highlight_index = Some(2);
        mode.navigate(&mut state, Nav::Up);
        assert_eq!(state.highlight_index, Some(1));
    }

    #[test]
    fn arrow_down_on_empty_list_is_a_no_op() {
        let (mut mode, _) = remote(Ok(body(&[])));
        let mut state = with_filtered(&[]);
        mode.navigate(&mut state, Nav::Down);
        assert_eq!(state.highlight_index, None);
    }

    #[test]
    fn enter_commits_the_highlighted_row() {
        let (mut mode, _) = remote(Ok(body(&[])));
        let mut state = with_filtered(&["Batman", "Batman Returns"]);
        state.highlight_index = Some(1);

        let committed = mode.navigate(&mut state, Nav::Enter);

        assert_eq!(committed.as_deref(), Some("Batman Returns"));
        assert_eq!(state.query_text, "Batman Returns");
        assert_eq!(state.cursor_pos, "Batman Returns".chars().count());
        assert!(!state.dropdown_visible);
        assert_eq!(state.highlight_index, Some(1));
        assert_eq!(state.filtered.len(), 2);
    }

    #[test]
    fn enter_without_highlight_does_nothing() {
        let (mut mode, _) = remote(Ok(body(&[])));
        let mut state = with_filtered(&["Batman"]);

        assert!(mode.navigate(&mut state, Nav::Enter).is_none());
        assert_eq!(state.query_text, "x");
        assert!(state.dropdown_visible);
    }

    #[test]
    fn escape_only_closes_the_dropdown() {
        let (mut mode, _) = remote(Ok(body(&[])));
        let mut state = with_filtered(&["Batman", "Alien"]);
        state.highlight_index = Some(1);

        mode.navigate(&mut state, Nav::Escape);

        assert!(!state.dropdown_visible);
        assert_eq!(state.highlight_index, Some(1));
        assert_eq!(state.filtered.len(), 2);
    }

    #[test]
    fn editing_resets_the_highlight_even_when_unchanged() {
        let (mut mode, calls) = remote(Ok(body(&[])));
        let mut state = with_filtered(&["Batman", "Alien"]);
        state.highlight_index = Some(1);

        assert!(mode.set_query(&mut state, "x").is_none());

        assert_eq!(state.highlight_index, None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn commit_supersedes_the_cycle_in_flight() {
        let (mut mode, _) = remote(Ok(body(&[(1, "Batman")])));
        let mut state = UIState::new();

        let request = mode.set_query(&mut state, "Batman").unwrap();
        state.filtered = vec![Suggestion::new(1, "Batman")];
        mode.commit(&mut state, 0);

        let late = request.run(&mode.source().clone()).await;
        assert!(!mode.apply_resolution(&mut state, late));
        assert!(!state.dropdown_visible);
        assert!(!state.loading);
    }

    #[test]
    fn blur_closes_only_after_its_ticket_fires() {
        let (mut mode, _) = remote(Ok(body(&[])));
        let mut state = with_filtered(&["Batman"]);

        let ticket = mode.blur(&mut state);
        assert_eq!(ticket.delay, DEFAULT_BLUR_DELAY);
        assert!(state.dropdown_visible);

        assert!(mode.blur_elapsed(&mut state, ticket));
        assert!(!state.dropdown_visible);
    }

    #[test]
    fn focus_cancels_a_pending_blur_and_reopens() {
        let (mut mode, _) = remote(Ok(body(&[])));
        let mut state = with_filtered(&["Batman"]);

        let ticket = mode.blur(&mut state);
        mode.navigate(&mut state, Nav::Escape);
        mode.focus(&mut state);

        assert!(state.dropdown_visible);
        assert!(!mode.blur_elapsed(&mut state, ticket));
        assert!(state.dropdown_visible);
    }

    #[test]
    fn click_during_blur_window_still_commits() {
        let (mut mode, _) = remote(Ok(body(&[])));
        let mut state = with_filtered(&["Batman", "Alien"]);

        let ticket = mode.blur(&mut state);
        assert_eq!(mode.commit(&mut state, 1).as_deref(), Some("Alien"));
        mode.blur_elapsed(&mut state, ticket);

        assert_eq!(state.query_text, "Alien");
        assert!(!state.dropdown_visible);
    }

    #[test]
    fn focus_with_nothing_filtered_keeps_dropdown_closed() {
        let (mut mode, _) = remote(Ok(body(&[])));
        let mut state = UIState::new();
        mode.focus(&mut state);
        assert!(!state.dropdown_visible);
    }
}
