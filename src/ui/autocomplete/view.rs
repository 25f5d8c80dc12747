//! A listbox-style description of the dropdown, independent of how it is
//! drawn. Exactly the highlighted option is marked active, and the listbox
//! names it as the input's active descendant.
use std::ops::Range;

use crate::suggest::{highlight, Suggestion};
use crate::ui::UIState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView<'a> {
    pub option_id: String,
    /// Display pieces of the name; `true` marks the matched span.
    pub segments: Vec<(&'a str, bool)>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListboxView<'a> {
    pub options: Vec<OptionView<'a>>,
    pub active_descendant: Option<String>,
}

pub fn option_id(suggestion: &Suggestion) -> String {
    format!("suggestion-{}", suggestion.id)
}

impl<'a> ListboxView<'a> {
    /// Builds the view, or `None` when there is nothing to show.
    pub fn build(state: &'a UIState) -> Option<Self> {
        if !state.shows_dropdown() {
            return None;
        }

        let active = state.active_highlight();
        let options: Vec<_> = state
            .filtered
            .iter()
            .enumerate()
            .map(|(index, suggestion)| OptionView {
                option_id: option_id(suggestion),
                segments: highlight(&suggestion.name, &state.query_text).segments(),
                active: active == Some(index),
            })
            .collect();

        let active_descendant = options
            .iter()
            .find(|option| option.active)
            .map(|option| option.option_id.clone());

        Some(Self {
            options,
            active_descendant,
        })
    }
}

/// The slice of `total` rows that fits in `capacity`, keeping `active` in view.
pub fn visible_range(total: usize, active: Option<usize>, capacity: usize) -> Range<usize> {
    if total <= capacity {
        return 0..total;
    }
    let start = match active {
        Some(index) if index >= capacity => index + 1 - capacity,
        _ => 0,
    };
    start..(start + capacity).min(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(names: &[&str], query: &str, highlight: Option<usize>) -> UIState {
        let mut state = UIState::new();
        state.query_text = query.to_string();
        state.filtered = names
            .iter()
            .enumerate()
            .map(|(i, name)| Suggestion::new(10 + i as i64, *name))
            .collect();
        state.highlight_index = highlight;
        state.dropdown_visible = true;
        state
    }

    #[test]
    fn exactly_the_highlighted_option_is_active() {
        let state = state_with(&["Batman", "Batman Returns"], "man", Some(1));
        let view = ListboxView::build(&state).unwrap();

        let active: Vec<_> = view.options.iter().map(|o| o.active).collect();
        assert_eq!(active, vec![false, true]);
        assert_eq!(view.active_descendant.as_deref(), Some("suggestion-11"));
        assert_eq!(
            view.options[1].segments,
            vec![("Bat", false), ("man", true), (" Returns", false)]
        );
    }

    #[test]
    fn out_of_range_highlight_marks_nothing() {
        let state = state_with(&["Batman"], "bat", Some(4));
        let view = ListboxView::build(&state).unwrap();
        assert!(view.options.iter().all(|o| !o.active));
        assert!(view.active_descendant.is_none());
    }

    #[test]
    fn hidden_or_empty_dropdown_has_no_view() {
        let mut state = state_with(&["Batman"], "bat", None);
        state.dropdown_visible = false;
        assert!(ListboxView::build(&state).is_none());

        let state = state_with(&[], "bat", None);
        assert!(ListboxView::build(&state).is_none());
    }

    #[test]
    fn visible_range_follows_the_highlight() {
        assert_eq!(visible_range(3, None, 5), 0..3);
        assert_eq!(visible_range(10, Some(2), 4), 0..4);
        assert_eq!(visible_range(10, Some(6), 4), 3..7);
        assert_eq!(visible_range(10, Some(9), 4), 6..10);
    }
}
