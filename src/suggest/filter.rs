//! Case-insensitive substring filtering and match highlighting.
use std::ops::Range;

use super::Suggestion;

/// A name split around the first occurrence of the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlighted<'a> {
    Plain(&'a str),
    Marked {
        prefix: &'a str,
        matched: &'a str,
        suffix: &'a str,
    },
}

impl<'a> Highlighted<'a> {
    /// Returns the non-empty pieces in display order, flagged when emphasized.
    pub fn segments(&self) -> Vec<(&'a str, bool)> {
        match *self {
            Highlighted::Plain(text) => vec![(text, false)],
            Highlighted::Marked {
                prefix,
                matched,
                suffix,
            } => [(prefix, false), (matched, true), (suffix, false)]
                .into_iter()
                .filter(|(text, _)| !text.is_empty())
                .collect(),
        }
    }
}

/// Keeps every candidate whose name contains `query`, ignoring case.
///
/// The result preserves candidate order and is not truncated.
pub fn filter(candidates: &[Suggestion], query: &str) -> Vec<Suggestion> {
    candidates
        .iter()
        .filter(|candidate| query.is_empty() || find_match(&candidate.name, query).is_some())
        .cloned()
        .collect()
}

/// Locates the first case-insensitive occurrence of `query` in `name`.
///
/// The returned range is in bytes of `name` and always falls on character
/// boundaries. An empty query or an empty name never matches.
pub fn find_match(name: &str, query: &str) -> Option<Range<usize>> {
    if name.is_empty() || query.is_empty() {
        return None;
    }

    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();

    name.char_indices().find_map(|(start, _)| {
        match_len(&name[start..], &needle).map(|len| start..start + len)
    })
}

/// Splits `name` around the first occurrence of `query`.
pub fn highlight<'a>(name: &'a str, query: &str) -> Highlighted<'a> {
    match find_match(name, query) {
        Some(range) => Highlighted::Marked {
            prefix: &name[..range.start],
            matched: &name[range.clone()],
            suffix: &name[range.end..],
        },
        None => Highlighted::Plain(name),
    }
}

fn match_len(haystack: &str, needle: &[char]) -> Option<usize> {
    let mut pos = 0;

    for (offset, c) in haystack.char_indices() {
        for lower in c.to_lowercase() {
            if needle.get(pos) != Some(&lower) {
                return None;
            }
            pos += 1;
        }
        if pos == needle.len() {
            return Some(offset + c.len_utf8());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movies() -> Vec<Suggestion> {
        vec![
            Suggestion::new(1, "Batman"),
            Suggestion::new(2, "Batman Returns"),
            Suggestion::new(3, "Superman"),
            Suggestion::new(4, "The Dark Knight"),
        ]
    }

    #[test]
    fn filter_is_case_insensitive_and_keeps_order() {
        let result = filter(&movies(), "MAN");
        let names: Vec<_> = result.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Batman", "Batman Returns", "Superman"]);
    }

    #[test]
    fn filter_is_idempotent() {
        let candidates = movies();
        assert_eq!(filter(&candidates, "bat"), filter(&candidates, "bat"));
        assert_eq!(filter(&candidates, "knight").len(), 1);
    }

    #[test]
    fn filter_without_matches_is_empty() {
        assert!(filter(&movies(), "xyz").is_empty());
    }

    #[test]
    fn empty_names_never_match() {
        let candidates = vec![Suggestion::new(1, ""), Suggestion::new(2, "Alien")];
        let result = filter(&candidates, "a");
        assert_eq!(result, vec![Suggestion::new(2, "Alien")]);
        assert_eq!(highlight("", "a"), Highlighted::Plain(""));
    }

    #[test]
    fn highlight_marks_first_occurrence() {
        assert_eq!(
            highlight("Batman Returns", "man"),
            Highlighted::Marked {
                prefix: "Bat",
                matched: "man",
                suffix: " Returns",
            }
        );
    }

    #[test]
    fn highlight_keeps_original_casing() {
        let marked = highlight("Batman", "BAT");
        assert_eq!(marked.segments(), vec![("Bat", true), ("man", false)]);
    }

    #[test]
    fn highlight_without_match_is_plain() {
        assert_eq!(highlight("Batman", "xyz"), Highlighted::Plain("Batman"));
        assert_eq!(highlight("Batman", ""), Highlighted::Plain("Batman"));
    }

    #[test]
    fn find_match_respects_char_boundaries() {
        assert_eq!(find_match("Amélie", "ÉLI"), Some(2..6));
        assert_eq!(find_match("naïve", "ve"), Some(4..6));
    }
}
