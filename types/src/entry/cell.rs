//! A single-character input cell and its edit filter.
//!
//! The filter runs on every proposed replacement *before* the cell's text
//! changes. Short replacements (empty or one character) are applied by the
//! cell itself and reported through [`CellEvents`]; anything longer is let
//! through verbatim without notifying anyone.

use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;

/// Receiver for the two notifications a cell emits.
pub trait CellEvents {
    /// The cell accepted a new single character.
    fn on_changed(&mut self, text: &str);
    /// The cell was cleared by a deletion key.
    fn on_delete(&mut self);
}

/// Which single characters a cell will take.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterPolicy {
    /// Any single character, digit or not.
    #[default]
    Permissive,
    /// Only ASCII digits `0`-`9`; other single characters are dropped.
    #[serde(alias = "digits_only")]
    Digits,
}

impl FilterPolicy {
    fn admits(self, grapheme: &str) -> bool {
        match self {
            Self::Permissive => true,
            Self::Digits => grapheme.len() == 1 && grapheme.as_bytes()[0].is_ascii_digit(),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Permissive => "permissive",
            Self::Digits => "digits",
        }
    }
}

/// Outcome of running the filter over a proposed replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditDecision {
    /// Empty replacement: text cleared and `on_delete` fired.
    Deleted,
    /// Exactly one character: text overwritten and `on_changed` fired.
    Replaced(String),
    /// Longer replacement taken unfiltered; no callback.
    Passthrough,
    /// A single character that was refused (by policy, or a control
    /// character such as a pasted line break); text untouched, no callback.
    Rejected,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharCell {
    text: String,
}

impl CharCell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the cell holds exactly one user-perceived character.
    #[must_use]
    pub fn is_single(&self) -> bool {
        is_single_grapheme(&self.text)
    }

    /// Overwrites the bound text without running the filter.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Runs the edit filter for `replacement` and notifies `events`.
    pub fn propose(
        &mut self,
        replacement: &str,
        policy: FilterPolicy,
        events: &mut impl CellEvents,
    ) -> EditDecision {
        if replacement.is_empty() {
            self.text.clear();
            events.on_delete();
            return EditDecision::Deleted;
        }

        if is_single_grapheme(replacement) {
            if is_control(replacement) || !policy.admits(replacement) {
                return EditDecision::Rejected;
            }
            self.text.clear();
            self.text.push_str(replacement);
            events.on_changed(replacement);
            return EditDecision::Replaced(replacement.to_owned());
        }

        self.text.clear();
        self.text.push_str(replacement);
        EditDecision::Passthrough
    }
}

/// `"\r\n"` is one grapheme, so a pasted line break arrives here.
fn is_control(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_control)
}

fn is_single_grapheme(text: &str) -> bool {
    let mut graphemes = text.graphemes(true);
    graphemes.next().is_some() && graphemes.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        changed: Vec<String>,
        deletes: usize,
    }

    impl CellEvents for Recorder {
        fn on_changed(&mut self, text: &str) {
            self.changed.push(text.to_owned());
        }

        fn on_delete(&mut self) {
            self.deletes += 1;
        }
    }

    #[test]
    fn empty_replacement_clears_and_reports_delete() {
        let mut cell = CharCell::new();
        cell.set_text("7");
        let mut rec = Recorder::default();

        let decision = cell.propose("", FilterPolicy::Permissive, &mut rec);

        assert_eq!(decision, EditDecision::Deleted);
        assert!(cell.is_empty());
        assert_eq!(rec.deletes, 1);
        assert!(rec.changed.is_empty());
    }

    #[test]
    fn delete_on_empty_cell_still_reports() {
        let mut cell = CharCell::new();
        let mut rec = Recorder::default();

        cell.propose("", FilterPolicy::Permissive, &mut rec);

        assert_eq!(rec.deletes, 1);
    }

    #[test]
    fn single_char_overwrites_existing_text() {
        let mut cell = CharCell::new();
        cell.set_text("1");
        let mut rec = Recorder::default();

        let decision = cell.propose("9", FilterPolicy::Permissive, &mut rec);

        assert_eq!(decision, EditDecision::Replaced("9".to_string()));
        assert_eq!(cell.text(), "9");
        assert_eq!(rec.changed, vec!["9".to_string()]);
    }

    #[test]
    fn permissive_accepts_non_digits() {
        let mut cell = CharCell::new();
        let mut rec = Recorder::default();

        cell.propose("x", FilterPolicy::Permissive, &mut rec);

        assert_eq!(cell.text(), "x");
        assert_eq!(rec.changed.len(), 1);
    }

    #[test]
    fn combining_sequence_counts_as_one_character() {
        let mut cell = CharCell::new();
        let mut rec = Recorder::default();

        let decision = cell.propose("e\u{301}", FilterPolicy::Permissive, &mut rec);

        assert!(matches!(decision, EditDecision::Replaced(_)));
        assert!(cell.is_single());
    }

    #[test]
    fn multi_char_paste_passes_through_silently() {
        let mut cell = CharCell::new();
        cell.set_text("4");
        let mut rec = Recorder::default();

        let decision = cell.propose("123456", FilterPolicy::Permissive, &mut rec);

        assert_eq!(decision, EditDecision::Passthrough);
        assert_eq!(cell.text(), "123456");
        assert!(rec.changed.is_empty());
        assert_eq!(rec.deletes, 0);
        assert!(!cell.is_single());
    }

    #[test]
    fn digits_policy_rejects_letters_without_side_effects() {
        let mut cell = CharCell::new();
        cell.set_text("2");
        let mut rec = Recorder::default();

        let decision = cell.propose("a", FilterPolicy::Digits, &mut rec);

        assert_eq!(decision, EditDecision::Rejected);
        assert_eq!(cell.text(), "2");
        assert!(rec.changed.is_empty());
    }

    #[test]
    fn line_break_is_rejected_like_a_refused_key() {
        for line_break in ["\r\n", "\n", "\t"] {
            let mut cell = CharCell::new();
            cell.set_text("5");
            let mut rec = Recorder::default();

            let decision = cell.propose(line_break, FilterPolicy::Permissive, &mut rec);

            assert_eq!(decision, EditDecision::Rejected);
            assert_eq!(cell.text(), "5");
            assert!(rec.changed.is_empty());
            assert_eq!(rec.deletes, 0);
        }
    }

    #[test]
    fn digits_policy_accepts_digits() {
        let mut cell = CharCell::new();
        let mut rec = Recorder::default();

        cell.propose("0", FilterPolicy::Digits, &mut rec);

        assert_eq!(cell.text(), "0");
    }
}
