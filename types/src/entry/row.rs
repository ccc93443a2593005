//! The six-cell code entry row.
//!
//! The row owns every cell plus a single focused index, so zero-or-one
//! focused cells holds by construction. Cells report edits back through a
//! short-lived [`CellEvents`] handle that borrows only the focus state.

use super::cell::{CellEvents, CharCell, EditDecision, FilterPolicy};
use super::preset::PresetCodes;
use super::slot::{CODE_LENGTH, EdgePolicy, SlotIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FocusState {
    focused: Option<SlotIndex>,
    edge: EdgePolicy,
}

impl FocusState {
    fn advance_from(&mut self, from: SlotIndex) {
        self.focused = self.edge.step(from, SlotIndex::next);
    }

    fn retreat_from(&mut self, from: SlotIndex) {
        self.focused = self.edge.step(from, SlotIndex::prev);
    }
}

/// Event handle given to cell `index` while it filters an edit.
struct RowEvents<'a> {
    index: SlotIndex,
    focus: &'a mut FocusState,
}

impl CellEvents for RowEvents<'_> {
    fn on_changed(&mut self, _text: &str) {
        self.focus.advance_from(self.index);
    }

    fn on_delete(&mut self) {
        self.focus.retreat_from(self.index);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntryRow {
    cells: [CharCell; CODE_LENGTH],
    focus: FocusState,
    filter: FilterPolicy,
}

impl Default for CodeEntryRow {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeEntryRow {
    /// Six empty cells with focus on the first.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policies(FilterPolicy::default(), EdgePolicy::default())
    }

    #[must_use]
    pub fn with_policies(filter: FilterPolicy, edge: EdgePolicy) -> Self {
        Self {
            cells: Default::default(),
            focus: FocusState {
                focused: Some(SlotIndex::FIRST),
                edge,
            },
            filter,
        }
    }

    #[must_use]
    pub fn filter_policy(&self) -> FilterPolicy {
        self.filter
    }

    #[must_use]
    pub fn edge_policy(&self) -> EdgePolicy {
        self.focus.edge
    }

    #[must_use]
    pub fn cells(&self) -> &[CharCell; CODE_LENGTH] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, index: SlotIndex) -> &CharCell {
        &self.cells[index.get()]
    }

    /// Current text of every cell, in order.
    #[must_use]
    pub fn code(&self) -> [&str; CODE_LENGTH] {
        std::array::from_fn(|i| self.cells[i].text())
    }

    #[must_use]
    pub fn focused(&self) -> Option<SlotIndex> {
        self.focus.focused
    }

    /// Per-cell focus flags; at most one is `true`.
    #[must_use]
    pub fn focus_vector(&self) -> [bool; CODE_LENGTH] {
        std::array::from_fn(|i| self.focus.focused.map(SlotIndex::get) == Some(i))
    }

    #[must_use]
    pub fn is_focused(&self, index: SlotIndex) -> bool {
        self.focus.focused == Some(index)
    }

    /// True when every cell holds exactly one character.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(CharCell::is_single)
    }

    /// The concatenated code, once complete.
    #[must_use]
    pub fn code_string(&self) -> Option<String> {
        self.is_complete()
            .then(|| self.cells.iter().map(CharCell::text).collect())
    }

    /// Runs cell `index`'s edit filter and applies the resulting focus move.
    pub fn edit(&mut self, index: SlotIndex, replacement: &str) -> EditDecision {
        let mut events = RowEvents {
            index,
            focus: &mut self.focus,
        };
        self.cells[index.get()].propose(replacement, self.filter, &mut events)
    }

    /// Edits the focused cell. Returns `None` when no cell has focus.
    pub fn edit_focused(&mut self, replacement: &str) -> Option<EditDecision> {
        let index = self.focus.focused?;
        Some(self.edit(index, replacement))
    }

    /// Overwrites every cell's text. Focus is left as it was.
    pub fn set_codes(&mut self, codes: &PresetCodes) {
        for (cell, code) in self.cells.iter_mut().zip(codes.iter()) {
            cell.set_text(code);
        }
    }

    /// Empties every cell and focuses the first.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.set_text(String::new());
        }
        self.focus.focused = Some(SlotIndex::FIRST);
    }

    pub fn focus(&mut self, index: SlotIndex) {
        self.focus.focused = Some(index);
    }

    /// Moves focus right, saturating at the last cell. Focuses the first
    /// cell when nothing is focused.
    pub fn focus_next(&mut self) {
        self.focus.focused = Some(match self.focus.focused {
            Some(index) => index.next().unwrap_or(index),
            None => SlotIndex::FIRST,
        });
    }

    /// Moves focus left, saturating at the first cell. Focuses the last
    /// cell when nothing is focused.
    pub fn focus_prev(&mut self) {
        self.focus.focused = Some(match self.focus.focused {
            Some(index) => index.prev().unwrap_or(index),
            None => SlotIndex::LAST,
        });
    }
}
