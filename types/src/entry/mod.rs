//! Verification code entry state.
//!
//! Pure data types with no IO and no ratatui dependency. The engine owns a
//! [`CodeEntryRow`]; the tui crate draws it and feeds it edits.

mod cell;
mod preset;
mod row;
mod slot;

pub use cell::{CellEvents, CharCell, EditDecision, FilterPolicy};
pub use preset::{PresetCodes, PresetError};
pub use row::CodeEntryRow;
pub use slot::{CODE_LENGTH, EdgePolicy, SlotIndex};
