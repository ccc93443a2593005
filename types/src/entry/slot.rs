//! Bounded cell addressing for the code entry row.

use serde::Deserialize;

/// Number of cells in a verification code.
pub const CODE_LENGTH: usize = 6;

/// Index of a cell, guaranteed to be in `0..CODE_LENGTH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotIndex(usize);

impl SlotIndex {
    pub const FIRST: Self = Self(0);
    pub const LAST: Self = Self(CODE_LENGTH - 1);

    /// Returns `None` when `index` is outside the row.
    #[must_use]
    pub const fn new(index: usize) -> Option<Self> {
        if index < CODE_LENGTH {
            Some(Self(index))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// The cell to the right, or `None` past the last cell.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    /// The cell to the left, or `None` before the first cell.
    #[must_use]
    pub const fn prev(self) -> Option<Self> {
        match self.0.checked_sub(1) {
            Some(index) => Some(Self(index)),
            None => None,
        }
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..CODE_LENGTH).map(Self)
    }
}

/// What happens when focus would move past either end of the row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// Stay on the boundary cell.
    #[default]
    Clamp,
    /// Drop focus entirely; no cell takes input until one is focused again.
    Release,
}

impl EdgePolicy {
    /// Resolves a saturating step from `from`. `step` is `SlotIndex::next` or
    /// `SlotIndex::prev`.
    #[must_use]
    pub fn step(
        self,
        from: SlotIndex,
        step: fn(SlotIndex) -> Option<SlotIndex>,
    ) -> Option<SlotIndex> {
        match (step(from), self) {
            (Some(to), _) => Some(to),
            (None, EdgePolicy::Clamp) => Some(from),
            (None, EdgePolicy::Release) => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clamp => "clamp",
            Self::Release => "release",
        }
    }
}
