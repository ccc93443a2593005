//! Validated contents for the "Set Codes" action.

use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

use super::slot::CODE_LENGTH;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresetError {
    #[error("preset must be exactly {expected} characters (got {got})")]
    WrongLength { expected: usize, got: usize },
}

/// Six single-character cell texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetCodes([String; CODE_LENGTH]);

impl PresetCodes {
    /// Splits `raw` into one cell per user-perceived character.
    pub fn parse(raw: &str) -> Result<Self, PresetError> {
        let graphemes: Vec<&str> = raw.graphemes(true).collect();
        let cells: [&str; CODE_LENGTH] = graphemes
            .as_slice()
            .try_into()
            .map_err(|_| PresetError::WrongLength {
                expected: CODE_LENGTH,
                got: graphemes.len(),
            })?;
        Ok(Self(cells.map(str::to_owned)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn joined(&self) -> String {
        self.0.concat()
    }
}

impl Default for PresetCodes {
    fn default() -> Self {
        Self(["1", "2", "3", "4", "5", "6"].map(str::to_owned))
    }
}

impl TryFrom<&str> for PresetCodes {
    type Error = PresetError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
