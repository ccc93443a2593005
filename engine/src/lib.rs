//! Core engine for Codebox - code entry state and orchestration.
//!
//! This crate contains the App state machine without TUI dependencies.

use tracing::{debug, info};

pub use codebox_types::{
    CODE_LENGTH, CharCell, CodeEntryRow, EdgePolicy, EditDecision, FilterPolicy, PresetCodes,
    SlotIndex, UiOptions,
};

mod config;
pub use config::{AppConfig, CONFIG_PATH_ENV, CodeboxConfig, ConfigError, EntryConfig};

#[derive(Debug)]
pub struct App {
    entry: CodeEntryRow,
    preset: PresetCodes,
    ui_options: UiOptions,
    /// Last complete code reported, so completion is logged once per code.
    announced: Option<String>,
    should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new(None)
    }
}

impl App {
    #[must_use]
    pub fn new(config: Option<&CodeboxConfig>) -> Self {
        let (entry, preset, ui_options) = match config {
            Some(cfg) => (
                CodeEntryRow::with_policies(cfg.filter_policy(), cfg.edge_policy()),
                cfg.preset(),
                cfg.ui_options(),
            ),
            None => (
                CodeEntryRow::new(),
                PresetCodes::default(),
                UiOptions::default(),
            ),
        };
        info!(
            filter = entry.filter_policy().as_str(),
            edge = entry.edge_policy().as_str(),
            "Code entry ready"
        );
        Self {
            entry,
            preset,
            ui_options,
            announced: None,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn entry(&self) -> &CodeEntryRow {
        &self.entry
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    #[must_use]
    pub fn preset(&self) -> &PresetCodes {
        &self.preset
    }

    /// The full code once every cell holds one character.
    #[must_use]
    pub fn completed_code(&self) -> Option<String> {
        self.entry.code_string()
    }

    /// Proposes `replacement` to the focused cell.
    ///
    /// Key presses arrive as one character, deletions as `""`, and pastes
    /// verbatim. Returns `None` when no cell has focus.
    pub fn propose(&mut self, replacement: &str) -> Option<EditDecision> {
        let cell = self.entry.focused().map(SlotIndex::get);
        let Some(decision) = self.entry.edit_focused(replacement) else {
            debug!("Edit dropped: no cell focused");
            return None;
        };
        debug!(
            ?cell,
            ?decision,
            focused = ?self.entry.focused().map(SlotIndex::get),
            "Cell edit"
        );
        self.note_completion();
        Some(decision)
    }

    pub fn enter_char(&mut self, c: char) -> Option<EditDecision> {
        let mut buf = [0u8; 4];
        self.propose(c.encode_utf8(&mut buf))
    }

    pub fn delete(&mut self) -> Option<EditDecision> {
        self.propose("")
    }

    pub fn paste(&mut self, text: &str) -> Option<EditDecision> {
        self.propose(text)
    }

    /// Fills every cell from the preset. Focus is unchanged.
    pub fn set_codes(&mut self) {
        self.entry.set_codes(&self.preset);
        debug!(preset = %self.preset.joined(), "Set codes");
        self.note_completion();
    }

    pub fn clear(&mut self) {
        self.entry.clear();
        self.announced = None;
        debug!("Cleared code entry");
    }

    pub fn focus_next(&mut self) {
        self.entry.focus_next();
    }

    pub fn focus_prev(&mut self) {
        self.entry.focus_prev();
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    fn note_completion(&mut self) {
        let code = self.entry.code_string();
        if code.is_some() && code != self.announced {
            info!(length = CODE_LENGTH, "Verification code complete");
        }
        self.announced = code;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with(toml: &str) -> App {
        let config: CodeboxConfig = toml::from_str(toml).expect("valid config");
        App::new(Some(&config))
    }

    #[test]
    fn typing_advances_focus() {
        let mut app = App::default();
        assert_eq!(
            app.enter_char('3'),
            Some(EditDecision::Replaced("3".to_string()))
        );
        assert_eq!(app.entry().code(), ["3", "", "", "", "", ""]);
        assert_eq!(app.entry().focused(), SlotIndex::new(1));
    }

    #[test]
    fn delete_moves_back() {
        let mut app = App::default();
        app.enter_char('3');
        assert_eq!(app.delete(), Some(EditDecision::Deleted));
        assert_eq!(app.entry().code(), ["3", "", "", "", "", ""]);
        assert_eq!(app.entry().focused(), Some(SlotIndex::FIRST));
    }

    #[test]
    fn paste_fills_only_the_focused_cell() {
        let mut app = App::default();
        assert_eq!(app.paste("123456"), Some(EditDecision::Passthrough));
        assert_eq!(app.entry().code(), ["123456", "", "", "", "", ""]);
        assert_eq!(app.entry().focused(), Some(SlotIndex::FIRST));
        assert_eq!(app.completed_code(), None);
    }

    #[test]
    fn pasted_line_break_does_not_fill_a_cell() {
        let mut app = App::default();
        for c in "12345".chars() {
            app.enter_char(c);
        }
        assert_eq!(app.paste("\r\n"), Some(EditDecision::Rejected));
        assert_eq!(app.entry().focused(), Some(SlotIndex::LAST));
        assert_eq!(app.completed_code(), None);
    }

    #[test]
    fn typing_then_deleting_in_every_cell() {
        let mut app = App::default();
        for i in 0..CODE_LENGTH {
            let cell = SlotIndex::new(i).unwrap();
            app.entry.focus(cell);
            app.enter_char('9');
            assert_eq!(app.entry().cell(cell).text(), "9");
            app.entry.focus(cell);
            app.delete();
            assert_eq!(app.entry().cell(cell).text(), "");
        }
    }

    #[test]
    fn set_codes_uses_configured_preset() {
        let mut app = app_with("[entry]\npreset = \"424242\"\n");
        app.focus_next();
        app.set_codes();
        assert_eq!(app.completed_code().as_deref(), Some("424242"));
        assert_eq!(app.entry().focused(), SlotIndex::new(1));
    }

    #[test]
    fn release_policy_drops_edits_after_last_cell() {
        let mut app = app_with("[entry]\nedge = \"release\"\n");
        for c in "123456".chars() {
            app.enter_char(c);
        }
        assert_eq!(app.completed_code().as_deref(), Some("123456"));
        assert_eq!(app.entry().focused(), None);
        assert_eq!(app.enter_char('7'), None);
        assert_eq!(app.completed_code().as_deref(), Some("123456"));
    }

    #[test]
    fn digits_policy_from_config() {
        let mut app = app_with("[entry]\nfilter = \"digits\"\n");
        assert_eq!(app.enter_char('z'), Some(EditDecision::Rejected));
        assert_eq!(app.entry().focused(), Some(SlotIndex::FIRST));
    }

    #[test]
    fn clear_resets_everything() {
        let mut app = App::default();
        app.set_codes();
        app.focus_next();
        app.clear();
        assert_eq!(app.entry().code(), ["", "", "", "", "", ""]);
        assert_eq!(app.entry().focused(), Some(SlotIndex::FIRST));
    }

    #[test]
    fn quit_flag() {
        let mut app = App::default();
        assert!(!app.should_quit());
        app.request_quit();
        assert!(app.should_quit());
    }
}
