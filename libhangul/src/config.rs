//! Engine configuration.
//!
//! A `HangulConfig` is read at the start of every event, so reconfiguring
//! the engine mid-session simply means the next event sees the new values.
//! Key bindings are plain key lists matched with `Key::check_key_list`.

use crate::layout::KeyboardLayout;
use anyhow::{Context, Result};
use libhangul_core::{Key, KeySym, Modifiers};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HangulConfig {
    /// Keyboard layout used to build each session's composer.
    pub keyboard: KeyboardLayout,

    /// Allow out-of-order jamo to be slotted into place. When disabled the
    /// composer enforces strict choseong-jungseong-jongseong ordering.
    pub auto_reorder: bool,

    /// Defer commits until a whole word is decided.
    pub word_commit: bool,

    /// Keep the hanja candidate window in sync with the composition.
    pub hanja_mode: bool,

    pub hanja_mode_toggle_key: Vec<Key>,
    pub prev_page_key: Vec<Key>,
    pub next_page_key: Vec<Key>,
    pub prev_candidate_key: Vec<Key>,
    pub next_candidate_key: Vec<Key>,

    /// Candidate window page size.
    pub page_size: usize,
}

impl Default for HangulConfig {
    fn default() -> Self {
        Self {
            keyboard: KeyboardLayout::Dubeolsik,
            auto_reorder: true,
            word_commit: false,
            hanja_mode: false,
            hanja_mode_toggle_key: vec![Key::new(KeySym::Hanja), Key::new(KeySym::F(9))],
            prev_page_key: vec![Key::new(KeySym::Up)],
            next_page_key: vec![Key::new(KeySym::Down)],
            prev_candidate_key: vec![Key::with_states(KeySym::Tab, Modifiers::SHIFT)],
            next_candidate_key: vec![Key::new(KeySym::Tab)],
            page_size: 10,
        }
    }
}

impl HangulConfig {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).context("serialize config")?;
        std::fs::write(path, content).with_context(|| format!("write config {}", path.display()))
    }

    /// The union of modifier states used by any configured binding. A bare
    /// press of one of these modifiers must pass through untouched so the
    /// full chord can still arrive.
    pub fn bound_modifiers(&self) -> Modifiers {
        let mut states = Modifiers::empty();
        for list in [
            &self.hanja_mode_toggle_key,
            &self.prev_page_key,
            &self.next_page_key,
            &self.prev_candidate_key,
            &self.next_candidate_key,
        ] {
            for key in list {
                states |= key.states;
            }
        }
        states
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HangulConfig::default();
        assert_eq!(config.keyboard, KeyboardLayout::Dubeolsik);
        assert!(config.auto_reorder);
        assert!(!config.word_commit);
        assert!(!config.hanja_mode);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.hanja_mode_toggle_key.len(), 2);
    }

    #[test]
    fn test_bound_modifiers_includes_shift_from_prev_candidate() {
        let config = HangulConfig::default();
        assert!(config.bound_modifiers().contains(Modifiers::SHIFT));
        assert!(!config.bound_modifiers().contains(Modifiers::CTRL));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = HangulConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: HangulConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.keyboard, config.keyboard);
        assert_eq!(parsed.hanja_mode_toggle_key, config.hanja_mode_toggle_key);
        assert_eq!(parsed.page_size, config.page_size);
    }
}
