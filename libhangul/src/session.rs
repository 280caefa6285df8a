//! Per-input-context session state machine.
//!
//! A `HangulSession` owns one composer, the composition buffer of decided
//! but unflushed text, and the current hanja candidate list. Key events are
//! processed to completion one at a time; the configuration is read fresh on
//! every event so reconfiguration takes effect on the next keystroke.
//!
//! Keys are expected in normalized form: Shift is already folded into
//! printable symbols (`Shift+q` arrives as `Char('Q')` with no Shift state),
//! while lock modifiers such as CapsLock stay in the state set.

use crate::composer::{Composer, OrderingGuard};
use crate::config::HangulConfig;
use libhangul_core::utils;
use libhangul_core::{
    CandidateDisplay, CandidateList, Capabilities, HanjaDictionary, HostContext, Key, KeyEvent,
    KeySym, LookupMethod, Modifiers, PreeditDisplay, PreeditTarget,
};
use tracing::debug;

/// Composition buffer cap; reaching it forces a flush before the next key.
const MAX_BUFFER: usize = 40;

/// Scalar window of surrounding text considered for suffix lookups.
const LOOKUP_WINDOW: i64 = 64;

fn selection_keys() -> Vec<Key> {
    "1234567890"
        .chars()
        .map(|c| Key::new(KeySym::Char(c)))
        .collect()
}

/// CapsLock flips the case the user intended; undo it before the symbol
/// reaches the composer so the jamo case mapping stays right.
fn invert_capslock(key: &Key) -> KeySym {
    if !key.states.contains(Modifiers::CAPS_LOCK) {
        return key.sym;
    }
    if let KeySym::Char(c) = key.sym {
        if ('A'..='z').contains(&c) {
            if c.is_ascii_uppercase() {
                return KeySym::Char(c.to_ascii_lowercase());
            }
            if c.is_ascii_lowercase() {
                return KeySym::Char(c.to_ascii_uppercase());
            }
        }
    }
    key.sym
}

/// State for one focused text input.
pub struct HangulSession {
    composer: Composer,
    /// Decided text not yet flushed to the host (word-commit / hanja mode).
    buffer: Vec<char>,
    candidates: Option<CandidateList>,
    /// Method that produced the current candidate list; only meaningful
    /// while candidates exist.
    last_lookup: LookupMethod,
}

impl HangulSession {
    pub fn new(config: &HangulConfig) -> Self {
        Self {
            composer: Self::build_composer(config),
            buffer: Vec::new(),
            candidates: None,
            last_lookup: LookupMethod::Prefix,
        }
    }

    fn build_composer(config: &HangulConfig) -> Composer {
        Composer::new(
            config.keyboard,
            Box::new(OrderingGuard {
                auto_reorder: config.auto_reorder,
            }),
        )
    }

    /// Rebuild the composer after reconfiguration, discarding pending state.
    pub fn configure(&mut self, config: &HangulConfig) {
        self.composer = Self::build_composer(config);
    }

    /// Decided buffer text.
    pub fn buffer_text(&self) -> String {
        self.buffer.iter().collect()
    }

    /// Live composer preedit.
    pub fn composing_text(&self) -> String {
        self.composer.preedit()
    }

    pub fn candidate_list(&self) -> Option<&CandidateList> {
        self.candidates.as_ref()
    }

    /// Process one key event. Returns true when the event was consumed.
    pub fn key_event(
        &mut self,
        event: &KeyEvent,
        config: &HangulConfig,
        dict: &HanjaDictionary,
        host: &mut HostContext,
    ) -> bool {
        if event.release {
            return false;
        }
        let key = &event.key;

        if key.check_key_list(&config.hanja_mode_toggle_key) {
            if self.candidates.is_none() {
                self.update_lookup(true, config, dict, host);
            } else {
                self.cleanup();
            }
            self.update_ui(host);
            return true;
        }

        let sym = key.sym;

        // Bare Shift never disturbs composition.
        if matches!(sym, KeySym::ShiftL | KeySym::ShiftR) {
            return false;
        }

        // A modifier that participates in a configured binding passes
        // through so the chord can still be delivered.
        let bound = config.bound_modifiers();
        let modifier_syms = [
            (Modifiers::CTRL, KeySym::ControlL, KeySym::ControlR),
            (Modifiers::ALT, KeySym::AltL, KeySym::AltR),
            (Modifiers::SHIFT, KeySym::ShiftL, KeySym::ShiftR),
            (Modifiers::SUPER, KeySym::SuperL, KeySym::SuperR),
            (Modifiers::HYPER, KeySym::HyperL, KeySym::HyperR),
        ];
        for (state, left, right) in modifier_syms {
            if bound.contains(state) && (sym == left || sym == right) {
                return false;
            }
        }

        // Candidate window interaction.
        if self.candidates.as_ref().is_some_and(|l| !l.is_empty()) {
            if key.check_key_list(&config.prev_page_key) {
                if let Some(list) = self.candidates.as_mut() {
                    list.prev_page();
                }
                self.sync_candidates(host);
                host.request_ui_update();
                return true;
            }
            if key.check_key_list(&config.next_page_key) {
                if let Some(list) = self.candidates.as_mut() {
                    list.next_page();
                }
                self.sync_candidates(host);
                host.request_ui_update();
                return true;
            }
            if key.check_key_list(&config.prev_candidate_key) {
                if let Some(list) = self.candidates.as_mut() {
                    list.prev_candidate();
                }
                self.sync_candidates(host);
                host.request_ui_update();
                return true;
            }
            if key.check_key_list(&config.next_candidate_key) {
                if let Some(list) = self.candidates.as_mut() {
                    list.next_candidate();
                }
                self.sync_candidates(host);
                host.request_ui_update();
                return true;
            }

            if let Some(pos) = key.key_list_index(&selection_keys()) {
                let target = self
                    .candidates
                    .as_ref()
                    .and_then(|l| l.index_on_page(pos));
                if let Some(index) = target {
                    self.select(index, config, dict, host);
                }
                return true;
            }

            if sym == KeySym::Return {
                let cursor = self.candidates.as_ref().map(|l| l.cursor()).unwrap_or(0);
                let len = self.candidates.as_ref().map(|l| l.len()).unwrap_or(0);
                if cursor < len {
                    self.select(cursor, config, dict, host);
                    return true;
                }
            }

            // Any other key dismisses the window unless hanja mode keeps it
            // in sync with the composition.
            if !config.hanja_mode {
                self.cleanup();
            }
        }

        if key.states.intersects(Modifiers::held_mask()) {
            self.flush(host);
            self.update_ui(host);
            return false;
        }

        let mut key_used = false;
        if sym == KeySym::Backspace {
            key_used = self.composer.backspace();
            if !key_used && !self.buffer.is_empty() {
                self.buffer.pop();
                key_used = true;
            }
        } else {
            if self.buffer.len() >= MAX_BUFFER {
                self.flush(host);
            }

            let sym = invert_capslock(key);
            if let KeySym::Char(c) = sym {
                key_used = self.composer.process(c);
            }

            let decided = self.composer.take_commit();
            if config.word_commit || config.hanja_mode {
                self.buffer.extend(decided.chars());
                if self.composer.is_empty() && !self.buffer.is_empty() {
                    let text: String = self.buffer.drain(..).collect();
                    host.commit(&text);
                }
            } else if !decided.is_empty() {
                host.commit(&decided);
            }

            // Unused symbols must not leave stale buffered text behind.
            if !key_used {
                self.flush(host);
            }
        }

        if config.hanja_mode {
            self.update_lookup(false, config, dict, host);
        } else {
            self.cleanup();
        }

        self.update_ui(host);
        key_used
    }

    /// Select the candidate at `index` and perform the text surgery that
    /// removes the matched span from buffer, composer preedit or host text.
    pub fn select(
        &mut self,
        index: usize,
        config: &HangulConfig,
        dict: &HanjaDictionary,
        host: &mut HostContext,
    ) {
        let entry = self
            .candidates
            .as_ref()
            .and_then(|l| l.get(index))
            .cloned();
        let Some(entry) = entry else {
            self.reset(host);
            return;
        };

        let mut key_len = utils::scalar_len(&entry.key) as i64;
        let buffer_len = self.buffer.len() as i64;
        let preedit_len = utils::scalar_len(&self.composer.preedit()) as i64;

        let mut touched_surrounding = false;
        if self.last_lookup == LookupMethod::Prefix {
            if buffer_len == 0 && preedit_len == 0 {
                // The matched span came entirely from host surrounding text.
                if key_len > 0 {
                    host.delete_surrounding(-key_len, key_len as usize);
                    touched_surrounding = true;
                }
            } else {
                if key_len > 0 {
                    let n = key_len.min(buffer_len) as usize;
                    self.buffer.drain(..n);
                    key_len -= buffer_len;
                }
                if key_len > 0 {
                    self.composer.reset();
                    key_len -= preedit_len;
                }
            }
        } else {
            if preedit_len > 0 {
                self.composer.reset();
                key_len -= preedit_len;
            }
            if key_len > buffer_len {
                self.buffer.clear();
                key_len -= buffer_len;
            } else if key_len > 0 {
                self.buffer.drain(..key_len as usize);
                key_len = 0;
            }
            if self.last_lookup != LookupMethod::Exact && key_len > 0 {
                host.delete_surrounding(-key_len, key_len as usize);
                touched_surrounding = true;
            }
        }

        host.commit(&entry.value);
        if touched_surrounding {
            // Host text changed shape; cached match positions are stale.
            self.cleanup();
        }
        self.update_lookup(false, config, dict, host);
        self.update_ui(host);
    }

    /// Recompute the candidate list. `check_surrounding` allows falling back
    /// to host surrounding text when the local composition is empty.
    fn update_lookup(
        &mut self,
        check_surrounding: bool,
        config: &HangulConfig,
        dict: &HanjaDictionary,
        host: &HostContext,
    ) {
        self.candidates = None;

        let mut local = self.buffer_text();
        local.push_str(&self.composer.preedit());

        let key: String;
        let method: LookupMethod;
        if !local.is_empty() {
            if config.word_commit || config.hanja_mode {
                key = local;
                method = LookupMethod::Prefix;
            } else {
                let cursor = host.surrounding.cursor as i64;
                let before =
                    utils::sub_scalars(&host.surrounding.text, cursor - LOOKUP_WINDOW, cursor);
                key = if before.is_empty() {
                    local
                } else {
                    before + &local
                };
                method = LookupMethod::Suffix;
            }
        } else if check_surrounding {
            if !host.capabilities.contains(Capabilities::SURROUNDING_TEXT)
                || !host.surrounding.valid
            {
                debug!("no usable surrounding text, skipping lookup");
                return;
            }
            let cursor = host.surrounding.cursor as i64;
            let anchor = host.surrounding.anchor as i64;
            if cursor != anchor {
                // A selection in the surrounding text is looked up as-is.
                key = utils::sub_scalars(&host.surrounding.text, cursor, anchor);
                method = LookupMethod::Exact;
            } else {
                key = utils::sub_scalars(&host.surrounding.text, cursor - LOOKUP_WINDOW, cursor);
                method = LookupMethod::Suffix;
            }
        } else {
            return;
        }

        if key.is_empty() {
            return;
        }

        let entries = dict.lookup(&key, method);
        debug!(key = %key, ?method, hits = entries.len(), "hanja lookup");
        if !entries.is_empty() {
            self.candidates = Some(CandidateList::new(entries, config.page_size));
        }
        self.last_lookup = method;
    }

    /// Dismiss the candidate list.
    pub fn cleanup(&mut self) {
        self.candidates = None;
    }

    /// Commit everything pending (buffer plus live preedit) to the host.
    pub fn flush(&mut self, host: &mut HostContext) {
        self.cleanup();
        let tail = self.composer.flush();
        self.buffer.extend(tail.chars());
        if self.buffer.is_empty() {
            return;
        }
        let text: String = self.buffer.drain(..).collect();
        host.commit(&text);
    }

    /// Discard all pending state without committing.
    pub fn reset(&mut self, host: &mut HostContext) {
        self.buffer.clear();
        self.composer.reset();
        self.cleanup();
        self.update_ui(host);
    }

    fn sync_candidates(&self, host: &mut HostContext) {
        host.candidates = self
            .candidates
            .as_ref()
            .filter(|l| !l.is_empty())
            .map(CandidateDisplay::from_list);
    }

    /// Push preedit and candidate display state to the host.
    pub fn update_ui(&mut self, host: &mut HostContext) {
        let decided = self.buffer_text();
        let composing = self.composer.preedit();
        if decided.is_empty() && composing.is_empty() {
            host.preedit = None;
        } else {
            let cursor = utils::scalar_len(&decided) + utils::scalar_len(&composing);
            let target = if host.capabilities.contains(Capabilities::PREEDIT) {
                PreeditTarget::Client
            } else {
                PreeditTarget::Panel
            };
            host.preedit = Some(PreeditDisplay {
                decided,
                composing,
                cursor,
                target,
            });
        }
        self.sync_candidates(host);
        host.request_ui_update();
    }
}
