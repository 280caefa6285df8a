//! The hangul composition automaton.
//!
//! `Composer` consumes one typed symbol at a time and maintains a single
//! in-flight syllable (the live preedit). Completed syllables accumulate in
//! the commit output until the caller drains them. A `TransitionGuard`
//! decides whether a jamo may be placed into the current syllable; the
//! default `OrderingGuard` implements strict syllable-order discipline when
//! auto-reorder is disabled.

use crate::jamo;
use crate::layout::KeyboardLayout;

/// The three slots of the syllable being composed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Syllable {
    cho: Option<u32>,
    jung: Option<u32>,
    jong: Option<u32>,
}

impl Syllable {
    pub fn has_choseong(&self) -> bool {
        self.cho.is_some()
    }

    pub fn has_jungseong(&self) -> bool {
        self.jung.is_some()
    }

    pub fn has_jongseong(&self) -> bool {
        self.jong.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.cho.is_none() && self.jung.is_none() && self.jong.is_none()
    }

    /// Render the syllable as displayed in the preedit.
    fn render(&self) -> Option<String> {
        match (self.cho, self.jung) {
            (Some(l), Some(v)) => {
                jamo::compose_syllable(l, v, self.jong.unwrap_or(0)).map(|c| c.to_string())
            }
            (Some(l), None) => jamo::cho_to_compat(l).map(|c| c.to_string()),
            (None, Some(v)) => jamo::jung_to_compat(v).map(|c| c.to_string()),
            (None, None) => None,
        }
    }
}

/// Predicate consulted before a jamo is placed into the current syllable.
pub trait TransitionGuard {
    fn allow(&self, jamo: char, syllable: &Syllable) -> bool;
}

/// Jamo-ordering validation. With `auto_reorder` enabled everything is
/// allowed (out-of-order jamo are slotted into place); with it disabled a
/// leading consonant is rejected once a vowel or trailing consonant exists,
/// and a vowel is rejected once a trailing consonant exists.
#[derive(Debug, Clone, Copy)]
pub struct OrderingGuard {
    pub auto_reorder: bool,
}

impl TransitionGuard for OrderingGuard {
    fn allow(&self, jamo: char, syllable: &Syllable) -> bool {
        if self.auto_reorder {
            return true;
        }
        if jamo::is_choseong(jamo) && (syllable.has_jungseong() || syllable.has_jongseong()) {
            return false;
        }
        if jamo::is_jungseong(jamo) && syllable.has_jongseong() {
            return false;
        }
        true
    }
}

/// Which slot a keystroke modified, with the value it replaced. Drives
/// jamo-wise backspace.
#[derive(Debug, Clone, Copy)]
enum Edit {
    Cho,
    Jung(Option<u32>),
    Jong(Option<u32>),
}

/// Per-layout composition automaton with preedit and commit outputs.
pub struct Composer {
    layout: KeyboardLayout,
    syllable: Syllable,
    history: Vec<Edit>,
    commit: String,
    guard: Box<dyn TransitionGuard>,
}

impl Composer {
    pub fn new(layout: KeyboardLayout, guard: Box<dyn TransitionGuard>) -> Self {
        Self {
            layout,
            syllable: Syllable::default(),
            history: Vec::new(),
            commit: String::new(),
            guard,
        }
    }

    pub fn layout(&self) -> KeyboardLayout {
        self.layout
    }

    /// Feed one typed symbol. Returns false when the symbol is outside the
    /// layout's alphabet; the automaton state is untouched in that case.
    pub fn process(&mut self, ch: char) -> bool {
        let Some(jamo) = self.layout.map_key(ch) else {
            return false;
        };
        if let Some(v) = jamo::jung_index(jamo) {
            self.feed_vowel(jamo, v);
        } else {
            self.feed_consonant(jamo);
        }
        true
    }

    fn feed_consonant(&mut self, jamo: char) {
        // Trailing slot, when the syllable already has a vowel.
        if self.syllable.cho.is_some() && self.syllable.jung.is_some() {
            match self.syllable.jong {
                None => {
                    if let Some(t) = jamo::jong_index(jamo) {
                        self.syllable.jong = Some(t);
                        self.history.push(Edit::Jong(None));
                        return;
                    }
                }
                Some(t0) => {
                    if let Some(t1) = jamo::jong_index(jamo) {
                        if let Some(combined) = jamo::combine_jongseong(t0, t1) {
                            self.syllable.jong = Some(combined);
                            self.history.push(Edit::Jong(Some(t0)));
                            return;
                        }
                    }
                }
            }
            self.complete_syllable();
        }

        let Some(l) = jamo::cho_index(jamo) else {
            // A consonant that cannot lead a syllable; decide it alone.
            self.complete_syllable();
            self.commit.push(jamo);
            return;
        };
        if self.syllable.cho.is_some() || !self.guard.allow(jamo, &self.syllable) {
            self.complete_syllable();
        }
        self.syllable.cho = Some(l);
        self.history.push(Edit::Cho);
    }

    fn feed_vowel(&mut self, jamo: char, v: u32) {
        if let Some(v0) = self.syllable.jung {
            if let Some(t) = self.syllable.jong {
                // The trailing consonant moves to the next syllable.
                let (keep, carry) = match jamo::split_jongseong(t) {
                    Some((keep, cho)) => (Some(keep), Some(cho)),
                    None => (None, jamo::jongseong_to_choseong(t)),
                };
                self.syllable.jong = keep;
                self.complete_syllable();
                if let Some(cho) = carry {
                    self.syllable.cho = Some(cho);
                    self.history.push(Edit::Cho);
                }
                self.syllable.jung = Some(v);
                self.history.push(Edit::Jung(None));
                return;
            }
            if let Some(combined) = jamo::combine_jungseong(v0, v) {
                self.syllable.jung = Some(combined);
                self.history.push(Edit::Jung(Some(v0)));
                return;
            }
            self.complete_syllable();
            self.syllable.jung = Some(v);
            self.history.push(Edit::Jung(None));
            return;
        }

        if !self.guard.allow(jamo, &self.syllable) {
            self.complete_syllable();
        }
        self.syllable.jung = Some(v);
        self.history.push(Edit::Jung(None));
    }

    fn complete_syllable(&mut self) {
        if let Some(s) = self.syllable.render() {
            self.commit.push_str(&s);
        }
        self.syllable = Syllable::default();
        self.history.clear();
    }

    /// Remove the most recently added jamo from the live preedit. Returns
    /// false when there is nothing to erase.
    pub fn backspace(&mut self) -> bool {
        let Some(edit) = self.history.pop() else {
            return false;
        };
        match edit {
            Edit::Cho => self.syllable.cho = None,
            Edit::Jung(prev) => self.syllable.jung = prev,
            Edit::Jong(prev) => self.syllable.jong = prev,
        }
        true
    }

    /// The live preedit rendering of the in-flight syllable.
    pub fn preedit(&self) -> String {
        self.syllable.render().unwrap_or_default()
    }

    /// Drain syllables decided since the last call.
    pub fn take_commit(&mut self) -> String {
        std::mem::take(&mut self.commit)
    }

    /// Force the live preedit into finalized text and clear all state.
    pub fn flush(&mut self) -> String {
        let mut out = std::mem::take(&mut self.commit);
        if let Some(s) = self.syllable.render() {
            out.push_str(&s);
        }
        self.syllable = Syllable::default();
        self.history.clear();
        out
    }

    /// Discard the live preedit and any undrained commit output.
    pub fn reset(&mut self) {
        self.syllable = Syllable::default();
        self.history.clear();
        self.commit.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.syllable.is_empty()
    }

    pub fn has_jungseong(&self) -> bool {
        self.syllable.has_jungseong()
    }

    pub fn has_jongseong(&self) -> bool {
        self.syllable.has_jongseong()
    }
}
