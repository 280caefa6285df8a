//! Host context for platform communication.
//!
//! `HostContext` is a plain data container shared between the engine and the
//! embedding platform. The platform fills in the input side (capabilities and
//! the surrounding-text snapshot) before delivering an event; the engine fills
//! in the output side while processing it. No callbacks, no traits — platform
//! code reads and writes fields directly.
//!
//! Output ordering: when an event produces both a surrounding-text deletion
//! and commit text, the platform must apply the deletion first, then the
//! commit, then refresh preedit and candidate display.

use crate::candidate::CandidateList;
use bitflags::bitflags;

bitflags! {
    /// Capabilities reported by the focused input context.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capabilities: u32 {
        /// The host can report and edit text around the cursor.
        const SURROUNDING_TEXT = 1 << 0;
        /// The host renders preedit inline; otherwise a panel preedit is used.
        const PREEDIT = 1 << 1;
    }
}

/// Snapshot of the document text around the cursor.
///
/// `cursor` and `anchor` are scalar-value offsets into `text`; they differ
/// when the host has a selection. `valid` is false when the host could not
/// produce a usable snapshot.
#[derive(Debug, Clone, Default)]
pub struct SurroundingText {
    pub text: String,
    pub cursor: usize,
    pub anchor: usize,
    pub valid: bool,
}

/// Request to delete host text relative to the cursor.
///
/// `offset` is the (negative) scalar offset from the cursor at which the
/// deletion starts; `len` is the number of scalar values to remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurroundingDelete {
    pub offset: i64,
    pub len: usize,
}

/// Where the preedit should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreeditTarget {
    /// Inline in the client, available when `Capabilities::PREEDIT` is set.
    Client,
    /// In the input panel, as a fallback.
    Panel,
}

/// Two-part preedit display request.
///
/// `decided` is buffered text already decided by the automaton; `composing`
/// is the live syllable and should be highlighted. The cursor sits at the end
/// of both parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreeditDisplay {
    pub decided: String,
    pub composing: String,
    pub cursor: usize,
    pub target: PreeditTarget,
}

/// Candidate window display request: the current page plus cursor position.
#[derive(Debug, Clone)]
pub struct CandidateDisplay {
    pub entries: Vec<String>,
    pub cursor: usize,
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
}

impl CandidateDisplay {
    pub fn from_list(list: &CandidateList) -> Self {
        Self {
            entries: list
                .current_page_entries()
                .iter()
                .map(|e| e.value.clone())
                .collect(),
            cursor: list.cursor_in_page(),
            page: list.current_page(),
            page_count: list.page_count(),
            page_size: list.page_size(),
        }
    }
}

/// Per-input-context communication area.
#[derive(Debug, Clone)]
pub struct HostContext {
    pub capabilities: Capabilities,
    pub surrounding: SurroundingText,

    /// Text committed to the application during the current event.
    pub commit_text: String,
    /// At most one surrounding-text deletion per event.
    pub surrounding_delete: Option<SurroundingDelete>,
    /// Current preedit display, `None` when nothing is being composed.
    pub preedit: Option<PreeditDisplay>,
    /// Current candidate window, `None` when dismissed.
    pub candidates: Option<CandidateDisplay>,
    /// Set when the platform should repaint the input panel.
    pub ui_update_requested: bool,
}

impl HostContext {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            surrounding: SurroundingText::default(),
            commit_text: String::new(),
            surrounding_delete: None,
            preedit: None,
            candidates: None,
            ui_update_requested: false,
        }
    }

    /// Replace the surrounding-text snapshot.
    pub fn set_surrounding(&mut self, text: &str, cursor: usize, anchor: usize) {
        self.surrounding = SurroundingText {
            text: text.to_string(),
            cursor,
            anchor,
            valid: true,
        };
    }

    /// Clear the per-event outputs. Called by the engine before processing.
    pub fn begin_event(&mut self) {
        self.commit_text.clear();
        self.surrounding_delete = None;
        self.ui_update_requested = false;
    }

    pub fn commit(&mut self, text: &str) {
        self.commit_text.push_str(text);
    }

    pub fn delete_surrounding(&mut self, offset: i64, len: usize) {
        self.surrounding_delete = Some(SurroundingDelete { offset, len });
    }

    pub fn request_ui_update(&mut self) {
        self.ui_update_requested = true;
    }

    /// Take the committed text, leaving it empty.
    pub fn take_commit(&mut self) -> String {
        std::mem::take(&mut self.commit_text)
    }

    pub fn has_commit(&self) -> bool {
        !self.commit_text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_event_clears_outputs() {
        let mut host = HostContext::new(Capabilities::SURROUNDING_TEXT);
        host.commit("한");
        host.delete_surrounding(-1, 1);
        host.request_ui_update();

        host.begin_event();
        assert!(!host.has_commit());
        assert!(host.surrounding_delete.is_none());
        assert!(!host.ui_update_requested);
    }

    #[test]
    fn test_commit_appends() {
        let mut host = HostContext::new(Capabilities::empty());
        host.commit("한");
        host.commit("글");
        assert_eq!(host.take_commit(), "한글");
        assert!(!host.has_commit());
    }
}
