//! libhangul crate root
//!
//! Korean input method core: the hangul composition automaton, the
//! per-input-context session state machine, and hanja candidate lookup over
//! the shared dictionary from `libhangul-core`.
//!
//! Public API exported here:
//! - `Composer`, `TransitionGuard`, `OrderingGuard` from `composer`
//! - `HangulSession` from `session`
//! - `HangulEngine` from `engine`
//! - `HangulConfig` from `config`
//! - `KeyboardLayout` from `layout`

pub mod composer;
pub mod config;
pub mod engine;
pub mod jamo;
pub mod layout;
pub mod session;

pub use composer::{Composer, OrderingGuard, Syllable, TransitionGuard};
pub use config::HangulConfig;
pub use engine::HangulEngine;
pub use layout::KeyboardLayout;
pub use session::HangulSession;

// Re-export the core types callers need to drive the engine.
pub use libhangul_core::{
    CandidateDisplay, CandidateEntry, CandidateList, Capabilities, HanjaDictionary, HanjaTable,
    HostContext, Key, KeyEvent, KeySym, LookupMethod, Modifiers, PreeditDisplay, PreeditTarget,
    SurroundingDelete, SurroundingText,
};
