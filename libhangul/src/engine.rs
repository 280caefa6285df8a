//! Engine tying dictionary, configuration and sessions together.
//!
//! One `HangulEngine` serves the whole process: it owns the shared hanja
//! dictionary and the current configuration, and keeps one `HangulSession`
//! per input context, keyed by an opaque context id. Sessions are created on
//! the first event for an id and dropped on release.

use crate::config::HangulConfig;
use crate::session::HangulSession;
use ahash::AHashMap;
use anyhow::{Context, Result};
use libhangul_core::{HanjaDictionary, HostContext, KeyEvent};
use std::path::Path;
use tracing::info;

pub struct HangulEngine {
    dict: HanjaDictionary,
    config: HangulConfig,
    sessions: AHashMap<u64, HangulSession>,
}

impl HangulEngine {
    /// Construct from table files. A missing or unreadable main table is a
    /// fatal error; the engine refuses to start without it.
    pub fn new<P: AsRef<Path>>(
        config: HangulConfig,
        main_table: P,
        symbol_table: Option<P>,
    ) -> Result<Self> {
        let dict = HanjaDictionary::load(main_table, symbol_table)
            .context("load hanja dictionary")?;
        info!(entries = dict.main().len(), "hangul engine ready");
        Ok(Self {
            dict,
            config,
            sessions: AHashMap::new(),
        })
    }

    /// Construct from an already-built dictionary.
    pub fn with_dictionary(config: HangulConfig, dict: HanjaDictionary) -> Self {
        Self {
            dict,
            config,
            sessions: AHashMap::new(),
        }
    }

    pub fn config(&self) -> &HangulConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &HanjaDictionary {
        &self.dict
    }

    /// Replace the configuration. Live sessions get their composers rebuilt
    /// so layout and ordering changes apply immediately; the dictionary is
    /// loaded once per engine lifetime and stays.
    pub fn set_config(&mut self, config: HangulConfig) {
        self.config = config;
        for session in self.sessions.values_mut() {
            session.configure(&self.config);
        }
    }

    pub fn session(&self, id: u64) -> Option<&HangulSession> {
        self.sessions.get(&id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Deliver a key event for the input context `id`, creating its session
    /// on first use. Returns true when the event was consumed.
    pub fn key_event(&mut self, id: u64, event: &KeyEvent, host: &mut HostContext) -> bool {
        host.begin_event();
        let session = self
            .sessions
            .entry(id)
            .or_insert_with(|| HangulSession::new(&self.config));
        session.key_event(event, &self.config, &self.dict, host)
    }

    /// Select a candidate by global index for the input context `id`.
    pub fn select_candidate(&mut self, id: u64, index: usize, host: &mut HostContext) {
        host.begin_event();
        if let Some(session) = self.sessions.get_mut(&id) {
            session.select(index, &self.config, &self.dict, host);
        }
    }

    /// Commit pending text for `id`, e.g. when focus moves away.
    pub fn flush(&mut self, id: u64, host: &mut HostContext) {
        host.begin_event();
        if let Some(session) = self.sessions.get_mut(&id) {
            session.flush(host);
            session.update_ui(host);
        }
    }

    /// Discard pending state for `id` without committing.
    pub fn reset(&mut self, id: u64, host: &mut HostContext) {
        host.begin_event();
        if let Some(session) = self.sessions.get_mut(&id) {
            session.reset(host);
        }
    }

    /// Drop the session for a released input context.
    pub fn release_session(&mut self, id: u64) {
        self.sessions.remove(&id);
    }
}
