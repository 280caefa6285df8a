//! Hanja dictionary tables and the two-tier lookup engine.
//!
//! Tables use the libhangul text format: one `key:value:comment` entry per
//! line, `#` starting a comment line. Keys are NFC-normalized on load and on
//! lookup. Prefix and suffix matching are built from exact probes over
//! sub-keys of the query, longest sub-key first, so the only index needed is
//! a hash map from key to its entries in table order.

use crate::candidate::CandidateEntry;
use crate::utils;
use ahash::AHashMap;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Which matcher a lookup should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMethod {
    Exact,
    Prefix,
    Suffix,
}

/// One loaded dictionary table.
#[derive(Debug, Clone, Default)]
pub struct HanjaTable {
    map: AHashMap<String, Vec<CandidateEntry>>,
    len: usize,
}

impl HanjaTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = utils::nfc(&key.into());
        self.map
            .entry(key.clone())
            .or_default()
            .push(CandidateEntry::new(key, value));
        self.len += 1;
    }

    /// Load a table from a `key:value:comment` text file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("open hanja table {}", path.display()))?;
        let table = Self::from_reader(BufReader::new(file))?;
        info!(path = %path.display(), entries = table.len, "loaded hanja table");
        Ok(table)
    }

    /// Parse table entries from a reader. Lines without a value are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Self::new();
        for line in reader.lines() {
            let line = line.context("read hanja table line")?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(3, ':');
            let key = parts.next().unwrap_or("");
            let value = parts.next().unwrap_or("");
            if key.is_empty() || value.is_empty() {
                continue;
            }
            table.insert(key, value);
        }
        Ok(table)
    }

    /// Entries whose key equals `key`, in table order.
    pub fn match_exact(&self, key: &str) -> Vec<CandidateEntry> {
        self.map.get(key).cloned().unwrap_or_default()
    }

    /// Entries whose key is a prefix of `key`, longest prefix first.
    /// The full key itself counts as a prefix.
    pub fn match_prefix(&self, key: &str) -> Vec<CandidateEntry> {
        let scalars: Vec<char> = key.chars().collect();
        let mut out = Vec::new();
        for end in (1..=scalars.len()).rev() {
            let sub: String = scalars[..end].iter().collect();
            out.extend(self.match_exact(&sub));
        }
        out
    }

    /// Entries whose key is a suffix of `key`, longest suffix first.
    pub fn match_suffix(&self, key: &str) -> Vec<CandidateEntry> {
        let scalars: Vec<char> = key.chars().collect();
        let mut out = Vec::new();
        for start in 0..scalars.len() {
            let sub: String = scalars[start..].iter().collect();
            out.extend(self.match_exact(&sub));
        }
        out
    }

    fn lookup(&self, key: &str, method: LookupMethod) -> Vec<CandidateEntry> {
        match method {
            LookupMethod::Exact => self.match_exact(key),
            LookupMethod::Prefix => self.match_prefix(key),
            LookupMethod::Suffix => self.match_suffix(key),
        }
    }
}

/// Two-tier dictionary: an optional user/symbol table consulted first, then
/// the mandatory main table. Shared read-only across all sessions.
#[derive(Debug, Clone)]
pub struct HanjaDictionary {
    main: HanjaTable,
    symbol: Option<HanjaTable>,
}

impl HanjaDictionary {
    pub fn new(main: HanjaTable, symbol: Option<HanjaTable>) -> Self {
        Self { main, symbol }
    }

    /// Load the main table and, when given, the symbol table. A missing main
    /// table is a fatal error; a missing symbol table is not.
    pub fn load<P: AsRef<Path>>(main_path: P, symbol_path: Option<P>) -> Result<Self> {
        let main = HanjaTable::load(main_path)?;
        let symbol = match symbol_path {
            Some(path) => Some(HanjaTable::load(path)?),
            None => None,
        };
        Ok(Self { main, symbol })
    }

    pub fn main(&self) -> &HanjaTable {
        &self.main
    }

    pub fn symbol(&self) -> Option<&HanjaTable> {
        self.symbol.as_ref()
    }

    /// Look up `key` with the given method. An empty key yields an empty
    /// list; a miss is an empty list, never an error.
    pub fn lookup(&self, key: &str, method: LookupMethod) -> Vec<CandidateEntry> {
        if key.is_empty() {
            return Vec::new();
        }
        let key = utils::nfc(key);

        if let Some(symbol) = &self.symbol {
            let entries = symbol.lookup(&key, method);
            if !entries.is_empty() {
                debug!(key = %key, ?method, hits = entries.len(), "symbol table hit");
                return entries;
            }
        }

        let entries = self.main.lookup(&key, method);
        debug!(key = %key, ?method, hits = entries.len(), "main table lookup");
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_table() -> HanjaTable {
        let mut table = HanjaTable::new();
        table.insert("한", "韓");
        table.insert("한", "漢");
        table.insert("한국", "韓國");
        table.insert("국", "國");
        table.insert("글", "契");
        table
    }

    #[test]
    fn test_from_reader_parses_and_skips() {
        let text = "# comment line\n\n한:韓:나라 한\n한:漢:한수 한\nbroken_line\n국:國:나라 국\n";
        let table = HanjaTable::from_reader(text.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        let hits = table.match_exact("한");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].value, "韓");
        assert_eq!(hits[1].value, "漢");
    }

    #[test]
    fn test_match_exact() {
        let table = test_table();
        assert_eq!(table.match_exact("한국").len(), 1);
        assert!(table.match_exact("없음").is_empty());
    }

    #[test]
    fn test_match_prefix_longest_first() {
        let table = test_table();
        let hits = table.match_prefix("한국어");
        // "한국" entries come before "한" entries.
        assert_eq!(hits[0].key, "한국");
        assert_eq!(hits[1].key, "한");
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_match_suffix_longest_first() {
        let table = test_table();
        let hits = table.match_suffix("대한국");
        assert_eq!(hits[0].key, "한국");
        assert_eq!(hits[1].key, "국");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_two_tier_symbol_first() {
        let mut symbol = HanjaTable::new();
        symbol.insert("한", "㉦");
        let dict = HanjaDictionary::new(test_table(), Some(symbol));

        let hits = dict.lookup("한", LookupMethod::Exact);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].value, "㉦");

        // Symbol table misses fall through to the main table.
        let hits = dict.lookup("국", LookupMethod::Exact);
        assert_eq!(hits[0].value, "國");
    }

    #[test]
    fn test_empty_key_yields_empty() {
        let dict = HanjaDictionary::new(test_table(), None);
        assert!(dict.lookup("", LookupMethod::Prefix).is_empty());
    }

    #[test]
    fn test_miss_is_empty_not_error() {
        let dict = HanjaDictionary::new(test_table(), None);
        assert!(dict.lookup("없는말", LookupMethod::Exact).is_empty());
    }
}
