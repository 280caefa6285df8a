//! libhangul-core
//!
//! Language-agnostic plumbing shared by the Korean input method crates:
//! key representation, paged candidate lists, the host communication
//! context, and the hanja dictionary lookup engine.
//!
//! Public API:
//! - `Key` / `KeySym` / `Modifiers` / `KeyEvent` - host key representation
//! - `CandidateEntry` / `CandidateList` - paged dictionary matches
//! - `HostContext` and its display/request types - platform communication
//! - `HanjaTable` / `HanjaDictionary` / `LookupMethod` - dictionary lookup

pub mod key;
pub use key::{Key, KeyEvent, KeySym, Modifiers};

pub mod candidate;
pub use candidate::{CandidateEntry, CandidateList};

pub mod context;
pub use context::{
    Capabilities, CandidateDisplay, HostContext, PreeditDisplay, PreeditTarget, SurroundingDelete,
    SurroundingText,
};

pub mod dict;
pub use dict::{HanjaDictionary, HanjaTable, LookupMethod};

/// Utility helpers.
pub mod utils {
    use unicode_normalization::UnicodeNormalization;

    /// NFC-normalize a string.
    pub fn nfc(s: &str) -> String {
        s.nfc().collect()
    }

    /// Number of Unicode scalar values in `s`.
    pub fn scalar_len(s: &str) -> usize {
        s.chars().count()
    }

    /// Substring of `s` between scalar positions `p1` and `p2`, in either
    /// order. Negative positions clamp to the start, positions past the end
    /// clamp to the end, so callers can pass raw cursor arithmetic.
    pub fn sub_scalars(s: &str, p1: i64, p2: i64) -> String {
        if s.is_empty() {
            return String::new();
        }
        let total = scalar_len(s) as i64;
        let p1 = p1.clamp(0, total);
        let p2 = p2.clamp(0, total);
        let start = p1.min(p2) as usize;
        let n = (p2 - p1).unsigned_abs() as usize;
        s.chars().skip(start).take(n).collect()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_sub_scalars_clamps() {
            let s = "대한민국";
            assert_eq!(sub_scalars(s, 0, 2), "대한");
            assert_eq!(sub_scalars(s, -64, 2), "대한");
            assert_eq!(sub_scalars(s, 2, 100), "민국");
            assert_eq!(sub_scalars(s, 3, 1), "한민");
            assert_eq!(sub_scalars("", 0, 5), "");
        }

        #[test]
        fn test_scalar_len_counts_scalars() {
            assert_eq!(scalar_len("한글ab"), 4);
        }
    }
}
