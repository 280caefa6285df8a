//! Keyboard layouts: mapping typed symbols to compatibility jamo.

use serde::{Deserialize, Serialize};

/// The keyboard layouts selectable in configuration, identified by the
/// conventional short ids ("2" for Dubeolsik and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyboardLayout {
    Dubeolsik,
    DubeolsikYetgeul,
    Sebeolsik390,
    SebeolsikFinal,
    SebeolsikNoshift,
    SebeolsikYetgeul,
    SebeolsikDubeolLayout,
    Romaja,
    Ahnmatae,
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        Self::Dubeolsik
    }
}

/// Dubeolsik (two-set) QWERTY mapping. Shifted letters that have no jamo of
/// their own fall back to their lowercase mapping in `map_key`.
const DUBEOLSIK: &[(char, char)] = &[
    ('q', 'ㅂ'),
    ('Q', 'ㅃ'),
    ('w', 'ㅈ'),
    ('W', 'ㅉ'),
    ('e', 'ㄷ'),
    ('E', 'ㄸ'),
    ('r', 'ㄱ'),
    ('R', 'ㄲ'),
    ('t', 'ㅅ'),
    ('T', 'ㅆ'),
    ('y', 'ㅛ'),
    ('u', 'ㅕ'),
    ('i', 'ㅑ'),
    ('o', 'ㅐ'),
    ('O', 'ㅒ'),
    ('p', 'ㅔ'),
    ('P', 'ㅖ'),
    ('a', 'ㅁ'),
    ('s', 'ㄴ'),
    ('d', 'ㅇ'),
    ('f', 'ㄹ'),
    ('g', 'ㅎ'),
    ('h', 'ㅗ'),
    ('j', 'ㅓ'),
    ('k', 'ㅏ'),
    ('l', 'ㅣ'),
    ('z', 'ㅋ'),
    ('x', 'ㅌ'),
    ('c', 'ㅊ'),
    ('v', 'ㅍ'),
    ('b', 'ㅠ'),
    ('n', 'ㅜ'),
    ('m', 'ㅡ'),
];

impl KeyboardLayout {
    /// The configuration id of this layout.
    pub fn id(self) -> &'static str {
        match self {
            Self::Dubeolsik => "2",
            Self::DubeolsikYetgeul => "2y",
            Self::Sebeolsik390 => "39",
            Self::SebeolsikFinal => "3f",
            Self::SebeolsikNoshift => "3s",
            Self::SebeolsikYetgeul => "3y",
            Self::SebeolsikDubeolLayout => "32",
            Self::Romaja => "ro",
            Self::Ahnmatae => "ahn",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "2" => Some(Self::Dubeolsik),
            "2y" => Some(Self::DubeolsikYetgeul),
            "39" => Some(Self::Sebeolsik390),
            "3f" => Some(Self::SebeolsikFinal),
            "3s" => Some(Self::SebeolsikNoshift),
            "3y" => Some(Self::SebeolsikYetgeul),
            "32" => Some(Self::SebeolsikDubeolLayout),
            "ro" => Some(Self::Romaja),
            "ahn" => Some(Self::Ahnmatae),
            _ => None,
        }
    }

    // TODO: ship key tables for the sebeolsik family; until then every id
    // resolves to the dubeolsik table.
    fn key_table(self) -> &'static [(char, char)] {
        DUBEOLSIK
    }

    /// Map a typed symbol to a compatibility jamo. Returns `None` for
    /// symbols outside the layout's alphabet.
    pub fn map_key(self, ch: char) -> Option<char> {
        let table = self.key_table();
        if let Some(&(_, jamo)) = table.iter().find(|&&(k, _)| k == ch) {
            return Some(jamo);
        }
        // Shifted letters without a dedicated jamo.
        if ch.is_ascii_uppercase() {
            let lower = ch.to_ascii_lowercase();
            return table
                .iter()
                .find(|&&(k, _)| k == lower)
                .map(|&(_, jamo)| jamo);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dubeolsik_basics() {
        let l = KeyboardLayout::Dubeolsik;
        assert_eq!(l.map_key('q'), Some('ㅂ'));
        assert_eq!(l.map_key('Q'), Some('ㅃ'));
        assert_eq!(l.map_key('k'), Some('ㅏ'));
        assert_eq!(l.map_key('1'), None);
        assert_eq!(l.map_key(' '), None);
    }

    #[test]
    fn test_shift_fallback() {
        let l = KeyboardLayout::Dubeolsik;
        // Y has no shifted jamo; falls back to ㅛ.
        assert_eq!(l.map_key('Y'), Some('ㅛ'));
        assert_eq!(l.map_key('O'), Some('ㅒ'));
    }

    #[test]
    fn test_layout_ids() {
        assert_eq!(KeyboardLayout::Dubeolsik.id(), "2");
        assert_eq!(
            KeyboardLayout::from_id("39"),
            Some(KeyboardLayout::Sebeolsik390)
        );
        assert_eq!(KeyboardLayout::from_id("xx"), None);
    }
}
