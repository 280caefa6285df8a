//! Unicode hangul jamo arithmetic.
//!
//! Jamo are handled as indices into the three syllable slots: choseong
//! (leading consonant, 0..19), jungseong (vowel, 0..21) and jongseong
//! (trailing consonant, 1..28 with 0 meaning "none"). Keyboard layouts and
//! the preedit render in compatibility jamo (U+3131..U+3163); these tables
//! translate between the two.

/// First code point of the precomposed syllable block (가).
const SYLLABLE_BASE: u32 = 0xAC00;
const JUNGSEONG_COUNT: u32 = 21;
const JONGSEONG_COUNT: u32 = 28;

/// Compatibility jamo for each choseong index.
const CHOSEONG_COMPAT: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ',
    'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// Compatibility jamo for each jungseong index.
const JUNGSEONG_COMPAT: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ',
    'ㅞ', 'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

/// Compatibility jamo for jongseong indices 1..=27 (index 0 is "none").
const JONGSEONG_COMPAT: [char; 27] = [
    'ㄱ', 'ㄲ', 'ㄳ', 'ㄴ', 'ㄵ', 'ㄶ', 'ㄷ', 'ㄹ', 'ㄺ', 'ㄻ', 'ㄼ', 'ㄽ', 'ㄾ', 'ㄿ', 'ㅀ',
    'ㅁ', 'ㅂ', 'ㅄ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// Choseong index of a compatibility jamo.
pub fn cho_index(c: char) -> Option<u32> {
    CHOSEONG_COMPAT.iter().position(|&x| x == c).map(|i| i as u32)
}

/// Jungseong index of a compatibility jamo.
pub fn jung_index(c: char) -> Option<u32> {
    JUNGSEONG_COMPAT
        .iter()
        .position(|&x| x == c)
        .map(|i| i as u32)
}

/// Jongseong index (1..=27) of a compatibility jamo.
pub fn jong_index(c: char) -> Option<u32> {
    JONGSEONG_COMPAT
        .iter()
        .position(|&x| x == c)
        .map(|i| (i + 1) as u32)
}

/// True for consonant jamo that can fill the leading slot.
pub fn is_choseong(c: char) -> bool {
    cho_index(c).is_some()
}

/// True for vowel jamo.
pub fn is_jungseong(c: char) -> bool {
    jung_index(c).is_some()
}

pub fn cho_to_compat(cho: u32) -> Option<char> {
    CHOSEONG_COMPAT.get(cho as usize).copied()
}

pub fn jung_to_compat(jung: u32) -> Option<char> {
    JUNGSEONG_COMPAT.get(jung as usize).copied()
}

/// Compose a precomposed syllable from slot indices.
pub fn compose_syllable(cho: u32, jung: u32, jong: u32) -> Option<char> {
    if cho >= 19 || jung >= JUNGSEONG_COUNT || jong >= JONGSEONG_COUNT {
        return None;
    }
    char::from_u32(SYLLABLE_BASE + (cho * JUNGSEONG_COUNT + jung) * JONGSEONG_COUNT + jong)
}

/// Combine two vowels into a compound jungseong.
pub fn combine_jungseong(first: u32, second: u32) -> Option<u32> {
    match (first, second) {
        (8, 0) => Some(9),    // ㅗ + ㅏ = ㅘ
        (8, 1) => Some(10),   // ㅗ + ㅐ = ㅙ
        (8, 20) => Some(11),  // ㅗ + ㅣ = ㅚ
        (13, 4) => Some(14),  // ㅜ + ㅓ = ㅝ
        (13, 5) => Some(15),  // ㅜ + ㅔ = ㅞ
        (13, 20) => Some(16), // ㅜ + ㅣ = ㅟ
        (18, 20) => Some(19), // ㅡ + ㅣ = ㅢ
        _ => None,
    }
}

/// First component of a compound jungseong, for backspace.
pub fn split_jungseong(jung: u32) -> Option<u32> {
    match jung {
        9 | 10 | 11 => Some(8),   // ㅘ ㅙ ㅚ -> ㅗ
        14 | 15 | 16 => Some(13), // ㅝ ㅞ ㅟ -> ㅜ
        19 => Some(18),           // ㅢ -> ㅡ
        _ => None,
    }
}

/// Combine two trailing consonants into a compound jongseong.
pub fn combine_jongseong(first: u32, second: u32) -> Option<u32> {
    match (first, second) {
        (1, 19) => Some(3),   // ㄱ + ㅅ = ㄳ
        (4, 22) => Some(5),   // ㄴ + ㅈ = ㄵ
        (4, 27) => Some(6),   // ㄴ + ㅎ = ㄶ
        (8, 1) => Some(9),    // ㄹ + ㄱ = ㄺ
        (8, 16) => Some(10),  // ㄹ + ㅁ = ㄻ
        (8, 17) => Some(11),  // ㄹ + ㅂ = ㄼ
        (8, 19) => Some(12),  // ㄹ + ㅅ = ㄽ
        (8, 25) => Some(13),  // ㄹ + ㅌ = ㄾ
        (8, 26) => Some(14),  // ㄹ + ㅍ = ㄿ
        (8, 27) => Some(15),  // ㄹ + ㅎ = ㅀ
        (17, 19) => Some(18), // ㅂ + ㅅ = ㅄ
        _ => None,
    }
}

/// Split a compound jongseong into the part that stays and the choseong
/// index that moves to the next syllable.
pub fn split_jongseong(jong: u32) -> Option<(u32, u32)> {
    match jong {
        3 => Some((1, 9)),   // ㄳ -> ㄱ + ㅅ
        5 => Some((4, 12)),  // ㄵ -> ㄴ + ㅈ
        6 => Some((4, 18)),  // ㄶ -> ㄴ + ㅎ
        9 => Some((8, 0)),   // ㄺ -> ㄹ + ㄱ
        10 => Some((8, 6)),  // ㄻ -> ㄹ + ㅁ
        11 => Some((8, 7)),  // ㄼ -> ㄹ + ㅂ
        12 => Some((8, 9)),  // ㄽ -> ㄹ + ㅅ
        13 => Some((8, 16)), // ㄾ -> ㄹ + ㅌ
        14 => Some((8, 17)), // ㄿ -> ㄹ + ㅍ
        15 => Some((8, 18)), // ㅀ -> ㄹ + ㅎ
        18 => Some((17, 9)), // ㅄ -> ㅂ + ㅅ
        _ => None,
    }
}

/// Choseong index a single jongseong turns into when it moves to the next
/// syllable. Compound jongseong must be split first.
pub fn jongseong_to_choseong(jong: u32) -> Option<u32> {
    match jong {
        1 => Some(0),   // ㄱ
        2 => Some(1),   // ㄲ
        4 => Some(2),   // ㄴ
        7 => Some(3),   // ㄷ
        8 => Some(5),   // ㄹ
        16 => Some(6),  // ㅁ
        17 => Some(7),  // ㅂ
        19 => Some(9),  // ㅅ
        20 => Some(10), // ㅆ
        21 => Some(11), // ㅇ
        22 => Some(12), // ㅈ
        23 => Some(14), // ㅊ
        24 => Some(15), // ㅋ
        25 => Some(16), // ㅌ
        26 => Some(17), // ㅍ
        27 => Some(18), // ㅎ
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_syllable() {
        assert_eq!(compose_syllable(0, 0, 0), Some('가'));
        assert_eq!(compose_syllable(18, 0, 4), Some('한'));
        assert_eq!(compose_syllable(0, 18, 8), Some('글'));
        assert_eq!(compose_syllable(19, 0, 0), None);
    }

    #[test]
    fn test_index_round_trip() {
        assert_eq!(cho_index('ㅎ'), Some(18));
        assert_eq!(cho_to_compat(18), Some('ㅎ'));
        assert_eq!(jung_index('ㅏ'), Some(0));
        assert_eq!(jong_index('ㄴ'), Some(4));
        assert_eq!(jong_index('ㄸ'), None); // cannot trail
        assert_eq!(cho_index('ㅏ'), None);
    }

    #[test]
    fn test_compound_vowels() {
        let o = jung_index('ㅗ').unwrap();
        let a = jung_index('ㅏ').unwrap();
        assert_eq!(combine_jungseong(o, a), Some(jung_index('ㅘ').unwrap()));
        assert_eq!(split_jungseong(jung_index('ㅘ').unwrap()), Some(o));
        assert_eq!(combine_jungseong(a, o), None);
    }

    #[test]
    fn test_compound_tails() {
        let l = jong_index('ㄹ').unwrap();
        let g = jong_index('ㄱ').unwrap();
        let lg = jong_index('ㄺ').unwrap();
        assert_eq!(combine_jongseong(l, g), Some(lg));
        assert_eq!(split_jongseong(lg), Some((l, 0)));
        assert_eq!(split_jongseong(g), None);
    }

    #[test]
    fn test_jongseong_carries_to_choseong() {
        assert_eq!(jongseong_to_choseong(jong_index('ㄴ').unwrap()), Some(2));
        // Compound jongseong never carry whole.
        assert_eq!(jongseong_to_choseong(jong_index('ㄺ').unwrap()), None);
    }
}
