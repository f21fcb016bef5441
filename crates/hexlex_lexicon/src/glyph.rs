//! # Glyphs
//!
//! A glyph is one Unicode scalar drawn in one hex cell. Words become glyph
//! sequences by dropping separators and upper-casing where that maps one
//! scalar to one scalar, so scripts without case pass through unchanged.

/// Cell value meaning "no glyph".
pub const EMPTY_GLYPH: u32 = 0;

/// Returns true for characters that separate words but never occupy a cell.
#[inline]
#[must_use]
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '\'' | '’' | '.' | '_')
}

/// Canonical glyph for a character.
#[must_use]
pub fn normalize(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// Glyph sequence of a word.
#[must_use]
pub fn glyphs_of(word: &str) -> Vec<char> {
    word.chars()
        .filter(|&c| !is_separator(c))
        .map(normalize)
        .collect()
}

/// Cell encoding of a glyph.
#[inline]
#[must_use]
pub const fn encode(glyph: char) -> u32 {
    glyph as u32
}

/// Glyph stored in a cell, if any.
#[inline]
#[must_use]
pub fn decode(code: u32) -> Option<char> {
    if code == EMPTY_GLYPH {
        None
    } else {
        char::from_u32(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs_of_latin() {
        assert_eq!(glyphs_of("Ice-cream"), vec!['I', 'C', 'E', 'C', 'R', 'E', 'A', 'M']);
        assert_eq!(glyphs_of("don't"), vec!['D', 'O', 'N', 'T']);
    }

    #[test]
    fn test_glyphs_of_caseless_script() {
        assert_eq!(glyphs_of("成语"), vec!['成', '语']);
    }

    #[test]
    fn test_multi_char_uppercase_kept() {
        // 'ß' upper-cases to "SS"; one cell keeps one glyph.
        assert_eq!(glyphs_of("ß"), vec!['ß']);
    }

    #[test]
    fn test_encode_decode() {
        assert_eq!(decode(encode('Q')), Some('Q'));
        assert_eq!(decode(EMPTY_GLYPH), None);
    }
}
