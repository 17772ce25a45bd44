//! Fixed character tables used by the encoder.

/// Character substituted for code points that may not appear in XML text.
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// Code point ranges allowed in XML 1.0 character data.
pub const VALID_RANGES: &[(u32, u32)] = &[
    (0x9, 0x9),
    (0xA, 0xA),
    (0xD, 0xD),
    (0x20, 0xD7FF),
    (0xE000, 0xFFFD),
    (0x10000, 0x10FFFF),
];

/// Windows-1252 punctuation for the C1 control range `0x80..=0x9F`.
///
/// Slots holding `None` are undefined in Windows-1252 and keep their code point.
const CP1252_C1: [Option<char>; 32] = [
    Some('\u{20AC}'), // 0x80 euro sign
    None,             // 0x81
    Some('\u{201A}'), // 0x82 single low-9 quotation mark
    Some('\u{0192}'), // 0x83 latin small f with hook
    Some('\u{201E}'), // 0x84 double low-9 quotation mark
    Some('\u{2026}'), // 0x85 horizontal ellipsis
    Some('\u{2020}'), // 0x86 dagger
    Some('\u{2021}'), // 0x87 double dagger
    Some('\u{02C6}'), // 0x88 modifier letter circumflex accent
    Some('\u{2030}'), // 0x89 per mille sign
    Some('\u{0160}'), // 0x8A latin capital s with caron
    Some('\u{2039}'), // 0x8B single left-pointing angle quotation mark
    Some('\u{0152}'), // 0x8C latin capital ligature oe
    None,             // 0x8D
    Some('\u{017D}'), // 0x8E latin capital z with caron
    None,             // 0x8F
    None,             // 0x90
    Some('\u{2018}'), // 0x91 left single quotation mark
    Some('\u{2019}'), // 0x92 right single quotation mark
    Some('\u{201C}'), // 0x93 left double quotation mark
    Some('\u{201D}'), // 0x94 right double quotation mark
    Some('\u{2022}'), // 0x95 bullet
    Some('\u{2013}'), // 0x96 en dash
    Some('\u{2014}'), // 0x97 em dash
    Some('\u{02DC}'), // 0x98 small tilde
    Some('\u{2122}'), // 0x99 trade mark sign
    Some('\u{0161}'), // 0x9A latin small s with caron
    Some('\u{203A}'), // 0x9B single right-pointing angle quotation mark
    Some('\u{0153}'), // 0x9C latin small ligature oe
    None,             // 0x9D
    Some('\u{017E}'), // 0x9E latin small z with caron
    Some('\u{0178}'), // 0x9F latin capital y with diaeresis
];

/// Entity text for the characters that must never appear literally in text.
pub const PREDEFINED_ENTITIES: &[(char, &str)] = &[('&', "&amp;"), ('<', "&lt;"), ('>', "&gt;")];

/// Map a C1 control character to the Windows-1252 punctuation it stood for.
///
/// Every other character is returned unchanged.
#[inline]
pub fn remap_legacy(c: char) -> char {
    match c as u32 {
        cp @ 0x80..=0x9F => CP1252_C1[(cp - 0x80) as usize].unwrap_or(c),
        _ => c,
    }
}

/// Check whether a character may appear in XML 1.0 text.
#[inline]
pub fn is_valid_char(c: char) -> bool {
    let cp = c as u32;
    VALID_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&cp))
}

/// Entity text for a reserved markup character, if it is one.
#[inline]
pub fn predefined_entity(c: char) -> Option<&'static str> {
    PREDEFINED_ENTITIES
        .iter()
        .find(|&&(reserved, _)| reserved == c)
        .map(|&(_, entity)| entity)
}
