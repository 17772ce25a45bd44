//! Text repair and escaping.
//!
//! [`encode`] runs four passes in a fixed order:
//!
//! 1. byte input is brought to UTF-8 ([`unicode`], only for [`encode_bytes`])
//! 2. C1 control characters are remapped to their Windows-1252 punctuation
//! 3. characters outside the XML 1.0 ranges become [`REPLACEMENT_CHAR`]
//! 4. `&`, `<` and `>` are replaced by their predefined entities
//!
//! Escaping is the last pass so the `&` of an inserted entity is never
//! escaped again. Every function returns [`Cow::Borrowed`] when nothing had to
//! change.

use std::borrow::Cow;

use memchr::{memchr3, memchr3_iter};

use crate::tables::{is_valid_char, predefined_entity, remap_legacy, REPLACEMENT_CHAR};
use crate::Quote;

/// Interpret raw bytes as text.
///
/// Valid UTF-8 (which includes pure ASCII) is borrowed as is. Anything else is
/// read as ISO-8859-1, which maps every byte to a character and so never fails.
pub fn unicode(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => encoding_rs::mem::decode_latin1(bytes),
    }
}

/// Remap legacy punctuation and replace characters not allowed in XML.
///
/// This is [`encode`] without entity escaping, for destinations that escape
/// on their own (CDATA sections, structured event targets).
pub fn sanitize(text: &str) -> Cow<'_, str> {
    let Some(first) = text
        .char_indices()
        .find(|&(_, c)| repair_char(c) != c)
        .map(|(index, _)| index)
    else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..first]);
    out.extend(text[first..].chars().map(repair_char));
    Cow::Owned(out)
}

/// Replace `&`, `<` and `>` with `&amp;`, `&lt;` and `&gt;`.
pub fn escape_reserved(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    if memchr3(b'&', b'<', b'>', bytes).is_none() {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;
    for pos in memchr3_iter(b'&', b'<', b'>', bytes) {
        out.push_str(&text[last..pos]);
        let reserved = bytes[pos] as char;
        match predefined_entity(reserved) {
            Some(entity) => out.push_str(entity),
            None => out.push(reserved),
        }
        last = pos + 1;
    }
    out.push_str(&text[last..]);
    Cow::Owned(out)
}

/// Make arbitrary text safe to place in XML character data.
///
/// # Example
///
/// ```
/// use tagwright_xchar::encode;
///
/// assert_eq!(encode("fish & chips <hot>"), "fish &amp; chips &lt;hot&gt;");
/// assert_eq!(encode("it\u{92}s"), "it\u{2019}s");
/// assert_eq!(encode("bell\u{7}"), "bell\u{FFFD}");
/// ```
pub fn encode(text: &str) -> Cow<'_, str> {
    match sanitize(text) {
        Cow::Borrowed(clean) => escape_reserved(clean),
        Cow::Owned(clean) => {
            if has_reserved(&clean) {
                Cow::Owned(escape_reserved(&clean).into_owned())
            } else {
                Cow::Owned(clean)
            }
        }
    }
}

/// [`encode`] for raw bytes of unknown provenance.
///
/// Bytes that are not valid UTF-8 are treated as ISO-8859-1 first, after which
/// the legacy remap turns stray Windows-1252 punctuation bytes into the
/// characters they were meant to be.
pub fn encode_bytes(bytes: &[u8]) -> Cow<'_, str> {
    match unicode(bytes) {
        Cow::Borrowed(text) => encode(text),
        Cow::Owned(text) => Cow::Owned(encode(&text).into_owned()),
    }
}

/// Make text safe to place inside a quoted attribute value.
///
/// On top of [`encode`], line feeds and carriage returns become numeric
/// character references so attribute-value normalization keeps them, and the
/// active quote character is escaped.
///
/// # Example
///
/// ```
/// use tagwright_xchar::{encode_attribute, Quote};
///
/// assert_eq!(encode_attribute("line1\nline2", Quote::Double), "line1&#10;line2");
/// assert_eq!(encode_attribute("say \"hi\"", Quote::Double), "say &quot;hi&quot;");
/// assert_eq!(encode_attribute("it's", Quote::Single), "it&apos;s");
/// ```
pub fn encode_attribute(text: &str, quote: Quote) -> Cow<'_, str> {
    let encoded = encode(text);
    let quote_char = quote.as_char();
    if !encoded.contains(|c: char| c == '\n' || c == '\r' || c == quote_char) {
        return encoded;
    }

    let mut out = String::with_capacity(encoded.len() + 8);
    for c in encoded.chars() {
        match c {
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            c if c == quote_char => out.push_str(quote.entity()),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[inline]
fn repair_char(c: char) -> char {
    let c = remap_legacy(c);
    if is_valid_char(c) {
        c
    } else {
        REPLACEMENT_CHAR
    }
}

#[inline]
fn has_reserved(text: &str) -> bool {
    memchr3(b'&', b'<', b'>', text.as_bytes()).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(encode(""), "");
        assert_eq!(encode_attribute("", Quote::Double), "");
        assert_eq!(encode_bytes(b""), "");
    }

    #[test]
    fn test_clean_text_is_borrowed() {
        assert!(matches!(encode("plain text"), Cow::Borrowed("plain text")));
        assert!(matches!(encode("naïve café"), Cow::Borrowed(_)));
        assert!(matches!(sanitize("tab\there"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_reserved_characters() {
        assert_eq!(encode("a&b"), "a&amp;b");
        assert_eq!(encode("<tag>"), "&lt;tag&gt;");
        assert_eq!(encode("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_no_literal_reserved_after_encode() {
        let inputs = ["&", "<<>>", "x < y && y > z", "\u{93}<q>\u{94} & \u{1}"];
        for input in inputs {
            let encoded = encode(input);
            assert!(!encoded.contains('<'), "{encoded}");
            assert!(!encoded.contains('>'), "{encoded}");
            for (index, _) in encoded.match_indices('&') {
                let rest = &encoded[index..];
                assert!(
                    rest.starts_with("&amp;") || rest.starts_with("&lt;") || rest.starts_with("&gt;"),
                    "stray ampersand in {encoded}"
                );
            }
        }
    }

    #[test]
    fn test_single_escape_pass_and_stable_repair() {
        // One call escapes once; re-encoding its output escapes again.
        assert_eq!(encode("<&>"), "&lt;&amp;&gt;");
        assert_eq!(encode("&amp;"), "&amp;amp;");
        // Repair passes are idempotent on their own output.
        let once = sanitize("\u{0}\u{92}\u{FFFF}x");
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_invalid_code_points_replaced_in_place() {
        assert_eq!(encode("a\u{0}b"), "a\u{FFFD}b");
        assert_eq!(encode("\u{1}\u{2}"), "\u{FFFD}\u{FFFD}");
        assert_eq!(encode("x\u{FFFE}y\u{FFFF}z"), "x\u{FFFD}y\u{FFFD}z");
        assert_eq!(encode("keep\ttab\nnewline\rcr"), "keep\ttab\nnewline\rcr");
    }

    #[test]
    fn test_legacy_punctuation() {
        assert_eq!(encode("\u{93}quoted\u{94}"), "\u{201C}quoted\u{201D}");
        assert_eq!(encode("wait\u{85}"), "wait\u{2026}");
        // Undefined slots stay as they are; they are valid XML characters.
        assert_eq!(encode("\u{81}"), "\u{81}");
    }

    #[test]
    fn test_legacy_bytes() {
        assert_eq!(encode_bytes(b"it\x92s"), "it\u{2019}s");
        assert_eq!(encode_bytes(b"\x93hi\x94"), "\u{201C}hi\u{201D}");
        assert_eq!(encode_bytes(b"caf\xe9"), "café");
    }

    #[test]
    fn test_unicode_input_forms() {
        assert!(matches!(unicode(b"ascii"), Cow::Borrowed("ascii")));
        assert!(matches!(unicode("ünïcödé".as_bytes()), Cow::Borrowed(_)));
        assert_eq!(unicode(b"\xff\xfe"), "ÿþ");
    }

    #[test]
    fn test_attribute_line_breaks() {
        assert_eq!(encode_attribute("line1\nline2", Quote::Double), "line1&#10;line2");
        assert_eq!(encode_attribute("a\r\nb", Quote::Single), "a&#13;&#10;b");
    }

    #[test]
    fn test_attribute_quotes() {
        assert_eq!(encode_attribute("\"'", Quote::Double), "&quot;'");
        assert_eq!(encode_attribute("\"'", Quote::Single), "\"&apos;");
        assert_eq!(encode_attribute("a<\"b\">", Quote::Double), "a&lt;&quot;b&quot;&gt;");
    }
}
