//! Target character set of the generated document.
//!
//! Encoded text is always a Rust `String`. The charset decides whether a piece
//! of that text can be written in the declared document encoding; when it
//! cannot, every non-ASCII character of the piece is spelled as a decimal
//! character reference (`&#8220;`), which every ASCII-compatible encoding can
//! carry.

use std::borrow::Cow;
use std::fmt::Write as _;

use encoding_rs::{Encoding, REPLACEMENT, UTF_8};

/// Label used when none is configured.
pub const DEFAULT_LABEL: &str = "utf-8";

/// A resolved document encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    label: String,
    encoding: Option<&'static Encoding>,
}

impl Charset {
    /// Resolve an encoding label such as `utf-8`, `ISO-8859-1` or `shift_jis`.
    ///
    /// Labels are lowercased. A label with no usable encoder is kept as is and
    /// all non-ASCII text written under it degrades to character references.
    pub fn for_label(label: &str) -> Self {
        let label = label.trim().to_ascii_lowercase();
        let encoding = Encoding::for_label(label.as_bytes()).filter(|&encoding| encoding != REPLACEMENT);

        if encoding.is_none() {
            log::warn!(
                "unknown encoding '{}', non-ASCII text will be written as character references",
                label
            );
        }

        Self { label, encoding }
    }

    /// UTF-8.
    pub fn utf8() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            encoding: Some(UTF_8),
        }
    }

    /// The lowercased label this charset was created from.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The resolved encoding, if the label was recognized.
    #[inline]
    pub fn encoding(&self) -> Option<&'static Encoding> {
        self.encoding
    }

    /// Whether the label resolved to a known encoding.
    #[inline]
    pub fn is_known(&self) -> bool {
        self.encoding.is_some()
    }

    /// Whether every Unicode character can be written under this charset.
    ///
    /// UTF-16 labels count as Unicode; their text is produced as UTF-8 like
    /// everything else.
    pub fn is_unicode(&self) -> bool {
        match self.encoding {
            Some(encoding) => encoding == UTF_8 || encoding.output_encoding() == UTF_8,
            None => false,
        }
    }

    /// Encoding that byte output should be produced in.
    ///
    /// Unknown labels write UTF-8, which is safe because their text is ASCII
    /// after [`Charset::represent`].
    pub fn output_encoding(&self) -> &'static Encoding {
        self.encoding.map_or(UTF_8, Encoding::output_encoding)
    }

    /// Make already escaped text representable in this charset.
    pub fn represent<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        if text.is_ascii() || self.is_unicode() {
            return text;
        }

        if let Some(encoding) = self.encoding {
            let (_, _, unmappable) = encoding.encode(&text);
            if !unmappable {
                return text;
            }
        }

        Cow::Owned(character_references(&text))
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::utf8()
    }
}

/// Spell every non-ASCII character as `&#N;`.
pub fn character_references(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            // Writing to a String cannot fail.
            let _ = write!(out, "&#{};", c as u32);
        }
    }
    out
}
