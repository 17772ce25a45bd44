//! XML character repair and escaping for tagwright.
//!
//! Everything that ends up in generated markup passes through this crate:
//!
//! - [`encode`] - text content: legacy punctuation remap, invalid character
//!   replacement, `&`/`<`/`>` escaping
//! - [`encode_attribute`] - attribute values: [`encode`] plus line break and
//!   quote escaping
//! - [`encode_bytes`] - byte input that may not be UTF-8
//! - [`Charset`] - degrade text the declared document encoding cannot carry
//!
//! None of these fail. Bad input characters are repaired, never reported.
//!
//! # Example
//!
//! ```
//! use tagwright_xchar::{encode, encode_attribute, Quote};
//!
//! assert_eq!(encode("1 < 2 & 3 > 2"), "1 &lt; 2 &amp; 3 &gt; 2");
//! assert_eq!(encode_attribute("a\nb", Quote::Double), "a&#10;b");
//! ```

mod charset;
mod encode;
mod quote;

pub mod tables;

pub use charset::{character_references, Charset, DEFAULT_LABEL};
pub use encode::{encode, encode_attribute, encode_bytes, escape_reserved, sanitize, unicode};
pub use quote::{ParseQuoteError, Quote};
pub use tables::{is_valid_char, remap_legacy, REPLACEMENT_CHAR};

/// Re-export encoding_rs for callers resolving encodings themselves
pub use encoding_rs;
