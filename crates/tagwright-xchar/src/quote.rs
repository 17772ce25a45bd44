//! Attribute quote style.

use std::fmt;
use std::str::FromStr;

/// Quote character wrapped around attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Quote {
    /// `name="value"`
    #[default]
    Double,
    /// `name='value'`
    Single,
}

impl Quote {
    /// The quote character itself.
    #[inline]
    pub const fn as_char(self) -> char {
        match self {
            Quote::Double => '"',
            Quote::Single => '\'',
        }
    }

    /// Entity used when the quote character appears inside a value.
    #[inline]
    pub const fn entity(self) -> &'static str {
        match self {
            Quote::Double => "&quot;",
            Quote::Single => "&apos;",
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quote::Double => f.write_str("double"),
            Quote::Single => f.write_str("single"),
        }
    }
}

/// Error returned when parsing an unknown quote style name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseQuoteError(String);

impl fmt::Display for ParseQuoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown quote style '{}' (expected 'double' or 'single')", self.0)
    }
}

impl std::error::Error for ParseQuoteError {}

impl FromStr for Quote {
    type Err = ParseQuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "double" | "\"" => Ok(Quote::Double),
            "single" | "'" => Ok(Quote::Single),
            _ => Err(ParseQuoteError(s.to_string())),
        }
    }
}
