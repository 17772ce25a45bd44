//! Writer configuration.

use tagwright_xchar::{Quote, DEFAULT_LABEL};

/// Options fixed when a [`MarkupWriter`](crate::MarkupWriter) is created.
///
/// # Example
///
/// ```
/// use tagwright_markup::WriterOptions;
/// use tagwright_xchar::Quote;
///
/// let options = WriterOptions::default().indent(2).quote(Quote::Single);
/// assert_eq!(options.indent, 2);
/// assert_eq!(options.initial_level, 0);
/// assert_eq!(options.encoding, "utf-8");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WriterOptions {
    /// Spaces per nesting level. Zero disables indentation and line breaks.
    pub indent: usize,
    /// Nesting level the writer starts at.
    pub initial_level: usize,
    /// Attribute quote style.
    pub quote: Quote,
    /// Mark nil values with `nil="true"` instead of dropping them silently.
    pub explicit_nil_handling: bool,
    /// Target encoding label.
    pub encoding: String,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            indent: 0,
            initial_level: 0,
            quote: Quote::Double,
            explicit_nil_handling: false,
            encoding: DEFAULT_LABEL.to_string(),
        }
    }
}

impl WriterOptions {
    /// Set the indent width.
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Set the starting nesting level.
    pub fn initial_level(mut self, level: usize) -> Self {
        self.initial_level = level;
        self
    }

    /// Set the attribute quote style.
    pub fn quote(mut self, quote: Quote) -> Self {
        self.quote = quote;
        self
    }

    /// Enable or disable explicit nil handling.
    pub fn explicit_nil_handling(mut self, enabled: bool) -> Self {
        self.explicit_nil_handling = enabled;
        self
    }

    /// Set the target encoding label.
    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }
}
