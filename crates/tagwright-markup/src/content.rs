//! What goes between an element's start and end tags.

use std::fmt;

use crate::{MarkupWriter, Result};

/// A caller-supplied callback that emits child nodes one level deeper.
pub type Block<'a, S> = Box<dyn FnOnce(&mut MarkupWriter<S>) -> Result<()> + 'a>;

/// Content of a single node.
///
/// At most one of text and block may be set; the writer rejects a descriptor
/// carrying both before writing anything. Text added more than once is
/// concatenated.
///
/// # Example
///
/// ```
/// use tagwright_markup::{AttributeSet, Content, MarkupWriter};
///
/// let mut xml = MarkupWriter::new(String::new());
/// xml.emit_node("list", &AttributeSet::new(), Content::block(|xml| {
///     xml.emit_node("item", &AttributeSet::new(), Content::text("one"))?;
///     xml.emit_node("item", &AttributeSet::new(), Content::empty())
/// }))?;
///
/// assert_eq!(xml.into_sink(), "<list><item>one</item><item/></list>");
/// # Ok::<(), tagwright_markup::Error>(())
/// ```
pub struct Content<'a, S> {
    text: Option<String>,
    nil: bool,
    block: Option<Block<'a, S>>,
}

impl<'a, S> Content<'a, S> {
    /// No content: the element is self-closing.
    pub fn empty() -> Self {
        Self {
            text: None,
            nil: false,
            block: None,
        }
    }

    /// Literal text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self::empty().with_text(text)
    }

    /// An explicit nil value.
    ///
    /// The element is self-closing and, with explicit nil handling enabled,
    /// carries `nil="true"`.
    pub fn nil() -> Self {
        Self::empty().with_nil()
    }

    /// Nested content produced by `block`.
    pub fn block<F>(block: F) -> Self
    where
        F: FnOnce(&mut MarkupWriter<S>) -> Result<()> + 'a,
    {
        Self::empty().with_block(block)
    }

    /// Append literal text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        match &mut self.text {
            Some(existing) => existing.push_str(&text),
            None => self.text = Some(text),
        }
        self
    }

    /// Mark the value as nil.
    pub fn with_nil(mut self) -> Self {
        self.nil = true;
        self
    }

    /// Set the nested block.
    pub fn with_block<F>(mut self, block: F) -> Self
    where
        F: FnOnce(&mut MarkupWriter<S>) -> Result<()> + 'a,
    {
        self.block = Some(Box::new(block));
        self
    }

    /// Check whether literal text is present.
    #[inline]
    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Check whether a nested block is present.
    #[inline]
    pub fn has_block(&self) -> bool {
        self.block.is_some()
    }

    /// Check whether the value was marked nil.
    #[inline]
    pub fn is_nil(&self) -> bool {
        self.nil
    }

    pub(crate) fn into_parts(self) -> (Option<String>, bool, Option<Block<'a, S>>) {
        (self.text, self.nil, self.block)
    }
}

impl<S> Default for Content<'_, S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S> From<&str> for Content<'_, S> {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl<S> From<String> for Content<'_, S> {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl<S> fmt::Debug for Content<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Content")
            .field("text", &self.text)
            .field("nil", &self.nil)
            .field("block", &self.block.as_ref().map(|_| ".."))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TextContent<'a> = Content<'a, String>;

    #[test]
    fn test_text_concatenates() {
        let content = TextContent::text("a").with_text("b").with_text(String::from("c"));
        let (text, nil, block) = content.into_parts();
        assert_eq!(text.as_deref(), Some("abc"));
        assert!(!nil);
        assert!(block.is_none());
    }

    #[test]
    fn test_flags() {
        assert!(!TextContent::empty().has_text());
        assert!(TextContent::nil().is_nil());
        assert!(TextContent::block(|_| Ok(())).has_block());
        assert!(TextContent::from("x").has_text());
    }

    #[test]
    fn test_debug_hides_block() {
        let content = TextContent::block(|_| Ok(()));
        let debug = format!("{content:?}");
        assert!(debug.contains("block: Some(\"..\")"));
    }
}
