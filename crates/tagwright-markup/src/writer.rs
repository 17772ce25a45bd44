//! The markup writer.

use std::borrow::Cow;
use std::ops::{Deref, DerefMut};

use tagwright_xchar::Charset;

use crate::sink::{Sink, StartTag, Text};
use crate::{AttrValue, AttributeSerializer, AttributeSet, Construct, Content, Error, Result, WriterOptions};

/// Attribute added to elements carrying a nil value when explicit nil
/// handling is enabled.
pub const NIL_ATTRIBUTE: &str = "nil";

/// Streaming XML writer.
///
/// Each [`emit_node`](Self::emit_node) call writes one complete element.
/// Children are written by a block that receives the writer back, one nesting
/// level deeper. The level is restored when the block returns, whether it
/// succeeded, failed or panicked, and the element's end tag is always written.
///
/// A writer owns its sink and its nesting state; generate documents in
/// parallel with one writer per document.
///
/// # Example
///
/// ```
/// use tagwright_markup::{AttributeSet, Content, MarkupWriter, WriterOptions};
///
/// let mut xml = MarkupWriter::with_options(String::new(), WriterOptions::default().indent(2));
/// xml.emit_node("person", &AttributeSet::new().with("name", "Alice"), Content::block(|xml| {
///     xml.emit_node("email", &AttributeSet::new(), Content::text("alice@example.com"))?;
///     xml.emit_node("admin", &AttributeSet::new(), Content::empty())
/// }))?;
///
/// assert_eq!(
///     xml.into_sink(),
///     "<person name=\"Alice\">\n  <email>alice@example.com</email>\n  <admin/>\n</person>\n"
/// );
/// # Ok::<(), tagwright_markup::Error>(())
/// ```
#[derive(Debug)]
pub struct MarkupWriter<S> {
    sink: S,
    options: WriterOptions,
    level: usize,
    charset: Charset,
}

impl<S: Sink> MarkupWriter<S> {
    /// Create a writer with default options: no indentation, double quotes,
    /// UTF-8.
    pub fn new(sink: S) -> Self {
        Self::with_options(sink, WriterOptions::default())
    }

    /// Create a writer with the given options.
    pub fn with_options(mut sink: S, options: WriterOptions) -> Self {
        let charset = Charset::for_label(&options.encoding);
        sink.set_charset(&charset);
        Self {
            sink,
            level: options.initial_level,
            options,
            charset,
        }
    }

    /// Current nesting level.
    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Options in effect. The encoding reflects the last adopted charset.
    #[inline]
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Current document charset.
    #[inline]
    pub fn charset(&self) -> &Charset {
        &self.charset
    }

    /// Get a reference to the sink.
    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get a mutable reference to the sink.
    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the writer and return the sink with everything written to it.
    #[inline]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Switch the document charset for all text written from now on.
    pub fn set_encoding(&mut self, label: &str) {
        self.charset = Charset::for_label(label);
        log::debug!("adopting document encoding '{}'", self.charset.label());
        self.options.encoding = self.charset.label().to_string();
        self.sink.set_charset(&self.charset);
    }

    /// Write one element.
    ///
    /// - empty content: `<name attrs/>`
    /// - text: `<name attrs>text</name>`
    /// - block: `<name attrs>`, the block's output one level deeper, `</name>`
    ///
    /// With indentation enabled the element starts at the current indentation
    /// and every tag line ends with a newline.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgumentCombination`] if `content` has both text and a
    /// block; nothing is written in that case. Errors from the block are
    /// returned after the end tag has been written.
    pub fn emit_node<'a>(&mut self, name: &str, attrs: &AttributeSet, content: Content<'a, S>) -> Result<()> {
        let (text, nil, block) = content.into_parts();
        if text.is_some() && block.is_some() {
            return Err(Error::InvalidArgumentCombination {
                name: name.to_string(),
            });
        }

        let attrs = self.effective_attributes(attrs, nil);
        match (text, block) {
            (_, Some(block)) => {
                self.indent()?;
                self.start_tag(name, &attrs, false)?;
                self.newline()?;
                let result = self.nested(block);
                let closed = self.close_line(name);
                result.and(closed)
            }
            (Some(text), None) => {
                self.indent()?;
                self.start_tag(name, &attrs, false)?;
                self.emit_text(&text)?;
                self.sink.end_tag(name)?;
                self.newline()
            }
            (None, None) => {
                self.indent()?;
                self.start_tag(name, &attrs, true)?;
                self.newline()
            }
        }
    }

    /// Write encoded text at the current position, without indentation.
    pub fn emit_text(&mut self, text: &str) -> Result<()> {
        let text = Text::new(text, &self.charset);
        self.sink.text(&text)
    }

    /// Write markup verbatim. The caller is responsible for its validity.
    pub fn emit_raw(&mut self, markup: &str) -> Result<()> {
        self.check_supported(Construct::Raw)?;
        self.sink.raw(markup, Construct::Raw)
    }

    /// Run `block` one nesting level deeper.
    pub(crate) fn nested<F>(&mut self, block: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let mut scope = NestingScope::enter(self);
        block(&mut *scope)
    }

    /// Write a complete special construct on its own line.
    pub(crate) fn special(&mut self, markup: &str, construct: Construct) -> Result<()> {
        self.check_supported(construct)?;
        self.indent()?;
        self.sink.raw(markup, construct)?;
        self.newline()
    }

    /// Fail before anything is written if the sink cannot take `construct`.
    pub(crate) fn check_supported(&self, construct: Construct) -> Result<()> {
        if self.sink.supports(construct) {
            Ok(())
        } else {
            Err(Error::UnsupportedConstruct { construct })
        }
    }

    pub(crate) fn serializer(&self) -> AttributeSerializer<'_> {
        AttributeSerializer::new(self.options.quote, &self.charset)
    }

    pub(crate) fn indent(&mut self) -> Result<()> {
        if self.options.indent == 0 || self.level == 0 {
            return Ok(());
        }
        let whitespace = " ".repeat(self.level * self.options.indent);
        self.sink.whitespace(&whitespace)
    }

    pub(crate) fn newline(&mut self) -> Result<()> {
        if self.options.indent == 0 {
            return Ok(());
        }
        self.sink.whitespace("\n")
    }

    fn start_tag(&mut self, name: &str, attrs: &AttributeSet, self_closing: bool) -> Result<()> {
        let serializer = AttributeSerializer::new(self.options.quote, &self.charset);
        let tag = StartTag::new(name, attrs, serializer, self_closing);
        self.sink.start_tag(&tag)
    }

    fn close_line(&mut self, name: &str) -> Result<()> {
        self.indent()?;
        self.sink.end_tag(name)?;
        self.newline()
    }

    fn effective_attributes<'x>(&self, attrs: &'x AttributeSet, nil: bool) -> Cow<'x, AttributeSet> {
        if !self.options.explicit_nil_handling || !(nil || attrs.has_nil()) {
            return Cow::Borrowed(attrs);
        }
        if attrs.get(NIL_ATTRIBUTE).is_some_and(|value| !value.is_nil()) {
            return Cow::Borrowed(attrs);
        }

        let mut marked = attrs.clone();
        marked.insert(NIL_ATTRIBUTE, AttrValue::token("true"));
        Cow::Owned(marked)
    }
}

/// Holds the writer one level deeper for as long as it lives.
struct NestingScope<'w, S> {
    writer: &'w mut MarkupWriter<S>,
}

impl<'w, S> NestingScope<'w, S> {
    fn enter(writer: &'w mut MarkupWriter<S>) -> Self {
        writer.level += 1;
        Self { writer }
    }
}

impl<S> Deref for NestingScope<'_, S> {
    type Target = MarkupWriter<S>;

    fn deref(&self) -> &Self::Target {
        self.writer
    }
}

impl<S> DerefMut for NestingScope<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.writer
    }
}

impl<S> Drop for NestingScope<'_, S> {
    fn drop(&mut self) {
        self.writer.level -= 1;
    }
}
