//! Output sinks.
//!
//! A [`Sink`] is where the writer sends everything it produces. Two flavours
//! ship with the crate:
//!
//! - text accumulators: [`String`] and [`IoSink`], which receive rendered markup
//! - structured consumers: [`Events`](crate::Events), which forwards start tag,
//!   end tag and text events to an [`EventTarget`](crate::EventTarget)

use std::borrow::Cow;
use std::io::Write;

use tagwright_xchar::encoding_rs::{Encoding, UTF_8};
use tagwright_xchar::{encode, sanitize, Charset};

use crate::{Attribute, AttributeSerializer, AttributeSet, Construct, Result};

/// An element start tag about to be written.
#[derive(Debug, Clone, Copy)]
pub struct StartTag<'a> {
    name: &'a str,
    attrs: &'a AttributeSet,
    serializer: AttributeSerializer<'a>,
    self_closing: bool,
}

impl<'a> StartTag<'a> {
    pub(crate) fn new(
        name: &'a str,
        attrs: &'a AttributeSet,
        serializer: AttributeSerializer<'a>,
        self_closing: bool,
    ) -> Self {
        Self {
            name,
            attrs,
            serializer,
            self_closing,
        }
    }

    /// Element name.
    #[inline]
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Attributes as given, nil entries included.
    #[inline]
    pub fn attributes(&self) -> &'a AttributeSet {
        self.attrs
    }

    /// Whether the element has no content and closes immediately.
    #[inline]
    pub fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    /// Attributes resolved for a structured consumer.
    pub fn resolve(&self) -> Vec<Attribute<'a>> {
        self.serializer.resolve(self.attrs, &[])
    }

    /// Append `<name attrs>` (or `<name attrs/>`) to `out`.
    pub fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        self.serializer.write_to(out, self.attrs, &[]);
        if self.self_closing {
            out.push('/');
        }
        out.push('>');
    }

    /// Render the tag to a new string.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 2);
        self.write_to(&mut out);
        out
    }
}

/// Text content about to be written.
#[derive(Debug, Clone, Copy)]
pub struct Text<'a> {
    raw: &'a str,
    charset: &'a Charset,
}

impl<'a> Text<'a> {
    pub(crate) fn new(raw: &'a str, charset: &'a Charset) -> Self {
        Self { raw, charset }
    }

    /// Text exactly as the caller gave it.
    #[inline]
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Text ready to be placed in markup: repaired, escaped and
    /// representable in the document charset.
    pub fn escaped(&self) -> Cow<'a, str> {
        self.charset.represent(encode(self.raw))
    }

    /// Text with invalid characters repaired but nothing escaped.
    pub fn sanitized(&self) -> Cow<'a, str> {
        sanitize(self.raw)
    }
}

/// Destination for generated markup.
pub trait Sink {
    /// Write a start tag, or a complete empty element if it is self-closing.
    fn start_tag(&mut self, tag: &StartTag<'_>) -> Result<()>;

    /// Write an end tag.
    fn end_tag(&mut self, name: &str) -> Result<()>;

    /// Write text content.
    fn text(&mut self, text: &Text<'_>) -> Result<()>;

    /// Write indentation or a line break.
    fn whitespace(&mut self, whitespace: &str) -> Result<()>;

    /// Write markup that is already complete and escaped.
    fn raw(&mut self, markup: &str, construct: Construct) -> Result<()>;

    /// Called when the writer switches to a new document charset.
    fn set_charset(&mut self, _charset: &Charset) {}

    /// Whether [`raw`](Sink::raw) accepts `construct`. Text sinks take
    /// everything.
    fn supports(&self, _construct: Construct) -> bool {
        true
    }
}

impl Sink for String {
    fn start_tag(&mut self, tag: &StartTag<'_>) -> Result<()> {
        tag.write_to(self);
        Ok(())
    }

    fn end_tag(&mut self, name: &str) -> Result<()> {
        self.push_str("</");
        self.push_str(name);
        self.push('>');
        Ok(())
    }

    fn text(&mut self, text: &Text<'_>) -> Result<()> {
        self.push_str(&text.escaped());
        Ok(())
    }

    fn whitespace(&mut self, whitespace: &str) -> Result<()> {
        self.push_str(whitespace);
        Ok(())
    }

    fn raw(&mut self, markup: &str, _construct: Construct) -> Result<()> {
        self.push_str(markup);
        Ok(())
    }
}

impl<T: Sink + ?Sized> Sink for &mut T {
    fn start_tag(&mut self, tag: &StartTag<'_>) -> Result<()> {
        (**self).start_tag(tag)
    }

    fn end_tag(&mut self, name: &str) -> Result<()> {
        (**self).end_tag(name)
    }

    fn text(&mut self, text: &Text<'_>) -> Result<()> {
        (**self).text(text)
    }

    fn whitespace(&mut self, whitespace: &str) -> Result<()> {
        (**self).whitespace(whitespace)
    }

    fn raw(&mut self, markup: &str, construct: Construct) -> Result<()> {
        (**self).raw(markup, construct)
    }

    fn set_charset(&mut self, charset: &Charset) {
        (**self).set_charset(charset)
    }

    fn supports(&self, construct: Construct) -> bool {
        (**self).supports(construct)
    }
}

/// A sink writing bytes to any [`std::io::Write`].
///
/// Output is produced in the document charset, so the bytes match the
/// `encoding` declared by an XML declaration.
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
    encoding: &'static Encoding,
}

impl<W: Write> IoSink<W> {
    /// Wrap a writer. Output is UTF-8 until the charset changes.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            encoding: UTF_8,
        }
    }

    /// Get a reference to the underlying writer.
    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Get a mutable reference to the underlying writer.
    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Unwrap the underlying writer.
    #[inline]
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Encoding bytes are currently produced in.
    #[inline]
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    fn write_str(&mut self, text: &str) -> Result<()> {
        if self.encoding == UTF_8 {
            self.inner.write_all(text.as_bytes())?;
        } else {
            let (bytes, _, _) = self.encoding.encode(text);
            self.inner.write_all(&bytes)?;
        }
        Ok(())
    }
}

impl<W: Write> Sink for IoSink<W> {
    fn start_tag(&mut self, tag: &StartTag<'_>) -> Result<()> {
        self.write_str(&tag.render())
    }

    fn end_tag(&mut self, name: &str) -> Result<()> {
        self.write_str("</")?;
        self.write_str(name)?;
        self.write_str(">")
    }

    fn text(&mut self, text: &Text<'_>) -> Result<()> {
        self.write_str(&text.escaped())
    }

    fn whitespace(&mut self, whitespace: &str) -> Result<()> {
        self.write_str(whitespace)
    }

    fn raw(&mut self, markup: &str, _construct: Construct) -> Result<()> {
        self.write_str(markup)
    }

    fn set_charset(&mut self, charset: &Charset) {
        self.encoding = charset.output_encoding();
    }
}
