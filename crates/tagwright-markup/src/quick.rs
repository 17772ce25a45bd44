//! Event target backed by a quick-xml writer.

use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::events::EventTarget;
use crate::{Attribute, Construct, Error, Result};

/// Sends element events to a [`quick_xml::Writer`].
///
/// quick-xml performs its own escaping. Special constructs are passed through
/// as pre-escaped text, so every writer operation is supported.
///
/// # Example
///
/// ```
/// use tagwright_markup::{AttributeSet, Content, Events, MarkupWriter, QuickXmlTarget};
///
/// let mut xml = MarkupWriter::new(Events::new(QuickXmlTarget::new(Vec::new())));
/// xml.emit_node("note", &AttributeSet::new().with("to", "Tove"), Content::text("a & b"))?;
///
/// let bytes = xml.into_sink().into_inner().into_inner();
/// assert_eq!(bytes, br#"<note to="Tove">a &amp; b</note>"#);
/// # Ok::<(), tagwright_markup::Error>(())
/// ```
pub struct QuickXmlTarget<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> QuickXmlTarget<W> {
    /// Create a target writing to `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            writer: Writer::new(inner),
        }
    }

    /// Wrap an already configured quick-xml writer.
    pub fn from_writer(writer: Writer<W>) -> Self {
        Self { writer }
    }

    /// Get a reference to the underlying writer.
    #[inline]
    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    /// Unwrap the underlying writer.
    #[inline]
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::Xml(e.to_string()))
    }
}

impl<W: Write> EventTarget for QuickXmlTarget<W> {
    fn start_tag(&mut self, name: &str, attrs: &[Attribute<'_>]) -> Result<()> {
        let mut elem = BytesStart::new(name);
        for attr in attrs {
            elem.push_attribute((attr.name, attr.value.as_ref()));
        }
        self.write(Event::Start(elem))
    }

    fn end_tag(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.write(Event::Text(BytesText::new(text)))
    }

    fn raw(&mut self, markup: &str, _construct: Construct) -> Result<()> {
        self.write(Event::Text(BytesText::from_escaped(markup)))
    }

    fn supports(&self, _construct: Construct) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_to_bytes() {
        let mut target = QuickXmlTarget::new(Vec::new());
        target
            .start_tag(
                "a",
                &[Attribute {
                    name: "x",
                    value: "1 < 2".into(),
                }],
            )
            .unwrap();
        target.text("fish & chips").unwrap();
        target.end_tag("a").unwrap();

        assert_eq!(
            String::from_utf8(target.into_inner()).unwrap(),
            r#"<a x="1 &lt; 2">fish &amp; chips</a>"#
        );
    }

    #[test]
    fn test_raw_passthrough() {
        let mut target = QuickXmlTarget::new(Vec::new());
        assert!(target.supports(Construct::Comment));
        target.raw("<!-- hi -->", Construct::Comment).unwrap();
        assert_eq!(target.get_ref().as_slice(), b"<!-- hi -->");
    }
}
