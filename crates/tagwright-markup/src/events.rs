//! Structured event output.

use crate::sink::{Sink, StartTag, Text};
use crate::{Attribute, Construct, Error, Result};

/// A consumer of element events rather than markup text.
///
/// Text and attribute values arrive repaired but unescaped; escaping is the
/// consumer's business. Indentation arrives as ordinary text.
pub trait EventTarget {
    /// An element opens.
    fn start_tag(&mut self, name: &str, attrs: &[Attribute<'_>]) -> Result<()>;

    /// An element closes.
    fn end_tag(&mut self, name: &str) -> Result<()>;

    /// Character data.
    fn text(&mut self, text: &str) -> Result<()>;

    /// Pre-rendered markup for a comment, CDATA section, declaration,
    /// processing instruction or raw insertion.
    ///
    /// The default rejects it. Targets overriding this must also override
    /// [`supports`](EventTarget::supports).
    fn raw(&mut self, _markup: &str, construct: Construct) -> Result<()> {
        Err(Error::UnsupportedConstruct { construct })
    }

    /// Whether [`raw`](EventTarget::raw) accepts `construct`.
    fn supports(&self, _construct: Construct) -> bool {
        false
    }
}

/// Adapts an [`EventTarget`] into a [`Sink`].
///
/// Self-closing elements become a start event immediately followed by an end
/// event.
#[derive(Debug)]
pub struct Events<T> {
    target: T,
}

impl<T: EventTarget> Events<T> {
    /// Wrap an event target.
    pub fn new(target: T) -> Self {
        Self { target }
    }

    /// Get a reference to the target.
    #[inline]
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Get a mutable reference to the target.
    #[inline]
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Unwrap the target.
    #[inline]
    pub fn into_inner(self) -> T {
        self.target
    }
}

impl<T: EventTarget> Sink for Events<T> {
    fn start_tag(&mut self, tag: &StartTag<'_>) -> Result<()> {
        self.target.start_tag(tag.name(), &tag.resolve())?;
        if tag.is_self_closing() {
            self.target.end_tag(tag.name())?;
        }
        Ok(())
    }

    fn end_tag(&mut self, name: &str) -> Result<()> {
        self.target.end_tag(name)
    }

    fn text(&mut self, text: &Text<'_>) -> Result<()> {
        self.target.text(&text.sanitized())
    }

    fn whitespace(&mut self, whitespace: &str) -> Result<()> {
        self.target.text(whitespace)
    }

    fn raw(&mut self, markup: &str, construct: Construct) -> Result<()> {
        self.target.raw(markup, construct)
    }

    fn supports(&self, construct: Construct) -> bool {
        self.target.supports(construct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AttributeSerializer, AttributeSet, Content, MarkupWriter, WriterOptions};
    use tagwright_xchar::{Charset, Quote};

    #[derive(Default)]
    struct Log(Vec<String>);

    impl EventTarget for Log {
        fn start_tag(&mut self, name: &str, attrs: &[Attribute<'_>]) -> Result<()> {
            let attrs: Vec<String> = attrs.iter().map(|a| format!("{}={}", a.name, a.value)).collect();
            self.0.push(format!("start {name} [{}]", attrs.join(",")));
            Ok(())
        }

        fn end_tag(&mut self, name: &str) -> Result<()> {
            self.0.push(format!("end {name}"));
            Ok(())
        }

        fn text(&mut self, text: &str) -> Result<()> {
            self.0.push(format!("text {text}"));
            Ok(())
        }
    }

    #[test]
    fn test_self_closing_is_start_then_end() {
        let charset = Charset::utf8();
        let attrs = AttributeSet::new().with("k", "v & w");
        let tag = StartTag::new("e", &attrs, AttributeSerializer::new(Quote::Double, &charset), true);

        let mut events = Events::new(Log::default());
        events.start_tag(&tag).unwrap();
        assert_eq!(events.into_inner().0, vec!["start e [k=v & w]", "end e"]);
    }

    #[test]
    fn test_text_is_unescaped() {
        let charset = Charset::utf8();
        let mut events = Events::new(Log::default());
        events.text(&Text::new("1 < 2", &charset)).unwrap();
        assert_eq!(events.target().0, vec!["text 1 < 2"]);
    }

    #[test]
    fn test_raw_rejected_by_default() {
        let mut events = Events::new(Log::default());
        let result = events.raw("<!-- x -->", Construct::Comment);
        assert!(matches!(
            result,
            Err(Error::UnsupportedConstruct {
                construct: Construct::Comment
            })
        ));
    }

    #[test]
    fn test_unsupported_construct_writes_nothing() {
        let mut xml = MarkupWriter::with_options(Events::new(Log::default()), WriterOptions::default().indent(2));
        let result = xml.emit_node(
            "a",
            &AttributeSet::new(),
            Content::block(|xml| xml.emit_comment("note")),
        );

        assert!(matches!(
            result,
            Err(Error::UnsupportedConstruct {
                construct: Construct::Comment
            })
        ));
        assert_eq!(xml.level(), 0);
        assert_eq!(
            xml.sink().target().0,
            vec!["start a []", "text \n", "end a", "text \n"]
        );
    }

    #[test]
    fn test_unsupported_instruction_keeps_encoding() {
        let mut xml = MarkupWriter::new(Events::new(Log::default()));
        let result = xml.instruct(&AttributeSet::new().with("encoding", "ISO-8859-1"));
        assert!(matches!(result, Err(Error::UnsupportedConstruct { .. })));
        assert_eq!(xml.charset().label(), "utf-8");
        assert!(xml.sink().target().0.is_empty());
    }
}
