//! Comments, CDATA sections, declarations and processing instructions.

use std::borrow::Cow;
use std::fmt;

use tagwright_xchar::{sanitize, Charset};

use crate::sink::{Sink, Text};
use crate::{AttrValue, AttributeSet, Content, Error, MarkupWriter, Result};

/// Declaration keywords accepted by [`MarkupWriter::emit_declaration`].
pub const DECLARATION_KEYWORDS: &[&str] = &["DOCTYPE", "ELEMENT", "ATTLIST", "ENTITY", "NOTATION"];

/// Attribute order used for processing instructions.
pub const INSTRUCTION_PRIORITY: &[&str] = &["version", "encoding", "standalone"];

/// Target of the XML declaration.
pub const XML_TARGET: &str = "xml";

/// Kinds of output other than elements and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    /// `<!-- ... -->`
    Comment,
    /// `<![CDATA[ ... ]]>`
    CData,
    /// `<!DOCTYPE ...>` and friends
    Declaration,
    /// `<?target ...?>`
    Instruction,
    /// Caller-supplied markup.
    Raw,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Construct::Comment => "comment",
            Construct::CData => "CDATA section",
            Construct::Declaration => "declaration",
            Construct::Instruction => "processing instruction",
            Construct::Raw => "raw markup",
        };
        f.write_str(name)
    }
}

/// One argument of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclArg {
    /// A literal, written in quotes: `"-//W3C//DTD XHTML 1.0 Strict//EN"`.
    Quoted(String),
    /// A keyword or name, written bare: `html`, `PUBLIC`.
    Bare(String),
}

impl DeclArg {
    /// A quoted literal.
    pub fn quoted(value: impl Into<String>) -> Self {
        DeclArg::Quoted(value.into())
    }

    /// A bare keyword.
    pub fn bare(value: impl Into<String>) -> Self {
        DeclArg::Bare(value.into())
    }

    fn write_to(&self, out: &mut String, charset: &Charset) {
        out.push(' ');
        match self {
            DeclArg::Bare(value) => out.push_str(&sanitize(value)),
            DeclArg::Quoted(value) => {
                let value = sanitize(value);
                // A literal may not contain its own delimiter. Single quotes
                // are used when only `"` appears; with both, `"` is spelled
                // as an entity.
                let (quote, value) = match (value.contains('"'), value.contains('\'')) {
                    (true, false) => ('\'', value),
                    (true, true) => ('"', Cow::Owned(value.replace('"', "&quot;"))),
                    _ => ('"', value),
                };
                out.push(quote);
                out.push_str(&charset.represent(value));
                out.push(quote);
            }
        }
    }
}

impl From<&str> for DeclArg {
    fn from(value: &str) -> Self {
        DeclArg::quoted(value)
    }
}

impl From<String> for DeclArg {
    fn from(value: String) -> Self {
        DeclArg::Quoted(value)
    }
}

impl<S: Sink> MarkupWriter<S> {
    /// Write `<!-- text -->` on its own line.
    ///
    /// Every `--` in the text is broken up as `- -`, which XML does not allow
    /// inside a comment.
    ///
    /// # Errors
    ///
    /// [`Error::IllegalBlockUsage`] if `content` carries a block.
    pub fn emit_comment<'a>(&mut self, content: impl Into<Content<'a, S>>) -> Result<()> {
        let text = special_text(content.into(), Construct::Comment)?;
        let mut body = Text::new(&text, self.charset()).escaped().into_owned();
        while body.contains("--") {
            body = body.replace("--", "- -");
        }
        self.special(&format!("<!-- {body} -->"), Construct::Comment)
    }

    /// Write `<![CDATA[text]]>` on its own line.
    ///
    /// A `]]>` inside the text is split across two sections so it cannot end
    /// the first one early.
    ///
    /// # Errors
    ///
    /// [`Error::IllegalBlockUsage`] if `content` carries a block.
    pub fn emit_cdata<'a>(&mut self, content: impl Into<Content<'a, S>>) -> Result<()> {
        let text = special_text(content.into(), Construct::CData)?;
        let data = sanitize(&text).replace("]]>", "]]]]><![CDATA[>");
        self.special(&format!("<![CDATA[{data}]]>"), Construct::CData)
    }

    /// Write `<!NAME args...>` on its own line.
    ///
    /// # Example
    ///
    /// ```
    /// use tagwright_markup::{DeclArg, MarkupWriter};
    ///
    /// let mut xml = MarkupWriter::new(String::new());
    /// xml.emit_declaration("DOCTYPE", &[
    ///     DeclArg::bare("html"),
    ///     DeclArg::bare("PUBLIC"),
    ///     "-//W3C//DTD XHTML 1.0 Strict//EN".into(),
    /// ])?;
    /// assert_eq!(xml.sink(), r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN">"#);
    /// # Ok::<(), tagwright_markup::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::UnknownConstruct`] if `name` is not one of
    /// [`DECLARATION_KEYWORDS`].
    pub fn emit_declaration(&mut self, name: &str, args: &[DeclArg]) -> Result<()> {
        self.declaration(name, args, None::<fn(&mut Self) -> Result<()>>)
    }

    /// Write `<!NAME args... [` then the block's output one level deeper,
    /// then `]>`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownConstruct`] for an unknown keyword. Errors from the
    /// block are returned after the declaration has been closed.
    pub fn emit_declaration_block<F>(&mut self, name: &str, args: &[DeclArg], block: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.declaration(name, args, Some(block))
    }

    /// Write `<?target attrs?>` with the standard attribute order.
    ///
    /// For the `xml` target the attributes are merged over
    /// `version="1.0" encoding="UTF-8"` and the resulting encoding becomes
    /// the writer's document encoding. Text content is written after the
    /// attributes as instruction data.
    ///
    /// # Errors
    ///
    /// [`Error::IllegalBlockUsage`] if `content` carries a block,
    /// [`Error::UnknownConstruct`] for an empty target or a case variant of
    /// the reserved `xml` target.
    pub fn emit_instruction<'a>(
        &mut self,
        target: &str,
        attrs: &AttributeSet,
        content: impl Into<Content<'a, S>>,
    ) -> Result<()> {
        self.emit_instruction_ordered(target, attrs, INSTRUCTION_PRIORITY, content)
    }

    /// [`emit_instruction`](Self::emit_instruction) with an explicit attribute
    /// priority list.
    pub fn emit_instruction_ordered<'a>(
        &mut self,
        target: &str,
        attrs: &AttributeSet,
        priority: &[&str],
        content: impl Into<Content<'a, S>>,
    ) -> Result<()> {
        let data = special_text(content.into(), Construct::Instruction)?;

        if target.is_empty() || (target.eq_ignore_ascii_case(XML_TARGET) && target != XML_TARGET) {
            return Err(Error::UnknownConstruct {
                kind: Construct::Instruction,
                name: target.to_string(),
            });
        }

        self.check_supported(Construct::Instruction)?;

        let attrs = if target == XML_TARGET {
            let mut merged = AttributeSet::new().with("version", "1.0").with("encoding", "UTF-8");
            merged.merge(attrs);
            if let Some(label) = merged.get("encoding").and_then(AttrValue::as_str) {
                self.set_encoding(label);
            }
            Cow::Owned(merged)
        } else {
            Cow::Borrowed(attrs)
        };

        let mut markup = String::from("<?");
        markup.push_str(target);
        self.serializer().write_to(&mut markup, &attrs, priority);
        if !data.is_empty() {
            markup.push(' ');
            markup.push_str(&sanitize(&data).replace("?>", "? >"));
        }
        markup.push_str("?>");
        self.special(&markup, Construct::Instruction)
    }

    /// Write the XML declaration, `<?xml version="1.0" encoding="UTF-8"?>` by
    /// default.
    pub fn instruct(&mut self, attrs: &AttributeSet) -> Result<()> {
        self.emit_instruction(XML_TARGET, attrs, Content::empty())
    }

    fn declaration<F>(&mut self, name: &str, args: &[DeclArg], block: Option<F>) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        if !DECLARATION_KEYWORDS.contains(&name) {
            return Err(Error::UnknownConstruct {
                kind: Construct::Declaration,
                name: name.to_string(),
            });
        }

        self.check_supported(Construct::Declaration)?;

        let mut markup = format!("<!{name}");
        for arg in args {
            arg.write_to(&mut markup, self.charset());
        }

        self.indent()?;
        match block {
            Some(block) => {
                markup.push_str(" [");
                self.sink_mut().raw(&markup, Construct::Declaration)?;
                self.newline()?;
                let result = self.nested(block);
                let closed = self.close_declaration();
                result.and(closed)
            }
            None => {
                markup.push('>');
                self.sink_mut().raw(&markup, Construct::Declaration)?;
                self.newline()
            }
        }
    }

    fn close_declaration(&mut self) -> Result<()> {
        self.sink_mut().raw("]>", Construct::Declaration)?;
        self.newline()
    }
}

/// Text of a construct that cannot have children.
fn special_text<S>(content: Content<'_, S>, construct: Construct) -> Result<String> {
    let (text, _, block) = content.into_parts();
    if block.is_some() {
        return Err(Error::IllegalBlockUsage { construct });
    }
    Ok(text.unwrap_or_default())
}
