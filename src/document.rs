//! JSON document descriptions and their rendering.
//!
//! A document file looks like:
//!
//! ```json
//! {
//!   "instruct": { "encoding": "UTF-8" },
//!   "doctype": ["html", "PUBLIC", { "quoted": "-//W3C//DTD XHTML 1.0 Strict//EN" }],
//!   "root": {
//!     "name": "html",
//!     "attrs": { "lang": "en" },
//!     "children": [
//!       { "comment": "generated" },
//!       { "name": "body", "text": "Hello & welcome" }
//!     ]
//!   }
//! }
//! ```

use std::io::Write;

use serde::Deserialize;
use serde_json::{Map, Value};

use tagwright::markup::{Sink, XML_TARGET};
use tagwright::prelude::*;

/// A complete document description.
#[derive(Debug, Deserialize)]
pub struct Document {
    /// Attributes of the `<?xml ...?>` declaration. Omit for no declaration.
    #[serde(default)]
    pub instruct: Option<Map<String, Value>>,
    /// Arguments of `<!DOCTYPE ...>`: strings are bare, `{"quoted": s}` is a literal.
    #[serde(default)]
    pub doctype: Option<Vec<DoctypeArg>>,
    /// The document element.
    pub root: Node,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DoctypeArg {
    Bare(String),
    Quoted { quoted: String },
}

/// One node of the tree.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Comment { comment: String },
    CData { cdata: String },
    Raw { raw: String },
}

#[derive(Debug, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(default)]
    pub attrs: Map<String, Value>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub children: Option<Vec<Node>>,
    #[serde(default)]
    pub nil: bool,
}

impl Document {
    /// Parse a document description.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Render into `out`, transcoded to the declared encoding.
    pub fn render<W: Write>(&self, options: &WriterOptions, out: W) -> tagwright::Result<W> {
        let mut xml = MarkupWriter::with_options(IoSink::new(out), options.clone());
        self.emit(&mut xml)?;
        let mut out = xml.into_sink().into_inner();
        out.flush()?;
        Ok(out)
    }

    /// Render to a string. The `encoding` declared in the document only
    /// affects character degrading, not the string itself.
    pub fn render_to_string(&self, options: &WriterOptions) -> tagwright::Result<String> {
        let mut xml = MarkupWriter::with_options(String::new(), options.clone());
        self.emit(&mut xml)?;
        Ok(xml.into_sink())
    }

    fn emit<S: Sink>(&self, xml: &mut MarkupWriter<S>) -> tagwright::Result<()> {
        if let Some(instruct) = &self.instruct {
            xml.emit_instruction(XML_TARGET, &attributes(instruct), Content::empty())?;
        }
        if let Some(doctype) = &self.doctype {
            let args: Vec<DeclArg> = doctype
                .iter()
                .map(|arg| match arg {
                    DoctypeArg::Bare(value) => DeclArg::bare(value.as_str()),
                    DoctypeArg::Quoted { quoted } => DeclArg::quoted(quoted.as_str()),
                })
                .collect();
            xml.emit_declaration("DOCTYPE", &args)?;
        }
        emit_node(xml, &self.root)
    }
}

fn emit_node<'a, S: Sink + 'a>(xml: &mut MarkupWriter<S>, node: &'a Node) -> tagwright::Result<()> {
    match node {
        Node::Element(element) => {
            let mut content = Content::empty();
            if let Some(text) = &element.text {
                content = content.with_text(text.as_str());
            }
            if element.nil {
                content = content.with_nil();
            }
            if let Some(children) = &element.children {
                content = content.with_block(move |xml: &mut MarkupWriter<S>| {
                    children.iter().try_for_each(|child| emit_node(xml, child))
                });
            }
            xml.emit_node(&element.name, &attributes(&element.attrs), content)
        }
        Node::Comment { comment } => xml.emit_comment(comment.as_str()),
        Node::CData { cdata } => xml.emit_cdata(cdata.as_str()),
        Node::Raw { raw } => xml.emit_raw(raw),
    }
}

/// Convert a JSON object into an attribute set, keeping key order.
fn attributes(map: &Map<String, Value>) -> AttributeSet {
    map.iter()
        .map(|(name, value)| (name.as_str(), attr_value(value)))
        .collect()
}

fn attr_value(value: &Value) -> AttrValue {
    match value {
        Value::Null => AttrValue::Nil,
        Value::String(text) => AttrValue::Text(text.clone()),
        Value::Object(map) => match map.get("token") {
            Some(Value::String(token)) => AttrValue::token(token.as_str()),
            _ => AttrValue::Text(value.to_string()),
        },
        other => AttrValue::Text(other.to_string()),
    }
}
