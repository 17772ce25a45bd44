//! Streaming XML markup writer.
//!
//! [`MarkupWriter`] turns a sequence of calls into well-formed XML. Elements
//! nest through blocks that receive the writer back one level deeper, so the
//! structure of the calling code mirrors the structure of the document.
//!
//! # Output
//!
//! - [`String`] and `&mut String` collect markup text
//! - [`IoSink`] writes to any [`std::io::Write`], transcoded to the document
//!   encoding
//! - [`Events`] forwards start tag, end tag and text events to an
//!   [`EventTarget`], such as [`QuickXmlTarget`]
//!
//! # Example
//!
//! ```
//! use tagwright_markup::{AttributeSet, Content, MarkupWriter, WriterOptions};
//!
//! let mut xml = MarkupWriter::with_options(String::new(), WriterOptions::default().indent(2));
//! xml.instruct(&AttributeSet::new())?;
//! xml.emit_node("note", &AttributeSet::new().with("to", "Tove"), Content::block(|xml| {
//!     xml.emit_comment("draft")?;
//!     xml.emit_node("body", &AttributeSet::new(), Content::text("Don't forget me!"))
//! }))?;
//!
//! assert_eq!(
//!     xml.into_sink(),
//!     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
//!      <note to=\"Tove\">\n  <!-- draft -->\n  <body>Don't forget me!</body>\n</note>\n"
//! );
//! # Ok::<(), tagwright_markup::Error>(())
//! ```

mod attribute;
mod content;
mod error;
mod events;
mod options;
mod sink;
mod special;
mod writer;

#[cfg(feature = "xml-output")]
mod quick;

pub use attribute::{AttrValue, Attribute, AttributeSerializer, AttributeSet};
pub use content::{Block, Content};
pub use error::{Error, Result};
pub use events::{EventTarget, Events};
pub use options::WriterOptions;
pub use sink::{IoSink, Sink, StartTag, Text};
pub use special::{Construct, DeclArg, DECLARATION_KEYWORDS, INSTRUCTION_PRIORITY, XML_TARGET};
pub use writer::{MarkupWriter, NIL_ATTRIBUTE};

#[cfg(feature = "xml-output")]
pub use quick::QuickXmlTarget;
