//! Tagwright - programmatic XML generation.
//!
//! This crate provides a unified interface to the tagwright crates.
//!
//! # Crates
//!
//! - [`tagwright_xchar`] - Character repair and escaping, quote styles, target charsets
//! - [`tagwright_markup`] - The streaming markup writer and its output sinks
//!
//! # Example
//!
//! ```
//! use tagwright::prelude::*;
//!
//! let mut xml = MarkupWriter::with_options(String::new(), WriterOptions::default().indent(2));
//! xml.emit_node("person", &AttributeSet::new().with("name", "Alice"), Content::block(|xml| {
//!     xml.emit_node("email", &AttributeSet::new(), Content::text("alice@example.com"))?;
//!     xml.emit_node("admin", &AttributeSet::new(), Content::empty())
//! }))?;
//!
//! println!("{}", xml.sink());
//! # Ok::<(), tagwright::markup::Error>(())
//! ```

// Re-export all sub-crates
pub use tagwright_markup as markup;
pub use tagwright_xchar as xchar;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tagwright_markup::{
        AttrValue, AttributeSet, Content, DeclArg, EventTarget, Events, IoSink, MarkupWriter, Sink,
        WriterOptions,
    };
    #[cfg(feature = "full")]
    pub use tagwright_markup::QuickXmlTarget;
    pub use tagwright_xchar::{encode, encode_attribute, Charset, Quote};
}

// Re-export commonly used types at the crate root
pub use tagwright_markup::{Error, MarkupWriter, Result};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
