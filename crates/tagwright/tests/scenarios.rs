//! End-to-end document generation through the facade.

use std::sync::{Arc, Mutex};
use std::thread;

use tagwright::markup::{Construct, Error, Text};
use tagwright::prelude::*;
use tagwright::xchar::encode_bytes;

fn indented(indent: usize) -> MarkupWriter<String> {
    MarkupWriter::with_options(String::new(), WriterOptions::default().indent(indent))
}

#[test]
fn test_text_element() {
    let mut xml = indented(0);
    xml.emit_node("person", &AttributeSet::new().with("name", "Alice"), Content::text("hi"))
        .unwrap();
    assert_eq!(xml.into_sink(), r#"<person name="Alice">hi</person>"#);
}

#[test]
fn test_nested_block() {
    let mut xml = indented(2);
    xml.emit_node(
        "a",
        &AttributeSet::new(),
        Content::block(|xml| xml.emit_node("b", &AttributeSet::new(), Content::empty())),
    )
    .unwrap();
    assert_eq!(xml.into_sink(), "<a>\n  <b/>\n</a>\n");
}

#[test]
fn test_attribute_line_breaks() {
    assert_eq!(encode_attribute("line1\nline2", Quote::Double), "line1&#10;line2");
}

#[test]
fn test_cdata_terminator() {
    let mut xml = indented(0);
    xml.emit_cdata("x]]>y").unwrap();
    assert_eq!(xml.into_sink(), "<![CDATA[x]]]]><![CDATA[>y]]>");
}

#[test]
fn test_nil_attribute() {
    let attrs = AttributeSet::new().with("flag", AttrValue::Nil);

    let mut plain = indented(0);
    plain.emit_node("item", &attrs, Content::empty()).unwrap();
    assert_eq!(plain.into_sink(), "<item/>");

    let mut explicit = MarkupWriter::with_options(
        String::new(),
        WriterOptions::default().explicit_nil_handling(true),
    );
    explicit.emit_node("item", &attrs, Content::empty()).unwrap();
    assert_eq!(explicit.into_sink(), r#"<item nil="true"/>"#);
}

#[test]
fn test_mixed_content_writes_nothing() {
    let mut xml = indented(2);
    let result = xml.emit_node(
        "p",
        &AttributeSet::new(),
        Content::text("hi").with_block(|xml: &mut MarkupWriter<String>| xml.emit_text("more")),
    );
    assert!(matches!(result, Err(Error::InvalidArgumentCombination { .. })));
    assert!(xml.into_sink().is_empty());
}

#[test]
fn test_escaping_has_single_pass() {
    for input in ["a & b", "<tag>", "x > y && y < z", "&amp;"] {
        let once = encode(input).into_owned();
        let stripped = once
            .replace("&amp;", "")
            .replace("&lt;", "")
            .replace("&gt;", "");
        assert!(!stripped.contains(['&', '<', '>']), "{input:?} -> {once:?}");
    }
    // Repair passes leave already-repaired text alone.
    let repaired = tagwright::xchar::sanitize("a\u{1}b\u{92}c").into_owned();
    assert_eq!(tagwright::xchar::sanitize(&repaired), repaired);
}

#[test]
fn test_invalid_code_points_replaced_in_place() {
    assert_eq!(encode("ab\u{0}cd\u{FFFE}ef"), "ab\u{FFFD}cd\u{FFFD}ef");
}

#[test]
fn test_legacy_bytes() {
    assert_eq!(encode_bytes(b"it\x92s"), "it\u{2019}s");
    assert_eq!(encode("\u{93}quoted\u{94}"), "\u{201C}quoted\u{201D}");
}

#[test]
fn test_attribute_order() {
    let attrs = AttributeSet::new().with("b", "2").with("a", "1");

    let mut xml = indented(0);
    xml.emit_node("x", &attrs, Content::empty()).unwrap();
    assert_eq!(xml.into_sink(), r#"<x b="2" a="1"/>"#);

    let charset = Charset::utf8();
    let serializer = tagwright::markup::AttributeSerializer::new(Quote::Double, &charset);
    assert_eq!(serializer.serialize(&attrs, &["a"]), r#" a="1" b="2""#);
}

#[test]
fn test_level_restored_after_failure() {
    let mut xml = indented(2);
    let before = xml.level();
    let result = xml.emit_node(
        "outer",
        &AttributeSet::new(),
        Content::block(|xml| {
            xml.emit_comment("before failure")?;
            xml.emit_comment(Content::block(|_: &mut MarkupWriter<String>| Ok(())))
        }),
    );

    assert!(matches!(
        result,
        Err(Error::IllegalBlockUsage {
            construct: Construct::Comment
        })
    ));
    assert_eq!(xml.level(), before);
    assert_eq!(xml.into_sink(), "<outer>\n  <!-- before failure -->\n</outer>\n");
}

#[test]
fn test_full_document() {
    let mut xml = indented(2);
    xml.instruct(&AttributeSet::new()).unwrap();
    xml.emit_declaration(
        "DOCTYPE",
        &[
            DeclArg::bare("html"),
            DeclArg::bare("PUBLIC"),
            "-//W3C//DTD XHTML 1.0 Strict//EN".into(),
            "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd".into(),
        ],
    )
    .unwrap();
    xml.emit_node(
        "html",
        &AttributeSet::new().with("xmlns", "http://www.w3.org/1999/xhtml"),
        Content::block(|xml| {
            xml.emit_node(
                "head",
                &AttributeSet::new(),
                Content::block(|xml| xml.emit_node("title", &AttributeSet::new(), Content::text("Q & A"))),
            )?;
            xml.emit_node(
                "body",
                &AttributeSet::new(),
                Content::block(|xml| {
                    xml.emit_node(
                        "a",
                        &AttributeSet::new().with("href", "/?x=1&y=\"2\""),
                        Content::text("link"),
                    )?;
                    xml.emit_node("br", &AttributeSet::new(), Content::empty())
                }),
            )
        }),
    )
    .unwrap();

    let expected = concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\" ",
        "\"http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd\">\n",
        "<html xmlns=\"http://www.w3.org/1999/xhtml\">\n",
        "  <head>\n",
        "    <title>Q &amp; A</title>\n",
        "  </head>\n",
        "  <body>\n",
        "    <a href=\"/?x=1&amp;y=&quot;2&quot;\">link</a>\n",
        "    <br/>\n",
        "  </body>\n",
        "</html>\n",
    );
    assert_eq!(xml.into_sink(), expected);
}

#[test]
fn test_io_sink_writes_declared_encoding() {
    let mut xml = MarkupWriter::new(IoSink::new(Vec::new()));
    xml.instruct(&AttributeSet::new().with("encoding", "ISO-8859-1")).unwrap();
    xml.emit_node("p", &AttributeSet::new(), Content::text("café")).unwrap();

    let bytes = xml.into_sink().into_inner();
    let mut expected = br#"<?xml version="1.0" encoding="ISO-8859-1"?><p>caf"#.to_vec();
    expected.extend_from_slice(&[0xE9]);
    expected.extend_from_slice(b"</p>");
    assert_eq!(bytes, expected);
}

#[cfg(feature = "full")]
#[test]
fn test_quick_xml_target() {
    let mut xml = MarkupWriter::new(Events::new(QuickXmlTarget::new(Vec::new())));
    xml.emit_node(
        "list",
        &AttributeSet::new().with("kind", "a<b"),
        Content::block(|xml| {
            xml.emit_node("item", &AttributeSet::new(), Content::text("fish & chips"))?;
            xml.emit_node("item", &AttributeSet::new(), Content::empty())
        }),
    )
    .unwrap();

    let bytes = xml.into_sink().into_inner().into_inner();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"<list kind="a&lt;b"><item>fish &amp; chips</item><item></item></list>"#
    );
}

#[derive(Default)]
struct Outline {
    lines: Vec<String>,
}

impl EventTarget for Outline {
    fn start_tag(&mut self, name: &str, attrs: &[tagwright::markup::Attribute<'_>]) -> tagwright::Result<()> {
        self.lines.push(format!("open {name} ({})", attrs.len()));
        Ok(())
    }

    fn end_tag(&mut self, name: &str) -> tagwright::Result<()> {
        self.lines.push(format!("close {name}"));
        Ok(())
    }

    fn text(&mut self, text: &str) -> tagwright::Result<()> {
        if !text.trim().is_empty() {
            self.lines.push(format!("text {text}"));
        }
        Ok(())
    }
}

#[test]
fn test_custom_event_target() {
    let mut xml = MarkupWriter::with_options(Events::new(Outline::default()), WriterOptions::default().indent(2));
    xml.emit_node(
        "a",
        &AttributeSet::new().with("x", "1"),
        Content::block(|xml| xml.emit_node("b", &AttributeSet::new(), Content::text("1 < 2"))),
    )
    .unwrap();

    let outline = xml.into_sink().into_inner();
    assert_eq!(
        outline.lines,
        ["open a (1)", "open b (0)", "text 1 < 2", "close b", "close a"]
    );

    let mut xml = MarkupWriter::new(Events::new(Outline::default()));
    assert!(matches!(
        xml.emit_comment("nope"),
        Err(Error::UnsupportedConstruct {
            construct: Construct::Comment
        })
    ));
}

/// Records every sink call, for checking what reaches a custom sink.
#[derive(Default)]
struct Recorder {
    calls: Vec<String>,
}

impl Sink for Recorder {
    fn start_tag(&mut self, tag: &tagwright::markup::StartTag<'_>) -> tagwright::Result<()> {
        self.calls.push(tag.render());
        Ok(())
    }

    fn end_tag(&mut self, name: &str) -> tagwright::Result<()> {
        self.calls.push(format!("</{name}>"));
        Ok(())
    }

    fn text(&mut self, text: &Text<'_>) -> tagwright::Result<()> {
        self.calls.push(text.escaped().into_owned());
        Ok(())
    }

    fn whitespace(&mut self, _whitespace: &str) -> tagwright::Result<()> {
        Ok(())
    }

    fn raw(&mut self, markup: &str, _construct: Construct) -> tagwright::Result<()> {
        self.calls.push(markup.to_string());
        Ok(())
    }
}

#[test]
fn test_custom_sink() {
    let mut xml = MarkupWriter::with_options(Recorder::default(), WriterOptions::default().indent(4));
    xml.emit_node("a", &AttributeSet::new(), Content::text("x&y")).unwrap();
    xml.emit_raw("<b/>").unwrap();
    assert_eq!(xml.sink().calls, ["<a>", "x&amp;y", "</a>", "<b/>"]);
}

#[test]
fn test_one_writer_per_thread() {
    let outputs = Arc::new(Mutex::new(Vec::new()));
    let handles: Vec<_> = (0..4)
        .map(|n| {
            let outputs = Arc::clone(&outputs);
            thread::spawn(move || {
                let mut xml = MarkupWriter::with_options(String::new(), WriterOptions::default().indent(1));
                xml.emit_node(
                    "doc",
                    &AttributeSet::new().with("n", n),
                    Content::block(|xml| xml.emit_node("leaf", &AttributeSet::new(), Content::empty())),
                )
                .unwrap();
                outputs.lock().unwrap().push((n, xml.into_sink()));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut outputs = outputs.lock().unwrap().clone();
    outputs.sort();
    for (n, doc) in outputs {
        assert_eq!(doc, format!("<doc n=\"{n}\">\n <leaf/>\n</doc>\n"));
    }
}
