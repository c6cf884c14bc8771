//! Writer for the dict/list vocabulary.
//!
//! Output is emitted as `quick-xml` events in compact form (no indentation)
//! so that leaf text survives a decode untouched. Elements are written with
//! the [`REST_PREFIX`] prefix, which callers must bind to
//! [`REST_NAMESPACE`]; [`encode_entry`] does so.
//!
//! Empty mappings and sequences are written as empty `<dict/>`/`<list/>`
//! elements, which decode to [`Value::Absent`], so they do not survive a
//! round trip.

use std::io;

use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::config::{ATOM_NAMESPACE, CONTENT_TYPE, ENTRY_TAG, REST_NAMESPACE, REST_PREFIX};
use crate::error::Result;
use crate::value::{Mapping, Value};

type XmlWriter = Writer<Vec<u8>>;

/// Prefixed name of a vocabulary element.
fn qualified(local: &str) -> String {
    format!("{REST_PREFIX}:{local}")
}

/// Text event for leaf content.
///
/// A literal carriage return would be read back as a line feed, so it is
/// written as a character reference.
fn text_event(text: &str) -> BytesText<'static> {
    BytesText::from_escaped(escape(text).replace('\r', "&#13;"))
}

/// Escaped value of a `name` attribute.
///
/// Attribute-value normalization turns tabs and line breaks into spaces,
/// so those are written as character references.
fn attribute_value(key: &str) -> String {
    escape(key)
        .replace('\t', "&#9;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
}

fn write_mapping(writer: &mut XmlWriter, mapping: &Mapping) -> io::Result<()> {
    let dict = qualified("dict");
    if mapping.is_empty() {
        return writer.write_event(Event::Empty(BytesStart::new(dict)));
    }
    writer.write_event(Event::Start(BytesStart::new(dict.as_str())))?;
    for (key, value) in mapping.iter().filter(|(_, v)| !v.is_absent()) {
        let name = attribute_value(key);
        let mut start = BytesStart::new(qualified("key"));
        start.push_attribute(("name".as_bytes(), name.as_bytes()));
        writer.write_event(Event::Start(start))?;
        write_value(writer, value)?;
        writer.write_event(Event::End(BytesEnd::new(qualified("key"))))?;
    }
    writer.write_event(Event::End(BytesEnd::new(dict)))
}

fn write_sequence(writer: &mut XmlWriter, items: &[Value]) -> io::Result<()> {
    let list = qualified("list");
    if items.is_empty() {
        return writer.write_event(Event::Empty(BytesStart::new(list)));
    }
    writer.write_event(Event::Start(BytesStart::new(list.as_str())))?;
    for item in items.iter().filter(|v| !v.is_absent()) {
        writer.write_event(Event::Start(BytesStart::new(qualified("item"))))?;
        write_value(writer, item)?;
        writer.write_event(Event::End(BytesEnd::new(qualified("item"))))?;
    }
    writer.write_event(Event::End(BytesEnd::new(list)))
}

/// Write the body of a `<key>` or `<item>`.
fn write_value(writer: &mut XmlWriter, value: &Value) -> io::Result<()> {
    match value {
        Value::Text(text) if text.is_empty() => Ok(()),
        Value::Text(text) => writer.write_event(Event::Text(text_event(text))),
        Value::Mapping(mapping) => write_mapping(writer, mapping),
        Value::Sequence(items) => write_sequence(writer, items),
        Value::Absent => Ok(()),
    }
}

/// Run `write` against a fresh writer and return what it produced.
fn render<F>(write: F) -> Result<String>
where
    F: FnOnce(&mut XmlWriter) -> io::Result<()>,
{
    let mut writer = Writer::new(Vec::new());
    write(&mut writer)?;
    let xml = String::from_utf8(writer.into_inner())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(xml)
}

/// Encode a value as the body of a `<key>` or `<item>` element.
///
/// Text is escaped, containers become `<s:dict>`/`<s:list>` and `Absent`
/// yields an empty string.
///
/// # Errors
/// Returns an error if the XML writer fails.
pub fn encode_value(value: &Value) -> Result<String> {
    render(|writer| write_value(writer, value))
}

/// Encode a mapping as a `<s:dict>` element.
///
/// # Errors
/// Returns an error if the XML writer fails.
pub fn encode_mapping(mapping: &Mapping) -> Result<String> {
    render(|writer| write_mapping(writer, mapping))
}

/// Encode a sequence as a `<s:list>` element.
///
/// # Errors
/// Returns an error if the XML writer fails.
pub fn encode_sequence(items: &[Value]) -> Result<String> {
    render(|writer| write_sequence(writer, items))
}

/// Encode a mapping as the content of a minimal Atom entry document.
///
/// # Arguments
/// * `content` - Decoded content to place inside `<content type="text/xml">`
///
/// # Returns
/// A standalone document that [`crate::parse_entry`] accepts
///
/// # Errors
/// Returns an error if the XML writer fails.
///
/// # Examples
/// ```
/// use atom_decoder::{encode_entry, parse_entry};
///
/// let entry = parse_entry(
///     r#"<entry xmlns="http://www.w3.org/2005/Atom"><content><dict><key name="a">1</key></dict></content></entry>"#,
/// ).unwrap();
/// let xml = encode_entry(entry.content.as_ref().unwrap()).unwrap();
/// assert_eq!(parse_entry(&xml).unwrap().content, entry.content);
/// ```
pub fn encode_entry(content: &Mapping) -> Result<String> {
    render(|writer| {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let rest_xmlns = format!("xmlns:{REST_PREFIX}");
        let mut entry = BytesStart::new(ENTRY_TAG);
        entry.push_attribute(("xmlns", ATOM_NAMESPACE));
        entry.push_attribute((rest_xmlns.as_str(), REST_NAMESPACE));
        writer.write_event(Event::Start(entry))?;

        let mut body = BytesStart::new("content");
        body.push_attribute(("type", CONTENT_TYPE));
        writer.write_event(Event::Start(body))?;
        write_mapping(writer, content)?;
        writer.write_event(Event::End(BytesEnd::new("content")))?;

        writer.write_event(Event::End(BytesEnd::new(ENTRY_TAG)))
    })
}
