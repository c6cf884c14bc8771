//! Atom documents: root validation and field dispatch.
//!
//! A document is accepted only if its root element is written unprefixed
//! with the expected name and carries `xmlns` set to the Atom namespace.
//! A prefixed root such as `<a:entry xmlns:a="...">` is rejected even when
//! the prefix resolves to Atom. The check happens before any content
//! decoding.

mod entry;
mod feed;
mod object;

pub use entry::{Entry, EntryField};
pub use feed::{Feed, FeedField};
pub use object::{AtomObject, LoadFields, ObjectField};

use roxmltree::{Document, Node};
use serde::Serialize;

use crate::config::{ATOM_NAMESPACE, ENTRY_TAG, FEED_TAG};
use crate::error::{AtomError, Result};
use crate::xml::{default_namespace, written_name};

/// A parsed Atom document of either shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AtomDocument {
    Entry(Entry),
    Feed(Feed),
}

fn is_atom(root: Node<'_, '_>, tag: &str) -> bool {
    written_name(root) == tag && default_namespace(root) == Some(ATOM_NAMESPACE)
}

fn unrecognized(root: Node<'_, '_>, expected: &'static str) -> AtomError {
    AtomError::UnrecognizedFormat {
        expected,
        tag: written_name(root).to_string(),
        namespace: default_namespace(root).map(str::to_string),
    }
}

/// Parse a document whose root is an Atom `<entry>`.
///
/// # Errors
/// Returns `XmlParse` for malformed XML, `UnrecognizedFormat` if the root
/// is not an Atom entry, and `Structural` if the entry content is malformed.
///
/// # Examples
/// ```
/// use atom_decoder::parse_entry;
///
/// let xml = r#"<entry xmlns="http://www.w3.org/2005/Atom">
///   <published>2012-03-01T10:00:00-08:00</published>
///   <content type="text/xml"><dict><key name="a">1</key></dict></content>
/// </entry>"#;
/// let entry = parse_entry(xml).unwrap();
/// assert_eq!(entry.content.unwrap().get_text("a"), Some("1"));
///
/// assert!(parse_entry("<entry/>").unwrap_err().is_format());
/// ```
pub fn parse_entry(xml: &str) -> Result<Entry> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    if !is_atom(root, ENTRY_TAG) {
        return Err(unrecognized(root, ENTRY_TAG));
    }
    Entry::from_element(root)
}

/// Parse a document whose root is an Atom `<feed>`.
///
/// # Errors
/// Returns `XmlParse` for malformed XML, `UnrecognizedFormat` if the root
/// is not an Atom feed, and the errors of [`Feed::from_element`].
pub fn parse_feed(xml: &str) -> Result<Feed> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    if !is_atom(root, FEED_TAG) {
        return Err(unrecognized(root, FEED_TAG));
    }
    Feed::from_element(root)
}

/// Parse a document whose root is either an Atom `<entry>` or `<feed>`.
///
/// # Errors
/// As [`parse_entry`] and [`parse_feed`]; a root that is neither is
/// reported as an unrecognized entry.
pub fn parse_document(xml: &str) -> Result<AtomDocument> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    if is_atom(root, ENTRY_TAG) {
        Ok(AtomDocument::Entry(Entry::from_element(root)?))
    } else if is_atom(root, FEED_TAG) {
        Ok(AtomDocument::Feed(Feed::from_element(root)?))
    } else {
        Err(unrecognized(root, ENTRY_TAG))
    }
}
