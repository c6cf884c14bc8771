//! Fields shared by every Atom element (entries and feeds).

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use roxmltree::Node;
use serde::Serialize;

use crate::config::DEFAULT_LINK_REL;
use crate::error::Result;
use crate::xml::{element_children, find_child, get_attribute, get_tag_name, get_text};

/// Loading of an Atom element from its child elements.
///
/// Implementors route each child by tag name in [`load_field`](Self::load_field)
/// and hand anything they do not own to the layer below them, ending at
/// [`AtomObject`].
pub trait LoadFields {
    /// Handle a single child element.
    ///
    /// # Errors
    /// Returns an error if the child is one this layer owns and it is malformed.
    fn load_field(&mut self, node: Node<'_, '_>) -> Result<()>;

    /// Dispatch every element child of `element` in document order.
    ///
    /// # Errors
    /// Stops at the first child that fails to load.
    fn load(&mut self, element: Node<'_, '_>) -> Result<()> {
        for child in element_children(element) {
            self.load_field(child)?;
        }
        Ok(())
    }
}

/// Child elements understood by the base Atom layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectField {
    Id,
    Title,
    Updated,
    Link,
    Author,
    /// Not an Atom field this crate knows about.
    Other,
}

impl ObjectField {
    #[must_use]
    pub fn of(node: Node<'_, '_>) -> Self {
        match get_tag_name(node) {
            "id" => Self::Id,
            "title" => Self::Title,
            "updated" => Self::Updated,
            "link" => Self::Link,
            "author" => Self::Author,
            _ => Self::Other,
        }
    }
}

/// Common Atom metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AtomObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Raw `<updated>` timestamp, trimmed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,

    /// Link targets keyed by `rel`.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub links: IndexMap<String, String>,

    /// Name of the `<author>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Local names of child elements no layer handled, in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unrecognized: Vec<String>,
}

impl AtomObject {
    /// `updated` parsed as an RFC 3339 timestamp.
    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(self.updated.as_deref()?)
    }

    fn load_link(&mut self, node: Node<'_, '_>) {
        let rel = get_attribute(node, "rel").unwrap_or(DEFAULT_LINK_REL);
        match get_attribute(node, "href") {
            Some(href) => {
                self.links.insert(rel.to_string(), href.to_string());
            }
            None => tracing::debug!(rel, "Link without href, skipping"),
        }
    }
}

impl LoadFields for AtomObject {
    fn load_field(&mut self, node: Node<'_, '_>) -> Result<()> {
        match ObjectField::of(node) {
            ObjectField::Id => self.id = Some(get_text(node)),
            ObjectField::Title => self.title = Some(get_text(node)),
            ObjectField::Updated => self.updated = Some(get_text(node)),
            ObjectField::Link => self.load_link(node),
            ObjectField::Author => {
                self.author = find_child(node, "name").map(get_text);
            }
            ObjectField::Other => {
                let tag = get_tag_name(node);
                tracing::debug!(tag, "No handler for element, recording as unrecognized");
                self.unrecognized.push(tag.to_string());
            }
        }
        Ok(())
    }
}

/// Parse an RFC 3339 timestamp, returning `None` if it does not parse.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .map_err(|err| tracing::debug!(raw, error = %err, "Unparseable timestamp"))
        .ok()
}
