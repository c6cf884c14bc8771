//! Atom `<entry>` elements.

use chrono::{DateTime, FixedOffset};
use roxmltree::Node;
use serde::Serialize;

use super::object::{parse_timestamp, AtomObject, LoadFields};
use crate::decoder::decode_content;
use crate::error::Result;
use crate::value::Mapping;
use crate::xml::{get_tag_name, get_text};

/// Child elements an entry handles itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Published,
    Content,
    /// Handled by [`AtomObject`].
    Base,
}

impl EntryField {
    #[must_use]
    pub fn of(node: Node<'_, '_>) -> Self {
        match get_tag_name(node) {
            "published" => Self::Published,
            "content" => Self::Content,
            _ => Self::Base,
        }
    }
}

/// A decoded Atom entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Entry {
    #[serde(flatten)]
    pub object: AtomObject,

    /// Raw `<published>` timestamp, trimmed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,

    /// Decoded `<content>`; `None` when the content is empty or missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Mapping>,
}

impl Entry {
    /// Load an entry from an `<entry>` element.
    ///
    /// The element's tag and namespace are not checked here; see
    /// [`parse_entry`](crate::parse_entry) for validated parsing of a
    /// whole document.
    ///
    /// # Errors
    /// Returns a structural error if the entry's content is malformed.
    pub fn from_element(element: Node<'_, '_>) -> Result<Self> {
        let mut entry = Self::default();
        entry.load(element)?;
        Ok(entry)
    }

    /// `published` parsed as an RFC 3339 timestamp.
    #[must_use]
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(self.published.as_deref()?)
    }
}

impl LoadFields for Entry {
    fn load_field(&mut self, node: Node<'_, '_>) -> Result<()> {
        match EntryField::of(node) {
            EntryField::Published => self.published = Some(get_text(node)),
            EntryField::Content => self.content = decode_content(node)?,
            EntryField::Base => self.object.load_field(node)?,
        }
        Ok(())
    }
}
