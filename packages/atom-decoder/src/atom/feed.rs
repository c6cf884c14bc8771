//! Atom `<feed>` elements with OpenSearch paging fields.

use roxmltree::Node;
use serde::Serialize;

use super::entry::Entry;
use super::object::{AtomObject, LoadFields};
use crate::error::{AtomError, Result};
use crate::xml::{get_tag_name, get_text};

/// Child elements a feed handles itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedField {
    Entry,
    TotalResults,
    ItemsPerPage,
    StartIndex,
    /// Handled by [`AtomObject`].
    Base,
}

impl FeedField {
    #[must_use]
    pub fn of(node: Node<'_, '_>) -> Self {
        match get_tag_name(node) {
            "entry" => Self::Entry,
            "totalResults" => Self::TotalResults,
            "itemsPerPage" => Self::ItemsPerPage,
            "startIndex" => Self::StartIndex,
            _ => Self::Base,
        }
    }
}

/// A decoded Atom feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Feed {
    #[serde(flatten)]
    pub object: AtomObject,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<usize>,

    pub entries: Vec<Entry>,
}

impl Feed {
    /// Load a feed from a `<feed>` element.
    ///
    /// # Errors
    /// Returns an error if a paging field is not a number or an entry's
    /// content is malformed.
    pub fn from_element(element: Node<'_, '_>) -> Result<Self> {
        let mut feed = Self::default();
        feed.load(element)?;
        Ok(feed)
    }
}

fn parse_count(node: Node<'_, '_>) -> Result<usize> {
    let text = get_text(node);
    text.parse().map_err(|_| AtomError::InvalidField {
        field: get_tag_name(node).to_string(),
        value: text,
    })
}

impl LoadFields for Feed {
    fn load_field(&mut self, node: Node<'_, '_>) -> Result<()> {
        match FeedField::of(node) {
            FeedField::Entry => self.entries.push(Entry::from_element(node)?),
            FeedField::TotalResults => self.total_results = Some(parse_count(node)?),
            FeedField::ItemsPerPage => self.items_per_page = Some(parse_count(node)?),
            FeedField::StartIndex => self.start_index = Some(parse_count(node)?),
            FeedField::Base => self.object.load_field(node)?,
        }
        Ok(())
    }
}
