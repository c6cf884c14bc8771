//! Error types for the decoder.
//!
//! `AtomError` is the library-facing error. Violations of the dict/list
//! grammar are grouped under `StructuralError` so callers can tell a
//! document that is not an Atom entry at all apart from an entry whose
//! embedded content is malformed.

use thiserror::Error;

use crate::config::ATOM_NAMESPACE;

/// Main error type for the decoder library.
#[derive(Debug, Error)]
pub enum AtomError {
    /// The input is not well-formed XML.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// The root element is not the expected Atom element.
    #[error(
        "Unrecognized format: expected <{expected}> in namespace {atom}, found <{tag}>{found_ns}",
        atom = ATOM_NAMESPACE,
        found_ns = .namespace.as_ref().map(|ns| format!(" in namespace {ns}")).unwrap_or_else(|| " without namespace".to_string())
    )]
    UnrecognizedFormat {
        expected: &'static str,
        /// Root tag as written, prefix included.
        tag: String,
        /// The root's `xmlns` value, if any.
        namespace: Option<String>,
    },

    /// The embedded dict/list content violates the grammar.
    #[error("Malformed content structure: {0}")]
    Structural(#[from] StructuralError),

    /// A numeric Atom field holds something that is not a number.
    #[error("Invalid value for <{field}>: '{value}'")]
    InvalidField { field: String, value: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl AtomError {
    /// Whether the document was rejected before decoding because its root
    /// is not a recognizable Atom element.
    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self, Self::UnrecognizedFormat { .. })
    }

    /// Whether the document is Atom but its embedded content is malformed.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural(_))
    }
}

/// Violations of the dict/list/key/item grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// `<content>` must be empty or hold exactly one element.
    #[error("<content> must be empty or hold a single <dict>, found {count} child elements")]
    ContentChildCount { count: usize },

    /// An element appeared where a different one is required.
    #[error("expected <{expected}> in <{parent}>, found <{found}>")]
    UnexpectedElement {
        parent: String,
        expected: &'static str,
        found: String,
    },

    /// A `<key>` or `<item>` holds more than one element.
    #[error("<{tag}> may hold at most one child element, found {count}")]
    MultipleValues { tag: String, count: usize },

    /// A `<key>` or `<item>` holds an element that is neither `<dict>` nor `<list>`.
    #[error("<{tag}> is not a recognized container, expected <dict> or <list>")]
    UnknownContainer { tag: String },

    /// A `<key>` without a `name` attribute.
    #[error("<key> element is missing its 'name' attribute")]
    MissingKeyName,
}

/// Result type alias for decoder operations.
pub type Result<T> = std::result::Result<T, AtomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_format_display() {
        let err = AtomError::UnrecognizedFormat {
            expected: "entry",
            tag: "feed".to_string(),
            namespace: Some(ATOM_NAMESPACE.to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Unrecognized format: expected <entry> in namespace http://www.w3.org/2005/Atom, \
             found <feed> in namespace http://www.w3.org/2005/Atom"
        );
        assert!(err.is_format());
        assert!(!err.is_structural());
    }

    #[test]
    fn test_unrecognized_format_without_namespace() {
        let err = AtomError::UnrecognizedFormat {
            expected: "entry",
            tag: "entry".to_string(),
            namespace: None,
        };
        assert!(err.to_string().ends_with("found <entry> without namespace"));
    }

    #[test]
    fn test_structural_display() {
        let err = AtomError::from(StructuralError::MultipleValues {
            tag: "key".to_string(),
            count: 2,
        });
        assert_eq!(
            err.to_string(),
            "Malformed content structure: <key> may hold at most one child element, found 2"
        );
        assert!(err.is_structural());
        assert!(!err.is_format());
    }

    #[test]
    fn test_unexpected_element_display() {
        let err = StructuralError::UnexpectedElement {
            parent: "dict".to_string(),
            expected: "key",
            found: "item".to_string(),
        };
        assert_eq!(err.to_string(), "expected <key> in <dict>, found <item>");
    }
}
