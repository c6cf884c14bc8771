//! Protocol constants for Atom documents and the dict/list vocabulary.

/// Namespace every Atom root element must be declared in.
pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// Namespace of the `dict`/`list`/`key`/`item` vocabulary.
///
/// The decoder matches on local names only, so this is used when writing
/// documents back out.
pub const REST_NAMESPACE: &str = "http://dev.splunk.com/ns/rest";

/// Prefix bound to [`REST_NAMESPACE`] in encoded documents.
pub const REST_PREFIX: &str = "s";

/// Relation assumed for a `<link>` without a `rel` attribute (RFC 4287, 4.2.7.2).
pub const DEFAULT_LINK_REL: &str = "alternate";

/// Local name of the root element of a single-entry document.
pub const ENTRY_TAG: &str = "entry";

/// Local name of the root element of a feed document.
pub const FEED_TAG: &str = "feed";

/// `type` attribute written on encoded `<content>` elements.
pub const CONTENT_TYPE: &str = "text/xml";
