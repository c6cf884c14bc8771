//! XML utility functions for navigating and extracting data from element trees.
//!
//! These helpers are the only place the decoder touches `roxmltree`
//! directly. Tags are compared by local name, so `<s:dict>` and `<dict>`
//! are the same element to every caller.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Arguments
/// * `node` - XML node
///
/// # Returns
/// Local tag name (e.g., "dict" for `<s:dict>`)
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use atom_decoder::xml::get_tag_name;
///
/// let xml = r#"<s:dict xmlns:s="http://dev.splunk.com/ns/rest"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "dict");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Get the tag name exactly as written in the source, prefix included.
///
/// # Arguments
/// * `node` - Element node
///
/// # Returns
/// Qualified name (e.g., "s:dict" for `<s:dict>`, "entry" for `<entry>`)
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use atom_decoder::xml::written_name;
///
/// let xml = r#"<a:entry xmlns:a="http://www.w3.org/2005/Atom"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(written_name(doc.root_element()), "a:entry");
/// ```
pub fn written_name<'a>(node: Node<'a, '_>) -> &'a str {
    let source: &'a str = node.document().input_text();
    source
        .get(node.range())
        .unwrap_or_default()
        .trim_start_matches('<')
        .split(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .next()
        .unwrap_or_default()
}

/// Get the default namespace in scope at a node.
///
/// For a root element this is the value of its own `xmlns` attribute.
///
/// # Returns
/// Namespace URI, or `None` if no default namespace is declared
pub fn default_namespace<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.namespaces()
        .find(|ns| ns.name().is_none())
        .map(|ns| ns.uri())
}

/// Get an attribute value from a node.
///
/// # Returns
/// Attribute value, or `None` if not found
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}

/// Get all element children of a node.
///
/// Text, comment and processing-instruction nodes are filtered out.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Find the first child element with the given tag name.
///
/// # Arguments
/// * `node` - Parent node to search in
/// * `tag` - Local tag name to search for
///
/// # Returns
/// First matching child element, or `None` if not found
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use atom_decoder::xml::find_child;
///
/// let xml = r#"<author><name>admin</name></author>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// assert!(find_child(doc.root_element(), "name").is_some());
/// assert!(find_child(doc.root_element(), "email").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    element_children(node).find(|child| get_tag_name(*child) == tag)
}

/// Concatenate all descendant text of a node, untouched.
///
/// Unlike [`Node::text`], which only returns the first text child, this
/// joins every text node below `node` in document order.
///
/// # Arguments
/// * `node` - Node to collect text from
///
/// # Returns
/// Concatenated text with whitespace preserved, or an empty string if the
/// node has no text
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use atom_decoder::xml::text_content;
///
/// let xml = r#"<key name="k"> a <!-- note --> b </key>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(text_content(doc.root_element()), " a  b ");
/// ```
pub fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Get the full text content of a node, trimmed.
///
/// # Arguments
/// * `node` - Node to get text from
///
/// # Returns
/// Trimmed text content, or empty string if no text
pub fn get_text(node: Node<'_, '_>) -> String {
    text_content(node).trim().to_string()
}
