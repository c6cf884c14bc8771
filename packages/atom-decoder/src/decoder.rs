//! Structured decoder for dict/list content.
//!
//! The grammar, by local tag name:
//!
//! ```text
//! content := <content> [dict] </content>
//! dict    := <dict> key* </dict>
//! list    := <list> item* </list>
//! key     := <key name="..."> (text | dict | list) </key>
//! item    := <item> (text | dict | list) </item>
//! ```
//!
//! Every shape check returns a [`StructuralError`]; nothing is skipped
//! silently and no partial tree is returned.

use roxmltree::Node;

use crate::error::{AtomError, Result, StructuralError};
use crate::value::{Mapping, Value};
use crate::xml::{element_children, get_attribute, get_tag_name, text_content};

/// Tags of the dict/list vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Content,
    Dict,
    List,
    Key,
    Item,
    Other,
}

impl Tag {
    /// Classify an element by its local name.
    #[must_use]
    pub fn of(node: Node<'_, '_>) -> Self {
        match get_tag_name(node) {
            "content" => Self::Content,
            "dict" => Self::Dict,
            "list" => Self::List,
            "key" => Self::Key,
            "item" => Self::Item,
            _ => Self::Other,
        }
    }
}

/// `node` is not the element its parent's grammar calls for.
fn unexpected(node: Node<'_, '_>, expected: &'static str) -> AtomError {
    let parent = node
        .parent_element()
        .map(|p| get_tag_name(p).to_string())
        .unwrap_or_default();
    StructuralError::UnexpectedElement {
        parent,
        expected,
        found: get_tag_name(node).to_string(),
    }
    .into()
}

fn expect_tag(node: Node<'_, '_>, tag: Tag, expected: &'static str) -> Result<()> {
    if Tag::of(node) == tag {
        Ok(())
    } else {
        Err(unexpected(node, expected))
    }
}

/// Decode an entry's `<content>` element.
///
/// # Arguments
/// * `node` - The `<content>` element
///
/// # Returns
/// `None` when the content is empty (or its dict is), otherwise the
/// decoded top-level mapping.
///
/// # Errors
/// Returns a structural error if the content holds anything but a single
/// `<dict>`, or if the dict itself is malformed.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use atom_decoder::decoder::decode_content;
///
/// let xml = r#"<content><dict><key name="a">1</key></dict></content>"#;
/// let doc = Document::parse(xml).unwrap();
/// let content = decode_content(doc.root_element()).unwrap().unwrap();
/// assert_eq!(content.get_text("a"), Some("1"));
/// ```
pub fn decode_content(node: Node<'_, '_>) -> Result<Option<Mapping>> {
    expect_tag(node, Tag::Content, "content")?;

    let children: Vec<Node<'_, '_>> = element_children(node).collect();
    let child = match children.as_slice() {
        [] => return Ok(None),
        [child] => *child,
        _ => {
            return Err(StructuralError::ContentChildCount {
                count: children.len(),
            }
            .into())
        }
    };

    expect_tag(child, Tag::Dict, "dict")?;

    match decode_mapping(child)? {
        Value::Mapping(mapping) => {
            tracing::debug!(keys = mapping.len(), "Decoded entry content");
            Ok(Some(mapping))
        }
        _ => Ok(None),
    }
}

/// Decode a `<dict>` element.
///
/// Yields [`Value::Absent`] when the dict has no element children, and a
/// (possibly empty) [`Value::Mapping`] otherwise. Keys whose value decodes
/// to `Absent` are left out; a repeated key overwrites the earlier value.
///
/// # Arguments
/// * `node` - The `<dict>` element
///
/// # Returns
/// `Absent`, or a `Mapping` in document order
///
/// # Errors
/// Returns a structural error if a child is not a `<key>`, a key has no
/// `name`, or a value is malformed.
pub fn decode_mapping(node: Node<'_, '_>) -> Result<Value> {
    expect_tag(node, Tag::Dict, "dict")?;

    let mut children = element_children(node).peekable();
    if children.peek().is_none() {
        return Ok(Value::Absent);
    }

    let mut mapping = Mapping::new();
    for child in children {
        expect_tag(child, Tag::Key, "key")?;
        let key = get_attribute(child, "name").ok_or(StructuralError::MissingKeyName)?;

        match decode_value(child)? {
            Value::Absent => tracing::trace!(key, "Skipping absent value"),
            value => {
                if mapping.contains_key(key) {
                    tracing::debug!(key, "Duplicate key, later value wins");
                }
                mapping.insert(key, value);
            }
        }
    }

    Ok(Value::Mapping(mapping))
}

/// Decode a `<list>` element.
///
/// Yields [`Value::Absent`] when the list has no element children, and a
/// (possibly empty) [`Value::Sequence`] otherwise. Absent items are left out.
///
/// # Returns
/// `Absent`, or a `Sequence` in document order
///
/// # Errors
/// Returns a structural error if a child is not an `<item>` or an item
/// value is malformed.
pub fn decode_sequence(node: Node<'_, '_>) -> Result<Value> {
    expect_tag(node, Tag::List, "list")?;

    let mut children = element_children(node).peekable();
    if children.peek().is_none() {
        return Ok(Value::Absent);
    }

    let mut items = Vec::new();
    for child in children {
        expect_tag(child, Tag::Item, "item")?;
        match decode_value(child)? {
            Value::Absent => tracing::trace!(index = items.len(), "Skipping absent item"),
            value => items.push(value),
        }
    }

    Ok(Value::Sequence(items))
}

/// Decode the value held by a `<key>` or `<item>` element.
///
/// A leaf yields its text exactly as written, including surrounding
/// whitespace and the empty string. A single `<dict>` or `<list>` child is
/// decoded recursively.
///
/// # Arguments
/// * `node` - A `<key>` or `<item>` element
///
/// # Returns
/// `Text` for a leaf, otherwise whatever the nested container decodes to
///
/// # Errors
/// Returns a structural error if `node` is neither key nor item, holds more
/// than one element, or holds an element that is not a container.
pub fn decode_value(node: Node<'_, '_>) -> Result<Value> {
    if !matches!(Tag::of(node), Tag::Key | Tag::Item) {
        return Err(unexpected(node, "key or item"));
    }

    let children: Vec<Node<'_, '_>> = element_children(node).collect();
    let child = match children.as_slice() {
        [] => return Ok(Value::Text(text_content(node))),
        [child] => *child,
        _ => {
            return Err(StructuralError::MultipleValues {
                tag: get_tag_name(node).to_string(),
                count: children.len(),
            }
            .into())
        }
    };

    match Tag::of(child) {
        Tag::Dict => decode_mapping(child),
        Tag::List => decode_sequence(child),
        _ => Err(StructuralError::UnknownContainer {
            tag: get_tag_name(child).to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roxmltree::Document;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn structural(err: AtomError) -> StructuralError {
        match err {
            AtomError::Structural(e) => e,
            other => panic!("expected structural error, got {other}"),
        }
    }

    #[test]
    fn test_empty_content_is_none() {
        let doc = Document::parse("<content type=\"text/xml\">\n  </content>").unwrap();
        assert_eq!(decode_content(doc.root_element()).unwrap(), None);
    }

    #[test]
    fn test_empty_dict_is_absent() {
        let doc = Document::parse("<dict> <!-- nothing --> </dict>").unwrap();
        assert_eq!(decode_mapping(doc.root_element()).unwrap(), Value::Absent);
    }

    #[test]
    fn test_content_with_empty_dict_is_none() {
        let doc = Document::parse("<content><dict/></content>").unwrap();
        assert_eq!(decode_content(doc.root_element()).unwrap(), None);
    }

    #[test]
    fn test_empty_list_is_absent() {
        let doc = Document::parse("<list/>").unwrap();
        assert_eq!(decode_sequence(doc.root_element()).unwrap(), Value::Absent);
    }

    #[test]
    fn test_leaf_text_is_not_trimmed() {
        let doc = Document::parse("<item>  spaced out \n</item>").unwrap();
        assert_eq!(
            decode_value(doc.root_element()).unwrap(),
            text("  spaced out \n")
        );
    }

    #[test]
    fn test_empty_leaf_is_empty_text() {
        let doc = Document::parse(r#"<key name="a"/>"#).unwrap();
        assert_eq!(decode_value(doc.root_element()).unwrap(), text(""));
    }

    #[test]
    fn test_leaf_entities_and_cdata() {
        let doc = Document::parse(r#"<key name="q">a &amp; b <![CDATA[<c>]]></key>"#).unwrap();
        assert_eq!(decode_value(doc.root_element()).unwrap(), text("a & b <c>"));
    }

    #[test]
    fn test_nested_list() {
        let xml = r#"<dict><key name="a"><list><item>1</item><item>2</item></list></key></dict>"#;
        let doc = Document::parse(xml).unwrap();

        let mut expected = Mapping::new();
        expected.insert("a", Value::Sequence(vec![text("1"), text("2")]));

        assert_eq!(
            decode_mapping(doc.root_element()).unwrap(),
            Value::Mapping(expected)
        );
    }

    #[test]
    fn test_prefixed_tags() {
        let xml = r#"<s:dict xmlns:s="http://dev.splunk.com/ns/rest">
            <s:key name="eai:acl">
                <s:dict>
                    <s:key name="app">search</s:key>
                    <s:key name="perms">
                        <s:dict>
                            <s:key name="read"><s:list><s:item>*</s:item></s:list></s:key>
                        </s:dict>
                    </s:key>
                </s:dict>
            </s:key>
        </s:dict>"#;
        let doc = Document::parse(xml).unwrap();
        let value = decode_mapping(doc.root_element()).unwrap();

        let acl = value.as_mapping().and_then(|m| m.get_mapping("eai:acl")).unwrap();
        assert_eq!(acl.get_text("app"), Some("search"));
        let read = acl
            .get_mapping("perms")
            .and_then(|p| p.get_sequence("read"))
            .unwrap();
        assert_eq!(read, [text("*")]);
    }

    #[test]
    fn test_duplicate_key_later_wins() {
        let xml = r#"<dict>
            <key name="a">first</key>
            <key name="b">other</key>
            <key name="a"><list><item>x</item></list></key>
        </dict>"#;
        let doc = Document::parse(xml).unwrap();
        let value = decode_mapping(doc.root_element()).unwrap();
        let mapping = value.as_mapping().unwrap();

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("a"), Some(&Value::Sequence(vec![text("x")])));
        let keys: Vec<&str> = mapping.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn test_absent_child_is_omitted() {
        let xml = r#"<dict><key name="empty"><dict/></key></dict>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(
            decode_mapping(doc.root_element()).unwrap(),
            Value::Mapping(Mapping::new())
        );
    }

    #[test]
    fn test_absent_item_is_omitted() {
        let xml = r#"<list><item>a</item><item><list/></item><item/></list>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(
            decode_sequence(doc.root_element()).unwrap(),
            Value::Sequence(vec![text("a"), text("")])
        );
    }

    #[test]
    fn test_key_with_two_children_fails() {
        let xml = r#"<key name="a"><dict/><dict/></key>"#;
        let doc = Document::parse(xml).unwrap();
        let err = structural(decode_value(doc.root_element()).unwrap_err());
        assert_eq!(
            err,
            StructuralError::MultipleValues {
                tag: "key".to_string(),
                count: 2
            }
        );
    }

    #[test]
    fn test_unknown_container_fails() {
        let xml = r#"<item><map/></item>"#;
        let doc = Document::parse(xml).unwrap();
        let err = structural(decode_value(doc.root_element()).unwrap_err());
        assert_eq!(
            err,
            StructuralError::UnknownContainer {
                tag: "map".to_string()
            }
        );
    }

    #[test]
    fn test_dict_with_item_child_fails() {
        let xml = r#"<dict><key name="a">1</key><item>2</item></dict>"#;
        let doc = Document::parse(xml).unwrap();
        let err = structural(decode_mapping(doc.root_element()).unwrap_err());
        assert_eq!(
            err,
            StructuralError::UnexpectedElement {
                parent: "dict".to_string(),
                expected: "key",
                found: "item".to_string()
            }
        );
    }

    #[test]
    fn test_list_with_key_child_fails() {
        let xml = r#"<list><key name="a">1</key></list>"#;
        let doc = Document::parse(xml).unwrap();
        let err = structural(decode_sequence(doc.root_element()).unwrap_err());
        assert!(matches!(
            err,
            StructuralError::UnexpectedElement { expected: "item", .. }
        ));
    }

    #[test]
    fn test_key_without_name_fails() {
        let xml = r#"<dict><key>1</key></dict>"#;
        let doc = Document::parse(xml).unwrap();
        let err = structural(decode_mapping(doc.root_element()).unwrap_err());
        assert_eq!(err, StructuralError::MissingKeyName);
    }

    #[test]
    fn test_empty_key_name_is_allowed() {
        let xml = r#"<dict><key name="">v</key></dict>"#;
        let doc = Document::parse(xml).unwrap();
        let value = decode_mapping(doc.root_element()).unwrap();
        assert_eq!(value.as_mapping().and_then(|m| m.get_text("")), Some("v"));
    }

    #[test]
    fn test_content_with_two_children_fails() {
        let xml = r#"<content><dict/><dict/></content>"#;
        let doc = Document::parse(xml).unwrap();
        let err = structural(decode_content(doc.root_element()).unwrap_err());
        assert_eq!(err, StructuralError::ContentChildCount { count: 2 });
    }

    #[test]
    fn test_content_with_list_fails() {
        let xml = r#"<content><list><item>1</item></list></content>"#;
        let doc = Document::parse(xml).unwrap();
        let err = structural(decode_content(doc.root_element()).unwrap_err());
        assert!(matches!(
            err,
            StructuralError::UnexpectedElement { expected: "dict", .. }
        ));
    }

    #[test]
    fn test_deep_error_aborts_whole_decode() {
        let xml = r#"<content><dict>
            <key name="ok">fine</key>
            <key name="bad"><list><item><dict><item/></dict></item></list></key>
        </dict></content>"#;
        let doc = Document::parse(xml).unwrap();
        assert!(decode_content(doc.root_element()).unwrap_err().is_structural());
    }

    #[test]
    fn test_decode_is_repeatable() {
        let xml = r#"<content><dict><key name="a"><dict><key name="b">c</key></dict></key></dict></content>"#;
        let doc = Document::parse(xml).unwrap();
        let first = decode_content(doc.root_element()).unwrap();
        let second = decode_content(doc.root_element()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_decode_value_on_container_fails() {
        let xml = r#"<key name="a"><dict><key name="b">1</key></dict></key>"#;
        let doc = Document::parse(xml).unwrap();
        let dict = doc.root_element().first_element_child().unwrap();
        let err = structural(decode_value(dict).unwrap_err());
        assert_eq!(
            err,
            StructuralError::UnexpectedElement {
                parent: "key".to_string(),
                expected: "key or item",
                found: "dict".to_string()
            }
        );
    }

    #[test]
    fn test_decode_value_on_root_has_no_parent() {
        let doc = Document::parse("<list/>").unwrap();
        let err = structural(decode_value(doc.root_element()).unwrap_err());
        assert_eq!(
            err,
            StructuralError::UnexpectedElement {
                parent: String::new(),
                expected: "key or item",
                found: "list".to_string()
            }
        );
    }

    #[test]
    fn test_tag_of() {
        let doc = Document::parse("<root><content/><dict/><list/><key/><item/><other/></root>")
            .unwrap();
        let tags: Vec<Tag> = element_children(doc.root_element()).map(Tag::of).collect();
        assert_eq!(
            tags,
            [Tag::Content, Tag::Dict, Tag::List, Tag::Key, Tag::Item, Tag::Other]
        );
    }
}
