//! Decoder for structured dict/list content in Atom entries.
//!
//! REST endpoints that answer with Atom documents embed their payload in
//! the `<content>` element of each entry using a small XML vocabulary of
//! nested `dict`, `key`, `list` and `item` elements. This crate turns that
//! vocabulary into a [`Value`] tree and loads the surrounding Atom fields.
//!
//! # Example
//!
//! ```
//! use atom_decoder::{parse_entry, Value};
//!
//! let xml = r#"<entry xmlns="http://www.w3.org/2005/Atom" xmlns:s="http://dev.splunk.com/ns/rest">
//!   <title>Errors</title>
//!   <content type="text/xml">
//!     <s:dict>
//!       <s:key name="a"><s:list><s:item>1</s:item><s:item>2</s:item></s:list></s:key>
//!     </s:dict>
//!   </content>
//! </entry>"#;
//!
//! let entry = parse_entry(xml).unwrap();
//! let content = entry.content.unwrap();
//! assert_eq!(
//!     content.get_sequence("a").unwrap(),
//!     [Value::Text("1".into()), Value::Text("2".into())]
//! );
//! ```
//!
//! # Architecture
//!
//! - [`xml`]: element tree helpers over `roxmltree`
//! - [`value`]: decoded value model
//! - [`decoder`]: dict/list decoding
//! - [`encoder`]: dict/list encoding
//! - [`atom`]: Atom entry and feed loading
//! - [`error`]: error types and Result alias
//! - [`config`]: protocol constants
//! - [`cli`]: command-line interface

pub mod atom;
pub mod cli;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod value;
pub mod xml;

pub use atom::{parse_document, parse_entry, parse_feed, AtomDocument, AtomObject, Entry, Feed};
pub use decoder::{decode_content, decode_mapping, decode_sequence, decode_value};
pub use encoder::encode_entry;
pub use error::{AtomError, Result, StructuralError};
pub use value::{Mapping, Value};
