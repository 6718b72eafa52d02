//! xml2json - bidirectional XML <-> JSON conversion
//!
//! Elements map to JSON values as follows: an empty element is `null`, a
//! text-only element is a string, anything else is an object with `@name`
//! keys for attributes, `#text` for text next to attributes or children, and
//! one key per child tag. Repeated child tags become arrays.
//!
//! # Quick Start
//!
//! ```
//! use xml2json::{json_to_xml, xml_to_json_string};
//! # fn main() -> Result<(), xml2json::Error> {
//! let json = xml_to_json_string(r#"<e name="value"><a>1</a><a>2</a></e>"#)?;
//! assert_eq!(json, r#"{"e":{"@name":"value","a":["1","2"]}}"#);
//!
//! let xml = json_to_xml(&json)?;
//! assert_eq!(xml, r#"<e name="value"><a>1</a><a>2</a></e>"#);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorCategory, ErrorKind, Pos, Result, Span};

pub mod lexer;
pub use lexer::{Token, TokenKind};

pub mod value;
pub use value::{Array, Object, Value};

pub mod text;
pub use text::TextMode;

pub mod json;
pub mod xml;
pub use xml::Element;

pub mod decode;
pub mod encode;
pub use decode::{decode_document, decode_element};
pub use encode::{encode_document, encode_element, ATTRIBUTE_PREFIX, TAIL_KEY, TEXT_KEY};

pub mod convert;
pub use convert::{
    convert, convert_with_options, json_to_xml, json_to_xml_with_options, xml_to_json,
    xml_to_json_string, xml_to_json_string_with_options, xml_to_json_with_options,
    ConvertOptions, Direction,
};

/// Parse XML from string
pub fn from_xml_str(s: &str) -> Result<Element> {
    xml::from_str(s)
}

/// Parse JSON from string
pub fn from_json_str(s: &str) -> Result<Value> {
    json::from_str(s)
}

/// Convenience re-exports
pub use json::{Config as JsonConfig, Parser as JsonParser};
pub use lexer::json::JsonLexer;
pub use xml::{Config as XmlConfig, Parser as XmlParser};
