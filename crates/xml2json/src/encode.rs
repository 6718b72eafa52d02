//! Element tree to JSON value encoding.
//!
//! An element's value is `null` when it is empty, a plain string when it only
//! carries text, and an object otherwise. Inside an object attributes come
//! first as `@name` keys, then `#text` (only when attributes or children sit
//! next to it), then one key per distinct child tag in order of first
//! appearance. A tag seen once maps to the child's value; a tag seen several
//! times maps to an array of values in sibling order.

use indexmap::IndexMap;

use crate::value::{Array, Object, Value};
use crate::xml::Element;

/// Key holding an element's direct text when it shares the object with
/// attributes or children
pub const TEXT_KEY: &str = "#text";

/// Key holding text that follows an element inside its parent. Only read by
/// the decoder; the encoder folds such text into the parent's `#text`.
pub const TAIL_KEY: &str = "#tail";

/// Prefix marking attribute keys
pub const ATTRIBUTE_PREFIX: char = '@';

/// Encode a whole document as `{root_tag: value}`
pub fn encode_document(root: &Element) -> Value {
    let mut document = Object::with_capacity(1);
    document.insert(root.tag.clone(), encode_element(root));
    Value::Object(document)
}

/// Encode the value of one element, not including its own tag
pub fn encode_element(element: &Element) -> Value {
    let text = element.text.as_deref().filter(|text| !text.is_empty());

    if element.attributes.is_empty() && element.children.is_empty() {
        return text.map_or(Value::Null, Value::from);
    }

    let mut object = Object::with_capacity(element.attributes.len() + 1);
    for (name, value) in &element.attributes {
        object.insert(format!("{ATTRIBUTE_PREFIX}{name}"), value.as_str());
    }
    if let Some(text) = text {
        object.insert(TEXT_KEY, text);
    }

    let mut groups: IndexMap<&str, Vec<&Element>> = IndexMap::new();
    for child in &element.children {
        groups.entry(child.tag.as_str()).or_default().push(child);
    }

    for (tag, members) in groups {
        let value = match members.as_slice() {
            [single] => encode_element(single),
            many => Value::Array(many.iter().map(|child| encode_element(child)).collect::<Array>()),
        };
        object.insert(tag, value);
    }

    Value::Object(object)
}
