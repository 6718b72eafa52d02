//! JSON value to element tree decoding, the inverse of [`crate::encode`].
//!
//! Structural problems are reported as schema errors carrying the key path of
//! the offending value, e.g. `/e/a[1]/@id`. Array indices are zero-based.
//!
//! JSON strings keep their surrounding whitespace unless a trimming
//! [`TextMode`] is requested. A `#tail` entry holds text that follows an
//! element inside its parent; it is appended to the parent's text.

use crate::encode::{ATTRIBUTE_PREFIX, TAIL_KEY, TEXT_KEY};
use crate::error::{Error, ErrorKind, Result};
use crate::text::{self, TextMode};
use crate::value::{Object, Value};
use crate::xml::{is_valid_name, Element};

/// Decode a `{root_tag: value}` document, keeping text as written
pub fn decode_document(value: &Value) -> Result<Element> {
    decode_document_with_mode(value, TextMode::Preserve)
}

/// Decode a `{root_tag: value}` document. A `#tail` on the root has no
/// parent to land in and is dropped.
pub fn decode_document_with_mode(value: &Value, mode: TextMode) -> Result<Element> {
    let root = Path::Root;
    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(Error::schema(
                ErrorKind::RootNotObject {
                    found: other.type_name(),
                },
                root.render(),
            ))
        }
    };

    let Some((tag, inner)) = object.single_entry() else {
        return Err(Error::schema(
            ErrorKind::RootKeyCount {
                count: object.len(),
            },
            root.render(),
        ));
    };

    let path = Path::Key(&root, tag);
    check_name(tag, tag, &path)?;
    Ok(Decoder { mode }.element(tag, inner, &path)?.element)
}

/// Decode the value of a single element with the given tag
pub fn decode_element(value: &Value, tag: &str) -> Result<Element> {
    let root = Path::Root;
    let path = Path::Key(&root, tag);
    check_name(tag, tag, &path)?;
    Decoder {
        mode: TextMode::Preserve,
    }
    .element(tag, value, &path)
    .map(|node| node.element)
}

/// Location of a value inside the document, kept on the stack and only
/// rendered when an error is raised
#[derive(Clone, Copy, Debug)]
enum Path<'a> {
    Root,
    Key(&'a Path<'a>, &'a str),
    Index(&'a Path<'a>, usize),
}

impl Path<'_> {
    fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        if out.is_empty() {
            out.push('/');
        }
        out
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Self::Root => {}
            Self::Key(parent, key) => {
                parent.render_into(out);
                out.push('/');
                out.push_str(key);
            }
            Self::Index(parent, index) => {
                parent.render_into(out);
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
}

struct Decoder {
    mode: TextMode,
}

/// A decoded element and the raw text that follows it in its parent
struct Node<'v> {
    element: Element,
    tail: Option<&'v str>,
}

impl Decoder {
    fn element<'v>(&self, tag: &str, value: &'v Value, path: &Path<'_>) -> Result<Node<'v>> {
        let element = match value {
            Value::Null => Element::new(tag),
            Value::String(s) => Element {
                text: text::normalize(s, self.mode),
                ..Element::new(tag)
            },
            Value::Array(_) => {
                return Err(Error::schema(ErrorKind::MisplacedArray, path.render()))
            }
            Value::Object(object) => return self.object(tag, object, path),
        };
        Ok(Node {
            element,
            tail: None,
        })
    }

    fn object<'v>(&self, tag: &str, object: &'v Object, path: &Path<'_>) -> Result<Node<'v>> {
        let mut element = Element::new(tag);
        let mut own_text = None;
        let mut tail = None;
        let mut child_tails = String::new();

        for (key, value) in object {
            let key_path = Path::Key(path, key);

            if key == TEXT_KEY {
                own_text = scalar(key, value, &key_path)?;
            } else if key == TAIL_KEY {
                tail = scalar(key, value, &key_path)?;
            } else if let Some(name) = key.strip_prefix(ATTRIBUTE_PREFIX) {
                check_name(name, key, &key_path)?;
                let attribute = scalar(key, value, &key_path)?.unwrap_or_default();
                element
                    .attributes
                    .insert(name.to_string(), attribute.to_string());
            } else {
                check_name(key, key, &key_path)?;
                let mut push = |node: Node<'v>| {
                    child_tails.push_str(node.tail.unwrap_or_default());
                    element.children.push(node.element);
                };
                match value {
                    Value::Array(items) => {
                        for (index, item) in items.iter().enumerate() {
                            let item_path = Path::Index(&key_path, index);
                            push(self.element(key, item, &item_path)?);
                        }
                    }
                    single => push(self.element(key, single, &key_path)?),
                }
            }
        }

        // Direct text first, then whatever follows each child
        let raw = match own_text {
            Some(own) => format!("{own}{child_tails}"),
            None => child_tails,
        };
        element.text = text::normalize(&raw, self.mode);

        Ok(Node { element, tail })
    }
}

/// Attribute and text values must be strings or null
fn scalar<'v>(key: &str, value: &'v Value, path: &Path<'_>) -> Result<Option<&'v str>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.as_str())),
        other => Err(Error::schema(
            ErrorKind::ExpectedScalar {
                key: key.to_string(),
                found: other.type_name(),
            },
            path.render(),
        )),
    }
}

fn check_name(name: &str, key: &str, path: &Path<'_>) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(Error::schema(
            ErrorKind::InvalidXmlName {
                name: key.to_string(),
            },
            path.render(),
        ))
    }
}
