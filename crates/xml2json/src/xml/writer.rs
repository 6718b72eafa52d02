//! XML serializer

use crate::text::is_xml_char;
use crate::xml::model::Element;

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Output options for the XML serializer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriterOptions {
    /// Emit an `<?xml ...?>` declaration line
    pub declaration: bool,
    /// Indent nested elements by this many spaces (elements carrying text are
    /// never reflowed)
    pub indent: Option<usize>,
}

impl WriterOptions {
    pub const fn compact() -> Self {
        Self {
            declaration: false,
            indent: None,
        }
    }

    pub const fn pretty(indent: usize) -> Self {
        Self {
            declaration: false,
            indent: Some(indent),
        }
    }

    pub const fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }
}

/// Render an element tree as XML text
pub fn to_string(element: &Element) -> String {
    to_string_with_options(element, WriterOptions::default())
}

/// Render an element tree as XML text with custom options
pub fn to_string_with_options(element: &Element, options: WriterOptions) -> String {
    let mut output = String::new();
    if options.declaration {
        output.push_str(DECLARATION);
        output.push('\n');
    }
    write_element(element, options.indent, 0, &mut output);
    output
}

fn write_element(element: &Element, indent: Option<usize>, depth: usize, output: &mut String) {
    output.push('<');
    output.push_str(&element.tag);

    for (name, value) in &element.attributes {
        output.push(' ');
        output.push_str(name);
        output.push_str("=\"");
        escape_into(value, Context::Attribute, output);
        output.push('"');
    }

    if element.text.is_none() && element.children.is_empty() {
        output.push_str("/>");
        return;
    }

    output.push('>');
    if let Some(text) = &element.text {
        escape_into(text, Context::Text, output);
    }

    let indent = indent.filter(|_| element.text.is_none());
    for child in &element.children {
        push_newline(indent, depth + 1, output);
        write_element(child, indent, depth + 1, output);
    }
    if !element.children.is_empty() {
        push_newline(indent, depth, output);
    }

    output.push_str("</");
    output.push_str(&element.tag);
    output.push('>');
}

fn push_newline(indent: Option<usize>, depth: usize, output: &mut String) {
    if let Some(width) = indent {
        output.push('\n');
        output.extend(std::iter::repeat(' ').take(width * depth));
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Context {
    Text,
    Attribute,
}

/// Escape markup characters; characters a parser would normalise away are
/// written as character references instead. Characters XML cannot carry at
/// all are replaced with U+FFFD.
fn escape_into(input: &str, context: Context, output: &mut String) {
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&apos;"),
            '\r' => output.push_str("&#xD;"),
            '\t' | '\n' if context == Context::Attribute => {
                output.push_str(&format!("&#x{:X};", u32::from(ch)));
            }
            '\t' | '\n' => output.push(ch),
            c if !is_xml_char(c) => output.push(char::REPLACEMENT_CHARACTER),
            c if c.is_control() => output.push_str(&format!("&#x{:X};", u32::from(c))),
            c => output.push(c),
        }
    }
}
