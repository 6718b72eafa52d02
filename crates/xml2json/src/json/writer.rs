//! JSON serializer

use crate::value::{Array, Object, Value};

/// Output options for the JSON serializer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriterOptions {
    /// Indent nested values by this many spaces; compact output when `None`
    pub indent: Option<usize>,
}

impl WriterOptions {
    pub const fn compact() -> Self {
        Self { indent: None }
    }

    pub const fn pretty(indent: usize) -> Self {
        Self {
            indent: Some(indent),
        }
    }
}

/// Render a value as compact JSON
pub fn to_string(value: &Value) -> String {
    to_string_with_options(value, WriterOptions::default())
}

/// Render a value as JSON with custom options
pub fn to_string_with_options(value: &Value, options: WriterOptions) -> String {
    let mut writer = Writer {
        output: String::new(),
        indent: options.indent,
    };
    writer.write_value(value, 0);
    writer.output
}

struct Writer {
    output: String,
    indent: Option<usize>,
}

impl Writer {
    fn write_value(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Null => self.output.push_str("null"),
            Value::String(s) => self.write_string(s),
            Value::Array(array) => self.write_array(array, depth),
            Value::Object(object) => self.write_object(object, depth),
        }
    }

    fn write_array(&mut self, array: &Array, depth: usize) {
        if array.is_empty() {
            self.output.push_str("[]");
            return;
        }

        self.output.push('[');
        for (i, item) in array.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            self.newline(depth + 1);
            self.write_value(item, depth + 1);
        }
        self.newline(depth);
        self.output.push(']');
    }

    fn write_object(&mut self, object: &Object, depth: usize) {
        if object.is_empty() {
            self.output.push_str("{}");
            return;
        }

        self.output.push('{');
        for (i, (key, value)) in object.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            self.newline(depth + 1);
            self.write_string(key);
            self.output.push(':');
            if self.indent.is_some() {
                self.output.push(' ');
            }
            self.write_value(value, depth + 1);
        }
        self.newline(depth);
        self.output.push('}');
    }

    fn newline(&mut self, depth: usize) {
        if let Some(width) = self.indent {
            self.output.push('\n');
            self.output.extend(std::iter::repeat(' ').take(width * depth));
        }
    }

    fn write_string(&mut self, s: &str) {
        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\x08' => self.output.push_str("\\b"),
                '\x0C' => self.output.push_str("\\f"),
                c if u32::from(c) < 0x20 => {
                    self.output.push_str(&format!("\\u{:04x}", u32::from(c)));
                }
                c => self.output.push(c),
            }
        }
        self.output.push('"');
    }
}
