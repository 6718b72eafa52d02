//! JSON reader and writer for the mapping's value model

pub mod parser;
pub mod writer;

pub use parser::{Config, Parser};
pub use writer::{to_string, to_string_with_options, WriterOptions};

use crate::error::Result;
use crate::value::Value;

/// Parse JSON text into a Value
pub fn from_str(input: &str) -> Result<Value> {
    Parser::new(input.as_bytes()).parse_value()
}

/// Parse JSON text with custom configuration
pub fn from_str_with_config(input: &str, config: Config) -> Result<Value> {
    Parser::with_config(input.as_bytes(), config).parse_value()
}
