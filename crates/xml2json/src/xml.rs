//! XML parser and serializer

pub mod model;
pub mod parser;
pub mod writer;

pub use model::{is_valid_name, Element};
pub use parser::{Config, Parser};
pub use writer::{to_string, to_string_with_options, WriterOptions};

use crate::error::Result;

/// Parse XML text into its root element
pub fn from_str(input: &str) -> Result<Element> {
    Parser::new(input.as_bytes()).parse()
}

/// Parse XML text with custom configuration
pub fn from_str_with_config(input: &str, config: Config) -> Result<Element> {
    Parser::with_config(input.as_bytes(), config).parse()
}
