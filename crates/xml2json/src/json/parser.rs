//! JSON parser producing the mapping's [`Value`] model.
//!
//! The model has no number or boolean variants. Those literals are kept as
//! strings holding their source text, which is what they become in XML.

use crate::error::{Error, ErrorKind, Result};
use crate::lexer::json::JsonLexer;
use crate::lexer::{Token, TokenKind};
use crate::value::{Array, Object, Value};

/// Configuration for the JSON parser
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum nesting depth (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_size: 10 * 1024 * 1024, // 10 MB default
        }
    }
}

impl Config {
    /// Create a new config with unlimited depth and size
    pub const fn unlimited() -> Self {
        Self {
            max_depth: 0,
            max_size: 0,
        }
    }

    /// Create a new config with specific limits
    pub const fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
        }
    }
}

/// Recursive-descent JSON parser with depth and size limits
#[derive(Debug)]
pub struct Parser<'a> {
    lexer: JsonLexer<'a>,
    input_len: usize,
    config: Config,
    depth: u16,
}

impl<'a> Parser<'a> {
    /// Create a new parser with default configuration
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, Config::default())
    }

    /// Create a new parser with custom configuration
    pub const fn with_config(input: &'a [u8], config: Config) -> Self {
        Self {
            lexer: JsonLexer::new(input),
            input_len: input.len(),
            config,
            depth: 0,
        }
    }

    /// Parse the complete input into a Value
    pub fn parse_value(&mut self) -> Result<Value> {
        if self.config.max_size > 0 && self.input_len > self.config.max_size {
            return Err(Error::at(
                ErrorKind::MaxSizeExceeded {
                    max: self.config.max_size,
                },
                self.config.max_size,
                0,
                0,
            ));
        }

        let token = self.lexer.next_token()?;
        let value = self.parse_from(token)?;

        let trailing = self.lexer.next_token()?;
        if trailing.kind != TokenKind::Eof {
            return Err(Error::new(ErrorKind::TrailingContent, trailing.span));
        }
        Ok(value)
    }

    fn parse_from(&mut self, token: Token) -> Result<Value> {
        match token.kind {
            TokenKind::LeftBrace => {
                self.increment_depth(&token)?;
                let object = self.parse_object();
                self.depth = self.depth.saturating_sub(1);
                object.map(Value::Object)
            }
            TokenKind::LeftBracket => {
                self.increment_depth(&token)?;
                let array = self.parse_array();
                self.depth = self.depth.saturating_sub(1);
                array.map(Value::Array)
            }
            TokenKind::Null => Ok(Value::Null),
            TokenKind::True => Ok(Value::String("true".to_string())),
            TokenKind::False => Ok(Value::String("false".to_string())),
            TokenKind::String(s) | TokenKind::Number(s) => Ok(Value::String(s)),
            _ => Err(expected_error("value", &token)),
        }
    }

    fn parse_object(&mut self) -> Result<Object> {
        let mut object = Object::new();

        let mut token = self.lexer.next_token()?;
        if token.kind == TokenKind::RightBrace {
            return Ok(object);
        }

        loop {
            let key = match token.kind {
                TokenKind::String(key) => key,
                _ => return Err(expected_error("string key", &token)),
            };
            if object.contains_key(&key) {
                return Err(Error::new(ErrorKind::DuplicateKey { key }, token.span));
            }

            let colon = self.lexer.next_token()?;
            if colon.kind != TokenKind::Colon {
                return Err(expected_error("':'", &colon));
            }

            let value_token = self.lexer.next_token()?;
            let value = self.parse_from(value_token)?;
            object.insert(key, value);

            let separator = self.lexer.next_token()?;
            match separator.kind {
                TokenKind::Comma => token = self.lexer.next_token()?,
                TokenKind::RightBrace => return Ok(object),
                _ => return Err(expected_error("',' or '}'", &separator)),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Array> {
        let mut array = Array::new();

        let mut token = self.lexer.next_token()?;
        if token.kind == TokenKind::RightBracket {
            return Ok(array);
        }

        loop {
            array.push(self.parse_from(token)?);

            let separator = self.lexer.next_token()?;
            match separator.kind {
                TokenKind::Comma => token = self.lexer.next_token()?,
                TokenKind::RightBracket => return Ok(array),
                _ => return Err(expected_error("',' or ']'", &separator)),
            }
        }
    }

    fn increment_depth(&mut self, token: &Token) -> Result<()> {
        if self.config.max_depth > 0 && self.depth >= self.config.max_depth {
            return Err(Error::new(
                ErrorKind::MaxDepthExceeded {
                    max: self.config.max_depth,
                },
                token.span,
            ));
        }
        self.depth = self.depth.saturating_add(1);
        Ok(())
    }
}

fn expected_error(expected: &str, token: &Token) -> Error {
    Error::new(
        ErrorKind::Expected {
            expected: expected.to_string(),
            found: token.kind.name().to_string(),
        },
        token.span,
    )
}
