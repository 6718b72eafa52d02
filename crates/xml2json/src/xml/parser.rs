//! XML parser implementation

use indexmap::IndexMap;

use crate::error::{Error, ErrorKind, Pos, Result, Span};
use crate::lexer::Cursor;
use crate::text::{self, TextMode};
use crate::xml::model::{is_name_char, is_valid_name, Element};

/// Configuration for the XML parser
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum element nesting depth (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
    /// How direct text content is normalised
    pub text_mode: TextMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_size: 10 * 1024 * 1024, // 10 MB default
            text_mode: TextMode::Trim,
        }
    }
}

impl Config {
    /// Create a new config with unlimited depth and size
    pub const fn unlimited() -> Self {
        Self {
            max_depth: 0,
            max_size: 0,
            text_mode: TextMode::Trim,
        }
    }

    /// Create a new config with specific limits
    pub const fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
            text_mode: TextMode::Trim,
        }
    }

    /// Replace the text normalisation mode
    pub const fn with_text_mode(mut self, text_mode: TextMode) -> Self {
        self.text_mode = text_mode;
        self
    }
}

/// XML parser
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    config: Config,
    depth: u16,
}

impl<'a> Parser<'a> {
    /// Create a new XML parser with default configuration
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, Config::default())
    }

    /// Create a new XML parser with custom configuration
    pub const fn with_config(input: &'a [u8], config: Config) -> Self {
        Self {
            cursor: Cursor::new(input),
            config,
            depth: 0,
        }
    }

    /// Parse a whole document and return its root element
    pub fn parse(&mut self) -> Result<Element> {
        let len = self.cursor.remaining().len();
        if self.config.max_size > 0 && len > self.config.max_size {
            return Err(Error::at(
                ErrorKind::MaxSizeExceeded {
                    max: self.config.max_size,
                },
                self.config.max_size,
                0,
                0,
            ));
        }

        if self.cursor.starts_with(b"\xEF\xBB\xBF") {
            self.cursor.advance_by(3);
        }

        self.skip_misc(true)?;
        match self.cursor.current() {
            None => return Err(self.error_here(ErrorKind::NoRootElement)),
            Some(b'<') => {}
            Some(_) => {
                return Err(self.error_msg(ErrorKind::InvalidToken, "text before root element"))
            }
        }

        let root = self.parse_element()?;

        self.skip_misc(false)?;
        if !self.cursor.is_eof() {
            return Err(self.error_here(ErrorKind::TrailingContent));
        }

        Ok(root)
    }

    /// Skip whitespace, comments and processing instructions around the root
    fn skip_misc(&mut self, allow_doctype: bool) -> Result<()> {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.starts_with(b"<?") {
                self.skip_processing_instruction()?;
            } else if self.cursor.starts_with(b"<!--") {
                self.skip_comment()?;
            } else if allow_doctype && self.cursor.starts_with(b"<!DOCTYPE") {
                self.skip_doctype()?;
            } else {
                return Ok(());
            }
        }
    }

    fn parse_element(&mut self) -> Result<Element> {
        self.enter_element()?;
        let element = self.parse_element_inner();
        self.depth = self.depth.saturating_sub(1);
        element
    }

    fn parse_element_inner(&mut self) -> Result<Element> {
        self.expect_byte(b'<')?;
        let tag = self.parse_name()?;
        let attributes = self.parse_attributes()?;

        if self.cursor.consume(b'/') {
            self.expect_byte(b'>')?;
            return Ok(Element {
                tag,
                attributes,
                text: None,
                children: Vec::new(),
            });
        }

        self.expect_byte(b'>')?;

        let mut raw_text = String::new();
        let mut children = Vec::new();
        loop {
            if self.cursor.starts_with(b"</") {
                let close_pos = self.cursor.position();
                self.cursor.advance_by(2);
                let close_name = self.parse_name()?;
                if close_name != tag {
                    return Err(error_at(
                        ErrorKind::MismatchedTag {
                            expected: tag,
                            found: close_name,
                        },
                        close_pos,
                    ));
                }
                self.cursor.skip_whitespace();
                self.expect_byte(b'>')?;
                break;
            }

            if self.cursor.starts_with(b"<!--") {
                self.skip_comment()?;
            } else if self.cursor.starts_with(b"<![CDATA[") {
                raw_text.push_str(&self.parse_cdata()?);
            } else if self.cursor.starts_with(b"<?") {
                self.skip_processing_instruction()?;
            } else if self.cursor.starts_with(b"<!") {
                return Err(self.error_msg(ErrorKind::InvalidToken, "unexpected declaration"));
            } else if self.cursor.current() == Some(b'<') {
                children.push(self.parse_element()?);
            } else if self.cursor.is_eof() {
                return Err(self.error_msg(
                    ErrorKind::UnexpectedEof,
                    format!("unterminated element <{tag}>"),
                ));
            } else {
                raw_text.push_str(&self.parse_char_data(b'<', false)?);
            }
        }

        Ok(Element {
            tag,
            attributes,
            text: text::normalize(&raw_text, self.config.text_mode),
            children,
        })
    }

    fn enter_element(&mut self) -> Result<()> {
        if self.config.max_depth > 0 && self.depth >= self.config.max_depth {
            return Err(self.error_here(ErrorKind::MaxDepthExceeded {
                max: self.config.max_depth,
            }));
        }
        self.depth = self.depth.saturating_add(1);
        Ok(())
    }

    fn parse_attributes(&mut self) -> Result<IndexMap<String, String>> {
        let mut attrs = IndexMap::new();

        loop {
            let had_space = self.skip_whitespace();
            match self.cursor.current() {
                Some(b'/' | b'>') => break,
                Some(_) if !had_space => {
                    return Err(self.error_msg(
                        ErrorKind::InvalidToken,
                        "expected whitespace before attribute",
                    ))
                }
                Some(_) => {}
                None => return Err(self.error_here(ErrorKind::UnexpectedEof)),
            }

            let name_pos = self.cursor.position();
            let name = self.parse_name()?;
            self.skip_whitespace();
            self.expect_byte(b'=')?;
            self.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if attrs.contains_key(&name) {
                return Err(error_at(ErrorKind::DuplicateAttribute { name }, name_pos));
            }
            attrs.insert(name, value);
        }

        Ok(attrs)
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(b'"') => b'"',
            Some(b'\'') => b'\'',
            _ => {
                return Err(self.error_msg(
                    ErrorKind::InvalidToken,
                    "expected quoted attribute value",
                ))
            }
        };
        self.cursor.advance();

        let value = self.parse_char_data(quote, true)?;
        if !self.cursor.consume(quote) {
            return Err(self.error_msg(ErrorKind::UnexpectedEof, "unterminated attribute value"));
        }
        Ok(value)
    }

    /// Read character data up to `terminator` (not consumed), decoding
    /// references and normalising line endings. In attribute values literal
    /// tabs and line breaks become spaces; referenced ones are kept.
    fn parse_char_data(&mut self, terminator: u8, attribute: bool) -> Result<String> {
        let start = self.cursor.position();
        let mut bytes = Vec::new();

        while let Some(b) = self.cursor.current() {
            match b {
                _ if b == terminator => break,
                b'&' => {
                    let ch = self.parse_reference()?;
                    let mut buf = [0u8; 4];
                    bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                }
                b'<' => {
                    return Err(self.error_msg(
                        ErrorKind::InvalidToken,
                        "'<' is not allowed in attribute values",
                    ))
                }
                b'\r' => {
                    self.cursor.advance();
                    self.cursor.consume(b'\n');
                    bytes.push(if attribute { b' ' } else { b'\n' });
                }
                b'\t' | b'\n' if attribute => {
                    bytes.push(b' ');
                    self.cursor.advance();
                }
                _ => {
                    bytes.push(b);
                    self.cursor.advance();
                }
            }
        }

        let data = String::from_utf8(bytes).map_err(|_| error_at(ErrorKind::InvalidUtf8, start))?;
        check_chars(&data, start)?;
        Ok(data)
    }

    /// Decode one `&...;` reference, cursor at `&`
    fn parse_reference(&mut self) -> Result<char> {
        const MAX_REFERENCE_LEN: usize = 32;

        let start = self.cursor.position();
        self.cursor.advance();

        let name_start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b';' || !(b.is_ascii_alphanumeric() || b == b'#') {
                break;
            }
            if self.cursor.pos() - name_start >= MAX_REFERENCE_LEN {
                break;
            }
            self.cursor.advance();
        }
        let entity = String::from_utf8_lossy(self.cursor.slice_from(name_start)).into_owned();

        if !self.cursor.consume(b';') {
            return Err(error_at(ErrorKind::InvalidEntity { entity }, start));
        }

        decode_entity(&entity).ok_or_else(|| error_at(ErrorKind::InvalidEntity { entity }, start))
    }

    fn parse_cdata(&mut self) -> Result<String> {
        let start = self.cursor.position();
        self.cursor.advance_by(b"<![CDATA[".len());

        let content_start = self.cursor.pos();
        while !self.cursor.starts_with(b"]]>") {
            if self.cursor.is_eof() {
                return Err(error_at(ErrorKind::UnexpectedEof, start));
            }
            self.cursor.advance();
        }
        let raw = self.cursor.slice_from(content_start);
        self.cursor.advance_by(3);

        let content =
            std::str::from_utf8(raw).map_err(|_| error_at(ErrorKind::InvalidUtf8, start))?;
        check_chars(content, start)?;
        Ok(normalize_newlines(content))
    }

    fn parse_name(&mut self) -> Result<String> {
        let start_pos = self.cursor.position();
        let start = self.cursor.pos();

        while let Some(b) = self.cursor.current() {
            if is_name_byte(b) {
                self.cursor.advance();
            } else {
                break;
            }
        }

        if self.cursor.pos() == start {
            return match self.cursor.current() {
                Some(_) => Err(error_at(ErrorKind::InvalidName, start_pos)),
                None => Err(error_at(ErrorKind::UnexpectedEof, start_pos)),
            };
        }

        let name = std::str::from_utf8(self.cursor.slice_from(start))
            .map_err(|_| error_at(ErrorKind::InvalidUtf8, start_pos))?;
        if !is_valid_name(name) {
            return Err(error_at(ErrorKind::InvalidName, start_pos));
        }
        Ok(name.to_string())
    }

    fn skip_comment(&mut self) -> Result<()> {
        self.cursor.advance_by(4);
        self.skip_until(b"-->")
    }

    fn skip_processing_instruction(&mut self) -> Result<()> {
        self.cursor.advance_by(2);
        self.skip_until(b"?>")
    }

    /// Skip `<!DOCTYPE ...>`, including an internal subset in brackets
    fn skip_doctype(&mut self) -> Result<()> {
        let start = self.cursor.position();
        let mut depth = 0usize;
        let mut quote = None;

        while let Some(b) = self.cursor.current() {
            self.cursor.advance();
            match (quote, b) {
                (Some(q), _) if b == q => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b'[') => depth += 1,
                (None, b']') => depth = depth.saturating_sub(1),
                (None, b'>') if depth == 0 => return Ok(()),
                _ => {}
            }
        }

        Err(error_at(ErrorKind::UnexpectedEof, start))
    }

    fn skip_until(&mut self, pattern: &[u8]) -> Result<()> {
        let start = self.cursor.position();
        while self.cursor.current().is_some() {
            if self.cursor.starts_with(pattern) {
                self.cursor.advance_by(pattern.len());
                return Ok(());
            }
            self.cursor.advance();
        }
        Err(Error::with_message(
            ErrorKind::UnexpectedEof,
            Span::at(start),
            "unterminated markup",
        ))
    }

    fn expect_byte(&mut self, expected: u8) -> Result<()> {
        match self.cursor.current() {
            Some(b) if b == expected => {
                self.cursor.advance();
                Ok(())
            }
            Some(b) => Err(self.error_here(ErrorKind::Expected {
                expected: format!("'{}'", char::from(expected)),
                found: format!("'{}'", char::from(b)),
            })),
            None => Err(self.error_here(ErrorKind::UnexpectedEof)),
        }
    }

    /// Skip whitespace, reporting whether any was consumed
    fn skip_whitespace(&mut self) -> bool {
        let before = self.cursor.pos();
        self.cursor.skip_whitespace();
        self.cursor.pos() != before
    }

    fn error_here(&self, kind: ErrorKind) -> Error {
        error_at(kind, self.cursor.position())
    }

    fn error_msg(&self, kind: ErrorKind, message: impl Into<String>) -> Error {
        Error::with_message(kind, Span::at(self.cursor.position()), message)
    }
}

fn error_at(kind: ErrorKind, pos: Pos) -> Error {
    Error::at(kind, pos.offset, pos.line, pos.col)
}

/// Literal characters outside the XML character range are rejected; `start`
/// is where the surrounding run of data begins
fn check_chars(data: &str, start: Pos) -> Result<()> {
    match data.chars().find(|&ch| !text::is_xml_char(ch)) {
        Some(ch) => Err(Error::with_message(
            ErrorKind::InvalidToken,
            Span::at(start),
            format!("character U+{:04X} is not allowed in XML", u32::from(ch)),
        )),
        None => Ok(()),
    }
}

/// Bytes that can be part of a name; non-ASCII bytes are checked once the
/// whole name is decoded
fn is_name_byte(b: u8) -> bool {
    !b.is_ascii() || is_name_char(char::from(b))
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => decode_numeric_entity(entity),
    }
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()?
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok()?
    } else {
        return None;
    };
    char::from_u32(code).filter(|&ch| text::is_xml_char(ch))
}

fn normalize_newlines(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}
