//! JSON-specific lexer

use crate::error::{Error, ErrorKind, Pos, Result, Span};
use crate::lexer::cursor::Cursor;
use crate::lexer::token::{Token, TokenKind};

/// JSON lexer that tokenizes JSON input
#[derive(Clone, Debug)]
pub struct JsonLexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> JsonLexer<'a> {
    /// Create a new JSON lexer from input bytes
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Result<Token> {
        self.cursor.skip_whitespace();

        let start = self.cursor.position();

        let kind = match self.cursor.current() {
            None => TokenKind::Eof,
            Some(b) => match b {
                b'{' => self.single(TokenKind::LeftBrace),
                b'}' => self.single(TokenKind::RightBrace),
                b'[' => self.single(TokenKind::LeftBracket),
                b']' => self.single(TokenKind::RightBracket),
                b':' => self.single(TokenKind::Colon),
                b',' => self.single(TokenKind::Comma),
                b'"' => self.lex_string()?,
                b'n' => self.lex_keyword(b"null", TokenKind::Null)?,
                b't' => self.lex_keyword(b"true", TokenKind::True)?,
                b'f' => self.lex_keyword(b"false", TokenKind::False)?,
                b'-' | b'0'..=b'9' => self.lex_number()?,
                _ => return Err(error_at(ErrorKind::InvalidToken, start)),
            },
        };

        let end = self.cursor.position();
        Ok(Token::new(kind, Span::new(start, end)))
    }

    /// Current position, used by the parser for end-of-input errors
    pub const fn position(&self) -> Pos {
        self.cursor.position()
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance();
        kind
    }

    /// Lex a string literal
    fn lex_string(&mut self) -> Result<TokenKind> {
        let start = self.cursor.position();
        // Consume opening quote
        self.cursor.advance();

        let mut bytes = Vec::new();

        loop {
            match self.cursor.current() {
                None => return Err(error_at(ErrorKind::UnterminatedString, start)),
                Some(b'"') => {
                    self.cursor.advance();
                    break;
                }
                Some(b'\\') => {
                    self.cursor.advance();
                    let decoded = match self.cursor.current() {
                        Some(b'"') => '"',
                        Some(b'\\') => '\\',
                        Some(b'/') => '/',
                        Some(b'b') => '\x08',
                        Some(b'f') => '\x0C',
                        Some(b'n') => '\n',
                        Some(b'r') => '\r',
                        Some(b't') => '\t',
                        Some(b'u') => {
                            self.cursor.advance();
                            let ch = self.lex_unicode_escape()?;
                            push_char(&mut bytes, ch);
                            continue;
                        }
                        _ => return Err(self.error_here(ErrorKind::InvalidEscapeSequence)),
                    };
                    push_char(&mut bytes, decoded);
                    self.cursor.advance();
                }
                Some(b) => {
                    // JSON strings cannot contain control characters
                    if b < 0x20 {
                        return Err(self.error_here(ErrorKind::InvalidToken));
                    }
                    bytes.push(b);
                    self.cursor.advance();
                }
            }
        }

        String::from_utf8(bytes)
            .map(TokenKind::String)
            .map_err(|_| error_at(ErrorKind::InvalidUtf8, start))
    }

    /// Lex a unicode escape sequence (\uXXXX), joining surrogate pairs
    fn lex_unicode_escape(&mut self) -> Result<char> {
        let start_pos = self.cursor.position();
        let high = self.lex_hex4()?;

        if !(0xD800..=0xDFFF).contains(&high) {
            return char::from_u32(high)
                .ok_or_else(|| error_at(ErrorKind::InvalidUnicodeEscape, start_pos));
        }

        if high >= 0xDC00 || self.cursor.peek_bytes(2) != Some(b"\\u".as_slice()) {
            return Err(error_at(ErrorKind::InvalidUnicodeEscape, start_pos));
        }
        self.cursor.advance_by(2);

        let low = self.lex_hex4()?;
        if !(0xDC00..=0xDFFF).contains(&low) {
            return Err(error_at(ErrorKind::InvalidUnicodeEscape, start_pos));
        }

        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        char::from_u32(code).ok_or_else(|| error_at(ErrorKind::InvalidUnicodeEscape, start_pos))
    }

    fn lex_hex4(&mut self) -> Result<u32> {
        let mut code: u32 = 0;
        for _ in 0..4 {
            let digit = self
                .cursor
                .current()
                .and_then(|b| char::from(b).to_digit(16))
                .ok_or_else(|| self.error_here(ErrorKind::InvalidUnicodeEscape))?;
            code = code * 16 + digit;
            self.cursor.advance();
        }
        Ok(code)
    }

    /// Lex one of the keyword literals
    fn lex_keyword(&mut self, word: &[u8], kind: TokenKind) -> Result<TokenKind> {
        if self.cursor.starts_with(word) {
            self.cursor.advance_by(word.len());
            Ok(kind)
        } else {
            Err(self.error_here(ErrorKind::InvalidToken))
        }
    }

    /// Lex a number literal
    fn lex_number(&mut self) -> Result<TokenKind> {
        let start = self.cursor.pos();

        // Optional minus sign
        self.cursor.consume(b'-');

        // Integer part
        match self.cursor.current() {
            Some(b'0') => self.cursor.advance(),
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return Err(self.error_here(ErrorKind::InvalidNumber)),
        }

        // Optional fraction part
        if self.cursor.consume(b'.') {
            self.require_digits()?;
        }

        // Optional exponent part
        if matches!(self.cursor.current(), Some(b'e' | b'E')) {
            self.cursor.advance();
            if matches!(self.cursor.current(), Some(b'+' | b'-')) {
                self.cursor.advance();
            }
            self.require_digits()?;
        }

        // Digits, signs, dots and exponents are all ASCII
        let literal = String::from_utf8_lossy(self.cursor.slice_from(start)).into_owned();
        Ok(TokenKind::Number(literal))
    }

    fn require_digits(&mut self) -> Result<()> {
        if matches!(self.cursor.current(), Some(b'0'..=b'9')) {
            self.skip_digits();
            Ok(())
        } else {
            Err(self.error_here(ErrorKind::InvalidNumber))
        }
    }

    fn skip_digits(&mut self) {
        while let Some(b'0'..=b'9') = self.cursor.current() {
            self.cursor.advance();
        }
    }

    fn error_here(&self, kind: ErrorKind) -> Error {
        error_at(kind, self.cursor.position())
    }
}

impl Iterator for JsonLexer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) if token.kind == TokenKind::Eof => None,
            other => Some(other),
        }
    }
}

fn error_at(kind: ErrorKind, pos: Pos) -> Error {
    Error::at(kind, pos.offset, pos.line, pos.col)
}

fn push_char(bytes: &mut Vec<u8>, ch: char) {
    let mut buf = [0u8; 4];
    bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind, Result, Span};
    use std::fmt::Debug;

    fn ensure_eq<T: PartialEq + Debug>(left: T, right: T) -> Result<()> {
        if left == right {
            Ok(())
        } else {
            Err(Error::with_message(
                ErrorKind::InvalidToken,
                Span::empty(),
                format!("assertion failed: left={left:?} right={right:?}"),
            ))
        }
    }

    fn number(literal: &str) -> TokenKind {
        TokenKind::Number(literal.to_string())
    }

    #[test]
    fn test_lexer_structural_tokens() -> Result<()> {
        let input = b"{ } [ ] : ,";
        let mut lexer = JsonLexer::new(input);

        ensure_eq(lexer.next_token()?.kind, TokenKind::LeftBrace)?;
        ensure_eq(lexer.next_token()?.kind, TokenKind::RightBrace)?;
        ensure_eq(lexer.next_token()?.kind, TokenKind::LeftBracket)?;
        ensure_eq(lexer.next_token()?.kind, TokenKind::RightBracket)?;
        ensure_eq(lexer.next_token()?.kind, TokenKind::Colon)?;
        ensure_eq(lexer.next_token()?.kind, TokenKind::Comma)?;
        ensure_eq(lexer.next_token()?.kind, TokenKind::Eof)?;
        Ok(())
    }

    #[test]
    fn test_lexer_literals() -> Result<()> {
        let mut lexer = JsonLexer::new(b"null true false");

        ensure_eq(lexer.next_token()?.kind, TokenKind::Null)?;
        ensure_eq(lexer.next_token()?.kind, TokenKind::True)?;
        ensure_eq(lexer.next_token()?.kind, TokenKind::False)?;
        Ok(())
    }

    #[test]
    fn test_lexer_string_escapes() -> Result<()> {
        let input = br#""hello\nworld\t!\"\\\/\b\f""#;
        let mut lexer = JsonLexer::new(input);

        ensure_eq(
            lexer.next_token()?.kind,
            TokenKind::String("hello\nworld\t!\"\\/\x08\x0C".to_string()),
        )?;
        Ok(())
    }

    #[test]
    fn test_lexer_string_unicode_escape() -> Result<()> {
        let input = br#""hello \u0041\u0042\u0043""#;
        let mut lexer = JsonLexer::new(input);

        ensure_eq(
            lexer.next_token()?.kind,
            TokenKind::String("hello ABC".to_string()),
        )?;
        Ok(())
    }

    #[test]
    fn test_lexer_surrogate_pair() -> Result<()> {
        let input = br#""\ud83d\ude00""#;
        let mut lexer = JsonLexer::new(input);

        ensure_eq(lexer.next_token()?.kind, TokenKind::String("😀".to_string()))?;
        Ok(())
    }

    #[test]
    fn test_lexer_lone_surrogate() {
        let mut lexer = JsonLexer::new(br#""\ud83d x""#);
        let result = lexer.next_token();
        assert!(matches!(result, Err(err) if *err.kind() == ErrorKind::InvalidUnicodeEscape));
    }

    #[test]
    fn test_lexer_multibyte_utf8() -> Result<()> {
        let mut lexer = JsonLexer::new("\"naïve — ünïcode\"".as_bytes());
        ensure_eq(
            lexer.next_token()?.kind,
            TokenKind::String("naïve — ünïcode".to_string()),
        )?;
        Ok(())
    }

    #[test]
    fn test_lexer_numbers_keep_literal_text() -> Result<()> {
        let mut lexer = JsonLexer::new(b"123 -456 0 3.14 1e10 1E+5 -0.5e-2");

        ensure_eq(lexer.next_token()?.kind, number("123"))?;
        ensure_eq(lexer.next_token()?.kind, number("-456"))?;
        ensure_eq(lexer.next_token()?.kind, number("0"))?;
        ensure_eq(lexer.next_token()?.kind, number("3.14"))?;
        ensure_eq(lexer.next_token()?.kind, number("1e10"))?;
        ensure_eq(lexer.next_token()?.kind, number("1E+5"))?;
        ensure_eq(lexer.next_token()?.kind, number("-0.5e-2"))?;
        Ok(())
    }

    #[test]
    fn test_lexer_bad_numbers() {
        for input in [&b"-"[..], b"1.", b"1e", b"-x"] {
            let mut lexer = JsonLexer::new(input);
            let result = lexer.next_token();
            assert!(
                matches!(result, Err(ref err) if *err.kind() == ErrorKind::InvalidNumber),
                "input {input:?} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_lexer_iterator() -> Result<()> {
        let lexer = JsonLexer::new(b"[1, 2]");
        let tokens = lexer
            .map(|t| t.map(|token| token.kind))
            .collect::<Result<Vec<_>>>()?;

        ensure_eq(
            tokens,
            vec![
                TokenKind::LeftBracket,
                number("1"),
                TokenKind::Comma,
                number("2"),
                TokenKind::RightBracket,
            ],
        )?;
        Ok(())
    }

    #[test]
    fn test_lexer_unterminated_string() {
        let mut lexer = JsonLexer::new(br#""hello"#);
        let result = lexer.next_token();
        assert!(matches!(result, Err(err) if *err.kind() == ErrorKind::UnterminatedString));
    }

    #[test]
    fn test_lexer_invalid_escape() {
        let mut lexer = JsonLexer::new(br#""hello\x""#);
        let result = lexer.next_token();
        assert!(matches!(
            result,
            Err(err) if *err.kind() == ErrorKind::InvalidEscapeSequence
        ));
    }

    #[test]
    fn test_lexer_raw_control_character() {
        let mut lexer = JsonLexer::new(b"\"a\nb\"");
        let result = lexer.next_token();
        assert!(matches!(result, Err(err) if *err.kind() == ErrorKind::InvalidToken));
    }

    #[test]
    fn test_lexer_invalid_token() {
        let mut lexer = JsonLexer::new(b"@");
        let result = lexer.next_token();
        assert!(matches!(result, Err(err) if *err.kind() == ErrorKind::InvalidToken));
    }

    #[test]
    fn test_lexer_misspelled_keyword() {
        let mut lexer = JsonLexer::new(b"nul");
        let result = lexer.next_token();
        assert!(matches!(result, Err(err) if *err.kind() == ErrorKind::InvalidToken));
    }

    #[test]
    fn test_lexer_whitespace_tracks_lines() -> Result<()> {
        let mut lexer = JsonLexer::new(b"  \t\n\r  null  ");

        let token = lexer.next_token()?;
        ensure_eq(token.kind, TokenKind::Null)?;
        ensure_eq(token.span.start.line, 2)?;
        Ok(())
    }
}
