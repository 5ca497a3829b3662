//! RTF lexer/tokenizer.
//!
//! The lexer turns RTF source into a stream of [`Token`]s one lexical unit at
//! a time. It never rejects input: malformed sequences degrade to the most
//! permissive token kind that still makes progress, and the end of input is
//! reported as [`TokenKind::EndOfInput`].
//!
//! Token payloads borrow directly from the source, so producing a token never
//! allocates.

use memchr::memchr3;

/// Maximum number of parameter digits that are accumulated exactly.
const MAX_PARAM_DIGITS: usize = 10;

/// Kinds of lexical units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `{`
    GroupStart,
    /// `}`
    GroupEnd,
    /// A backslash followed by one non-letter character, e.g. `\~` or `\'e9`.
    ControlSymbol,
    /// A control word such as `\par` or `\fs24`.
    Keyword,
    /// A control word introduced by `\*`, marking an ignorable destination.
    ExtensionKeyword,
    /// A run of literal text.
    Text,
    /// Raw payload following `\binN`.
    Binary,
    /// No input left.
    EndOfInput,
}

/// A single lexical unit.
///
/// `key` holds the keyword name, the symbol character, the literal text or
/// the binary payload depending on `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token kind
    pub kind: TokenKind,
    /// Keyword name, symbol, text or payload
    pub key: &'a str,
    /// Numeric parameter (keyword parameter or hex escape byte value)
    pub param: Option<i32>,
    /// The two original hex digits of a `\'hh` escape
    pub hex: Option<&'a str>,
}

impl<'a> Token<'a> {
    #[inline]
    const fn new(kind: TokenKind, key: &'a str) -> Self {
        Self {
            kind,
            key,
            param: None,
            hex: None,
        }
    }

    /// The end-of-input marker.
    pub const END: Token<'static> = Token::new(TokenKind::EndOfInput, "");

    /// Whether this token is a `\'hh` byte escape with a valid byte value.
    #[inline]
    pub fn is_hex_escape(&self) -> bool {
        self.kind == TokenKind::ControlSymbol && self.key == "'" && self.param.is_some()
    }

    /// The escaped byte of a `\'hh` token.
    #[inline]
    pub fn hex_byte(&self) -> Option<u8> {
        if self.is_hex_escape() {
            self.param.and_then(|value| u8::try_from(value).ok())
        } else {
            None
        }
    }

    /// Whether this token is a control word (plain or extension).
    #[inline]
    pub fn is_keyword(&self) -> bool {
        matches!(self.kind, TokenKind::Keyword | TokenKind::ExtensionKeyword)
    }
}

/// RTF lexer over an in-memory source.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// Source input
    input: &'a str,
    /// Current position in bytes
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Current byte offset into the source.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total source length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.input.len()
    }

    /// Whether the source is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Kind of the next token, without consuming it.
    pub fn peek_kind(&self) -> TokenKind {
        self.clone().next_token().kind
    }

    /// Consume and return the next token.
    pub fn next_token(&mut self) -> Token<'a> {
        self.skip_whitespace();

        let Some(&byte) = self.bytes().get(self.pos) else {
            return Token::END;
        };

        match byte {
            b'{' => {
                self.pos += 1;
                Token::new(TokenKind::GroupStart, "{")
            },
            b'}' => {
                self.pos += 1;
                Token::new(TokenKind::GroupEnd, "}")
            },
            b'\\' => self.parse_control(),
            b'"' => self.parse_quoted().unwrap_or_else(|| self.parse_text()),
            _ => self.parse_text(),
        }
    }

    /// Consume everything up to, but not including, the `}` that closes the
    /// group the lexer is currently inside.
    ///
    /// Escaped braces do not count towards the balance. Returns `false` when
    /// the input ends before the closing brace.
    pub fn skip_group_body(&mut self) -> bool {
        let mut depth = 0usize;

        while let Some(offset) = memchr3(b'{', b'}', b'\\', &self.bytes()[self.pos..]) {
            self.pos += offset;
            match self.bytes()[self.pos] {
                b'{' => {
                    depth += 1;
                    self.pos += 1;
                },
                b'}' => {
                    if depth == 0 {
                        return true;
                    }
                    depth -= 1;
                    self.pos += 1;
                },
                _ => {
                    // Skip the backslash and whatever it escapes
                    self.pos += 1;
                    self.advance_char();
                },
            }
        }

        self.pos = self.input.len();
        false
    }

    #[inline]
    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    /// Advance past one full character (the input may contain multi-byte text).
    #[inline]
    fn advance_char(&mut self) {
        if let Some(ch) = self.input[self.pos..].chars().next() {
            self.pos += ch.len_utf8();
        }
    }

    /// Skip the characters RTF ignores between tokens.
    #[inline]
    fn skip_whitespace(&mut self) {
        while let Some(&byte) = self.bytes().get(self.pos) {
            if matches!(byte, b'\r' | b'\n' | b'\t' | b'\0') {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Parse a control word, control symbol or extension keyword.
    fn parse_control(&mut self) -> Token<'a> {
        self.pos += 1; // Skip '\'

        let Some(&byte) = self.bytes().get(self.pos) else {
            log::trace!(target: "rtf.lexer", "dangling backslash at end of input");
            return Token::END;
        };

        match byte {
            b'*' => {
                self.pos += 1;
                let checkpoint = self.pos;
                self.skip_whitespace();
                if self.bytes().get(self.pos) == Some(&b'\\')
                    && self
                        .bytes()
                        .get(self.pos + 1)
                        .is_some_and(u8::is_ascii_alphabetic)
                {
                    self.pos += 1;
                    let mut token = self.parse_keyword();
                    if token.kind == TokenKind::Keyword {
                        token.kind = TokenKind::ExtensionKeyword;
                    }
                    return token;
                }
                self.pos = checkpoint;
                Token::new(TokenKind::ControlSymbol, "*")
            },
            b'\'' => self.parse_hex_escape(),
            b'\r' | b'\n' => {
                // A backslash before a line break is an implicit paragraph mark
                self.pos += 1;
                Token::new(TokenKind::Keyword, "par")
            },
            _ if byte.is_ascii_alphabetic() => self.parse_keyword(),
            _ => {
                let start = self.pos;
                self.advance_char();
                Token::new(TokenKind::ControlSymbol, &self.input[start..self.pos])
            },
        }
    }

    /// Parse a keyword name, its optional parameter and delimiter.
    fn parse_keyword(&mut self) -> Token<'a> {
        let start = self.pos;
        while self
            .bytes()
            .get(self.pos)
            .is_some_and(u8::is_ascii_alphabetic)
        {
            self.pos += 1;
        }
        let key = &self.input[start..self.pos];

        let param = self.parse_numeric_parameter();

        // Exactly one delimiting space belongs to the keyword
        if self.bytes().get(self.pos) == Some(&b' ') {
            self.pos += 1;
        }

        if key == "bin"
            && let Some(length) = param
            && length > 0
        {
            return self.take_binary(length.unsigned_abs() as usize);
        }

        Token {
            kind: TokenKind::Keyword,
            key,
            param,
            hex: None,
        }
    }

    /// Parse the optional signed decimal parameter after a keyword name.
    fn parse_numeric_parameter(&mut self) -> Option<i32> {
        let bytes = self.bytes();
        let negative = bytes.get(self.pos) == Some(&b'-');
        let digits_start = self.pos + usize::from(negative);

        if !bytes.get(digits_start).is_some_and(u8::is_ascii_digit) {
            return None;
        }

        let mut end = digits_start;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        self.pos = end;

        let digits = &self.input[digits_start..end];
        if digits.len() > MAX_PARAM_DIGITS {
            log::trace!(target: "rtf.lexer", "oversized keyword parameter {digits:?} saturated");
        }
        let magnitude = digits
            .bytes()
            .take(MAX_PARAM_DIGITS + 1)
            .fold(0i64, |acc, digit| acc * 10 + i64::from(digit - b'0'));
        let value = if negative { -magnitude } else { magnitude };
        Some(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
    }

    /// Parse a `\'hh` escape. Invalid digits yield a bare `'` symbol.
    fn parse_hex_escape(&mut self) -> Token<'a> {
        self.pos += 1; // Skip '\''

        let bytes = self.bytes();
        let hex_end = self.pos + 2;
        if hex_end <= bytes.len() && bytes[self.pos..hex_end].iter().all(u8::is_ascii_hexdigit) {
            let hex = &self.input[self.pos..hex_end];
            self.pos = hex_end;
            return Token {
                kind: TokenKind::ControlSymbol,
                key: "'",
                param: u8::from_str_radix(hex, 16).ok().map(i32::from),
                hex: Some(hex),
            };
        }

        log::trace!(target: "rtf.lexer", "malformed hex escape at byte {}", self.pos);
        Token::new(TokenKind::ControlSymbol, "'")
    }

    /// Take `length` raw characters as a binary payload.
    fn take_binary(&mut self, length: usize) -> Token<'a> {
        let start = self.pos;
        let end = self.input[start..]
            .char_indices()
            .nth(length)
            .map_or(self.input.len(), |(offset, _)| start + offset);
        self.pos = end;
        Token::new(TokenKind::Binary, &self.input[start..end])
    }

    /// Parse a double-quoted run verbatim.
    ///
    /// Only succeeds when the closing quote appears before any line break or
    /// brace; otherwise the quote is left to be read as plain text.
    fn parse_quoted(&mut self) -> Option<Token<'a>> {
        let rest = &self.bytes()[self.pos + 1..];
        let close = rest
            .iter()
            .position(|&b| matches!(b, b'"' | b'\r' | b'\n' | b'{' | b'}'))?;
        if rest[close] != b'"' {
            return None;
        }

        let start = self.pos;
        self.pos += close + 2;
        Some(Token::new(TokenKind::Text, &self.input[start..self.pos]))
    }

    /// Parse plain text until the next special character.
    fn parse_text(&mut self) -> Token<'a> {
        let start = self.pos;
        // The first byte is consumed unconditionally so a lone quote makes progress
        self.advance_char();
        while let Some(&byte) = self.bytes().get(self.pos) {
            if matches!(byte, b'\\' | b'{' | b'}' | b'\r' | b'\n' | b'\t' | b'\0') {
                break;
            }
            self.pos += 1;
        }
        // Stop bytes are ASCII, so the slice always ends on a character boundary
        Token::new(TokenKind::Text, &self.input[start..self.pos])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token<'_>> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            if token.kind == TokenKind::EndOfInput {
                break;
            }
            tokens.push(token);
        }
        tokens
    }

    #[test]
    fn test_simple_tokenization() {
        let tokens = tokenize(r"{\rtf1\ansi Hello}");

        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0].kind, TokenKind::GroupStart);
        assert_eq!(tokens[1].kind, TokenKind::Keyword);
        assert_eq!(tokens[1].key, "rtf");
        assert_eq!(tokens[1].param, Some(1));
        assert_eq!(tokens[2].key, "ansi");
        assert_eq!(tokens[2].param, None);
        assert_eq!(tokens[3].kind, TokenKind::Text);
        assert_eq!(tokens[3].key, "Hello");
        assert_eq!(tokens[4].kind, TokenKind::GroupEnd);
    }

    #[test]
    fn test_keyword_delimiter_space_is_consumed_once() {
        let tokens = tokenize(r"\b  bold");
        assert_eq!(tokens[0].key, "b");
        assert_eq!(tokens[1].key, " bold");
    }

    #[test]
    fn test_negative_parameter() {
        let tokens = tokenize(r"\fi-360\u-3913 ?");
        assert_eq!(tokens[0].param, Some(-360));
        assert_eq!(tokens[1].key, "u");
        assert_eq!(tokens[1].param, Some(-3913));
        assert_eq!(tokens[2].key, "?");
    }

    #[test]
    fn test_dash_without_digits_is_not_a_parameter() {
        let tokens = tokenize(r"\b-x");
        assert_eq!(tokens[0].param, None);
        assert_eq!(tokens[1].key, "-x");
    }

    #[test]
    fn test_oversized_parameter_saturates() {
        let tokens = tokenize(r"\fs99999999999999");
        assert_eq!(tokens[0].param, Some(i32::MAX));
    }

    #[test]
    fn test_hex_escape() {
        let tokens = tokenize(r"\'e9\'zz");
        assert!(tokens[0].is_hex_escape());
        assert_eq!(tokens[0].hex_byte(), Some(0xE9));
        assert_eq!(tokens[0].hex, Some("e9"));
        assert_eq!(tokens[1].kind, TokenKind::ControlSymbol);
        assert!(!tokens[1].is_hex_escape());
        assert_eq!(tokens[2].key, "zz");
    }

    #[test]
    fn test_extension_keyword() {
        let tokens = tokenize(r"{\*\generator Riched20;}");
        assert_eq!(tokens[1].kind, TokenKind::ExtensionKeyword);
        assert_eq!(tokens[1].key, "generator");
        assert_eq!(tokens[2].key, "Riched20;");
    }

    #[test]
    fn test_star_without_keyword_degrades_to_symbol() {
        let tokens = tokenize(r"\*text");
        assert_eq!(tokens[0].kind, TokenKind::ControlSymbol);
        assert_eq!(tokens[0].key, "*");
        assert_eq!(tokens[1].key, "text");
    }

    #[test]
    fn test_whitespace_is_transparent() {
        let tokens = tokenize("Hel\r\nlo\t\0{");
        assert_eq!(tokens[0].key, "Hel");
        assert_eq!(tokens[1].key, "lo");
        assert_eq!(tokens[2].kind, TokenKind::GroupStart);
    }

    #[test]
    fn test_escaped_line_break_is_par() {
        let tokens = tokenize("a\\\nb");
        assert_eq!(tokens[1].kind, TokenKind::Keyword);
        assert_eq!(tokens[1].key, "par");
    }

    #[test]
    fn test_binary_payload() {
        let tokens = tokenize(r"\bin3 abcdef");
        assert_eq!(tokens[0].kind, TokenKind::Binary);
        assert_eq!(tokens[0].key, "abc");
        assert_eq!(tokens[1].key, "def");
    }

    #[test]
    fn test_quoted_run_is_verbatim() {
        let tokens = tokenize(r#""C:\temp\x" rest"#);
        assert_eq!(tokens[0].key, r#""C:\temp\x""#);
        assert_eq!(tokens[1].key, " rest");
    }

    #[test]
    fn test_unterminated_quote_is_plain_text() {
        let tokens = tokenize("\"open\\par");
        assert_eq!(tokens[0].key, "\"open");
        assert_eq!(tokens[1].key, "par");
    }

    #[test]
    fn test_multibyte_control_symbol() {
        let tokens = tokenize("\\é after");
        assert_eq!(tokens[0].kind, TokenKind::ControlSymbol);
        assert_eq!(tokens[0].key, "é");
    }

    #[test]
    fn test_dangling_backslash() {
        let mut lexer = Lexer::new("abc\\");
        assert_eq!(lexer.next_token().key, "abc");
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfInput);
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut lexer = Lexer::new(r"{\b x}");
        assert_eq!(lexer.peek_kind(), TokenKind::GroupStart);
        assert_eq!(lexer.next_token().kind, TokenKind::GroupStart);
        assert_eq!(lexer.peek_kind(), TokenKind::Keyword);
    }

    #[test]
    fn test_skip_group_body() {
        let mut lexer = Lexer::new(r"{\*\foo a {nested \} b} c}tail");
        assert_eq!(lexer.next_token().kind, TokenKind::GroupStart);
        assert_eq!(lexer.next_token().kind, TokenKind::ExtensionKeyword);
        assert!(lexer.skip_group_body());
        assert_eq!(lexer.next_token().kind, TokenKind::GroupEnd);
        assert_eq!(lexer.next_token().key, "tail");
    }

    #[test]
    fn test_skip_group_body_unterminated() {
        let mut lexer = Lexer::new(r"{\*\foo {a}");
        lexer.next_token();
        lexer.next_token();
        assert!(!lexer.skip_group_body());
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfInput);
    }
}
