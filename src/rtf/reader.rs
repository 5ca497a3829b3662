//! Group-scoped token stream.
//!
//! [`GroupReader`] wraps the [`Lexer`] and tracks brace nesting. Every open
//! group owns a [`ParseLayer`] copied from its parent on entry and dropped on
//! exit, which is how RTF scopes the Unicode fallback width (`\ucN`).

use super::lexer::{Lexer, Token, TokenKind};

/// Ambient state scoped to one brace level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLayer {
    /// Number of fallback characters following each `\uN` (`\ucN`)
    pub unicode_skip: usize,
    /// Fallback characters still to be discarded
    pub skip_remaining: usize,
}

impl Default for ParseLayer {
    fn default() -> Self {
        Self {
            unicode_skip: 1,
            skip_remaining: 0,
        }
    }
}

/// Token reader that tracks group nesting.
#[derive(Debug)]
pub struct GroupReader<'a> {
    lexer: Lexer<'a>,
    token: Token<'a>,
    level: usize,
    base: ParseLayer,
    layers: Vec<ParseLayer>,
    first_in_group: bool,
    stray_close: bool,
}

impl<'a> GroupReader<'a> {
    /// Create a reader positioned before the first token.
    pub fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
            token: Token::END,
            level: 0,
            base: ParseLayer::default(),
            layers: Vec::new(),
            first_in_group: false,
            stray_close: false,
        }
    }

    /// Advance to the next token and update the nesting state.
    ///
    /// A `}` without a matching `{` leaves the level at 0 and is reported
    /// through [`GroupReader::hit_stray_close`].
    pub fn next(&mut self) -> Token<'a> {
        let previous = self.token.kind;
        self.token = self.lexer.next_token();
        self.first_in_group = previous == TokenKind::GroupStart;

        match self.token.kind {
            TokenKind::GroupStart => {
                let layer = self.layer_mut();
                layer.skip_remaining = 0;
                let inherited = *layer;
                self.layers.push(inherited);
                self.level += 1;
            },
            TokenKind::GroupEnd => {
                if self.layers.pop().is_some() {
                    self.level -= 1;
                } else {
                    log::debug!(
                        target: "rtf.reader",
                        "unmatched group end at byte {}",
                        self.lexer.position()
                    );
                    self.stray_close = true;
                }
            },
            _ => {},
        }

        self.token
    }

    /// The current token.
    #[inline]
    pub fn token(&self) -> Token<'a> {
        self.token
    }

    /// Kind of the token after the current one.
    #[inline]
    pub fn peek_kind(&self) -> TokenKind {
        self.lexer.peek_kind()
    }

    /// Current nesting level; 0 outside every group.
    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Number of layers pushed for open groups.
    #[inline]
    pub fn open_layers(&self) -> usize {
        self.layers.len()
    }

    /// Whether the current token directly follows a `{`.
    #[inline]
    pub fn is_first_in_group(&self) -> bool {
        self.first_in_group
    }

    /// Whether a `}` without a matching `{` has been read.
    #[inline]
    pub fn hit_stray_close(&self) -> bool {
        self.stray_close
    }

    /// Byte offset of the lexer.
    #[inline]
    pub fn position(&self) -> usize {
        self.lexer.position()
    }

    /// Total input length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.lexer.len()
    }

    /// Whether the input is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lexer.is_empty()
    }

    /// The layer of the innermost open group.
    #[inline]
    pub fn layer(&self) -> &ParseLayer {
        self.layers.last().unwrap_or(&self.base)
    }

    /// Mutable access to the innermost layer.
    #[inline]
    pub fn layer_mut(&mut self) -> &mut ParseLayer {
        self.layers.last_mut().unwrap_or(&mut self.base)
    }

    /// Skip the rest of the current group.
    ///
    /// The matching `}` is left unread so the next call to
    /// [`GroupReader::next`] closes the group normally.
    pub fn skip_to_group_end(&mut self) {
        if !self.lexer.skip_group_body() {
            log::debug!(target: "rtf.reader", "input ended inside a skipped group");
        }
    }

    /// Set the fallback width for `\uN` escapes in the current group.
    #[inline]
    pub fn set_unicode_skip(&mut self, count: usize) {
        self.layer_mut().unicode_skip = count;
    }

    /// Start discarding the fallback text of a `\uN` escape.
    #[inline]
    pub fn begin_fallback(&mut self) {
        let layer = self.layer_mut();
        layer.skip_remaining = layer.unicode_skip;
    }

    /// Apply pending fallback suppression to `token`.
    ///
    /// Returns `None` when the whole token is discarded, or the part of a text
    /// token that survives. Every non-text token counts as one character.
    pub fn filter_fallback(&mut self, token: Token<'a>) -> Option<Token<'a>> {
        let layer = self.layer_mut();
        if layer.skip_remaining == 0 {
            return Some(token);
        }

        match token.kind {
            TokenKind::GroupStart | TokenKind::GroupEnd | TokenKind::EndOfInput => Some(token),
            TokenKind::Text => {
                let mut chars = token.key.char_indices();
                let cut = chars
                    .nth(layer.skip_remaining)
                    .map_or(token.key.len(), |(offset, _)| offset);
                let skipped = token.key[..cut].chars().count();
                layer.skip_remaining -= skipped;
                let rest = &token.key[cut..];
                if rest.is_empty() {
                    None
                } else {
                    Some(Token { key: rest, ..token })
                }
            },
            _ => {
                layer.skip_remaining -= 1;
                None
            },
        }
    }
}
