//! Token model tying a `TokenKind` to its text and source span.
//!
//! Offsets are byte offsets into the original SQL string. Keeping the text on
//! the token lets the parser and formatter work from the token list alone,
//! while the offsets still let cursor-aware code relate tokens back to the
//! editor buffer.
use crate::sql::token_kind::TokenKind;

/// A lexical token with its inclusive start and exclusive end byte offsets.
///
/// Invariants:
/// - `end == start + text.len()`
/// - only `TokenKind::Cursor` tokens are empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
    /// Placeholder key (`id` for `:id`, `2` for `?2`, empty for a bare `?`).
    pub key: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, start: usize) -> Self {
        let text = text.into();
        Self {
            kind,
            end: start + text.len(),
            text,
            start,
            key: None,
        }
    }

    /// Zero-width marker for the edit position.
    pub fn cursor(offset: usize) -> Self {
        Self::new(TokenKind::Cursor, "", offset)
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Byte length of this token (`end - start`).
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_cursor(&self) -> bool {
        self.kind == TokenKind::Cursor
    }

    pub fn is_reserved(&self) -> bool {
        self.kind.is_reserved()
    }

    /// Case-insensitive comparison of the token text with `literal`.
    pub fn is(&self, literal: &str) -> bool {
        self.text.eq_ignore_ascii_case(literal)
    }

    /// True if the byte offset lies within this token's span.
    ///
    /// NOTE: End is exclusive, so `cursor == end` returns false.
    pub fn contains(&self, cursor: usize) -> bool {
        cursor >= self.start && cursor < self.end
    }

    /// True if the token starts before `cursor` and ends at or after it, which
    /// is how an editor caret placed right after a word relates to that word.
    pub fn touches(&self, cursor: usize) -> bool {
        self.start < cursor && cursor <= self.end
    }

    pub const fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_and_empty() {
        let t = Token::new(TokenKind::Operator, ",", 5);
        assert_eq!(t.len(), 1);
        assert_eq!(t.end, 6);
        assert!(!t.is_empty());
        assert!(Token::cursor(3).is_empty());
    }

    #[test]
    fn contains_is_end_exclusive() {
        let t = Token::new(TokenKind::Word, "Users", 0);
        assert!(t.contains(2));
        assert!(!t.contains(5));
    }

    #[test]
    fn touches_includes_end() {
        let t = Token::new(TokenKind::Word, "abc", 4);
        assert!(!t.touches(4));
        assert!(t.touches(5));
        assert!(t.touches(7));
        assert!(!t.touches(8));
    }

    #[test]
    fn literal_comparison_ignores_case() {
        let t = Token::new(TokenKind::Word, "SeLeCt", 0);
        assert!(t.is("select"));
        assert!(!t.is("from"));
    }

    #[test]
    fn placeholder_key() {
        let t = Token::new(TokenKind::Placeholder, ":id", 0).with_key("id");
        assert_eq!(t.key.as_deref(), Some("id"));
        assert_eq!(t.span(), (0, 3));
    }
}
