//! Token kind definitions for the SQL tokenizer.
//!
//! Every token produced by `tokenizer.rs` carries one of these kinds. The
//! reserved-word kinds are split into six classes; they only matter to the
//! formatter, which decides line breaks and indentation from them. The grammar
//! treats every reserved class the same.
//!
//! `Cursor` is never produced by the tokenizer. The parser inserts a zero-width
//! token of this kind at the edit position when no real token sits there.

/// Formatter-relevant class of a reserved word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ReservedClass {
    /// Starts a clause on a new line and indents what follows (`SELECT`, `FROM`).
    #[display("top-level")]
    TopLevel,
    /// Sits on a line of its own, followed by an indented newline (`WITH`).
    #[display("top-level-newline")]
    TopLevelNewline,
    /// Starts a new line without indenting the clause (`UNION`).
    #[display("top-level-no-indent")]
    TopLevelNoIndent,
    /// Sits on a line of its own without indentation (`GO`).
    #[display("top-level-newline-no-indent")]
    TopLevelNewlineNoIndent,
    /// Starts a new line at the current indent (`AND`, `LEFT JOIN`).
    #[display("newline")]
    Newline,
    /// Reserved, but does not affect layout.
    #[display("plain")]
    Plain,
}

impl ReservedClass {
    /// Order in which the tokenizer tries the classes.
    pub const PRIORITY: [Self; 6] = [
        ReservedClass::TopLevel,
        ReservedClass::TopLevelNewline,
        ReservedClass::Newline,
        ReservedClass::TopLevelNoIndent,
        ReservedClass::TopLevelNewlineNoIndent,
        ReservedClass::Plain,
    ];

    pub fn rank(self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|class| *class == self)
            .unwrap_or(Self::PRIORITY.len())
    }
}

/// Classification for a token produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TokenKind {
    #[display("whitespace")]
    Whitespace,
    /// Identifier or any non-reserved word.
    #[display("word")]
    Word,
    /// Quoted literal or quoted identifier.
    #[display("string")]
    String,
    #[display("number")]
    Number,
    /// Punctuation or operator, including `,`, `.` and `;`.
    #[display("operator")]
    Operator,
    /// `(` or the word `CASE` when the configuration treats it as a block opener.
    #[display("open-paren")]
    OpenParen,
    /// `)` or the word `END`.
    #[display("close-paren")]
    CloseParen,
    /// `?`, `?1`, `:name`, `@name`, `@"quoted name"`.
    #[display("placeholder")]
    Placeholder,
    #[display("reserved-{_0}")]
    Reserved(ReservedClass),
    #[display("line-comment")]
    LineComment,
    #[display("block-comment")]
    BlockComment,
    /// Zero-width marker for the edit position, inserted by the parser.
    #[display("cursor")]
    Cursor,
}

impl TokenKind {
    pub fn is_reserved(&self) -> bool {
        matches!(self, TokenKind::Reserved(_))
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Whitespace and comments carry no syntax.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace) || self.is_comment()
    }

    /// True for kinds that carry a name or value rather than structure.
    pub fn is_word_like(&self) -> bool {
        matches!(
            self,
            TokenKind::Word
                | TokenKind::String
                | TokenKind::Number
                | TokenKind::Placeholder
                | TokenKind::Reserved(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_detection() {
        let kind = TokenKind::Reserved(ReservedClass::TopLevel);
        assert!(kind.is_reserved());
        assert!(kind.is_word_like());
        assert!(!TokenKind::Word.is_reserved());
    }

    #[test]
    fn trivia_classification() {
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(TokenKind::LineComment.is_trivia());
        assert!(TokenKind::BlockComment.is_trivia());
        assert!(!TokenKind::Operator.is_trivia());
        assert!(!TokenKind::Cursor.is_trivia());
    }

    #[test]
    fn display_names() {
        assert_eq!(TokenKind::OpenParen.to_string(), "open-paren");
        assert_eq!(
            TokenKind::Reserved(ReservedClass::Newline).to_string(),
            "reserved-newline"
        );
    }

    #[test]
    fn class_priority_rank() {
        assert_eq!(ReservedClass::TopLevel.rank(), 0);
        assert!(ReservedClass::Newline.rank() < ReservedClass::TopLevelNoIndent.rank());
        assert_eq!(ReservedClass::Plain.rank(), 5);
    }
}
