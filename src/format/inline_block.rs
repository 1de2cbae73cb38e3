use crate::sql::{ReservedClass, Token, TokenKind};

/// Longest parenthesized span, in characters, that stays on one line.
pub const INLINE_MAX_LENGTH: usize = 120;

/// Tracks parenthesized spans rendered on a single line (`COUNT(*)`,
/// `DECIMAL(7, 2)`). Parens nested inside an inline block are inline too.
#[derive(Debug, Clone, Default)]
pub struct InlineBlock {
    level: usize,
}

impl InlineBlock {
    /// Called on an opening paren at `index`.
    pub fn begin_if_possible(&mut self, tokens: &[Token], index: usize) {
        if self.level > 0 {
            self.level += 1;
        } else if is_inline_block(tokens, index) {
            self.level = 1;
        }
    }

    pub fn end(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub fn is_active(&self) -> bool {
        self.level > 0
    }

    pub fn reset(&mut self) {
        self.level = 0;
    }
}

/// True when the paren at `index` closes within `INLINE_MAX_LENGTH` characters
/// without a line-breaking keyword, comment or `;` in between.
fn is_inline_block(tokens: &[Token], index: usize) -> bool {
    let mut length = 0;
    let mut depth = 0usize;
    for token in tokens.iter().skip(index) {
        length += token.text.chars().count();
        if length > INLINE_MAX_LENGTH {
            return false;
        }
        match token.kind {
            TokenKind::OpenParen => depth += 1,
            TokenKind::CloseParen => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return true;
                }
            }
            _ => {}
        }
        if is_forbidden(token) {
            return false;
        }
    }
    false
}

fn is_forbidden(token: &Token) -> bool {
    matches!(
        token.kind,
        TokenKind::Reserved(
            ReservedClass::TopLevel | ReservedClass::TopLevelNewline | ReservedClass::Newline
        ) | TokenKind::LineComment
            | TokenKind::BlockComment
    ) || token.text == ";"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::tokenize;

    fn open_paren(tokens: &[Token]) -> usize {
        tokens
            .iter()
            .position(|t| t.text == "(")
            .expect("an opening paren")
    }

    #[test]
    fn short_call_is_inline() {
        let tokens = tokenize("COUNT(*) FROM t");
        let mut block = InlineBlock::default();
        block.begin_if_possible(&tokens, open_paren(&tokens));
        assert!(block.is_active());
        block.end();
        assert!(!block.is_active());
    }

    #[test]
    fn sub_select_is_not_inline() {
        let tokens = tokenize("(SELECT a FROM t)");
        assert!(!is_inline_block(&tokens, 0));
    }

    #[test]
    fn long_span_is_not_inline() {
        let args = (0..40).map(|i| format!("col{i}")).collect::<Vec<_>>().join(", ");
        let tokens = tokenize(&format!("f({args})"));
        assert!(!is_inline_block(&tokens, open_paren(&tokens)));
    }

    #[test]
    fn comments_and_semicolons_break_inline() {
        let tokens = tokenize("(a -- note\n)");
        assert!(!is_inline_block(&tokens, 0));
        let tokens = tokenize("(a; b)");
        assert!(!is_inline_block(&tokens, 0));
    }

    #[test]
    fn nested_parens_stay_inline() {
        let tokens = tokenize("f(g(1), 2)");
        let mut block = InlineBlock::default();
        block.begin_if_possible(&tokens, 1);
        block.begin_if_possible(&tokens, 3);
        block.end();
        assert!(block.is_active());
        block.end();
        assert!(!block.is_active());
    }

    #[test]
    fn unclosed_paren_is_not_inline() {
        let tokens = tokenize("f(a, b");
        assert!(!is_inline_block(&tokens, 1));
    }
}
