//! Cursor-aware SQL parser.
//!
//! Modules:
//! - `engine`  : Backtracking combinators, cursor attribution and expectation tracking.
//! - `ast`     : Typed syntax tree.
//! - `node`    : Uniform node view, key paths and tree navigation.
//! - `grammar` : SQL rules building the tree.
//!
//! `parse` never fails. Text the grammar cannot consume is reported through
//! `ParseResult::error`, and whatever parsed before it is still returned.

pub mod ast;
pub mod engine;
pub mod grammar;
pub mod node;

pub use ast::*;
pub use engine::{Matching, ParseError, ParseOutput, Parser, Rule, Scanner};
pub use node::{KeyPath, Node, Segment, StatementKind};

use crate::sql::{Token, TokenKind, Tokenizer, is_grammar_reserved};
use crate::*;
use std::sync::LazyLock;

static SQL: LazyLock<Parser<Program>> = LazyLock::new(|| {
    Parser::new(grammar::program, Tokenizer::grammar()).cursor_token_excludes(keeps_cursor_out)
});

/// The cursor right after `.`, `(` or `,` belongs to whatever comes next, and
/// so does a cursor right after a keyword such as `FROM`. Inside a keyword it
/// stays on the keyword.
fn keeps_cursor_out(token: &Token, cursor: usize) -> bool {
    match token.kind {
        TokenKind::Operator | TokenKind::OpenParen | TokenKind::CloseParen => true,
        TokenKind::Word => cursor == token.end && is_grammar_reserved(&token.text),
        _ => false,
    }
}

#[derive(Debug, Clone)]
pub struct ParseResult {
    pub ast: Program,
    /// Token standing for the edit position. Zero width when the cursor sits
    /// between tokens.
    pub cursor_token: Token,
    /// Path to `cursor_token` inside `ast`; empty when the token did not end
    /// up in the tree.
    pub cursor_key_path: KeyPath,
    /// What the grammar would have accepted at the cursor.
    pub next_matchings: Vec<Matching>,
    pub error: Option<ParseError>,
}

impl ParseResult {
    /// Literal matchings at the cursor, lower case, in the order rules tried them.
    pub fn next_literals(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.next_matchings.iter().filter_map(|m| match m {
            Matching::Literal(literal) => Some(*literal),
            Matching::Kind(_) => None,
        })
    }

    pub fn expects(&self, kind: TokenKind) -> bool {
        self.next_matchings.contains(&Matching::Kind(kind))
    }
}

/// Parse `text` with the edit cursor at byte offset `cursor`.
pub fn parse(text: &str, cursor: usize) -> ParseResult {
    let output = SQL.parse(text, cursor);
    let ast = output.ast.unwrap_or_default();
    let cursor_key_path = ast.path_of(&output.cursor_token).unwrap_or_default();
    trace!(path = %cursor_key_path, "cursor located");
    ParseResult {
        ast,
        cursor_token: output.cursor_token,
        cursor_key_path,
        next_matchings: output.next_matchings,
        error: output.error,
    }
}
