//! Lenient SQL tokenization shared by the parser and the formatter.
//!
//! Modules:
//! - `keyword`    : Grammar keywords and the six formatter reserved-word classes.
//! - `token_kind` : Classification of lexical atoms.
//! - `token`      : Token struct pairing a `TokenKind` with its text and source span.
//! - `tokenizer`  : Configurable single pass tokenizer producing a `Vec<Token>`.
//!
//! Design Principles:
//! 1. Accept incomplete / syntactically invalid SQL (robust for live editing).
//! 2. Never fail and never drop input: concatenated token texts equal the input.
//! 3. Preserve original casing; keyword matching is case-insensitive.
//!
//! Two configurations exist. `TokenizerConfig::standard()` classifies reserved
//! words for layout and is what `tokenize` uses. `TokenizerConfig::grammar()`
//! leaves every keyword a plain word so the grammar can match `group` and `by`
//! separately.
//!
//! Example:
//! ```rust,ignore
//! use sqlhint::sql::prelude::*;
//!
//! let tokens = tokenize("SELECT a, b FROM my_table");
//! assert!(tokens.iter().any(|t| t.is_reserved() && t.is("select")));
//! assert!(tokens.iter().any(|t| t.kind == TokenKind::Word && t.text == "my_table"));
//! ```

pub mod keyword;
pub mod token;
pub mod token_kind;
pub mod tokenizer;

pub use keyword::{GRAMMAR_RESERVED, ReservedWords, is_grammar_reserved};
pub use token::Token;
pub use token_kind::{ReservedClass, TokenKind};
pub use tokenizer::{StringType, Tokenizer, TokenizerConfig, tokenize};

/// Convenience prelude re‑exporting the most commonly used items.
pub mod prelude {
    pub use super::{ReservedClass, Token, TokenKind, Tokenizer, tokenize};
}
