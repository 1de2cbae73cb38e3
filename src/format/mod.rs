//! SQL pretty-printer.
//!
//! Modules:
//! - `indentation`  : Top-level, block and space indentation levels.
//! - `inline_block` : Look-ahead deciding which parenthesized spans stay on one line.
//! - `params`       : Placeholder substitution.
//! - `formatter`    : The layout state machine and `format`.
//!
//! The formatter runs on the standard tokenizer configuration, whose six
//! reserved-word classes drive every line break. It never fails: unbalanced
//! parens or `CASE`/`END` pairs only flatten the indentation.

pub mod formatter;
pub mod indentation;
pub mod inline_block;
pub mod params;

pub use formatter::{Formatter, format};
pub use indentation::Indentation;
pub use inline_block::{INLINE_MAX_LENGTH, InlineBlock};
pub use params::{ParamCursor, Params};

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Spaces per indentation level.
    pub indent: usize,
    /// Upper-case reserved words.
    pub uppercase: bool,
    /// Newlines written after each `;`, at least one.
    pub lines_between_queries: usize,
    pub params: Option<Params>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            uppercase: false,
            lines_between_queries: 2,
            params: None,
        }
    }
}

impl From<&Config> for FormatOptions {
    fn from(config: &Config) -> Self {
        Self {
            indent: config.indent,
            uppercase: config.uppercase,
            lines_between_queries: config.lines_between_queries,
            params: None,
        }
    }
}

mod formatter_tests;
