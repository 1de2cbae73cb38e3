use crate::format::{FormatOptions, Indentation, InlineBlock, ParamCursor};
use crate::sql::{ReservedClass, Token, TokenKind, tokenize};
use crate::*;
use itertools::Itertools as _;

fn trim_spaces_end(query: &mut String) {
    let len = query.trim_end_matches([' ', '\t']).len();
    query.truncate(len);
}

fn equalize_whitespace(text: &str) -> String {
    text.split_whitespace().join(" ")
}

/// Layout state folded over the token stream of one `format` call.
pub struct Formatter<'a> {
    options: &'a FormatOptions,
    tokens: &'a [Token],
    indentation: Indentation,
    inline_block: InlineBlock,
    params: ParamCursor<'a>,
    previous_reserved: Option<&'a Token>,
    first_token: Option<&'a Token>,
    /// Open parens, not counting `CASE`.
    in_brackets: usize,
}

impl<'a> Formatter<'a> {
    pub fn new(options: &'a FormatOptions, tokens: &'a [Token]) -> Self {
        Self {
            options,
            tokens,
            indentation: Indentation::new(options.indent),
            inline_block: InlineBlock::default(),
            params: ParamCursor::new(options.params.as_ref()),
            previous_reserved: None,
            first_token: None,
            in_brackets: 0,
        }
    }

    pub fn format(mut self) -> String {
        let tokens = self.tokens;
        let query = tokens
            .iter()
            .enumerate()
            .fold(String::new(), |query, (index, token)| self.step(index, token, query));
        query.trim().to_string()
    }

    fn step(&mut self, index: usize, token: &'a Token, query: String) -> String {
        match token.kind {
            TokenKind::Whitespace | TokenKind::Cursor => query,
            TokenKind::LineComment => self.add_newline(token.kind, query + &token.text),
            TokenKind::BlockComment => self.format_block_comment(token, query),
            TokenKind::Reserved(class) => {
                let query = match class {
                    ReservedClass::TopLevel => {
                        self.first_token = self.first_token.or(Some(token));
                        self.format_top_level(token, query)
                    }
                    ReservedClass::TopLevelNewline => self.format_top_level_newline(token, query),
                    ReservedClass::TopLevelNewlineNoIndent => {
                        self.format_top_level_newline_no_indent(token, query)
                    }
                    ReservedClass::TopLevelNoIndent => {
                        self.first_token = self.first_token.or(Some(token));
                        self.format_top_level_no_indent(token, query)
                    }
                    ReservedClass::Newline => {
                        let mut query = self.add_newline(token.kind, query);
                        query.push_str(&self.reserved_word(&token.text));
                        query.push(' ');
                        query
                    }
                    ReservedClass::Plain => self.format_with_spaces(token, query),
                };
                self.previous_reserved = Some(token);
                query
            }
            TokenKind::OpenParen => self.format_opening_paren(index, token, query),
            TokenKind::CloseParen => self.format_closing_paren(token, query),
            TokenKind::Placeholder => {
                let value = self.params.get(token);
                format!("{query}{value} ")
            }
            _ => match token.text.as_str() {
                "," => self.format_comma(index, token, query),
                ":" => with_space_after(&token.text, query),
                "." => {
                    let mut query = query;
                    trim_spaces_end(&mut query);
                    query + "."
                }
                ";" => self.format_query_separator(query),
                _ => self.format_with_spaces(token, query),
            },
        }
    }

    fn reserved_word(&self, text: &str) -> String {
        let text = equalize_whitespace(text);
        if self.options.uppercase {
            text.to_uppercase()
        } else {
            text
        }
    }

    fn cased(&self, text: &str) -> String {
        if self.options.uppercase {
            text.to_uppercase()
        } else {
            text.to_string()
        }
    }

    fn add_newline(&self, kind: TokenKind, mut query: String) -> String {
        trim_spaces_end(&mut query);
        if !query.ends_with('\n') {
            query.push('\n');
        }
        query + &self.indentation.get(kind)
    }

    fn format_block_comment(&self, token: &Token, query: String) -> String {
        let indent = self.indentation.get(TokenKind::BlockComment);
        let comment = token
            .text
            .split('\n')
            .enumerate()
            .map(|(i, line)| match i {
                0 => line,
                _ => line.trim_start_matches([' ', '\t']),
            })
            .join(&format!("\n{indent} "));
        let query = self.add_newline(token.kind, query) + &comment;
        self.add_newline(token.kind, query)
    }

    /// Pads short clause keywords to two indents so their arguments line up.
    fn format_top_level(&mut self, token: &Token, query: String) -> String {
        self.indentation.decrease_top_level();
        self.indentation.decrease_top_level();
        self.indentation.decrease_space_level();
        let mut query = self.add_newline(token.kind, query);
        self.indentation.increase_top_level();
        self.indentation.increase_top_level();

        let value = self.reserved_word(&token.text);
        let column = self.indentation.width() * 2;
        if value.len() >= column {
            query.push_str(&value);
            query.push(' ');
            let total = self.indentation.get(TokenKind::Word).len();
            if value.len() >= total {
                self.indentation.increase_space_level(value.len() + 1 - total);
            }
        } else {
            query.push_str(&format!("{value:<column$}"));
        }
        query
    }

    fn format_top_level_no_indent(&mut self, token: &Token, query: String) -> String {
        self.indentation.decrease_top_level();
        self.indentation.decrease_top_level();
        self.indentation.decrease_space_level();
        let mut query = self.add_newline(token.kind, query);

        let value = self.reserved_word(&token.text);
        let column = self.indentation.width() * 2;
        let first = self.first_token.is_some_and(|first| first.text == token.text);
        if value.len() >= column || first {
            query.push_str(&value);
            query.push(' ');
        } else {
            query.push_str(&format!("{value:<column$}"));
        }
        query
    }

    fn format_top_level_newline(&mut self, token: &Token, query: String) -> String {
        self.indentation.decrease_top_level();
        let query = self.add_newline(token.kind, query);
        self.indentation.increase_top_level();
        let query = query + &self.reserved_word(&token.text);
        self.add_newline(token.kind, query)
    }

    fn format_top_level_newline_no_indent(&mut self, token: &Token, query: String) -> String {
        self.indentation.decrease_top_level();
        self.indentation.decrease_top_level();
        self.indentation.decrease_space_level();
        let query = self.add_newline(token.kind, query) + &self.reserved_word(&token.text);
        self.add_newline(token.kind, query)
    }

    /// `(` either starts an inline block or breaks and indents. `CASE` only
    /// breaks outside parens.
    fn format_opening_paren(&mut self, index: usize, token: &Token, mut query: String) -> String {
        let previous = index.checked_sub(1).map(|i| self.tokens[i].kind);
        if !matches!(
            previous,
            Some(TokenKind::Whitespace | TokenKind::OpenParen | TokenKind::LineComment)
        ) {
            trim_spaces_end(&mut query);
        }
        query.push_str(&self.cased(&token.text));

        if token.is("case") {
            query.push(' ');
            if self.in_brackets == 0 {
                self.indentation.increase_block_level();
                return self.add_newline(token.kind, query);
            }
            return query;
        }

        self.inline_block.begin_if_possible(self.tokens, index);
        if !self.inline_block.is_active() {
            self.indentation.increase_block_level();
            query = self.add_newline(token.kind, query);
        }
        self.in_brackets += 1;
        query
    }

    fn format_closing_paren(&mut self, token: &Token, query: String) -> String {
        let value = self.cased(&token.text);
        if token.is("end") {
            if self.in_brackets == 0 {
                self.indentation.decrease_block_level();
                let query = self.add_newline(token.kind, query);
                return format!("{query}{value} ");
            }
            return with_space_after(&format!(" {value}"), query);
        }
        self.in_brackets = self.in_brackets.saturating_sub(1);
        if self.inline_block.is_active() {
            self.inline_block.end();
            return with_space_after(&value, query);
        }
        self.indentation.decrease_block_level();
        let query = self.add_newline(token.kind, query);
        format!("{query}{value} ")
    }

    /// Commas break the line, except inside inline blocks, after `LIMIT` and
    /// before a trailing line comment. A comma that arrives after a newline
    /// was already emitted is moved back to the end of the previous line.
    fn format_comma(&mut self, index: usize, token: &Token, mut query: String) -> String {
        let trimmed = query.trim_end_matches([' ', '\t']).len();
        if query[..trimmed].ends_with('\n') {
            let comment = self.tokens[..index]
                .iter()
                .rev()
                .find(|t| t.kind != TokenKind::Whitespace)
                .filter(|t| t.kind == TokenKind::LineComment);
            let (at, insert) = match comment
                .and_then(|comment| query[..trimmed].rfind(comment.text.trim_end()))
            {
                Some(at) => (at, format!("{} ", token.text)),
                None => (trimmed - 1, token.text.clone()),
            };
            let head = query[..at].trim_end_matches([' ', '\t']).len();
            query.replace_range(head..at, &insert);
            return query;
        }

        let query = with_space_after(&token.text, query);
        if self.inline_block.is_active() {
            return query;
        }
        if self.previous_reserved.is_some_and(|word| word.is("limit")) {
            return query;
        }
        let next = self.tokens[index + 1..]
            .iter()
            .find(|t| t.kind != TokenKind::Whitespace);
        if next.is_some_and(|t| t.kind == TokenKind::LineComment) {
            return query;
        }
        self.add_newline(token.kind, query)
    }

    fn format_with_spaces(&self, token: &Token, query: String) -> String {
        let value = match token.kind {
            TokenKind::Reserved(_) => self.reserved_word(&token.text),
            _ => token.text.clone(),
        };
        format!("{query}{value} ")
    }

    /// `;` ends the statement and resets all layout state.
    fn format_query_separator(&mut self, mut query: String) -> String {
        trace!("statement separator, resetting indentation");
        self.first_token = None;
        self.indentation.reset();
        self.inline_block.reset();
        self.in_brackets = 0;
        trim_spaces_end(&mut query);
        query.push(';');
        query + &"\n".repeat(self.options.lines_between_queries.max(1))
    }
}

fn with_space_after(value: &str, mut query: String) -> String {
    trim_spaces_end(&mut query);
    format!("{query}{value} ")
}

/// Pretty-print `text`. Never fails; unbalanced input only degrades layout.
pub fn format(text: &str, options: &FormatOptions) -> String {
    let tokens = tokenize(text);
    let formatted = Formatter::new(options, &tokens).format();
    debug!(
        tokens = tokens.len(),
        bytes = formatted.len(),
        "formatted sql"
    );
    formatted
}
