//! Backtracking combinator engine.
//!
//! Grammar rules are plain functions `fn(&mut Scanner) -> Option<T>`. A rule
//! either consumes tokens and returns its node, or returns `None`; combinators
//! restore the position when a rule fails, so every rule composes as a PEG
//! expression:
//!
//! - `match_token_type` / `literal` : consume one token by kind or by text
//! - `chain`                        : run a sequence, all or nothing
//! - `first_of`                     : prioritized choice, first success wins
//! - `optional`, `many`, `plus`     : repetition
//!
//! The reducer that the source grammar attached to each chain is simply the
//! body of the rule function: it receives typed results and builds its node.
//!
//! Cursor tracking happens in two places. `Parser::parse` decides which token
//! stands for the edit cursor (inserting a zero-width `Cursor` token when the
//! cursor sits between tokens). A second, watching pass over the tokens that
//! precede the cursor records every literal and token kind any rule attempted
//! at that position; these are the `next_matchings`.

use crate::sql::{Token, TokenKind, Tokenizer};
use crate::*;

/// Something a rule tried to match at a watched position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Matching {
    /// A keyword or punctuation literal, lower case.
    #[display("{_0}")]
    Literal(&'static str),
    /// Any token of this kind.
    #[display("<{_0}>")]
    Kind(TokenKind),
}

/// Position over a token slice plus the bookkeeping rules report into.
#[derive(Debug)]
pub struct Scanner<'t> {
    tokens: &'t [Token],
    pos: usize,
    watch: Option<usize>,
    cursor: Option<usize>,
    matchings: Vec<Matching>,
    furthest: usize,
}

/// A grammar rule producing `T`.
pub type Rule<T> = for<'s, 't> fn(&'s mut Scanner<'t>) -> Option<T>;

impl<'t> Scanner<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            watch: None,
            cursor: None,
            matchings: Vec::new(),
            furthest: 0,
        }
    }

    /// A scanner that records every attempt made at token index `at`.
    pub fn watching(tokens: &'t [Token], at: usize) -> Self {
        Self {
            watch: Some(at),
            ..Self::new(tokens)
        }
    }

    /// Marks the token at index `at` as the one holding the edit cursor.
    pub fn with_cursor(mut self, at: usize) -> Self {
        self.cursor = Some(at);
        self
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    /// Furthest token index any rule tried to match.
    pub fn furthest(&self) -> usize {
        self.furthest
    }

    pub fn into_matchings(self) -> Vec<Matching> {
        self.matchings
    }

    fn attempt(&mut self, matching: Matching) {
        self.furthest = self.furthest.max(self.pos);
        if self.watch == Some(self.pos) && !self.matchings.contains(&matching) {
            self.matchings.push(matching);
        }
    }

    fn take(&mut self, token: &'t Token) -> Token {
        self.pos += 1;
        token.clone()
    }

    /// Consume one token of `kind` whose text is not one of `excludes`.
    pub fn match_token_type(&mut self, kind: TokenKind, excludes: &[&str]) -> Option<Token> {
        self.attempt(Matching::Kind(kind));
        let token = self.peek()?;
        if token.kind != kind || excludes.iter().any(|word| token.is(word)) {
            return None;
        }
        Some(self.take(token))
    }

    /// Consume one token whose text equals `literal`, ignoring case.
    pub fn literal(&mut self, literal: &'static str) -> Option<Token> {
        self.attempt(Matching::Literal(literal));
        let token = self.peek()?;
        if token.is_cursor() || !token.is(literal) {
            return None;
        }
        Some(self.take(token))
    }

    /// Consume the zero-width cursor token. Never reported as a matching.
    pub fn cursor(&mut self) -> Option<Token> {
        let token = self.peek()?;
        token.is_cursor().then(|| self.take(token))
    }

    /// True when the input stops right after the token holding the cursor.
    pub fn stopped_at_cursor(&self) -> bool {
        self.is_end() && self.cursor.is_some_and(|at| at + 1 == self.pos)
    }

    /// Consume the closing `literal`. Its absence is accepted when the input
    /// stops right after the cursor, so an unfinished `IN (|` or `count(|`
    /// keeps the node holding the cursor.
    pub fn closing(&mut self, literal: &'static str) -> Option<()> {
        if self.literal(literal).is_some() || self.stopped_at_cursor() {
            Some(())
        } else {
            None
        }
    }

    /// Run `rule` as one unit: on failure nothing is consumed.
    pub fn chain<T>(&mut self, rule: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let start = self.pos;
        let out = rule(self);
        if out.is_none() {
            self.pos = start;
        }
        out
    }

    /// Prioritized choice: the first alternative that succeeds wins, so more
    /// specific forms must be listed first.
    pub fn first_of<T>(&mut self, alternatives: &[Rule<T>]) -> Option<T> {
        alternatives.iter().find_map(|rule| self.chain(*rule))
    }

    /// First literal of `literals` that matches.
    pub fn one_of(&mut self, literals: &[&'static str]) -> Option<Token> {
        literals.iter().find_map(|literal| self.literal(*literal))
    }

    /// Zero or one; never fails the caller.
    pub fn optional<T>(&mut self, rule: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        self.chain(rule)
    }

    /// Zero or more. Stops at the first failure or at a success that consumed nothing.
    pub fn many<T>(&mut self, mut rule: impl FnMut(&mut Self) -> Option<T>) -> Vec<T> {
        let mut out = Vec::new();
        loop {
            let start = self.pos;
            match self.chain(&mut rule) {
                Some(value) if self.pos > start => out.push(value),
                _ => break,
            }
        }
        out
    }

    /// One or more.
    pub fn plus<T>(&mut self, mut rule: impl FnMut(&mut Self) -> Option<T>) -> Option<Vec<T>> {
        let first = self.chain(&mut rule)?;
        let mut out = vec![first];
        out.extend(self.many(rule));
        Some(out)
    }
}

/// Where the root rule stopped short of consuming everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// First token no rule could consume; `None` means the input ended early.
    pub token: Option<Token>,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.token {
            Some(token) if token.is_cursor() => write!(f, "unexpected end of input at {}", token.start),
            Some(token) => write!(f, "unexpected `{}` at {}", token.text, token.start),
            None => write!(f, "unexpected end of input"),
        }
    }
}

/// Raw result of running a root rule over tokenized text.
#[derive(Debug, Clone)]
pub struct ParseOutput<T> {
    pub ast: Option<T>,
    /// The token standing for the edit position.
    pub cursor_token: Token,
    pub next_matchings: Vec<Matching>,
    pub error: Option<ParseError>,
}

/// A root rule bound to a tokenizer.
pub struct Parser<T> {
    root: Rule<T>,
    tokenizer: Tokenizer,
    cursor_token_excludes: fn(&Token, usize) -> bool,
}

impl<T> Parser<T> {
    pub fn new(root: Rule<T>, tokenizer: Tokenizer) -> Self {
        Self {
            root,
            tokenizer,
            cursor_token_excludes: |_, _| false,
        }
    }

    /// Tokens that never take the cursor at the given offset. The cursor is
    /// then a zero-width token of its own, inserted after them.
    pub fn cursor_token_excludes(mut self, excludes: fn(&Token, usize) -> bool) -> Self {
        self.cursor_token_excludes = excludes;
        self
    }

    pub fn parse(&self, text: &str, cursor: usize) -> ParseOutput<T> {
        let cursor = cursor.min(text.len());
        let mut tokens: Vec<Token> = self
            .tokenizer
            .tokenize(text)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .collect();

        let attributed = tokens
            .iter()
            .position(|t| t.touches(cursor) && !(self.cursor_token_excludes)(t, cursor));
        let cursor_index = match attributed {
            Some(index) => index,
            None => {
                let index = tokens
                    .iter()
                    .position(|t| t.start >= cursor)
                    .unwrap_or(tokens.len());
                tokens.insert(index, Token::cursor(cursor));
                index
            }
        };
        let cursor_token = tokens[cursor_index].clone();

        let mut scanner = Scanner::new(&tokens).with_cursor(cursor_index);
        let ast = (self.root)(&mut scanner);
        let error = match ast {
            Some(_) if scanner.is_end() => None,
            _ => Some(ParseError {
                token: tokens.get(scanner.pos().max(scanner.furthest())).cloned(),
            }),
        };

        let mut watcher = Scanner::watching(&tokens[..cursor_index], cursor_index);
        let _ = (self.root)(&mut watcher);
        let next_matchings = watcher.into_matchings();

        trace!(
            tokens = tokens.len(),
            cursor_index,
            matchings = next_matchings.len(),
            "parsed"
        );
        if let Some(error) = &error {
            debug!("partial parse: {error}");
        }

        ParseOutput {
            ast,
            cursor_token,
            next_matchings,
            error,
        }
    }
}
