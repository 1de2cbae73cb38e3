use crate::sql::{
    keyword::ReservedWords,
    token::Token,
    token_kind::{ReservedClass, TokenKind},
};
use std::{cmp::Reverse, collections::HashMap, sync::LazyLock};

/// Multi-character operators, longest first. Anything else is a one-character operator.
const OPERATORS: &[&str] = &[
    "!~~*", "->>", "<=>", "!~~", "~~*", "!~*", "!=", "<>", "==", "<=", ">=", "!<", "!>", "||",
    "&&", "::", "->", "~~", "~*", "!~", ":=",
];

/// Quoting styles the tokenizer can recognise as `TokenKind::String`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringType {
    /// `` `name` ``, escaped by doubling.
    Backtick,
    /// `[name]`, escaped with `]]`.
    Bracket,
    /// `"text"`, escaped by doubling or with a backslash.
    Double,
    /// `'text'`, escaped by doubling or with a backslash.
    Single,
    /// `N'text'`.
    National,
    /// `${variable}` template variables.
    Template,
}

/// Lexical configuration. The formatter and the grammar share the scanner but
/// not the configuration: see `standard` and `grammar`.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    pub reserved: ReservedWords,
    pub string_types: Vec<StringType>,
    /// Single characters or whole words that open a block.
    pub open_parens: Vec<String>,
    pub close_parens: Vec<String>,
    pub line_comments: Vec<String>,
    pub named_placeholders: Vec<char>,
    pub indexed_placeholders: Vec<char>,
    /// Whether `-1` and `- 1` scan as a single number.
    pub signed_numbers: bool,
}

impl TokenizerConfig {
    /// Six-class reserved words, `CASE`/`END` as block delimiters. Used by the formatter.
    pub fn standard() -> Self {
        Self {
            reserved: ReservedWords::standard(),
            string_types: vec![
                StringType::Double,
                StringType::National,
                StringType::Single,
                StringType::Backtick,
                StringType::Bracket,
                StringType::Template,
            ],
            open_parens: vec!["(".into(), "CASE".into()],
            close_parens: vec![")".into(), "END".into()],
            line_comments: vec!["#".into(), "--".into()],
            named_placeholders: vec!['@', ':'],
            indexed_placeholders: vec!['?'],
            signed_numbers: true,
        }
    }

    /// No reserved classes (keywords are plain words the grammar recognises by
    /// value), unsigned numbers, and no named placeholders so `group:fn()`
    /// keeps its colon.
    pub fn grammar() -> Self {
        Self {
            reserved: ReservedWords::default(),
            open_parens: vec!["(".into()],
            close_parens: vec![")".into()],
            named_placeholders: Vec::new(),
            signed_numbers: false,
            ..Self::standard()
        }
    }
}

#[derive(Debug, Clone)]
struct ReservedEntry {
    class: ReservedClass,
    /// Lower-cased words after the first one.
    rest: Vec<String>,
}

/// Lenient SQL tokenizer producing a flat stream of `Token`s.
///
/// Behavior:
/// - Every character of the input ends up in exactly one token, whitespace and
///   comments included, so concatenating token texts reproduces the input.
/// - Rules are tried in a fixed priority order: whitespace, comment, string,
///   open paren, close paren, placeholder, number, reserved word, word, and
///   finally a one-character operator, which guarantees progress.
/// - A reserved word is never recognised right after a `.` token, so
///   `t.from` scans `from` as a word.
/// - Unterminated strings and block comments run to the end of the input.
///
/// Complexity: O(n) time apart from reserved-word candidates sharing a first word.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    config: TokenizerConfig,
    reserved: HashMap<String, Vec<ReservedEntry>>,
}

static STANDARD: LazyLock<Tokenizer> = LazyLock::new(Tokenizer::standard);

/// Tokenize with the standard configuration.
pub fn tokenize(sql: &str) -> Vec<Token> {
    STANDARD.tokenize(sql)
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig) -> Self {
        let mut reserved: HashMap<String, Vec<ReservedEntry>> = HashMap::new();
        for (class, word) in config.reserved.entries() {
            let mut parts = word.split_whitespace().map(str::to_lowercase);
            let Some(first) = parts.next() else {
                continue;
            };
            reserved.entry(first).or_default().push(ReservedEntry {
                class,
                rest: parts.collect(),
            });
        }
        for entries in reserved.values_mut() {
            entries.sort_by_key(|entry| (entry.class.rank(), Reverse(entry.rest.len())));
        }
        Self { config, reserved }
    }

    pub fn standard() -> Self {
        Self::new(TokenizerConfig::standard())
    }

    pub fn grammar() -> Self {
        Self::new(TokenizerConfig::grammar())
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    pub fn tokenize(&self, sql: &str) -> Vec<Token> {
        let mut out: Vec<Token> = Vec::new();
        let mut pos = 0;
        while pos < sql.len() {
            let after_dot = out.last().is_some_and(|t| t.text == ".");
            let token = self.next_token(&sql[pos..], pos, after_dot);
            pos = token.end;
            out.push(token);
        }
        out
    }

    fn next_token(&self, rest: &str, start: usize, after_dot: bool) -> Token {
        let token = |kind, len: usize| Token::new(kind, &rest[..len], start);

        if let Some(len) = whitespace_len(rest) {
            return token(TokenKind::Whitespace, len);
        }
        if let Some(len) = self.line_comment_len(rest) {
            return token(TokenKind::LineComment, len);
        }
        if let Some(len) = block_comment_len(rest) {
            return token(TokenKind::BlockComment, len);
        }
        if let Some(len) = self.string_len(rest) {
            return token(TokenKind::String, len);
        }
        if let Some(len) = paren_len(rest, &self.config.open_parens) {
            return token(TokenKind::OpenParen, len);
        }
        if let Some(len) = paren_len(rest, &self.config.close_parens) {
            return token(TokenKind::CloseParen, len);
        }
        if let Some((len, key)) = self.placeholder(rest) {
            return token(TokenKind::Placeholder, len).with_key(key);
        }
        if let Some(len) = number_len(rest, self.config.signed_numbers) {
            return token(TokenKind::Number, len);
        }
        if !after_dot {
            if let Some((class, len)) = self.reserved_word(rest) {
                return token(TokenKind::Reserved(class), len);
            }
        }
        match word_len(rest) {
            0 => token(TokenKind::Operator, operator_len(rest)),
            len => token(TokenKind::Word, len),
        }
    }

    fn line_comment_len(&self, rest: &str) -> Option<usize> {
        self.config
            .line_comments
            .iter()
            .any(|prefix| rest.starts_with(prefix.as_str()))
            .then(|| match rest.find(['\r', '\n']) {
                Some(i) if rest[i..].starts_with("\r\n") => i + 2,
                Some(i) => i + 1,
                None => rest.len(),
            })
    }

    fn string_len(&self, rest: &str) -> Option<usize> {
        self.config.string_types.iter().find_map(|ty| match ty {
            StringType::Backtick => segments_len(rest, '`', '`', '`'),
            StringType::Bracket => segments_len(rest, '[', ']', ']'),
            StringType::Double => quoted_len(rest, '"'),
            StringType::Single => quoted_len(rest, '\''),
            StringType::National => rest
                .strip_prefix('N')
                .and_then(|tail| quoted_len(tail, '\''))
                .map(|len| len + 1),
            StringType::Template => rest.starts_with("${").then(|| {
                rest.find('}').map(|i| i + 1).unwrap_or(rest.len())
            }),
        })
    }

    fn placeholder(&self, rest: &str) -> Option<(usize, String)> {
        let prefix = rest.chars().next()?;
        let body = &rest[prefix.len_utf8()..];
        if self.config.named_placeholders.contains(&prefix) {
            let ident = body
                .char_indices()
                .find(|(_, c)| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '$')))
                .map(|(i, _)| i)
                .unwrap_or(body.len());
            if ident > 0 {
                return Some((1 + ident, body[..ident].to_string()));
            }
            if let Some(quoted) = self.string_len(body) {
                let raw = &body[..quoted];
                let quote = raw.chars().next().unwrap_or('"');
                let inner = raw
                    .strip_prefix(quote)
                    .map(|inner| inner.strip_suffix(quote).unwrap_or(inner))
                    .unwrap_or(raw);
                let key = inner.replace(&format!("\\{quote}"), &quote.to_string());
                return Some((1 + quoted, key));
            }
        }
        if self.config.indexed_placeholders.contains(&prefix) {
            let digits = body
                .char_indices()
                .find(|(_, c)| !c.is_ascii_digit())
                .map(|(i, _)| i)
                .unwrap_or(body.len());
            return Some((1 + digits, body[..digits].to_string()));
        }
        None
    }

    fn reserved_word(&self, rest: &str) -> Option<(ReservedClass, usize)> {
        let first = word_len(rest);
        if first == 0 {
            return None;
        }
        let entries = self.reserved.get(&rest[..first].to_lowercase())?;
        entries.iter().find_map(|entry| {
            let mut end = first;
            for part in &entry.rest {
                let gap = whitespace_len(&rest[end..])?;
                let word = word_len(&rest[end + gap..]);
                if !rest[end + gap..end + gap + word].eq_ignore_ascii_case(part) {
                    return None;
                }
                end += gap + word;
            }
            Some((entry.class, end))
        })
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\u{200C}' || c == '\u{200D}'
}

fn word_len(s: &str) -> usize {
    s.char_indices()
        .find(|(_, c)| !is_word_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

fn whitespace_len(s: &str) -> Option<usize> {
    let len = s
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    (len > 0).then_some(len)
}

fn block_comment_len(rest: &str) -> Option<usize> {
    rest.starts_with("/*")
        .then(|| rest[2..].find("*/").map(|i| i + 4).unwrap_or(rest.len()))
}

/// `open ... close` followed by any number of `cont ... close` segments; an
/// unterminated segment runs to the end of the input.
fn segments_len(rest: &str, open: char, cont: char, close: char) -> Option<usize> {
    if !rest.starts_with(open) {
        return None;
    }
    let mut end = open.len_utf8();
    loop {
        match rest[end..].find(close) {
            Some(i) => end += i + close.len_utf8(),
            None => return Some(rest.len()),
        }
        if !rest[end..].starts_with(cont) {
            return Some(end);
        }
        end += cont.len_utf8();
    }
}

/// Quote-delimited text where a backslash escapes the next character and a
/// doubled quote continues the literal.
fn quoted_len(rest: &str, quote: char) -> Option<usize> {
    if !rest.starts_with(quote) {
        return None;
    }
    let mut end = 0;
    loop {
        end += quote.len_utf8();
        let mut chars = rest[end..].char_indices();
        let mut closed = None;
        while let Some((i, c)) = chars.next() {
            if c == '\\' {
                if chars.next().is_none() {
                    break;
                }
            } else if c == quote {
                closed = Some(end + i + quote.len_utf8());
                break;
            }
        }
        match closed {
            Some(after) if rest[after..].starts_with(quote) => end = after,
            Some(after) => return Some(after),
            None => return Some(rest.len()),
        }
    }
}

fn digits_len(s: &str, radix: u32) -> usize {
    s.char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Decimal with optional fraction (and sign when `signed`), hex `0x..` or binary `0b..`,
/// always followed by a word boundary.
fn number_len(rest: &str, signed: bool) -> Option<usize> {
    let boundary = |len: usize| !rest[len..].chars().next().is_some_and(is_word_char);

    let mut start = 0;
    if signed && rest.starts_with('-') {
        start = 1 + whitespace_len(&rest[1..]).unwrap_or(0);
    }
    let int = digits_len(&rest[start..], 10);
    if int > 0 {
        let int_end = start + int;
        if let Some(fraction) = rest[int_end..].strip_prefix('.') {
            let frac = digits_len(fraction, 10);
            if frac > 0 && boundary(int_end + 1 + frac) {
                return Some(int_end + 1 + frac);
            }
        }
        if boundary(int_end) {
            return Some(int_end);
        }
    }
    for (prefix, radix) in [("0x", 16), ("0b", 2)] {
        if let Some(body) = rest.strip_prefix(prefix) {
            let len = digits_len(body, radix);
            if len > 0 && boundary(prefix.len() + len) {
                return Some(prefix.len() + len);
            }
        }
    }
    None
}

fn paren_len(rest: &str, parens: &[String]) -> Option<usize> {
    parens.iter().find_map(|paren| {
        if paren.chars().count() == 1 {
            return rest.starts_with(paren.as_str()).then_some(paren.len());
        }
        let len = word_len(rest);
        rest[..len].eq_ignore_ascii_case(paren).then_some(len)
    })
}

fn operator_len(rest: &str) -> usize {
    OPERATORS
        .iter()
        .find(|op| rest.starts_with(**op))
        .map(|op| op.len())
        .or_else(|| rest.chars().next().map(char::len_utf8))
        .unwrap_or(rest.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds(sql: &str) -> Vec<(TokenKind, String)> {
        tokenize(sql)
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[rstest]
    // Case 1: plain statement
    #[case("SELECT a, b FROM t")]
    // Case 2: unterminated string
    #[case("SELECT 'abc")]
    // Case 3: unterminated block comment
    #[case("SELECT 1 /* never closed")]
    // Case 4: non-ascii identifiers and symbols
    #[case("SELECT größe, 名前 FROM tbl WHERE x ≠ 1")]
    // Case 5: garbage
    #[case(")(*&^%$#@!~`")]
    // Case 6: escapes and doubled quotes
    #[case(r#"SELECT 'it''s', "a\"b", `x``y`, [a]]b] FROM t"#)]
    // Case 7: empty input
    #[case("")]
    fn every_character_is_consumed_once(#[case] sql: &str) {
        let tokens = tokenize(sql);
        let total: usize = tokens.iter().map(Token::len).sum();
        assert_eq!(total, sql.len());
        assert_eq!(tokens.iter().map(|t| t.text.as_str()).collect::<String>(), sql);
        assert!(tokens.iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn reserved_classes() {
        let toks = kinds("SELECT a FROM t LEFT   OUTER JOIN u ON a = b UNION ALL select 1");
        assert_eq!(toks[0], (TokenKind::Reserved(ReservedClass::TopLevel), "SELECT".into()));
        assert!(toks.contains(&(
            TokenKind::Reserved(ReservedClass::Newline),
            "LEFT   OUTER JOIN".into()
        )));
        assert!(toks.contains(&(TokenKind::Reserved(ReservedClass::Plain), "ON".into())));
        assert!(toks.contains(&(
            TokenKind::Reserved(ReservedClass::TopLevelNoIndent),
            "UNION ALL".into()
        )));
        assert!(toks.contains(&(TokenKind::Reserved(ReservedClass::TopLevel), "select".into())));
    }

    #[test]
    fn multi_word_keywords_span_newlines() {
        let toks = kinds("SELECT a FROM t GROUP\n  BY a");
        assert!(toks.contains(&(
            TokenKind::Reserved(ReservedClass::TopLevel),
            "GROUP\n  BY".into()
        )));
    }

    #[test]
    fn reserved_word_after_dot_is_a_word() {
        let toks = kinds("SELECT t.from FROM t");
        assert_eq!(toks[3], (TokenKind::Word, "from".into()));
        assert_eq!(toks[4], (TokenKind::Reserved(ReservedClass::TopLevel), "FROM".into()));
    }

    #[test]
    fn keyword_prefix_is_a_word() {
        let toks = kinds("selection from_date");
        assert_eq!(toks[0], (TokenKind::Word, "selection".into()));
        assert_eq!(toks[1], (TokenKind::Word, "from_date".into()));
    }

    #[rstest]
    // Case 1: decimal with fraction
    #[case("3.14", "3.14")]
    // Case 2: signed with whitespace
    #[case("- 42", "- 42")]
    // Case 3: hex
    #[case("0x1F", "0x1F")]
    // Case 4: binary
    #[case("0b101", "0b101")]
    fn numbers(#[case] sql: &str, #[case] text: &str) {
        let toks = kinds(sql);
        assert_eq!(toks, vec![(TokenKind::Number, text.to_string())]);
    }

    #[test]
    fn digits_followed_by_letters_are_a_word() {
        assert_eq!(kinds("1abc"), vec![(TokenKind::Word, "1abc".into())]);
    }

    #[test]
    fn grammar_numbers_are_unsigned() {
        let toks: Vec<_> = Tokenizer::grammar()
            .tokenize("-1")
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(toks, vec![TokenKind::Operator, TokenKind::Number]);
    }

    #[test]
    fn grammar_words_are_never_reserved() {
        let toks = Tokenizer::grammar().tokenize("SELECT CASE END");
        assert!(toks.iter().all(|t| matches!(
            t.kind,
            TokenKind::Word | TokenKind::Whitespace
        )));
    }

    #[test]
    fn comments() {
        let toks = tokenize("a -- note\nb # hash\r\nc /* block\n */ d");
        let comments: Vec<_> = toks
            .iter()
            .filter(|t| t.kind.is_comment())
            .map(|t| (t.kind, t.text.as_str()))
            .collect();
        assert_eq!(
            comments,
            vec![
                (TokenKind::LineComment, "-- note\n"),
                (TokenKind::LineComment, "# hash\r\n"),
                (TokenKind::BlockComment, "/* block\n */"),
            ]
        );
    }

    #[test]
    fn case_and_end_are_block_delimiters() {
        let toks = kinds("CASE WHEN a THEN b END");
        assert_eq!(toks[0].0, TokenKind::OpenParen);
        assert_eq!(toks.last().map(|t| t.0), Some(TokenKind::CloseParen));
        assert!(toks.contains(&(TokenKind::Reserved(ReservedClass::Newline), "WHEN".into())));
    }

    #[test]
    fn placeholders_carry_keys() {
        let toks: Vec<_> = tokenize("? ?2 :name @\"a b\" $1")
            .into_iter()
            .filter(|t| t.kind == TokenKind::Placeholder)
            .map(|t| (t.text, t.key.unwrap_or_default()))
            .collect();
        assert_eq!(
            toks,
            vec![
                ("?".to_string(), "".to_string()),
                ("?2".to_string(), "2".to_string()),
                (":name".to_string(), "name".to_string()),
                ("@\"a b\"".to_string(), "a b".to_string()),
            ]
        );
    }

    #[test]
    fn operators_prefer_longest_match() {
        let toks = kinds("a <=> b != c :: d ->> e");
        let ops: Vec<_> = toks
            .into_iter()
            .filter(|t| t.0 == TokenKind::Operator)
            .map(|t| t.1)
            .collect();
        assert_eq!(ops, vec!["<=>", "!=", "::", "->>"]);
    }

    #[test]
    fn strings() {
        let toks = kinds("N'x' 'a''b' \"q\" `t` [c] ${var}");
        assert!(toks.iter().all(|t| t.0 == TokenKind::String));
        assert_eq!(toks.len(), 6);
    }
}
