//! Keyword tables shared by the grammar and the formatter.
//!
//! The grammar only needs to know which words can never be identifiers
//! (`GRAMMAR_RESERVED`). The formatter needs the same words split into six
//! layout classes, where multi-word entries such as `GROUP BY` match across any
//! run of whitespace. `ReservedWords::standard()` builds that split; its plain
//! class always contains every grammar keyword so the two views never disagree
//! about what is reserved.
//!
//! All entries are upper case; matching is case-insensitive.

use crate::sql::token_kind::ReservedClass;

/// Words the grammar refuses as identifiers.
pub const GRAMMAR_RESERVED: &[&str] = &[
    "ALL",
    "AND",
    "AS",
    "ASC",
    "BETWEEN",
    "BY",
    "CASE",
    "CREATE",
    "CROSS",
    "DATABASES",
    "DESC",
    "DISTINCT",
    "DIV",
    "ELSE",
    "END",
    "ESCAPE",
    "FALSE",
    "FILTER",
    "FROM",
    "FULL",
    "FUNCTION",
    "GROUP",
    "HAVING",
    "IN",
    "INDEX",
    "INNER",
    "INSERT",
    "INTO",
    "IS",
    "ISNULL",
    "JOIN",
    "LEFT",
    "LIKE",
    "LIMIT",
    "MOD",
    "NATURAL",
    "NOT",
    "NULL",
    "OFFSET",
    "ON",
    "OR",
    "ORDER",
    "OUTER",
    "OVER",
    "PARTITION",
    "REGEXP",
    "RIGHT",
    "SELECT",
    "SET",
    "SHOW",
    "SOUNDS",
    "STRAIGHT_JOIN",
    "TABLE",
    "THEN",
    "TRUE",
    "UNION",
    "UNKNOWN",
    "UPDATE",
    "VALUES",
    "VIEW",
    "WHEN",
    "WHERE",
    "WITH",
    "XOR",
];

pub const TOP_LEVEL: &[&str] = &[
    "ADD",
    "AFTER",
    "ALTER COLUMN",
    "ALTER TABLE",
    "DELETE FROM",
    "FETCH FIRST",
    "FROM",
    "GROUP BY",
    "HAVING",
    "INSERT INTO",
    "INSERT OVERWRITE TABLE",
    "INSERT",
    "LIMIT",
    "MODIFY",
    "ORDER BY",
    "SELECT",
    "SET CURRENT SCHEMA",
    "SET SCHEMA",
    "SET",
    "UPDATE",
    "VALUES",
    "WHERE",
];

pub const TOP_LEVEL_NEWLINE: &[&str] = &["WITH"];

pub const TOP_LEVEL_NO_INDENT: &[&str] = &[
    "EXCEPT",
    "INTERSECT ALL",
    "INTERSECT",
    "MINUS",
    "UNION ALL",
    "UNION",
];

pub const TOP_LEVEL_NEWLINE_NO_INDENT: &[&str] = &["GO"];

pub const NEWLINE: &[&str] = &[
    "AND",
    "CROSS APPLY",
    "CROSS JOIN",
    "ELSE",
    "FULL JOIN",
    "FULL OUTER JOIN",
    "INNER JOIN",
    "JOIN",
    "LEFT JOIN",
    "LEFT OUTER JOIN",
    "NATURAL JOIN",
    "OR",
    "OUTER APPLY",
    "OUTER JOIN",
    "RIGHT JOIN",
    "RIGHT OUTER JOIN",
    "STRAIGHT_JOIN",
    "WHEN",
    "XOR",
];

/// Common SQL keywords that do not affect layout. `ReservedWords::standard`
/// adds `GRAMMAR_RESERVED` on top of these.
pub const PLAIN: &[&str] = &[
    "ACCESSIBLE",
    "ACTION",
    "AGAINST",
    "AGGREGATE",
    "ALGORITHM",
    "ALTER",
    "ANALYSE",
    "ANALYZE",
    "ANY",
    "ARRAY",
    "AUTO_INCREMENT",
    "AVG_ROW_LENGTH",
    "BEGIN",
    "BIGINT",
    "BINARY",
    "BOOLEAN",
    "BOTH",
    "CASCADE",
    "CAST",
    "CHANGE",
    "CHAR",
    "CHARACTER",
    "CHARSET",
    "CHECK",
    "COLLATE",
    "COLUMN",
    "COLUMNS",
    "COMMENT",
    "COMMIT",
    "CONSTRAINT",
    "CONVERT",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "CURRENT_USER",
    "DATABASE",
    "DECIMAL",
    "DECLARE",
    "DEFAULT",
    "DELETE",
    "DESCRIBE",
    "DISTINCTROW",
    "DOUBLE",
    "DROP",
    "DUPLICATE",
    "ELSEIF",
    "ENGINE",
    "EXISTS",
    "EXPLAIN",
    "EXTRACT",
    "FLOAT",
    "FOR",
    "FOREIGN",
    "GRANT",
    "HIGH_PRIORITY",
    "IF",
    "IGNORE",
    "INT",
    "INTEGER",
    "INTERVAL",
    "KEY",
    "KEYS",
    "KILL",
    "LATERAL",
    "LEADING",
    "LOCK",
    "MATERIALIZED",
    "MERGE",
    "NO",
    "NOW",
    "NUMERIC",
    "OVERWRITE",
    "PRIMARY",
    "PROCEDURE",
    "RANGE",
    "REFERENCES",
    "RENAME",
    "REPLACE",
    "RESTRICT",
    "RETURNING",
    "RETURNS",
    "REVOKE",
    "ROLLBACK",
    "ROW",
    "ROWS",
    "SCHEMA",
    "SMALLINT",
    "SQL_CALC_FOUND_ROWS",
    "SQL_NO_CACHE",
    "START",
    "TABLES",
    "TEMPORARY",
    "TEXT",
    "TINYINT",
    "TO",
    "TRAILING",
    "TRANSACTION",
    "TRIGGER",
    "TRUNCATE",
    "UNIQUE",
    "UNSIGNED",
    "USE",
    "USING",
    "VARCHAR",
    "WHILE",
    "WINDOW",
    "ZEROFILL",
];

/// Reserved words partitioned into the six formatter classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservedWords {
    pub top_level: Vec<String>,
    pub top_level_newline: Vec<String>,
    pub top_level_no_indent: Vec<String>,
    pub top_level_newline_no_indent: Vec<String>,
    pub newline: Vec<String>,
    pub plain: Vec<String>,
}

impl ReservedWords {
    /// The standard SQL tables used by the formatter.
    pub fn standard() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect::<Vec<_>>();
        let mut plain = owned(PLAIN);
        for word in GRAMMAR_RESERVED {
            if !plain.iter().any(|w| w == word) {
                plain.push(word.to_string());
            }
        }
        Self {
            top_level: owned(TOP_LEVEL),
            top_level_newline: owned(TOP_LEVEL_NEWLINE),
            top_level_no_indent: owned(TOP_LEVEL_NO_INDENT),
            top_level_newline_no_indent: owned(TOP_LEVEL_NEWLINE_NO_INDENT),
            newline: owned(NEWLINE),
            plain,
        }
    }

    /// Every entry paired with its class, in tokenizer priority order.
    pub fn entries(&self) -> impl Iterator<Item = (ReservedClass, &str)> {
        ReservedClass::PRIORITY.into_iter().flat_map(move |class| {
            self.class(class)
                .iter()
                .map(move |word| (class, word.as_str()))
        })
    }

    pub fn class(&self, class: ReservedClass) -> &[String] {
        match class {
            ReservedClass::TopLevel => &self.top_level,
            ReservedClass::TopLevelNewline => &self.top_level_newline,
            ReservedClass::TopLevelNoIndent => &self.top_level_no_indent,
            ReservedClass::TopLevelNewlineNoIndent => &self.top_level_newline_no_indent,
            ReservedClass::Newline => &self.newline,
            ReservedClass::Plain => &self.plain,
        }
    }
}

/// True if `word` (any case) can never be parsed as an identifier.
pub fn is_grammar_reserved(word: &str) -> bool {
    GRAMMAR_RESERVED
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar_keywords_are_reserved_for_the_formatter() {
        let words = ReservedWords::standard();
        for word in GRAMMAR_RESERVED {
            assert!(
                words.plain.iter().any(|w| w == word),
                "{word} missing from plain class"
            );
        }
    }

    #[test]
    fn entries_follow_class_priority() {
        let words = ReservedWords::standard();
        let first = words.entries().next().map(|(class, _)| class);
        assert_eq!(first, Some(ReservedClass::TopLevel));
        let last = words.entries().last().map(|(class, _)| class);
        assert_eq!(last, Some(ReservedClass::Plain));
    }

    #[test]
    fn grammar_reserved_lookup() {
        assert!(is_grammar_reserved("select"));
        assert!(is_grammar_reserved("Where"));
        assert!(!is_grammar_reserved("users"));
        assert!(!is_grammar_reserved("count"));
    }
}
