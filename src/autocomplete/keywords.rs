/// Keywords offered when the grammar expects them at the cursor.
pub const KEYWORDS: &[&str] = &[
    "*",
    "AS",
    "ALL",
    "AND",
    "ASC",
    "ADD",
    "ALTER",
    "AFTER",
    "ANALYZE",
    "ANY",
    "AUTHORIZATION",
    "BETWEEN",
    "BEGIN",
    "BEFORE",
    "BOTH",
    "BY",
    "CREATE",
    "COLUMN",
    "CATALOG",
    "CASE",
    "CAST",
    "COMMIT",
    "CURRENT",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "DROP",
    "DATABASE",
    "DATABASES",
    "DISTINCT",
    "DELETE",
    "DESCRIBE",
    "DESC",
    "DATE",
    "DAY",
    "DECIMAL",
    "DOUBLE",
    "ELSE",
    "EXISTS",
    "END",
    "EXCEPTION",
    "EXTRACT",
    "FROM",
    "FIRST",
    "FUNCTION",
    "FLOAT",
    "FOR",
    "GROUP",
    "GROUPS",
    "GRANT",
    "HAVING",
    "HOUR",
    "INSERT",
    "INDEX",
    "INNER",
    "INTEGER",
    "IF",
    "IN",
    "INT",
    "INTO",
    "IS",
    "JOIN",
    "KEY",
    "KILL",
    "LIMIT",
    "LIKE",
    "LEFT",
    "LAST",
    "LOAD",
    "LOCAL",
    "MATERIALIZED",
    "MERGE",
    "MINUTE",
    "NONE",
    "NOT",
    "NCHAR",
    "NULL",
    "NUMERIC",
    "OR",
    "ORDER",
    "OVERWRITE",
    "ON",
    "OFFSET",
    "OUTER",
    "FULL",
    "OVER",
    "PRIMARY",
    "RIGHT",
    "REGEXP",
    "REINDEX",
    "RENAME",
    "REPLICATION",
    "ROW",
    "ROWS",
    "SELECT",
    "SET",
    "SHOW",
    "SCHEMA",
    "SECOND",
    "SMALLINT",
    "TABLE",
    "TABLES",
    "TRUE",
    "TEMP",
    "TEMPORARY",
    "THEN",
    "TIMESTAMP",
    "TOP",
    "TRIGGER",
    "TRUNCATE",
    "UPDATE",
    "UNION",
    "UNIQUE",
    "USE",
    "USER",
    "VARCHAR",
    "VIEW",
    "VALUE",
    "VALUES",
    "WHERE",
    "WITH",
    "WHEN",
    "WHILE",
    "WINDOW",
    "YEAR",
];

/// Keywords sorted ahead of the rest.
pub const HIGH_PRIORITY_KEYWORDS: &[&str] = &[
    "BETWEEN", "CREATE", "FROM", "GROUP", "INSERT", "LIMIT", "ORDER", "SELECT", "TABLE", "WHERE",
];

pub fn is_high_priority(keyword: &str) -> bool {
    HIGH_PRIORITY_KEYWORDS.contains(&keyword)
}

/// `KEYWORDS` entries among the lower-case literals the grammar expects.
pub fn expected_keywords<'a>(
    literals: &'a [&'a str],
) -> impl Iterator<Item = &'static str> + 'a {
    KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| literals.iter().any(|l| l.eq_ignore_ascii_case(keyword)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_priority_keywords_are_keywords() {
        for keyword in HIGH_PRIORITY_KEYWORDS {
            assert!(KEYWORDS.contains(keyword), "{keyword}");
        }
        assert!(is_high_priority("SELECT"));
        assert!(!is_high_priority("JOIN"));
    }

    #[test]
    fn filtering_keeps_table_order() {
        let found: Vec<_> = expected_keywords(&["where", "join", "as", "nonsense"]).collect();
        assert_eq!(found, ["AS", "JOIN", "WHERE"]);
    }
}
