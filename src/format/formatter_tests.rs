#![cfg(test)]
use super::*;
use rstest::rstest;
use std::collections::HashMap;

fn options() -> FormatOptions {
    FormatOptions::default()
}

#[test]
fn clauses_are_aligned_under_keywords() {
    let sql = "select a, b from t where a = 1 and b = 2";
    let expected = "select  a,\n        b\nfrom    t\nwhere   a = 1\n        and b = 2";
    assert_eq!(format(sql, &options()), expected);
}

#[test]
fn uppercase_reserved_words_only() {
    let options = FormatOptions {
        uppercase: true,
        ..options()
    };
    let formatted = format("select a, b from t where a = 1 and b = 2", &options);
    assert_eq!(
        formatted,
        "SELECT  a,\n        b\nFROM    t\nWHERE   a = 1\n        AND b = 2"
    );
}

#[rstest]
// Case 1: default indent
#[case(4)]
// Case 2: wide indent
#[case(8)]
// Case 3: narrow indent
#[case(2)]
fn short_calls_stay_inline(#[case] indent: usize) {
    let options = FormatOptions {
        indent,
        ..options()
    };
    let formatted = format("SELECT COUNT(*) FROM t", &options);
    assert!(formatted.contains("COUNT(*)"), "{formatted}");
    assert_eq!(formatted.lines().count(), 2);
}

#[test]
fn sub_selects_break_and_indent() {
    let sql = "SELECT * FROM (SELECT a FROM t) x";
    let expected = "SELECT  *\nFROM    (\n            SELECT  a\n            FROM    t\n        ) x";
    assert_eq!(format(sql, &options()), expected);
}

#[test]
fn long_parens_break_even_without_keywords() {
    let args = (0..30).map(|i| format!("column_{i}")).collect::<Vec<_>>().join(", ");
    let formatted = format(&format!("SELECT f({args})"), &options());
    assert!(formatted.lines().count() > 30, "{formatted}");
    assert!(formatted.lines().any(|line| line == "            column_0,"));
}

#[rstest]
// Case 1: already formatted select
#[case("SELECT COUNT(*) FROM t")]
// Case 2: nested select
#[case("SELECT * FROM (SELECT a FROM t) x")]
// Case 3: joins and conditions
#[case("SELECT a FROM t1 LEFT JOIN t2 ON t1.id = t2.id WHERE a > 1 OR b < 2")]
// Case 4: several statements
#[case("SELECT 1; SELECT 2;")]
fn formatting_is_idempotent(#[case] sql: &str) {
    let once = format(sql, &options());
    assert_eq!(format(&once, &options()), once);
}

#[test]
fn joins_start_lines() {
    let formatted = format(
        "SELECT a FROM t1 LEFT JOIN t2 ON t1.id = t2.id",
        &options(),
    );
    assert_eq!(
        formatted,
        "SELECT  a\nFROM    t1\n        LEFT JOIN t2 ON t1.id = t2.id"
    );
}

#[test]
fn wide_keywords_align_continuations() {
    let formatted = format("SELECT a FROM t ORDER BY a, b", &options());
    assert_eq!(formatted, "SELECT  a\nFROM    t\nORDER BY a,\n         b");
}

#[test]
fn limit_commas_do_not_break() {
    let formatted = format("SELECT a FROM t LIMIT 5, 10", &options());
    assert_eq!(formatted, "SELECT  a\nFROM    t\nLIMIT   5, 10");
}

#[test]
fn case_blocks() {
    let sql = "SELECT CASE WHEN a = 1 THEN 'x' ELSE 'y' END AS k FROM t";
    let expected = "SELECT  CASE\n            WHEN a = 1 THEN 'x'\n            ELSE 'y'\n        END AS k\nFROM    t";
    assert_eq!(format(sql, &options()), expected);
}

#[test]
fn statements_are_separated() {
    assert_eq!(format("select 1; select 2", &options()), "select  1;\n\nselect  2");

    let options = FormatOptions {
        lines_between_queries: 0,
        ..options()
    };
    assert_eq!(format("select 1; select 2", &options), "select  1;\nselect  2");
}

#[test]
fn line_comments_keep_their_commas() {
    let expected = "SELECT  a, -- first\n        b\nFROM    t";
    assert_eq!(format("SELECT a, -- first\nb FROM t", &options()), expected);
    assert_eq!(format("SELECT a -- first\n, b FROM t", &options()), expected);
}

#[test]
fn block_comments_get_their_own_lines() {
    assert_eq!(format("/* hi */ SELECT 1", &options()), "/* hi */\nSELECT  1");
}

#[test]
fn dots_and_colons() {
    assert_eq!(format("SELECT t . a FROM t", &options()), "SELECT  t.a\nFROM    t");
}

#[test]
fn placeholders_take_params() {
    let options = FormatOptions {
        params: Some(Params::Positional(vec!["x".into(), "y".into()])),
        ..options()
    };
    let formatted = format("SELECT * FROM t WHERE a = ? AND b = ?1", &options);
    assert_eq!(formatted, "SELECT  *\nFROM    t\nWHERE   a = x\n        AND b = y");

    let options = FormatOptions {
        params: Some(Params::Named(HashMap::from([("id".to_string(), "7".to_string())]))),
        ..FormatOptions::default()
    };
    let formatted = format("SELECT * FROM t WHERE id = :id OR x = :missing", &options);
    assert!(formatted.ends_with("id = 7\n        OR x = :missing"), "{formatted}");
}

#[test]
fn unbalanced_input_degrades() {
    let formatted = format("SELECT a) FROM (t", &options());
    assert!(formatted.starts_with("SELECT"));
    let formatted = format("END END )) SELECT", &options());
    assert!(formatted.ends_with("SELECT"));
}

#[test]
fn default_options() {
    let options = FormatOptions::default();
    assert_eq!(options.indent, 4);
    assert!(!options.uppercase);
    assert_eq!(options.lines_between_queries, 2);
    assert!(options.params.is_none());
}
