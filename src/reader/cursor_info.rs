use crate::parser::{Node, Program, Segment, TableName};
use crate::sql::Token;

/// Which part of a `namespace.table` name the cursor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum NameSlot {
    #[display("namespace")]
    Namespace,
    #[display("table")]
    Table,
}

/// What the token under the cursor names.
#[derive(Debug, Clone, PartialEq)]
pub enum CursorInfo<'a> {
    TableName {
        token: &'a Token,
        slot: NameSlot,
        table: &'a TableName,
    },
    TableField {
        token: &'a Token,
    },
    /// The member part of `group.name`.
    TableFieldAfterGroup {
        token: &'a Token,
        group_name: &'a str,
    },
    FunctionName {
        token: &'a Token,
    },
}

impl<'a> CursorInfo<'a> {
    pub fn token(&self) -> &'a Token {
        match self {
            CursorInfo::TableName { token, .. }
            | CursorInfo::TableField { token }
            | CursorInfo::TableFieldAfterGroup { token, .. }
            | CursorInfo::FunctionName { token } => token,
        }
    }
}

/// Classify the cursor from the node that holds its token.
pub fn cursor_info<'a>(ast: &'a Program, path: &[Segment]) -> Option<CursorInfo<'a>> {
    let (last, parent) = path.split_last()?;
    let token = ast.get(path)?.as_token()?;
    Some(match (ast.get(parent)?, last.name()) {
        (Node::TableName(table), "namespace") => CursorInfo::TableName {
            token,
            slot: NameSlot::Namespace,
            table,
        },
        (Node::TableName(table), _) => CursorInfo::TableName {
            token,
            slot: NameSlot::Table,
            table,
        },
        (Node::Column(_), "name") => CursorInfo::TableField { token },
        (Node::ColumnAfterGroup(column), "name") => CursorInfo::TableFieldAfterGroup {
            token,
            group_name: &column.group.text,
        },
        (Node::ColumnAfterGroup(_), _) => CursorInfo::TableField { token },
        (Node::Function(_), "name") => CursorInfo::FunctionName { token },
        _ => return None,
    })
}

/// Closest statement-like node on `path`, walking from the leaf to the root.
pub fn find_nearest_statement<'a, 'p>(
    ast: &'a Program,
    path: &'p [Segment],
) -> Option<(&'p [Segment], Node<'a>)> {
    find_nearest_statement_by(ast, path, |_| true)
}

pub fn find_nearest_statement_by<'a, 'p>(
    ast: &'a Program,
    path: &'p [Segment],
    predicate: impl Fn(Node<'a>) -> bool,
) -> Option<(&'p [Segment], Node<'a>)> {
    (1..=path.len()).rev().find_map(|len| {
        let prefix = &path[..len];
        let node = ast.get(prefix)?;
        (node.statement_kind().is_some() && predicate(node)).then_some((prefix, node))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{StatementKind, parse};
    use rstest::rstest;

    #[rstest]
    // Case 1: empty slot after `FROM`
    #[case("SELECT * FROM ", 14, "table", None)]
    // Case 2: partially typed table name
    #[case("SELECT * FROM d", 15, "table", None)]
    // Case 3: empty slot after `db.`
    #[case("SELECT * FROM db.", 17, "table", Some("db"))]
    // Case 4: on the namespace part
    #[case("SELECT * FROM db.t", 16, "namespace", Some("db"))]
    // Case 5: cursor touching the end of `FROM`
    #[case("SELECT * FROM", 13, "table", None)]
    fn table_names(
        #[case] sql: &str,
        #[case] cursor: usize,
        #[case] slot: &str,
        #[case] namespace: Option<&str>,
    ) {
        let parsed = parse(sql, cursor);
        let info = cursor_info(&parsed.ast, &parsed.cursor_key_path);
        let Some(CursorInfo::TableName { slot: s, table, .. }) = info else {
            panic!("expected table name, got {info:?}");
        };
        assert_eq!(s.to_string(), slot);
        assert_eq!(table.namespace.as_ref().map(|t| t.text.as_str()), namespace);
    }

    #[test]
    fn fields_and_functions() {
        let parsed = parse("SELECT  FROM t", 7);
        let info = cursor_info(&parsed.ast, &parsed.cursor_key_path);
        assert!(matches!(info, Some(CursorInfo::TableField { .. })), "{info:?}");

        let parsed = parse("SELECT count(a) FROM t", 12);
        let info = cursor_info(&parsed.ast, &parsed.cursor_key_path);
        assert!(matches!(info, Some(CursorInfo::FunctionName { token }) if token.text == "count"));

        let sql = "SELECT a FROM t1 o WHERE o.";
        let parsed = parse(sql, sql.len());
        let info = cursor_info(&parsed.ast, &parsed.cursor_key_path);
        assert!(
            matches!(info, Some(CursorInfo::TableFieldAfterGroup { group_name: "o", .. })),
            "{info:?}"
        );
    }

    #[rstest]
    // Case 1: open IN list
    #[case("SELECT a FROM t WHERE a IN (", 28)]
    // Case 2: partly typed first item of an open IN list
    #[case("SELECT a FROM t WHERE a IN (b", 29)]
    // Case 3: empty lower bound after `BETWEEN `
    #[case("SELECT a FROM t WHERE a BETWEEN ", 32)]
    // Case 4: cursor touching `BETWEEN`
    #[case("SELECT a FROM t WHERE a BETWEEN", 31)]
    // Case 5: assignment after `SET `
    #[case("UPDATE t SET ", 13)]
    // Case 6: cursor touching `SET`
    #[case("UPDATE t SET", 12)]
    fn unfinished_clauses_are_field_slots(#[case] sql: &str, #[case] cursor: usize) {
        let parsed = parse(sql, cursor);
        let info = cursor_info(&parsed.ast, &parsed.cursor_key_path);
        assert!(matches!(info, Some(CursorInfo::TableField { .. })), "{info:?}");
    }

    #[test]
    fn group_part_is_a_field() {
        let parsed = parse("SELECT o.id FROM t1 o", 8);
        let info = cursor_info(&parsed.ast, &parsed.cursor_key_path);
        assert!(matches!(info, Some(CursorInfo::TableField { token }) if token.text == "o"));
    }

    #[test]
    fn alias_position_has_no_context() {
        let sql = "SELECT * FROM t ";
        let parsed = parse(sql, sql.len());
        assert!(cursor_info(&parsed.ast, &parsed.cursor_key_path).is_none());
        assert!(cursor_info(&parsed.ast, &[]).is_none());
    }

    #[test]
    fn nearest_statement_walks_up() {
        let sql = "SELECT * FROM t1 JOIN t2 ON ";
        let parsed = parse(sql, sql.len());
        let (path, node) =
            find_nearest_statement(&parsed.ast, &parsed.cursor_key_path).expect("inside a join");
        assert_eq!(node.statement_kind(), Some(StatementKind::Join));
        assert_eq!(path.len(), 4);

        let (path, node) = find_nearest_statement_by(&parsed.ast, &parsed.cursor_key_path, |n| {
            matches!(n, Node::Select(_))
        })
        .expect("inside a select");
        assert_eq!(node.statement_kind(), Some(StatementKind::Select));
        assert_eq!(path.len(), 1);
    }
}
