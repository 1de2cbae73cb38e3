//! Field resolution for the statement around the cursor.
//!
//! Table sources resolve through a `ColumnLookup`; sub-selects resolve their
//! own sources first and then keep what their select list exposes. Sibling
//! sources are looked up concurrently and concatenated in source order.

use crate::parser::{Expr, Node, Program, Segment, Select, SourceItem, TableName, TableRef, TableSource};
use crate::reader::cursor_info::{CursorInfo, find_nearest_statement, find_nearest_statement_by};
use crate::sql::Token;
use futures::{
    FutureExt as _,
    future::{LocalBoxFuture, join_all},
};

/// A column as seen from the statement being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    pub label: String,
    pub data_type: String,
    pub description: String,
    pub database: Option<String>,
    pub table: Option<String>,
    /// Name in the underlying table, before any select-list alias.
    pub origin_name: String,
    /// What `group.` must be to address this field, if anything.
    pub group_picker_name: Option<String>,
}

/// Column source for a table named in the statement.
pub trait ColumnLookup {
    fn columns(
        &self,
        table: &TableName,
        cursor: Option<&Token>,
        ast: &Program,
    ) -> impl Future<Output = Vec<Field>>;
}

struct Resolver<'a, L> {
    lookup: &'a L,
    cursor: Option<&'a Token>,
    ast: &'a Program,
}

impl<L> Clone for Resolver<'_, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L> Copy for Resolver<'_, L> {}

impl<'a, L: ColumnLookup> Resolver<'a, L> {
    async fn table(self, table: &'a TableRef) -> Vec<Field> {
        let mut fields = self.lookup.columns(&table.name, self.cursor, self.ast).await;
        let group = group_picker_name(table);
        for field in &mut fields {
            field.origin_name = field.label.clone();
            field.group_picker_name = group.clone();
        }
        fields
    }

    fn source(self, item: &'a SourceItem) -> LocalBoxFuture<'a, Vec<Field>> {
        async move {
            match item {
                SourceItem::Table(table) => self.table(table).await,
                SourceItem::Select(select) => self.select(select).await,
            }
        }
        .boxed_local()
    }

    async fn table_source(self, source: &'a TableSource) -> Vec<Field> {
        let items = std::iter::once(&source.source).chain(source.joins.iter().map(|j| &j.join));
        join_all(items.map(|item| self.source(item))).await.concat()
    }

    /// Fields of every source in the FROM clause.
    async fn from(self, select: &'a Select) -> Vec<Field> {
        let Some(from) = &select.from else {
            return Vec::new();
        };
        join_all(from.sources.iter().map(|s| self.table_source(s)))
            .await
            .concat()
    }

    /// Fields a sub-select exposes to its parent.
    async fn select(self, select: &'a Select) -> Vec<Field> {
        let fields = self.from(select).await;
        let mut exposed = if select.is_star() {
            fields
        } else {
            expose(select, fields)
        };
        if let Some(alias) = select.alias.as_ref().filter(|a| !a.text.is_empty()) {
            for field in &mut exposed {
                field.group_picker_name = Some(alias.text.clone());
            }
        }
        exposed
    }
}

/// The alias, else the table name when it is the only bound part.
fn group_picker_name(table: &TableRef) -> Option<String> {
    if let Some(alias) = table.alias.as_ref().filter(|a| !a.text.is_empty()) {
        return Some(alias.text.clone());
    }
    match table.name.bound_parts().as_slice() {
        [single] => Some(single.to_string()),
        _ => None,
    }
}

/// Keep the fields the select list names, renamed by their aliases.
fn expose(select: &Select, fields: Vec<Field>) -> Vec<Field> {
    fields
        .into_iter()
        .filter_map(|field| {
            let column = select.result.iter().find(|column| match &column.name {
                Expr::Token(token) => token.text == field.label,
                Expr::ColumnAfterGroup(c) => c.name.text == field.label,
                Expr::GroupAll(g) => field.group_picker_name.as_deref() == Some(g.group.text.as_str()),
                _ => false,
            })?;
            Some(match &column.alias {
                Some(alias) => Field {
                    label: alias.text.clone(),
                    ..field
                },
                None => field,
            })
        })
        .collect()
}

/// Fields visible from the statement enclosing `path`.
///
/// A select sees its FROM sources, a join condition sees the enclosing
/// select's sources, an insert sees its target table and an update its
/// updated table. Everything else sees nothing.
pub async fn fields_from_statement<L: ColumnLookup>(
    ast: &Program,
    path: &[Segment],
    lookup: &L,
) -> Vec<Field> {
    let resolver = Resolver {
        lookup,
        cursor: ast.get(path).and_then(Node::as_token),
        ast,
    };
    let Some((statement_path, statement)) = find_nearest_statement(ast, path) else {
        return Vec::new();
    };
    match statement {
        Node::Select(select) => resolver.from(select).await,
        Node::Join(_) => {
            let parent = &statement_path[..statement_path.len() - 1];
            match find_nearest_statement_by(ast, parent, |n| matches!(n, Node::Select(_))) {
                Some((_, Node::Select(select))) => resolver.from(select).await,
                _ => Vec::new(),
            }
        }
        Node::Insert(insert) => match &insert.into {
            Some(table) => resolver.table(table).await,
            None => Vec::new(),
        },
        Node::Update(update) => resolver.source(&update.table).await,
        _ => Vec::new(),
    }
}

/// The field the cursor token names, preferring one addressed by the typed group.
pub async fn find_field_extra_info<L: ColumnLookup>(
    ast: &Program,
    info: &CursorInfo<'_>,
    path: &[Segment],
    lookup: &L,
) -> Option<Field> {
    let mut fields = fields_from_statement(ast, path, lookup).await;
    let name = info.token().text.as_str();
    let group = match info {
        CursorInfo::TableFieldAfterGroup { group_name, .. } => Some(*group_name),
        _ => None,
    };
    let index = fields
        .iter()
        .position(|f| f.label == name && (group.is_none() || f.group_picker_name.as_deref() == group))
        .or_else(|| fields.iter().position(|f| f.label == name))?;
    Some(fields.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::reader::cursor_info::cursor_info;

    /// Columns by table name, ignoring the namespace.
    struct Tables(Vec<(&'static str, Vec<&'static str>)>);

    impl ColumnLookup for Tables {
        async fn columns(&self, table: &TableName, _: Option<&Token>, _: &Program) -> Vec<Field> {
            self.0
                .iter()
                .filter(|(name, _)| *name == table.table.text)
                .flat_map(|(name, columns)| {
                    columns.iter().map(|column| Field {
                        label: column.to_string(),
                        data_type: "int".to_string(),
                        table: Some(name.to_string()),
                        database: table.namespace.as_ref().map(|t| t.text.clone()),
                        ..Field::default()
                    })
                })
                .collect()
        }
    }

    fn tables() -> Tables {
        Tables(vec![
            ("t", vec!["id", "name"]),
            ("t1", vec!["id", "a"]),
            ("t2", vec!["id", "b"]),
        ])
    }

    async fn resolve(sql: &str, cursor: usize) -> Vec<Field> {
        let parsed = parse(sql, cursor);
        fields_from_statement(&parsed.ast, &parsed.cursor_key_path, &tables()).await
    }

    fn labels(fields: &[Field]) -> Vec<&str> {
        fields.iter().map(|f| f.label.as_str()).collect()
    }

    #[tokio::test]
    async fn star_sub_select_passes_everything_through() {
        let fields = resolve("SELECT x. FROM (SELECT * FROM t) x", 9).await;
        assert_eq!(labels(&fields), ["id", "name"]);
        assert!(fields.iter().all(|f| f.group_picker_name.as_deref() == Some("x")));
    }

    #[tokio::test]
    async fn sub_select_aliases_shadow_columns() {
        let fields = resolve("SELECT x.a FROM (SELECT id AS a FROM t) x", 10).await;
        assert_eq!(labels(&fields), ["a"]);
        assert_eq!(fields[0].origin_name, "id");
        assert_eq!(fields[0].group_picker_name.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn qualified_table_without_alias_has_no_group() {
        let fields = resolve("SELECT  FROM db.t", 7).await;
        assert_eq!(labels(&fields), ["id", "name"]);
        assert!(fields.iter().all(|f| f.group_picker_name.is_none()));
        assert_eq!(fields[0].database.as_deref(), Some("db"));
    }

    #[tokio::test]
    async fn joined_sources_keep_their_groups() {
        let sql = "SELECT a, b FROM t1 o JOIN t2 ON o.id=t2.id WHERE o.";
        let parsed = parse(sql, sql.len());
        let info = cursor_info(&parsed.ast, &parsed.cursor_key_path);
        assert!(matches!(info, Some(CursorInfo::TableFieldAfterGroup { group_name: "o", .. })));

        let fields = fields_from_statement(&parsed.ast, &parsed.cursor_key_path, &tables()).await;
        assert_eq!(labels(&fields), ["id", "a", "id", "b"]);
        let in_o: Vec<_> = fields
            .iter()
            .filter(|f| f.group_picker_name.as_deref() == Some("o"))
            .map(|f| f.label.as_str())
            .collect();
        assert_eq!(in_o, ["id", "a"]);
        assert_eq!(fields[3].group_picker_name.as_deref(), Some("t2"));
    }

    #[tokio::test]
    async fn join_condition_sees_the_whole_from_clause() {
        let sql = "SELECT * FROM t1 JOIN t2 ON ";
        let fields = resolve(sql, sql.len()).await;
        assert_eq!(labels(&fields), ["id", "a", "id", "b"]);
    }

    #[tokio::test]
    async fn insert_and_update_targets() {
        let fields = resolve("INSERT INTO t () VALUES (1)", 15).await;
        assert_eq!(labels(&fields), ["id", "name"]);

        let sql = "UPDATE t1 u SET a = 1 WHERE ";
        let fields = resolve(sql, sql.len()).await;
        assert_eq!(labels(&fields), ["id", "a"]);
        assert!(fields.iter().all(|f| f.group_picker_name.as_deref() == Some("u")));
    }

    #[tokio::test]
    async fn nothing_outside_statements() {
        assert!(resolve("SHOW DATABASES", 3).await.is_empty());
    }

    #[tokio::test]
    async fn extra_info_prefers_the_typed_group() {
        let sql = "SELECT o.id FROM t1 o JOIN t2 p ON o.id = p.id";
        let parsed = parse(sql, 11);
        let info = cursor_info(&parsed.ast, &parsed.cursor_key_path).expect("cursor on a field");
        let field = find_field_extra_info(&parsed.ast, &info, &parsed.cursor_key_path, &tables())
            .await
            .expect("id resolves");
        assert_eq!(field.table.as_deref(), Some("t1"));

        let sql = "SELECT name FROM t";
        let parsed = parse(sql, 11);
        let info = cursor_info(&parsed.ast, &parsed.cursor_key_path).expect("cursor on a field");
        let field = find_field_extra_info(&parsed.ast, &info, &parsed.cursor_key_path, &tables())
            .await
            .expect("name resolves");
        assert_eq!(field.label, "name");
        assert_eq!(field.data_type, "int");
    }
}
