#![cfg(test)]
use crate::*;
use rstest::rstest;
use std::sync::Arc;

const MODEL: &str = "model-1";

/// Registry with one catalog: `shop.public.{users, orders}` and two functions.
async fn registry() -> ProviderRegistry {
    let catalog = Catalog::new("shop");
    catalog
        .add_table(
            "shop",
            "public",
            Table::new_with(
                "users",
                [
                    Column::new("id", "int4"),
                    Column::new("name", "text").describe("Display name"),
                ],
            ),
        )
        .await;
    catalog
        .add_table(
            "shop",
            "public",
            Table::new_with(
                "orders",
                [
                    Column::new("id", "int4"),
                    Column::new("user_id", "int4"),
                    Column::new("total", "numeric"),
                ],
            ),
        )
        .await;
    for (name, description) in [("count", "Number of rows"), ("sum", "Sum of values")] {
        catalog
            .add_function(FunctionInfo {
                name: name.to_string(),
                snippet: format!("{name}(${{1}})"),
                usage: format!("{name}(expr)"),
                description: description.to_string(),
            })
            .await;
    }

    let registry = ProviderRegistry::new();
    registry.register(MODEL, Arc::new(catalog)).await;
    registry
}

fn labels(items: &[CompletionItem], kind: CompletionKind) -> Vec<&str> {
    items
        .iter()
        .filter(|item| item.kind == kind)
        .map(|item| item.label.as_str())
        .collect()
}

#[cfg(test)]
mod completion_testing {
    use super::*;
    use itertools::Itertools as _;

    #[rstest]
    // Case 1: empty buffer offers statement snippets and function snippets
    #[case("", 0, CompletionKind::Snippet, vec!["SELECT_CASE", "SELECT_ALL", "S", "count", "sum"])]
    // Case 2: empty table slot lists tables of the default database
    #[case("SELECT * FROM ", 14, CompletionKind::Table, vec!["orders", "users"])]
    // Case 3: ... and databases as namespace hints
    #[case("SELECT * FROM ", 14, CompletionKind::Database, vec!["shop"])]
    // Case 4: typed namespace lists its tables
    #[case("SELECT * FROM shop.", 19, CompletionKind::Table, vec!["orders", "users"])]
    // Case 5: typed namespace drops the database hints
    #[case("SELECT * FROM shop.", 19, CompletionKind::Database, vec![])]
    // Case 6: field slot lists the columns of the FROM table
    #[case("SELECT  FROM users", 7, CompletionKind::Field, vec!["id", "name"])]
    // Case 7: ... its group
    #[case("SELECT  FROM users", 7, CompletionKind::Group, vec!["users"])]
    // Case 8: ... and functions
    #[case("SELECT  FROM users", 7, CompletionKind::Function, vec!["count", "sum"])]
    // Case 9: one group per aliased source, in source order
    #[case("SELECT  FROM users u JOIN orders o ON u.id = o.user_id", 7, CompletionKind::Group, vec!["u", "o"])]
    // Case 10: after `u.` only that group's fields
    #[case("SELECT u. FROM users u", 9, CompletionKind::Field, vec!["id", "name"])]
    // Case 11: ... and no functions
    #[case("SELECT u. FROM users u", 9, CompletionKind::Function, vec![])]
    // Case 12: after `o.` in a join
    #[case("SELECT o. FROM users u JOIN orders o ON u.id = o.user_id", 9, CompletionKind::Field, vec!["id", "user_id", "total"])]
    // Case 13: function name
    #[case("SELECT count(a) FROM users", 12, CompletionKind::Function, vec!["count", "sum"])]
    // Case 14: function name offers nothing else
    #[case("SELECT count(a) FROM users", 12, CompletionKind::Keyword, vec![])]
    // Case 15: unknown table has no fields
    #[case("SELECT  FROM missing", 7, CompletionKind::Field, vec![])]
    // Case 16: cursor touching `FROM` is already in the table slot
    #[case("SELECT * FROM", 13, CompletionKind::Table, vec!["orders", "users"])]
    // Case 17: open IN list offers the columns
    #[case("SELECT id FROM users WHERE id IN (", 34, CompletionKind::Field, vec!["id", "name"])]
    // Case 18: assignment target of an UPDATE
    #[case("UPDATE users SET ", 17, CompletionKind::Field, vec!["id", "name"])]
    #[tokio::test]
    async fn should_complete(
        #[case] sql: &str,
        #[case] cursor: usize,
        #[case] kind: CompletionKind,
        #[case] expected: Vec<&str>,
    ) {
        // When
        let registry = registry().await;

        // Then
        let items = CompletionItem::search(&registry, MODEL, sql, cursor).await;

        // Should
        assert_eq!(labels(&items, kind), expected, "{kind} items for {sql:?}");
    }

    #[tokio::test]
    async fn keywords_follow_the_grammar_and_priority() {
        crate::testing::common_init();
        let registry = registry().await;
        let sql = "SELECT * FROM users ";
        let items = CompletionItem::search(&registry, MODEL, sql, sql.len()).await;

        let find = |label: &str| {
            items
                .iter()
                .find(|item| item.kind == CompletionKind::Keyword && item.label == label)
                .unwrap_or_else(|| panic!("{label} missing"))
        };
        assert_eq!(find("WHERE").sort_text, "CAWHERE");
        assert_eq!(find("JOIN").sort_text, "CBJOIN");
        assert_eq!(find("JOIN").detail.as_deref(), Some("keyword"));
        assert!(!items.iter().any(|item| item.label == "SELECT"));
        assert!(labels(&items, CompletionKind::Field).is_empty());
        let snippets = labels(&items, CompletionKind::Snippet);
        assert!(snippets.contains(&"W"), "{snippets:?}");
        assert!(!snippets.contains(&"S"), "{snippets:?}");
    }

    #[tokio::test]
    async fn items_carry_sort_text_and_documentation() {
        let registry = registry().await;
        let items = CompletionItem::search(&registry, MODEL, "SELECT  FROM users", 7).await;

        let name = items
            .iter()
            .find(|item| item.kind == CompletionKind::Field && item.label == "name")
            .expect("name field");
        assert_eq!(name.sort_text, "ACname");
        assert_eq!(name.detail.as_deref(), Some("text"));
        assert_eq!(
            name.documentation.as_deref(),
            Some("Database: shop\n\nTable: users\n\nDescription: Display name")
        );

        let count = items
            .iter()
            .find(|item| item.kind == CompletionKind::Function)
            .expect("function");
        assert_eq!(count.sort_text, "Bcount");
        assert_eq!(
            count.documentation.as_deref(),
            Some("Description: Number of rows\n\nUsage: count(expr)")
        );

        let group = items
            .iter()
            .find(|item| item.kind == CompletionKind::Group)
            .expect("group");
        assert_eq!(group.sort_text, "ABusers");

        let items = CompletionItem::search(&registry, MODEL, "", 0).await;
        let count = items
            .iter()
            .find(|item| item.label == "count")
            .expect("function snippet");
        assert_eq!(count.insert_text, "count(${1})");
        assert_eq!(count.sort_text, "ACcount(${1})");
    }

    #[tokio::test]
    async fn table_slot_sort_order() {
        let registry = registry().await;
        let items = CompletionItem::search(&registry, MODEL, "SELECT * FROM ", 14).await;
        let sorted: Vec<_> = items
            .iter()
            .filter(|item| item.kind != CompletionKind::Keyword)
            .map(|item| item.sort_text.as_str())
            .sorted()
            .collect();
        assert_eq!(sorted, ["AAshop", "ABorders", "ABusers"]);
        let users = items.iter().find(|item| item.label == "users").expect("users");
        assert_eq!(users.documentation.as_deref(), Some("Database: shop"));
    }

    #[tokio::test]
    async fn unregistered_model_gets_keywords_only() {
        let registry = registry().await;
        let items = CompletionItem::search(&registry, "ghost", "SELECT  FROM users", 7).await;
        assert!(!items.is_empty());
        assert!(items.iter().all(|item| item.kind == CompletionKind::Keyword));
    }
}

#[cfg(test)]
mod hover_testing {
    use super::*;

    #[rstest]
    // Case 1: on a selected column
    #[case("SELECT name FROM users", 8)]
    // Case 2: at the start of the column name
    #[case("SELECT name FROM users", 7)]
    // Case 3: at the end of the column name
    #[case("SELECT name FROM users", 11)]
    #[tokio::test]
    async fn should_hover_columns(#[case] sql: &str, #[case] offset: usize) {
        let registry = registry().await;
        let hover = Hover::search(&registry, MODEL, sql, offset).await;
        let Some(Hover::Column(field)) = hover else {
            panic!("expected a column, got {hover:?}");
        };
        assert_eq!(field.label, "name");
        assert_eq!(field.table.as_deref(), Some("users"));
        assert_eq!(
            Hover::Column(field).to_markdown(),
            "**name** `text`\n\nDatabase: shop\n\nTable: users\n\nDescription: Display name"
        );
    }

    #[tokio::test]
    async fn should_hover_tables() {
        let registry = registry().await;
        let hover = Hover::search(&registry, MODEL, "SELECT * FROM users", 16)
            .await
            .expect("users is a table");
        let Hover::Table { table, columns } = &hover else {
            panic!("expected a table, got {hover:?}");
        };
        assert_eq!(table.name, "users");
        assert_eq!(columns.len(), 2);
        assert_eq!(
            hover.to_markdown(),
            "**Table: users**\n\n\
             | Column | Type | Description |\n\
             | :-- | :-- | :-- |\n\
             | id | int4 | - |\n\
             | name | text | Display name |\n"
        );
    }

    #[tokio::test]
    async fn should_hover_functions() {
        let registry = registry().await;
        let hover = Hover::search(&registry, MODEL, "SELECT count(id) FROM users", 9).await;
        let Some(Hover::Function(function)) = &hover else {
            panic!("expected a function, got {hover:?}");
        };
        assert_eq!(function.name, "count");
        assert_eq!(
            hover.map(|h| h.to_markdown()).as_deref(),
            Some("**count**\n\nUsage: count(expr)\n\nDescription: Number of rows")
        );
    }

    #[rstest]
    // Case 1: a keyword
    #[case(MODEL, "SELECT * FROM users", 2)]
    // Case 2: whitespace between words
    #[case(MODEL, "SELECT *  FROM users", 9)]
    // Case 3: a model nobody registered
    #[case("ghost", "SELECT * FROM users", 16)]
    #[tokio::test]
    async fn should_not_hover(#[case] model: &str, #[case] sql: &str, #[case] offset: usize) {
        let registry = registry().await;
        assert_eq!(Hover::search(&registry, model, sql, offset).await, None);
    }
}
