use crate::autocomplete::keywords::{expected_keywords, is_high_priority};
use crate::autocomplete::registry::{ProviderRegistry, RegistryLookup};
use crate::autocomplete::snippet::expected_snippets;
use crate::metadata::{FunctionInfo, TableInfo};
use crate::parser::parse;
use crate::reader::{CursorInfo, Field, NameSlot, cursor_info, fields_from_statement};
use crate::*;
use itertools::Itertools as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CompletionKind {
    #[display("keyword")]
    Keyword,
    #[display("snippet")]
    Snippet,
    #[display("field")]
    Field,
    #[display("group")]
    Group,
    #[display("table")]
    Table,
    #[display("database")]
    Database,
    #[display("function")]
    Function,
}

/// One entry of the completion list handed to the editor.
///
/// `insert_text` may carry `${n:placeholder}` tab stops for snippets. The
/// editor orders entries by `sort_text`, so the prefixes (`AA`, `AB`, `AC`,
/// `B`, `CA`, `CB`) decide which kinds come first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: String,
    pub insert_text: String,
    pub kind: CompletionKind,
    pub sort_text: String,
    pub detail: Option<String>,
    pub documentation: Option<String>,
}

impl CompletionItem {
    fn new(kind: CompletionKind, label: impl Into<String>, sort_prefix: &str) -> Self {
        let label = label.into();
        Self {
            insert_text: label.clone(),
            sort_text: format!("{sort_prefix}{label}"),
            label,
            kind,
            detail: None,
            documentation: None,
        }
    }

    fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    fn documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// Completion candidates for `text` with the cursor at byte offset `cursor`.
    ///
    /// What is offered depends on what the token under the cursor names:
    /// 1. Nothing in particular: keywords the grammar accepts next, plus snippets.
    /// 2. A field: the statement's fields, keywords, functions and table groups.
    /// 3. A field after `group.`: the fields of that group, plus keywords.
    /// 4. A table name: tables of its namespace (databases too when none is
    ///    typed yet), plus keywords. On the namespace part only databases.
    /// 5. A function name: functions.
    pub async fn search(
        registry: &ProviderRegistry,
        model_id: &str,
        text: &str,
        cursor: usize,
    ) -> Vec<CompletionItem> {
        let parsed = parse(text, cursor);
        let literals: Vec<&str> = parsed.next_literals().collect();
        let keywords = keyword_items(&literals);
        let info = cursor_info(&parsed.ast, &parsed.cursor_key_path);
        debug!(
            model_id,
            cursor,
            path = %parsed.cursor_key_path,
            context = ?info.as_ref().map(context_name),
            "completing"
        );
        let lookup = RegistryLookup { registry, model_id };

        let Some(info) = info else {
            let functions = registry.functions(model_id).await;
            return keywords
                .into_iter()
                .chain(snippet_items(&literals, &functions))
                .collect();
        };
        match info {
            CursorInfo::TableField { .. } => {
                let fields =
                    fields_from_statement(&parsed.ast, &parsed.cursor_key_path, &lookup).await;
                let groups: Vec<CompletionItem> = fields
                    .iter()
                    .filter_map(|f| f.group_picker_name.as_deref())
                    .unique()
                    .map(group_item)
                    .collect();
                let functions = registry.functions(model_id).await;
                fields
                    .iter()
                    .map(field_item)
                    .chain(keywords)
                    .chain(functions.iter().map(function_item))
                    .chain(groups)
                    .collect()
            }
            CursorInfo::TableFieldAfterGroup { group_name, .. } => {
                let fields =
                    fields_from_statement(&parsed.ast, &parsed.cursor_key_path, &lookup).await;
                fields
                    .iter()
                    .filter(|f| f.group_picker_name.as_deref() == Some(group_name))
                    .map(field_item)
                    .chain(keywords)
                    .collect()
            }
            CursorInfo::TableName {
                slot: NameSlot::Namespace,
                ..
            } => database_items(registry.databases(model_id).await),
            CursorInfo::TableName { table, .. } => {
                let namespace = table
                    .namespace
                    .as_ref()
                    .filter(|ns| !ns.is_cursor() && !ns.text.is_empty())
                    .map(|ns| ns.text.as_str());
                let mut items: Vec<_> = registry
                    .tables(model_id, namespace)
                    .await
                    .iter()
                    .map(table_item)
                    .collect();
                if namespace.is_none() {
                    items.extend(database_items(registry.databases(model_id).await));
                }
                items.extend(keywords);
                items
            }
            CursorInfo::FunctionName { .. } => registry
                .functions(model_id)
                .await
                .iter()
                .map(function_item)
                .collect(),
        }
    }
}

fn context_name(info: &CursorInfo<'_>) -> &'static str {
    match info {
        CursorInfo::TableName { .. } => "tableName",
        CursorInfo::TableField { .. } => "tableField",
        CursorInfo::TableFieldAfterGroup { .. } => "tableFieldAfterGroup",
        CursorInfo::FunctionName { .. } => "functionName",
    }
}

fn keyword_items(literals: &[&str]) -> Vec<CompletionItem> {
    expected_keywords(literals)
        .map(|keyword| {
            let prefix = if is_high_priority(keyword) { "CA" } else { "CB" };
            CompletionItem::new(CompletionKind::Keyword, keyword, prefix).detail("keyword")
        })
        .collect()
}

fn snippet_items<'a>(
    literals: &'a [&'a str],
    functions: &'a [FunctionInfo],
) -> impl Iterator<Item = CompletionItem> + 'a {
    let snippets = expected_snippets(literals).map(|s| (s.label, s.insert_text));
    let calls = functions
        .iter()
        .map(|f| (f.name.as_str(), f.snippet.as_str()));
    snippets.chain(calls).map(|(label, insert_text)| CompletionItem {
        label: label.to_string(),
        insert_text: insert_text.to_string(),
        kind: CompletionKind::Snippet,
        sort_text: format!("AC{insert_text}"),
        detail: None,
        documentation: None,
    })
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

/// Markdown describing where a field comes from.
pub(crate) fn field_documentation(field: &Field) -> String {
    format!(
        "Database: {}\n\nTable: {}\n\nDescription: {}",
        or_dash(field.database.as_deref()),
        or_dash(field.table.as_deref()),
        or_dash(Some(field.description.as_str())),
    )
}

fn field_item(field: &Field) -> CompletionItem {
    CompletionItem::new(CompletionKind::Field, &field.label, "AC")
        .detail(&field.data_type)
        .documentation(field_documentation(field))
}

fn group_item(group: &str) -> CompletionItem {
    CompletionItem::new(CompletionKind::Group, group, "AB").detail("table alias")
}

fn table_item(table: &TableInfo) -> CompletionItem {
    CompletionItem::new(CompletionKind::Table, &table.name, "AB")
        .detail("table")
        .documentation(format!("Database: {}", or_dash(table.database.as_deref())))
}

fn database_items(databases: Vec<String>) -> Vec<CompletionItem> {
    databases
        .into_iter()
        .map(|name| CompletionItem::new(CompletionKind::Database, name, "AA").detail("database"))
        .collect()
}

fn function_item(function: &FunctionInfo) -> CompletionItem {
    CompletionItem::new(CompletionKind::Function, &function.name, "B")
        .detail("function")
        .documentation(format!(
            "Description: {}\n\nUsage: {}",
            function.description, function.usage
        ))
}
