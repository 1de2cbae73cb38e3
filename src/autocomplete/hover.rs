use crate::autocomplete::completion::field_documentation;
use crate::autocomplete::registry::{ProviderRegistry, RegistryLookup};
use crate::metadata::{ColumnInfo, DEFAULT_TABLE_TYPE, FunctionInfo, TableInfo};
use crate::parser::parse;
use crate::reader::{CursorInfo, Field, cursor_info, find_field_extra_info};
use crate::sql::{Token, TokenKind, Tokenizer};
use crate::*;
use std::sync::LazyLock;

static WORDS: LazyLock<Tokenizer> = LazyLock::new(Tokenizer::grammar);

/// What the word under the pointer refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hover {
    Function(FunctionInfo),
    Column(Field),
    Table {
        table: TableInfo,
        columns: Vec<ColumnInfo>,
    },
}

/// The word token touching `offset`, if any.
fn word_at(text: &str, offset: usize) -> Option<Token> {
    WORDS
        .tokenize(text)
        .into_iter()
        .find(|t| t.kind == TokenKind::Word && t.start <= offset && offset <= t.end)
}

impl Hover {
    /// Describe the word at byte offset `offset`.
    ///
    /// A function-call name resolves to the provider's function, a field to
    /// the column it reads, and any other word to a table of that name.
    pub async fn search(
        registry: &ProviderRegistry,
        model_id: &str,
        text: &str,
        offset: usize,
    ) -> Option<Hover> {
        let word = word_at(text, offset)?;
        let parsed = parse(text, word.end);
        let info = cursor_info(&parsed.ast, &parsed.cursor_key_path);
        trace!(model_id, word = %word.text, "hover");

        match &info {
            Some(CursorInfo::FunctionName { token }) => {
                let found = registry
                    .functions(model_id)
                    .await
                    .into_iter()
                    .find(|f| f.name.eq_ignore_ascii_case(&token.text));
                if let Some(function) = found {
                    return Some(Hover::Function(function));
                }
            }
            Some(field @ (CursorInfo::TableField { .. } | CursorInfo::TableFieldAfterGroup { .. })) => {
                let lookup = RegistryLookup { registry, model_id };
                let found =
                    find_field_extra_info(&parsed.ast, field, &parsed.cursor_key_path, &lookup).await;
                if let Some(field) = found {
                    return Some(Hover::Column(field));
                }
            }
            _ => {}
        }

        let table = registry
            .tables(model_id, None)
            .await
            .into_iter()
            .find(|t| t.name == word.text)?;
        let columns = registry
            .columns(model_id, table.database.as_deref(), &table.name, DEFAULT_TABLE_TYPE)
            .await;
        Some(Hover::Table { table, columns })
    }

    pub fn to_markdown(&self) -> String {
        match self {
            Hover::Function(function) => format!(
                "**{}**\n\nUsage: {}\n\nDescription: {}",
                function.name, function.usage, function.description
            ),
            Hover::Column(field) => format!(
                "**{}** `{}`\n\n{}",
                field.label,
                field.data_type,
                field_documentation(field)
            ),
            Hover::Table { table, columns } => {
                let mut out = format!(
                    "**Table: {}**\n\n| Column | Type | Description |\n| :-- | :-- | :-- |\n",
                    table.name
                );
                for column in columns {
                    out.push_str(&format!(
                        "| {} | {} | {} |\n",
                        dash(&column.name),
                        dash(&column.data_type),
                        dash(column.description.as_deref().unwrap_or_default()),
                    ));
                }
                out
            }
        }
    }
}

fn dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
