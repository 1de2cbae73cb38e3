use crate::*;
use futures::{FutureExt as _, future::BoxFuture};

/// Table type passed to `MetadataProvider::columns` when the caller has no better idea.
pub const DEFAULT_TABLE_TYPE: &str = "TABLE";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
    /// Namespace the table was listed under.
    pub database: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub description: Option<String>,
    pub database: Option<String>,
    pub table: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: String,
    /// Editor snippet inserted for the call, e.g. `count(${1})`.
    pub snippet: String,
    pub usage: String,
    pub description: String,
}

/// Source of databases, tables, columns and functions for one editor.
///
/// Every method defaults to an empty list, so a provider only implements what
/// it knows about. `None` as a namespace means the provider's default one.
pub trait MetadataProvider: Send + Sync {
    fn databases(&self) -> BoxFuture<'_, Result<Vec<String>>> {
        async { Ok(Vec::new()) }.boxed()
    }

    fn tables<'a>(&'a self, _database: Option<&'a str>) -> BoxFuture<'a, Result<Vec<TableInfo>>> {
        async { Ok(Vec::new()) }.boxed()
    }

    fn columns<'a>(
        &'a self,
        _database: Option<&'a str>,
        _table: &'a str,
        _table_type: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ColumnInfo>>> {
        async { Ok(Vec::new()) }.boxed()
    }

    fn functions(&self) -> BoxFuture<'_, Result<Vec<FunctionInfo>>> {
        async { Ok(Vec::new()) }.boxed()
    }
}
