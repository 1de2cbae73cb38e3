use crate::metadata::{ColumnInfo, DEFAULT_TABLE_TYPE, FunctionInfo, MetadataProvider, TableInfo};
use crate::parser::{Program, TableName};
use crate::reader::{ColumnLookup, Field};
use crate::sql::Token;
use crate::*;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

pub type SharedProvider = Arc<dyn MetadataProvider>;

/// Metadata providers keyed by the id of the editor model they serve.
///
/// An editor registers its provider when it is created and unregisters it when
/// it goes away. Lookups never fail: an unknown model or a failing provider
/// yields an empty list.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: RwLock<HashMap<String, SharedProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the provider previously registered under `model_id`, if any.
    pub async fn register(
        &self,
        model_id: impl Into<String>,
        provider: SharedProvider,
    ) -> Option<SharedProvider> {
        let model_id = model_id.into();
        debug!(model_id = %model_id, "registering metadata provider");
        self.providers.write().await.insert(model_id, provider)
    }

    pub async fn unregister(&self, model_id: &str) -> Option<SharedProvider> {
        debug!(model_id, "unregistering metadata provider");
        self.providers.write().await.remove(model_id)
    }

    pub async fn provider(&self, model_id: &str) -> Option<SharedProvider> {
        self.providers.read().await.get(model_id).cloned()
    }

    pub async fn databases(&self, model_id: &str) -> Vec<String> {
        let Some(provider) = self.provider(model_id).await else {
            return Vec::new();
        };
        or_empty(model_id, "databases", provider.databases().await)
    }

    pub async fn tables(&self, model_id: &str, database: Option<&str>) -> Vec<TableInfo> {
        let Some(provider) = self.provider(model_id).await else {
            return Vec::new();
        };
        or_empty(model_id, "tables", provider.tables(database).await)
    }

    pub async fn columns(
        &self,
        model_id: &str,
        database: Option<&str>,
        table: &str,
        table_type: &str,
    ) -> Vec<ColumnInfo> {
        let Some(provider) = self.provider(model_id).await else {
            return Vec::new();
        };
        or_empty(
            model_id,
            "columns",
            provider.columns(database, table, table_type).await,
        )
    }

    pub async fn functions(&self, model_id: &str) -> Vec<FunctionInfo> {
        let Some(provider) = self.provider(model_id).await else {
            return Vec::new();
        };
        or_empty(model_id, "functions", provider.functions().await)
    }
}

fn or_empty<T>(model_id: &str, what: &str, result: Result<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!(model_id, "{what} lookup failed: {e}");
        Vec::new()
    })
}

/// Resolves the tables of a statement through the provider of one model.
#[derive(Clone, Copy)]
pub struct RegistryLookup<'a> {
    pub registry: &'a ProviderRegistry,
    pub model_id: &'a str,
}

impl ColumnLookup for RegistryLookup<'_> {
    async fn columns(&self, table: &TableName, _cursor: Option<&Token>, _ast: &Program) -> Vec<Field> {
        if table.table.is_cursor() || table.table.text.is_empty() {
            return Vec::new();
        }
        let namespace = table
            .namespace
            .as_ref()
            .filter(|ns| !ns.is_cursor() && !ns.text.is_empty())
            .map(|ns| ns.text.as_str());
        self.registry
            .columns(self.model_id, namespace, &table.table.text, DEFAULT_TABLE_TYPE)
            .await
            .into_iter()
            .map(|column| Field {
                label: column.name,
                data_type: column.data_type,
                description: column.description.unwrap_or_default(),
                database: column.database,
                table: column.table,
                ..Field::default()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{Catalog, Column, Table};
    use futures::{FutureExt as _, future::BoxFuture};

    struct Broken;

    impl MetadataProvider for Broken {
        fn tables<'a>(&'a self, _: Option<&'a str>) -> BoxFuture<'a, Result<Vec<TableInfo>>> {
            async { Err(Error::Provider("connection reset".into())) }.boxed()
        }
    }

    async fn catalog() -> SharedProvider {
        let catalog = Catalog::new("shop");
        catalog
            .add_table("shop", "public", Table::new_with("users", [Column::new("id", "int4")]))
            .await;
        Arc::new(catalog)
    }

    #[tokio::test]
    async fn register_replaces_and_unregister_removes() {
        let registry = ProviderRegistry::new();
        assert!(registry.register("m1", catalog().await).await.is_none());
        assert!(registry.register("m1", catalog().await).await.is_some());
        assert_eq!(registry.tables("m1", None).await.len(), 1);

        assert!(registry.unregister("m1").await.is_some());
        assert!(registry.unregister("m1").await.is_none());
        assert!(registry.tables("m1", None).await.is_empty());
    }

    #[tokio::test]
    async fn failures_and_gaps_are_empty() {
        let registry = ProviderRegistry::new();
        registry.register("broken", Arc::new(Broken)).await;
        assert!(registry.tables("broken", None).await.is_empty());
        assert!(registry.functions("broken").await.is_empty());
        assert!(registry.databases("missing").await.is_empty());
    }

    #[tokio::test]
    async fn lookup_skips_unfinished_names() {
        let registry = ProviderRegistry::new();
        registry.register("m", catalog().await).await;
        let lookup = RegistryLookup {
            registry: &registry,
            model_id: "m",
        };
        let ast = Program::default();
        let users = TableName {
            namespace: None,
            table: Token::new(crate::sql::TokenKind::Word, "users", 0),
        };
        let fields = lookup.columns(&users, None, &ast).await;
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].table.as_deref(), Some("users"));

        let unfinished = TableName {
            namespace: None,
            table: Token::cursor(0),
        };
        assert!(lookup.columns(&unfinished, None, &ast).await.is_empty());
    }
}
