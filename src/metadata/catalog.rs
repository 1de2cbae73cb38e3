use crate::metadata::provider::{ColumnInfo, FunctionInfo, MetadataProvider, TableInfo};
use crate::*;
use futures::{FutureExt as _, future::BoxFuture};
use std::collections::HashMap;
use tokio::sync::RwLock;

pub type Data<T> = RwLock<HashMap<String, T>>;

#[derive(Clone, Debug)]
pub struct Column {
    pub name: String,
    pub data_type: String,
    pub description: Option<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            description: None,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Columns keep the order they were declared in.
#[derive(Clone, Debug)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn new_with(name: impl Into<String>, columns: impl IntoIterator<Item = Column>) -> Self {
        Self {
            name: name.into(),
            columns: columns.into_iter().collect(),
        }
    }
}

#[derive(Debug)]
pub struct Schema {
    pub name: String,
    pub tables: Data<Table>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Data::new(HashMap::new()),
        }
    }
}

#[derive(Debug)]
pub struct Database {
    pub name: String,
    pub schemas: Data<Schema>,
}

impl Database {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schemas: Data::new(HashMap::new()),
        }
    }
}

/// In-memory metadata: databases holding schemas holding tables, plus functions.
///
/// A namespace in SQL (`ns.table`) names either a database, in which case all
/// of its schemas are searched, or a schema in any database. Listings are
/// sorted by name.
#[derive(Debug, Default)]
pub struct Catalog {
    pub default_database: Option<String>,
    pub databases: Data<Database>,
    pub functions: RwLock<Vec<FunctionInfo>>,
}

impl Catalog {
    pub fn new(default_database: impl Into<String>) -> Self {
        Self {
            default_database: Some(default_database.into()),
            ..Self::default()
        }
    }

    /// Insert or replace `table` under `database.schema`, creating both as needed.
    pub async fn add_table(&self, database: &str, schema: &str, table: Table) {
        let mut databases = self.databases.write().await;
        let database = databases
            .entry(database.to_string())
            .or_insert_with(|| Database::new(database));
        let mut schemas = database.schemas.write().await;
        let schema = schemas
            .entry(schema.to_string())
            .or_insert_with(|| Schema::new(schema));
        trace!(schema = %schema.name, table = %table.name, "catalog table added");
        schema.tables.write().await.insert(table.name.clone(), table);
    }

    pub async fn add_function(&self, function: FunctionInfo) {
        self.functions.write().await.push(function);
    }

    /// Tables visible under `namespace`, paired with the namespace they were found in.
    async fn visible_tables(&self, namespace: Option<&str>) -> Vec<(String, Table)> {
        let Some(namespace) = namespace.or(self.default_database.as_deref()) else {
            return Vec::new();
        };
        let databases = self.databases.read().await;
        let mut found = Vec::new();
        for database in databases.values() {
            let whole = database.name == namespace;
            for schema in database.schemas.read().await.values() {
                if whole || schema.name == namespace {
                    let tables = schema.tables.read().await;
                    found.extend(tables.values().map(|t| (namespace.to_string(), t.clone())));
                }
            }
        }
        found.sort_by(|a, b| a.1.name.cmp(&b.1.name));
        found
    }
}

impl MetadataProvider for Catalog {
    fn databases(&self) -> BoxFuture<'_, Result<Vec<String>>> {
        async {
            let mut names: Vec<_> = self.databases.read().await.keys().cloned().collect();
            names.sort();
            Ok(names)
        }
        .boxed()
    }

    fn tables<'a>(&'a self, database: Option<&'a str>) -> BoxFuture<'a, Result<Vec<TableInfo>>> {
        async move {
            Ok(self
                .visible_tables(database)
                .await
                .into_iter()
                .map(|(namespace, table)| TableInfo {
                    name: table.name,
                    database: Some(namespace),
                })
                .collect())
        }
        .boxed()
    }

    fn columns<'a>(
        &'a self,
        database: Option<&'a str>,
        table: &'a str,
        _table_type: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ColumnInfo>>> {
        async move {
            let Some((namespace, found)) = self
                .visible_tables(database)
                .await
                .into_iter()
                .find(|(_, t)| t.name == table)
            else {
                return Ok(Vec::new());
            };
            Ok(found
                .columns
                .into_iter()
                .map(|column| ColumnInfo {
                    name: column.name,
                    data_type: column.data_type,
                    description: column.description,
                    database: Some(namespace.clone()),
                    table: Some(found.name.clone()),
                })
                .collect())
        }
        .boxed()
    }

    fn functions(&self) -> BoxFuture<'_, Result<Vec<FunctionInfo>>> {
        async { Ok(self.functions.read().await.clone()) }.boxed()
    }
}
