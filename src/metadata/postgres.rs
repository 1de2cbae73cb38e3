use crate::metadata::provider::{ColumnInfo, FunctionInfo, MetadataProvider, TableInfo};
use crate::*;
use futures::{FutureExt as _, future::BoxFuture};
use sqlx::{PgPool, Row as _, postgres::PgPoolOptions};

/// Metadata read from a live Postgres database. Namespaces are schemas; no
/// namespace means `current_schema()`.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new().max_connections(2).connect(url).await?;
        debug!("connected metadata pool");
        Ok(Self::new(pool))
    }

    async fn fetch_databases(&self) -> Result<Vec<String>> {
        let names = sqlx::query_scalar(
            "SELECT datname::text FROM pg_database WHERE datistemplate = false ORDER BY datname",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    async fn fetch_tables(&self, schema: Option<&str>) -> Result<Vec<TableInfo>> {
        let rows = sqlx::query(
            "SELECT table_name::text, table_schema::text
             FROM information_schema.tables
             WHERE table_schema = COALESCE($1, current_schema())
             ORDER BY table_name",
        )
        .bind(schema.map(str::to_string))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|row| TableInfo {
                name: row.get(0),
                database: row.get(1),
            })
            .collect())
    }

    async fn fetch_columns(&self, schema: Option<&str>, table: &str) -> Result<Vec<ColumnInfo>> {
        let rows = sqlx::query(
            "SELECT column_name::text, data_type::text, table_schema::text, table_name::text,
                    col_description(
                        (quote_ident(table_schema) || '.' || quote_ident(table_name))::regclass,
                        ordinal_position::int
                    ) AS description
             FROM information_schema.columns
             WHERE table_schema = COALESCE($1, current_schema()) AND table_name = $2
             ORDER BY ordinal_position",
        )
        .bind(schema.map(str::to_string))
        .bind(table.to_string())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|row| ColumnInfo {
                name: row.get(0),
                data_type: row.get(1),
                database: row.get(2),
                table: row.get(3),
                description: row.get(4),
            })
            .collect())
    }

    /// User-defined functions and procedures, outside the system schemas.
    async fn fetch_functions(&self) -> Result<Vec<FunctionInfo>> {
        let rows = sqlx::query(
            "SELECT p.proname::text,
                    pg_get_function_identity_arguments(p.oid),
                    COALESCE(obj_description(p.oid, 'pg_proc'), '')
             FROM pg_proc p
             JOIN pg_namespace n ON n.oid = p.pronamespace
             WHERE n.nspname NOT IN ('pg_catalog', 'information_schema')
               AND p.prokind IN ('f', 'p')
             ORDER BY p.proname",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let name: String = row.get(0);
                let args: String = row.get(1);
                FunctionInfo {
                    snippet: format!("{name}(${{1}})"),
                    usage: format!("{name}({args})"),
                    description: row.get(2),
                    name,
                }
            })
            .collect())
    }
}

impl MetadataProvider for PgCatalog {
    fn databases(&self) -> BoxFuture<'_, Result<Vec<String>>> {
        self.fetch_databases().boxed()
    }

    fn tables<'a>(&'a self, database: Option<&'a str>) -> BoxFuture<'a, Result<Vec<TableInfo>>> {
        self.fetch_tables(database).boxed()
    }

    /// Postgres keeps views in the same listings, so `table_type` does not narrow the query.
    fn columns<'a>(
        &'a self,
        database: Option<&'a str>,
        table: &'a str,
        table_type: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ColumnInfo>>> {
        trace!(table, table_type, "loading columns");
        self.fetch_columns(database, table).boxed()
    }

    fn functions(&self) -> BoxFuture<'_, Result<Vec<FunctionInfo>>> {
        self.fetch_functions().boxed()
    }
}
