//! Database metadata behind completion and hover.
//!
//! - `provider` : The `MetadataProvider` trait and the records it returns.
//! - `catalog`  : In-memory provider.
//! - `postgres` : Provider reading a live Postgres database through `sqlx`.

pub mod catalog;
pub mod postgres;
pub mod provider;

pub use catalog::{Catalog, Column, Data, Database, Schema, Table};
pub use postgres::PgCatalog;
pub use provider::{ColumnInfo, DEFAULT_TABLE_TYPE, FunctionInfo, MetadataProvider, TableInfo};
