use crate::*;
use confique::Config as _;
use std::sync::OnceLock;

#[derive(confique::Config)]
pub struct Config {
    /// Spaces per indentation level in formatted output.
    #[config(env = "SQLHINT_INDENT", default = 4)]
    pub indent: usize,
    #[config(env = "SQLHINT_UPPERCASE", default = false)]
    pub uppercase: bool,
    #[config(env = "SQLHINT_LINES_BETWEEN_QUERIES", default = 2)]
    pub lines_between_queries: usize,
    /// Log filter used when `RUST_LOG` is unset.
    #[config(env = "SQLHINT_LOG", default = "warn")]
    pub log: String,
    /// Postgres connection string for the catalog used by `complete` and `hover`.
    #[config(env = "SQLHINT_DATABASE_URL")]
    pub database_url: Option<String>,
    #[cfg(test)]
    #[config(env = "SQLHINT_CONTAINER_RAMDISKED", default = true)]
    pub container_ramdisked: bool,
    #[cfg(test)]
    #[config(env = "SQLHINT_CONTAINER_LOGS", default = false)]
    pub container_logs: bool,
}

/// Configuration loaded from the environment on first use.
pub fn config() -> Result<&'static Config> {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let loaded = Config::builder()
        .env()
        .load()
        .map_err(|e| Error::Config(e.to_string()))?;
    Ok(CONFIG.get_or_init(|| loaded))
}
