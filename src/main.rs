reexport!(testing, test);
reexport!(sql);
reexport!(parser);
reexport!(reader);
reexport!(metadata);
reexport!(autocomplete);
reexport!(format);
reexport!(config);
reexport!(error);
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn};

use std::sync::Arc;
use tokio::io::{AsyncReadExt as _, AsyncWriteExt as _};
use tracing_subscriber::EnvFilter;

const MODEL_ID: &str = "stdin";

/// What to do with the SQL read from stdin.
enum Mode {
    Format,
    Complete(usize),
    Hover(usize),
}

impl Mode {
    fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let usage = || Error::Config("usage: sqlhint [complete <offset> | hover <offset>]".into());
        let Some(command) = args.next() else {
            return Ok(Mode::Format);
        };
        let offset = args
            .next()
            .and_then(|offset| offset.parse().ok())
            .ok_or_else(usage)?;
        match command.as_str() {
            "complete" => Ok(Mode::Complete(offset)),
            "hover" => Ok(Mode::Hover(offset)),
            _ => Err(usage()),
        }
    }
}

fn init_logging(config: &Config) -> Result {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log))
        .map_err(|e| Error::Config(format!("invalid log filter: {e}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Catalog for `complete` and `hover`: the configured database, else an empty one.
async fn registry(config: &Config) -> Result<ProviderRegistry> {
    let provider: SharedProvider = match &config.database_url {
        Some(url) => Arc::new(PgCatalog::connect(url).await?),
        None => {
            info!("no database configured, completing keywords only");
            Arc::new(Catalog::default())
        }
    };
    let registry = ProviderRegistry::new();
    registry.register(MODEL_ID, provider).await;
    Ok(registry)
}

#[tokio::main]
async fn main() -> Result {
    let config = config()?;
    init_logging(config)?;
    let mode = Mode::from_args(std::env::args().skip(1))?;

    let mut text = String::new();
    tokio::io::stdin().read_to_string(&mut text).await?;

    let output = match mode {
        Mode::Format => format(&text, &FormatOptions::from(config)) + "\n",
        Mode::Complete(offset) => {
            let registry = registry(config).await?;
            CompletionItem::search(&registry, MODEL_ID, &text, offset)
                .await
                .iter()
                .map(|item| format!("{}\t{}\t{}\n", item.sort_text, item.kind, item.label))
                .collect()
        }
        Mode::Hover(offset) => {
            let registry = registry(config).await?;
            Hover::search(&registry, MODEL_ID, &text, offset)
                .await
                .map(|hover| hover.to_markdown() + "\n")
                .unwrap_or_default()
        }
    };

    let mut stdout = tokio::io::stdout();
    stdout.write_all(output.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}
