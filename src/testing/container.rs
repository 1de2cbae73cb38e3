use crate::*;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::{Duration, Instant};
use testcontainers::{
    ContainerRequest, GenericImage, ImageExt,
    core::{IntoContainerPort as _, WaitFor, logs::LogFrame},
    runners::AsyncRunner as _,
};
use tokio::sync::OnceCell;

pub type Container = testcontainers::ContainerAsync<GenericImage>;

const PG_USER: &str = "postgres";
const PG_PASS: &str = "postgres";

/// One Postgres container shared by every integration test in the run.
pub async fn postgres() -> &'static Container {
    static POSTGRES: OnceCell<Container> = OnceCell::const_new();
    const TRIES: u8 = 3;
    POSTGRES
        .get_or_init(|| async {
            let mut attempt = 1;
            loop {
                match container().await {
                    Ok(container) => return container,
                    Err(e) if attempt < TRIES => {
                        warn!("Container attempt {attempt}/{TRIES} failed: {e}");
                        attempt += 1;
                    }
                    Err(e) => panic!("postgres container unavailable: {e}"),
                }
            }
        })
        .await
}

/// Pool connected to `database` inside the shared container.
pub(super) async fn pool(database: &str) -> PgPool {
    let container = postgres().await;
    let url = format!(
        "postgres://{PG_USER}:{PG_PASS}@{}:{}/{database}",
        container.get_host().await.expect("container host"),
        container
            .get_host_port_ipv4(5432)
            .await
            .expect("container port")
    );
    PgPoolOptions::new()
        .max_connections(3)
        .connect(&url)
        .await
        .expect("test pool connection")
}

async fn container() -> Result<Container> {
    debug!("Starting Postgres container");
    let started = Instant::now();
    let container = image()?
        .start()
        .await
        .map_err(|e| Error::Internal(e.to_string()))?;
    debug!("Container ready in {:#.2?}", started.elapsed());
    Ok(container)
}

fn image() -> Result<ContainerRequest<GenericImage>> {
    let config = config()?;
    let mut image = GenericImage::new("postgres", "16-alpine")
        .with_exposed_port(5432.tcp())
        .with_wait_for(WaitFor::message_on_stderr("listening on IPv4 address"))
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_USER", PG_USER)
        .with_env_var("POSTGRES_PASSWORD", PG_PASS)
        .with_env_var("POSTGRES_DB", "postgres");

    if config.container_logs {
        image = image.with_log_consumer(|line: &LogFrame| trace!("[postgres] {line:?}"));
    }

    if config.container_ramdisked {
        image = image
            .with_env_var("PGDATA", "/dev/shm/pgdata")
            .with_shm_size(512 * 1024 * 1024);
    }

    Ok(image.with_startup_timeout(Duration::from_secs(60)))
}
