use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use storefront::{
    config::{ServerConfig, StorageBackend},
    rest, seed,
    store::{MemoryStore, SqliteStore, Store},
    AppContext,
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "storefrontd",
    about = "App store product page backend",
    version
)]
struct Args {
    /// HTTP server port
    #[arg(long, env = "STOREFRONT_PORT")]
    port: Option<u16>,

    /// Data directory for config and the SQLite database
    #[arg(long, env = "STOREFRONT_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "STOREFRONT_LOG")]
    log: Option<String>,

    /// Bind address (default: 127.0.0.1; use 0.0.0.0 for LAN access)
    #[arg(long, env = "STOREFRONT_BIND")]
    bind_address: Option<String>,

    /// Store backend: sqlite (default) or memory
    #[arg(long, env = "STOREFRONT_STORAGE")]
    storage: Option<StorageBackend>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Arc::new(ServerConfig::new(
        args.port,
        args.data_dir,
        args.log,
        args.bind_address,
        args.storage,
    ));

    init_tracing(&config.log, &config.log_format);

    let store: Arc<dyn Store> = match config.storage {
        StorageBackend::Sqlite => Arc::new(SqliteStore::new(&config.data_dir).await?),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    info!(backend = ?config.storage, "store ready");

    seed::seed_if_empty(store.as_ref()).await?;

    let ctx = Arc::new(AppContext::new(config, store));
    rest::start_rest_server(ctx).await
}

fn init_tracing(log_level: &str, log_format: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    if log_format == "json" {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).compact().init();
    }
}
