pub mod config;
pub mod error;
pub mod handlers;
pub mod item;
pub mod state;
pub mod store;

use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::AppError;
use state::AppState;
use store::ItemStore;

/// Installs the global log subscriber. Filter comes from `RUST_LOG`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Connects the store and serves until a shutdown signal arrives.
///
/// A store that cannot be reached is returned as an error before anything
/// is bound.
pub async fn start_server(config: Config) -> Result<(), AppError> {
    info!("Connecting to store...");
    let store = ItemStore::connect(&config.store_uri)?;
    info!("Connected to store");

    let app = handlers::create_app(AppState::new(store), &config.static_dir);

    let address = config.bind_addr();
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
