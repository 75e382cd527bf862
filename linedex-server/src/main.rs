use std::sync::Arc;

use clap::Parser;
use linedex_core::validate_data_path;
use linedex_server::cli::Args;
use linedex_server::{AppState, create_router, init_tracing};
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let args = Args::parse();

    let config = args.index_config();
    config.validate()?;
    validate_data_path(&args.data_file)?;

    // Nothing is served until the index is complete; a failed build ends the process
    tracing::info!(path = %args.data_file.display(), "building line index");
    let state = AppState::load(args.data_file.clone(), config).await?;

    let app = create_router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(args.bind_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutting down");
}
