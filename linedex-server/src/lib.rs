pub mod api;
pub mod cli;
pub mod error;
pub mod inspect;
pub mod page;
pub mod state;

pub use api::create_router;
pub use state::AppState;

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber, honouring `RUST_LOG` when present
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=warn,hyper=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
