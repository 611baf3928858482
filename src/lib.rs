pub mod api;
pub mod cache;
pub mod config;
pub mod content;
pub mod error;
pub mod render;
pub mod sanity;
pub mod state;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use config::Config;
use sanity::SanityClient;
use state::AppState;

pub async fn run() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("PLANTFOLIO_LOG"))
        .init();

    let config = Config::from_env().expect("failed to load configuration");
    let client = SanityClient::new(&config.sanity).expect("failed to build content client");

    tracing::info!(
        dataset = %config.sanity.dataset,
        revalidate_secs = config.revalidate.as_secs(),
        "content backend configured"
    );

    let app = AppState::new(client, config.revalidate);

    if let Err(e) = api::run_server(app, config.listen).await {
        tracing::error!(%e, "http server stopped");
    }
}
