use tracing::{debug, info};
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use aicourse_client::PlatformClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    let env_file_path = match dotenvy::dotenv() {
        Ok(path) => Some(path),
        Err(_) => None,
    };

    // Initialize the tracing subscriber for structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Default to info level if RUST_LOG is not set
            if cfg!(debug_assertions) {
                "aicourse_client=debug,warn".into()
            } else {
                "aicourse_client=info,warn".into()
            }
        }))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    info!("AI course platform client starting");

    // Log environment loading after logger is initialized
    match env_file_path {
        Some(path) => info!("Loaded environment variables from {}", path.display()),
        None => debug!("No .env file found. Using existing environment variables."),
    };

    // Load configuration
    let config = aicourse_client::load_config().await?;
    info!(base_url = %config.api.base_url, "configuration loaded");

    // Wire the client and restore any persisted session
    let client = PlatformClient::new(config)?;
    client.initialize().await;

    let session = client.session();
    if session.is_logged_in() {
        info!(
            user = %session.display_name(),
            route = session.default_route(),
            "session active"
        );
    } else {
        info!("no active session; sign in to continue");
    }

    Ok(())
}
