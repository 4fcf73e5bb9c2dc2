// --- Planificador de 4 años - Archivo principal ---

use gradpath::config::{AppConfig, DEFAULT_LOG_FILTER};
use gradpath::{load_state, run_server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    let config = AppConfig::from_env().map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let state = load_state(&config).map_err(std::io::Error::other)?;

    tracing::info!("=== Four-Year Course Planner (API) ===");
    run_server(&config.bind, state).await
}
