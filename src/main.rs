use api_server::{start_server, AppState};
use llm_interface::GeminiProvider;
use reddit_client::RedditClient;
use snooscope_core::{AppConfig, CoreError};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            "snooscope=debug,api_server=debug,reddit_client=debug,llm_interface=debug",
        )
        .init();

    tracing::info!("Starting Snooscope - Reddit activity insights");

    let config = AppConfig::from_env()?;
    let reddit = RedditClient::new(&config.user_agent);
    let provider = GeminiProvider::from_pool(&config.api_key_pool)?;

    let state = Arc::new(AppState {
        reddit,
        provider: Arc::new(provider),
    });

    start_server(&config.bind_addr, state).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        CoreError::Internal {
            message: format!("server error: {e}"),
        }
    })
}
