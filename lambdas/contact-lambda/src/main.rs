mod http_handler;

use std::sync::Arc;

use contact_shared::{AppState, ContactConfig};
use lambda_http::{run, service_fn, Error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // JSON logs for CloudWatch; it stamps its own time and we do not need targets
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .with_target(false)
        .without_time()
        .init();

    let config = ContactConfig::from_env()?;
    if config.allowed_origin == "*" {
        tracing::warn!("CORS_ALLOW_ORIGIN is '*'; restrict it to the site origin before production");
    }

    let state = Arc::new(AppState::from_config(config).await?);
    tracing::info!(
        provider = state.dispatcher.provider(),
        route = %state.config.route_path,
        "Contact Lambda ready"
    );

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { http_handler::function_handler(event, state).await }
    }))
    .await
}
