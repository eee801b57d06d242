use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, SessionLimits, SessionStore};
use ccm_core::{
    CoreConfig, Scorer,
    config::{profile_from_env_value, strict_inputs_from_env_value},
};

/// Main entry point for the ccm application
///
/// Starts the REST server with OpenAPI/Swagger documentation.
///
/// # Environment Variables
/// - `CCM_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CCM_SCORING_PROFILE`: `baseline` or `extended` (default: "extended")
/// - `CCM_STRICT_INPUTS`: reject inputs outside the form bounds (default: "true")
/// - `CCM_SESSION_IDLE_MINUTES`: minutes before an untouched session expires (default: "30")
/// - `CCM_MAX_SESSIONS`: open sessions kept before evicting the least recently used (default: "10000")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the scoring configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ccm_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("ccm_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("CCM_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let profile = profile_from_env_value(std::env::var("CCM_SCORING_PROFILE").ok())?;
    let strict_inputs = strict_inputs_from_env_value(std::env::var("CCM_STRICT_INPUTS").ok())?;
    let cfg = Arc::new(CoreConfig::new(profile, strict_inputs));
    let limits = SessionLimits::from_env_values(
        std::env::var("CCM_SESSION_IDLE_MINUTES").ok(),
        std::env::var("CCM_MAX_SESSIONS").ok(),
    )?;

    tracing::info!(
        "++ Starting ccm REST on {} (profile: {}, strict inputs: {})",
        rest_addr,
        profile,
        strict_inputs
    );

    let app = api_rest::router(AppState::new(
        Scorer::new(cfg),
        SessionStore::with_limits(limits),
    ));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
