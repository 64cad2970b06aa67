use anyhow::Context;
use dotenvy::dotenv;
use roster::logging::init_tracing;
use roster::metrics::{init_metrics, metrics_app};
use roster::router::init_router;
use roster::state::init_app_state;
use roster_config::{LogConfig, ServerConfig};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing(&LogConfig::from_env()).context("Failed to initialize tracing")?;

    let server = ServerConfig::from_env()?;
    let state = init_app_state(&server).await?;
    let mut app = init_router(state);

    if server.metrics_enabled {
        match init_metrics() {
            Ok(handle) => app = app.merge(metrics_app(handle)),
            Err(e) => warn!(error = %e, "Metrics disabled: recorder could not be installed"),
        }
    }

    let address = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("Server running on http://{}", address);
    info!("Swagger UI available at http://{}/swagger-ui", address);
    info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app).await?;

    Ok(())
}
