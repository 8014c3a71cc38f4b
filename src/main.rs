use dotenvy::dotenv;

use evrs::logging::init_tracing;
use evrs::metrics::init_metrics;
use evrs::router::init_router;
use evrs::state::init_app_state;
use evrs_config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let server_config = ServerConfig::from_env();
    init_tracing(&server_config.log_dir)?;

    let metrics = init_metrics()?;
    let state = init_app_state().await?;
    let app = init_router(state, metrics);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%address, "Server running");
    tracing::info!("Swagger UI available at http://{address}/swagger-ui");
    tracing::info!("Scalar UI available at http://{address}/scalar");

    axum::serve(listener, app).await?;
    Ok(())
}
