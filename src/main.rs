use dotenvy::dotenv;
use insight_platform::{
    cli::Args,
    errors::AppError,
    server::{build, logging::setup_tracing, spawn_process_metrics},
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv().ok();
    let config = Arc::new(Args::init()?);

    // Logging
    setup_tracing(config.log_level);

    info!(
        "Starting {} {} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("GIT_REVISION")
    );

    // Kept alive for the whole run, events are flushed when it drops.
    let _sentry_guard = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let (app, api_prefix) = build(config.clone())?;
    spawn_process_metrics(&config);

    info!(
        "Using {} node at {}",
        config.network.as_str(),
        config.node.endpoint
    );

    let address = std::net::SocketAddr::new(config.server_address, config.server_port);
    let listener = tokio::net::TcpListener::bind(address).await?;
    let shutdown_signal = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received shutdown signal");
    };

    let notify_server_ready = Arc::new(tokio::sync::Notify::new());

    // Spawn the server in its own task
    let spawn_task = tokio::spawn({
        let notify_server_ready = notify_server_ready.clone();
        async move {
            let server_future = axum::serve(listener, app.into_make_service())
                .with_graceful_shutdown(shutdown_signal);

            notify_server_ready.notify_one();

            server_future.await
        }
    });

    notify_server_ready.notified().await;

    info!("Server is listening on http://{address}{api_prefix}");

    spawn_task
        .await
        .map_err(|err| AppError::Server(err.to_string()))??;

    Ok(())
}
