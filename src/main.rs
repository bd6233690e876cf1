use std::time::Duration;

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use anyhow::Context;
use malt::{
    db::sqlite::{create_pool, ensure_schema},
    graceful_shutdown::shutdown_signal,
    middlewares::auth::PublishKeyMiddleware,
    routes::configure_routes,
    settings::AppConfig,
    telemetry::init_tracing,
    AppState,
};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::new().context("Configuration error")?;

    init_tracing(config.log_format);
    tracing::info!("Loaded configuration: {:?}", config);

    let pool = create_pool(&config.database_url, config.max_connections)
        .await
        .with_context(|| format!("Failed to open database at {}", config.database_url))?;

    ensure_schema(&pool)
        .await
        .context("Failed to create the posts table")?;

    let app_state = web::Data::new(AppState::new(&config, pool.clone()));

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "🚀 Starting Malt v{} on {}",
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    // Middleware registered last runs first: paths are trimmed before the key check.
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(PublishKeyMiddleware)
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .client_request_timeout(Duration::from_secs(config.read_timeout_secs))
    .client_disconnect_timeout(Duration::from_secs(config.write_timeout_secs))
    .disable_signals()
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {}", server_addr))?
    .run();

    let handle = server.handle();
    let mut server_task = tokio::spawn(server);

    let stopped_by_signal = tokio::select! {
        res = &mut server_task => {
            res??;
            false
        }
        _ = shutdown_signal() => true,
    };

    if stopped_by_signal {
        handle.stop(true).await;
        server_task.await??;
    }

    pool.close().await;
    tracing::info!("Database pool closed, shutdown complete");

    Ok(())
}
