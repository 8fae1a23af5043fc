//! HTTP server facade for bookshelf with Axum, error handling, and OpenAPI support.

use anyhow::Context;
use axum::{routing::get, Router};

use bookshelf_db::Database;
use bookshelf_kernel::{settings::Settings, ModuleRegistry};

pub mod alert;
pub mod error;
pub mod extract;
pub mod router;

use router::RouterBuilder;

/// Serve the application until Ctrl-C is received
pub async fn start_server(
    registry: &ModuleRegistry,
    db: &Database,
    settings: &Settings,
) -> anyhow::Result<()> {
    let address = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!("starting HTTP server on {}", address);

    let app = build_router(registry, db, settings);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to {address}"))?;

    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, db: &Database, settings: &Settings) -> Router {
    if !alert::set_application_name(settings.application.name.clone())
        && alert::application_name() != settings.application.name
    {
        tracing::warn!(
            configured = %settings.application.name,
            active = alert::application_name(),
            "alert header prefix already set; ignoring configured application name"
        );
    }

    let health_db = db.clone();
    let mut router_builder =
        RouterBuilder::new().route("/healthz", get(move || health_check(health_db.clone())));

    for module in registry.modules() {
        let module_name = module.name();
        tracing::info!(
            module = module_name,
            "mounting module routes under /api/{}",
            module_name
        );
        router_builder = router_builder.mount_module(module_name, module.routes(db));
    }

    // Layers wrap only the routes added before them
    router_builder
        .with_openapi(registry)
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms)
        .build()
}

/// `ok` once the database answers, otherwise the 500 error body.
async fn health_check(db: Database) -> Result<&'static str, error::AppError> {
    db.ping().await?;
    Ok("ok")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
