//! Application bootstrap shared by the server binary, the CLI, and tests.

use anyhow::Context;
use axum::Router;
use bookshelf_db::Database;
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// A fully initialized application: modules registered, initialized,
/// migrated, and started against an open database.
pub struct App {
    settings: Settings,
    registry: ModuleRegistry,
    db: Database,
}

impl App {
    /// Connect to the configured database and bring every module up.
    pub async fn bootstrap(settings: Settings) -> anyhow::Result<Self> {
        let db = Database::connect(&settings.database.url, settings.database.max_connections)
            .await
            .with_context(|| format!("failed to open database '{}'", settings.database.url))?;

        let mut registry = ModuleRegistry::new();
        modules::register_all(&mut registry);

        {
            let ctx = InitCtx {
                settings: &settings,
                db: &db,
            };
            registry.init_modules(&ctx).await?;
            registry.migrate(&db).await?;
            registry.start_modules(&ctx).await?;
        }

        tracing::info!(
            env = ?settings.environment,
            modules = registry.module_count(),
            "bookshelf bootstrap complete"
        );

        Ok(Self {
            settings,
            registry,
            db,
        })
    }

    /// Bootstrap against a private in-memory database with default settings.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let mut settings = Settings::default();
        settings.database.url = "sqlite::memory:".to_string();
        Self::bootstrap(settings).await
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// The complete HTTP router, middleware included.
    pub fn router(&self) -> Router {
        bookshelf_http::build_router(&self.registry, &self.db, &self.settings)
    }

    /// Serve HTTP until Ctrl-C, then shut down.
    pub async fn serve(self) -> anyhow::Result<()> {
        let served = bookshelf_http::start_server(&self.registry, &self.db, &self.settings).await;
        self.shutdown().await?;
        served
    }

    /// Stop modules in reverse order and close the pool.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        self.registry.stop_modules().await?;
        self.db.close().await;
        tracing::info!("bookshelf shutdown complete");
        Ok(())
    }
}
