use async_trait::async_trait;
use axum::Router;
use bookshelf_db::{Database, Migration};

use crate::settings::Settings;

/// What a module sees while it is brought up.
pub struct InitCtx<'a> {
    pub settings: &'a Settings,
    pub db: &'a Database,
}

/// A resource bundle registered with the [`ModuleRegistry`](crate::ModuleRegistry).
///
/// Lifecycle order is `init`, then the registry applies every module's
/// `migrations`, then `start`. `stop` runs in reverse registration order.
#[async_trait]
pub trait Module: Sync + Send {
    /// Mount point under `/api/`, also the migration ledger key.
    fn name(&self) -> &'static str;

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Handlers with their repository state already bound to `db`.
    fn routes(&self, _db: &Database) -> Router {
        Router::new()
    }

    /// OpenAPI `paths` and `components` with paths relative to the mount point.
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![]
    }

    /// Runs once the schema is current.
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
