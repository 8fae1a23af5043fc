pub mod models;
pub mod repository;
pub mod routes;

use async_trait::async_trait;
use axum::Router;
use bookshelf_db::{Database, Repository};
use bookshelf_kernel::{InitCtx, Migration, Module};
use serde_json::json;

use repository::AuthorRepository;

/// Authors module: the `author` table and the `/api/authors` resource
pub struct AuthorsModule;

impl AuthorsModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "authors module initialized"
        );
        Ok(())
    }

    fn routes(&self, db: &Database) -> Router {
        routes::router(AuthorRepository::new(db.clone()))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(crate::utils::crud_openapi(
            "Authors",
            "Author",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": ["integer", "null"], "format": "int64" },
                    "name": { "type": ["string", "null"] },
                    "birthDate": { "type": ["string", "null"], "format": "date" },
                    "books": {
                        "type": "array",
                        "items": { "$ref": "#/components/schemas/Book" },
                        "description": "Books referencing this author (read only)"
                    }
                }
            }),
        ))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE author (
                    id         INTEGER PRIMARY KEY AUTOINCREMENT,
                    name       TEXT,
                    birth_date TEXT
                );
                "#,
        }]
    }

    async fn start(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let count = AuthorRepository::new(ctx.db.clone()).count().await?;
        tracing::info!(module = self.name(), authors = count, "authors module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module stopped");
        Ok(())
    }
}

/// Create a new instance of the authors module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(AuthorsModule::new())
}
