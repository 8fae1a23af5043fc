pub mod models;
pub mod repository;
pub mod routes;

use async_trait::async_trait;
use axum::Router;
use bookshelf_db::{Database, Repository};
use bookshelf_kernel::{InitCtx, Migration, Module};
use serde_json::json;

use repository::BookRepository;

/// Books module: the `book` table, its author link, and the `/api/books` resource
pub struct BooksModule;

impl BooksModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self, db: &Database) -> Router {
        routes::router(BookRepository::new(db.clone()))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(crate::utils::crud_openapi(
            "Books",
            "Book",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": ["integer", "null"], "format": "int64" },
                    "title": { "type": ["string", "null"] },
                    "description": { "type": ["string", "null"] },
                    "publicationDate": { "type": ["string", "null"], "format": "date" },
                    "price": {
                        "type": ["number", "null"],
                        "description": "Decimal price, stored with two fractional digits"
                    },
                    "author": {
                        "type": ["object", "null"],
                        "description": "Owning author; only the id is read on writes",
                        "properties": {
                            "id": { "type": ["integer", "null"], "format": "int64" },
                            "name": { "type": ["string", "null"] },
                            "birthDate": { "type": ["string", "null"], "format": "date" }
                        }
                    }
                }
            }),
        ))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE book (
                    id               INTEGER PRIMARY KEY AUTOINCREMENT,
                    title            TEXT,
                    description      TEXT,
                    publication_date TEXT,
                    price            TEXT,
                    author_id        INTEGER REFERENCES author (id) ON DELETE SET NULL
                );
                CREATE INDEX book_author_id ON book (author_id);
                "#,
        }]
    }

    async fn start(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let count = BookRepository::new(ctx.db.clone()).count().await?;
        tracing::info!(module = self.name(), books = count, "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new())
}
