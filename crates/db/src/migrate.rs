//! Module migrations and the runner that applies them.

use time::OffsetDateTime;

use crate::{Database, DbError};

/// Migration definition for modules
#[derive(Debug, Clone)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}

const LEDGER_DDL: &str = r"
    CREATE TABLE IF NOT EXISTS schema_migrations (
        module     TEXT NOT NULL,
        id         TEXT NOT NULL,
        applied_at TEXT NOT NULL,
        PRIMARY KEY (module, id)
    )
";

/// Apply every migration not yet recorded in `schema_migrations`.
///
/// Migrations are applied in the order given, each inside its own
/// transaction together with its ledger row. Returns how many were applied.
pub async fn run_migrations(
    db: &Database,
    migrations: &[(String, Migration)],
) -> Result<usize, DbError> {
    sqlx::query(LEDGER_DDL).execute(db.pool()).await?;

    let mut applied = 0;
    for (module, migration) in migrations {
        let already: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM schema_migrations WHERE module = ? AND id = ?")
                .bind(module)
                .bind(migration.id)
                .fetch_optional(db.pool())
                .await?;
        if already.is_some() {
            tracing::debug!(module = %module, migration = migration.id, "migration already applied");
            continue;
        }

        let mut tx = db.pool().begin().await?;
        sqlx::raw_sql(migration.up)
            .execute(&mut *tx)
            .await
            .map_err(|source| DbError::Migration {
                module: module.clone(),
                id: migration.id,
                source,
            })?;
        sqlx::query("INSERT INTO schema_migrations (module, id, applied_at) VALUES (?, ?, ?)")
            .bind(module)
            .bind(migration.id)
            .bind(OffsetDateTime::now_utc())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(module = %module, migration = migration.id, "migration applied");
        applied += 1;
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widgets() -> Vec<(String, Migration)> {
        vec![(
            "widgets".to_string(),
            Migration {
                id: "001_init",
                up: "CREATE TABLE widget (id INTEGER PRIMARY KEY); CREATE INDEX widget_id ON widget (id);",
            },
        )]
    }

    #[tokio::test]
    async fn applies_each_migration_once() {
        let db = Database::in_memory().await.unwrap();

        assert_eq!(run_migrations(&db, &widgets()).await.unwrap(), 1);
        assert_eq!(run_migrations(&db, &widgets()).await.unwrap(), 0);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM widget")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn failed_migration_is_not_recorded() {
        let db = Database::in_memory().await.unwrap();
        let broken = vec![(
            "broken".to_string(),
            Migration {
                id: "001_init",
                up: "CREATE TABLE oops (;",
            },
        )];

        let err = run_migrations(&db, &broken).await.unwrap_err();
        assert!(matches!(err, DbError::Migration { id: "001_init", .. }));

        let recorded: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(recorded, 0);
    }
}
