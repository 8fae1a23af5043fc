use std::collections::HashMap;

use async_trait::async_trait;
use bookshelf_db::{Database, DbError, Repository};
use sqlx::{Sqlite, SqliteConnection};
use time::Date;

use super::models::Author;
use crate::modules::books::{models::Book, repository::BookRow};

#[derive(Debug, sqlx::FromRow)]
struct AuthorRow {
    id: i64,
    name: Option<String>,
    birth_date: Option<Date>,
}

impl AuthorRow {
    fn into_author(self, books: Vec<Book>) -> Author {
        Author {
            id: Some(self.id),
            name: self.name,
            birth_date: self.birth_date,
            books,
        }
    }
}

const SELECT_AUTHOR: &str = "SELECT id, name, birth_date FROM author";

/// SQLite-backed repository for [`Author`].
#[derive(Debug, Clone)]
pub struct AuthorRepository {
    db: Database,
}

impl AuthorRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Books whose author reference points at `author_id`.
async fn books_of(conn: &mut SqliteConnection, author_id: i64) -> Result<Vec<Book>, DbError> {
    let sql = format!("{} WHERE b.author_id = ? ORDER BY b.id", BookRow::SELECT);
    sqlx::query_as::<Sqlite, BookRow>(&sql)
        .bind(author_id)
        .fetch_all(conn)
        .await?
        .into_iter()
        .map(Book::try_from)
        .collect()
}

async fn fetch_author(conn: &mut SqliteConnection, id: i64) -> Result<Option<Author>, DbError> {
    let sql = format!("{SELECT_AUTHOR} WHERE id = ?");
    let row = sqlx::query_as::<Sqlite, AuthorRow>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    match row {
        Some(row) => {
            let books = books_of(conn, id).await?;
            Ok(Some(row.into_author(books)))
        }
        None => Ok(None),
    }
}

#[async_trait]
impl Repository<Author> for AuthorRepository {
    async fn save(&self, author: Author) -> Result<Author, DbError> {
        let mut tx = self.db.pool().begin().await?;

        let id = match author.id {
            None => sqlx::query("INSERT INTO author (name, birth_date) VALUES (?, ?)")
                .bind(&author.name)
                .bind(author.birth_date)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid(),
            Some(id) => {
                let result = sqlx::query("UPDATE author SET name = ?, birth_date = ? WHERE id = ?")
                    .bind(&author.name)
                    .bind(author.birth_date)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                if result.rows_affected() == 0 {
                    return Err(DbError::RowNotFound {
                        entity: "author",
                        id,
                    });
                }
                id
            }
        };

        let saved = fetch_author(&mut tx, id)
            .await?
            .ok_or(DbError::RowNotFound {
                entity: "author",
                id,
            })?;
        tx.commit().await?;

        tracing::debug!(id, "author saved");
        Ok(saved)
    }

    async fn find_all(&self) -> Result<Vec<Author>, DbError> {
        let mut conn = self.db.pool().acquire().await?;

        let authors = sqlx::query_as::<Sqlite, AuthorRow>(&format!("{SELECT_AUTHOR} ORDER BY id"))
            .fetch_all(&mut *conn)
            .await?;

        let sql = format!(
            "{} WHERE b.author_id IS NOT NULL ORDER BY b.id",
            BookRow::SELECT
        );
        let mut books_by_author: HashMap<i64, Vec<Book>> = HashMap::new();
        for row in sqlx::query_as::<Sqlite, BookRow>(&sql)
            .fetch_all(&mut *conn)
            .await?
        {
            let book = Book::try_from(row)?;
            if let Some(author_id) = book.author_id() {
                books_by_author.entry(author_id).or_default().push(book);
            }
        }

        Ok(authors
            .into_iter()
            .map(|row| {
                let books = books_by_author.remove(&row.id).unwrap_or_default();
                row.into_author(books)
            })
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Author>, DbError> {
        let mut conn = self.db.pool().acquire().await?;
        fetch_author(&mut conn, id).await
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, DbError> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM author WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(found.is_some())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DbError> {
        // book.author_id is ON DELETE SET NULL, so owned books are detached
        let result = sqlx::query("DELETE FROM author WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        tracing::debug!(id, deleted = result.rows_affected(), "author delete");
        Ok(())
    }

    async fn count(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM author")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }
}
