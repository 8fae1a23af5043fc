use std::str::FromStr;

use async_trait::async_trait;
use bookshelf_db::{Database, DbError, Repository};
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::{Sqlite, SqliteConnection};
use time::Date;

use super::models::{Book, PRICE_SCALE};
use crate::modules::authors::models::AuthorRef;

/// A book row joined with its author's scalar columns.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct BookRow {
    id: i64,
    title: Option<String>,
    description: Option<String>,
    publication_date: Option<Date>,
    price: Option<String>,
    author_id: Option<i64>,
    author_name: Option<String>,
    author_birth_date: Option<Date>,
}

impl BookRow {
    pub(crate) const SELECT: &'static str = "SELECT b.id, b.title, b.description, \
         b.publication_date, b.price, b.author_id, \
         a.name AS author_name, a.birth_date AS author_birth_date \
         FROM book b LEFT JOIN author a ON a.id = b.author_id";
}

impl TryFrom<BookRow> for Book {
    type Error = DbError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let price = row
            .price
            .as_deref()
            .map(Decimal::from_str)
            .transpose()
            .map_err(|e| DbError::decode("price", e.to_string()))?;

        let author = row.author_id.map(|id| AuthorRef {
            id: Some(id),
            name: row.author_name,
            birth_date: row.author_birth_date,
        });

        Ok(Book {
            id: Some(row.id),
            title: row.title,
            description: row.description,
            publication_date: row.publication_date,
            price,
            author,
        })
    }
}

fn encode_price(price: Option<Decimal>) -> Option<String> {
    price.map(|p| {
        p.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
            .to_string()
    })
}

/// SQLite-backed repository for [`Book`]. The author link is the
/// `author_id` column; only the referenced author's id is written.
#[derive(Debug, Clone)]
pub struct BookRepository {
    db: Database,
}

impl BookRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

async fn fetch_book(conn: &mut SqliteConnection, id: i64) -> Result<Option<Book>, DbError> {
    let sql = format!("{} WHERE b.id = ?", BookRow::SELECT);
    sqlx::query_as::<Sqlite, BookRow>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?
        .map(Book::try_from)
        .transpose()
}

#[async_trait]
impl Repository<Book> for BookRepository {
    async fn save(&self, book: Book) -> Result<Book, DbError> {
        let mut tx = self.db.pool().begin().await?;
        let author_id = book.author_id();
        let price = encode_price(book.price);

        let id = match book.id {
            None => sqlx::query(
                "INSERT INTO book (title, description, publication_date, price, author_id) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&book.title)
            .bind(&book.description)
            .bind(book.publication_date)
            .bind(&price)
            .bind(author_id)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid(),
            Some(id) => {
                let result = sqlx::query(
                    "UPDATE book SET title = ?, description = ?, publication_date = ?, \
                     price = ?, author_id = ? WHERE id = ?",
                )
                .bind(&book.title)
                .bind(&book.description)
                .bind(book.publication_date)
                .bind(&price)
                .bind(author_id)
                .bind(id)
                .execute(&mut *tx)
                .await?;
                if result.rows_affected() == 0 {
                    return Err(DbError::RowNotFound { entity: "book", id });
                }
                id
            }
        };

        let saved = fetch_book(&mut tx, id)
            .await?
            .ok_or(DbError::RowNotFound { entity: "book", id })?;
        tx.commit().await?;

        tracing::debug!(id, author_id, "book saved");
        Ok(saved)
    }

    async fn find_all(&self) -> Result<Vec<Book>, DbError> {
        let sql = format!("{} ORDER BY b.id", BookRow::SELECT);
        sqlx::query_as::<Sqlite, BookRow>(&sql)
            .fetch_all(self.db.pool())
            .await?
            .into_iter()
            .map(Book::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, DbError> {
        let mut conn = self.db.pool().acquire().await?;
        fetch_book(&mut conn, id).await
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, DbError> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM book WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(found.is_some())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM book WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        tracing::debug!(id, deleted = result.rows_affected(), "book delete");
        Ok(())
    }

    async fn count(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM book")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_are_rounded_to_column_scale() {
        assert_eq!(
            encode_price(Some(Decimal::new(12345, 3))),
            Some("12.35".to_string())
        );
        assert_eq!(encode_price(Some(Decimal::ONE)), Some("1".to_string()));
        assert_eq!(encode_price(None), None);
    }

    #[test]
    fn corrupt_price_is_a_decode_error() {
        let row = BookRow {
            id: 1,
            title: None,
            description: None,
            publication_date: None,
            price: Some("twelve".into()),
            author_id: None,
            author_name: None,
            author_birth_date: None,
        };
        let err = Book::try_from(row).unwrap_err();
        assert!(matches!(err, DbError::Decode { field: "price", .. }));
    }
}
