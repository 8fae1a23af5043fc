use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::modules::authors::models::{display_opt, AuthorRef};

/// Scale of the stored price column.
pub const PRICE_SCALE: u32 = 2;

/// A book, optionally owned by one author.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub publication_date: Option<Date>,
    /// A JSON number carried digit for digit, never through `f64`.
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub author: Option<AuthorRef>,
}

impl Book {
    /// Identity of the owning author, if any.
    pub fn author_id(&self) -> Option<i64> {
        self.author.as_ref().and_then(|author| author.id)
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book{{id={}, title='{}', description='{}', publicationDate='{}', price={}}}",
            display_opt(&self.id),
            display_opt(&self.title),
            display_opt(&self.description),
            display_opt(&self.publication_date),
            display_opt(&self.price),
        )
    }
}
