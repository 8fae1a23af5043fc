use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::modules::books::models::Book;

/// An author and the books that reference it.
///
/// `books` is derived from each book's author reference when read and is
/// ignored on writes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<Date>,
    #[serde(default)]
    pub books: Vec<Book>,
}

/// Author as embedded in a book payload, without its book collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<Date>,
}

impl Author {
    /// Attach `book` to this author, updating both sides.
    pub fn add_book(&mut self, book: &mut Book) -> &mut Self {
        book.author = Some(self.to_ref());
        if !self.books.iter().any(|owned| owned == &*book) {
            self.books.push(book.clone());
        }
        self
    }

    /// Detach `book` from this author, updating both sides.
    pub fn remove_book(&mut self, book: &mut Book) -> &mut Self {
        self.books.retain(|owned| owned != &*book);
        book.author = None;
        self
    }

    pub fn to_ref(&self) -> AuthorRef {
        AuthorRef {
            id: self.id,
            name: self.name.clone(),
            birth_date: self.birth_date,
        }
    }
}

/// Entities are equal only when both have an identity and the identities match.
impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }
}

impl PartialEq for AuthorRef {
    fn eq(&self, other: &Self) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Author{{id={}, name='{}', birthDate='{}'}}",
            display_opt(&self.id),
            display_opt(&self.name),
            display_opt(&self.birth_date),
        )
    }
}

pub(crate) fn display_opt<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "null".to_string(),
    }
}
