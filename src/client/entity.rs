use serde::{de::DeserializeOwned, Serialize};

use crate::modules::{authors::models::Author, books::models::Book};

/// An entity exposed under `/api/{RESOURCE}`.
pub trait ApiEntity:
    Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Singular name used in action types and alerts, e.g. `book`.
    const ENTITY: &'static str;
    /// Path segment of the resource, e.g. `books`.
    const RESOURCE: &'static str;

    fn id(&self) -> Option<i64>;

    /// Strip references the server cannot resolve before sending.
    fn clean(self) -> Self {
        self
    }

    fn api_url() -> String {
        format!("/api/{}", Self::RESOURCE)
    }
}

impl ApiEntity for Author {
    const ENTITY: &'static str = "author";
    const RESOURCE: &'static str = "authors";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn clean(mut self) -> Self {
        // The book side owns the link; the server ignores this collection.
        self.books.clear();
        self
    }
}

impl ApiEntity for Book {
    const ENTITY: &'static str = "book";
    const RESOURCE: &'static str = "books";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn clean(mut self) -> Self {
        if self.author_id().is_none() {
            self.author = None;
        }
        self
    }
}
