//! Error type for persistence operations.

use thiserror::Error;

/// Errors surfaced by the database layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Query execution, connection, or transaction failure.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// A foreign key, unique, or check constraint rejected the write.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// An update targeted a row that does not exist.
    #[error("{entity} {id} does not exist")]
    RowNotFound { entity: &'static str, id: i64 },

    /// A stored value could not be converted into its domain type.
    #[error("invalid stored value for {field}: {message}")]
    Decode { field: &'static str, message: String },

    /// A module migration failed to apply.
    #[error("migration {module}/{id} failed: {source}")]
    Migration {
        module: String,
        id: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl DbError {
    /// Build a decode error for a named column.
    pub fn decode(field: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            field,
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_foreign_key_violation()
                || db_err.is_unique_violation()
                || db_err.is_check_violation()
            {
                return Self::Constraint(db_err.message().to_string());
            }
        }
        Self::Database(err)
    }
}
