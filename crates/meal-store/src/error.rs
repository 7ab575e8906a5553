use meal::ValidationError;
use thiserror::Error;

/// Errors that can occur when reading or writing the durable meal store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// A query or connection error occurred.
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// The database could not be reached at all.
    #[error("Database unreachable: {0}")]
    Unreachable(#[source] sqlx::Error),

    /// A write violated a table constraint.
    #[error("Constraint violation: {constraint}")]
    ConstraintViolation { constraint: String },

    /// No pooled connection became available within the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A stored row does not describe a valid meal.
    #[error("Invalid meal row: {0}")]
    InvalidRow(#[from] ValidationError),
}

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => PersistenceError::PoolExhausted,
            sqlx::Error::Database(ref db_err) if db_err.constraint().is_some() => {
                PersistenceError::ConstraintViolation {
                    constraint: db_err.constraint().unwrap_or_default().to_string(),
                }
            }
            other => PersistenceError::Database(other),
        }
    }
}

/// Table provisioning failed at startup.
///
/// Under the default policy this is logged and startup continues; requests
/// against a missing table then fail individually with a `PersistenceError`.
#[derive(Debug, Error)]
#[error("Failed to provision meals table: {source}")]
pub struct ProvisioningWarning {
    #[source]
    pub source: PersistenceError,
}

impl ProvisioningWarning {
    /// Returns the underlying failure, for callers that treat it as fatal.
    pub fn into_inner(self) -> PersistenceError {
        self.source
    }
}

/// Result type for meal store operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
