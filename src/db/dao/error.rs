use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaoLayerError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
    #[error("{entity} not found (id={id})")]
    NotFound { entity: &'static str, id: i32 },
    #[error("password is already in use")]
    DuplicatePassword,
}

pub type DaoResult<T> = Result<T, DaoLayerError>;

impl DaoLayerError {
    /// Turn a unique-index violation into `DuplicatePassword`; the password
    /// column is the only unique column outside primary keys.
    pub(crate) fn unique_as_duplicate(self) -> Self {
        match self {
            DaoLayerError::Db(err)
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
            {
                DaoLayerError::DuplicatePassword
            }
            other => other,
        }
    }
}
