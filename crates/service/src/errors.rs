use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
    #[error("{0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str, key: impl Display) -> Self {
        Self::NotFound(format!("No such {}: {}", entity, key))
    }

    /// HTTP-equivalent status for the boundary layer to relay.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 404,
            ServiceError::Validation(_) | ServiceError::Model(_) => 400,
            ServiceError::Db(_) => 500,
        }
    }
}
