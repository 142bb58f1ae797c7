use thiserror::Error;

use crate::export::ExportError;
use crate::repository::errors::RepositoryError;

pub mod customers;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request descriptor was rejected before touching storage.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
