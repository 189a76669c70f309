//! Service-level error classification
//!
//! Use cases map repository and validation failures onto a small closed set
//! of outcomes: a missing single entity, a rejected input, or an internal
//! failure (query execution, row decoding). List operations never produce
//! `NotFound`; absence there is an empty list.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn not_found(what: impl Into<String>) -> Self {
        ServiceError::NotFound(what.into())
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        ServiceError::InvalidArgument(reason.into())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_wraps_anyhow() {
        let err: ServiceError = anyhow::anyhow!("connection reset").into();
        assert!(matches!(err, ServiceError::Internal(_)));
        assert_eq!(err.to_string(), "connection reset");
    }

    #[test]
    fn invalid_argument_is_prefixed() {
        let err = ServiceError::invalid("limit must be positive");
        assert_eq!(err.to_string(), "invalid argument: limit must be positive");
    }
}
