//! The module contains the error the engine can throw.
//!
//! The errors are grouped by how a caller should react to them:
//!
//! - [`KeyNotFound`] thrown when a user or an entry does not exist.
//! - [`ExistingKey`] thrown when a username is already registered.
//! - [`InvalidName`], [`InvalidRange`] and [`InvalidCategory`] thrown when the
//!   input is malformed.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`InvalidName`]: EngineError::InvalidName
//!  [`InvalidRange`]: EngineError::InvalidRange
//!  [`InvalidCategory`]: EngineError::InvalidCategory
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Invalid credentials")]
    Unauthorized,
    #[error("Password hashing failed: {0}")]
    Password(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidRange(a), Self::InvalidRange(b)) => a == b,
            (Self::InvalidCategory(a), Self::InvalidCategory(b)) => a == b,
            (Self::Unauthorized, Self::Unauthorized) => true,
            (Self::Password(a), Self::Password(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
