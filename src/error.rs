//! Application error type and its HTTP status mapping.

use poem::{error::ResponseError, http::StatusCode};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    /// One or more DTO constraints failed; the message lists every field.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    /// The row changed since the caller read it.
    #[error("{entity} {id} was modified by another request")]
    StaleVersion { entity: &'static str, id: i32 },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Unauthorized")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Database error: {0}")]
    Database(DbErr),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn not_found(entity: &str, id: i32) -> Self {
        Self::NotFound(format!("{entity} with id {id} not found"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn mail(message: impl std::fmt::Display) -> Self {
        Self::Mail(message.to_string())
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                Self::Duplicate(format!("Duplicate value: {msg}"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                Self::NotFound(format!("Referenced record does not exist: {msg}"))
            }
            _ => Self::Database(err),
        }
    }
}

impl From<password_hash::Error> for AppError {
    fn from(err: password_hash::Error) -> Self {
        Self::PasswordHash(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::NOT_ACCEPTABLE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Duplicate(_) | AppError::StaleVersion { .. } => StatusCode::CONFLICT,
            AppError::Unauthorized | AppError::Token(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_)
            | AppError::PasswordHash(_)
            | AppError::Mail(_)
            | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::validation("name: too short"), StatusCode::NOT_ACCEPTABLE)]
    #[case(AppError::not_found("Heading", 7), StatusCode::NOT_FOUND)]
    #[case(AppError::duplicate("taken"), StatusCode::CONFLICT)]
    #[case(AppError::StaleVersion { entity: "Announcement", id: 1 }, StatusCode::CONFLICT)]
    #[case(AppError::Unauthorized, StatusCode::UNAUTHORIZED)]
    #[case(AppError::mail("smtp down"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_errors_to_status(#[case] err: AppError, #[case] expected: StatusCode) {
        assert_eq!(err.status(), expected);
    }

    #[test]
    fn not_found_message_names_entity() {
        let err = AppError::not_found("Heading", 7);
        assert_eq!(err.to_string(), "Heading with id 7 not found");
    }

    #[test]
    fn token_errors_do_not_leak_cause() {
        let err: AppError =
            jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::ExpiredSignature)
                .into();
        assert_eq!(err.to_string(), "Unauthorized");
    }
}
