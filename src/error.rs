// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

use axum::{http::StatusCode, response::IntoResponse, Json};
use diesel_async::pooled_connection::PoolError;
use thiserror::Error;
use tracing::error;

/// Error taxonomy for the engagement core. Every operation returns
/// `Result<_, AppError>`; nothing here is fatal to the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("sign in required")]
    Unauthenticated,

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    AlreadyExists(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    InvalidOperation(&'static str),

    #[error("not allowed")]
    Forbidden,

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] deadpool::managed::PoolError<PoolError>),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidOperation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Database(_) | AppError::Pool(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();

        // Storage failures get logged with detail but surface as a generic
        // message; everything else is already user-facing.
        let message = match &self {
            AppError::Database(e) => {
                error!("storage failure: {}", e);
                "storage failure".to_string()
            }
            AppError::Pool(e) => {
                error!("connection pool failure: {}", e);
                "storage failure".to_string()
            }
            other => other.to_string(),
        };

        (
            status,
            Json(serde_json::json!({
                "error": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(
            AppError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::InvalidInput("empty".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::AlreadyExists("already liked").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::NotFound("post").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidOperation("cannot follow yourself").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn not_found_message_names_the_entity() {
        assert_eq!(AppError::NotFound("post").to_string(), "post not found");
    }
}
