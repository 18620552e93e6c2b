use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Internal failures a request can hit. User-correctable input problems never
/// land here; those travel as flash messages back to the originating form.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("credential hashing failed: {0}")]
    Credential(#[from] bcrypt::BcryptError),
    #[error("session token error: {0}")]
    SessionToken(#[from] jsonwebtoken::errors::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    code: i32,
    error_message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the detail, answer with a generic failure.
        tracing::error!("request failed: {}", self);

        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let body = Json(ErrorResponse {
            code: status.as_u16() as i32,
            error_message: "Error interno del servidor".to_string(),
        });

        (status, body).into_response()
    }
}
