use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failure conditions the API reports with a fixed JSON shape. The message
/// texts are part of the wire contract and must not change.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad Request")]
    BadRequest,
    #[error("Not found")]
    NotFound,
    #[error("unprocessable")]
    Unprocessable,
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Unprocessable => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            ApiError::Database(error) => {
                tracing::error!(%error, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };

        let body = Json(ErrorBody {
            success: false,
            error: status.as_u16(),
            message,
        });
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> ApiError {
        match error {
            sqlx::Error::RowNotFound => ApiError::NotFound,
            other => ApiError::Database(other),
        }
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;
