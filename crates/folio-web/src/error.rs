//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("not found")]
  NotFound,
  #[error("render error: {0}")]
  Render(String),
  #[error(transparent)]
  Core(#[from] folio_core::Error),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
      Error::Render(msg) => {
        tracing::error!(error = %msg, "failed to render response");
        (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response()
      }
      Error::Core(e @ folio_core::Error::MissingField(_)) => {
        (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
      }
      Error::Core(e) => {
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
      }
    }
  }
}
