//! Stylesheet, backdrop image and health check.

use axum::{
  body::Body,
  extract::State,
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};
use folio_core::contact::MessageSender;
use rand_core::OsRng;

use crate::{AppState, error::Error, svg};

const STYLESHEET: &str = include_str!("../../assets/site.css");

pub async fn stylesheet() -> impl IntoResponse {
  (
    [
      (header::CONTENT_TYPE, "text/css; charset=utf-8"),
      (header::CACHE_CONTROL, "public, max-age=3600"),
    ],
    STYLESHEET,
  )
}

/// A fresh backdrop frame per request; 404 when the theme has none.
pub async fn backdrop<S>(State(state): State<AppState<S>>) -> Result<Response, Error>
where
  S: MessageSender + 'static,
{
  let config = state.theme.backdrop.ok_or(Error::NotFound)?;
  let bytes = svg::snapshot(config, state.theme.palette.field_colors(), &mut OsRng)?;

  Response::builder()
    .status(StatusCode::OK)
    .header(header::CONTENT_TYPE, "image/svg+xml")
    .header(header::CACHE_CONTROL, "no-store")
    .body(Body::from(bytes))
    .map_err(|e| Error::Render(e.to_string()))
}

pub async fn healthz() -> &'static str { "ok" }
