//! The portfolio page and its no-script contact form.

use axum::{
  Form,
  body::Body,
  extract::State,
  http::{HeaderMap, StatusCode, header},
  response::Response,
};
use chrono::{Datelike, Utc};
use folio_core::contact::{ContactForm, Draft, MessageSender, Status};

use crate::{
  AppState,
  error::Error,
  etag::{compute_etag, not_modified},
  html::{FormView, PageView, render_page},
};

pub async fn index<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
) -> Result<Response, Error>
where
  S: MessageSender + 'static,
{
  let draft = Draft::default();
  let html = render(&state, &draft, &Status::Idle, None)?;
  let etag = compute_etag(&html);

  let builder = Response::builder()
    .header(header::ETAG, &etag)
    .header(header::CACHE_CONTROL, "no-cache");

  let response = if not_modified(&headers, &etag) {
    builder.status(StatusCode::NOT_MODIFIED).body(Body::empty())
  } else {
    builder
      .status(StatusCode::OK)
      .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
      .body(Body::from(html))
  };
  response.map_err(|e| Error::Render(e.to_string()))
}

/// `POST /contact`: submit the form and re-render the page with the outcome.
pub async fn contact<S>(
  State(state): State<AppState<S>>,
  Form(draft): Form<Draft>,
) -> Result<Response, Error>
where
  S: MessageSender + 'static,
{
  let mut form = ContactForm::with_draft(state.theme.require_fields, draft);

  let (code, notice) = match form.submit(state.sender.as_ref()).await {
    Ok(Status::Failed(_)) => (StatusCode::BAD_GATEWAY, None),
    Ok(_) => (StatusCode::OK, None),
    Err(e @ folio_core::Error::MissingField(_)) => {
      tracing::debug!(error = %e, "contact form incomplete");
      (StatusCode::UNPROCESSABLE_ENTITY, Some(e.to_string()))
    }
    Err(e) => return Err(e.into()),
  };

  let html = render(&state, form.draft(), form.status(), notice.as_deref())?;
  Response::builder()
    .status(code)
    .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
    .header(header::CACHE_CONTROL, "no-store")
    .body(Body::from(html))
    .map_err(|e| Error::Render(e.to_string()))
}

fn render<S>(
  state: &AppState<S>,
  draft: &Draft,
  status: &Status,
  notice: Option<&str>,
) -> Result<Vec<u8>, Error> {
  render_page(&PageView {
    profile: &state.profile,
    theme:   &state.theme,
    form:    FormView {
      draft,
      status,
      notice,
    },
    year:    Utc::now().year(),
  })
}
