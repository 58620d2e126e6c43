//! JSON contact endpoint for script-driven clients.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use folio_core::contact::{ContactForm, Draft, MessageSender, Status};
use serde::Serialize;

use crate::AppState;

/// Body of every `/api/contact` reply.
#[derive(Debug, Serialize)]
pub struct Reply {
  pub success: bool,
  pub message: String,
}

impl Reply {
  fn failure(code: StatusCode, message: String) -> Response {
    (code, Json(Reply {
      success: false,
      message,
    }))
      .into_response()
  }
}

/// `POST /api/contact`: same validation and relay as the form, answered
/// as `{ "success": bool, "message": string }`. Unreadable bodies get the
/// same shape with the extractor's status.
pub async fn contact<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<Draft>, JsonRejection>,
) -> Response
where
  S: MessageSender + 'static,
{
  let draft = match body {
    Ok(Json(draft)) => draft,
    Err(rejection) => {
      tracing::debug!(%rejection, "rejected contact body");
      return Reply::failure(rejection.status(), rejection.body_text());
    }
  };

  let mut form = ContactForm::with_draft(state.theme.require_fields, draft);

  match form.submit(state.sender.as_ref()).await {
    Ok(Status::Sent(text)) => Json(Reply {
      success: true,
      message: text.clone(),
    })
    .into_response(),
    Ok(status) => Reply::failure(
      StatusCode::BAD_GATEWAY,
      status.text().unwrap_or_default().to_string(),
    ),
    Err(e @ folio_core::Error::MissingField(_)) => {
      Reply::failure(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    }
    Err(e) => Reply::failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
  }
}
