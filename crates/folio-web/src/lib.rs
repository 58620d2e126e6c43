//! Server-rendered web front-end for Folio.
//!
//! Exposes an axum [`Router`] that renders the portfolio page and relays
//! contact-form submissions through any [`MessageSender`].

pub mod error;
pub mod etag;
pub mod handlers;
pub mod html;
pub mod svg;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use folio_core::{
  contact::{MessageSender, SenderConfig},
  content::Profile,
  theme::{Preset, Theme, ThemeOverrides},
};
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};

use handlers::{api, assets, page};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `FOLIO_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub preset:     Preset,
  /// Profile TOML; the bundled profile when unset.
  pub content:    Option<PathBuf>,
  /// Directory served under `/assets` (portrait, résumé).
  pub assets_dir: PathBuf,
  pub theme:      ThemeOverrides,
  pub sender:     SenderConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       8080,
      preset:     Preset::default(),
      content:    None,
      assets_dir: PathBuf::from("assets"),
      theme:      ThemeOverrides::default(),
      sender:     SenderConfig::default(),
    }
  }
}

impl ServerConfig {
  /// The preset with any `[theme]` overrides applied.
  pub fn theme(&self) -> Theme { self.preset.theme().with_overrides(&self.theme) }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub sender:  Arc<S>,
  pub profile: Arc<Profile>,
  pub theme:   Arc<Theme>,
  pub config:  Arc<ServerConfig>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      sender:  self.sender.clone(),
      profile: self.profile.clone(),
      theme:   self.theme.clone(),
      config:  self.config.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the portfolio site.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: MessageSender + 'static,
{
  let static_files = ServeDir::new(&state.config.assets_dir);

  Router::new()
    .route("/",             get(page::index::<S>))
    .route("/contact",      post(page::contact::<S>))
    .route("/api/contact",  post(api::contact::<S>))
    .route("/backdrop.svg", get(assets::backdrop::<S>))
    .route("/site.css",     get(assets::stylesheet))
    .route("/healthz",      get(assets::healthz))
    .nest_service("/assets", static_files)
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::{
    future::Future,
    sync::atomic::{AtomicUsize, Ordering},
  };

  use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
  };
  use folio_core::contact::{ERROR_TEXT, Message, REJECTED_TEXT, SENT_TEXT, SendError};
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use super::*;

  /// Answers every send with the same outcome and counts calls.
  struct Canned {
    outcome: Result<(), SendError>,
    calls:   AtomicUsize,
  }

  impl MessageSender for Canned {
    fn send<'a>(
      &'a self,
      _message: &'a Message,
    ) -> impl Future<Output = Result<(), SendError>> + Send + 'a {
      self.calls.fetch_add(1, Ordering::SeqCst);
      let outcome = self.outcome.clone();
      async move { outcome }
    }
  }

  fn make_state(preset: Preset, outcome: Result<(), SendError>) -> AppState<Canned> {
    let config = ServerConfig {
      preset,
      ..ServerConfig::default()
    };
    AppState {
      sender:  Arc::new(Canned {
        outcome,
        calls: AtomicUsize::new(0),
      }),
      profile: Arc::new(Profile::bundled().unwrap()),
      theme:   Arc::new(config.theme()),
      config:  Arc::new(config),
    }
  }

  async fn oneshot_raw(
    state:   AppState<Canned>,
    method:  &str,
    uri:     &str,
    headers: Vec<(header::HeaderName, &str)>,
    body:    &str,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    for (k, v) in headers {
      builder = builder.header(k, v);
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn body_string(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  const FORM: (header::HeaderName, &str) =
    (header::CONTENT_TYPE, "application/x-www-form-urlencoded");

  // ── Page ─────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn index_renders_every_section() {
    let state = make_state(Preset::Nebula, Ok(()));
    let resp = oneshot_raw(state, "GET", "/", vec![], "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(header::ETAG));

    let html = body_string(resp).await;
    for needle in [
      "<!DOCTYPE html>",
      "Yokisha Poudel",
      "id=\"about\"",
      "id=\"projects\"",
      "id=\"contact\"",
      "Frontend Architect",
      "OvaRythm",
      "/backdrop.svg",
      "/assets/Yokisha_Poudel_Resume.pdf",
    ] {
      assert!(html.contains(needle), "page is missing {needle:?}");
    }
  }

  #[tokio::test]
  async fn matching_if_none_match_returns_304() {
    let state = make_state(Preset::Nebula, Ok(()));
    let first = oneshot_raw(state.clone(), "GET", "/", vec![], "").await;
    let etag = first.headers()[header::ETAG].to_str().unwrap().to_string();

    let second = oneshot_raw(
      state,
      "GET",
      "/",
      vec![(header::IF_NONE_MATCH, etag.as_str())],
      "",
    )
    .await;
    assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
  }

  #[tokio::test]
  async fn pastel_page_types_its_caption_and_has_no_backdrop() {
    let state = make_state(Preset::Pastel, Ok(()));
    let html = body_string(oneshot_raw(state, "GET", "/", vec![], "").await).await;
    assert!(html.contains("caption-type"));
    assert!(!html.contains("/backdrop.svg"));
    assert!(html.contains("timeline-rail"));
  }

  // ── Contact form ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn successful_submission_clears_the_form() {
    let state = make_state(Preset::Nebula, Ok(()));
    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/contact",
      vec![FORM],
      "name=Ada+Lovelace&email=ada%40example.com&message=Hi",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_string(resp).await;
    assert!(html.contains("Success! I&apos;ll get back to you soon."));
    assert!(!html.contains("Ada Lovelace"));
    assert_eq!(state.sender.calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn rejected_submission_keeps_the_fields() {
    let state = make_state(
      Preset::Nebula,
      Err(SendError::Rejected("invalid key".into())),
    );
    let resp = oneshot_raw(
      state,
      "POST",
      "/contact",
      vec![FORM],
      "name=Ada+Lovelace&email=ada%40example.com&message=Hi",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let html = body_string(resp).await;
    assert!(html.contains(REJECTED_TEXT));
    assert!(html.contains("value=\"Ada Lovelace\""));
    assert!(html.contains("ada@example.com"));
  }

  #[tokio::test]
  async fn missing_required_field_never_reaches_the_relay() {
    let state = make_state(Preset::Nebula, Ok(()));
    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/contact",
      vec![FORM],
      "name=Ada&email=&message=Hi",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_string(resp).await.contains("please fill in the email field"));
    assert_eq!(state.sender.calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn pastel_accepts_empty_fields() {
    let state = make_state(Preset::Pastel, Ok(()));
    let resp = oneshot_raw(state.clone(), "POST", "/contact", vec![FORM], "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(state.sender.calls.load(Ordering::SeqCst), 1);
  }

  // ── JSON API ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn api_reports_success_and_failure() {
    let body = r#"{"name":"Ada","email":"ada@example.com","message":"Hi"}"#;
    let json_ct = (header::CONTENT_TYPE, "application/json");

    let ok = oneshot_raw(
      make_state(Preset::Nebula, Ok(())),
      "POST",
      "/api/contact",
      vec![json_ct.clone()],
      body,
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);
    let v: Value = serde_json::from_str(&body_string(ok).await).unwrap();
    assert_eq!(v, json!({ "success": true, "message": SENT_TEXT }));

    let down = oneshot_raw(
      make_state(Preset::Nebula, Err(SendError::Transport("refused".into()))),
      "POST",
      "/api/contact",
      vec![json_ct],
      body,
    )
    .await;
    assert_eq!(down.status(), StatusCode::BAD_GATEWAY);
    let v: Value = serde_json::from_str(&body_string(down).await).unwrap();
    assert_eq!(v, json!({ "success": false, "message": ERROR_TEXT }));
  }

  #[tokio::test]
  async fn api_validation_failure_is_422() {
    let resp = oneshot_raw(
      make_state(Preset::Nebula, Ok(())),
      "POST",
      "/api/contact",
      vec![(header::CONTENT_TYPE, "application/json")],
      r#"{"name":"Ada"}"#,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let v: Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(v["success"], json!(false));
  }

  #[tokio::test]
  async fn api_answers_unreadable_bodies_in_json() {
    let cases = [
      ("application/json", "{not json", StatusCode::BAD_REQUEST),
      ("text/plain", "name=Ada", StatusCode::UNSUPPORTED_MEDIA_TYPE),
      ("application/json", r#"{"name":5}"#, StatusCode::UNPROCESSABLE_ENTITY),
    ];
    for (content_type, body, expected) in cases {
      let state = make_state(Preset::Nebula, Ok(()));
      let resp = oneshot_raw(
        state.clone(),
        "POST",
        "/api/contact",
        vec![(header::CONTENT_TYPE, content_type)],
        body,
      )
      .await;
      assert_eq!(resp.status(), expected, "body {body:?}");
      let v: Value = serde_json::from_str(&body_string(resp).await).unwrap();
      assert_eq!(v["success"], json!(false));
      assert!(!v["message"].as_str().unwrap().is_empty());
      assert_eq!(state.sender.calls.load(Ordering::SeqCst), 0);
    }
  }

  // ── Assets ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn backdrop_is_an_svg_with_every_point() {
    let resp = oneshot_raw(make_state(Preset::Nebula, Ok(())), "GET", "/backdrop.svg", vec![], "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/svg+xml");
    assert_eq!(resp.headers()[header::CACHE_CONTROL], "no-store");

    let svg = body_string(resp).await;
    assert_eq!(svg.matches("<circle").count(), 70);
  }

  #[tokio::test]
  async fn backdrop_is_absent_without_a_field() {
    let resp = oneshot_raw(make_state(Preset::Pastel, Ok(())), "GET", "/backdrop.svg", vec![], "").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn stylesheet_and_health_are_served() {
    let css = oneshot_raw(make_state(Preset::Nebula, Ok(())), "GET", "/site.css", vec![], "").await;
    assert_eq!(css.status(), StatusCode::OK);
    assert!(css.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/css"));

    let health = oneshot_raw(make_state(Preset::Nebula, Ok(())), "GET", "/healthz", vec![], "").await;
    assert_eq!(body_string(health).await, "ok");
  }
}
