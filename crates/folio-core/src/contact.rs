//! Contact form: draft, submission status and the `MessageSender` seam.
//!
//! A [`ContactForm`] makes exactly one outbound attempt per submit. The
//! outcome collapses into a status line that expires after [`STATUS_TTL`];
//! nothing is retried. Relay backends (e.g. `folio-relay`) implement
//! [`MessageSender`]; front-ends depend on the trait only.

use std::{
  fmt,
  future::Future,
  sync::Arc,
  time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// How long a success or failure line stays visible.
pub const STATUS_TTL: Duration = Duration::from_secs(5);

pub const SENT_TEXT: &str = "Success! I'll get back to you soon.";
pub const REJECTED_TEXT: &str = "Something went wrong. Try again?";
pub const ERROR_TEXT: &str = "Error sending message.";

// ─── Fields ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
  Name,
  Email,
  Message,
}

impl Field {
  pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

  /// Label shown above the input.
  pub fn label(self) -> &'static str {
    match self {
      Field::Name => "Full Name",
      Field::Email => "Email Address",
      Field::Message => "Your Message",
    }
  }

  /// Form-encoding key.
  pub fn key(self) -> &'static str {
    match self {
      Field::Name => "name",
      Field::Email => "email",
      Field::Message => "message",
    }
  }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.key()) }
}

/// What the visitor has typed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Draft {
  pub name:    String,
  pub email:   String,
  pub message: String,
}

impl Draft {
  pub fn get(&self, field: Field) -> &str {
    match field {
      Field::Name => &self.name,
      Field::Email => &self.email,
      Field::Message => &self.message,
    }
  }

  pub fn get_mut(&mut self, field: Field) -> &mut String {
    match field {
      Field::Name => &mut self.name,
      Field::Email => &mut self.email,
      Field::Message => &mut self.message,
    }
  }

  /// First field with no content, in form order.
  pub fn first_empty(&self) -> Option<Field> {
    Field::ALL.into_iter().find(|f| self.get(*f).is_empty())
  }

  pub fn is_blank(&self) -> bool { Field::ALL.iter().all(|f| self.get(*f).is_empty()) }

  pub fn clear(&mut self) { *self = Draft::default(); }
}

/// The payload handed to a [`MessageSender`]: the fields exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
  pub name:    String,
  pub email:   String,
  pub message: String,
}

impl From<&Draft> for Message {
  fn from(draft: &Draft) -> Self {
    Self {
      name:    draft.name.clone(),
      email:   draft.email.clone(),
      message: draft.message.clone(),
    }
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
  #[default]
  Idle,
  Sending,
  Sent(String),
  Failed(String),
}

impl Status {
  /// The line to show under the form, if any.
  pub fn text(&self) -> Option<&str> {
    match self {
      Status::Idle | Status::Sending => None,
      Status::Sent(s) | Status::Failed(s) => Some(s),
    }
  }

  pub fn is_sending(&self) -> bool { matches!(self, Status::Sending) }
}

// ─── Sender seam ─────────────────────────────────────────────────────────────

/// Why a message did not go out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
  /// The request never completed (DNS, connect, TLS, timeout).
  #[error("transport error: {0}")]
  Transport(String),

  /// The relay answered and said no.
  #[error("rejected by relay: {0}")]
  Rejected(String),

  /// The relay answered with something we could not interpret.
  #[error("unexpected relay response: {0}")]
  Unexpected(String),
}

impl SendError {
  /// Status text for this failure.
  pub fn status_text(&self) -> &'static str {
    match self {
      SendError::Rejected(_) => REJECTED_TEXT,
      SendError::Transport(_) | SendError::Unexpected(_) => ERROR_TEXT,
    }
  }
}

/// Abstraction over an outbound email relay.
///
/// One call is one attempt; implementations must not retry.
pub trait MessageSender: Send + Sync {
  fn send<'a>(
    &'a self,
    message: &'a Message,
  ) -> impl Future<Output = Result<(), SendError>> + Send + 'a;
}

impl<S: MessageSender> MessageSender for Arc<S> {
  fn send<'a>(
    &'a self,
    message: &'a Message,
  ) -> impl Future<Output = Result<(), SendError>> + Send + 'a {
    (**self).send(message)
  }
}

/// Which relay to use and its fixed credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SenderConfig {
  /// JSON form relay; credential is an access key.
  Web3forms {
    #[serde(default = "web3forms_endpoint")]
    endpoint:   String,
    #[serde(default)]
    access_key: String,
  },
  /// Template-based email delivery.
  Emailjs {
    #[serde(default = "emailjs_endpoint")]
    endpoint:    String,
    service_id:  String,
    template_id: String,
    public_key:  String,
    /// Subject line passed to the template as `title`.
    #[serde(default = "emailjs_title")]
    title:       String,
  },
}

impl Default for SenderConfig {
  fn default() -> Self {
    SenderConfig::Web3forms {
      endpoint:   web3forms_endpoint(),
      access_key: String::new(),
    }
  }
}

pub fn web3forms_endpoint() -> String { "https://api.web3forms.com/submit".into() }

pub fn emailjs_endpoint() -> String { "https://api.emailjs.com/api/v1.0/email/send".into() }

fn emailjs_title() -> String { "New portfolio message".into() }

// ─── Form ────────────────────────────────────────────────────────────────────

/// Form state owned by one page instance.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
  draft:          Draft,
  status:         Status,
  require_fields: bool,
  expires_at:     Option<Instant>,
}

impl ContactForm {
  pub fn new(require_fields: bool) -> Self {
    Self {
      require_fields,
      ..Self::default()
    }
  }

  pub fn with_draft(require_fields: bool, draft: Draft) -> Self {
    Self {
      draft,
      ..Self::new(require_fields)
    }
  }

  pub fn draft(&self) -> &Draft { &self.draft }

  pub fn draft_mut(&mut self) -> &mut Draft { &mut self.draft }

  pub fn status(&self) -> &Status { &self.status }

  pub fn requires_fields(&self) -> bool { self.require_fields }

  /// The send control is disabled while a request is in flight.
  pub fn can_submit(&self) -> bool { !self.status.is_sending() }

  /// When the current status line disappears.
  pub fn expires_at(&self) -> Option<Instant> { self.expires_at }

  /// Validate, mark the form as sending, and snapshot the outbound message.
  pub fn begin(&mut self) -> Result<Message> {
    if self.status.is_sending() {
      return Err(Error::AlreadySending);
    }
    if self.require_fields
      && let Some(field) = self.draft.first_empty()
    {
      return Err(Error::MissingField(field));
    }
    self.status = Status::Sending;
    self.expires_at = None;
    Ok(Message::from(&self.draft))
  }

  /// Record the outcome of the attempt started by [`begin`](Self::begin).
  pub fn finish(&mut self, outcome: Result<(), SendError>, now: Instant) {
    self.status = match outcome {
      Ok(()) => {
        self.draft.clear();
        Status::Sent(SENT_TEXT.into())
      }
      Err(e) => Status::Failed(e.status_text().into()),
    };
    self.expires_at = Some(now + STATUS_TTL);
  }

  /// Clear an expired status line; returns `true` if it was cleared.
  pub fn tick(&mut self, now: Instant) -> bool {
    match self.expires_at {
      Some(at) if now >= at => {
        self.status = Status::Idle;
        self.expires_at = None;
        true
      }
      _ => false,
    }
  }

  /// `begin`, one `send`, `finish`.
  pub async fn submit<S: MessageSender + ?Sized>(&mut self, sender: &S) -> Result<&Status> {
    let message = self.begin()?;
    let outcome = sender.send(&message).await;
    self.finish(outcome, Instant::now());
    Ok(&self.status)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use super::*;

  /// Records every message and answers with a fixed outcome.
  struct Scripted {
    outcome: Result<(), SendError>,
    sent:    Mutex<Vec<Message>>,
  }

  impl Scripted {
    fn new(outcome: Result<(), SendError>) -> Self {
      Self {
        outcome,
        sent: Mutex::new(Vec::new()),
      }
    }

    fn sent(&self) -> Vec<Message> { self.sent.lock().unwrap().clone() }
  }

  impl MessageSender for Scripted {
    fn send<'a>(
      &'a self,
      message: &'a Message,
    ) -> impl Future<Output = Result<(), SendError>> + Send + 'a {
      self.sent.lock().unwrap().push(message.clone());
      let outcome = self.outcome.clone();
      async move { outcome }
    }
  }

  fn filled() -> Draft {
    Draft {
      name:    "  Ada ".into(),
      email:   "ada@example.com".into(),
      message: "Hello\nthere".into(),
    }
  }

  #[tokio::test]
  async fn success_clears_fields_and_reports_success() {
    let sender = Scripted::new(Ok(()));
    let mut form = ContactForm::with_draft(true, filled());

    let status = form.submit(&sender).await.unwrap().clone();
    assert_eq!(status, Status::Sent(SENT_TEXT.into()));
    assert!(form.draft().is_blank());
    assert!(form.can_submit());
  }

  #[tokio::test]
  async fn fields_are_sent_exactly_as_typed() {
    let sender = Scripted::new(Ok(()));
    let mut form = ContactForm::with_draft(true, filled());
    form.submit(&sender).await.unwrap();

    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].name, "  Ada ");
    assert_eq!(sent[0].message, "Hello\nthere");
  }

  #[tokio::test]
  async fn rejection_keeps_fields_and_reports_failure() {
    let sender = Scripted::new(Err(SendError::Rejected("bad key".into())));
    let mut form = ContactForm::with_draft(true, filled());

    form.submit(&sender).await.unwrap();
    assert_eq!(form.status(), &Status::Failed(REJECTED_TEXT.into()));
    assert_eq!(form.draft(), &filled());
  }

  #[tokio::test]
  async fn transport_failure_reports_generic_error() {
    let sender = Scripted::new(Err(SendError::Transport("refused".into())));
    let mut form = ContactForm::with_draft(false, filled());

    form.submit(&sender).await.unwrap();
    assert_eq!(form.status().text(), Some(ERROR_TEXT));
    assert_eq!(form.draft(), &filled());
  }

  #[tokio::test]
  async fn required_fields_block_the_request() {
    let sender = Scripted::new(Ok(()));
    let mut form = ContactForm::with_draft(true, Draft {
      email: String::new(),
      ..filled()
    });

    let err = form.submit(&sender).await.unwrap_err();
    assert!(matches!(err, Error::MissingField(Field::Email)));
    assert_eq!(form.status(), &Status::Idle);
    assert!(sender.sent().is_empty());
  }

  #[tokio::test]
  async fn optional_fields_allow_empty_values() {
    let sender = Scripted::new(Ok(()));
    let mut form = ContactForm::new(false);
    form.submit(&sender).await.unwrap();
    assert_eq!(sender.sent().len(), 1);
    assert_eq!(sender.sent()[0].name, "");
  }

  #[test]
  fn second_begin_while_sending_is_refused() {
    let mut form = ContactForm::with_draft(true, filled());
    form.begin().unwrap();
    assert!(!form.can_submit());
    assert!(matches!(form.begin(), Err(Error::AlreadySending)));
  }

  #[test]
  fn status_clears_after_ttl_whatever_the_outcome() {
    let outcomes = [Ok(()), Err(SendError::Unexpected("html".into()))];
    for outcome in outcomes {
      let mut form = ContactForm::with_draft(true, filled());
      let start = Instant::now();
      form.begin().unwrap();
      form.finish(outcome, start);

      assert!(form.status().text().is_some());
      assert!(!form.tick(start + STATUS_TTL - Duration::from_millis(1)));
      assert!(form.status().text().is_some());
      assert!(form.tick(start + STATUS_TTL));
      assert_eq!(form.status(), &Status::Idle);
      assert_eq!(form.expires_at(), None);
    }
  }

  #[test]
  fn sender_config_reads_tagged_toml() {
    let w3: SenderConfig = toml::from_str("kind = \"web3forms\"\naccess_key = \"k\"").unwrap();
    assert_eq!(w3, SenderConfig::Web3forms {
      endpoint:   web3forms_endpoint(),
      access_key: "k".into(),
    });

    let ejs: SenderConfig = toml::from_str(
      "kind = \"emailjs\"\nservice_id = \"s\"\ntemplate_id = \"t\"\npublic_key = \"p\"",
    )
    .unwrap();
    let SenderConfig::Emailjs { endpoint, title, .. } = ejs else {
      panic!("expected emailjs");
    };
    assert_eq!(endpoint, emailjs_endpoint());
    assert_eq!(title, "New portfolio message");
  }
}
