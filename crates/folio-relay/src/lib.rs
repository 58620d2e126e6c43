//! Email relay backends for the Folio contact form.
//!
//! Each backend implements [`folio_core::contact::MessageSender`] over
//! [`reqwest`]. [`Relay::from_config`] picks one from a
//! [`SenderConfig`]; callers hold a `Relay` and never branch on the backend.

mod emailjs;
mod web3forms;

pub mod error;

use std::{future::Future, time::Duration};

use folio_core::contact::{Message, MessageSender, SendError, SenderConfig};
use reqwest::Client;

pub use emailjs::EmailJs;
pub use error::{Error, Result};
pub use web3forms::Web3Forms;

/// Upper bound on one outbound attempt.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The configured relay.
///
/// The inner [`reqwest::Client`] is `Arc`-based; clones share it.
#[derive(Debug, Clone)]
pub enum Relay {
  Web3Forms(Web3Forms),
  EmailJs(EmailJs),
}

impl Relay {
  pub fn from_config(config: &SenderConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(REQUEST_TIMEOUT)
      .build()
      .map_err(Error::Client)?;

    match config {
      SenderConfig::Web3forms {
        endpoint,
        access_key,
      } => {
        if access_key.is_empty() {
          tracing::warn!("web3forms access key is empty; the relay will reject submissions");
        }
        Ok(Relay::Web3Forms(Web3Forms::new(client, endpoint, access_key)))
      }
      SenderConfig::Emailjs {
        endpoint,
        service_id,
        template_id,
        public_key,
        title,
      } => {
        for (key, value) in [
          ("service_id", service_id),
          ("template_id", template_id),
          ("public_key", public_key),
        ] {
          if value.is_empty() {
            return Err(Error::MissingSetting(key));
          }
        }
        Ok(Relay::EmailJs(EmailJs::new(
          client,
          endpoint,
          service_id,
          template_id,
          public_key,
          title,
        )))
      }
    }
  }

  /// Short backend name for logs.
  pub fn kind(&self) -> &'static str {
    match self {
      Relay::Web3Forms(_) => "web3forms",
      Relay::EmailJs(_) => "emailjs",
    }
  }
}

impl MessageSender for Relay {
  fn send<'a>(
    &'a self,
    message: &'a Message,
  ) -> impl Future<Output = Result<(), SendError>> + Send + 'a {
    async move {
      let outcome = match self {
        Relay::Web3Forms(r) => r.deliver(message).await,
        Relay::EmailJs(r) => r.deliver(message).await,
      };
      match &outcome {
        Ok(()) => tracing::info!(relay = self.kind(), "message delivered"),
        Err(e) => tracing::warn!(relay = self.kind(), error = %e, "message not delivered"),
      }
      outcome
    }
  }
}

/// Classify a [`reqwest::Error`] raised while talking to a relay.
pub(crate) fn classify(e: reqwest::Error) -> SendError {
  if e.is_decode() {
    SendError::Unexpected(e.to_string())
  } else {
    SendError::Transport(e.to_string())
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
