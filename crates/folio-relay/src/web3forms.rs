//! Web3Forms: JSON form relay keyed by an access key.
//!
//! `POST {endpoint}` with `{"access_key", "name", "email", "message"}`; the
//! reply is `{"success": bool, "message": string}` whatever the HTTP status.

use std::fmt;

use folio_core::contact::{Message, SendError};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::classify;

#[derive(Clone)]
pub struct Web3Forms {
  client:     Client,
  endpoint:   String,
  access_key: String,
}

#[derive(Serialize)]
struct Submission<'a> {
  access_key: &'a str,
  name:       &'a str,
  email:      &'a str,
  message:    &'a str,
}

#[derive(Deserialize)]
struct Ack {
  success: bool,
  #[serde(default)]
  message: String,
}

impl Web3Forms {
  pub fn new(client: Client, endpoint: &str, access_key: &str) -> Self {
    Self {
      client,
      endpoint: endpoint.to_string(),
      access_key: access_key.to_string(),
    }
  }

  pub async fn deliver(&self, message: &Message) -> Result<(), SendError> {
    let body = Submission {
      access_key: &self.access_key,
      name:       &message.name,
      email:      &message.email,
      message:    &message.message,
    };
    tracing::debug!(endpoint = %self.endpoint, "POST web3forms submission");

    let resp = self
      .client
      .post(&self.endpoint)
      .json(&body)
      .send()
      .await
      .map_err(classify)?;
    let status = resp.status();
    let ack: Ack = resp.json().await.map_err(classify)?;

    if ack.success {
      Ok(())
    } else {
      tracing::debug!(%status, reason = %ack.message, "web3forms refused submission");
      Err(SendError::Rejected(ack.message))
    }
  }
}

impl fmt::Debug for Web3Forms {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Web3Forms")
      .field("endpoint", &self.endpoint)
      .field("access_key", &"<redacted>")
      .finish()
  }
}
