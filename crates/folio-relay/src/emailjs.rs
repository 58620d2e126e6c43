//! EmailJS: template-based delivery through the public REST endpoint.
//!
//! `POST {endpoint}` with the service, template and public key plus the
//! template parameters. Any 2xx means delivered; otherwise the body carries a
//! plain-text reason.

use std::fmt;

use folio_core::contact::{Message, SendError};
use reqwest::Client;
use serde::Serialize;

use crate::classify;

#[derive(Clone)]
pub struct EmailJs {
  client:      Client,
  endpoint:    String,
  service_id:  String,
  template_id: String,
  public_key:  String,
  title:       String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
  service_id:      &'a str,
  template_id:     &'a str,
  user_id:         &'a str,
  template_params: TemplateParams<'a>,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
  title:   &'a str,
  name:    &'a str,
  email:   &'a str,
  message: &'a str,
}

impl EmailJs {
  pub fn new(
    client: Client,
    endpoint: &str,
    service_id: &str,
    template_id: &str,
    public_key: &str,
    title: &str,
  ) -> Self {
    Self {
      client,
      endpoint: endpoint.to_string(),
      service_id: service_id.to_string(),
      template_id: template_id.to_string(),
      public_key: public_key.to_string(),
      title: title.to_string(),
    }
  }

  pub async fn deliver(&self, message: &Message) -> Result<(), SendError> {
    let body = SendRequest {
      service_id:      &self.service_id,
      template_id:     &self.template_id,
      user_id:         &self.public_key,
      template_params: TemplateParams {
        title:   &self.title,
        name:    &message.name,
        email:   &message.email,
        message: &message.message,
      },
    };
    tracing::debug!(endpoint = %self.endpoint, template = %self.template_id, "POST emailjs send");

    let resp = self
      .client
      .post(&self.endpoint)
      .json(&body)
      .send()
      .await
      .map_err(classify)?;

    let status = resp.status();
    if status.is_success() {
      return Ok(());
    }
    let reason = resp.text().await.unwrap_or_default();
    Err(SendError::Rejected(format!("{status}: {reason}")))
  }
}

impl fmt::Debug for EmailJs {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("EmailJs")
      .field("endpoint", &self.endpoint)
      .field("service_id", &self.service_id)
      .field("template_id", &self.template_id)
      .finish_non_exhaustive()
  }
}
