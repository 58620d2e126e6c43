//! Error type for `folio-relay`.

use thiserror::Error;

/// Raised while building a relay; delivery failures are
/// [`SendError`](folio_core::contact::SendError)s instead.
#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("sender setting `{0}` must not be empty")]
  MissingSetting(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
