//! Error types for `folio-core`.

use thiserror::Error;

use crate::contact::Field;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid colour {0:?}: expected #rrggbb")]
  InvalidColor(String),

  #[error("unknown preset {0:?}")]
  UnknownPreset(String),

  #[error("reading content file: {0}")]
  Io(#[from] std::io::Error),

  #[error("content error: {0}")]
  Content(#[from] toml::de::Error),

  #[error("please fill in the {0} field")]
  MissingField(Field),

  #[error("caption timing {0} must be greater than zero")]
  InvalidTiming(&'static str),

  #[error("a message is already being sent")]
  AlreadySending,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
