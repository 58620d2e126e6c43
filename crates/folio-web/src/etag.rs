//! Entity tags for rendered pages.
//!
//! A page's ETag is the SHA-256 of its bytes, hex-encoded and quoted.

use axum::http::{HeaderMap, header};
use sha2::{Digest, Sha256};

/// Quoted strong ETag for `body`.
pub fn compute_etag(body: &[u8]) -> String {
  let hash = Sha256::digest(body);
  format!("\"{}\"", hex::encode(hash))
}

/// Whether the request's `If-None-Match` already names `etag`.
///
/// Handles `*`, comma-separated lists and weak (`W/`) validators.
pub fn not_modified(headers: &HeaderMap, etag: &str) -> bool {
  let Some(value) = headers
    .get(header::IF_NONE_MATCH)
    .and_then(|v| v.to_str().ok())
  else {
    return false;
  };

  value.split(',').map(str::trim).any(|candidate| {
    candidate == "*"
      || strip_etag_quotes(candidate.trim_start_matches("W/"))
        == strip_etag_quotes(etag)
  })
}

fn strip_etag_quotes(s: &str) -> &str { s.trim_matches('"') }
