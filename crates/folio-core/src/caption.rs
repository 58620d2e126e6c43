//! Hero caption cursor: the role line under the name.
//!
//! Two styles exist: a rotation that shows one entry at a time and wraps
//! forever, and a typewriter that reveals entries character by character and
//! halts once the last one is complete.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Style ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case", try_from = "RawStyle")]
pub enum CaptionStyle {
  /// Show each entry for `interval_ms`, then the next; wraps at the end.
  /// The interval is never zero.
  Rotate { interval_ms: u64 },
  /// Reveal one character per `char_ms`, hold a finished entry for
  /// `hold_ms`, stop after the last entry. Zero timings are instant.
  Typewriter { char_ms: u64, hold_ms: u64 },
}

/// Unchecked shape of a configured caption style.
#[derive(Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
enum RawStyle {
  Rotate { interval_ms: u64 },
  Typewriter { char_ms: u64, hold_ms: u64 },
}

impl TryFrom<RawStyle> for CaptionStyle {
  type Error = Error;

  fn try_from(raw: RawStyle) -> Result<Self, Self::Error> {
    match raw {
      RawStyle::Rotate { interval_ms: 0 } => Err(Error::InvalidTiming("interval_ms")),
      RawStyle::Rotate { interval_ms } => Ok(Self::Rotate { interval_ms }),
      RawStyle::Typewriter { char_ms, hold_ms } => Ok(Self::Typewriter { char_ms, hold_ms }),
    }
  }
}

impl CaptionStyle {
  pub const fn rotate(interval: Duration) -> Self {
    Self::Rotate {
      interval_ms: interval.as_millis() as u64,
    }
  }
}

// ─── Cursor ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
  Rotating { index: usize },
  Typing { index: usize, chars: usize },
  Holding { index: usize },
  Halted { index: usize },
}

/// Caption state owned by one page instance and advanced by elapsed time.
#[derive(Debug, Clone)]
pub struct Caption {
  entries: Vec<String>,
  style:   CaptionStyle,
  cursor:  Cursor,
  /// Time accumulated toward the next cursor move.
  pending: Duration,
}

impl Caption {
  pub fn new(entries: Vec<String>, style: CaptionStyle) -> Self {
    let cursor = match style {
      CaptionStyle::Rotate { .. } => Cursor::Rotating { index: 0 },
      CaptionStyle::Typewriter { .. } => Cursor::Typing { index: 0, chars: 0 },
    };
    Self {
      entries,
      style,
      cursor,
      pending: Duration::ZERO,
    }
  }

  pub fn style(&self) -> CaptionStyle { self.style }

  pub fn entries(&self) -> &[String] { &self.entries }

  /// Index of the entry currently shown.
  pub fn index(&self) -> usize {
    match self.cursor {
      Cursor::Rotating { index }
      | Cursor::Typing { index, .. }
      | Cursor::Holding { index }
      | Cursor::Halted { index } => index,
    }
  }

  /// The visible caption text.
  pub fn text(&self) -> &str {
    let Some(entry) = self.entries.get(self.index()) else {
      return "";
    };
    match self.cursor {
      Cursor::Typing { chars, .. } => {
        let end = entry
          .char_indices()
          .nth(chars)
          .map_or(entry.len(), |(i, _)| i);
        &entry[..end]
      }
      _ => entry,
    }
  }

  pub fn is_halted(&self) -> bool { matches!(self.cursor, Cursor::Halted { .. }) }

  /// Feed elapsed time; returns `true` if the visible text changed.
  pub fn advance(&mut self, dt: Duration) -> bool {
    if self.entries.is_empty() || self.is_halted() {
      return false;
    }
    self.pending += dt;
    let mut changed = false;
    while let Some(wait) = self.wait() {
      if self.pending < wait {
        break;
      }
      // A zero-length rotation would spin forever.
      if wait.is_zero() && matches!(self.cursor, Cursor::Rotating { .. }) {
        break;
      }
      self.pending -= wait;
      self.tick();
      changed = true;
      if self.is_halted() {
        self.pending = Duration::ZERO;
        break;
      }
    }
    changed
  }

  /// Time the current cursor position stays on screen.
  fn wait(&self) -> Option<Duration> {
    match (self.style, &self.cursor) {
      (CaptionStyle::Rotate { interval_ms }, _) => Some(Duration::from_millis(interval_ms)),
      (CaptionStyle::Typewriter { char_ms, .. }, Cursor::Typing { .. }) => {
        Some(Duration::from_millis(char_ms))
      }
      (CaptionStyle::Typewriter { hold_ms, .. }, Cursor::Holding { .. }) => {
        Some(Duration::from_millis(hold_ms))
      }
      _ => None,
    }
  }

  fn tick(&mut self) {
    let len = self.entries.len();
    self.cursor = match self.cursor {
      Cursor::Rotating { index } => Cursor::Rotating {
        index: (index + 1) % len,
      },
      Cursor::Typing { index, chars } => {
        let total = self.entries[index].chars().count();
        let chars = (chars + 1).min(total);
        if chars < total {
          Cursor::Typing { index, chars }
        } else if index + 1 == len {
          Cursor::Halted { index }
        } else {
          Cursor::Holding { index }
        }
      }
      Cursor::Holding { index } => Cursor::Typing {
        index: index + 1,
        chars: 0,
      },
      Cursor::Halted { index } => Cursor::Halted { index },
    };
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
