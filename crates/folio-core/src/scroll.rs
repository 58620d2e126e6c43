//! Scroll-synchronised indicator.
//!
//! [`progress`] turns a viewport position into how far a region has been read;
//! [`Indicator`] chases that value with a mass-spring-damper so the marker
//! glides instead of snapping.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Longest integration step; longer frame gaps are split into sub-steps.
const MAX_SUBSTEP: f64 = 1.0 / 120.0;

// ─── Geometry ────────────────────────────────────────────────────────────────

/// A vertical span in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
  pub top:    f64,
  pub height: f64,
}

impl Span {
  pub fn new(top: f64, height: f64) -> Self { Self { top, height } }
}

/// Fraction of `region` the `viewport` has travelled through, in `[0, 1]`.
///
/// 0 while the viewport top is at or above the region top, 1 once the
/// viewport bottom reaches the region bottom. A region that fits entirely in
/// the viewport is fully read.
pub fn progress(region: Span, viewport: Span) -> f64 {
  let travel = region.height - viewport.height;
  if travel <= 0.0 {
    return 1.0;
  }
  ((viewport.top - region.top) / travel).clamp(0.0, 1.0)
}

// ─── Spring ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
  pub stiffness:  f64,
  pub damping:    f64,
  pub mass:       f64,
  /// Below this distance (and speed) the marker snaps to rest.
  pub rest_delta: f64,
}

impl Default for SpringConfig {
  fn default() -> Self {
    Self {
      stiffness:  100.0,
      damping:    30.0,
      mass:       1.0,
      rest_delta: 0.001,
    }
  }
}

/// A marker whose position follows scroll progress through a spring.
#[derive(Debug, Clone, PartialEq)]
pub struct Indicator {
  spring:   SpringConfig,
  position: f64,
  velocity: f64,
}

impl Indicator {
  pub fn new(spring: SpringConfig) -> Self {
    Self {
      spring,
      position: 0.0,
      velocity: 0.0,
    }
  }

  /// Smoothed progress in `[0, 1]`.
  pub fn position(&self) -> f64 { self.position }

  /// Marker offset as a percentage of the rail.
  pub fn percent(&self) -> f64 { (self.position * 100.0).clamp(0.0, 100.0) }

  pub fn is_at_rest(&self) -> bool { self.velocity == 0.0 }

  /// Advance the spring by `dt` toward `target`.
  ///
  /// `None` means the tracked region is not mounted; the marker stays put.
  pub fn update(&mut self, target: Option<f64>, dt: Duration) -> f64 {
    let Some(target) = target else {
      return self.position;
    };
    let target = target.clamp(0.0, 1.0);
    let SpringConfig {
      stiffness,
      damping,
      mass,
      rest_delta,
    } = self.spring;
    let mass = mass.max(f64::EPSILON);

    let mut remaining = dt.as_secs_f64();
    while remaining > 0.0 {
      let h = remaining.min(MAX_SUBSTEP);
      remaining -= h;

      let force = -stiffness * (self.position - target) - damping * self.velocity;
      self.velocity += force / mass * h;
      self.position += self.velocity * h;

      if (self.position - target).abs() < rest_delta && self.velocity.abs() < rest_delta {
        self.position = target;
        self.velocity = 0.0;
        break;
      }
    }
    self.position
  }
}

impl Default for Indicator {
  fn default() -> Self { Self::new(SpringConfig::default()) }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
