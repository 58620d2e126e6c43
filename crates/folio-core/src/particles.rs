//! Particle field: the drifting, interconnected points behind the hero.
//!
//! The field owns its points and is advanced by [`ParticleField::step`], once
//! per display refresh. Rendering goes through the [`Surface`] trait so the
//! same field can be drawn onto a terminal canvas or written out as SVG.

use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Tunables for a particle field. Distances are in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
  pub count:       usize,
  pub radius:      f64,
  /// Two points closer than this are joined by a line.
  pub link_length: f64,
  /// Width of the per-axis velocity range, centred on zero.
  pub speed:       f64,
}

impl Default for FieldConfig {
  fn default() -> Self {
    Self {
      count:       70,
      radius:      2.5,
      link_length: 150.0,
      speed:       1.0,
    }
  }
}

// ─── Points ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
  pub x:  f64,
  pub y:  f64,
  pub vx: f64,
  pub vy: f64,
}

/// A line between two points, `a < b`, with opacity `1 - distance / link_length`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
  pub a:     usize,
  pub b:     usize,
  pub alpha: f64,
}

// ─── Surface ─────────────────────────────────────────────────────────────────

/// A drawing target for [`ParticleField::render`].
pub trait Surface {
  fn clear(&mut self);
  fn fill_circle(&mut self, x: f64, y: f64, radius: f64);
  fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), alpha: f64);
}

/// Colours a front-end uses when painting a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldColors {
  pub point: Rgb,
  pub link:  Rgb,
}

// ─── Field ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ParticleField {
  config:    FieldConfig,
  width:     f64,
  height:    f64,
  particles: Vec<Particle>,
}

impl ParticleField {
  /// Scatter `config.count` points uniformly over `[0, width) × [0, height)`.
  pub fn new<R: RngCore>(config: FieldConfig, width: f64, height: f64, rng: &mut R) -> Self {
    let mut field = Self {
      config,
      width: 0.0,
      height: 0.0,
      particles: Vec::with_capacity(config.count),
    };
    field.resize(width, height, rng);
    field
  }

  /// Discard every point and scatter a fresh set over the new dimensions.
  pub fn resize<R: RngCore>(&mut self, width: f64, height: f64, rng: &mut R) {
    self.width = width.max(0.0);
    self.height = height.max(0.0);
    self.particles.clear();
    for _ in 0..self.config.count {
      let particle = Particle {
        x:  unit(rng) * self.width,
        y:  unit(rng) * self.height,
        vx: (unit(rng) - 0.5) * self.config.speed,
        vy: (unit(rng) - 0.5) * self.config.speed,
      };
      self.particles.push(particle);
    }
  }

  pub fn config(&self) -> &FieldConfig { &self.config }

  pub fn width(&self) -> f64 { self.width }

  pub fn height(&self) -> f64 { self.height }

  pub fn particles(&self) -> &[Particle] { &self.particles }

  /// Advance every point by one frame, bouncing off the four edges.
  pub fn step(&mut self) {
    let (w, h) = (self.width, self.height);
    for p in &mut self.particles {
      if !(0.0..=w).contains(&(p.x + p.vx)) {
        p.vx = -p.vx;
      }
      if !(0.0..=h).contains(&(p.y + p.vy)) {
        p.vy = -p.vy;
      }
      p.x = (p.x + p.vx).clamp(0.0, w);
      p.y = (p.y + p.vy).clamp(0.0, h);
    }
  }

  /// Every unordered pair of points closer than `link_length`.
  pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
    let max = self.config.link_length;
    let ps = &self.particles;
    (0..ps.len()).flat_map(move |a| {
      ((a + 1)..ps.len()).filter_map(move |b| {
        let d = distance(&ps[a], &ps[b]);
        (d < max).then(|| Link {
          a,
          b,
          alpha: link_alpha(d, max),
        })
      })
    })
  }

  /// Paint one frame: clear, fill each point, stroke each link.
  pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
    surface.clear();
    for p in &self.particles {
      surface.fill_circle(p.x, p.y, self.config.radius);
    }
    for link in self.links() {
      let (a, b) = (&self.particles[link.a], &self.particles[link.b]);
      surface.stroke_line((a.x, a.y), (b.x, b.y), link.alpha);
    }
  }
}

/// Opacity of a link at `distance`; zero at and beyond `link_length`.
pub fn link_alpha(distance: f64, link_length: f64) -> f64 {
  if link_length <= 0.0 || distance >= link_length {
    return 0.0;
  }
  1.0 - distance / link_length
}

fn distance(a: &Particle, b: &Particle) -> f64 { (b.x - a.x).hypot(b.y - a.y) }

/// Uniform sample in `[0, 1)` built from the top 53 bits of a `u64`.
fn unit<R: RngCore>(rng: &mut R) -> f64 {
  (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use rand_core::{Error as RandError, RngCore, impls};

  use super::*;

  /// Deterministic xorshift generator for reproducible fields.
  struct TestRng(u64);

  impl RngCore for TestRng {
    fn next_u32(&mut self) -> u32 { self.next_u64() as u32 }

    fn next_u64(&mut self) -> u64 {
      let mut x = self.0;
      x ^= x << 13;
      x ^= x >> 7;
      x ^= x << 17;
      self.0 = x;
      x
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) { impls::fill_bytes_via_next(self, dest) }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandError> {
      self.fill_bytes(dest);
      Ok(())
    }
  }

  fn field(count: usize, w: f64, h: f64) -> ParticleField {
    let config = FieldConfig {
      count,
      ..FieldConfig::default()
    };
    ParticleField::new(config, w, h, &mut TestRng(0x9e37_79b9_7f4a_7c15))
  }

  #[derive(Default)]
  struct Recorder {
    clears:  usize,
    circles: Vec<(f64, f64, f64)>,
    lines:   Vec<f64>,
  }

  impl Surface for Recorder {
    fn clear(&mut self) {
      self.clears += 1;
      self.circles.clear();
      self.lines.clear();
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) { self.circles.push((x, y, radius)); }

    fn stroke_line(&mut self, _from: (f64, f64), _to: (f64, f64), alpha: f64) {
      self.lines.push(alpha);
    }
  }

  #[test]
  fn initial_points_lie_inside_the_surface() {
    let f = field(70, 640.0, 480.0);
    assert_eq!(f.particles().len(), 70);
    for p in f.particles() {
      assert!((0.0..640.0).contains(&p.x));
      assert!((0.0..480.0).contains(&p.y));
      assert!(p.vx.abs() <= 0.5 && p.vy.abs() <= 0.5);
    }
  }

  #[test]
  fn points_stay_in_bounds_over_many_frames() {
    let mut f = field(70, 200.0, 120.0);
    for _ in 0..10_000 {
      f.step();
      for p in f.particles() {
        assert!((0.0..=200.0).contains(&p.x), "x escaped: {}", p.x);
        assert!((0.0..=120.0).contains(&p.y), "y escaped: {}", p.y);
      }
    }
  }

  #[test]
  fn points_stay_in_bounds_on_tiny_surfaces() {
    let config = FieldConfig {
      count: 10,
      speed: 8.0,
      ..FieldConfig::default()
    };
    let mut f = ParticleField::new(config, 1.0, 1.0, &mut TestRng(7));
    for _ in 0..500 {
      f.step();
      assert!(f.particles().iter().all(|p| (0.0..=1.0).contains(&p.x)));
      assert!(f.particles().iter().all(|p| (0.0..=1.0).contains(&p.y)));
    }
  }

  #[test]
  fn velocity_reverses_at_the_edge() {
    let mut f = field(1, 10.0, 10.0);
    f.particles[0] = Particle { x: 9.8, y: 5.0, vx: 0.5, vy: 0.0 };
    f.step();
    let p = f.particles()[0];
    assert_eq!(p.vx, -0.5);
    assert!((p.x - 9.3).abs() < 1e-9);
  }

  #[test]
  fn resize_always_keeps_the_configured_count() {
    let mut f = field(42, 100.0, 100.0);
    let mut rng = TestRng(3);
    for (w, h) in [(10.0, 10.0), (1920.0, 1080.0), (0.0, 0.0), (3.0, 500.0)] {
      f.resize(w, h, &mut rng);
      assert_eq!(f.particles().len(), 42);
      assert_eq!((f.width(), f.height()), (w, h));
    }
  }

  #[test]
  fn links_exist_only_below_the_threshold() {
    let mut f = field(3, 500.0, 500.0);
    f.particles[0] = Particle { x: 0.0, y: 0.0, vx: 0.0, vy: 0.0 };
    f.particles[1] = Particle { x: 149.0, y: 0.0, vx: 0.0, vy: 0.0 };
    f.particles[2] = Particle { x: 0.0, y: 150.0, vx: 0.0, vy: 0.0 };

    let links: Vec<_> = f.links().collect();
    assert_eq!(links.len(), 1, "exactly 150 apart must not link: {links:?}");
    assert_eq!((links[0].a, links[0].b), (0, 1));
    assert!((links[0].alpha - 1.0 / 150.0).abs() < 1e-12);
  }

  #[test]
  fn alpha_strictly_decreases_with_distance() {
    let mut last = f64::INFINITY;
    for d in [0.0, 1.0, 37.5, 75.0, 120.0, 149.9] {
      let a = link_alpha(d, 150.0);
      assert!(a < last, "alpha at {d} = {a} not below {last}");
      assert!(a > 0.0);
      last = a;
    }
    assert_eq!(link_alpha(150.0, 150.0), 0.0);
    assert_eq!(link_alpha(200.0, 150.0), 0.0);
  }

  #[test]
  fn render_clears_then_draws_points_and_links() {
    let f = field(12, 300.0, 200.0);
    let mut surface = Recorder::default();
    f.render(&mut surface);
    f.render(&mut surface);

    assert_eq!(surface.clears, 2);
    assert_eq!(surface.circles.len(), 12);
    assert!(surface.circles.iter().all(|&(_, _, r)| r == 2.5));
    assert_eq!(surface.lines.len(), f.links().count());
    assert!(surface.lines.iter().all(|a| *a > 0.0 && *a <= 1.0));
  }
}
