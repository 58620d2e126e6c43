//! SVG rendition of the particle backdrop.
//!
//! The browser gets a still frame: the field is seeded, run forward a few
//! seconds' worth of steps, then painted once.

use folio_core::particles::{FieldColors, FieldConfig, ParticleField, Surface};
use rand_core::RngCore;

use crate::{error::Error, html::Markup};

/// Canvas the snapshot is drawn on; the page scales it to cover.
pub const WIDTH: f64 = 1280.0;
pub const HEIGHT: f64 = 720.0;

/// Steps run before painting, so links have had time to form.
const WARM_UP_STEPS: usize = 120;

/// Collects one frame's shapes, then writes them as an SVG document.
#[derive(Debug)]
pub struct SvgSurface {
  width:   f64,
  height:  f64,
  colors:  FieldColors,
  circles: Vec<(f64, f64, f64)>,
  lines:   Vec<((f64, f64), (f64, f64), f64)>,
}

impl SvgSurface {
  pub fn new(width: f64, height: f64, colors: FieldColors) -> Self {
    Self {
      width,
      height,
      colors,
      circles: Vec::new(),
      lines: Vec::new(),
    }
  }

  pub fn finish(self) -> Result<Vec<u8>, Error> {
    let mut m = Markup::new();
    let view_box = format!("0 0 {} {}", self.width, self.height);
    let point = self.colors.point.to_string();
    let link = self.colors.link.to_string();

    m.start("svg", &[
      ("xmlns", "http://www.w3.org/2000/svg"),
      ("viewBox", &view_box),
      ("preserveAspectRatio", "xMidYMid slice"),
    ])?;

    m.start("g", &[("fill", &point)])?;
    for &(x, y, r) in &self.circles {
      let (cx, cy, r) = (fmt(x), fmt(y), fmt(r));
      m.empty("circle", &[("cx", &cx), ("cy", &cy), ("r", &r)])?;
    }
    m.end("g")?;

    m.start("g", &[("stroke", &link), ("stroke-width", "0.5")])?;
    for &((x1, y1), (x2, y2), alpha) in &self.lines {
      let coords = [fmt(x1), fmt(y1), fmt(x2), fmt(y2)];
      let opacity = format!("{alpha:.3}");
      m.empty("line", &[
        ("x1", &coords[0]),
        ("y1", &coords[1]),
        ("x2", &coords[2]),
        ("y2", &coords[3]),
        ("stroke-opacity", &opacity),
      ])?;
    }
    m.end("g")?;

    m.end("svg")?;
    Ok(m.finish())
  }
}

impl Surface for SvgSurface {
  fn clear(&mut self) {
    self.circles.clear();
    self.lines.clear();
  }

  fn fill_circle(&mut self, x: f64, y: f64, radius: f64) { self.circles.push((x, y, radius)); }

  fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), alpha: f64) {
    self.lines.push((from, to, alpha));
  }
}

/// Seed a field from `rng`, warm it up, and paint it as SVG.
pub fn snapshot<R: RngCore>(
  config: FieldConfig,
  colors: FieldColors,
  rng: &mut R,
) -> Result<Vec<u8>, Error> {
  let mut field = ParticleField::new(config, WIDTH, HEIGHT, rng);
  for _ in 0..WARM_UP_STEPS {
    field.step();
  }

  let mut surface = SvgSurface::new(WIDTH, HEIGHT, colors);
  field.render(&mut surface);
  surface.finish()
}

fn fmt(v: f64) -> String { format!("{v:.1}") }
