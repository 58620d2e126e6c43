//! sRGB colour value shared by the palettes and the particle renderer.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// An opaque 8-bit sRGB colour, written as `#rrggbb` in config and content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

impl Rgb {
  pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

  /// Composite `self` at `alpha` over `background`.
  ///
  /// Terminals have no per-cell transparency, so faded strokes are drawn as
  /// the pre-blended colour instead.
  pub fn over(self, background: Rgb, alpha: f64) -> Rgb {
    let a = alpha.clamp(0.0, 1.0);
    let mix = |fg: u8, bg: u8| -> u8 {
      (f64::from(fg) * a + f64::from(bg) * (1.0 - a)).round() as u8
    };
    Rgb {
      r: mix(self.r, background.r),
      g: mix(self.g, background.g),
      b: mix(self.b, background.b),
    }
  }
}

impl fmt::Display for Rgb {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
  }
}

impl FromStr for Rgb {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || Error::InvalidColor(s.to_string());
    let hex = s.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
      return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(Rgb {
      r: channel(0)?,
      g: channel(2)?,
      b: channel(4)?,
    })
  }
}

impl Serialize for Rgb {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for Rgb {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_and_prints_hex() {
    let c: Rgb = "#a78bfa".parse().unwrap();
    assert_eq!(c, Rgb::new(0xa7, 0x8b, 0xfa));
    assert_eq!(c.to_string(), "#a78bfa");
  }

  #[test]
  fn rejects_malformed_hex() {
    for bad in ["a78bfa", "#a78bf", "#a78bfz", "#ééé"] {
      assert!(bad.parse::<Rgb>().is_err(), "{bad} should not parse");
    }
  }

  #[test]
  fn over_blends_toward_background() {
    let white = Rgb::new(255, 255, 255);
    let black = Rgb::new(0, 0, 0);
    assert_eq!(white.over(black, 1.0), white);
    assert_eq!(white.over(black, 0.0), black);
    assert_eq!(white.over(black, 0.5), Rgb::new(128, 128, 128));
  }
}
