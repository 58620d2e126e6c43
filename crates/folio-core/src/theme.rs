//! Themes: a palette plus the effects a page carries.
//!
//! A [`Theme`] enumerates every swappable choice of the page: palette, caption
//! style, background decoration, scroll indicator and form validation. The
//! submission backend is chosen separately by
//! [`SenderConfig`](crate::contact::SenderConfig) since it carries credentials.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
  Error,
  caption::CaptionStyle,
  color::Rgb,
  particles::{FieldColors, FieldConfig},
  scroll::SpringConfig,
};

// ─── Palette ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
  pub background: Rgb,
  pub surface:    Rgb,
  pub text:       Rgb,
  pub muted:      Rgb,
  pub accent:     Rgb,
  pub accent_alt: Rgb,
  pub particle:   Rgb,
  pub link:       Rgb,
  pub success:    Rgb,
  pub failure:    Rgb,
}

impl Palette {
  pub fn field_colors(&self) -> FieldColors {
    FieldColors {
      point: self.particle,
      link:  self.link,
    }
  }
}

// ─── Theme ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
  pub preset:         Preset,
  pub palette:        Palette,
  pub caption:        CaptionStyle,
  /// Particle field behind the hero; `None` leaves the background plain.
  pub backdrop:       Option<FieldConfig>,
  /// Spring for the timeline marker; `None` hides the marker.
  pub indicator:      Option<SpringConfig>,
  /// Refuse to send while any field is empty.
  pub require_fields: bool,
}

impl Theme {
  /// Dark palette, particle backdrop, rotating roles.
  pub fn nebula() -> Self {
    Self {
      preset:         Preset::Nebula,
      palette:        Palette {
        background: Rgb::new(0x0b, 0x0b, 0x15),
        surface:    Rgb::new(0x11, 0x18, 0x27),
        text:       Rgb::new(0xff, 0xff, 0xff),
        muted:      Rgb::new(0x9c, 0xa3, 0xaf),
        accent:     Rgb::new(0x81, 0x8c, 0xf8),
        accent_alt: Rgb::new(0xc0, 0x84, 0xfc),
        particle:   Rgb::new(0xa7, 0x8b, 0xfa),
        link:       Rgb::new(0x8b, 0x5c, 0xf6),
        success:    Rgb::new(0x4a, 0xde, 0x80),
        failure:    Rgb::new(0xf8, 0x71, 0x71),
      },
      caption:        CaptionStyle::rotate(Duration::from_millis(2500)),
      backdrop:       Some(FieldConfig::default()),
      indicator:      None,
      require_fields: true,
    }
  }

  /// Pastel palette, typed caption, scroll-synchronised timeline marker.
  pub fn pastel() -> Self {
    Self {
      preset:         Preset::Pastel,
      palette:        Palette {
        background: Rgb::new(0xf8, 0xfa, 0xfd),
        surface:    Rgb::new(0xfd, 0xf6, 0xf0),
        text:       Rgb::new(0x1e, 0x29, 0x3b),
        muted:      Rgb::new(0x64, 0x74, 0x8b),
        accent:     Rgb::new(0xe0, 0xc3, 0xfc),
        accent_alt: Rgb::new(0xff, 0xd6, 0xe0),
        particle:   Rgb::new(0xd0, 0xeb, 0xff),
        link:       Rgb::new(0xe0, 0xc3, 0xfc),
        success:    Rgb::new(0x16, 0xa3, 0x4a),
        failure:    Rgb::new(0xdc, 0x26, 0x26),
      },
      caption:        CaptionStyle::Typewriter {
        char_ms: 80,
        hold_ms: 1500,
      },
      backdrop:       None,
      indicator:      Some(SpringConfig::default()),
      require_fields: false,
    }
  }

  /// Apply config-file overrides on top of this theme.
  pub fn with_overrides(mut self, overrides: &ThemeOverrides) -> Self {
    if let Some(caption) = overrides.caption {
      self.caption = caption;
    }
    if let Some(backdrop) = &overrides.backdrop {
      self.backdrop = backdrop.enabled.then_some(backdrop.field);
    }
    if let Some(indicator) = &overrides.indicator {
      self.indicator = indicator.enabled.then_some(indicator.spring);
    }
    if let Some(require) = overrides.require_fields {
      self.require_fields = require;
    }
    self
  }
}

impl Default for Theme {
  fn default() -> Self { Self::nebula() }
}

// ─── Presets ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
  #[default]
  Nebula,
  Pastel,
}

impl Preset {
  pub fn theme(self) -> Theme {
    match self {
      Preset::Nebula => Theme::nebula(),
      Preset::Pastel => Theme::pastel(),
    }
  }
}

impl fmt::Display for Preset {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Preset::Nebula => "nebula",
      Preset::Pastel => "pastel",
    })
  }
}

impl FromStr for Preset {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "nebula" => Ok(Preset::Nebula),
      "pastel" => Ok(Preset::Pastel),
      _ => Err(Error::UnknownPreset(s.to_string())),
    }
  }
}

// ─── Overrides ───────────────────────────────────────────────────────────────

/// Optional `[theme]` table in a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeOverrides {
  pub caption:        Option<CaptionStyle>,
  pub backdrop:       Option<BackdropOverride>,
  pub indicator:      Option<IndicatorOverride>,
  pub require_fields: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackdropOverride {
  #[serde(default = "enabled")]
  pub enabled: bool,
  #[serde(flatten)]
  pub field:   FieldConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorOverride {
  #[serde(default = "enabled")]
  pub enabled: bool,
  #[serde(flatten)]
  pub spring:  SpringConfig,
}

fn enabled() -> bool { true }

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn presets_differ_in_every_swappable_choice() {
    let (a, b) = (Theme::nebula(), Theme::pastel());
    assert_ne!(a.palette, b.palette);
    assert_ne!(a.caption, b.caption);
    assert!(a.backdrop.is_some() && b.backdrop.is_none());
    assert!(a.indicator.is_none() && b.indicator.is_some());
    assert!(a.require_fields && !b.require_fields);
  }

  #[test]
  fn preset_names_round_trip() {
    for preset in [Preset::Nebula, Preset::Pastel] {
      assert_eq!(preset.to_string().parse::<Preset>().unwrap(), preset);
    }
    assert_eq!("PASTEL".parse::<Preset>().unwrap(), Preset::Pastel);
    assert!("neon".parse::<Preset>().is_err());
  }

  #[test]
  fn overrides_from_toml() {
    let raw = r#"
      require_fields = false

      [caption]
      style = "typewriter"
      char_ms = 50
      hold_ms = 900

      [backdrop]
      count = 30
      link_length = 24.0

      [indicator]
      enabled = false
    "#;
    let overrides: ThemeOverrides = toml::from_str(raw).unwrap();
    let theme = Theme::nebula().with_overrides(&overrides);

    assert_eq!(
      theme.caption,
      CaptionStyle::Typewriter {
        char_ms: 50,
        hold_ms: 900,
      }
    );
    let field = theme.backdrop.unwrap();
    assert_eq!(field.count, 30);
    assert_eq!(field.link_length, 24.0);
    assert_eq!(field.radius, FieldConfig::default().radius);
    assert!(theme.indicator.is_none());
    assert!(!theme.require_fields);
  }

  #[test]
  fn empty_overrides_change_nothing() {
    let theme = Theme::pastel().with_overrides(&ThemeOverrides::default());
    assert_eq!(theme, Theme::pastel());
  }
}
