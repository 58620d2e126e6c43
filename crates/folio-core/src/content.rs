//! Page content: who the portfolio is about and what it shows.
//!
//! Content is plain data loaded from TOML. A default profile is compiled in;
//! deployments point `content` at their own file.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Result, color::Rgb};

const BUNDLED: &str = include_str!("../content/profile.toml");

/// In-page anchors, in navigation order.
pub const ANCHORS: [&str; 3] = ["about", "projects", "contact"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
  pub name:     String,
  /// Brand mark shown in the header (e.g. `"YP."`).
  pub initials: String,
  pub badge:    String,
  /// Caption entries under the name, in display order.
  pub roles:    Vec<String>,
  pub intro:    String,
  /// Public path of the portrait image.
  pub portrait: String,
  /// Public path of the résumé document.
  pub resume:   String,
  /// "Full archive" link above the project grid.
  pub archive:  String,
  pub quote:    String,
  #[serde(default)]
  pub tech:     Vec<String>,
  pub focus:    Focus,
  pub contact:  ContactCard,
  #[serde(default)]
  pub socials:  Vec<Social>,
  #[serde(default)]
  pub timeline: Vec<TimelineEntry>,
  #[serde(default)]
  pub projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Focus {
  pub title: String,
  pub body:  String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactCard {
  pub headline: String,
  pub pitch:    String,
  pub email:    String,
  pub phone:    Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Social {
  pub label: String,
  pub url:   String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
  /// Free-form period, e.g. `"2022 – 2026"`.
  pub period: String,
  pub title:  String,
  pub org:    String,
  pub body:   String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
  pub title:    String,
  pub category: String,
  pub body:     String,
  #[serde(default)]
  pub tech:     Vec<String>,
  pub repo:     String,
  /// Accent gradient, start to end.
  pub gradient: [Rgb; 2],
}

impl Profile {
  pub fn from_toml_str(raw: &str) -> Result<Self> { Ok(toml::from_str(raw)?) }

  /// The profile compiled into the binary.
  pub fn bundled() -> Result<Self> { Self::from_toml_str(BUNDLED) }

  /// Read a profile from `path`, or the bundled one when `path` is `None`.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    match path {
      Some(path) => Self::from_toml_str(&fs::read_to_string(path)?),
      None => Self::bundled(),
    }
  }

  /// `mailto:` link for the contact address.
  pub fn mailto(&self) -> String { format!("mailto:{}", self.contact.email) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bundled_profile_parses() {
    let p = Profile::bundled().unwrap();
    assert_eq!(p.name, "Yokisha Poudel");
    assert_eq!(p.roles.len(), 3);
    assert_eq!(p.timeline.len(), 3);
    assert_eq!(p.projects.len(), 4);
    assert_eq!(p.tech.len(), 8);
    assert_eq!(p.projects[0].gradient[0], Rgb::new(0xec, 0x48, 0x99));
    assert_eq!(p.mailto(), "mailto:yokishaa.poudel@gmail.com");
  }

  #[test]
  fn bad_gradient_is_a_content_error() {
    let raw = include_str!("../content/profile.toml").replace("#ec4899", "pink");
    let err = Profile::from_toml_str(&raw).unwrap_err();
    assert!(err.to_string().contains("pink"), "{err}");
  }
}
