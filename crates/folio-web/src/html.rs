//! HTML generation for the portfolio page.
//!
//! Uses `quick-xml`'s writer API; every text node and attribute value is
//! escaped by the writer.

use std::{fmt::Write as _, io::Cursor};

use folio_core::{
  caption::CaptionStyle,
  contact::{Draft, Field, Status},
  content::{ANCHORS, Profile},
  theme::{Palette, Theme},
};
use quick_xml::{
  Writer,
  events::{BytesEnd, BytesStart, BytesText, Event},
};

use crate::error::Error;

// ─── Markup writer ───────────────────────────────────────────────────────────

/// Thin wrapper over a `quick-xml` writer that reports failures as
/// [`Error::Render`].
pub(crate) struct Markup {
  w: Writer<Cursor<Vec<u8>>>,
}

impl Markup {
  pub(crate) fn new() -> Self {
    Self {
      w: Writer::new(Cursor::new(Vec::new())),
    }
  }

  fn emit(&mut self, event: Event<'_>) -> Result<(), Error> {
    self
      .w
      .write_event(event)
      .map_err(|e| Error::Render(e.to_string()))
  }

  pub(crate) fn doctype(&mut self) -> Result<(), Error> {
    self.emit(Event::DocType(BytesText::from_escaped("html")))
  }

  pub(crate) fn start(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<(), Error> {
    let el = BytesStart::new(tag).with_attributes(attrs.iter().copied());
    self.emit(Event::Start(el))
  }

  pub(crate) fn end(&mut self, tag: &str) -> Result<(), Error> {
    self.emit(Event::End(BytesEnd::new(tag)))
  }

  pub(crate) fn empty(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<(), Error> {
    let el = BytesStart::new(tag).with_attributes(attrs.iter().copied());
    self.emit(Event::Empty(el))
  }

  pub(crate) fn text(&mut self, text: &str) -> Result<(), Error> {
    self.emit(Event::Text(BytesText::new(text)))
  }

  /// `<tag attrs>text</tag>`
  pub(crate) fn elem(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) -> Result<(), Error> {
    self.start(tag, attrs)?;
    self.text(text)?;
    self.end(tag)
  }

  pub(crate) fn finish(self) -> Vec<u8> { self.w.into_inner().into_inner() }
}

// ─── View ────────────────────────────────────────────────────────────────────

/// Contact-form state to render.
#[derive(Debug, Clone, Copy)]
pub struct FormView<'a> {
  pub draft:  &'a Draft,
  pub status: &'a Status,
  /// Validation message, shown instead of the status line.
  pub notice: Option<&'a str>,
}

/// Everything the page depends on.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
  pub profile: &'a Profile,
  pub theme:   &'a Theme,
  pub form:    FormView<'a>,
  /// Year shown in the footer.
  pub year:    i32,
}

/// Render the whole page.
pub fn render_page(view: &PageView<'_>) -> Result<Vec<u8>, Error> {
  let mut m = Markup::new();
  let body_class = format!("theme-{}", view.theme.preset);

  m.doctype()?;
  m.start("html", &[("lang", "en")])?;
  head(&mut m, view)?;
  m.start("body", &[("class", &body_class)])?;

  if view.theme.backdrop.is_some() {
    m.empty("img", &[
      ("class", "backdrop"),
      ("src", "/backdrop.svg"),
      ("alt", ""),
      ("aria-hidden", "true"),
    ])?;
  }

  nav(&mut m, view.profile)?;
  m.start("main", &[])?;
  hero(&mut m, view)?;
  about(&mut m, view)?;
  projects(&mut m, view.profile)?;
  contact(&mut m, view)?;
  m.end("main")?;
  footer(&mut m, view)?;

  m.end("body")?;
  m.end("html")?;
  Ok(m.finish())
}

fn head(m: &mut Markup, view: &PageView<'_>) -> Result<(), Error> {
  let title = format!("{} | Portfolio", view.profile.name);
  let inline = inline_style(&view.theme.palette, view.theme.caption, view.profile.roles.len());

  m.start("head", &[])?;
  m.empty("meta", &[("charset", "utf-8")])?;
  m.empty("meta", &[
    ("name", "viewport"),
    ("content", "width=device-width, initial-scale=1"),
  ])?;
  m.elem("title", &[], &title)?;
  m.empty("meta", &[("name", "description"), ("content", &view.profile.intro)])?;
  m.empty("link", &[("rel", "stylesheet"), ("href", "/site.css")])?;
  m.elem("style", &[], &inline)?;
  m.end("head")
}

fn nav(m: &mut Markup, profile: &Profile) -> Result<(), Error> {
  m.start("nav", &[("class", "nav")])?;
  m.elem("a", &[("class", "brand"), ("href", "#top")], &profile.initials)?;
  m.start("div", &[("class", "nav-links")])?;
  for anchor in ANCHORS {
    let href = format!("#{anchor}");
    m.elem("a", &[("href", &href)], &title_case(anchor))?;
  }
  m.elem("a", &[("class", "button"), ("href", &profile.resume), ("download", "")], "Resume")?;
  m.end("div")?;
  m.end("nav")
}

// ─── Hero ────────────────────────────────────────────────────────────────────

fn hero(m: &mut Markup, view: &PageView<'_>) -> Result<(), Error> {
  let profile = view.profile;

  m.start("section", &[("class", "hero"), ("id", "top")])?;
  m.start("div", &[("class", "hero-copy")])?;
  m.elem("span", &[("class", "badge")], &profile.badge)?;

  m.start("h1", &[])?;
  m.text("Hi, I'm ")?;
  m.elem("span", &[("class", "name")], &profile.name)?;
  m.end("h1")?;

  m.start("p", &[("class", "caption-line")])?;
  m.text("I am a ")?;
  caption(m, view.theme.caption, &profile.roles)?;
  m.end("p")?;

  m.elem("p", &[("class", "intro")], &profile.intro)?;

  m.start("div", &[("class", "actions")])?;
  m.elem("a", &[("class", "button"), ("href", "#projects")], "View Projects")?;
  m.elem("a", &[("class", "button ghost"), ("href", &profile.resume), ("download", "")], "Download CV")?;
  m.end("div")?;
  socials(m, profile)?;
  m.end("div")?;

  m.start("figure", &[("class", "portrait")])?;
  m.empty("img", &[("src", &profile.portrait), ("alt", &profile.name)])?;
  m.end("figure")?;
  m.end("section")?;

  marquee(m, &profile.tech)
}

/// The cycling line under the name. Timing is pure CSS: a generated
/// keyframe for rotation, per-entry delays for the typewriter.
fn caption(m: &mut Markup, style: CaptionStyle, roles: &[String]) -> Result<(), Error> {
  let class = match style {
    CaptionStyle::Rotate { .. } => "caption caption-rotate",
    CaptionStyle::Typewriter { .. } => "caption caption-type",
  };
  let styles = caption_timings(style, roles);

  m.start("span", &[("class", class), ("aria-label", &roles.join(", "))])?;
  for (role, css) in roles.iter().zip(&styles) {
    m.elem("span", &[("style", css), ("aria-hidden", "true")], role)?;
  }
  m.end("span")
}

/// Inline `style` for each caption entry.
pub(crate) fn caption_timings(style: CaptionStyle, roles: &[String]) -> Vec<String> {
  let n = roles.len();
  match style {
    CaptionStyle::Rotate { .. } if n <= 1 => vec![String::new(); n],
    CaptionStyle::Rotate { interval_ms } => {
      let cycle = interval_ms * n as u64;
      (0..n)
        .map(|i| {
          // Entry `i` is visible during [i, i+1) intervals of each cycle.
          let delay = if i == 0 {
            0
          } else {
            -(((n - i) as u64 * interval_ms) as i64)
          };
          format!("animation:caption-rotate {cycle}ms linear {delay}ms infinite")
        })
        .collect()
    }
    CaptionStyle::Typewriter { char_ms, hold_ms } => {
      let mut start = 0;
      roles
        .iter()
        .enumerate()
        .map(|(i, role)| {
          let chars = role.chars().count().max(1) as u64;
          let typing = chars * char_ms;
          let mut css = format!(
            "--chars:{chars}ch;animation:caption-type {typing}ms steps({chars}) {start}ms forwards"
          );
          if i + 1 < n {
            let _ = write!(css, ",caption-clear 1ms linear {}ms forwards", start + typing + hold_ms);
          }
          start += typing + hold_ms;
          css
        })
        .collect()
    }
  }
}

fn marquee(m: &mut Markup, tech: &[String]) -> Result<(), Error> {
  if tech.is_empty() {
    return Ok(());
  }
  m.start("div", &[("class", "marquee")])?;
  m.start("div", &[("class", "marquee-track")])?;
  // Two copies so the scroll loops seamlessly.
  for hidden in ["false", "true"] {
    for item in tech {
      m.elem("span", &[("aria-hidden", hidden)], item)?;
    }
  }
  m.end("div")?;
  m.end("div")
}

// ─── About ───────────────────────────────────────────────────────────────────

fn about(m: &mut Markup, view: &PageView<'_>) -> Result<(), Error> {
  let profile = view.profile;

  m.start("section", &[("class", "about"), ("id", "about")])?;
  m.elem("h2", &[], "My Evolution")?;

  m.start("div", &[("class", "focus card")])?;
  m.elem("h3", &[], &profile.focus.title)?;
  m.elem("p", &[], &profile.focus.body)?;
  m.end("div")?;

  m.start("div", &[("class", "timeline-wrap")])?;
  if view.theme.indicator.is_some() {
    m.start("div", &[("class", "timeline-rail"), ("aria-hidden", "true")])?;
    m.elem("span", &[("class", "timeline-marker")], "")?;
    m.end("div")?;
  }
  m.start("ol", &[("class", "timeline")])?;
  for entry in &profile.timeline {
    m.start("li", &[("class", "card")])?;
    m.elem("span", &[("class", "period")], &entry.period)?;
    m.elem("h3", &[], &entry.title)?;
    m.elem("p", &[("class", "org")], &entry.org)?;
    m.elem("p", &[], &entry.body)?;
    m.end("li")?;
  }
  m.end("ol")?;
  m.end("div")?;
  m.end("section")
}

// ─── Projects ────────────────────────────────────────────────────────────────

fn projects(m: &mut Markup, profile: &Profile) -> Result<(), Error> {
  m.start("section", &[("class", "projects"), ("id", "projects")])?;
  m.start("header", &[("class", "section-head")])?;
  m.elem("h2", &[], "Selected Works")?;
  m.elem("a", &[("href", &profile.archive), ("target", "_blank"), ("rel", "noopener")], "Full archive")?;
  m.end("header")?;

  m.start("div", &[("class", "grid")])?;
  for project in &profile.projects {
    let [from, to] = project.gradient;
    let accent = format!("--from:{from};--to:{to}");
    m.start("article", &[("class", "card project"), ("style", &accent)])?;
    m.elem("div", &[("class", "project-art"), ("aria-hidden", "true")], "")?;
    m.elem("span", &[("class", "category")], &project.category)?;
    m.elem("h3", &[], &project.title)?;
    m.elem("p", &[], &project.body)?;
    m.start("ul", &[("class", "tags")])?;
    for tag in &project.tech {
      m.elem("li", &[], tag)?;
    }
    m.end("ul")?;
    m.elem("a", &[("href", &project.repo), ("target", "_blank"), ("rel", "noopener")], "Source")?;
    m.end("article")?;
  }
  m.end("div")?;
  m.end("section")
}

// ─── Contact ─────────────────────────────────────────────────────────────────

fn contact(m: &mut Markup, view: &PageView<'_>) -> Result<(), Error> {
  let profile = view.profile;
  let card = &profile.contact;

  m.start("section", &[("class", "contact"), ("id", "contact")])?;
  m.start("div", &[("class", "contact-copy")])?;
  m.elem("h2", &[], &card.headline)?;
  m.elem("p", &[], &card.pitch)?;
  m.start("ul", &[("class", "contact-lines")])?;
  m.start("li", &[])?;
  m.elem("a", &[("href", &profile.mailto())], &card.email)?;
  m.end("li")?;
  if let Some(phone) = &card.phone {
    let tel = format!("tel:{}", phone.replace(' ', ""));
    m.start("li", &[])?;
    m.elem("a", &[("href", &tel)], phone)?;
    m.end("li")?;
  }
  m.end("ul")?;
  m.end("div")?;

  form(m, view)?;
  m.end("section")
}

const SEND_ID: &str = "contact-send";
const SEND_LABEL: &str = "Send Message";

/// Disables the send control once a submission is under way, so one page
/// never has two requests in flight.
const LOCK_ON_SUBMIT: &str =
  "var b=document.getElementById('contact-send');b.disabled=true;b.textContent='Sending…'";

fn form(m: &mut Markup, view: &PageView<'_>) -> Result<(), Error> {
  let FormView {
    draft,
    status,
    notice,
  } = view.form;

  m.start("form", &[
    ("class", "contact-form card"),
    ("method", "post"),
    ("action", "/contact#contact"),
    ("onsubmit", LOCK_ON_SUBMIT),
  ])?;

  for field in Field::ALL {
    let key = field.key();
    let mut attrs = vec![("name", key), ("id", key)];
    if view.theme.require_fields {
      attrs.push(("required", "required"));
    }

    m.elem("label", &[("for", key)], field.label())?;
    match field {
      Field::Message => {
        attrs.push(("rows", "5"));
        m.elem("textarea", &attrs, draft.get(field))?;
      }
      Field::Name | Field::Email => {
        let kind = if field == Field::Email { "email" } else { "text" };
        attrs.push(("type", kind));
        attrs.push(("value", draft.get(field)));
        m.empty("input", &attrs)?;
      }
    }
  }

  m.elem("button", &[("type", "submit"), ("id", SEND_ID)], SEND_LABEL)?;

  match (notice, status) {
    (Some(notice), _) => {
      m.elem("p", &[("class", "status status-failed"), ("role", "alert")], notice)?;
    }
    (None, Status::Sent(text)) => {
      m.elem("p", &[("class", "status status-sent"), ("role", "status")], text)?;
    }
    (None, Status::Failed(text)) => {
      m.elem("p", &[("class", "status status-failed"), ("role", "alert")], text)?;
    }
    (None, Status::Idle | Status::Sending) => {}
  }

  m.end("form")
}

// ─── Footer ──────────────────────────────────────────────────────────────────

fn footer(m: &mut Markup, view: &PageView<'_>) -> Result<(), Error> {
  let profile = view.profile;
  let copyright = format!("© {} {}", view.year, profile.name);

  m.start("footer", &[])?;
  socials(m, profile)?;
  m.elem("p", &[("class", "quote")], &profile.quote)?;
  m.elem("p", &[("class", "copyright")], &copyright)?;
  m.end("footer")
}

fn socials(m: &mut Markup, profile: &Profile) -> Result<(), Error> {
  m.start("ul", &[("class", "socials")])?;
  for social in &profile.socials {
    m.start("li", &[])?;
    m.elem("a", &[("href", &social.url), ("target", "_blank"), ("rel", "noopener")], &social.label)?;
    m.end("li")?;
  }
  m.start("li", &[])?;
  m.elem("a", &[("href", &profile.mailto())], "Email")?;
  m.end("li")?;
  m.end("ul")
}

// ─── Inline style ────────────────────────────────────────────────────────────

/// Palette custom properties plus the rotation keyframe for `entries`
/// caption entries.
fn inline_style(palette: &Palette, caption: CaptionStyle, entries: usize) -> String {
  let mut css = format!(
    ":root{{--bg:{};--surface:{};--text:{};--muted:{};--accent:{};--accent-alt:{};--success:{};--failure:{}}}",
    palette.background,
    palette.surface,
    palette.text,
    palette.muted,
    palette.accent,
    palette.accent_alt,
    palette.success,
    palette.failure,
  );

  if let CaptionStyle::Rotate { .. } = caption
    && entries > 1
  {
    let visible = 100.0 / entries as f64;
    let _ = write!(
      css,
      "@keyframes caption-rotate{{0%{{opacity:1}}{:.3}%{{opacity:1}}{:.3}%{{opacity:0}}100%{{opacity:0}}}}",
      visible - 0.001,
      visible,
    );
  }
  css
}

fn title_case(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::*;

  fn roles() -> Vec<String> { vec!["A".into(), "BB".into(), "CCC".into()] }

  fn render(theme: &Theme, draft: &Draft, status: &Status, notice: Option<&str>) -> String {
    let profile = Profile::bundled().unwrap();
    let view = PageView {
      profile: &profile,
      theme,
      form: FormView {
        draft,
        status,
        notice,
      },
      year: 2026,
    };
    String::from_utf8(render_page(&view).unwrap()).unwrap()
  }

  #[test]
  fn rotation_gives_each_entry_one_interval() {
    let styles = caption_timings(CaptionStyle::rotate(Duration::from_millis(2500)), &roles());
    assert_eq!(styles, vec![
      "animation:caption-rotate 7500ms linear 0ms infinite",
      "animation:caption-rotate 7500ms linear -5000ms infinite",
      "animation:caption-rotate 7500ms linear -2500ms infinite",
    ]);
  }

  #[test]
  fn typewriter_schedules_entries_back_to_back() {
    let style = CaptionStyle::Typewriter {
      char_ms: 80,
      hold_ms: 1500,
    };
    let styles = caption_timings(style, &roles());
    assert_eq!(
      styles[0],
      "--chars:1ch;animation:caption-type 80ms steps(1) 0ms forwards,caption-clear 1ms linear 1580ms forwards"
    );
    assert!(styles[1].contains("caption-type 160ms steps(2) 1580ms"));
    // The last entry stays on screen.
    assert!(!styles[2].contains("caption-clear"));
    assert_eq!(
      styles[2],
      "--chars:3ch;animation:caption-type 240ms steps(3) 3240ms forwards"
    );
  }

  #[test]
  fn single_entry_does_not_rotate() {
    let styles = caption_timings(CaptionStyle::rotate(Duration::from_secs(1)), &["Only".to_string()]);
    assert_eq!(styles, vec![String::new()]);
    let css = inline_style(&Theme::nebula().palette, CaptionStyle::rotate(Duration::from_secs(1)), 1);
    assert!(!css.contains("@keyframes"));
  }

  #[test]
  fn palette_becomes_custom_properties() {
    let css = inline_style(&Theme::nebula().palette, Theme::nebula().caption, 3);
    assert!(css.starts_with(":root{--bg:#0b0b15;"));
    assert!(css.contains("@keyframes caption-rotate"));
  }

  #[test]
  fn draft_values_are_escaped() {
    let draft = Draft {
      name:    "<script>alert(1)</script>".into(),
      email:   "a\"b@example.com".into(),
      message: "1 < 2 & 3".into(),
    };
    let html = render(&Theme::nebula(), &draft, &Status::Idle, None);
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("1 &lt; 2 &amp; 3"));
  }

  #[test]
  fn required_attribute_follows_theme() {
    let strict = render(&Theme::nebula(), &Draft::default(), &Status::Idle, None);
    assert_eq!(strict.matches("required=\"required\"").count(), 3);

    let relaxed = render(&Theme::pastel(), &Draft::default(), &Status::Idle, None);
    assert!(!relaxed.contains("required="));
  }

  #[test]
  fn send_control_locks_while_submitting() {
    let html = render(&Theme::nebula(), &Draft::default(), &Status::Idle, None);
    assert!(html.contains(
      "onsubmit=\"var b=document.getElementById(&apos;contact-send&apos;);b.disabled=true;\
       b.textContent=&apos;Sending…&apos;\""
    ));
    assert!(html.contains("<button type=\"submit\" id=\"contact-send\">Send Message</button>"));
  }

  #[test]
  fn notice_replaces_status_line() {
    let html = render(
      &Theme::nebula(),
      &Draft::default(),
      &Status::Failed("ignored".into()),
      Some("please fill in the name field"),
    );
    assert!(html.contains("please fill in the name field"));
    assert!(!html.contains("ignored"));
  }

  #[test]
  fn navigation_links_every_anchor() {
    let html = render(&Theme::nebula(), &Draft::default(), &Status::Idle, None);
    for anchor in ANCHORS {
      assert!(html.contains(&format!("href=\"#{anchor}\"")));
      assert!(html.contains(&format!("id=\"{anchor}\"")));
    }
    assert!(html.contains("© 2026 Yokisha Poudel"));
  }
}
