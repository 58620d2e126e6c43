//! Home section: particle backdrop, caption and tech marquee.

use std::rc::Rc;

use folio_core::{
  caption::CaptionStyle,
  color::Rgb,
  contact::MessageSender,
  particles::{FieldColors, ParticleField, Surface},
};
use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Direction, Layout, Rect},
  style::{Modifier, Style},
  symbols::Marker,
  text::{Line, Span},
  widgets::{
    Block, Borders, Paragraph,
    canvas::{Canvas, Circle, Context, Line as Segment, Points},
  },
};

use crate::{
  app::App,
  ui::{rgb, wrap},
};

const MARQUEE_HEIGHT: u16 = 3;
const INTRO_WIDTH: u16 = 64;

fn split(body: Rect) -> Rc<[Rect]> {
  Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(0), Constraint::Length(MARQUEE_HEIGHT)])
    .split(body)
}

/// The part of the body the particle field covers.
pub fn canvas_area(body: Rect) -> Rect { split(body)[0] }

pub fn draw<S: MessageSender + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let parts = split(area);

  if let Some(field) = &app.field {
    draw_field(f, parts[0], field, app.theme.palette.field_colors(), app.theme.palette.background);
  }
  draw_copy(f, parts[0], app);
  draw_marquee(f, parts[1], app);
}

// ─── Backdrop ─────────────────────────────────────────────────────────────────

/// Paints a [`ParticleField`] onto a braille canvas.
///
/// Field coordinates grow downwards, canvas coordinates upwards. Terminals
/// have no alpha, so link opacity is blended against the background.
struct CanvasSurface<'c, 'a> {
  ctx:        &'c mut Context<'a>,
  height:     f64,
  colors:     FieldColors,
  background: Rgb,
}

impl Surface for CanvasSurface<'_, '_> {
  // A canvas starts blank every frame.
  fn clear(&mut self) {}

  fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
    let color = rgb(self.colors.point);
    let y = self.height - y;
    if radius < 1.0 {
      self.ctx.draw(&Points {
        coords: &[(x, y)],
        color,
      });
    } else {
      self.ctx.draw(&Circle { x, y, radius, color });
    }
  }

  fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), alpha: f64) {
    self.ctx.draw(&Segment {
      x1:    from.0,
      y1:    self.height - from.1,
      x2:    to.0,
      y2:    self.height - to.1,
      color: rgb(self.colors.link.over(self.background, alpha)),
    });
  }
}

fn draw_field(f: &mut Frame, area: Rect, field: &ParticleField, colors: FieldColors, background: Rgb) {
  let canvas = Canvas::default()
    .marker(Marker::Braille)
    .background_color(rgb(background))
    .x_bounds([0.0, field.width()])
    .y_bounds([0.0, field.height()])
    .paint(|ctx| {
      let mut surface = CanvasSurface {
        ctx,
        height: field.height(),
        colors,
        background,
      };
      field.render(&mut surface);
    });
  f.render_widget(canvas, area);
}

// ─── Copy ─────────────────────────────────────────────────────────────────────

fn draw_copy<S: MessageSender + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let palette = &app.theme.palette;
  let profile = &app.profile;
  let accent = Style::default().fg(rgb(palette.accent)).add_modifier(Modifier::BOLD);
  let muted = Style::default().fg(rgb(palette.muted));

  let cursor = match app.caption.style() {
    CaptionStyle::Typewriter { .. } if !app.caption.is_halted() => "▌",
    _ => "",
  };

  let mut lines = vec![
    Line::styled(profile.badge.to_uppercase(), Style::default().fg(rgb(palette.accent_alt))),
    Line::raw(""),
    Line::from(vec![
      Span::raw("Hi, I'm "),
      Span::styled(profile.name.clone(), accent),
    ]),
    Line::from(vec![
      Span::styled("I am a ", muted),
      Span::styled(app.caption.text().to_string(), accent),
      Span::styled(cursor, accent),
    ]),
    Line::raw(""),
  ];
  let intro_width = area.width.saturating_sub(4).min(INTRO_WIDTH);
  lines.extend(wrap(&profile.intro, intro_width).into_iter().map(|l| Line::styled(l, muted)));
  lines.push(Line::raw(""));

  let mut socials: Vec<Span> = Vec::new();
  for social in &profile.socials {
    if !socials.is_empty() {
      socials.push(Span::styled("  ·  ", muted));
    }
    socials.push(Span::styled(social.label.clone(), Style::default().fg(rgb(palette.text))));
  }
  socials.push(Span::styled("  ·  ", muted));
  socials.push(Span::styled(profile.contact.email.clone(), Style::default().fg(rgb(palette.text))));
  lines.push(Line::from(socials));

  // Centre the block vertically.
  let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).min(area.height);
  let copy_area = Rect {
    y: area.y + (area.height - height) / 2,
    height,
    ..area
  };
  f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), copy_area);
}

// ─── Marquee ──────────────────────────────────────────────────────────────────

/// `width` columns of the looping tech list starting at `offset`.
pub fn marquee_window(tech: &[String], offset: usize, width: usize) -> String {
  let ring: Vec<char> = tech
    .iter()
    .flat_map(|t| t.chars().chain("   ✦   ".chars()))
    .collect();
  if ring.is_empty() {
    return String::new();
  }
  (0..width).map(|i| ring[(offset + i) % ring.len()]).collect()
}

fn draw_marquee<S: MessageSender + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let palette = &app.theme.palette;
  let block = Block::default()
    .borders(Borders::TOP | Borders::BOTTOM)
    .border_style(Style::default().fg(rgb(palette.muted)));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let text = marquee_window(&app.profile.tech, app.marquee, usize::from(inner.width));
  f.render_widget(
    Paragraph::new(text.to_uppercase()).style(
      Style::default()
        .fg(rgb(palette.muted))
        .add_modifier(Modifier::BOLD),
    ),
    inner,
  );
}
