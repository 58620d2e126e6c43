//! TUI rendering: orchestrates all sections.

pub mod about;
pub mod contact;
pub mod hero;
pub mod projects;

use std::rc::Rc;

use folio_core::{
  color::Rgb,
  contact::{MessageSender, Status},
};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Section};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<S: MessageSender + 'static>(f: &mut Frame, app: &App<S>) {
  let area = f.area();
  let palette = &app.theme.palette;

  f.render_widget(
    Block::default().style(Style::default().bg(rgb(palette.background)).fg(rgb(palette.text))),
    area,
  );

  let rows = rows(area);
  draw_header(f, rows[0], app);
  match app.section {
    Section::Home => hero::draw(f, rows[1], app),
    Section::About => about::draw(f, rows[1], app),
    Section::Projects => projects::draw(f, rows[1], app),
    Section::Contact => contact::draw(f, rows[1], app),
  }
  draw_status(f, rows[2], app);
}

/// Vertical stack: header, body, status bar.
fn rows(area: Rect) -> Rc<[Rect]> {
  Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area)
}

/// The area sections are drawn into.
pub fn body_area(area: Rect) -> Rect { rows(area)[1] }

pub fn rgb(c: Rgb) -> Color { Color::Rgb(c.r, c.g, c.b) }

/// Greedy word wrap to `width` columns. Words longer than a line are split.
pub fn wrap(text: &str, width: u16) -> Vec<String> {
  let width = usize::from(width.max(1));
  let mut lines = Vec::new();
  let mut line = String::new();
  let mut used = 0;

  for word in text.split_whitespace() {
    let mut word: Vec<char> = word.chars().collect();
    while word.len() > width {
      if used > 0 {
        lines.push(std::mem::take(&mut line));
        used = 0;
      }
      let rest = word.split_off(width);
      lines.push(word.into_iter().collect());
      word = rest;
    }
    if word.is_empty() {
      continue;
    }
    let needed = if used == 0 { word.len() } else { used + 1 + word.len() };
    if needed > width {
      lines.push(std::mem::take(&mut line));
      used = 0;
    }
    if used > 0 {
      line.push(' ');
      used += 1;
    }
    line.extend(word.iter());
    used += word.len();
  }
  if used > 0 {
    lines.push(line);
  }
  lines
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<S: MessageSender + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let palette = &app.theme.palette;

  let mut spans = vec![Span::styled(
    format!(" {} ", app.profile.initials),
    Style::default()
      .fg(rgb(palette.accent))
      .add_modifier(Modifier::BOLD),
  )];
  for (i, section) in Section::ALL.iter().enumerate() {
    let label = format!(" {} {} ", i + 1, section.title());
    let style = if *section == app.section {
      Style::default()
        .fg(rgb(palette.background))
        .bg(rgb(palette.accent))
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(rgb(palette.muted))
    };
    spans.push(Span::styled(label, style));
  }

  let right = Span::styled(
    format!("résumé {} ", app.profile.resume),
    Style::default().fg(rgb(palette.muted)),
  );

  // Simple left-right header: pad the middle.
  let left_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
  let right_width = right.content.chars().count();
  let pad = usize::from(area.width)
    .saturating_sub(left_width)
    .saturating_sub(right_width);
  spans.push(Span::raw(" ".repeat(pad)));
  spans.push(right);

  f.render_widget(
    Paragraph::new(Line::from(spans)).style(Style::default().bg(rgb(palette.surface))),
    area,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<S: MessageSender + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let palette = &app.theme.palette;

  let mode_label = if app.form.status().is_sending() {
    "SENDING"
  } else if app.editing {
    "EDIT"
  } else {
    "BROWSE"
  };

  let hints = match app.section {
    _ if app.editing => "Tab next field  Enter next/send  Esc done",
    Section::Home => "Tab/1-4 sections  q quit",
    Section::About => "↑↓/jk scroll  g/G top/bottom  Tab next  q quit",
    Section::Projects => "←↓↑→/hjkl select  Tab next  q quit",
    Section::Contact => "Enter edit  s send  Tab next  q quit",
  };

  // Validation notice, then the form outcome, then key hints.
  let (text, color) = match (&app.notice, app.form.status()) {
    (Some((notice, _)), _) => (notice.as_str(), palette.failure),
    (None, Status::Sent(text)) => (text.as_str(), palette.success),
    (None, Status::Failed(text)) => (text.as_str(), palette.failure),
    (None, Status::Idle | Status::Sending) => (hints, palette.muted),
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(rgb(palette.background))
      .bg(rgb(palette.accent_alt))
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {text}"), Style::default().fg(rgb(color)));

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span]))
      .style(Style::default().bg(rgb(palette.surface))),
    area,
  );
}
