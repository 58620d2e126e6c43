//! About section: focus blurb and the scrolling timeline with its rail.

use std::rc::Rc;

use folio_core::{contact::MessageSender, content::Profile, theme::Theme};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
  app::App,
  ui::{rgb, wrap},
};

const FOCUS_HEIGHT: u16 = 6;
const RAIL_WIDTH: u16 = 3;

fn split(body: Rect) -> Rc<[Rect]> {
  Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(FOCUS_HEIGHT), Constraint::Min(0)])
    .split(body)
}

fn timeline_block() -> Block<'static> {
  Block::default().title(" My Evolution ").borders(Borders::ALL)
}

/// Rail column and text column inside the timeline block.
fn columns(inner: Rect, rail: bool) -> (Option<Rect>, Rect) {
  if !rail {
    return (None, inner);
  }
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Length(RAIL_WIDTH), Constraint::Min(0)])
    .split(inner);
  (Some(cols[0]), cols[1])
}

/// Where timeline text lands for a given body; the scroll viewport.
pub fn timeline_area(body: Rect, rail: bool) -> Rect {
  let inner = timeline_block().inner(split(body)[1]);
  columns(inner, rail).1
}

/// The timeline laid out for `width` columns.
pub fn timeline_lines(profile: &Profile, theme: &Theme, width: u16) -> Vec<Line<'static>> {
  let palette = &theme.palette;
  let mut lines = Vec::new();

  for (i, entry) in profile.timeline.iter().enumerate() {
    if i > 0 {
      lines.push(Line::raw(""));
    }
    lines.push(Line::from(vec![
      Span::styled(
        entry.period.clone(),
        Style::default().fg(rgb(palette.accent)).add_modifier(Modifier::BOLD),
      ),
      Span::raw("  "),
      Span::styled(entry.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
    ]));
    lines.push(Line::styled(entry.org.clone(), Style::default().fg(rgb(palette.muted))));
    lines.extend(wrap(&entry.body, width).into_iter().map(Line::raw));
  }
  lines
}

pub fn draw<S: MessageSender + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let palette = &app.theme.palette;
  let parts = split(area);
  let border = Style::default().fg(rgb(palette.muted));

  // Focus blurb.
  let focus = Block::default()
    .title(format!(" {} ", app.profile.focus.title))
    .borders(Borders::ALL)
    .border_style(border);
  f.render_widget(
    Paragraph::new(app.profile.focus.body.as_str())
      .wrap(Wrap { trim: true })
      .block(focus),
    parts[0],
  );

  // Timeline.
  let block = timeline_block().border_style(border);
  let inner = block.inner(parts[1]);
  f.render_widget(block, parts[1]);

  let (rail, text) = columns(inner, app.indicator.is_some());
  let lines = timeline_lines(&app.profile, &app.theme, text.width);
  f.render_widget(Paragraph::new(lines).scroll((app.about_scroll, 0)), text);

  if let (Some(rail), Some(indicator)) = (rail, &app.indicator) {
    let marker = marker_row(indicator.percent(), rail.height);
    let rail_lines: Vec<Line> = (0..rail.height)
      .map(|row| {
        if Some(row) == marker {
          Line::styled(" ●", Style::default().fg(rgb(palette.accent)))
        } else {
          Line::styled(" │", Style::default().fg(rgb(palette.muted)))
        }
      })
      .collect();
    f.render_widget(Paragraph::new(rail_lines), rail);
  }
}

/// Row of the rail marker for a `percent` offset on a rail `height` rows tall.
pub fn marker_row(percent: f64, height: u16) -> Option<u16> {
  if height == 0 {
    return None;
  }
  let span = f64::from(height - 1);
  Some((percent.clamp(0.0, 100.0) / 100.0 * span).round() as u16)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn marker_spans_the_rail() {
    assert_eq!(marker_row(0.0, 10), Some(0));
    assert_eq!(marker_row(100.0, 10), Some(9));
    assert_eq!(marker_row(50.0, 11), Some(5));
    assert_eq!(marker_row(50.0, 0), None);
  }

  #[test]
  fn timeline_viewport_leaves_room_for_the_rail() {
    let body = Rect::new(0, 1, 80, 22);
    let with_rail = timeline_area(body, true);
    let without = timeline_area(body, false);
    assert_eq!(without.width, 78);
    assert_eq!(with_rail.width, 75);
    assert_eq!(with_rail.height, 22 - FOCUS_HEIGHT - 2);
  }

  #[test]
  fn every_entry_is_laid_out() {
    let profile = Profile::bundled().unwrap();
    let lines = timeline_lines(&profile, &Theme::pastel(), 40);
    let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
    for entry in &profile.timeline {
      assert!(text.iter().any(|l| l.contains(&entry.title)));
      assert!(text.iter().any(|l| l == &entry.org));
    }
    assert!(text.iter().all(|l| l.chars().count() <= 40 || l.contains("  ")));
  }
}
