//! Projects section: two-column card grid.

use folio_core::{contact::MessageSender, content::Project, theme::Palette};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Modifier, Style},
  text::{Line, Span},
  widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::{app::App, ui::rgb};

pub fn draw<S: MessageSender + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let palette = &app.theme.palette;
  let projects = &app.profile.projects;

  let outer = Block::default()
    .title(" Selected Works ")
    .title_top(Line::from(format!(" {} ", app.profile.archive)).right_aligned())
    .borders(Borders::ALL)
    .border_style(Style::default().fg(rgb(palette.muted)));
  let inner = outer.inner(area);
  f.render_widget(outer, area);

  if projects.is_empty() {
    return;
  }

  let row_count = projects.len().div_ceil(2);
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints(vec![Constraint::Ratio(1, row_count as u32); row_count])
    .split(inner);

  for (r, row) in rows.iter().enumerate() {
    let cols = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
      .split(*row);
    for (c, cell) in cols.iter().enumerate() {
      let index = r * 2 + c;
      if let Some(project) = projects.get(index) {
        draw_card(f, *cell, project, palette, index == app.project);
      }
    }
  }
}

fn draw_card(f: &mut Frame, area: Rect, project: &Project, palette: &Palette, selected: bool) {
  let [from, to] = project.gradient;

  let mut block = Block::default()
    .title(Span::styled(
      format!(" {} ", project.title),
      Style::default().fg(rgb(palette.text)).add_modifier(Modifier::BOLD),
    ))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(rgb(from)));
  if selected {
    block = block
      .border_type(BorderType::Thick)
      .border_style(Style::default().fg(rgb(to)));
  }

  let mut lines = vec![
    Line::styled(
      project.category.to_uppercase(),
      Style::default().fg(rgb(to)).add_modifier(Modifier::BOLD),
    ),
    Line::raw(""),
    Line::styled(project.body.clone(), Style::default().fg(rgb(palette.muted))),
    Line::raw(""),
    Line::styled(project.tech.join(" · "), Style::default().fg(rgb(palette.text))),
  ];
  if selected {
    lines.push(Line::styled(
      format!("↗ {}", project.repo),
      Style::default().fg(rgb(palette.accent)),
    ));
  }

  f.render_widget(
    Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
    area,
  );
}
