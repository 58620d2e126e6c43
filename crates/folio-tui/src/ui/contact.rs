//! Contact section: pitch on the left, the form on the right.

use folio_core::contact::{Field, MessageSender};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{app::App, ui::rgb};

pub fn draw<S: MessageSender + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
    .split(area);

  draw_pitch(f, cols[0], app);
  draw_form(f, cols[1], app);
}

fn draw_pitch<S: MessageSender + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let palette = &app.theme.palette;
  let card = &app.profile.contact;
  let muted = Style::default().fg(rgb(palette.muted));

  let mut lines = vec![
    Line::styled(
      card.headline.clone(),
      Style::default().fg(rgb(palette.accent)).add_modifier(Modifier::BOLD),
    ),
    Line::raw(""),
    Line::styled(card.pitch.clone(), muted),
    Line::raw(""),
    Line::from(vec![Span::styled("✉  ", muted), Span::raw(card.email.clone())]),
  ];
  if let Some(phone) = &card.phone {
    lines.push(Line::from(vec![Span::styled("☎  ", muted), Span::raw(phone.clone())]));
  }
  lines.push(Line::raw(""));
  for social in &app.profile.socials {
    lines.push(Line::from(vec![
      Span::styled(format!("{:<10}", social.label), muted),
      Span::raw(social.url.clone()),
    ]));
  }

  f.render_widget(
    Paragraph::new(lines)
      .wrap(Wrap { trim: true })
      .block(Block::default().borders(Borders::ALL).border_style(muted)),
    area,
  );
}

fn draw_form<S: MessageSender + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let palette = &app.theme.palette;

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(3), // name
      Constraint::Length(3), // email
      Constraint::Min(3),    // message
      Constraint::Length(1), // send control
    ])
    .split(area);

  for (field, row) in Field::ALL.iter().zip(rows.iter()) {
    let focused = app.editing && app.focus == *field;
    let border = if focused {
      Style::default().fg(rgb(palette.accent))
    } else {
      Style::default().fg(rgb(palette.muted))
    };
    let label = if app.form.requires_fields() {
      format!(" {} * ", field.label())
    } else {
      format!(" {} ", field.label())
    };

    let mut text = app.form.draft().get(*field).to_string();
    if focused {
      text.push('▏');
    }

    f.render_widget(
      Paragraph::new(text).wrap(Wrap { trim: false }).block(
        Block::default()
          .title(label)
          .borders(Borders::ALL)
          .border_style(border),
      ),
      *row,
    );
  }

  let (label, style) = if app.form.can_submit() {
    (
      "[ Send Message ]",
      Style::default()
        .fg(rgb(palette.background))
        .bg(rgb(palette.accent))
        .add_modifier(Modifier::BOLD),
    )
  } else {
    ("[ Sending… ]", Style::default().fg(rgb(palette.muted)))
  };
  f.render_widget(Paragraph::new(Span::styled(label, style)), rows[3]);
}
