//! Application state machine and event dispatcher.

use std::{
  sync::Arc,
  time::{Duration, Instant},
};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_core::{
  Error,
  caption::Caption,
  contact::{ContactForm, Field, MessageSender, STATUS_TTL, SendError},
  content::Profile,
  particles::{FieldConfig, ParticleField},
  scroll::{self, Indicator, Span},
  theme::Theme,
};
use rand_core::OsRng;
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::ui;

/// Target frame interval (~30 fps).
pub const TICK_RATE: Duration = Duration::from_millis(33);

/// The marquee shifts one column per step.
const MARQUEE_STEP: Duration = Duration::from_millis(120);

// ─── Section ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
  Home,
  About,
  Projects,
  Contact,
}

impl Section {
  pub const ALL: [Section; 4] = [
    Section::Home,
    Section::About,
    Section::Projects,
    Section::Contact,
  ];

  pub fn title(self) -> &'static str {
    match self {
      Section::Home => "Home",
      Section::About => "About",
      Section::Projects => "Projects",
      Section::Contact => "Contact",
    }
  }

  fn position(self) -> usize {
    Section::ALL.iter().position(|s| *s == self).unwrap_or(0)
  }

  pub fn next(self) -> Self { Section::ALL[(self.position() + 1) % Section::ALL.len()] }

  pub fn prev(self) -> Self {
    let len = Section::ALL.len();
    Section::ALL[(self.position() + len - 1) % len]
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<S> {
  /// Section shown in the body.
  pub section: Section,

  pub profile: Profile,
  pub theme:   Theme,

  /// Cycling line under the name on the home section.
  pub caption: Caption,

  /// Particle backdrop; `None` when disabled or the canvas has no area.
  pub field:    Option<ParticleField>,
  field_config: Option<FieldConfig>,

  /// Marquee offset in columns.
  pub marquee: usize,
  marquee_acc: Duration,

  /// First visible timeline row.
  pub about_scroll: u16,
  about_rows:       u16,
  about_lines:      u16,

  /// Rail marker following timeline scroll.
  pub indicator: Option<Indicator>,

  /// Selected card in the project grid.
  pub project: usize,

  pub form: ContactForm,

  /// Whether keystrokes go into the form.
  pub editing: bool,

  /// Field receiving keystrokes while editing.
  pub focus: Field,

  /// Validation message and when it expires.
  pub notice: Option<(String, Instant)>,

  sender:      Arc<S>,
  outcomes_tx: mpsc::UnboundedSender<Result<(), SendError>>,
  outcomes_rx: mpsc::UnboundedReceiver<Result<(), SendError>>,
  last_tick:   Instant,
}

impl<S: MessageSender + 'static> App<S> {
  /// Create an [`App`] on the home section. Call [`resize`](Self::resize)
  /// before the first frame.
  pub fn new(profile: Profile, theme: Theme, field_config: Option<FieldConfig>, sender: S) -> Self {
    let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
    Self {
      section: Section::Home,
      caption: Caption::new(profile.roles.clone(), theme.caption),
      field: None,
      field_config,
      marquee: 0,
      marquee_acc: Duration::ZERO,
      about_scroll: 0,
      about_rows: 0,
      about_lines: 0,
      indicator: theme.indicator.map(Indicator::new),
      project: 0,
      form: ContactForm::new(theme.require_fields),
      editing: false,
      focus: Field::Name,
      notice: None,
      sender: Arc::new(sender),
      outcomes_tx,
      outcomes_rx,
      last_tick: Instant::now(),
      profile,
      theme,
    }
  }

  // ── Layout ────────────────────────────────────────────────────────────────

  /// Recompute size-dependent state for a `cols` × `rows` terminal.
  pub fn resize(&mut self, cols: u16, rows: u16) {
    let body = ui::body_area(Rect::new(0, 0, cols, rows));

    // Braille cells are 2 × 4 dots.
    let canvas = ui::hero::canvas_area(body);
    let (width, height) = (f64::from(canvas.width) * 2.0, f64::from(canvas.height) * 4.0);
    self.field = match self.field_config {
      Some(config) if width > 0.0 && height > 0.0 => match self.field.take() {
        Some(mut field) => {
          field.resize(width, height, &mut OsRng);
          Some(field)
        }
        None => Some(ParticleField::new(config, width, height, &mut OsRng)),
      },
      _ => None,
    };

    let timeline = ui::about::timeline_area(body, self.indicator.is_some());
    let lines = ui::about::timeline_lines(&self.profile, &self.theme, timeline.width).len();
    self.about_rows = timeline.height;
    self.about_lines = u16::try_from(lines).unwrap_or(u16::MAX);
    self.about_scroll = self.about_scroll.min(self.max_scroll());

    tracing::debug!(cols, rows, field = self.field.is_some(), "resized");
  }

  fn max_scroll(&self) -> u16 { self.about_lines.saturating_sub(self.about_rows) }

  /// How far the timeline viewport has travelled, in `[0, 1]`.
  pub fn about_progress(&self) -> f64 {
    scroll::progress(
      Span::new(0.0, f64::from(self.about_lines)),
      Span::new(f64::from(self.about_scroll), f64::from(self.about_rows)),
    )
  }

  // ── Animation ─────────────────────────────────────────────────────────────

  /// Advance every animation to `now` and collect finished submissions.
  pub fn tick(&mut self, now: Instant) {
    let dt = now.saturating_duration_since(self.last_tick);
    self.last_tick = now;

    self.caption.advance(dt);

    if let Some(field) = &mut self.field {
      field.step();
    }

    self.marquee_acc += dt;
    while self.marquee_acc >= MARQUEE_STEP {
      self.marquee_acc -= MARQUEE_STEP;
      self.marquee = self.marquee.wrapping_add(1);
    }

    // The rail only tracks the timeline while it is on screen.
    let target = (self.section == Section::About).then(|| self.about_progress());
    if let Some(indicator) = &mut self.indicator {
      indicator.update(target, dt);
    }

    while let Ok(outcome) = self.outcomes_rx.try_recv() {
      self.form.finish(outcome, now);
    }
    self.form.tick(now);

    if self.notice.as_ref().is_some_and(|(_, at)| now >= *at) {
      self.notice = None;
    }
  }

  // ── Submission ────────────────────────────────────────────────────────────

  /// Validate the form and send it on a background task.
  pub fn submit(&mut self) {
    match self.form.begin() {
      Ok(message) => {
        self.notice = None;
        self.editing = false;
        let sender = Arc::clone(&self.sender);
        let tx = self.outcomes_tx.clone();
        tokio::spawn(async move {
          let outcome = sender.send(&message).await;
          // The receiver only goes away when the app exits.
          let _ = tx.send(outcome);
        });
      }
      Err(e) => {
        if let Error::MissingField(field) = e {
          self.focus = field;
          self.editing = true;
        }
        self.notice = Some((e.to_string(), self.last_tick + STATUS_TTL));
      }
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    // Edit mode: printable keys go into the focused field.
    if self.editing {
      self.handle_edit_key(key);
      return true;
    }

    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Tab => self.section = self.section.next(),
      KeyCode::BackTab => self.section = self.section.prev(),
      KeyCode::Char(c @ '1'..='4') => {
        self.section = Section::ALL[usize::from(c as u8 - b'1')];
      }
      _ => match self.section {
        Section::Home => {}
        Section::About => self.handle_about_key(key),
        Section::Projects => self.handle_projects_key(key),
        Section::Contact => self.handle_contact_key(key),
      },
    }
    true
  }

  fn handle_about_key(&mut self, key: KeyEvent) {
    let max = self.max_scroll();
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        self.about_scroll = (self.about_scroll + 1).min(max);
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.about_scroll = self.about_scroll.saturating_sub(1);
      }
      KeyCode::PageDown => {
        self.about_scroll = self.about_scroll.saturating_add(self.about_rows).min(max);
      }
      KeyCode::PageUp => {
        self.about_scroll = self.about_scroll.saturating_sub(self.about_rows);
      }
      KeyCode::Char('g') | KeyCode::Home => self.about_scroll = 0,
      KeyCode::Char('G') | KeyCode::End => self.about_scroll = max,
      _ => {}
    }
  }

  fn handle_projects_key(&mut self, key: KeyEvent) {
    let len = self.profile.projects.len();
    match key.code {
      KeyCode::Left | KeyCode::Char('h') => {
        if self.project % 2 == 1 {
          self.project -= 1;
        }
      }
      KeyCode::Right | KeyCode::Char('l') => {
        if self.project % 2 == 0 && self.project + 1 < len {
          self.project += 1;
        }
      }
      KeyCode::Down | KeyCode::Char('j') => {
        if self.project + 2 < len {
          self.project += 2;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.project >= 2 {
          self.project -= 2;
        }
      }
      _ => {}
    }
  }

  fn handle_contact_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Enter | KeyCode::Char('i') => self.editing = true,
      KeyCode::Char('s') => {
        if self.form.can_submit() {
          self.submit();
        }
      }
      _ => {}
    }
  }

  fn handle_edit_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.editing = false,
      KeyCode::Tab | KeyCode::Down => self.focus = cycle(self.focus, 1),
      KeyCode::BackTab | KeyCode::Up => self.focus = cycle(self.focus, Field::ALL.len() - 1),
      KeyCode::Enter => {
        if self.focus == Field::Message {
          if self.form.can_submit() {
            self.submit();
          }
        } else {
          self.focus = cycle(self.focus, 1);
        }
      }
      KeyCode::Backspace => {
        self.form.draft_mut().get_mut(self.focus).pop();
      }
      KeyCode::Char(c) => self.form.draft_mut().get_mut(self.focus).push(c),
      _ => {}
    }
  }
}

fn cycle(field: Field, by: usize) -> Field {
  let at = Field::ALL.iter().position(|f| *f == field).unwrap_or(0);
  Field::ALL[(at + by) % Field::ALL.len()]
}

// ─── Tests ────────────────────────────────────────────────────────────────────
