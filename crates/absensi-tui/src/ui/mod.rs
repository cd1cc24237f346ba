//! TUI rendering for every screen.

pub mod absence;
pub mod attendance;
pub mod dashboard;
pub mod export;
pub mod login;

use std::time::Instant;

use absensi_core::notify::Severity;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::{
  app::{App, Screen, StatusAction},
  form::{FieldKind, Form},
};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match app.screen {
    Screen::Login => login::draw(f, rows[1], app),
    Screen::Dashboard => dashboard::draw(f, rows[1], app),
    Screen::Attendance => attendance::draw(f, rows[1], app),
    Screen::Absence => absence::draw(f, rows[1], app),
    Screen::Export => export::draw(f, rows[1], app),
  }
  draw_status(f, rows[2], app);

  if app.pending.is_some() {
    draw_confirm(f, area, app);
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

const TABS: [(Screen, &str); 4] = [
  (Screen::Dashboard, "F1 Dashboard"),
  (Screen::Attendance, "F2 Attendance"),
  (Screen::Absence, "F3 Absence"),
  (Screen::Export, "F4 Export"),
];

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let mut spans = vec![Span::styled(
    " absensi ",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  )];

  if app.screen != Screen::Login {
    for (screen, label) in TABS {
      let style = if screen == app.screen {
        Style::default()
          .fg(Color::Black)
          .bg(Color::Cyan)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Gray)
      };
      spans.push(Span::raw(" "));
      spans.push(Span::styled(format!(" {label} "), style));
    }
  }

  let date = app.today.format("%Y-%m-%d").to_string();
  let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
  let pad = (area.width as usize)
    .saturating_sub(used)
    .saturating_sub(date.len() + 1);
  spans.push(Span::raw(" ".repeat(pad)));
  spans.push(Span::styled(
    format!("{date} "),
    Style::default().fg(Color::Gray),
  ));

  f.render_widget(
    Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray)),
    area,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.screen {
    Screen::Login => ("LOGIN", "Tab next field  Enter sign in  Esc quit"),
    Screen::Dashboard => (
      "HOME",
      "2 attendance  3 absence  4 export  ^O sign out  q quit",
    ),
    Screen::Attendance => (
      "FILTER",
      "Tab field  ←→ unit  Enter apply  ^X excel  ^P pdf  ^Y copy",
    ),
    Screen::Absence if app.search_active => {
      ("SEARCH", "Type to filter  Esc clear  Enter keep")
    }
    Screen::Absence => (
      "ABSENCE",
      "↑↓/jk move  Tab panel  d disable  e enable  / search  q quit",
    ),
    Screen::Export => ("EXPORT", "Tab field  ←→ choose  Space toggle  Enter export"),
  };

  let mut spans = vec![Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  )];

  match app.toasts().current(Instant::now()) {
    Some(toast) => {
      let color = match toast.severity {
        Severity::Info => Color::Green,
        Severity::Destructive => Color::Red,
      };
      spans.push(Span::styled(
        format!("  {}", toast.title),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
      ));
      spans.push(Span::styled(
        format!("  {}", toast.description),
        Style::default().fg(Color::Gray),
      ));
    }
    None => spans.push(Span::styled(
      format!("  {hints}"),
      Style::default().fg(Color::DarkGray),
    )),
  }

  f.render_widget(
    Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Confirmation dialog ──────────────────────────────────────────────────────

fn draw_confirm(f: &mut Frame, area: Rect, app: &App) {
  let Some(pending) = &app.pending else { return };

  let (title, question, accent) = match pending.action {
    StatusAction::Disable => (
      " Disable employee ",
      format!("Disable {}? They will be moved to the disabled list.", pending.name),
      Color::Red,
    ),
    StatusAction::Enable => (
      " Enable employee ",
      format!("Re-enable {}? They will return to the active list.", pending.name),
      Color::Green,
    ),
  };

  let popup = centered(area, 50, 7);
  f.render_widget(Clear, popup);

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(accent));
  let inner = block.inner(popup);
  f.render_widget(block, popup);

  let lines = vec![
    Line::from(question),
    Line::from(""),
    Line::from(vec![
      Span::styled("[y]", Style::default().fg(accent).add_modifier(Modifier::BOLD)),
      Span::raw(" confirm   "),
      Span::styled("[n]", Style::default().add_modifier(Modifier::BOLD)),
      Span::raw(" cancel"),
    ]),
  ];
  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

// ─── Shared helpers ───────────────────────────────────────────────────────────

/// A `width` x `height` rectangle centred in `area`.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let [row] = Layout::vertical([Constraint::Length(height)])
    .flex(Flex::Center)
    .areas(area);
  let [cell] = Layout::horizontal([Constraint::Length(width)])
    .flex(Flex::Center)
    .areas(row);
  cell
}

/// Bordered panel; highlighted when it has focus.
pub(crate) fn panel(title: impl Into<String>, focused: bool) -> Block<'static> {
  let color = if focused { Color::Cyan } else { Color::DarkGray };
  Block::default()
    .title(format!(" {} ", title.into()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(color))
}

/// One line per form field; the focused one is highlighted.
pub(crate) fn form_lines(form: &Form, active: bool) -> Vec<Line<'static>> {
  form
    .fields
    .iter()
    .enumerate()
    .map(|(i, field)| {
      let focused = active && i == form.focus;
      let marker = if focused { "›" } else { " " };
      let label_style = if focused {
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Gray)
      };
      let mut value = field.display();
      if focused && matches!(field.kind, FieldKind::Text | FieldKind::Secret) {
        value.push('_');
      }
      Line::from(vec![
        Span::styled(format!("{marker} {:<14}", field.label), label_style),
        Span::raw(value),
      ])
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use absensi_core::{registry::InMemoryRegistry, seed};
  use chrono::NaiveDate;
  use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
  use ratatui::{Terminal, backend::TestBackend};

  use super::*;
  use crate::toast::Toasts;

  fn app() -> App {
    let registry =
      InMemoryRegistry::new(seed::default_records(), Toasts::new()).unwrap();
    App::new(
      registry,
      seed::default_entries(),
      None,
      15,
      NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
    )
  }

  fn render(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal.draw(|f| draw(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
      for x in 0..buffer.area.width {
        out.push_str(buffer[(x, y)].symbol());
      }
      out.push('\n');
    }
    out
  }

  fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
  }

  #[test]
  fn dashboard_shows_counts() {
    let screen = render(&app());
    assert!(screen.contains("F1 Dashboard"));
    assert!(screen.contains("Total employees"));
    assert!(screen.contains("2025-08-01"));
    assert!(screen.contains("^O sign out"));
  }

  #[test]
  fn absence_screen_lists_both_panels() {
    let mut app = app();
    press(&mut app, KeyCode::F(3));
    let screen = render(&app);
    assert!(screen.contains("Andi Wijaya"));
    assert!(screen.contains("Dewi Sartika"));
    assert!(screen.contains("Disabled (1)"));
    assert!(screen.contains("Active (3)"));
  }

  #[test]
  fn confirm_dialog_names_the_employee() {
    let mut app = app();
    press(&mut app, KeyCode::F(3));
    press(&mut app, KeyCode::Char('d'));
    let screen = render(&app);
    assert!(screen.contains("Disable employee"));
    assert!(screen.contains("Andi Wijaya?"));
  }

  #[test]
  fn toast_replaces_hints() {
    let mut app = app();
    press(&mut app, KeyCode::F(2));
    press(&mut app, KeyCode::Enter);
    let screen = render(&app);
    assert!(screen.contains("Incomplete data"));
  }

  #[test]
  fn export_screen_lists_columns() {
    let mut app = app();
    press(&mut app, KeyCode::F(4));
    let screen = render(&app);
    assert!(screen.contains("Worked hours"));
    assert!(screen.contains("No exports yet"));
  }
}
