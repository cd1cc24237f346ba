//! Dashboard: summary cards and quick actions.

use absensi_core::notify::Severity;
use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use super::panel;
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let stats = app.stats();

  let [cards, actions] =
    Layout::vertical([Constraint::Length(5), Constraint::Min(0)]).areas(area);

  let average = stats
    .average_worked_hours
    .map(|h| format!("{h:.1} h"))
    .unwrap_or_else(|| "-".into());

  let card_data = [
    ("Total employees".to_owned(), stats.total_employees.to_string(), Color::Cyan),
    ("Present today".to_owned(), stats.present_today.to_string(), Color::Green),
    (
      format!("Absent {}+ days", app.threshold),
      stats.flagged.to_string(),
      Color::Yellow,
    ),
    ("Disabled".to_owned(), stats.disabled.to_string(), Color::Red),
    ("Avg. worked".to_owned(), average, Color::Magenta),
  ];

  let slots = Layout::horizontal([Constraint::Ratio(1, 5); 5]).split(cards);
  for ((label, value, color), slot) in card_data.into_iter().zip(slots.iter()) {
    let block = Block::default()
      .title(format!(" {label} "))
      .borders(Borders::ALL)
      .border_style(Style::default().fg(color));
    let inner = block.inner(*slot);
    f.render_widget(block, *slot);
    f.render_widget(
      Paragraph::new(Line::styled(
        value,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
      ))
      .centered(),
      inner,
    );
  }

  let [actions, activity] =
    Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
      .areas(actions);
  draw_activity(f, activity, app);

  let block = panel("Quick actions", false);
  let inner = block.inner(actions);
  f.render_widget(block, actions);

  let key = Style::default()
    .fg(Color::Cyan)
    .add_modifier(Modifier::BOLD);
  let lines = vec![
    Line::from(vec![
      Span::styled(" [2] ", key),
      Span::raw("Attendance: filter daily scans by unit and date range"),
    ]),
    Line::from(vec![
      Span::styled(" [3] ", key),
      Span::raw(format!(
        "Absence: review the {} active employees absent {}+ days",
        stats.flagged, app.threshold
      )),
    ]),
    Line::from(vec![
      Span::styled(" [4] ", key),
      Span::raw("Export: build a report plan"),
    ]),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}

/// Most recent notifications, newest first.
fn draw_activity(f: &mut Frame, area: Rect, app: &App) {
  let toasts = app.toasts();
  let block = panel(format!("Recent activity ({})", toasts.len()), false);
  let inner = block.inner(area);
  f.render_widget(block, area);

  if toasts.is_empty() {
    f.render_widget(
      Paragraph::new(Line::styled("No activity yet.", Style::default().fg(Color::DarkGray))),
      inner,
    );
    return;
  }

  let lines: Vec<Line> = toasts
    .iter()
    .rev()
    .take(inner.height as usize)
    .map(|n| {
      let color = match n.severity {
        Severity::Info => Color::Green,
        Severity::Destructive => Color::Red,
      };
      Line::from(vec![
        Span::styled("● ", Style::default().fg(color)),
        Span::styled(n.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}", n.description), Style::default().fg(Color::DarkGray)),
      ])
    })
    .collect();
  f.render_widget(Paragraph::new(lines), inner);
}
