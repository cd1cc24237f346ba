//! Export screen: configuration form, the last plan and the export history.

use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::Paragraph,
};

use super::{form_lines, panel};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let [form_area, side] =
    Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
      .areas(area);
  let [plan_area, history_area] =
    Layout::vertical([Constraint::Length(9), Constraint::Min(0)]).areas(side);

  let block = panel("Export configuration", true);
  let inner = block.inner(form_area);
  f.render_widget(block, form_area);

  let mut lines = form_lines(&app.export_form, true);
  // Separate the column checks from the settings above them.
  if lines.len() > 5 {
    lines.insert(5, Line::styled(
      "  Columns",
      Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    ));
  }
  f.render_widget(Paragraph::new(lines), inner);

  draw_plan(f, plan_area, app);
  draw_history(f, history_area, app);
}

fn draw_plan(f: &mut Frame, area: Rect, app: &App) {
  let block = panel("Last plan", false);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let Some(plan) = &app.last_plan else {
    f.render_widget(
      Paragraph::new(Line::styled(
        "Choose a data type and format, then press Enter.",
        Style::default().fg(Color::DarkGray),
      )),
      inner,
    );
    return;
  };

  let key = Style::default().fg(Color::Cyan);
  let range = match (plan.start_date, plan.end_date) {
    (Some(s), Some(e)) => format!("{s} to {e}"),
    (Some(s), None) => format!("from {s}"),
    (None, Some(e)) => format!("until {e}"),
    (None, None) => "all dates".to_owned(),
  };
  let columns = plan
    .columns
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(", ");

  let lines = vec![
    Line::from(vec![Span::styled("File     ", key), Span::raw(plan.file_name())]),
    Line::from(vec![
      Span::styled("Data     ", key),
      Span::raw(plan.data_type.to_string()),
    ]),
    Line::from(vec![Span::styled("Unit     ", key), Span::raw(plan.unit.label().to_owned())]),
    Line::from(vec![Span::styled("Range    ", key), Span::raw(range)]),
    Line::from(vec![Span::styled("Columns  ", key), Span::raw(columns)]),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}

fn draw_history(f: &mut Frame, area: Rect, app: &App) {
  let block = panel(format!("History ({})", app.export_history.len()), false);
  let inner = block.inner(area);
  f.render_widget(block, area);

  if app.export_history.is_empty() {
    f.render_widget(
      Paragraph::new(Line::styled(
        "No exports yet.",
        Style::default().fg(Color::DarkGray),
      )),
      inner,
    );
    return;
  }

  let lines: Vec<Line> = app
    .export_history
    .iter()
    .map(|record| {
      Line::from(vec![
        Span::styled(
          format!("{} ", record.at.format("%H:%M:%S")),
          Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
          format!("{:<5}", record.format.to_string().to_uppercase()),
          Style::default().fg(Color::Yellow),
        ),
        Span::raw(record.file_name.clone()),
      ])
    })
    .collect();
  f.render_widget(Paragraph::new(lines), inner);
}
