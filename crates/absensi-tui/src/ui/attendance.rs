//! Attendance screen: filter form plus the filtered listings.

use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Color, Modifier, Style},
  text::Line,
  widgets::{Paragraph, Row, Table},
};

use super::{form_lines, panel};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let [form_area, entries_area, flagged_area] = Layout::vertical([
    Constraint::Length(5),
    Constraint::Percentage(60),
    Constraint::Min(0),
  ])
  .areas(area);

  let block = panel("Filter", true);
  let inner = block.inner(form_area);
  f.render_widget(block, form_area);
  f.render_widget(Paragraph::new(form_lines(&app.attendance_form, true)), inner);

  let header_style = Style::default()
    .fg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

  // Nothing is listed until the filter has been applied.
  let (Some(entries), Some(flagged)) = (app.attendance_rows(), app.exception_rows())
  else {
    let block = panel("Attendance", false);
    let inner = block.inner(entries_area);
    f.render_widget(block, entries_area);
    f.render_widget(
      Paragraph::new(Line::styled(
        "Fill in the date range and unit, then press Enter.",
        Style::default().fg(Color::DarkGray),
      )),
      inner,
    );
    return;
  };

  let label = app
    .attendance_filter
    .as_ref()
    .map(|f| f.unit().label().to_owned())
    .unwrap_or_default();

  let rows = entries.iter().map(|row| {
    let e = row.record;
    Row::new(vec![
      row.position.to_string(),
      e.name.clone(),
      e.division.clone(),
      e.date.format("%Y-%m-%d").to_string(),
      e.check_in.format("%H:%M").to_string(),
      e.check_out.format("%H:%M").to_string(),
      format!("{:.1}", e.worked_hours()),
      e.mood.clone(),
      e.note.clone(),
    ])
  });
  let table = Table::new(rows, [
    Constraint::Length(4),
    Constraint::Min(16),
    Constraint::Length(14),
    Constraint::Length(11),
    Constraint::Length(6),
    Constraint::Length(6),
    Constraint::Length(6),
    Constraint::Length(10),
    Constraint::Min(10),
  ])
  .header(
    Row::new(vec![
      "No", "Name", "Division", "Date", "In", "Out", "Hours", "Mood", "Note",
    ])
    .style(header_style),
  )
  .block(panel(format!("Attendance · {label} ({})", entries.len()), false));
  f.render_widget(table, entries_area);

  let rows = flagged.iter().map(|row| {
    let r = row.record;
    Row::new(vec![
      row.position.to_string(),
      r.name.clone(),
      r.unit.clone(),
      r.consecutive_absent_days.to_string(),
      r.last_attendance_date.format("%Y-%m-%d").to_string(),
      r.status.to_string(),
    ])
  });
  let table = Table::new(rows, [
    Constraint::Length(4),
    Constraint::Min(16),
    Constraint::Length(18),
    Constraint::Length(6),
    Constraint::Length(11),
    Constraint::Length(9),
  ])
  .header(
    Row::new(vec!["No", "Name", "Unit", "Days", "Last seen", "Status"])
      .style(header_style),
  )
  .block(panel(format!("Absence records ({})", flagged.len()), false));
  f.render_widget(table, flagged_area);
}
