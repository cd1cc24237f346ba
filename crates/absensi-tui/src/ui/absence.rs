//! Absence screen: active and disabled employees side by side.

use absensi_core::{record::AttendanceExceptionRecord, view::DisplayRow};
use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Color, Modifier, Style},
  text::Text,
  widgets::{Paragraph, Row, Table, TableState},
};

use super::panel;
use crate::app::{App, Panel};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let show_search = app.search_active || !app.search.is_empty();
  let [tables, search] = Layout::vertical([
    Constraint::Min(0),
    Constraint::Length(u16::from(show_search)),
  ])
  .areas(area);

  let [left, right] =
    Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
      .areas(tables);

  let active = app.visible_active();
  draw_table(
    f,
    left,
    &format!("Active ({})", active.len()),
    &active,
    app.panel == Panel::Active,
    app.active_cursor,
  );

  let disabled = app.visible_disabled();
  draw_table(
    f,
    right,
    &format!("Disabled ({})", disabled.len()),
    &disabled,
    app.panel == Panel::Disabled,
    app.disabled_cursor,
  );

  if show_search {
    let text = if app.search_active {
      format!("/{}_", app.search)
    } else {
      format!("/{}", app.search)
    };
    f.render_widget(
      Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
      search,
    );
  }
}

fn draw_table(
  f: &mut Frame,
  area: Rect,
  title: &str,
  rows: &[DisplayRow<'_, AttendanceExceptionRecord>],
  focused: bool,
  cursor: usize,
) {
  let body = rows.iter().map(|row| {
    let r = row.record;
    let days = Style::default().fg(if r.consecutive_absent_days >= 20 {
      Color::Red
    } else {
      Color::Yellow
    });
    Row::new(vec![
      Text::from(row.position.to_string()),
      r.name.clone().into(),
      format!("{} / {}", r.unit, r.division).into(),
      r.phone_number.clone().into(),
      Text::styled(r.consecutive_absent_days.to_string(), days),
    ])
  });

  let table = Table::new(body, [
    Constraint::Length(4),
    Constraint::Min(16),
    Constraint::Min(14),
    Constraint::Length(13),
    Constraint::Length(5),
  ])
  .header(
    Row::new(vec!["No", "Name", "Unit / Division", "Phone", "Days"]).style(
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
  )
  .row_highlight_style(if focused {
    Style::default()
      .bg(Color::Blue)
      .fg(Color::White)
      .add_modifier(Modifier::BOLD)
  } else {
    Style::default().add_modifier(Modifier::BOLD)
  })
  .block(panel(title, focused));

  let mut state = TableState::default();
  state.select((!rows.is_empty()).then_some(cursor));
  f.render_stateful_widget(table, area, &mut state);
}
