//! Login form.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Style},
  text::Line,
  widgets::Paragraph,
};

use super::{centered, form_lines, panel};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let popup = centered(area, 48, 8);
  let block = panel("Admin login", true);
  let inner = block.inner(popup);
  f.render_widget(block, popup);

  let mut lines = vec![
    Line::styled(
      "Non-ASN attendance dashboard",
      Style::default().fg(Color::DarkGray),
    ),
    Line::from(""),
  ];
  lines.extend(form_lines(&app.login, true));
  f.render_widget(Paragraph::new(lines), inner);
}
