//! Daily attendance scans (check-in / check-out) for the listing screen.
//!
//! Entries are read-only; the listing only ever filters them.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Unpaid break deducted from every shift.
pub const BREAK_MINUTES: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
  pub id:        u32,
  pub name:      String,
  pub division:  String,
  pub date:      NaiveDate,
  pub check_in:  NaiveTime,
  pub check_out: NaiveTime,
  /// Self-reported mood captured at check-out; `-` when not given.
  pub mood:      String,
  pub note:      String,
}

impl AttendanceEntry {
  /// Hours between check-in and check-out less [`BREAK_MINUTES`]; never
  /// negative.
  pub fn worked_hours(&self) -> f64 {
    let minutes =
      ((self.check_out - self.check_in).num_minutes() - BREAK_MINUTES).max(0);
    minutes as f64 / 60.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(check_in: (u32, u32), check_out: (u32, u32)) -> AttendanceEntry {
    AttendanceEntry {
      id:        1,
      name:      "A".into(),
      division:  "IKP".into(),
      date:      NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
      check_in:  NaiveTime::from_hms_opt(check_in.0, check_in.1, 0).unwrap(),
      check_out: NaiveTime::from_hms_opt(check_out.0, check_out.1, 0).unwrap(),
      mood:      "-".into(),
      note:      String::new(),
    }
  }

  #[test]
  fn worked_hours_counts_quarter_hours_net_of_break() {
    assert_eq!(entry((8, 15), (17, 30)).worked_hours(), 8.25);
    assert_eq!(entry((8, 0), (17, 0)).worked_hours(), 8.0);
    assert_eq!(entry((7, 45), (16, 45)).worked_hours(), 8.0);
  }

  #[test]
  fn worked_hours_never_negative() {
    assert_eq!(entry((17, 0), (8, 0)).worked_hours(), 0.0);
    // Shorter than the break.
    assert_eq!(entry((8, 0), (8, 30)).worked_hours(), 0.0);
  }
}
