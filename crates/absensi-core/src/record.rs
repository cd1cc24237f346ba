//! Attendance-exception records, one per employee under review.
//!
//! A record is flagged because the employee has been absent for too many
//! consecutive days. Every field except [`EmployeeStatus`] is fixed once the
//! registry is built.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Unique, never-reused employee identifier.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EmployeeId(pub u32);

impl fmt::Display for EmployeeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

impl From<u32> for EmployeeId {
  fn from(value: u32) -> Self { Self(value) }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Access status of a non-ASN employee. There is no third state.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EmployeeStatus {
  /// Still subject to action.
  #[default]
  Active,
  /// Access revoked.
  Disabled,
}

impl EmployeeStatus {
  pub fn is_active(&self) -> bool { matches!(self, Self::Active) }
}

// ─── Record ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceExceptionRecord {
  pub id:                      EmployeeId,
  pub name:                    String,
  /// Work unit (organisational grouping); free-form.
  pub unit:                    String,
  pub division:                String,
  pub phone_number:            String,
  pub consecutive_absent_days: u32,
  pub last_attendance_date:    NaiveDate,
  #[serde(default)]
  pub status:                  EmployeeStatus,
}
