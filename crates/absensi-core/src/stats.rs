//! Dashboard statistics derived from the registry and the attendance log.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{attendance::AttendanceEntry, store::EmployeeRegistry};

/// Default number of consecutive absent days that flags an employee.
pub const DEFAULT_ABSENCE_THRESHOLD: u32 = 15;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
  pub total_employees:      usize,
  pub active:               usize,
  pub disabled:             usize,
  /// Distinct people with a scan on `today`.
  pub present_today:        usize,
  /// Active employees at or above the absence threshold.
  pub flagged:              usize,
  /// Mean worked hours over all scans; `None` without scans.
  pub average_worked_hours: Option<f64>,
}

impl DashboardStats {
  pub fn compute<R: EmployeeRegistry + ?Sized>(
    registry: &R,
    entries: &[AttendanceEntry],
    today: NaiveDate,
    threshold: u32,
  ) -> Self {
    let records = registry.records();
    let active = records.iter().filter(|r| r.status.is_active()).count();
    let flagged = records
      .iter()
      .filter(|r| r.status.is_active() && r.consecutive_absent_days >= threshold)
      .count();

    let mut present: Vec<&str> = entries
      .iter()
      .filter(|e| e.date == today)
      .map(|e| e.name.as_str())
      .collect();
    present.sort_unstable();
    present.dedup();

    let average_worked_hours = (!entries.is_empty()).then(|| {
      entries.iter().map(AttendanceEntry::worked_hours).sum::<f64>()
        / entries.len() as f64
    });

    Self {
      total_employees: records.len(),
      active,
      disabled: records.len() - active,
      present_today: present.len(),
      flagged,
      average_worked_hours,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    notify::Notification, record::EmployeeId, registry::InMemoryRegistry, seed,
  };

  fn day(s: &str) -> NaiveDate { s.parse().unwrap() }

  #[test]
  fn counts_follow_registry_state() {
    let mut registry =
      InMemoryRegistry::new(seed::default_records(), Vec::<Notification>::new())
        .unwrap();
    let entries = seed::default_entries();

    let stats = DashboardStats::compute(
      &registry,
      &entries,
      day("2025-08-01"),
      DEFAULT_ABSENCE_THRESHOLD,
    );
    assert_eq!(stats.total_employees, 4);
    assert_eq!(stats.active, 3);
    assert_eq!(stats.disabled, 1);
    assert_eq!(stats.flagged, 3);
    assert_eq!(stats.present_today, 3);

    registry.disable(EmployeeId(2)).unwrap();
    let stats =
      DashboardStats::compute(&registry, &entries, day("2025-08-02"), 20);
    assert_eq!(stats.active, 2);
    assert_eq!(stats.disabled, 2);
    // #1 has 18 days, #3 has 25.
    assert_eq!(stats.flagged, 1);
    assert_eq!(stats.present_today, 0);
  }

  #[test]
  fn average_hours() {
    let registry =
      InMemoryRegistry::new(Vec::new(), Vec::<Notification>::new()).unwrap();
    let entries = seed::default_entries();
    let stats =
      DashboardStats::compute(&registry, &entries, day("2025-08-01"), 15);
    // 8.25 + 8.0 + 8.0
    let avg = stats.average_worked_hours.unwrap();
    assert!((avg - 24.25 / 3.0).abs() < 1e-9);

    let stats = DashboardStats::compute(&registry, &[], day("2025-08-01"), 15);
    assert_eq!(stats.average_worked_hours, None);
    assert_eq!(stats.total_employees, 0);
  }
}
