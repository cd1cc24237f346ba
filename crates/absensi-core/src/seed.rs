//! Seed data: the built-in demo set and a JSON loader for external sets.

use std::path::Path;

use chrono::{NaiveDate, NaiveTime};

use crate::{
  Result,
  attendance::AttendanceEntry,
  record::{AttendanceExceptionRecord, EmployeeId, EmployeeStatus},
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn time(h: u32, m: u32) -> NaiveTime {
  NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn record(
  id: u32,
  name: &str,
  unit: &str,
  division: &str,
  phone_number: &str,
  consecutive_absent_days: u32,
  last_attendance_date: NaiveDate,
  status: EmployeeStatus,
) -> AttendanceExceptionRecord {
  AttendanceExceptionRecord {
    id: EmployeeId(id),
    name: name.into(),
    unit: unit.into(),
    division: division.into(),
    phone_number: phone_number.into(),
    consecutive_absent_days,
    last_attendance_date,
    status,
  }
}

/// Four employees flagged for 15+ consecutive days of absence; the last one
/// starts disabled.
pub fn default_records() -> Vec<AttendanceExceptionRecord> {
  use EmployeeStatus::{Active, Disabled};
  vec![
    record(1, "Andi Wijaya", "Sekretariat", "Sekretariat", "081234567890", 18, date(2024, 1, 15), Active),
    record(2, "Sri Rahayu", "IKP", "JQR", "081234567891", 22, date(2024, 1, 10), Active),
    record(3, "Muhammad Ikhsan", "IKP", "JQR", "081234567892", 25, date(2024, 1, 8), Active),
    record(4, "Dewi Sartika", "Bagian Keuangan", "Accounting", "081234567893", 30, date(2024, 1, 5), Disabled),
  ]
}

/// Daily scan entries shown on the attendance listing.
pub fn default_entries() -> Vec<AttendanceEntry> {
  let day = date(2025, 8, 1);
  vec![
    AttendanceEntry {
      id:        1,
      name:      "Ahmad Susanto".into(),
      division:  "Sekretariat".into(),
      date:      day,
      check_in:  time(8, 15),
      check_out: time(17, 30),
      mood:      "Neutral".into(),
      note:      "Finished the system update".into(),
    },
    AttendanceEntry {
      id:        2,
      name:      "Siti Nurhaliza".into(),
      division:  "Sekretariat".into(),
      date:      day,
      check_in:  time(8, 0),
      check_out: time(17, 0),
      mood:      "Neutral".into(),
      note:      "Monthly report completed".into(),
    },
    AttendanceEntry {
      id:        3,
      name:      "Budi Santoso".into(),
      division:  "Sekretariat".into(),
      date:      day,
      check_in:  time(7, 45),
      check_out: time(16, 45),
      mood:      "-".into(),
      note:      "Routine patrol done".into(),
    },
  ]
}

/// Read a JSON array of records from `path`.
pub fn load_records(path: &Path) -> Result<Vec<AttendanceExceptionRecord>> {
  let raw = std::fs::read_to_string(path)?;
  Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Error;

  #[test]
  fn default_records_have_one_disabled() {
    let records = default_records();
    assert_eq!(records.len(), 4);
    let disabled: Vec<_> = records
      .iter()
      .filter(|r| r.status == EmployeeStatus::Disabled)
      .map(|r| r.id.0)
      .collect();
    assert_eq!(disabled, vec![4]);
  }

  #[test]
  fn load_records_reads_json_file() {
    let path = std::env::temp_dir()
      .join(format!("absensi-seed-{}.json", std::process::id()));
    let json = serde_json::to_string(&default_records()).unwrap();
    std::fs::write(&path, json).unwrap();

    let loaded = load_records(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, default_records());
  }

  #[test]
  fn load_records_missing_file_is_io_error() {
    let path = std::env::temp_dir().join("absensi-does-not-exist.json");
    assert!(matches!(load_records(&path), Err(Error::Io(_))));
  }

  #[test]
  fn load_records_rejects_unknown_status() {
    let path = std::env::temp_dir()
      .join(format!("absensi-bad-seed-{}.json", std::process::id()));
    std::fs::write(
      &path,
      r#"[{"id":1,"name":"x","unit":"u","division":"d","phone_number":"",
           "consecutive_absent_days":1,"last_attendance_date":"2024-01-01",
           "status":"suspended"}]"#,
    )
    .unwrap();
    let result = load_records(&path);
    std::fs::remove_file(&path).ok();
    assert!(matches!(result, Err(Error::Serialization(_))));
  }
}
