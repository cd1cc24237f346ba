//! The `EmployeeRegistry` trait and the status transition it reports.
//!
//! Callers only ever see records through this trait; the two status
//! operations are the whole mutation surface.

use serde::{Deserialize, Serialize};

use crate::{
  Result,
  record::{AttendanceExceptionRecord, EmployeeId, EmployeeStatus},
};

/// Outcome of a status operation on one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
  pub id:   EmployeeId,
  pub from: EmployeeStatus,
  pub to:   EmployeeStatus,
}

impl StatusChange {
  /// `false` when the record already had the requested status.
  pub fn changed(&self) -> bool { self.from != self.to }
}

/// Owner of the authoritative set of attendance-exception records.
///
/// Both transitions are allowed at any time for an existing record; applying
/// the status a record already has leaves the registry untouched.
pub trait EmployeeRegistry {
  /// All records in insertion order.
  fn records(&self) -> &[AttendanceExceptionRecord];

  fn get(&self, id: EmployeeId) -> Option<&AttendanceExceptionRecord> {
    self.records().iter().find(|r| r.id == id)
  }

  /// Revoke access. Returns [`crate::Error::RecordNotFound`] for an unknown
  /// id, in which case nothing changes.
  fn disable(&mut self, id: EmployeeId) -> Result<StatusChange>;

  /// Restore access. Symmetric to [`EmployeeRegistry::disable`].
  fn enable(&mut self, id: EmployeeId) -> Result<StatusChange>;

  /// Active records in insertion order.
  fn list_active(&self) -> Vec<&AttendanceExceptionRecord> {
    self
      .records()
      .iter()
      .filter(|r| r.status.is_active())
      .collect()
  }

  /// Disabled records. Ordering is defined by the implementation.
  fn list_disabled(&self) -> Vec<&AttendanceExceptionRecord>;
}
