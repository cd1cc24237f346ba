//! In-memory [`EmployeeRegistry`] backed by a `Vec`.

use std::collections::HashSet;

use crate::{
  Error, Result,
  notify::{Notification, NotificationSink},
  record::{AttendanceExceptionRecord, EmployeeId, EmployeeStatus},
  store::{EmployeeRegistry, StatusChange},
};

/// Registry holding records in memory and reporting every change to a
/// [`NotificationSink`].
///
/// Disabled records are listed in transition order: records seeded as
/// disabled come first (in insertion order), then each record in the order it
/// was disabled. Re-enabling a record drops it from that order; disabling it
/// again appends it at the end.
#[derive(Debug)]
pub struct InMemoryRegistry<N> {
  records:        Vec<AttendanceExceptionRecord>,
  disabled_order: Vec<EmployeeId>,
  sink:           N,
}

impl<N: NotificationSink> InMemoryRegistry<N> {
  /// Build a registry from seed records. Fails on the first repeated id.
  pub fn new(records: Vec<AttendanceExceptionRecord>, sink: N) -> Result<Self> {
    let mut seen = HashSet::with_capacity(records.len());
    if let Some(dup) = records.iter().find(|r| !seen.insert(r.id)) {
      return Err(Error::DuplicateId(dup.id));
    }

    let disabled_order = records
      .iter()
      .filter(|r| !r.status.is_active())
      .map(|r| r.id)
      .collect();

    tracing::debug!(count = records.len(), "registry seeded");

    Ok(Self {
      records,
      disabled_order,
      sink,
    })
  }

  pub fn sink(&self) -> &N { &self.sink }

  pub fn sink_mut(&mut self) -> &mut N { &mut self.sink }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  fn set_status(
    &mut self,
    id: EmployeeId,
    to: EmployeeStatus,
  ) -> Result<StatusChange> {
    let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
      tracing::warn!(%id, requested = %to, "status change for unknown employee");
      self.sink.notify(Notification::destructive(
        "Employee not found",
        format!("No employee with id {id}; nothing was changed"),
      ));
      return Err(Error::RecordNotFound(id));
    };

    let from = record.status;
    if from == to {
      tracing::debug!(%id, status = %to, "status unchanged");
      return Ok(StatusChange { id, from, to });
    }

    record.status = to;
    let notification = match to {
      EmployeeStatus::Disabled => {
        self.disabled_order.push(id);
        Notification::info(
          "Employee disabled",
          format!("{} has been disabled in the system", record.name),
        )
      }
      EmployeeStatus::Active => {
        self.disabled_order.retain(|d| *d != id);
        Notification::info(
          "Employee enabled",
          format!("{} has been re-enabled", record.name),
        )
      }
    };

    tracing::info!(%id, %from, %to, "employee status changed");
    self.sink.notify(notification);

    Ok(StatusChange { id, from, to })
  }
}

impl<N: NotificationSink> EmployeeRegistry for InMemoryRegistry<N> {
  fn records(&self) -> &[AttendanceExceptionRecord] { &self.records }

  fn disable(&mut self, id: EmployeeId) -> Result<StatusChange> {
    self.set_status(id, EmployeeStatus::Disabled)
  }

  fn enable(&mut self, id: EmployeeId) -> Result<StatusChange> {
    self.set_status(id, EmployeeStatus::Active)
  }

  fn list_disabled(&self) -> Vec<&AttendanceExceptionRecord> {
    self
      .disabled_order
      .iter()
      .filter_map(|id| self.get(*id))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{notify::Severity, seed};

  fn registry() -> InMemoryRegistry<Vec<Notification>> {
    InMemoryRegistry::new(seed::default_records(), Vec::new()).unwrap()
  }

  fn ids(records: &[&AttendanceExceptionRecord]) -> Vec<u32> {
    records.iter().map(|r| r.id.0).collect()
  }

  #[test]
  fn duplicate_ids_are_rejected() {
    let mut records = seed::default_records();
    records[2].id = EmployeeId(1);
    let err = InMemoryRegistry::new(records, Vec::new()).unwrap_err();
    assert!(matches!(err, Error::DuplicateId(EmployeeId(1))));
  }

  #[test]
  fn disable_emits_notification_naming_employee() {
    let mut r = registry();
    let change = r.disable(EmployeeId(1)).unwrap();
    assert!(change.changed());

    let notes = r.sink();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Employee disabled");
    assert!(notes[0].description.contains("Andi Wijaya"));
    assert_eq!(notes[0].severity, Severity::Info);
  }

  #[test]
  fn enable_emits_notification() {
    let mut r = registry();
    r.enable(EmployeeId(4)).unwrap();
    assert_eq!(r.sink()[0].title, "Employee enabled");
    assert!(r.sink()[0].description.contains("Dewi Sartika"));
  }

  #[test]
  fn repeated_status_is_silent() {
    let mut r = registry();
    let change = r.disable(EmployeeId(4)).unwrap();
    assert!(!change.changed());
    assert!(r.sink().is_empty());
  }

  #[test]
  fn unknown_id_is_reported_and_changes_nothing() {
    let mut r = registry();
    let before = r.records().to_vec();

    let err = r.disable(EmployeeId(99)).unwrap_err();
    assert!(matches!(err, Error::RecordNotFound(EmployeeId(99))));
    assert!(matches!(
      r.enable(EmployeeId(99)),
      Err(Error::RecordNotFound(_))
    ));

    assert_eq!(r.records(), before.as_slice());
    assert_eq!(r.sink().len(), 2);
    assert!(r.sink().iter().all(|n| n.severity == Severity::Destructive));
  }

  #[test]
  fn re_disabling_moves_record_to_the_end() {
    let mut r = registry();
    r.disable(EmployeeId(1)).unwrap();
    r.disable(EmployeeId(3)).unwrap();
    r.enable(EmployeeId(1)).unwrap();
    r.disable(EmployeeId(1)).unwrap();
    assert_eq!(ids(&r.list_disabled()), vec![4, 3, 1]);
  }
}
