//! Scenario tests for registry, evaluator and materializer working together.

use std::collections::BTreeSet;

use crate::{
  Error,
  filter::{FilterCriteria, validate},
  notify::Notification,
  record::{AttendanceExceptionRecord, EmployeeId, EmployeeStatus},
  registry::InMemoryRegistry,
  seed,
  store::EmployeeRegistry,
  view::{absence_view, materialize},
};

type Registry = InMemoryRegistry<Vec<Notification>>;

fn registry() -> Registry {
  InMemoryRegistry::new(seed::default_records(), Vec::new())
    .expect("seed ids are unique")
}

fn ids(records: &[&AttendanceExceptionRecord]) -> Vec<u32> {
  records.iter().map(|r| r.id.0).collect()
}

/// Active and disabled lists are disjoint and together cover every id.
fn assert_partition(r: &Registry) {
  let active: BTreeSet<_> = r.list_active().iter().map(|x| x.id).collect();
  let disabled: BTreeSet<_> = r.list_disabled().iter().map(|x| x.id).collect();
  let all: BTreeSet<_> = r.records().iter().map(|x| x.id).collect();

  assert!(active.is_disjoint(&disabled));
  assert_eq!(active.union(&disabled).copied().collect::<BTreeSet<_>>(), all);
  assert_eq!(r.list_active().len() + r.list_disabled().len(), r.len());
}

// ─── Seed scenarios ──────────────────────────────────────────────────────────

#[test]
fn seed_partitions_by_status() {
  let r = registry();
  assert_eq!(ids(&r.list_active()), vec![1, 2, 3]);
  assert_eq!(ids(&r.list_disabled()), vec![4]);
  assert_partition(&r);
}

#[test]
fn disabling_appends_to_disabled_in_transition_order() {
  let mut r = registry();
  r.disable(EmployeeId(2)).unwrap();

  assert_eq!(ids(&r.list_active()), vec![1, 3]);
  assert_eq!(ids(&r.list_disabled()), vec![4, 2]);
  assert_partition(&r);
}

#[test]
fn absence_view_follows_mutations() {
  let mut r = registry();
  r.disable(EmployeeId(3)).unwrap();
  r.enable(EmployeeId(4)).unwrap();

  let view = absence_view(&r);
  let active: Vec<_> = view.active.iter().map(|row| row.record.id.0).collect();
  let disabled: Vec<_> = view.disabled.iter().map(|row| row.record.id.0).collect();
  assert_eq!(active, vec![1, 2, 4]);
  assert_eq!(disabled, vec![3]);
}

// ─── Laws ────────────────────────────────────────────────────────────────────

#[test]
fn disable_then_enable_restores_active_records() {
  for id in [1, 2, 3] {
    let mut r = registry();
    let before = r.records().to_vec();

    r.disable(EmployeeId(id)).unwrap();
    r.enable(EmployeeId(id)).unwrap();

    assert_eq!(r.records(), before.as_slice());
    assert_partition(&r);
  }
}

#[test]
fn enable_then_disable_restores_disabled_records() {
  let mut r = registry();
  let before = r.records().to_vec();

  r.enable(EmployeeId(4)).unwrap();
  r.disable(EmployeeId(4)).unwrap();

  assert_eq!(r.records(), before.as_slice());
  assert_eq!(ids(&r.list_disabled()), vec![4]);
}

#[test]
fn disable_is_idempotent() {
  let mut r = registry();
  r.disable(EmployeeId(2)).unwrap();
  let records = r.records().to_vec();
  let disabled = ids(&r.list_disabled());
  let notified = r.sink().len();

  let change = r.disable(EmployeeId(2)).unwrap();
  assert!(!change.changed());
  assert_eq!(r.records(), records.as_slice());
  assert_eq!(ids(&r.list_disabled()), disabled);
  assert_eq!(r.sink().len(), notified);
}

#[test]
fn mutation_touches_only_the_addressed_record() {
  let mut r = registry();
  let before = r.records().to_vec();
  r.disable(EmployeeId(1)).unwrap();

  for (old, new) in before.iter().zip(r.records()) {
    if old.id == EmployeeId(1) {
      assert_eq!(new.status, EmployeeStatus::Disabled);
      assert_eq!(
        AttendanceExceptionRecord {
          status: old.status,
          ..new.clone()
        },
        *old
      );
    } else {
      assert_eq!(new, old);
    }
  }
}

#[test]
fn partition_holds_over_a_mutation_sequence() {
  let mut r = registry();
  let script: [(u32, bool); 10] = [
    (1, false),
    (2, false),
    (4, true),
    (1, true),
    (3, false),
    (3, false),
    (9, false),
    (2, true),
    (4, false),
    (1, false),
  ];
  for (id, enable) in script {
    let result = if enable {
      r.enable(EmployeeId(id))
    } else {
      r.disable(EmployeeId(id))
    };
    if id == 9 {
      assert!(matches!(result, Err(Error::RecordNotFound(_))));
    }
    assert_partition(&r);
  }
  assert_eq!(ids(&r.list_active()), vec![2]);
  assert_eq!(ids(&r.list_disabled()), vec![3, 4, 1]);
}

// ─── Evaluator + materializer ────────────────────────────────────────────────

#[test]
fn evaluator_gates_materialization() {
  let incomplete = FilterCriteria::from_form("", "2024-01-01", "2024-01-31").unwrap();
  assert!(matches!(validate(&incomplete), Err(Error::MissingField)));

  let complete =
    FilterCriteria::from_form("Finance", "2024-01-01", "2024-01-31").unwrap();
  let filter = validate(&complete).unwrap();

  let r = registry();
  assert!(materialize(&r, Some(&filter)).is_empty());

  let filter = validate(
    &FilterCriteria::from_form("Sekretariat", "2024-01-01", "2024-01-31").unwrap(),
  )
  .unwrap();
  let rows = materialize(&r, Some(&filter));
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].position, 1);
  assert_eq!(rows[0].record.name, "Andi Wijaya");
}
