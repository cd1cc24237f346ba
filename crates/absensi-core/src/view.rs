//! View materializer: read-side projections of the registry.
//!
//! Nothing here is stored; every view is derived on demand from the current
//! registry state and, for listings, a [`ValidatedFilter`].

use chrono::NaiveDate;

use crate::{
  attendance::AttendanceEntry,
  filter::ValidatedFilter,
  record::AttendanceExceptionRecord,
  store::EmployeeRegistry,
};

// ─── Rows ────────────────────────────────────────────────────────────────────

/// A source item plus its 1-based display position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRow<'a, T> {
  pub position: usize,
  pub record:   &'a T,
}

/// Number `items` 1..=n in iteration order. Narrow the sequence first; the
/// positions belong to what is displayed.
pub fn number<'a, T>(items: impl IntoIterator<Item = &'a T>) -> Vec<DisplayRow<'a, T>>
where
  T: 'a,
{
  items
    .into_iter()
    .enumerate()
    .map(|(i, record)| DisplayRow { position: i + 1, record })
    .collect()
}

// ─── Filtering ───────────────────────────────────────────────────────────────

/// Anything a listing filter can be applied to.
pub trait Filterable {
  /// Organisational groupings matched against the unit selector.
  fn groups(&self) -> Vec<&str>;

  /// The date checked against the filter range.
  fn date(&self) -> NaiveDate;
}

impl Filterable for AttendanceExceptionRecord {
  fn groups(&self) -> Vec<&str> { vec![self.unit.as_str(), self.division.as_str()] }

  fn date(&self) -> NaiveDate { self.last_attendance_date }
}

impl Filterable for AttendanceEntry {
  fn groups(&self) -> Vec<&str> { vec![self.division.as_str()] }

  fn date(&self) -> NaiveDate { self.date }
}

impl ValidatedFilter {
  pub fn accepts<T: Filterable>(&self, item: &T) -> bool {
    self.unit().matches(&item.groups()) && self.contains_date(item.date())
  }
}

/// Rows of `items` accepted by `filter`, in input order.
pub fn filter_rows<'a, T: Filterable>(
  items: &'a [T],
  filter: &ValidatedFilter,
) -> Vec<DisplayRow<'a, T>> {
  number(items.iter().filter(|item| filter.accepts(*item)))
}

// ─── Registry views ──────────────────────────────────────────────────────────

/// Without a filter: the active records. With one: every record (whatever its
/// status) matching unit/division and the inclusive date range.
pub fn materialize<'a, R: EmployeeRegistry + ?Sized>(
  registry: &'a R,
  filter: Option<&ValidatedFilter>,
) -> Vec<DisplayRow<'a, AttendanceExceptionRecord>> {
  match filter {
    None => number(registry.list_active()),
    Some(filter) => filter_rows(registry.records(), filter),
  }
}

/// The secondary panel of the absence screen.
pub fn materialize_disabled<R: EmployeeRegistry + ?Sized>(
  registry: &R,
) -> Vec<DisplayRow<'_, AttendanceExceptionRecord>> {
  number(registry.list_disabled())
}

/// Filtered attendance scans for the listing screen.
pub fn materialize_entries<'a>(
  entries: &'a [AttendanceEntry],
  filter: &ValidatedFilter,
) -> Vec<DisplayRow<'a, AttendanceEntry>> {
  filter_rows(entries, filter)
}

/// Both panels of the absence-management screen.
#[derive(Debug, Clone)]
pub struct AbsenceView<'a> {
  pub active:   Vec<DisplayRow<'a, AttendanceExceptionRecord>>,
  pub disabled: Vec<DisplayRow<'a, AttendanceExceptionRecord>>,
}

pub fn absence_view<R: EmployeeRegistry + ?Sized>(registry: &R) -> AbsenceView<'_> {
  AbsenceView {
    active:   materialize(registry, None),
    disabled: materialize_disabled(registry),
  }
}
