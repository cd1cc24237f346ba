//! Filter evaluator for the attendance listing screens.
//!
//! A [`ValidatedFilter`] can only be obtained through [`validate`], so a view
//! is never materialized from incomplete criteria. The check is UI gating,
//! not an access control boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  notify::{Notification, NotificationSink},
};

// ─── Criteria ────────────────────────────────────────────────────────────────

/// Raw filter input as collected from a form. Lives for one query cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
  pub unit:       String,
  pub start_date: Option<NaiveDate>,
  pub end_date:   Option<NaiveDate>,
}

impl FilterCriteria {
  /// Build criteria from text fields. Blank dates become `None`; non-blank
  /// dates must be `YYYY-MM-DD`.
  pub fn from_form(unit: &str, start: &str, end: &str) -> Result<Self> {
    Ok(Self {
      unit:       unit.trim().to_owned(),
      start_date: parse_optional_date(start)?,
      end_date:   parse_optional_date(end)?,
    })
  }
}

fn parse_optional_date(raw: &str) -> Result<Option<NaiveDate>> {
  let raw = raw.trim();
  if raw.is_empty() {
    return Ok(None);
  }
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .map(Some)
    .map_err(|_| Error::InvalidDate(raw.to_owned()))
}

// ─── Unit selector ───────────────────────────────────────────────────────────

/// Prefix shared by the technical implementation units excluded by
/// [`UnitSelector::AllExceptUptd`].
pub const UPTD_PREFIX: &str = "UPTD";

/// How the unit field restricts a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum UnitSelector {
  /// Sentinel "all units"; bypasses the unit predicate.
  All,
  /// Every unit except the UPTD ones.
  AllExceptUptd,
  /// Exact, case-sensitive match against unit or division.
  Exact(String),
}

impl UnitSelector {
  pub fn parse(raw: &str) -> Self {
    let trimmed = raw.trim();
    match trimmed.to_lowercase().as_str() {
      "all" | "semua" | "- semua -" | "--semua--" | "semua unit" => Self::All,
      "semua kecuali uptd" => Self::AllExceptUptd,
      _ => Self::Exact(trimmed.to_owned()),
    }
  }

  /// Whether a row tagged with `groups` (unit, division, ...) is selected.
  pub fn matches(&self, groups: &[&str]) -> bool {
    match self {
      Self::All => true,
      Self::AllExceptUptd => !groups.iter().any(|g| g.starts_with(UPTD_PREFIX)),
      Self::Exact(unit) => groups.iter().any(|g| *g == unit.as_str()),
    }
  }

  /// Label for notifications and headers.
  pub fn label(&self) -> &str {
    match self {
      Self::All => "all units",
      Self::AllExceptUptd => "all units except UPTD",
      Self::Exact(unit) => unit,
    }
  }
}

// ─── Validated filter ────────────────────────────────────────────────────────

/// Proof that criteria passed [`validate`]. Carries the values unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFilter {
  unit:       UnitSelector,
  start_date: NaiveDate,
  end_date:   NaiveDate,
}

impl ValidatedFilter {
  pub fn unit(&self) -> &UnitSelector { &self.unit }

  pub fn start_date(&self) -> NaiveDate { self.start_date }

  pub fn end_date(&self) -> NaiveDate { self.end_date }

  /// Inclusive on both ends. An inverted range contains nothing.
  pub fn contains_date(&self, date: NaiveDate) -> bool {
    self.start_date <= date && date <= self.end_date
  }
}

/// Reject criteria with any required field empty.
pub fn validate(criteria: &FilterCriteria) -> Result<ValidatedFilter> {
  let (Some(start_date), Some(end_date)) =
    (criteria.start_date, criteria.end_date)
  else {
    return Err(Error::MissingField);
  };
  if criteria.unit.trim().is_empty() {
    return Err(Error::MissingField);
  }

  Ok(ValidatedFilter {
    unit: UnitSelector::parse(&criteria.unit),
    start_date,
    end_date,
  })
}

/// [`validate`], reporting the outcome to `sink`.
pub fn validate_and_notify<S: NotificationSink + ?Sized>(
  criteria: &FilterCriteria,
  sink: &mut S,
) -> Result<ValidatedFilter> {
  match validate(criteria) {
    Ok(filter) => {
      sink.notify(Notification::info(
        "Data loaded",
        format!("Showing attendance data for {}", filter.unit().label()),
      ));
      Ok(filter)
    }
    Err(e) => {
      tracing::debug!(?criteria, "filter rejected");
      sink.notify(Notification::destructive(
        "Incomplete data",
        "Please fill in every filter field",
      ));
      Err(e)
    }
  }
}
