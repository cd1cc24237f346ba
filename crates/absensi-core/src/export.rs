//! Export configuration and planning.
//!
//! A plan describes what a report generator would produce (data set, format,
//! columns, range). Generating the file itself is left to that generator.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::{
  Error, Result,
  filter::UnitSelector,
  notify::{Notification, NotificationSink},
};

// ─── Choices ─────────────────────────────────────────────────────────────────

/// `<&str>::from` gives the snake_case key used in forms and file names.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DataType {
  DailyAttendance,
  /// Employees at or above the configured absence threshold.
  Absence,
  MonthlySummary,
  All,
}

impl fmt::Display for DataType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::DailyAttendance => "daily attendance",
      Self::Absence => "long absence",
      Self::MonthlySummary => "monthly summary",
      Self::All => "all data",
    })
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
  Xlsx,
  Pdf,
  Csv,
}

impl ExportFormat {
  pub fn extension(&self) -> &'static str {
    match self {
      Self::Xlsx => "xlsx",
      Self::Pdf => "pdf",
      Self::Csv => "csv",
    }
  }
}

/// Selectable report columns, in report order.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "title_case")]
pub enum Column {
  Name,
  Division,
  CheckIn,
  CheckOut,
  WorkedHours,
  Mood,
  Note,
}

/// Which columns are included. Mood and note are off by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelection {
  pub name:         bool,
  pub division:     bool,
  pub check_in:     bool,
  pub check_out:    bool,
  pub worked_hours: bool,
  pub mood:         bool,
  pub note:         bool,
}

impl Default for FieldSelection {
  fn default() -> Self {
    Self {
      name:         true,
      division:     true,
      check_in:     true,
      check_out:    true,
      worked_hours: true,
      mood:         false,
      note:         false,
    }
  }
}

impl FieldSelection {
  pub fn is_selected(&self, column: Column) -> bool {
    match column {
      Column::Name => self.name,
      Column::Division => self.division,
      Column::CheckIn => self.check_in,
      Column::CheckOut => self.check_out,
      Column::WorkedHours => self.worked_hours,
      Column::Mood => self.mood,
      Column::Note => self.note,
    }
  }

  pub fn toggle(&mut self, column: Column) {
    let flag = match column {
      Column::Name => &mut self.name,
      Column::Division => &mut self.division,
      Column::CheckIn => &mut self.check_in,
      Column::CheckOut => &mut self.check_out,
      Column::WorkedHours => &mut self.worked_hours,
      Column::Mood => &mut self.mood,
      Column::Note => &mut self.note,
    };
    *flag = !*flag;
  }

  pub fn columns(&self) -> Vec<Column> {
    Column::iter().filter(|c| self.is_selected(*c)).collect()
  }
}

// ─── Config and plan ─────────────────────────────────────────────────────────

/// Export form state. Data type and format are required; everything else is
/// optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
  pub data_type:  Option<DataType>,
  pub format:     Option<ExportFormat>,
  pub start_date: Option<NaiveDate>,
  pub end_date:   Option<NaiveDate>,
  pub unit:       Option<String>,
  pub fields:     FieldSelection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportPlan {
  pub data_type:  DataType,
  pub format:     ExportFormat,
  pub columns:    Vec<Column>,
  pub unit:       UnitSelector,
  pub start_date: Option<NaiveDate>,
  pub end_date:   Option<NaiveDate>,
}

impl ExportPlan {
  /// Suggested file name, e.g. `absence.pdf`.
  pub fn file_name(&self) -> String {
    let stem: &'static str = self.data_type.into();
    format!("{stem}.{}", self.format.extension())
  }
}

/// Check `config` and turn it into a plan.
pub fn plan(config: &ExportConfig) -> Result<ExportPlan> {
  let (Some(data_type), Some(format)) = (config.data_type, config.format) else {
    return Err(Error::MissingField);
  };

  let columns = config.fields.columns();
  if columns.is_empty() {
    return Err(Error::NoColumns);
  }

  let unit = config
    .unit
    .as_deref()
    .filter(|u| !u.trim().is_empty())
    .map(UnitSelector::parse)
    .unwrap_or(UnitSelector::All);

  Ok(ExportPlan {
    data_type,
    format,
    columns,
    unit,
    start_date: config.start_date,
    end_date: config.end_date,
  })
}

/// [`plan`], reporting the outcome to `sink`.
pub fn plan_and_notify<S: NotificationSink + ?Sized>(
  config: &ExportConfig,
  sink: &mut S,
) -> Result<ExportPlan> {
  match plan(config) {
    Ok(plan) => {
      tracing::info!(
        data_type = ?plan.data_type,
        format = %plan.format,
        columns = plan.columns.len(),
        "export planned"
      );
      sink.notify(Notification::info(
        "Export started",
        format!(
          "Exporting {} as {}",
          plan.data_type,
          plan.format.to_string().to_uppercase()
        ),
      ));
      Ok(plan)
    }
    Err(e) => {
      let description = match e {
        Error::NoColumns => "Select at least one column",
        _ => "Please choose a data type and an export format",
      };
      sink.notify(Notification::destructive("Incomplete configuration", description));
      Err(e)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::notify::Severity;

  fn complete() -> ExportConfig {
    ExportConfig {
      data_type: Some(DataType::Absence),
      format: Some(ExportFormat::Pdf),
      ..Default::default()
    }
  }

  #[test]
  fn data_type_and_format_are_required() {
    let mut c = complete();
    c.format = None;
    assert!(matches!(plan(&c), Err(Error::MissingField)));

    let mut c = complete();
    c.data_type = None;
    assert!(matches!(plan(&c), Err(Error::MissingField)));
  }

  #[test]
  fn default_columns() {
    let p = plan(&complete()).unwrap();
    assert_eq!(
      p.columns,
      vec![
        Column::Name,
        Column::Division,
        Column::CheckIn,
        Column::CheckOut,
        Column::WorkedHours
      ]
    );
    assert_eq!(p.unit, UnitSelector::All);
    assert_eq!(p.file_name(), "absence.pdf");
  }

  #[test]
  fn file_name_uses_snake_case_key() {
    let mut c = complete();
    c.data_type = Some(DataType::DailyAttendance);
    c.format = Some(ExportFormat::Xlsx);
    assert_eq!(plan(&c).unwrap().file_name(), "daily_attendance.xlsx");
  }

  #[test]
  fn toggled_columns_keep_report_order() {
    let mut c = complete();
    c.fields.toggle(Column::Note);
    c.fields.toggle(Column::CheckIn);
    let p = plan(&c).unwrap();
    assert_eq!(p.columns.last(), Some(&Column::Note));
    assert!(!p.columns.contains(&Column::CheckIn));
  }

  #[test]
  fn no_columns_is_rejected() {
    let mut c = complete();
    for col in Column::iter() {
      if c.fields.is_selected(col) {
        c.fields.toggle(col);
      }
    }
    assert!(matches!(plan(&c), Err(Error::NoColumns)));
  }

  #[test]
  fn unit_is_parsed() {
    let mut c = complete();
    c.unit = Some("Bagian IT".into());
    assert_eq!(plan(&c).unwrap().unit, UnitSelector::Exact("Bagian IT".into()));
    c.unit = Some("Semua Unit".into());
    assert_eq!(plan(&c).unwrap().unit, UnitSelector::All);
  }

  #[test]
  fn notifications() {
    let mut sink: Vec<Notification> = Vec::new();
    plan_and_notify(&complete(), &mut sink).unwrap();
    assert_eq!(sink[0].title, "Export started");
    assert_eq!(sink[0].description, "Exporting long absence as PDF");

    assert!(plan_and_notify(&ExportConfig::default(), &mut sink).is_err());
    assert_eq!(sink[1].severity, Severity::Destructive);
  }

  #[test]
  fn formats_parse() {
    assert_eq!("XLSX".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
    assert_eq!(
      "monthly_summary".parse::<DataType>().unwrap(),
      DataType::MonthlySummary
    );
    assert_eq!(Column::WorkedHours.to_string(), "Worked Hours");
    let key: &str = DataType::MonthlySummary.into();
    assert_eq!(key, "monthly_summary");
  }
}
