//! Error types for `absensi-core`.

use thiserror::Error;

use crate::record::EmployeeId;

#[derive(Debug, Error)]
pub enum Error {
  /// A required filter or export field was left empty.
  #[error("incomplete: a required field is empty")]
  MissingField,

  #[error("employee not found: {0}")]
  RecordNotFound(EmployeeId),

  #[error("duplicate employee id: {0}")]
  DuplicateId(EmployeeId),

  #[error("invalid date {0:?}, expected YYYY-MM-DD")]
  InvalidDate(String),

  #[error("export has no columns selected")]
  NoColumns,

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
