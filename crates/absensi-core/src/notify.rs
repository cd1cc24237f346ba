//! User-visible notifications emitted after mutations and validation.
//!
//! Delivery is fire-and-forget: the core never reads anything back from a
//! sink.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  #[default]
  Info,
  /// Validation failures and rejected actions.
  Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
  pub title:       String,
  pub description: String,
  pub severity:    Severity,
}

impl Notification {
  pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
    Self {
      title:       title.into(),
      description: description.into(),
      severity:    Severity::Info,
    }
  }

  pub fn destructive(
    title: impl Into<String>,
    description: impl Into<String>,
  ) -> Self {
    Self {
      title:       title.into(),
      description: description.into(),
      severity:    Severity::Destructive,
    }
  }
}

/// Receiver for [`Notification`]s.
pub trait NotificationSink {
  fn notify(&mut self, notification: Notification);
}

/// Collects notifications in emission order.
impl NotificationSink for Vec<Notification> {
  fn notify(&mut self, notification: Notification) { self.push(notification); }
}

impl<S: NotificationSink + ?Sized> NotificationSink for &mut S {
  fn notify(&mut self, notification: Notification) {
    (**self).notify(notification);
  }
}
