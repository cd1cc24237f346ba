//! Toast queue: the terminal's [`NotificationSink`].

use std::{
  collections::VecDeque,
  time::{Duration, Instant},
};

use absensi_core::notify::{Notification, NotificationSink};

/// How long a toast stays in the status bar.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

const HISTORY: usize = 32;

#[derive(Debug, Clone)]
pub struct Toast {
  pub notification: Notification,
  pub shown_at:     Instant,
}

/// Most recent notifications, newest last.
#[derive(Debug, Default)]
pub struct Toasts {
  queue: VecDeque<Toast>,
}

impl Toasts {
  pub fn new() -> Self { Self::default() }

  /// The newest toast, if it has not expired at `now`.
  pub fn current(&self, now: Instant) -> Option<&Notification> {
    self
      .queue
      .back()
      .filter(|t| now.duration_since(t.shown_at) < TOAST_TTL)
      .map(|t| &t.notification)
  }

  pub fn latest(&self) -> Option<&Notification> {
    self.queue.back().map(|t| &t.notification)
  }

  pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Notification> {
    self.queue.iter().map(|t| &t.notification)
  }

  pub fn len(&self) -> usize { self.queue.len() }

  pub fn is_empty(&self) -> bool { self.queue.is_empty() }
}

impl NotificationSink for Toasts {
  fn notify(&mut self, notification: Notification) {
    tracing::debug!(title = %notification.title, "toast");
    if self.queue.len() == HISTORY {
      self.queue.pop_front();
    }
    self.queue.push_back(Toast {
      notification,
      shown_at: Instant::now(),
    });
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn newest_toast_is_current_until_it_expires() {
    let mut toasts = Toasts::new();
    toasts.notify(Notification::info("a", ""));
    toasts.notify(Notification::info("b", ""));

    let now = Instant::now();
    assert_eq!(toasts.current(now).unwrap().title, "b");
    assert!(toasts.current(now + TOAST_TTL).is_none());
    assert_eq!(toasts.latest().unwrap().title, "b");
  }

  #[test]
  fn history_is_bounded() {
    let mut toasts = Toasts::new();
    for i in 0..(HISTORY + 5) {
      toasts.notify(Notification::info(i.to_string(), ""));
    }
    assert_eq!(toasts.len(), HISTORY);
    assert_eq!(toasts.iter().next().unwrap().title, "5");
  }
}
