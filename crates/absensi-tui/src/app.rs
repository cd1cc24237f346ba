//! Application state machine and event dispatcher.

use std::{
  collections::VecDeque,
  time::{Duration, Instant},
};

use absensi_core::{
  Error,
  attendance::AttendanceEntry,
  export::{
    Column, DataType, ExportConfig, ExportFormat, ExportPlan, FieldSelection,
    plan_and_notify,
  },
  filter::{FilterCriteria, ValidatedFilter, validate_and_notify},
  notify::{Notification, NotificationSink},
  record::{AttendanceExceptionRecord, EmployeeId},
  registry::InMemoryRegistry,
  stats::DashboardStats,
  store::EmployeeRegistry,
  view::{DisplayRow, materialize, materialize_entries, number},
};
use chrono::{NaiveDate, NaiveTime};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use strum::IntoEnumIterator;

use crate::{
  auth::{self, AuthConfig},
  form::{Field, Form, FormEvent},
  toast::Toasts,
};

/// Delay before the "export finished" toast follows a started export.
pub const EXPORT_DELAY: Duration = Duration::from_secs(2);

/// Export history entries kept for the side panel.
pub const EXPORT_HISTORY: usize = 20;

/// Work units offered by the attendance filter.
pub const ATTENDANCE_UNITS: &[&str] = &[
  "",
  "semua",
  "Semua kecuali UPTD",
  "APTIKA",
  "E-GOV",
  "IKP",
  "SANDIKAMI",
  "Sekretariat",
  "Statistik",
  "UPTD PLDDIG",
];

/// Work units offered by the export form.
pub const EXPORT_UNITS: &[&str] = &[
  "",
  "Semua Unit",
  "Bagian Kepegawaian",
  "Bagian Keuangan",
  "Bagian Administrasi",
  "Bagian IT",
  "Bagian Keamanan",
];

// Field positions.
const LOGIN_USER: usize = 0;
const LOGIN_PASSWORD: usize = 1;

const FILTER_START: usize = 0;
const FILTER_END: usize = 1;
const FILTER_UNIT: usize = 2;

const EXPORT_DATA_TYPE: usize = 0;
const EXPORT_FORMAT: usize = 1;
const EXPORT_START: usize = 2;
const EXPORT_END: usize = 3;
const EXPORT_UNIT: usize = 4;
const EXPORT_FIRST_COLUMN: usize = 5;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  Login,
  Dashboard,
  /// Filter form and daily attendance listing.
  Attendance,
  /// Active / disabled employees flagged for absence.
  Absence,
  Export,
}

/// Focused table on the absence screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
  Active,
  Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
  Disable,
  Enable,
}

/// A status change waiting for the confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction {
  pub id:     EmployeeId,
  pub name:   String,
  pub action: StatusAction,
}

/// One line of the export history panel.
#[derive(Debug, Clone)]
pub struct ExportRecord {
  pub file_name: String,
  pub format:    ExportFormat,
  pub at:        NaiveTime,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub screen: Screen,

  /// Employee registry; its sink is the toast queue.
  pub registry: InMemoryRegistry<Toasts>,

  /// Daily scan entries for the attendance listing.
  pub entries: Vec<AttendanceEntry>,

  /// `None` disables the login gate.
  pub auth: Option<AuthConfig>,

  pub threshold: u32,
  pub today:     NaiveDate,

  pub login: Form,

  pub attendance_form:   Form,
  /// Set once the filter form has been validated.
  pub attendance_filter: Option<ValidatedFilter>,

  pub panel:           Panel,
  pub active_cursor:   usize,
  pub disabled_cursor: usize,
  /// Fuzzy name filter over the absence tables.
  pub search:          String,
  pub search_active:   bool,
  pub pending:         Option<PendingAction>,

  pub export_form:    Form,
  pub last_plan:      Option<ExportPlan>,
  /// Newest first, at most [`EXPORT_HISTORY`] entries.
  pub export_history: VecDeque<ExportRecord>,
  export_due:         Option<Instant>,
}

impl App {
  pub fn new(
    registry: InMemoryRegistry<Toasts>,
    entries: Vec<AttendanceEntry>,
    auth: Option<AuthConfig>,
    threshold: u32,
    today: NaiveDate,
  ) -> Self {
    let mut export_fields = vec![
      Field::choice(
        "Data type",
        std::iter::once("").chain(
          [
            DataType::DailyAttendance,
            DataType::Absence,
            DataType::MonthlySummary,
            DataType::All,
          ]
          .map(<&'static str>::from),
        ),
      ),
      Field::choice("Format", ["", "xlsx", "pdf", "csv"]),
      Field::text("Start date"),
      Field::text("End date"),
      Field::choice("Unit", EXPORT_UNITS.iter().copied()),
    ];
    export_fields.extend(column_choices());

    Self {
      screen: if auth.is_some() {
        Screen::Login
      } else {
        Screen::Dashboard
      },
      registry,
      entries,
      auth,
      threshold,
      today,
      login: Form::new(vec![Field::text("Username"), Field::secret("Password")]),
      attendance_form: Form::new(vec![
        Field::text("Start date"),
        Field::text("End date"),
        Field::choice("Unit", ATTENDANCE_UNITS.iter().copied()),
      ]),
      attendance_filter: None,
      panel: Panel::Active,
      active_cursor: 0,
      disabled_cursor: 0,
      search: String::new(),
      search_active: false,
      pending: None,
      export_form: Form::new(export_fields),
      last_plan: None,
      export_history: VecDeque::new(),
      export_due: None,
    }
  }

  pub fn toasts(&self) -> &Toasts { self.registry.sink() }

  fn notify(&mut self, notification: Notification) {
    self.registry.sink_mut().notify(notification);
  }

  // ── Derived views ─────────────────────────────────────────────────────────

  pub fn stats(&self) -> DashboardStats {
    DashboardStats::compute(&self.registry, &self.entries, self.today, self.threshold)
  }

  fn matches_search(&self, record: &AttendanceExceptionRecord) -> bool {
    if self.search.is_empty() {
      return true;
    }
    SkimMatcherV2::default()
      .fuzzy_match(&record.name, &self.search)
      .is_some()
  }

  /// Active rows matching the search, numbered as displayed.
  pub fn visible_active(&self) -> Vec<DisplayRow<'_, AttendanceExceptionRecord>> {
    if self.search.is_empty() {
      return materialize(&self.registry, None);
    }
    number(
      self
        .registry
        .list_active()
        .into_iter()
        .filter(|r| self.matches_search(r)),
    )
  }

  /// Disabled rows matching the search, numbered as displayed.
  pub fn visible_disabled(
    &self,
  ) -> Vec<DisplayRow<'_, AttendanceExceptionRecord>> {
    number(
      self
        .registry
        .list_disabled()
        .into_iter()
        .filter(|r| self.matches_search(r)),
    )
  }

  /// Filtered scan entries, once the filter form has been validated.
  pub fn attendance_rows(&self) -> Option<Vec<DisplayRow<'_, AttendanceEntry>>> {
    self
      .attendance_filter
      .as_ref()
      .map(|f| materialize_entries(&self.entries, f))
  }

  /// Flagged employees matching the attendance filter.
  pub fn exception_rows(
    &self,
  ) -> Option<Vec<DisplayRow<'_, AttendanceExceptionRecord>>> {
    self
      .attendance_filter
      .as_ref()
      .map(|f| materialize(&self.registry, Some(f)))
  }

  fn cursor_record(&self) -> Option<&AttendanceExceptionRecord> {
    match self.panel {
      Panel::Active => self.visible_active().get(self.active_cursor).map(|r| r.record),
      Panel::Disabled => self
        .visible_disabled()
        .get(self.disabled_cursor)
        .map(|r| r.record),
    }
  }

  fn clamp_cursors(&mut self) {
    let active = self.visible_active().len();
    let disabled = self.visible_disabled().len();
    self.active_cursor = self.active_cursor.min(active.saturating_sub(1));
    self.disabled_cursor = self.disabled_cursor.min(disabled.saturating_sub(1));
  }

  // ── Timers ────────────────────────────────────────────────────────────────

  /// Emit the delayed export toast once it is due.
  pub fn tick(&mut self, now: Instant) {
    if self.export_due.is_some_and(|due| now >= due) {
      self.export_due = None;
      self.notify(Notification::info(
        "Export finished",
        "The file has been generated",
      ));
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    if self.screen == Screen::Login {
      return self.handle_login_key(key);
    }

    // Confirmation dialog captures every key.
    if self.pending.is_some() {
      self.handle_confirm_key(key);
      return true;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('o') {
      self.logout();
      return true;
    }

    let target = match key.code {
      KeyCode::F(1) => Some(Screen::Dashboard),
      KeyCode::F(2) => Some(Screen::Attendance),
      KeyCode::F(3) => Some(Screen::Absence),
      KeyCode::F(4) => Some(Screen::Export),
      _ => None,
    };
    if let Some(screen) = target {
      self.open(screen);
      return true;
    }

    match self.screen {
      Screen::Login => true,
      Screen::Dashboard => self.handle_dashboard_key(key),
      Screen::Attendance => {
        self.handle_attendance_key(key);
        true
      }
      Screen::Absence => self.handle_absence_key(key),
      Screen::Export => {
        self.handle_export_key(key);
        true
      }
    }
  }

  fn open(&mut self, screen: Screen) {
    self.screen = screen;
    self.search_active = false;
  }

  /// Back to the login form, dropping per-session screen state. Without a
  /// login gate there is nothing to sign out of.
  fn logout(&mut self) {
    if self.auth.is_none() {
      tracing::debug!("logout ignored, login disabled");
      return;
    }
    tracing::info!("signed out");
    self.login.reset();
    self.attendance_form.reset();
    self.attendance_filter = None;
    self.search.clear();
    self.search_active = false;
    self.pending = None;
    self.screen = Screen::Login;
    self.notify(Notification::info("Signed out", "You have been logged out"));
  }

  fn handle_login_key(&mut self, key: KeyEvent) -> bool {
    if key.code == KeyCode::Esc {
      return false;
    }
    if self.login.handle_key(key) != FormEvent::Submit {
      return true;
    }

    let Some(config) = &self.auth else {
      self.screen = Screen::Dashboard;
      return true;
    };

    let username = self.login.value(LOGIN_USER).to_owned();
    match auth::verify(&username, self.login.value(LOGIN_PASSWORD), config) {
      Ok(()) => {
        tracing::info!(%username, "login succeeded");
        self.login.reset();
        self.screen = Screen::Dashboard;
        self.notify(Notification::info("Welcome", format!("Signed in as {username}")));
      }
      Err(_) => {
        tracing::warn!(%username, "login failed");
        if let Some(field) = self.login.fields.get_mut(LOGIN_PASSWORD) {
          field.value.clear();
        }
        self.notify(Notification::destructive(
          "Login failed",
          "Invalid username or password",
        ));
      }
    }
    true
  }

  fn handle_dashboard_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Char('2') | KeyCode::Char('a') => self.open(Screen::Attendance),
      KeyCode::Char('3') | KeyCode::Char('m') => self.open(Screen::Absence),
      KeyCode::Char('4') | KeyCode::Char('x') => self.open(Screen::Export),
      _ => {}
    }
    true
  }

  fn handle_attendance_key(&mut self, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
      if self.attendance_filter.is_some() {
        match key.code {
          KeyCode::Char('x') => self.quick_export("attendance data", "Excel"),
          KeyCode::Char('p') => self.quick_export("attendance data", "PDF"),
          KeyCode::Char('y') => self.copy_to_clipboard(),
          _ => {}
        }
      }
      return;
    }
    if key.code == KeyCode::Esc {
      self.open(Screen::Dashboard);
      return;
    }
    if self.attendance_form.handle_key(key) == FormEvent::Submit {
      self.submit_attendance_filter();
    }
  }

  fn submit_attendance_filter(&mut self) {
    let form = &self.attendance_form;
    let criteria = match FilterCriteria::from_form(
      form.value(FILTER_UNIT),
      form.value(FILTER_START),
      form.value(FILTER_END),
    ) {
      Ok(criteria) => criteria,
      Err(e) => {
        self.notify(Notification::destructive("Invalid date", e.to_string()));
        return;
      }
    };

    // A rejected filter hides previous results.
    self.attendance_filter =
      validate_and_notify(&criteria, self.registry.sink_mut()).ok();
  }

  fn handle_absence_key(&mut self, key: KeyEvent) -> bool {
    if self.search_active {
      match key.code {
        KeyCode::Esc => {
          self.search_active = false;
          self.search.clear();
        }
        KeyCode::Enter => self.search_active = false,
        KeyCode::Backspace => {
          self.search.pop();
        }
        KeyCode::Char(c) => self.search.push(c),
        _ => {}
      }
      self.active_cursor = 0;
      self.disabled_cursor = 0;
      return true;
    }

    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Esc | KeyCode::Char('1') => self.open(Screen::Dashboard),
      KeyCode::Char('2') => self.open(Screen::Attendance),
      KeyCode::Char('4') => self.open(Screen::Export),
      KeyCode::Char('/') => {
        self.search_active = true;
        self.search.clear();
      }
      KeyCode::Tab | KeyCode::BackTab => {
        self.panel = match self.panel {
          Panel::Active => Panel::Disabled,
          Panel::Disabled => Panel::Active,
        };
      }
      KeyCode::Down | KeyCode::Char('j') => {
        let len = match self.panel {
          Panel::Active => self.visible_active().len(),
          Panel::Disabled => self.visible_disabled().len(),
        };
        let cursor = match self.panel {
          Panel::Active => &mut self.active_cursor,
          Panel::Disabled => &mut self.disabled_cursor,
        };
        if *cursor + 1 < len {
          *cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        let cursor = match self.panel {
          Panel::Active => &mut self.active_cursor,
          Panel::Disabled => &mut self.disabled_cursor,
        };
        *cursor = cursor.saturating_sub(1);
      }
      KeyCode::Enter | KeyCode::Char('d') | KeyCode::Char('e') => {
        let action = match (self.panel, key.code) {
          (Panel::Active, KeyCode::Enter | KeyCode::Char('d')) => StatusAction::Disable,
          (Panel::Disabled, KeyCode::Enter | KeyCode::Char('e')) => StatusAction::Enable,
          _ => return true,
        };
        self.pending = self.cursor_record().map(|record| PendingAction {
          id: record.id,
          name: record.name.clone(),
          action,
        });
      }
      _ => {}
    }
    true
  }

  fn handle_confirm_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('y') | KeyCode::Enter => {
        let Some(pending) = self.pending.take() else { return };
        let result = match pending.action {
          StatusAction::Disable => self.registry.disable(pending.id),
          StatusAction::Enable => self.registry.enable(pending.id),
        };
        // Unknown ids have already been reported through the toast queue.
        if let Err(Error::RecordNotFound(id)) = result {
          tracing::warn!(%id, "confirmed action on a stale row");
        }
        self.clamp_cursors();
      }
      KeyCode::Char('n') | KeyCode::Esc => {
        if let Some(pending) = self.pending.take() {
          tracing::debug!(id = %pending.id, "status change cancelled");
        }
      }
      _ => {}
    }
  }

  fn handle_export_key(&mut self, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
      match key.code {
        KeyCode::Char('x') => self.quick_export("today's attendance", "Excel"),
        KeyCode::Char('p') => self.quick_export("monthly report", "PDF"),
        KeyCode::Char('y') => self.copy_to_clipboard(),
        _ => {}
      }
      return;
    }
    if key.code == KeyCode::Esc {
      self.open(Screen::Dashboard);
      return;
    }
    if self.export_form.handle_key(key) == FormEvent::Submit {
      self.submit_export();
    }
  }

  /// Build an [`ExportConfig`] from the export form.
  pub fn export_config(&self) -> Result<ExportConfig, Error> {
    let form = &self.export_form;
    let dates = FilterCriteria::from_form(
      "",
      form.value(EXPORT_START),
      form.value(EXPORT_END),
    )?;

    let mut config = ExportConfig {
      data_type: form.value(EXPORT_DATA_TYPE).parse().ok(),
      format: form.value(EXPORT_FORMAT).parse().ok(),
      start_date: dates.start_date,
      end_date: dates.end_date,
      unit: Some(form.value(EXPORT_UNIT))
        .filter(|u| !u.is_empty())
        .map(str::to_owned),
      ..Default::default()
    };

    for (offset, column) in column_order().into_iter().enumerate() {
      if config.fields.is_selected(column)
        != form.checked(EXPORT_FIRST_COLUMN + offset)
      {
        config.fields.toggle(column);
      }
    }
    Ok(config)
  }

  fn submit_export(&mut self) {
    let config = match self.export_config() {
      Ok(config) => config,
      Err(e) => {
        self.notify(Notification::destructive("Invalid date", e.to_string()));
        return;
      }
    };

    if let Ok(plan) = plan_and_notify(&config, self.registry.sink_mut()) {
      if self.export_history.len() == EXPORT_HISTORY {
        self.export_history.pop_back();
      }
      self.export_history.push_front(ExportRecord {
        file_name: plan.file_name(),
        format:    plan.format,
        at:        chrono::Local::now().time(),
      });
      self.last_plan = Some(plan);
      self.export_due = Some(Instant::now() + EXPORT_DELAY);
    }
  }

  fn quick_export(&mut self, what: &str, format: &str) {
    tracing::info!(what, format, "quick export");
    self.notify(Notification::info(
      format!("{format} export started"),
      format!("Exporting {what} as {format}"),
    ));
  }

  fn copy_to_clipboard(&mut self) {
    self.notify(Notification::info(
      "Data copied",
      "Table data has been copied to the clipboard",
    ));
  }
}

fn column_order() -> Vec<Column> { Column::iter().collect() }

/// One check field per report column, preset to the default selection.
fn column_choices() -> Vec<Field> {
  let defaults = FieldSelection::default();
  column_order()
    .into_iter()
    .map(|column| Field::check(column_label(column), defaults.is_selected(column)))
    .collect()
}

fn column_label(column: Column) -> &'static str {
  match column {
    Column::Name => "Name",
    Column::Division => "Division",
    Column::CheckIn => "Check-in",
    Column::CheckOut => "Check-out",
    Column::WorkedHours => "Worked hours",
    Column::Mood => "Mood",
    Column::Note => "Note",
  }
}
