//! Minimal keyboard-driven forms for the login, filter and export screens.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
  Text,
  /// Rendered masked.
  Secret,
  /// Cycled with ←/→. The first option is the "nothing chosen" placeholder
  /// when it is empty.
  Choice(Vec<String>),
  /// Toggled with Space.
  Check,
}

#[derive(Debug, Clone)]
pub struct Field {
  pub label:   &'static str,
  pub kind:    FieldKind,
  pub value:   String,
  pub checked: bool,
}

impl Field {
  pub fn text(label: &'static str) -> Self {
    Self {
      label,
      kind: FieldKind::Text,
      value: String::new(),
      checked: false,
    }
  }

  pub fn secret(label: &'static str) -> Self {
    Self {
      kind: FieldKind::Secret,
      ..Self::text(label)
    }
  }

  pub fn choice<I, S>(label: &'static str, options: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let options: Vec<String> = options.into_iter().map(Into::into).collect();
    let value = options.first().cloned().unwrap_or_default();
    Self {
      label,
      kind: FieldKind::Choice(options),
      value,
      checked: false,
    }
  }

  pub fn check(label: &'static str, checked: bool) -> Self {
    Self {
      kind: FieldKind::Check,
      checked,
      ..Self::text(label)
    }
  }

  /// Text shown for this field's value.
  pub fn display(&self) -> String {
    match &self.kind {
      FieldKind::Secret => "•".repeat(self.value.chars().count()),
      FieldKind::Check => (if self.checked { "[x]" } else { "[ ]" }).into(),
      FieldKind::Choice(_) if self.value.is_empty() => "-- choose --".into(),
      _ => self.value.clone(),
    }
  }

  fn cycle(&mut self, forward: bool) {
    let FieldKind::Choice(options) = &self.kind else { return };
    if options.is_empty() {
      return;
    }
    let current = options.iter().position(|o| *o == self.value).unwrap_or(0);
    let next = if forward {
      (current + 1) % options.len()
    } else {
      (current + options.len() - 1) % options.len()
    };
    self.value = options[next].clone();
  }
}

/// What a key did to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
  Submit,
  Changed,
  Ignored,
}

#[derive(Debug, Clone)]
pub struct Form {
  pub fields: Vec<Field>,
  pub focus:  usize,
}

impl Form {
  pub fn new(fields: Vec<Field>) -> Self { Self { fields, focus: 0 } }

  pub fn value(&self, index: usize) -> &str {
    self.fields.get(index).map(|f| f.value.as_str()).unwrap_or_default()
  }

  pub fn checked(&self, index: usize) -> bool {
    self.fields.get(index).is_some_and(|f| f.checked)
  }

  /// Clear text values; choices reset to their first option.
  pub fn reset(&mut self) {
    for field in &mut self.fields {
      match &field.kind {
        FieldKind::Text | FieldKind::Secret => field.value.clear(),
        FieldKind::Choice(options) => {
          field.value = options.first().cloned().unwrap_or_default()
        }
        FieldKind::Check => {}
      }
    }
    self.focus = 0;
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
    let len = self.fields.len();
    if len == 0 {
      return FormEvent::Ignored;
    }
    let Some(field) = self.fields.get_mut(self.focus) else {
      return FormEvent::Ignored;
    };

    match key.code {
      KeyCode::Enter => return FormEvent::Submit,
      KeyCode::Tab | KeyCode::Down => {
        self.focus = (self.focus + 1) % len;
      }
      KeyCode::BackTab | KeyCode::Up => {
        self.focus = (self.focus + len - 1) % len;
      }
      KeyCode::Left => field.cycle(false),
      KeyCode::Right => field.cycle(true),
      KeyCode::Char(' ') if field.kind == FieldKind::Check => {
        field.checked = !field.checked;
      }
      KeyCode::Backspace => match field.kind {
        FieldKind::Text | FieldKind::Secret => {
          field.value.pop();
        }
        _ => return FormEvent::Ignored,
      },
      KeyCode::Char(c)
        if !key.modifiers.contains(KeyModifiers::CONTROL)
          && matches!(field.kind, FieldKind::Text | FieldKind::Secret) =>
      {
        field.value.push(c);
      }
      _ => return FormEvent::Ignored,
    }
    FormEvent::Changed
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  fn type_str(form: &mut Form, s: &str) {
    for c in s.chars() {
      form.handle_key(key(KeyCode::Char(c)));
    }
  }

  #[test]
  fn typing_edits_focused_field() {
    let mut form = Form::new(vec![Field::text("a"), Field::secret("b")]);
    type_str(&mut form, "hi");
    form.handle_key(key(KeyCode::Tab));
    type_str(&mut form, "pw");
    form.handle_key(key(KeyCode::Backspace));
    assert_eq!(form.value(0), "hi");
    assert_eq!(form.value(1), "p");
    assert_eq!(form.fields[1].display(), "•");
  }

  #[test]
  fn focus_wraps() {
    let mut form = Form::new(vec![Field::text("a"), Field::text("b")]);
    form.handle_key(key(KeyCode::Up));
    assert_eq!(form.focus, 1);
    form.handle_key(key(KeyCode::Down));
    assert_eq!(form.focus, 0);
  }

  #[test]
  fn choices_cycle_and_ignore_typing() {
    let mut form = Form::new(vec![Field::choice("u", ["", "IKP", "APTIKA"])]);
    assert_eq!(form.fields[0].display(), "-- choose --");
    form.handle_key(key(KeyCode::Left));
    assert_eq!(form.value(0), "APTIKA");
    form.handle_key(key(KeyCode::Right));
    form.handle_key(key(KeyCode::Right));
    assert_eq!(form.value(0), "IKP");
    assert_eq!(form.handle_key(key(KeyCode::Char('x'))), FormEvent::Ignored);
    assert_eq!(form.value(0), "IKP");
  }

  #[test]
  fn checks_toggle_with_space() {
    let mut form = Form::new(vec![Field::check("mood", false)]);
    form.handle_key(key(KeyCode::Char(' ')));
    assert!(form.checked(0));
    assert_eq!(form.fields[0].display(), "[x]");
  }

  #[test]
  fn enter_submits_and_reset_clears() {
    let mut form = Form::new(vec![Field::text("a"), Field::choice("c", ["", "x"])]);
    type_str(&mut form, "abc");
    form.handle_key(key(KeyCode::Tab));
    form.handle_key(key(KeyCode::Right));
    assert_eq!(form.handle_key(key(KeyCode::Enter)), FormEvent::Submit);
    form.reset();
    assert_eq!(form.value(0), "");
    assert_eq!(form.value(1), "");
    assert_eq!(form.focus, 0);
  }
}
