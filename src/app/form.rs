//! Editable client form shared by the create and edit screens.
//!
//! Keystrokes for the CPF field go through [`crate::cpf`]: the stored value
//! is always the masked display form, and an overflowing keystroke raises the
//! inline length message until the digit count drops back to eleven or fewer.

use crate::api::{ClientPayload, Record};
use crate::cpf::{self, CPF_LENGTH_MESSAGE};

/// Inputs in display order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Name,
    Cpf,
    Email,
    Phone,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Cpf,
        FormField::Email,
        FormField::Phone,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Cpf => "CPF",
            FormField::Email => "Email",
            FormField::Phone => "Phone",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Cpf,
            FormField::Cpf => FormField::Email,
            FormField::Email => FormField::Phone,
            FormField::Phone => FormField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::Phone,
            FormField::Cpf => FormField::Name,
            FormField::Email => FormField::Cpf,
            FormField::Phone => FormField::Email,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientForm {
    pub name: String,
    /// Masked display form of the CPF input.
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub focus: FormField,
    /// Live overflow message; blocks submission while set.
    pub cpf_error: Option<String>,
    /// Errors found by the last [`ClientForm::validate`] call.
    pub field_errors: Vec<(FormField, String)>,
}

impl ClientForm {
    /// Prefill from a loaded record; the CPF is re-masked for display.
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            cpf: cpf::format_cpf(&record.cpf),
            email: record.email.clone(),
            phone: record.phone.clone(),
            ..Self::default()
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Cpf => &self.cpf,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
        }
    }

    /// First error to show under `field`: the live CPF message wins over submit-time errors.
    pub fn error_for(&self, field: FormField) -> Option<&str> {
        if field == FormField::Cpf {
            if let Some(e) = &self.cpf_error {
                return Some(e.as_str());
            }
        }
        self.field_errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| msg.as_str())
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Append a typed character to the focused input.
    pub fn input_char(&mut self, c: char) {
        self.clear_error(self.focus);
        match self.focus {
            FormField::Cpf => {
                let raw = format!("{}{}", self.cpf, c);
                self.set_cpf_input(&raw);
            }
            FormField::Name => self.name.push(c),
            FormField::Email => self.email.push(c),
            FormField::Phone => self.phone.push(c),
        }
    }

    pub fn backspace(&mut self) {
        self.clear_error(self.focus);
        match self.focus {
            FormField::Cpf => {
                let mut raw = self.cpf.clone();
                raw.pop();
                self.set_cpf_input(&raw);
            }
            FormField::Name => {
                self.name.pop();
            }
            FormField::Email => {
                self.email.pop();
            }
            FormField::Phone => {
                self.phone.pop();
            }
        }
    }

    /// Replace the CPF input with `raw` as if it had been typed or pasted.
    pub fn set_cpf_input(&mut self, raw: &str) {
        self.cpf_error = cpf::overflows(raw).then(|| CPF_LENGTH_MESSAGE.to_string());
        self.cpf = cpf::format_cpf(raw);
    }

    /// True while the CPF overflow message is shown.
    pub fn submit_blocked(&self) -> bool {
        self.cpf_error.is_some()
    }

    /// Run submit-time checks, replacing [`ClientForm::field_errors`].
    pub fn validate(&mut self) -> bool {
        let mut errors = Vec::new();
        for field in FormField::ALL {
            if self.value(field).trim().is_empty() {
                errors.push((field, format!("{} is required", field.label())));
            }
        }
        if !self.cpf.trim().is_empty() && !cpf::mask(&self.cpf).is_valid() {
            errors.push((FormField::Cpf, CPF_LENGTH_MESSAGE.to_string()));
        }
        if !self.email.trim().is_empty() && !looks_like_email(self.email.trim()) {
            errors.push((FormField::Email, "Enter a valid email address".to_string()));
        }
        self.field_errors = errors;
        self.field_errors.is_empty()
    }

    pub fn to_payload(&self) -> ClientPayload {
        ClientPayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            cpf: self.cpf.clone(),
        }
    }

    fn clear_error(&mut self, field: FormField) {
        self.field_errors.retain(|(f, _)| *f != field);
    }
}

/// `local@domain` with no whitespace and a single `@`.
fn looks_like_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    match s.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
