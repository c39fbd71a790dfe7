//! Edit screen (`/editar/:id`).
//!
//! The form stays disabled until the record has loaded. Saving goes through
//! a confirmation dialog, and a success dialog leads back to the list.

use tracing::info;

use crate::api::{ApiError, Record};

use super::dialog::Dialog;
use super::dispatch::{Effect, Request};
use super::form::ClientForm;
use super::Route;

/// Shown when the route carries no id.
pub const MISSING_ID_MESSAGE: &str = "Client ID not provided";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditController {
    pub id: Option<String>,
    /// The record as last loaded or saved.
    pub record: Option<Record>,
    pub form: ClientForm,
    pub loading: bool,
    pub error: Option<String>,
    pub dialog: Option<Dialog>,
}

impl EditController {
    pub fn mount(&mut self, id: Option<String>) -> Option<Effect> {
        match id {
            Some(id) => {
                self.id = Some(id.clone());
                self.loading = true;
                self.error = None;
                Some(Effect::Request(Request::Get(id)))
            }
            None => {
                self.id = None;
                self.loading = false;
                self.error = Some(MISSING_ID_MESSAGE.to_string());
                None
            }
        }
    }

    /// Whether the inputs accept keys.
    pub fn form_enabled(&self) -> bool {
        self.record.is_some()
    }

    pub fn on_loaded(&mut self, id: &str, result: Result<Record, ApiError>) {
        if self.id.as_deref() != Some(id) || !self.loading {
            return;
        }
        self.loading = false;
        match result {
            Ok(record) => {
                self.form = ClientForm::from_record(&record);
                self.record = Some(record);
                self.error = None;
            }
            Err(e) => {
                self.record = None;
                self.error = Some(e.to_string());
            }
        }
    }

    /// Validate and ask for confirmation; never sends anything by itself.
    pub fn submit(&mut self) {
        if !self.form_enabled() || self.loading || self.form.submit_blocked() {
            return;
        }
        if self.form.validate() {
            self.dialog = Some(Dialog::confirm_update());
        }
    }

    /// Close the confirmation dialog; the entered values stay.
    pub fn cancel_confirm(&mut self) {
        self.dialog = None;
    }

    pub fn confirm_update(&mut self) -> Option<Effect> {
        self.dialog = None;
        let id = self.id.clone()?;
        self.loading = true;
        self.error = None;
        Some(Effect::Request(Request::Update(id, self.form.to_payload())))
    }

    pub fn on_updated(&mut self, id: &str, result: Result<Record, ApiError>) {
        if self.id.as_deref() != Some(id) || !self.loading {
            return;
        }
        self.loading = false;
        match result {
            Ok(record) => {
                info!(id, "client updated");
                self.record = Some(record);
                self.dialog = Some(Dialog::updated());
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn acknowledge_success(&mut self) -> Effect {
        self.dialog = None;
        Effect::Navigate(Route::List)
    }

    /// Leave without saving.
    pub fn cancel(&mut self) -> Effect {
        self.dialog = None;
        Effect::Navigate(Route::List)
    }
}
