//! Create screen (`/cadastro`).

use tracing::info;

use crate::api::{ApiError, Record};

use super::dispatch::{Effect, Request};
use super::form::ClientForm;
use super::Route;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateController {
    pub form: ClientForm,
    pub loading: bool,
    pub error: Option<String>,
}

impl CreateController {
    /// Validate and, if the form is complete, ask for a `POST`.
    ///
    /// Does nothing while a create is in flight or while the CPF overflow
    /// message is shown.
    pub fn submit(&mut self) -> Option<Effect> {
        if self.loading || self.form.submit_blocked() {
            return None;
        }
        if !self.form.validate() {
            return None;
        }
        self.loading = true;
        self.error = None;
        Some(Effect::Request(Request::Create(self.form.to_payload())))
    }

    /// Success clears the form and goes straight back to the list.
    pub fn on_created(&mut self, result: Result<Record, ApiError>) -> Option<Effect> {
        if !self.loading {
            return None;
        }
        self.loading = false;
        match result {
            Ok(record) => {
                info!(id = %record.id, "client created");
                self.form = ClientForm::default();
                self.error = None;
                Some(Effect::Navigate(Route::List))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }
}
