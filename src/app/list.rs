//! List screen (`/`): loading, selection, search and two-step delete.

use tracing::{debug, info};

use crate::api::{ApiError, Record};
use crate::search::apply_search;

use super::dialog::Dialog;
use super::dispatch::{Effect, Request};
use super::Route;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListController {
    /// Everything the last successful load returned, in service order.
    pub records: Vec<Record>,
    /// `records` filtered by `query`.
    pub visible: Vec<Record>,
    pub query: String,
    /// Index into `visible`.
    pub selected: usize,
    pub loading: bool,
    /// Tag of the newest list request; older answers are dropped.
    pub load_seq: u64,
    /// Id of the delete in flight, if any.
    pub deleting: Option<String>,
    pub error: Option<String>,
    /// Id awaiting confirmation.
    pub pending_delete: Option<String>,
    pub dialog: Option<Dialog>,
}

impl ListController {
    /// Entering the screen always reloads.
    pub fn mount(&mut self) -> Effect {
        self.loading = true;
        self.error = None;
        self.load_seq += 1;
        Effect::Request(Request::List(self.load_seq))
    }

    pub fn refresh(&mut self) -> Effect {
        self.mount()
    }

    /// Apply a list outcome. Failures keep the records already shown.
    ///
    /// Only the answer to the latest request counts, so back-to-back
    /// reloads that finish out of order never show the older result.
    pub fn on_loaded(&mut self, seq: u64, result: Result<Vec<Record>, ApiError>) {
        if !self.loading || seq != self.load_seq {
            debug!(seq, latest = self.load_seq, "dropping stale list outcome");
            return;
        }
        self.loading = false;
        match result {
            Ok(records) => {
                self.records = records;
                self.error = None;
                apply_search(self);
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.visible.get(self.selected)
    }

    /// Open the confirmation dialog for `id`.
    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
        self.dialog = Some(Dialog::confirm_delete());
    }

    pub fn request_delete_selected(&mut self) {
        if self.deleting.is_some() {
            return;
        }
        if let Some(id) = self.selected_record().map(|r| r.id.clone()) {
            self.request_delete(id);
        }
    }

    /// Close the dialog without touching anything else.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.dialog = None;
    }

    pub fn confirm_delete(&mut self) -> Option<Effect> {
        self.dialog = None;
        let id = self.pending_delete.take()?;
        self.deleting = Some(id.clone());
        self.error = None;
        Some(Effect::Request(Request::Delete(id)))
    }

    /// Success shows the success dialog and reloads everything.
    pub fn on_deleted(&mut self, id: &str, result: Result<(), ApiError>) -> Option<Effect> {
        if self.deleting.as_deref() != Some(id) {
            return None;
        }
        self.deleting = None;
        match result {
            Ok(()) => {
                info!(id, "client deleted");
                self.dialog = Some(Dialog::deleted());
                Some(self.mount())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn acknowledge_success(&mut self) {
        self.dialog = None;
    }

    pub fn edit_selected(&self) -> Option<Effect> {
        self.selected_record()
            .map(|r| Effect::Navigate(Route::Edit(Some(r.id.clone()))))
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        apply_search(self);
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.visible.len() {
            self.selected += 1;
        }
    }

    pub fn page_up(&mut self, rows_per_page: usize) {
        self.selected = self.selected.saturating_sub(rows_per_page.max(1));
    }

    pub fn page_down(&mut self, rows_per_page: usize) {
        let idx = self.selected.saturating_add(rows_per_page.max(1));
        self.selected = idx.min(self.visible.len().saturating_sub(1));
    }
}
