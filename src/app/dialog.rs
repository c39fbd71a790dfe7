//! Confirmation and success dialogs.
//!
//! A confirmation dialog offers Confirm / Cancel; a success dialog shows a
//! single OK button where confirming and closing mean the same thing.

use crossterm::event::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogKind {
    Confirm,
    Success,
}

/// What the user picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogChoice {
    Confirm,
    Cancel,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub message: String,
    pub kind: DialogKind,
    /// Highlighted button: 0 = Confirm, 1 = Cancel.
    pub selected: usize,
}

impl Dialog {
    /// Two-button prompt with Cancel highlighted.
    pub fn confirm(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: DialogKind::Confirm,
            selected: 1,
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: DialogKind::Success,
            selected: 0,
        }
    }

    pub fn confirm_delete() -> Self {
        Self::confirm(
            "Confirm deletion",
            "Are you sure you want to delete this client?",
        )
    }

    pub fn deleted() -> Self {
        Self::success("Success!", "Client deleted successfully!")
    }

    pub fn confirm_update() -> Self {
        Self::confirm(
            "Confirm update",
            "Are you sure you want to update this client?",
        )
    }

    pub fn updated() -> Self {
        Self::success("Success!", "Client updated successfully!")
    }

    pub fn is_success(&self) -> bool {
        self.kind == DialogKind::Success
    }

    pub fn buttons(&self) -> &'static [&'static str] {
        match self.kind {
            DialogKind::Confirm => &["Confirm", "Cancel"],
            DialogKind::Success => &["OK"],
        }
    }

    /// Feed a key press; returns a choice once the dialog should close.
    pub fn handle_key(&mut self, code: KeyCode) -> Option<DialogChoice> {
        if self.is_success() {
            return match code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char('y') | KeyCode::Char(' ') => {
                    Some(DialogChoice::Confirm)
                }
                _ => None,
            };
        }
        match code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.selected = if self.selected == 0 { 1 } else { 0 };
                None
            }
            KeyCode::Enter => Some(if self.selected == 0 {
                DialogChoice::Confirm
            } else {
                DialogChoice::Cancel
            }),
            KeyCode::Char('y') => Some(DialogChoice::Confirm),
            KeyCode::Char('n') | KeyCode::Esc => Some(DialogChoice::Cancel),
            _ => None,
        }
    }
}
