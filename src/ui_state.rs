//! UI state management module
//!
//! Everything the home screen shows is derived from [`HomeState`]. It is
//! only mutated from the application update loop, so none of it needs
//! locking.

use log::{debug, info};

use crate::command_handlers::AddFormController;
use crate::error::AppError;
use crate::models::{AnnouncementRecord, NewAnnouncement, RowDescriptor};
use crate::sync::{AnnouncementFeed, FeedStatus, SnapshotEvent};
use crate::utils::user_friendly_error;

pub const EMPTY_STATE_TEXT: &str = "NO ANNOUNCEMENTS";
pub const UNAVAILABLE_TEXT: &str = "Announcements could not be loaded yet";
pub const CALENDAR_TITLE: &str = "calendars";

/// UI view states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Calendar,
}

/// Open/closed flags for the two home screen modals. They never affect each
/// other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityFlags {
    pub detail_popup: bool,
    pub add_form: bool,
}

impl VisibilityFlags {
    pub fn toggle_detail_popup(&mut self) {
        self.detail_popup = !self.detail_popup;
    }

    pub fn toggle_add_form(&mut self) {
        self.add_form = !self.add_form;
    }
}

/// The announcement chosen for the detail popup.
///
/// Selection is keyed by document key. The position is what the row had
/// when it was pressed and is kept only for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    key: Option<String>,
    position_at_selection: Option<usize>,
}

impl SelectionState {
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn position_at_selection(&self) -> Option<usize> {
        self.position_at_selection
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddFormState {
    pub title: String,
    pub content: String,
    pub submitting: bool,
    /// Last failed write, shown inline in the form
    pub error: Option<String>,
}

impl AddFormState {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Blocking alert with a single acknowledgement action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDialog {
    pub title: String,
    pub message: String,
    pub acknowledge_label: String,
}

impl AlertDialog {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            title: "Warning".to_string(),
            message: message.into(),
            acknowledge_label: "OK".to_string(),
        }
    }
}

/// What the list area should render.
#[derive(Debug, PartialEq, Eq)]
pub enum ListContent<'a> {
    Loading,
    /// Nothing has been read yet and the last fetch failed
    Unavailable(&'static str),
    Empty(&'static str),
    Rows(&'a [RowDescriptor]),
}

/// Topmost surface, used to route back actions and to draw the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    DetailPopup,
    AddForm,
    Alert,
}

#[derive(Debug, Clone, Default)]
pub struct HomeState {
    pub feed: AnnouncementFeed,
    pub selection: SelectionState,
    pub visibility: VisibilityFlags,
    pub form: AddFormState,
    pub alert: Option<AlertDialog>,
}

impl HomeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_event(&mut self, event: SnapshotEvent) {
        match event {
            SnapshotEvent::Snapshot(docs) => {
                self.feed.apply_snapshot(&docs);
                if let Some(key) = self.selection.key() {
                    if self.visibility.detail_popup && self.feed.find(key).is_none() {
                        debug!("Selected announcement {} is no longer in the feed", key);
                    }
                }
            }
            SnapshotEvent::Failed(reason) => self.feed.apply_error(user_friendly_error(&reason)),
        }
    }

    /// Row press: remember the announcement and open the detail popup.
    pub fn select(&mut self, key: &str) {
        let position = self.feed.rows().iter().position(|row| row.key == key);
        debug!("Selected announcement {} at position {:?}", key, position);
        self.selection = SelectionState {
            key: Some(key.to_string()),
            position_at_selection: position,
        };
        self.visibility.detail_popup = true;
    }

    pub fn toggle_detail_popup(&mut self) {
        self.visibility.toggle_detail_popup();
    }

    pub fn toggle_add_form(&mut self) {
        self.visibility.toggle_add_form();
    }

    /// The selected announcement as it appears in the current list.
    pub fn selected_announcement(&self) -> Option<&AnnouncementRecord> {
        self.selection.key().and_then(|key| self.feed.find(key))
    }

    /// The empty state is only shown once a snapshot has actually been read.
    pub fn list_content(&self) -> ListContent<'_> {
        if !self.feed.is_empty() {
            ListContent::Rows(self.feed.rows())
        } else if self.feed.last_updated().is_some() {
            ListContent::Empty(EMPTY_STATE_TEXT)
        } else if let FeedStatus::Degraded(_) = self.feed.status() {
            ListContent::Unavailable(UNAVAILABLE_TEXT)
        } else {
            ListContent::Loading
        }
    }

    pub fn overlay(&self) -> Overlay {
        if self.alert.is_some() {
            Overlay::Alert
        } else if self.visibility.add_form {
            Overlay::AddForm
        } else if self.visibility.detail_popup {
            Overlay::DetailPopup
        } else {
            Overlay::None
        }
    }

    /// Validates the form. On success the form is marked as submitting and
    /// the payload is returned for writing; on failure the warning alert is
    /// raised and nothing is written.
    pub fn begin_submit(&mut self) -> Option<NewAnnouncement> {
        if self.form.submitting {
            return None;
        }
        match AddFormController::validate(&self.form.title, &self.form.content) {
            Ok(announcement) => {
                self.form.submitting = true;
                self.form.error = None;
                Some(announcement)
            }
            Err(AppError::Validation(message)) => {
                info!("No title and content");
                self.alert = Some(AlertDialog::warning(message));
                None
            }
            Err(e) => {
                self.alert = Some(AlertDialog::warning(e.to_safe_string()));
                None
            }
        }
    }

    /// Applies the outcome of the store write started by `begin_submit`.
    pub fn finish_submit(&mut self, result: Result<String, String>) {
        self.form.submitting = false;
        match result {
            Ok(key) => {
                info!("Announcement {} added", key);
                self.form.reset();
                self.visibility.add_form = false;
            }
            Err(error) => {
                self.form.error = Some(user_friendly_error(&error));
            }
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Back action closes the topmost surface only.
    pub fn back_pressed(&mut self) {
        match self.overlay() {
            Overlay::Alert => self.dismiss_alert(),
            Overlay::AddForm => self.toggle_add_form(),
            Overlay::DetailPopup => self.toggle_detail_popup(),
            Overlay::None => {}
        }
    }
}

/// Application UI state
#[derive(Debug, Clone)]
pub struct UiState {
    /// Current active view
    pub current_view: View,
    pub home: HomeState,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            current_view: View::Home,
            home: HomeState::new(),
        }
    }
}
