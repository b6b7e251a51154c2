use crate::sync::SnapshotEvent;

/// Unified application message type
///
/// Messages are organized by domain for better maintainability.
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation Messages =====
    /// Switch to the announcements screen
    ShowHome,
    /// Switch to the calendar placeholder
    ShowCalendar,
    /// Escape key: close the topmost modal
    BackPressed,

    // ===== Home Screen Messages =====
    /// An announcement row was pressed (document key)
    AnnouncementPressed(String),
    /// Backdrop or close button of the detail popup
    ToggleDetailPopup,
    /// "+" button, or backdrop of the add form
    ToggleAddForm,
    /// Acknowledge the blocking alert
    DismissAlert,
    /// Press inside a modal card; swallowed so it never reaches the backdrop
    ModalCardPressed,

    // ===== Form Input Messages =====
    TitleChanged(String),
    ContentChanged(String),
    SubmitAnnouncement,

    // ===== Async Operation Results =====
    /// Store write finished; carries the new key or an error message
    AnnouncementWritten(Result<String, String>),

    // ===== Data Update Messages =====
    /// Snapshot listener output
    FeedEvent(SnapshotEvent),
}
