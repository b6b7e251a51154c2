use uuid::Uuid;

pub mod logging;
pub mod retry;

/// Length of generated document keys, matching hosted document stores.
pub const DOCUMENT_KEY_LEN: usize = 20;

/// Default key generator for new announcements.
pub fn generate_document_key() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(DOCUMENT_KEY_LEN)
        .collect()
}

/// Turns store and write failures into something a person can act on.
pub fn user_friendly_error(error: &str) -> String {
    let lowered = error.to_lowercase();
    if lowered.contains("database is locked") || lowered.contains("busy") {
        "The noticeboard is busy. Please try again in a moment.".to_string()
    } else if lowered.contains("timed out") || lowered.contains("timeout") {
        "The request timed out. Please try again.".to_string()
    } else if lowered.contains("write failed") {
        "Could not save the announcement. Your text is still here, please try again.".to_string()
    } else if lowered.contains("subscription error") {
        "Announcements may be out of date. Reconnecting...".to_string()
    } else {
        error.replace("Failed to", "Could not").replace("Error:", "").trim().to_string()
    }
}
