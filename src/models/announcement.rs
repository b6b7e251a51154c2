// file: src/models/announcement.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A document as it comes out of the announcements collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StoredDocument {
    pub key: String,
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
}

/// Validated payload for a new announcement, written at a generated key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
}

impl NewAnnouncement {
    pub fn into_document(self, key: String) -> StoredDocument {
        StoredDocument {
            key,
            title: self.title,
            content: self.content,
            date: self.date,
        }
    }
}

/// Display model for one announcement. Replaced wholesale on every snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementRecord {
    pub key: String,
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
}

const DISPLAY_DATE_FORMAT: &str = "%b %d, %Y %H:%M";

/// First line of an announcement body.
pub fn preview_line(content: &str) -> &str {
    content.lines().next().unwrap_or("")
}

/// Local-time rendering shared by rows and the detail popup.
pub fn format_display_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&chrono::Local)
        .format(DISPLAY_DATE_FORMAT)
        .to_string()
}

impl AnnouncementRecord {
    pub fn preview(&self) -> &str {
        preview_line(&self.content)
    }

    pub fn display_date(&self) -> String {
        format_display_date(self.date)
    }
}

impl From<&StoredDocument> for AnnouncementRecord {
    fn from(doc: &StoredDocument) -> Self {
        Self {
            key: doc.key.clone(),
            title: doc.title.clone(),
            content: doc.content.clone(),
            date: doc.date,
        }
    }
}

/// A pressable row in the announcement list.
///
/// `position` is the row's offset in the list it was built for and is only
/// meaningful until the next snapshot; `key` survives snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDescriptor {
    pub position: usize,
    pub key: String,
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
}

impl RowDescriptor {
    pub fn new(position: usize, record: &AnnouncementRecord) -> Self {
        Self {
            position,
            key: record.key.clone(),
            title: record.title.clone(),
            content: record.content.clone(),
            date: record.date,
        }
    }

    pub fn preview(&self) -> &str {
        preview_line(&self.content)
    }

    pub fn display_date(&self) -> String {
        format_display_date(self.date)
    }
}
