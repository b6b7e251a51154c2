//! Announcement list synchronization
//!
//! Snapshots arrive oldest first. The feed keeps them newest first together
//! with one row descriptor per record, and swaps both in a single step so a
//! render never sees a half-built list.

use chrono::{DateTime, Utc};
use log::warn;

use crate::models::{AnnouncementRecord, RowDescriptor, StoredDocument};
use crate::utils::logging::log_snapshot;

pub mod subscription;

pub use subscription::{SnapshotEvent, SnapshotSubscription, SubscriptionOptions};

/// Builds the display list and its rows from an ascending snapshot.
///
/// The input item at offset `p` lands at position `count - 1 - p`, so the
/// newest document is at position 0 and `rows[i].position == i`.
pub fn snapshot_to_records(ordered_docs: &[StoredDocument]) -> (Vec<AnnouncementRecord>, Vec<RowDescriptor>) {
    let count = ordered_docs.len();
    let mut records = Vec::with_capacity(count);
    let mut rows = Vec::with_capacity(count);

    for (offset, doc) in ordered_docs.iter().enumerate().rev() {
        let position = count - 1 - offset;
        let record = AnnouncementRecord::from(doc);
        rows.push(RowDescriptor::new(position, &record));
        records.push(record);
    }

    (records, rows)
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedStatus {
    /// No snapshot received yet
    Loading,
    Ready,
    /// Last fetch failed; the lists still hold the previous snapshot
    Degraded(String),
}

#[derive(Debug, Clone)]
pub struct AnnouncementFeed {
    records: Vec<AnnouncementRecord>,
    rows: Vec<RowDescriptor>,
    status: FeedStatus,
    last_updated: Option<DateTime<Utc>>,
}

impl Default for AnnouncementFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnouncementFeed {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            rows: Vec::new(),
            status: FeedStatus::Loading,
            last_updated: None,
        }
    }

    /// Replaces the whole list with `ordered_docs`. Returns the new length.
    pub fn apply_snapshot(&mut self, ordered_docs: &[StoredDocument]) -> usize {
        let (records, rows) = snapshot_to_records(ordered_docs);
        self.records = records;
        self.rows = rows;
        self.status = FeedStatus::Ready;
        self.last_updated = Some(Utc::now());
        log_snapshot(self.records.len());
        self.records.len()
    }

    pub fn apply_error(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!("Announcement feed degraded: {}", reason);
        self.status = FeedStatus::Degraded(reason);
    }

    pub fn records(&self) -> &[AnnouncementRecord] {
        &self.records
    }

    pub fn rows(&self) -> &[RowDescriptor] {
        &self.rows
    }

    pub fn status(&self) -> &FeedStatus {
        &self.status
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Record at a transient position. Only valid for the current snapshot.
    pub fn record_at(&self, position: usize) -> Option<&AnnouncementRecord> {
        self.records.get(position)
    }

    pub fn find(&self, key: &str) -> Option<&AnnouncementRecord> {
        self.records.iter().find(|r| r.key == key)
    }
}
