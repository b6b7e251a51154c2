//! Document store seam
//!
//! The home screen only ever talks to the announcements collection through
//! [`DocumentStore`]. The SQLite [`Database`] is the shipped implementation;
//! tests substitute a mock.

use async_trait::async_trait;
use log::debug;
use std::time::Instant;
use tokio::sync::watch;

use crate::database::Database;
use crate::error::{AppError, AppResult};
use crate::models::{NewAnnouncement, StoredDocument};
use crate::utils::logging::{log_error_with_context, log_store_operation};
use crate::utils::retry::is_transient_error;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document in the collection, ascending by `date`.
    async fn ordered_snapshot(&self) -> AppResult<Vec<StoredDocument>>;

    /// Creates (or replaces) the document stored at `key`.
    async fn create(&self, key: &str, announcement: &NewAnnouncement) -> AppResult<()>;

    /// Ticks whenever the collection is known to have changed.
    fn changes(&self) -> watch::Receiver<u64>;
}

#[async_trait]
impl DocumentStore for Database {
    async fn ordered_snapshot(&self) -> AppResult<Vec<StoredDocument>> {
        let started = Instant::now();
        let docs = match self.get_ordered_announcements().await {
            Ok(docs) => docs,
            Err(e) => {
                log_error_with_context(&e, "Reading announcements");
                return Err(AppError::subscription(read_failure_message(&e)));
            }
        };
        log_store_operation("snapshot", docs.len(), started.elapsed().as_millis() as u64);
        Ok(docs)
    }

    async fn create(&self, key: &str, announcement: &NewAnnouncement) -> AppResult<()> {
        if key.is_empty() {
            return Err(AppError::write("document key is empty"));
        }
        let started = Instant::now();
        let doc = announcement.clone().into_document(key.to_string());
        if let Err(e) = self.put_announcement(&doc).await {
            log_error_with_context(&e, "Writing announcement");
            return Err(AppError::write(write_failure_message(&e)));
        }
        debug!("Stored announcement at key {}", key);
        log_store_operation("create", 1, started.elapsed().as_millis() as u64);
        Ok(())
    }

    fn changes(&self) -> watch::Receiver<u64> {
        self.watch_revisions()
    }
}

// Driver detail stays in the log. The fixed wording still says "busy" for
// contention so callers can retry and explain it.
const STORE_BUSY: &str = "the announcements store is busy";
const READ_FAILED: &str = "could not read announcements";
const WRITE_FAILED: &str = "could not store the announcement";

fn read_failure_message(error: &anyhow::Error) -> &'static str {
    if is_transient_error(error) {
        STORE_BUSY
    } else {
        READ_FAILED
    }
}

fn write_failure_message(error: &anyhow::Error) -> &'static str {
    if is_transient_error(error) {
        STORE_BUSY
    } else {
        WRITE_FAILED
    }
}
