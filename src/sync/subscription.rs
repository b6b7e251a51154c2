// file: src/sync/subscription.rs

use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::error::AppError;
use crate::models::StoredDocument;
use crate::store::DocumentStore;
use crate::utils::retry::{retry_with_exponential_backoff, RetryConfig};

#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotEvent {
    /// Full collection, ascending by date
    Snapshot(Vec<StoredDocument>),
    /// Fetch failed after retries; listening continues
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct SubscriptionOptions {
    pub poll_interval: Duration,
    pub retry: RetryConfig,
}

impl Default for SubscriptionOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            retry: RetryConfig::default(),
        }
    }
}

/// Live listener on the announcements collection.
///
/// The listener task runs until the subscription is cancelled or dropped,
/// or the receiving side of the channel goes away.
pub struct SnapshotSubscription {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl SnapshotSubscription {
    pub fn spawn(
        store: Arc<dyn DocumentStore>,
        sender: Sender<SnapshotEvent>,
        options: SubscriptionOptions,
    ) -> Self {
        let token = CancellationToken::new();
        let handle = tokio::spawn(listen(store, sender, options, token.clone()));
        Self {
            token,
            handle: Some(handle),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Cancels the listener and waits for it to stop.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Snapshot listener ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for SnapshotSubscription {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn listen(
    store: Arc<dyn DocumentStore>,
    sender: Sender<SnapshotEvent>,
    options: SubscriptionOptions,
    token: CancellationToken,
) {
    info!("Snapshot listener started (poll every {:?})", options.poll_interval);

    let mut changes = store.changes();
    let mut changes_open = true;
    let mut ticker = tokio::time::interval(options.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_sent: Option<Vec<StoredDocument>> = None;

    loop {
        // The first tick completes immediately and yields the initial snapshot.
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
            changed = changes.changed(), if changes_open => {
                if changed.is_err() {
                    debug!("Store change feed closed, falling back to polling");
                    changes_open = false;
                    continue;
                }
            }
        }

        let fetched = tokio::select! {
            _ = token.cancelled() => break,
            fetched = fetch_snapshot(&store, &options.retry) => fetched,
        };

        let event = match fetched {
            Ok(docs) => {
                if last_sent.as_ref() == Some(&docs) {
                    continue;
                }
                last_sent = Some(docs.clone());
                SnapshotEvent::Snapshot(docs)
            }
            Err(e) => {
                warn!("Snapshot fetch failed (retryable: {}): {}", e.is_retryable(), e);
                last_sent = None;
                SnapshotEvent::Failed(e.to_safe_string())
            }
        };

        if sender.send(event).await.is_err() {
            debug!("Snapshot receiver dropped");
            break;
        }
    }

    info!("Snapshot listener stopped");
}

async fn fetch_snapshot(
    store: &Arc<dyn DocumentStore>,
    retry: &RetryConfig,
) -> Result<Vec<StoredDocument>, AppError> {
    retry_with_exponential_backoff(retry, || {
        let store = store.clone();
        async move { store.ordered_snapshot().await.map_err(anyhow::Error::from) }
    })
    .await
    .map_err(|e| match e.downcast::<AppError>() {
        Ok(err) => err,
        Err(_) => AppError::subscription("could not read announcements"),
    })
}
