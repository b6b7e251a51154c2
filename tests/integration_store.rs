use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use noticeboard::command_handlers::{AddFormController, KeyGenerator};
use noticeboard::utils::retry::RetryConfig;
use noticeboard::{
    AnnouncementFeed, Database, DocumentStore, SnapshotEvent, SnapshotSubscription, StoredDocument,
    SubscriptionOptions,
};
use tempfile::NamedTempFile;
use tokio::sync::mpsc;
use tokio::time::timeout;

async fn create_test_database() -> (Database, String) {
    let temp_file = NamedTempFile::new().unwrap();
    let (_, path) = temp_file.keep().unwrap();
    let db_url = format!("sqlite:{}?mode=rwc", path.to_str().unwrap());

    let db = Database::connect(&db_url).await.unwrap();
    (db, db_url)
}

fn counting_keys() -> KeyGenerator {
    let counter = Arc::new(AtomicUsize::new(0));
    Arc::new(move || format!("key-{}", counter.fetch_add(1, Ordering::SeqCst)))
}

fn options(poll_ms: u64) -> SubscriptionOptions {
    SubscriptionOptions {
        poll_interval: Duration::from_millis(poll_ms),
        retry: RetryConfig {
            max_attempts: 2,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            backoff_multiplier: 2.0,
        },
    }
}

/// Waits for a snapshot holding exactly `len` documents.
async fn snapshot_of_len(rx: &mut mpsc::Receiver<SnapshotEvent>, len: usize) -> Vec<StoredDocument> {
    timeout(Duration::from_secs(5), async {
        loop {
            match rx.recv().await {
                Some(SnapshotEvent::Snapshot(docs)) if docs.len() == len => return docs,
                Some(_) => continue,
                None => panic!("listener stopped"),
            }
        }
    })
    .await
    .expect("timed out waiting for snapshot")
}

#[tokio::test]
async fn test_new_announcements_show_up_newest_first() {
    let (db, _) = create_test_database().await;
    let store: Arc<dyn DocumentStore> = Arc::new(db);
    let controller = AddFormController::new(store.clone(), counting_keys());

    let (tx, mut rx) = mpsc::channel(16);
    let _subscription = SnapshotSubscription::spawn(store.clone(), tx, options(10_000));

    // An empty collection still produces a snapshot.
    assert!(snapshot_of_len(&mut rx, 0).await.is_empty());

    controller.submit("First", "Opening hours").await.unwrap();
    snapshot_of_len(&mut rx, 1).await;

    tokio::time::sleep(Duration::from_millis(10)).await;
    controller.submit("Second", "Fire drill at noon").await.unwrap();
    let docs = snapshot_of_len(&mut rx, 2).await;

    // The store hands out oldest first...
    assert_eq!(docs[0].title, "First");
    assert_eq!(docs[1].title, "Second");

    // ...and the feed shows newest first.
    let mut feed = AnnouncementFeed::new();
    assert_eq!(feed.apply_snapshot(&docs), 2);
    assert_eq!(feed.records()[0].title, "Second");
    assert_eq!(feed.rows()[0].key, "key-1");
    assert_eq!(feed.rows()[1].position, 1);
}

#[tokio::test]
async fn test_empty_submit_writes_nothing() {
    let (db, _) = create_test_database().await;
    let store: Arc<dyn DocumentStore> = Arc::new(db.clone());
    let controller = AddFormController::new(store, counting_keys());

    assert!(controller.submit("", "no title").await.is_err());
    assert!(controller.submit("no content", "").await.is_err());

    assert_eq!(db.count_announcements().await.unwrap(), 0);
}

#[tokio::test]
async fn test_polling_picks_up_other_writers() {
    let (db, db_url) = create_test_database().await;
    // A second connection has its own change feed, like another process would.
    let other = Database::connect(&db_url).await.unwrap();

    let (tx, mut rx) = mpsc::channel(16);
    let _subscription = SnapshotSubscription::spawn(Arc::new(db), tx, options(25));
    snapshot_of_len(&mut rx, 0).await;

    let writer = AddFormController::new(Arc::new(other), counting_keys());
    writer.submit("From elsewhere", "Hello").await.unwrap();

    let docs = snapshot_of_len(&mut rx, 1).await;
    assert_eq!(docs[0].title, "From elsewhere");
}

#[tokio::test]
async fn test_dropping_subscription_stops_updates() {
    let (db, _) = create_test_database().await;
    let store: Arc<dyn DocumentStore> = Arc::new(db);

    let (tx, mut rx) = mpsc::channel(16);
    let subscription = SnapshotSubscription::spawn(store, tx, options(10));
    snapshot_of_len(&mut rx, 0).await;

    drop(subscription);

    let closed = timeout(Duration::from_secs(2), async {
        while rx.recv().await.is_some() {}
    })
    .await;
    assert!(closed.is_ok());
}
