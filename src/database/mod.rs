// file: src/database/mod.rs

use anyhow::{Context, Result};
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::watch;

use crate::config::AppConfig;
use crate::models::StoredDocument;

pub mod announcements;

/// SQLite-backed announcements collection.
///
/// Every successful write bumps a revision counter so listeners in this
/// process learn about the change without waiting for their next poll.
#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
    revision: Arc<watch::Sender<u64>>,
}

impl Database {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        Self::connect_with(config.connect_options()).await
    }

    pub async fn connect(db_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(db_url)
            .context("Invalid database URL")?
            .create_if_missing(true);
        Self::connect_with(options).await
    }

    pub async fn connect_with(options: SqliteConnectOptions) -> Result<Self> {
        info!("Opening database {}", options.clone().get_filename().display());

        let pool = SqlitePool::connect_with(options)
            .await
            .context("Failed to connect to database")?;

        run_schema(&pool).await.context("Failed to run database schema")?;

        info!("Database initialized successfully");

        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        let (revision, _) = watch::channel(0);
        Database {
            pool,
            revision: Arc::new(revision),
        }
    }

    // --- Announcement Delegates ---

    pub async fn get_ordered_announcements(&self) -> Result<Vec<StoredDocument>> {
        announcements::get_ordered(&self.pool).await
    }

    pub async fn put_announcement(&self, doc: &StoredDocument) -> Result<()> {
        announcements::put(&self.pool, doc).await?;
        self.revision.send_modify(|rev| *rev += 1);
        Ok(())
    }

    pub async fn count_announcements(&self) -> Result<i64> {
        announcements::count(&self.pool).await
    }

    /// Receiver that changes whenever this handle writes.
    pub fn watch_revisions(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

pub(crate) async fn run_schema(pool: &SqlitePool) -> Result<()> {
    let schema = include_str!("schema.sql");

    let mut current_statement = String::new();

    for line in schema.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("--") || trimmed.is_empty() {
            continue;
        }

        current_statement.push_str(line);
        current_statement.push('\n');

        if trimmed.ends_with(';') {
            sqlx::query(&current_statement).execute(pool).await?;
            current_statement.clear();
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::NamedTempFile;

    pub(crate) async fn create_test_database() -> Database {
        let temp_file = NamedTempFile::new().unwrap();
        let (_, path) = temp_file.keep().unwrap();
        let db_path = format!("sqlite:{}", path.to_str().unwrap());

        let pool = SqlitePool::connect(&db_path).await.unwrap();

        run_schema(&pool).await.unwrap();

        Database::from_pool(pool)
    }

    fn doc(key: &str, title: &str, date: chrono::DateTime<Utc>) -> StoredDocument {
        StoredDocument {
            key: key.to_string(),
            title: title.to_string(),
            content: format!("{} body", title),
            date,
        }
    }

    #[tokio::test]
    async fn test_database_new() {
        let db = create_test_database().await;
        assert!(!db.pool.is_closed());
    }

    #[tokio::test]
    async fn test_new_handles_url_characters_in_path() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("notice?board#1.db");
        let config = AppConfig {
            db_path: db_path.clone(),
            poll_interval: std::time::Duration::from_secs(5),
        };

        let db = Database::new(&config).await.unwrap();
        db.put_announcement(&doc("k", "Hello", Utc::now())).await.unwrap();

        assert!(db_path.exists());
        assert_eq!(db.count_announcements().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_ordered_empty() {
        let db = create_test_database().await;
        let docs = db.get_ordered_announcements().await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_get_ordered_is_ascending_by_date() {
        let db = create_test_database().await;
        let base = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();

        db.put_announcement(&doc("b", "Second", base + Duration::hours(1))).await.unwrap();
        db.put_announcement(&doc("c", "Third", base + Duration::hours(2))).await.unwrap();
        db.put_announcement(&doc("a", "First", base)).await.unwrap();

        let docs = db.get_ordered_announcements().await.unwrap();
        let titles: Vec<&str> = docs.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
        assert_eq!(docs[0].date, base);
    }

    #[tokio::test]
    async fn test_put_same_key_overwrites() {
        let db = create_test_database().await;
        let now = Utc::now();

        db.put_announcement(&doc("dup", "Old", now)).await.unwrap();
        db.put_announcement(&doc("dup", "New", now)).await.unwrap();

        assert_eq!(db.count_announcements().await.unwrap(), 1);
        let docs = db.get_ordered_announcements().await.unwrap();
        assert_eq!(docs[0].title, "New");
    }

    #[tokio::test]
    async fn test_put_bumps_revision() {
        let db = create_test_database().await;
        let mut revisions = db.watch_revisions();
        assert_eq!(*revisions.borrow_and_update(), 0);

        db.put_announcement(&doc("k", "Hello", Utc::now())).await.unwrap();

        assert!(revisions.has_changed().unwrap());
        assert_eq!(*revisions.borrow_and_update(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_revisions() {
        let db = create_test_database().await;
        let other = db.clone();
        let mut revisions = other.watch_revisions();

        db.put_announcement(&doc("k", "Hello", Utc::now())).await.unwrap();

        assert!(revisions.has_changed().unwrap());
    }
}
