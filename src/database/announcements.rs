// file: src/database/announcements.rs
use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::StoredDocument;

/// All announcements, oldest first. Ties on `date` fall back to the key so
/// the order is total.
pub async fn get_ordered(pool: &SqlitePool) -> Result<Vec<StoredDocument>> {
    let docs = sqlx::query_as::<_, StoredDocument>(
        r#"
        SELECT key, title, content, date
        FROM announcements
        ORDER BY date ASC, key ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(docs)
}

/// Writes a document at `doc.key`, replacing any document already there.
pub async fn put(pool: &SqlitePool, doc: &StoredDocument) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO announcements (key, title, content, date)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET
            title = excluded.title,
            content = excluded.content,
            date = excluded.date
        "#,
    )
    .bind(&doc.key)
    .bind(&doc.title)
    .bind(&doc.content)
    .bind(doc.date)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM announcements")
        .fetch_one(pool)
        .await?;

    Ok(total)
}
