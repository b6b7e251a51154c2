//! Command handlers module
//!
//! Async work triggered from the home screen. The add form controller owns
//! validation and the store write; the screen decides what to show.

use chrono::Utc;
use log::{error, info};
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::NewAnnouncement;
use crate::store::DocumentStore;

/// Produces the key a new announcement is stored under.
pub type KeyGenerator = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct AddFormController {
    store: Arc<dyn DocumentStore>,
    key_generator: KeyGenerator,
}

impl AddFormController {
    pub fn new(store: Arc<dyn DocumentStore>, key_generator: KeyGenerator) -> Self {
        Self { store, key_generator }
    }

    /// Both fields are required. Whitespace counts as content.
    pub fn validate(title: &str, content: &str) -> AppResult<NewAnnouncement> {
        if title.is_empty() || content.is_empty() {
            return Err(AppError::empty_fields());
        }
        Ok(NewAnnouncement {
            title: title.to_string(),
            content: content.to_string(),
            date: Utc::now(),
        })
    }

    /// Stores an already validated announcement and returns its key.
    pub async fn write(&self, announcement: NewAnnouncement) -> AppResult<String> {
        let key = (self.key_generator)();
        info!("Adding announcement '{}' at key {}", announcement.title, key);

        match self.store.create(&key, &announcement).await {
            Ok(()) => Ok(key),
            Err(AppError::Write(msg)) => {
                error!("Failed to add announcement: {}", msg);
                Err(AppError::Write(msg))
            }
            Err(e) => {
                error!("Failed to add announcement: {}", e);
                Err(AppError::write(e.to_safe_string()))
            }
        }
    }

    pub async fn submit(&self, title: &str, content: &str) -> AppResult<String> {
        let announcement = Self::validate(title, content)?;
        self.write(announcement).await
    }
}
