// Noticeboard Library
// Exposes core functionality for testing and reuse

pub mod app;
pub mod command_handlers;
pub mod config;
pub mod database;
pub mod error;
pub mod messages;
pub mod models;
pub mod store;
pub mod sync;
pub mod ui;
pub mod ui_state;
pub mod utils;

// Re-export commonly used types
pub use app::{AppFlags, NoticeboardApp};
pub use config::AppConfig;
pub use database::Database;
pub use error::{AppError, AppResult};
pub use models::*;
pub use store::DocumentStore;
pub use sync::{AnnouncementFeed, FeedStatus, SnapshotEvent, SnapshotSubscription, SubscriptionOptions};
