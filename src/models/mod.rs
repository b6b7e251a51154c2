// file: src/models/mod.rs

pub mod announcement;

pub use announcement::{AnnouncementRecord, NewAnnouncement, RowDescriptor, StoredDocument};
