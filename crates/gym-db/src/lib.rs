//! Roster data model and file-backed storage for the gym membership manager.

pub mod config;
pub mod models;
pub mod queries;
pub mod store;

pub use config::StoreConfig;
pub use models::MemberRecord;
pub use store::{LoadReport, LoadStatus, MemberStore, StoreError};
