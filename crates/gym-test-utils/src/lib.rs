//! Shared test utilities for gym integration tests.
//!
//! Each test gets its own temporary directory holding the roster file, so
//! tests never touch a real `gym.json` and can run in parallel.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use tempfile::TempDir;

use gym_db::models::MemberRecord;
use gym_db::{MemberStore, StoreConfig};

/// A temporary directory with a roster file path inside it.
///
/// The directory (and everything in it) is removed when this is dropped.
pub struct TestRoster {
    /// Held to keep the directory alive.
    pub dir: TempDir,
    /// `<dir>/gym.json`. Not created until something saves to it.
    pub data_file: PathBuf,
}

impl TestRoster {
    /// Store config pointing at this roster's data file.
    pub fn config(&self) -> StoreConfig {
        StoreConfig::new(&self.data_file)
    }

    /// An empty store bound to this roster's data file, without loading.
    pub fn empty_store(&self) -> MemberStore {
        MemberStore::with_members(&self.data_file, Vec::new())
    }

    /// A store bound to this roster's data file holding `members`, saved to
    /// disk so that a subsequent load sees them.
    pub fn saved_store(&self, members: Vec<MemberRecord>) -> MemberStore {
        let store = MemberStore::with_members(&self.data_file, members);
        store.save().expect("seeding the roster file should succeed");
        store
    }

    /// Raw contents of the data file.
    pub fn read_data_file(&self) -> String {
        std::fs::read_to_string(&self.data_file).expect("roster file should exist")
    }
}

/// Create a fresh temporary roster location.
pub fn test_roster() -> TestRoster {
    let dir = TempDir::new().expect("failed to create temp dir");
    let data_file = dir.path().join("gym.json");
    TestRoster { dir, data_file }
}

/// A data file path whose parent directory does not exist, so every save
/// to it fails.
pub fn unwritable_data_file(roster: &TestRoster) -> PathBuf {
    roster.dir.path().join("missing-dir").join("gym.json")
}

/// Shorthand for a calendar date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid test date {year}-{month}-{day}"))
}

/// A record with a one-month plan starting on `start`.
pub fn monthly_member(name: &str, phone: &str, start: NaiveDate) -> MemberRecord {
    let expiry = start
        .checked_add_months(chrono::Months::new(1))
        .expect("test dates stay in range");
    MemberRecord::new(name, phone, "Monthly", start, expiry)
}

/// A small roster with mixed plans and one lapsed membership (as of
/// 2025-06-01).
pub fn sample_roster() -> Vec<MemberRecord> {
    vec![
        MemberRecord::new("Priya Nair", "9876543210", "Monthly", date(2025, 5, 20), date(2025, 6, 20)),
        MemberRecord::new("arjun mehta", "9123456780", "Quarterly", date(2025, 1, 10), date(2025, 4, 10)),
        MemberRecord::new("Kavya Rao", "9988776655", "Yearly", date(2025, 2, 28), date(2026, 2, 28)),
    ]
}

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that read or modify process environment variables.
pub fn lock_env() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
