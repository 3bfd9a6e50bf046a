//! Text rendering for menu screens.

use chrono::NaiveDateTime;

use gym_core::RosterError;
use gym_db::MemberRecord;
use gym_db::store::LoadStatus;

const RULE_WIDTH: usize = 65;

/// The two-line banner at the top of every screen.
pub fn header(now: NaiveDateTime) -> String {
    format!(
        "Gym Membership Manager  |  Date: {}  Time: {}\n{}",
        now.format("%d/%m/%Y"),
        now.format("%H:%M:%S"),
        "-".repeat(RULE_WIDTH)
    )
}

/// One member as an indented block, optionally numbered, followed by a
/// blank line.
pub fn member(record: &MemberRecord, index: Option<usize>) -> String {
    let prefix = index.map(|i| format!("[{i}] ")).unwrap_or_default();
    format!(
        "{prefix}Name: {}\n    Phone: {}\n    Type: {}\n    Start: {}\n    Expiry: {}\n",
        record.name, record.phone, record.membership_type, record.start_date, record.expiry_date
    )
}

/// Numbered member blocks, starting at 1.
pub fn member_list<'a>(records: impl IntoIterator<Item = &'a MemberRecord>) -> String {
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| member(r, Some(i + 1)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Operator-facing explanation of a failed operation.
pub fn roster_error(err: &RosterError) -> String {
    match err {
        RosterError::EmptyName => "Name cannot be empty.".to_string(),
        RosterError::EmptyPhone => "Phone cannot be empty.".to_string(),
        RosterError::InvalidPhone(_) => {
            "Invalid phone number. Please enter a 10-digit number (digits only).".to_string()
        }
        RosterError::DuplicatePhone(_) => {
            "This phone number already exists. Use Update Member to modify/renew.".to_string()
        }
        RosterError::UnknownPlan(_) => "Invalid membership type.".to_string(),
        RosterError::MemberNotFound(_) => "Member not found.".to_string(),
        RosterError::PhoneInUse(_) => {
            "That phone number is already used by another member.".to_string()
        }
        RosterError::Persist(e) => format!("\nFailed to save data: {e}"),
    }
}

/// Startup notice for a data file that could not be used, if any.
pub fn load_notice(status: &LoadStatus) -> Option<String> {
    match status {
        LoadStatus::Missing | LoadStatus::Loaded => None,
        LoadStatus::Recovered { backup: Some(path) } => Some(format!(
            "The data file was corrupt and has been copied to {}.\nStarting with an empty member list.",
            path.display()
        )),
        LoadStatus::Recovered { backup: None } => Some(
            "The data file was corrupt and could not be backed up.\nStarting with an empty member list."
                .to_string(),
        ),
        LoadStatus::Unreadable => Some(
            "The data file could not be read.\nStarting with an empty member list; saving may overwrite it."
                .to_string(),
        ),
    }
}
