//! Roster operations.
//!
//! Each operation is a short transaction against a [`MemberStore`]: validate
//! the input, mutate the in-memory roster, then save. Operations take the
//! current date as an argument instead of reading the clock.
//!
//! Save failures are handled differently by add and update. A failed add
//! removes the new record again so memory matches disk; a failed update
//! keeps its change in memory and only reports the error.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

use gym_db::models::MemberRecord;
use gym_db::queries::members as member_queries;
use gym_db::{MemberStore, StoreError};

use crate::calendar::advance;
use crate::phone::{is_valid_phone, normalize_phone};
use crate::plan::{self, MembershipPlan};

/// Errors returned by roster operations.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("phone cannot be empty")]
    EmptyPhone,

    #[error("invalid phone number {0:?}: enter a 10-digit number")]
    InvalidPhone(String),

    #[error("phone number {0} already exists; use update to modify or renew")]
    DuplicatePhone(String),

    #[error("invalid membership type: {0:?}")]
    UnknownPlan(String),

    #[error("no member with phone {0:?}")]
    MemberNotFound(String),

    #[error("phone number {0} is already used by another member")]
    PhoneInUse(String),

    #[error("failed to save data: {0}")]
    Persist(#[from] StoreError),
}

impl RosterError {
    /// True for input problems (nothing was changed or saved); false for
    /// save failures.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Persist(_))
    }
}

/// A change to one existing member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// Replace the name.
    Rename(String),
    /// Replace the phone number (raw input, normalized before use).
    ChangePhone(String),
    /// Switch plan; expiry is recomputed from the existing start date.
    ChangePlan(String),
    /// Start a new term today on the given plan.
    Renew(String),
}

/// Result of a phone search.
#[derive(Debug, PartialEq, Eq)]
pub enum SearchOutcome<'a> {
    /// A record whose phone matches exactly.
    Exact(&'a MemberRecord),
    /// Records whose phone contains the input. May be empty.
    Partial(Vec<&'a MemberRecord>),
}

// ---------------------------------------------------------------------------
// Mutating operations
// ---------------------------------------------------------------------------

/// Register a new member whose term starts `today`.
///
/// Validates the name, phone format, phone uniqueness and plan token (in
/// that order) before touching the roster. If saving fails the new record
/// is removed again and [`RosterError::Persist`] is returned.
pub fn add_member(
    store: &mut MemberStore,
    name: &str,
    raw_phone: &str,
    plan_token: &str,
    today: NaiveDate,
) -> Result<MemberRecord, RosterError> {
    let name = validate_name(name)?;
    let phone = validate_new_phone(store.members(), raw_phone)?;
    let plan = resolve_plan(plan_token)?;

    let record = MemberRecord::new(
        name,
        phone,
        plan.label(),
        today,
        advance(today, plan.months()),
    );
    store.push(record.clone());

    if let Err(e) = store.save() {
        store.pop();
        warn!(phone = %record.phone, error = %e, "save failed, new member discarded");
        return Err(e.into());
    }

    info!(phone = %record.phone, plan = %plan, expiry = %record.expiry_date, "added member");
    Ok(record)
}

/// Apply `action` to the member whose phone matches `raw_phone` exactly.
///
/// Validation failures leave the record untouched. If saving fails the
/// change stays in memory and [`RosterError::Persist`] is returned.
pub fn update_member(
    store: &mut MemberStore,
    raw_phone: &str,
    action: UpdateAction,
    today: NaiveDate,
) -> Result<MemberRecord, RosterError> {
    let index = find_member(store.members(), raw_phone)?;
    let change = validate_update(store, index, action)?;

    let record = store
        .get_mut(index)
        .ok_or_else(|| RosterError::MemberNotFound(normalize_phone(raw_phone)))?;
    apply_update(record, change, today);
    let updated = record.clone();

    if let Err(e) = store.save() {
        warn!(phone = %updated.phone, error = %e, "save failed, update kept in memory only");
        return Err(e.into());
    }

    info!(phone = %updated.phone, "updated member");
    Ok(updated)
}

/// An [`UpdateAction`] whose input has already been checked.
enum ValidChange {
    Name(String),
    Phone(String),
    Plan(MembershipPlan),
    Renewal(MembershipPlan),
}

fn validate_update(
    store: &MemberStore,
    index: usize,
    action: UpdateAction,
) -> Result<ValidChange, RosterError> {
    match action {
        UpdateAction::Rename(name) => Ok(ValidChange::Name(validate_name(&name)?)),
        UpdateAction::ChangePhone(raw) => {
            let phone = validate_phone(&raw)?;
            match store.find_by_phone(&phone) {
                Some(other) if other != index => Err(RosterError::PhoneInUse(phone)),
                _ => Ok(ValidChange::Phone(phone)),
            }
        }
        UpdateAction::ChangePlan(token) => Ok(ValidChange::Plan(resolve_plan(&token)?)),
        UpdateAction::Renew(token) => Ok(ValidChange::Renewal(resolve_plan(&token)?)),
    }
}

fn apply_update(record: &mut MemberRecord, change: ValidChange, today: NaiveDate) {
    match change {
        ValidChange::Name(name) => record.name = name,
        ValidChange::Phone(phone) => record.phone = phone,
        ValidChange::Plan(plan) => {
            // A start date that no longer parses is reset to today.
            let start = record.parsed_start().unwrap_or(today);
            record.membership_type = plan.label().to_owned();
            record.set_term(start, advance(start, plan.months()));
        }
        ValidChange::Renewal(plan) => {
            record.membership_type = plan.label().to_owned();
            record.set_term(today, advance(today, plan.months()));
        }
    }
}

// ---------------------------------------------------------------------------
// Read-only operations
// ---------------------------------------------------------------------------

/// Index of the member whose phone equals the normalized `raw_phone`.
pub fn find_member(members: &[MemberRecord], raw_phone: &str) -> Result<usize, RosterError> {
    let phone = normalize_phone(raw_phone);
    member_queries::find_by_phone(members, &phone).ok_or(RosterError::MemberNotFound(phone))
}

/// Look up members by phone: an exact match wins, otherwise every record
/// whose phone contains the normalized input.
pub fn search_members<'a>(
    members: &'a [MemberRecord],
    raw_phone: &str,
) -> Result<SearchOutcome<'a>, RosterError> {
    let phone = normalize_phone(raw_phone);
    if phone.is_empty() {
        return Err(RosterError::EmptyPhone);
    }

    if let Some(index) = member_queries::find_by_phone(members, &phone) {
        return Ok(SearchOutcome::Exact(&members[index]));
    }

    let matches = member_queries::phones_containing(members, &phone);
    debug!(fragment = %phone, count = matches.len(), "partial phone search");
    Ok(SearchOutcome::Partial(matches))
}

/// Every member, sorted by name (case-insensitive) then phone.
pub fn list_members(members: &[MemberRecord]) -> Vec<&MemberRecord> {
    member_queries::sorted_for_display(members)
}

/// Members whose expiry date is before `today` or unreadable, oldest first.
pub fn expired_members(members: &[MemberRecord], today: NaiveDate) -> Vec<&MemberRecord> {
    member_queries::expired_as_of(members, today)
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

/// Trimmed name, or [`RosterError::EmptyName`].
pub fn validate_name(name: &str) -> Result<String, RosterError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RosterError::EmptyName);
    }
    Ok(name.to_owned())
}

/// Normalized 10-digit phone, or [`RosterError::InvalidPhone`].
pub fn validate_phone(raw: &str) -> Result<String, RosterError> {
    let phone = normalize_phone(raw);
    if !is_valid_phone(&phone) {
        return Err(RosterError::InvalidPhone(raw.trim().to_owned()));
    }
    Ok(phone)
}

/// Normalized phone that is well-formed and not yet on the roster.
pub fn validate_new_phone(members: &[MemberRecord], raw: &str) -> Result<String, RosterError> {
    let phone = validate_phone(raw)?;
    if member_queries::find_by_phone(members, &phone).is_some() {
        return Err(RosterError::DuplicatePhone(phone));
    }
    Ok(phone)
}

/// The plan a token names, or [`RosterError::UnknownPlan`].
pub fn resolve_plan(token: &str) -> Result<MembershipPlan, RosterError> {
    plan::resolve(token)
        .plan
        .ok_or_else(|| RosterError::UnknownPlan(token.trim().to_owned()))
}
