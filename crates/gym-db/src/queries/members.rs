//! Lookups over the in-memory roster.
//!
//! The roster is a plain slice in insertion order; every lookup is a linear
//! scan. Sorting happens on borrowed views and never changes storage order.

use chrono::NaiveDate;

use crate::models::MemberRecord;

/// Index of the first record whose phone equals `phone`.
pub fn find_by_phone(members: &[MemberRecord], phone: &str) -> Option<usize> {
    members.iter().position(|m| m.phone == phone)
}

/// Records whose phone contains `fragment`, in storage order.
pub fn phones_containing<'a>(members: &'a [MemberRecord], fragment: &str) -> Vec<&'a MemberRecord> {
    members
        .iter()
        .filter(|m| m.phone.contains(fragment))
        .collect()
}

/// All records ordered by case-insensitive name, then phone.
pub fn sorted_for_display(members: &[MemberRecord]) -> Vec<&MemberRecord> {
    let mut view: Vec<&MemberRecord> = members.iter().collect();
    view.sort_by_cached_key(|m| (m.name.to_lowercase(), m.phone.clone()));
    view
}

/// Records whose membership lapsed before `today`, oldest expiry first.
///
/// Records with an unparseable expiry date are included. Ordering compares
/// the stored expiry strings, which for ISO dates is chronological.
pub fn expired_as_of(members: &[MemberRecord], today: NaiveDate) -> Vec<&MemberRecord> {
    let mut expired: Vec<&MemberRecord> = members
        .iter()
        .filter(|m| m.is_expired_on(today))
        .collect();
    expired.sort_by(|a, b| a.expiry_date.cmp(&b.expiry_date));
    expired
}
