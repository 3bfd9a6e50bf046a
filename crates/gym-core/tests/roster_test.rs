//! Integration tests for roster operations.
//!
//! Operations run against a `MemberStore` backed by a file in a temporary
//! directory, so every test also checks what reached disk.

use gym_core::calendar::advance;
use gym_core::roster::{
    RosterError, SearchOutcome, UpdateAction, add_member, expired_members, find_member,
    list_members, search_members, update_member,
};
use gym_db::store::{self, LoadStatus};
use gym_db::{MemberRecord, MemberStore};
use gym_test_utils::{date, monthly_member, sample_roster, test_roster, unwritable_data_file};

// -----------------------------------------------------------------------
// add_member
// -----------------------------------------------------------------------

#[test]
fn add_member_appends_and_saves() {
    let roster = test_roster();
    let mut store = roster.empty_store();
    let today = date(2025, 1, 31);

    let added = add_member(&mut store, "  Meera Iyer ", "98765-43210", "1", today)
        .expect("add should succeed");

    assert_eq!(added.name, "Meera Iyer");
    assert_eq!(added.phone, "9876543210");
    assert_eq!(added.membership_type, "Monthly");
    assert_eq!(added.start_date, "2025-01-31");
    assert_eq!(added.expiry_date, "2025-02-28");
    assert_eq!(added.parsed_expiry(), Some(advance(today, 1)));

    let report = store::load(&roster.data_file);
    assert_eq!(report.status, LoadStatus::Loaded);
    assert_eq!(report.members, vec![added]);
}

#[test]
fn add_member_uses_plan_length() {
    let roster = test_roster();
    let mut store = roster.empty_store();
    let today = date(2024, 2, 29);

    let q = add_member(&mut store, "Q", "1111111111", "quarterly", today).unwrap();
    let y = add_member(&mut store, "Y", "2222222222", " Annual ", today).unwrap();

    assert_eq!(q.expiry_date, "2024-05-29");
    assert_eq!(y.membership_type, "Yearly");
    assert_eq!(y.expiry_date, "2025-02-28");
    assert_eq!(store.len(), 2);
}

#[test]
fn add_member_rejects_duplicate_phone() {
    let roster = test_roster();
    let mut store = roster.saved_store(sample_roster());
    let before = store.members().to_vec();

    let err = add_member(&mut store, "Someone Else", "(987) 654 3210", "y", date(2025, 6, 1))
        .expect_err("duplicate phone must be rejected");

    assert!(matches!(err, RosterError::DuplicatePhone(ref p) if p == "9876543210"));
    assert_eq!(store.members(), before.as_slice());
    assert_eq!(store::load(&roster.data_file).members, before);
}

#[test]
fn add_member_validation_order_and_no_save() {
    let roster = test_roster();
    let mut store = roster.empty_store();
    let today = date(2025, 6, 1);

    let cases = [
        ("   ", "9876543210", "1"),
        ("Ann", "12345", "1"),
        ("Ann", "9876543210", "weekly"),
    ];
    let errors: Vec<RosterError> = cases
        .iter()
        .map(|(name, phone, plan)| add_member(&mut store, name, phone, plan, today).unwrap_err())
        .collect();

    assert!(matches!(errors[0], RosterError::EmptyName));
    assert!(matches!(errors[1], RosterError::InvalidPhone(_)));
    assert!(matches!(errors[2], RosterError::UnknownPlan(ref t) if t == "weekly"));
    assert!(errors.iter().all(RosterError::is_validation));
    assert!(store.is_empty());
    assert!(!roster.data_file.exists(), "validation failures must not save");
}

#[test]
fn add_member_rolls_back_when_save_fails() {
    let roster = test_roster();
    let existing = sample_roster();
    let mut store = MemberStore::with_members(unwritable_data_file(&roster), existing.clone());

    let err = add_member(&mut store, "Lost", "5550001111", "m", date(2025, 6, 1))
        .expect_err("save should fail");

    assert!(matches!(err, RosterError::Persist(_)));
    assert!(!err.is_validation());
    assert_eq!(store.members(), existing.as_slice());
    assert_eq!(store.find_by_phone("5550001111"), None);
}

// -----------------------------------------------------------------------
// update_member
// -----------------------------------------------------------------------

#[test]
fn rename_trims_and_saves() {
    let roster = test_roster();
    let mut store = roster.saved_store(sample_roster());

    let updated = update_member(
        &mut store,
        "9123456780",
        UpdateAction::Rename(" Arjun Mehta ".to_string()),
        date(2025, 6, 1),
    )
    .unwrap();

    assert_eq!(updated.name, "Arjun Mehta");
    assert_eq!(store::load(&roster.data_file).members[1].name, "Arjun Mehta");
}

#[test]
fn rename_to_blank_is_rejected() {
    let roster = test_roster();
    let mut store = roster.saved_store(sample_roster());

    let err = update_member(
        &mut store,
        "9123456780",
        UpdateAction::Rename("  ".to_string()),
        date(2025, 6, 1),
    )
    .unwrap_err();

    assert!(matches!(err, RosterError::EmptyName));
    assert_eq!(store.members()[1].name, "arjun mehta");
}

#[test]
fn change_phone_rejects_collision_but_allows_same_number() {
    let roster = test_roster();
    let mut store = roster.saved_store(sample_roster());
    let today = date(2025, 6, 1);

    let err = update_member(
        &mut store,
        "9876543210",
        UpdateAction::ChangePhone("9988776655".to_string()),
        today,
    )
    .unwrap_err();
    assert!(matches!(err, RosterError::PhoneInUse(ref p) if p == "9988776655"));

    let same = update_member(
        &mut store,
        "9876543210",
        UpdateAction::ChangePhone("98765 43210".to_string()),
        today,
    )
    .unwrap();
    assert_eq!(same.phone, "9876543210");

    let moved = update_member(
        &mut store,
        "9876543210",
        UpdateAction::ChangePhone("9000000001".to_string()),
        today,
    )
    .unwrap();
    assert_eq!(moved.phone, "9000000001");
    assert_eq!(store.find_by_phone("9876543210"), None);
    assert_eq!(store::load(&roster.data_file).members[0].phone, "9000000001");
}

#[test]
fn change_phone_rejects_bad_format() {
    let roster = test_roster();
    let mut store = roster.saved_store(sample_roster());

    let err = update_member(
        &mut store,
        "9876543210",
        UpdateAction::ChangePhone("12-34".to_string()),
        date(2025, 6, 1),
    )
    .unwrap_err();

    assert!(matches!(err, RosterError::InvalidPhone(_)));
}

#[test]
fn change_plan_keeps_start_date() {
    let roster = test_roster();
    let mut store = roster.saved_store(sample_roster());

    // Priya started 2025-05-20 on a monthly plan.
    let updated = update_member(
        &mut store,
        "9876543210",
        UpdateAction::ChangePlan("Y".to_string()),
        date(2025, 9, 9),
    )
    .unwrap();

    assert_eq!(updated.start_date, "2025-05-20");
    assert_eq!(updated.expiry_date, "2026-05-20");
    assert_eq!(updated.membership_type, "Yearly");
}

#[test]
fn change_plan_with_broken_start_date_restarts_today() {
    let roster = test_roster();
    let mut broken = monthly_member("Broken", "4444444444", date(2025, 1, 1));
    broken.start_date = "someday".to_string();
    let mut store = roster.saved_store(vec![broken]);

    let updated = update_member(
        &mut store,
        "4444444444",
        UpdateAction::ChangePlan("q".to_string()),
        date(2025, 8, 31),
    )
    .unwrap();

    assert_eq!(updated.start_date, "2025-08-31");
    assert_eq!(updated.expiry_date, "2025-11-30");
}

#[test]
fn renew_restarts_term_today() {
    let roster = test_roster();
    let mut store = roster.saved_store(sample_roster());
    let today = date(2025, 6, 15);

    // Arjun's quarterly plan lapsed on 2025-04-10.
    let renewed = update_member(
        &mut store,
        "9123456780",
        UpdateAction::Renew("1".to_string()),
        today,
    )
    .unwrap();

    assert_eq!(renewed.start_date, "2025-06-15");
    assert_eq!(renewed.expiry_date, "2025-07-15");
    assert_eq!(renewed.membership_type, "Monthly");
    assert!(expired_members(store.members(), today).is_empty());
}

#[test]
fn update_with_unknown_plan_changes_nothing() {
    let roster = test_roster();
    let mut store = roster.saved_store(sample_roster());
    let before = store.members().to_vec();

    let err = update_member(
        &mut store,
        "9988776655",
        UpdateAction::Renew("lifetime".to_string()),
        date(2025, 6, 1),
    )
    .unwrap_err();

    assert!(matches!(err, RosterError::UnknownPlan(_)));
    assert_eq!(store.members(), before.as_slice());
}

#[test]
fn update_unknown_member_fails() {
    let roster = test_roster();
    let mut store = roster.saved_store(sample_roster());

    let err = update_member(
        &mut store,
        "98765",
        UpdateAction::Rename("Nobody".to_string()),
        date(2025, 6, 1),
    )
    .unwrap_err();

    assert!(matches!(err, RosterError::MemberNotFound(ref p) if p == "98765"));
}

#[test]
fn update_keeps_change_when_save_fails() {
    let roster = test_roster();
    let mut store = MemberStore::with_members(unwritable_data_file(&roster), sample_roster());

    let err = update_member(
        &mut store,
        "9988776655",
        UpdateAction::Rename("Kavya R".to_string()),
        date(2025, 6, 1),
    )
    .unwrap_err();

    assert!(matches!(err, RosterError::Persist(_)));
    assert_eq!(store.members()[2].name, "Kavya R");
}

// -----------------------------------------------------------------------
// Read-only operations
// -----------------------------------------------------------------------

#[test]
fn search_prefers_exact_match() {
    let members = vec![
        monthly_member("Long", "9876543210", date(2025, 1, 1)),
        monthly_member("Other", "1987654321", date(2025, 1, 1)),
    ];

    let outcome = search_members(&members, "987-654-3210").unwrap();

    assert_eq!(outcome, SearchOutcome::Exact(&members[0]));
}

#[test]
fn search_falls_back_to_substring() {
    let members = sample_roster();

    match search_members(&members, "99").unwrap() {
        SearchOutcome::Partial(hits) => {
            let names: Vec<&str> = hits.iter().map(|m| m.name.as_str()).collect();
            assert_eq!(names, ["Kavya Rao"]);
        }
        other => panic!("expected partial matches, got {other:?}"),
    }

    match search_members(&members, "0000").unwrap() {
        SearchOutcome::Partial(hits) => assert!(hits.is_empty()),
        other => panic!("expected no matches, got {other:?}"),
    }
}

#[test]
fn search_rejects_input_without_digits() {
    let err = search_members(&sample_roster(), "call me").unwrap_err();
    assert!(matches!(err, RosterError::EmptyPhone));
}

#[test]
fn find_member_normalizes_input() {
    let members = sample_roster();
    assert_eq!(find_member(&members, "+ 9988 776 655").unwrap(), 2);
    assert!(find_member(&members, "").is_err());
}

#[test]
fn list_members_sorts_without_reordering_storage() {
    let members = sample_roster();

    let names: Vec<&str> = list_members(&members).iter().map(|m| m.name.as_str()).collect();

    assert_eq!(names, ["arjun mehta", "Kavya Rao", "Priya Nair"]);
    assert_eq!(members[0].name, "Priya Nair");
}

#[test]
fn expired_members_uses_strict_comparison() {
    let mut members = sample_roster();
    members.push(MemberRecord {
        name: "Garbled".to_string(),
        phone: "1231231234".to_string(),
        membership_type: "Monthly".to_string(),
        start_date: "2025-01-01".to_string(),
        expiry_date: "??".to_string(),
    });

    let on_expiry_day: Vec<&str> = expired_members(&members, date(2025, 6, 20))
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(on_expiry_day, ["arjun mehta", "Garbled"]);

    let day_after: Vec<&str> = expired_members(&members, date(2025, 6, 21))
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(day_after, ["arjun mehta", "Priya Nair", "Garbled"]);
}
