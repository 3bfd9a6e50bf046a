//! Membership rules for the gym roster: plan catalog, term arithmetic, and
//! the add/search/list/expired/update operations.

pub mod calendar;
pub mod phone;
pub mod plan;
pub mod roster;

pub use plan::{MembershipPlan, PlanResolution};
pub use roster::{RosterError, SearchOutcome, UpdateAction};
