//! Membership plan catalog.
//!
//! Maps the loose tokens an operator types ("1", "m", "Monthly", "annual",
//! ...) to one of three canonical plans. The menu shows the plans as
//! `1) Monthly  2) Quarterly  3) Yearly`, which is why `2` means quarterly
//! and `3` means yearly even though `12` also means yearly.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A canonical membership plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipPlan {
    Monthly,
    Quarterly,
    Yearly,
}

impl MembershipPlan {
    /// Plan length in calendar months.
    pub fn months(self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::Yearly => 12,
        }
    }

    /// Label stored on member records.
    pub fn label(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
        }
    }

    /// Look up a token (already trimmed and lower-cased).
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "monthly" | "m" | "1" => Some(Self::Monthly),
            "quarterly" | "q" | "2" => Some(Self::Quarterly),
            "yearly" | "y" | "12" | "annual" | "3" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for MembershipPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MembershipPlan {
    type Err = PlanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(&normalize_token(s)).ok_or_else(|| PlanParseError(s.trim().to_owned()))
    }
}

/// Error returned when a token names no known plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid membership type: {0:?}")]
pub struct PlanParseError(pub String);

/// What a plan token resolves to.
///
/// An unrecognized token has no `plan`, zero `months`, and the title-cased
/// input as its `label`. Callers in this crate always reject it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanResolution {
    pub plan: Option<MembershipPlan>,
    pub months: u32,
    pub label: String,
}

impl PlanResolution {
    /// Whether the token named a real plan.
    pub fn is_valid(&self) -> bool {
        self.plan.is_some()
    }
}

/// Resolve a user-entered plan token. Case- and whitespace-insensitive.
pub fn resolve(token: &str) -> PlanResolution {
    match token.parse::<MembershipPlan>() {
        Ok(plan) => PlanResolution {
            plan: Some(plan),
            months: plan.months(),
            label: plan.label().to_owned(),
        },
        Err(_) => PlanResolution {
            plan: None,
            months: 0,
            label: title_case(&normalize_token(token)),
        },
    }
}

fn normalize_token(token: &str) -> String {
    token.trim().to_lowercase()
}

/// Upper-case the first letter of every run of letters and lower-case the
/// rest (`"gold plus"` -> `"Gold Plus"`, `"1st"` -> `"1St"`).
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}
