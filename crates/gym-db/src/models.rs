use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Date format used for every date stored in the data file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One gym member as stored in the data file.
///
/// Dates are kept as ISO `YYYY-MM-DD` strings rather than parsed values so
/// that a record with a damaged date still loads; use [`parsed_start`] and
/// [`parsed_expiry`] for typed access. Fields missing from a stored record
/// deserialize as empty strings.
///
/// [`parsed_start`]: MemberRecord::parsed_start
/// [`parsed_expiry`]: MemberRecord::parsed_expiry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberRecord {
    /// Display name. Never empty for records created by this program.
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    /// Ten ASCII digits. Unique across the roster.
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    /// Canonical plan label (`Monthly`, `Quarterly`, `Yearly`).
    #[serde(deserialize_with = "lenient_string")]
    pub membership_type: String,
    /// ISO start date.
    #[serde(deserialize_with = "lenient_string")]
    pub start_date: String,
    /// ISO expiry date, always the start date advanced by the plan length.
    #[serde(deserialize_with = "lenient_string")]
    pub expiry_date: String,
}

impl MemberRecord {
    /// Build a record from typed dates.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        membership_type: impl Into<String>,
        start_date: NaiveDate,
        expiry_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            membership_type: membership_type.into(),
            start_date: format_date(start_date),
            expiry_date: format_date(expiry_date),
        }
    }

    /// Parsed start date, or `None` if the stored string is not a valid date.
    pub fn parsed_start(&self) -> Option<NaiveDate> {
        parse_date(&self.start_date)
    }

    /// Parsed expiry date, or `None` if the stored string is not a valid date.
    pub fn parsed_expiry(&self) -> Option<NaiveDate> {
        parse_date(&self.expiry_date)
    }

    /// Replace both dates at once.
    pub fn set_term(&mut self, start_date: NaiveDate, expiry_date: NaiveDate) {
        self.start_date = format_date(start_date);
        self.expiry_date = format_date(expiry_date);
    }

    /// Whether the membership has lapsed as of `today`.
    ///
    /// A record whose expiry date cannot be parsed counts as expired.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.parsed_expiry().is_none_or(|expiry| expiry < today)
    }
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Format a date as ISO `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Read any JSON value as a field string: `null` is empty, strings are
/// taken as-is, everything else becomes its JSON text (`9876543210`,
/// `true`).
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// On-disk envelope: `{"members": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterFile {
    pub members: Vec<MemberRecord>,
}

/// Either accepted shape of the data file.
///
/// The envelope is what [`crate::store::save`] writes; a bare list is still
/// accepted on read.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum StoredRoster {
    Envelope(RosterFile),
    Bare(Vec<MemberRecord>),
}

impl StoredRoster {
    pub(crate) fn into_members(self) -> Vec<MemberRecord> {
        match self {
            Self::Envelope(file) => file.members,
            Self::Bare(members) => members,
        }
    }
}
