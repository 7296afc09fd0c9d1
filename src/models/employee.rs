use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One personnel record in the roster.
///
/// Textual fields are never null: absent values in the directory payload are
/// normalized to empty strings at the load boundary. `manager_email` is the
/// email of another employee, or empty for a root; it may reference an address
/// that does not resolve within the same snapshot, in which case the employee
/// is treated as having no manager for hierarchy purposes.
///
/// `presence` is volatile. It is initialized to [`Presence::Offline`] by the
/// loader and rewritten wholesale by every enrichment pass; it is never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub job_title: String,
    pub department: String,
    pub email: String,
    pub photo: String,
    pub manager_email: String,
    pub phone: String,
    pub location: String,
    pub skills: String,
    pub about_me: String,
    pub joining_date: Option<DateTime<Utc>>,
    pub presence: Presence,
}

/// Volatile availability classification of an employee.
///
/// Defaults to `Offline` whenever the real value is unknown: no email address,
/// failed lookup, or an unrecognized provider token.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Available,
    Busy,
    Away,
    #[default]
    Offline,
}

impl Presence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Busy => "busy",
            Self::Away => "away",
            Self::Offline => "offline",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "available" => Some(Self::Available),
            "busy" => Some(Self::Busy),
            "away" => Some(Self::Away),
            "offline" => Some(Self::Offline),
            _ => None,
        }
    }

    /// Map a free-text availability token from the presence provider.
    ///
    /// Providers report compound tokens like `BusyInACall`; anything that does
    /// not lowercase to a recognized value is treated as offline rather than
    /// propagated.
    pub fn from_token(token: &str) -> Self {
        Self::from_str(&token.to_lowercase()).unwrap_or(Self::Offline)
    }
}
