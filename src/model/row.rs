//! Row record and its enumerated fields.

use crate::model::error::ValidationError;
use crate::model::RowId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ===== Role =====

/// Job role of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrator.
    Admin,
    /// Manager.
    Manager,
    /// Developer.
    Developer,
    /// Designer.
    Designer,
    /// Analyst.
    Analyst,
    /// Intern.
    Intern,
}

impl Role {
    /// All roles in display order.
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::Manager,
        Role::Developer,
        Role::Designer,
        Role::Analyst,
        Role::Intern,
    ];

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Developer => "developer",
            Role::Designer => "designer",
            Role::Analyst => "analyst",
            Role::Intern => "intern",
        }
    }

    /// Capitalized name for display.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Developer => "Developer",
            Role::Designer => "Designer",
            Role::Analyst => "Analyst",
            Role::Intern => "Intern",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownRole(s.to_string()))
    }
}

// ===== Status =====

/// Account status of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Active account.
    Active,
    /// Inactive account.
    Inactive,
    /// Awaiting approval.
    Pending,
    /// Suspended account.
    Suspended,
}

impl Status {
    /// All statuses in display order.
    pub const ALL: [Status; 4] = [
        Status::Active,
        Status::Inactive,
        Status::Pending,
        Status::Suspended,
    ];

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
            Status::Pending => "pending",
            Status::Suspended => "suspended",
        }
    }

    /// Capitalized name for display.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
            Status::Pending => "Pending",
            Status::Suspended => "Suspended",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownStatus(s.to_string()))
    }
}

// ===== Score =====

/// Integer score in the inclusive range 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Lowest valid score.
    pub const MIN: Score = Score(0);
    /// Highest valid score.
    pub const MAX: Score = Score(100);

    /// Smart constructor: rejects values outside 0..=100.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if (0..=100).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::ScoreOutOfRange(value))
        }
    }

    /// Raw value.
    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ===== Row =====

/// One record of the dataset.
///
/// `id` is the identity and never changes once the row is in a store;
/// [`RowPatch`] has no way to touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Unique identity.
    pub id: RowId,
    /// Full display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Job role.
    pub role: Role,
    /// Account status.
    pub status: Status,
    /// Score in 0..=100.
    pub score: Score,
    /// Department name.
    pub department: String,
    /// Date the person joined.
    pub join_date: NaiveDate,
    /// Date of last activity.
    pub last_active: NaiveDate,
}

// ===== RowPatch =====

/// Partial update for a row. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowPatch {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New role.
    pub role: Option<Role>,
    /// New status.
    pub status: Option<Status>,
    /// New score.
    pub score: Option<Score>,
    /// New department.
    pub department: Option<String>,
    /// New last-active date.
    pub last_active: Option<NaiveDate>,
}

impl RowPatch {
    /// Patch that only sets the status.
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Patch that only sets the score.
    pub fn score(score: Score) -> Self {
        Self {
            score: Some(score),
            ..Self::default()
        }
    }

    /// True if the patch sets nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply to a row. Returns whether any field actually changed.
    pub fn apply_to(&self, row: &mut Row) -> bool {
        let mut changed = false;
        changed |= assign(&mut row.name, &self.name);
        changed |= assign(&mut row.email, &self.email);
        changed |= assign(&mut row.role, &self.role);
        changed |= assign(&mut row.status, &self.status);
        changed |= assign(&mut row.score, &self.score);
        changed |= assign(&mut row.department, &self.department);
        changed |= assign(&mut row.last_active, &self.last_active);
        changed
    }
}

fn assign<T: Clone + PartialEq>(slot: &mut T, value: &Option<T>) -> bool {
    match value {
        Some(v) if slot != v => {
            *slot = v.clone();
            true
        }
        _ => false,
    }
}
