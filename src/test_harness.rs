//! Shared fixtures for whitebox tests.
//!
//! Builders here keep test rows short to write while still producing
//! fully-populated [`Row`] values.

use crate::model::{Role, Row, RowId, Score, Status};
use chrono::NaiveDate;

/// Build a row with the fields tests usually care about.
///
/// The id is `user-{n}`; email and department are derived from the name.
pub(crate) fn row(n: usize, name: &str, role: Role, status: Status, score: u8) -> Row {
    Row {
        id: id(&format!("user-{n}")),
        name: name.to_string(),
        email: format!("{}@company.com", name.to_lowercase().replace(' ', ".")),
        role,
        status,
        score: Score::new(i64::from(score)).expect("fixture score in range"),
        department: "Engineering".to_string(),
        join_date: NaiveDate::from_ymd_opt(2022, 1, 15).expect("valid date"),
        last_active: NaiveDate::from_ymd_opt(2024, 5, 20).expect("valid date"),
    }
}

/// Parse an id, panicking on the empty string.
pub(crate) fn id(raw: &str) -> RowId {
    RowId::new(raw).expect("fixture id is non-empty")
}

/// Parse a list of ids.
pub(crate) fn ids(raw: &[&str]) -> Vec<RowId> {
    raw.iter().map(|r| id(r)).collect()
}

/// Five rows with scores [10, 50, 90, 30, 70]; rows 1, 3 and 5 are active.
pub(crate) fn five_rows() -> Vec<Row> {
    vec![
        row(1, "Alice Johnson", Role::Admin, Status::Active, 10),
        row(2, "Bob Smith", Role::Developer, Status::Inactive, 50),
        row(3, "Carol Davis", Role::Developer, Status::Active, 90),
        row(4, "Dan Brown", Role::Designer, Status::Pending, 30),
        row(5, "Eve Martinez", Role::Analyst, Status::Active, 70),
    ]
}
