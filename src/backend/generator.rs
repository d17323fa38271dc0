//! Deterministic synthetic dataset.
//!
//! Rows look like an employee directory: `user-1..user-N`, realistic names,
//! emails derived from the name, and dates inside fixed windows. The same
//! `(count, seed)` always yields the same rows.

use crate::model::{Role, Row, RowId, Score, Status};
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Michael", "Sarah", "David", "Emily", "Robert", "Jessica", "William", "Ashley",
    "James", "Amanda", "Christopher", "Stephanie", "Daniel", "Melissa", "Matthew", "Nicole",
    "Anthony", "Elizabeth", "Mark", "Helen", "Donald", "Deborah", "Steven", "Rachel", "Paul",
    "Carolyn", "Andrew", "Janet", "Joshua", "Catherine", "Kenneth", "Maria", "Kevin", "Heather",
    "Brian", "Diane", "George", "Ruth", "Timothy", "Julie", "Ronald", "Joyce", "Jason", "Virginia",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Scott", "Torres", "Nguyen", "Hill", "Flores",
];

const DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Marketing",
    "Sales",
    "Human Resources",
    "Finance",
    "Operations",
    "Customer Support",
    "Product",
    "Design",
    "Legal",
    "IT",
    "Research",
];

const EMAIL_DOMAINS: &[&str] = &["company.com", "corp.com", "business.org", "enterprise.net"];

fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}

fn date_between(rng: &mut StdRng, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days().max(0);
    start + Duration::days(rng.random_range(0..=span))
}

/// Generate `count` rows from `seed`.
pub fn generate_rows(count: usize, seed: u64) -> Vec<Row> {
    let mut rng = StdRng::seed_from_u64(seed);

    // Literal dates, always valid.
    let join_start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN);
    let join_end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or(NaiveDate::MIN);
    let active_start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN);
    let active_end = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap_or(NaiveDate::MIN);

    (1..=count)
        .filter_map(|n| {
            let first = *pick(&mut rng, FIRST_NAMES);
            let last = *pick(&mut rng, LAST_NAMES);
            let domain = *pick(&mut rng, EMAIL_DOMAINS);

            Some(Row {
                id: RowId::new(format!("user-{n}")).ok()?,
                name: format!("{first} {last}"),
                email: format!("{}.{}@{}", first.to_lowercase(), last.to_lowercase(), domain),
                role: *pick(&mut rng, &Role::ALL),
                status: *pick(&mut rng, &Status::ALL),
                score: Score::new(rng.random_range(1..=100)).ok()?,
                department: pick(&mut rng, DEPARTMENTS).to_string(),
                join_date: date_between(&mut rng, join_start, join_end),
                last_active: date_between(&mut rng, active_start, active_end),
            })
        })
        .collect()
}
