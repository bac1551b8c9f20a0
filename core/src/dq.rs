//! Basic data-quality checks on a reservation extract.

use crate::reservation::Reservation;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

pub const REQUIRED_RESERVATION_COLUMNS: [&str; 9] = [
    "reservation_id",
    "arrival_date",
    "departure_date",
    "adults",
    "children",
    "room_type",
    "channel",
    "company",
    "nationality",
];

/// Localized export headers and the column they stand for.
const COLUMN_ALIASES: [(&str, &str); 15] = [
    ("rezervasyon_id", "reservation_id"),
    ("geliş tarihi", "arrival_date"),
    ("gelis_tarihi", "arrival_date"),
    ("giris_tarihi", "arrival_date"),
    ("gidiş tarihi", "departure_date"),
    ("gidis_tarihi", "departure_date"),
    ("cikis_tarihi", "departure_date"),
    ("yetişkin", "adults"),
    ("yetiskin", "adults"),
    ("çocuk", "children"),
    ("cocuk", "children"),
    ("oda_tipi", "room_type"),
    ("kanal", "channel"),
    ("şirket", "company"),
    ("milliyet", "nationality"),
];

pub fn canonical_column(name: &str) -> &str {
    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(name)
}

/// Canonical column names present in any row of a JSON record array.
pub fn columns_of(records: &[Value]) -> BTreeSet<String> {
    records
        .iter()
        .filter_map(Value::as_object)
        .flat_map(|obj| obj.keys())
        .map(|k| canonical_column(k.trim()).to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DqReport {
    pub ok: bool,
    pub issues: Vec<String>,
}

/// Report missing required columns and rows whose departure is not after
/// arrival. Rows with an unparseable date are not counted as inverted.
pub fn check_reservations<S: AsRef<str>>(columns: &[S], rows: &[Reservation]) -> DqReport {
    let present: BTreeSet<&str> = columns
        .iter()
        .map(|c| canonical_column(c.as_ref()))
        .collect();
    let mut issues: Vec<String> = REQUIRED_RESERVATION_COLUMNS
        .iter()
        .filter(|c| !present.contains(*c))
        .map(|c| format!("Missing column: {c}"))
        .collect();

    if present.contains("arrival_date") && present.contains("departure_date") {
        let inverted = rows
            .iter()
            .filter(|r| matches!((r.arrival_date, r.departure_date), (Some(a), Some(d)) if d <= a))
            .count();
        if inverted > 0 {
            issues.push(format!("{inverted} rows have departure_date <= arrival_date"));
        }
    }

    if !issues.is_empty() {
        log::warn!("dq: {} issues", issues.len());
    }
    DqReport {
        ok: issues.is_empty(),
        issues,
    }
}
