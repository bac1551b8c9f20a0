#![allow(dead_code)]

use chrono::NaiveDate;
use hospops_core::{Archetype, RawReservation, Reservation};
use serde_json::{json, Value};

/// Route `log` output through the test harness; safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

pub fn raw(value: Value) -> RawReservation {
    serde_json::from_value(value).expect("raw reservation")
}

/// A normalized stay with a fixed archetype.
pub fn stay(
    id: &str,
    arrival: &str,
    departure: &str,
    adults: u32,
    children: u32,
    archetype: Archetype,
) -> Reservation {
    let mut r = Reservation::from_raw(
        &raw(json!({
            "reservation_id": id,
            "arrival_date": arrival,
            "departure_date": departure,
            "adults": adults,
            "children": children,
            "room_type": "Standard",
            "channel": "Direct",
        })),
        0,
    );
    r.archetype = archetype;
    r
}

/// `count` one-night stays arriving on `arrival`.
pub fn one_night_block(
    prefix: &str,
    arrival: NaiveDate,
    count: usize,
    adults: u32,
    archetype: Archetype,
) -> Vec<Reservation> {
    let departure = arrival.succ_opt().expect("next day");
    (0..count)
        .map(|i| {
            stay(
                &format!("{prefix}-{arrival}-{i}"),
                &arrival.to_string(),
                &departure.to_string(),
                adults,
                0,
                archetype,
            )
        })
        .collect()
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
