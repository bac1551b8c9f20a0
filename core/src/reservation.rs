//! Reservation and flight records: raw input rows and their normalized form.
//!
//! Raw rows arrive from CSV/JSON exports with loosely typed cells: dates as
//! free text, counts as numbers or strings, and columns that may carry
//! localized names. Normalization never rejects a row; bad cells become
//! `None` (dates) or documented defaults (counts, text).

use crate::{
    archetype::Archetype,
    types::{Day, ReservationId, MISSING_TEXT},
};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One reservation row as received. Every cell is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawReservation {
    #[serde(default, alias = "rezervasyon_id")]
    pub reservation_id: Option<Value>,
    #[serde(
        default,
        alias = "geliş tarihi",
        alias = "gelis_tarihi",
        alias = "giris_tarihi"
    )]
    pub arrival_date: Option<Value>,
    #[serde(
        default,
        alias = "gidiş tarihi",
        alias = "gidis_tarihi",
        alias = "cikis_tarihi"
    )]
    pub departure_date: Option<Value>,
    #[serde(default, alias = "yetişkin", alias = "yetiskin")]
    pub adults: Option<Value>,
    #[serde(default, alias = "çocuk", alias = "cocuk")]
    pub children: Option<Value>,
    #[serde(default, alias = "oda_tipi")]
    pub room_type: Option<Value>,
    #[serde(default, alias = "kanal")]
    pub channel: Option<Value>,
    #[serde(default, alias = "şirket")]
    pub company: Option<Value>,
    #[serde(default, alias = "milliyet")]
    pub nationality: Option<Value>,
}

/// A normalized, classified reservation.
///
/// Built once by the segmenter and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub arrival_date: Option<Day>,
    pub departure_date: Option<Day>,
    pub adults: u32,
    pub children: u32,
    pub group_size: u32,
    pub room_type: String,
    pub channel: String,
    pub company: String,
    pub nationality: String,
    /// Nights between arrival and departure, clamped at 0. Zero when either
    /// date is unknown.
    pub length_of_stay: i64,
    /// Monday = 0 … Sunday = 6.
    pub arrival_weekday: Option<u32>,
    pub is_weekend_arrival: bool,
    pub archetype: Archetype,
}

impl Reservation {
    /// Normalize a raw row. `index` is the row position, used to synthesize
    /// an id when the row has none.
    pub fn from_raw(raw: &RawReservation, index: usize) -> Self {
        let arrival_date = raw.arrival_date.as_ref().and_then(parse_date_value);
        let departure_date = raw.departure_date.as_ref().and_then(parse_date_value);
        let adults = raw.adults.as_ref().and_then(parse_count).unwrap_or(1);
        let children = raw.children.as_ref().and_then(parse_count).unwrap_or(0);

        let reservation_id = raw
            .reservation_id
            .as_ref()
            .and_then(text_value)
            .unwrap_or_else(|| format!("SYN-{index:06}"));

        let length_of_stay = match (arrival_date, departure_date) {
            (Some(a), Some(d)) => (d - a).num_days().max(0),
            _ => 0,
        };
        let arrival_weekday = arrival_date.map(|d| d.weekday().num_days_from_monday());
        let is_weekend_arrival = arrival_date
            .map(|d| matches!(d.weekday(), Weekday::Fri | Weekday::Sat | Weekday::Sun))
            .unwrap_or(false);

        Self {
            reservation_id,
            arrival_date,
            departure_date,
            adults,
            children,
            group_size: adults.saturating_add(children),
            room_type: text_or_sentinel(raw.room_type.as_ref()),
            channel: text_or_sentinel(raw.channel.as_ref()),
            company: text_or_sentinel(raw.company.as_ref()),
            nationality: text_or_sentinel(raw.nationality.as_ref()),
            length_of_stay,
            arrival_weekday,
            is_weekend_arrival,
            archetype: Archetype::Other,
        }
    }

    /// True when both dates are known and departure is strictly after arrival.
    pub fn has_valid_span(&self) -> bool {
        matches!(
            (self.arrival_date, self.departure_date),
            (Some(a), Some(d)) if d > a
        )
    }
}

/// One scheduled departure feeding an airline area.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFlight {
    #[serde(default)]
    pub date: Option<Value>,
    #[serde(default)]
    pub gate_time: Option<Value>,
    #[serde(default)]
    pub pax_count: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub date: NaiveDate,
    pub gate_time: NaiveTime,
    pub pax_count: f64,
}

impl Flight {
    /// Returns `None` when the date or gate time cannot be parsed.
    pub fn from_raw(raw: &RawFlight) -> Option<Self> {
        let date = raw.date.as_ref().and_then(parse_date_value)?;
        let gate_time = raw.gate_time.as_ref().and_then(parse_time_value)?;
        let pax_count = raw.pax_count.as_ref().and_then(number_value).unwrap_or(0.0);
        Some(Self {
            date,
            gate_time,
            pax_count,
        })
    }

    pub fn gate_departure(&self) -> NaiveDateTime {
        self.date.and_time(self.gate_time)
    }
}

/// Observed housekeeping labor for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActualHours {
    pub date: NaiveDate,
    pub hk_man_hours: f64,
}

// ── Cell parsing ─────────────────────────────────────────────────────────────

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y", "%m/%d/%Y", "%Y%m%d"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Permissive date parse. Accepts ISO dates, ISO datetimes (time dropped),
/// and a few common day/month layouts. Unparseable text yields `None`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(text, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
                .map(|dt| dt.date())
        })
}

pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    TIME_FORMATS
        .iter()
        .find_map(|f| NaiveTime::parse_from_str(text, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
                .map(|dt| dt.time())
        })
}

fn parse_date_value(v: &Value) -> Option<NaiveDate> {
    match v {
        Value::String(s) => parse_date(s),
        _ => None,
    }
}

fn parse_time_value(v: &Value) -> Option<NaiveTime> {
    match v {
        Value::String(s) => parse_time(s),
        _ => None,
    }
}

fn number_value(v: &Value) -> Option<f64> {
    let x = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    x.filter(|x| x.is_finite())
}

/// Integer head count; fractional values truncate, negatives clamp to 0.
fn parse_count(v: &Value) -> Option<u32> {
    number_value(v).map(|x| x.trunc().max(0.0) as u32)
}

fn text_value(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text_or_sentinel(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(other) => text_value(other).unwrap_or_else(|| MISSING_TEXT.to_string()),
        None => MISSING_TEXT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawReservation {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn missing_counts_take_defaults() {
        let r = Reservation::from_raw(&raw(json!({"arrival_date": "2025-01-06"})), 0);
        assert_eq!(r.adults, 1);
        assert_eq!(r.children, 0);
        assert_eq!(r.company, MISSING_TEXT);
        assert_eq!(r.nationality, MISSING_TEXT);
    }

    #[test]
    fn oversized_head_counts_saturate() {
        let r = Reservation::from_raw(
            &raw(json!({
                "arrival_date": "2025-01-06",
                "departure_date": "2025-01-07",
                "adults": "5000000000",
                "children": 1
            })),
            0,
        );
        assert_eq!(r.adults, u32::MAX);
        assert_eq!(r.children, 1);
        assert_eq!(r.group_size, u32::MAX);
        assert_eq!(crate::segmenter::classify(&r), Archetype::FamilyWithKids);
    }

    #[test]
    fn ids_are_synthesized_from_row_index() {
        let r = Reservation::from_raw(&RawReservation::default(), 42);
        assert_eq!(r.reservation_id, "SYN-000042");
    }

    #[test]
    fn localized_columns_are_accepted() {
        let r = Reservation::from_raw(
            &raw(json!({
                "rezervasyon_id": "T1",
                "gelis_tarihi": "2025-03-07",
                "cikis_tarihi": "2025-03-09",
                "yetiskin": "2",
                "cocuk": 1,
                "kanal": "OTA"
            })),
            0,
        );
        assert_eq!(r.reservation_id, "T1");
        assert_eq!(r.length_of_stay, 2);
        assert_eq!(r.group_size, 3);
        assert_eq!(r.channel, "OTA");
        assert!(r.is_weekend_arrival, "2025-03-07 is a Friday");
    }

    #[test]
    fn unparseable_dates_become_none() {
        let r = Reservation::from_raw(
            &raw(json!({"arrival_date": "soon", "departure_date": "2025-01-08"})),
            0,
        );
        assert_eq!(r.arrival_date, None);
        assert_eq!(r.length_of_stay, 0);
        assert_eq!(r.arrival_weekday, None);
        assert!(!r.has_valid_span());
    }

    #[test]
    fn inverted_span_is_kept_but_flagged() {
        let r = Reservation::from_raw(
            &raw(json!({"arrival_date": "2025-01-08", "departure_date": "2025-01-06"})),
            0,
        );
        assert_eq!(r.length_of_stay, 0);
        assert!(!r.has_valid_span());
    }

    #[test]
    fn dates_parse_permissively() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 11);
        assert_eq!(parse_date("2025-01-11"), expected);
        assert_eq!(parse_date("2025-01-11 14:30:00"), expected);
        assert_eq!(parse_date("11.01.2025"), expected);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn flight_without_gate_time_is_skipped() {
        let f: RawFlight =
            serde_json::from_value(json!({"date": "2025-05-01", "pax_count": 180})).unwrap();
        assert!(Flight::from_raw(&f).is_none());
    }
}
