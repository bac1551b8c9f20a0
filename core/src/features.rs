//! Temporal aggregation: nightly expansion and time-of-day bucketing.
//!
//! Two independent pipelines feed every forecaster:
//!   1. Nightly expansion: each reservation becomes one row per night in
//!      `[arrival, departure)`, then rows are grouped by (date, archetype).
//!   2. Time-of-day bucketing: a source quantity is spread over timestamps
//!      by a renormalized weight distribution and summed per bucket.
//!
//! Both are purely additive: row order never changes the totals.

use crate::{
    archetype::Archetype,
    error::{ForecastError, ForecastResult},
    reservation::Reservation,
    types::{BucketTime, Day},
};
use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

// ── Nightly expansion ────────────────────────────────────────────────────────

/// One occupied night of one reservation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NightRow<'a> {
    pub date: Day,
    pub reservation: &'a Reservation,
}

/// Expand reservations into occupied nights. The departure date is never
/// occupied. Rows missing either date are skipped.
pub fn expand_nightly(reservations: &[Reservation]) -> Vec<NightRow<'_>> {
    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for r in reservations {
        let (Some(arrival), Some(departure)) = (r.arrival_date, r.departure_date) else {
            skipped += 1;
            continue;
        };
        rows.extend(
            arrival
                .iter_days()
                .take_while(|d| *d < departure)
                .map(|date| NightRow {
                    date,
                    reservation: r,
                }),
        );
    }
    if skipped > 0 {
        log::debug!("features: skipped {skipped} reservations with unparseable dates");
    }
    rows
}

/// In-house volume for one (date, archetype), with same-day totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyOccupancy {
    pub date: Day,
    pub archetype: Archetype,
    /// Distinct reservations occupying the night.
    pub rooms: u64,
    pub adult_nights: u64,
    pub child_nights: u64,
    pub guest_nights: u64,
    pub rooms_total: u64,
    pub adults_total: u64,
    pub children_total: u64,
    pub guest_nights_total: u64,
}

impl DailyOccupancy {
    pub fn covers(&self) -> u64 {
        self.adult_nights + self.child_nights
    }
}

#[derive(Default)]
struct NightAccum<'a> {
    ids: HashSet<&'a str>,
    adults: u64,
    children: u64,
    rows: u64,
}

#[derive(Default, Clone, Copy)]
struct DayTotals {
    rooms: u64,
    adults: u64,
    children: u64,
    guest_nights: u64,
}

/// Group nights by (date, archetype), then attach per-date totals.
/// Output is ordered by date, then archetype.
pub fn occupancy_by_day_and_archetype(nights: &[NightRow<'_>]) -> Vec<DailyOccupancy> {
    let mut groups: BTreeMap<(Day, Archetype), NightAccum<'_>> = BTreeMap::new();
    for night in nights {
        let r = night.reservation;
        let acc = groups.entry((night.date, r.archetype)).or_default();
        acc.ids.insert(r.reservation_id.as_str());
        acc.adults += u64::from(r.adults);
        acc.children += u64::from(r.children);
        acc.rows += 1;
    }

    let mut totals: BTreeMap<Day, DayTotals> = BTreeMap::new();
    for ((date, _), acc) in &groups {
        let t = totals.entry(*date).or_default();
        t.rooms += acc.ids.len() as u64;
        t.adults += acc.adults;
        t.children += acc.children;
        t.guest_nights += acc.rows;
    }

    groups
        .into_iter()
        .map(|((date, archetype), acc)| {
            let t = totals.get(&date).copied().unwrap_or_default();
            DailyOccupancy {
                date,
                archetype,
                rooms: acc.ids.len() as u64,
                adult_nights: acc.adults,
                child_nights: acc.children,
                guest_nights: acc.rows,
                rooms_total: t.rooms,
                adults_total: t.adults,
                children_total: t.children,
                guest_nights_total: t.guest_nights,
            }
        })
        .collect()
}

/// Convenience: expand then group.
pub fn daily_occupancy(reservations: &[Reservation]) -> Vec<DailyOccupancy> {
    occupancy_by_day_and_archetype(&expand_nightly(reservations))
}

/// Reservations departing on each (date, archetype).
pub fn checkouts_by_day_and_archetype(
    reservations: &[Reservation],
) -> BTreeMap<(Day, Archetype), u64> {
    let mut out = BTreeMap::new();
    for r in reservations {
        if let Some(d) = r.departure_date {
            *out.entry((d, r.archetype)).or_insert(0) += 1;
        }
    }
    out
}

/// Reservations departing on each date, all archetypes.
pub fn checkouts_by_day(reservations: &[Reservation]) -> BTreeMap<Day, u64> {
    let mut out = BTreeMap::new();
    for ((date, _), n) in checkouts_by_day_and_archetype(reservations) {
        *out.entry(date).or_insert(0) += n;
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyArrivals {
    pub date: Day,
    pub archetype: Archetype,
    pub arrivals: u64,
    pub arriving_adults: u64,
    pub arriving_children: u64,
}

pub fn arrivals_by_day_and_archetype(reservations: &[Reservation]) -> Vec<DailyArrivals> {
    let mut groups: BTreeMap<(Day, Archetype), (u64, u64, u64)> = BTreeMap::new();
    for r in reservations {
        if let Some(d) = r.arrival_date {
            let g = groups.entry((d, r.archetype)).or_default();
            g.0 += 1;
            g.1 += u64::from(r.adults);
            g.2 += u64::from(r.children);
        }
    }
    groups
        .into_iter()
        .map(|((date, archetype), (arrivals, adults, children))| DailyArrivals {
            date,
            archetype,
            arrivals,
            arriving_adults: adults,
            arriving_children: children,
        })
        .collect()
}

/// Per-day split of in-house rooms into checkouts and stayovers for one
/// archetype. Dates with checkouts but no in-house rooms still appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningLoad {
    pub date: Day,
    pub archetype: Archetype,
    pub rooms: u64,
    pub checkouts: u64,
    pub stayovers: u64,
    pub rooms_total: u64,
    pub guest_nights_total: u64,
}

/// Outer join of occupancy and checkouts on (date, archetype).
pub fn cleaning_load_by_day_and_archetype(reservations: &[Reservation]) -> Vec<CleaningLoad> {
    let occupancy = daily_occupancy(reservations);
    let checkouts = checkouts_by_day_and_archetype(reservations);

    let mut day_totals: BTreeMap<Day, (u64, u64)> = BTreeMap::new();
    let mut rows: BTreeMap<(Day, Archetype), (u64, u64)> = BTreeMap::new();
    for o in &occupancy {
        day_totals.insert(o.date, (o.rooms_total, o.guest_nights_total));
        rows.entry((o.date, o.archetype)).or_default().0 = o.rooms;
    }
    for (key, n) in checkouts {
        rows.entry(key).or_default().1 = n;
    }

    rows.into_iter()
        .map(|((date, archetype), (rooms, checkouts))| {
            let (rooms_total, guest_nights_total) =
                day_totals.get(&date).copied().unwrap_or((0, 0));
            CleaningLoad {
                date,
                archetype,
                rooms,
                checkouts,
                stayovers: rooms.saturating_sub(checkouts),
                rooms_total,
                guest_nights_total,
            }
        })
        .collect()
}

// ── Time-of-day bucketing ────────────────────────────────────────────────────

/// Where a distribution weight lands relative to a source row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOffset {
    /// `"HH:MM"`: that clock time on the reference date.
    ClockTime(NaiveTime),
    /// `"-HH:MM"`: that long before the reference timestamp.
    Before(Duration),
}

impl TimeOffset {
    pub fn parse(key: &str) -> ForecastResult<Self> {
        let key = key.trim();
        let (negative, body) = match key.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, key),
        };
        let bad = || ForecastError::InvalidConfig(format!("bad time offset '{key}'"));
        let (h, m) = body.split_once(':').ok_or_else(bad)?;
        let hours: u32 = h.trim().parse().map_err(|_| bad())?;
        let minutes: u32 = m.trim().parse().map_err(|_| bad())?;
        if minutes >= 60 {
            return Err(bad());
        }
        if negative {
            Ok(Self::Before(Duration::minutes(i64::from(hours) * 60 + i64::from(minutes))))
        } else {
            NaiveTime::from_hms_opt(hours, minutes, 0)
                .map(Self::ClockTime)
                .ok_or_else(bad)
        }
    }

    /// Parse a key as a lead time before the reference (`"-HH:MM"` or
    /// `"HH:MM"`); hours are not limited to a single day.
    pub fn parse_before(key: &str) -> ForecastResult<Self> {
        let key = key.trim();
        let body = key.strip_prefix('-').unwrap_or(key);
        let bad = || ForecastError::InvalidConfig(format!("bad time offset '{key}'"));
        let (h, m) = body.split_once(':').ok_or_else(bad)?;
        let hours: i64 = h.trim().parse().map_err(|_| bad())?;
        let minutes: i64 = m.trim().parse().map_err(|_| bad())?;
        if hours < 0 || !(0..60).contains(&minutes) {
            return Err(bad());
        }
        Ok(Self::Before(Duration::minutes(hours * 60 + minutes)))
    }

    pub fn resolve(&self, reference: BucketTime) -> BucketTime {
        match self {
            Self::ClockTime(t) => reference.date().and_time(*t),
            Self::Before(d) => reference - *d,
        }
    }
}

/// Parsed, renormalized weight distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeDistribution {
    entries: Vec<(TimeOffset, f64)>,
}

impl TimeDistribution {
    /// Parse keys and rescale weights to sum to 1. A distribution whose
    /// weights sum to zero is kept as-is and contributes nothing.
    pub fn from_weights(weights: &BTreeMap<String, f64>) -> ForecastResult<Self> {
        let mut entries = weights
            .iter()
            .map(|(k, w)| Ok((TimeOffset::parse(k)?, *w)))
            .collect::<ForecastResult<Vec<_>>>()?;
        normalize(&mut entries);
        Ok(Self { entries })
    }

    /// Like [`from_weights`](Self::from_weights), but every key is read as a
    /// duration before the reference time, with or without the leading `-`.
    pub fn gate_relative(weights: &BTreeMap<String, f64>) -> ForecastResult<Self> {
        let mut entries = weights
            .iter()
            .map(|(k, w)| Ok((TimeOffset::parse_before(k)?, *w)))
            .collect::<ForecastResult<Vec<_>>>()?;
        normalize(&mut entries);
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(TimeOffset, f64)] {
        &self.entries
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }
}

fn normalize(entries: &mut [(TimeOffset, f64)]) {
    let total: f64 = entries.iter().map(|(_, w)| w).sum();
    if total > 0.0 {
        for (_, w) in entries.iter_mut() {
            *w /= total;
        }
    }
}

/// Expected load per bucket timestamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemandBuckets {
    buckets: BTreeMap<BucketTime, f64>,
}

impl DemandBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity × weight` to every bucket the distribution maps to.
    pub fn accumulate(
        &mut self,
        reference: BucketTime,
        quantity: f64,
        distribution: &TimeDistribution,
    ) {
        for (offset, weight) in distribution.entries() {
            *self.buckets.entry(offset.resolve(reference)).or_insert(0.0) += quantity * weight;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn get(&self, at: &BucketTime) -> Option<f64> {
        self.buckets.get(at).copied()
    }

    pub fn total(&self) -> f64 {
        self.buckets.values().sum()
    }

    /// Buckets in timestamp order.
    pub fn iter(&self) -> impl Iterator<Item = (BucketTime, f64)> + '_ {
        self.buckets.iter().map(|(t, v)| (*t, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> BucketTime {
        NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn offsets_parse_both_forms() {
        assert_eq!(
            TimeOffset::parse("14:30").unwrap(),
            TimeOffset::ClockTime(NaiveTime::from_hms_opt(14, 30, 0).unwrap())
        );
        assert_eq!(
            TimeOffset::parse("-01:15").unwrap(),
            TimeOffset::Before(Duration::minutes(75))
        );
        assert!(TimeOffset::parse("25:00").is_err());
        assert!(TimeOffset::parse("noon").is_err());
        assert!(TimeOffset::parse("10:75").is_err());
    }

    #[test]
    fn gate_keys_read_as_lead_times_with_or_without_sign() {
        assert_eq!(
            TimeOffset::parse_before("00:30").unwrap(),
            TimeOffset::Before(Duration::minutes(30))
        );
        assert_eq!(
            TimeOffset::parse_before("-02:00").unwrap(),
            TimeOffset::Before(Duration::minutes(120))
        );
    }

    #[test]
    fn gate_offsets_resolve_before_reference() {
        let off = TimeOffset::parse("-00:45").unwrap();
        assert_eq!(off.resolve(at(10, 0)), at(9, 15));
    }

    #[test]
    fn clock_offsets_ignore_reference_time() {
        let off = TimeOffset::parse("07:00").unwrap();
        assert_eq!(off.resolve(at(23, 59)), at(7, 0));
    }

    #[test]
    fn weights_are_renormalized() {
        let weights: BTreeMap<String, f64> =
            [("07:00".to_string(), 2.0), ("08:00".to_string(), 6.0)].into();
        let dist = TimeDistribution::from_weights(&weights).unwrap();
        assert!((dist.total_weight() - 1.0).abs() < 1e-12);
        assert!((dist.entries()[1].1 - 0.75).abs() < 1e-12);
    }

    #[test]
    fn zero_weight_distribution_adds_nothing() {
        let weights: BTreeMap<String, f64> = [("07:00".to_string(), 0.0)].into();
        let dist = TimeDistribution::from_weights(&weights).unwrap();
        let mut buckets = DemandBuckets::new();
        buckets.accumulate(at(0, 0), 10.0, &dist);
        assert_eq!(buckets.total(), 0.0);
    }
}
