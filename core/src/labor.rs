//! Housekeeping labor: daily man-hours and headcount.
//!
//! Cleaning work per (date, archetype) is checkouts × minutes_per_checkout
//! plus stayovers × minutes_per_stayover, scaled by the archetype's
//! multiplier. Occupancy and checkouts are outer-joined on (date,
//! archetype): a checkout is priced even when no room of its archetype is
//! occupied that night, so totals can exceed a left join on occupancy.

use crate::{
    config::{ForecastConfig, HousekeepingConfig},
    features::{cleaning_load_by_day_and_archetype, CleaningLoad},
    reservation::Reservation,
    types::Day,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborDay {
    pub date: Day,
    pub hk_man_hours: f64,
    pub recommended_headcount: u32,
    pub shift_hours: f64,
    pub utilization: f64,
    pub rooms_total: u64,
    pub guest_nights_total: u64,
}

/// Unscaled cleaning minutes for one (date, archetype) row.
pub fn base_cleaning_minutes(row: &CleaningLoad, hk: &HousekeepingConfig) -> f64 {
    row.checkouts as f64 * hk.minutes_per_checkout + row.stayovers as f64 * hk.minutes_per_stayover
}

/// Headcount for `hours` of work per day at the given shift and utilization.
pub fn headcount(hours: f64, shift_hours: f64, utilization: f64) -> u32 {
    let raw = (hours / (shift_hours * utilization)).ceil();
    if raw.is_finite() && raw > 0.0 {
        raw as u32
    } else {
        0
    }
}

pub struct LaborForecaster<'a> {
    config: &'a ForecastConfig,
}

impl<'a> LaborForecaster<'a> {
    pub fn new(config: &'a ForecastConfig) -> Self {
        Self { config }
    }

    /// Daily housekeeping plan, ordered by date. `shift_hours` and
    /// `utilization` default to the housekeeping block.
    pub fn predict(
        &self,
        reservations: &[Reservation],
        shift_hours: Option<f64>,
        utilization: Option<f64>,
    ) -> Vec<LaborDay> {
        let hk = &self.config.housekeeping;
        let shift_hours = shift_hours.unwrap_or(hk.default_shift_hours);
        let utilization = utilization.unwrap_or(hk.target_utilization);

        // date -> (minutes, rooms_total, guest_nights_total)
        let mut days: BTreeMap<Day, (f64, u64, u64)> = BTreeMap::new();
        for row in cleaning_load_by_day_and_archetype(reservations) {
            let minutes =
                base_cleaning_minutes(&row, hk) * hk.archetype_multipliers.get(row.archetype);
            let day = days.entry(row.date).or_insert((0.0, 0, 0));
            day.0 += minutes;
            day.1 = day.1.max(row.rooms_total);
            day.2 = day.2.max(row.guest_nights_total);
        }

        let out: Vec<LaborDay> = days
            .into_iter()
            .map(|(date, (minutes, rooms_total, guest_nights_total))| {
                let hk_man_hours = minutes / 60.0;
                LaborDay {
                    date,
                    hk_man_hours,
                    recommended_headcount: headcount(hk_man_hours, shift_hours, utilization),
                    shift_hours,
                    utilization,
                    rooms_total,
                    guest_nights_total,
                }
            })
            .collect();

        log::debug!(
            "labor: {} days forecast (shift {shift_hours}h, utilization {utilization})",
            out.len()
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headcount_rounds_up_and_never_goes_negative() {
        assert_eq!(headcount(0.0, 8.0, 0.85), 0);
        assert_eq!(headcount(6.0, 8.0, 0.85), 1);
        assert_eq!(headcount(7.0, 8.0, 0.85), 2);
        assert_eq!(headcount(5.0, 0.0, 0.85), 0);
    }
}
