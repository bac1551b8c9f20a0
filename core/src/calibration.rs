//! Fit housekeeping archetype multipliers to observed labor hours.
//!
//! Each day's observed hours are modeled as Σ multiplier[a] × base hours[a],
//! where base hours come from the same checkout/stayover decomposition the
//! labor forecaster uses. The multipliers are the ridge least-squares fit,
//! clipped to bounds.

use crate::{
    archetype::Archetype,
    config::ForecastConfig,
    error::{ForecastError, ForecastResult},
    features::cleaning_load_by_day_and_archetype,
    labor::base_cleaning_minutes,
    linalg,
    reservation::{ActualHours, Reservation},
    types::Day,
};
use std::collections::{BTreeMap, BTreeSet};

pub const RIDGE_LAMBDA: f64 = 1e-3;
pub const DEFAULT_MIN_MULTIPLIER: f64 = 0.5;
pub const DEFAULT_MAX_MULTIPLIER: f64 = 3.0;

/// Observed hours summed per date.
pub(crate) fn actual_hours_by_day(actuals: &[ActualHours]) -> BTreeMap<Day, f64> {
    let mut out = BTreeMap::new();
    for a in actuals {
        *out.entry(a.date).or_insert(0.0) += a.hk_man_hours;
    }
    out
}

pub struct LaborCalibrator<'a> {
    config: &'a ForecastConfig,
}

impl<'a> LaborCalibrator<'a> {
    pub fn new(config: &'a ForecastConfig) -> Self {
        Self { config }
    }

    /// A copy of the configuration with fitted multipliers. Archetypes
    /// absent from the reservations keep their current multiplier.
    pub fn fit_multipliers(
        &self,
        reservations: &[Reservation],
        actuals: &[ActualHours],
        min_mult: f64,
        max_mult: f64,
    ) -> ForecastResult<ForecastConfig> {
        if !(min_mult <= max_mult) {
            return Err(ForecastError::InvalidConfig(format!(
                "multiplier bounds [{min_mult}, {max_mult}] are empty"
            )));
        }
        let hk = &self.config.housekeeping;

        // date -> archetype -> unscaled hours
        let mut design: BTreeMap<Day, BTreeMap<Archetype, f64>> = BTreeMap::new();
        let mut columns: BTreeSet<Archetype> = BTreeSet::new();
        for row in cleaning_load_by_day_and_archetype(reservations) {
            columns.insert(row.archetype);
            *design
                .entry(row.date)
                .or_default()
                .entry(row.archetype)
                .or_insert(0.0) += base_cleaning_minutes(&row, hk) / 60.0;
        }
        let columns: Vec<Archetype> = columns.into_iter().collect();

        let observed = actual_hours_by_day(actuals);
        let mut rows = Vec::new();
        let mut y = Vec::new();
        for (date, hours) in &design {
            if let Some(target) = observed.get(date) {
                rows.push(
                    columns
                        .iter()
                        .map(|a| hours.get(a).copied().unwrap_or(0.0))
                        .collect::<Vec<f64>>(),
                );
                y.push(*target);
            }
        }
        if rows.is_empty() {
            return Err(ForecastError::NoData(
                "no overlapping dates between reservations and actual hours".into(),
            ));
        }

        let fitted = linalg::ridge(&rows, &y, columns.len(), RIDGE_LAMBDA)?;
        let mut multipliers = hk.archetype_multipliers.clone();
        for (archetype, m) in columns.iter().zip(fitted) {
            multipliers.set(*archetype, m.clamp(min_mult, max_mult));
        }

        log::info!(
            "calibration: fitted {} multipliers over {} days",
            columns.len(),
            rows.len()
        );
        Ok(self.config.with_archetype_multipliers(multipliers))
    }

    /// [`fit_multipliers`](Self::fit_multipliers) with the default
    /// [0.5, 3.0] bounds.
    pub fn fit(
        &self,
        reservations: &[Reservation],
        actuals: &[ActualHours],
    ) -> ForecastResult<ForecastConfig> {
        self.fit_multipliers(reservations, actuals, DEFAULT_MIN_MULTIPLIER, DEFAULT_MAX_MULTIPLIER)
    }
}
