//! Learn housekeeping multipliers from guest-night mix.
//!
//! Regresses daily observed hours on guest-nights per archetype plus daily
//! checkouts. Each archetype's multiplier is its coefficient relative to
//! the mean guest-night coefficient.

use crate::{
    archetype::Archetype,
    calibration::actual_hours_by_day,
    config::ForecastConfig,
    error::{ForecastError, ForecastResult},
    features::{checkouts_by_day, daily_occupancy},
    linalg,
    reservation::{ActualHours, Reservation},
    types::Day,
};
use std::collections::{BTreeMap, BTreeSet};

/// Keeps the centered normal equations solvable when columns are collinear;
/// small enough that the fit is the minimum-norm least-squares solution.
const VANISHING_RIDGE: f64 = 1e-8;

const MIN_MULTIPLIER: f64 = 0.5;
const MAX_MULTIPLIER: f64 = 3.0;

/// Ordinary least squares with intercept. Returns the slope coefficients.
pub fn ols_slopes(rows: &[Vec<f64>], y: &[f64], p: usize) -> ForecastResult<Vec<f64>> {
    let n = rows.len() as f64;
    let mut x_mean = vec![0.0; p];
    for row in rows {
        for (m, x) in x_mean.iter_mut().zip(row) {
            *m += x / n;
        }
    }
    let y_mean = y.iter().sum::<f64>() / n;

    let centered: Vec<Vec<f64>> = rows
        .iter()
        .map(|row| row.iter().zip(&x_mean).map(|(x, m)| x - m).collect())
        .collect();
    let y_centered: Vec<f64> = y.iter().map(|v| v - y_mean).collect();
    linalg::ridge(&centered, &y_centered, p, VANISHING_RIDGE)
}

pub struct HkLearner<'a> {
    config: &'a ForecastConfig,
}

impl<'a> HkLearner<'a> {
    pub fn new(config: &'a ForecastConfig) -> Self {
        Self { config }
    }

    pub fn fit(
        &self,
        reservations: &[Reservation],
        actuals: &[ActualHours],
    ) -> ForecastResult<ForecastConfig> {
        let mut guest_nights: BTreeMap<Day, BTreeMap<Archetype, f64>> = BTreeMap::new();
        let mut archetypes: BTreeSet<Archetype> = BTreeSet::new();
        for o in daily_occupancy(reservations) {
            archetypes.insert(o.archetype);
            *guest_nights
                .entry(o.date)
                .or_default()
                .entry(o.archetype)
                .or_insert(0.0) += o.guest_nights as f64;
        }
        let archetypes: Vec<Archetype> = archetypes.into_iter().collect();
        let checkouts = checkouts_by_day(reservations);
        let observed = actual_hours_by_day(actuals);

        // Columns: guest-nights per archetype, then checkouts.
        let p = archetypes.len() + 1;
        let mut rows = Vec::new();
        let mut y = Vec::new();
        for (date, gn) in &guest_nights {
            let Some(target) = observed.get(date) else { continue };
            let mut row: Vec<f64> = archetypes
                .iter()
                .map(|a| gn.get(a).copied().unwrap_or(0.0))
                .collect();
            row.push(checkouts.get(date).copied().unwrap_or(0) as f64);
            rows.push(row);
            y.push(*target);
        }
        if rows.is_empty() {
            return Err(ForecastError::NoData(
                "no overlapping dates between reservations and actual hours".into(),
            ));
        }

        let slopes = ols_slopes(&rows, &y, p)?;
        let gn_coefs = &slopes[..archetypes.len()];
        let mean = gn_coefs.iter().sum::<f64>() / gn_coefs.len().max(1) as f64;
        let baseline = if mean == 0.0 { 1.0 } else { mean };

        let mut multipliers = self.config.housekeeping.archetype_multipliers.clone();
        for a in Archetype::ALL {
            let m = match archetypes.iter().position(|x| *x == a) {
                Some(i) => gn_coefs[i] / baseline,
                None => 1.0,
            };
            multipliers.set(a, m.clamp(MIN_MULTIPLIER, MAX_MULTIPLIER));
        }

        log::info!(
            "learning: {} guest-night columns over {} days, baseline {baseline:.4}",
            archetypes.len(),
            rows.len()
        );
        Ok(self.config.with_archetype_multipliers(multipliers))
    }
}
