//! Food & beverage consumption per meal.

use crate::{
    config::ForecastConfig,
    error::ForecastResult,
    features::daily_occupancy,
    reservation::Reservation,
    types::Day,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Expected quantity of every configured item of one meal on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FnbDay {
    pub date: Day,
    #[serde(flatten)]
    pub quantities: BTreeMap<String, f64>,
}

impl FnbDay {
    pub fn quantity(&self, item: &str) -> f64 {
        self.quantities.get(item).copied().unwrap_or(0.0)
    }
}

pub struct FnbForecaster<'a> {
    config: &'a ForecastConfig,
}

impl<'a> FnbForecaster<'a> {
    pub fn new(config: &'a ForecastConfig) -> Self {
        Self { config }
    }

    /// For each in-house date: Σ over archetypes of
    /// (adult nights × adult rate + child nights × child rate) × multiplier.
    pub fn predict(&self, reservations: &[Reservation], meal: &str) -> ForecastResult<Vec<FnbDay>> {
        let meal_cfg = self.config.meal(meal)?;

        let mut days: BTreeMap<Day, BTreeMap<String, f64>> = BTreeMap::new();
        for occ in daily_occupancy(reservations) {
            let row = days.entry(occ.date).or_insert_with(|| {
                meal_cfg
                    .base
                    .keys()
                    .map(|item| (item.clone(), 0.0))
                    .collect()
            });
            for (item, rates) in &meal_cfg.base {
                let base =
                    occ.adult_nights as f64 * rates.adult + occ.child_nights as f64 * rates.child;
                if let Some(q) = row.get_mut(item) {
                    *q += base * meal_cfg.multiplier(occ.archetype, item);
                }
            }
        }

        log::debug!("fnb: {meal} forecast for {} days", days.len());
        Ok(days
            .into_iter()
            .map(|(date, quantities)| FnbDay { date, quantities })
            .collect())
    }
}
