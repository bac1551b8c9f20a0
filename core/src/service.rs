//! Hotel service areas: time-bucketed demand with SLA staffing.
//!
//! Reception demand is arrivals spread over the arrival date's check-in
//! curve; breakfast demand is in-house covers spread over the serving
//! window of each stay night.

use crate::{
    archetype::Archetype,
    config::{ForecastConfig, Weights},
    error::{ForecastError, ForecastResult},
    features::{arrivals_by_day_and_archetype, daily_occupancy, DemandBuckets, TimeDistribution},
    queueing::{LoadStatus, ServiceLevel, StaffingSearch},
    reservation::Reservation,
    types::BucketTime,
};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceArea {
    Reception,
    Breakfast,
}

impl ServiceArea {
    pub const ALL: [ServiceArea; 2] = [ServiceArea::Reception, ServiceArea::Breakfast];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reception => "reception",
            Self::Breakfast => "breakfast",
        }
    }
}

impl fmt::Display for ServiceArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceArea {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == key)
            .ok_or_else(|| {
                ForecastError::invalid_argument(
                    "service area",
                    s,
                    Self::ALL.iter().map(|a| a.as_str()),
                )
            })
    }
}

/// One demand bucket with its staffing recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceBucket {
    pub datetime: BucketTime,
    pub area: ServiceArea,
    /// Transactions per hour (reception) or covers per hour (breakfast).
    pub expected_load: f64,
    pub staff_util: u32,
    pub staff_sla: u32,
    pub recommended_staff: u32,
    pub saturated: bool,
    pub load_status: LoadStatus,
}

/// Per-archetype distributions, with `Other` as the fallback.
struct ArchetypeCurves {
    curves: BTreeMap<Archetype, TimeDistribution>,
    fallback: TimeDistribution,
}

impl ArchetypeCurves {
    fn parse(
        area: ServiceArea,
        distributions: &BTreeMap<Archetype, Weights>,
    ) -> ForecastResult<Self> {
        let mut curves = BTreeMap::new();
        for (archetype, weights) in distributions {
            curves.insert(*archetype, TimeDistribution::from_weights(weights)?);
        }
        let fallback = curves.get(&Archetype::Other).cloned().ok_or_else(|| {
            ForecastError::InvalidConfig(format!(
                "service_load.{area}.distributions has no entry for Other"
            ))
        })?;
        Ok(Self { curves, fallback })
    }

    fn get(&self, archetype: Archetype) -> &TimeDistribution {
        self.curves.get(&archetype).unwrap_or(&self.fallback)
    }
}

pub struct ServiceLoadForecaster<'a> {
    config: &'a ForecastConfig,
}

impl<'a> ServiceLoadForecaster<'a> {
    pub fn new(config: &'a ForecastConfig) -> Self {
        Self { config }
    }

    /// Bucketed demand and staffing for `area`. `utilization` defaults to
    /// the area's configured value and `target_wait_min` to the SLA block.
    pub fn predict(
        &self,
        reservations: &[Reservation],
        area: &str,
        utilization: Option<f64>,
        target_wait_min: Option<f64>,
    ) -> ForecastResult<Vec<ServiceBucket>> {
        let area: ServiceArea = area.parse()?;
        let load_cfg = &self.config.service_load;
        let sla = &self.config.service_sla;

        let (service_rate, default_util, distributions) = match area {
            ServiceArea::Reception => (
                load_cfg.reception.transactions_per_agent_per_hour,
                load_cfg.reception.utilization,
                &load_cfg.reception.distributions,
            ),
            ServiceArea::Breakfast => (
                load_cfg.breakfast.covers_per_staff_per_hour,
                load_cfg.breakfast.utilization,
                &load_cfg.breakfast.distributions,
            ),
        };
        let curves = ArchetypeCurves::parse(area, distributions)?;

        let mut buckets = DemandBuckets::new();
        match area {
            ServiceArea::Reception => {
                for a in arrivals_by_day_and_archetype(reservations) {
                    let midnight = a.date.and_time(NaiveTime::MIN);
                    buckets.accumulate(midnight, a.arrivals as f64, curves.get(a.archetype));
                }
            }
            ServiceArea::Breakfast => {
                for o in daily_occupancy(reservations) {
                    let midnight = o.date.and_time(NaiveTime::MIN);
                    buckets.accumulate(midnight, o.covers() as f64, curves.get(o.archetype));
                }
            }
        }

        let level = ServiceLevel {
            service_rate,
            utilization: utilization.unwrap_or(default_util),
            target_wait_minutes: target_wait_min.unwrap_or(sla.default_target_wait_min),
            search: StaffingSearch::new(sla.search_ceiling),
        };
        Ok(staff_buckets(area, &buckets, &level))
    }
}

fn staff_buckets(
    area: ServiceArea,
    buckets: &DemandBuckets,
    level: &ServiceLevel,
) -> Vec<ServiceBucket> {
    let out: Vec<ServiceBucket> = buckets
        .iter()
        .map(|(datetime, expected_load)| {
            let rec = level.recommend(expected_load);
            if rec.saturated {
                log::warn!(
                    "{area}: ceiling {} misses the {:.1} min wait at {datetime} (load {:.1})",
                    level.search.ceiling,
                    level.target_wait_minutes,
                    expected_load
                );
            }
            ServiceBucket {
                datetime,
                area,
                expected_load,
                staff_util: rec.staff_util,
                staff_sla: rec.staff_sla,
                recommended_staff: rec.recommended_staff,
                saturated: rec.saturated,
                load_status: rec.load_status,
            }
        })
        .collect();
    log::debug!("{area}: {} buckets", out.len());
    out
}
