//! Airport terminal areas: passenger show-up curves ahead of each departure.

use crate::{
    config::ForecastConfig,
    error::ForecastResult,
    features::{DemandBuckets, TimeDistribution},
    queueing::{LoadStatus, ServiceLevel, StaffingSearch},
    reservation::{Flight, RawFlight},
    types::BucketTime,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlineBucket {
    pub datetime: BucketTime,
    pub area: String,
    /// Passengers per hour arriving at the area.
    pub expected_pax: f64,
    pub staff_util: u32,
    pub staff_sla: u32,
    pub recommended_staff: u32,
    pub saturated: bool,
    pub load_status: LoadStatus,
}

/// Normalize raw flight rows, dropping those without a usable date or gate
/// time.
pub fn parse_flights(rows: &[RawFlight]) -> Vec<Flight> {
    let flights: Vec<Flight> = rows.iter().filter_map(Flight::from_raw).collect();
    let skipped = rows.len() - flights.len();
    if skipped > 0 {
        log::warn!("airline: skipped {skipped} flights with unparseable date or gate time");
    }
    flights
}

pub struct AirlineForecaster<'a> {
    config: &'a ForecastConfig,
}

impl<'a> AirlineForecaster<'a> {
    pub fn new(config: &'a ForecastConfig) -> Self {
        Self { config }
    }

    pub fn predict(&self, flights: &[Flight], area: &str) -> ForecastResult<Vec<AirlineBucket>> {
        let key = area.trim().to_lowercase();
        let cfg = self.config.airline.area(&key)?;
        let curve = TimeDistribution::gate_relative(&cfg.distributions)?;

        let mut buckets = DemandBuckets::new();
        for f in flights {
            buckets.accumulate(f.gate_departure(), f.pax_count, &curve);
        }

        let level = ServiceLevel {
            service_rate: cfg.pax_per_agent_per_hour,
            utilization: cfg.max_utilization,
            target_wait_minutes: cfg.sla_target_wait_min,
            search: StaffingSearch::new(cfg.search_ceiling),
        };

        let mut saturated = 0usize;
        let out: Vec<AirlineBucket> = buckets
            .iter()
            .map(|(datetime, expected_pax)| {
                let rec = level.recommend(expected_pax);
                if rec.saturated {
                    saturated += 1;
                }
                AirlineBucket {
                    datetime,
                    area: key.clone(),
                    expected_pax,
                    staff_util: rec.staff_util,
                    staff_sla: rec.staff_sla,
                    recommended_staff: rec.recommended_staff,
                    saturated: rec.saturated,
                    load_status: rec.load_status,
                }
            })
            .collect();

        if saturated > 0 {
            log::warn!(
                "airline {key}: {saturated} buckets hit the staffing ceiling of {}",
                cfg.search_ceiling
            );
        }
        log::debug!("airline {key}: {} buckets from {} flights", out.len(), flights.len());
        Ok(out)
    }
}
