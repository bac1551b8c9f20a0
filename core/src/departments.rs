//! Ancillary department workload: spa, concierge, valet, engineering.
//!
//! Guest-driven departments (spa, concierge) scale with in-house guests,
//! room-driven ones (valet, engineering) with occupied rooms.

use crate::{
    config::{ConciergeConfig, ForecastConfig, SpaConfig, ValetConfig},
    error::{ForecastError, ForecastResult},
    features::{daily_occupancy, DailyOccupancy},
    labor::headcount,
    reservation::Reservation,
    types::Day,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Spa,
    Concierge,
    Valet,
    Engineering,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Spa,
        Department::Concierge,
        Department::Valet,
        Department::Engineering,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spa => "spa",
            Self::Concierge => "concierge",
            Self::Valet => "valet",
            Self::Engineering => "engineering",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == key)
            .ok_or_else(|| {
                ForecastError::invalid_argument(
                    "department",
                    s,
                    Self::ALL.iter().map(|d| d.as_str()),
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentDay {
    pub date: Day,
    pub department: Department,
    /// Valet only: expected car movements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions: Option<f64>,
    /// Engineering only: expected maintenance tickets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickets: Option<f64>,
    pub work_minutes: f64,
    pub staff_hours: f64,
    pub recommended_headcount: u32,
}

pub struct DepartmentForecaster<'a> {
    config: &'a ForecastConfig,
}

/// Volume, minutes per unit, and headcount parameters for one date.
struct Workload {
    volume: f64,
    minutes_per_unit: f64,
    shift_hours: f64,
    utilization: f64,
}

fn guests(o: &DailyOccupancy) -> f64 {
    (o.adult_nights + o.child_nights) as f64
}

impl<'a> DepartmentForecaster<'a> {
    pub fn new(config: &'a ForecastConfig) -> Self {
        Self { config }
    }

    pub fn predict(
        &self,
        reservations: &[Reservation],
        dept: &str,
    ) -> ForecastResult<Vec<DepartmentDay>> {
        let department: Department = dept.parse()?;

        let mut by_date: BTreeMap<Day, Vec<DailyOccupancy>> = BTreeMap::new();
        for o in daily_occupancy(reservations) {
            by_date.entry(o.date).or_default().push(o);
        }

        let out: Vec<DepartmentDay> = by_date
            .into_iter()
            .map(|(date, rows)| {
                let w = self.workload(department, &rows);
                let work_minutes = w.volume * w.minutes_per_unit;
                let staff_hours = work_minutes / 60.0;
                DepartmentDay {
                    date,
                    department,
                    transactions: (department == Department::Valet).then_some(w.volume),
                    tickets: (department == Department::Engineering).then_some(w.volume),
                    work_minutes,
                    staff_hours,
                    recommended_headcount: headcount(staff_hours, w.shift_hours, w.utilization),
                }
            })
            .collect();

        log::debug!("departments: {department} forecast for {} days", out.len());
        Ok(out)
    }

    fn workload(&self, department: Department, rows: &[DailyOccupancy]) -> Workload {
        let cfg = &self.config.departments;
        match department {
            Department::Spa => {
                let spa = &cfg.spa;
                let rate = |o: &DailyOccupancy| {
                    spa.treatments_per_guest_day
                        .get(&o.archetype)
                        .copied()
                        .unwrap_or(SpaConfig::FALLBACK_RATE)
                };
                Workload {
                    volume: rows.iter().map(|o| guests(o) * rate(o)).sum(),
                    minutes_per_unit: spa.minutes_per_treatment,
                    shift_hours: spa.shift_hours,
                    utilization: spa.utilization,
                }
            }
            Department::Concierge => {
                let c = &cfg.concierge;
                let rate = |o: &DailyOccupancy| {
                    c.requests_per_guest_day
                        .get(&o.archetype)
                        .copied()
                        .unwrap_or(ConciergeConfig::FALLBACK_RATE)
                };
                Workload {
                    volume: rows.iter().map(|o| guests(o) * rate(o)).sum(),
                    minutes_per_unit: c.minutes_per_request,
                    shift_hours: c.shift_hours,
                    utilization: c.utilization,
                }
            }
            Department::Valet => {
                let v = &cfg.valet;
                let rate = |o: &DailyOccupancy| {
                    v.cars_per_room_day
                        .get(&o.archetype)
                        .copied()
                        .unwrap_or(ValetConfig::FALLBACK_RATE)
                };
                Workload {
                    volume: rows.iter().map(|o| o.rooms as f64 * rate(o)).sum(),
                    minutes_per_unit: v.minutes_per_transaction,
                    shift_hours: v.shift_hours,
                    utilization: v.utilization,
                }
            }
            Department::Engineering => {
                let e = &cfg.engineering;
                let rooms: u64 = rows.iter().map(|o| o.rooms).sum();
                Workload {
                    volume: rooms as f64 * e.tickets_per_room_day,
                    minutes_per_unit: e.minutes_per_ticket,
                    shift_hours: e.shift_hours,
                    utilization: e.utilization,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_names_are_case_insensitive() {
        assert_eq!(" Valet ".parse::<Department>().unwrap(), Department::Valet);
        assert_eq!("SPA".parse::<Department>().unwrap(), Department::Spa);
    }

    #[test]
    fn unknown_department_lists_options() {
        let err = "laundry".parse::<Department>().unwrap_err().to_string();
        assert!(err.contains("laundry"));
        assert!(err.contains("spa, concierge, valet, engineering"));
    }
}
