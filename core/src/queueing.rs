//! M/M/c queueing: Erlang-C waiting time and minimal-staff search.
//!
//! Rates are per hour; waits are in minutes. Infeasible configurations
//! (no servers, no service capacity, or utilization ≥ 1) report an
//! infinite wait rather than an error, so the search can keep climbing.

use serde::{Deserialize, Serialize};

/// Default search ceiling for hotel service areas (reception, breakfast).
pub const DEFAULT_SERVICE_CEILING: u32 = 200;
/// Default search ceiling for airline areas.
pub const DEFAULT_AIRLINE_CEILING: u32 = 500;

/// Fraction of effective capacity at or below which a bucket is Green.
pub const GREEN_LOAD_FRACTION: f64 = 0.7;

/// Expected queueing delay in minutes for an M/M/c system.
///
/// Uses the Erlang-B recursion and the B→C identity
/// `C = B / (1 − ρ(1 − B))`, which matches the factorial finite-sum form
/// exactly but stays finite for any server count.
pub fn erlang_c_wait_minutes(
    arrival_rate_per_hour: f64,
    service_rate_per_agent_per_hour: f64,
    num_agents: u32,
) -> f64 {
    let lam = arrival_rate_per_hour;
    let mu = service_rate_per_agent_per_hour;
    if num_agents == 0 || mu <= 0.0 || mu.is_nan() {
        return f64::INFINITY;
    }
    let c = num_agents as f64;
    let rho = lam / (c * mu);
    if rho >= 1.0 || rho.is_nan() {
        return f64::INFINITY;
    }

    let a = lam / mu;
    let p_wait = erlang_c(a, num_agents, rho);
    let wq_hours = p_wait / (c * mu - lam);
    wq_hours * 60.0
}

/// Probability that an arrival waits (Erlang C), for offered load `a` on
/// `servers` servers at utilization `rho < 1`.
fn erlang_c(a: f64, servers: u32, rho: f64) -> f64 {
    let mut b = 1.0;
    for n in 1..=servers {
        let ab = a * b;
        b = ab / (n as f64 + ab);
    }
    b / (1.0 - rho * (1.0 - b))
}

/// Result of the SLA search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingOutcome {
    pub servers: u32,
    /// No count below the ceiling met both bounds; `servers` is the ceiling.
    pub saturated: bool,
}

/// Linear ascending search for the smallest server count meeting a wait
/// target and a utilization ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaffingSearch {
    pub ceiling: u32,
}

impl StaffingSearch {
    pub fn new(ceiling: u32) -> Self {
        Self { ceiling }
    }

    pub fn minimal_staff(
        &self,
        expected_load: f64,
        service_rate_per_server: f64,
        target_wait_minutes: f64,
        utilization_ceiling: f64,
    ) -> StaffingOutcome {
        if !(expected_load > 0.0) {
            return StaffingOutcome {
                servers: 0,
                saturated: false,
            };
        }
        for c in 1..self.ceiling {
            let wq = erlang_c_wait_minutes(expected_load, service_rate_per_server, c);
            let rho = expected_load / (c as f64 * service_rate_per_server);
            if wq <= target_wait_minutes && rho < utilization_ceiling {
                return StaffingOutcome {
                    servers: c,
                    saturated: false,
                };
            }
        }
        StaffingOutcome {
            servers: self.ceiling,
            saturated: true,
        }
    }
}

/// Staff needed to keep utilization at or under `utilization`, ignoring
/// queueing delay. At least 1 whenever there is any load.
pub fn utilization_staff(
    expected_load: f64,
    service_rate_per_server: f64,
    utilization: f64,
) -> u32 {
    if !(expected_load > 0.0) {
        return 0;
    }
    let raw = (expected_load / (service_rate_per_server * utilization)).ceil();
    if raw.is_finite() {
        (raw as u32).max(1)
    } else {
        u32::MAX
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    Green,
    Amber,
    Red,
}

impl LoadStatus {
    /// Traffic light for `load` against `servers × rate × utilization`.
    pub fn classify(expected_load: f64, servers: u32, service_rate: f64, utilization: f64) -> Self {
        let capacity = servers as f64 * service_rate * utilization;
        if expected_load <= capacity * GREEN_LOAD_FRACTION {
            Self::Green
        } else if expected_load <= capacity {
            Self::Amber
        } else {
            Self::Red
        }
    }
}

/// Staffing for one demand bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaffingRecommendation {
    pub staff_util: u32,
    pub staff_sla: u32,
    pub recommended_staff: u32,
    pub saturated: bool,
    pub load_status: LoadStatus,
}

/// Service parameters shared by every bucket of one forecast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceLevel {
    pub service_rate: f64,
    pub utilization: f64,
    pub target_wait_minutes: f64,
    pub search: StaffingSearch,
}

impl ServiceLevel {
    /// Larger of the utilization-only and SLA counts, with its status.
    pub fn recommend(&self, expected_load: f64) -> StaffingRecommendation {
        let staff_util = utilization_staff(expected_load, self.service_rate, self.utilization);
        let sla = self.search.minimal_staff(
            expected_load,
            self.service_rate,
            self.target_wait_minutes,
            self.utilization,
        );
        let recommended_staff = staff_util.max(sla.servers);
        StaffingRecommendation {
            staff_util,
            staff_sla: sla.servers,
            recommended_staff,
            saturated: sla.saturated,
            load_status: LoadStatus::classify(
                expected_load,
                recommended_staff,
                self.service_rate,
                self.utilization,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Literal factorial-sum Erlang C, valid for small `c`.
    fn reference_wait(lam: f64, mu: f64, c: u32) -> f64 {
        let a = lam / mu;
        let rho = lam / (c as f64 * mu);
        let fact = |n: u32| (1..=n).map(|k| k as f64).product::<f64>();
        let sum: f64 = (0..c).map(|n| a.powi(n as i32) / fact(n)).sum();
        let last = a.powi(c as i32) / fact(c) / (1.0 - rho);
        let p0 = 1.0 / (sum + last);
        let p_wait = last * p0;
        p_wait / (c as f64 * mu - lam) * 60.0
    }

    #[test]
    fn recursion_matches_factorial_formula() {
        let cases = [
            (10.0, 12.0, 1),
            (30.0, 12.0, 3),
            (95.0, 25.0, 5),
            (140.0, 12.0, 14),
        ];
        for &(lam, mu, c) in &cases {
            let got = erlang_c_wait_minutes(lam, mu, c);
            let want = reference_wait(lam, mu, c);
            assert!((got - want).abs() < 1e-9, "λ={lam} μ={mu} c={c}: {got} vs {want}");
        }
    }

    #[test]
    fn single_server_matches_mm1() {
        // M/M/1: Wq = ρ / (μ − λ)
        let (lam, mu) = (6.0, 10.0);
        let want = (lam / mu) / (mu - lam) * 60.0;
        assert!((erlang_c_wait_minutes(lam, mu, 1) - want).abs() < 1e-9);
    }

    #[test]
    fn degenerate_inputs_are_infinite() {
        assert!(erlang_c_wait_minutes(5.0, 10.0, 0).is_infinite());
        assert!(erlang_c_wait_minutes(5.0, 0.0, 2).is_infinite());
        assert!(erlang_c_wait_minutes(5.0, -1.0, 2).is_infinite());
        assert!(erlang_c_wait_minutes(20.0, 10.0, 2).is_infinite());
    }

    #[test]
    fn large_server_counts_stay_finite() {
        let w = erlang_c_wait_minutes(3_000.0, 12.0, 400);
        assert!(w.is_finite() && w >= 0.0);
    }

    #[test]
    fn utilization_staff_floors_at_one() {
        assert_eq!(utilization_staff(0.0, 12.0, 0.85), 0);
        assert_eq!(utilization_staff(0.1, 12.0, 0.85), 1);
        assert_eq!(utilization_staff(20.0, 12.0, 0.85), 2);
        assert_eq!(utilization_staff(20.5, 12.0, 0.85), 3);
    }

    #[test]
    fn search_reports_saturation_at_ceiling() {
        let out = StaffingSearch::new(5).minimal_staff(1_000.0, 10.0, 1.0, 0.85);
        assert_eq!(
            out,
            StaffingOutcome {
                servers: 5,
                saturated: true
            }
        );
    }

    #[test]
    fn status_thresholds() {
        assert_eq!(LoadStatus::classify(6.9, 1, 10.0, 1.0), LoadStatus::Green);
        assert_eq!(LoadStatus::classify(7.5, 1, 10.0, 1.0), LoadStatus::Amber);
        assert_eq!(LoadStatus::classify(10.0, 1, 10.0, 1.0), LoadStatus::Amber);
        assert_eq!(LoadStatus::classify(10.5, 1, 10.0, 1.0), LoadStatus::Red);
        assert_eq!(LoadStatus::classify(0.0, 0, 10.0, 1.0), LoadStatus::Green);
    }
}
