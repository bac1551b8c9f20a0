use crate::{
    archetype::Archetype,
    error::{ForecastError, ForecastResult},
    features::{TimeDistribution, TimeOffset},
    queueing::{DEFAULT_AIRLINE_CEILING, DEFAULT_SERVICE_CEILING},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Relative weights keyed by a time offset (`"HH:MM"` or `"-HH:MM"`).
pub type Weights = BTreeMap<String, f64>;

/// Inclusive bounds for area utilization targets.
pub const UTILIZATION_BOUNDS: (f64, f64) = (0.5, 0.99);

fn default_minutes_per_checkout() -> f64 {
    45.0
}
fn default_minutes_per_stayover() -> f64 {
    20.0
}
fn default_utilization() -> f64 {
    0.85
}
fn default_shift_hours() -> f64 {
    8.0
}
fn default_one() -> f64 {
    1.0
}
fn default_target_wait_min() -> f64 {
    5.0
}
fn default_service_ceiling() -> u32 {
    DEFAULT_SERVICE_CEILING
}
fn default_airline_ceiling() -> u32 {
    DEFAULT_AIRLINE_CEILING
}
fn default_airline_max_utilization() -> f64 {
    0.9
}

// ── Housekeeping ───────────────────────────────────────────────────

/// Cleaning-effort multiplier per archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeMultipliers {
    #[serde(rename = "SoloBusiness", default = "default_one")]
    pub solo_business: f64,
    #[serde(rename = "LeisureCouple", default = "default_one")]
    pub leisure_couple: f64,
    #[serde(rename = "FamilyWithKids", default = "default_one")]
    pub family_with_kids: f64,
    #[serde(rename = "TourGroup", default = "default_one")]
    pub tour_group: f64,
    #[serde(rename = "Other", default = "default_one")]
    pub other: f64,
}

impl ArchetypeMultipliers {
    pub fn get(&self, archetype: Archetype) -> f64 {
        match archetype {
            Archetype::SoloBusiness => self.solo_business,
            Archetype::LeisureCouple => self.leisure_couple,
            Archetype::FamilyWithKids => self.family_with_kids,
            Archetype::TourGroup => self.tour_group,
            Archetype::Other => self.other,
        }
    }

    pub fn set(&mut self, archetype: Archetype, value: f64) {
        let slot = match archetype {
            Archetype::SoloBusiness => &mut self.solo_business,
            Archetype::LeisureCouple => &mut self.leisure_couple,
            Archetype::FamilyWithKids => &mut self.family_with_kids,
            Archetype::TourGroup => &mut self.tour_group,
            Archetype::Other => &mut self.other,
        };
        *slot = value;
    }
}

impl Default for ArchetypeMultipliers {
    fn default() -> Self {
        Self {
            solo_business: 1.0,
            leisure_couple: 1.15,
            family_with_kids: 1.80,
            tour_group: 1.30,
            other: 1.10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousekeepingConfig {
    #[serde(default = "default_minutes_per_checkout")]
    pub minutes_per_checkout: f64,
    #[serde(default = "default_minutes_per_stayover")]
    pub minutes_per_stayover: f64,
    #[serde(default = "default_utilization")]
    pub target_utilization: f64,
    #[serde(default = "default_shift_hours")]
    pub default_shift_hours: f64,
    #[serde(default)]
    pub archetype_multipliers: ArchetypeMultipliers,
}

// ── F&B meals ──────────────────────────────────────────────────────

/// Per-guest consumption of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealItem {
    pub adult: f64,
    pub child: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealConfig {
    pub base: BTreeMap<String, MealItem>,
    /// archetype → item → multiplier; missing entries mean 1.0.
    #[serde(default)]
    pub multipliers: BTreeMap<Archetype, BTreeMap<String, f64>>,
}

impl MealConfig {
    pub fn multiplier(&self, archetype: Archetype, item: &str) -> f64 {
        self.multipliers
            .get(&archetype)
            .and_then(|m| m.get(item))
            .copied()
            .unwrap_or(1.0)
    }
}

/// Meals every configuration must define.
pub const REQUIRED_MEALS: [&str; 3] = ["breakfast", "lunch", "dinner"];

// ── Service load (reception / breakfast) ───────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceptionConfig {
    pub transactions_per_agent_per_hour: f64,
    #[serde(default = "default_utilization")]
    pub utilization: f64,
    /// Check-in clock-time distribution per archetype.
    pub distributions: BTreeMap<Archetype, Weights>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakfastConfig {
    pub covers_per_staff_per_hour: f64,
    #[serde(default = "default_utilization")]
    pub utilization: f64,
    /// Breakfast-seating clock-time distribution per archetype.
    pub distributions: BTreeMap<Archetype, Weights>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLoadConfig {
    pub reception: ReceptionConfig,
    pub breakfast: BreakfastConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSlaConfig {
    #[serde(default = "default_target_wait_min")]
    pub default_target_wait_min: f64,
    /// Upper bound for the reception/breakfast staffing search.
    #[serde(default = "default_service_ceiling")]
    pub search_ceiling: u32,
}

impl Default for ServiceSlaConfig {
    fn default() -> Self {
        Self {
            default_target_wait_min: default_target_wait_min(),
            search_ceiling: default_service_ceiling(),
        }
    }
}

// ── Departments ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaConfig {
    pub minutes_per_treatment: f64,
    pub treatments_per_guest_day: BTreeMap<Archetype, f64>,
    #[serde(default = "SpaConfig::default_utilization")]
    pub utilization: f64,
    #[serde(default = "default_shift_hours")]
    pub shift_hours: f64,
}

impl SpaConfig {
    pub const FALLBACK_RATE: f64 = 0.03;
    fn default_utilization() -> f64 {
        0.8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConciergeConfig {
    pub requests_per_guest_day: BTreeMap<Archetype, f64>,
    pub minutes_per_request: f64,
    #[serde(default = "default_utilization")]
    pub utilization: f64,
    #[serde(default = "default_shift_hours")]
    pub shift_hours: f64,
}

impl ConciergeConfig {
    pub const FALLBACK_RATE: f64 = 0.1;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValetConfig {
    pub cars_per_room_day: BTreeMap<Archetype, f64>,
    pub minutes_per_transaction: f64,
    #[serde(default = "default_utilization")]
    pub utilization: f64,
    #[serde(default = "default_shift_hours")]
    pub shift_hours: f64,
}

impl ValetConfig {
    pub const FALLBACK_RATE: f64 = 0.15;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineeringConfig {
    pub tickets_per_room_day: f64,
    pub minutes_per_ticket: f64,
    #[serde(default = "EngineeringConfig::default_utilization")]
    pub utilization: f64,
    #[serde(default = "default_shift_hours")]
    pub shift_hours: f64,
}

impl EngineeringConfig {
    fn default_utilization() -> f64 {
        0.8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentsConfig {
    pub spa: SpaConfig,
    pub concierge: ConciergeConfig,
    pub valet: ValetConfig,
    pub engineering: EngineeringConfig,
}

// ── Airline ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlineAreaConfig {
    pub pax_per_agent_per_hour: f64,
    pub sla_target_wait_min: f64,
    /// Share of a flight's passengers arriving at each offset before
    /// gate departure (`"-HH:MM"`).
    pub distributions: Weights,
    #[serde(default = "default_airline_max_utilization")]
    pub max_utilization: f64,
    #[serde(default = "default_airline_ceiling")]
    pub search_ceiling: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlineConfig {
    pub boarding: AirlineAreaConfig,
    pub gate: AirlineAreaConfig,
    pub lounge: AirlineAreaConfig,
}

impl AirlineConfig {
    pub const AREAS: [&'static str; 3] = ["boarding", "gate", "lounge"];

    pub fn area(&self, name: &str) -> ForecastResult<&AirlineAreaConfig> {
        match name {
            "boarding" => Ok(&self.boarding),
            "gate" => Ok(&self.gate),
            "lounge" => Ok(&self.lounge),
            other => Err(ForecastError::invalid_argument(
                "airline area",
                other,
                Self::AREAS,
            )),
        }
    }
}

// ── Root ───────────────────────────────────────────────────────────

/// The full parameter tree. Validated once on load, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    pub housekeeping: HousekeepingConfig,
    pub fnb_meals: BTreeMap<String, MealConfig>,
    pub service_load: ServiceLoadConfig,
    #[serde(default)]
    pub service_sla: ServiceSlaConfig,
    pub departments: DepartmentsConfig,
    pub airline: AirlineConfig,
}

impl ForecastConfig {
    /// Read, parse and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> ForecastResult<Self> {
        let path = path.as_ref();
        log::debug!("loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> ForecastResult<Self> {
        let config: ForecastConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ForecastResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn meal(&self, name: &str) -> ForecastResult<&MealConfig> {
        self.fnb_meals.get(name).ok_or_else(|| {
            ForecastError::invalid_argument("meal", name, self.fnb_meals.keys().cloned())
        })
    }

    /// A copy of this tree with only the housekeeping multipliers replaced.
    pub fn with_archetype_multipliers(&self, multipliers: ArchetypeMultipliers) -> Self {
        let mut out = self.clone();
        out.housekeeping.archetype_multipliers = multipliers;
        out
    }

    /// Schema checks that serde alone cannot express.
    pub fn validate(&self) -> ForecastResult<()> {
        let hk = &self.housekeeping;
        positive("housekeeping.minutes_per_checkout", hk.minutes_per_checkout)?;
        positive("housekeeping.minutes_per_stayover", hk.minutes_per_stayover)?;
        positive("housekeeping.default_shift_hours", hk.default_shift_hours)?;
        bounded_utilization("housekeeping.target_utilization", hk.target_utilization)?;
        for a in Archetype::ALL {
            non_negative(
                &format!("housekeeping.archetype_multipliers.{a}"),
                hk.archetype_multipliers.get(a),
            )?;
        }

        for meal in REQUIRED_MEALS {
            if !self.fnb_meals.contains_key(meal) {
                return Err(ForecastError::InvalidConfig(format!(
                    "fnb_meals.{meal} is required"
                )));
            }
        }
        for (name, meal) in &self.fnb_meals {
            for (item, rates) in &meal.base {
                non_negative(&format!("fnb_meals.{name}.base.{item}.adult"), rates.adult)?;
                non_negative(&format!("fnb_meals.{name}.base.{item}.child"), rates.child)?;
            }
            for (a, items) in &meal.multipliers {
                for (item, m) in items {
                    non_negative(&format!("fnb_meals.{name}.multipliers.{a}.{item}"), *m)?;
                }
            }
        }

        let rc = &self.service_load.reception;
        positive(
            "service_load.reception.transactions_per_agent_per_hour",
            rc.transactions_per_agent_per_hour,
        )?;
        bounded_utilization("service_load.reception.utilization", rc.utilization)?;
        clock_distributions("service_load.reception", &rc.distributions)?;

        let bf = &self.service_load.breakfast;
        positive(
            "service_load.breakfast.covers_per_staff_per_hour",
            bf.covers_per_staff_per_hour,
        )?;
        bounded_utilization("service_load.breakfast.utilization", bf.utilization)?;
        clock_distributions("service_load.breakfast", &bf.distributions)?;

        positive(
            "service_sla.default_target_wait_min",
            self.service_sla.default_target_wait_min,
        )?;
        ceiling("service_sla.search_ceiling", self.service_sla.search_ceiling)?;

        let d = &self.departments;
        positive("departments.spa.minutes_per_treatment", d.spa.minutes_per_treatment)?;
        fraction("departments.spa.utilization", d.spa.utilization)?;
        positive("departments.spa.shift_hours", d.spa.shift_hours)?;
        rates("departments.spa.treatments_per_guest_day", &d.spa.treatments_per_guest_day)?;
        positive("departments.concierge.minutes_per_request", d.concierge.minutes_per_request)?;
        fraction("departments.concierge.utilization", d.concierge.utilization)?;
        positive("departments.concierge.shift_hours", d.concierge.shift_hours)?;
        rates("departments.concierge.requests_per_guest_day", &d.concierge.requests_per_guest_day)?;
        positive("departments.valet.minutes_per_transaction", d.valet.minutes_per_transaction)?;
        fraction("departments.valet.utilization", d.valet.utilization)?;
        positive("departments.valet.shift_hours", d.valet.shift_hours)?;
        rates("departments.valet.cars_per_room_day", &d.valet.cars_per_room_day)?;
        non_negative(
            "departments.engineering.tickets_per_room_day",
            d.engineering.tickets_per_room_day,
        )?;
        positive("departments.engineering.minutes_per_ticket", d.engineering.minutes_per_ticket)?;
        fraction("departments.engineering.utilization", d.engineering.utilization)?;
        positive("departments.engineering.shift_hours", d.engineering.shift_hours)?;

        for name in AirlineConfig::AREAS {
            let area = self.airline.area(name)?;
            let prefix = format!("airline.{name}");
            positive(&format!("{prefix}.pax_per_agent_per_hour"), area.pax_per_agent_per_hour)?;
            positive(&format!("{prefix}.sla_target_wait_min"), area.sla_target_wait_min)?;
            fraction(&format!("{prefix}.max_utilization"), area.max_utilization)?;
            ceiling(&format!("{prefix}.search_ceiling"), area.search_ceiling)?;
            weights(&prefix, &area.distributions)?;
            TimeDistribution::gate_relative(&area.distributions)?;
        }

        Ok(())
    }
}

fn invalid(msg: String) -> ForecastError {
    ForecastError::InvalidConfig(msg)
}

fn positive(field: &str, v: f64) -> ForecastResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{field} must be > 0, got {v}")))
    }
}

fn non_negative(field: &str, v: f64) -> ForecastResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{field} must be >= 0, got {v}")))
    }
}

fn fraction(field: &str, v: f64) -> ForecastResult<()> {
    if v.is_finite() && v > 0.0 && v <= 1.0 {
        Ok(())
    } else {
        Err(invalid(format!("{field} must be in (0, 1], got {v}")))
    }
}

fn bounded_utilization(field: &str, v: f64) -> ForecastResult<()> {
    let (lo, hi) = UTILIZATION_BOUNDS;
    if v >= lo && v <= hi {
        Ok(())
    } else {
        Err(invalid(format!("{field} must be in [{lo}, {hi}], got {v}")))
    }
}

fn ceiling(field: &str, v: u32) -> ForecastResult<()> {
    if v >= 1 {
        Ok(())
    } else {
        Err(invalid(format!("{field} must be >= 1")))
    }
}

fn rates(field: &str, table: &BTreeMap<Archetype, f64>) -> ForecastResult<()> {
    for (a, v) in table {
        non_negative(&format!("{field}.{a}"), *v)?;
    }
    Ok(())
}

fn weights(field: &str, w: &Weights) -> ForecastResult<()> {
    for (k, v) in w {
        non_negative(&format!("{field}.distributions.{k}"), *v)?;
    }
    Ok(())
}

fn clock_distributions(field: &str, table: &BTreeMap<Archetype, Weights>) -> ForecastResult<()> {
    if !table.contains_key(&Archetype::Other) {
        return Err(invalid(format!("{field}.distributions.Other is required")));
    }
    for (a, w) in table {
        let prefix = format!("{field}.{a}");
        weights(&prefix, w)?;
        for key in w.keys() {
            match TimeOffset::parse(key)? {
                TimeOffset::ClockTime(_) => {}
                TimeOffset::Before(_) => {
                    return Err(invalid(format!(
                        "{prefix}.distributions.{key}: expected a clock time (HH:MM)"
                    )))
                }
            }
        }
    }
    Ok(())
}

// ── Shipped defaults ───────────────────────────────────────────────

fn w(pairs: &[(&str, f64)]) -> Weights {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn per_archetype<T: Clone>(pairs: &[(Archetype, T)]) -> BTreeMap<Archetype, T> {
    pairs.iter().cloned().collect()
}

fn items(pairs: &[(&str, f64, f64)]) -> BTreeMap<String, MealItem> {
    pairs
        .iter()
        .map(|(k, adult, child)| {
            (
                k.to_string(),
                MealItem {
                    adult: *adult,
                    child: *child,
                },
            )
        })
        .collect()
}

impl Default for ForecastConfig {
    /// The base configuration shipped in `data/base_config.json`.
    fn default() -> Self {
        use Archetype::*;

        let breakfast = MealConfig {
            base: items(&[
                ("eggs", 1.5, 0.8),
                ("bread_rolls", 2.0, 1.0),
                ("coffee_cups", 1.8, 0.1),
                ("juice_glasses", 0.8, 1.0),
            ]),
            multipliers: per_archetype(&[
                (SoloBusiness, w(&[("coffee_cups", 1.3), ("eggs", 0.8)])),
                (FamilyWithKids, w(&[("juice_glasses", 1.2)])),
                (TourGroup, w(&[("eggs", 0.9)])),
            ]),
        };
        let lunch = MealConfig {
            base: items(&[
                ("main_course_portions", 0.6, 0.5),
                ("salad_portions", 0.4, 0.2),
                ("dessert_portions", 0.5, 0.7),
            ]),
            multipliers: per_archetype(&[
                (SoloBusiness, w(&[("main_course_portions", 0.5)])),
                (TourGroup, w(&[("main_course_portions", 1.4)])),
            ]),
        };
        let dinner = MealConfig {
            base: items(&[
                ("main_course_portions", 0.8, 0.6),
                ("dessert_portions", 0.6, 0.8),
                ("wine_glasses", 0.9, 0.0),
                ("soft_drinks", 0.4, 1.2),
            ]),
            multipliers: per_archetype(&[
                (LeisureCouple, w(&[("wine_glasses", 1.4), ("dessert_portions", 1.2)])),
                (TourGroup, w(&[("main_course_portions", 1.1)])),
            ]),
        };

        Self {
            housekeeping: HousekeepingConfig {
                minutes_per_checkout: 45.0,
                minutes_per_stayover: 20.0,
                target_utilization: 0.85,
                default_shift_hours: 8.0,
                archetype_multipliers: ArchetypeMultipliers::default(),
            },
            fnb_meals: [
                ("breakfast".to_string(), breakfast),
                ("lunch".to_string(), lunch),
                ("dinner".to_string(), dinner),
            ]
            .into(),
            service_load: ServiceLoadConfig {
                reception: ReceptionConfig {
                    transactions_per_agent_per_hour: 12.0,
                    utilization: 0.85,
                    distributions: per_archetype(&[
                        (
                            SoloBusiness,
                            w(&[
                                ("12:00", 0.05),
                                ("14:00", 0.15),
                                ("16:00", 0.2),
                                ("18:00", 0.3),
                                ("20:00", 0.2),
                                ("22:00", 0.1),
                            ]),
                        ),
                        (
                            LeisureCouple,
                            w(&[
                                ("13:00", 0.1),
                                ("14:00", 0.25),
                                ("15:00", 0.25),
                                ("16:00", 0.2),
                                ("17:00", 0.12),
                                ("18:00", 0.08),
                            ]),
                        ),
                        (
                            FamilyWithKids,
                            w(&[
                                ("13:00", 0.15),
                                ("14:00", 0.3),
                                ("15:00", 0.25),
                                ("16:00", 0.15),
                                ("17:00", 0.1),
                                ("18:00", 0.05),
                            ]),
                        ),
                        (
                            TourGroup,
                            w(&[
                                ("11:00", 0.1),
                                ("13:00", 0.4),
                                ("15:00", 0.3),
                                ("17:00", 0.2),
                            ]),
                        ),
                        (
                            Other,
                            w(&[
                                ("12:00", 0.1),
                                ("14:00", 0.2),
                                ("16:00", 0.3),
                                ("18:00", 0.25),
                                ("20:00", 0.15),
                            ]),
                        ),
                    ]),
                },
                breakfast: BreakfastConfig {
                    covers_per_staff_per_hour: 25.0,
                    utilization: 0.85,
                    distributions: per_archetype(&[
                        (
                            SoloBusiness,
                            w(&[
                                ("06:00", 0.15),
                                ("07:00", 0.45),
                                ("08:00", 0.3),
                                ("09:00", 0.1),
                            ]),
                        ),
                        (
                            LeisureCouple,
                            w(&[
                                ("07:00", 0.1),
                                ("08:00", 0.3),
                                ("09:00", 0.4),
                                ("10:00", 0.2),
                            ]),
                        ),
                        (
                            FamilyWithKids,
                            w(&[
                                ("07:00", 0.2),
                                ("08:00", 0.4),
                                ("09:00", 0.3),
                                ("10:00", 0.1),
                            ]),
                        ),
                        (TourGroup, w(&[("06:00", 0.3), ("07:00", 0.5), ("08:00", 0.2)])),
                        (
                            Other,
                            w(&[
                                ("07:00", 0.25),
                                ("08:00", 0.35),
                                ("09:00", 0.3),
                                ("10:00", 0.1),
                            ]),
                        ),
                    ]),
                },
            },
            service_sla: ServiceSlaConfig::default(),
            departments: DepartmentsConfig {
                spa: SpaConfig {
                    minutes_per_treatment: 50.0,
                    treatments_per_guest_day: per_archetype(&[
                        (SoloBusiness, 0.02),
                        (LeisureCouple, 0.08),
                        (FamilyWithKids, 0.03),
                        (TourGroup, 0.01),
                        (Other, 0.03),
                    ]),
                    utilization: 0.8,
                    shift_hours: 8.0,
                },
                concierge: ConciergeConfig {
                    requests_per_guest_day: per_archetype(&[
                        (SoloBusiness, 0.15),
                        (LeisureCouple, 0.2),
                        (FamilyWithKids, 0.25),
                        (TourGroup, 0.05),
                        (Other, 0.1),
                    ]),
                    minutes_per_request: 8.0,
                    utilization: 0.85,
                    shift_hours: 8.0,
                },
                valet: ValetConfig {
                    cars_per_room_day: per_archetype(&[
                        (SoloBusiness, 0.3),
                        (LeisureCouple, 0.2),
                        (FamilyWithKids, 0.25),
                        (TourGroup, 0.0),
                        (Other, 0.15),
                    ]),
                    minutes_per_transaction: 6.0,
                    utilization: 0.85,
                    shift_hours: 8.0,
                },
                engineering: EngineeringConfig {
                    tickets_per_room_day: 0.05,
                    minutes_per_ticket: 20.0,
                    utilization: 0.8,
                    shift_hours: 8.0,
                },
            },
            airline: AirlineConfig {
                boarding: AirlineAreaConfig {
                    pax_per_agent_per_hour: 120.0,
                    sla_target_wait_min: 5.0,
                    distributions: w(&[("-00:45", 0.2), ("-00:30", 0.5), ("-00:15", 0.3)]),
                    max_utilization: 0.9,
                    search_ceiling: DEFAULT_AIRLINE_CEILING,
                },
                gate: AirlineAreaConfig {
                    pax_per_agent_per_hour: 60.0,
                    sla_target_wait_min: 10.0,
                    distributions: w(&[
                        ("-01:30", 0.15),
                        ("-01:00", 0.35),
                        ("-00:45", 0.3),
                        ("-00:30", 0.2),
                    ]),
                    max_utilization: 0.9,
                    search_ceiling: DEFAULT_AIRLINE_CEILING,
                },
                lounge: AirlineAreaConfig {
                    pax_per_agent_per_hour: 40.0,
                    sla_target_wait_min: 15.0,
                    distributions: w(&[
                        ("-03:00", 0.2),
                        ("-02:30", 0.25),
                        ("-02:00", 0.3),
                        ("-01:30", 0.25),
                    ]),
                    max_utilization: 0.9,
                    search_ceiling: DEFAULT_AIRLINE_CEILING,
                },
            },
        }
    }
}
