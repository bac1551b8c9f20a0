mod common;

use common::{approx, day, one_night_block};
use hospops_core::{
    departments::{Department, DepartmentForecaster},
    Archetype, ForecastConfig,
};

#[test]
fn engineering_scales_with_rooms_and_reports_tickets() {
    let config = ForecastConfig::default();
    let rows = one_night_block("E", day("2025-04-01"), 10, 1, Archetype::Other);
    let days = DepartmentForecaster::new(&config)
        .predict(&rows, "engineering")
        .expect("engineering");

    assert_eq!(days.len(), 1);
    let d = &days[0];
    assert_eq!(d.department, Department::Engineering);
    // 10 rooms × 0.05 tickets × 20 min
    assert_eq!(d.tickets.map(|t| approx(t, 0.5)), Some(true));
    assert!(d.transactions.is_none());
    assert!(approx(d.work_minutes, 10.0));
    assert!(approx(d.staff_hours, 10.0 / 60.0));
    assert_eq!(d.recommended_headcount, 1);
}

#[test]
fn valet_counts_car_movements_per_room() {
    let config = ForecastConfig::default();
    let rows = one_night_block("V", day("2025-04-01"), 10, 1, Archetype::SoloBusiness);
    let days = DepartmentForecaster::new(&config).predict(&rows, "Valet").expect("valet");
    let d = &days[0];
    assert_eq!(d.transactions.map(|t| approx(t, 3.0)), Some(true));
    assert!(d.tickets.is_none());
    assert!(approx(d.work_minutes, 18.0));
}

#[test]
fn spa_scales_with_guests() {
    let config = ForecastConfig::default();
    let rows = one_night_block("C", day("2025-04-01"), 4, 2, Archetype::LeisureCouple);
    let days = DepartmentForecaster::new(&config).predict(&rows, "spa").expect("spa");
    // 8 guests × 0.08 treatments × 50 min
    assert!(approx(days[0].work_minutes, 32.0));
}

#[test]
fn missing_archetype_rate_uses_fallback() {
    let mut config = ForecastConfig::default();
    config.departments.spa.treatments_per_guest_day.remove(&Archetype::Other);
    config.departments.concierge.requests_per_guest_day.remove(&Archetype::Other);
    let rows = one_night_block("O", day("2025-04-01"), 10, 1, Archetype::Other);
    let df = DepartmentForecaster::new(&config);

    let spa = df.predict(&rows, "spa").expect("spa");
    assert!(approx(spa[0].work_minutes, 10.0 * 0.03 * 50.0));
    let concierge = df.predict(&rows, "concierge").expect("concierge");
    assert!(approx(concierge[0].work_minutes, 10.0 * 0.1 * 8.0));
}

#[test]
fn headcount_rounds_up_against_shift_capacity() {
    let config = ForecastConfig::default();
    // 400 guests × 0.15 requests × 8 min = 480 min = 8 h; 8 / (8 × 0.85) → 2
    let rows = one_night_block("B", day("2025-04-01"), 200, 2, Archetype::SoloBusiness);
    let days = DepartmentForecaster::new(&config).predict(&rows, "concierge").expect("concierge");
    assert!(approx(days[0].staff_hours, 8.0));
    assert_eq!(days[0].recommended_headcount, 2);
}

#[test]
fn unknown_department_is_rejected() {
    let config = ForecastConfig::default();
    let err = DepartmentForecaster::new(&config)
        .predict(&[], "laundry")
        .expect_err("not a department");
    assert_eq!(
        err.to_string(),
        "Unknown department 'laundry'. Available: spa, concierge, valet, engineering"
    );
}
