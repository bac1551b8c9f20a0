use hospops_core::queueing::{
    erlang_c_wait_minutes, LoadStatus, ServiceLevel, StaffingSearch, DEFAULT_SERVICE_CEILING,
};

fn reception_level(target_wait: f64) -> ServiceLevel {
    ServiceLevel {
        service_rate: 12.0,
        utilization: 0.85,
        target_wait_minutes: target_wait,
        search: StaffingSearch::new(DEFAULT_SERVICE_CEILING),
    }
}

#[test]
fn more_agents_never_lengthen_the_wait() {
    let mut prev = f64::INFINITY;
    for c in 1..40 {
        let w = erlang_c_wait_minutes(150.0, 12.0, c);
        assert!(w <= prev, "c={c}: {w} > {prev}");
        prev = w;
    }
}

#[test]
fn chosen_staff_meets_both_bounds_and_is_minimal() {
    let search = StaffingSearch::new(DEFAULT_SERVICE_CEILING);
    for load in [1.0, 7.5, 40.0, 133.0] {
        let out = search.minimal_staff(load, 12.0, 5.0, 0.85);
        assert!(!out.saturated);
        let c = out.servers;
        assert!(erlang_c_wait_minutes(load, 12.0, c) <= 5.0);
        assert!(load / (c as f64 * 12.0) < 0.85);
        if c > 1 {
            let below = c - 1;
            let ok = erlang_c_wait_minutes(load, 12.0, below) <= 5.0
                && load / (below as f64 * 12.0) < 0.85;
            assert!(!ok, "load {load}: {below} agents would already do");
        }
    }
}

#[test]
fn staffing_grows_with_load() {
    let level = reception_level(5.0);
    let mut prev = 0;
    for load in [0.0, 5.0, 20.0, 60.0, 120.0, 240.0] {
        let rec = level.recommend(load);
        assert!(rec.recommended_staff >= prev);
        prev = rec.recommended_staff;
    }
}

#[test]
fn zero_load_needs_nobody() {
    let rec = reception_level(5.0).recommend(0.0);
    assert_eq!(rec.recommended_staff, 0);
    assert_eq!(rec.staff_util, 0);
    assert_eq!(rec.staff_sla, 0);
    assert_eq!(rec.load_status, LoadStatus::Green);
}

#[test]
fn recommendation_keeps_status_within_capacity() {
    let level = reception_level(2.0);
    for load in [3.0, 30.0, 90.0] {
        let rec = level.recommend(load);
        assert!(!rec.saturated);
        assert_ne!(rec.load_status, LoadStatus::Red);
    }
}
