//! Integration tests: a tank + recharge pit installation through one rain event.
//!
//! Installation:
//!   Tank  2 x 2 x 1.5 m, sensor 0.5 m below the rim  -> 2000 L spare
//!   Pit   2 x 2 x 2.5 m, sensor 0.5 m, 40 % voids,
//!         25 mm/hr seepage over 1 h                  -> 3800 L absorbable
//!   Roof  1000 sqft, runoff coefficient 0.8

use rf_core::{Tolerances, nearly_equal};
use rf_model::{
    Dimensions, RedirectionPolicy, RunoffEvent, Structure, StructureKind, StructureState,
    SystemStatus, assess, compute_incoming_liters, compute_recharge_capacity,
    compute_total_overflow_risk, evaluate_structure, parse_dimensions,
};

fn approx(a: f64, b: f64) -> bool {
    nearly_equal(a, b, Tolerances { abs: 1e-6, rel: 1e-9 })
}

fn tank() -> Structure {
    Structure::storage(parse_dimensions("2x2x1.5"), 0.5)
}

fn pit() -> Structure {
    Structure::recharge(parse_dimensions("2 m × 2 m × 2.5 m"), 0.5, 0.4, 25.0)
}

#[test]
fn moderate_storm_is_fully_absorbed() {
    let tank_report = evaluate_structure(&tank().dimensions, 0.5);
    assert!(approx(tank_report.usable_height_m, 1.0));
    assert!(approx(tank_report.gross_capacity_liters, 6000.0));
    assert!(approx(tank_report.occupied_liters, 4000.0));
    assert!(approx(tank_report.available_liters(), 2000.0));

    let pit_capacity = compute_recharge_capacity(&Dimensions::new(2.0, 2.0, 2.5), 0.5, 0.4, 25.0, 1.0);
    assert!(approx(pit_capacity.usable_height_m, 2.0));
    assert!(approx(pit_capacity.storage_liters, 3200.0));
    assert!(approx(pit_capacity.effective_area_m2, 24.0));
    assert!(approx(pit_capacity.infiltration_liters, 600.0));
    assert!(approx(pit_capacity.total_capacity_liters, 3800.0));

    let event = RunoffEvent::new(1000.0, 0.8, 50.0);
    assert!(approx(compute_incoming_liters(&event), 3716.12));

    let risk = compute_total_overflow_risk(&event, &tank(), &pit());
    assert!(approx(risk.system_capacity_liters, 5800.0));
    assert_eq!(risk.overflow_liters, 0.0);
    assert_eq!(risk.risk_percent, 0.0);
}

#[test]
fn heavy_storm_overflows() {
    let event = RunoffEvent::new(1000.0, 0.8, 200.0);
    let risk = compute_total_overflow_risk(&event, &tank(), &pit());

    assert!(approx(risk.incoming_liters, 14_864.48));
    assert!(approx(risk.overflow_liters, 9_064.48));
    assert!((risk.risk_percent - 61.0).abs() < 0.05, "risk {}", risk.risk_percent);
}

#[test]
fn assessment_agrees_with_total_risk() {
    for rainfall in [0.0, 10.0, 50.0, 120.0, 200.0, 500.0] {
        let event = RunoffEvent::new(1000.0, 0.8, rainfall);
        let total = compute_total_overflow_risk(&event, &tank(), &pit());
        let a = assess(&event, &[tank(), pit()], RedirectionPolicy::Ideal);

        assert!(approx(a.incoming_liters, total.incoming_liters));
        assert!(approx(a.system_capacity_liters, total.system_capacity_liters));
        assert!(approx(a.system_overflow_liters, total.overflow_liters));
        assert!(approx(a.system_risk_percent, total.risk_percent));
    }
}

#[test]
fn longer_event_adds_seepage_capacity() {
    let short = RunoffEvent::new(1000.0, 0.8, 200.0);
    let long = short.with_duration_hours(6.0);

    let a = compute_total_overflow_risk(&short, &tank(), &pit());
    let b = compute_total_overflow_risk(&long, &tank(), &pit());

    assert!(approx(b.pit_capacity.infiltration_liters, 3600.0));
    assert!(b.overflow_liters < a.overflow_liters);
}

#[test]
fn unparseable_geometry_degrades_to_zero_capacity() {
    let tank = Structure::storage(parse_dimensions("about two meters"), 0.5);
    let pit = Structure::recharge(parse_dimensions(""), 0.5, 0.4, 25.0);
    let event = RunoffEvent::new(1000.0, 0.8, 50.0);

    let a = assess(&event, &[tank, pit], RedirectionPolicy::Ideal);
    assert_eq!(a.system_capacity_liters, 0.0);
    assert!(approx(a.system_overflow_liters, a.incoming_liters));
    assert_eq!(a.system_risk_percent, 100.0);
    assert!(a.structures.iter().all(|s| s.state == StructureState::Overflowing));
    assert_eq!(a.classification.status, SystemStatus::Overflow);
    for s in &a.structures {
        assert!(s.capacity.utilization_percent.is_finite());
        assert!(s.capacity.efficiency_percent.is_finite());
    }
}

#[test]
fn cascade_policy_splits_the_flow() {
    let event = RunoffEvent::new(1000.0, 0.8, 200.0);
    let a = assess(&event, &[tank(), pit()], RedirectionPolicy::Cascade);
    let routing = a.routing.as_ref().unwrap();

    assert!(approx(routing.to_tank_liters, a.capacity_of(StructureKind::Storage)));
    assert!(approx(routing.to_pit_liters, a.capacity_of(StructureKind::Recharge)));
    assert!(approx(routing.overflow_liters, a.system_overflow_liters));
    assert_eq!(a.classification.status, SystemStatus::Overflow);
}

#[test]
fn assessment_serializes() {
    let a = assess(&RunoffEvent::new(1000.0, 0.8, 50.0), &[tank(), pit()], RedirectionPolicy::Ideal);
    let json = serde_json::to_value(&a).unwrap();
    assert_eq!(json["classification"]["status"], "redirect");
    assert_eq!(json["policy"], "ideal");
    assert_eq!(json["structures"][1]["kind"], "recharge");
}
