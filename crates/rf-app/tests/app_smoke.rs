//! Smoke test for the rf-app service layer against the demo project.

use std::path::PathBuf;

use rf_app::{
    AppError, AssessOptions, assess_all, assess_site_by_id, list_sites, load_project,
    monthly_report, save_project, validate_project,
};
use rf_model::{EfficiencyLevel, Month, RedirectionPolicy, SystemStatus};

fn demo_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // crates
    path.pop(); // repo root
    path.push("demos");
    path.push("sites.yaml");
    path
}

#[test]
fn load_and_list_demo_project() {
    let project = load_project(&demo_path()).unwrap();
    validate_project(&project).unwrap();

    let sites = list_sites(&project);
    assert_eq!(sites.len(), 3);
    assert_eq!(sites[0].id, "hostel-a");
    assert_eq!(sites[0].monthly_records, 4);
    assert!(sites[0].has_surface);
    assert_eq!(sites[1].policy, RedirectionPolicy::Cascade);
    assert!(sites[2].recharge.is_degenerate());
}

#[test]
fn reference_site_redirects_to_the_pit() {
    let project = load_project(&demo_path()).unwrap();
    let report = assess_site_by_id(&project, "hostel-a", &AssessOptions::default()).unwrap();

    assert!((report.assessment.incoming_liters - 3716.12).abs() < 1e-6);
    assert!((report.assessment.system_capacity_liters - 5800.0).abs() < 1e-6);
    assert_eq!(report.assessment.system_overflow_liters, 0.0);
    // 2000 L tank headroom cannot take the event; the 3800 L pit can.
    assert_eq!(report.assessment.classification.status, SystemStatus::Redirect);
    assert_eq!(
        report.assessment.classification.message,
        "3716.12 L directed to Recharge Pit"
    );
    assert_eq!(report.harvest.capture_percent, 80.0);
    assert_eq!(report.efficiency.unwrap().level, EfficiencyLevel::Moderate);
}

#[test]
fn batch_assessment_keeps_project_order() {
    let project = load_project(&demo_path()).unwrap();
    let reports = assess_all(&project, &AssessOptions::default()).unwrap();

    let ids: Vec<_> = reports.iter().map(|r| r.site_id.as_str()).collect();
    assert_eq!(ids, vec!["hostel-a", "library", "workshop"]);

    // Workshop has no surveyed pit.
    assert_eq!(reports[2].warnings.len(), 1);
    // Library pit sensor reads zero distance, reported loss 340 L.
    assert!(reports[1].insights.pit.overflowing);
    assert_eq!(reports[1].insights.total_overflow_loss_liters, 340.0);
    assert!(reports[1].assessment.routing.is_some());
}

#[test]
fn unknown_site_is_an_error() {
    let project = load_project(&demo_path()).unwrap();
    let err = assess_site_by_id(&project, "nope", &AssessOptions::default()).unwrap_err();
    assert!(matches!(err, AppError::SiteNotFound(ref id) if id == "nope"));
}

#[test]
fn monthly_ledger_for_demo_site() {
    let project = load_project(&demo_path()).unwrap();
    let report = monthly_report(&project, "hostel-a").unwrap();

    assert_eq!(report.points.len(), 12);
    let july = report.points.iter().find(|p| p.month == Month::July).unwrap();
    // 92.903 m² × 300 mm
    assert_eq!(july.rainfall, 27_871.0);
    assert_eq!(report.points[0].rainfall, 0.0);
    assert!(report.total_harvested > 0.0);
}

#[test]
fn report_serializes_to_json() {
    let project = load_project(&demo_path()).unwrap();
    let report = assess_site_by_id(&project, "hostel-a", &AssessOptions::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["site_id"], "hostel-a");
    assert_eq!(json["assessment"]["classification"]["status"], "redirect");
    assert!(json.get("warnings").is_none());
}

#[test]
fn save_as_json_and_reload() {
    let project = load_project(&demo_path()).unwrap();
    let path = std::env::temp_dir().join("rf_app_demo_copy.json");
    save_project(&path, &project).unwrap();
    let reloaded = load_project(&path).unwrap();
    assert_eq!(project, reloaded);
}

#[test]
fn invalid_project_is_not_saved() {
    let mut project = load_project(&demo_path()).unwrap();
    project.sites[1].id = project.sites[0].id.clone();
    let path = std::env::temp_dir().join("rf_app_invalid_copy.yaml");
    let _ = std::fs::remove_file(&path);

    let err = save_project(&path, &project).unwrap_err();
    assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("hostel-a")), "{err}");
    assert!(!path.exists());
}

#[test]
fn unknown_extension_is_rejected() {
    let err = load_project(std::path::Path::new("project.toml")).unwrap_err();
    assert!(matches!(err, AppError::UnsupportedFormat { .. }));
}
