//! Shared application service layer for rainflow.
//!
//! Loads site projects, runs the water-balance models against them and
//! packages the results for the CLI. Also sizes new installations.

pub mod assess_service;
pub mod design_service;
pub mod error;
pub mod project_service;

// Re-export key types for convenience
pub use assess_service::{
    AssessOptions, MonthlyReport, SiteReport, assess_all, assess_site, assess_site_by_id,
    monthly_report,
};
pub use design_service::design;
pub use error::{AppError, AppResult};
pub use project_service::{
    SiteSummary, get_site, list_sites, load_project, save_project, validate_project,
};
