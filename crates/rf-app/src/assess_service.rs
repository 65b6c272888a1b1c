//! Site assessment: runs the water-balance models for stored sites.

use rayon::prelude::*;
use rf_core::numeric::ensure_finite;
use rf_model::{
    HarvestAssessment, InsightsSummary, MonthlyPoint, OverflowAssessment, RedirectionPolicy,
    RooftopEfficiency, RunoffEvent, TotalOverflowRisk, assess, assess_harvest,
    compute_total_overflow_risk, rooftop_efficiency, summarize,
};
use rf_project::schema::{Project, SiteDef};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::project_service::get_site;

/// Overrides applied on top of a site's stored rainfall and policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssessOptions {
    pub rainfall_mm: Option<f64>,
    pub duration_hours: Option<f64>,
    pub policy: Option<RedirectionPolicy>,
}

impl AssessOptions {
    /// Reject overrides that are not finite or are negative.
    pub fn checked(self) -> AppResult<Self> {
        for (what, v) in [
            ("rainfall override", self.rainfall_mm),
            ("duration override", self.duration_hours),
        ] {
            if let Some(v) = v {
                let v = ensure_finite(v, what)?;
                if v < 0.0 {
                    return Err(AppError::InvalidInput(format!("{} must not be negative: {}", what, v)));
                }
            }
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteReport {
    pub site_id: String,
    pub site_name: String,
    pub event: RunoffEvent,
    pub assessment: OverflowAssessment,
    pub total_risk: TotalOverflowRisk,
    pub harvest: HarvestAssessment,
    pub insights: InsightsSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<RooftopEfficiency>,
    /// Human-readable notes about inputs that degraded to zero
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    pub site_id: String,
    pub points: Vec<MonthlyPoint>,
    pub total_rainfall: f64,
    pub total_harvested: f64,
}

/// Assess one site record.
pub fn assess_site(site: &SiteDef, opts: &AssessOptions) -> SiteReport {
    let mut event = site.event();
    if let Some(mm) = opts.rainfall_mm {
        event = event.with_rainfall_mm(mm);
    }
    if let Some(hours) = opts.duration_hours {
        event = event.with_duration_hours(hours);
    }
    let policy = opts.policy.unwrap_or(site.policy);

    let mut warnings = Vec::new();
    for (kind, text) in site.degenerate_structures() {
        warn!(
            "Site '{}': {} dimension '{}' did not parse, treating as zero capacity",
            site.id,
            kind.label(),
            text
        );
        warnings.push(format!(
            "{} dimension '{}' did not parse; capacity taken as zero",
            kind.label(),
            text
        ));
    }

    let tank = site.tank();
    let pit = site.pit();
    let assessment = assess(&event, &[tank.clone(), pit.clone()], policy);
    let total_risk = compute_total_overflow_risk(&event, &tank, &pit);

    info!(
        "Site '{}': {} ({:.2} L incoming, {:.2} L overflow, {:.1}% risk)",
        site.id,
        assessment.classification.status,
        assessment.incoming_liters,
        assessment.system_overflow_liters,
        assessment.system_risk_percent
    );

    SiteReport {
        site_id: site.id.clone(),
        site_name: site.name.clone(),
        harvest: assess_harvest(&event),
        insights: summarize(&event, &tank, &pit),
        efficiency: site.surface.as_ref().map(rooftop_efficiency),
        event,
        assessment,
        total_risk,
        warnings,
    }
}

/// Assess a site by ID.
pub fn assess_site_by_id(project: &Project, site_id: &str, opts: &AssessOptions) -> AppResult<SiteReport> {
    let opts = opts.checked()?;
    let site = get_site(project, site_id)?;
    Ok(assess_site(site, &opts))
}

/// Assess every site in parallel. Reports keep project order.
pub fn assess_all(project: &Project, opts: &AssessOptions) -> AppResult<Vec<SiteReport>> {
    let opts = opts.checked()?;
    let reports: Vec<SiteReport> = project
        .sites
        .par_iter()
        .map(|site| assess_site(site, &opts))
        .collect();

    let overflowing = reports
        .iter()
        .filter(|r| r.assessment.system_overflow_liters > 0.0)
        .count();
    info!(
        "Assessed {} sites in '{}', {} with overflow",
        reports.len(),
        project.name,
        overflowing
    );
    Ok(reports)
}

/// Twelve-month ledger of a site's recorded rainfall.
pub fn monthly_report(project: &Project, site_id: &str) -> AppResult<MonthlyReport> {
    let site = get_site(project, site_id)?;
    let ledger = site.monthly_ledger();
    let (total_rainfall, total_harvested) = ledger.totals();
    if site.rainfall.monthly.is_empty() {
        warn!("Site '{}' has no monthly rainfall records", site.id);
    }

    Ok(MonthlyReport {
        site_id: site.id.clone(),
        points: ledger.series(),
        total_rainfall,
        total_harvested,
    })
}
