//! Project loading, saving, validation, and introspection.

use std::path::Path;

use rf_model::{Dimensions, RedirectionPolicy};
use rf_project::schema::{Project, SiteDef};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Summary of a site for listing.
#[derive(Debug, Clone)]
pub struct SiteSummary {
    pub id: String,
    pub name: String,
    pub roof_area_sqft: f64,
    pub storage: Dimensions,
    pub recharge: Dimensions,
    pub policy: RedirectionPolicy,
    pub monthly_records: usize,
    pub has_surface: bool,
}

enum Format {
    Yaml,
    Json,
}

fn format_of(path: &Path) -> AppResult<Format> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("yaml" | "yml") => Ok(Format::Yaml),
        Some("json") => Ok(Format::Json),
        _ => Err(AppError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Load a project from a YAML or JSON file (chosen by extension).
///
/// The project is migrated and schema-validated on the way in.
pub fn load_project(path: &Path) -> AppResult<Project> {
    let format = format_of(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ProjectFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let project = match format {
        Format::Yaml => rf_project::from_yaml_str(&content)?,
        Format::Json => rf_project::from_json_str(&content)?,
    };

    info!(
        "Loaded project '{}' ({} sites) from {}",
        project.name,
        project.sites.len(),
        path.display()
    );
    Ok(project)
}

/// Save a project, format chosen by extension.
///
/// Serialization validates the project; nothing is written when it fails.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    let content = match format_of(path)? {
        Format::Yaml => rf_project::to_yaml_string(project)?,
        Format::Json => rf_project::to_json_string(project)?,
    };

    std::fs::write(path, content).map_err(|e| AppError::ProjectFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Schema validation plus the checks a runnable project needs.
pub fn validate_project(project: &Project) -> AppResult<()> {
    rf_project::validate_project(project).map_err(|e| AppError::Validation(e.to_string()))?;

    if project.sites.is_empty() {
        return Err(AppError::Validation(
            "Project must have at least one site".to_string(),
        ));
    }

    Ok(())
}

/// List all sites in the project with summaries.
pub fn list_sites(project: &Project) -> Vec<SiteSummary> {
    project
        .sites
        .iter()
        .map(|site| SiteSummary {
            id: site.id.clone(),
            name: site.name.clone(),
            roof_area_sqft: site.rooftop.area.value(),
            storage: Dimensions::parse(&site.storage.dimension),
            recharge: Dimensions::parse(&site.recharge.dimension),
            policy: site.policy,
            monthly_records: site.rainfall.monthly.len(),
            has_surface: site.surface.is_some(),
        })
        .collect()
}

/// Get a specific site by ID.
pub fn get_site<'a>(project: &'a Project, site_id: &str) -> AppResult<&'a SiteDef> {
    project
        .site(site_id)
        .ok_or_else(|| AppError::SiteNotFound(site_id.to_string()))
}
