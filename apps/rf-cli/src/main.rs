use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use rf_app::{
    AppError, AppResult, AssessOptions, SiteReport, assess_service, design_service, project_service,
};
use rf_model::overflow::format_liters;
use rf_model::{
    Cleanliness, DesignInput, Dimensions, Drainage, FirstFlush, Month, RedirectionPolicy,
    RoofMaterial, RooftopSurface, StructureKind, rooftop_efficiency,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "rf-cli")]
#[command(about = "Rainflow CLI - rainwater harvesting overflow-risk assessment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// List sites in a project
    Sites {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Assess overflow risk for one site or all sites
    Assess {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Site ID (defaults to every site)
        #[arg(long)]
        site: Option<String>,
        /// Override the stored event rainfall (mm)
        #[arg(long)]
        rainfall_mm: Option<f64>,
        /// Override the stored event duration (hours)
        #[arg(long)]
        duration_hours: Option<f64>,
        /// Override the stored redirection policy
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the twelve-month rainfall ledger of a site
    Monthly {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Site ID
        #[arg(long)]
        site: String,
        /// Month to highlight (name or 1-12, defaults to the current month)
        #[arg(long)]
        month: Option<String>,
        /// Print the ledger as JSON
        #[arg(long)]
        json: bool,
    },
    /// Score a rooftop's collection efficiency
    Efficiency {
        #[arg(long, default_value = "rcc")]
        material: String,
        /// Roof slope in degrees
        #[arg(long, default_value_t = 5.0)]
        slope: f64,
        #[arg(long, default_value = "clean")]
        cleanliness: String,
        #[arg(long, default_value = "good")]
        drainage: String,
        #[arg(long, default_value = "available")]
        first_flush: String,
    },
    /// Size a recharge pit and tank layout for a new rooftop
    Design {
        /// Rooftop area (m²)
        #[arg(long)]
        area_m2: f64,
        #[arg(long, default_value = "concrete")]
        roof_type: String,
        /// Wettest day of the design year (mm)
        #[arg(long)]
        daily_rainfall_mm: f64,
        /// Most intense hour of the design year (mm/hr)
        #[arg(long)]
        hourly_rainfall_mm: f64,
        /// Depth to the water table (m below ground)
        #[arg(long)]
        groundwater_depth_m: f64,
        /// Print the design as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse a structure dimension string ("LxWxH" in meters)
    ParseDim {
        text: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Ideal,
    Cascade,
}

impl From<PolicyArg> for RedirectionPolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Ideal => RedirectionPolicy::Ideal,
            PolicyArg::Cascade => RedirectionPolicy::Cascade,
        }
    }
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Sites { project_path } => cmd_sites(&project_path),
        Commands::Assess {
            project_path,
            site,
            rainfall_mm,
            duration_hours,
            policy,
            json,
        } => {
            let opts = AssessOptions {
                rainfall_mm,
                duration_hours,
                policy: policy.map(Into::into),
            };
            cmd_assess(&project_path, site.as_deref(), &opts, json)
        }
        Commands::Monthly {
            project_path,
            site,
            month,
            json,
        } => cmd_monthly(&project_path, &site, month.as_deref(), json),
        Commands::Efficiency {
            material,
            slope,
            cleanliness,
            drainage,
            first_flush,
        } => cmd_efficiency(&material, slope, &cleanliness, &drainage, &first_flush),
        Commands::Design {
            area_m2,
            roof_type,
            daily_rainfall_mm,
            hourly_rainfall_mm,
            groundwater_depth_m,
            json,
        } => {
            let input = DesignInput {
                rooftop_area_m2: area_m2,
                roof_type,
                max_daily_rainfall_mm: daily_rainfall_mm,
                max_hourly_rainfall_mm: hourly_rainfall_mm,
                groundwater_depth_m,
            };
            cmd_design(&input, json)
        }
        Commands::ParseDim { text } => cmd_parse_dim(&text),
    }
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Serialization(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    println!("✓ Project is valid");
    Ok(())
}

fn cmd_sites(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let sites = project_service::list_sites(&project);

    if sites.is_empty() {
        println!("No sites found in project");
    } else {
        println!("Sites in project:");
        for site in sites {
            println!(
                "  {} - {} ({} sqft roof, tank {}, pit {}, {:?} policy)",
                site.id,
                site.name,
                site.roof_area_sqft,
                site.storage,
                site.recharge,
                site.policy
            );
        }
    }
    Ok(())
}

fn cmd_assess(project_path: &Path, site: Option<&str>, opts: &AssessOptions, json: bool) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let reports = match site {
        Some(id) => vec![assess_service::assess_site_by_id(&project, id, opts)?],
        None => assess_service::assess_all(&project, opts)?,
    };

    if json {
        return print_json(&reports);
    }
    for report in &reports {
        print_report(report);
    }
    Ok(())
}

fn print_report(report: &SiteReport) {
    let a = &report.assessment;
    println!("{} - {}", report.site_id, report.site_name);
    println!(
        "  Event: {} mm over {} h on {} sqft (coefficient {})",
        report.event.rainfall_mm,
        report.event.effective_duration_hours(),
        report.event.roof_area_sqft,
        report.event.runoff_coefficient
    );
    println!("  Incoming: {} L", format_liters(a.incoming_liters));
    for kind in [StructureKind::Storage, StructureKind::Recharge] {
        println!("  {} capacity: {} L", kind.label(), format_liters(a.capacity_of(kind)));
    }
    println!("  System capacity: {} L", format_liters(a.system_capacity_liters));
    println!(
        "  Overflow: {} L ({:.2}% risk)",
        format_liters(a.system_overflow_liters),
        a.system_risk_percent
    );
    if let Some(routing) = &a.routing {
        println!(
            "  Cascade: {} L to tank, {} L to pit",
            format_liters(routing.to_tank_liters),
            format_liters(routing.to_pit_liters)
        );
    }
    println!("  Status: {} ({})", a.classification.status, a.classification.message);
    println!(
        "  Sensors: {} L held, {:.1}% mean headroom, {} L reported lost",
        format_liters(report.insights.rain_harvested_liters),
        report.insights.system_efficiency_percent,
        format_liters(report.insights.total_overflow_loss_liters)
    );
    if let Some(e) = &report.efficiency {
        println!("  Rooftop efficiency: {:.2}% ({:?})", e.efficiency_percent, e.level);
    }
    for w in &report.warnings {
        println!("  ! {}", w);
    }
    if a.system_overflow_liters > 0.0 {
        println!("✗ Overflow expected");
    } else {
        println!("✓ No overflow");
    }
}

fn cmd_monthly(project_path: &Path, site_id: &str, month: Option<&str>, json: bool) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let report = assess_service::monthly_report(&project, site_id)?;

    if json {
        return print_json(&report);
    }

    let highlight = match month {
        Some(text) => text.parse::<Month>()?,
        None => current_month()?,
    };
    debug!("Highlighting {}", highlight);

    println!("Monthly ledger for {}:", report.site_id);
    println!("  {:<5} {:>12} {:>12}", "Month", "Rainfall L", "Harvested L");
    for p in &report.points {
        let marker = if p.month == highlight { '*' } else { ' ' };
        println!(
            "{} {:<5} {:>12} {:>12}",
            marker,
            p.month.short_name(),
            format_liters(p.rainfall),
            format_liters(p.harvested)
        );
    }
    println!(
        "  {:<5} {:>12} {:>12}",
        "Total",
        format_liters(report.total_rainfall),
        format_liters(report.total_harvested)
    );
    Ok(())
}

fn current_month() -> AppResult<Month> {
    let n = chrono::Local::now().month();
    Month::from_number(n).ok_or_else(|| AppError::InvalidInput(format!("month number {}", n)))
}

fn cmd_efficiency(
    material: &str,
    slope: f64,
    cleanliness: &str,
    drainage: &str,
    first_flush: &str,
) -> AppResult<()> {
    let surface = RooftopSurface {
        material: material.parse::<RoofMaterial>()?,
        slope_deg: slope,
        cleanliness: cleanliness.parse::<Cleanliness>()?,
        drainage: drainage.parse::<Drainage>()?,
        first_flush: first_flush.parse::<FirstFlush>()?,
    };
    let e = rooftop_efficiency(&surface);
    let b = &e.breakdown;

    println!("Rooftop efficiency:");
    println!("  Material:     {:.2}", b.material_score);
    println!("  Slope:        {:.2}", b.slope_score);
    println!("  Cleanliness:  {:.2}", b.cleanliness_score);
    println!("  Drainage:     {:.2}", b.drainage_score);
    println!("  First flush:  {:.2}", b.first_flush_score);
    println!("✓ {:.2}% ({:?})", e.efficiency_percent, e.level);
    Ok(())
}

fn cmd_design(input: &DesignInput, json: bool) -> AppResult<()> {
    let d = design_service::design(input)?;
    if json {
        return print_json(&d);
    }

    println!("Design for {} m² {} roof:", input.rooftop_area_m2, input.roof_type);
    println!("  Runoff coefficient: {}", d.runoff_coefficient);
    println!("  Design storm runoff: {:.3} m³", d.runoff_volume_m3);
    println!("  Peak inflow (Q = CiA): {:.3} m³/hr", d.peak_flow_m3_per_hr);
    println!("  Layout: {}", d.category.description());
    match &d.pit {
        Some(pit) => println!(
            "  Recharge pit: {} m × {} m × {} m ({:.3} m³)",
            pit.length_m,
            pit.breadth_m,
            pit.depth_m,
            pit.volume_m3()
        ),
        None => println!("  Recharge pit: none"),
    }
    if d.feasible {
        println!("✓ Recharge is feasible");
    } else {
        println!("✗ Groundwater too shallow for recharge");
    }
    Ok(())
}

fn cmd_parse_dim(text: &str) -> AppResult<()> {
    let dims = Dimensions::parse(text);
    if dims.is_degenerate() {
        println!("✗ '{}' has no usable geometry (parsed as {})", text, dims);
    } else {
        println!(
            "✓ {} ({} m² base, {} L gross)",
            dims,
            dims.base_area_m2(),
            format_liters(dims.gross_liters())
        );
    }
    Ok(())
}
