//! rf-model: water-balance models for rooftop rainwater harvesting.
//!
//! Everything here is a pure function of its inputs:
//! - dimension strings → structure geometry
//! - sensor readings → fill level and spare capacity
//! - roof + rainfall → incoming runoff
//! - recharge pit geometry + soil rate → absorption capacity
//! - all of the above → overflow risk and system classification
//! - design storm + groundwater depth → a sized pit and tank layout
//!
//! Malformed inputs degrade to zero rather than failing, so a half-configured
//! installation still produces a finite assessment.
//!
//! # Example
//!
//! ```
//! use rf_model::{Dimensions, RedirectionPolicy, RunoffEvent, Structure, assess};
//!
//! let tank = Structure::storage(Dimensions::parse("2x2x1.5"), 0.5);
//! let pit = Structure::recharge(Dimensions::parse("2x2x2.5"), 0.5, 0.4, 25.0);
//! let event = RunoffEvent::new(1000.0, 0.8, 50.0);
//!
//! let a = assess(&event, &[tank, pit], RedirectionPolicy::Ideal);
//! assert_eq!(a.system_overflow_liters, 0.0);
//! ```

pub mod capacity;
pub mod cascade;
pub mod design;
pub mod dimensions;
pub mod efficiency;
pub mod error;
pub mod harvest;
pub mod infiltration;
pub mod insights;
pub mod monthly;
pub mod overflow;
pub mod runoff;
pub mod structure;

// Re-exports
pub use capacity::{CapacityReport, evaluate_structure};
pub use cascade::{CascadeRouting, route_cascade};
pub use design::{
    DesignCategory, DesignComponent, DesignInput, PitDimensions, SystemDesign, design_recharge_pit,
    design_system, peak_flow_m3_per_hr, roof_runoff_coefficient,
};
pub use dimensions::{Dimensions, parse_dimensions};
pub use efficiency::{
    Cleanliness, Drainage, EfficiencyLevel, FirstFlush, RoofMaterial, RooftopEfficiency,
    RooftopSurface, rooftop_efficiency,
};
pub use error::{ModelError, ModelResult};
pub use harvest::{HarvestAssessment, assess_harvest};
pub use infiltration::{RechargeCapacity, compute_recharge_capacity};
pub use insights::{InsightsSummary, StructureInsight, summarize};
pub use monthly::{Month, MonthRecord, MonthlyPerformance, MonthlyPoint};
pub use overflow::{
    OverflowAssessment, RedirectionPolicy, StructureAssessment, StructureState,
    SystemClassification, SystemStatus, TotalOverflowRisk, assess, classify_system,
    compute_total_overflow_risk, risk_percent,
};
pub use runoff::{RunoffEvent, compute_incoming_liters};
pub use structure::{DEFAULT_VOID_FRACTION, RechargeParams, Structure, StructureKind};
