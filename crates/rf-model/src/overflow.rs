//! Overflow-risk engine: runoff against tank and pit capacity.
//!
//! Two views are computed side by side:
//! - the aggregate balance, incoming liters against the summed spare capacity
//!   of every structure, which gives overflow liters and a risk percentage;
//! - the system classification, a 2×2 table over "is the storage side full"
//!   and "is the recharge side full". While either side has room, all incoming
//!   water is assumed to be redirected there; only when both are full is it
//!   lost.

use crate::capacity::CapacityReport;
use crate::cascade::{CascadeRouting, route_cascade};
use crate::infiltration::RechargeCapacity;
use crate::runoff::{RunoffEvent, compute_incoming_liters};
use crate::structure::{Structure, StructureKind};
use core::fmt;
use rf_core::numeric::{clamp_percent, percent_of, saturate_non_negative};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fresh per evaluation; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureState {
    Safe,
    Overflowing,
}

impl StructureState {
    pub fn from_overflow(overflow_liters: f64) -> Self {
        if overflow_liters > 0.0 {
            Self::Overflowing
        } else {
            Self::Safe
        }
    }

    pub fn is_overflowing(self) -> bool {
        matches!(self, Self::Overflowing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemStatus {
    Safe,
    Redirect,
    Overflow,
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Redirect => write!(f, "redirect"),
            Self::Overflow => write!(f, "overflow"),
        }
    }
}

/// How incoming water is assumed to move between the two sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectionPolicy {
    /// Either side with room takes all incoming water.
    #[default]
    Ideal,
    /// Fill the tank, then the pit, then overflow.
    Cascade,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemClassification {
    pub status: SystemStatus,
    pub overflow_liters: f64,
    pub message: String,
}

/// Classify the whole system from the overflow state of each side.
///
/// | tank  | pit   | status     | overflow |
/// |-------|-------|------------|----------|
/// | false | false | `safe`     | 0        |
/// | true  | false | `redirect` | 0        |
/// | false | true  | `redirect` | 0        |
/// | true  | true  | `overflow` | incoming |
pub fn classify_system(tank_overflowing: bool, pit_overflowing: bool, incoming_liters: f64) -> SystemClassification {
    let incoming = format_liters(incoming_liters);
    match (tank_overflowing, pit_overflowing) {
        (false, false) => SystemClassification {
            status: SystemStatus::Safe,
            overflow_liters: 0.0,
            message: "No Overflow".to_string(),
        },
        (true, false) => SystemClassification {
            status: SystemStatus::Redirect,
            overflow_liters: 0.0,
            message: format!("{incoming} L directed to Recharge Pit"),
        },
        (false, true) => SystemClassification {
            status: SystemStatus::Redirect,
            overflow_liters: 0.0,
            message: format!("{incoming} L directed to Storage Tank"),
        },
        (true, true) => SystemClassification {
            status: SystemStatus::Overflow,
            overflow_liters: incoming_liters,
            message: format!("Overflow: {incoming} L wasted"),
        },
    }
}

/// `overflow / incoming` as a percentage in `[0, 100]`; 0 when nothing comes in.
///
/// Infinite volumes saturate first, so an unbounded overflow of an unbounded
/// inflow reads as 100 rather than 0.
pub fn risk_percent(overflow_liters: f64, incoming_liters: f64) -> f64 {
    let incoming = saturate_non_negative(incoming_liters);
    if incoming == 0.0 {
        return 0.0;
    }
    clamp_percent(percent_of(saturate_non_negative(overflow_liters), incoming))
}

/// Liters rounded to two decimals with trailing zeros dropped.
pub fn format_liters(liters: f64) -> String {
    let text = format!("{:.2}", saturate_non_negative(liters));
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureAssessment {
    pub kind: StructureKind,
    pub available_capacity_liters: f64,
    /// Incoming minus this structure's capacity, floored at 0
    pub overflow_liters: f64,
    pub risk_percent: f64,
    pub state: StructureState,
    pub capacity: CapacityReport,
    /// Present for recharge pits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recharge: Option<RechargeCapacity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverflowAssessment {
    pub incoming_liters: f64,
    pub structures: Vec<StructureAssessment>,
    pub system_capacity_liters: f64,
    pub system_overflow_liters: f64,
    pub system_risk_percent: f64,
    pub policy: RedirectionPolicy,
    pub classification: SystemClassification,
    /// Present under [`RedirectionPolicy::Cascade`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing: Option<CascadeRouting>,
}

impl OverflowAssessment {
    pub fn structures_of(&self, kind: StructureKind) -> impl Iterator<Item = &StructureAssessment> {
        self.structures.iter().filter(move |s| s.kind == kind)
    }

    /// Spare capacity summed over one side of the system.
    pub fn capacity_of(&self, kind: StructureKind) -> f64 {
        side_capacity(&self.structures, kind)
    }

    pub fn side_overflowing(&self, kind: StructureKind) -> bool {
        side_overflowing(&self.structures, kind)
    }
}

fn side_capacity(structures: &[StructureAssessment], kind: StructureKind) -> f64 {
    saturate_non_negative(
        structures
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.available_capacity_liters)
            .sum(),
    )
}

/// A side is overflowing when none of its structures can take more water.
/// A side with no structures has no room, so it counts as overflowing.
fn side_overflowing(structures: &[StructureAssessment], kind: StructureKind) -> bool {
    structures
        .iter()
        .filter(|s| s.kind == kind)
        .all(|s| s.state.is_overflowing())
}

/// Assess one structure against the full incoming volume.
pub fn assess_structure(structure: &Structure, incoming_liters: f64, duration_hours: f64) -> StructureAssessment {
    let capacity = structure.capacity();
    let (available, recharge) = match structure.kind {
        StructureKind::Storage => (capacity.available_liters(), None),
        StructureKind::Recharge => {
            let rc = structure.recharge_capacity(duration_hours);
            (rc.total_capacity_liters, Some(rc))
        }
    };
    let overflow_liters = (incoming_liters - available).max(0.0);

    StructureAssessment {
        kind: structure.kind,
        available_capacity_liters: available,
        overflow_liters,
        risk_percent: risk_percent(overflow_liters, incoming_liters),
        state: StructureState::from_overflow(overflow_liters),
        capacity,
        recharge,
    }
}

/// Assess a rainfall event against every installed structure.
pub fn assess(event: &RunoffEvent, structures: &[Structure], policy: RedirectionPolicy) -> OverflowAssessment {
    let incoming = compute_incoming_liters(event);
    let duration = event.effective_duration_hours();

    let assessed: Vec<StructureAssessment> = structures
        .iter()
        .map(|s| assess_structure(s, incoming, duration))
        .collect();

    let system_capacity = saturate_non_negative(assessed.iter().map(|s| s.available_capacity_liters).sum());
    let system_overflow = (incoming - system_capacity).max(0.0);

    let (classification, routing) = match policy {
        RedirectionPolicy::Ideal => (
            classify_system(
                side_overflowing(&assessed, StructureKind::Storage),
                side_overflowing(&assessed, StructureKind::Recharge),
                incoming,
            ),
            None,
        ),
        RedirectionPolicy::Cascade => {
            let routing = route_cascade(
                side_capacity(&assessed, StructureKind::Storage),
                side_capacity(&assessed, StructureKind::Recharge),
                incoming,
            );
            let classification = SystemClassification {
                status: routing.status,
                overflow_liters: routing.overflow_liters,
                message: routing.message.clone(),
            };
            (classification, Some(routing))
        }
    };

    let assessment = OverflowAssessment {
        incoming_liters: incoming,
        structures: assessed,
        system_capacity_liters: system_capacity,
        system_overflow_liters: system_overflow,
        system_risk_percent: risk_percent(system_overflow, incoming),
        policy,
        classification,
        routing,
    };

    debug!(
        incoming_liters = assessment.incoming_liters,
        system_capacity_liters = assessment.system_capacity_liters,
        system_overflow_liters = assessment.system_overflow_liters,
        system_risk_percent = assessment.system_risk_percent,
        status = %assessment.classification.status,
        "overflow assessment"
    );

    assessment
}

/// Aggregate balance for the common one-tank, one-pit installation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TotalOverflowRisk {
    pub incoming_liters: f64,
    pub tank_available_liters: f64,
    pub pit_capacity: RechargeCapacity,
    pub system_capacity_liters: f64,
    pub overflow_liters: f64,
    pub risk_percent: f64,
}

pub fn compute_total_overflow_risk(event: &RunoffEvent, tank: &Structure, pit: &Structure) -> TotalOverflowRisk {
    let incoming = compute_incoming_liters(event);
    let tank_available = tank.capacity().available_liters();
    let pit_capacity = pit.recharge_capacity(event.effective_duration_hours());
    let system_capacity = saturate_non_negative(tank_available + pit_capacity.total_capacity_liters);
    let overflow = (incoming - system_capacity).max(0.0);

    TotalOverflowRisk {
        incoming_liters: incoming,
        tank_available_liters: tank_available,
        pit_capacity,
        system_capacity_liters: system_capacity,
        overflow_liters: overflow,
        risk_percent: risk_percent(overflow, incoming),
    }
}
