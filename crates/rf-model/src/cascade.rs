//! Sequential fill routing: tank first, then pit, remainder overflows.
//!
//! This is the opt-in alternative to the ideal redirection table in
//! [`crate::overflow::classify_system`]. It splits the incoming volume by the
//! actual spare space of each side instead of assuming the non-full side can
//! take everything.

use crate::overflow::{SystemStatus, format_liters};
use rf_core::numeric::saturate_non_negative;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CascadeRouting {
    pub to_tank_liters: f64,
    pub to_pit_liters: f64,
    pub overflow_liters: f64,
    pub status: SystemStatus,
    pub message: String,
}

/// Route `incoming_liters` into the spare space of the tank side and the pit side.
///
/// Every liter ends up in exactly one of `to_tank`, `to_pit` or `overflow`.
pub fn route_cascade(tank_space_liters: f64, pit_space_liters: f64, incoming_liters: f64) -> CascadeRouting {
    let tank_space = saturate_non_negative(tank_space_liters);
    let pit_space = saturate_non_negative(pit_space_liters);
    let incoming = saturate_non_negative(incoming_liters);

    let to_tank = incoming.min(tank_space);
    let to_pit = (incoming - to_tank).min(pit_space);
    let overflow = incoming - to_tank - to_pit;

    let (status, message) = match (tank_space > 0.0, pit_space > 0.0) {
        (true, true) if overflow == 0.0 => (SystemStatus::Safe, "No Overflow".to_string()),
        (false, true) if overflow == 0.0 => (
            SystemStatus::Redirect,
            format!("{} L directed to Recharge Pit", format_liters(to_pit)),
        ),
        (true, false) if overflow == 0.0 => (
            SystemStatus::Redirect,
            format!("{} L directed to Storage Tank", format_liters(to_tank)),
        ),
        _ => (
            SystemStatus::Overflow,
            format!("Overflow: {} L wasted", format_liters(overflow)),
        ),
    };

    CascadeRouting {
        to_tank_liters: to_tank,
        to_pit_liters: to_pit,
        overflow_liters: overflow,
        status,
        message,
    }
}
