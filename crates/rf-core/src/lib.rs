//! rf-core: stable foundation for rainflow.
//!
//! Contains:
//! - units (uom SI types + constructors + water-balance conversions)
//! - numeric (Real + tolerances + float guards)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{RfError, RfResult};
pub use numeric::*;
pub use units::*;
