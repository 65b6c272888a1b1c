//! Twelve-month rainfall / harvest ledger.

use crate::error::ModelError;
use crate::runoff::RunoffEvent;
use core::fmt;
use core::str::FromStr;
use rf_core::numeric::{clamp_fraction, non_negative, saturate_non_negative};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// 1-based calendar number, as returned by `chrono::Datelike::month`.
    pub fn from_number(n: u32) -> Option<Self> {
        let idx = usize::try_from(n).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }

    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = ModelError;

    /// Accepts full or three-letter names in any case, or a number 1-12.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<u32>() {
            return Self::from_number(n).ok_or_else(|| ModelError::UnknownMonth {
                name: s.to_string(),
            });
        }
        let lower = trimmed.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| {
                let name = m.name().to_ascii_lowercase();
                lower == name || lower == name[..3]
            })
            .ok_or_else(|| ModelError::UnknownMonth {
                name: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthRecord {
    /// Rain on the roof, whole liters
    pub rainfall: f64,
    /// Rain scaled by the runoff coefficient (L)
    pub harvested: f64,
}

impl MonthRecord {
    /// Record for a month whose total rainfall depth was `event.rainfall_mm`.
    pub fn from_event(event: &RunoffEvent) -> Self {
        let rainfall = saturate_non_negative(event.roof_area_m2() * non_negative(event.rainfall_mm)).round();
        Self {
            rainfall,
            harvested: rainfall * clamp_fraction(event.runoff_coefficient),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub month: Month,
    pub rainfall: f64,
    pub harvested: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPerformance {
    #[serde(default)]
    months: BTreeMap<Month, MonthRecord>,
}

impl MonthlyPerformance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (or replace) the record for `month`.
    pub fn record(&mut self, month: Month, record: MonthRecord) {
        self.months.insert(month, record);
    }

    pub fn record_event(&mut self, month: Month, event: &RunoffEvent) -> MonthRecord {
        let rec = MonthRecord::from_event(event);
        self.record(month, rec);
        rec
    }

    pub fn get(&self, month: Month) -> Option<&MonthRecord> {
        self.months.get(&month)
    }

    /// All twelve months in calendar order; unrecorded months are zero.
    pub fn series(&self) -> Vec<MonthlyPoint> {
        Month::ALL
            .iter()
            .map(|&month| {
                let rec = self.months.get(&month).copied().unwrap_or_default();
                MonthlyPoint {
                    month,
                    rainfall: rec.rainfall,
                    harvested: rec.harvested,
                }
            })
            .collect()
    }

    /// (rainfall, harvested) summed over the year.
    pub fn totals(&self) -> (f64, f64) {
        let (rain, harvested) = self
            .months
            .values()
            .fold((0.0, 0.0), |(r, h), rec| (r + rec.rainfall, h + rec.harvested));
        (saturate_non_negative(rain), saturate_non_negative(harvested))
    }
}
