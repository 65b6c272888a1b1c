//! Conversion from stored site records to model inputs.

use crate::schema::{RooftopDef, SiteDef};
use rf_model::{
    Dimensions, MonthRecord, MonthlyPerformance, RunoffEvent, Structure, StructureKind,
    roof_runoff_coefficient,
};

impl RooftopDef {
    /// Stored coefficient, else the roof type's, else the stored value as read.
    pub fn coefficient(&self) -> f64 {
        match &self.roof_type {
            Some(roof) if !self.run_off_coefficient.is_numeric() => roof_runoff_coefficient(roof),
            _ => self.run_off_coefficient.value(),
        }
    }
}

impl SiteDef {
    pub fn event(&self) -> RunoffEvent {
        RunoffEvent::new(
            self.rooftop.area.value(),
            self.rooftop.coefficient(),
            self.rainfall.event_mm.value(),
        )
        .with_duration_hours(self.rainfall.duration_hours)
    }

    pub fn tank(&self) -> Structure {
        Structure::storage(
            Dimensions::parse(&self.storage.dimension),
            self.storage.sensor_distance.value(),
        )
        .with_overflow_reading(self.storage.overflow_reading.value())
    }

    pub fn pit(&self) -> Structure {
        Structure::recharge(
            Dimensions::parse(&self.recharge.dimension),
            self.recharge.sensor_distance.value(),
            self.recharge.void_fraction,
            self.recharge.infiltration_rate.value(),
        )
        .with_overflow_reading(self.recharge.overflow_reading.value())
    }

    pub fn structures(&self) -> Vec<Structure> {
        vec![self.tank(), self.pit()]
    }

    /// Structures whose dimension text parsed to zero geometry.
    pub fn degenerate_structures(&self) -> Vec<(StructureKind, &str)> {
        [
            (StructureKind::Storage, self.storage.dimension.as_str()),
            (StructureKind::Recharge, self.recharge.dimension.as_str()),
        ]
        .into_iter()
        .filter(|(_, text)| Dimensions::parse(text).is_degenerate())
        .collect()
    }

    /// Ledger of the recorded monthly rainfall over this roof.
    pub fn monthly_ledger(&self) -> MonthlyPerformance {
        let base = self.event();
        let mut ledger = MonthlyPerformance::new();
        for (&month, &mm) in &self.rainfall.monthly {
            ledger.record(month, MonthRecord::from_event(&base.with_rainfall_mm(mm)));
        }
        ledger
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::*;
    use rf_model::{Month, StructureKind};

    fn site() -> SiteDef {
        SiteDef {
            id: "s1".to_string(),
            name: "Reference".to_string(),
            rooftop: RooftopDef {
                area: "1000".into(),
                run_off_coefficient: 0.8.into(),
                ..RooftopDef::default()
            },
            rainfall: RainfallDef {
                event_mm: 50.0.into(),
                ..RainfallDef::default()
            },
            storage: StorageDef {
                dimension: "2x2x1.5".to_string(),
                sensor_distance: "0.5".into(),
                overflow_reading: LooseNumber::Null,
            },
            recharge: RechargeDef {
                dimension: "2x2x2.5".to_string(),
                sensor_distance: 0.5.into(),
                infiltration_rate: 25.0.into(),
                ..RechargeDef::default()
            },
            ..SiteDef::default()
        }
    }

    #[test]
    fn site_converts_to_model_inputs() {
        let s = site();
        let event = s.event();
        assert_eq!(event.roof_area_sqft, 1000.0);
        assert_eq!(event.runoff_coefficient, 0.8);
        assert_eq!(event.duration_hours, 1.0);

        let tank = s.tank();
        assert_eq!(tank.kind, StructureKind::Storage);
        assert_eq!(tank.sensor_distance_m, 0.5);

        let pit = s.pit();
        let params = pit.recharge_params();
        assert_eq!(params.void_fraction, 0.4);
        assert_eq!(params.infiltration_rate_mm_hr, 25.0);
        assert!(s.degenerate_structures().is_empty());
    }

    #[test]
    fn roof_type_fills_a_missing_coefficient() {
        let mut s = site();
        s.rooftop.run_off_coefficient = LooseNumber::Null;
        s.rooftop.roof_type = Some("Metal".to_string());
        assert_eq!(s.event().runoff_coefficient, 0.85);

        s.rooftop.run_off_coefficient = "n/a".into();
        s.rooftop.roof_type = Some("unknown".to_string());
        assert_eq!(s.event().runoff_coefficient, 0.8);

        s.rooftop.run_off_coefficient = 0.6.into();
        s.rooftop.roof_type = Some("green".to_string());
        assert_eq!(s.event().runoff_coefficient, 0.6);

        s.rooftop.run_off_coefficient = LooseNumber::Null;
        s.rooftop.roof_type = None;
        assert_eq!(s.event().runoff_coefficient, 0.0);
    }

    #[test]
    fn missing_dimensions_are_reported() {
        let mut s = site();
        s.recharge.dimension = String::new();
        s.storage.dimension = "2 by 2 by 1".to_string();
        let bad = s.degenerate_structures();
        assert_eq!(bad.len(), 2);
        assert_eq!(bad[0], (StructureKind::Storage, "2 by 2 by 1"));
        assert_eq!(bad[1].0, StructureKind::Recharge);
    }

    #[test]
    fn ledger_records_only_listed_months() {
        let mut s = site();
        s.rainfall.monthly.insert(Month::July, 50.0);
        s.rainfall.monthly.insert(Month::August, 0.0);

        let ledger = s.monthly_ledger();
        assert_eq!(ledger.get(Month::July).unwrap().rainfall, 4645.0);
        assert_eq!(ledger.get(Month::August).unwrap().rainfall, 0.0);
        assert!(ledger.get(Month::March).is_none());
    }
}
