pub mod header;
pub mod timeline;
pub mod values;

use crate::model::{ColumnRoleMap, Dataset, Role};
use serde::{Deserialize, Serialize};

/// The coerced readings of one classified column.
///
/// Blank and non-numeric cells are dropped, so `values` is never longer
/// than the dataset and positions no longer line up with rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSeries {
    pub column: usize,
    pub name: String,
    pub values: Vec<f64>,
}

impl NumericSeries {
    pub fn from_column(dataset: &Dataset, column: usize) -> NumericSeries {
        let name = dataset
            .headers()
            .get(column)
            .cloned()
            .unwrap_or_default();
        let values = dataset.column(column).filter_map(|c| c.as_number()).collect();
        NumericSeries {
            column,
            name,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Numeric series of every classified sensor column, grouped by role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleSeries {
    pub suction_pressures: Vec<NumericSeries>,
    pub discharge_pressures: Vec<NumericSeries>,
    pub suction_temps: Vec<NumericSeries>,
    pub supply_air_temps: Vec<NumericSeries>,
    pub discharge_temps: Vec<NumericSeries>,
    pub outdoor_air_temps: Vec<NumericSeries>,
    pub indoor_temps: Vec<NumericSeries>,
    pub indoor_humidity: Vec<NumericSeries>,
    pub outdoor_humidity: Vec<NumericSeries>,
    pub cooling_setpoints: Vec<NumericSeries>,
    pub heating_setpoints: Vec<NumericSeries>,
}

impl RoleSeries {
    pub fn from_dataset(dataset: &Dataset, roles: &ColumnRoleMap) -> RoleSeries {
        let extract = |role: Role| -> Vec<NumericSeries> {
            roles
                .indices(role)
                .iter()
                .map(|&i| NumericSeries::from_column(dataset, i))
                .collect()
        };
        RoleSeries {
            suction_pressures: extract(Role::SuctionPressure),
            discharge_pressures: extract(Role::DischargePressure),
            suction_temps: extract(Role::SuctionTemp),
            supply_air_temps: extract(Role::SupplyAirTemp),
            discharge_temps: extract(Role::DischargeTemp),
            outdoor_air_temps: extract(Role::OutdoorAirTemp),
            indoor_temps: extract(Role::IndoorTemp),
            indoor_humidity: extract(Role::IndoorHumidity),
            outdoor_humidity: extract(Role::OutdoorHumidity),
            cooling_setpoints: extract(Role::CoolingSetpoint),
            heating_setpoints: extract(Role::HeatingSetpoint),
        }
    }

    /// Series classified into `role`. Timestamp roles have none.
    pub fn get(&self, role: Role) -> &[NumericSeries] {
        match role {
            Role::SuctionPressure => &self.suction_pressures,
            Role::DischargePressure => &self.discharge_pressures,
            Role::SuctionTemp => &self.suction_temps,
            Role::SupplyAirTemp => &self.supply_air_temps,
            Role::DischargeTemp => &self.discharge_temps,
            Role::OutdoorAirTemp => &self.outdoor_air_temps,
            Role::IndoorTemp => &self.indoor_temps,
            Role::IndoorHumidity => &self.indoor_humidity,
            Role::OutdoorHumidity => &self.outdoor_humidity,
            Role::CoolingSetpoint => &self.cooling_setpoints,
            Role::HeatingSetpoint => &self.heating_setpoints,
            Role::Datetime | Role::Date | Role::Time => &[],
        }
    }

    /// Every series across the given roles, role by role.
    pub fn across<'a>(&'a self, roles: &'a [Role]) -> impl Iterator<Item = &'a NumericSeries> + 'a {
        roles.iter().flat_map(move |r| self.get(*r).iter())
    }

    /// Every numeric series, in `Role::NUMERIC` order.
    pub fn all(&self) -> impl Iterator<Item = &NumericSeries> + '_ {
        self.across(&Role::NUMERIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;
    use crate::parsing::header::classify_headers;

    #[test]
    fn test_series_drops_bad_cells() {
        let ds = Dataset::new(
            vec!["SucPr1".into()],
            vec![
                vec![Cell::from_text("40")],
                vec![Cell::from_text("ALARM")],
                vec![Cell::Empty],
                vec![Cell::Number(42.0)],
            ],
        )
        .unwrap();
        let s = NumericSeries::from_column(&ds, 0);
        assert_eq!(s.name, "SucPr1");
        assert_eq!(s.values, vec![40.0, 42.0]);
    }

    #[test]
    fn test_role_series_grouping() {
        let ds = Dataset::new(
            vec!["SucPr1".into(), "SucPr2".into(), "Indoor Temp".into()],
            vec![vec![Cell::Number(40.0), Cell::Number(45.0), Cell::Number(72.0)]],
        )
        .unwrap();
        let roles = classify_headers(ds.headers());
        let series = RoleSeries::from_dataset(&ds, &roles);
        assert_eq!(series.suction_pressures.len(), 2);
        assert_eq!(series.suction_pressures[1].name, "SucPr2");
        assert_eq!(series.get(Role::IndoorTemp)[0].values, vec![72.0]);
        assert!(series.get(Role::Date).is_empty());
        assert_eq!(series.all().count(), 3);
    }
}
