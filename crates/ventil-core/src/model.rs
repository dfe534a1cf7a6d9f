use crate::error::VentilError;
use crate::parsing::values::parse_number;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Name of the column appended by [`Dataset::concat`].
pub const SOURCE_FILE_COLUMN: &str = "source_file";

/// A single raw table value, before numeric coercion.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Build a cell from raw text. Blank text becomes `Empty`.
    pub fn from_text(s: &str) -> Cell {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    /// Numeric value of the cell, or `None` when it cannot be coerced.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) if v.is_finite() => Some(*v),
            Cell::Number(_) | Cell::Empty => None,
            Cell::Text(s) => parse_number(s),
        }
    }

    /// Text form of the cell for string-based parsing (dates, times).
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Number(v) => Some(v.to_string()),
            Cell::Text(s) => Some(s.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A loaded table: ordered headers plus rows of exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Dataset {
    /// Build a dataset, rejecting any row whose width differs from the header list.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Dataset, VentilError> {
        let expected = headers.len();
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(VentilError::ColumnCountMismatch {
                row,
                expected,
                found: cells.len(),
            });
        }
        Ok(Dataset { headers, rows })
    }

    /// A dataset with headers and no rows.
    pub fn empty(headers: Vec<String>) -> Dataset {
        Dataset {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Cells of one column in row order. Yields nothing for an out-of-range index.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    /// Concatenate named datasets into one table.
    ///
    /// Columns are matched by header name (repeated names within one file
    /// are matched by occurrence), in first-seen order. Cells a part does not
    /// have are left empty. A `source_file` column records which part each
    /// row came from; any existing `source_file` column is replaced.
    pub fn concat(parts: Vec<(String, Dataset)>) -> Dataset {
        let mut keys: Vec<(String, usize)> = Vec::new();
        let mut key_index: HashMap<(String, usize), usize> = HashMap::new();
        let mut part_layouts: Vec<Vec<Option<usize>>> = Vec::with_capacity(parts.len());

        for (_, part) in &parts {
            let mut seen: HashMap<&str, usize> = HashMap::new();
            let mut layout = Vec::with_capacity(part.headers.len());
            for header in &part.headers {
                if header == SOURCE_FILE_COLUMN {
                    layout.push(None);
                    continue;
                }
                let occurrence = seen.entry(header.as_str()).or_insert(0);
                let key = (header.clone(), *occurrence);
                *occurrence += 1;
                let target = *key_index.entry(key.clone()).or_insert_with(|| {
                    keys.push(key);
                    keys.len() - 1
                });
                layout.push(Some(target));
            }
            part_layouts.push(layout);
        }

        let width = keys.len() + 1;
        let mut rows = Vec::new();
        for ((name, part), layout) in parts.into_iter().zip(part_layouts) {
            for row in part.rows {
                let mut combined = vec![Cell::Empty; width];
                for (cell, target) in row.into_iter().zip(&layout) {
                    if let Some(target) = target {
                        combined[*target] = cell;
                    }
                }
                combined[width - 1] = Cell::Text(name.clone());
                rows.push(combined);
            }
        }

        let mut headers: Vec<String> = keys.into_iter().map(|(name, _)| name).collect();
        headers.push(SOURCE_FILE_COLUMN.to_string());
        Dataset { headers, rows }
    }
}

/// How urgent a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// 0 for high, 2 for low.
    pub fn rank(self) -> u8 {
        match self {
            Severity::High => 0,
            Severity::Medium => 1,
            Severity::Low => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

/// Semantic sensor role a column can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Datetime,
    Date,
    Time,
    SuctionPressure,
    DischargePressure,
    SuctionTemp,
    SupplyAirTemp,
    DischargeTemp,
    OutdoorAirTemp,
    IndoorTemp,
    IndoorHumidity,
    OutdoorHumidity,
    CoolingSetpoint,
    HeatingSetpoint,
}

impl Role {
    /// Roles whose columns carry numeric sensor readings.
    pub const NUMERIC: [Role; 11] = [
        Role::SuctionPressure,
        Role::DischargePressure,
        Role::SuctionTemp,
        Role::SupplyAirTemp,
        Role::DischargeTemp,
        Role::OutdoorAirTemp,
        Role::IndoorTemp,
        Role::IndoorHumidity,
        Role::OutdoorHumidity,
        Role::CoolingSetpoint,
        Role::HeatingSetpoint,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Role::Datetime => "Date/time",
            Role::Date => "Date",
            Role::Time => "Time",
            Role::SuctionPressure => "Suction pressure",
            Role::DischargePressure => "Discharge pressure",
            Role::SuctionTemp => "Suction temperature",
            Role::SupplyAirTemp => "Supply air temperature",
            Role::DischargeTemp => "Discharge temperature",
            Role::OutdoorAirTemp => "Outdoor air temperature",
            Role::IndoorTemp => "Indoor temperature",
            Role::IndoorHumidity => "Indoor relative humidity",
            Role::OutdoorHumidity => "Outdoor relative humidity",
            Role::CoolingSetpoint => "Cooling setpoint",
            Role::HeatingSetpoint => "Heating setpoint",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Role::SuctionPressure | Role::DischargePressure => "PSI",
            Role::IndoorHumidity | Role::OutdoorHumidity => "%",
            Role::Datetime | Role::Date | Role::Time => "",
            _ => "°F",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of header classification: one field per role.
///
/// Timestamp roles hold at most one column; every other role may hold
/// several (e.g. one suction pressure per circuit). A column index appears
/// in at most one role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoleMap {
    pub datetime: Option<usize>,
    pub date: Option<usize>,
    pub time: Option<usize>,
    pub suction_pressures: Vec<usize>,
    pub discharge_pressures: Vec<usize>,
    pub suction_temps: Vec<usize>,
    pub supply_air_temps: Vec<usize>,
    pub discharge_temps: Vec<usize>,
    pub outdoor_air_temps: Vec<usize>,
    pub indoor_temps: Vec<usize>,
    pub indoor_humidity: Vec<usize>,
    pub outdoor_humidity: Vec<usize>,
    pub cooling_setpoints: Vec<usize>,
    pub heating_setpoints: Vec<usize>,
}

impl ColumnRoleMap {
    /// Column indices classified into `role`, in column order.
    pub fn indices(&self, role: Role) -> &[usize] {
        match role {
            Role::Datetime => self.datetime.as_slice(),
            Role::Date => self.date.as_slice(),
            Role::Time => self.time.as_slice(),
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
        }
    }

    /// The role a column was classified into, if any.
    pub fn role_of(&self, index: usize) -> Option<Role> {
        [Role::Datetime, Role::Date, Role::Time]
            .into_iter()
            .chain(Role::NUMERIC)
            .find(|role| self.indices(*role).contains(&index))
    }

    /// True when no column was classified.
    pub fn is_empty(&self) -> bool {
        self.classified_count() == 0
    }

    pub fn classified_count(&self) -> usize {
        [Role::Datetime, Role::Date, Role::Time]
            .into_iter()
            .chain(Role::NUMERIC)
            .map(|role| self.indices(role).len())
            .sum()
    }

    /// Record `index` under `role`. Returns false when a single-valued role
    /// is already taken, in which case the map is left unchanged.
    pub(crate) fn assign(&mut self, role: Role, index: usize) -> bool {
        let columns = match role {
            Role::Datetime => return fill_once(&mut self.datetime, index),
            Role::Date => return fill_once(&mut self.date, index),
            Role::Time => return fill_once(&mut self.time, index),
            Role::SuctionPressure => &mut self.suction_pressures,
            Role::DischargePressure => &mut self.discharge_pressures,
            Role::SuctionTemp => &mut self.suction_temps,
            Role::SupplyAirTemp => &mut self.supply_air_temps,
            Role::DischargeTemp => &mut self.discharge_temps,
            Role::OutdoorAirTemp => &mut self.outdoor_air_temps,
            Role::IndoorTemp => &mut self.indoor_temps,
            Role::IndoorHumidity => &mut self.indoor_humidity,
            Role::OutdoorHumidity => &mut self.outdoor_humidity,
            Role::CoolingSetpoint => &mut self.cooling_setpoints,
            Role::HeatingSetpoint => &mut self.heating_setpoints,
        };
        columns.push(index);
        true
    }
}

fn fill_once(slot: &mut Option<usize>, index: usize) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(index);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_row(values: &[&str]) -> Vec<Cell> {
        values.iter().map(|v| Cell::from_text(v)).collect()
    }

    #[test]
    fn test_dataset_rejects_wide_row() {
        let err = Dataset::new(
            vec!["A".into(), "B".into()],
            vec![text_row(&["1", "2"]), text_row(&["1", "2", "3"])],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            VentilError::ColumnCountMismatch {
                row: 1,
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn test_cell_coercion() {
        assert_eq!(Cell::from_text(" 42.5 ").as_number(), Some(42.5));
        assert_eq!(Cell::from_text("n/a").as_number(), None);
        assert_eq!(Cell::Number(f64::NAN).as_number(), None);
        assert!(Cell::from_text("   ").is_empty());
    }

    #[test]
    fn test_concat_unions_columns_and_tags_source() {
        let a = Dataset::new(
            vec!["Date".into(), "SucPr1".into()],
            vec![text_row(&["1/1/2024", "40"])],
        )
        .unwrap();
        let b = Dataset::new(
            vec!["Dischg1".into(), "Date".into()],
            vec![text_row(&["300", "1/2/2024"])],
        )
        .unwrap();

        let combined = Dataset::concat(vec![("a.csv".into(), a), ("b.csv".into(), b)]);

        assert_eq!(
            combined.headers(),
            &["Date", "SucPr1", "Dischg1", SOURCE_FILE_COLUMN]
        );
        assert_eq!(combined.row_count(), 2);
        assert_eq!(combined.rows()[0][2], Cell::Empty);
        assert_eq!(combined.rows()[1][0], Cell::Text("1/2/2024".into()));
        assert_eq!(combined.rows()[1][3], Cell::Text("b.csv".into()));
    }

    #[test]
    fn test_concat_keeps_repeated_headers_apart() {
        let a = Dataset::new(
            vec!["Temp".into(), "Temp".into()],
            vec![text_row(&["1", "2"])],
        )
        .unwrap();
        let combined = Dataset::concat(vec![("a.csv".into(), a)]);
        assert_eq!(combined.headers(), &["Temp", "Temp", SOURCE_FILE_COLUMN]);
        assert_eq!(combined.rows()[0][1], Cell::Text("2".into()));
    }

    #[test]
    fn test_single_valued_role_keeps_first() {
        let mut map = ColumnRoleMap::default();
        assert!(map.assign(Role::Date, 0));
        assert!(!map.assign(Role::Date, 3));
        assert_eq!(map.date, Some(0));
        assert!(map.assign(Role::SuctionPressure, 1));
        assert!(map.assign(Role::SuctionPressure, 2));
        assert_eq!(map.indices(Role::SuctionPressure), &[1, 2]);
        assert_eq!(map.role_of(2), Some(Role::SuctionPressure));
        assert_eq!(map.classified_count(), 3);
    }
}
